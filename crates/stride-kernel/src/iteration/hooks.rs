//! Lifecycle hook dispatcher.
//!
//! Four events: start (once per logical job, first slice only), complete (once,
//! on true completion), shutdown (once per slice that ends in a yield or a
//! completion), and an optional per-item hook after each successful iteration.
//! Hooks run synchronously in registration order on the runner's thread; a hook
//! error aborts the slice exactly like a callback error. Lists accumulate, so
//! layered job definitions compose hooks instead of overriding them.

use crate::iteration::cursor::Cursor;
use crate::iteration::error::IterationError;
use crate::iteration::run_state::RunState;

/// Read-only view of run state passed to every hook.
#[derive(Clone, Debug)]
pub struct HookContext<'a> {
    pub cursor_position: Option<&'a Cursor>,
    pub times_interrupted: u32,
    pub executions: u32,
    pub elapsed: Option<chrono::Duration>,
}

impl<'a> HookContext<'a> {
    pub fn from_state(state: &'a RunState) -> Self {
        Self {
            cursor_position: state.cursor_position.as_ref(),
            times_interrupted: state.times_interrupted,
            executions: state.executions,
            elapsed: state.elapsed(),
        }
    }
}

type Hook = Box<dyn Fn(&HookContext<'_>) -> Result<(), IterationError> + Send + Sync>;

/// Ordered hook lists for the four lifecycle events.
#[derive(Default)]
pub struct LifecycleHooks {
    on_start: Vec<Hook>,
    on_complete: Vec<Hook>,
    on_shutdown: Vec<Hook>,
    after_item: Vec<Hook>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(
        mut self,
        hook: impl Fn(&HookContext<'_>) -> Result<(), IterationError> + Send + Sync + 'static,
    ) -> Self {
        self.on_start.push(Box::new(hook));
        self
    }

    pub fn on_complete(
        mut self,
        hook: impl Fn(&HookContext<'_>) -> Result<(), IterationError> + Send + Sync + 'static,
    ) -> Self {
        self.on_complete.push(Box::new(hook));
        self
    }

    pub fn on_shutdown(
        mut self,
        hook: impl Fn(&HookContext<'_>) -> Result<(), IterationError> + Send + Sync + 'static,
    ) -> Self {
        self.on_shutdown.push(Box::new(hook));
        self
    }

    pub fn after_item(
        mut self,
        hook: impl Fn(&HookContext<'_>) -> Result<(), IterationError> + Send + Sync + 'static,
    ) -> Self {
        self.after_item.push(Box::new(hook));
        self
    }

    fn fire(hooks: &[Hook], ctx: &HookContext<'_>) -> Result<(), IterationError> {
        for hook in hooks {
            hook(ctx)?;
        }
        Ok(())
    }

    pub fn fire_start(&self, ctx: &HookContext<'_>) -> Result<(), IterationError> {
        Self::fire(&self.on_start, ctx)
    }

    pub fn fire_complete(&self, ctx: &HookContext<'_>) -> Result<(), IterationError> {
        Self::fire(&self.on_complete, ctx)
    }

    pub fn fire_shutdown(&self, ctx: &HookContext<'_>) -> Result<(), IterationError> {
        Self::fire(&self.on_shutdown, ctx)
    }

    pub fn fire_after_item(&self, ctx: &HookContext<'_>) -> Result<(), IterationError> {
        Self::fire(&self.after_item, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn hooks_fire_in_registration_order_and_accumulate() {
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&order);
        let second = Arc::clone(&order);
        let hooks = LifecycleHooks::new()
            .on_start(move |_| {
                first.lock().unwrap().push("first");
                Ok(())
            })
            .on_start(move |_| {
                second.lock().unwrap().push("second");
                Ok(())
            });
        let state = RunState::fresh();
        hooks.fire_start(&HookContext::from_state(&state)).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn a_failing_hook_stops_the_list() {
        let reached: Arc<Mutex<bool>> = Arc::new(Mutex::new(false));
        let probe = Arc::clone(&reached);
        let hooks = LifecycleHooks::new()
            .on_complete(|_| Err(IterationError::Hook("boom".into())))
            .on_complete(move |_| {
                *probe.lock().unwrap() = true;
                Ok(())
            });
        let state = RunState::fresh();
        let err = hooks
            .fire_complete(&HookContext::from_state(&state))
            .unwrap_err();
        assert!(matches!(err, IterationError::Hook(_)));
        assert!(!*reached.lock().unwrap(), "later hooks must not run");
    }
}
