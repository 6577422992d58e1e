use crate::types::ActionId;
use std::collections::HashMap;

/// Resolves action ids to the application's handlers.
pub trait Actions {
    /// Runs the on-trigger form of `action`.
    ///
    /// Returns `None` if no handler is registered, otherwise the handler's
    /// optional boolean result.
    fn trigger(&mut self, action: &ActionId) -> Option<Option<bool>>;

    /// Runs the on-release form of `action`. Returns whether one existed.
    fn release(&mut self, _action: &ActionId) -> bool {
        false
    }
}

type TriggerFn = Box<dyn FnMut() -> Option<bool>>;
type ReleaseFn = Box<dyn FnMut()>;

/// Closure-backed [`Actions`]. Registering an id again replaces its handler.
#[derive(Default)]
pub struct ActionRegistry {
    triggers: HashMap<ActionId, TriggerFn>,
    releases: HashMap<ActionId, ReleaseFn>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_trigger(&mut self, action: impl Into<ActionId>, mut f: impl FnMut() + 'static) {
        self.triggers.insert(
            action.into(),
            Box::new(move || {
                f();
                None
            }),
        );
    }

    /// Like [`on_trigger`](Self::on_trigger) for handlers that report a result.
    pub fn on_trigger_with_result(
        &mut self,
        action: impl Into<ActionId>,
        mut f: impl FnMut() -> bool + 'static,
    ) {
        self.triggers
            .insert(action.into(), Box::new(move || Some(f())));
    }

    pub fn on_release(&mut self, action: impl Into<ActionId>, f: impl FnMut() + 'static) {
        self.releases.insert(action.into(), Box::new(f));
    }

    pub fn remove(&mut self, action: &ActionId) {
        self.triggers.remove(action);
        self.releases.remove(action);
    }

    pub fn contains(&self, action: &ActionId) -> bool {
        self.triggers.contains_key(action)
    }
}

impl Actions for ActionRegistry {
    fn trigger(&mut self, action: &ActionId) -> Option<Option<bool>> {
        self.triggers.get_mut(action).map(|f| f())
    }

    fn release(&mut self, action: &ActionId) -> bool {
        match self.releases.get_mut(action) {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("triggers", &self.triggers.keys().collect::<Vec<_>>())
            .field("releases", &self.releases.keys().collect::<Vec<_>>())
            .finish()
    }
}
