use crate::actions::{ActionRegistry, Actions};
use crate::binding::BindingIndex;
use crate::gate::{self, FocusProbe, Gate, HostState};
use crate::layout::{LayoutHandle, LayoutMap, LayoutSource};
use crate::modifier::{classify, Modifier};
use crate::pressed::PressedKeySet;
use crate::types::{KeyAction, KeyEdge, KeyEvent, Profile, RawBinding};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Shortcut dispatch engine.
///
/// Owns the binding index and all per-event state. Feed it every key-down,
/// key-up, focus and blur event from the host loop, in delivery order.
pub struct Engine<A: Actions = ActionRegistry> {
    actions: A,
    focus: Box<dyn FocusProbe>,
    bindings: Vec<RawBinding>,
    index: Arc<BindingIndex>,
    pressed: PressedKeySet,
    alt_action_fired: bool,
    suppress_alt_menu: bool,
    enabled: bool,
    layout_source: Option<Box<dyn LayoutSource>>,
    layout: LayoutHandle,
    on_enabled_change: Option<Box<dyn Fn(bool)>>,
}

impl<A: Actions> Engine<A> {
    pub fn new(actions: A, focus: impl FocusProbe + 'static) -> Self {
        Self {
            actions,
            focus: Box::new(focus),
            bindings: Vec::new(),
            index: Arc::new(BindingIndex::default()),
            pressed: PressedKeySet::default(),
            alt_action_fired: false,
            suppress_alt_menu: true,
            enabled: true,
            layout_source: None,
            layout: LayoutHandle::default(),
            on_enabled_change: None,
        }
    }

    /// Attaches the layout service and fetches the initial map.
    pub fn with_layout_source(mut self, source: impl LayoutSource + 'static) -> Self {
        self.set_layout_source(source);
        self
    }

    pub fn set_layout_source(&mut self, source: impl LayoutSource + 'static) {
        self.layout_source = Some(Box::new(source));
        self.refresh_layout();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            info!("Engine: dispatch {}", if enabled { "enabled" } else { "disabled" });
            if !enabled {
                self.pressed.clear();
                self.alt_action_fired = false;
            }
            if let Some(ref cb) = self.on_enabled_change {
                cb(enabled);
            }
        }
    }

    pub fn set_on_enabled_change(&mut self, cb: impl Fn(bool) + 'static) {
        self.on_enabled_change = Some(Box::new(cb));
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.suppress_alt_menu = profile.suppress_alt_menu;
        self.set_bindings(&profile.bindings);
    }

    pub fn get_profile(&self) -> Profile {
        Profile {
            bindings: self.bindings.clone(),
            suppress_alt_menu: self.suppress_alt_menu,
        }
    }

    /// Replaces the binding table. The new index is built aside and swapped
    /// in whole; an identical list is a no-op. Returns whether it rebuilt.
    pub fn set_bindings(&mut self, bindings: &[RawBinding]) -> bool {
        if self.bindings.as_slice() == bindings {
            debug!("Engine: binding list unchanged, keeping index");
            return false;
        }

        let index = BindingIndex::build(bindings);
        info!(
            "Engine: bindings rebuilt, {} of {} entries indexed",
            index.len(),
            bindings.len()
        );
        self.index = Arc::new(index);
        self.bindings = bindings.to_vec();
        true
    }

    pub fn bindings(&self) -> &[RawBinding] {
        &self.bindings
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    /// Window lost focus. Key-ups may never arrive, so forget held keys.
    pub fn on_window_blur(&mut self) {
        if !self.pressed.is_empty() {
            debug!("Engine: blur, clearing {} pressed keys", self.pressed.len());
        }
        self.pressed.clear();
    }

    /// Window regained focus; the layout may have changed meanwhile.
    pub fn on_window_focus(&mut self) {
        self.refresh_layout();
    }

    /// Re-fetches the layout map. Returns whether a new map was stored.
    pub fn refresh_layout(&mut self) -> bool {
        match self.layout_source.as_deref() {
            Some(source) => self.layout.refresh(source),
            None => false,
        }
    }

    pub fn layout(&self) -> Option<Arc<LayoutMap>> {
        self.layout.snapshot()
    }

    pub fn layout_handle(&self) -> LayoutHandle {
        self.layout.clone()
    }

    pub fn process_key(&mut self, event: &KeyEvent, host: &mut HostState<'_>) -> KeyAction {
        if !self.enabled {
            return KeyAction::Pass;
        }

        // Modifiers are read from the event flags, never matched or tracked.
        if let Some(modifier) = classify(&event.code) {
            if modifier == Modifier::Alt && event.edge == KeyEdge::Up {
                return self.on_alt_release();
            }
            return KeyAction::Pass;
        }

        if event.edge == KeyEdge::Down {
            self.pressed.mark_down(&event.code);
        }

        let action = self.dispatch(event, host);

        if event.edge == KeyEdge::Up {
            self.pressed.mark_up(&event.code);
        }

        action
    }

    fn dispatch(&mut self, event: &KeyEvent, host: &mut HostState<'_>) -> KeyAction {
        let gate = gate::evaluate(event, host, &*self.focus);
        match gate {
            Gate::Dismissed => {
                debug!("Engine: escape closed dialog");
                return KeyAction::Block;
            }
            Gate::Closed => return KeyAction::Pass,
            Gate::Open | Gate::Restricted(_) => {}
        }

        let index = Arc::clone(&self.index);
        let Some(binding) = index.find(&event.code, event.modifiers, &self.pressed) else {
            return KeyAction::Pass;
        };

        if !gate.permits(&binding.action) {
            debug!("Engine: {} suppressed while dialog is open", binding.action);
            return KeyAction::Pass;
        }

        match event.edge {
            KeyEdge::Down => {
                debug!("Engine: {} -> {}", event.code, binding.action);
                match self.actions.trigger(&binding.action) {
                    Some(result) => trace!("Engine: {} returned {:?}", binding.action, result),
                    None => warn!("Engine: no handler registered for {}", binding.action),
                }
                if event.modifiers.alt {
                    self.alt_action_fired = true;
                }
                KeyAction::Block
            }
            KeyEdge::Up => {
                if self.actions.release(&binding.action) {
                    debug!("Engine: released {}", binding.action);
                }
                KeyAction::Pass
            }
        }
    }

    fn on_alt_release(&mut self) -> KeyAction {
        let fired = std::mem::take(&mut self.alt_action_fired);
        if fired && self.suppress_alt_menu {
            debug!("Engine: swallowing alt release after alt chord");
            KeyAction::Block
        } else {
            KeyAction::Pass
        }
    }
}
