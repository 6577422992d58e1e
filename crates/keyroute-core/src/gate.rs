//! Focus and dialog gating.
//!
//! The engine never inspects the host's element tree. It asks an injected
//! [`FocusProbe`] whether the event target is the neutral focus owner, and
//! reads the open dialog (if any) from the per-event [`HostState`].

use crate::types::{ActionId, KeyEdge, KeyEvent, TargetId};

/// Decides whether the focused element lets shortcuts through.
pub trait FocusProbe {
    fn is_focus_neutral(&self, target: TargetId) -> bool;
}

/// Neutral iff the target is exactly this element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeutralTarget(pub TargetId);

impl FocusProbe for NeutralTarget {
    fn is_focus_neutral(&self, target: TargetId) -> bool {
        self.0 == target
    }
}

impl<F> FocusProbe for F
where
    F: Fn(TargetId) -> bool,
{
    fn is_focus_neutral(&self, target: TargetId) -> bool {
        self(target)
    }
}

/// A blocking confirmation dialog owned by the host.
pub trait Modal {
    /// The one action still allowed to fire while the dialog is open.
    fn allowed_action(&self) -> Option<&ActionId>;
    fn close(&mut self);
}

/// Modal backed by a close callback.
pub struct ConfirmDialog<F: FnMut()> {
    allowed: Option<ActionId>,
    on_close: F,
}

impl<F: FnMut()> ConfirmDialog<F> {
    pub fn new(allowed: Option<ActionId>, on_close: F) -> Self {
        Self { allowed, on_close }
    }
}

impl<F: FnMut()> Modal for ConfirmDialog<F> {
    fn allowed_action(&self) -> Option<&ActionId> {
        self.allowed.as_ref()
    }

    fn close(&mut self) {
        (self.on_close)();
    }
}

/// Host state sampled at the time of one event.
pub struct HostState<'a> {
    pub target: TargetId,
    pub modal: Option<&'a mut dyn Modal>,
}

impl<'a> HostState<'a> {
    pub fn focused(target: TargetId) -> Self {
        Self {
            target,
            modal: None,
        }
    }

    pub fn with_modal(target: TargetId, modal: &'a mut dyn Modal) -> Self {
        Self {
            target,
            modal: Some(modal),
        }
    }
}

/// Gate verdict for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Dispatch normally.
    Open,
    /// A dialog is open; only this action may fire (none if `None`).
    Restricted(Option<ActionId>),
    /// Focus is on an interactive element; nothing fires.
    Closed,
    /// Escape closed the open dialog. The event is consumed.
    Dismissed,
}

impl Gate {
    pub fn permits(&self, action: &ActionId) -> bool {
        match self {
            Gate::Open => true,
            Gate::Restricted(allowed) => allowed.as_ref() == Some(action),
            Gate::Closed | Gate::Dismissed => false,
        }
    }
}

pub fn evaluate(event: &KeyEvent, host: &mut HostState<'_>, focus: &dyn FocusProbe) -> Gate {
    if let Some(modal) = host.modal.as_deref_mut() {
        if event.edge == KeyEdge::Down && event.code.is_escape() {
            modal.close();
            return Gate::Dismissed;
        }
        return Gate::Restricted(modal.allowed_action().cloned());
    }

    if focus.is_focus_neutral(host.target) {
        Gate::Open
    } else {
        Gate::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Modifiers;
    use std::cell::Cell;

    const BODY: TargetId = TargetId(1);
    const INPUT: TargetId = TargetId(2);

    #[test]
    fn test_neutral_target_identity() {
        let probe = NeutralTarget(BODY);
        assert!(probe.is_focus_neutral(BODY));
        assert!(!probe.is_focus_neutral(INPUT));
    }

    #[test]
    fn test_closure_probe() {
        let probe = |t: TargetId| t.0 < 10;
        assert!(probe.is_focus_neutral(TargetId(3)));
        assert!(!probe.is_focus_neutral(TargetId(30)));
    }

    #[test]
    fn test_focus_gate() {
        let probe = NeutralTarget(BODY);
        let ev = KeyEvent::down("g", Modifiers::ctrl());
        assert_eq!(evaluate(&ev, &mut HostState::focused(BODY), &probe), Gate::Open);
        assert_eq!(evaluate(&ev, &mut HostState::focused(INPUT), &probe), Gate::Closed);
    }

    #[test]
    fn test_escape_closes_dialog_even_off_neutral_focus() {
        let closed = Cell::new(0);
        let mut dialog = ConfirmDialog::new(None, || closed.set(closed.get() + 1));
        let probe = NeutralTarget(BODY);
        let ev = KeyEvent::down("Escape", Modifiers::none());
        let gate = evaluate(&ev, &mut HostState::with_modal(INPUT, &mut dialog), &probe);
        assert_eq!(gate, Gate::Dismissed);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_escape_release_does_not_close() {
        let closed = Cell::new(false);
        let mut dialog = ConfirmDialog::new(None, || closed.set(true));
        let probe = NeutralTarget(BODY);
        let ev = KeyEvent::up("escape", Modifiers::none());
        let gate = evaluate(&ev, &mut HostState::with_modal(BODY, &mut dialog), &probe);
        assert_eq!(gate, Gate::Restricted(None));
        assert!(!closed.get());
    }

    #[test]
    fn test_dialog_restricts_to_allowed_action() {
        let mut dialog = ConfirmDialog::new(Some(ActionId::from("export")), || {});
        let probe = NeutralTarget(BODY);
        let ev = KeyEvent::down("e", Modifiers::ctrl());
        let gate = evaluate(&ev, &mut HostState::with_modal(BODY, &mut dialog), &probe);
        assert!(gate.permits(&ActionId::from("export")));
        assert!(!gate.permits(&ActionId::from("openBindingsDialog")));
    }
}
