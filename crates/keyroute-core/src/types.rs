use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifier as reported by the host (e.g. `g`, `slash`, `controlleft`).
/// Stored trimmed and lowercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_escape(&self) -> bool {
        matches!(self.0.as_str(), "escape" | "esc")
    }
}

impl From<String> for KeyCode {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for KeyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<KeyCode> for String {
    fn from(k: KeyCode) -> Self {
        k.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque name of an application action. Resolution to a callback is up to
/// the [`Actions`](crate::actions::Actions) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of the element that held focus when the event was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Live modifier flags carried by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const fn none() -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::none()
        }
    }

    pub const fn shift() -> Self {
        Self {
            shift: true,
            ..Self::none()
        }
    }

    pub const fn alt() -> Self {
        Self {
            alt: true,
            ..Self::none()
        }
    }

    pub const fn is_empty(self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.meta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// A raw key event as delivered by the host event loop.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub edge: KeyEdge,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn down(code: impl Into<KeyCode>, modifiers: Modifiers) -> Self {
        Self {
            code: code.into(),
            edge: KeyEdge::Down,
            modifiers,
        }
    }

    pub fn up(code: impl Into<KeyCode>, modifiers: Modifiers) -> Self {
        Self {
            code: code.into(),
            edge: KeyEdge::Up,
            modifiers,
        }
    }
}

/// What the host should do with the event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the event alone (default behavior and other handlers still run).
    Pass,
    /// Consume the event: prevent default and stop propagation.
    Block,
}

/// A configured key combination, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBinding {
    pub combination: String,
    pub action: ActionId,
}

impl RawBinding {
    pub fn new(combination: impl Into<String>, action: impl Into<ActionId>) -> Self {
        Self {
            combination: combination.into(),
            action: action.into(),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(default)]
    pub bindings: Vec<RawBinding>,
    /// Swallow the Alt release that follows a consumed Alt chord.
    #[serde(default = "default_suppress_alt_menu")]
    pub suppress_alt_menu: bool,
}

fn default_suppress_alt_menu() -> bool {
    true
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            suppress_alt_menu: true,
        }
    }
}
