use crate::types::{KeyCode, Modifiers};

/// Logical modifier class. Left/right physical variants collapse into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Meta,
}

impl Modifier {
    /// Whether this modifier is active in the given live flags.
    pub const fn is_set(self, mods: Modifiers) -> bool {
        match self {
            Modifier::Ctrl => mods.ctrl,
            Modifier::Shift => mods.shift,
            Modifier::Alt => mods.alt,
            Modifier::Meta => mods.meta,
        }
    }
}

/// Classifies a lowercase key name. Returns `None` for non-modifier keys.
pub fn modifier_from_name(name: &str) -> Option<Modifier> {
    match name {
        "ctrl" | "control" | "controlleft" | "controlright" => Some(Modifier::Ctrl),
        "shift" | "shiftleft" | "shiftright" => Some(Modifier::Shift),
        "alt" | "altleft" | "altright" | "option" => Some(Modifier::Alt),
        "meta" | "metaleft" | "metaright" | "cmd" | "command" | "super" | "win" | "os"
        | "osleft" | "osright" => Some(Modifier::Meta),
        _ => None,
    }
}

pub fn classify(code: &KeyCode) -> Option<Modifier> {
    modifier_from_name(code.as_str())
}

pub fn is_modifier(code: &KeyCode) -> bool {
    classify(code).is_some()
}
