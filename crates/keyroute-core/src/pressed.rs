use crate::modifier::is_modifier;
use crate::types::KeyCode;
use std::collections::HashSet;

/// Non-modifier keys currently held down.
///
/// Modifiers are never tracked here; their state is read from each event's
/// live flags instead.
#[derive(Debug, Clone, Default)]
pub struct PressedKeySet {
    pressed: HashSet<KeyCode>,
}

impl PressedKeySet {
    pub fn mark_down(&mut self, code: &KeyCode) {
        if !is_modifier(code) {
            self.pressed.insert(code.clone());
        }
    }

    pub fn mark_up(&mut self, code: &KeyCode) {
        if !is_modifier(code) {
            self.pressed.remove(code);
        }
    }

    /// Drops everything. Used on focus loss, where key-ups may never arrive.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn contains(&self, code: &KeyCode) -> bool {
        self.pressed.contains(code)
    }

    pub fn contains_all<'a>(&self, mut codes: impl Iterator<Item = &'a KeyCode>) -> bool {
        codes.all(|c| self.pressed.contains(c))
    }

    pub fn len(&self) -> usize {
        self.pressed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}
