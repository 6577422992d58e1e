use crate::modifier::{modifier_from_name, Modifier};
use crate::pressed::PressedKeySet;
use crate::types::{ActionId, KeyCode, Modifiers, RawBinding};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A binding compiled for lookup by its primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBinding {
    pub action: ActionId,
    pub primary_key: KeyCode,
    pub extra_keys: BTreeSet<KeyCode>,
    pub require_ctrl: bool,
    pub require_shift: bool,
    pub require_alt: bool,
    pub require_meta: bool,
}

impl NormalizedBinding {
    /// Compiles one raw binding. `None` when the combination names no
    /// non-modifier key, since there is nothing to index it by.
    pub fn from_raw(raw: &RawBinding) -> Option<Self> {
        let mut mods = Vec::new();
        let mut keys = Vec::new();
        for token in raw.combination.split('+') {
            let token = token.trim().to_ascii_lowercase();
            if token.is_empty() {
                continue;
            }
            match modifier_from_name(&token) {
                Some(m) => mods.push(m),
                None => keys.push(KeyCode::new(&token)),
            }
        }

        let primary_key = keys.pop()?;
        Some(Self {
            action: raw.action.clone(),
            primary_key,
            extra_keys: keys.into_iter().collect(),
            require_ctrl: mods.contains(&Modifier::Ctrl),
            require_shift: mods.contains(&Modifier::Shift),
            require_alt: mods.contains(&Modifier::Alt),
            require_meta: mods.contains(&Modifier::Meta),
        })
    }

    /// Exact modifier equality: extra held modifiers reject the match.
    pub fn modifiers_match(&self, mods: Modifiers) -> bool {
        self.require_ctrl == mods.ctrl
            && self.require_shift == mods.shift
            && self.require_alt == mods.alt
            && self.require_meta == mods.meta
    }

    pub fn matches(&self, mods: Modifiers, pressed: &PressedKeySet) -> bool {
        self.modifiers_match(mods) && pressed.contains_all(self.extra_keys.iter())
    }
}

/// Normalized bindings grouped by primary key, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct BindingIndex {
    by_primary: HashMap<KeyCode, Vec<NormalizedBinding>>,
    len: usize,
}

impl BindingIndex {
    pub fn build(raw: &[RawBinding]) -> Self {
        let mut by_primary: HashMap<KeyCode, Vec<NormalizedBinding>> = HashMap::new();
        let mut len = 0;
        for binding in raw {
            match NormalizedBinding::from_raw(binding) {
                Some(nb) => {
                    by_primary.entry(nb.primary_key.clone()).or_default().push(nb);
                    len += 1;
                }
                None => {
                    debug!(
                        "Dropping binding '{}' -> {}: no primary key",
                        binding.combination, binding.action
                    );
                }
            }
        }
        Self { by_primary, len }
    }

    pub fn candidates(&self, primary: &KeyCode) -> &[NormalizedBinding] {
        self.by_primary
            .get(primary)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First binding for `primary` whose modifiers and extra keys are satisfied.
    pub fn find(
        &self,
        primary: &KeyCode,
        mods: Modifiers,
        pressed: &PressedKeySet,
    ) -> Option<&NormalizedBinding> {
        self.candidates(primary)
            .iter()
            .find(|b| b.matches(mods, pressed))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &KeyCode> {
        self.by_primary.keys()
    }
}
