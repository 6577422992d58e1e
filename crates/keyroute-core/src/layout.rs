use crate::types::KeyCode;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Physical key code -> display label for the active keyboard layout.
/// Informational only; matching never consults it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutMap {
    labels: HashMap<KeyCode, String>,
}

impl LayoutMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<KeyCode>, label: impl Into<String>) {
        self.labels.insert(code.into(), label.into());
    }

    pub fn label(&self, code: &KeyCode) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<K: Into<KeyCode>, V: Into<String>> FromIterator<(K, V)> for LayoutMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("keyboard layout unavailable: {0}")]
    Unavailable(String),
    #[error("platform layout query failed (code {code})")]
    Platform { code: i32 },
}

/// Host service that reads the current keyboard layout.
pub trait LayoutSource {
    fn fetch(&self) -> Result<LayoutMap, LayoutError>;
}

impl<F> LayoutSource for F
where
    F: Fn() -> Result<LayoutMap, LayoutError>,
{
    fn fetch(&self) -> Result<LayoutMap, LayoutError> {
        self()
    }
}

/// Shared read-only view of the latest layout snapshot.
///
/// Clones share the same slot, so a UI thread can hold one while the
/// engine refreshes it.
#[derive(Debug, Clone, Default)]
pub struct LayoutHandle {
    current: Arc<RwLock<Option<Arc<LayoutMap>>>>,
}

impl LayoutHandle {
    pub fn snapshot(&self) -> Option<Arc<LayoutMap>> {
        self.current.read().clone()
    }

    pub(crate) fn replace(&self, map: LayoutMap) {
        *self.current.write() = Some(Arc::new(map));
    }

    /// Fetches from `source` and swaps the snapshot in on success.
    /// On failure the previous snapshot stays; no retry.
    pub(crate) fn refresh(&self, source: &dyn LayoutSource) -> bool {
        match source.fetch() {
            Ok(map) => {
                debug!("Layout map refreshed ({} keys)", map.len());
                self.replace(map);
                true
            }
            Err(e) => {
                warn!("Layout map fetch failed, keeping previous: {}", e);
                false
            }
        }
    }
}
