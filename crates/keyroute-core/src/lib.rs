pub mod actions;
pub mod binding;
pub mod engine;
pub mod gate;
pub mod keymap;
pub mod layout;
pub mod modifier;
pub mod pressed;
pub mod types;

pub use actions::{ActionRegistry, Actions};
pub use engine::Engine;
pub use gate::{ConfirmDialog, FocusProbe, HostState, Modal, NeutralTarget};
pub use layout::{LayoutError, LayoutHandle, LayoutMap, LayoutSource};
pub use types::{ActionId, KeyAction, KeyCode, KeyEdge, KeyEvent, Modifiers, Profile, RawBinding, TargetId};
