//! Data models for layouts, layers and key positions.
//!
//! Models are independent of UI and I/O. All editing goes through
//! [`crate::services::LayerEditor`].

pub mod action;
pub mod layer;
pub mod layout;
pub mod position;

pub use action::{Action, MOMENTARY_LAYER_FN, TRANSPARENT};
pub use layer::{Keymap, KeymapEntry, Layer};
pub use layout::{Layout, DEFAULT_BASE_LAYER};
pub use position::{KeyGrid, PositionId, PositionSpace};
