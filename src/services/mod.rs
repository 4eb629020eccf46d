//! Service layer for editing and file I/O.
//!
//! This module contains the layer editor that owns the layout, the option
//! lists a host UI mirrors, and the file service used by the CLI and shell.

pub mod layer_editor;
pub mod layouts;
pub mod option_lists;

pub use layer_editor::{LayerEditor, LAST_LAYER_REFUSAL};
pub use layouts::LayoutService;
pub use option_lists::{OptionLists, LAYER_REF_OFFSET};
