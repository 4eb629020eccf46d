//! JSON save-file format.
//!
//! ```json
//! {
//!   "layers": [
//!     { "name": "BASE", "keymap": { "k-1-1": "KC_ESC", "k-5-7": "[NAV]" } }
//!   ]
//! }
//! ```
//!
//! Keymaps are sparse: positions that are not listed are transparent.

use crate::error::LayoutError;
use crate::models::Layout;
use anyhow::{Context, Result};

/// Serializes a layout to pretty-printed JSON (two-space indentation).
pub fn serialize_layout(layout: &Layout) -> Result<String> {
    serde_json::to_string_pretty(layout).context("Failed to serialize layout")
}

/// Parses a layout from save-file text.
///
/// The whole text is parsed and checked before anything is returned, so a
/// caller replacing its layout with the result never sees a partial layout.
///
/// # Errors
///
/// Returns [`LayoutError::Format`] if the text is not JSON, does not have the
/// `{ "layers": [ { "name", "keymap" } ] }` shape, has no layers, or has a
/// layer with an empty name.
pub fn parse_layout_json(text: &str) -> Result<Layout, LayoutError> {
    let layout: Layout =
        serde_json::from_str(text).map_err(|e| LayoutError::format(e.to_string()))?;

    if layout.layers.is_empty() {
        return Err(LayoutError::format("layout must contain at least one layer"));
    }

    if let Some(index) = layout.layers.iter().position(|layer| layer.name.is_empty()) {
        return Err(LayoutError::format(format!("layer {index} has an empty name")));
    }

    Ok(layout)
}

/// Parses a layout from raw file bytes (must be UTF-8).
pub fn parse_layout_bytes(bytes: &[u8]) -> Result<Layout, LayoutError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LayoutError::format(format!("file is not valid UTF-8: {e}")))?;
    parse_layout_json(text)
}
