//! Layer and keymap entry data structures.

use crate::models::action::{Action, TRANSPARENT};
use crate::models::position::PositionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse mapping from key position to action value.
///
/// A position missing from the map is transparent.
pub type Keymap = BTreeMap<PositionId, String>;

/// One position -> action binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapEntry {
    /// Key slot
    pub position: PositionId,
    /// Action value (keycode, macro expression or `[Layer]` reference)
    pub value: String,
}

impl KeymapEntry {
    /// Creates a new entry.
    pub fn new(position: impl Into<PositionId>, value: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            value: value.into(),
        }
    }

    /// Parsed view of the action value.
    #[must_use]
    pub fn action(&self) -> Action<'_> {
        Action::parse(&self.value)
    }
}

/// A single firmware layer: a name plus its key bindings.
///
/// # Validation
///
/// - Name must be non-empty (checked by the editor and the save-file parser)
/// - Name should be a C identifier to compile; only the export lint checks this
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layer {
    /// Human-readable name, also used for `#define _<name>` in generated code
    pub name: String,
    /// Explicit bindings; absent positions are transparent
    pub keymap: Keymap,
}

impl Layer {
    /// Creates a layer with an empty keymap.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keymap: Keymap::new(),
        }
    }

    /// Creates a layer with the given keymap.
    pub fn with_keymap(name: impl Into<String>, keymap: Keymap) -> Self {
        Self {
            name: name.into(),
            keymap,
        }
    }

    /// Gets the explicit binding at a position.
    #[must_use]
    pub fn get(&self, position: &str) -> Option<&str> {
        self.keymap.get(position).map(String::as_str)
    }

    /// Value displayed and exported for a position (transparent if unbound).
    #[must_use]
    pub fn value_or_transparent(&self, position: &str) -> &str {
        self.get(position).unwrap_or(TRANSPARENT)
    }

    /// Binds a position to a value, returning the previous value.
    pub fn set(&mut self, position: impl Into<PositionId>, value: impl Into<String>) -> Option<String> {
        self.keymap.insert(position.into(), value.into())
    }

    /// Removes the binding at a position, making it transparent.
    pub fn clear(&mut self, position: &str) -> Option<String> {
        self.keymap.remove(position)
    }

    /// Iterates over the explicit bindings in position order.
    pub fn entries(&self) -> impl Iterator<Item = KeymapEntry> + '_ {
        self.keymap
            .iter()
            .map(|(position, value)| KeymapEntry::new(position.clone(), value.clone()))
    }
}
