//! Layout: the ordered list of layers.

use crate::models::layer::Layer;
use serde::{Deserialize, Serialize};

/// Name of the single layer in a fresh layout.
pub const DEFAULT_BASE_LAYER: &str = "BASE";

/// Complete multi-layer key mapping.
///
/// # Invariants
///
/// - Layer order is significant: index 0 is the base layer and each index is
///   the numeric firmware layer id at export time
/// - Once owned by a `LayerEditor` there is always at least one layer
/// - Layer references are by name and may dangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Ordered layers, base layer first
    pub layers: Vec<Layer>,
}

impl Layout {
    /// Creates a layout from a list of layers.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the layout has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Gets a reference to the layer at the given index.
    #[must_use]
    pub fn get_layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Index of the first layer with the given name.
    #[must_use]
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name == name)
    }

    /// Layer names in order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }
}

impl Default for Layout {
    /// One empty layer named `BASE`.
    fn default() -> Self {
        Self::new(vec![Layer::new(DEFAULT_BASE_LAYER)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.layers[0].name, "BASE");
        assert!(layout.layers[0].keymap.is_empty());
    }

    #[test]
    fn test_layer_index_first_match() {
        let layout = Layout::new(vec![Layer::new("BASE"), Layer::new("NAV"), Layer::new("NAV")]);
        assert_eq!(layout.layer_index("NAV"), Some(1));
        assert_eq!(layout.layer_index("GHOST"), None);
        assert_eq!(layout.layer_names().collect::<Vec<_>>(), vec!["BASE", "NAV", "NAV"]);
    }

    #[test]
    fn test_get_layer_out_of_range() {
        let layout = Layout::default();
        assert!(layout.get_layer(1).is_none());
        assert!(layout.get_layer(0).is_some());
    }
}
