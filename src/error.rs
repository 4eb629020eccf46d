//! Error types for layout editing and save-file parsing.

use thiserror::Error;

/// Errors raised by the layout model, the editor and the save-file parser.
///
/// Dangling layer references are not errors; the export lint reports them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The save file does not have the expected structure.
    #[error("Invalid layout file: {0}")]
    Format(String),

    /// The operation would break a layout invariant (e.g. removing the last layer).
    #[error("{0}")]
    InvariantViolation(String),

    /// A layer index outside of the current layer list.
    #[error("Layer index {index} is out of range (layout has {len} layers)")]
    LayerOutOfRange {
        /// Requested index
        index: usize,
        /// Number of layers at the time of the request
        len: usize,
    },

    /// A layer name was empty.
    #[error("Layer name cannot be empty")]
    EmptyName,
}

impl LayoutError {
    /// Shorthand for a [`LayoutError::Format`] error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LayoutError::format("missing field `layers`").to_string(),
            "Invalid layout file: missing field `layers`"
        );
        assert_eq!(
            LayoutError::LayerOutOfRange { index: 3, len: 2 }.to_string(),
            "Layer index 3 is out of range (layout has 2 layers)"
        );
        assert_eq!(LayoutError::EmptyName.to_string(), "Layer name cannot be empty");
    }
}
