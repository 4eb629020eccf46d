//! Classification of key action values.
//!
//! An action value is stored as a plain string. It is either a primitive
//! keycode/macro expression that is copied verbatim into generated code, or a
//! layer reference token `[Name]` naming another layer.

/// Token emitted for positions without an explicit binding (QMK `KC_TRNS` alias).
pub const TRANSPARENT: &str = "_______";

/// Keycode wrapper used to momentarily activate a referenced layer.
pub const MOMENTARY_LAYER_FN: &str = "MO";

/// Borrowed view of an action value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// `[Name]`: momentarily activate the layer called `Name`
    LayerRef(&'a str),
    /// Anything else, emitted as-is
    Keycode(&'a str),
}

impl<'a> Action<'a> {
    /// Classifies an action value.
    ///
    /// # Examples
    ///
    /// ```
    /// use redox_layout_editor::models::Action;
    ///
    /// assert_eq!(Action::parse("[NAV]"), Action::LayerRef("NAV"));
    /// assert_eq!(Action::parse("KC_A"), Action::Keycode("KC_A"));
    /// ```
    #[must_use]
    pub fn parse(value: &'a str) -> Self {
        value
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .map_or(Self::Keycode(value), Self::LayerRef)
    }

    /// Name of the referenced layer, if this is a layer reference.
    #[must_use]
    pub const fn layer_name(self) -> Option<&'a str> {
        match self {
            Self::LayerRef(name) => Some(name),
            Self::Keycode(_) => None,
        }
    }

    /// Renders the value as it appears in generated firmware code.
    ///
    /// Layer references become `MO(_Name)`; the `_Name` macro is not checked
    /// against the current layers.
    #[must_use]
    pub fn to_firmware(self) -> String {
        match self {
            Self::LayerRef(name) => format!("{MOMENTARY_LAYER_FN}({})", layer_macro(name)),
            Self::Keycode(code) => code.to_string(),
        }
    }
}

/// Builds the layer reference token for a layer name.
#[must_use]
pub fn layer_ref_token(name: &str) -> String {
    format!("[{name}]")
}

/// Name of the `#define` holding a layer's numeric index.
#[must_use]
pub fn layer_macro(name: &str) -> String {
    format!("_{name}")
}
