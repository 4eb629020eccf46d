//! Option lists a host UI renders next to the layout.
//!
//! Two kinds of lists are kept in sync with the layer sequence:
//!
//! - the layer selector: one entry per layer name, in layer order
//! - one option list per key position:
//!   `[_______, [L0], [L1], ..., <keycode palette>]`
//!
//! Layer reference options always mirror layer order and start at
//! [`LAYER_REF_OFFSET`], after the transparent sentinel.

use crate::models::action::layer_ref_token;
use crate::models::{PositionId, TRANSPARENT};
use std::collections::BTreeMap;

/// Number of non-reference entries preceding the layer references in a key's option list.
pub const LAYER_REF_OFFSET: usize = 1;

/// Keycodes offered for every key when no palette is configured.
pub const DEFAULT_KEYCODES: &[&str] = &[
    "XXXXXXX", "KC_A", "KC_B", "KC_C", "KC_D", "KC_E", "KC_F", "KC_G", "KC_H", "KC_I", "KC_J",
    "KC_K", "KC_L", "KC_M", "KC_N", "KC_O", "KC_P", "KC_Q", "KC_R", "KC_S", "KC_T", "KC_U", "KC_V",
    "KC_W", "KC_X", "KC_Y", "KC_Z", "KC_1", "KC_2", "KC_3", "KC_4", "KC_5", "KC_6", "KC_7", "KC_8",
    "KC_9", "KC_0", "KC_F1", "KC_F2", "KC_F3", "KC_F4", "KC_F5", "KC_F6", "KC_F7", "KC_F8",
    "KC_F9", "KC_F10", "KC_F11", "KC_F12", "KC_ESC", "KC_TAB", "KC_ENT", "KC_SPC", "KC_BSPC",
    "KC_DEL", "KC_GRV", "KC_MINS", "KC_EQL", "KC_LBRC", "KC_RBRC", "KC_BSLS", "KC_SCLN",
    "KC_QUOT", "KC_COMM", "KC_DOT", "KC_SLSH", "KC_LSFT", "KC_RSFT", "KC_LCTL", "KC_RCTL",
    "KC_LALT", "KC_RALT", "KC_LGUI", "KC_RGUI", "KC_LEFT", "KC_DOWN", "KC_UP", "KC_RGHT",
    "KC_HOME", "KC_END", "KC_PGUP", "KC_PGDN", "KC_INS", "KC_CAPS", "KC_MUTE", "KC_VOLD",
    "KC_VOLU", "KC_MPLY",
];

/// Default palette as owned strings.
pub fn default_keycode_palette() -> Vec<String> {
    DEFAULT_KEYCODES.iter().map(ToString::to_string).collect()
}

/// Layer selector and per-key option lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLists {
    layer_options: Vec<String>,
    key_options: BTreeMap<PositionId, Vec<String>>,
}

impl OptionLists {
    /// Creates lists for the given positions with no layers yet.
    pub fn new(positions: impl IntoIterator<Item = PositionId>, palette: &[String]) -> Self {
        let template: Vec<String> = std::iter::once(TRANSPARENT.to_string())
            .chain(palette.iter().cloned())
            .collect();

        Self {
            layer_options: Vec::new(),
            key_options: positions
                .into_iter()
                .map(|position| (position, template.clone()))
                .collect(),
        }
    }

    /// Entries of the layer selector, in layer order.
    #[must_use]
    pub fn layer_options(&self) -> &[String] {
        &self.layer_options
    }

    /// Full option list of one key.
    #[must_use]
    pub fn key_options(&self, position: &str) -> Option<&[String]> {
        self.key_options.get(position).map(Vec::as_slice)
    }

    /// Only the layer reference options of one key.
    #[must_use]
    pub fn reference_options(&self, position: &str) -> Option<&[String]> {
        let end = LAYER_REF_OFFSET + self.layer_options.len();
        self.key_options(position).map(|options| &options[LAYER_REF_OFFSET..end])
    }

    /// Positions that have an option list.
    pub fn positions(&self) -> impl Iterator<Item = &PositionId> {
        self.key_options.keys()
    }

    /// Mirrors a layer appended to the layout.
    pub(crate) fn push_layer(&mut self, name: &str) {
        self.layer_options.push(name.to_string());

        // after the existing references, before the palette
        let insert_at = self.layer_options.len() + LAYER_REF_OFFSET - 1;
        let token = layer_ref_token(name);
        for options in self.key_options.values_mut() {
            options.insert(insert_at, token.clone());
        }
    }

    /// Mirrors the removal of the layer at `index`.
    pub(crate) fn remove_layer(&mut self, index: usize) {
        if index >= self.layer_options.len() {
            return;
        }

        self.layer_options.remove(index);
        for options in self.key_options.values_mut() {
            options.remove(index + LAYER_REF_OFFSET);
        }
    }

    /// Mirrors a rename of the layer at `index`.
    pub(crate) fn rename_layer(&mut self, index: usize, name: &str) {
        let Some(label) = self.layer_options.get_mut(index) else {
            return;
        };
        name.clone_into(label);

        let token = layer_ref_token(name);
        for options in self.key_options.values_mut() {
            options[index + LAYER_REF_OFFSET].clone_from(&token);
        }
    }
}
