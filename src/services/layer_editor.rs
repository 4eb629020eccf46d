//! Layer editing operations.
//!
//! [`LayerEditor`] owns the [`Layout`] and is the only way to mutate it.
//! Every operation keeps the host-facing [`OptionLists`] reconciled with the
//! layer sequence, so a UI can re-render from editor state after each call.
//!
//! Layer references are stored by name. Neither `remove_layer` nor
//! `rename_layer` rewrites references held by other layers; such references
//! dangle until the user fixes them, and the export lint reports them.

use crate::error::LayoutError;
use crate::firmware::{FirmwareGenerator, FirmwareValidator, ValidationReport};
use crate::models::{KeyGrid, Keymap, KeymapEntry, Layer, Layout, PositionId, PositionSpace};
use crate::parser;
use crate::services::option_lists::{default_keycode_palette, OptionLists};
use tracing::{debug, info, warn};

/// Message shown when the user tries to remove the only layer.
pub const LAST_LAYER_REFUSAL: &str = "Cannot remove last layer.";

/// Mutation API over a layout.
#[derive(Debug, Clone)]
pub struct LayerEditor<S: PositionSpace = KeyGrid> {
    layout: Layout,
    space: S,
    options: OptionLists,
    active: usize,
}

impl<S: PositionSpace> LayerEditor<S> {
    /// Creates an editor holding the default layout (one empty `BASE` layer).
    pub fn new(space: S) -> Self {
        Self::with_palette(space, &default_keycode_palette())
    }

    /// Creates an editor whose key option lists offer the given keycodes.
    pub fn with_palette(space: S, palette: &[String]) -> Self {
        let options = OptionLists::new(space.positions(), palette);
        let mut editor = Self {
            layout: Layout::new(Vec::new()),
            space,
            options,
            active: 0,
        };
        editor.install(Layout::default());
        editor
    }

    /// The current layout.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The position space keys are laid out in.
    pub const fn space(&self) -> &S {
        &self.space
    }

    /// Layer selector and per-key option lists.
    pub const fn options(&self) -> &OptionLists {
        &self.options
    }

    /// Index of the selected layer.
    pub const fn active_layer(&self) -> usize {
        self.active
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layout.len()
    }

    /// Consumes the editor, returning its layout.
    pub fn into_layout(self) -> Layout {
        self.layout
    }

    /// Appends a layer and returns its index.
    ///
    /// Duplicate names are accepted; the generated code will then define the
    /// same macro twice, which is the caller's responsibility.
    pub fn add_layer(&mut self, name: impl Into<String>, keymap: Keymap) -> Result<usize, LayoutError> {
        let name = name.into();
        if name.is_empty() {
            return Err(LayoutError::EmptyName);
        }

        Ok(self.push_layer(Layer::with_keymap(name, keymap)))
    }

    /// Removes the layer at `index` and returns it.
    ///
    /// The first layer becomes the selected layer afterwards.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvariantViolation`] if there is only one layer, whatever
    ///   the index; nothing changes
    /// - [`LayoutError::LayerOutOfRange`] for an invalid index
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer, LayoutError> {
        if self.layout.len() <= 1 {
            warn!("Refused to remove the last layer");
            return Err(LayoutError::InvariantViolation(LAST_LAYER_REFUSAL.to_string()));
        }

        self.check_index(index)?;

        let removed = self.remove_layer_unchecked(index);
        self.active = 0;
        Ok(removed)
    }

    /// Renames the layer at `index`.
    ///
    /// References to the old name elsewhere are left as they are.
    pub fn rename_layer(&mut self, index: usize, new_name: impl Into<String>) -> Result<(), LayoutError> {
        self.check_index(index)?;

        let new_name = new_name.into();
        if new_name.is_empty() {
            return Err(LayoutError::EmptyName);
        }

        debug!(index, from = %self.layout.layers[index].name, to = %new_name, "Renaming layer");
        self.options.rename_layer(index, &new_name);
        self.layout.layers[index].name = new_name;
        Ok(())
    }

    /// Selects a layer and returns its display view.
    ///
    /// The view lists every position of the space in row-major order with its
    /// bound value, or the transparent sentinel if unbound.
    pub fn select_layer(&mut self, index: usize) -> Result<Vec<KeymapEntry>, LayoutError> {
        self.check_index(index)?;
        self.active = index;
        Ok(self.layer_view(index))
    }

    /// Display view of the selected layer.
    pub fn active_view(&self) -> Vec<KeymapEntry> {
        self.layer_view(self.active)
    }

    /// Binds a key on a layer, returning the previous value.
    ///
    /// The value is stored verbatim; it is not checked against known keycodes
    /// or existing layers.
    pub fn set_entry(
        &mut self,
        layer_index: usize,
        position: impl Into<PositionId>,
        value: impl Into<String>,
    ) -> Result<Option<String>, LayoutError> {
        self.check_index(layer_index)?;

        let position = position.into();
        let value = value.into();
        debug!(layer = layer_index, %position, %value, "Setting key");
        Ok(self.layout.layers[layer_index].set(position, value))
    }

    /// Removes a key binding so the position becomes transparent.
    pub fn clear_entry(&mut self, layer_index: usize, position: &str) -> Result<Option<String>, LayoutError> {
        self.check_index(layer_index)?;

        debug!(layer = layer_index, position, "Clearing key");
        Ok(self.layout.layers[layer_index].clear(position))
    }

    /// Replaces the whole layout.
    ///
    /// All current layers are torn down through the removal path and the new
    /// ones re-added through the add path, so the option lists can never
    /// diverge from the layout. The first layer is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Format`] for a layout without layers or with an
    /// unnamed layer. The current layout is untouched in that case.
    pub fn replace_layout(&mut self, layout: Layout) -> Result<(), LayoutError> {
        if layout.is_empty() {
            return Err(LayoutError::format("layout must contain at least one layer"));
        }
        if let Some(index) = layout.layers.iter().position(|layer| layer.name.is_empty()) {
            return Err(LayoutError::format(format!("layer {index} has an empty name")));
        }

        self.install(layout);
        info!(layers = self.layout.len(), "Layout replaced");
        Ok(())
    }

    /// Parses save-file text and replaces the layout with it.
    ///
    /// On error the current layout is left untouched.
    pub fn load_from_text(&mut self, text: &str) -> Result<(), LayoutError> {
        let layout = parser::parse_layout_json(text)?;
        self.replace_layout(layout)
    }

    /// Serializes the current layout to save-file text.
    pub fn save_to_text(&self) -> anyhow::Result<String> {
        parser::serialize_layout(&self.layout)
    }

    /// Generates `keymap.c` text for the current layout.
    pub fn export_to_text(&self) -> String {
        FirmwareGenerator::new(&self.layout, &self.space).generate_keymap_c()
    }

    /// Runs the export lint over the current layout.
    pub fn lint(&self) -> ValidationReport {
        FirmwareValidator::new(&self.layout, &self.space).validate()
    }

    fn check_index(&self, index: usize) -> Result<(), LayoutError> {
        if index < self.layout.len() {
            Ok(())
        } else {
            Err(LayoutError::LayerOutOfRange {
                index,
                len: self.layout.len(),
            })
        }
    }

    fn layer_view(&self, index: usize) -> Vec<KeymapEntry> {
        let Some(layer) = self.layout.get_layer(index) else {
            return Vec::new();
        };

        self.space
            .positions()
            .into_iter()
            .map(|position| {
                let value = layer.value_or_transparent(position.as_str()).to_string();
                KeymapEntry { position, value }
            })
            .collect()
    }

    fn push_layer(&mut self, layer: Layer) -> usize {
        debug!(name = %layer.name, keys = layer.keymap.len(), "Adding layer");
        self.options.push_layer(&layer.name);
        self.layout.layers.push(layer);
        self.layout.len() - 1
    }

    /// Removal without the last-layer guard, used while swapping layouts.
    fn remove_layer_unchecked(&mut self, index: usize) -> Layer {
        debug!(index, "Removing layer");
        self.options.remove_layer(index);
        self.layout.layers.remove(index)
    }

    fn install(&mut self, layout: Layout) {
        while !self.layout.is_empty() {
            self.remove_layer_unchecked(self.layout.len() - 1);
        }

        for layer in layout.layers {
            self.push_layer(layer);
        }

        self.active = 0;
    }
}

impl Default for LayerEditor<KeyGrid> {
    fn default() -> Self {
        Self::new(KeyGrid::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TRANSPARENT;

    fn editor() -> LayerEditor {
        LayerEditor::with_palette(KeyGrid::new(2, 2), &["KC_A".to_string()])
    }

    fn names(editor: &LayerEditor) -> Vec<&str> {
        editor.layout().layer_names().collect()
    }

    #[test]
    fn test_new_editor_has_base_layer() {
        let editor = editor();
        assert_eq!(names(&editor), vec!["BASE"]);
        assert_eq!(editor.active_layer(), 0);
        assert_eq!(editor.options().layer_options(), &["BASE"]);
        assert_eq!(
            editor.options().key_options("k-2-2").unwrap(),
            &["_______", "[BASE]", "KC_A"]
        );
    }

    #[test]
    fn test_add_layer_appends() {
        let mut editor = editor();
        let mut keymap = Keymap::new();
        keymap.insert(PositionId::grid(1, 1), "KC_UP".to_string());

        let index = editor.add_layer("NAV", keymap).unwrap();
        assert_eq!(index, 1);
        assert_eq!(names(&editor), vec!["BASE", "NAV"]);
        assert_eq!(editor.layout().layers[1].get("k-1-1"), Some("KC_UP"));
        assert_eq!(editor.active_layer(), 0, "adding does not change the selection");
    }

    #[test]
    fn test_add_layer_allows_duplicates_rejects_empty() {
        let mut editor = editor();
        assert!(editor.add_layer("BASE", Keymap::new()).is_ok());
        assert_eq!(editor.add_layer("", Keymap::new()), Err(LayoutError::EmptyName));
        assert_eq!(editor.layer_count(), 2);
    }

    #[test]
    fn test_remove_last_layer_refused() {
        let mut editor = editor();
        editor.set_entry(0, "k-1-1", "KC_Q").unwrap();
        let before_layout = editor.layout().clone();
        let before_options = editor.options().clone();

        let result = editor.remove_layer(0);
        assert_eq!(
            result,
            Err(LayoutError::InvariantViolation("Cannot remove last layer.".to_string()))
        );
        assert_eq!(editor.layout(), &before_layout);
        assert_eq!(editor.options(), &before_options);
    }

    #[test]
    fn test_remove_single_layer_refused_for_any_index() {
        let mut editor = editor();
        let before = editor.layout().clone();

        assert_eq!(
            editor.remove_layer(3),
            Err(LayoutError::InvariantViolation("Cannot remove last layer.".to_string()))
        );
        assert_eq!(editor.layout(), &before);
    }

    #[test]
    fn test_remove_layer_out_of_range() {
        let mut editor = editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        assert_eq!(
            editor.remove_layer(2),
            Err(LayoutError::LayerOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_remove_shifts_layers_and_keeps_references() {
        let mut editor = editor();
        editor.rename_layer(0, "A").unwrap();
        editor.add_layer("B", Keymap::new()).unwrap();
        editor.add_layer("C", Keymap::new()).unwrap();
        editor.set_entry(1, "k-1-1", "[C]").unwrap();
        editor.set_entry(2, "k-1-2", "[A]").unwrap();
        editor.select_layer(2).unwrap();

        let removed = editor.remove_layer(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(names(&editor), vec!["B", "C"]);
        assert_eq!(editor.layout().layers[0].get("k-1-1"), Some("[C]"));
        assert_eq!(editor.layout().layers[1].get("k-1-2"), Some("[A]"), "dangling reference kept");
        assert_eq!(editor.active_layer(), 0);
        assert_eq!(editor.options().layer_options(), &["B", "C"]);
        assert_eq!(editor.options().reference_options("k-1-1").unwrap(), &["[B]", "[C]"]);
    }

    #[test]
    fn test_rename_does_not_cascade() {
        let mut editor = editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        editor.set_entry(0, "k-1-1", "[NAV]").unwrap();
        editor.select_layer(1).unwrap();

        editor.rename_layer(1, "ARROWS").unwrap();
        assert_eq!(names(&editor), vec!["BASE", "ARROWS"]);
        assert_eq!(editor.layout().layers[0].get("k-1-1"), Some("[NAV]"));
        assert_eq!(editor.active_layer(), 1);
        assert_eq!(editor.options().reference_options("k-2-1").unwrap(), &["[BASE]", "[ARROWS]"]);
    }

    #[test]
    fn test_rename_validation() {
        let mut editor = editor();
        assert_eq!(editor.rename_layer(0, ""), Err(LayoutError::EmptyName));
        assert_eq!(
            editor.rename_layer(3, "X"),
            Err(LayoutError::LayerOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(names(&editor), vec!["BASE"]);
    }

    #[test]
    fn test_select_layer_view() {
        let mut editor = editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        editor.set_entry(1, "k-2-1", "KC_LEFT").unwrap();

        let view = editor.select_layer(1).unwrap();
        let values: Vec<&str> = view.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec![TRANSPARENT, TRANSPARENT, "KC_LEFT", TRANSPARENT]);
        assert_eq!(view[2].position, PositionId::grid(2, 1));
        assert_eq!(editor.active_layer(), 1);
        assert_eq!(editor.active_view(), view);

        assert!(editor.select_layer(5).is_err());
        assert_eq!(editor.active_layer(), 1);
    }

    #[test]
    fn test_set_and_clear_entry() {
        let mut editor = editor();
        assert_eq!(editor.set_entry(0, "k-1-1", "KC_A").unwrap(), None);
        assert_eq!(editor.set_entry(0, "k-1-1", "not even a keycode").unwrap(), Some("KC_A".to_string()));
        assert_eq!(editor.clear_entry(0, "k-1-1").unwrap(), Some("not even a keycode".to_string()));
        assert!(editor.set_entry(1, "k-1-1", "KC_A").is_err());
    }

    #[test]
    fn test_replace_layout_reconciles_options() {
        let mut editor = editor();
        editor.add_layer("OLD", Keymap::new()).unwrap();
        editor.select_layer(1).unwrap();

        let mut base = Layer::new("QWERTY");
        base.set("k-1-1", "[SYMB]");
        let layout = Layout::new(vec![base, Layer::new("SYMB"), Layer::new("MEDIA")]);
        editor.replace_layout(layout.clone()).unwrap();

        assert_eq!(editor.layout(), &layout);
        assert_eq!(editor.active_layer(), 0);
        assert_eq!(editor.options().layer_options(), &["QWERTY", "SYMB", "MEDIA"]);
        assert_eq!(
            editor.options().key_options("k-1-2").unwrap(),
            &["_______", "[QWERTY]", "[SYMB]", "[MEDIA]", "KC_A"]
        );
    }

    #[test]
    fn test_replace_layout_rejects_empty() {
        let mut editor = editor();
        editor.set_entry(0, "k-1-1", "KC_A").unwrap();
        let before = editor.layout().clone();

        let result = editor.replace_layout(Layout::new(Vec::new()));
        assert!(matches!(result, Err(LayoutError::Format(_))));
        assert_eq!(editor.layout(), &before);
    }

    #[test]
    fn test_load_from_text_failure_keeps_layout() {
        let mut editor = editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        let before = editor.layout().clone();

        assert!(editor.load_from_text("{ \"layers\": [").is_err());
        assert!(editor.load_from_text("{ \"layers\": [] }").is_err());
        assert_eq!(editor.layout(), &before);
        assert_eq!(editor.options().layer_options(), &["BASE", "NAV"]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut editor = editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        editor.set_entry(0, "k-1-1", "[NAV]").unwrap();
        editor.set_entry(1, "k-2-2", "KC_PGDN").unwrap();
        editor.rename_layer(0, "MAIN").unwrap();

        let text = editor.save_to_text().unwrap();
        let mut restored = LayerEditor::new(KeyGrid::new(2, 2));
        restored.load_from_text(&text).unwrap();
        assert_eq!(restored.layout(), editor.layout());
    }

    #[test]
    fn test_export_and_lint() {
        let mut editor = editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        editor.set_entry(0, "k-1-1", "[NAV]").unwrap();
        editor.set_entry(0, "k-1-2", "[GHOST]").unwrap();

        let code = editor.export_to_text();
        assert!(code.contains("#define _NAV 1"));
        assert!(code.contains("        MO(_NAV), MO(_GHOST),\n"));
        assert_eq!(code, editor.export_to_text());
        assert_eq!(editor.lint().warnings.len(), 1);
    }
}
