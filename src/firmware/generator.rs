//! QMK `keymap.c` generation.
//!
//! The output is produced in four stages, always in this order:
//!
//! 1. `#define _<Layer> <index>` for every layer
//! 2. `enum custom_keycodes`, first entry anchored at `SAFE_RANGE`
//! 3. the `keymaps` table, one `LAYOUT(...)` block per layer
//! 4. (inside stage 3) `[Layer]` tokens rewritten to `MO(_Layer)`
//!
//! The generator is a pure function of the layout and the position space.

// Allow format! appended to String - more readable for building code
#![allow(clippy::format_push_string)]

use crate::branding;
use crate::models::action::layer_macro;
use crate::models::{Action, Layer, Layout, PositionSpace};

/// Platform header included by every QMK keymap.
const KEYBOARD_HEADER: &str = "QMK_KEYBOARD_H";

/// QMK base value for user-defined keycodes.
const SAFE_RANGE: &str = "SAFE_RANGE";

/// Layout macro of the target keyboard.
const LAYOUT_MACRO: &str = "LAYOUT";

/// Indentation of layer blocks and of key rows inside them.
const BLOCK_INDENT: &str = "    ";
const ROW_INDENT: &str = "        ";

/// Generates QMK firmware source from a layout.
pub struct FirmwareGenerator<'a, S: PositionSpace + ?Sized> {
    layout: &'a Layout,
    space: &'a S,
}

impl<'a, S: PositionSpace + ?Sized> FirmwareGenerator<'a, S> {
    /// Creates a generator for the given layout and position space.
    pub const fn new(layout: &'a Layout, space: &'a S) -> Self {
        Self { layout, space }
    }

    /// Generates the complete `keymap.c` text.
    #[must_use]
    pub fn generate_keymap_c(&self) -> String {
        let mut code = String::new();

        code.push_str(&branding::generated_header());
        code.push_str(&format!("#include {KEYBOARD_HEADER}\n\n"));
        code.push_str(&self.generate_layer_defines());
        code.push_str(&self.generate_custom_keycodes());
        code.push_str(&self.generate_keymaps_array());

        code
    }

    /// Stage 1: one `#define _<name> <index>` per layer.
    fn generate_layer_defines(&self) -> String {
        let mut code = String::new();
        for (index, layer) in self.layout.layers.iter().enumerate() {
            code.push_str(&format!("#define {} {}\n", layer_macro(&layer.name), index));
        }
        code
    }

    /// Stage 2: the custom keycode enum.
    ///
    /// Only the first entry gets an explicit value; the rest rely on C's
    /// sequential enum numbering.
    fn generate_custom_keycodes(&self) -> String {
        let mut code = String::from("enum custom_keycodes {\n");
        for (index, layer) in self.layout.layers.iter().enumerate() {
            if index == 0 {
                code.push_str(&format!("{BLOCK_INDENT}{} = {SAFE_RANGE},\n", layer.name));
            } else {
                code.push_str(&format!("{BLOCK_INDENT}{},\n", layer.name));
            }
        }
        code.push_str("};\n\n");
        code
    }

    /// Stage 3: the keymaps table.
    fn generate_keymaps_array(&self) -> String {
        let rows = self.space.rows();

        let mut code =
            String::from("const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS] = {\n\n");

        for layer in &self.layout.layers {
            code.push_str(&format!(
                "{BLOCK_INDENT}[{}] = {LAYOUT_MACRO}(\n",
                layer_macro(&layer.name)
            ));

            let body = rows
                .iter()
                .map(|row| {
                    let keys: Vec<String> = row
                        .iter()
                        .map(|position| Self::render_key(layer, position.as_str()))
                        .collect();
                    format!("{ROW_INDENT}{}", keys.join(", "))
                })
                .collect::<Vec<_>>()
                .join(",\n");

            code.push_str(&body);
            code.push('\n');
            code.push_str(&format!("{BLOCK_INDENT}),\n\n"));
        }

        code.push_str("};\n");
        code
    }

    /// Stage 4: firmware text of one key (transparent if unbound).
    fn render_key(layer: &Layer, position: &str) -> String {
        Action::parse(layer.value_or_transparent(position)).to_firmware()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeyGrid, TRANSPARENT};

    fn two_layer_layout() -> Layout {
        let mut base = Layer::new("BASE");
        base.set("k-1-1", "KC_Q");
        base.set("k-1-2", "[NAV]");
        base.set("k-2-2", "KC_SPC");
        let mut nav = Layer::new("NAV");
        nav.set("k-1-1", "KC_UP");
        Layout::new(vec![base, nav])
    }

    #[test]
    fn test_generate_full_output() {
        let layout = two_layer_layout();
        let grid = KeyGrid::new(2, 2);
        let code = FirmwareGenerator::new(&layout, &grid).generate_keymap_c();

        let expected = "\
// Generated using Redox Layout Editor.
// https://github.com/tilleyd/redox-layout-editor
#include QMK_KEYBOARD_H

#define _BASE 0
#define _NAV 1
enum custom_keycodes {
    BASE = SAFE_RANGE,
    NAV,
};

const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS] = {

    [_BASE] = LAYOUT(
        KC_Q, MO(_NAV),
        _______, KC_SPC
    ),

    [_NAV] = LAYOUT(
        KC_UP, _______,
        _______, _______
    ),

};
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_layer_reference_uses_define_not_literal() {
        let layout = two_layer_layout();
        let grid = KeyGrid::new(2, 2);
        let code = FirmwareGenerator::new(&layout, &grid).generate_keymap_c();

        assert!(code.contains("#define _NAV 1"));
        assert!(code.contains("MO(_NAV)"));
        assert!(!code.contains("[NAV]"));
    }

    #[test]
    fn test_empty_layer_is_all_transparent() {
        let layout = Layout::default();
        let grid = KeyGrid::redox();
        let code = FirmwareGenerator::new(&layout, &grid).generate_keymap_c();

        assert_eq!(code.matches(TRANSPARENT).count(), 70);
        assert!(code.contains("\n        _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,\n"));
    }

    #[test]
    fn test_dangling_reference_still_generates() {
        let mut base = Layer::new("BASE");
        base.set("k-1-1", "[GHOST]");
        let layout = Layout::new(vec![base]);
        let grid = KeyGrid::new(1, 2);
        let code = FirmwareGenerator::new(&layout, &grid).generate_keymap_c();

        assert!(code.contains("        MO(_GHOST), _______\n"));
        assert!(!code.contains("#define _GHOST"));
    }

    #[test]
    fn test_positions_outside_space_are_not_emitted() {
        let mut base = Layer::new("BASE");
        base.set("k-9-9", "KC_A");
        base.set("thumb", "KC_B");
        let layout = Layout::new(vec![base]);
        let grid = KeyGrid::new(1, 1);
        let code = FirmwareGenerator::new(&layout, &grid).generate_keymap_c();

        assert!(!code.contains("KC_A"));
        assert!(!code.contains("KC_B"));
    }

    #[test]
    fn test_enum_single_layer() {
        let layout = Layout::default();
        let grid = KeyGrid::new(1, 1);
        let code = FirmwareGenerator::new(&layout, &grid).generate_keymap_c();
        assert!(code.contains("enum custom_keycodes {\n    BASE = SAFE_RANGE,\n};\n\n"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let layout = two_layer_layout();
        let grid = KeyGrid::redox();
        let generator = FirmwareGenerator::new(&layout, &grid);
        assert_eq!(generator.generate_keymap_c(), generator.generate_keymap_c());
    }
}
