//! Show command: display one layer as a key grid.

use crate::cli::common::{open_editor, CliError, CliResult};
use crate::config::Config;
use crate::models::{KeymapEntry, PositionSpace};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show the keys of a layer (unbound keys appear as _______)
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Layer index (0 = base layer)
    #[arg(long, default_value = "0")]
    pub layer: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response for a layer view
#[derive(Debug, Serialize)]
struct LayerView<'a> {
    index: usize,
    name: &'a str,
    keys: Vec<KeyData<'a>>,
}

/// Single key for JSON output
#[derive(Debug, Serialize)]
struct KeyData<'a> {
    position: &'a str,
    value: &'a str,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let mut editor = open_editor(config, &self.layout)?;
        let view = editor.select_layer(self.layer)?;
        let name = &editor.layout().layers[self.layer].name;

        if self.json {
            let response = LayerView {
                index: self.layer,
                name,
                keys: view
                    .iter()
                    .map(|entry| KeyData {
                        position: entry.position.as_str(),
                        value: &entry.value,
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            println!("Layer {}: {}", self.layer, name);
            print!("{}", format_layer_grid(editor.space(), &view));
        }

        Ok(())
    }
}

/// Renders a layer view as aligned rows, following the row grouping of the space.
pub fn format_layer_grid<S: PositionSpace + ?Sized>(space: &S, view: &[KeymapEntry]) -> String {
    let width = view.iter().map(|entry| entry.value.len()).max().unwrap_or(0);
    let mut values = view.iter().map(|entry| entry.value.as_str());
    let mut out = String::new();

    for row in space.rows() {
        let cells: Vec<String> = values
            .by_ref()
            .take(row.len())
            .map(|value| format!("{value:<width$}"))
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeyGrid;
    use crate::services::LayerEditor;

    #[test]
    fn test_format_layer_grid() {
        let mut editor = LayerEditor::new(KeyGrid::new(2, 3));
        editor.set_entry(0, "k-1-2", "KC_ESC").unwrap();
        let view = editor.active_view();

        let grid = format_layer_grid(editor.space(), &view);
        assert_eq!(grid, "_______ KC_ESC  _______\n_______ _______ _______\n");
    }
}
