//! Layer management commands.

use crate::cli::common::{open_editor, save_editor, CliError, CliResult};
use crate::config::Config;
use crate::models::Keymap;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Manage layers of a layout file
#[derive(Debug, Clone, Args)]
pub struct LayerArgs {
    /// Layer operation
    #[command(subcommand)]
    pub command: LayerCommand,
}

/// Layer operations
#[derive(Debug, Clone, Subcommand)]
pub enum LayerCommand {
    /// List layers in order
    List {
        /// Path to layout file
        #[arg(short, long, value_name = "FILE")]
        layout: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Append a new empty layer
    Add {
        /// Path to layout file
        #[arg(short, long, value_name = "FILE")]
        layout: PathBuf,

        /// Layer name
        #[arg(long)]
        name: String,
    },
    /// Remove a layer (the last remaining layer cannot be removed)
    Remove {
        /// Path to layout file
        #[arg(short, long, value_name = "FILE")]
        layout: PathBuf,

        /// Layer index (0 = base layer)
        #[arg(long)]
        index: usize,
    },
    /// Rename a layer (references to the old name are not updated)
    Rename {
        /// Path to layout file
        #[arg(short, long, value_name = "FILE")]
        layout: PathBuf,

        /// Layer index (0 = base layer)
        #[arg(long)]
        index: usize,

        /// New layer name
        #[arg(long)]
        name: String,
    },
}

/// Layer summary for JSON output
#[derive(Debug, Serialize)]
struct LayerSummary<'a> {
    index: usize,
    name: &'a str,
    keys: usize,
}

impl LayerArgs {
    /// Execute the layer command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        match &self.command {
            LayerCommand::List { layout, json } => {
                let editor = open_editor(config, layout)?;
                let layers: Vec<LayerSummary> = editor
                    .layout()
                    .layers
                    .iter()
                    .enumerate()
                    .map(|(index, layer)| LayerSummary {
                        index,
                        name: &layer.name,
                        keys: layer.keymap.len(),
                    })
                    .collect();

                if *json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&layers)
                            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
                    );
                } else {
                    for layer in &layers {
                        println!("{}: {} ({} keys)", layer.index, layer.name, layer.keys);
                    }
                }
            }
            LayerCommand::Add { layout, name } => {
                let mut editor = open_editor(config, layout)?;
                let index = editor.add_layer(name.as_str(), Keymap::new())?;
                save_editor(&editor, layout)?;
                println!("✓ Added layer {index}: {name}");
            }
            LayerCommand::Remove { layout, index } => {
                let mut editor = open_editor(config, layout)?;
                let removed = editor.remove_layer(*index)?;
                save_editor(&editor, layout)?;
                println!("✓ Removed layer {index}: {}", removed.name);
            }
            LayerCommand::Rename {
                layout,
                index,
                name,
            } => {
                let mut editor = open_editor(config, layout)?;
                let old_name = editor.layout().layers.get(*index).map(|l| l.name.clone());
                editor.rename_layer(*index, name.as_str())?;
                save_editor(&editor, layout)?;
                println!(
                    "✓ Renamed layer {index}: {} -> {name}",
                    old_name.unwrap_or_default()
                );
            }
        }

        Ok(())
    }
}
