//! Key binding commands.

use crate::cli::common::{open_editor, save_editor, CliError, CliResult};
use crate::config::Config;
use crate::models::{PositionId, PositionSpace};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Edit key bindings of a layer
#[derive(Debug, Clone, Args)]
pub struct KeyArgs {
    /// Key operation
    #[command(subcommand)]
    pub command: KeyCommand,
}

/// Key operations
#[derive(Debug, Clone, Subcommand)]
pub enum KeyCommand {
    /// Bind a key to a keycode, macro expression or `[Layer]` reference
    Set {
        /// Path to layout file
        #[arg(short, long, value_name = "FILE")]
        layout: PathBuf,

        /// Layer index (0 = base layer)
        #[arg(long, default_value = "0")]
        layer: usize,

        /// Key position (e.g. k-1-1)
        #[arg(short, long)]
        position: String,

        /// Action value (e.g. KC_A, LCTL(KC_C), [NAV])
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a binding so the key becomes transparent
    Clear {
        /// Path to layout file
        #[arg(short, long, value_name = "FILE")]
        layout: PathBuf,

        /// Layer index (0 = base layer)
        #[arg(long, default_value = "0")]
        layer: usize,

        /// Key position (e.g. k-1-1)
        #[arg(short, long)]
        position: String,
    },
}

impl KeyArgs {
    /// Execute the key command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        match &self.command {
            KeyCommand::Set {
                layout,
                layer,
                position,
                value,
            } => {
                let mut editor = open_editor(config, layout)?;
                let position = PositionId::from(position.as_str());
                if !editor.space().contains(&position) {
                    return Err(CliError::validation(format!(
                        "Position '{position}' is not a key on this keyboard"
                    )));
                }

                editor.set_entry(*layer, position.clone(), value.as_str())?;
                save_editor(&editor, layout)?;
                println!("✓ Layer {layer} {position} = {value}");
            }
            KeyCommand::Clear {
                layout,
                layer,
                position,
            } => {
                let mut editor = open_editor(config, layout)?;
                let previous = editor.clear_entry(*layer, position)?;
                save_editor(&editor, layout)?;
                match previous {
                    Some(value) => println!("✓ Layer {layer} {position} cleared (was {value})"),
                    None => println!("Layer {layer} {position} was already transparent"),
                }
            }
        }

        Ok(())
    }
}
