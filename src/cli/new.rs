//! New command: create a fresh layout file.

use crate::cli::common::{new_editor, save_editor, CliError, CliResult};
use crate::config::Config;
use crate::models::DEFAULT_BASE_LAYER;
use clap::Args;
use std::path::PathBuf;

/// Create a new layout file with a single empty layer
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Path of the layout file to create
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Name of the base layer
    #[arg(long, default_value = DEFAULT_BASE_LAYER)]
    pub name: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        if self.path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "{} already exists (use --force to overwrite)",
                self.path.display()
            )));
        }

        let mut editor = new_editor(config)?;
        if self.name != DEFAULT_BASE_LAYER {
            editor.rename_layer(0, self.name.as_str())?;
        }

        save_editor(&editor, &self.path)?;
        println!("✓ Created {}", self.path.display());
        Ok(())
    }
}
