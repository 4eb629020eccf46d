//! Generate command for the QMK keymap file.

use crate::cli::common::{open_editor, CliError, CliResult};
use crate::config::Config;
use crate::services::LayoutService;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// Generate a QMK keymap.c from a layout
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Output file (prints to stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail instead of exporting when the lint finds problems
    #[arg(long)]
    pub strict: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let editor = open_editor(config, &self.layout)?;

        let report = editor.lint();
        for warning in &report.warnings {
            debug!(%warning, "Export lint");
            eprintln!("⚠ {warning}");
        }

        if self.strict && !report.is_clean() {
            return Err(CliError::validation(format!(
                "Layout has {} lint warnings; not generating (--strict)",
                report.warnings.len()
            )));
        }

        let keymap_c = editor.export_to_text();

        match &self.output {
            Some(path) => {
                LayoutService::write_export(&keymap_c, path)
                    .map_err(|e| CliError::io(format!("Failed to write keymap.c: {e:#}")))?;
                println!("✓ Generated {}", path.display());
            }
            None => print!("{keymap_c}"),
        }

        Ok(())
    }
}
