//! Validation command: run the export lint on a layout file.

use crate::cli::common::{open_editor, CliError, CliResult};
use crate::config::Config;
use crate::firmware::ValidationWarning;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Check a layout for dangling layer references and other export problems
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for validation
#[derive(Debug, Serialize)]
struct ValidationResponse<'a> {
    clean: bool,
    warnings: &'a [ValidationWarning],
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let editor = open_editor(config, &self.layout)?;
        let report = editor.lint();

        if self.json {
            let response = ValidationResponse {
                clean: report.is_clean(),
                warnings: &report.warnings,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if report.is_clean() {
            println!("✓ No problems found");
        } else {
            print!("{}", report.format_message());
        }

        if self.strict && !report.is_clean() {
            return Err(CliError::validation(format!(
                "{} warnings (--strict)",
                report.warnings.len()
            )));
        }

        Ok(())
    }
}
