//! Shared CLI types and helpers.

use crate::config::Config;
use crate::error::LayoutError;
use crate::models::{KeyGrid, PositionSpace};
use crate::services::{LayerEditor, LayoutService};
use std::fmt;
use std::path::Path;

/// Process exit codes used by all subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or a refused operation
    ValidationError = 1,
    /// File could not be read, parsed or written
    IoError = 2,
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process ends with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// An I/O or file format failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// A validation failure or refusal.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.kind
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<LayoutError> for CliError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Format(_) => Self::io(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Creates an empty editor for the configured key grid.
pub fn new_editor(config: &Config) -> CliResult<LayerEditor<KeyGrid>> {
    let grid = config
        .grid
        .to_key_grid()
        .map_err(|e| CliError::validation(format!("Invalid grid configuration: {e:#}")))?;

    Ok(LayerEditor::with_palette(grid, &config.editor.keycodes))
}

/// Creates an editor holding the layout stored at `path`.
pub fn open_editor(config: &Config, path: &Path) -> CliResult<LayerEditor<KeyGrid>> {
    let layout =
        LayoutService::load(path).map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))?;

    let mut editor = new_editor(config)?;
    editor.replace_layout(layout)?;
    Ok(editor)
}

/// Writes the editor's layout back to `path`.
pub fn save_editor<S: PositionSpace>(editor: &LayerEditor<S>, path: &Path) -> CliResult<()> {
    LayoutService::save(editor.layout(), path)
        .map_err(|e| CliError::io(format!("Failed to save layout: {e:#}")))
}
