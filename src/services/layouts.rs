//! Layout file I/O service.
//!
//! This module centralizes all layout file operations: the asynchronous
//! load used by the interactive shell, synchronous load/save for one-shot
//! CLI commands, and writing generated firmware files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::models::Layout;
use crate::parser;

/// Service for managing layout file I/O operations.
pub struct LayoutService;

impl LayoutService {
    /// Reads and parses a layout file without blocking the event loop.
    ///
    /// This is the only suspension point of the editor: the caller awaits the
    /// parsed layout and then installs it synchronously, so no other edit can
    /// interleave with a load.
    ///
    /// A malformed file yields an error wrapping [`crate::LayoutError::Format`].
    pub async fn read_layout(path: &Path) -> Result<Layout> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

        let layout = parser::parse_layout_bytes(&bytes)
            .with_context(|| format!("Failed to load layout from {}", path.display()))?;

        info!(path = %path.display(), layers = layout.len(), "Layout read");
        Ok(layout)
    }

    /// Loads a layout from a JSON save file.
    pub fn load(path: &Path) -> Result<Layout> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

        let layout = parser::parse_layout_json(&text)
            .with_context(|| format!("Failed to load layout from {}", path.display()))?;

        Ok(layout)
    }

    /// Saves a layout as a JSON save file.
    ///
    /// The file is written atomically (temp file + rename) so it is never
    /// left half-written.
    pub fn save(layout: &Layout, path: &Path) -> Result<()> {
        let content = parser::serialize_layout(layout)?;
        Self::write_atomic(path, &content)
            .with_context(|| format!("Failed to save layout to {}", path.display()))?;

        info!(path = %path.display(), layers = layout.len(), "Layout saved");
        Ok(())
    }

    /// Writes generated firmware source to a file.
    pub fn write_export(code: &str, path: &Path) -> Result<()> {
        Self::write_atomic(path, code)
            .with_context(|| format!("Failed to write keymap to {}", path.display()))?;

        info!(path = %path.display(), bytes = code.len(), "Keymap exported");
        Ok(())
    }

    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = Path::new(&temp_name);

        fs::write(temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

        Ok(())
    }
}
