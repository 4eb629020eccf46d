//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use redox_layout_editor::models::{Layer, Layout};
use redox_layout_editor::parser::serialize_layout;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the redox-layout binary
pub fn redox_bin() -> &'static str {
    env!("CARGO_BIN_EXE_redox-layout")
}

/// Runs the binary with an isolated config file inside `temp_dir`.
pub fn run_cli(temp_dir: &TempDir, args: &[&str]) -> Output {
    let config_path = temp_dir.path().join("config.toml");
    Command::new(redox_bin())
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Stdout of a command as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a command as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Three layers: BASE binds two keys and a reference to NAV.
///
/// ```text
/// BASE: k-1-1 = KC_ESC, k-1-2 = [NAV], k-5-17 = KC_SPC
/// NAV:  k-2-2 = KC_UP
/// SYMB: empty
/// ```
pub fn test_layout_basic() -> Layout {
    let mut base = Layer::new("BASE");
    base.set("k-1-1", "KC_ESC");
    base.set("k-1-2", "[NAV]");
    base.set("k-5-17", "KC_SPC");

    let mut nav = Layer::new("NAV");
    nav.set("k-2-2", "KC_UP");

    Layout::new(vec![base, nav, Layer::new("SYMB")])
}

/// A single layer holding a reference to a layer that does not exist.
pub fn test_layout_with_dangling_ref() -> Layout {
    let mut base = Layer::new("BASE");
    base.set("k-1-1", "[GHOST]");
    Layout::new(vec![base])
}

/// Writes a layout to `path` in save-file format.
pub fn write_layout_file(layout: &Layout, path: &Path) -> std::io::Result<()> {
    let content = serialize_layout(layout).map_err(std::io::Error::other)?;
    fs::write(path, content)
}

/// Creates a temp directory holding `layout.json` with the given layout.
pub fn create_temp_layout_file(layout: &Layout) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let layout_path = temp_dir.path().join("layout.json");
    write_layout_file(layout, &layout_path).expect("Failed to write layout file");
    (layout_path, temp_dir)
}

/// Reads a layout file back.
pub fn read_layout_file(path: &Path) -> Layout {
    let content = fs::read_to_string(path).expect("Failed to read layout file");
    redox_layout_editor::parser::parse_layout_json(&content).expect("Failed to parse layout file")
}
