//! Branding and application identity.
//!
//! Names and URLs that end up in user-facing text and in the header of
//! generated keymap files live here so they only need changing in one place.

/// The human-readable display name of the application.
///
/// Also written into the first line of every generated `keymap.c`.
pub const APP_DISPLAY_NAME: &str = "Redox Layout Editor";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "redox-layout";

/// The directory name for application data (config).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "RedoxLayoutEditor";

/// The GitHub repository owner.
pub const GITHUB_OWNER: &str = "tilleyd";

/// The GitHub repository name.
pub const GITHUB_REPO: &str = "redox-layout-editor";

/// The full GitHub repository URL.
pub const GITHUB_URL: &str = "https://github.com/tilleyd/redox-layout-editor";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Multi-layer keymap editor for QMK keyboards";

/// Comment lines placed at the top of generated firmware files.
pub fn generated_header() -> String {
    format!("// Generated using {}.\n// {}\n", APP_DISPLAY_NAME, GITHUB_URL)
}
