//! CLI command handlers for the Redox Layout Editor.
//!
//! Every subcommand except `shell` is one-shot: it loads a layout file,
//! applies a single editor operation and writes the result back.

pub mod common;
pub mod generate;
pub mod key;
pub mod layer;
pub mod new;
pub mod shell;
pub mod show;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
pub use key::KeyArgs;
pub use layer::LayerArgs;
pub use new::NewArgs;
pub use shell::ShellArgs;
pub use show::ShowArgs;
pub use validate::ValidateArgs;
