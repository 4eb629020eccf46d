//! Interactive line-based editor.
//!
//! Each input line is one event that runs to completion before the next one
//! is read. Loading a file is the only step that suspends: the file is read
//! asynchronously and the parsed layout is then installed in one step.

use crate::cli::common::{new_editor, CliError, CliResult};
use crate::cli::show::format_layer_grid;
use crate::config::Config;
use crate::models::{Keymap, PositionId, PositionSpace};
use crate::services::{LayerEditor, LayoutService, LAST_LAYER_REFUSAL};
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

/// Default file name for `export` without an argument.
const DEFAULT_EXPORT_FILE: &str = "keymap.c";

/// Default file name for `save` without an argument or a loaded file.
const DEFAULT_SAVE_FILE: &str = "layout.json";

const HELP: &str = "\
Commands:
  layers              List layers (* marks the selected layer)
  select <layer>      Select a layer by index or name and show it
  show                Show the selected layer
  add <name>          Append a new empty layer
  remove [index]      Remove a layer (default: selected)
  rename <name>       Rename the selected layer
  set <pos> <value>   Bind a key on the selected layer (e.g. set k-1-1 KC_ESC)
  clear <pos>         Make a key on the selected layer transparent
  options <pos>       List the values offered for a key
  load [file]         Replace the layout with a saved file
  save [file]         Save the layout
  export [file]       Write keymap.c (default: keymap.c)
  lint                Check for dangling references and other problems
  help                Show this help
  quit                Leave the editor
";

/// Open the interactive layout editor
#[derive(Debug, Clone, Args)]
pub struct ShellArgs {
    /// Layout file to open (starts with an empty layout if omitted)
    #[arg(value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

impl ShellArgs {
    /// Execute the shell command on stdin/stdout
    pub async fn execute(&self, config: &Config) -> CliResult<()> {
        let mut editor = new_editor(config)?;

        if let Some(path) = &self.layout {
            let layout = LayoutService::read_layout(path)
                .await
                .map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))?;
            editor.replace_layout(layout)?;
        }

        let stdin = BufReader::new(tokio::io::stdin());
        let mut shell = Shell::new(&mut editor, self.layout.clone(), std::io::stdout());
        shell
            .run(stdin)
            .await
            .map_err(|e| CliError::io(format!("Shell error: {e:#}")))
    }
}

/// Outcome of one command.
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented host over a [`LayerEditor`].
pub struct Shell<'a, S: PositionSpace, W: Write> {
    editor: &'a mut LayerEditor<S>,
    layout_path: Option<PathBuf>,
    out: W,
}

impl<'a, S: PositionSpace, W: Write> Shell<'a, S, W> {
    /// Creates a shell writing to `out`. `layout_path` is the default for `save`/`load`.
    pub fn new(editor: &'a mut LayerEditor<S>, layout_path: Option<PathBuf>, out: W) -> Self {
        Self {
            editor,
            layout_path,
            out,
        }
    }

    /// Reads and executes commands until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();

        self.show_active()?;
        self.prompt()?;
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if !line.is_empty() {
                debug!(command = line, "Shell command");
                if let Flow::Quit = self.handle(line, &mut lines).await? {
                    break;
                }
            }
            self.prompt()?;
        }

        Ok(())
    }

    /// Consumes the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    async fn handle<R: AsyncBufRead + Unpin>(&mut self, line: &str, lines: &mut Lines<R>) -> Result<Flow> {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => write!(self.out, "{HELP}")?,
            "layers" => self.list_layers()?,
            "show" => self.show_active()?,
            "select" => match self.resolve_layer(rest) {
                Some(index) => match self.editor.select_layer(index) {
                    Ok(_) => self.show_active()?,
                    Err(e) => writeln!(self.out, "{e}")?,
                },
                None => writeln!(self.out, "No layer '{rest}'")?,
            },
            "add" => match self.editor.add_layer(rest, Keymap::new()) {
                Ok(index) => writeln!(self.out, "Added layer {index}: {rest}")?,
                Err(e) => writeln!(self.out, "{e}")?,
            },
            "remove" => self.remove(rest, lines).await?,
            "rename" => {
                let index = self.editor.active_layer();
                match self.editor.rename_layer(index, rest) {
                    Ok(()) => writeln!(self.out, "Renamed layer {index} to {rest}")?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            "set" => match rest.split_once(char::is_whitespace) {
                Some((position, value)) => {
                    let position = PositionId::from(position);
                    if self.editor.space().contains(&position) {
                        let layer = self.editor.active_layer();
                        self.editor.set_entry(layer, position, value.trim())?;
                    } else {
                        writeln!(self.out, "Unknown position '{position}'")?;
                    }
                }
                None => writeln!(self.out, "Usage: set <pos> <value>")?,
            },
            "clear" => {
                if rest.is_empty() {
                    writeln!(self.out, "Usage: clear <pos>")?;
                } else {
                    let layer = self.editor.active_layer();
                    self.editor.clear_entry(layer, rest)?;
                }
            }
            "options" => match self.editor.options().key_options(rest) {
                Some(options) => writeln!(self.out, "{}", options.join(" "))?,
                None => writeln!(self.out, "Unknown position '{rest}'")?,
            },
            "load" => self.load(rest).await?,
            "save" => self.save(rest)?,
            "export" => self.export(rest)?,
            "lint" => {
                let report = self.editor.lint();
                if report.is_clean() {
                    writeln!(self.out, "No problems found.")?;
                } else {
                    write!(self.out, "{}", report.format_message())?;
                }
            }
            _ => writeln!(self.out, "Unknown command '{command}'. Type 'help' for a list of commands.")?,
        }

        Ok(Flow::Continue)
    }

    async fn remove<R: AsyncBufRead + Unpin>(&mut self, arg: &str, lines: &mut Lines<R>) -> Result<()> {
        if self.editor.layer_count() <= 1 {
            writeln!(self.out, "{LAST_LAYER_REFUSAL}")?;
            return Ok(());
        }

        let index = if arg.is_empty() {
            Some(self.editor.active_layer())
        } else {
            parse_index(arg)
        };
        let Some((index, name)) = index.and_then(|i| {
            self.editor
                .layout()
                .get_layer(i)
                .map(|layer| (i, layer.name.clone()))
        }) else {
            writeln!(self.out, "Usage: remove [index]")?;
            return Ok(());
        };

        write!(self.out, "Remove layer '{name}'? [y/N] ")?;
        self.out.flush()?;
        let answer = lines.next_line().await?.unwrap_or_default();
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            return Ok(());
        }

        match self.editor.remove_layer(index) {
            Ok(_) => self.show_active()?,
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    async fn load(&mut self, arg: &str) -> Result<()> {
        let Some(path) = self.target_path(arg, None) else {
            writeln!(self.out, "Choose a file first.")?;
            return Ok(());
        };

        // the await is the only suspension; installing the layout is synchronous
        let loaded = LayoutService::read_layout(&path).await;
        match loaded.and_then(|layout| self.editor.replace_layout(layout).map_err(Into::into)) {
            Ok(()) => {
                self.layout_path = Some(path);
                writeln!(self.out, "Layout loaded successfully.")?;
                self.show_active()?;
            }
            Err(e) => writeln!(self.out, "Failed to load layout: {e:#}")?,
        }
        Ok(())
    }

    fn save(&mut self, arg: &str) -> Result<()> {
        let path = self
            .target_path(arg, None)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE));

        match LayoutService::save(self.editor.layout(), &path) {
            Ok(()) => {
                writeln!(self.out, "Saved {}", path.display())?;
                self.layout_path = Some(path);
            }
            Err(e) => writeln!(self.out, "Failed to save layout: {e:#}")?,
        }
        Ok(())
    }

    fn export(&mut self, arg: &str) -> Result<()> {
        let path = self
            .target_path(arg, Some(Path::new(DEFAULT_EXPORT_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));

        let report = self.editor.lint();
        for warning in &report.warnings {
            writeln!(self.out, "warning: {warning}")?;
        }

        match LayoutService::write_export(&self.editor.export_to_text(), &path) {
            Ok(()) => writeln!(self.out, "Exported {}", path.display())?,
            Err(e) => writeln!(self.out, "Failed to export: {e:#}")?,
        }
        Ok(())
    }

    /// Explicit argument, else the given default, else the current layout file.
    fn target_path(&self, arg: &str, default: Option<&Path>) -> Option<PathBuf> {
        if !arg.is_empty() {
            return Some(PathBuf::from(arg));
        }
        default
            .map(Path::to_path_buf)
            .or_else(|| self.layout_path.clone())
    }

    /// Index given literally, else the first layer with that name.
    fn resolve_layer(&self, arg: &str) -> Option<usize> {
        parse_index(arg).or_else(|| self.editor.layout().layer_index(arg))
    }

    fn list_layers(&mut self) -> Result<()> {
        let active = self.editor.active_layer();
        for (index, name) in self.editor.options().layer_options().iter().enumerate() {
            let marker = if index == active { '*' } else { ' ' };
            writeln!(self.out, "{marker} {index}: {name}")?;
        }
        Ok(())
    }

    fn show_active(&mut self) -> Result<()> {
        let index = self.editor.active_layer();
        let name = self.editor.options().layer_options()[index].clone();
        let grid = format_layer_grid(self.editor.space(), &self.editor.active_view());
        writeln!(self.out, "Layer {index}: {name}")?;
        write!(self.out, "{grid}")?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeyGrid;
    use tempfile::TempDir;

    async fn run_script(editor: &mut LayerEditor<KeyGrid>, script: &str) -> String {
        let mut shell = Shell::new(editor, None, Vec::new());
        shell.run(script.as_bytes()).await.unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn test_editor() -> LayerEditor<KeyGrid> {
        LayerEditor::with_palette(KeyGrid::new(1, 2), &["KC_A".to_string()])
    }

    #[tokio::test]
    async fn test_add_select_set() {
        let mut editor = test_editor();
        let output = run_script(&mut editor, "add NAV\nselect NAV\nset k-1-2 KC_UP\nlayers\nquit\n").await;

        assert!(output.contains("Added layer 1: NAV"));
        assert!(output.contains("  0: BASE\n* 1: NAV\n"));
        assert_eq!(editor.layout().layers[1].get("k-1-2"), Some("KC_UP"));
    }

    #[tokio::test]
    async fn test_set_outside_grid_refused() {
        let mut editor = test_editor();
        let output = run_script(&mut editor, "set k-1-3 KC_A\n").await;

        assert!(output.contains("Unknown position 'k-1-3'"));
        assert!(editor.layout().layers[0].keymap.is_empty());
    }

    #[tokio::test]
    async fn test_remove_last_layer_refused() {
        let mut editor = test_editor();
        let output = run_script(&mut editor, "remove\n").await;
        assert!(output.contains("Cannot remove last layer."));
        assert_eq!(editor.layer_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_asks_for_confirmation() {
        let mut editor = test_editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();

        let output = run_script(&mut editor, "remove 1\nn\n").await;
        assert!(output.contains("Remove layer 'NAV'? [y/N]"));
        assert_eq!(editor.layer_count(), 2);

        run_script(&mut editor, "remove 1\ny\n").await;
        assert_eq!(editor.layer_count(), 1);
    }

    #[tokio::test]
    async fn test_options_mirror_layers() {
        let mut editor = test_editor();
        let output = run_script(&mut editor, "add NAV\nrename MAIN\noptions k-1-1\n").await;
        assert!(output.contains("_______ [MAIN] [NAV] KC_A"));
    }

    #[tokio::test]
    async fn test_save_load_export() {
        let temp_dir = TempDir::new().unwrap();
        let layout_path = temp_dir.path().join("layout.json");
        let keymap_path = temp_dir.path().join("keymap.c");

        let mut editor = test_editor();
        let script = format!(
            "add NAV\nset k-1-1 [NAV]\nsave {}\nexport {}\n",
            layout_path.display(),
            keymap_path.display()
        );
        let output = run_script(&mut editor, &script).await;
        assert!(output.contains("Exported"));
        assert!(std::fs::read_to_string(&keymap_path).unwrap().contains("MO(_NAV), _______"));

        let mut other = test_editor();
        let output = run_script(&mut other, &format!("load {}\n", layout_path.display())).await;
        assert!(output.contains("Layout loaded successfully."));
        assert_eq!(other.layout(), editor.layout());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_layout() {
        let temp_dir = TempDir::new().unwrap();
        let bad_path = temp_dir.path().join("bad.json");
        std::fs::write(&bad_path, "{ \"layers\": [] }").unwrap();

        let mut editor = test_editor();
        editor.add_layer("NAV", Keymap::new()).unwrap();
        let before = editor.layout().clone();

        let output = run_script(&mut editor, &format!("load {}\n", bad_path.display())).await;
        assert!(output.contains("Failed to load layout"));
        assert_eq!(editor.layout(), &before);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut editor = test_editor();
        let output = run_script(&mut editor, "frobnicate\n").await;
        assert!(output.contains("Unknown command 'frobnicate'"));
    }
}
