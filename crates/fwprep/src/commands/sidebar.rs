//! `fwprep sidebar` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use fwprep_config::{CliSettings, Config};
use fwprep_sidebar::Sidebar;
use tracing::debug;

use super::load_sidebar;
use crate::error::CliError;
use crate::output::Output;
use crate::watch::watch_content_root;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Path to configuration file (default: auto-discover fwprep.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// File to write the sidebar JSON to (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Rebuild the sidebar whenever the content root changes.
    #[arg(short, long)]
    watch: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the content root cannot be
    /// scanned, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output: self.output,
            pretty: self.compact.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = &config.docs_resolved.source_dir;
        let emit = || -> Result<(), CliError> {
            let (sidebar, emitted) = emit_sidebar(&config)?;
            match (emitted, config.sidebar_resolved.output.as_deref()) {
                (Emitted::Written, Some(path)) => output.success(&format!(
                    "Sidebar written to {} ({} sections)",
                    path.display(),
                    sidebar.len()
                )),
                (Emitted::Unchanged, Some(path)) => {
                    debug!(path = %path.display(), "Sidebar unchanged");
                }
                _ => {}
            }
            Ok(())
        };

        emit()?;

        if self.watch {
            output.info(&format!("Watching {} for changes", source_dir.display()));
            watch_content_root(
                source_dir,
                config.sidebar_resolved.output.as_deref(),
                emit,
            )?;
        }

        Ok(())
    }
}

/// Where a sidebar build ended up.
#[derive(Debug, PartialEq, Eq)]
enum Emitted {
    /// Printed to stdout.
    Stdout,
    /// Output file (re)written.
    Written,
    /// Output file already held the same JSON.
    Unchanged,
}

/// Build the sidebar for `config` and write it to the configured target.
fn emit_sidebar(config: &Config) -> Result<(Sidebar, Emitted), CliError> {
    let sidebar = load_sidebar(config)?;
    let json = render_sidebar(&sidebar, config.sidebar_resolved.pretty)?;

    let emitted = match config.sidebar_resolved.output.as_deref() {
        Some(path) if write_if_changed(path, &json)? => Emitted::Written,
        Some(_) => Emitted::Unchanged,
        None => {
            std::io::stdout().lock().write_all(json.as_bytes())?;
            Emitted::Stdout
        }
    };

    Ok((sidebar, emitted))
}

/// Serialize the sidebar as JSON with a trailing newline.
fn render_sidebar(sidebar: &Sidebar, pretty: bool) -> Result<String, serde_json::Error> {
    let mut json = if pretty {
        serde_json::to_string_pretty(sidebar)?
    } else {
        serde_json::to_string(sidebar)?
    };
    json.push('\n');
    Ok(json)
}

/// Write `content` to `path` unless the file already holds it.
///
/// Returns `true` if the file was written. Parent directories are created.
fn write_if_changed(path: &Path, content: &str) -> std::io::Result<bool> {
    if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(true)
}
