//! `fwprep list` command implementation.

use std::path::PathBuf;

use clap::Args;
use fwprep_config::{CliSettings, Config};
use fwprep_sidebar::Sidebar;

use super::load_sidebar;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Path to configuration file (default: auto-discover fwprep.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the content root cannot be
    /// scanned.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;

        let sidebar = load_sidebar(&config)?;

        if sidebar.is_empty() {
            output.warning(&format!(
                "No sections with markdown files found in {}",
                source_dir.display()
            ));
            return Ok(());
        }

        output.info(&format!("Content root: {}", source_dir.display()));
        for (key, entries) in sidebar.iter() {
            for entry in entries {
                output.section(key, entry);
            }
        }
        output.success(&summary(&sidebar));

        Ok(())
    }
}

/// One-line totals, e.g. `2 sections, 5 pages`.
fn summary(sidebar: &Sidebar) -> String {
    let pages: usize = sidebar
        .iter()
        .flat_map(|(_, entries)| entries)
        .map(|entry| entry.items.len())
        .sum();
    format!("{} sections, {pages} pages", sidebar.len())
}
