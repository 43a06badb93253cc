//! CLI error types.

use fwprep_config::ConfigError;
use fwprep_sidebar::SidebarError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Sidebar(#[from] SidebarError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize sidebar: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}
