//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod sidebar;

pub(crate) use list::ListArgs;
pub(crate) use sidebar::SidebarArgs;

use fwprep_config::Config;
use fwprep_sidebar::Sidebar;

use crate::error::CliError;

/// Build the sidebar for the configured content root and exclusions.
fn load_sidebar(config: &Config) -> Result<Sidebar, CliError> {
    let sidebar = config
        .sidebar_resolved
        .builder()
        .build(&config.docs_resolved.source_dir)?;
    Ok(sidebar)
}
