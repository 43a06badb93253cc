//! Sidebar navigation derivation for fwprep notes.
//!
//! Scans a content root whose top-level directories are note sections and
//! produces the sidebar structure the site framework reads:
//!
//! - Each non-hidden, non-excluded top-level directory with at least one
//!   `.md` file becomes one key (`/01_Plans/`).
//! - The group label drops a leading `NN_` ordering prefix (`Plans`).
//! - Items link to each Markdown file directly inside the section.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use fwprep_sidebar::SidebarBuilder;
//!
//! let sidebar = SidebarBuilder::new()
//!     .with_exclude_dirs(["node_modules", "public"])
//!     .build(Path::new("."))?;
//! for (key, entries) in sidebar.iter() {
//!     println!("{key}: {} links", entries[0].items.len());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod label;
mod sidebar;

pub use builder::{DEFAULT_EXCLUDE_DIRS, SidebarBuilder, build_sidebar};
pub use error::{SidebarError, SidebarErrorKind};
pub use label::section_label;
pub use sidebar::{Sidebar, SidebarEntry, SidebarItem};
