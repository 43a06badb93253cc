//! Sidebar data structures consumed by the site framework.
//!
//! The serialized form matches the framework's multi-sidebar configuration:
//! an object keyed by section path (`/01_Plans/`) whose values are lists of
//! navigation groups.

use serde::Serialize;
use serde::ser::SerializeMap;

/// A single link inside a navigation group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Display name (filename without extension).
    pub text: String,
    /// Root-relative link (e.g., `/01_Plans/A.md`).
    pub link: String,
}

/// Navigation group for one top-level section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    /// Section label with any numeric ordering prefix removed.
    pub text: String,
    /// Links in ascending file path order.
    pub items: Vec<SidebarItem>,
}

/// Ordered mapping from section path to its navigation groups.
///
/// Keys are kept in section name order, which is not necessarily the
/// lexicographic order of the keys themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    groups: Vec<(String, Vec<SidebarEntry>)>,
}

impl Sidebar {
    /// Create an empty sidebar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the groups for a section path.
    pub(crate) fn push(&mut self, key: String, entries: Vec<SidebarEntry>) {
        self.groups.push((key, entries));
    }

    /// Get the groups for a section path (e.g., `/01_Plans/`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[SidebarEntry]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Section paths in output order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(section path, groups)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarEntry])> {
        self.groups
            .iter()
            .map(|(k, entries)| (k.as_str(), entries.as_slice()))
    }

    /// Number of section paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if no section produced any links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for Sidebar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, entries) in &self.groups {
            map.serialize_entry(key, entries)?;
        }
        map.end()
    }
}
