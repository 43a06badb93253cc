//! Sidebar derivation by directory scanning.
//!
//! The scan runs in two steps: enumerate top-level section directories under
//! the content root, then enumerate Markdown files directly inside each
//! section. Nothing below the first section level is visited.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::SidebarError;
use crate::label::section_label;
use crate::sidebar::{Sidebar, SidebarEntry, SidebarItem};

/// Directory names excluded from scanning unless overridden.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", "docs_cache"];

/// Suffix identifying Markdown documents.
const MARKDOWN_SUFFIX: &str = ".md";

/// Prefix marking hidden entries.
const HIDDEN_PREFIX: char = '.';

/// Builds a [`Sidebar`] from a content root.
///
/// The builder holds only the exclusion list. Every call to
/// [`build`](Self::build) re-reads the filesystem and returns a fresh value.
#[derive(Debug, Clone)]
pub struct SidebarBuilder {
    exclude_dirs: Vec<String>,
}

impl Default for SidebarBuilder {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
        }
    }
}

impl SidebarBuilder {
    /// Create a builder with the default exclusion list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of excluded top-level directory names.
    #[must_use]
    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Excluded top-level directory names.
    #[must_use]
    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    /// Scan `content_root` and build the sidebar.
    ///
    /// Sections are emitted in ascending name order and items in ascending
    /// file path order. Sections without Markdown files are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] if `content_root` does not exist, is not a
    /// directory, or cannot be listed.
    pub fn build(&self, content_root: &Path) -> Result<Sidebar, SidebarError> {
        let sections = self.scan_sections(content_root)?;

        let mut sidebar = Sidebar::new();
        for section in &sections {
            let files = scan_documents(&content_root.join(section));
            if files.is_empty() {
                debug!(section = %section, "Skipping section without markdown files");
                continue;
            }

            debug!(section = %section, files = files.len(), "Scanned section");
            let items = files
                .iter()
                .map(|file| SidebarItem {
                    text: display_name(file).to_owned(),
                    link: format!("/{section}/{file}"),
                })
                .collect();

            sidebar.push(
                format!("/{section}/"),
                vec![SidebarEntry {
                    text: section_label(section).to_owned(),
                    items,
                }],
            );
        }

        info!(
            root = %content_root.display(),
            sections = sidebar.len(),
            "Built sidebar"
        );
        Ok(sidebar)
    }

    /// List section directory names under the content root, sorted.
    fn scan_sections(&self, content_root: &Path) -> Result<Vec<String>, SidebarError> {
        let metadata =
            fs::metadata(content_root).map_err(|e| SidebarError::io(e, content_root))?;
        if !metadata.is_dir() {
            return Err(SidebarError::not_a_directory(content_root));
        }

        let entries = fs::read_dir(content_root).map_err(|e| SidebarError::io(e, content_root))?;

        let mut sections: Vec<String> = readable_entries(entries, content_root)
            .filter_map(|entry| {
                let name = utf8_name(&entry)?;
                // is_dir() follows symlinks, unlike DirEntry::file_type()
                (!self.is_reserved(&name) && entry.path().is_dir()).then_some(name)
            })
            .collect();

        sections.sort_unstable();
        Ok(sections)
    }

    fn is_reserved(&self, name: &str) -> bool {
        name.starts_with(HIDDEN_PREFIX) || self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Build the sidebar for `content_root` with the default exclusion list.
///
/// # Errors
///
/// Returns [`SidebarError`] if `content_root` does not exist, is not a
/// directory, or cannot be listed.
pub fn build_sidebar(content_root: &Path) -> Result<Sidebar, SidebarError> {
    SidebarBuilder::default().build(content_root)
}

/// List Markdown file names directly inside a section, sorted.
///
/// An unreadable section yields no files.
fn scan_documents(section_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(section_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %section_dir.display(), error = %e, "Skipping unreadable section");
            return Vec::new();
        }
    };

    let mut files: Vec<String> = readable_entries(entries, section_dir)
        .filter_map(|entry| {
            let name = utf8_name(&entry)?;
            (name.ends_with(MARKDOWN_SUFFIX) && entry.path().is_file()).then_some(name)
        })
        .collect();

    files.sort_unstable();
    files
}

/// Directory entries that could be read, with a warning for each that could not.
fn readable_entries<'a>(
    entries: fs::ReadDir,
    dir: &'a Path,
) -> impl Iterator<Item = fs::DirEntry> + 'a {
    entries.filter_map(move |entry| {
        entry
            .inspect_err(|e| warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry"))
            .ok()
    })
}

/// Entry name as UTF-8, or `None` (with a warning) when it is not valid UTF-8.
fn utf8_name(entry: &fs::DirEntry) -> Option<String> {
    entry
        .file_name()
        .into_string()
        .inspect_err(|name| warn!(name = ?name, "Skipping entry with non-UTF-8 name"))
        .ok()
}

/// Filename without the Markdown suffix.
fn display_name(file: &str) -> &str {
    file.strip_suffix(MARKDOWN_SUFFIX).unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SidebarErrorKind;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write_files(root: &Path, files: &[&str]) {
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "# Notes").unwrap();
        }
    }

    fn links(sidebar: &Sidebar, key: &str) -> Vec<(String, String)> {
        sidebar.get(key).unwrap()[0]
            .items
            .iter()
            .map(|item| (item.text.clone(), item.link.clone()))
            .collect()
    }

    fn pair(text: &str, link: &str) -> (String, String) {
        (text.to_owned(), link.to_owned())
    }

    #[test]
    fn test_numbered_section_with_excluded_dir() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &["01_Plans/B.md", "01_Plans/A.md", "docs_cache/C.md"],
        );

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(sidebar.keys().collect::<Vec<_>>(), vec!["/01_Plans/"]);
        let entries = sidebar.get("/01_Plans/").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "Plans");
        assert_eq!(
            links(&sidebar, "/01_Plans/"),
            vec![pair("A", "/01_Plans/A.md"), pair("B", "/01_Plans/B.md")]
        );
        assert!(sidebar.get("/docs_cache/").is_none());
    }

    #[test]
    fn test_unprefixed_section_label_is_verbatim() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["Notes/intro.md"]);

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar.get("/Notes/").unwrap()[0].text, "Notes");
        assert_eq!(
            links(&sidebar, "/Notes/"),
            vec![pair("intro", "/Notes/intro.md")]
        );
    }

    #[test]
    fn test_empty_root_yields_empty_sidebar() {
        let temp_dir = create_test_dir();

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert!(sidebar.is_empty());
    }

    #[test]
    fn test_root_with_only_files_yields_empty_sidebar() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["README.md", "index.md"]);

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert!(sidebar.is_empty());
    }

    #[test]
    fn test_section_without_markdown_is_omitted() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &["02_Images/diagram.png", "03_IPMI/sel.md", "03_IPMI/notes.txt"],
        );
        fs::create_dir(temp_dir.path().join("04_Empty")).unwrap();

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(sidebar.keys().collect::<Vec<_>>(), vec!["/03_IPMI/"]);
        assert_eq!(
            links(&sidebar, "/03_IPMI/"),
            vec![pair("sel", "/03_IPMI/sel.md")]
        );
    }

    #[test]
    fn test_hidden_and_tooling_dirs_are_skipped() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &[
                ".vitepress/config.md",
                ".git/HEAD.md",
                "node_modules/pkg/README.md",
                "node_modules/top.md",
                "docs_cache/C.md",
                "01_Redfish/sessions.md",
            ],
        );

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(sidebar.keys().collect::<Vec<_>>(), vec!["/01_Redfish/"]);
    }

    #[test]
    fn test_custom_exclusions_replace_defaults() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["node_modules/top.md", "drafts/wip.md"]);

        let builder = SidebarBuilder::new().with_exclude_dirs(["drafts"]);
        let sidebar = builder.build(temp_dir.path()).unwrap();

        assert_eq!(builder.exclude_dirs(), ["drafts".to_owned()]);
        assert_eq!(sidebar.keys().collect::<Vec<_>>(), vec!["/node_modules/"]);
    }

    #[test]
    fn test_nested_directories_are_not_recursed() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &["01_BMC/overview.md", "01_BMC/deep/hidden.md", "05_Only/nested/x.md"],
        );

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(sidebar.keys().collect::<Vec<_>>(), vec!["/01_BMC/"]);
        assert_eq!(
            links(&sidebar, "/01_BMC/"),
            vec![pair("overview", "/01_BMC/overview.md")]
        );
    }

    #[test]
    fn test_directory_named_like_markdown_is_not_an_item() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["01_BMC/real.md"]);
        fs::create_dir(temp_dir.path().join("01_BMC/folder.md")).unwrap();

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(
            links(&sidebar, "/01_BMC/"),
            vec![pair("real", "/01_BMC/real.md")]
        );
    }

    #[test]
    fn test_only_md_suffix_matches() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &["Notes/a.md", "Notes/b.markdown", "Notes/c.MD", "Notes/d.md.bak"],
        );

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(links(&sidebar, "/Notes/"), vec![pair("a", "/Notes/a.md")]);
    }

    #[test]
    fn test_sections_and_items_are_sorted_by_code_point() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &[
                "b/z.md",
                "b/Y.md",
                "b/a.md",
                "a-b/x.md",
                "a/y.md",
                "Q/q.md",
                "10_Late/x.md",
                "02_Early/x.md",
            ],
        );

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(
            sidebar.keys().collect::<Vec<_>>(),
            vec!["/02_Early/", "/10_Late/", "/Q/", "/a/", "/a-b/", "/b/"]
        );
        assert_eq!(
            links(&sidebar, "/b/"),
            vec![
                pair("Y", "/b/Y.md"),
                pair("a", "/b/a.md"),
                pair("z", "/b/z.md")
            ]
        );
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let temp_dir = create_test_dir();
        write_files(
            temp_dir.path(),
            &["01_Plans/A.md", "01_Plans/B.md", "02_Linux/kernel.md"],
        );

        let builder = SidebarBuilder::new();
        let first = builder.build(temp_dir.path()).unwrap();
        let second = builder.build(temp_dir.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sidebar_json_document() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["01_Plans/B.md", "01_Plans/A.md", "Notes/intro.md"]);

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(
            serde_json::to_value(&sidebar).unwrap(),
            serde_json::json!({
                "/01_Plans/": [{
                    "text": "Plans",
                    "items": [
                        { "text": "A", "link": "/01_Plans/A.md" },
                        { "text": "B", "link": "/01_Plans/B.md" }
                    ]
                }],
                "/Notes/": [{
                    "text": "Notes",
                    "items": [{ "text": "intro", "link": "/Notes/intro.md" }]
                }]
            })
        );
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let temp_dir = create_test_dir();
        let missing = temp_dir.path().join("nonexistent");

        let err = build_sidebar(&missing).unwrap_err();

        assert_eq!(err.kind, SidebarErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(missing.as_path()));
    }

    #[test]
    fn test_file_root_is_not_a_directory() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["notes.md"]);
        let file = temp_dir.path().join("notes.md");

        let err = build_sidebar(&file).unwrap_err();

        assert_eq!(err.kind, SidebarErrorKind::NotADirectory);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_section_is_followed() {
        let temp_dir = create_test_dir();
        let outside = create_test_dir();
        write_files(outside.path(), &["shared.md"]);
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("06_Shared")).unwrap();

        let sidebar = build_sidebar(temp_dir.path()).unwrap();

        assert_eq!(
            links(&sidebar, "/06_Shared/"),
            vec![pair("shared", "/06_Shared/shared.md")]
        );
    }

    #[test]
    fn test_readable_entries_lists_section_files() {
        let temp_dir = create_test_dir();
        write_files(temp_dir.path(), &["a.md", "b.md"]);

        let entries = fs::read_dir(temp_dir.path()).unwrap();
        let mut names: Vec<_> = readable_entries(entries, temp_dir.path())
            .map(|e| e.file_name().into_string().unwrap())
            .collect();
        names.sort_unstable();

        assert_eq!(names, vec!["a.md".to_owned(), "b.md".to_owned()]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("intro.md"), "intro");
        assert_eq!(display_name("a.b.md"), "a.b");
    }
}
