//! Colored terminal output on stderr.
//!
//! stdout is reserved for sidebar JSON, so every message goes to stderr.

use console::{Style, Term};
use fwprep_sidebar::SidebarEntry;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&Style::new().red(), msg);
    }

    /// Print one sidebar group: label, key and page count, then its links.
    pub(crate) fn section(&self, key: &str, entry: &SidebarEntry) {
        let dim = Style::new().dim();
        self.line(&format!(
            "{} {}",
            Style::new().cyan().bold().apply_to(&entry.text),
            dim.apply_to(format!("{key} ({} pages)", entry.items.len()))
        ));
        for item in &entry.items {
            self.line(&format!("  {} {}", item.text, dim.apply_to(&item.link)));
        }
    }
}
