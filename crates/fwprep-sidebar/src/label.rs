//! Section label derivation.

use std::sync::LazyLock;

use regex::Regex;

/// Leading ordering prefix on section directories (e.g. `01_`).
static NUMERIC_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+_").unwrap());

/// Derive the display label for a section directory name.
///
/// Strips one leading run of decimal digits followed by `_`. Names without
/// that prefix, or names that would become empty, are returned verbatim.
///
/// - `01_Plans` -> `Plans`
/// - `01_02_Plans` -> `02_Plans`
/// - `Notes` -> `Notes`
/// - `01-Plans` -> `01-Plans`
pub fn section_label(name: &str) -> &str {
    match NUMERIC_PREFIX_RE.find(name) {
        Some(m) if m.end() < name.len() => &name[m.end()..],
        _ => name,
    }
}
