//! Sidebar error types.

use std::path::PathBuf;

/// Semantic error categories for a failed sidebar build.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SidebarErrorKind {
    /// Content root does not exist.
    NotFound,
    /// Content root exists but is not a directory.
    NotADirectory,
    /// Content root cannot be read.
    PermissionDenied,
    /// Other/unknown error category.
    Other,
}

/// Filesystem error raised when the content root cannot be scanned.
#[derive(Debug)]
pub struct SidebarError {
    /// Semantic error category.
    pub kind: SidebarErrorKind,
    /// Path that caused the error.
    pub path: Option<PathBuf>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SidebarError {
    /// Create a new sidebar error.
    #[must_use]
    pub fn new(kind: SidebarErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a "not a directory" error for the given path.
    #[must_use]
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::new(SidebarErrorKind::NotADirectory).with_path(path)
    }

    /// Create a sidebar error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SidebarErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => SidebarErrorKind::PermissionDenied,
            std::io::ErrorKind::NotADirectory => SidebarErrorKind::NotADirectory,
            _ => SidebarErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for SidebarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message (path: /foo/bar)"
        let kind_str = match self.kind {
            SidebarErrorKind::NotFound => "Content root not found",
            SidebarErrorKind::NotADirectory => "Content root is not a directory",
            SidebarErrorKind::PermissionDenied => "Permission denied",
            SidebarErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for SidebarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
