//! Configuration management for fwprep.
//!
//! Parses `fwprep.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support `~` and environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `sidebar.output`

mod expand;

use std::path::{Path, PathBuf};

use fwprep_sidebar::{DEFAULT_EXCLUDE_DIRS, SidebarBuilder};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content root directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebar output file.
    pub output: Option<PathBuf>,
    /// Override pretty-printing of the sidebar JSON.
    pub pretty: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fwprep.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidebar configuration (paths are relative strings from TOML).
    sidebar: SidebarConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved sidebar configuration (set after loading).
    #[serde(skip)]
    pub sidebar_resolved: SidebarConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Content root scanned for note sections.
    pub source_dir: PathBuf,
}

/// Raw sidebar configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SidebarConfigRaw {
    exclude_dirs: Option<Vec<String>>,
    output: Option<String>,
    pretty: Option<bool>,
}

/// Resolved sidebar configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct SidebarConfig {
    /// Top-level directory names never treated as sections.
    pub exclude_dirs: Vec<String>,
    /// File to write the sidebar JSON to. `None` means stdout.
    pub output: Option<PathBuf>,
    /// Whether to pretty-print the sidebar JSON.
    pub pretty: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
            output: None,
            pretty: true,
        }
    }
}

impl SidebarConfig {
    /// Create a [`SidebarBuilder`] using the configured exclusions.
    #[must_use]
    pub fn builder(&self) -> SidebarBuilder {
        SidebarBuilder::new().with_exclude_dirs(self.exclude_dirs.iter().cloned())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`NOTES_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `fwprep.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output) = &settings.output {
            self.sidebar_resolved.output = Some(output.clone());
        }
        if let Some(pretty) = settings.pretty {
            self.sidebar_resolved.pretty = pretty;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    ///
    /// The base directory itself is the content root: note sections live at
    /// the top level of the project.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            sidebar: SidebarConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.to_path_buf(),
            },
            sidebar_resolved: SidebarConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.sidebar_resolved.exclude_dirs {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "sidebar.exclude_dirs entries cannot be empty".to_owned(),
                ));
            }
            if name.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "sidebar.exclude_dirs entry {name:?} must be a directory name, not a path"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref output) = self.sidebar.output {
            self.sidebar.output = Some(expand::expand_env(output, "sidebar.output")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: self
                .docs
                .source_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |d| config_dir.join(d)),
        };

        let defaults = SidebarConfig::default();
        self.sidebar_resolved = SidebarConfig {
            exclude_dirs: self
                .sidebar
                .exclude_dirs
                .clone()
                .unwrap_or(defaults.exclude_dirs),
            output: self.sidebar.output.as_deref().map(|o| config_dir.join(o)),
            pretty: self.sidebar.pretty.unwrap_or(defaults.pretty),
        };
    }
}
