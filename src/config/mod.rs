//! Configuration management.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Name of the repo-local configuration file.
pub const CONFIG_FILE_NAME: &str = ".memfold.toml";

/// Default context filename discovered by the tree walker.
pub const DEFAULT_CONTEXT_FILENAME: &str = "AGENTS.md";

/// Name of the tool-specific ignore file.
pub const MEMFOLD_IGNORE_FILE: &str = ".memfoldignore";

/// Main configuration for memfold.
#[derive(Debug, Clone)]
pub struct MemfoldConfig {
    /// Context filenames to discover, in per-directory load order.
    pub context_filenames: Vec<String>,
    /// How imported content is represented in the merged document.
    pub import_format: ImportFormat,
    /// Maximum number of directories the walker may visit. `None` is unbounded.
    pub discovery_max_dirs: Option<usize>,
    /// Additional workspace directories to scan after the working directory.
    pub include_dirs: Vec<PathBuf>,
    /// Extension-contributed context files (absolute paths).
    pub extension_context_paths: Vec<PathBuf>,
    /// Ignore rules applied at every directory level.
    pub file_filtering: FileFilteringOptions,
}

impl Default for MemfoldConfig {
    fn default() -> Self {
        Self {
            context_filenames: vec![DEFAULT_CONTEXT_FILENAME.to_string()],
            import_format: ImportFormat::default(),
            discovery_max_dirs: None,
            include_dirs: Vec::new(),
            extension_context_paths: Vec::new(),
            file_filtering: FileFilteringOptions::default(),
        }
    }
}

/// How nested/imported content is represented in the merged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// Plain concatenation with a simple separator, no structural markers.
    Flat,
    /// Each inclusion is wrapped with a marker identifying its source path
    /// and nesting depth.
    #[default]
    Tree,
}

impl ImportFormat {
    /// Parses an import format string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `s` is neither `flat` nor `tree`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "tree" => Ok(Self::Tree),
            other => Err(Error::InvalidInput(format!(
                "unknown import format '{other}' (expected 'flat' or 'tree')"
            ))),
        }
    }

    /// Returns the format as a lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tree => "tree",
        }
    }
}

/// Ignore rules applied identically at every directory level.
#[derive(Debug, Clone)]
pub struct FileFilteringOptions {
    /// Respect `.gitignore` patterns found at the search root.
    pub respect_gitignore: bool,
    /// Respect `.memfoldignore` patterns found at the search root.
    pub respect_memfold_ignore: bool,
    /// Explicit exclude globs (gitignore-style).
    pub exclude: Vec<String>,
}

impl Default for FileFilteringOptions {
    fn default() -> Self {
        Self {
            respect_gitignore: true,
            respect_memfold_ignore: true,
            exclude: Vec::new(),
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Context filenames.
    pub context_filenames: Option<Vec<String>>,
    /// Import format (`flat` or `tree`).
    pub import_format: Option<ImportFormat>,
    /// Directory-visit budget.
    pub discovery_max_dirs: Option<usize>,
    /// Include directories.
    pub include_dirs: Option<Vec<String>>,
    /// Extension-contributed context file paths.
    pub extension_context_paths: Option<Vec<String>>,
    /// Filtering section.
    pub filtering: Option<ConfigFileFiltering>,
}

/// Filtering section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileFiltering {
    /// Respect `.gitignore`.
    pub respect_gitignore: Option<bool>,
    /// Respect `.memfoldignore`.
    pub respect_memfold_ignore: Option<bool>,
    /// Explicit exclude globs.
    pub exclude: Option<Vec<String>>,
}

impl MemfoldConfig {
    /// Loads configuration for a workspace directory.
    ///
    /// Lookup order: `{workspace}/.memfold.toml`, then the user config
    /// directory (`~/.config/memfold/config.toml` on Linux). Values from the
    /// first file found are layered over the defaults; if no file exists the
    /// defaults are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if a config file exists but cannot
    /// be read or parsed.
    pub fn load(workspace_dir: &Path) -> Result<Self> {
        let mut candidates = vec![workspace_dir.join(CONFIG_FILE_NAME)];
        if let Some(dirs) = directories::ProjectDirs::from("", "", "memfold") {
            candidates.push(dirs.config_dir().join("config.toml"));
        }

        for path in candidates {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config file");
                return Self::from_config_path(&path);
            }
        }

        Ok(Self::default())
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read or parsed.
    pub fn from_config_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "config read".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        let file: ConfigFile = toml::from_str(&raw).map_err(|e| Error::OperationFailed {
            operation: "config parse".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::from_config_file(file))
    }

    /// Layers parsed config-file values over the defaults.
    #[must_use]
    pub fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        let filtering = file.filtering.unwrap_or_default();
        Self {
            context_filenames: file
                .context_filenames
                .filter(|names| !names.is_empty())
                .unwrap_or(defaults.context_filenames),
            import_format: file.import_format.unwrap_or(defaults.import_format),
            discovery_max_dirs: file.discovery_max_dirs,
            include_dirs: file
                .include_dirs
                .map(|dirs| dirs.into_iter().map(PathBuf::from).collect())
                .unwrap_or(defaults.include_dirs),
            extension_context_paths: file
                .extension_context_paths
                .map(|paths| paths.into_iter().map(PathBuf::from).collect())
                .unwrap_or(defaults.extension_context_paths),
            file_filtering: FileFilteringOptions {
                respect_gitignore: filtering
                    .respect_gitignore
                    .unwrap_or(defaults.file_filtering.respect_gitignore),
                respect_memfold_ignore: filtering
                    .respect_memfold_ignore
                    .unwrap_or(defaults.file_filtering.respect_memfold_ignore),
                exclude: filtering
                    .exclude
                    .unwrap_or(defaults.file_filtering.exclude),
            },
        }
    }
}
