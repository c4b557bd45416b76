//! Search-root resolution.
//!
//! Normalizes the primary working directory, the include directories, and
//! extension-contributed context-file paths into a canonical, deduplicated,
//! order-preserving list of roots for the walker. Resolution is a pure
//! transformation over paths: the only fatal condition is a primary working
//! directory that cannot be canonicalized; every other bad path is dropped
//! best-effort with a diagnostic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// One resolved starting point for discovery.
///
/// All contained paths are absolute and symlink-resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoot {
    /// A directory to scan recursively.
    Directory(PathBuf),
    /// An explicit context file contributed by an extension.
    File(PathBuf),
}

impl SearchRoot {
    /// Returns the underlying path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(p) | Self::File(p) => p,
        }
    }
}

/// Resolves the set of search roots for one discovery call.
///
/// Order is preserved: the working directory first, then include directories,
/// then extension files. Duplicates (after symlink resolution) are dropped.
///
/// The user's home directory is never treated as an implicit root: when the
/// working directory resolves to it, the primary root is omitted entirely so
/// a stray invocation from `~` cannot scan the whole home tree. Include
/// directories are exempt from this rule; naming a directory explicitly is
/// what opts it in.
///
/// # Errors
///
/// Returns [`Error::RootResolution`] if `working_dir` cannot be canonicalized.
pub fn resolve_search_roots(
    working_dir: &Path,
    include_dirs: &[PathBuf],
    extension_paths: &[PathBuf],
) -> Result<Vec<SearchRoot>> {
    let home = directories::BaseDirs::new()
        .and_then(|dirs| dirs.home_dir().canonicalize().ok());
    resolve_with_home(working_dir, include_dirs, extension_paths, home.as_deref())
}

/// Root resolution with an explicit home directory, for testability.
pub(crate) fn resolve_with_home(
    working_dir: &Path,
    include_dirs: &[PathBuf],
    extension_paths: &[PathBuf],
    home: Option<&Path>,
) -> Result<Vec<SearchRoot>> {
    let primary = working_dir
        .canonicalize()
        .map_err(|e| Error::RootResolution {
            path: working_dir.display().to_string(),
            cause: e.to_string(),
        })?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut roots = Vec::new();

    if home.is_some_and(|home| home == primary) {
        tracing::debug!(
            path = %primary.display(),
            "working directory is the home directory; skipping implicit scan"
        );
    } else if seen.insert(primary.clone()) {
        roots.push(SearchRoot::Directory(primary));
    }

    for dir in include_dirs {
        match dir.canonicalize() {
            Ok(resolved) if resolved.is_dir() => {
                if seen.insert(resolved.clone()) {
                    roots.push(SearchRoot::Directory(resolved));
                }
            }
            Ok(resolved) => {
                tracing::debug!(path = %resolved.display(), "include path is not a directory; dropped");
            }
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "include directory dropped");
            }
        }
    }

    for file in extension_paths {
        match file.canonicalize() {
            Ok(resolved) if resolved.is_file() => {
                if seen.insert(resolved.clone()) {
                    roots.push(SearchRoot::File(resolved));
                }
            }
            Ok(resolved) => {
                tracing::debug!(path = %resolved.display(), "extension context path is not a file; dropped");
            }
            Err(e) => {
                tracing::debug!(path = %file.display(), error = %e, "extension context path dropped");
            }
        }
    }

    Ok(roots)
}
