//! Hierarchical memory discovery engine.
//!
//! Three cooperating stages, wired by [`load_hierarchical_memory`]:
//!
//! 1. `roots` — normalizes the working directory, include directories, and
//!    extension-contributed file paths into a canonical, deduplicated,
//!    ordered list of search roots.
//! 2. `walker` — scans each root depth-first under a directory-visit
//!    budget and ignore filtering, collecting context files in a stable
//!    order (parent before children, lexical siblings).
//! 3. `merger` — reads each file, resolves `@import(...)` directives
//!    (`imports`), and concatenates everything into one document.
//!
//! Data flows one-directional: roots → walker → file list → merger →
//! [`MergedMemory`]. The engine is read-only and holds no state between
//! calls; diagnostics go through `tracing` and every per-file problem is a
//! partial-result condition rather than an error.

mod imports;
mod merger;
mod roots;
mod walker;

pub use imports::MAX_IMPORT_DEPTH;
pub use merger::MergedMemory;
pub use roots::SearchRoot;
pub use walker::DiscoveryBudget;

pub use roots::resolve_search_roots;

use std::path::PathBuf;

use crate::Result;
use crate::config::{FileFilteringOptions, ImportFormat, MemfoldConfig};

/// Inputs for one discovery call.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Primary working directory.
    pub working_dir: PathBuf,
    /// Additional workspace directories, scanned after the working directory.
    pub include_dirs: Vec<PathBuf>,
    /// Extension-contributed context files (absolute paths).
    pub extension_context_paths: Vec<PathBuf>,
    /// Context filenames to discover, in per-directory load order.
    pub context_filenames: Vec<String>,
    /// Ignore rules applied at every directory level.
    pub file_filtering: FileFilteringOptions,
    /// How imported content is represented in the merged document.
    pub import_format: ImportFormat,
    /// Directory-visit budget. `None` is unbounded.
    pub max_dirs: Option<usize>,
}

impl DiscoveryOptions {
    /// Default options for a working directory.
    #[must_use]
    pub fn for_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(working_dir, &MemfoldConfig::default())
    }

    /// Options derived from a loaded configuration.
    #[must_use]
    pub fn from_config(working_dir: impl Into<PathBuf>, config: &MemfoldConfig) -> Self {
        Self {
            working_dir: working_dir.into(),
            include_dirs: config.include_dirs.clone(),
            extension_context_paths: config.extension_context_paths.clone(),
            context_filenames: config.context_filenames.clone(),
            file_filtering: config.file_filtering.clone(),
            import_format: config.import_format,
            max_dirs: config.discovery_max_dirs,
        }
    }
}

/// Runs one complete discovery: root resolution, walk, and merge.
///
/// Returns the merged memory document. An empty workspace yields
/// [`MergedMemory::empty`], not an error; the only fatal condition is an
/// unresolvable working directory.
///
/// # Errors
///
/// Returns [`crate::Error::RootResolution`] if `options.working_dir` cannot
/// be canonicalized.
pub fn load_hierarchical_memory(options: &DiscoveryOptions) -> Result<MergedMemory> {
    tracing::debug!(
        working_dir = %options.working_dir.display(),
        import_format = options.import_format.as_str(),
        max_dirs = ?options.max_dirs,
        "loading hierarchical memory"
    );

    let roots = roots::resolve_search_roots(
        &options.working_dir,
        &options.include_dirs,
        &options.extension_context_paths,
    )?;
    load_from_roots(&roots, options)
}

/// Discovery over pre-resolved roots (exposed for callers that resolve roots
/// themselves, and for tests that need to bypass home detection).
pub fn load_from_roots(roots: &[SearchRoot], options: &DiscoveryOptions) -> Result<MergedMemory> {
    let mut budget = DiscoveryBudget::new(options.max_dirs);
    let files = walker::discover_context_files(
        roots,
        &options.context_filenames,
        &options.file_filtering,
        &mut budget,
    );

    let memory = merger::merge_context_files(&files, options.import_format);
    tracing::debug!(
        files = memory.file_count,
        bytes = memory.content.len(),
        "memory discovery complete"
    );
    Ok(memory)
}
