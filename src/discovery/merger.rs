//! Content merging.
//!
//! Reads each discovered context file once, resolves its import directives,
//! and concatenates everything into the final memory document. A file that
//! fails to read is excluded from both the content and the path list, so the
//! output invariant `file_count == file_paths.len()` always holds.

use std::path::PathBuf;

use crate::config::ImportFormat;

use super::imports::resolve_imports;

/// Separator between files in flat format.
const FLAT_SEPARATOR: &str = "\n\n";

/// One discovered context file, read once and discarded after the merge.
struct ContextFile {
    path: PathBuf,
    content: String,
}

/// The merged instructional-memory document.
///
/// This is the unit handed back to the caller; the engine keeps no state
/// between calls, so the caller decides whether to store, display, or
/// discard it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MergedMemory {
    /// Merged text, empty if nothing was found.
    pub content: String,
    /// Number of files actually merged.
    pub file_count: usize,
    /// Absolute paths of the contributing files, in merge order.
    pub file_paths: Vec<PathBuf>,
}

impl MergedMemory {
    /// An empty result (nothing discovered).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            content: String::new(),
            file_count: 0,
            file_paths: Vec::new(),
        }
    }
}

/// Merges the ordered context-file list into one document.
pub(crate) fn merge_context_files(paths: &[PathBuf], format: ImportFormat) -> MergedMemory {
    let files: Vec<ContextFile> = paths
        .iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(content) => Some(ContextFile {
                path: path.clone(),
                content,
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "context file unreadable; excluded from merge");
                None
            }
        })
        .collect();

    let sections: Vec<String> = files
        .iter()
        .map(|file| {
            let resolved = resolve_imports(&file.content, &file.path, format);
            match format {
                ImportFormat::Flat => resolved,
                ImportFormat::Tree => format!(
                    "--- Context from: {path} ---\n{resolved}\n--- End of context from: {path} ---",
                    path = file.path.display()
                ),
            }
        })
        .collect();

    MergedMemory {
        content: sections.join(FLAT_SEPARATOR),
        file_count: files.len(),
        file_paths: files.into_iter().map(|file| file.path).collect(),
    }
}
