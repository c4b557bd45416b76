//! Memory command logic: show, add, refresh, list.
//!
//! Each function is pure command logic over a small context value; side
//! effects beyond discovery reads (persisting merged content into session
//! state, running the save-memory tool) belong to the caller.

use std::path::PathBuf;

use crate::config::{FileFilteringOptions, ImportFormat};
use crate::discovery::{DiscoveryOptions, MergedMemory, load_hierarchical_memory};

use super::results::{CommandAction, CommandResult};

/// Context for `memory show`.
#[derive(Debug, Clone)]
pub struct ShowMemoryContext {
    /// The currently loaded memory content (caller-owned session state).
    pub user_memory: String,
    /// Number of context files that produced it.
    pub file_count: usize,
}

/// Formats the current memory contents for display.
#[must_use]
pub fn show_memory(context: &ShowMemoryContext) -> CommandResult {
    if context.user_memory.is_empty() {
        return CommandResult::info("Memory is currently empty.");
    }
    CommandResult::info(format!(
        "Current memory content from {} file(s):\n\n---\n{}\n---",
        context.file_count, context.user_memory
    ))
}

/// Validates `memory add` input and returns a save action for the caller.
#[must_use]
pub fn add_memory(args: &str) -> CommandResult {
    let fact = args.trim();
    if fact.is_empty() {
        return CommandResult::error("Usage: memory add <text to remember>");
    }
    CommandResult::info(format!("Attempting to save to memory: \"{fact}\""))
        .with_action(CommandAction::SaveMemory {
            fact: fact.to_string(),
        })
}

/// Context for `memory refresh`.
#[derive(Debug, Clone)]
pub struct RefreshMemoryContext {
    /// Primary working directory.
    pub working_dir: PathBuf,
    /// Additional workspace directories.
    pub include_dirs: Vec<PathBuf>,
    /// Extension-contributed context files.
    pub extension_context_paths: Vec<PathBuf>,
    /// Context filenames to discover.
    pub context_filenames: Vec<String>,
    /// Whether the workspace is trusted. Discovery itself is never gated on
    /// trust; callers use this to decide whether result content may be
    /// submitted onward.
    pub is_trusted: bool,
    /// Import representation for the merged document.
    pub import_format: ImportFormat,
    /// Ignore rules.
    pub file_filtering: FileFilteringOptions,
    /// Directory-visit budget.
    pub discovery_max_dirs: Option<usize>,
}

/// Re-runs hierarchical discovery and returns the fresh merged memory.
///
/// The engine holds no state between calls; the caller owns the returned
/// [`MergedMemory`] and decides whether to store it. A fatal root-resolution
/// failure is reported as a single error message with no partial data.
#[must_use]
pub fn refresh_memory(context: &RefreshMemoryContext) -> CommandResult<MergedMemory> {
    if !context.is_trusted {
        tracing::debug!("workspace is untrusted; memory is loaded but prompt submission should be gated by the caller");
    }

    let options = DiscoveryOptions {
        working_dir: context.working_dir.clone(),
        include_dirs: context.include_dirs.clone(),
        extension_context_paths: context.extension_context_paths.clone(),
        context_filenames: context.context_filenames.clone(),
        file_filtering: context.file_filtering.clone(),
        import_format: context.import_format,
        max_dirs: context.discovery_max_dirs,
    };

    match load_hierarchical_memory(&options) {
        Ok(memory) => {
            let message = if memory.content.is_empty() {
                "Memory refreshed successfully. No memory content found.".to_string()
            } else {
                format!(
                    "Memory refreshed successfully. Loaded {} characters from {} file(s).",
                    memory.content.len(),
                    memory.file_count
                )
            };
            CommandResult::info(message).with_data(memory)
        }
        Err(e) => CommandResult::error(format!("Error refreshing memory: {e}")),
    }
}

/// Lists the context-file paths contributing to the current memory.
#[must_use]
pub fn list_memory_files(file_paths: &[PathBuf]) -> CommandResult {
    if file_paths.is_empty() {
        return CommandResult::info("No context files in use.");
    }
    let listing: Vec<String> = file_paths.iter().map(|p| p.display().to_string()).collect();
    CommandResult::info(format!(
        "There are {} context file(s) in use:\n\n{}",
        file_paths.len(),
        listing.join("\n")
    ))
}
