//! # Memfold
//!
//! Hierarchical instructional memory discovery for AI coding assistants.
//!
//! Memfold walks a workspace for context files (`AGENTS.md` by default),
//! resolves inline `@import(...)` directives, and merges everything it finds
//! into one ordered instructional-memory document that an assistant can load
//! into its working context.
//!
//! ## Features
//!
//! - Hierarchical discovery across the working directory, extra include
//!   directories, and extension-contributed context files
//! - Deterministic merge order (parent context before children, lexical
//!   siblings) so unchanged trees always produce byte-identical output
//! - Ignore filtering (`.gitignore`, `.memfoldignore`, explicit globs)
//! - Bounded directory-visit budget with partial-result semantics
//! - Flat or tree-annotated import resolution with cycle protection
//!
//! ## Example
//!
//! ```rust,ignore
//! use memfold::discovery::{DiscoveryOptions, load_hierarchical_memory};
//!
//! let memory = load_hierarchical_memory(&DiscoveryOptions::for_dir("/path/to/project"))?;
//! println!("{} file(s), {} bytes", memory.file_count, memory.content.len());
//! ```

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod filter;
pub mod observability;

// Re-exports for convenience
pub use config::{FileFilteringOptions, ImportFormat, MemfoldConfig};
pub use discovery::{DiscoveryOptions, MergedMemory, load_hierarchical_memory};
pub use filter::FileFilter;

/// Error type for memfold operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty memory text, malformed import format strings |
/// | `RootResolution` | The primary working directory cannot be canonicalized |
/// | `OperationFailed` | Config file parse errors, context-file bootstrap I/O failures |
///
/// Everything else the engine encounters (unreadable files, missing include
/// directories, exhausted budgets, unresolvable imports) is a partial-result
/// condition: logged through `tracing` and excluded from the output, never
/// surfaced as an `Error`.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - `memory add` is called with empty text
    /// - An import format string is neither `flat` nor `tree`
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The primary working directory could not be resolved.
    ///
    /// This is the single operation-fatal condition of the discovery engine:
    /// without a canonical starting point there is nothing to scan, so no
    /// partial data is returned.
    #[error("cannot resolve working directory '{path}': {cause}")]
    RootResolution {
        /// The directory that failed to resolve.
        path: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - The configuration file exists but cannot be read or parsed
    /// - Bootstrapping a context file (`memfold init`) fails to write
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for memfold operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::RootResolution {
            path: "/missing".to_string(),
            cause: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("/missing"));
        assert!(err.to_string().contains("No such file or directory"));

        let err = Error::OperationFailed {
            operation: "config".to_string(),
            cause: "bad toml".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'config' failed: bad toml");
    }
}
