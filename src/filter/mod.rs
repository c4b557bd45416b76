//! Ignore filtering for the tree walker.
//!
//! A [`FileFilter`] answers "is this path ignored?" for one search root. It
//! compiles gitignore-style patterns from three sources into a single glob
//! set: the root's `.gitignore`, the root's `.memfoldignore`, and any
//! explicit exclude globs from [`FileFilteringOptions`]. The same rules are
//! applied at every directory level, relative to the root.
//!
//! Pattern semantics are the common gitignore subset: `#` comments, `!`
//! negation (allowlist), trailing `/` for directory-only patterns, leading
//! `/` to anchor at the root, and bare names matching at any depth. Full
//! gitignore precedence (per-directory nested ignore files) is not modeled.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

use crate::config::{FileFilteringOptions, MEMFOLD_IGNORE_FILE};

/// Compiled ignore rules for one search root.
#[derive(Debug)]
pub struct FileFilter {
    root: PathBuf,
    ignored: GlobSet,
    allowed: GlobSet,
}

impl FileFilter {
    /// Builds a filter for `root` from the given options.
    ///
    /// Missing ignore files and unparseable patterns are skipped with a
    /// diagnostic; filtering is always best-effort, never fatal.
    #[must_use]
    pub fn for_root(root: &Path, options: &FileFilteringOptions) -> Self {
        let mut patterns: Vec<String> = options.exclude.clone();

        if options.respect_gitignore {
            patterns.extend(read_pattern_file(&root.join(".gitignore")));
        }
        if options.respect_memfold_ignore {
            patterns.extend(read_pattern_file(&root.join(MEMFOLD_IGNORE_FILE)));
        }

        let (ignored, allowed) = compile_patterns(&patterns);
        Self {
            root: root.to_path_buf(),
            ignored,
            allowed,
        }
    }

    /// A filter that ignores nothing (used for explicit file roots).
    #[must_use]
    pub fn allow_all(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ignored: GlobSet::empty(),
            allowed: GlobSet::empty(),
        }
    }

    /// Returns `true` if `path` is excluded by the ignore rules.
    ///
    /// `path` may be absolute (within the root) or already root-relative.
    /// Negated (`!`) patterns win over ignore patterns.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            return false;
        }
        if self.allowed.is_match(relative) {
            return false;
        }
        self.ignored.is_match(relative)
    }
}

/// Reads a gitignore-style pattern file, returning no patterns if unreadable.
fn read_pattern_file(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable ignore file");
            Vec::new()
        }
    }
}

/// Compiles gitignore-style patterns into (ignored, allowed) glob sets.
fn compile_patterns(patterns: &[String]) -> (GlobSet, GlobSet) {
    let mut ignored = GlobSetBuilder::new();
    let mut allowed = GlobSetBuilder::new();

    for raw in patterns {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (negated, pattern) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let builder = if negated { &mut allowed } else { &mut ignored };
        for glob_pattern in expand_pattern(pattern) {
            match Glob::new(&glob_pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!(pattern = %glob_pattern, error = %e, "skipping invalid ignore pattern");
                }
            }
        }
    }

    (
        ignored.build().unwrap_or_else(|_| GlobSet::empty()),
        allowed.build().unwrap_or_else(|_| GlobSet::empty()),
    )
}

/// Expands one gitignore-style pattern into the glob strings that model it.
fn expand_pattern(pattern: &str) -> Vec<String> {
    // Trailing slash means directory-only; we also prune everything below.
    let trimmed = pattern.strip_suffix('/').unwrap_or(pattern);

    // Leading slash anchors the pattern at the root.
    let anchored = trimmed.starts_with('/');
    let body = trimmed.trim_start_matches('/');
    if body.is_empty() {
        return Vec::new();
    }

    // Unanchored patterns without a separator match at any depth.
    let base = if anchored || body.contains('/') {
        body.to_string()
    } else {
        format!("**/{body}")
    };

    vec![base.clone(), format!("{base}/**")]
}
