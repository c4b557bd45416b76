//! Budgeted depth-first context-file discovery.
//!
//! The walker visits each directory root in resolver order and collects
//! context-file paths without reading their bodies. Ordering is the engine's
//! determinism guarantee and is fixed here: within a directory, context files
//! are reported (in configured filename order) before any subdirectory is
//! entered, and subdirectories are visited in lexical name order. A file's
//! position in the returned list is its merge position.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::FileFilteringOptions;
use crate::filter::FileFilter;

use super::roots::SearchRoot;

/// Cap on the number of directories one discovery call may visit.
///
/// Every directory entered consumes one unit, the root included, so a budget
/// of zero discovers nothing. Ignored directories are pruned before they are
/// entered and consume nothing. Exhaustion is a partial-result condition: the
/// walk stops descending and whatever was found so far is kept.
#[derive(Debug)]
pub struct DiscoveryBudget {
    remaining: Option<usize>,
}

impl DiscoveryBudget {
    /// Creates a budget; `None` is unbounded.
    #[must_use]
    pub const fn new(max_dirs: Option<usize>) -> Self {
        Self {
            remaining: max_dirs,
        }
    }

    /// Consumes one directory visit. Returns `false` once exhausted.
    fn consume(&mut self) -> bool {
        match &mut self.remaining {
            None => true,
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }

    /// Returns `true` if no further directory may be visited.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }
}

/// Collects context-file paths from the resolved roots, in merge order.
///
/// Results from earlier roots precede results from later roots; files are
/// deduplicated by canonical path across roots. Explicit file roots bypass
/// filtering (naming the file is what opts it in) but still dedup.
pub(crate) fn discover_context_files(
    roots: &[SearchRoot],
    context_filenames: &[String],
    filtering: &FileFilteringOptions,
    budget: &mut DiscoveryBudget,
) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut found = Vec::new();

    for root in roots {
        match root {
            SearchRoot::Directory(dir) => {
                let filter = FileFilter::for_root(dir, filtering);
                walk_directory(dir, &filter, context_filenames, budget, &mut seen, &mut found);
            }
            SearchRoot::File(path) => {
                if seen.insert(path.clone()) {
                    found.push(path.clone());
                }
            }
        }
    }

    if budget.is_exhausted() {
        tracing::debug!(
            files = found.len(),
            "directory-visit budget exhausted; returning partial discovery"
        );
    }

    found
}

/// Depth-first scan of one directory: context files first, then lexical
/// subdirectories. Unreadable directories are skipped, not fatal.
fn walk_directory(
    dir: &Path,
    filter: &FileFilter,
    context_filenames: &[String],
    budget: &mut DiscoveryBudget,
    seen: &mut HashSet<PathBuf>,
    found: &mut Vec<PathBuf>,
) {
    if !budget.consume() {
        return;
    }

    for name in context_filenames {
        let candidate = dir.join(name);
        if !candidate.is_file() || filter.is_ignored(&candidate) {
            continue;
        }
        match candidate.canonicalize() {
            Ok(resolved) => {
                if seen.insert(resolved) {
                    found.push(candidate);
                }
            }
            Err(e) => {
                tracing::warn!(path = %candidate.display(), error = %e, "context file dropped");
            }
        }
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        // file_type() does not traverse symlinks, so symlinked dirs are not descended.
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| entry.path())
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        if filter.is_ignored(&subdir) {
            tracing::trace!(path = %subdir.display(), "directory pruned by ignore rules");
            continue;
        }
        if budget.is_exhausted() {
            return;
        }
        walk_directory(&subdir, filter, context_filenames, budget, seen, found);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FILENAMES: &[&str] = &["AGENTS.md"];

    fn filenames() -> Vec<String> {
        FILENAMES.iter().map(|s| (*s).to_string()).collect()
    }

    fn dir_root(path: &Path) -> Vec<SearchRoot> {
        vec![SearchRoot::Directory(path.canonicalize().unwrap())]
    }

    #[test]
    fn parent_context_file_precedes_children() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("sub/inner")).unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "root").unwrap();
        fs::write(tmp.path().join("sub/AGENTS.md"), "sub").unwrap();
        fs::write(tmp.path().join("sub/inner/AGENTS.md"), "inner").unwrap();

        let mut budget = DiscoveryBudget::new(None);
        let found = discover_context_files(
            &dir_root(tmp.path()),
            &filenames(),
            &FileFilteringOptions::default(),
            &mut budget,
        );

        let names: Vec<String> = found
            .iter()
            .map(|p| {
                p.strip_prefix(tmp.path().canonicalize().unwrap())
                    .unwrap()
                    .display()
                    .to_string()
            })
            .collect();
        assert_eq!(names, vec!["AGENTS.md", "sub/AGENTS.md", "sub/inner/AGENTS.md"]);
    }

    #[test]
    fn siblings_are_visited_in_lexical_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
            fs::write(tmp.path().join(name).join("AGENTS.md"), name).unwrap();
        }

        let mut budget = DiscoveryBudget::new(None);
        let found = discover_context_files(
            &dir_root(tmp.path()),
            &filenames(),
            &FileFilteringOptions::default(),
            &mut budget,
        );

        let parents: Vec<String> = found
            .iter()
            .map(|p| {
                p.parent()
                    .and_then(|d| d.file_name())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(parents, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn zero_budget_discovers_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "root").unwrap();

        let mut budget = DiscoveryBudget::new(Some(0));
        let found = discover_context_files(
            &dir_root(tmp.path()),
            &filenames(),
            &FileFilteringOptions::default(),
            &mut budget,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn budget_bounds_descent_depth() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "0").unwrap();
        fs::write(tmp.path().join("a/AGENTS.md"), "1").unwrap();
        fs::write(tmp.path().join("a/b/AGENTS.md"), "2").unwrap();

        // Root + "a" fit in the budget; "a/b" does not.
        let mut budget = DiscoveryBudget::new(Some(2));
        let found = discover_context_files(
            &dir_root(tmp.path()),
            &filenames(),
            &FileFilteringOptions::default(),
            &mut budget,
        );
        assert_eq!(found.len(), 2);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn ignored_directories_are_pruned_and_cost_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("node_modules")).unwrap();
        fs::write(tmp.path().join("node_modules/AGENTS.md"), "dep").unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/AGENTS.md"), "src").unwrap();

        let filtering = FileFilteringOptions {
            exclude: vec!["node_modules/".to_string()],
            ..FileFilteringOptions::default()
        };

        // Budget of 2: root + src. The pruned node_modules must not consume it.
        let mut budget = DiscoveryBudget::new(Some(2));
        let found = discover_context_files(&dir_root(tmp.path()), &filenames(), &filtering, &mut budget);
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("src/AGENTS.md"));
    }

    #[test]
    fn later_roots_follow_earlier_roots() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        for dir in [&first, &second] {
            fs::create_dir(dir).unwrap();
            fs::write(dir.join("AGENTS.md"), "x").unwrap();
        }

        let roots = vec![
            SearchRoot::Directory(second.canonicalize().unwrap()),
            SearchRoot::Directory(first.canonicalize().unwrap()),
        ];
        let mut budget = DiscoveryBudget::new(None);
        let found = discover_context_files(
            &roots,
            &filenames(),
            &FileFilteringOptions::default(),
            &mut budget,
        );
        assert!(found[0].starts_with(second.canonicalize().unwrap()));
        assert!(found[1].starts_with(first.canonicalize().unwrap()));
    }

    #[test]
    fn same_file_reached_from_two_roots_is_merged_once() {
        let tmp = TempDir::new().unwrap();
        let proj = tmp.path().join("proj");
        fs::create_dir_all(proj.join("sub")).unwrap();
        fs::write(proj.join("sub/AGENTS.md"), "sub").unwrap();

        let roots = vec![
            SearchRoot::Directory(proj.canonicalize().unwrap()),
            SearchRoot::Directory(proj.join("sub").canonicalize().unwrap()),
        ];
        let mut budget = DiscoveryBudget::new(None);
        let found = discover_context_files(
            &roots,
            &filenames(),
            &FileFilteringOptions::default(),
            &mut budget,
        );
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn multiple_context_filenames_load_in_configured_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "a").unwrap();
        fs::write(tmp.path().join("CONTEXT.md"), "c").unwrap();

        let names = vec!["AGENTS.md".to_string(), "CONTEXT.md".to_string()];
        let mut budget = DiscoveryBudget::new(None);
        let found = discover_context_files(
            &dir_root(tmp.path()),
            &names,
            &FileFilteringOptions::default(),
            &mut budget,
        );
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("AGENTS.md"));
        assert!(found[1].ends_with("CONTEXT.md"));
    }
}
