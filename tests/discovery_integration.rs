//! End-to-end discovery and merge tests over real temp directory trees.
#![allow(clippy::unwrap_used, clippy::panic, clippy::uninlined_format_args)]

use std::fs;
use std::path::Path;

use memfold::config::{FileFilteringOptions, ImportFormat};
use memfold::discovery::{DiscoveryOptions, load_hierarchical_memory};
use tempfile::TempDir;

fn options(dir: &Path, format: ImportFormat) -> DiscoveryOptions {
    DiscoveryOptions {
        working_dir: dir.to_path_buf(),
        include_dirs: Vec::new(),
        extension_context_paths: Vec::new(),
        context_filenames: vec!["AGENTS.md".to_string()],
        file_filtering: FileFilteringOptions::default(),
        import_format: format,
        max_dirs: None,
    }
}

/// The walkthrough scenario: a root context file and one in a subdirectory.
fn proj_with_sub() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    fs::write(tmp.path().join("AGENTS.md"), "Root").unwrap();
    fs::write(tmp.path().join("sub/AGENTS.md"), "Sub").unwrap();
    tmp
}

#[test]
fn flat_merge_orders_parent_before_child() {
    let tmp = proj_with_sub();
    let memory = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Flat)).unwrap();

    assert_eq!(memory.file_count, 2);
    assert_eq!(memory.file_count, memory.file_paths.len());
    assert!(memory.file_paths[0].ends_with("AGENTS.md"));
    assert!(memory.file_paths[1].ends_with("sub/AGENTS.md"));
    let root_pos = memory.content.find("Root").unwrap();
    let sub_pos = memory.content.find("Sub").unwrap();
    assert!(root_pos < sub_pos, "parent content must precede child content");
}

#[test]
fn empty_tree_yields_empty_memory() {
    let tmp = TempDir::new().unwrap();
    let memory = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Tree)).unwrap();
    assert_eq!(memory.content, "");
    assert_eq!(memory.file_count, 0);
    assert!(memory.file_paths.is_empty());
}

#[test]
fn reruns_are_byte_identical() {
    let tmp = proj_with_sub();
    fs::create_dir(tmp.path().join("zz")).unwrap();
    fs::write(tmp.path().join("zz/AGENTS.md"), "Last").unwrap();

    let opts = options(tmp.path(), ImportFormat::Tree);
    let first = load_hierarchical_memory(&opts).unwrap();
    let second = load_hierarchical_memory(&opts).unwrap();
    assert_eq!(first.content, second.content);
    assert_eq!(first.file_paths, second.file_paths);
}

#[test]
fn flat_and_tree_differ_only_in_content() {
    let tmp = proj_with_sub();
    let flat = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Flat)).unwrap();
    let tree = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Tree)).unwrap();

    assert_ne!(flat.content, tree.content);
    assert_eq!(flat.file_count, tree.file_count);
    assert_eq!(flat.file_paths, tree.file_paths);
    assert!(tree.content.contains("--- Context from:"));
    assert!(!flat.content.contains("--- Context from:"));
}

#[test]
fn zero_budget_discovers_nothing() {
    let tmp = proj_with_sub();
    let mut opts = options(tmp.path(), ImportFormat::Flat);
    opts.max_dirs = Some(0);
    let memory = load_hierarchical_memory(&opts).unwrap();
    assert_eq!(memory.file_count, 0);
    assert_eq!(memory.content, "");
}

#[test]
fn budget_of_exact_depth_discovers_reachable_files_only() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
    for (dir, text) in [("", "d0"), ("a", "d1"), ("a/b", "d2"), ("a/b/c", "d3")] {
        fs::write(tmp.path().join(dir).join("AGENTS.md"), text).unwrap();
    }

    // Three visits: root, a, a/b. The file at depth 3 is out of budget.
    let mut opts = options(tmp.path(), ImportFormat::Flat);
    opts.max_dirs = Some(3);
    let memory = load_hierarchical_memory(&opts).unwrap();
    assert_eq!(memory.file_count, 3);
    assert!(memory.content.contains("d2"));
    assert!(!memory.content.contains("d3"));
}

#[test]
fn include_dirs_merge_after_the_working_dir() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    let shared = tmp.path().join("shared");
    fs::create_dir(&proj).unwrap();
    fs::create_dir(&shared).unwrap();
    fs::write(proj.join("AGENTS.md"), "project rules").unwrap();
    fs::write(shared.join("AGENTS.md"), "shared rules").unwrap();

    let mut opts = options(&proj, ImportFormat::Flat);
    opts.include_dirs = vec![shared];
    let memory = load_hierarchical_memory(&opts).unwrap();

    assert_eq!(memory.file_count, 2);
    let proj_pos = memory.content.find("project rules").unwrap();
    let shared_pos = memory.content.find("shared rules").unwrap();
    assert!(proj_pos < shared_pos);
}

#[test]
fn extension_files_come_last_and_bypass_filtering() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("AGENTS.md"), "workspace").unwrap();
    let ext = tmp.path().join("extension-context.md");
    fs::write(&ext, "extension says hi").unwrap();

    let mut opts = options(tmp.path(), ImportFormat::Flat);
    opts.extension_context_paths = vec![ext.clone()];
    let memory = load_hierarchical_memory(&opts).unwrap();

    assert_eq!(memory.file_count, 2);
    assert_eq!(memory.file_paths[1], ext.canonicalize().unwrap());
}

#[test]
fn missing_include_dir_is_dropped_not_fatal() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("AGENTS.md"), "still here").unwrap();

    let mut opts = options(tmp.path(), ImportFormat::Flat);
    opts.include_dirs = vec![tmp.path().join("never-created")];
    let memory = load_hierarchical_memory(&opts).unwrap();
    assert_eq!(memory.file_count, 1);
}

#[test]
fn missing_working_dir_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let opts = options(&tmp.path().join("gone"), ImportFormat::Flat);
    let err = load_hierarchical_memory(&opts).unwrap_err();
    assert!(err.to_string().contains("cannot resolve working directory"));
}

#[test]
fn gitignored_subtree_is_not_merged() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".gitignore"), "vendor/\n").unwrap();
    fs::create_dir(tmp.path().join("vendor")).unwrap();
    fs::write(tmp.path().join("vendor/AGENTS.md"), "vendored").unwrap();
    fs::write(tmp.path().join("AGENTS.md"), "ours").unwrap();

    let memory = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Flat)).unwrap();
    assert_eq!(memory.file_count, 1);
    assert!(!memory.content.contains("vendored"));
}

#[test]
fn cyclic_imports_terminate_with_each_file_once() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    fs::write(tmp.path().join("AGENTS.md"), "top\n@import(sub/AGENTS.md)").unwrap();
    fs::write(tmp.path().join("sub/AGENTS.md"), "nested\n@import(../AGENTS.md)").unwrap();

    let memory = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Flat)).unwrap();
    // Both files are discovered independently and each resolves its own chain.
    assert_eq!(memory.file_count, 2);
    assert!(memory.content.contains("top"));
    assert!(memory.content.contains("nested"));
}

#[test]
fn pre_resolved_roots_match_the_facade() {
    use memfold::discovery::{load_from_roots, resolve_search_roots};

    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    let shared = tmp.path().join("shared");
    fs::create_dir(&proj).unwrap();
    fs::create_dir(&shared).unwrap();
    fs::write(proj.join("AGENTS.md"), "project").unwrap();
    fs::write(shared.join("AGENTS.md"), "shared").unwrap();

    let mut opts = options(&proj, ImportFormat::Tree);
    opts.include_dirs = vec![shared.clone()];

    let roots = resolve_search_roots(&proj, &[shared], &[]).unwrap();
    let via_roots = load_from_roots(&roots, &opts).unwrap();
    let via_facade = load_hierarchical_memory(&opts).unwrap();
    assert_eq!(via_roots, via_facade);
}

#[test]
fn tree_format_annotates_contributing_paths() {
    let tmp = proj_with_sub();
    let memory = load_hierarchical_memory(&options(tmp.path(), ImportFormat::Tree)).unwrap();
    for path in &memory.file_paths {
        assert!(
            memory.content.contains(&format!("--- Context from: {} ---", path.display())),
            "missing marker for {}",
            path.display()
        );
    }
}
