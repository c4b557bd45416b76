//! Inline `@import(...)` directive resolution.
//!
//! Context files may pull other files in with a single-line directive:
//!
//! ```markdown
//! @import(style/rust.md)
//! ```
//!
//! The referenced path is resolved relative to the importing file's
//! directory and substituted in place, recursively. Resolution is bounded by
//! [`MAX_IMPORT_DEPTH`] and a per-chain seen-set of canonical paths, so a
//! file importing itself (directly or through a cycle) terminates with the
//! cyclic import skipped. Unresolvable targets are a partial-result
//! condition: the directive is dropped in flat format and replaced by a
//! marker comment in tree format.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::config::ImportFormat;

/// Maximum depth of nested import resolution.
///
/// Chains longer than this are truncated with a diagnostic. Ten levels is a
/// conservative bound; real context trees rarely nest past two or three.
pub const MAX_IMPORT_DEPTH: usize = 10;

/// Matches a whole line of the form `@import(<relative-path>)`.
static IMPORT_DIRECTIVE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\s*@import\(\s*([^)]+?)\s*\)\s*$").ok());

/// Resolves all import directives in `content`, read from `source_path`.
///
/// Returns the content with every directive line replaced by the referenced
/// file's (recursively resolved) content, formatted per `format`.
pub(crate) fn resolve_imports(content: &str, source_path: &Path, format: ImportFormat) -> String {
    let mut chain: HashSet<std::path::PathBuf> = HashSet::new();
    if let Ok(canonical) = source_path.canonicalize() {
        chain.insert(canonical);
    }
    resolve_at_depth(content, source_path, format, 1, &mut chain)
}

fn resolve_at_depth(
    content: &str,
    source_path: &Path,
    format: ImportFormat,
    depth: usize,
    chain: &mut HashSet<std::path::PathBuf>,
) -> String {
    let base_dir = source_path.parent().unwrap_or_else(|| Path::new("."));
    let mut resolved_lines: Vec<String> = Vec::new();

    for line in content.lines() {
        let Some(reference) = parse_directive(line) else {
            resolved_lines.push(line.to_string());
            continue;
        };

        if depth >= MAX_IMPORT_DEPTH {
            tracing::warn!(
                source = %source_path.display(),
                reference,
                "import depth limit ({MAX_IMPORT_DEPTH}) reached; directive skipped"
            );
            push_marker(&mut resolved_lines, format, &format!("Import skipped (depth limit): {reference}"));
            continue;
        }

        let target = base_dir.join(reference);
        let canonical = match target.canonicalize() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    source = %source_path.display(),
                    reference,
                    error = %e,
                    "unresolvable import target; directive skipped"
                );
                push_marker(&mut resolved_lines, format, &format!("Import failed: {reference}"));
                continue;
            }
        };

        if chain.contains(&canonical) {
            tracing::warn!(
                source = %source_path.display(),
                reference,
                "cyclic import detected; directive skipped"
            );
            push_marker(&mut resolved_lines, format, &format!("Skipped cyclic import: {reference}"));
            continue;
        }

        let imported = match std::fs::read_to_string(&canonical) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %canonical.display(), error = %e, "import target unreadable; directive skipped");
                push_marker(&mut resolved_lines, format, &format!("Import failed: {reference}"));
                continue;
            }
        };

        chain.insert(canonical.clone());
        let body = resolve_at_depth(&imported, &canonical, format, depth + 1, chain);
        chain.remove(&canonical);

        match format {
            ImportFormat::Flat => resolved_lines.push(body),
            ImportFormat::Tree => {
                resolved_lines.push(format!("<!-- Imported from: {reference} (depth {depth}) -->"));
                resolved_lines.push(body);
                resolved_lines.push(format!("<!-- End import: {reference} -->"));
            }
        }
    }

    resolved_lines.join("\n")
}

/// Returns the referenced relative path if `line` is an import directive.
fn parse_directive(line: &str) -> Option<&str> {
    IMPORT_DIRECTIVE
        .as_ref()?
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Records a skipped directive: marker comment in tree format, dropped in flat.
fn push_marker(lines: &mut Vec<String>, format: ImportFormat, message: &str) {
    if format == ImportFormat::Tree {
        lines.push(format!("<!-- {message} -->"));
    }
}
