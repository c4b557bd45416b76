//! Context-file bootstrap command.

use std::path::PathBuf;

use crate::{Error, Result};

use super::results::{CommandAction, CommandResult};

/// Prompt submitted after bootstrapping an empty context file. It asks the
/// assistant to analyze the project and write the instructional content.
const INIT_PROMPT: &str = "\
You are an AI coding assistant. Analyze the current directory and generate a \
comprehensive context file to be used as instructional memory for future \
interactions.

Start from the directory listing and the README if one exists, then read up \
to 10 of the most informative files (build manifests, main sources, docs). \
Decide whether this is a code project or a document collection.

For a code project, cover: project overview and architecture, how to build, \
run, and test it, and the development conventions you can infer. For a \
non-code directory, cover: its purpose, the key files, and how its contents \
are meant to be used.

Write the complete result into the context file as well-formatted Markdown.";

/// Context for the init command.
#[derive(Debug, Clone)]
pub struct InitContext {
    /// Directory in which to bootstrap the context file.
    pub target_dir: PathBuf,
    /// Filename to create (the first configured context filename).
    pub context_filename: String,
}

/// Bootstraps an empty context file and asks the caller to populate it.
///
/// If the file already exists nothing is written. Otherwise an empty file is
/// created and the result carries a [`CommandAction::SubmitPrompt`] with the
/// analysis prompt; callers suppress that action for untrusted workspaces.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the empty file cannot be written.
pub fn init_context_file(context: &InitContext) -> Result<CommandResult> {
    let path = context.target_dir.join(&context.context_filename);

    if path.exists() {
        return Ok(CommandResult::info(format!(
            "A {} file already exists in this directory. No changes were made.",
            context.context_filename
        )));
    }

    std::fs::write(&path, "").map_err(|e| Error::OperationFailed {
        operation: "context file bootstrap".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    tracing::info!(path = %path.display(), "created empty context file");
    Ok(CommandResult::info(format!(
        "Empty {} created. Now analyzing the project to populate it.",
        context.context_filename
    ))
    .with_action(CommandAction::SubmitPrompt {
        prompt: INIT_PROMPT.to_string(),
    }))
}
