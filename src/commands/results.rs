//! Command result values.
//!
//! Command logic never prints or renders. Each command returns a
//! [`CommandResult`]: the messages generated during the run, an optional
//! conclusive action for the caller to take, and an optional data payload.
//! The CLI (or any other front end) decides how to surface them.

use serde::Serialize;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Error message.
    Error,
}

/// A message to be displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMessage {
    /// Message severity.
    pub severity: Severity,
    /// Human-readable text.
    pub message: String,
}

impl DisplayMessage {
    /// An informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// A conclusive action the caller should take after the command logic runs.
///
/// Callers are free to ignore actions; in particular, prompt submission is
/// expected to be suppressed for untrusted workspaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CommandAction {
    /// Submit a prompt to the language model.
    SubmitPrompt {
        /// The prompt text.
        prompt: String,
    },
    /// Persist a fact into long-term memory.
    SaveMemory {
        /// The fact to remember.
        fact: String,
    },
}

/// The final result of a command's execution.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult<T = ()> {
    /// Messages generated during the run.
    pub messages: Vec<DisplayMessage>,
    /// Optional conclusive action.
    pub action: Option<CommandAction>,
    /// Optional data payload.
    pub data: Option<T>,
}

impl<T> CommandResult<T> {
    /// A result carrying a single informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            messages: vec![DisplayMessage::info(message)],
            action: None,
            data: None,
        }
    }

    /// A result carrying a single error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            messages: vec![DisplayMessage::error(message)],
            action: None,
            data: None,
        }
    }

    /// Attaches an action.
    #[must_use]
    pub fn with_action(mut self, action: CommandAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Attaches a data payload.
    #[must_use]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}
