//! Command handlers module.
//!
//! Command logic is decoupled from the CLI: each handler consumes a small
//! well-typed context value and returns a [`CommandResult`] of messages,
//! an optional action, and an optional data payload. The CLI (`crate::cli`)
//! renders messages and carries out actions; other front ends can reuse the
//! same handlers unchanged.
//!
//! - `memory.rs`: show / add / refresh / list over the discovery engine
//! - `init.rs`: context-file bootstrap
//! - `results.rs`: the shared result value types

mod init;
mod memory;
mod results;

pub use init::{InitContext, init_context_file};
pub use memory::{
    RefreshMemoryContext, ShowMemoryContext, add_memory, list_memory_files, refresh_memory,
    show_memory,
};
pub use results::{CommandAction, CommandResult, DisplayMessage, Severity};
