//! CLI command dispatch.
//!
//! Thin glue over `crate::commands`: parses arguments, loads configuration,
//! renders [`DisplayMessage`]s, and carries out returned actions. The CLI is
//! the session owner — `show` and `list` run a fresh discovery because no
//! state persists between invocations.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    CommandAction, DisplayMessage, InitContext, RefreshMemoryContext, Severity, ShowMemoryContext,
    add_memory, init_context_file, list_memory_files, refresh_memory, show_memory,
};
use crate::config::{ImportFormat, MemfoldConfig};
use crate::observability;

/// Hierarchical instructional memory discovery for AI coding assistants.
#[derive(Parser)]
#[command(name = "memfold", version, about)]
pub struct Cli {
    /// Working directory (defaults to the current directory).
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Enable debug-level diagnostics on stderr.
    #[arg(short, long, global = true, env = "MEMFOLD_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Discovery flags shared by the commands that run the engine.
#[derive(Debug, clap::Args)]
struct DiscoveryArgs {
    /// Additional workspace directory to scan (repeatable).
    #[arg(long = "include-dir", value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// Extension-contributed context file (repeatable).
    #[arg(long = "extension-file", value_name = "FILE")]
    extension_files: Vec<PathBuf>,

    /// Context filename to discover (repeatable; overrides config).
    #[arg(long = "context-file", value_name = "NAME")]
    context_files: Vec<String>,

    /// Import representation: flat or tree.
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Maximum number of directories to visit.
    #[arg(long = "max-dirs", value_name = "N")]
    max_dirs: Option<usize>,

    /// Treat the workspace as untrusted (suppresses prompt actions).
    #[arg(long)]
    untrusted: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Re-run discovery and print a refresh summary.
    Refresh {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Print the merged result as JSON instead of messages.
        #[arg(long)]
        json: bool,
    },
    /// Discover and print the merged memory content.
    Show {
        #[command(flatten)]
        discovery: DiscoveryArgs,
    },
    /// List the context-file paths that would be merged.
    List {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Print the path list as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Record a fact into the workspace context file.
    Add {
        /// The text to remember.
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Bootstrap an empty context file and print the analysis prompt.
    Init {
        /// Treat the workspace as untrusted (suppresses prompt actions).
        #[arg(long)]
        untrusted: bool,
    },
}

/// Parses arguments and runs the selected command.
///
/// # Errors
///
/// Returns an error for fatal conditions: unresolvable working directory,
/// unreadable configuration, or a command that finished with an
/// error-severity message.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init_logging(cli.verbose);

    let working_dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let config = MemfoldConfig::load(&working_dir)?;

    match cli.command {
        Command::Refresh { discovery, json } => {
            let context = refresh_context(&working_dir, &config, &discovery)?;
            let result = refresh_memory(&context);
            if json && let Some(memory) = &result.data {
                println!("{}", serde_json::to_string_pretty(memory)?);
                return Ok(());
            }
            render(&result.messages)
        }
        Command::Show { discovery } => {
            let context = refresh_context(&working_dir, &config, &discovery)?;
            let refreshed = refresh_memory(&context);
            match refreshed.data {
                Some(memory) => {
                    let result = show_memory(&ShowMemoryContext {
                        user_memory: memory.content,
                        file_count: memory.file_count,
                    });
                    render(&result.messages)
                }
                None => render(&refreshed.messages),
            }
        }
        Command::List { discovery, json } => {
            let context = refresh_context(&working_dir, &config, &discovery)?;
            let refreshed = refresh_memory(&context);
            match refreshed.data {
                Some(memory) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&memory.file_paths)?);
                        Ok(())
                    } else {
                        render(&list_memory_files(&memory.file_paths).messages)
                    }
                }
                None => render(&refreshed.messages),
            }
        }
        Command::Add { text } => {
            let result = add_memory(&text.join(" "));
            render(&result.messages)?;
            if let Some(CommandAction::SaveMemory { fact }) = result.action {
                save_fact(&working_dir, &config, &fact)?;
            }
            Ok(())
        }
        Command::Init { untrusted } => {
            let filename = config
                .context_filenames
                .first()
                .cloned()
                .unwrap_or_else(|| crate::config::DEFAULT_CONTEXT_FILENAME.to_string());
            let result = init_context_file(&InitContext {
                target_dir: working_dir,
                context_filename: filename,
            })?;
            render(&result.messages)?;
            if let Some(CommandAction::SubmitPrompt { prompt }) = result.action {
                if untrusted {
                    tracing::warn!("workspace untrusted; prompt submission suppressed");
                } else {
                    println!("\n{prompt}");
                }
            }
            Ok(())
        }
    }
}

/// Builds the refresh context from config plus CLI overrides.
fn refresh_context(
    working_dir: &std::path::Path,
    config: &MemfoldConfig,
    args: &DiscoveryArgs,
) -> anyhow::Result<RefreshMemoryContext> {
    let import_format = match &args.format {
        Some(raw) => ImportFormat::parse(raw)?,
        None => config.import_format,
    };

    let mut include_dirs = config.include_dirs.clone();
    include_dirs.extend(args.include_dirs.iter().cloned());
    let mut extension_paths = config.extension_context_paths.clone();
    extension_paths.extend(args.extension_files.iter().cloned());

    let context_filenames = if args.context_files.is_empty() {
        config.context_filenames.clone()
    } else {
        args.context_files.clone()
    };

    Ok(RefreshMemoryContext {
        working_dir: working_dir.to_path_buf(),
        include_dirs,
        extension_context_paths: extension_paths,
        context_filenames,
        is_trusted: !args.untrusted,
        import_format,
        file_filtering: config.file_filtering.clone(),
        discovery_max_dirs: args.max_dirs.or(config.discovery_max_dirs),
    })
}

/// Renders messages; an error-severity message becomes the process error.
fn render(messages: &[DisplayMessage]) -> anyhow::Result<()> {
    for message in messages {
        match message.severity {
            Severity::Info => println!("{}", message.message),
            Severity::Error => anyhow::bail!("{}", message.message),
        }
    }
    Ok(())
}

/// Appends a remembered fact to the workspace context file.
fn save_fact(
    working_dir: &std::path::Path,
    config: &MemfoldConfig,
    fact: &str,
) -> anyhow::Result<()> {
    use std::io::Write as _;

    let filename = config
        .context_filenames
        .first()
        .map_or(crate::config::DEFAULT_CONTEXT_FILENAME, String::as_str);
    let path = working_dir.join(filename);

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    writeln!(file, "- {fact}")?;
    println!("Saved to {}.", path.display());
    Ok(())
}
