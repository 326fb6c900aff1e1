//! notekeep CLI
//!
//! Command-line interface for notekeep - notes sorted into categories.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use notekeep_core::{Config, NotePatch, Workspace};

mod commands;
mod editor;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "notekeep")]
#[command(about = "notekeep - notes sorted into categories")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Switch to the pro plan
    Upgrade,
    /// Show status (plan, storage, counts)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Start an interactive session
    Shell,
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Create a new note
    #[command(alias = "create")]
    Add {
        /// Note title
        title: String,
        /// Category (defaults to the first one)
        #[arg(short, long)]
        category: Option<String>,
        /// Note body (opens editor if not provided)
        #[arg(short, long)]
        body: Option<String>,
    },
    /// List notes
    #[command(alias = "ls")]
    List {
        /// Filter by category ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive search in title and body
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show note details
    Show {
        /// Note ID (full or prefix)
        id: String,
    },
    /// Edit a note (opens editor when no field is given)
    Edit {
        /// Note ID (full or prefix)
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
        /// Move to another category
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a note
    #[command(alias = "delete")]
    Rm {
        /// Note ID (full or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
    },
    /// List categories with note counts
    #[command(alias = "ls")]
    List,
    /// Delete a category, moving its notes elsewhere
    #[command(alias = "delete")]
    Rm {
        /// Category name
        name: String,
        /// Allow deleting a built-in category
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, backend, log_file, repair_orphans)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work even when the configured storage is unusable
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config, cli.verbose);
    debug!(backend = %config.backend, data_dir = ?config.data_dir, "Opening workspace");

    let mut ws = Workspace::open_with_config(config).context("Failed to open workspace")?;

    match cli.command {
        Commands::Note { command } => handle_note_command(command, &mut ws, &output),
        Commands::Category { command } => handle_category_command(command, &mut ws, &output),
        Commands::Upgrade => commands::status::upgrade(&mut ws, &output),
        Commands::Status => commands::status::show(&ws, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Shell => commands::shell::run(&mut ws),
    }
}

fn handle_note_command(command: NoteCommands, ws: &mut Workspace, output: &Output) -> Result<()> {
    match command {
        NoteCommands::Add {
            title,
            category,
            body,
        } => commands::note::create(ws, title, category, body, output),
        NoteCommands::List { category, search } => {
            commands::note::list(ws, category, search, output)
        }
        NoteCommands::Show { id } => commands::note::show(ws, id, output),
        NoteCommands::Edit {
            id,
            title,
            body,
            category,
        } => {
            let patch = NotePatch {
                title,
                content: body,
                category,
            };
            commands::note::edit(ws, id, patch, output)
        }
        NoteCommands::Rm { id } => commands::note::delete(ws, id, output),
    }
}

fn handle_category_command(
    command: CategoryCommands,
    ws: &mut Workspace,
    output: &Output,
) -> Result<()> {
    match command {
        CategoryCommands::Add { name } => commands::category::add(ws, name, output),
        CategoryCommands::List => commands::category::list(ws, output),
        CategoryCommands::Rm { name, force } => {
            commands::category::delete(ws, name, force, output)
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["notekeep", "note", "list", "--json", "-vv", "-c", "Work"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Note {
                command: NoteCommands::List { category, search },
            } => {
                assert_eq!(category.as_deref(), Some("Work"));
                assert!(search.is_none());
            }
            _ => panic!("expected note list"),
        }
    }

    #[test]
    fn test_category_rm_force() {
        let cli = Cli::try_parse_from(["notekeep", "category", "rm", "Ideas", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Category {
                command: CategoryCommands::Rm { force: true, .. }
            }
        ));
    }
}
