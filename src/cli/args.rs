//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `migrate`: Move Cyrillic literals of one file into the lexicon
//! - `init`: Initialize lexmig configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Migrate(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read the configuration.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Lexicon file path (overrides config file)
    #[arg(long)]
    pub lexicon: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source file to migrate
    pub input: PathBuf,

    /// First line (1-based) to migrate; earlier lines are left untouched
    #[arg(long, default_value_t = 1)]
    pub start_line: usize,

    /// Lexicon namespace (default: derived from the input file name)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Show what would be migrated without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct MigrateCommand {
    #[command(flatten)]
    pub args: MigrateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move Cyrillic string literals into the lexicon and replace them with lookups
    Migrate(MigrateCommand),
    /// Initialize a new .lexmigrc.json configuration file
    Init,
}
