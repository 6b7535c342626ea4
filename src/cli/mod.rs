//! Command-line interface layer.
//!
//! - `args`: clap definitions
//! - `commands`: `migrate` and `init`
//! - `report`: colored output
//! - `exit_status`: exit code mapping

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, MigrateArgs, MigrateCommand};
pub use commands::MigrateSummary;
pub use exit_status::ExitStatus;
pub use run::run_cli;
