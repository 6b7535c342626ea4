use std::process::ExitCode;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, migrate::migrate},
    exit_status::ExitStatus,
};

/// Main entry point for the lexmig CLI.
///
/// Dispatches to the command handler and maps its status to an exit code.
/// Errors are returned to the caller, which reports them and exits with
/// [`ExitStatus::Error`].
pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = match command {
        Some(Command::Migrate(cmd)) => migrate(cmd, verbose)?,
        Some(Command::Init) => init()?,
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    };

    Ok(status.into())
}
