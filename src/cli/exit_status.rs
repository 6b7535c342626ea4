use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed; everything that could be migrated was
/// - `Failure` (1): Dry run found literals to migrate, or the command refused
///   to run (e.g. the config file already exists)
/// - `Error` (2): Command failed (input not found, invalid config, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Work remains to be done.
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
