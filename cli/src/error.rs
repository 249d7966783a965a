use std::io::Error as IoError;
use std::process::ExitStatus;

use thiserror::Error as DeriveError;

#[derive(Debug, DeriveError)]
pub enum GinitCliError {
    #[error("provide a project name")]
    MissingProjectName,

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Project path '{path}' already exists")]
    ProjectExists { path: String },

    #[error("No 'go' executable found on PATH. Install the Go toolchain from https://go.dev/dl and try again")]
    GoNotFound,

    #[error("Failed to launch '{command} {}': {err}", args.join(" "))]
    CommandLaunchFailed {
        command: String,
        args: Vec<String>,
        err: IoError,
    },

    #[error("Command '{command} {}' exited with {status}", args.join(" "))]
    CommandFailed {
        command: String,
        args: Vec<String>,
        status: ExitStatus,
    },

    #[error("Failed to create directory '{path}': {err}")]
    CreateDirFailed { path: String, err: IoError },

    #[error("Failed to write file '{path}': {err}")]
    WriteFailed { path: String, err: IoError },
}
