use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::GinitCliError;

pub fn has_executable(executable: &str) -> bool {
    Command::new("which")
        .arg(executable)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Runs an external command to completion, streaming its stdout/stderr to
/// the parent's. The working directory is always passed in explicitly; this
/// crate never mutates its own.
pub fn run_command(command: &str, args: &[&str], cwd: Option<&Path>) -> Result<(), GinitCliError> {
    let mut cmd = Command::new(command);
    cmd.args(args);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    let status = cmd
        .status()
        .map_err(|err| GinitCliError::CommandLaunchFailed {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            err,
        })?;
    if !status.success() {
        return Err(GinitCliError::CommandFailed {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            status,
        });
    }
    Ok(())
}

/// Creates parent directories as needed, then writes `content` in full,
/// truncating any existing file at `path`.
pub fn write_file(path: &Path, content: &str) -> Result<(), GinitCliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| GinitCliError::CreateDirFailed {
            path: parent.display().to_string(),
            err,
        })?;
    }
    fs::write(path, content).map_err(|err| GinitCliError::WriteFailed {
        path: path.display().to_string(),
        err,
    })
}
