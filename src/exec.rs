//! Child process execution with inherited stdio.
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Exit status reported for a child that ended without a code or signal.
const UNKNOWN_STATUS: i32 = 1;

/// Run `program` with `args`, inheriting stdin, stdout and stderr, and wait
/// for it to finish.
///
/// Arguments are passed as raw OS strings, so bytes that are not valid UTF-8
/// reach the child unchanged.
///
/// Returns the child's exit code verbatim. A child killed by a signal on Unix
/// maps to `128 + signal`, like a POSIX shell reports it.
///
/// # Errors
///
/// Returns an error if the child process cannot be started.
pub fn run_inherited(program: &Path, args: &[OsString]) -> Result<i32> {
    tracing::debug!(program = %program.display(), ?args, "spawning child");
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to execute: {}", program.display()))?;
    Ok(exit_code(status))
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    UNKNOWN_STATUS
}
