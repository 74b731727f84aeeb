//! Command: hand the whole invocation to the legacy launcher.
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;

use super::Environment;
use crate::error::LaunchError;
use crate::exec;

/// Find the legacy launcher executable.
///
/// Looks at `CLING_LEGACY_LAUNCHER` first, then `<installation>/bin`, then
/// `PATH`.
///
/// # Errors
///
/// Returns [`LaunchError::LegacyLauncherNotFound`] if none of the locations
/// has one.
pub fn locate(env: &Environment) -> Result<PathBuf, LaunchError> {
    if let Some(explicit) = &env.legacy_launcher {
        return Ok(explicit.clone());
    }

    let name = env.platform.legacy_launcher_name();
    if let Some(bundled) = env
        .installation_root()
        .map(|root| root.join("bin").join(name))
        .filter(|candidate| candidate.is_file())
    {
        return Ok(bundled);
    }

    which::which(name).map_err(|_| LaunchError::LegacyLauncherNotFound(name.to_string()))
}

/// Run the legacy launcher with `args` and return its exit status.
///
/// # Errors
///
/// Returns an error if no launcher is found or it cannot be started.
pub fn run(env: &Environment, args: &[OsString]) -> Result<i32> {
    let launcher = locate(env)?;
    tracing::debug!(launcher = %launcher.display(), "delegating to legacy launcher");
    exec::run_inherited(&launcher, args)
}
