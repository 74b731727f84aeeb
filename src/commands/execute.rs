//! Command: run the build.
//!
//! The build pipeline is not wired up yet; this validates the resolved
//! layout and prints a greeting.
use std::io::Write;

use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::OptionSet;

/// Output of a successful run.
pub const GREETING: &str = "Hello World!";

/// Run the build for `options` against the resolved `setup`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run(setup: &CommandSetup, options: &OptionSet, out: &mut dyn Write) -> Result<i32> {
    tracing::debug!(
        installation_settings = %setup.installation.settings_xml().display(),
        installation_toolchains = %setup.installation.toolchains_xml().display(),
        user_settings = %setup.user.settings_xml().display(),
        user_toolchains = %setup.user.toolchains_xml().display(),
        "configuration files"
    );
    tracing::debug!(goals = ?options.goals, failure = ?options.failure_behavior(), "running build");

    writeln!(out, "{GREETING}").context("failed to write build output")?;
    Ok(0)
}
