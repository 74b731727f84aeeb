//! Command: render the version banner.
use std::fmt::Write as _;

use super::Environment;

/// The build version: `CLING_VERSION` at build time, else the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("CLING_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Render the banner for `command`.
///
/// The minimal form is the single line `<command> <version>`; the full form
/// adds the installation home, user configuration and platform lines.
#[must_use]
pub fn banner(command: &str, env: &Environment, minimal: bool) -> String {
    let mut out = format!("{command} {}", version());
    if minimal {
        return out;
    }

    let home = env
        .installation_root()
        .map_or_else(|| "(unknown)".to_string(), |p| p.display().to_string());
    let conf = env.user_home.as_ref().map_or_else(
        || "(unknown)".to_string(),
        |h| h.join(crate::basedir::USER_CONF_DIR).display().to_string(),
    );
    write!(out, "\nMaven home: {home}").ok();
    write!(out, "\nUser configuration: {conf}").ok();
    write!(out, "\n{}", env.platform).ok();
    out
}
