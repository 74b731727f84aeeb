//! Process-wide output color state.
//!
//! The state is installed right before a build runs and torn down when the
//! returned [`ColorGuard`] is dropped, which also happens on early returns,
//! errors and unwinding.
use std::io::IsTerminal as _;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::cli::{ColorMode, OptionSet};

const UNINSTALLED: u8 = 0;
const PLAIN: u8 = 1;
const COLORED: u8 = 2;

static STATE: AtomicU8 = AtomicU8::new(UNINSTALLED);

/// Serializes tests that install or inspect the global color state.
#[cfg(test)]
pub(crate) static TEST_STATE_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Restores the previous color state when dropped.
#[derive(Debug)]
#[must_use = "the color state is torn down as soon as the guard is dropped"]
pub struct ColorGuard {
    previous: u8,
}

impl Drop for ColorGuard {
    fn drop(&mut self) {
        STATE.store(self.previous, Ordering::SeqCst);
    }
}

/// Decide whether output should be colored.
///
/// A log file always forces plain output; `auto` colors only a terminal
/// that has not opted out through `NO_COLOR`.
#[must_use]
pub const fn colors_enabled(
    mode: ColorMode,
    stdout_is_terminal: bool,
    no_color_env: bool,
    log_file: bool,
) -> bool {
    if log_file {
        return false;
    }
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stdout_is_terminal && !no_color_env,
    }
}

/// Install the color state requested by `options` for the current process.
pub fn install(options: &OptionSet) -> ColorGuard {
    let enabled = colors_enabled(
        options.color,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        options.log_file.is_some(),
    );
    install_with(enabled)
}

/// Install an explicit color state.
pub fn install_with(enabled: bool) -> ColorGuard {
    if enabled {
        note_ansi_support(enable_ansi_support::enable_ansi_support());
    }
    let previous = STATE.swap(if enabled { COLORED } else { PLAIN }, Ordering::SeqCst);
    tracing::debug!(enabled, "installed color state");
    ColorGuard { previous }
}

/// Colors still get installed when the console refuses ANSI processing.
fn note_ansi_support(result: std::io::Result<()>) {
    if let Err(error) = result {
        tracing::debug!(%error, "could not enable ANSI support; colored output may be garbled");
    }
}

/// Whether a color state is currently installed.
#[must_use]
pub fn is_installed() -> bool {
    STATE.load(Ordering::SeqCst) != UNINSTALLED
}

/// Whether output should currently carry ANSI colors.
#[must_use]
pub fn is_colored() -> bool {
    STATE.load(Ordering::SeqCst) == COLORED
}
