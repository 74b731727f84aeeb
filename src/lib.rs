//! Command-line front-end of the build-tool launcher.
//!
//! Parses the invocation into a validated option set, resolves the layered
//! installation and user configuration directories, and routes execution to
//! the legacy launcher, an informational banner, or the build.
//!
//! The public API is organised into these layers:
//!
//! - **[`cli`]**: option grammar, parsing and usage text
//! - **[`basedir`]**: validated installation/user directory layouts
//! - **[`launcher`]**: the top-level route decision and the [`launcher::Engine`] seam
//! - **[`commands`]**: the production engine wired to the real process environment
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod basedir;
pub mod cli;
pub mod commands;
pub mod error;
pub mod exec;
pub mod launcher;
pub mod logging;
pub mod platform;
pub mod terminal;
