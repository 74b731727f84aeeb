//! Domain-specific error types for the launcher front-end.
//!
//! Library modules return the typed errors below; the production engine in
//! [`crate::commands`] wraps them into [`anyhow::Error`] with `?` at the
//! command boundary.
//!
//! # Error taxonomy
//!
//! ```text
//! ParseError   : malformed or unknown arguments (recovered, exit 1)
//! BasedirError : a root or override path has the wrong filesystem type (fatal)
//! LaunchError  : valid parse but nothing to run, or a collaborator is missing
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// An argument vector that does not match the declared option grammar.
///
/// Carries a single-line, human-readable diagnostic such as
/// `unexpected argument '--nope' found`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    /// Create a parse error from a diagnostic message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A basedir root or override exists on disk with the wrong type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasedirError {
    /// A directory role points at an existing non-directory.
    #[error("The path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A file role points at an existing non-file (e.g. a directory).
    #[error("The path exists but is not a file: {}", .0.display())]
    NotAFile(PathBuf),
}

impl BasedirError {
    /// The offending path.
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        match self {
            Self::NotADirectory(path) | Self::NotAFile(path) => path,
        }
    }
}

/// Launcher-level failures that are user errors or missing collaborators.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Parsing succeeded but no goal and no informational flag was given.
    #[error("No goals specified!")]
    NoGoals,

    /// The installation root could not be determined.
    #[error("cannot determine installation directory; set MAVEN_HOME")]
    InstallationNotFound,

    /// The user home directory could not be determined.
    #[error("cannot determine user home directory; set HOME")]
    UserHomeNotFound,

    /// No legacy launcher executable was found.
    #[error("legacy launcher '{0}' not found; set CLING_LEGACY_LAUNCHER")]
    LegacyLauncherNotFound(String),
}
