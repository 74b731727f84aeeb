//! Basedir Resolver: canonical locations under an installation or user root.
//!
//! A basedir root may be missing (it can be created later) or an existing
//! directory, but never an existing non-directory. Overrides for file roles
//! must likewise be missing or regular files, and overrides for directory
//! roles missing or directories. All checks happen once, in the validating
//! constructor; the derived-path getters never touch the filesystem.
mod installation;
mod user;

pub use installation::{InstallationBasedir, InstallationConfig};
pub use user::{USER_CONF_DIR, UserBasedir, UserConfig};

use std::path::{Path, PathBuf};

use crate::error::BasedirError;

/// File name of the settings file.
pub const SETTINGS_XML: &str = "settings.xml";
/// File name of the toolchains file.
pub const TOOLCHAINS_XML: &str = "toolchains.xml";
/// File name of the core extensions file.
pub const EXTENSIONS_XML: &str = "extensions.xml";
/// File name of the user properties file.
pub const MAVEN_PROPERTIES: &str = "maven.properties";

/// Accept `path` unless it exists and is not a directory.
///
/// Symlinks are followed; a dangling symlink counts as missing.
///
/// # Errors
///
/// Returns [`BasedirError::NotADirectory`] if `path` exists and is not a
/// directory.
pub fn validate_directory(path: PathBuf) -> Result<PathBuf, BasedirError> {
    if path.exists() && !path.is_dir() {
        return Err(BasedirError::NotADirectory(path));
    }
    Ok(path)
}

/// Accept `path` unless it exists and is not a regular file.
///
/// # Errors
///
/// Returns [`BasedirError::NotAFile`] if `path` exists and is not a file.
pub fn validate_file(path: PathBuf) -> Result<PathBuf, BasedirError> {
    if path.exists() && !path.is_file() {
        return Err(BasedirError::NotAFile(path));
    }
    Ok(path)
}

fn validate_optional_directory(path: Option<PathBuf>) -> Result<Option<PathBuf>, BasedirError> {
    path.map(validate_directory).transpose()
}

fn validate_optional_file(path: Option<PathBuf>) -> Result<Option<PathBuf>, BasedirError> {
    path.map(validate_file).transpose()
}

/// The override if present, else `<dir>/<name>`.
fn resolve(override_path: Option<&Path>, dir: &Path, name: &str) -> PathBuf {
    override_path.map_or_else(|| dir.join(name), Path::to_path_buf)
}
