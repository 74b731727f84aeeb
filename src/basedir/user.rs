//! User basedir (the home directory and its `.m2` configuration area).
use std::path::{Path, PathBuf};

use super::{
    EXTENSIONS_XML, MAVEN_PROPERTIES, SETTINGS_XML, TOOLCHAINS_XML, resolve, validate_directory,
    validate_optional_directory, validate_optional_file,
};
use crate::error::BasedirError;

/// Name of the per-user configuration directory under the user root.
pub const USER_CONF_DIR: &str = ".m2";

/// Inputs for [`UserBasedir::new`], filled field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserConfig {
    /// User root, usually the home directory.
    pub root: PathBuf,
    /// Override for `<root>/.m2`.
    pub conf: Option<PathBuf>,
    /// Override for `<conf>/settings.xml`.
    pub settings_xml: Option<PathBuf>,
    /// Override for `<conf>/toolchains.xml`.
    pub toolchains_xml: Option<PathBuf>,
    /// Override for `<conf>/extensions.xml`.
    pub extensions_xml: Option<PathBuf>,
    /// Override for `<conf>/maven.properties`.
    pub maven_properties: Option<PathBuf>,
}

impl UserConfig {
    /// Start a configuration for `root` with no overrides.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// A validated user configuration layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBasedir {
    root: PathBuf,
    conf: Option<PathBuf>,
    settings_xml: Option<PathBuf>,
    toolchains_xml: Option<PathBuf>,
    extensions_xml: Option<PathBuf>,
    maven_properties: Option<PathBuf>,
}

impl UserBasedir {
    /// Validate `config` and build the basedir.
    ///
    /// # Errors
    ///
    /// Returns [`BasedirError`] if the root or the conf override exists but is
    /// not a directory, or a file override exists but is not a regular file.
    pub fn new(config: UserConfig) -> Result<Self, BasedirError> {
        Ok(Self {
            root: validate_directory(config.root)?,
            conf: validate_optional_directory(config.conf)?,
            settings_xml: validate_optional_file(config.settings_xml)?,
            toolchains_xml: validate_optional_file(config.toolchains_xml)?,
            extensions_xml: validate_optional_file(config.extensions_xml)?,
            maven_properties: validate_optional_file(config.maven_properties)?,
        })
    }

    /// The user root.
    #[must_use]
    pub fn basedir(&self) -> &Path {
        &self.root
    }

    /// The conf override, else `<root>/.m2`.
    #[must_use]
    pub fn conf(&self) -> PathBuf {
        self.conf
            .clone()
            .unwrap_or_else(|| self.root.join(USER_CONF_DIR))
    }

    /// The settings override, else `<conf>/settings.xml`.
    #[must_use]
    pub fn settings_xml(&self) -> PathBuf {
        resolve(self.settings_xml.as_deref(), &self.conf(), SETTINGS_XML)
    }

    /// The toolchains override, else `<conf>/toolchains.xml`.
    #[must_use]
    pub fn toolchains_xml(&self) -> PathBuf {
        resolve(self.toolchains_xml.as_deref(), &self.conf(), TOOLCHAINS_XML)
    }

    /// The extensions override, else `<conf>/extensions.xml`.
    #[must_use]
    pub fn extensions_xml(&self) -> PathBuf {
        resolve(self.extensions_xml.as_deref(), &self.conf(), EXTENSIONS_XML)
    }

    /// The properties override, else `<conf>/maven.properties`.
    #[must_use]
    pub fn maven_properties(&self) -> PathBuf {
        resolve(
            self.maven_properties.as_deref(),
            &self.conf(),
            MAVEN_PROPERTIES,
        )
    }
}
