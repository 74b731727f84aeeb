//! Installation basedir (the former "maven home").
use std::path::{Path, PathBuf};

use super::{
    EXTENSIONS_XML, SETTINGS_XML, TOOLCHAINS_XML, resolve, validate_directory,
    validate_optional_file,
};
use crate::error::BasedirError;

/// Inputs for [`InstallationBasedir::new`], filled field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallationConfig {
    /// Installation root.
    pub root: PathBuf,
    /// Override for `conf/settings.xml`.
    pub settings_xml: Option<PathBuf>,
    /// Override for `conf/toolchains.xml`.
    pub toolchains_xml: Option<PathBuf>,
    /// Override for `conf/extensions.xml`.
    pub extensions_xml: Option<PathBuf>,
}

impl InstallationConfig {
    /// Start a configuration for `root` with no overrides.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// A validated installation layout.
///
/// ```text
/// <root>/bin
/// <root>/boot
/// <root>/conf/{settings,toolchains,extensions}.xml
/// <root>/lib/ext
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationBasedir {
    root: PathBuf,
    settings_xml: Option<PathBuf>,
    toolchains_xml: Option<PathBuf>,
    extensions_xml: Option<PathBuf>,
}

impl InstallationBasedir {
    /// Validate `config` and build the basedir.
    ///
    /// # Errors
    ///
    /// Returns [`BasedirError`] if the root exists but is not a directory,
    /// or an override exists but is not a regular file.
    pub fn new(config: InstallationConfig) -> Result<Self, BasedirError> {
        Ok(Self {
            root: validate_directory(config.root)?,
            settings_xml: validate_optional_file(config.settings_xml)?,
            toolchains_xml: validate_optional_file(config.toolchains_xml)?,
            extensions_xml: validate_optional_file(config.extensions_xml)?,
        })
    }

    /// The installation root.
    #[must_use]
    pub fn basedir(&self) -> &Path {
        &self.root
    }

    /// `<root>/bin`
    #[must_use]
    pub fn bin(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// `<root>/boot`
    #[must_use]
    pub fn boot(&self) -> PathBuf {
        self.root.join("boot")
    }

    /// `<root>/conf`
    #[must_use]
    pub fn conf(&self) -> PathBuf {
        self.root.join("conf")
    }

    /// `<root>/lib`
    #[must_use]
    pub fn lib(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// `<root>/lib/ext`
    #[must_use]
    pub fn lib_ext(&self) -> PathBuf {
        self.lib().join("ext")
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
}
