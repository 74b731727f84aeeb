//! The production engine: environment capture, basedir wiring and the
//! commands behind each launcher route.
pub mod execute;
pub mod legacy;
pub mod version;

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::basedir::{InstallationBasedir, InstallationConfig, UserBasedir, UserConfig};
use crate::cli::OptionSet;
use crate::error::LaunchError;
use crate::launcher::Engine;
use crate::platform::Platform;

/// Environment variable naming the installation root.
pub const MAVEN_HOME_ENV: &str = "MAVEN_HOME";

/// Environment variable naming an explicit legacy launcher executable.
pub const LEGACY_LAUNCHER_ENV: &str = "CLING_LEGACY_LAUNCHER";

/// User property that overrides the user configuration directory.
pub const USER_CONF_PROPERTY: &str = "maven.user.conf";

/// Process environment the production engine depends on, captured once.
///
/// Tests build this directly instead of mutating the real environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `MAVEN_HOME`, if set.
    pub maven_home: Option<PathBuf>,
    /// The user's home directory (`HOME`, else `USERPROFILE`).
    pub user_home: Option<PathBuf>,
    /// `CLING_LEGACY_LAUNCHER`, if set.
    pub legacy_launcher: Option<PathBuf>,
    /// Path of the running executable.
    pub current_exe: Option<PathBuf>,
    /// Host platform.
    pub platform: Platform,
}

impl Environment {
    /// Read the environment of the running process.
    ///
    /// Empty variables count as unset.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            maven_home: path_var(MAVEN_HOME_ENV),
            user_home: path_var("HOME").or_else(|| path_var("USERPROFILE")),
            legacy_launcher: path_var(LEGACY_LAUNCHER_ENV),
            current_exe: std::env::current_exe()
                .ok()
                .map(|exe| dunce::canonicalize(&exe).unwrap_or(exe)),
            platform: Platform::detect(),
        }
    }

    /// The installation root: `MAVEN_HOME`, else two levels above the
    /// running executable (`<root>/bin/<command>`).
    #[must_use]
    pub fn installation_root(&self) -> Option<PathBuf> {
        let root = self.maven_home.clone().or_else(|| {
            self.current_exe
                .as_deref()
                .and_then(|exe| exe.parent()?.parent())
                .map(PathBuf::from)
        })?;
        Some(dunce::canonicalize(&root).unwrap_or(root))
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Both basedirs, resolved from the environment and the parsed options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSetup {
    /// Installation root and its configuration files.
    pub installation: InstallationBasedir,
    /// User configuration directory and its files.
    pub user: UserBasedir,
}

impl CommandSetup {
    /// Resolve and validate the installation and user basedirs.
    ///
    /// Deprecated `-gs`/`-gt` are honoured only when `-is`/`-it` are absent,
    /// and produce a warning either way.
    ///
    /// # Errors
    ///
    /// Returns an error if either root cannot be determined or a root or
    /// override has the wrong filesystem type.
    pub fn init(env: &Environment, options: &OptionSet) -> Result<Self> {
        if options.alt_global_settings.is_some() {
            tracing::warn!(
                "Option '--global-settings' is deprecated and will be removed in a future version, use '--install-settings' instead"
            );
        }
        if options.alt_global_toolchains.is_some() {
            tracing::warn!(
                "Option '--global-toolchains' is deprecated and will be removed in a future version, use '--install-toolchains' instead"
            );
        }

        let root = env
            .installation_root()
            .ok_or(LaunchError::InstallationNotFound)?;
        let installation = InstallationBasedir::new(InstallationConfig {
            settings_xml: options
                .alt_installation_settings
                .clone()
                .or_else(|| options.alt_global_settings.clone()),
            toolchains_xml: options
                .alt_installation_toolchains
                .clone()
                .or_else(|| options.alt_global_toolchains.clone()),
            ..InstallationConfig::new(root)
        })
        .context("invalid installation directory")?;

        let home = env
            .user_home
            .clone()
            .ok_or(LaunchError::UserHomeNotFound)?;
        let user = UserBasedir::new(UserConfig {
            conf: options
                .user_property_map()
                .remove(USER_CONF_PROPERTY)
                .map(PathBuf::from),
            settings_xml: options.alt_user_settings.clone(),
            toolchains_xml: options.alt_user_toolchains.clone(),
            ..UserConfig::new(home)
        })
        .context("invalid user configuration directory")?;

        tracing::debug!(
            installation = %installation.basedir().display(),
            user_conf = %user.conf().display(),
            "resolved basedirs"
        );
        Ok(Self { installation, user })
    }
}

/// The [`Engine`] used by the `mvn` binary.
#[derive(Debug)]
pub struct ProcessEngine {
    command_name: String,
    env: Environment,
}

impl ProcessEngine {
    /// Create an engine for `command_name` over a captured environment.
    #[must_use]
    pub fn new(command_name: impl Into<String>, env: Environment) -> Self {
        Self {
            command_name: command_name.into(),
            env,
        }
    }
}

impl Engine for ProcessEngine {
    fn run_legacy(&self, args: Vec<OsString>) -> Result<i32> {
        legacy::run(&self.env, &args)
    }

    fn version_banner(&self, minimal: bool) -> String {
        version::banner(&self.command_name, &self.env, minimal)
    }

    /// Writes build output to the process's stdout.
    fn execute(&self, options: &OptionSet) -> Result<i32> {
        let setup = CommandSetup::init(&self.env, options)?;
        let mut out = std::io::stdout().lock();
        execute::run(&setup, options, &mut out)
    }
}
