//! Option Model: parse an argument vector into a validated [`OptionSet`].
//!
//! The grammar lives in [`schema::OPTIONS`]; [`parse`] and [`render_usage`]
//! both go through the clap command generated from it, so usage text and
//! parsing behaviour cannot drift apart.
pub mod normalize;
pub mod schema;

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use clap::ArgMatches;

use crate::error::ParseError;

/// Output color mode selected with `--color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorMode {
    /// Look up a mode by its command-line spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Logging severity that fails the build (`-fos`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOnSeverity {
    /// Fail on warnings and errors.
    Warn,
    /// Fail on errors only.
    Error,
}

impl FailOnSeverity {
    /// Look up a severity by its command-line spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Reactor failure behaviour picked from `-ff`, `-fae` and `-fn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureBehavior {
    /// Stop at the first failure.
    FailFast,
    /// Build everything not impacted, fail at the end.
    FailAtEnd,
    /// Never fail.
    FailNever,
}

/// Checksum verification policy picked from `-C` and `-c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Fail the build on mismatch.
    Fail,
    /// Warn on mismatch.
    Warn,
}

/// The validated result of parsing one invocation.
///
/// List options are empty when absent; single-value options are `None`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    /// `-h/--help`
    pub help: bool,
    /// `-f/--file`
    pub alternate_pom_file: Option<PathBuf>,
    /// `-D/--define`, raw `key=value` strings in order.
    pub user_properties: Vec<String>,
    /// `-o/--offline`
    pub offline: bool,
    /// `-v/--version`
    pub show_version_and_exit: bool,
    /// `-q/--quiet`
    pub quiet: bool,
    /// `-X/--verbose`
    pub verbose: bool,
    /// `-e/--errors`
    pub errors: bool,
    /// `-N/--non-recursive`
    pub non_recursive: bool,
    /// `-U/--update-snapshots`
    pub update_snapshots: bool,
    /// `-P/--activate-profiles`, with `!`/`?` prefixes kept verbatim.
    pub activated_profiles: Vec<String>,
    /// `-B/--batch-mode/--non-interactive`
    pub non_interactive: bool,
    /// `--force-interactive`
    pub force_interactive: bool,
    /// `-nsu/--no-snapshot-updates`
    pub suppress_snapshot_updates: bool,
    /// `-C/--strict-checksums`
    pub strict_checksums: bool,
    /// `-c/--lax-checksums`
    pub relaxed_checksums: bool,
    /// `-s/--settings`
    pub alt_user_settings: Option<PathBuf>,
    /// `-ps/--project-settings`
    pub alt_project_settings: Option<PathBuf>,
    /// `-gs/--global-settings` (deprecated)
    pub alt_global_settings: Option<PathBuf>,
    /// `-is/--install-settings`
    pub alt_installation_settings: Option<PathBuf>,
    /// `-t/--toolchains`
    pub alt_user_toolchains: Option<PathBuf>,
    /// `-gt/--global-toolchains` (deprecated)
    pub alt_global_toolchains: Option<PathBuf>,
    /// `-it/--install-toolchains`
    pub alt_installation_toolchains: Option<PathBuf>,
    /// `-fos/--fail-on-severity`
    pub fail_on_severity: Option<FailOnSeverity>,
    /// `-ff/--fail-fast`
    pub fail_fast: bool,
    /// `-fae/--fail-at-end`
    pub fail_at_end: bool,
    /// `-fn/--fail-never`
    pub fail_never: bool,
    /// `-r/--resume`
    pub resume: bool,
    /// `-rf/--resume-from`
    pub resume_from: Option<String>,
    /// `-pl/--projects`, with `!`/`?` prefixes kept verbatim.
    pub projects: Vec<String>,
    /// `-am/--also-make`
    pub also_make: Vec<String>,
    /// `-amd/--also-make-dependents`
    pub also_make_dependents: bool,
    /// `-l/--log-file`
    pub log_file: Option<PathBuf>,
    /// `-V/--show-version`
    pub show_version: bool,
    /// `-T/--threads`
    pub threads: Option<String>,
    /// `-b/--builder`
    pub builder: Option<String>,
    /// `-ntp/--no-transfer-progress`
    pub no_transfer_progress: bool,
    /// `--color`
    pub color: ColorMode,
    /// `-canf/--cache-artifact-not-found`
    pub cache_artifact_not_found: bool,
    /// `-sadp/--strict-artifact-descriptor-policy`
    pub strict_artifact_descriptor_policy: bool,
    /// `-itr/--ignore-transitive-repositories`
    pub ignore_transitive_repositories: bool,
    /// `--legacy-cli`
    pub legacy_cli: bool,
    /// Positional phases and goals, in invocation order.
    pub goals: Vec<String>,
    /// Name the command was invoked as.
    pub command_name: String,
    /// The invocation's arguments, unmodified, including any bytes that are
    /// not valid UTF-8.
    pub raw_args: Vec<OsString>,
}

impl OptionSet {
    fn from_matches(
        command_name: &str,
        raw_args: Vec<OsString>,
        m: &ArgMatches,
    ) -> Result<Self, ParseError> {
        let color = match string(m, "color") {
            Some(name) => ColorMode::from_name(&name)
                .ok_or_else(|| ParseError::new(format!("invalid color mode '{name}'")))?,
            None => ColorMode::default(),
        };
        let fail_on_severity = string(m, "fail-on-severity")
            .map(|name| {
                FailOnSeverity::from_name(&name)
                    .ok_or_else(|| ParseError::new(format!("invalid severity '{name}'")))
            })
            .transpose()?;

        Ok(Self {
            help: m.get_flag("help"),
            alternate_pom_file: path(m, "file"),
            user_properties: strings(m, "define"),
            offline: m.get_flag("offline"),
            show_version_and_exit: m.get_flag("version"),
            quiet: m.get_flag("quiet"),
            verbose: m.get_flag("verbose"),
            errors: m.get_flag("errors"),
            non_recursive: m.get_flag("non-recursive"),
            update_snapshots: m.get_flag("update-snapshots"),
            activated_profiles: strings(m, "activate-profiles"),
            non_interactive: m.get_flag("non-interactive"),
            force_interactive: m.get_flag("force-interactive"),
            suppress_snapshot_updates: m.get_flag("no-snapshot-updates"),
            strict_checksums: m.get_flag("strict-checksums"),
            relaxed_checksums: m.get_flag("lax-checksums"),
            alt_user_settings: path(m, "settings"),
            alt_project_settings: path(m, "project-settings"),
            alt_global_settings: path(m, "global-settings"),
            alt_installation_settings: path(m, "install-settings"),
            alt_user_toolchains: path(m, "toolchains"),
            alt_global_toolchains: path(m, "global-toolchains"),
            alt_installation_toolchains: path(m, "install-toolchains"),
            fail_on_severity,
            fail_fast: m.get_flag("fail-fast"),
            fail_at_end: m.get_flag("fail-at-end"),
            fail_never: m.get_flag("fail-never"),
            resume: m.get_flag("resume"),
            resume_from: string(m, "resume-from"),
            projects: strings(m, "projects"),
            also_make: strings(m, "also-make"),
            also_make_dependents: m.get_flag("also-make-dependents"),
            log_file: path(m, "log-file"),
            show_version: m.get_flag("show-version"),
            threads: string(m, "threads"),
            builder: string(m, "builder"),
            no_transfer_progress: m.get_flag("no-transfer-progress"),
            color,
            cache_artifact_not_found: boolean(m, "cache-artifact-not-found", true),
            strict_artifact_descriptor_policy: boolean(
                m,
                "strict-artifact-descriptor-policy",
                false,
            ),
            ignore_transitive_repositories: m.get_flag("ignore-transitive-repositories"),
            legacy_cli: m.get_flag(schema::LEGACY_CLI),
            goals: strings(m, schema::GOALS),
            command_name: command_name.to_string(),
            raw_args,
        })
    }

    /// The raw arguments with every exact `--legacy-cli` token removed.
    #[must_use]
    pub fn legacy_args(&self) -> Vec<OsString> {
        let flag = format!("--{}", schema::LEGACY_CLI);
        self.raw_args
            .iter()
            .filter(|arg| arg.as_os_str() != flag.as_str())
            .cloned()
            .collect()
    }

    /// User properties as a map; a bare `key` means `key=true` and later
    /// definitions win.
    #[must_use]
    pub fn user_property_map(&self) -> BTreeMap<String, String> {
        self.user_properties
            .iter()
            .map(|property| match property.split_once('=') {
                Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
                None => (property.trim().to_string(), "true".to_string()),
            })
            .collect()
    }

    /// The effective reactor failure behaviour.
    #[must_use]
    pub const fn failure_behavior(&self) -> FailureBehavior {
        if self.fail_never {
            FailureBehavior::FailNever
        } else if self.fail_at_end {
            FailureBehavior::FailAtEnd
        } else {
            FailureBehavior::FailFast
        }
    }

    /// The requested checksum policy, if any.
    #[must_use]
    pub const fn checksum_policy(&self) -> Option<ChecksumPolicy> {
        if self.strict_checksums {
            Some(ChecksumPolicy::Fail)
        } else if self.relaxed_checksums {
            Some(ChecksumPolicy::Warn)
        } else {
            None
        }
    }

    /// Whether the build may prompt the user.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.force_interactive || !self.non_interactive
    }
}

/// Parse `args` (without the program name) for the command `command_name`.
///
/// # Errors
///
/// Returns a [`ParseError`] with a one-line diagnostic when a token matches
/// no option or positional, a value is missing or invalid, or a
/// single-occurrence option is repeated. An argument that is not valid UTF-8
/// is an error too, unless `--legacy-cli` hands the invocation on untouched.
pub fn parse<A: AsRef<OsStr>>(command_name: &str, args: &[A]) -> Result<OptionSet, ParseError> {
    let raw_args: Vec<OsString> = args.iter().map(|arg| arg.as_ref().to_owned()).collect();
    let text: Vec<String> = raw_args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let matches = schema::command(command_name)
        .try_get_matches_from(normalize::normalize(&text))
        .map_err(|err| ParseError::new(diagnostic(&err)))?;
    let options = OptionSet::from_matches(command_name, raw_args, &matches)?;

    if !options.legacy_cli
        && let Some(bad) = options.raw_args.iter().find(|arg| arg.to_str().is_none())
    {
        return Err(ParseError::new(format!(
            "invalid UTF-8 in argument '{}'",
            bad.to_string_lossy()
        )));
    }
    Ok(options)
}

/// Render the usage text for `command_name`.
///
/// The text is derived from [`schema::OPTIONS`] and is identical on every
/// call.
#[must_use]
pub fn render_usage(command_name: &str) -> String {
    schema::command(command_name).render_help().to_string()
}

/// First line of clap's rendering, without the `error: ` prefix.
fn diagnostic(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default().trim();
    let line = line.strip_prefix("error:").unwrap_or(line).trim();
    if line.is_empty() {
        format!("invalid arguments ({:?})", err.kind())
    } else {
        line.to_string()
    }
}

fn string(m: &ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).cloned()
}

fn path(m: &ArgMatches, id: &str) -> Option<PathBuf> {
    m.get_one::<String>(id).map(PathBuf::from)
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn boolean(m: &ArgMatches, id: &str, default: bool) -> bool {
    m.get_one::<bool>(id).copied().unwrap_or(default)
}
