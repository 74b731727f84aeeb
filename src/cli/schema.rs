//! Declarative option grammar.
//!
//! [`OPTIONS`] is the single source of truth for the command line: the clap
//! [`Command`] used for parsing and for rendering usage is generated from it,
//! and the token normalizer consults it to recognise multi-letter
//! single-dash abbreviations such as `-pl` or `-amd`.
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ColorChoice, Command, value_parser};

/// Id of the positional goals argument.
pub const GOALS: &str = "goals";

/// Long name of the escape-hatch flag that selects the legacy CLI.
pub const LEGACY_CLI: &str = "legacy-cli";

/// How many values an option takes and how they are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value; presence means `true`.
    Flag,
    /// Exactly one value, at most one occurrence.
    Value,
    /// Exactly one value per occurrence, repeatable.
    Repeated,
    /// One comma-delimited value per occurrence, repeatable.
    Delimited,
    /// Zero or one `true`/`false` value.
    OptionalBool {
        /// Value when the option is absent.
        default: bool,
    },
    /// Exactly one value from a closed set.
    Choice {
        /// Accepted values.
        values: &'static [&'static str],
        /// Value when the option is absent.
        default: Option<&'static str>,
    },
}

impl Arity {
    /// Whether the option always consumes a value token.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        matches!(
            self,
            Self::Value | Self::Repeated | Self::Delimited | Self::Choice { .. }
        )
    }
}

/// Validates and normalises an option value.
pub type Validator = fn(&str) -> Result<String, String>;

/// One declared command-line option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Canonical long name, also used as the clap argument id.
    pub long: &'static str,
    /// Single-character short name.
    pub short: Option<char>,
    /// Additional long names.
    pub aliases: &'static [&'static str],
    /// Multi-letter single-dash abbreviation (`pl` for `-pl`).
    pub abbrev: Option<&'static str>,
    /// Value arity.
    pub arity: Arity,
    /// Placeholder shown in usage, e.g. `file`.
    pub value_name: Option<&'static str>,
    /// One-line description shown in usage.
    pub help: &'static str,
    /// Optional value validator.
    pub validator: Option<Validator>,
}

impl OptionSpec {
    const fn new(long: &'static str, arity: Arity, help: &'static str) -> Self {
        Self {
            long,
            short: None,
            aliases: &[],
            abbrev: None,
            arity,
            value_name: None,
            help,
            validator: None,
        }
    }

    const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    const fn abbrev(mut self, abbrev: &'static str) -> Self {
        self.abbrev = Some(abbrev);
        self
    }

    const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn value_name(mut self, value_name: &'static str) -> Self {
        self.value_name = Some(value_name);
        self
    }

    const fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Whether `name` (without leading dashes) is the long name or an alias.
    ///
    /// Abbreviations only exist in single-dash form, so `pl` does not match.
    #[must_use]
    pub fn matches_long(&self, name: &str) -> bool {
        self.long == name || self.aliases.iter().any(|alias| *alias == name)
    }

    /// The usage line; an abbreviation leads it, spelled as it is typed.
    fn help_text(self) -> String {
        match self.abbrev {
            Some(abbrev) => format!("-{abbrev}, {}", self.help),
            None => self.help.to_string(),
        }
    }

    fn to_arg(self) -> Arg {
        let mut arg = Arg::new(self.long).long(self.long).help(self.help_text());
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        for alias in self.aliases {
            arg = arg.visible_alias(*alias);
        }
        if let Some(value_name) = self.value_name {
            arg = arg.value_name(value_name);
        }

        match self.arity {
            Arity::Flag => arg.action(ArgAction::SetTrue),
            Arity::Value => {
                let arg = arg.action(ArgAction::Set).num_args(1);
                match self.validator {
                    Some(validator) => arg.value_parser(validator),
                    None => arg,
                }
            }
            Arity::Repeated => arg.action(ArgAction::Append).num_args(1),
            Arity::Delimited => arg
                .action(ArgAction::Append)
                .num_args(1)
                .value_delimiter(','),
            Arity::OptionalBool { default } => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_value(if default { "true" } else { "false" })
                .default_missing_value("true")
                .value_parser(value_parser!(bool)),
            Arity::Choice { values, default } => {
                let arg = arg
                    .action(ArgAction::Set)
                    .num_args(1)
                    .value_parser(PossibleValuesParser::new(values.iter().copied()));
                match default {
                    Some(default) => arg.default_value(default),
                    None => arg,
                }
            }
        }
    }
}

/// Every option the launcher understands, in usage order.
pub static OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("help", Arity::Flag, "Display help information").short('h'),
    OptionSpec::new(
        "file",
        Arity::Value,
        "Force the use of an alternate POM file (or directory with pom.xml)",
    )
    .short('f')
    .value_name("file"),
    OptionSpec::new(
        "define",
        Arity::Repeated,
        "Define a user property in form of key=value, if no value set it becomes 'true'",
    )
    .short('D')
    .value_name("property"),
    OptionSpec::new("offline", Arity::Flag, "Work offline").short('o'),
    OptionSpec::new(
        "version",
        Arity::Flag,
        "Display version information and exit",
    )
    .short('v'),
    OptionSpec::new(
        "quiet",
        Arity::Flag,
        "Quiet execution output - only show errors",
    )
    .short('q'),
    OptionSpec::new("verbose", Arity::Flag, "Verbose execution output").short('X'),
    OptionSpec::new(
        "errors",
        Arity::Flag,
        "Produce execution error messages and stack traces",
    )
    .short('e'),
    OptionSpec::new(
        "non-recursive",
        Arity::Flag,
        "Do not recurse into sub-projects. When used together with -pl, do not recurse into sub-projects of selected aggregators",
    )
    .short('N'),
    OptionSpec::new(
        "update-snapshots",
        Arity::Flag,
        "Forces a check for missing releases and updated snapshots on remote repositories",
    )
    .short('U'),
    OptionSpec::new(
        "activate-profiles",
        Arity::Delimited,
        "Comma-delimited list of profiles to activate. Prefixing a profile with ! excludes it, and ? marks it as optional",
    )
    .short('P')
    .value_name("profile"),
    OptionSpec::new(
        "non-interactive",
        Arity::Flag,
        "Run in non-interactive (batch) mode",
    )
    .short('B')
    .aliases(&["batch-mode"]),
    OptionSpec::new(
        "force-interactive",
        Arity::Flag,
        "Run in interactive mode. Overrides, if applicable, the CI environment variable and --non-interactive/--batch-mode options",
    ),
    OptionSpec::new("no-snapshot-updates", Arity::Flag, "Suppress SNAPSHOT updates")
        .abbrev("nsu"),
    OptionSpec::new(
        "strict-checksums",
        Arity::Flag,
        "Fail the build if checksums don't match",
    )
    .short('C'),
    OptionSpec::new("lax-checksums", Arity::Flag, "Warn if checksums don't match").short('c'),
    OptionSpec::new(
        "settings",
        Arity::Value,
        "Alternate path for the user settings file",
    )
    .short('s')
    .value_name("file"),
    OptionSpec::new(
        "project-settings",
        Arity::Value,
        "Alternate path for the project settings file",
    )
    .abbrev("ps")
    .value_name("file"),
    OptionSpec::new(
        "global-settings",
        Arity::Value,
        "Deprecated: alternate path for the global settings file",
    )
    .abbrev("gs")
    .value_name("file"),
    OptionSpec::new(
        "install-settings",
        Arity::Value,
        "Alternate path for the installation settings file",
    )
    .abbrev("is")
    .value_name("file"),
    OptionSpec::new(
        "toolchains",
        Arity::Value,
        "Alternate path for the user toolchains file",
    )
    .short('t')
    .value_name("file"),
    OptionSpec::new(
        "global-toolchains",
        Arity::Value,
        "Deprecated: alternate path for the global toolchains file",
    )
    .abbrev("gt")
    .value_name("file"),
    OptionSpec::new(
        "install-toolchains",
        Arity::Value,
        "Alternate path for the installation toolchains file",
    )
    .abbrev("it")
    .value_name("file"),
    OptionSpec::new(
        "fail-on-severity",
        Arity::Choice {
            values: &["warn", "error"],
            default: None,
        },
        "Configure which severity of logging should cause the build to fail",
    )
    .abbrev("fos")
    .value_name("severity"),
    OptionSpec::new("fail-fast", Arity::Flag, "Stop at first failure in build").abbrev("ff"),
    OptionSpec::new(
        "fail-at-end",
        Arity::Flag,
        "Only fail the build afterwards; allow all non-impacted builds to continue",
    )
    .abbrev("fae"),
    OptionSpec::new(
        "fail-never",
        Arity::Flag,
        "Never fail the build, regardless of project result",
    )
    .abbrev("fn"),
    OptionSpec::new(
        "resume",
        Arity::Flag,
        "Resume reactor from the last failed project, using the resume.properties file in the build directory",
    )
    .short('r'),
    OptionSpec::new(
        "resume-from",
        Arity::Value,
        "Resume reactor from specified project",
    )
    .abbrev("rf")
    .value_name("project"),
    OptionSpec::new(
        "projects",
        Arity::Delimited,
        "Comma-delimited list of specified reactor projects to build instead of all projects. A project can be specified by [groupId]:artifactId or by its relative path. Prefixing a project with ! excludes it, and ? marks it as optional",
    )
    .abbrev("pl")
    .value_name("project"),
    OptionSpec::new(
        "also-make",
        Arity::Delimited,
        "If project list is specified, also build projects required by this list",
    )
    .abbrev("am")
    .value_name("project"),
    OptionSpec::new(
        "also-make-dependents",
        Arity::Flag,
        "If project list is specified, also build projects that depend on projects on the list",
    )
    .abbrev("amd"),
    OptionSpec::new(
        "log-file",
        Arity::Value,
        "Log file where all build output will go (disables output color)",
    )
    .short('l')
    .value_name("file"),
    OptionSpec::new(
        "show-version",
        Arity::Flag,
        "Display version information without exiting",
    )
    .short('V'),
    OptionSpec::new(
        "threads",
        Arity::Value,
        "Thread count, for instance 4 (int) or 2C/2.5C (int/float) where C is core multiplied",
    )
    .short('T')
    .value_name("count")
    .validator(parse_threads),
    OptionSpec::new("builder", Arity::Value, "The id of the build strategy to use")
        .short('b')
        .value_name("id"),
    OptionSpec::new(
        "no-transfer-progress",
        Arity::Flag,
        "Do not display transfer progress when downloading or uploading",
    )
    .abbrev("ntp"),
    OptionSpec::new(
        "color",
        Arity::Choice {
            values: &["auto", "always", "never"],
            default: Some("auto"),
        },
        "Defines the color mode of the output",
    )
    .value_name("mode"),
    OptionSpec::new(
        "cache-artifact-not-found",
        Arity::OptionalBool { default: true },
        "Defines caching behaviour for 'not found' artifacts",
    )
    .abbrev("canf")
    .value_name("bool"),
    OptionSpec::new(
        "strict-artifact-descriptor-policy",
        Arity::OptionalBool { default: false },
        "Defines 'strict' artifact descriptor policy",
    )
    .abbrev("sadp")
    .value_name("bool"),
    OptionSpec::new(
        "ignore-transitive-repositories",
        Arity::Flag,
        "Ignore remote repositories introduced by transitive dependencies",
    )
    .abbrev("itr"),
    OptionSpec::new(LEGACY_CLI, Arity::Flag, "Use legacy CLI"),
];

/// Find the option whose long name or alias is `name`.
#[must_use]
pub fn find_long(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.matches_long(name))
}

/// Find the option abbreviated as `-<name>`.
#[must_use]
pub fn find_abbrev(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.abbrev == Some(name))
}

/// Find the option with single-character short name `short`.
#[must_use]
pub fn find_short(short: char) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.short == Some(short))
}

/// Build the clap command for `command_name` from [`OPTIONS`].
///
/// Help and version handling are plain flags here; acting on them is the
/// launcher's business. Output is uncolored so usage text is stable.
#[must_use]
pub fn command(command_name: &str) -> Command {
    let cmd = Command::new(command_name.to_owned())
        .about("Build-tool launcher")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .color(ColorChoice::Never);

    OPTIONS
        .iter()
        .fold(cmd, |cmd, spec| cmd.arg(spec.to_arg()))
        .arg(
            Arg::new(GOALS)
                .value_name("GOALS")
                .action(ArgAction::Append)
                .help("List of phases and/or goals"),
        )
}

/// Accept `N` (positive integer) or `xC` (positive factor of the core count).
fn parse_threads(value: &str) -> Result<String, String> {
    let valid = value.strip_suffix('C').map_or_else(
        || value.parse::<u32>().is_ok_and(|n| n > 0),
        |factor| {
            factor
                .parse::<f32>()
                .is_ok_and(|f| f.is_finite() && f > 0.0)
        },
    );
    if valid {
        Ok(value.to_string())
    } else {
        Err("expected a thread count such as 4, 2C or 2.5C".to_string())
    }
}
