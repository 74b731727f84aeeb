//! Top-level control flow: parse, pick a [`Route`], run it, return an exit
//! status.
//!
//! ```text
//! Start -> ParseArgs -> ParseFailed                      (1)
//!                    -> ParseOk -> LegacyDelegate        (legacy status)
//!                               -> ShowHelp              (0)
//!                               -> ShowVersion           (0)
//!                               -> NoGoals               (1)
//!                               -> Execute               (engine status, 1 on error)
//! ```
//!
//! Everything past the decision is delegated to an [`Engine`], so every route
//! can be driven in-process with injected output streams.
use std::ffi::{OsStr, OsString};
use std::io::Write;

use crate::cli::{self, OptionSet};
use crate::error::LaunchError;
use crate::terminal;

/// Exit status for parse failures, missing goals and execution errors.
pub const FAILURE: i32 = 1;

/// Exit status for success.
pub const SUCCESS: i32 = 0;

/// The collaborators the launcher hands work to.
#[cfg_attr(test, mockall::automock)]
pub trait Engine {
    /// Run the legacy execution path with `args` and return its exit status.
    ///
    /// `args` are the raw invocation arguments, byte for byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the legacy path cannot be started at all.
    fn run_legacy(&self, args: Vec<OsString>) -> anyhow::Result<i32>;

    /// The version banner; `minimal` selects the one-line form.
    fn version_banner(&self, minimal: bool) -> String;

    /// Run the build pipeline and return its exit status.
    ///
    /// The engine writes build output itself; the launcher only passes it
    /// the parsed options.
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline fails before producing a status.
    fn execute(&self, options: &OptionSet) -> anyhow::Result<i32>;
}

/// Where a successfully parsed invocation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `--legacy-cli`: forward everything else to the legacy path.
    LegacyDelegate,
    /// `-h/--help`: print usage.
    ShowHelp,
    /// `-v/--version`: print the banner and stop. `-V` instead prints the
    /// full banner ahead of [`Route::Execute`].
    ShowVersion {
        /// `-q` was given, so print the one-line form.
        minimal: bool,
    },
    /// Nothing to do.
    NoGoals,
    /// Run the build.
    Execute,
}

impl Route {
    /// Pick the route for `options`; earlier checks win.
    #[must_use]
    pub fn of(options: &OptionSet) -> Self {
        if options.legacy_cli {
            Self::LegacyDelegate
        } else if options.help {
            Self::ShowHelp
        } else if options.show_version_and_exit {
            Self::ShowVersion {
                minimal: options.quiet,
            }
        } else if options.goals.is_empty() {
            Self::NoGoals
        } else {
            Self::Execute
        }
    }
}

/// The launcher for one command name and engine.
#[derive(Debug)]
pub struct Launcher<E> {
    command_name: String,
    engine: E,
}

impl<E: Engine> Launcher<E> {
    /// Create a launcher that parses arguments for `command_name`.
    #[must_use]
    pub fn new(command_name: impl Into<String>, engine: E) -> Self {
        Self {
            command_name: command_name.into(),
            engine,
        }
    }

    /// The engine routes are delegated to.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Parse `args` and run the selected route.
    ///
    /// Diagnostics and errors go to `err`; usage and version banners go to
    /// `out`. Build output is the engine's own.
    pub fn run<A: AsRef<OsStr>>(
        &self,
        args: &[A],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        match cli::parse(&self.command_name, args) {
            Ok(options) => self.dispatch(&options, out, err),
            Err(parse_error) => {
                tracing::debug!(%parse_error, "argument parsing failed");
                writeln!(err, "Bad CLI arguments: {parse_error}").ok();
                self.print_usage(out);
                FAILURE
            }
        }
    }

    /// Run the route selected for already-parsed `options`.
    pub fn dispatch(&self, options: &OptionSet, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        let route = Route::of(options);
        tracing::debug!(?route, "dispatching");

        match route {
            Route::LegacyDelegate => match self.engine.run_legacy(options.legacy_args()) {
                Ok(status) => status,
                Err(error) => {
                    report(err, &error);
                    FAILURE
                }
            },
            Route::ShowHelp => {
                self.print_usage(out);
                SUCCESS
            }
            Route::ShowVersion { minimal } => {
                writeln!(out, "{}", self.engine.version_banner(minimal)).ok();
                SUCCESS
            }
            Route::NoGoals => {
                writeln!(err, "{}", LaunchError::NoGoals).ok();
                self.print_usage(out);
                FAILURE
            }
            Route::Execute => {
                if options.show_version {
                    writeln!(out, "{}", self.engine.version_banner(false)).ok();
                }
                let _colors = terminal::install(options);
                match self.engine.execute(options) {
                    Ok(status) => status,
                    Err(error) => {
                        report(err, &error);
                        FAILURE
                    }
                }
            }
        }
    }

    fn print_usage(&self, out: &mut dyn Write) {
        write!(out, "{}", cli::render_usage(&self.command_name)).ok();
    }
}

/// Print `error` once, on `err`; the trace only repeats it at debug level.
fn report(err: &mut dyn Write, error: &anyhow::Error) {
    tracing::debug!("route failed: {error:#}");
    writeln!(err, "[ERROR] {error:#}").ok();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    struct Run {
        status: i32,
        out: String,
        err: String,
    }

    fn run(engine: MockEngine, list: &[&str]) -> Run {
        let launcher = Launcher::new("mvn", engine);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = launcher.run(&args(list), &mut out, &mut err);
        Run {
            status,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        terminal::TEST_STATE_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn route_precedence() {
        let parse = |list: &[&str]| cli::parse("mvn", &args(list)).unwrap();
        assert_eq!(
            Route::of(&parse(&["--legacy-cli", "-v", "-h"])),
            Route::LegacyDelegate
        );
        assert_eq!(Route::of(&parse(&["-h", "-v"])), Route::ShowHelp);
        assert_eq!(
            Route::of(&parse(&["-v", "clean"])),
            Route::ShowVersion { minimal: false }
        );
        assert_eq!(
            Route::of(&parse(&["-q", "-v"])),
            Route::ShowVersion { minimal: true }
        );
        assert_eq!(Route::of(&parse(&[])), Route::NoGoals);
        assert_eq!(Route::of(&parse(&["-V"])), Route::NoGoals);
        assert_eq!(Route::of(&parse(&["verify"])), Route::Execute);
    }

    #[test]
    fn parse_failure_prints_diagnostic_and_usage() {
        let r = run(MockEngine::new(), &["--bogus"]);
        assert_eq!(r.status, FAILURE);
        assert!(r.err.starts_with("Bad CLI arguments: "), "{}", r.err);
        assert!(r.err.contains("--bogus"));
        assert_eq!(r.out, cli::render_usage("mvn"));
    }

    #[test]
    fn legacy_delegate_forwards_args_without_flag() {
        let mut engine = MockEngine::new();
        engine
            .expect_run_legacy()
            .withf(|forwarded| *forwarded == ["clean", "install"])
            .times(1)
            .returning(|_| Ok(7));
        let r = run(engine, &["--legacy-cli", "clean", "install"]);
        assert_eq!(r.status, 7);
        assert!(r.out.is_empty());
    }

    #[test]
    fn legacy_delegate_start_failure_is_status_one() {
        let mut engine = MockEngine::new();
        engine
            .expect_run_legacy()
            .returning(|_| Err(anyhow::anyhow!("no legacy launcher")));
        let r = run(engine, &["clean", "--legacy-cli"]);
        assert_eq!(r.status, FAILURE);
        assert!(r.err.contains("no legacy launcher"));
    }

    #[test]
    fn help_prints_usage_and_succeeds() {
        let r = run(MockEngine::new(), &["--help"]);
        assert_eq!(r.status, SUCCESS);
        assert_eq!(r.out, cli::render_usage("mvn"));
        assert!(r.err.is_empty());
    }

    #[test]
    fn version_full_and_minimal() {
        let mut engine = MockEngine::new();
        engine
            .expect_version_banner()
            .with(mockall::predicate::eq(false))
            .times(1)
            .returning(|_| "mvn 1.0\nmore".to_string());
        let r = run(engine, &["-v"]);
        assert_eq!(r.status, SUCCESS);
        assert_eq!(r.out, "mvn 1.0\nmore\n");

        let mut engine = MockEngine::new();
        engine
            .expect_version_banner()
            .with(mockall::predicate::eq(true))
            .times(1)
            .returning(|_| "mvn 1.0".to_string());
        let r = run(engine, &["-v", "-q"]);
        assert_eq!(r.status, SUCCESS);
        assert_eq!(r.out, "mvn 1.0\n");
    }

    #[test]
    fn version_skips_goals() {
        let mut engine = MockEngine::new();
        engine
            .expect_version_banner()
            .returning(|_| "mvn".to_string());
        engine.expect_execute().never();
        assert_eq!(run(engine, &["-v", "install"]).status, SUCCESS);
    }

    #[test]
    fn no_goals_is_an_error() {
        let r = run(MockEngine::new(), &[]);
        assert_eq!(r.status, FAILURE);
        assert_eq!(r.err, "No goals specified!\n");
        assert_eq!(r.out, cli::render_usage("mvn"));
    }

    #[test]
    fn execute_returns_engine_status_and_tears_down_colors() {
        let _lock = lock();
        let mut engine = MockEngine::new();
        engine
            .expect_execute()
            .withf(|options| options.goals == ["clean", "install"])
            .times(1)
            .returning(|_| {
                assert!(terminal::is_installed());
                Ok(3)
            });
        let r = run(engine, &["clean", "install", "--color", "never"]);
        assert_eq!(r.status, 3);
        assert!(!terminal::is_installed());
    }

    #[test]
    fn show_version_prints_full_banner_then_executes() {
        let _lock = lock();
        let mut seq = mockall::Sequence::new();
        let mut engine = MockEngine::new();
        engine
            .expect_version_banner()
            .with(mockall::predicate::eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| "mvn 1.0\nMaven home: /m".to_string());
        engine
            .expect_execute()
            .withf(|options| options.show_version && options.goals == ["clean"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SUCCESS));
        let r = run(engine, &["-V", "clean", "--color", "never"]);
        assert_eq!(r.status, SUCCESS);
        assert_eq!(r.out, "mvn 1.0\nMaven home: /m\n");
        assert!(r.err.is_empty());
    }

    #[test]
    fn execute_without_show_version_skips_banner() {
        let _lock = lock();
        let mut engine = MockEngine::new();
        engine.expect_version_banner().never();
        engine.expect_execute().returning(|_| Ok(SUCCESS));
        let r = run(engine, &["clean", "--color", "never"]);
        assert_eq!(r.status, SUCCESS);
        assert!(r.out.is_empty());
    }

    #[test]
    fn errors_are_printed_once_with_a_subscriber_installed() {
        let _lock = lock();
        let mut engine = MockEngine::new();
        engine
            .expect_execute()
            .returning(|_| Err(anyhow::anyhow!("pipeline exploded")));
        let mut r = None;
        let logged = crate::logging::capture::events(tracing::Level::WARN, || {
            r = Some(run(engine, &["verify", "--color", "never"]));
        });
        let r = r.unwrap();
        assert_eq!(r.status, FAILURE);
        assert_eq!(r.err, "[ERROR] pipeline exploded\n");
        assert!(logged.is_empty(), "{logged}");
    }

    #[test]
    fn legacy_start_failure_is_printed_once() {
        let mut engine = MockEngine::new();
        engine
            .expect_run_legacy()
            .returning(|_| Err(anyhow::anyhow!("failed to execute: /no/such")));
        let mut r = None;
        let logged = crate::logging::capture::events(tracing::Level::WARN, || {
            r = Some(run(engine, &["--legacy-cli", "clean"]));
        });
        let r = r.unwrap();
        assert_eq!(r.err.lines().count(), 1, "{}", r.err);
        assert!(logged.is_empty(), "{logged}");
    }

    #[test]
    fn execute_error_is_status_one_and_tears_down_colors() {
        let _lock = lock();
        let mut engine = MockEngine::new();
        engine
            .expect_execute()
            .returning(|_| Err(anyhow::anyhow!("pipeline exploded")));
        let r = run(engine, &["verify"]);
        assert_eq!(r.status, FAILURE);
        assert!(r.err.contains("pipeline exploded"));
        assert!(!terminal::is_installed());
    }
}
