// Shared helpers for integration tests.
//
// Provides argument-vector helpers, a temporary installation/user layout, and
// a recording engine so each integration test can drive the launcher without
// touching the real process environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cling_cli::cli::OptionSet;
use cling_cli::commands::Environment;
use cling_cli::launcher::{Engine, Launcher};
use cling_cli::platform::Platform;

/// Convert string literals to an owned argument vector.
pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Convert string literals to raw OS arguments.
pub fn os_args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
}

/// An isolated installation root and user home backed by a
/// [`tempfile::TempDir`].
///
/// ```text
/// <tmp>/maven/bin
/// <tmp>/maven/conf/settings.xml
/// <tmp>/home/.m2
/// ```
#[derive(Debug)]
pub struct Layout {
    pub dir: tempfile::TempDir,
}

impl Layout {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let maven = dir.path().join("maven");
        std::fs::create_dir_all(maven.join("bin")).expect("create bin");
        std::fs::create_dir_all(maven.join("conf")).expect("create conf");
        std::fs::write(maven.join("conf").join("settings.xml"), "<settings/>")
            .expect("write settings.xml");
        std::fs::create_dir_all(dir.path().join("home").join(".m2")).expect("create .m2");
        Self { dir }
    }

    pub fn maven_home(&self) -> PathBuf {
        self.dir.path().join("maven")
    }

    pub fn user_home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// An [`Environment`] pointing at this layout.
    pub fn environment(&self) -> Environment {
        Environment {
            maven_home: Some(self.maven_home()),
            user_home: Some(self.user_home()),
            legacy_launcher: None,
            current_exe: None,
            platform: Platform::detect(),
        }
    }
}

/// What a [`RecordingEngine`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Legacy(Vec<OsString>),
    Banner(bool),
    Execute(Vec<String>),
}

/// An [`Engine`] that records its calls and returns canned results.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: RefCell<Vec<Call>>,
    pub legacy_status: i32,
    pub execute_status: i32,
}

impl Engine for RecordingEngine {
    fn run_legacy(&self, args: Vec<OsString>) -> anyhow::Result<i32> {
        self.calls.borrow_mut().push(Call::Legacy(args));
        Ok(self.legacy_status)
    }

    fn version_banner(&self, minimal: bool) -> String {
        self.calls.borrow_mut().push(Call::Banner(minimal));
        if minimal {
            "mvn 0.0.0".to_string()
        } else {
            "mvn 0.0.0\nMaven home: /opt/maven".to_string()
        }
    }

    fn execute(&self, options: &OptionSet) -> anyhow::Result<i32> {
        self.calls
            .borrow_mut()
            .push(Call::Execute(options.goals.clone()));
        Ok(self.execute_status)
    }
}

/// Captured result of one launcher run.
#[derive(Debug)]
pub struct Outcome {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run `launcher` on `list` with in-memory output streams.
pub fn run<E: Engine>(launcher: &Launcher<E>, list: &[&str]) -> Outcome {
    run_os(launcher, &os_args(list))
}

/// Run `launcher` on raw OS arguments with in-memory output streams.
pub fn run_os<E: Engine>(launcher: &Launcher<E>, list: &[OsString]) -> Outcome {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = launcher.run(list, &mut out, &mut err);
    Outcome {
        status,
        stdout: String::from_utf8(out).expect("utf-8 stdout"),
        stderr: String::from_utf8(err).expect("utf-8 stderr"),
    }
}
