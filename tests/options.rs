#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the option model.
//!
//! These tests exercise [`cli::parse`] through the public API: the declared
//! option table, multi-letter abbreviations, optional booleans, repeatable
//! options, and the determinism of usage text.

mod common;

use common::{args, os_args};

use cling_cli::cli::{self, ChecksumPolicy, ColorMode, FailureBehavior, schema};

// ---------------------------------------------------------------------------
// Snapshot: declared options
// ---------------------------------------------------------------------------

/// Snapshot of every declared option with its short form, in table order.
///
/// Any addition, removal, or rename of an option fails this test, prompting a
/// deliberate snapshot update.
#[test]
fn option_names() {
    let names: Vec<String> = schema::OPTIONS
        .iter()
        .map(|spec| {
            let short = spec
                .short
                .map(|c| format!("-{c}"))
                .or_else(|| spec.abbrev.map(|a| format!("-{a}")))
                .unwrap_or_default();
            format!("--{} {short}", spec.long).trim_end().to_string()
        })
        .collect();
    insta::assert_snapshot!("option_names", names.join("\n"));
}

// ---------------------------------------------------------------------------
// Parsing through the public API
// ---------------------------------------------------------------------------

#[test]
fn typical_build_invocation() {
    let options = cli::parse(
        "mvn",
        &args(&[
            "-B",
            "-ntp",
            "-Prelease,!dev",
            "-pl",
            "core,api",
            "-am",
            "app",
            "-T",
            "1C",
            "-Drevision=1.2.3",
            "-Dskip",
            "clean",
            "deploy",
        ]),
    )
    .unwrap();

    assert!(options.non_interactive);
    assert!(!options.is_interactive());
    assert!(options.no_transfer_progress);
    assert_eq!(options.activated_profiles, ["release", "!dev"]);
    assert_eq!(options.projects, ["core", "api"]);
    assert_eq!(options.also_make, ["app"]);
    assert_eq!(options.threads.as_deref(), Some("1C"));
    assert_eq!(options.goals, ["clean", "deploy"]);

    let props = options.user_property_map();
    assert_eq!(props.get("revision").map(String::as_str), Some("1.2.3"));
    assert_eq!(props.get("skip").map(String::as_str), Some("true"));
}

#[test]
fn abbreviations_and_long_names_are_equivalent() {
    let short = cli::parse("mvn", &args(&["-fae", "-nsu", "-rf", ":api", "verify"])).unwrap();
    let long = cli::parse(
        "mvn",
        &args(&[
            "--fail-at-end",
            "--no-snapshot-updates",
            "--resume-from",
            ":api",
            "verify",
        ]),
    )
    .unwrap();

    assert_eq!(short.fail_at_end, long.fail_at_end);
    assert_eq!(short.suppress_snapshot_updates, long.suppress_snapshot_updates);
    assert_eq!(short.resume_from, long.resume_from);
    assert_eq!(short.goals, long.goals);
    assert_eq!(short.failure_behavior(), FailureBehavior::FailAtEnd);
}

#[test]
fn optional_boolean_only_absorbs_literal_booleans() {
    let explicit = cli::parse("mvn", &args(&["-canf", "false", "verify"])).unwrap();
    assert!(!explicit.cache_artifact_not_found);
    assert_eq!(explicit.goals, ["verify"]);

    let bare = cli::parse("mvn", &args(&["-sadp", "verify"])).unwrap();
    assert!(bare.strict_artifact_descriptor_policy);
    assert_eq!(bare.goals, ["verify"]);
}

#[test]
fn double_dash_ends_options() {
    let options = cli::parse("mvn", &args(&["--", "-pl", "x"])).unwrap();
    assert!(options.projects.is_empty());
    assert_eq!(options.goals, ["-pl", "x"]);
}

#[test]
fn checksum_and_color_views() {
    let options = cli::parse("mvn", &args(&["-C", "--color", "always", "verify"])).unwrap();
    assert_eq!(options.checksum_policy(), Some(ChecksumPolicy::Fail));
    assert_eq!(options.color, ColorMode::Always);

    let defaults = cli::parse("mvn", &args(&["verify"])).unwrap();
    assert_eq!(defaults.checksum_policy(), None);
    assert_eq!(defaults.color, ColorMode::Auto);
    assert_eq!(defaults.failure_behavior(), FailureBehavior::FailFast);
}

#[test]
fn raw_args_are_preserved_verbatim() {
    let list = args(&["-pl", "a", "--legacy-cli", "-Dx=1", "install"]);
    let options = cli::parse("mvn", &list).unwrap();
    assert_eq!(options.raw_args, os_args(&["-pl", "a", "--legacy-cli", "-Dx=1", "install"]));
    assert_eq!(options.legacy_args(), os_args(&["-pl", "a", "-Dx=1", "install"]));
    assert_eq!(options.command_name, "mvn");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn unknown_option_is_rejected() {
    let err = cli::parse("mvn", &args(&["--no-such-option", "verify"])).unwrap_err();
    assert!(err.message().contains("--no-such-option"), "{err}");
    assert!(!err.message().contains('\n'));
}

#[test]
fn abbreviations_only_exist_with_a_single_dash() {
    let err = cli::parse("mvn", &args(&["--pl", "x", "verify"])).unwrap_err();
    assert!(err.message().contains("--pl"), "{err}");
    assert!(cli::parse("mvn", &args(&["--amd", "verify"])).is_err());
}

#[test]
fn missing_value_is_rejected() {
    assert!(cli::parse("mvn", &args(&["-f"])).is_err());
    assert!(cli::parse("mvn", &args(&["-pl"])).is_err());
}

#[test]
fn invalid_threads_are_rejected() {
    for bad in ["0", "-1", "C", "abc", "1.5"] {
        assert!(
            cli::parse("mvn", &args(&["-T", bad, "verify"])).is_err(),
            "threads '{bad}' should be rejected"
        );
    }
}

#[test]
fn invalid_color_is_rejected() {
    assert!(cli::parse("mvn", &args(&["--color", "sometimes", "verify"])).is_err());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Parsing the same vector twice yields equal results.
#[test]
fn parsing_is_deterministic() {
    let list = args(&["-X", "-e", "-P", "a", "-D", "k=v", "-amd", "-pl", "m", "package"]);
    assert_eq!(
        cli::parse("mvn", &list).unwrap(),
        cli::parse("mvn", &list).unwrap()
    );
}

/// Goals come back in the order given, interleaved options notwithstanding.
#[test]
fn goal_order_is_preserved() {
    let options = cli::parse(
        "mvn",
        &args(&["clean", "-o", "compile", "-q", "test", "-N", "package"]),
    )
    .unwrap();
    assert_eq!(options.goals, ["clean", "compile", "test", "package"]);
}

/// The usage text is identical across calls and names every long option
/// and every abbreviation as it is typed.
#[test]
fn usage_is_deterministic_and_complete() {
    let usage = cli::render_usage("mvn");
    assert_eq!(usage, cli::render_usage("mvn"));
    assert!(!usage.contains('\x1b'));
    for spec in schema::OPTIONS {
        assert!(
            usage.contains(&format!("--{}", spec.long)),
            "usage is missing --{}",
            spec.long
        );
        if let Some(abbrev) = spec.abbrev {
            assert!(
                usage.contains(&format!("-{abbrev}, ")),
                "usage is missing -{abbrev}"
            );
        }
    }
}
