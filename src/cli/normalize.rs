//! Rewrites raw tokens into a form clap understands.
//!
//! clap only knows single-character short flags, so multi-letter single-dash
//! abbreviations (`-pl`, `-amd`, `-canf`) are rewritten to their canonical
//! `--long` form. Optional boolean options absorb a following `true`/`false`
//! token as `--long=<bool>`, since clap needs `require_equals` to keep them
//! from swallowing goals.
//!
//! Everything after `--` and every token consumed as an option value is
//! passed through untouched.
use super::schema::{self, Arity, OptionSpec};

/// Rewrite `args` for the clap command built from [`schema::OPTIONS`].
#[must_use]
pub fn normalize(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut tokens = args.iter().peekable();

    while let Some(token) = tokens.next() {
        if token == "--" {
            out.push(token.clone());
            out.extend(tokens.by_ref().cloned());
            break;
        }

        let Some((spec, name, inline)) = lookup(token) else {
            out.push(token.clone());
            continue;
        };

        match (spec.arity, inline) {
            (_, Some(value)) => out.push(format!("{name}={value}")),
            (Arity::OptionalBool { .. }, None) => {
                match tokens.next_if(|next| is_bool_literal(next)) {
                    Some(value) => out.push(format!("{name}={}", value.to_ascii_lowercase())),
                    None => out.push(name),
                }
            }
            (arity, None) if arity.takes_value() => {
                out.push(name);
                if let Some(value) = tokens.next() {
                    out.push(value.clone());
                }
            }
            (_, None) => out.push(name),
        }
    }

    out
}

/// Resolve `token` to its option, the name to emit and any `=value` suffix.
///
/// Long forms and single-character shorts keep their spelling; abbreviations
/// become `--<long>`. Clustered or attached short forms (`-qX`, `-Dk=v`) are
/// not options on their own and return `None`.
fn lookup(token: &str) -> Option<(&'static OptionSpec, String, Option<&str>)> {
    let (name, inline) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    };

    if let Some(long) = name.strip_prefix("--") {
        let spec = schema::find_long(long)?;
        return Some((spec, name.to_string(), inline));
    }

    let short = name.strip_prefix('-')?;
    if let Some(spec) = schema::find_abbrev(short) {
        return Some((spec, format!("--{}", spec.long), inline));
    }

    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => schema::find_short(c).map(|spec| (spec, name.to_string(), inline)),
        _ => None,
    }
}

fn is_bool_literal(token: &str) -> bool {
    token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false")
}
