//! Tracing subscriber setup: console formatter and initialisation.
use std::fmt::Write as _;

use crate::terminal;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "CLING_LOG";

/// Directive used when [`LOG_ENV`] is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Collects the `message` field and any structured fields of an event.
#[derive(Default)]
struct MessageExtractor {
    message: String,
    fields: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            write!(self.fields, " {}={value:?}", field.name()).ok();
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            write!(self.fields, " {}={value}", field.name()).ok();
        }
    }
}

/// Render one console line (without the trailing newline).
///
/// Plain output looks like `[WARNING] message key=value`; colored output
/// wraps only the level label in ANSI codes.
pub(super) fn render(level: tracing::Level, message: &str, fields: &str, colored: bool) -> String {
    let (label, color) = match level {
        tracing::Level::ERROR => ("ERROR", "\x1b[1;31m"),
        tracing::Level::WARN => ("WARNING", "\x1b[1;33m"),
        tracing::Level::INFO => ("INFO", "\x1b[1;34m"),
        tracing::Level::DEBUG => ("DEBUG", "\x1b[2m"),
        tracing::Level::TRACE => ("TRACE", "\x1b[2m"),
    };
    if colored {
        format!("[{color}{label}\x1b[0m] {message}{fields}")
    } else {
        format!("[{label}] {message}{fields}")
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits launcher-style
/// console output, colored while [`terminal`] says so.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let line = render(
            *event.metadata().level(),
            &extractor.message,
            &extractor.fields,
            terminal::is_colored(),
        );
        writeln!(writer, "{line}")
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Events are filtered by the directives in `CLING_LOG` (default `warn`) and
/// written to stderr. Calling this more than once is harmless; later calls
/// leave the first subscriber in place.
pub fn init_subscriber() {
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .ok();
}
