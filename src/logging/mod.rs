//! Logging infrastructure: `tracing` events rendered as `[LEVEL] message`
//! lines on stderr.

mod subscriber;

pub use subscriber::{LOG_ENV, init_subscriber};

#[cfg(test)]
pub(crate) use subscriber::capture;
