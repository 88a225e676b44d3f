//! Logger construction.
//!
//! Loggers are built and returned by value; nothing is registered globally.
//! Callers pass the logger to whatever needs to log.

use std::io::{self, Write};

use slog::{Drain, Level, LevelFilter, Logger};

use crate::drain::RedactingDrain;
use crate::error::Result;
use crate::formatter::RedactingFormatter;

/// Fields redacted by [`get_logger`].
pub const PII_FIELDS: [&str; 5] = ["email", "phone", "ssn", "password", "name"];

/// Name carried by the logger [`get_logger`] returns.
pub const LOGGER_NAME: &str = "user_data";

/// Returns the `user_data` logger: INFO and above, redacting [`PII_FIELDS`],
/// written to stderr.
pub fn get_logger() -> Result<Logger> {
    let formatter = RedactingFormatter::new(PII_FIELDS)?;
    Ok(build_logger(io::stderr(), formatter, Level::Info))
}

/// Builds a logger named [`LOGGER_NAME`] that drops records below `level` and
/// writes the rest to `sink` through `formatter`.
///
/// A sink that fails to write panics the logging call, as `slog` does for fused
/// drains.
pub fn build_logger<W>(sink: W, formatter: RedactingFormatter, level: Level) -> Logger
where
    W: Write + Send + 'static,
{
    let drain = RedactingDrain::new(sink, formatter);
    let drain = LevelFilter::new(drain, level).fuse();
    Logger::root(drain, slog::o!("logger" => LOGGER_NAME))
}
