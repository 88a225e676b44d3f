//! Error types for filtering, formatting and row streaming.

use thiserror::Error;

/// Result type for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building filters or streaming rows.
///
/// Filtering itself never fails once a [`crate::FieldFilter`] is built.
#[derive(Error, Debug)]
pub enum Error {
    /// A field pattern could not be compiled.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A required configuration value is absent.
    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    /// The table name is not a plain identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),

    /// The database client reported an error.
    #[cfg(feature = "db")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O error while writing log lines or starting the runtime.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
