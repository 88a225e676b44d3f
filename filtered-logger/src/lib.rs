//! Field-aware redaction for `key=value` log records.
//!
//! This crate separates:
//! - **Filtering**: rewriting `field=value;` pairs so configured fields carry a
//!   placeholder instead of their value.
//! - **Formatting**: rendering a `slog` record into a single line after its
//!   message has been filtered.
//!
//! The [`RedactingFormatter`] is the only place PII is stripped. Every line that
//! reaches a sink through [`RedactingDrain`] has already been filtered.
//!
//! Key rules:
//! - Field names match exactly and case-sensitively, and only at the start of
//!   the message or right after a separator (whitespace allowed in between).
//! - A value ends at the first separator, or at the end of the message.
//! - Text that does not look like `field=value` passes through unchanged.
//!
//! What this crate does:
//! - provides [`filter_datum`] and the precompiled [`FieldFilter`]
//! - provides the formatter, drain and logger constructors over `slog`
//! - formats tabular rows into records and, behind the `db` feature, streams
//!   MySQL tables through the logger
//!
//! What it does not do:
//! - detect PII in free text
//! - parse nested or multi-valued fields

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::use_self
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod drain;
mod error;
mod filter;
mod format;
mod formatter;
mod logger;
mod rows;

#[cfg(feature = "db")]
pub mod db;

// Re-exports
pub use drain::RedactingDrain;
pub use error::{Error, Result};
pub use filter::{filter_datum, FieldFilter};
pub use format::{Layout, LineFormat, LogLine, DEFAULT_PREFIX, LOGGER_KEY};
pub use formatter::RedactingFormatter;
pub use logger::{build_logger, get_logger, LOGGER_NAME, PII_FIELDS};
pub use rows::{format_row, log_row, log_rows, ROW_SEPARATOR};
