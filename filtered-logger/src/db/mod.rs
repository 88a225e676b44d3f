//! MySQL glue: typed connection settings and table streaming.
//!
//! A connection lives for exactly one [`stream_table`] call and is closed
//! before any error is returned, including a failure halfway through the rows.

mod config;
mod stream;

pub use config::{
    DbConfig, DEFAULT_HOST, DEFAULT_USERNAME, HOST_VAR, NAME_VAR, PASSWORD_VAR, USERNAME_VAR,
};
pub use stream::{stream_table, SqlValue, TableName, NULL_TEXT};
