//! Streams the rows of one table into a logger.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures_util::TryStreamExt;
use slog::Logger;
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::types::{Decimal, JsonValue};
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};

use super::config::DbConfig;
use crate::error::{Error, Result};
use crate::rows::log_row;

/// Text logged for SQL `NULL`.
pub const NULL_TEXT: &str = "None";

/// A table name safe to splice into `SELECT * FROM`.
///
/// Only ASCII letters, digits and `_` are accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> Result<Self> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        if valid {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::InvalidTable(name.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Logs every row of `table` at INFO and returns the number of rows logged.
///
/// Once connected, the connection is closed before any error is returned; if
/// both the stream and the close fail, the stream error is returned. A panic raised
/// while logging a row (a fused drain whose sink fails) unwinds past the close,
/// and the socket is then released when the connection is dropped.
pub async fn stream_table(config: &DbConfig, table: &str, logger: &Logger) -> Result<usize> {
    let table = TableName::parse(table)?;
    let mut conn = MySqlConnection::connect_with(&config.connect_options()).await?;

    let streamed = log_table(&mut conn, &table, logger).await;
    let closed = conn.close().await;

    let count = streamed?;
    closed?;
    Ok(count)
}

async fn log_table(conn: &mut MySqlConnection, table: &TableName, logger: &Logger) -> Result<usize> {
    let sql = format!("SELECT * FROM `{}`;", table.as_str());
    let mut rows = sqlx::query(&sql).fetch(&mut *conn);

    let mut names: Option<Vec<String>> = None;
    let mut count = 0;
    while let Some(row) = rows.try_next().await? {
        let columns = names.get_or_insert_with(|| column_names(&row));
        let values = row_values(&row)?;
        log_row(logger, columns.as_slice(), values.as_slice());
        count += 1;
    }
    Ok(count)
}

fn column_names(row: &MySqlRow) -> Vec<String> {
    row.columns()
        .iter()
        .map(|column| column.name().to_owned())
        .collect()
}

fn row_values(row: &MySqlRow) -> Result<Vec<SqlValue>> {
    (0..row.len()).map(|index| decode_value(row, index)).collect()
}

/// A column value decoded from a row, ready to be logged.
///
/// `Display` gives the text that appears after `name=` in a logged row.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`, logged as [`NULL_TEXT`].
    Null,
    Text(String),
    Int(i64),
    UInt(u64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Decimal(Decimal),
    Json(JsonValue),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Binary data, logged lossily as UTF-8.
    Bytes(Vec<u8>),
    /// A column type with no text form here, logged as `<TYPE>`.
    Unsupported(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str(NULL_TEXT),
            SqlValue::Text(text) => f.write_str(text),
            SqlValue::Int(v) => fmt::Display::fmt(v, f),
            SqlValue::UInt(v) => fmt::Display::fmt(v, f),
            SqlValue::Double(v) => fmt::Display::fmt(v, f),
            SqlValue::Float(v) => fmt::Display::fmt(v, f),
            SqlValue::Bool(v) => fmt::Display::fmt(v, f),
            SqlValue::Decimal(v) => fmt::Display::fmt(v, f),
            SqlValue::Json(v) => fmt::Display::fmt(v, f),
            SqlValue::DateTime(v) => fmt::Display::fmt(v, f),
            SqlValue::Date(v) => fmt::Display::fmt(v, f),
            SqlValue::Time(v) => fmt::Display::fmt(v, f),
            SqlValue::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            SqlValue::Unsupported(type_name) => write!(f, "<{type_name}>"),
        }
    }
}

fn decode_value(row: &MySqlRow, index: usize) -> Result<SqlValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let type_name = raw.type_info().name().to_owned();

    Ok(decode_typed(row, index).unwrap_or(SqlValue::Unsupported(type_name)))
}

// Integers come before `bool` so TINYINT(1) logs as `0`/`1`.
fn decode_typed(row: &MySqlRow, index: usize) -> Option<SqlValue> {
    row.try_get::<String, _>(index)
        .ok()
        .map(SqlValue::Text)
        .or_else(|| row.try_get::<i64, _>(index).ok().map(SqlValue::Int))
        .or_else(|| row.try_get::<u64, _>(index).ok().map(SqlValue::UInt))
        .or_else(|| row.try_get::<f64, _>(index).ok().map(SqlValue::Double))
        .or_else(|| row.try_get::<f32, _>(index).ok().map(SqlValue::Float))
        .or_else(|| row.try_get::<bool, _>(index).ok().map(SqlValue::Bool))
        .or_else(|| row.try_get::<Decimal, _>(index).ok().map(SqlValue::Decimal))
        .or_else(|| row.try_get::<JsonValue, _>(index).ok().map(SqlValue::Json))
        .or_else(|| {
            row.try_get::<NaiveDateTime, _>(index)
                .ok()
                .map(SqlValue::DateTime)
        })
        .or_else(|| {
            row.try_get::<DateTime<Utc>, _>(index)
                .ok()
                .map(|v| SqlValue::DateTime(v.naive_utc()))
        })
        .or_else(|| row.try_get::<NaiveDate, _>(index).ok().map(SqlValue::Date))
        .or_else(|| row.try_get::<NaiveTime, _>(index).ok().map(SqlValue::Time))
        .or_else(|| row.try_get::<Vec<u8>, _>(index).ok().map(SqlValue::Bytes))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use sqlx::types::Decimal;

    use super::{SqlValue, TableName};
    use crate::error::Error;
    use crate::rows::format_row;

    #[test]
    fn plain_identifiers_are_accepted() {
        assert_eq!(TableName::parse("users").unwrap().as_str(), "users");
        assert_eq!(TableName::parse("user_data_2").unwrap().as_str(), "user_data_2");
    }

    #[test]
    fn anything_else_is_rejected() {
        for name in ["", "users;", "users; DROP TABLE users", "a-b", "`users`", "ünïcode"] {
            let err = TableName::parse(name).unwrap_err();
            assert!(matches!(err, Error::InvalidTable(ref n) if n == name));
        }
    }

    #[test]
    fn null_logs_as_none() {
        assert_eq!(SqlValue::Null.to_string(), "None");
    }

    #[test]
    fn numbers_keep_their_full_range() {
        assert_eq!(SqlValue::UInt(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(SqlValue::Int(-42).to_string(), "-42");
        assert_eq!(SqlValue::Double(0.5).to_string(), "0.5");
        assert_eq!(SqlValue::Float(0.1).to_string(), "0.1");
    }

    #[test]
    fn decimals_keep_their_scale() {
        assert_eq!(SqlValue::Decimal(Decimal::new(1250, 2)).to_string(), "12.50");
    }

    #[test]
    fn datetime_uses_sql_text_form() {
        let at = NaiveDate::from_ymd_opt(2019, 11, 14)
            .and_then(|date| date.and_hms_opt(6, 16, 24))
            .unwrap();
        assert_eq!(SqlValue::DateTime(at).to_string(), "2019-11-14 06:16:24");
        assert_eq!(
            SqlValue::Date(NaiveDate::from_ymd_opt(2019, 11, 14).unwrap()).to_string(),
            "2019-11-14"
        );
        assert_eq!(
            SqlValue::Time(NaiveTime::from_hms_opt(6, 16, 24).unwrap()).to_string(),
            "06:16:24"
        );
    }

    #[test]
    fn json_is_compact() {
        let value = serde_json::json!({"plan": "pro"});
        assert_eq!(SqlValue::Json(value).to_string(), r#"{"plan":"pro"}"#);
    }

    #[test]
    fn invalid_utf8_bytes_are_replaced() {
        let blob = SqlValue::Bytes(vec![b'a', 0xff, b'b']);
        assert_eq!(blob.to_string(), "a\u{FFFD}b");
    }

    #[test]
    fn unknown_types_show_their_name() {
        assert_eq!(
            SqlValue::Unsupported("GEOMETRY".to_owned()).to_string(),
            "<GEOMETRY>"
        );
    }

    #[test]
    fn decoded_row_feeds_the_row_adapter() {
        let values = [
            SqlValue::Int(1),
            SqlValue::Text("a@b.com".to_owned()),
            SqlValue::Null,
        ];
        assert_eq!(
            format_row(&["id", "email", "deleted_at"], &values),
            "id=1; email=a@b.com; deleted_at=None"
        );
    }
}
