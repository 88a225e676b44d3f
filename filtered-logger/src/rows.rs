//! Turning tabular rows into `field=value; ` records.

use std::fmt::Display;

use slog::Logger;

/// Separator placed between pairs of a formatted row.
pub const ROW_SEPARATOR: &str = "; ";

/// Zips column names with values in column order.
///
/// Pairs are joined with [`ROW_SEPARATOR`]; no separator trails the last pair.
/// If the two slices differ in length the extra entries are ignored.
///
/// ```rust
/// use filtered_logger::format_row;
///
/// assert_eq!(format_row(&["id", "email"], &["1", "a@b.com"]), "id=1; email=a@b.com");
/// ```
pub fn format_row<C, V>(columns: &[C], values: &[V]) -> String
where
    C: AsRef<str>,
    V: Display,
{
    columns
        .iter()
        .zip(values)
        .map(|(column, value)| format!("{}={value}", column.as_ref()))
        .collect::<Vec<_>>()
        .join(ROW_SEPARATOR)
}

/// Logs one row at INFO.
pub fn log_row<C, V>(logger: &Logger, columns: &[C], values: &[V])
where
    C: AsRef<str>,
    V: Display,
{
    slog::info!(logger, "{}", format_row(columns, values));
}

/// Logs every row at INFO and returns how many were logged.
pub fn log_rows<C, V, R, I>(logger: &Logger, columns: &[C], rows: I) -> usize
where
    C: AsRef<str>,
    V: Display,
    R: AsRef<[V]>,
    I: IntoIterator<Item = R>,
{
    let mut count = 0;
    for row in rows {
        log_row(logger, columns, row.as_ref());
        count += 1;
    }
    count
}
