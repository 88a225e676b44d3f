//! The redacting formatter: filter first, then lay out.

use slog::{OwnedKVList, Record};

use crate::error::Result;
use crate::filter::FieldFilter;
use crate::format::{Layout, LineFormat};

/// Formats `slog` records after redacting configured fields from their message.
///
/// The field set, [`RedactingFormatter::REDACTION`] token and
/// [`RedactingFormatter::SEPARATOR`] are fixed for the lifetime of the
/// formatter. The unfiltered message is never handed to the layout.
#[derive(Clone, Debug)]
pub struct RedactingFormatter {
    filter: FieldFilter,
    line: LineFormat,
}

impl RedactingFormatter {
    /// Placeholder written in place of a redacted value.
    pub const REDACTION: &'static str = "***";
    /// Separator terminating each `field=value` pair.
    pub const SEPARATOR: &'static str = ";";

    /// Creates a formatter using the default `[HOLBERTON]` text layout.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_layout(fields, Layout::default())
    }

    /// Creates a formatter rendering with `layout`.
    pub fn with_layout<I, S>(fields: I, layout: Layout) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            filter: FieldFilter::new(fields, Self::REDACTION, Self::SEPARATOR)?,
            line: LineFormat::new(layout),
        })
    }

    /// The configured field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.filter.fields()
    }

    /// Applies the field filter alone.
    #[must_use]
    pub fn redact(&self, message: &str) -> String {
        self.filter.apply(message)
    }

    /// Renders the record's message, redacts it and lays out the final line.
    #[must_use]
    pub fn format(&self, record: &Record<'_>, values: &OwnedKVList) -> String {
        let message = self.redact(&record.msg().to_string());
        self.line.format(record, values, &message)
    }
}
