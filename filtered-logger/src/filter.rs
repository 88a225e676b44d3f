//! The redaction transform over `field=value<separator>` text.
//!
//! Filters are pure string transformations. They do not know about log records,
//! levels or sinks; [`crate::RedactingFormatter`] wires them into `slog`.

use regex::Regex;

use crate::error::Result;

/// A set of field patterns compiled once and applied to many messages.
///
/// The field list, redaction token and separator are fixed at construction.
/// Applying the filter takes `&self`, so one instance can be shared freely.
#[derive(Clone, Debug)]
pub struct FieldFilter {
    patterns: Vec<FieldPattern>,
    redaction: String,
    separator: String,
}

#[derive(Clone, Debug)]
struct FieldPattern {
    field: String,
    regex: Regex,
}

impl FieldFilter {
    /// Compiles one pattern per field.
    ///
    /// Field names are escaped, so they match literally. Empty names are
    /// skipped. An empty separator yields a filter that changes nothing.
    pub fn new<I, S>(fields: I, redaction: &str, separator: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = if separator.is_empty() {
            Vec::new()
        } else {
            fields
                .into_iter()
                .filter(|field| !field.as_ref().is_empty())
                .map(|field| FieldPattern::compile(field.as_ref(), separator))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            patterns,
            redaction: redaction.to_owned(),
            separator: separator.to_owned(),
        })
    }

    /// Returns the configured field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.field.as_str())
    }

    /// Returns the redaction token.
    pub fn redaction(&self) -> &str {
        &self.redaction
    }

    /// Returns the separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Applies every field pattern in order, each to the output of the previous one.
    ///
    /// This method is total (it does not return errors).
    #[must_use]
    pub fn apply(&self, message: &str) -> String {
        let mut current = message.to_owned();
        for pattern in &self.patterns {
            current = pattern.redact(&current, &self.redaction, &self.separator);
        }
        current
    }
}

impl FieldPattern {
    fn compile(field: &str, separator: &str) -> Result<Self> {
        // Lazy value, terminated by the separator or the end of the message.
        let source = format!(
            "{}=(?s:.*?)(?:(?P<sep>{})|$)",
            regex::escape(field),
            regex::escape(separator)
        );
        Ok(Self {
            field: field.to_owned(),
            regex: Regex::new(&source)?,
        })
    }

    fn redact(&self, message: &str, redaction: &str, separator: &str) -> String {
        let mut out = String::with_capacity(message.len());
        let mut copied = 0;

        for caps in self.regex.captures_iter(message) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if !at_field_boundary(&message[..whole.start()], separator) {
                continue;
            }

            out.push_str(&message[copied..whole.start()]);
            out.push_str(&self.field);
            out.push('=');
            out.push_str(redaction);
            if caps.name("sep").is_some() {
                out.push_str(separator);
            }
            copied = whole.end();
        }

        out.push_str(&message[copied..]);
        out
    }
}

/// A field starts a pair when nothing but whitespace separates it from the
/// start of the message or from the previous separator.
fn at_field_boundary(before: &str, separator: &str) -> bool {
    if before.is_empty() || before.ends_with(separator) {
        return true;
    }
    let trimmed = before.trim_end();
    trimmed.is_empty() || trimmed.ends_with(separator)
}

/// Redacts the values of `fields` in `message`.
///
/// Every `field=<value><separator>` becomes `field=<redaction><separator>`. The
/// value stops at the first separator, so later pairs are never swallowed. A
/// final pair without a trailing separator is redacted up to the end of the
/// message.
///
/// If the field patterns cannot be compiled the bare `redaction` token is
/// returned, never the unfiltered message.
///
/// ```rust
/// use filtered_logger::filter_datum;
///
/// let out = filter_datum(&["b"], "***", "a=1;b=2;c=3;", ";");
/// assert_eq!(out, "a=1;b=***;c=3;");
/// ```
#[must_use]
pub fn filter_datum<S>(fields: &[S], redaction: &str, message: &str, separator: &str) -> String
where
    S: AsRef<str>,
{
    match FieldFilter::new(fields, redaction, separator) {
        Ok(filter) => filter.apply(message),
        Err(_) => redaction.to_owned(),
    }
}
