//! Line layouts for log records.
//!
//! A layout only renders. It receives the message text separately from the
//! record so callers decide what text a sink is allowed to see.

use std::borrow::Cow;
use std::fmt;

use chrono::Local;
use slog::{Key, Level, OwnedKVList, Record, Serializer, KV};

/// Prefix of the default text layout.
pub const DEFAULT_PREFIX: &str = "[HOLBERTON]";

/// Key-value under which a logger carries its name.
pub const LOGGER_KEY: &str = "logger";

const ROOT_NAME: &str = "root";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// How a [`LogLine`] is turned into text.
// `Cow` lets the default prefix stay borrowed.
#[derive(Clone, Debug)]
pub enum Layout {
    /// `<prefix> <logger> <LEVEL> <timestamp>: <message>`
    Text {
        /// Leading marker of every line.
        prefix: Cow<'static, str>,
    },
    /// One JSON object per line with `logger`, `level`, `timestamp` and
    /// `message` keys.
    #[cfg(feature = "json")]
    Json,
}

impl Layout {
    /// Constructs [`Layout::Text`] using [`DEFAULT_PREFIX`].
    #[must_use]
    pub fn default_text() -> Self {
        Self::Text {
            prefix: Cow::Borrowed(DEFAULT_PREFIX),
        }
    }

    /// Constructs [`Layout::Text`] using a custom prefix.
    #[must_use]
    pub fn text_with<P>(prefix: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Text {
            prefix: prefix.into(),
        }
    }

    /// Renders a line without a trailing newline.
    #[must_use]
    pub fn render(&self, line: &LogLine<'_>) -> String {
        match self {
            Layout::Text { prefix } => format!(
                "{prefix} {} {} {}: {}",
                line.logger, line.level, line.timestamp, line.message
            ),
            #[cfg(feature = "json")]
            Layout::Json => serde_json::to_string(line)
                .unwrap_or_else(|_| String::from("{\"error\":\"Failed to serialize log line\"}")),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::default_text()
    }
}

/// The parts of a rendered line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct LogLine<'a> {
    /// Logger name, or `root` when the logger carries none.
    pub logger: Cow<'a, str>,
    /// Level name, e.g. `INFO`.
    pub level: &'static str,
    /// Local time with millisecond precision.
    pub timestamp: String,
    /// The (already filtered) message.
    pub message: &'a str,
}

/// The standard formatter: fills a [`LogLine`] from a record and renders it
/// with a [`Layout`].
#[derive(Clone, Debug, Default)]
pub struct LineFormat {
    layout: Layout,
}

impl LineFormat {
    /// Creates a formatter with the given layout.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Text layout with a custom prefix.
    #[must_use]
    pub fn with_prefix<P>(prefix: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::new(Layout::text_with(prefix))
    }

    /// Renders `record` with `message` in place of the record's own message.
    #[must_use]
    pub fn format(&self, record: &Record<'_>, values: &OwnedKVList, message: &str) -> String {
        let line = LogLine {
            logger: logger_name(record, values),
            level: level_name(record.level()),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            message,
        };
        self.layout.render(&line)
    }
}

/// Level names as conventional logging front-ends print them.
fn level_name(level: Level) -> &'static str {
    match level {
        Level::Critical => "CRITICAL",
        Level::Error => "ERROR",
        Level::Warning => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn logger_name(record: &Record<'_>, values: &OwnedKVList) -> Cow<'static, str> {
    let mut finder = NameFinder::default();
    // The finder never fails; a serializer error only means no name.
    if values.serialize(record, &mut finder).is_err() {
        return Cow::Borrowed(ROOT_NAME);
    }
    finder.name.map_or(Cow::Borrowed(ROOT_NAME), Cow::Owned)
}

/// Picks the first `logger` value out of a key-value list.
#[derive(Default)]
struct NameFinder {
    name: Option<String>,
}

impl Serializer for NameFinder {
    fn emit_arguments(&mut self, key: Key, val: &fmt::Arguments<'_>) -> slog::Result {
        if self.name.is_none() && key == LOGGER_KEY {
            self.name = Some(val.to_string());
        }
        Ok(())
    }

    fn emit_str(&mut self, key: Key, val: &str) -> slog::Result {
        if self.name.is_none() && key == LOGGER_KEY {
            self.name = Some(val.to_owned());
        }
        Ok(())
    }
}
