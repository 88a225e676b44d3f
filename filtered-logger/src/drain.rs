//! `slog` drain writing redacted lines to an `io::Write` sink.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use slog::{Drain, OwnedKVList, Record};

use crate::formatter::RedactingFormatter;

/// A drain that formats every record with a [`RedactingFormatter`] and writes
/// one line per record to `sink`.
///
/// Writes are serialized through a mutex. A poisoned mutex is recovered rather
/// than dropping lines.
pub struct RedactingDrain<W> {
    formatter: RedactingFormatter,
    sink: Mutex<W>,
}

impl<W: Write> RedactingDrain<W> {
    pub fn new(sink: W, formatter: RedactingFormatter) -> Self {
        Self {
            formatter,
            sink: Mutex::new(sink),
        }
    }

    /// Returns the sink, consuming the drain.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> Drain for RedactingDrain<W> {
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> io::Result<()> {
        let line = self.formatter.format(record, values);
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(sink, "{line}")?;
        sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use slog::{Drain, Level, OwnedKVList};

    use super::RedactingDrain;
    use crate::formatter::RedactingFormatter;

    static RS: slog::RecordStatic<'static> = slog::record_static!(Level::Warning, "");

    #[test]
    fn writes_one_redacted_line_per_record() {
        let formatter = RedactingFormatter::new(["ssn"]).unwrap();
        let drain = RedactingDrain::new(Vec::new(), formatter);
        let values = OwnedKVList::from(slog::o!("logger" => "audit"));

        let first = format_args!("ssn=111-22-3333;id=1;");
        drain
            .log(&slog::Record::new(&RS, &first, slog::b!()), &values)
            .unwrap();
        let second = format_args!("id=2;");
        drain
            .log(&slog::Record::new(&RS, &second, slog::b!()), &values)
            .unwrap();

        let written = String::from_utf8(drain.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[HOLBERTON] audit WARNING "));
        assert!(lines[0].ends_with(": ssn=***;id=1;"));
        assert!(lines[1].ends_with(": id=2;"));
    }
}
