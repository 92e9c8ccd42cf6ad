//! JSON lines sink
//!
//! Each message becomes one line: `{"topic":..,"retain":..,"payload":{..}}`.

use std::fmt;
use std::io::{self, BufWriter, Stdout, Write};

use serde::Serialize;
use serde_json::Value;

use super::{Publisher, TransportError};

#[derive(Serialize)]
struct Envelope<'a> {
    topic: &'a str,
    retain: bool,
    payload: Value,
}

/// Writes each published message as a JSON line
pub struct JsonLinesPublisher<W: Write> {
    writer: W,
    messages_written: u64,
}

impl JsonLinesPublisher<BufWriter<Stdout>> {
    /// Publisher writing to standard output
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> JsonLinesPublisher<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, messages_written: 0 }
    }

    /// Number of lines written so far
    pub fn messages_written(&self) -> u64 {
        self.messages_written
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> fmt::Debug for JsonLinesPublisher<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLinesPublisher")
            .field("messages_written", &self.messages_written)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Publisher for JsonLinesPublisher<W> {
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), TransportError> {
        let envelope = Envelope { topic, retain, payload: serde_json::from_str(payload)? };
        serde_json::to_writer(&mut self.writer, &envelope)?;
        self.writer.write_all(b"\n")?;
        self.messages_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }
}
