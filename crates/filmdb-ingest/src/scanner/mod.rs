//! Line scanners for the list dumps
//!
//! Each scanner makes one pass over its input and reports what it finds to a
//! sink, synchronously and in document order. Nothing is buffered between
//! events: the `&str` arguments borrow the scanner's line buffer and are only
//! valid for the duration of the call.
//!
//! # Line handling
//!
//! Lines end at `\n` (a preceding `\r` is dropped too). Each line is read into
//! a buffer of `max_line` bytes; a line that fills the buffer is rejected with
//! [`FormatError::LineOverflow`] and the scan stops.

use filmdb_common::{FilmdbError, FormatError, Result};
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::config::{IngestConfig, TextEncoding};

pub mod actor;
pub mod movie;

pub use actor::ActorScanner;
pub use movie::MovieScanner;

/// Receives events from a [`MovieScanner`]
pub trait MovieSink {
    /// A title line was found
    fn on_movie(&mut self, _title: &str) -> Result<()> {
        Ok(())
    }

    /// The title and its year field
    fn on_row(&mut self, title: &str, year: &str) -> Result<()>;
}

/// Receives events from an [`ActorScanner`]
pub trait ActorSink {
    /// A new actor block starts with this name
    fn on_actor(&mut self, name: &str) -> Result<()>;

    /// One production in the current actor's block
    fn on_row(&mut self, actor: &str, production: &str, role: &str) -> Result<()>;
}

/// Why a scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanEnd {
    /// The section terminator line was reached
    SectionEnd,
    /// Input ran out after the preamble
    EndOfInput,
    /// Input ran out before the preamble was complete
    TruncatedPreamble,
}

/// Counts from a completed scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Lines read, including the preamble and the terminator line
    pub lines: usize,
    /// `on_row` events emitted
    pub rows: usize,
    /// `on_movie` / `on_actor` events emitted
    pub declarations: usize,
    pub end: ScanEnd,
}

impl ScanSummary {
    fn new(end: ScanEnd) -> Self {
        Self {
            lines: 0,
            rows: 0,
            declarations: 0,
            end,
        }
    }
}

/// Boxed reader over a list file
pub type Input = Box<dyn BufRead + Send>;

/// Open a list file, gunzipping it if the name ends in `.gz`
pub fn open_input(path: &Path) -> Result<Input> {
    let file = File::open(path).map_err(|e| FilmdbError::open(path, e))?;

    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// One decoded line, without its terminator
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Bounded, reusable line buffer over a reader
pub(crate) struct LineReader<R> {
    reader: R,
    raw: Vec<u8>,
    text: String,
    line: usize,
    capacity: usize,
    encoding: TextEncoding,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, config: &IngestConfig) -> Self {
        Self {
            reader,
            raw: Vec::with_capacity(config.max_line),
            text: String::with_capacity(config.max_line),
            line: 0,
            capacity: config.max_line,
            encoding: config.encoding,
        }
    }

    /// Number of lines read so far
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Read the next line; `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<Line<'_>>> {
        self.raw.clear();

        let limit = self.capacity.saturating_sub(1).max(1);
        let read = self
            .reader
            .by_ref()
            .take(limit as u64)
            .read_until(b'\n', &mut self.raw)?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;

        if read >= limit {
            return Err(FormatError::LineOverflow {
                line: self.line,
                capacity: self.capacity,
            }
            .into());
        }

        if self.raw.last() == Some(&b'\n') {
            self.raw.pop();
            if self.raw.last() == Some(&b'\r') {
                self.raw.pop();
            }
        }

        self.text.clear();
        match self.encoding {
            TextEncoding::Latin1 => self.text.extend(self.raw.iter().map(|&b| char::from(b))),
            TextEncoding::Utf8 => {
                let text = std::str::from_utf8(&self.raw)
                    .map_err(|_| FormatError::InvalidEncoding { line: self.line })?;
                self.text.push_str(text);
            },
        }

        Ok(Some(Line {
            number: self.line,
            text: &self.text,
        }))
    }

    /// Consume lines up to and including the first one starting with `marker`.
    ///
    /// Returns `false` if the input ended first.
    pub fn skip_past(&mut self, marker: char) -> Result<bool> {
        while let Some(line) = self.next_line()? {
            if line.text.starts_with(marker) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
