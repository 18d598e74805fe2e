//! Movie list scanner
//!
//! # Format
//! ```text
//! MOVIES LIST
//! ===========
//!
//! Alpha (2000)<TAB>+2000
//! "Some Series" (1999)<TAB>+1999-2003
//! --------------------------------------------------------------------------------
//! ```
//!
//! Everything up to and including the first line starting with `=` is
//! preamble. Each record is a title, one or more tabs, and a year field that
//! may be a range or `????`. The section ends at a line starting with `--`.

use filmdb_common::{FormatError, Result};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

use super::{open_input, Input, LineReader, MovieSink, ScanEnd, ScanSummary};
use crate::config::IngestConfig;

/// Scanner for the movie list file
pub struct MovieScanner<R> {
    lines: LineReader<R>,
}

impl MovieScanner<Input> {
    /// Open a movie list file
    pub fn open(path: &Path, config: &IngestConfig) -> Result<Self> {
        Ok(Self::new(open_input(path)?, config))
    }
}

impl<R: BufRead> MovieScanner<R> {
    pub fn new(reader: R, config: &IngestConfig) -> Self {
        Self {
            lines: LineReader::new(reader, config),
        }
    }

    /// Lines consumed so far; after a failed scan, the offending line
    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Scan the whole file, reporting each record to `sink`
    pub fn scan<S: MovieSink>(&mut self, sink: &mut S) -> Result<ScanSummary> {
        if !self.lines.skip_past('=')? {
            warn!(
                lines = self.lines.line_number(),
                "Movie list ended inside the preamble"
            );
            let mut summary = ScanSummary::new(ScanEnd::TruncatedPreamble);
            summary.lines = self.lines.line_number();
            return Ok(summary);
        }
        debug!(lines = self.lines.line_number(), "Skipped movie list preamble");

        let mut summary = ScanSummary::new(ScanEnd::EndOfInput);
        while let Some(line) = self.lines.next_line()? {
            if line.text.is_empty() {
                continue;
            }

            if line.text.starts_with("--") {
                summary.end = ScanEnd::SectionEnd;
                break;
            }

            let (title, rest) = line
                .text
                .split_once('\t')
                .ok_or(FormatError::MissingTab { line: line.number })?;
            let year = rest.trim_start_matches('\t');

            sink.on_movie(title)?;
            summary.declarations += 1;
            sink.on_row(title, year)?;
            summary.rows += 1;
        }

        summary.lines = self.lines.line_number();
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use filmdb_common::FilmdbError;
    use std::io::Cursor;

    #[derive(Debug, PartialEq)]
    enum Event {
        Movie(String),
        Row(String, String),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl MovieSink for Recorder {
        fn on_movie(&mut self, title: &str) -> Result<()> {
            self.0.push(Event::Movie(title.to_string()));
            Ok(())
        }

        fn on_row(&mut self, title: &str, year: &str) -> Result<()> {
            self.0.push(Event::Row(title.to_string(), year.to_string()));
            Ok(())
        }
    }

    fn scan(input: &str) -> (Result<ScanSummary>, Vec<Event>) {
        let mut scanner = MovieScanner::new(Cursor::new(input.as_bytes().to_vec()), &IngestConfig::default());
        let mut recorder = Recorder::default();
        let result = scanner.scan(&mut recorder);
        (result, recorder.0)
    }

    fn movie(title: &str) -> Event {
        Event::Movie(title.to_string())
    }

    fn row(title: &str, year: &str) -> Event {
        Event::Row(title.to_string(), year.to_string())
    }

    #[test]
    fn test_scan_stops_at_section_end() {
        let input = "MOVIE LIST\n===\nAlpha (2000)\t2000\nBeta (2001)\t2001\n\n--\nGamma (2002)\t2002\n";
        let (result, events) = scan(input);

        assert_eq!(
            events,
            vec![
                movie("Alpha (2000)"),
                row("Alpha (2000)", "2000"),
                movie("Beta (2001)"),
                row("Beta (2001)", "2001"),
            ]
        );

        let summary = result.unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.declarations, 2);
        assert_eq!(summary.lines, 6);
        assert_eq!(summary.end, ScanEnd::SectionEnd);
    }

    #[test]
    fn test_multiple_tabs_and_year_ranges() {
        let input = "===\n\"Series\" (1999)\t\t\t1999-2003\nUnknown (????)\t\t????\n";
        let (result, events) = scan(input);

        assert_eq!(
            events,
            vec![
                movie("\"Series\" (1999)"),
                row("\"Series\" (1999)", "1999-2003"),
                movie("Unknown (????)"),
                row("Unknown (????)", "????"),
            ]
        );
        assert_eq!(result.unwrap().end, ScanEnd::EndOfInput);
    }

    #[test]
    fn test_preamble_needs_leading_equals() {
        let input = "a line with = inside\n=\nAlpha (2000)\t2000\n";
        let (_, events) = scan(input);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_truncated_preamble_is_clean_stop() {
        let (result, events) = scan("MOVIE LIST\nno divider here\n");
        let summary = result.unwrap();
        assert!(events.is_empty());
        assert_eq!(summary.end, ScanEnd::TruncatedPreamble);
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn test_missing_tab_reports_line() {
        let input = "===\nAlpha (2000)\t2000\nno tab here\nBeta (2001)\t2001\n";
        let (result, events) = scan(input);

        assert!(matches!(
            result,
            Err(FilmdbError::Format(FormatError::MissingTab { line: 3 }))
        ));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_empty_year_field() {
        let (_, events) = scan("===\nAlpha (2000)\t\n");
        assert_eq!(events[1], row("Alpha (2000)", ""));
    }

    #[test]
    fn test_sink_error_aborts_scan() {
        struct Failing;
        impl MovieSink for Failing {
            fn on_row(&mut self, _: &str, _: &str) -> Result<()> {
                Err(FilmdbError::internal("sink refused"))
            }
        }

        let mut scanner = MovieScanner::new(
            Cursor::new(b"===\nAlpha (2000)\t2000\nBeta (2001)\t2001\n".to_vec()),
            &IngestConfig::default(),
        );
        let err = scanner.scan(&mut Failing).unwrap_err();
        assert!(matches!(err, FilmdbError::InternalInvariant(_)));
        assert_eq!(scanner.line_number(), 2);
    }
}
