//! Actor list scanner
//!
//! Used for both the actors and the actresses dumps.
//!
//! # Format
//! ```text
//! THE ACTORS LIST
//! ===============
//! ---------------------------
//! Name            Titles
//! ----            ------
//! Doe, John<TAB>+Alpha (2000)  [Lead]  <1>
//! <TAB>+Beta (2001)  [Support]
//!
//! -----------------------------------------------------------------------------
//! ```
//!
//! The preamble is two sections, each ending at a line starting with `-`.
//! An actor's name appears only on the first line of their block; later
//! lines start with a tab. After the tabs comes the production, then
//! optionally two spaces and the role text. A production that itself
//! contains two spaces is split there; the format has no escape for it.
//! The first line without a tab ends the section.

use filmdb_common::{FormatError, Result};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

use super::{open_input, ActorSink, Input, LineReader, ScanEnd, ScanSummary};
use crate::config::{IngestConfig, TextEncoding};

/// Split an entry into production and role at the first double space
pub fn split_production(entry: &str) -> (&str, &str) {
    match entry.find("  ") {
        Some(at) => (&entry[..at], &entry[at + 2..]),
        None => (entry, ""),
    }
}

/// Scanner for an actor list file
pub struct ActorScanner<R> {
    lines: LineReader<R>,
    actor: String,
    name_capacity: usize,
    encoding: TextEncoding,
}

impl ActorScanner<Input> {
    /// Open an actor or actress list file
    pub fn open(path: &Path, config: &IngestConfig) -> Result<Self> {
        Ok(Self::new(open_input(path)?, config))
    }
}

impl<R: BufRead> ActorScanner<R> {
    pub fn new(reader: R, config: &IngestConfig) -> Self {
        Self {
            lines: LineReader::new(reader, config),
            actor: String::with_capacity(config.max_name),
            name_capacity: config.max_name,
            encoding: config.encoding,
        }
    }

    /// Lines consumed so far; after a failed scan, the offending line
    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Scan the whole file, reporting each actor and row to `sink`
    pub fn scan<S: ActorSink>(&mut self, sink: &mut S) -> Result<ScanSummary> {
        // Title banner, then the column header divider
        if !self.lines.skip_past('-')? || !self.lines.skip_past('-')? {
            warn!(
                lines = self.lines.line_number(),
                "Actor list ended inside the preamble"
            );
            let mut summary = ScanSummary::new(ScanEnd::TruncatedPreamble);
            summary.lines = self.lines.line_number();
            return Ok(summary);
        }
        debug!(lines = self.lines.line_number(), "Skipped actor list preamble");

        self.actor.clear();
        let mut summary = ScanSummary::new(ScanEnd::EndOfInput);
        while let Some(line) = self.lines.next_line()? {
            if line.text.is_empty() {
                continue;
            }

            let Some(tab) = line.text.find('\t') else {
                summary.end = ScanEnd::SectionEnd;
                break;
            };

            if tab > 0 {
                let name = &line.text[..tab];
                if self.encoding.encoded_len(name) >= self.name_capacity {
                    return Err(FormatError::NameOverflow {
                        line: line.number,
                        capacity: self.name_capacity,
                    }
                    .into());
                }
                self.actor.clear();
                self.actor.push_str(name);
                sink.on_actor(&self.actor)?;
                summary.declarations += 1;
            }

            let entry = line.text[tab..].trim_start_matches('\t');
            let (production, role) = split_production(entry);
            sink.on_row(&self.actor, production, role)?;
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

    const PREAMBLE: &str = "THE ACTORS LIST\n---------\nName\tTitles\n----\t------\n";

    #[derive(Debug, PartialEq)]
    enum Event {
        Actor(String),
        Row(String, String, String),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl ActorSink for Recorder {
        fn on_actor(&mut self, name: &str) -> Result<()> {
            self.0.push(Event::Actor(name.to_string()));
            Ok(())
        }

        fn on_row(&mut self, actor: &str, production: &str, role: &str) -> Result<()> {
            self.0.push(Event::Row(
                actor.to_string(),
                production.to_string(),
                role.to_string(),
            ));
            Ok(())
        }
    }

    fn scan_with(body: &str, config: &IngestConfig) -> (Result<ScanSummary>, Vec<Event>) {
        let input = format!("{}{}", PREAMBLE, body);
        let mut scanner = ActorScanner::new(Cursor::new(input.into_bytes()), config);
        let mut recorder = Recorder::default();
        let result = scanner.scan(&mut recorder);
        (result, recorder.0)
    }

    fn scan(body: &str) -> (Result<ScanSummary>, Vec<Event>) {
        scan_with(body, &IngestConfig::default())
    }

    fn actor(name: &str) -> Event {
        Event::Actor(name.to_string())
    }

    fn row(a: &str, p: &str, r: &str) -> Event {
        Event::Row(a.to_string(), p.to_string(), r.to_string())
    }

    #[test]
    fn test_split_production() {
        assert_eq!(split_production("Alpha (2000)  Lead"), ("Alpha (2000)", "Lead"));
        assert_eq!(split_production("Alpha (2000)"), ("Alpha (2000)", ""));
        assert_eq!(
            split_production("Alpha (2000) (TV)  [Bob]  <3>"),
            ("Alpha (2000) (TV)", "[Bob]  <3>")
        );
        assert_eq!(split_production("Alpha (2000)  "), ("Alpha (2000)", ""));
    }

    #[test]
    fn test_scan_actor_block() {
        let (result, events) = scan("Doe, John\tAlpha (2000)  Lead\n\tBeta (2001)  Support\nEND\n");

        assert_eq!(
            events,
            vec![
                actor("Doe, John"),
                row("Doe, John", "Alpha (2000)", "Lead"),
                row("Doe, John", "Beta (2001)", "Support"),
            ]
        );

        let summary = result.unwrap();
        assert_eq!(summary.end, ScanEnd::SectionEnd);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.declarations, 1);
        assert_eq!(summary.lines, 7);
    }

    #[test]
    fn test_several_actors_and_blank_lines() {
        let body = "Doe, John\t\tAlpha (2000)\n\n\nRoe, Jane\t\t\tBeta (2001)  [Eve]  <2>\n\t\t\tAlpha (2000)\n";
        let (result, events) = scan(body);

        assert_eq!(
            events,
            vec![
                actor("Doe, John"),
                row("Doe, John", "Alpha (2000)", ""),
                actor("Roe, Jane"),
                row("Roe, Jane", "Beta (2001)", "[Eve]  <2>"),
                row("Roe, Jane", "Alpha (2000)", ""),
            ]
        );
        assert_eq!(result.unwrap().end, ScanEnd::EndOfInput);
    }

    #[test]
    fn test_double_space_in_title_is_split() {
        let (_, events) = scan("Doe, John\tTwo  Spaces (2000)  Lead\n");
        assert_eq!(events[1], row("Doe, John", "Two", "Spaces (2000)  Lead"));
    }

    #[test]
    fn test_continuation_before_any_name() {
        let (_, events) = scan("\tOrphan (1990)\n");
        assert_eq!(events, vec![row("", "Orphan (1990)", "")]);
    }

    #[test]
    fn test_name_overflow() {
        let config = IngestConfig {
            max_name: 8,
            ..IngestConfig::default()
        };

        let (_, events) = scan_with("Doe, Jo\tAlpha (2000)\n", &config);
        assert_eq!(events.len(), 2);

        let (result, events) = scan_with("Doe, Jo\tAlpha (2000)\nDoe, John\tBeta (2001)\n", &config);
        assert!(matches!(
            result,
            Err(FilmdbError::Format(FormatError::NameOverflow { line: 6, capacity: 8 }))
        ));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_truncated_preamble() {
        let mut scanner = ActorScanner::new(
            Cursor::new(b"THE ACTORS LIST\n-----\nName\tTitles\n".to_vec()),
            &IngestConfig::default(),
        );
        let mut recorder = Recorder::default();
        let summary = scanner.scan(&mut recorder).unwrap();
        assert_eq!(summary.end, ScanEnd::TruncatedPreamble);
        assert!(recorder.0.is_empty());
    }
}
