//! Listing drivers: print what a scanner reports, one line per event
//!
//! Nothing is stored, so these run in constant memory over any size of list.
//! Each file is scanned independently; a format error stops that file only
//! and is reported once every file has been tried.

use filmdb_common::FilmdbError;
use filmdb_ingest::{ActorScanner, ActorSink, IngestConfig, MovieScanner, MovieSink, ScanSummary};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{CliError, Result};

/// Prints each declared actor name
struct ActorNames<W> {
    out: W,
}

impl<W: Write> ActorSink for ActorNames<W> {
    fn on_actor(&mut self, name: &str) -> filmdb_common::Result<()> {
        writeln!(self.out, "{}", name)?;
        Ok(())
    }

    fn on_row(&mut self, _actor: &str, _production: &str, _role: &str) -> filmdb_common::Result<()> {
        Ok(())
    }
}

/// Prints `actor :: production` for each row
struct RoleRows<W> {
    out: W,
}

impl<W: Write> ActorSink for RoleRows<W> {
    fn on_actor(&mut self, _name: &str) -> filmdb_common::Result<()> {
        Ok(())
    }

    fn on_row(&mut self, actor: &str, production: &str, _role: &str) -> filmdb_common::Result<()> {
        writeln!(self.out, "{} :: {}", actor, production)?;
        Ok(())
    }
}

/// Prints `title :: year` for each row
struct MovieRows<W> {
    out: W,
}

impl<W: Write> MovieSink for MovieRows<W> {
    fn on_row(&mut self, title: &str, year: &str) -> filmdb_common::Result<()> {
        writeln!(self.out, "{} :: {}", title, year)?;
        Ok(())
    }
}

/// `filmdb list-actors`
pub fn actors(files: &[PathBuf], config: &IngestConfig) -> Result<()> {
    write_actors(files, config, BufWriter::new(io::stdout().lock()))
}

/// `filmdb list-roles`
pub fn roles(files: &[PathBuf], config: &IngestConfig) -> Result<()> {
    write_roles(files, config, BufWriter::new(io::stdout().lock()))
}

/// `filmdb list-movies`
pub fn movies(files: &[PathBuf], config: &IngestConfig) -> Result<()> {
    write_movies(files, config, BufWriter::new(io::stdout().lock()))
}

pub fn write_actors<W: Write>(files: &[PathBuf], config: &IngestConfig, out: W) -> Result<()> {
    let mut sink = ActorNames { out };
    let result = scan_each(files, |path| {
        ActorScanner::open(path, config)?.scan(&mut sink)
    });
    sink.out.flush()?;
    result
}

pub fn write_roles<W: Write>(files: &[PathBuf], config: &IngestConfig, out: W) -> Result<()> {
    let mut sink = RoleRows { out };
    let result = scan_each(files, |path| {
        ActorScanner::open(path, config)?.scan(&mut sink)
    });
    sink.out.flush()?;
    result
}

pub fn write_movies<W: Write>(files: &[PathBuf], config: &IngestConfig, out: W) -> Result<()> {
    let mut sink = MovieRows { out };
    let result = scan_each(files, |path| {
        MovieScanner::open(path, config)?.scan(&mut sink)
    });
    sink.out.flush()?;
    result
}

/// Run `scan` over every file, continuing past format errors
fn scan_each<F>(files: &[PathBuf], mut scan: F) -> Result<()>
where
    F: FnMut(&Path) -> std::result::Result<ScanSummary, FilmdbError>,
{
    let mut failed = 0;

    for path in files {
        match scan(path) {
            Ok(summary) => {
                debug!(
                    path = %path.display(),
                    lines = summary.lines,
                    rows = summary.rows,
                    end = ?summary.end,
                    "Scanned file"
                );
            },
            Err(e) if !e.is_fatal() => {
                warn!(path = %path.display(), error = %e, "Stopped scanning file");
                eprintln!("{}: {}", path.display(), e);
                failed += 1;
            },
            Err(e) => return Err(e.into()),
        }
    }

    if failed > 0 {
        return Err(CliError::incomplete(failed, files.len()));
    }
    Ok(())
}
