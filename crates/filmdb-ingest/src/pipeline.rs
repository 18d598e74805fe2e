//! Full load: movie list, then actor lists
//!
//! Every input is opened before anything is scanned, so a missing file
//! aborts the run with nothing loaded. After that, files are scanned in
//! order (movies, actors, actresses). A format error stops only the file it
//! occurs in; rows already loaded from that file are kept and the next file
//! is scanned. Any other error aborts the run.

use filmdb_common::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

use crate::config::{IngestConfig, SourceKind, SourceSet};
use crate::db::loader::LoadCounts;
use crate::db::{ActorLoader, Database, MovieLoader};
use crate::scanner::{open_input, ActorScanner, Input, MovieScanner, ScanEnd};

/// Outcome of scanning one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: SourceKind,
    /// Lines read before the scan stopped
    pub lines: usize,
    pub counts: LoadCounts,
    /// How the scan ended; `None` if it failed
    pub end: Option<ScanEnd>,
    /// The format error that stopped the scan, if any
    pub error: Option<String>,
}

/// Outcome of a full load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub files: Vec<FileReport>,
    pub movies: usize,
    pub actors: usize,
    pub roles: usize,
    pub movie_lookup_errors: usize,
}

impl IngestReport {
    /// Files whose scan was cut short by a format error
    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> + '_ {
        self.files.iter().filter(|f| f.error.is_some())
    }

    pub fn is_clean(&self) -> bool {
        self.failed_files().next().is_none()
    }
}

/// Progress notifications from [`ingest_with_progress`]
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    Started { kind: SourceKind, path: &'a Path },
    Finished(&'a FileReport),
}

/// Load every file in `sources` into a new database
pub fn ingest(sources: &SourceSet, config: &IngestConfig) -> Result<(Database, IngestReport)> {
    ingest_with_progress(sources, config, |_| {})
}

/// Like [`ingest`], calling `observe` as each file starts and finishes
pub fn ingest_with_progress<F>(
    sources: &SourceSet,
    config: &IngestConfig,
    mut observe: F,
) -> Result<(Database, IngestReport)>
where
    F: FnMut(PipelineEvent<'_>),
{
    config.validate()?;

    let inputs = sources
        .iter()
        .map(|(kind, path)| Ok((kind, path, open_input(path)?)))
        .collect::<Result<Vec<_>>>()?;
    debug!(files = inputs.len(), "Opened all inputs");

    let mut db = Database::with_capacity(&config.capacity);
    let mut files = Vec::with_capacity(inputs.len());

    for (kind, path, input) in inputs {
        observe(PipelineEvent::Started { kind, path });
        let report = load_file(&mut db, kind, path, input, config)?;
        observe(PipelineEvent::Finished(&report));
        files.push(report);
    }

    let report = IngestReport {
        files,
        movies: db.movies().len(),
        actors: db.actors().len(),
        roles: db.roles().len(),
        movie_lookup_errors: db.movie_lookup_errors(),
    };

    if report.movie_lookup_errors > 0 {
        warn!(
            count = report.movie_lookup_errors,
            "Actor rows referenced titles missing from the movie list"
        );
    }
    info!(
        movies = report.movies,
        actors = report.actors,
        roles = report.roles,
        "Ingestion complete"
    );

    Ok((db, report))
}

#[instrument(skip(db, path, input, config), fields(path = %path.display()))]
fn load_file(
    db: &mut Database,
    kind: SourceKind,
    path: &Path,
    input: Input,
    config: &IngestConfig,
) -> Result<FileReport> {
    let (result, lines, counts) = match kind {
        SourceKind::Movies => {
            let mut scanner = MovieScanner::new(input, config);
            let mut loader = MovieLoader::new(db);
            let result = scanner.scan(&mut loader);
            (result, scanner.line_number(), loader.counts())
        },
        SourceKind::Actors | SourceKind::Actresses => {
            let mut scanner = ActorScanner::new(input, config);
            let mut loader = ActorLoader::new(db);
            let result = scanner.scan(&mut loader);
            (result, scanner.line_number(), loader.counts())
        },
    };

    let mut report = FileReport {
        path: path.to_path_buf(),
        kind,
        lines,
        counts,
        end: None,
        error: None,
    };

    match result {
        Ok(summary) => {
            info!(
                lines,
                added = counts.added,
                linked = counts.linked,
                unresolved = counts.unresolved,
                "Loaded file"
            );
            report.end = Some(summary.end);
        },
        Err(e) if !e.is_fatal() => {
            warn!(error = %e, lines, "Stopped scanning file");
            report.error = Some(e.to_string());
        },
        Err(e) => {
            error!(error = %e, lines, "Ingestion aborted");
            return Err(e);
        },
    }

    Ok(report)
}
