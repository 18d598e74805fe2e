//! `filmdb load`: build the database and look up an actor

use colored::Colorize;
use filmdb_ingest::{ingest_with_progress, IngestConfig, IngestReport, SourceSet};
use serde::Serialize;
use std::io::{self, Write};
use tracing::info;

use super::shell::{self, Lookup};
use crate::error::{CliError, Result};
use crate::progress::{create_spinner, format_count, report_event};

/// Everything `filmdb load` was asked to do
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub sources: SourceSet,
    pub config: IngestConfig,
    /// Actor looked up once loading is done
    pub target: String,
    pub json: bool,
    pub shell: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a IngestReport,
    target: &'a Lookup,
}

pub fn run(options: &LoadOptions) -> Result<()> {
    let pb = create_spinner("Opening list files");
    let loaded = ingest_with_progress(&options.sources, &options.config, |event| {
        report_event(&pb, &event)
    });
    pb.finish_and_clear();
    let (db, report) = loaded?;

    let target = Lookup::find(&db, &options.target)?;
    info!(target = %options.target, id = ?target.id, "Looked up target actor");

    {
        let mut out = io::stdout().lock();
        if options.json {
            serde_json::to_writer_pretty(
                &mut out,
                &JsonOutput {
                    report: &report,
                    target: &target,
                },
            )?;
            writeln!(out)?;
        } else {
            write_summary(&mut out, &report, &target)?;
        }
        out.flush()?;
    }

    if options.shell {
        shell::run(&db, io::stdin().lock(), io::stdout().lock())?;
    }

    let failed = report.failed_files().count();
    if failed > 0 {
        return Err(CliError::incomplete(failed, report.files.len()));
    }
    Ok(())
}

/// Human-readable load summary
pub fn write_summary<W: Write>(out: &mut W, report: &IngestReport, target: &Lookup) -> Result<()> {
    writeln!(
        out,
        "{} {} movies, {} actors, {} roles",
        "Loaded".green().bold(),
        format_count(report.movies),
        format_count(report.actors),
        format_count(report.roles)
    )?;

    for file in report.failed_files() {
        if let Some(error) = &file.error {
            writeln!(
                out,
                "{} {} stopped early: {}",
                "Warning:".yellow().bold(),
                file.path.display(),
                error
            )?;
        }
    }

    if report.movie_lookup_errors > 0 {
        writeln!(
            out,
            "{} {} roles name a title missing from the movie list",
            "Skipped".yellow(),
            format_count(report.movie_lookup_errors)
        )?;
    }

    writeln!(out, "{}", target)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use filmdb_ingest::{ingest, Database};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_summary() {
        colored::control::set_override(false);

        let dir = TempDir::new().unwrap();
        let movies = dir.path().join("movies.list");
        let actors = dir.path().join("actors.list");
        fs::write(&movies, "===\nAlpha (2000)\t2000\n").unwrap();
        fs::write(
            &actors,
            "--\n--\nDoe, John\tAlpha (2000)  Lead\n\tGone (1990)\n",
        )
        .unwrap();

        let sources = SourceSet::new(&movies).with_actors(&actors);
        let (db, report) = ingest(&sources, &IngestConfig::default()).unwrap();
        let target = Lookup::find(&db, "Doe, John").unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, &report, &target).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Loaded 1 movies, 1 actors, 1 roles"));
        assert!(text.contains("Skipped 1 roles name a title missing"));
        assert!(text.contains("\"Doe, John\": actor #0, 1 roles, 0 co-stars"));
    }

    #[test]
    fn test_json_output_shape() {
        let db = Database::new();
        let report = IngestReport {
            files: Vec::new(),
            movies: 0,
            actors: 0,
            roles: 0,
            movie_lookup_errors: 0,
        };
        let target = Lookup::find(&db, "Nobody").unwrap();

        let json = serde_json::to_value(JsonOutput {
            report: &report,
            target: &target,
        })
        .unwrap();
        assert_eq!(json["report"]["movies"], 0);
        assert_eq!(json["target"]["name"], "Nobody");
        assert!(json["target"]["id"].is_null());
    }
}
