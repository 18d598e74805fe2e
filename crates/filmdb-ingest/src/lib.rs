//! filmdb Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads the movie and actor list dumps into an in-memory [`Database`].
//!
//! - **store**: append-only [`Table`]s and the [`NameIndex`]
//! - **scanner**: line scanners for the movie list and the actor lists
//! - **db**: the [`Database`] and the sinks that fill it
//! - **pipeline**: the complete load with per-file reporting
//!
//! # Example
//!
//! ```no_run
//! use filmdb_ingest::{ingest, IngestConfig, SourceSet};
//!
//! fn main() -> filmdb_common::Result<()> {
//!     let sources = SourceSet::new("movies.list.gz")
//!         .with_actors("actors.list.gz")
//!         .with_actresses("actresses.list.gz");
//!
//!     let (db, report) = ingest(&sources, &IngestConfig::default())?;
//!     println!("{} movies, {} actors", report.movies, report.actors);
//!
//!     if let Some(id) = db.find_actor("Bacon, Kevin (I)") {
//!         println!("{} co-stars", db.co_stars(id)?.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod db;
pub mod pipeline;
pub mod scanner;
pub mod store;

// Re-export commonly used types
pub use config::{CapacityHints, IngestConfig, SourceKind, SourceSet, TextEncoding};
pub use db::{Actor, Database, Movie, Role};
pub use pipeline::{ingest, ingest_with_progress, FileReport, IngestReport, PipelineEvent};
pub use scanner::{ActorScanner, ActorSink, MovieScanner, MovieSink, ScanEnd, ScanSummary};
pub use store::{NameIndex, RowId, Table};
