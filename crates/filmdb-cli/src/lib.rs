//! filmdb CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Command-line interface for loading the movie and actor list dumps.
//!
//! # Overview
//!
//! - **Load**: build the database from the lists and look up an actor (`filmdb load`)
//! - **Shell**: interactive actor lookups against the loaded database (`filmdb load --shell`)
//! - **Listing**: print what a scanner sees in a file, without building anything
//!   (`filmdb list-movies`, `filmdb list-actors`, `filmdb list-roles`)

pub mod commands;
pub mod error;
pub mod progress;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Args, Parser, Subcommand};
use filmdb_ingest::{IngestConfig, TextEncoding};
use std::path::PathBuf;

/// Actor looked up after a load when no `--target` is given
pub const DEFAULT_TARGET: &str = "Bacon, Kevin (I)";

/// filmdb - movie and actor list loader
#[derive(Parser, Debug)]
#[command(name = "filmdb")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub scan: ScanArgs,
}

/// Scanner settings shared by every command
///
/// Unset flags fall back to the `FILMDB_*` environment variables, then to the
/// built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Text encoding of the list files (latin1, utf8)
    #[arg(long, global = true)]
    pub encoding: Option<TextEncoding>,

    /// Line buffer capacity in bytes
    #[arg(long, global = true)]
    pub max_line: Option<usize>,

    /// Actor name buffer capacity in bytes
    #[arg(long, global = true)]
    pub max_name: Option<usize>,
}

impl ScanArgs {
    /// Resolve the ingest configuration for this invocation
    pub fn ingest_config(&self) -> Result<IngestConfig> {
        let mut config = IngestConfig::from_env()?;
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(max_line) = self.max_line {
            config.max_line = max_line;
        }
        if let Some(max_name) = self.max_name {
            config.max_name = max_name;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the lists into memory and look up an actor
    Load {
        /// Movie list file (plain or .gz)
        #[arg(long, env = "FILMDB_MOVIES")]
        movies: PathBuf,

        /// Actor list file
        #[arg(long, env = "FILMDB_ACTORS")]
        actors: Option<PathBuf>,

        /// Actress list file
        #[arg(long, env = "FILMDB_ACTRESSES")]
        actresses: Option<PathBuf>,

        /// Actor to look up once loading is done
        #[arg(short, long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Read actor names from stdin after loading
        #[arg(short, long)]
        shell: bool,

        /// Print the load report as JSON
        #[arg(long)]
        json: bool,

        /// Size tables for a complete dump before loading
        #[arg(long, env = "FILMDB_PREALLOCATE")]
        preallocate: bool,
    },

    /// Print every actor name declared in actor list files
    ListActors {
        /// Actor or actress list files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print every role row in actor list files
    ListRoles {
        /// Actor or actress list files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print every title and year in movie list files
    ListMovies {
        /// Movie list files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
