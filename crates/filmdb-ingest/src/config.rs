//! Ingestion configuration
//!
//! Buffer bounds, text decoding and pre-allocation for a load, plus the set
//! of list files to read.

use filmdb_common::{FilmdbError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Defaults
// ============================================================================

/// Default line buffer capacity in bytes
pub const DEFAULT_MAX_LINE: usize = 2048;

/// Default actor name buffer capacity in bytes
pub const DEFAULT_MAX_NAME: usize = 256;

/// Text encoding of the list files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1; every byte maps to the code point of the same value
    #[default]
    Latin1,
    /// Strict UTF-8; invalid sequences are format errors
    Utf8,
}

impl TextEncoding {
    /// Number of bytes `text` occupied in the source file
    pub fn encoded_len(self, text: &str) -> usize {
        match self {
            TextEncoding::Latin1 => text.chars().count(),
            TextEncoding::Utf8 => text.len(),
        }
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = FilmdbError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            _ => Err(FilmdbError::config(format!("Invalid encoding: {}", s))),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Latin1 => write!(f, "latin1"),
            TextEncoding::Utf8 => write!(f, "utf8"),
        }
    }
}

/// Initial sizes for the tables and indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CapacityHints {
    pub movies: usize,
    pub actors: usize,
    pub roles: usize,
}

impl CapacityHints {
    /// Sized for a complete published dump
    pub fn full_dump() -> Self {
        Self {
            movies: 4 << 20,
            actors: 4 << 20,
            roles: 32 << 20,
        }
    }
}

/// Settings shared by both scanners and the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Line buffer capacity; a line that fills it is rejected
    #[serde(default = "default_max_line")]
    pub max_line: usize,

    /// Actor name buffer capacity; names must be shorter
    #[serde(default = "default_max_name")]
    pub max_name: usize,

    #[serde(default)]
    pub encoding: TextEncoding,

    #[serde(default)]
    pub capacity: CapacityHints,
}

fn default_max_line() -> usize {
    DEFAULT_MAX_LINE
}

fn default_max_name() -> usize {
    DEFAULT_MAX_NAME
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_line: DEFAULT_MAX_LINE,
            max_name: DEFAULT_MAX_NAME,
            encoding: TextEncoding::default(),
            capacity: CapacityHints::default(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables
    ///
    /// - `FILMDB_MAX_LINE`: line buffer capacity
    /// - `FILMDB_MAX_NAME`: actor name buffer capacity
    /// - `FILMDB_ENCODING`: latin1 or utf8
    /// - `FILMDB_PREALLOCATE`: true to size tables for a full dump
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("FILMDB_MAX_LINE") {
            config.max_line = parse_size("FILMDB_MAX_LINE", &value)?;
        }

        if let Ok(value) = std::env::var("FILMDB_MAX_NAME") {
            config.max_name = parse_size("FILMDB_MAX_NAME", &value)?;
        }

        if let Ok(value) = std::env::var("FILMDB_ENCODING") {
            config.encoding = value.parse()?;
        }

        if let Ok(value) = std::env::var("FILMDB_PREALLOCATE") {
            if parse_flag("FILMDB_PREALLOCATE", &value)? {
                config.capacity = CapacityHints::full_dump();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject bounds no line could satisfy
    pub fn validate(&self) -> Result<()> {
        if self.max_line < 2 {
            return Err(FilmdbError::config(format!(
                "max_line must be at least 2, got {}",
                self.max_line
            )));
        }
        if self.max_name < 1 {
            return Err(FilmdbError::config("max_name must be at least 1"));
        }
        Ok(())
    }
}

fn parse_size(var: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| FilmdbError::config(format!("{} must be a positive integer, got '{}'", var, value)))
}

fn parse_flag(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(FilmdbError::config(format!("{} must be true or false, got '{}'", var, value))),
    }
}

/// Which grammar a list file follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Movies,
    Actors,
    Actresses,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Movies => write!(f, "movies"),
            SourceKind::Actors => write!(f, "actors"),
            SourceKind::Actresses => write!(f, "actresses"),
        }
    }
}

/// The list files making up one load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub movies: PathBuf,
    #[serde(default)]
    pub actors: Option<PathBuf>,
    #[serde(default)]
    pub actresses: Option<PathBuf>,
}

impl SourceSet {
    pub fn new(movies: impl Into<PathBuf>) -> Self {
        Self {
            movies: movies.into(),
            actors: None,
            actresses: None,
        }
    }

    pub fn with_actors(mut self, path: impl Into<PathBuf>) -> Self {
        self.actors = Some(path.into());
        self
    }

    pub fn with_actresses(mut self, path: impl Into<PathBuf>) -> Self {
        self.actresses = Some(path.into());
        self
    }

    /// Files in load order: movies first, then actors, then actresses
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &Path)> + '_ {
        std::iter::once((SourceKind::Movies, self.movies.as_path()))
            .chain(self.actors.as_deref().map(|p| (SourceKind::Actors, p)))
            .chain(self.actresses.as_deref().map(|p| (SourceKind::Actresses, p)))
    }
}
