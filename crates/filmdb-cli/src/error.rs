//! Error types for filmdb CLI
//!
//! User-facing errors with messages that say what to do next.

use filmdb_common::FilmdbError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading or scanning failed
    #[error(transparent)]
    Filmdb(#[from] FilmdbError),

    /// Writing to stdout or reading stdin failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Some files stopped early on a format error
    #[error("{failed} of {total} files stopped early on format errors. Run with --verbose for details.")]
    Incomplete { failed: usize, total: usize },
}

impl CliError {
    /// Create an incomplete-scan error
    pub fn incomplete(failed: usize, total: usize) -> Self {
        Self::Incomplete { failed, total }
    }
}
