//! Error types for filmdb

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for filmdb operations
pub type Result<T> = std::result::Result<T, FilmdbError>;

/// Main error type for filmdb
#[derive(Error, Debug)]
pub enum FilmdbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Row id {id} out of range (table has {len} rows)")]
    OutOfRange { id: usize, len: usize },

    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilmdbError {
    /// Create an open error for the given path
    pub fn open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an internal invariant error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalInvariant(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error must abort the whole run.
    ///
    /// Format errors only end the scan of the file they were found in.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Format(_))
    }
}

/// A line that does not follow the flat-file grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: line does not fit the {capacity}-byte line buffer")]
    LineOverflow { line: usize, capacity: usize },

    #[error("line {line}: actor name does not fit the {capacity}-byte name buffer")]
    NameOverflow { line: usize, capacity: usize },

    #[error("line {line}: missing tab separator")]
    MissingTab { line: usize },

    #[error("line {line}: invalid UTF-8")]
    InvalidEncoding { line: usize },
}

impl FormatError {
    /// 1-based line number the error was found on
    pub fn line(&self) -> usize {
        match self {
            Self::LineOverflow { line, .. }
            | Self::NameOverflow { line, .. }
            | Self::MissingTab { line }
            | Self::InvalidEncoding { line } => *line,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_errors_are_not_fatal() {
        let err = FilmdbError::from(FormatError::MissingTab { line: 7 });
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Format error: line 7: missing tab separator");
    }

    #[test]
    fn test_fatal_errors() {
        assert!(FilmdbError::internal("no actor").is_fatal());
        assert!(FilmdbError::OutOfRange { id: 3, len: 1 }.is_fatal());

        let err = FilmdbError::open(
            "movies.list",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_fatal());
        assert!(err.to_string().contains("movies.list"));
    }

    #[test]
    fn test_format_error_line() {
        let err = FormatError::LineOverflow {
            line: 12,
            capacity: 2048,
        };
        assert_eq!(err.line(), 12);
        assert_eq!(FormatError::InvalidEncoding { line: 3 }.line(), 3);
    }
}
