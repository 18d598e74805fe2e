//! filmdb Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the filmdb workspace.
//!
//! - **Error Handling**: [`FilmdbError`], [`FormatError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```
//! use filmdb_common::{FilmdbError, FormatError, Result};
//!
//! fn check(line: &str, line_no: usize) -> Result<()> {
//!     if !line.contains('\t') {
//!         return Err(FormatError::MissingTab { line: line_no }.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(check("no tabs", 3), Err(FilmdbError::Format(_))));
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{FilmdbError, FormatError, Result};
