//! CLI command implementations
//!
//! Each subcommand has its own module; output goes to stdout, diagnostics to
//! stderr.

pub mod list;
pub mod load;
pub mod shell;
