//! Interactive actor lookup over a loaded database
//!
//! Reads one actor name per line and prints where it is indexed along with
//! the actor's filmography. `exit` or end of input leaves the shell.

use filmdb_ingest::{Database, RowId};
use serde::Serialize;
use std::io::{BufRead, Write};

use crate::error::Result;

/// Prompt written before each name is read
pub const PROMPT: &str = "actor> ";

/// Result of looking up one actor name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    pub name: String,
    /// Row id of the actor; `None` if the name is not indexed
    pub id: Option<RowId>,
    pub roles: usize,
    pub co_stars: usize,
}

impl Lookup {
    pub fn find(db: &Database, name: &str) -> Result<Self> {
        let mut lookup = Self {
            name: name.to_string(),
            id: db.find_actor(name),
            roles: 0,
            co_stars: 0,
        };
        if let Some(id) = lookup.id {
            lookup.roles = db.actor(id)?.roles.len();
            lookup.co_stars = db.co_stars(id)?.len();
        }
        Ok(lookup)
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "{:?}: actor #{}, {} roles, {} co-stars",
                self.name, id, self.roles, self.co_stars
            ),
            None => write!(f, "{:?}: not found", self.name),
        }
    }
}

/// Answer lookups from `input` until `exit` or end of input
pub fn run<R: BufRead, W: Write>(db: &Database, mut input: R, mut output: W) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let name = line.trim_end_matches(['\n', '\r']);
        if name == "exit" {
            break;
        }
        if name.is_empty() {
            continue;
        }

        let lookup = Lookup::find(db, name)?;
        writeln!(output, "{}", lookup)?;
        if let Some(id) = lookup.id {
            for (role, movie) in db.filmography(id)? {
                if role.info.is_empty() {
                    writeln!(output, "  {}", movie.name)?;
                } else {
                    writeln!(output, "  {}  {}", movie.name, role.info)?;
                }
            }
        }
    }
    Ok(())
}
