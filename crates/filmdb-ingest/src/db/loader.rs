//! Scanner sinks that write into a [`Database`]

use filmdb_common::Result;
use serde::Serialize;

use super::Database;
use crate::scanner::{ActorSink, MovieSink};

/// What a loader did to the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadCounts {
    /// Movie or actor rows added
    pub added: usize,
    /// Roles created
    pub linked: usize,
    /// Actor rows whose production was not in the movie list
    pub unresolved: usize,
}

/// Adds each scanned movie row
pub struct MovieLoader<'a> {
    db: &'a mut Database,
    counts: LoadCounts,
}

impl<'a> MovieLoader<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            counts: LoadCounts::default(),
        }
    }

    pub fn counts(&self) -> LoadCounts {
        self.counts
    }
}

impl MovieSink for MovieLoader<'_> {
    fn on_row(&mut self, title: &str, year: &str) -> Result<()> {
        self.db.add_movie(title, year);
        self.counts.added += 1;
        Ok(())
    }
}

/// Adds each declared actor and links every row to its movie
pub struct ActorLoader<'a> {
    db: &'a mut Database,
    counts: LoadCounts,
}

impl<'a> ActorLoader<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            counts: LoadCounts::default(),
        }
    }

    pub fn counts(&self) -> LoadCounts {
        self.counts
    }
}

impl ActorSink for ActorLoader<'_> {
    fn on_actor(&mut self, name: &str) -> Result<()> {
        self.db.add_actor(name);
        self.counts.added += 1;
        Ok(())
    }

    fn on_row(&mut self, actor: &str, production: &str, role: &str) -> Result<()> {
        match self.db.add_role(actor, production, role)? {
            Some(_) => self.counts.linked += 1,
            None => self.counts.unresolved += 1,
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use filmdb_common::FilmdbError;

    #[test]
    fn test_movie_loader_counts() {
        let mut db = Database::new();
        let mut loader = MovieLoader::new(&mut db);
        loader.on_movie("Alpha (2000)").unwrap();
        loader.on_row("Alpha (2000)", "2000").unwrap();
        assert_eq!(loader.counts().added, 1);
        assert_eq!(db.find_movie("Alpha (2000)"), Some(0));
    }

    #[test]
    fn test_actor_loader_counts() {
        let mut db = Database::new();
        db.add_movie("Alpha (2000)", "2000");

        let mut loader = ActorLoader::new(&mut db);
        loader.on_actor("Doe, John").unwrap();
        loader.on_row("Doe, John", "Alpha (2000)", "Lead").unwrap();
        loader.on_row("Doe, John", "Missing (1999)", "").unwrap();

        assert_eq!(
            loader.counts(),
            LoadCounts {
                added: 1,
                linked: 1,
                unresolved: 1
            }
        );
        assert_eq!(db.movie_lookup_errors(), 1);
    }

    #[test]
    fn test_row_before_declaration_is_fatal() {
        let mut db = Database::new();
        db.add_movie("Alpha (2000)", "2000");

        let mut loader = ActorLoader::new(&mut db);
        let err = loader.on_row("", "Alpha (2000)", "").unwrap_err();
        assert!(matches!(err, FilmdbError::InternalInvariant(_)));
    }
}
