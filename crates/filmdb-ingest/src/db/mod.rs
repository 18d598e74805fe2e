//! The in-memory movie database
//!
//! Three append-only tables (movies, actors, roles) and a name index for
//! each of movies and actors. Names are shared between a row and its index
//! entry, so every name is stored once.
//!
//! Rows are only added during ingestion. Once loading is done the database
//! is read-only and can be shared across threads.

use filmdb_common::{FilmdbError, Result};
use std::collections::BTreeSet;
use std::io::BufRead;
use std::sync::Arc;
use tracing::trace;

use crate::config::CapacityHints;
use crate::scanner::{ActorScanner, MovieScanner, ScanSummary};
use crate::store::{NameIndex, RowId, Table};

pub mod loader;
pub mod models;

pub use loader::{ActorLoader, MovieLoader};
pub use models::{Actor, Movie, Role};

/// Movies, actors, and the roles connecting them
#[derive(Debug, Default)]
pub struct Database {
    movies: Table<Movie>,
    actors: Table<Actor>,
    roles: Table<Role>,
    movie_index: NameIndex,
    actor_index: NameIndex,
    movie_lookup_errors: usize,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a database with storage reserved up front
    pub fn with_capacity(capacity: &CapacityHints) -> Self {
        Self {
            movies: Table::with_capacity(capacity.movies),
            actors: Table::with_capacity(capacity.actors),
            roles: Table::with_capacity(capacity.roles),
            movie_index: NameIndex::with_capacity(capacity.movies),
            actor_index: NameIndex::with_capacity(capacity.actors),
            movie_lookup_errors: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Movies
    // ------------------------------------------------------------------------

    /// Add a movie row and index its name.
    ///
    /// Names are not deduplicated: a repeated title gets a new row, but the
    /// index keeps pointing at the first one.
    pub fn add_movie(&mut self, name: &str, year: &str) -> RowId {
        let name: Arc<str> = Arc::from(name);
        let id = self.movies.insert(Movie::new(Arc::clone(&name), year));
        if !self.movie_index.insert(name, id) {
            trace!(movie = id, "Repeated title, index keeps the first row");
        }
        id
    }

    pub fn find_movie(&self, name: &str) -> Option<RowId> {
        self.movie_index.find(name)
    }

    pub fn movie(&self, id: RowId) -> Result<&Movie> {
        self.movies.get(id)
    }

    pub fn movies(&self) -> &Table<Movie> {
        &self.movies
    }

    // ------------------------------------------------------------------------
    // Actors
    // ------------------------------------------------------------------------

    /// Add an actor row and index its name; first binding of a name wins
    pub fn add_actor(&mut self, name: &str) -> RowId {
        let name: Arc<str> = Arc::from(name);
        let id = self.actors.insert(Actor::new(Arc::clone(&name)));
        if !self.actor_index.insert(name, id) {
            trace!(actor = id, "Repeated actor name, index keeps the first row");
        }
        id
    }

    pub fn find_actor(&self, name: &str) -> Option<RowId> {
        self.actor_index.find(name)
    }

    pub fn actor(&self, id: RowId) -> Result<&Actor> {
        self.actors.get(id)
    }

    pub fn actors(&self) -> &Table<Actor> {
        &self.actors
    }

    // ------------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------------

    /// Link an actor to a movie.
    ///
    /// The actor must already have been added; a missing actor means the
    /// caller broke the declare-before-use order and is an
    /// [`FilmdbError::InternalInvariant`]. A missing movie is normal (the
    /// lists disagree with each other): it is counted in
    /// [`movie_lookup_errors`](Self::movie_lookup_errors) and `None` is
    /// returned.
    pub fn add_role(&mut self, actor_name: &str, movie_name: &str, info: &str) -> Result<Option<RowId>> {
        let actor = self.actor_index.find(actor_name).ok_or_else(|| {
            FilmdbError::internal(format!("role references undeclared actor '{}'", actor_name))
        })?;

        let Some(movie) = self.movie_index.find(movie_name) else {
            self.movie_lookup_errors += 1;
            trace!(actor = actor_name, movie = movie_name, "No movie with this title");
            return Ok(None);
        };

        let id = self.roles.insert(Role {
            actor,
            movie,
            info: info.to_string(),
        });
        self.actors.get_mut(actor)?.roles.push(id);
        self.movies.get_mut(movie)?.roles.push(id);
        Ok(Some(id))
    }

    pub fn role(&self, id: RowId) -> Result<&Role> {
        self.roles.get(id)
    }

    pub fn roles(&self) -> &Table<Role> {
        &self.roles
    }

    /// Actor rows that named a production missing from the movie list
    pub fn movie_lookup_errors(&self) -> usize {
        self.movie_lookup_errors
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Add every movie a scanner finds
    pub fn load_movies<R: BufRead>(&mut self, scanner: &mut MovieScanner<R>) -> Result<ScanSummary> {
        scanner.scan(&mut MovieLoader::new(self))
    }

    /// Add every actor a scanner finds and link their roles
    pub fn load_actors<R: BufRead>(&mut self, scanner: &mut ActorScanner<R>) -> Result<ScanSummary> {
        scanner.scan(&mut ActorLoader::new(self))
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    /// The movies an actor appeared in, with the role for each
    pub fn filmography(&self, actor: RowId) -> Result<Vec<(&Role, &Movie)>> {
        let roles = &self.actors.get(actor)?.roles;
        let mut films = Vec::with_capacity(roles.len());
        for &id in roles {
            let role = self.roles.get(id)?;
            films.push((role, self.movies.get(role.movie)?));
        }
        Ok(films)
    }

    /// The actors who appeared in a movie, with the role for each
    pub fn cast(&self, movie: RowId) -> Result<Vec<(&Role, &Actor)>> {
        let roles = &self.movies.get(movie)?.roles;
        let mut cast = Vec::with_capacity(roles.len());
        for &id in roles {
            let role = self.roles.get(id)?;
            cast.push((role, self.actors.get(role.actor)?));
        }
        Ok(cast)
    }

    /// Actors sharing at least one movie with `actor`, in id order
    pub fn co_stars(&self, actor: RowId) -> Result<Vec<RowId>> {
        let mut found = BTreeSet::new();
        for (_, movie) in self.filmography(actor)? {
            for &id in &movie.roles {
                let other = self.roles.get(id)?.actor;
                if other != actor {
                    found.insert(other);
                }
            }
        }
        Ok(found.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;
    use std::io::Cursor;

    const MOVIES: &str = "MOVIE LIST\n===\nAlpha (2000)\t2000\nBeta (2001)\t2001\n\n--\n";
    const ACTORS: &str = "THE ACTORS LIST\n----\nName\tTitles\n----\t------\n\
                          Doe, John\tAlpha (2000)  Lead\n\tBeta (2001)  Support\nEND\n";

    fn loaded() -> Database {
        let config = IngestConfig::default();
        let mut db = Database::new();
        db.load_movies(&mut MovieScanner::new(Cursor::new(MOVIES), &config))
            .unwrap();
        db.load_actors(&mut ActorScanner::new(Cursor::new(ACTORS), &config))
            .unwrap();
        db
    }

    #[test]
    fn test_add_and_find_movie() {
        let mut db = Database::new();
        assert_eq!(db.add_movie("Alpha (2000)", "2000"), 0);
        assert_eq!(db.add_movie("Beta (2001)", "2001"), 1);

        assert_eq!(db.find_movie("Beta (2001)"), Some(1));
        assert_eq!(db.find_movie("Gamma (2002)"), None);
        assert_eq!(db.movie(0).unwrap().year, "2000");
    }

    #[test]
    fn test_repeated_title_keeps_first_binding() {
        let mut db = Database::new();
        db.add_movie("Alpha (2000)", "2000");
        assert_eq!(db.add_movie("Alpha (2000)", "2000"), 1);
        assert_eq!(db.movies().len(), 2);
        assert_eq!(db.find_movie("Alpha (2000)"), Some(0));
    }

    #[test]
    fn test_index_and_row_share_name() {
        let mut db = Database::new();
        let id = db.add_actor("Doe, John");
        assert_eq!(Arc::strong_count(&db.actor(id).unwrap().name), 2);
    }

    #[test]
    fn test_names_survive_table_growth() {
        let mut db = Database::with_capacity(&CapacityHints {
            movies: 1,
            actors: 1,
            roles: 1,
        });
        for i in 0..5000 {
            db.add_movie(&format!("Movie #{}", i), "2000");
        }
        assert_eq!(db.find_movie("Movie #0"), Some(0));
        assert_eq!(db.find_movie("Movie #4999"), Some(4999));
        assert_eq!(&*db.movie(4999).unwrap().name, "Movie #4999");
    }

    #[test]
    fn test_add_role_links_both_sides() {
        let mut db = Database::new();
        let movie = db.add_movie("Alpha (2000)", "2000");
        let actor = db.add_actor("Doe, John");

        let role = db.add_role("Doe, John", "Alpha (2000)", "Lead").unwrap();
        assert_eq!(role, Some(0));
        assert_eq!(db.actor(actor).unwrap().roles, vec![0]);
        assert_eq!(db.movie(movie).unwrap().roles, vec![0]);
        assert_eq!(
            db.role(0).unwrap(),
            &Role {
                actor,
                movie,
                info: "Lead".to_string()
            }
        );
    }

    #[test]
    fn test_add_role_with_unknown_movie() {
        let mut db = Database::new();
        db.add_actor("Doe, John");

        let before = db.roles().len();
        assert_eq!(db.add_role("Doe, John", "Missing (1999)", "").unwrap(), None);
        assert_eq!(db.roles().len(), before);
        assert_eq!(db.movie_lookup_errors(), 1);
        assert!(db.actor(0).unwrap().roles.is_empty());
    }

    #[test]
    fn test_add_role_with_undeclared_actor() {
        let mut db = Database::new();
        db.add_movie("Alpha (2000)", "2000");

        let err = db.add_role("Nobody", "Alpha (2000)", "").unwrap_err();
        assert!(matches!(err, FilmdbError::InternalInvariant(_)));
        assert!(err.is_fatal());
        assert_eq!(db.movie_lookup_errors(), 0);
    }

    #[test]
    fn test_load_end_to_end() {
        let db = loaded();

        assert_eq!(db.movies().len(), 2);
        assert_eq!(db.actors().len(), 1);
        assert_eq!(db.roles().len(), 2);
        assert_eq!(db.find_actor("Doe, John"), Some(0));
        assert_eq!(db.actor(0).unwrap().roles, vec![0, 1]);
        assert_eq!(db.movie(0).unwrap().roles, vec![0]);
        assert_eq!(db.movie(1).unwrap().roles, vec![1]);
        assert_eq!(db.movie_lookup_errors(), 0);
    }

    #[test]
    fn test_loaded_add_role() {
        let mut db = loaded();

        let role = db.add_role("Doe, John", "Alpha (2000)", "Lead").unwrap().unwrap();
        assert!(db.actor(0).unwrap().roles.contains(&role));
        assert!(db.movie(0).unwrap().roles.contains(&role));

        assert_eq!(db.add_role("Doe, John", "Omega (2010)", "Cameo").unwrap(), None);
        assert_eq!(db.movie_lookup_errors(), 1);
    }

    #[test]
    fn test_traversal() {
        let mut db = loaded();
        db.add_actor("Roe, Jane");
        db.add_role("Roe, Jane", "Beta (2001)", "Villain").unwrap();
        db.add_actor("Poe, Al");

        let films: Vec<&str> = db
            .filmography(0)
            .unwrap()
            .into_iter()
            .map(|(_, movie)| &*movie.name)
            .collect();
        assert_eq!(films, vec!["Alpha (2000)", "Beta (2001)"]);

        let cast: Vec<(&str, &str)> = db
            .cast(1)
            .unwrap()
            .into_iter()
            .map(|(role, actor)| (&*actor.name, role.info.as_str()))
            .collect();
        assert_eq!(cast, vec![("Doe, John", "Support"), ("Roe, Jane", "Villain")]);

        assert_eq!(db.co_stars(0).unwrap(), vec![1]);
        assert_eq!(db.co_stars(1).unwrap(), vec![0]);
        assert!(db.co_stars(2).unwrap().is_empty());
        assert!(db.filmography(99).is_err());
    }

    #[test]
    fn test_database_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Database>();
    }
}
