//! Row types

use std::sync::Arc;

use crate::store::RowId;

/// A movie, TV episode, or video game from the movie list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    /// Title with its qualifiers, exactly as listed
    pub name: Arc<str>,
    /// Year field as listed; may be a range or `????`
    pub year: String,
    /// Ids of the roles played in this movie
    pub roles: Vec<RowId>,
}

impl Movie {
    pub fn new(name: Arc<str>, year: impl Into<String>) -> Self {
        Self {
            name,
            year: year.into(),
            roles: Vec::new(),
        }
    }
}

/// An actor or actress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: Arc<str>,
    /// Ids of this actor's roles, in file order
    pub roles: Vec<RowId>,
}

impl Actor {
    pub fn new(name: Arc<str>) -> Self {
        Self {
            name,
            roles: Vec::new(),
        }
    }
}

/// One actor's appearance in one movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub actor: RowId,
    pub movie: RowId,
    /// Character and billing text; empty when the list gives none
    pub info: String,
}
