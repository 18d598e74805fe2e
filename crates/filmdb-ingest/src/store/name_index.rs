//! Name to row id lookup
//!
//! Keys are `Arc<str>` handles shared with the row that owns the name, so the
//! text is stored once and stays put no matter how the table grows.

use std::collections::hash_map::{Entry, HashMap};
use std::hash::{BuildHasherDefault, Hasher};
use std::sync::Arc;

use super::table::RowId;

const DJB2_SEED: u64 = 5381;

/// djb2 over raw bytes: `h = h * 33 + byte`
#[derive(Debug, Clone, Copy)]
pub struct Djb2Hasher(u64);

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self(DJB2_SEED)
    }
}

impl Hasher for Djb2Hasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(33).wrapping_add(u64::from(b));
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub type Djb2State = BuildHasherDefault<Djb2Hasher>;

/// Maps a name to the id of the row that declared it
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    map: HashMap<Arc<str>, RowId, Djb2State>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, Djb2State::default()),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    /// Bind `name` to `id`.
    ///
    /// The first binding of a name wins; returns `false` if the name was
    /// already bound.
    pub fn insert(&mut self, name: Arc<str>, id: RowId) -> bool {
        match self.map.entry(name) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(id);
                true
            },
        }
    }

    pub fn find(&self, name: &str) -> Option<RowId> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
