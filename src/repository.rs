// 🗂️ Repository - in-memory map with key uniqueness
//
// All three desks key their entities by a natural identifier (username,
// user ID, license number, game ID). The repository enforces uniqueness on
// insert and surfaces missing keys as a "not found" error, so callers never
// mutate state behind a stale existence check.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

// ============================================================================
// REPOSITORY ERROR
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{0} already exists.")]
    Duplicate(&'static str),

    #[error("{0} not found.")]
    NotFound(&'static str),
}

// ============================================================================
// REPOSITORY
// ============================================================================

/// Key-uniqueness-enforcing map from a natural identifier to an entity.
///
/// The `label` names the entity in error messages ("Game ID", "Driver"),
/// so every desk reports duplicates and misses in the same shape.
/// No ordering guarantees; inserts are visible to subsequent lookups.
#[derive(Debug, Clone)]
pub struct Repository<K, V> {
    label: &'static str,
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Repository<K, V> {
    pub fn new(label: &'static str) -> Self {
        Repository {
            label,
            entries: HashMap::new(),
        }
    }

    /// Insert a new entity. Fails if the key is already present; the
    /// existing entity is never overwritten.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), RepositoryError> {
        if self.entries.contains_key(&key) {
            return Err(RepositoryError::Duplicate(self.label));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, RepositoryError>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries
            .get(key)
            .ok_or(RepositoryError::NotFound(self.label))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, RepositoryError>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries
            .get_mut(key)
            .ok_or(RepositoryError::NotFound(self.label))
    }

    /// Remove and return an entity. Fails if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, RepositoryError>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries
            .remove(key)
            .ok_or(RepositoryError::NotFound(self.label))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

// ============================================================================
// TESTS
// ============================================================================
