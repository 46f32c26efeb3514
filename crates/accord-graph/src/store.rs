//! The discovery store boundary.
//!
//! The graph engine fetches bytes through this trait and knows nothing
//! about transports. Production backends talk to a distributed
//! content-addressed store; tests and offline tooling use
//! [`MemoryStore`].

use std::collections::HashMap;

use accord_refs::{ContentRef, NameRef};
use thiserror::Error;

/// A store lookup failed.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store has no entry for the requested reference.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport or backend failure.
    #[error("store error: {0}")]
    Backend(String),
}

/// Resolves references to raw document or artifact bytes.
pub trait DiscoveryStore {
    /// Fetch immutable content by its content reference.
    fn get_by_hash(&self, reference: &ContentRef) -> Result<Vec<u8>, StoreError>;

    /// Resolve a name to the bytes currently published under it.
    fn get_by_name(&self, name: &NameRef) -> Result<Vec<u8>, StoreError>;
}

/// In-memory store, used by tests and offline graph inspection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: HashMap<ContentRef, Vec<u8>>,
    names: HashMap<NameRef, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert content, returning the reference it is now addressable by.
    pub fn insert_content(&mut self, bytes: Vec<u8>) -> ContentRef {
        let reference = ContentRef::for_bytes(&bytes);
        self.content.insert(reference.clone(), bytes);
        reference
    }

    /// Publish bytes under a name, replacing any previous publication.
    pub fn publish_name(&mut self, name: NameRef, bytes: Vec<u8>) {
        self.names.insert(name, bytes);
    }
}

impl DiscoveryStore for MemoryStore {
    fn get_by_hash(&self, reference: &ContentRef) -> Result<Vec<u8>, StoreError> {
        self.content
            .get(reference)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(reference.to_string()))
    }

    fn get_by_name(&self, name: &NameRef) -> Result<Vec<u8>, StoreError> {
        self.names
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}
