//! Directory-backed discovery store.
//!
//! Serves fetches from a local directory laid out like the content
//! cache: one file per sanitized reference string. Useful for offline
//! rehearsals and for development against a snapshot of the real store,
//! without any network transport in the loop.

use std::fs;
use std::path::PathBuf;

use accord_graph::{DiscoveryStore, StoreError};
use accord_refs::{sanitize, ContentRef, NameRef};

/// A read-only store served from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn fetch(&self, reference: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.root.join(sanitize(reference));
        if !path.is_file() {
            return Err(StoreError::NotFound(reference.to_string()));
        }
        fs::read(&path).map_err(|err| StoreError::Backend(err.to_string()))
    }
}

impl DiscoveryStore for DirStore {
    fn get_by_hash(&self, reference: &ContentRef) -> Result<Vec<u8>, StoreError> {
        self.fetch(reference.as_str())
    }

    fn get_by_name(&self, name: &NameRef) -> Result<Vec<u8>, StoreError> {
        self.fetch(name.as_str())
    }
}
