//! Accord Content Cache
//!
//! A file-backed cache keyed by reference strings. Each reference maps
//! to exactly one file under a root directory, named by the sanitized
//! form of the reference, so the cache layout is stable across runs and
//! inspectable with ordinary shell tools.
//!
//! The cache stores two kinds of entries: content bytes keyed by their
//! content reference, and name-resolution records keyed by a name
//! reference whose file holds the content reference string it resolved
//! to last.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use accord_refs::sanitize;
use thiserror::Error;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during cache access.
#[derive(Debug, Error)]
pub enum Error {
    /// Local filesystem access failed.
    #[error("local io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File-backed store of fetched content, one file per reference.
pub struct ContentCache {
    root: PathBuf,
}

impl ContentCache {
    /// Open the cache rooted at `path`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| Error::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Directory holding the cached files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location a reference maps to.
    pub fn path_for(&self, reference: &str) -> PathBuf {
        self.root.join(sanitize(reference))
    }

    /// Whether content for `reference` is present.
    pub fn contains(&self, reference: &str) -> bool {
        self.path_for(reference).is_file()
    }

    /// Store `bytes` under `reference`, replacing any previous entry.
    pub fn write(&self, reference: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(reference);
        fs::write(&path, bytes).map_err(|source| Error::Io { path, source })
    }

    /// Read the entry stored under `reference`.
    pub fn read(&self, reference: &str) -> Result<Vec<u8>> {
        let path = self.path_for(reference);
        fs::read(&path).map_err(|source| Error::Io { path, source })
    }

    /// Open a streaming reader over the entry stored under `reference`.
    ///
    /// Useful for large artifacts like state snapshots, where callers
    /// should not pull the whole blob into memory at once.
    pub fn reader(&self, reference: &str) -> Result<File> {
        let path = self.path_for(reference);
        File::open(&path).map_err(|source| Error::Io { path, source })
    }
}
