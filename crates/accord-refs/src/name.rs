use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A mutable name handle resolved through the discovery store.
///
/// What a name points at can change between fetches, so names are only
/// trusted after the content behind them has been re-hashed. The
/// `local <path>` sentinel names the operator's own document on disk;
/// it is read directly and never resolved over the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameRef(String);

impl NameRef {
    /// Prefix marking a reference to a local file.
    pub const LOCAL_PREFIX: &'static str = "local ";

    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Build the sentinel name for a document on the local filesystem.
    pub fn local(path: &Path) -> Self {
        Self(format!("{}{}", Self::LOCAL_PREFIX, path.display()))
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with(Self::LOCAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NameRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl From<&str> for NameRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl AsRef<str> for NameRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
