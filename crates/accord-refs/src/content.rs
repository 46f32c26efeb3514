use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Multihash function code for SHA2-256.
const MULTIHASH_SHA2_256: u8 = 0x12;

/// SHA2-256 digest length in bytes.
const MULTIHASH_DIGEST_LEN: u8 = 0x20;

/// An immutable content-addressed reference of the form `/ipfs/<base58>`.
///
/// The base58 payload encodes a SHA2-256 multihash of the referenced
/// bytes. References carried inside remote documents are untrusted
/// claims; [`ContentRef::for_bytes`] recomputes the canonical reference
/// for a blob, so stores and caches are always keyed by what the bytes
/// actually hash to.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Scheme prefix shared by every well-formed content reference.
    pub const PREFIX: &'static str = "/ipfs/";

    /// Wrap an existing reference string without checking it.
    ///
    /// Documents may carry arbitrary strings here. Validity is only
    /// decided when someone tries to fetch the reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Compute the canonical reference for a blob of bytes.
    pub fn for_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut multihash = Vec::with_capacity(2 + digest.len());
        multihash.push(MULTIHASH_SHA2_256);
        multihash.push(MULTIHASH_DIGEST_LEN);
        multihash.extend_from_slice(&digest);
        Self(format!(
            "{}{}",
            Self::PREFIX,
            bs58::encode(multihash).into_string()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the reference carries the `/ipfs/` scheme prefix.
    pub fn is_wellformed(&self) -> bool {
        self.0.starts_with(Self::PREFIX)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContentRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl From<&str> for ContentRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl AsRef<str> for ContentRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
