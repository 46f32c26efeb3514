//! Error types for graph rebuilds.

use std::io;
use std::path::PathBuf;

use accord_discovery::{ParseError, ValidationError};
use accord_refs::{ContentRef, NameRef};
use thiserror::Error;

use crate::store::StoreError;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a graph rebuild.
///
/// Any of these surfaces from `update_graph` as a failed rebuild; the
/// previously committed graph, if one exists, stays authoritative.
#[derive(Debug, Error)]
pub enum Error {
    /// Cache access failed on a path where the result is required.
    #[error(transparent)]
    Cache(#[from] accord_cache::Error),

    /// Reading the local root document failed.
    #[error("local io error at {path}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fetched document failed to deserialize.
    #[error("parsing document from {name}: {source}")]
    Parse {
        name: NameRef,
        #[source]
        source: ParseError,
    },

    /// A fetched document violates the semantic rules.
    #[error("validating document from {name}: {source}")]
    Validation {
        name: NameRef,
        #[source]
        source: ValidationError,
    },

    /// An artifact carries no content reference.
    #[error("{artifact}: no content reference provided")]
    EmptyReference { artifact: String },

    /// An artifact reference lacks the content scheme prefix.
    #[error("{artifact}: reference {reference} lacks the /ipfs/ prefix")]
    MalformedReference {
        artifact: String,
        reference: ContentRef,
    },

    /// Fetching artifact content from the store failed.
    #[error("{artifact}: fetching {reference}: {source}")]
    FetchContent {
        artifact: String,
        reference: ContentRef,
        #[source]
        source: StoreError,
    },

    /// Resolving a peer's name to its current document failed.
    #[error("resolving {name}: {source}")]
    ResolveName {
        name: NameRef,
        #[source]
        source: StoreError,
    },

    /// Two distinct documents claim the same account name.
    #[error("two peers claim the account name {account:?}: {first} and {second}")]
    DuplicateIdentity {
        account: String,
        first: ContentRef,
        second: ContentRef,
    },

    /// A validated link's target name was never resolved during traversal.
    #[error("aggregating weights: link target {0} was never resolved")]
    UnresolvedLinkTarget(NameRef),

    /// A resolved content reference has no peer in the built graph.
    #[error("aggregating weights: no discovered peer for {0}")]
    MissingLinkPeer(ContentRef),
}
