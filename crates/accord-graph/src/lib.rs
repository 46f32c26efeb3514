//! Accord Trust Graph
//!
//! Builds a ranked trust graph from the web of discovery documents that
//! organizations publish while bootstrapping a new chain. Starting from
//! the operator's own document, the engine fetches every referenced
//! document and artifact, verifies graph-wide identity uniqueness, sums
//! weighted vouches into per-peer totals and produces a deterministic
//! ranking.
//!
//! # Rebuild Lifecycle
//!
//! A rebuild is all or nothing. [`Network::update_graph`] walks the
//! whole graph into fresh per-build state and commits the finished
//! [`TrustGraph`] only on full success; any error leaves the previously
//! committed graph authoritative. Attempts are throttled by a staleness
//! window so callers can invoke it eagerly.
//!
//! # Trust Model
//!
//! Content references are never taken from the wire: every fetched blob
//! is re-hashed locally and keyed by what it actually is. Name
//! resolutions are memoized per build, one peer exists per distinct
//! content hash, and no peer can contribute vote weight to itself.

mod build;
mod error;
mod network;
mod peer;
mod store;

pub use build::{TrustGraph, BROKEN_DISCOVERY_FILE};
pub use error::{Error, Result};
pub use network::{Network, UpdateOutcome, DEFAULT_STALENESS_WINDOW};
pub use peer::Peer;
pub use store::{DiscoveryStore, MemoryStore, StoreError};
