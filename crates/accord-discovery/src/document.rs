use std::collections::BTreeMap;

use accord_refs::{ContentRef, NameRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A discovery document failed to deserialize.
#[derive(Debug, Error)]
#[error("malformed discovery document: {0}")]
pub struct ParseError(#[from] serde_yaml::Error);

/// A peer's published discovery document.
///
/// Every field is optional on the wire. Empty values are legal at parse
/// time and rejected later by validation or by artifact fetching, which
/// keeps "document does not deserialize" distinct from "document is
/// semantically wrong".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    /// The account name this organization claims on the new chain.
    /// Claimed by exactly one document in a valid graph.
    #[serde(default)]
    pub account_name: String,

    /// Human-readable organization name.
    #[serde(default)]
    pub organization_name: String,

    /// Whether this document targets a test network.
    #[serde(default)]
    pub testnet: bool,

    /// Whether this document targets the main network.
    #[serde(default)]
    pub mainnet: bool,

    #[serde(default)]
    pub launch_data: LaunchData,
}

impl Discovery {
    /// Parse a document from raw YAML bytes.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_yaml::from_slice(bytes)?)
    }

    /// Serialize the document back to YAML.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// The genesis configuration a document stands behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchData {
    /// Boot sequence contents.
    #[serde(default)]
    pub boot_sequence: ContentRef,

    /// Genesis state snapshot.
    #[serde(default)]
    pub snapshot: ContentRef,

    /// System contracts, keyed by contract name.
    #[serde(default)]
    pub contracts: BTreeMap<String, ContractRefs>,

    /// Outgoing vouches for other organizations.
    #[serde(default)]
    pub peers: Vec<PeerLink>,
}

/// Content references for one contract's artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRefs {
    #[serde(default)]
    pub abi: ContentRef,
    #[serde(default)]
    pub code: ContentRef,
}

/// A directed, weighted vouch for another organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerLink {
    /// Name under which the target publishes its discovery document.
    #[serde(default)]
    pub discovery_link: NameRef,

    /// Free-form note about why this peer is vouched for.
    #[serde(default)]
    pub comment: String,

    /// Vote weight. Only weights within `[0, 1]` ever count.
    #[serde(default)]
    pub weight: f64,
}
