use accord_discovery::Discovery;
use accord_refs::{ContentRef, NameRef};

/// A node in the trust graph.
///
/// One peer exists per distinct document content hash in a build. The
/// hash is always recomputed locally from the bytes actually received,
/// so `discovery_file` can be trusted even when the store cannot.
#[derive(Debug, Clone, PartialEq)]
pub struct Peer {
    /// The parsed document this peer published.
    pub discovery: Discovery,

    /// Name the document was obtained under.
    pub discovery_link: NameRef,

    /// Locally computed content reference of the exact bytes received.
    pub discovery_file: ContentRef,

    /// Sum of valid incoming vote weights. Zero until aggregation runs.
    pub total_weight: f64,
}

impl Peer {
    pub fn new(discovery: Discovery, discovery_link: NameRef, discovery_file: ContentRef) -> Self {
        Self {
            discovery,
            discovery_link,
            discovery_file,
            total_weight: 0.0,
        }
    }

    pub fn account_name(&self) -> &str {
        &self.discovery.account_name
    }

    pub fn organization_name(&self) -> &str {
        &self.discovery.organization_name
    }
}
