use accord_discovery::LaunchData;
use accord_graph::TrustGraph;
use thiserror::Error;

/// No peers have been discovered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("trust graph is empty")]
pub struct EmptyGraphError;

/// The launch data of the highest ranked peer.
///
/// This is the configuration the chain boots from once the active
/// policy reports agreement.
pub fn consensus_launch_data(graph: &TrustGraph) -> Result<&LaunchData, EmptyGraphError> {
    graph
        .ordered_peers()
        .next()
        .map(|peer| &peer.discovery.launch_data)
        .ok_or(EmptyGraphError)
}
