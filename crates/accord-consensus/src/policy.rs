use accord_graph::TrustGraph;

/// Decides whether a ranked graph constitutes agreement to launch from.
pub trait ConsensusPolicy {
    fn reached(&self, graph: &TrustGraph) -> bool;
}

/// Placeholder policy: the weight ranking itself is taken as agreement.
///
/// Always answers yes. Kept as the default until a real quorum
/// algorithm lands.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightRanking;

impl ConsensusPolicy for WeightRanking {
    fn reached(&self, _graph: &TrustGraph) -> bool {
        true
    }
}

/// Requires the top ranked peer to carry at least a minimum total vote
/// weight before launch proceeds.
///
/// The comparison is inclusive, so a minimum of `0.0` is reached by any
/// non-empty graph.
#[derive(Debug, Clone, Copy)]
pub struct WeightQuorum {
    minimum_weight: f64,
}

impl WeightQuorum {
    pub fn new(minimum_weight: f64) -> Self {
        Self { minimum_weight }
    }
}

impl ConsensusPolicy for WeightQuorum {
    fn reached(&self, graph: &TrustGraph) -> bool {
        graph
            .ordered_peers()
            .next()
            .is_some_and(|peer| peer.total_weight >= self.minimum_weight)
    }
}
