//! Launch Consensus Policies
//!
//! Decides when the ranked trust graph counts as agreement, and which
//! peer's launch data becomes the canonical genesis configuration.
//!
//! # Policy Boundary
//!
//! Agreement detection sits behind [`ConsensusPolicy`] so the launch
//! loop never hardcodes a notion of "enough". The current default,
//! [`WeightRanking`], simply treats the weight ranking itself as
//! sufficient agreement. It is a placeholder, not a Byzantine
//! fault-tolerant protocol; a real quorum algorithm can replace it
//! without touching traversal or aggregation.
//!
//! # Selection
//!
//! Whatever the policy, the configuration that launches is always the
//! highest ranked peer's launch data, obtained through
//! [`consensus_launch_data`].

mod policy;
mod select;

pub use policy::{ConsensusPolicy, WeightQuorum, WeightRanking};
pub use select::{consensus_launch_data, EmptyGraphError};
