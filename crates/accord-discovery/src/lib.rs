//! Accord Discovery Documents
//!
//! The document model for the launch network. Each organization publishes
//! a YAML discovery document describing its identity claim and the genesis
//! configuration it stands behind: the boot sequence, the state snapshot,
//! contract artifacts, and a list of weighted links vouching for other
//! organizations.
//!
//! Parsing is deliberately lenient: missing fields default to empty values
//! and unknown fields are ignored, so a structurally valid document always
//! parses. Semantic problems (an empty identity claim, conflicting network
//! flags) are caught by [`Discovery::validate`], and missing artifact
//! references surface later when someone tries to fetch them.

mod document;
mod preflight;
mod validate;

pub use document::{ContractRefs, Discovery, LaunchData, ParseError, PeerLink};
pub use preflight::{validate_local_document, PreflightError};
pub use validate::ValidationError;
