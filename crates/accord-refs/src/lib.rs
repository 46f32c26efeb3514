//! Accord Reference Types
//!
//! Reference handles for the discovery graph. Two kinds exist:
//!
//! - [`ContentRef`]: an immutable content-addressed reference whose path
//!   component encodes a SHA2-256 multihash of the referenced bytes. A
//!   reference can always be recomputed from the content it names and
//!   never has to be taken on faith.
//! - [`NameRef`]: a mutable name handle whose resolution may change over
//!   time. The special `local <path>` form names a document on the
//!   operator's own filesystem and is never resolved over the network.
//!
//! # Content Addressing
//!
//! Hashing follows the multihash layout: a two-byte header (0x12 for
//! SHA2-256, 0x20 for the 32-byte digest length) followed by the digest,
//! the whole encoded with the Bitcoin base58 alphabet and mounted under
//! the `/ipfs/` scheme prefix.

mod content;
mod name;
mod sanitize;

pub use content::ContentRef;
pub use name::NameRef;
pub use sanitize::sanitize;
