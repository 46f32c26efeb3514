//! Accord Node - Launch Coordination Daemon
//!
//! A daemon that walks the web of discovery documents published by
//! launch candidates, ranks them by accumulated vote weight and reports
//! when the network has agreed on a launch configuration.
//!
//! # Architecture
//!
//! - **Store**: Directory-backed discovery store ([`DirStore`])
//! - **Graph**: Periodic trust graph rebuilds through `accord-graph`
//! - **Consensus**: Pluggable launch policies from `accord-consensus`
//! - **Table**: Plain-text ranking reports for operators
//!
//! # Example
//!
//! ```no_run
//! use accord_node::{AccordNode, NodeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::default();
//!     let node = AccordNode::new(config)?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod node;
pub mod store_dir;
pub mod table;
pub mod error;

pub use error::{Error, Result};
pub use node::{AccordNode, NodeConfig};
pub use store_dir::DirStore;
pub use table::render_ranking;
