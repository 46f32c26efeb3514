//! Accord Node binary
//!
//! A launch coordination daemon for the Accord network.

use accord_node::{AccordNode, NodeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accord_node=info,accord_graph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Accord Node");

    // Load config (TODO: from args/file)
    let config = NodeConfig::default();

    // Create and run node
    let node = AccordNode::new(config)?;
    node.run().await?;

    Ok(())
}
