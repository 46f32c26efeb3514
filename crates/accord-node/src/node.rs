//! Accord Node - the launch coordination daemon.
//!
//! Periodically rebuilds the discovery trust graph, prints the resulting
//! ranking and reports whether the active consensus policy considers the
//! network ready to launch.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use accord_cache::ContentCache;
use accord_consensus::{consensus_launch_data, ConsensusPolicy, WeightQuorum, WeightRanking};
use accord_discovery::validate_local_document;
use accord_graph::{Network, TrustGraph, UpdateOutcome};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::store_dir::DirStore;
use crate::table::render_ranking;

/// Configuration for an Accord node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Data directory; the content cache lives under it.
    pub data_dir: PathBuf,

    /// The operator's own discovery document.
    pub root_document: PathBuf,

    /// Directory the discovery store is served from.
    pub store_dir: PathBuf,

    /// Resolve names through the cache when possible.
    pub use_cache: bool,

    /// Interval between rebuild passes.
    pub refresh: Duration,

    /// Minimum top-peer weight required for launch, if any. Without it
    /// the ranking itself counts as agreement.
    pub quorum_weight: Option<f64>,

    /// Rebuild and print once, then exit.
    pub run_once: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl NodeConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(
            std::env::var("ACCORD_DATA_DIR").unwrap_or_else(|_| "./accord-data".to_string()),
        );

        let root_document = PathBuf::from(
            std::env::var("ACCORD_ROOT_DISCOVERY")
                .unwrap_or_else(|_| "./my_discovery.yaml".to_string()),
        );

        let store_dir = std::env::var("ACCORD_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("store"));

        let use_cache = std::env::var("ACCORD_USE_CACHE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let refresh = std::env::var("ACCORD_REFRESH_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .map(Duration::from_secs)
            .expect("Invalid ACCORD_REFRESH_SECS");

        let quorum_weight = std::env::var("ACCORD_QUORUM_WEIGHT")
            .ok()
            .map(|v| v.parse().expect("Invalid ACCORD_QUORUM_WEIGHT"));

        let run_once = std::env::var("ACCORD_RUN_ONCE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            data_dir,
            root_document,
            store_dir,
            use_cache,
            refresh,
            quorum_weight,
            run_once,
        }
    }
}

/// An Accord node instance.
pub struct AccordNode {
    network: Arc<Mutex<Network<DirStore>>>,
    policy: Box<dyn ConsensusPolicy + Send + Sync>,
    config: NodeConfig,
}

impl AccordNode {
    /// Create a new node from its configuration.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let cache = ContentCache::open(config.data_dir.join("cache"))?;
        let store = DirStore::new(&config.store_dir);
        let network = Network::new(store, cache, &config.root_document)
            .with_cache_reads(config.use_cache);

        let policy: Box<dyn ConsensusPolicy + Send + Sync> = match config.quorum_weight {
            Some(minimum) => Box::new(WeightQuorum::new(minimum)),
            None => Box::new(WeightRanking),
        };

        Ok(Self {
            network: Arc::new(Mutex::new(network)),
            policy,
            config,
        })
    }

    /// Run the node: rebuild on an interval, or once in run-once mode.
    pub async fn run(self) -> Result<()> {
        info!("Accord node starting");
        info!("  Root document: {:?}", self.config.root_document);
        info!("  Store: {:?}", self.config.store_dir);
        info!("  Data: {:?}", self.config.data_dir);

        let own = validate_local_document(&self.config.root_document)?;
        info!(account = %own.account_name, organization = %own.organization_name, "root document validated");

        if self.config.run_once {
            return self.refresh_once().await;
        }

        let mut ticker = tokio::time::interval(self.config.refresh);
        loop {
            ticker.tick().await;
            if let Err(err) = self.refresh_once().await {
                error!(error = %err, "graph rebuild failed");
            }
        }
    }

    /// One rebuild pass: update the graph off the async runtime, then
    /// report the ranking and the consensus verdict.
    pub async fn refresh_once(&self) -> Result<()> {
        let network = Arc::clone(&self.network);
        let (outcome, graph) = tokio::task::spawn_blocking(move || {
            let mut network = network.lock().unwrap_or_else(|poison| poison.into_inner());
            let outcome = network.update_graph()?;
            Ok::<_, accord_graph::Error>((outcome, network.graph().cloned()))
        })
        .await
        .map_err(|err| Error::Rebuild(err.to_string()))??;

        if outcome == UpdateOutcome::Throttled {
            debug!("rebuild throttled, ranking unchanged");
            return Ok(());
        }
        let Some(graph) = graph else {
            return Ok(());
        };
        self.report(&graph);
        Ok(())
    }

    fn report(&self, graph: &TrustGraph) {
        info!(peers = graph.len(), "peer network ranked");
        println!("{}", render_ranking(graph));

        if self.policy.reached(graph) {
            match consensus_launch_data(graph) {
                Ok(launch) => info!(
                    boot_sequence = %launch.boot_sequence,
                    snapshot = %launch.snapshot,
                    "launch consensus reached"
                ),
                Err(err) => warn!(error = %err, "consensus reached but no launch data"),
            }
        } else {
            info!("launch consensus not reached yet");
        }
    }
}
