//! The long-lived network handle.
//!
//! [`Network`] owns the store and cache, throttles rebuild attempts and
//! commits a finished [`TrustGraph`] only when the whole rebuild
//! succeeded. A failed rebuild leaves the previously committed graph in
//! place as the authoritative state.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use accord_cache::ContentCache;
use tracing::{debug, info};

use crate::build::{GraphBuild, TrustGraph};
use crate::error::Result;
use crate::store::DiscoveryStore;

/// Minimum interval between graph rebuild attempts.
pub const DEFAULT_STALENESS_WINDOW: Duration = Duration::from_secs(2 * 60);

/// What an `update_graph` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A fresh graph was built and committed.
    Rebuilt,
    /// The last attempt is still fresh; nothing was done.
    Throttled,
}

/// Traverses and ranks the discovery graph on demand.
///
/// Not internally synchronized. Callers running rebuilds from several
/// tasks must serialize access with their own lock.
pub struct Network<S> {
    store: S,
    cache: ContentCache,
    use_cache: bool,
    root_document: PathBuf,
    staleness_window: Duration,
    last_attempt: Option<Instant>,
    graph: Option<TrustGraph>,
}

impl<S: DiscoveryStore> Network<S> {
    /// Create a network handle reading the operator's own document from
    /// `root_document`.
    pub fn new(store: S, cache: ContentCache, root_document: impl Into<PathBuf>) -> Self {
        Self {
            store,
            cache,
            use_cache: false,
            root_document: root_document.into(),
            staleness_window: DEFAULT_STALENESS_WINDOW,
            last_attempt: None,
            graph: None,
        }
    }

    /// Resolve names through the local cache when a cached resolution
    /// exists instead of hitting the store.
    #[must_use]
    pub fn with_cache_reads(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Override the minimum interval between rebuild attempts.
    #[must_use]
    pub fn with_staleness_window(mut self, window: Duration) -> Self {
        self.staleness_window = window;
        self
    }

    /// Rebuild the trust graph unless a rebuild was attempted within the
    /// staleness window.
    ///
    /// Every attempt, successful or not, restarts the window. On failure
    /// the previously committed graph stays in place.
    pub fn update_graph(&mut self) -> Result<UpdateOutcome> {
        if let Some(last) = self.last_attempt {
            if last.elapsed() < self.staleness_window {
                debug!("last rebuild attempt still fresh, skipping");
                return Ok(UpdateOutcome::Throttled);
            }
        }
        self.last_attempt = Some(Instant::now());

        let graph =
            GraphBuild::new(&self.store, &self.cache, self.use_cache).run(&self.root_document)?;
        info!(peers = graph.len(), "trust graph rebuilt");
        self.graph = Some(graph);
        Ok(UpdateOutcome::Rebuilt)
    }

    /// The last successfully committed graph, if any.
    pub fn graph(&self) -> Option<&TrustGraph> {
        self.graph.as_ref()
    }

    /// The cache backing this network.
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }
}
