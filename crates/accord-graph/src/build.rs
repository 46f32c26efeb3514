//! Per-rebuild traversal engine.
//!
//! Every rebuild constructs a fresh [`GraphBuild`], walks the graph with
//! an explicit work queue, then freezes the result into a [`TrustGraph`].
//! Nothing here touches previously committed state, so a failed rebuild
//! leaves the last good graph in place.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

use accord_cache::ContentCache;
use accord_discovery::{Discovery, PeerLink};
use accord_refs::{ContentRef, NameRef};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::peer::Peer;
use crate::store::DiscoveryStore;

/// Filename under the cache directory where the raw bytes of an
/// unparseable document are kept for offline inspection.
pub const BROKEN_DISCOVERY_FILE: &str = "broken_discovery.yaml";

/// State accumulated while walking one graph rebuild.
pub(crate) struct GraphBuild<'a, S> {
    store: &'a S,
    cache: &'a ContentCache,
    use_cache: bool,
    /// Name resolution memo. A name resolved once in a build is never
    /// fetched again in that build.
    names: HashMap<NameRef, ContentRef>,
    /// One peer per distinct document content hash.
    peers: HashMap<ContentRef, Peer>,
    /// Discovered documents whose artifacts and links are still pending.
    queue: VecDeque<ContentRef>,
}

impl<'a, S: DiscoveryStore> GraphBuild<'a, S> {
    pub(crate) fn new(store: &'a S, cache: &'a ContentCache, use_cache: bool) -> Self {
        Self {
            store,
            cache,
            use_cache,
            names: HashMap::new(),
            peers: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// Walk the whole graph from the root document, then verify, weigh
    /// and rank the discovered peers.
    pub(crate) fn run(mut self, root_document: &Path) -> Result<TrustGraph> {
        let root = self.seed_root(root_document)?;
        while let Some(reference) = self.queue.pop_front() {
            self.admit_peer(&reference)?;
        }
        self.verify()?;
        self.aggregate()?;
        let ranked = self.rank();
        Ok(TrustGraph {
            root,
            names: self.names,
            peers: self.peers,
            ranked,
        })
    }

    /// Load the operator's own document, register it as the root peer
    /// and queue it for traversal.
    fn seed_root(&mut self, root_document: &Path) -> Result<ContentRef> {
        let raw = fs::read(root_document).map_err(|source| Error::LocalIo {
            path: root_document.to_path_buf(),
            source,
        })?;

        let sentinel = NameRef::local(root_document);
        let discovery = Discovery::from_yaml(&raw).map_err(|source| Error::Parse {
            name: sentinel.clone(),
            source,
        })?;

        let reference = ContentRef::for_bytes(&raw);
        self.cache.write(reference.as_str(), &raw)?;
        self.cache
            .write(sentinel.as_str(), reference.as_str().as_bytes())?;

        self.names.insert(sentinel.clone(), reference.clone());
        self.peers.insert(
            reference.clone(),
            Peer::new(discovery, sentinel, reference.clone()),
        );
        self.queue.push_back(reference.clone());
        Ok(reference)
    }

    /// Validate a discovered document, download every artifact it
    /// references and follow its outgoing links.
    fn admit_peer(&mut self, reference: &ContentRef) -> Result<()> {
        let Some(peer) = self.peers.get(reference) else {
            return Ok(());
        };
        info!(
            account = peer.account_name(),
            organization = peer.organization_name(),
            name = %peer.discovery_link,
            "loading launch data"
        );
        peer.discovery
            .validate()
            .map_err(|source| Error::Validation {
                name: peer.discovery_link.clone(),
                source,
            })?;
        let launch = peer.discovery.launch_data.clone();

        self.download_content_ref("boot_sequence", &launch.boot_sequence)?;
        self.download_content_ref("snapshot", &launch.snapshot)?;
        for (contract, refs) in &launch.contracts {
            self.download_content_ref(&format!("contract {contract:?} abi"), &refs.abi)?;
            self.download_content_ref(&format!("contract {contract:?} code"), &refs.code)?;
        }

        debug!(links = launch.peers.len(), "document links");
        for link in &launch.peers {
            self.fetch_link(link)?;
        }
        Ok(())
    }

    /// Resolve one weighted link, memoizing the name resolution and
    /// registering a new peer when the content has not been seen before.
    fn fetch_link(&mut self, link: &PeerLink) -> Result<()> {
        debug!(
            name = %link.discovery_link,
            comment = %link.comment,
            weight = link.weight,
            "following link"
        );

        if !(0.0..=1.0).contains(&link.weight) {
            debug!(weight = link.weight, "weight outside [0, 1], link excluded from graph");
            return Ok(());
        }
        if self.names.contains_key(&link.discovery_link) {
            debug!(name = %link.discovery_link, "name already resolved this build");
            return Ok(());
        }
        if link.discovery_link.is_local() {
            debug!(name = %link.discovery_link, "local name outside the root document, skipping");
            return Ok(());
        }

        let raw = if self.use_cache && self.cache.contains(link.discovery_link.as_str()) {
            let resolved = self.cache.read(link.discovery_link.as_str())?;
            let resolved = ContentRef::new(String::from_utf8_lossy(&resolved).into_owned());
            self.cache.read(resolved.as_str())?
        } else {
            self.store
                .get_by_name(&link.discovery_link)
                .map_err(|source| Error::ResolveName {
                    name: link.discovery_link.clone(),
                    source,
                })?
        };

        let reference = ContentRef::for_bytes(&raw);

        if let Err(err) = self.cache.write(reference.as_str(), &raw) {
            warn!(error = %err, "failed to cache document content");
        }
        if let Err(err) = self
            .cache
            .write(link.discovery_link.as_str(), reference.as_str().as_bytes())
        {
            warn!(error = %err, "failed to cache name resolution");
        }

        let discovery = match Discovery::from_yaml(&raw) {
            Ok(discovery) => discovery,
            Err(source) => {
                let kept = self.cache.root().join(BROKEN_DISCOVERY_FILE);
                match fs::write(&kept, &raw) {
                    Ok(()) => {
                        warn!(path = %kept.display(), "unparseable document, raw bytes kept for inspection")
                    }
                    Err(err) => warn!(error = %err, "failed to keep broken document bytes"),
                }
                return Err(Error::Parse {
                    name: link.discovery_link.clone(),
                    source,
                });
            }
        };

        self.names
            .insert(link.discovery_link.clone(), reference.clone());

        if self.peers.contains_key(&reference) {
            debug!(
                account = %discovery.account_name,
                "content already discovered under another name"
            );
            return Ok(());
        }

        debug!(
            account = %discovery.account_name,
            organization = %discovery.organization_name,
            "adding peer"
        );
        self.peers.insert(
            reference.clone(),
            Peer::new(discovery, link.discovery_link.clone(), reference.clone()),
        );
        self.queue.push_back(reference);
        Ok(())
    }

    /// Ensure the bytes behind an artifact reference are present in the
    /// cache, fetching them from the store when missing.
    fn download_content_ref(&self, artifact: &str, reference: &ContentRef) -> Result<()> {
        if reference.is_empty() {
            return Err(Error::EmptyReference {
                artifact: artifact.to_string(),
            });
        }
        if !reference.is_wellformed() {
            return Err(Error::MalformedReference {
                artifact: artifact.to_string(),
                reference: reference.clone(),
            });
        }
        if self.cache.contains(reference.as_str()) {
            return Ok(());
        }
        let bytes = self
            .store
            .get_by_hash(reference)
            .map_err(|source| Error::FetchContent {
                artifact: artifact.to_string(),
                reference: reference.clone(),
                source,
            })?;
        if let Err(err) = self.cache.write(reference.as_str(), &bytes) {
            warn!(error = %err, artifact, "failed to cache artifact");
        }
        debug!(artifact, reference = %reference, len = bytes.len(), "artifact downloaded");
        Ok(())
    }

    /// Every account name must be claimed by exactly one document.
    fn verify(&self) -> Result<()> {
        let mut claims: Vec<(&str, &ContentRef)> = self
            .peers
            .values()
            .map(|peer| (peer.account_name(), &peer.discovery_file))
            .collect();
        claims.sort_by(|a, b| a.1.cmp(b.1));

        let mut seen: HashMap<&str, &ContentRef> = HashMap::new();
        for (account, reference) in claims {
            if let Some(first) = seen.insert(account, reference) {
                return Err(Error::DuplicateIdentity {
                    account: account.to_string(),
                    first: first.clone(),
                    second: reference.clone(),
                });
            }
        }
        Ok(())
    }

    /// Sum valid incoming link weights into each target peer.
    ///
    /// A pure commutative summation over validated links; the totals do
    /// not depend on the order peers or links are visited in.
    fn aggregate(&mut self) -> Result<()> {
        let mut sources: Vec<(ContentRef, String, Vec<PeerLink>)> = self
            .peers
            .values()
            .map(|peer| {
                (
                    peer.discovery_file.clone(),
                    peer.discovery.account_name.clone(),
                    peer.discovery.launch_data.peers.clone(),
                )
            })
            .collect();
        sources.sort_by(|a, b| a.0.cmp(&b.0));

        for (source_file, source_account, links) in sources {
            for link in links {
                if !(0.0..=1.0).contains(&link.weight) {
                    debug!(
                        name = %link.discovery_link,
                        weight = link.weight,
                        "weight outside [0, 1], link not counted"
                    );
                    continue;
                }
                let Some(target_file) = self.names.get(&link.discovery_link) else {
                    if link.discovery_link.is_local() {
                        continue;
                    }
                    return Err(Error::UnresolvedLinkTarget(link.discovery_link.clone()));
                };
                if *target_file == source_file {
                    debug!(name = %link.discovery_link, "self vouch by content, not counted");
                    continue;
                }
                let Some(target) = self.peers.get_mut(target_file) else {
                    return Err(Error::MissingLinkPeer(target_file.clone()));
                };
                if target.account_name() == source_account {
                    debug!(account = %source_account, "self vouch by account name, not counted");
                    continue;
                }
                target.total_weight += link.weight;
                debug!(
                    account = target.account_name(),
                    added = link.weight,
                    total = target.total_weight,
                    "weight added"
                );
            }
        }
        Ok(())
    }

    /// Deterministic ranking: total weight descending, document content
    /// reference ascending on ties.
    fn rank(&self) -> Vec<ContentRef> {
        let mut ranked: Vec<&Peer> = self.peers.values().collect();
        ranked.sort_by(|a, b| {
            b.total_weight
                .total_cmp(&a.total_weight)
                .then_with(|| a.discovery_file.cmp(&b.discovery_file))
        });
        ranked
            .into_iter()
            .map(|peer| peer.discovery_file.clone())
            .collect()
    }
}

/// An immutable, fully verified and ranked build of the trust graph.
///
/// The default value is the empty graph, as before any rebuild has
/// succeeded.
#[derive(Debug, Clone, Default)]
pub struct TrustGraph {
    root: ContentRef,
    names: HashMap<NameRef, ContentRef>,
    peers: HashMap<ContentRef, Peer>,
    ranked: Vec<ContentRef>,
}

impl TrustGraph {
    /// Content reference of the operator's own document.
    pub fn root_file(&self) -> &ContentRef {
        &self.root
    }

    /// Number of discovered peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Look up a peer by the content reference of its document.
    pub fn peer(&self, reference: &ContentRef) -> Option<&Peer> {
        self.peers.get(reference)
    }

    /// What a name resolved to during this build.
    pub fn resolve(&self, name: &NameRef) -> Option<&ContentRef> {
        self.names.get(name)
    }

    /// Content references of all discovered peers, best ranked first.
    pub fn ranked(&self) -> &[ContentRef] {
        &self.ranked
    }

    /// Peers in rank order, best first.
    pub fn ordered_peers(&self) -> impl Iterator<Item = &Peer> {
        self.ranked
            .iter()
            .filter_map(|reference| self.peers.get(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_discovery::LaunchData;
    use crate::store::MemoryStore;
    use proptest::prelude::*;
    use tempfile::{tempdir, TempDir};

    fn doc(account: &str, links: &[(&str, f64)]) -> Discovery {
        Discovery {
            account_name: account.to_string(),
            organization_name: format!("{account} org"),
            testnet: true,
            launch_data: LaunchData {
                peers: links
                    .iter()
                    .map(|(name, weight)| PeerLink {
                        discovery_link: NameRef::new(*name),
                        comment: String::new(),
                        weight: *weight,
                    })
                    .collect(),
                ..LaunchData::default()
            },
            ..Discovery::default()
        }
    }

    /// Give a document fetchable boot and snapshot artifacts.
    fn provision(store: &mut MemoryStore, mut disco: Discovery) -> Discovery {
        let tag = disco.account_name.clone();
        disco.launch_data.boot_sequence =
            store.insert_content(format!("boot {tag}").into_bytes());
        disco.launch_data.snapshot =
            store.insert_content(format!("snapshot {tag}").into_bytes());
        disco
    }

    /// Write the root document to disk and publish every other document
    /// under its name, then run a full build.
    fn build_graph(
        root: &Discovery,
        published: &[(&str, &Discovery)],
        store: &mut MemoryStore,
    ) -> (Result<TrustGraph>, TempDir) {
        let dir = tempdir().unwrap();
        let root_path = dir.path().join("my_discovery.yaml");
        fs::write(&root_path, root.to_yaml().unwrap()).unwrap();

        for (name, disco) in published {
            store.publish_name(
                NameRef::new(*name),
                disco.to_yaml().unwrap().into_bytes(),
            );
        }

        let cache = ContentCache::open(dir.path().join("cache")).unwrap();
        let graph = GraphBuild::new(store, &cache, false).run(&root_path);
        (graph, dir)
    }

    #[test]
    fn single_document_graph() {
        let mut store = MemoryStore::new();
        let root = provision(&mut store, doc("solo", &[]));
        let (graph, dir) = build_graph(&root, &[], &mut store);

        let graph = graph.unwrap();
        assert!(!graph.is_empty());
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.ranked(), &[graph.root_file().clone()]);
        let peer = graph.peer(graph.root_file()).unwrap();
        assert_eq!(peer.account_name(), "solo");
        assert_eq!(peer.total_weight, 0.0);

        let sentinel = NameRef::local(&dir.path().join("my_discovery.yaml"));
        assert_eq!(graph.resolve(&sentinel), Some(graph.root_file()));
    }

    #[test]
    fn mutual_vouching_accumulates_weights() {
        let mut store = MemoryStore::new();
        let a = provision(&mut store, doc("aaa", &[("/ipns/bbb", 0.3)]));
        let b = provision(&mut store, doc("bbb", &[("/ipns/aaa", 0.5)]));

        // aaa is both the root document on disk and published under its
        // public name, byte for byte identical.
        let (graph, _dir) = build_graph(&a, &[("/ipns/aaa", &a), ("/ipns/bbb", &b)], &mut store);

        let graph = graph.unwrap();
        assert_eq!(graph.len(), 2);
        let accounts: Vec<&str> = graph.ordered_peers().map(|p| p.account_name()).collect();
        assert_eq!(accounts, ["aaa", "bbb"]);
        let weights: Vec<f64> = graph.ordered_peers().map(|p| p.total_weight).collect();
        assert_eq!(weights, [0.5, 0.3]);
    }

    #[test]
    fn traversal_discovers_transitively() {
        let mut store = MemoryStore::new();
        let a = provision(&mut store, doc("aaa", &[("/ipns/bbb", 0.9)]));
        let b = provision(&mut store, doc("bbb", &[("/ipns/ccc", 0.8)]));
        let c = provision(&mut store, doc("ccc", &[]));

        let (graph, _dir) =
            build_graph(&a, &[("/ipns/bbb", &b), ("/ipns/ccc", &c)], &mut store);

        let graph = graph.unwrap();
        assert_eq!(graph.len(), 3);
        let accounts: Vec<&str> = graph.ordered_peers().map(|p| p.account_name()).collect();
        assert_eq!(accounts, ["bbb", "ccc", "aaa"]);
    }

    #[test]
    fn duplicate_account_names_abort() {
        let mut store = MemoryStore::new();
        let root = provision(
            &mut store,
            doc("rootacct", &[("/ipns/one", 0.4), ("/ipns/two", 0.4)]),
        );
        let mut c = provision(&mut store, doc("dupe", &[]));
        let mut d = provision(&mut store, doc("dupe", &[]));
        c.organization_name = "first org".to_string();
        d.organization_name = "second org".to_string();

        let (graph, _dir) =
            build_graph(&root, &[("/ipns/one", &c), ("/ipns/two", &d)], &mut store);

        match graph.unwrap_err() {
            Error::DuplicateIdentity { account, first, second } => {
                assert_eq!(account, "dupe");
                assert_ne!(first, second);
            }
            other => panic!("expected DuplicateIdentity, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_weights_never_fetch_and_never_abort() {
        let mut store = MemoryStore::new();
        // Neither target is published anywhere; a fetch attempt would fail.
        let root = provision(
            &mut store,
            doc("rootacct", &[("/ipns/too-high", 2.0), ("/ipns/negative", -0.1)]),
        );
        let (graph, _dir) = build_graph(&root, &[], &mut store);

        let graph = graph.unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.ordered_peers().next().unwrap().total_weight, 0.0);
    }

    #[test]
    fn zero_weight_links_are_followed_but_add_nothing() {
        let mut store = MemoryStore::new();
        let a = provision(&mut store, doc("aaa", &[("/ipns/bbb", 0.0)]));
        let b = provision(&mut store, doc("bbb", &[]));
        let (graph, _dir) = build_graph(&a, &[("/ipns/bbb", &b)], &mut store);

        let graph = graph.unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.ordered_peers().all(|p| p.total_weight == 0.0));
        // Tie broken by content reference, ascending.
        let mut expected: Vec<ContentRef> = graph.ranked().to_vec();
        expected.sort();
        assert_eq!(graph.ranked(), expected.as_slice());
    }

    #[test]
    fn self_vouch_through_own_name_adds_no_weight() {
        let mut store = MemoryStore::new();
        let a = provision(
            &mut store,
            doc("aaa", &[("/ipns/aaa", 0.9), ("/ipns/bbb", 0.4)]),
        );
        let b = provision(&mut store, doc("bbb", &[]));

        let (graph, _dir) =
            build_graph(&a, &[("/ipns/aaa", &a), ("/ipns/bbb", &b)], &mut store);

        let graph = graph.unwrap();
        assert_eq!(graph.len(), 2);
        for peer in graph.ordered_peers() {
            match peer.account_name() {
                "aaa" => assert_eq!(peer.total_weight, 0.0),
                "bbb" => assert_eq!(peer.total_weight, 0.4),
                other => panic!("unexpected peer {other}"),
            }
        }
    }

    #[test]
    fn self_vouch_by_account_name_adds_no_weight() {
        // Two documents with distinct bytes claiming one account can only
        // exist in a build that skips verification, but the aggregation
        // guard must hold on its own.
        let store = MemoryStore::new();
        let dir = tempdir().unwrap();
        let cache = ContentCache::open(dir.path()).unwrap();
        let mut build = GraphBuild::new(&store, &cache, false);

        let f1 = ContentRef::for_bytes(b"first publication");
        let f2 = ContentRef::for_bytes(b"second publication");
        let one = doc("same", &[("/ipns/other-me", 0.7)]);
        let two = doc("same", &[]);
        build.peers.insert(
            f1.clone(),
            Peer::new(one, NameRef::new("/ipns/me"), f1.clone()),
        );
        build.peers.insert(
            f2.clone(),
            Peer::new(two, NameRef::new("/ipns/other-me"), f2.clone()),
        );
        build.names.insert(NameRef::new("/ipns/me"), f1.clone());
        build.names.insert(NameRef::new("/ipns/other-me"), f2.clone());

        build.aggregate().unwrap();
        assert_eq!(build.peers[&f2].total_weight, 0.0);
    }

    #[test]
    fn unresolved_link_target_is_reported() {
        let store = MemoryStore::new();
        let dir = tempdir().unwrap();
        let cache = ContentCache::open(dir.path()).unwrap();
        let mut build = GraphBuild::new(&store, &cache, false);

        let f1 = ContentRef::for_bytes(b"lonely");
        let one = doc("lonely", &[("/ipns/ghost", 0.5)]);
        build.peers.insert(
            f1.clone(),
            Peer::new(one, NameRef::new("/ipns/lonely"), f1.clone()),
        );
        build.names.insert(NameRef::new("/ipns/lonely"), f1);

        match build.aggregate().unwrap_err() {
            Error::UnresolvedLinkTarget(name) => {
                assert_eq!(name.as_str(), "/ipns/ghost");
            }
            other => panic!("expected UnresolvedLinkTarget, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_document_keeps_bytes_and_aborts() {
        let mut store = MemoryStore::new();
        let root = provision(&mut store, doc("rootacct", &[("/ipns/broken", 0.9)]));

        let dir = tempdir().unwrap();
        let root_path = dir.path().join("my_discovery.yaml");
        fs::write(&root_path, root.to_yaml().unwrap()).unwrap();
        store.publish_name(NameRef::new("/ipns/broken"), b"{{{ not yaml".to_vec());

        let cache = ContentCache::open(dir.path().join("cache")).unwrap();
        let err = GraphBuild::new(&store, &cache, false)
            .run(&root_path)
            .unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
        let kept = fs::read(cache.root().join(BROKEN_DISCOVERY_FILE)).unwrap();
        assert_eq!(kept, b"{{{ not yaml");
    }

    #[test]
    fn missing_artifact_aborts_with_artifact_name() {
        let mut store = MemoryStore::new();
        let mut root = provision(&mut store, doc("rootacct", &[]));
        root.launch_data.boot_sequence = ContentRef::new("/ipfs/QmNeverStored");

        let (graph, _dir) = build_graph(&root, &[], &mut store);
        match graph.unwrap_err() {
            Error::FetchContent { artifact, .. } => assert_eq!(artifact, "boot_sequence"),
            other => panic!("expected FetchContent, got {other:?}"),
        }
    }

    #[test]
    fn empty_artifact_reference_aborts() {
        let mut store = MemoryStore::new();
        let mut root = provision(&mut store, doc("rootacct", &[]));
        root.launch_data.snapshot = ContentRef::default();

        let (graph, _dir) = build_graph(&root, &[], &mut store);
        match graph.unwrap_err() {
            Error::EmptyReference { artifact } => assert_eq!(artifact, "snapshot"),
            other => panic!("expected EmptyReference, got {other:?}"),
        }
    }

    #[test]
    fn malformed_artifact_reference_aborts() {
        let mut store = MemoryStore::new();
        let mut root = provision(&mut store, doc("rootacct", &[]));
        root.launch_data.boot_sequence = ContentRef::new("QmMissingPrefix");

        let (graph, _dir) = build_graph(&root, &[], &mut store);
        match graph.unwrap_err() {
            Error::MalformedReference { artifact, reference } => {
                assert_eq!(artifact, "boot_sequence");
                assert_eq!(reference.as_str(), "QmMissingPrefix");
            }
            other => panic!("expected MalformedReference, got {other:?}"),
        }
    }

    #[test]
    fn contract_artifacts_are_cached() {
        use accord_discovery::ContractRefs;

        let mut store = MemoryStore::new();
        let mut root = provision(&mut store, doc("rootacct", &[]));
        let abi = store.insert_content(b"token abi".to_vec());
        let code = store.insert_content(b"token code".to_vec());
        root.launch_data.contracts.insert(
            "token".to_string(),
            ContractRefs {
                abi: abi.clone(),
                code: code.clone(),
            },
        );

        let dir = tempdir().unwrap();
        let root_path = dir.path().join("my_discovery.yaml");
        fs::write(&root_path, root.to_yaml().unwrap()).unwrap();
        let cache = ContentCache::open(dir.path().join("cache")).unwrap();

        GraphBuild::new(&store, &cache, false)
            .run(&root_path)
            .unwrap();
        assert!(cache.contains(abi.as_str()));
        assert!(cache.contains(code.as_str()));
    }

    #[test]
    fn invalid_document_aborts_build() {
        let mut store = MemoryStore::new();
        let root = provision(&mut store, doc("rootacct", &[("/ipns/bad", 0.5)]));
        let mut bad = provision(&mut store, doc("bad", &[]));
        bad.organization_name.clear();

        let (graph, _dir) = build_graph(&root, &[("/ipns/bad", &bad)], &mut store);
        assert!(matches!(graph.unwrap_err(), Error::Validation { .. }));
    }

    #[test]
    fn rebuild_from_cache_alone_matches_network_build() {
        let mut store = MemoryStore::new();
        let a = provision(&mut store, doc("aaa", &[("/ipns/bbb", 0.6)]));
        let b = provision(&mut store, doc("bbb", &[("/ipns/aaa", 0.2)]));

        let dir = tempdir().unwrap();
        let root_path = dir.path().join("my_discovery.yaml");
        fs::write(&root_path, a.to_yaml().unwrap()).unwrap();
        store.publish_name(NameRef::new("/ipns/aaa"), a.to_yaml().unwrap().into_bytes());
        store.publish_name(NameRef::new("/ipns/bbb"), b.to_yaml().unwrap().into_bytes());

        let cache = ContentCache::open(dir.path().join("cache")).unwrap();
        let first = GraphBuild::new(&store, &cache, false)
            .run(&root_path)
            .unwrap();

        // Second build reads names and content from the cache only.
        let offline = MemoryStore::new();
        let second = GraphBuild::new(&offline, &cache, true)
            .run(&root_path)
            .unwrap();

        assert_eq!(first.ranked(), second.ranked());
        let weights_first: Vec<f64> = first.ordered_peers().map(|p| p.total_weight).collect();
        let weights_second: Vec<f64> = second.ordered_peers().map(|p| p.total_weight).collect();
        assert_eq!(weights_first, weights_second);
    }

    /// Weights that are exact multiples of 1/256 sum without rounding,
    /// so order-independence can be asserted with exact equality.
    fn exact_weight() -> impl Strategy<Value = f64> {
        (-64i32..=320).prop_map(|n| f64::from(n) / 256.0)
    }

    /// Build a four-peer graph by hand, optionally inserting peers and
    /// links in reversed order.
    fn seeded_build<'a>(
        store: &'a MemoryStore,
        cache: &'a ContentCache,
        files: &[ContentRef],
        matrix: &[f64],
        reverse: bool,
    ) -> GraphBuild<'a, MemoryStore> {
        let mut build = GraphBuild::new(store, cache, false);
        let order: Vec<usize> = if reverse {
            (0..4).rev().collect()
        } else {
            (0..4).collect()
        };
        for &i in &order {
            let mut links: Vec<(String, f64)> = (0..4)
                .map(|j| (format!("/ipns/p{j}"), matrix[i * 4 + j]))
                .collect();
            if reverse {
                links.reverse();
            }
            let link_slices: Vec<(&str, f64)> =
                links.iter().map(|(n, w)| (n.as_str(), *w)).collect();
            let disco = doc(&format!("p{i}"), &link_slices);
            build.peers.insert(
                files[i].clone(),
                Peer::new(disco, NameRef::new(format!("/ipns/p{i}")), files[i].clone()),
            );
            build
                .names
                .insert(NameRef::new(format!("/ipns/p{i}")), files[i].clone());
        }
        build
    }

    proptest! {
        #[test]
        fn aggregation_is_order_independent(matrix in proptest::collection::vec(exact_weight(), 16)) {
            let store = MemoryStore::new();
            let dir = tempdir().unwrap();
            let cache = ContentCache::open(dir.path()).unwrap();

            let files: Vec<ContentRef> = (0..4)
                .map(|i| ContentRef::for_bytes(format!("peer {i}").as_bytes()))
                .collect();

            let mut forward = seeded_build(&store, &cache, &files, &matrix, false);
            let mut backward = seeded_build(&store, &cache, &files, &matrix, true);
            forward.aggregate().unwrap();
            backward.aggregate().unwrap();

            for (j, file) in files.iter().enumerate() {
                let expected: f64 = (0..4)
                    .filter(|&i| i != j)
                    .map(|i| matrix[i * 4 + j])
                    .filter(|w| (0.0..=1.0).contains(w))
                    .sum();
                prop_assert_eq!(forward.peers[file].total_weight, expected);
                prop_assert_eq!(backward.peers[file].total_weight, expected);
            }
            prop_assert_eq!(forward.rank(), backward.rank());
        }
    }
}
