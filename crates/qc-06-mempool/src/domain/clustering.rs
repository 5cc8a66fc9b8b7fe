//! Dependency-graph tracking and cluster merging.
//!
//! Builds on the same sender/nonce chain `cpfp::TransactionFamily` already
//! tracks: a transaction's dependency is the prior-nonce transaction from
//! the same sender still sitting in the pool, and its dependent is the
//! next-nonce transaction. Two transactions linked by such an edge are
//! folded into a single cluster, since they can only be included in a
//! block together (in nonce order) or not at all.

use super::entities::{ClusterId, Hash, MempoolTransaction, TransactionCluster, Timestamp};
use std::collections::{HashMap, HashSet};

/// Tracks the dependency/dependent edges between pooled transactions and
/// the cluster each transaction currently belongs to.
///
/// A disjoint-set (union-find) is used for cluster assignment: merging is
/// O(α(n)) and querying which cluster a transaction belongs to is a
/// pointer-chase to the set's representative.
#[derive(Debug, Default)]
pub struct ClusterTracker {
    dependencies: HashMap<Hash, HashSet<Hash>>,
    dependents: HashMap<Hash, HashSet<Hash>>,
    parent: HashMap<Hash, Hash>,
    next_cluster_id: ClusterId,
    cluster_ids: HashMap<Hash, ClusterId>,
}

impl ClusterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&mut self, hash: Hash) -> Hash {
        let parent = *self.parent.entry(hash).or_insert(hash);
        if parent == hash {
            hash
        } else {
            let root = self.find(parent);
            self.parent.insert(hash, root);
            root
        }
    }

    /// Registers `hash` as a standalone singleton, if not already tracked.
    pub fn insert(&mut self, hash: Hash) {
        self.parent.entry(hash).or_insert(hash);
    }

    /// Links `dependency -> dependent` (dependent can only be included
    /// once dependency is), merging their clusters.
    pub fn link(&mut self, dependency: Hash, dependent: Hash) {
        self.dependencies.entry(dependent).or_default().insert(dependency);
        self.dependents.entry(dependency).or_default().insert(dependent);

        let root_a = self.find(dependency);
        let root_b = self.find(dependent);
        if root_a != root_b {
            self.parent.insert(root_b, root_a);
        }
    }

    /// Dependency hashes recorded for `hash` (empty if none or untracked).
    pub fn dependencies_of(&self, hash: &Hash) -> Vec<Hash> {
        self.dependencies
            .get(hash)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Dependent hashes recorded for `hash` (empty if none or untracked).
    pub fn dependents_of(&self, hash: &Hash) -> Vec<Hash> {
        self.dependents
            .get(hash)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Removes a transaction from tracking, unlinking it from its
    /// dependents and dependencies. Does not attempt to re-split a
    /// cluster the removed transaction had merged into; clusters are
    /// rebuilt lazily from `dependencies`/`dependents` on next lookup.
    pub fn remove(&mut self, hash: &Hash) {
        if let Some(deps) = self.dependencies.remove(hash) {
            for dep in deps {
                if let Some(set) = self.dependents.get_mut(&dep) {
                    set.remove(hash);
                }
            }
        }
        if let Some(dependents) = self.dependents.remove(hash) {
            for dependent in dependents {
                if let Some(set) = self.dependencies.get_mut(&dependent) {
                    set.remove(hash);
                }
            }
        }
        self.parent.remove(hash);
        self.cluster_ids.remove(hash);
    }

    /// Returns the cluster id for `hash`, assigning a fresh one the first
    /// time a given union-find root is observed.
    pub fn cluster_id_of(&mut self, hash: Hash) -> ClusterId {
        let root = self.find(hash);
        if let Some(id) = self.cluster_ids.get(&root) {
            return *id;
        }
        let id = self.next_cluster_id;
        self.next_cluster_id += 1;
        self.cluster_ids.insert(root, id);
        id
    }

    /// Builds every non-trivial cluster (two or more members) currently
    /// tracked, looking up transaction metadata via `lookup`.
    pub fn build_clusters(
        &mut self,
        tracked: impl IntoIterator<Item = Hash>,
        lookup: impl Fn(&Hash) -> Option<MempoolTransaction>,
        now: Timestamp,
    ) -> Vec<TransactionCluster> {
        let mut by_root: HashMap<Hash, Vec<Hash>> = HashMap::new();
        for hash in tracked {
            let root = self.find(hash);
            by_root.entry(root).or_default().push(hash);
        }

        by_root
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(root, members)| {
                let id = self.cluster_id_of(root);
                let mut cluster = TransactionCluster::new(id, now);
                for hash in &members {
                    if let Some(tx) = lookup(hash) {
                        cluster.absorb(&tx);
                    }
                }
                cluster
            })
            .collect()
    }
}
