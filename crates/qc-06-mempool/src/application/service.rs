//! Mempool application service - a single serializing lock around the
//! transaction pool, exposing the advanced-mempool operations (priority
//! tiering, CPFP-aware block templates, batch eviction, expiry) as a
//! thread-safe driving API.
//!
//! The IPC layer's two-phase-commit handler (`ipc::handler::IpcHandler`)
//! continues to own a pool directly for the confirm/rollback wire protocol;
//! this engine is the concurrent entry point for callers that need the
//! block-template and maintenance operations without holding the lock
//! themselves.

use crate::domain::{
    FeeEstimation, Hash, MempoolConfig, MempoolError, MempoolStatus, MempoolTransaction,
    ProposeResult, Timestamp, TransactionCluster, TransactionPool, TransactionState,
};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Outcome of a periodic maintenance pass.
#[derive(Clone, Debug, Default)]
pub struct MaintenanceReport {
    /// Transactions rolled back from PendingInclusion due to timeout.
    pub rolled_back: Vec<Hash>,
    /// Transactions purged for exceeding the absolute age limit.
    pub expired: Vec<Hash>,
    /// Transactions evicted by the batch eviction sweep.
    pub evicted: Vec<Hash>,
}

/// Thread-safe driving adapter over `TransactionPool`.
pub struct MempoolEngine {
    pool: Mutex<TransactionPool>,
}

impl MempoolEngine {
    /// Creates a new engine with the given configuration.
    pub fn new(config: MempoolConfig) -> Self {
        Self {
            pool: Mutex::new(TransactionPool::new(config)),
        }
    }

    /// Creates a new engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MempoolConfig::default())
    }

    /// Adds a pre-verified transaction to the pool.
    pub fn add_transaction(&self, tx: MempoolTransaction) -> Result<Hash, MempoolError> {
        let hash = tx.hash;
        let mut pool = self.pool.lock();
        pool.add(tx)?;
        info!(tx_hash = ?hash, pending = pool.pending_count(), "transaction accepted");
        Ok(hash)
    }

    /// Builds a CPFP-aware, priority-tiered block template bounded by
    /// `max_bytes`. Returns owned transactions (cloned out from behind the
    /// lock) rather than references, since the lock cannot outlive the call.
    pub fn get_block_template(&self, max_bytes: usize) -> Vec<MempoolTransaction> {
        let pool = self.pool.lock();
        pool.get_block_template(max_bytes)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Proposes transactions for block inclusion (Phase 1 of Two-Phase Commit).
    pub fn propose_transactions(
        &self,
        hashes: &[Hash],
        block_height: u64,
        now: Timestamp,
    ) -> ProposeResult {
        self.pool.lock().propose(hashes, block_height, now)
    }

    /// Confirms transaction inclusion (Phase 2a), permanently deleting them.
    pub fn confirm_inclusion(&self, hashes: &[Hash]) -> Vec<Hash> {
        self.pool.lock().confirm(hashes)
    }

    /// Rolls back proposed transactions to PENDING (Phase 2b).
    pub fn rollback_proposal(&self, hashes: &[Hash]) -> Vec<Hash> {
        self.pool.lock().rollback(hashes)
    }

    /// Removes invalid or expired transactions.
    pub fn remove_transactions(&self, hashes: &[Hash]) -> Vec<Hash> {
        let mut pool = self.pool.lock();
        hashes
            .iter()
            .filter(|h| pool.remove(h).is_ok())
            .copied()
            .collect()
    }

    /// Gets a transaction by hash.
    pub fn get_transaction(&self, hash: &Hash) -> Option<MempoolTransaction> {
        self.pool.lock().get(hash).cloned()
    }

    /// Gets the state of a transaction.
    pub fn get_transaction_state(&self, hash: &Hash) -> Option<TransactionState> {
        self.pool.lock().get_state(hash)
    }

    /// Checks if a transaction exists in the pool.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.pool.lock().contains(hash)
    }

    /// Current mempool status snapshot.
    pub fn status(&self, now: Timestamp) -> MempoolStatus {
        self.pool.lock().status(now)
    }

    /// Number of transactions in the pool.
    pub fn len(&self) -> usize {
        self.pool.lock().len()
    }

    /// True if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.pool.lock().is_empty()
    }

    /// Dependency hashes tracked for a pooled transaction.
    pub fn dependencies_of(&self, hash: &Hash) -> Vec<Hash> {
        self.pool.lock().dependencies_of(hash)
    }

    /// Dependent hashes tracked for a pooled transaction.
    pub fn dependents_of(&self, hash: &Hash) -> Vec<Hash> {
        self.pool.lock().dependents_of(hash)
    }

    /// Every multi-transaction cluster currently tracked.
    pub fn clusters(&self, now: Timestamp) -> Vec<TransactionCluster> {
        self.pool.lock().clusters(now)
    }

    /// The most recently computed per-priority-tier fee estimate.
    pub fn fee_estimation(&self) -> FeeEstimation {
        self.pool.lock().fee_estimation().clone()
    }

    /// Runs a full periodic maintenance pass: rolls back timed-out
    /// proposals, purges stale entries, sweeps to the eviction target when
    /// over the memory budget, and decays the dynamic fee floor.
    ///
    /// Intended to be driven by the same kind of periodic tick the event
    /// bus adapters use for timeout cleanup (see `adapters::publisher`).
    pub fn maintenance_tick(&self, now: Timestamp) -> MaintenanceReport {
        let mut pool = self.pool.lock();

        let rolled_back = pool.cleanup_timeouts(now);
        let expired = pool.expire_stale(now, pool.config().entry_max_age_ms);

        let evicted = if pool.current_memory_bytes() > pool.config().max_memory_bytes {
            let target = (pool.config().max_transactions as f64
                * pool.config().eviction_target_fraction) as usize;
            let evicted = pool.evict_to_target(target);
            if !evicted.is_empty() {
                warn!(count = evicted.len(), "evicted transactions over memory budget");
            }
            evicted
        } else {
            Vec::new()
        };

        pool.decay_min_fee();
        pool.refresh_fee_estimation(now);
        pool.check_invariants();

        if !rolled_back.is_empty() || !expired.is_empty() || !evicted.is_empty() {
            info!(
                rolled_back = rolled_back.len(),
                expired = expired.len(),
                evicted = evicted.len(),
                "maintenance tick complete"
            );
        }

        MaintenanceReport {
            rolled_back,
            expired,
            evicted,
        }
    }
}

impl Default for MempoolEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
