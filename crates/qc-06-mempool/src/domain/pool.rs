//! # Transaction Pool - Priority Queue and Two-Phase Commit
//!
//! Implements the core mempool data structure: a priority queue of pending
//! transactions, a Two-Phase Commit state machine for block inclusion, and
//! CPFP/dynamic-fee-floor accounting layered over both.
//!
//! ## Data Structures
//!
//! - `by_hash`: O(1) lookup by transaction hash
//! - `by_price`: O(log n) priority queue (BTreeSet)
//! - `by_sender`: O(log n) nonce-ordered transactions per account
//! - `family`: CPFP ancestor/descendant chains
//! - `dmmf`: dynamic minimum fee floor
//!
//! ## Invariants Enforced
//!
//! - No duplicate hashes (checked in `add()`)
//! - Nonce ordering per sender (BTreeMap keys)
//! - PENDING_INCLUSION excluded from proposals (`by_price` only has PENDING)
//! - Auto-rollback on timeout (`cleanup_timeouts()`)
//! - Index consistency across `by_hash`/`by_price`/`by_sender`/`family` (`check_invariants()`)

use super::clustering::ClusterTracker;
use super::cpfp::TransactionFamily;
use super::dmmf::DynamicMinFee;
use super::entities::{
    Address, FeeEstimation, Hash, MempoolConfig, MempoolTransaction, SignedTransaction, Timestamp,
    TransactionCluster, TransactionState, U256,
};
use super::errors::MempoolError;
use super::fee_estimation;
use super::value_objects::{
    MempoolStatus, PendingInclusionBatch, Priority, PricedTransaction, ProposeResult,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Transaction priority queue with multiple indices.
///
/// Provides O(log n) operations for:
/// - Adding transactions
/// - Getting highest priority transactions
/// - Finding transactions by hash
/// - Finding transactions by sender
///
/// INVARIANTS:
/// - INVARIANT-1: No duplicate transaction hashes
/// - INVARIANT-2: Transactions from same sender ordered by nonce
/// - INVARIANT-3: PendingInclusion transactions excluded from get_for_block
/// - INVARIANT-5: Timed out PendingInclusion transactions auto-rollback
#[derive(Debug)]
pub struct TransactionPool {
    /// Configuration.
    config: MempoolConfig,

    /// All transactions indexed by hash.
    by_hash: HashMap<Hash, MempoolTransaction>,

    /// Transactions ordered by gas price (for priority selection).
    /// Only contains PENDING transactions (not pending_inclusion).
    by_price: BTreeSet<PricedTransaction>,

    /// Transactions grouped by sender, ordered by nonce.
    by_sender: HashMap<Address, BTreeMap<u64, Hash>>,

    /// Pending inclusion batches for tracking.
    pending_batches: Vec<PendingInclusionBatch>,

    /// CPFP ancestor/descendant tracker, keyed by sender+nonce chains.
    family: TransactionFamily,

    /// Dynamic fee floor, raised on eviction and decayed over time.
    dmmf: DynamicMinFee,

    /// Dependency graph and cluster assignment across pooled transactions.
    cluster_tracker: ClusterTracker,

    /// Last computed per-tier fee-rate estimate. Refreshed on demand via
    /// `refresh_fee_estimation`, not on every `add`/`remove`.
    fee_estimation: FeeEstimation,
}

impl TransactionPool {
    /// Creates a new empty transaction pool.
    pub fn new(config: MempoolConfig) -> Self {
        let dmmf = DynamicMinFee::new(config.min_gas_price);
        Self {
            config,
            by_hash: HashMap::new(),
            by_price: BTreeSet::new(),
            by_sender: HashMap::new(),
            pending_batches: Vec::new(),
            family: TransactionFamily::new(),
            dmmf,
            cluster_tracker: ClusterTracker::new(),
            fee_estimation: FeeEstimation::empty(0),
        }
    }

    /// Creates a pool with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MempoolConfig::default())
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &MempoolConfig {
        &self.config
    }

    /// Returns the number of transactions in the pool.
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    /// Returns true if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Returns the number of pending (not pending_inclusion) transactions.
    pub fn pending_count(&self) -> usize {
        self.by_price.len()
    }

    /// Returns the number of transactions pending inclusion.
    pub fn pending_inclusion_count(&self) -> usize {
        self.by_hash.len() - self.by_price.len()
    }

    /// Gets a transaction by hash.
    pub fn get(&self, hash: &Hash) -> Option<&MempoolTransaction> {
        self.by_hash.get(hash)
    }

    /// Gets a mutable transaction by hash.
    pub fn get_mut(&mut self, hash: &Hash) -> Option<&mut MempoolTransaction> {
        self.by_hash.get_mut(hash)
    }

    /// Checks if a transaction exists in the pool.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.by_hash.contains_key(hash)
    }

    /// Gets the state of a transaction.
    pub fn get_state(&self, hash: &Hash) -> Option<TransactionState> {
        self.by_hash.get(hash).map(|tx| tx.state)
    }

    /// Adds a transaction to the pool.
    ///
    /// # Errors
    /// - `DuplicateTransaction` if hash already exists
    /// - `GasPriceTooLow` if below minimum
    /// - `GasLimitTooHigh` if above maximum
    /// - `AccountLimitReached` if sender has too many transactions
    /// - `PoolFull` if at capacity (and new tx doesn't qualify for eviction)
    pub fn add(&mut self, tx: MempoolTransaction) -> Result<(), MempoolError> {
        // Check for duplicate
        if self.by_hash.contains_key(&tx.hash) {
            return Err(MempoolError::DuplicateTransaction(tx.hash));
        }

        // Validate gas price
        if tx.gas_price < self.config.min_gas_price {
            return Err(MempoolError::GasPriceTooLow {
                price: tx.gas_price,
                minimum: self.config.min_gas_price,
            });
        }

        // Validate gas limit
        if tx.gas_limit > self.config.max_gas_per_tx {
            return Err(MempoolError::GasLimitTooHigh {
                limit: tx.gas_limit,
                maximum: self.config.max_gas_per_tx,
            });
        }

        // Check account limit
        let sender_count = self.by_sender.get(&tx.sender).map(|m| m.len()).unwrap_or(0);
        if sender_count >= self.config.max_per_account {
            // Check for RBF opportunity when at account limit
            return self.try_rbf_at_limit(tx);
        }

        // Check pool capacity
        if self.by_hash.len() >= self.config.max_transactions {
            // Try to evict lowest priority transaction
            if !self.try_evict_for(&tx)? {
                return Err(MempoolError::PoolFull {
                    capacity: self.config.max_transactions,
                });
            }
        }

        // Check for RBF (same sender, same nonce)
        self.try_rbf_or_add(tx)
    }

    /// Attempts RBF when account is at its transaction limit.
    fn try_rbf_at_limit(&mut self, tx: MempoolTransaction) -> Result<(), MempoolError> {
        if !self.config.enable_rbf {
            return Err(MempoolError::AccountLimitReached {
                address: tx.sender,
                limit: self.config.max_per_account,
            });
        }

        let existing_hash = self
            .by_sender
            .get(&tx.sender)
            .and_then(|m| m.get(&tx.nonce))
            .copied();

        if let Some(hash) = existing_hash {
            let existing = self.by_hash.get(&hash).unwrap();
            if self.can_replace(existing, &tx)? {
                self.remove_internal(&hash)?;
                return self.add_internal(tx);
            }
        }

        Err(MempoolError::AccountLimitReached {
            address: tx.sender,
            limit: self.config.max_per_account,
        })
    }

    /// Attempts RBF if a transaction with same nonce exists, otherwise adds directly.
    fn try_rbf_or_add(&mut self, tx: MempoolTransaction) -> Result<(), MempoolError> {
        let existing_hash = self
            .by_sender
            .get(&tx.sender)
            .and_then(|m| m.get(&tx.nonce))
            .copied();

        let Some(hash) = existing_hash else {
            return self.add_internal(tx);
        };

        if !self.config.enable_rbf {
            return Err(MempoolError::RbfDisabled);
        }

        let existing = self.by_hash.get(&hash).unwrap();
        if !self.can_replace(existing, &tx)? {
            return Err(MempoolError::InsufficientFeeBump {
                old_price: self.by_hash.get(&hash).unwrap().gas_price,
                new_price: tx.gas_price,
                min_bump_percent: self.config.rbf_min_bump_percent,
            });
        }

        self.remove_internal(&hash)?;
        self.add_internal(tx)
    }

    /// Internal add without validation (assumes all checks passed).
    fn add_internal(&mut self, tx: MempoolTransaction) -> Result<(), MempoolError> {
        let hash = tx.hash;
        let sender = tx.sender;
        let nonce = tx.nonce;

        // Add to price index (only if pending)
        if tx.is_pending() {
            self.by_price
                .insert(PricedTransaction::new(tx.gas_price, tx.hash, tx.added_at));
        }

        // Look up adjacent-nonce transactions from the same sender before
        // inserting this one, so both directions of the cluster link can
        // be formed regardless of arrival order.
        let sender_nonces = self.by_sender.entry(sender).or_default();
        let parent_hash = nonce.checked_sub(1).and_then(|n| sender_nonces.get(&n).copied());
        let child_hash = sender_nonces.get(&(nonce + 1)).copied();
        sender_nonces.insert(nonce, hash);

        // Track CPFP ancestor/descendant chain
        self.family.register(hash, sender, nonce);

        // Dependency/cluster tracking: a transaction depends on the
        // prior-nonce transaction from the same sender and is depended on
        // by the next-nonce one.
        self.cluster_tracker.insert(hash);
        if let Some(parent) = parent_hash {
            self.cluster_tracker.link(parent, hash);
        }
        if let Some(child) = child_hash {
            self.cluster_tracker.link(hash, child);
        }

        // Add to main index
        self.by_hash.insert(hash, tx);

        Ok(())
    }

    /// Checks if new transaction can replace existing via RBF.
    fn can_replace(
        &self,
        existing: &MempoolTransaction,
        new: &MempoolTransaction,
    ) -> Result<bool, MempoolError> {
        // Cannot replace if existing is pending inclusion
        if existing.is_pending_inclusion() {
            return Err(MempoolError::TransactionPendingInclusion(existing.hash));
        }

        // Must be same sender and nonce
        if existing.sender != new.sender || existing.nonce != new.nonce {
            return Ok(false);
        }

        // Check minimum fee bump (using U256 arithmetic)
        let bump_multiplier = U256::from(100 + self.config.rbf_min_bump_percent);
        let min_new_price = existing.gas_price * bump_multiplier / U256::from(100);

        Ok(new.gas_price >= min_new_price)
    }

    /// Tries to evict the lowest priority transaction to make room.
    ///
    /// Only evicts if the new transaction has strictly higher priority (higher gas price
    /// or same gas price with earlier timestamp). Hash-based tie-breaking does NOT
    /// justify eviction to ensure deterministic behavior.
    fn try_evict_for(&mut self, new_tx: &MempoolTransaction) -> Result<bool, MempoolError> {
        // Get the lowest priority pending transaction
        let lowest = match self.by_price.iter().next_back() {
            Some(p) => p.clone(),
            None => return Ok(false), // No pending transactions to evict
        };

        // Get the lowest tx details for comparison
        let lowest_tx = match self.by_hash.get(&lowest.hash) {
            Some(tx) => tx,
            None => return Ok(false),
        };

        // New transaction must have STRICTLY higher priority to evict:
        // - Higher gas price, OR
        // - Same gas price but earlier timestamp
        // Hash tie-breaker does NOT justify eviction
        let has_higher_gas = new_tx.gas_price > lowest_tx.gas_price;
        let has_same_gas_earlier_time =
            new_tx.gas_price == lowest_tx.gas_price && new_tx.added_at < lowest_tx.added_at;

        if !has_higher_gas && !has_same_gas_earlier_time {
            return Ok(false); // New tx is not strictly higher priority
        }

        // Evict the lowest and raise the dynamic fee floor behind it
        let evicted_rate = lowest_tx.fee_rate();
        self.remove_internal(&lowest.hash)?;
        self.dmmf.raise_floor(U256::from(evicted_rate));
        Ok(true)
    }

    /// Removes a transaction from the pool.
    pub fn remove(&mut self, hash: &Hash) -> Result<MempoolTransaction, MempoolError> {
        self.remove_internal(hash)
    }

    /// Internal remove implementation.
    fn remove_internal(&mut self, hash: &Hash) -> Result<MempoolTransaction, MempoolError> {
        let tx = self
            .by_hash
            .remove(hash)
            .ok_or(MempoolError::TransactionNotFound(*hash))?;

        // Remove from price index
        self.by_price
            .remove(&PricedTransaction::new(tx.gas_price, tx.hash, tx.added_at));

        // Remove from sender index
        if let Some(sender_txs) = self.by_sender.get_mut(&tx.sender) {
            sender_txs.remove(&tx.nonce);
            if sender_txs.is_empty() {
                self.by_sender.remove(&tx.sender);
            }
        }

        self.family.unregister(&tx.hash, &tx.sender, tx.nonce);
        self.cluster_tracker.remove(&tx.hash);

        Ok(tx)
    }

    /// Gets the highest priority pending transactions for block building.
    ///
    /// INVARIANT-3: Only returns PENDING transactions, not PENDING_INCLUSION.
    ///
    /// Returns transactions in priority order (highest gas price first).
    /// Respects nonce ordering for each sender.
    pub fn get_for_block(&self, max_count: usize, max_gas: u64) -> Vec<&MempoolTransaction> {
        let mut result = Vec::new();
        let mut total_gas = 0u64;
        let mut sender_next_nonce: HashMap<Address, u64> = HashMap::new();

        // Iterate by price (highest first)
        for priced in self.by_price.iter() {
            if result.len() >= max_count {
                break;
            }

            let tx = match self.by_hash.get(&priced.hash) {
                Some(t) => t,
                None => continue,
            };

            // Check gas limit
            if total_gas.saturating_add(tx.gas_limit) > max_gas {
                continue;
            }

            // Check nonce ordering for this sender
            let expected_nonce = sender_next_nonce
                .get(&tx.sender)
                .copied()
                .unwrap_or_else(|| {
                    // Get the minimum nonce for this sender
                    self.by_sender
                        .get(&tx.sender)
                        .and_then(|m| m.keys().next().copied())
                        .unwrap_or(tx.nonce)
                });

            if tx.nonce != expected_nonce {
                // Skip this tx, it's not the next expected nonce
                continue;
            }

            result.push(tx);
            total_gas = total_gas.saturating_add(tx.gas_limit);
            sender_next_nonce.insert(tx.sender, tx.nonce + 1);
        }

        result
    }

    /// Builds a block template ordered by priority tier and CPFP-adjusted
    /// fee rate within each tier, bounded by `max_bytes`.
    ///
    /// Like `get_for_block`, only PENDING transactions are eligible and
    /// nonce ordering per sender is respected. Unlike `get_for_block`,
    /// selection is tier-first (Urgent before High before Normal ...) and
    /// a transaction's effective rate accounts for its unconfirmed
    /// ancestors, so a cheap parent blocking an expensive child is not
    /// skipped purely on its own fee rate.
    pub fn get_block_template(&self, max_bytes: usize) -> Vec<&MempoolTransaction> {
        let get_fee = |hash: &Hash| -> Option<(U256, usize)> {
            self.by_hash.get(hash).map(|t| (t.gas_cost(), t.size_bytes()))
        };

        let mut candidates: Vec<&MempoolTransaction> = self
            .by_hash
            .values()
            .filter(|tx| tx.is_pending())
            .collect();

        candidates.sort_by(|a, b| {
            let rate_a = self
                .family
                .effective_fee_rate(&a.hash, a.gas_cost(), a.size_bytes(), get_fee);
            let rate_b = self
                .family
                .effective_fee_rate(&b.hash, b.gas_cost(), b.size_bytes(), get_fee);
            b.priority()
                .cmp(&a.priority())
                .then_with(|| rate_b.cmp(&rate_a))
                .then_with(|| a.added_at.cmp(&b.added_at))
                .then_with(|| a.hash.cmp(&b.hash))
        });

        let mut result = Vec::new();
        let mut total_bytes = 0usize;
        let mut sender_next_nonce: HashMap<Address, u64> = HashMap::new();

        for tx in candidates {
            if total_bytes.saturating_add(tx.size_bytes()) > max_bytes {
                continue;
            }

            let expected_nonce = sender_next_nonce
                .get(&tx.sender)
                .copied()
                .unwrap_or_else(|| {
                    self.by_sender
                        .get(&tx.sender)
                        .and_then(|m| m.keys().next().copied())
                        .unwrap_or(tx.nonce)
                });

            if tx.nonce != expected_nonce {
                continue;
            }

            total_bytes = total_bytes.saturating_add(tx.size_bytes());
            sender_next_nonce.insert(tx.sender, tx.nonce + 1);
            result.push(tx);
        }

        result
    }

    /// Returns the number of pending transactions in each priority tier.
    pub fn priority_counts(&self) -> HashMap<Priority, usize> {
        let mut counts = HashMap::new();
        for tx in self.by_hash.values().filter(|tx| tx.is_pending()) {
            *counts.entry(tx.priority()).or_insert(0) += 1;
        }
        counts
    }

    /// Estimated total memory footprint of the pool, in bytes.
    pub fn current_memory_bytes(&self) -> usize {
        self.by_hash.values().map(|tx| tx.size_bytes()).sum()
    }

    /// Drains the lowest-priority pending transactions, in Minimal-to-Urgent
    /// tier order, until the pool is at or under `target_count`.
    ///
    /// PendingInclusion transactions are never evicted. Each eviction raises
    /// the dynamic fee floor behind it, per `domain::dmmf`.
    pub fn evict_to_target(&mut self, target_count: usize) -> Vec<Hash> {
        let mut evicted = Vec::new();

        for tier in Priority::ascending() {
            if self.by_hash.len() <= target_count {
                break;
            }

            let mut tier_hashes: Vec<Hash> = self
                .by_hash
                .values()
                .filter(|tx| tx.is_pending() && tx.priority() == tier)
                .map(|tx| tx.hash)
                .collect();
            tier_hashes.sort();

            for hash in tier_hashes {
                if self.by_hash.len() <= target_count {
                    break;
                }
                let Some(tx) = self.by_hash.get(&hash) else {
                    continue;
                };
                let rate = tx.fee_rate();
                if self.remove_internal(&hash).is_ok() {
                    self.dmmf.raise_floor(U256::from(rate));
                    evicted.push(hash);
                }
            }
        }

        evicted
    }

    /// Purges transactions older than `max_age_ms`, regardless of state or
    /// fee rate. Run periodically alongside `cleanup_timeouts`.
    pub fn expire_stale(&mut self, now: Timestamp, max_age_ms: u64) -> Vec<Hash> {
        let stale: Vec<Hash> = self
            .by_hash
            .values()
            .filter(|tx| now.saturating_sub(tx.added_at) >= max_age_ms)
            .map(|tx| tx.hash)
            .collect();

        let mut expired = Vec::new();
        for hash in stale {
            if self.remove_internal(&hash).is_ok() {
                expired.push(hash);
            }
        }
        expired
    }

    /// Returns the current dynamic minimum fee floor (wei per gas).
    pub fn current_min_fee(&self) -> U256 {
        self.dmmf.current_min_fee()
    }

    /// Applies time-based decay to the dynamic fee floor.
    pub fn decay_min_fee(&mut self) {
        self.dmmf.apply_decay();
    }

    /// Dependency hashes (prior-nonce transactions from the same sender
    /// still in the pool) tracked for `hash`.
    pub fn dependencies_of(&self, hash: &Hash) -> Vec<Hash> {
        self.cluster_tracker.dependencies_of(hash)
    }

    /// Dependent hashes (next-nonce transactions from the same sender
    /// still in the pool) tracked for `hash`.
    pub fn dependents_of(&self, hash: &Hash) -> Vec<Hash> {
        self.cluster_tracker.dependents_of(hash)
    }

    /// Builds every multi-transaction cluster currently tracked.
    pub fn clusters(&mut self, now: Timestamp) -> Vec<TransactionCluster> {
        let by_hash = &self.by_hash;
        let hashes: Vec<Hash> = by_hash.keys().copied().collect();
        self.cluster_tracker
            .build_clusters(hashes, |h| by_hash.get(h).cloned(), now)
    }

    /// The cluster id a transaction currently belongs to (a fresh,
    /// single-member id if it has no linked dependency/dependent).
    pub fn cluster_id_of(&mut self, hash: &Hash) -> u64 {
        self.cluster_tracker.cluster_id_of(*hash)
    }

    /// Recomputes the per-priority-tier fee estimate from the pool's
    /// currently pending (not pending-inclusion) transactions.
    pub fn refresh_fee_estimation(&mut self, now: Timestamp) {
        let pending = self.by_hash.values().filter(|tx| tx.is_pending());
        self.fee_estimation = fee_estimation::estimate(pending, now);
    }

    /// The most recently computed fee estimate. Stale until
    /// `refresh_fee_estimation` has been called at least once.
    pub fn fee_estimation(&self) -> &FeeEstimation {
        &self.fee_estimation
    }

    /// Panics if any pool invariant is violated. No-op in release builds.
    ///
    /// Checked: every indexed hash exists in `by_hash`, `by_price` holds
    /// exactly the PENDING transactions, and every `by_sender` entry maps
    /// back to a transaction with a matching sender/nonce.
    pub fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let pending_in_hash = self.by_hash.values().filter(|tx| tx.is_pending()).count();
        debug_assert_eq!(
            self.by_price.len(),
            pending_in_hash,
            "by_price size diverged from PENDING transaction count"
        );

        for priced in &self.by_price {
            let tx = self
                .by_hash
                .get(&priced.hash)
                .expect("by_price references a hash missing from by_hash");
            debug_assert!(tx.is_pending(), "by_price contains a non-PENDING transaction");
        }

        for (sender, nonces) in &self.by_sender {
            for (nonce, hash) in nonces {
                let tx = self
                    .by_hash
                    .get(hash)
                    .expect("by_sender references a hash missing from by_hash");
                debug_assert_eq!(&tx.sender, sender, "by_sender sender mismatch");
                debug_assert_eq!(tx.nonce, *nonce, "by_sender nonce mismatch");
            }
        }

        for hash in self.by_hash.keys() {
            for dep in self.cluster_tracker.dependencies_of(hash) {
                debug_assert!(
                    self.cluster_tracker.dependents_of(&dep).contains(hash),
                    "dependency edge is not mirrored as a dependent edge"
                );
            }
        }
    }

    /// Proposes transactions for block inclusion (Phase 1 of Two-Phase Commit).
    ///
    /// Moves transactions from PENDING to PENDING_INCLUSION state.
    /// Transactions are NOT deleted.
    pub fn propose(&mut self, hashes: &[Hash], block_height: u64, now: Timestamp) -> ProposeResult {
        let mut result = ProposeResult::default();
        let mut proposed_hashes = Vec::new();

        for hash in hashes {
            let Some(tx) = self.by_hash.get_mut(hash) else {
                result.not_found.push(*hash);
                continue;
            };

            if tx.is_pending_inclusion() {
                result.already_pending.push(*hash);
                continue;
            }

            // Remove from price index (no longer available for proposals)
            self.by_price.remove(&PricedTransaction::new(
                tx.gas_price,
                tx.hash,
                tx.added_at,
            ));

            // Move to pending inclusion
            let _ = tx.propose(block_height, now);
            result.proposed_count += 1;
            proposed_hashes.push(*hash);
        }

        // Track the batch
        if !proposed_hashes.is_empty() {
            self.pending_batches.push(PendingInclusionBatch::new(
                block_height,
                now,
                proposed_hashes,
            ));
        }

        result
    }

    /// Confirms transaction inclusion (Phase 2a of Two-Phase Commit).
    ///
    /// Permanently deletes the confirmed transactions.
    pub fn confirm(&mut self, hashes: &[Hash]) -> Vec<Hash> {
        use std::collections::HashSet;

        let mut confirmed = Vec::new();

        for hash in hashes {
            if let Ok(tx) = self.remove_internal(hash) {
                confirmed.push(tx.hash);
            }
        }

        // Clean up pending batches - O(1) lookup with HashSet
        let confirmed_set: HashSet<_> = confirmed.iter().collect();
        self.pending_batches.retain(|batch| {
            !batch
                .transaction_hashes
                .iter()
                .all(|h| confirmed_set.contains(h))
        });

        confirmed
    }

    /// Rolls back proposed transactions (Phase 2b of Two-Phase Commit).
    ///
    /// Returns transactions to PENDING state.
    pub fn rollback(&mut self, hashes: &[Hash]) -> Vec<Hash> {
        let mut rolled_back = Vec::new();

        for hash in hashes {
            let Some(tx) = self.by_hash.get_mut(hash) else {
                continue;
            };

            if !tx.is_pending_inclusion() {
                continue;
            }

            // Return to price index
            self.by_price.insert(PricedTransaction::new(
                tx.gas_price,
                tx.hash,
                tx.added_at,
            ));

            // Reset state
            let _ = tx.rollback();
            rolled_back.push(*hash);
        }

        // Remove from pending batches
        self.pending_batches
            .retain(|b| !b.transaction_hashes.iter().any(|h| hashes.contains(h)));

        rolled_back
    }
    /// Cleans up timed out pending inclusion transactions.
    ///
    /// INVARIANT-5: Transactions in PendingInclusion for > timeout are auto-rolled back.
    pub fn cleanup_timeouts(&mut self, now: Timestamp) -> Vec<Hash> {
        let timeout_ms = self.config.pending_inclusion_timeout_ms;

        // Find timed out transactions
        let timed_out: Vec<Hash> = self
            .by_hash
            .values()
            .filter(|tx| tx.is_timed_out(now, timeout_ms))
            .map(|tx| tx.hash)
            .collect();

        // Rollback all timed out transactions
        self.rollback(&timed_out)
    }

    /// Gets the number of transactions for a sender.
    pub fn sender_count(&self, sender: &Address) -> usize {
        self.by_sender.get(sender).map(|m| m.len()).unwrap_or(0)
    }

    /// Gets all transaction hashes for a sender.
    pub fn sender_transactions(&self, sender: &Address) -> Vec<Hash> {
        self.by_sender
            .get(sender)
            .map(|m| m.values().copied().collect())
            .unwrap_or_default()
    }

    /// Gets the mempool status.
    pub fn status(&self, now: Timestamp) -> MempoolStatus {
        let oldest_age = self
            .by_hash
            .values()
            .map(|tx| now.saturating_sub(tx.added_at))
            .max()
            .unwrap_or(0);

        let total_gas: u64 = self.by_hash.values().map(|tx| tx.gas_limit).sum();

        MempoolStatus {
            pending_count: self.pending_count(),
            pending_inclusion_count: self.pending_inclusion_count(),
            total_gas,
            memory_bytes: self.by_hash.len() * std::mem::size_of::<MempoolTransaction>(),
            oldest_tx_age_ms: oldest_age,
        }
    }
}
