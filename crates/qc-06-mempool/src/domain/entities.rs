//! Core domain entities for the Mempool subsystem.
//!
//! Defines the transaction state machine and related types.

pub use primitive_types::U256;
pub use shared_types::Hash;

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// A transaction signed by its sender, as admitted into the pool.
///
/// Distinct from `shared_types::Transaction`: the mempool needs gas pricing
/// fields for fee-based ordering, which the cross-subsystem envelope type
/// doesn't carry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignedTransaction {
    /// Sender address.
    pub from: Address,
    /// Recipient address (`None` for contract creation).
    pub to: Option<Address>,
    /// Transaction value in wei.
    pub value: U256,
    /// Sender's nonce.
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Transaction payload (calldata or init code).
    pub data: Vec<u8>,
    /// Signature over the transaction.
    pub signature: [u8; 64],
}

impl SignedTransaction {
    /// Returns the sender address.
    ///
    /// Signature recovery happens upstream (Subsystem 10); by the time a
    /// transaction reaches the mempool `from` is already the verified sender.
    pub fn sender(&self) -> Address {
        self.from
    }

    /// Computes the transaction hash over its signed fields.
    pub fn hash(&self) -> Hash {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.from);
        hasher.update(self.to.unwrap_or([0u8; 20]));
        hasher.update([self.to.is_some() as u8]);
        let mut value_bytes = [0u8; 32];
        self.value.to_big_endian(&mut value_bytes);
        hasher.update(value_bytes);
        hasher.update(self.nonce.to_be_bytes());
        let mut gas_price_bytes = [0u8; 32];
        self.gas_price.to_big_endian(&mut gas_price_bytes);
        hasher.update(gas_price_bytes);
        hasher.update(self.gas_limit.to_be_bytes());
        hasher.update(&self.data);
        hasher.update(self.signature);

        hasher.finalize().into()
    }
}

/// Maximum CPFP ancestor chain length considered when computing effective fee rate.
pub const MAX_ANCESTORS: usize = 25;

/// Maximum CPFP descendant chain length a single transaction may spawn.
pub const MAX_DESCENDANTS: usize = 25;

/// Transaction state in the Two-Phase Commit protocol.
///
/// State machine:
/// ```text
/// [PENDING] ──propose──→ [PENDING_INCLUSION] ──confirm──→ [DELETED]
///                               │
///                               └── timeout/reject ──→ [PENDING] (rollback)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransactionState {
    /// Transaction is available for block inclusion.
    #[default]
    Pending,
    /// Transaction has been proposed for a block, awaiting storage confirmation.
    PendingInclusion {
        /// Target block height for this proposal.
        block_height: u64,
        /// Timestamp when the transaction was proposed (ms).
        proposed_at: Timestamp,
    },
}

/// A transaction in the mempool with metadata.
///
/// Wraps the full SignedTransaction with pool bookkeeping.
///
/// INVARIANT-1: No two transactions can have the same hash.
/// INVARIANT-2: Transactions from same sender must be ordered by nonce.
#[derive(Clone, Debug)]
pub struct MempoolTransaction {
    /// The signed transaction (full transaction data).
    pub transaction: SignedTransaction,
    /// Transaction hash (unique identifier).
    pub hash: Hash,
    /// Sender address (20 bytes).
    pub sender: Address,
    /// Sender's nonce for this transaction.
    pub nonce: u64,
    /// Gas price for prioritization.
    pub gas_price: U256,
    /// Gas limit for this transaction.
    pub gas_limit: u64,
    /// Current state in Two-Phase Commit.
    pub state: TransactionState,
    /// Timestamp when added to the pool (ms).
    pub added_at: Timestamp,
    /// Target block height (if in pending_inclusion state).
    pub target_block: Option<u64>,
}

impl MempoolTransaction {
    /// Creates a new pending transaction from a SignedTransaction.
    pub fn new(transaction: SignedTransaction, added_at: Timestamp) -> Self {
        let hash = transaction.hash();
        let sender = transaction.sender();
        let nonce = transaction.nonce;
        let gas_price = transaction.gas_price;
        let gas_limit = transaction.gas_limit;

        Self {
            transaction,
            hash,
            sender,
            nonce,
            gas_price,
            gas_limit,
            state: TransactionState::Pending,
            added_at,
            target_block: None,
        }
    }

    /// Returns the total gas cost (gas_price * gas_limit).
    pub fn gas_cost(&self) -> U256 {
        self.gas_price * U256::from(self.gas_limit)
    }

    /// Returns the total cost (value + gas_cost).
    pub fn total_cost(&self) -> U256 {
        self.transaction.value + self.gas_cost()
    }

    /// Estimated wire size in bytes (fixed fields + payload).
    ///
    /// Fixed-field estimate: from(20) + to(20) + value(32) + nonce(8) +
    /// gas_price(32) + gas_limit(8) + signature(64) = 184 bytes.
    pub fn size_bytes(&self) -> usize {
        184 + self.transaction.data.len()
    }

    /// Fee rate in wei-per-byte, used for priority tiering.
    ///
    /// Standalone rate (no ancestor chain). See `domain::cpfp` for the
    /// CPFP-adjusted effective rate used by block template selection.
    pub fn fee_rate(&self) -> u64 {
        let size = self.size_bytes();
        if size == 0 {
            return 0;
        }
        (self.gas_cost() / U256::from(size as u64)).low_u64()
    }

    /// Priority tier derived from this transaction's standalone fee rate.
    pub fn priority(&self) -> super::value_objects::Priority {
        super::value_objects::Priority::from_fee_rate(self.fee_rate())
    }

    /// Returns true if the transaction is available for block inclusion.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, TransactionState::Pending)
    }

    /// Returns true if the transaction is awaiting storage confirmation.
    pub fn is_pending_inclusion(&self) -> bool {
        matches!(self.state, TransactionState::PendingInclusion { .. })
    }

    /// Moves the transaction to PendingInclusion state.
    ///
    /// # Errors
    /// Returns error if transaction is already in PendingInclusion state.
    pub fn propose(&mut self, block_height: u64, now: Timestamp) -> Result<(), &'static str> {
        if self.is_pending_inclusion() {
            return Err("Transaction already pending inclusion");
        }
        self.state = TransactionState::PendingInclusion {
            block_height,
            proposed_at: now,
        };
        self.target_block = Some(block_height);
        Ok(())
    }

    /// Rolls back the transaction to Pending state.
    ///
    /// # Errors
    /// Returns error if transaction is not in PendingInclusion state.
    pub fn rollback(&mut self) -> Result<(), &'static str> {
        if !self.is_pending_inclusion() {
            return Err("Transaction not pending inclusion");
        }
        self.state = TransactionState::Pending;
        self.target_block = None;
        Ok(())
    }

    /// Checks if the pending inclusion has timed out.
    pub fn is_timed_out(&self, now: Timestamp, timeout_ms: u64) -> bool {
        match self.state {
            TransactionState::PendingInclusion { proposed_at, .. } => {
                now.saturating_sub(proposed_at) >= timeout_ms
            }
            _ => false,
        }
    }
}

/// Mempool configuration.
#[derive(Clone, Debug)]
pub struct MempoolConfig {
    /// Maximum transactions in the pool.
    pub max_transactions: usize,
    /// Maximum transactions per account.
    pub max_per_account: usize,
    /// Minimum gas price.
    pub min_gas_price: U256,
    /// Maximum gas per transaction.
    pub max_gas_per_tx: u64,
    /// Pending inclusion timeout (milliseconds).
    pub pending_inclusion_timeout_ms: u64,
    /// Nonce gap timeout (milliseconds).
    pub nonce_gap_timeout_ms: u64,
    /// Enable Replace-by-Fee.
    pub enable_rbf: bool,
    /// Minimum fee bump percentage for RBF.
    pub rbf_min_bump_percent: u64,
    /// Soft memory budget for the pool (bytes). Crossing this triggers a
    /// batch eviction sweep down to `eviction_target_fraction` of capacity.
    pub max_memory_bytes: usize,
    /// Fraction of `max_transactions` an eviction sweep drains down to.
    pub eviction_target_fraction: f64,
    /// Absolute age (ms) after which a transaction is purged regardless of
    /// fee rate or state.
    pub entry_max_age_ms: u64,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            max_transactions: 5000,
            max_per_account: 16,
            min_gas_price: U256::from(1_000_000_000u64), // 1 gwei
            max_gas_per_tx: 30_000_000,
            pending_inclusion_timeout_ms: 30_000, // 30 seconds
            nonce_gap_timeout_ms: 600_000,        // 10 minutes
            enable_rbf: true,
            rbf_min_bump_percent: 10,
            max_memory_bytes: 300_000_000, // 300 MB
            eviction_target_fraction: 0.9,
            entry_max_age_ms: 86_400_000, // 24 hours
        }
    }
}

impl MempoolConfig {
    /// Creates a minimal config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_transactions: 100,
            max_per_account: 4,
            pending_inclusion_timeout_ms: 1000, // 1 second
            max_memory_bytes: 1_000_000,
            entry_max_age_ms: 60_000,
            ..Default::default()
        }
    }
}

/// Identifier for a transaction cluster, assigned when two or more
/// transactions are first linked by a dependency edge.
pub type ClusterId = u64;

/// A set of transactions merged together because they share a
/// dependency edge (an ancestor/descendant pair across the same or
/// chained senders). Clusters are tracked so the whole group can be
/// included or evicted as a unit rather than piecemeal.
#[derive(Clone, Debug)]
pub struct TransactionCluster {
    pub cluster_id: ClusterId,
    /// Transaction hashes belonging to this cluster.
    pub members: Vec<Hash>,
    /// Sum of `size_bytes()` over all members.
    pub total_size: usize,
    /// Sum of `gas_cost()` over all members.
    pub total_fees: U256,
    /// Lowest priority tier among members (a cluster is only as
    /// urgent as its least urgent transaction).
    pub priority: super::value_objects::Priority,
    pub created_time: Timestamp,
}

impl TransactionCluster {
    pub fn new(cluster_id: ClusterId, created_time: Timestamp) -> Self {
        Self {
            cluster_id,
            members: Vec::new(),
            total_size: 0,
            total_fees: U256::zero(),
            priority: super::value_objects::Priority::Urgent,
            created_time,
        }
    }

    /// Folds a transaction's size/fee/priority into the cluster, adding
    /// it to the membership if not already present.
    pub fn absorb(&mut self, tx: &MempoolTransaction) {
        if !self.members.contains(&tx.hash) {
            self.members.push(tx.hash);
        }
        self.total_size += tx.size_bytes();
        self.total_fees += tx.gas_cost();
        self.priority = self.priority.min(tx.priority());
    }

    /// Merges `other` into `self`, taking the union of membership and
    /// the lower (less urgent) of the two priorities.
    pub fn merge(&mut self, other: &TransactionCluster) {
        for hash in &other.members {
            if !self.members.contains(hash) {
                self.members.push(*hash);
            }
        }
        self.total_size += other.total_size;
        self.total_fees += other.total_fees;
        self.priority = self.priority.min(other.priority);
    }
}

/// Fee-rate estimate for each priority tier, with a confidence score
/// reflecting how many samples backed the estimate.
///
/// Indexed by `Priority::index()` (`Minimal` = 0 .. `Urgent` = 4).
#[derive(Clone, Debug)]
pub struct FeeEstimation {
    pub fee_rate: [u64; 5],
    pub confirmation_target: [u32; 5],
    pub confidence: [f64; 5],
    pub last_update: Timestamp,
}

impl FeeEstimation {
    /// Fixed confirmation targets (in blocks) per tier: more urgent tiers
    /// are expected to confirm sooner.
    pub const CONFIRMATION_TARGETS: [u32; 5] = [24, 12, 6, 3, 1];

    pub fn empty(now: Timestamp) -> Self {
        Self {
            fee_rate: [0; 5],
            confirmation_target: Self::CONFIRMATION_TARGETS,
            confidence: [0.0; 5],
            last_update: now,
        }
    }

    pub fn fee_rate_for(&self, priority: super::value_objects::Priority) -> u64 {
        self.fee_rate[priority.index()]
    }

    pub fn confidence_for(&self, priority: super::value_objects::Priority) -> f64 {
        self.confidence[priority.index()]
    }

    pub fn confirmation_target_for(&self, priority: super::value_objects::Priority) -> u32 {
        self.confirmation_target[priority.index()]
    }
}
