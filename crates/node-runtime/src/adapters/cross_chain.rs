//! # Cross-Chain Adapter
//!
//! Connects qc-15 Cross-Chain to the event bus for IPC.
//!
//! ## IPC Interactions (IPC-MATRIX.md)
//!
//! | From | To | Message |
//! |------|-----|---------|
//! | 15 → 11 | Smart Contracts | HTLC deployment |
//! | 15 → 8 | Consensus | Cross-chain proofs |

#[cfg(feature = "qc-15")]
use qc_15_cross_chain::{
    calculate_timelocks, create_atomic_swap, AtomicSwap, AtomicSwapParams, ChainId,
    CrossChainConfig, Hash, Secret, HTLC,
};

#[cfg(feature = "qc-15")]
use std::collections::HashMap;

/// Cross-chain adapter for event bus integration.
#[cfg(feature = "qc-15")]
pub struct CrossChainAdapter {
    /// Configuration.
    config: CrossChainConfig,
    /// Subsystem ID.
    subsystem_id: u8,
    /// Active swaps.
    swaps: HashMap<Hash, AtomicSwap>,
    /// Active HTLCs.
    htlcs: HashMap<Hash, HTLC>,
}

#[cfg(feature = "qc-15")]
impl CrossChainAdapter {
    /// Create a new cross-chain adapter.
    pub fn new(config: CrossChainConfig) -> Self {
        Self {
            config,
            subsystem_id: 15,
            swaps: HashMap::new(),
            htlcs: HashMap::new(),
        }
    }

    /// Create with default config.
    pub fn with_defaults() -> Self {
        Self::new(CrossChainConfig::default())
    }

    /// Get subsystem ID.
    pub fn subsystem_id(&self) -> u8 {
        self.subsystem_id
    }

    /// Initiate a new atomic swap.
    pub fn initiate_swap(&mut self, params: AtomicSwapParams) -> (AtomicSwap, Secret) {
        let (swap, secret) = create_atomic_swap(params);

        self.swaps.insert(swap.id, swap.clone());
        (swap, secret)
    }

    /// Calculate recommended timelocks for a swap.
    pub fn get_timelocks(&self, source: ChainId, target: ChainId) -> (u64, u64) {
        let current_time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        calculate_timelocks(source, target, current_time)
    }

    /// Check if chain is supported.
    pub fn is_chain_supported(&self, chain: ChainId) -> bool {
        self.config.supported_chains.contains(&chain)
    }

    /// Get swap count.
    pub fn swap_count(&self) -> usize {
        self.swaps.len()
    }

    // =========================================================================
    // HTLC Lifecycle Methods
    // =========================================================================

    /// Register a new HTLC after deploying on-chain.
    pub fn register_htlc(&mut self, htlc: HTLC) {
        self.htlcs.insert(htlc.id, htlc);
    }

    /// Get an HTLC by ID.
    pub fn get_htlc(&self, id: &Hash) -> Option<&HTLC> {
        self.htlcs.get(id)
    }

    /// Get mutable reference to an HTLC by ID.
    pub fn get_htlc_mut(&mut self, id: &Hash) -> Option<&mut HTLC> {
        self.htlcs.get_mut(id)
    }

    /// Count of active HTLCs.
    pub fn htlc_count(&self) -> usize {
        self.htlcs.len()
    }
}

#[cfg(feature = "qc-15")]
impl Default for CrossChainAdapter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
