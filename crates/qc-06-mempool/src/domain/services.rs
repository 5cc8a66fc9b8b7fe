//! Domain services for the Mempool subsystem.
//!
//! Provides business logic functions that operate on domain entities.

use super::entities::{Hash, MempoolTransaction, SignedTransaction, U256};
use super::value_objects::ShortTxId;

/// Calculates the minimum gas price required for RBF replacement.
///
/// Formula: old_price * (100 + bump_percent) / 100
pub fn calculate_rbf_min_price(old_price: U256, bump_percent: u64) -> U256 {
    old_price * U256::from(100 + bump_percent) / U256::from(100)
}

/// Checks if a new gas price is sufficient for RBF.
pub fn is_valid_rbf_bump(old_price: U256, new_price: U256, bump_percent: u64) -> bool {
    new_price >= calculate_rbf_min_price(old_price, bump_percent)
}

/// Calculates short transaction IDs for a list of transactions.
///
/// Per System.md Subsystem 5 - Compact Block Relay.
pub fn calculate_short_ids(tx_hashes: &[Hash], nonce: u64) -> Vec<ShortTxId> {
    tx_hashes
        .iter()
        .map(|hash| ShortTxId::from_hash(hash, nonce))
        .collect()
}

/// Estimates memory usage for a transaction.
pub fn estimate_tx_memory(tx: &MempoolTransaction) -> usize {
    std::mem::size_of::<MempoolTransaction>() + tx.transaction.data.len()
}

/// Validates that transactions from a sender maintain nonce ordering.
///
/// Returns true if all nonces form a contiguous sequence starting from `start_nonce`.
pub fn validate_nonce_sequence(transactions: &[&MempoolTransaction], start_nonce: u64) -> bool {
    let mut sorted: Vec<_> = transactions.iter().map(|t| t.nonce).collect();
    sorted.sort();

    for (i, nonce) in sorted.iter().enumerate() {
        if *nonce != start_nonce + i as u64 {
            return false;
        }
    }
    true
}

/// Computes the total gas for a list of transactions.
pub fn total_gas(transactions: &[&MempoolTransaction]) -> u64 {
    transactions.iter().map(|tx| tx.gas_limit).sum()
}

/// Computes the total value for a list of transactions.
pub fn total_value(transactions: &[&MempoolTransaction]) -> U256 {
    transactions
        .iter()
        .fold(U256::zero(), |acc, tx| acc + tx.transaction.value)
}
