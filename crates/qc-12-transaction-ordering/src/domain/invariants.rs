//! Domain invariants for Canonical Transaction Ordering.

use super::entities::OrderingViolation;
use super::value_objects::Hash;

/// INVARIANT: strict lexicographic order.
///
/// The coinbase transaction (position 0) is exempt from ordering: it is
/// always first regardless of its hash. Every transaction after it must
/// be in strictly increasing txid order. Returns the list of violations
/// found (empty if the order is canonical).
pub fn check_canonical_order(txids: &[Hash]) -> Vec<OrderingViolation> {
    let mut violations = Vec::new();
    // Position 0 is coinbase, exempt. Ordering is enforced from position 1
    // onward, mirroring how the reference implementation skips the
    // coinbase-adjacent pair as well.
    for i in 2..txids.len() {
        let previous = txids[i - 1];
        let current = txids[i];
        if previous >= current {
            violations.push(OrderingViolation {
                position: i,
                previous_txid: previous,
                current_txid: current,
            });
        }
    }
    violations
}
