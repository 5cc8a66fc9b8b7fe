//! Canonical ordering sort.

use crate::domain::value_objects::Hash;

/// Sort transactions into canonical order: `coinbase` first (if present,
/// unconditionally, regardless of its hash value), followed by the rest
/// in strictly increasing lexicographic txid order.
pub fn sort_transactions(coinbase: Option<Hash>, mut rest: Vec<Hash>) -> Vec<Hash> {
    rest.sort();
    rest.dedup();
    match coinbase {
        Some(cb) => {
            let mut ordered = Vec::with_capacity(rest.len() + 1);
            ordered.push(cb);
            ordered.extend(rest);
            ordered
        }
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::H256;

    fn h(v: u8) -> Hash {
        H256::from_low_u64_be(v as u64)
    }

    #[test]
    fn test_sort_with_coinbase_first() {
        let sorted = sort_transactions(Some(h(255)), vec![h(3), h(1), h(2)]);
        assert_eq!(sorted, vec![h(255), h(1), h(2), h(3)]);
    }

    #[test]
    fn test_sort_without_coinbase() {
        let sorted = sort_transactions(None, vec![h(3), h(1), h(2)]);
        assert_eq!(sorted, vec![h(1), h(2), h(3)]);
    }

    #[test]
    fn test_sort_deduplicates() {
        let sorted = sort_transactions(None, vec![h(1), h(1), h(2)]);
        assert_eq!(sorted, vec![h(1), h(2)]);
    }
}
