//! # Secret Generation and Verification
//!
//! Cryptographic operations for HTLC secrets.
//!
//! Reference: System.md Lines 736, 739

use sha2::{Sha256, Digest};
use rand::RngCore;
use crate::domain::{Hash, Secret, CrossChainError};

/// Generate a cryptographically secure random secret.
///
/// Reference: System.md Line 736
pub fn generate_random_secret() -> Secret {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// Create a hashlock from a secret using SHA-256.
///
/// Reference: System.md Line 753 - "Use SHA-256, avoid weak hashes"
pub fn create_hash_lock(secret: &Secret) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Verify that a secret matches a hashlock.
///
/// Reference: System.md Line 739
pub fn verify_secret(secret: &Secret, hash_lock: &Hash) -> bool {
    let computed_hash = create_hash_lock(secret);
    computed_hash == *hash_lock
}

/// Verify claim is valid.
pub fn verify_claim(
    secret: &Secret,
    hash_lock: &Hash,
    claimer: &[u8; 20],
    authorized_recipient: &[u8; 20],
    current_time: u64,
    time_lock: u64,
) -> Result<(), CrossChainError> {
    // 1. Check not expired
    if current_time > time_lock {
        return Err(CrossChainError::HTLCExpired);
    }

    // 2. Check secret matches hashlock
    if !verify_secret(secret, hash_lock) {
        return Err(CrossChainError::InvalidSecret);
    }

    // 3. Check claimer is authorized
    if claimer != authorized_recipient {
        return Err(CrossChainError::UnauthorizedClaimer);
    }

    Ok(())
}

/// Verify refund is valid.
pub fn verify_refund(current_time: u64, time_lock: u64) -> Result<(), CrossChainError> {
    if current_time <= time_lock {
        return Err(CrossChainError::HTLCNotExpired);
    }
    Ok(())
}
