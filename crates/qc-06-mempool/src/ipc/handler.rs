//! # IPC Message Handler - Two-Phase Commit Coordinator
//!
//! Processes incoming IPC messages with security validation.
//!
//! ## Security Validation Order
//!
//! 1. Sender authorization (per-message type)
//! 2. Timestamp bounds (±30s from now)
//! 3. HMAC signature verification
//! 4. Nonce uniqueness (replay prevention)
//!
//! ## Two-Phase Commit Flow
//!
//! ```text
//! Consensus → GetTransactionsRequest → [propose] → PENDING_INCLUSION
//! Storage → BlockStorageConfirmation → [confirm] → DELETED
//! Storage/Consensus → BlockRejectedNotification → [rollback] → PENDING
//! ```

use crate::domain::{Hash, MempoolError, MempoolTransaction, TransactionPool};
use crate::ipc::payloads::*;
use crate::ipc::security::AuthorizationRules;
use crate::ports::TimeSource;
use shared_types::security::{DerivedKeyProvider, KeyProvider, NonceCache};
use std::sync::Arc;
use uuid::Uuid;

/// Security context for IPC message validation.
///
/// Groups the common security parameters required for all IPC handlers,
/// reducing function argument count from 7 to 2 (context + request).
///
/// # Architecture
/// All IPC messages require:
/// - Sender ID validation (per message type)
/// - Timestamp bounds checking
/// - HMAC signature verification
/// - Nonce replay prevention
#[derive(Debug)]
pub struct IpcSecurityContext<'a> {
    /// Subsystem ID of the message sender (from envelope)
    pub sender_id: u8,
    /// Message timestamp (for freshness validation)
    pub timestamp: u64,
    /// Unique message nonce (for replay prevention)
    pub nonce: Uuid,
    /// HMAC signature over message bytes
    pub signature: &'a [u8; 64],
    /// Raw message bytes (for signature verification)
    pub message_bytes: &'a [u8],
}

impl<'a> IpcSecurityContext<'a> {
    /// Creates a new security context from IPC message envelope fields.
    #[inline]
    pub fn new(
        sender_id: u8,
        timestamp: u64,
        nonce: Uuid,
        signature: &'a [u8; 64],
        message_bytes: &'a [u8],
    ) -> Self {
        Self {
            sender_id,
            timestamp,
            nonce,
            signature,
            message_bytes,
        }
    }
}

/// IPC message handler for the Mempool.
///
/// Uses the centralized security module from `shared-types` for all
/// security validation (HMAC, nonce, timestamp).
pub struct IpcHandler<T: TimeSource> {
    pool: TransactionPool,
    time_source: T,
    nonce_cache: Arc<NonceCache>,
    key_provider: DerivedKeyProvider,
}

impl<T: TimeSource> IpcHandler<T> {
    /// Creates a new IPC handler with default master secret.
    ///
    /// # Security Warning
    ///
    /// The default master secret is for development/testing only.
    /// Production deployments MUST use `with_master_secret()`.
    pub fn new(pool: TransactionPool, time_source: T) -> Self {
        Self {
            pool,
            time_source,
            nonce_cache: NonceCache::new_shared(),
            key_provider: DerivedKeyProvider::new(vec![0u8; 32]),
        }
    }

    /// Creates a new IPC handler with custom master secret.
    ///
    /// The master secret is used to derive per-subsystem HMAC keys.
    pub fn with_master_secret(
        pool: TransactionPool,
        time_source: T,
        master_secret: Vec<u8>,
    ) -> Self {
        Self {
            pool,
            time_source,
            nonce_cache: NonceCache::new_shared(),
            key_provider: DerivedKeyProvider::new(master_secret),
        }
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &TransactionPool {
        &self.pool
    }

    /// Returns a mutable reference to the underlying pool.
    pub fn pool_mut(&mut self) -> &mut TransactionPool {
        &mut self.pool
    }

    /// Validates security for an incoming IPC message.
    ///
    /// Uses the centralized security module from `shared-types`.
    fn validate_security(&self, ctx: &IpcSecurityContext<'_>) -> Result<(), MempoolError> {
        let now = self.time_source.now();

        // Step 1: Validate timestamp
        self.validate_timestamp(ctx.timestamp, now)?;

        // Step 2: Validate HMAC signature using centralized module
        let shared_secret = self
            .key_provider
            .get_shared_secret(ctx.sender_id)
            .ok_or(MempoolError::InvalidSignature)?;

        if !shared_types::security::validate_hmac_signature(
            ctx.message_bytes,
            ctx.signature,
            &shared_secret,
        ) {
            return Err(MempoolError::InvalidSignature);
        }

        // Step 3: Validate nonce using centralized NonceCache
        if !self.nonce_cache.check_and_insert(ctx.nonce) {
            return Err(MempoolError::ReplayDetected {
                nonce: ctx.nonce.as_u128() as u64,
            });
        }

        Ok(())
    }

    /// Validates timestamp is within acceptable bounds.
    fn validate_timestamp(&self, msg_timestamp: u64, now: u64) -> Result<(), MempoolError> {
        let max_age = shared_types::security::MAX_AGE;
        let max_future = shared_types::security::MAX_FUTURE_SKEW;

        if msg_timestamp > now + max_future {
            return Err(MempoolError::TimestampTooFuture {
                timestamp: msg_timestamp,
                now,
            });
        }
        if now > msg_timestamp && now - msg_timestamp > max_age {
            return Err(MempoolError::TimestampTooOld {
                timestamp: msg_timestamp,
                now,
            });
        }
        Ok(())
    }

    /// Handles AddTransactionRequest.
    ///
    /// # Security
    /// - Validates sender is Subsystem 10 (Signature Verification)
    /// - Validates timestamp, HMAC signature, nonce (via centralized module)
    /// - Validates signature_verified is true
    pub fn handle_add_transaction(
        &mut self,
        ctx: &IpcSecurityContext<'_>,
        request: AddTransactionRequest,
    ) -> Result<AddTransactionResponse, MempoolError> {
        // Security Step 1: Validate sender authorization
        AuthorizationRules::validate_add_transaction(ctx.sender_id)?;

        // Security Step 2-4: Validate timestamp, signature, nonce
        self.validate_security(ctx)?;

        // Security Step 5: Validate signature was verified
        if !request.signature_verified {
            return Err(MempoolError::SignatureNotVerified);
        }

        let now = self.time_source.now();
        let tx = MempoolTransaction::new(request.transaction, now);
        let tx_hash = tx.hash;

        match self.pool.add(tx) {
            Ok(()) => Ok(AddTransactionResponse {
                correlation_id: request.correlation_id,
                accepted: true,
                tx_hash: Some(tx_hash),
                error: None,
            }),
            Err(e) => Ok(AddTransactionResponse {
                correlation_id: request.correlation_id,
                accepted: false,
                tx_hash: None,
                error: Some(e.to_string()),
            }),
        }
    }

    /// Handles GetTransactionsRequest.
    ///
    /// # Security
    /// - Validates sender is Subsystem 8 (Consensus)
    /// - Validates timestamp, HMAC signature, nonce
    pub fn handle_get_transactions(
        &mut self,
        ctx: &IpcSecurityContext<'_>,
        request: GetTransactionsRequest,
    ) -> Result<GetTransactionsResponse, MempoolError> {
        // Security validations
        AuthorizationRules::validate_get_transactions(ctx.sender_id)?;
        self.validate_security(ctx)?;

        let txs = self
            .pool
            .get_for_block(request.max_count as usize, request.max_gas);

        let tx_hashes: Vec<Hash> = txs.iter().map(|t| t.hash).collect();
        let total_gas: u64 = txs.iter().map(|t| t.gas_limit).sum();

        let now = self.time_source.now();
        self.pool
            .propose(&tx_hashes, request.target_block_height, now);

        Ok(GetTransactionsResponse {
            correlation_id: request.correlation_id,
            tx_hashes,
            total_gas,
        })
    }

    /// Handles BlockStorageConfirmation.
    ///
    /// # Security
    /// - Validates sender is Subsystem 2 (Block Storage)
    /// - Validates timestamp, HMAC signature, nonce
    pub fn handle_storage_confirmation(
        &mut self,
        ctx: &IpcSecurityContext<'_>,
        confirmation: BlockStorageConfirmation,
    ) -> Result<Vec<Hash>, MempoolError> {
        // Security validations
        AuthorizationRules::validate_storage_confirmation(ctx.sender_id)?;
        self.validate_security(ctx)?;

        // Confirm the transactions (permanently delete them)
        let confirmed = self.pool.confirm(&confirmation.included_transactions);
        Ok(confirmed)
    }

    /// Handles BlockRejectedNotification.
    ///
    /// # Security
    /// - Validates sender is Subsystem 2 or 8
    /// - Validates timestamp, HMAC signature, nonce
    pub fn handle_block_rejected(
        &mut self,
        ctx: &IpcSecurityContext<'_>,
        notification: BlockRejectedNotification,
    ) -> Result<Vec<Hash>, MempoolError> {
        // Security validations
        AuthorizationRules::validate_block_rejected(ctx.sender_id)?;
        self.validate_security(ctx)?;

        // Rollback the transactions (return to pending)
        let rolled_back = self.pool.rollback(&notification.affected_transactions);
        Ok(rolled_back)
    }

    /// Handles RemoveTransactionsRequest.
    ///
    /// # Security
    /// - Validates sender is Subsystem 8 (Consensus)
    /// - Validates timestamp, HMAC signature, nonce
    pub fn handle_remove_transactions(
        &mut self,
        ctx: &IpcSecurityContext<'_>,
        request: RemoveTransactionsRequest,
    ) -> Result<RemoveTransactionsResponse, MempoolError> {
        // Security validations
        AuthorizationRules::validate_remove_transactions(ctx.sender_id)?;
        self.validate_security(ctx)?;

        let mut removed = Vec::new();
        for hash in &request.tx_hashes {
            if self.pool.remove(hash).is_ok() {
                removed.push(*hash);
            }
        }

        Ok(RemoveTransactionsResponse {
            correlation_id: request.correlation_id,
            removed_count: removed.len(),
            removed,
        })
    }

    /// Handles GetStatusRequest (no security validation needed - status is public).
    pub fn handle_get_status(&self, request: GetStatusRequest) -> GetStatusResponse {
        let now = self.time_source.now();
        let status = self.pool.status(now);

        GetStatusResponse {
            correlation_id: request.correlation_id,
            status: status.into(),
        }
    }

    /// Runs periodic cleanup of timed out transactions.
    pub fn cleanup_timeouts(&mut self) -> Vec<Hash> {
        let now = self.time_source.now();
        self.pool.cleanup_timeouts(now)
    }
}
