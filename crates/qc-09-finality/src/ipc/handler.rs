//! IPC Handler for Finality subsystem
//!
//! Reference: SPEC-09-FINALITY.md Section 6, IPC-MATRIX.md

use crate::error::{FinalityError, FinalityResult, SubsystemId};
use crate::events::incoming::{AttestationBatch, FinalityCheckRequest, FinalityProofRequest};
use crate::ports::inbound::FinalityApi;
use shared_types::envelope::AuthenticatedMessage;
use shared_types::security::{validate_hmac_signature, validate_timestamp, NonceCache};
use std::sync::Arc;

/// Authorized senders per IPC-MATRIX.md
const CONSENSUS_SUBSYSTEM: SubsystemId = 8;
const CROSS_CHAIN_SUBSYSTEM: SubsystemId = 15;

/// IPC Handler for Finality subsystem
///
/// Reference: IPC-MATRIX.md Subsystem 9 Security Boundaries
///
/// Authorized senders:
/// - AttestationBatch: Consensus (8) ONLY
/// - FinalityCheckRequest: Consensus (8) ONLY
/// - FinalityProofRequest: Cross-Chain (15) ONLY
pub struct FinalityIpcHandler<F>
where
    F: FinalityApi,
{
    finality_service: Arc<F>,
    shared_secret: [u8; 32],
    nonce_cache: Arc<NonceCache>,
}

impl<F> FinalityIpcHandler<F>
where
    F: FinalityApi,
{
    /// Create new IPC handler with shared secret
    pub fn new(finality_service: Arc<F>, shared_secret: [u8; 32]) -> Self {
        Self {
            finality_service,
            shared_secret,
            nonce_cache: NonceCache::new_shared(),
        }
    }

    /// Verify message security (HMAC, timestamp, nonce)
    fn verify_message<T>(
        &self,
        message: &AuthenticatedMessage<T>,
        message_bytes: &[u8],
    ) -> FinalityResult<()> {
        // 1. Verify timestamp
        validate_timestamp(message.timestamp).map_err(|_| FinalityError::IpcSecurityViolation {
            reason: "Timestamp out of range".to_string(),
        })?;

        // 2. Check nonce for replay
        if !self.nonce_cache.check_and_insert(message.nonce) {
            return Err(FinalityError::IpcSecurityViolation {
                reason: "Replay detected - nonce already used".to_string(),
            });
        }

        // 3. Verify HMAC signature
        if !validate_hmac_signature(message_bytes, &message.signature, &self.shared_secret) {
            return Err(FinalityError::IpcSecurityViolation {
                reason: "HMAC verification failed".to_string(),
            });
        }

        Ok(())
    }

    /// Handle attestation batch from Consensus
    ///
    /// SECURITY: Sender MUST be Consensus (8)
    /// Reference: IPC-MATRIX.md Subsystem 9
    pub async fn handle_attestation_batch(
        &self,
        message: AuthenticatedMessage<AttestationBatch>,
        message_bytes: &[u8],
    ) -> FinalityResult<()> {
        // 1. Verify message security
        self.verify_message(&message, message_bytes)?;

        // 2. Verify sender is Consensus
        if message.sender_id != CONSENSUS_SUBSYSTEM {
            return Err(FinalityError::UnauthorizedSender {
                sender_id: message.sender_id,
            });
        }

        // 3. Process attestations
        let batch = message.payload;
        let _result = self
            .finality_service
            .process_attestations(batch.attestations)
            .await?;

        Ok(())
    }

    /// Handle finality check request from Consensus
    ///
    /// SECURITY: Sender MUST be Consensus (8)
    pub async fn handle_finality_check(
        &self,
        message: AuthenticatedMessage<FinalityCheckRequest>,
        message_bytes: &[u8],
    ) -> FinalityResult<bool> {
        // 1. Verify message security
        self.verify_message(&message, message_bytes)?;

        // 2. Verify sender is Consensus
        if message.sender_id != CONSENSUS_SUBSYSTEM {
            return Err(FinalityError::UnauthorizedSender {
                sender_id: message.sender_id,
            });
        }

        // 3. Check finality
        Ok(self
            .finality_service
            .is_finalized(message.payload.block_hash)
            .await)
    }

    /// Handle finality proof request from Cross-Chain
    ///
    /// SECURITY: Sender MUST be Cross-Chain (15)
    pub async fn handle_finality_proof_request(
        &self,
        message: AuthenticatedMessage<FinalityProofRequest>,
        message_bytes: &[u8],
    ) -> FinalityResult<Option<crate::domain::Checkpoint>> {
        // 1. Verify message security
        self.verify_message(&message, message_bytes)?;

        // 2. Verify sender is Cross-Chain
        if message.sender_id != CROSS_CHAIN_SUBSYSTEM {
            return Err(FinalityError::UnauthorizedSender {
                sender_id: message.sender_id,
            });
        }

        // 3. Get finality proof
        let is_finalized = self
            .finality_service
            .is_finalized(message.payload.block_hash)
            .await;

        if is_finalized {
            Ok(self.finality_service.get_last_finalized().await)
        } else {
            Ok(None)
        }
    }
}
