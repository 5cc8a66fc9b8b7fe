//! # Transaction Pool (Mempool) Subsystem
//!
//! **Subsystem ID:** 6
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Queues, validates, and prioritizes unconfirmed transactions awaiting block
//! inclusion. Implements a Two-Phase Commit protocol ensuring zero
//! transaction loss during storage, a priority/CPFP-aware block template
//! builder for high-throughput block production, and a dynamic minimum-fee
//! floor that tightens under eviction pressure and relaxes as pressure eases.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | No Duplicate Transactions | `domain/pool.rs` - `add()` check |
//! | Nonce Ordering Per Sender | `domain/pool.rs` - BTreeMap keys |
//! | PENDING_INCLUSION Exclusion | `domain/pool.rs` - by_price only has PENDING |
//! | Auto-Rollback on Timeout | `domain/pool.rs` - `cleanup_timeouts()` |
//! | Index Consistency | `domain/pool.rs` - `check_invariants()` |
//!
//! ## Two-Phase Commit Protocol
//!
//! Transactions are NEVER deleted when proposed. Deletion occurs ONLY upon
//! confirmation from Block Storage (Subsystem 2).
//!
//! ```text
//! [PENDING] ──propose──→ [PENDING_INCLUSION] ──confirm──→ [DELETED]
//!                               │
//!                               └── timeout/reject ──→ [PENDING]
//! ```
//!
//! | Stage | Method | Effect |
//! |-------|--------|--------|
//! | Propose | `pool.propose()` | Move to PENDING_INCLUSION, NOT deleted |
//! | Confirm | `pool.confirm()` | Permanently delete transactions |
//! | Rollback | `pool.rollback()` | Return to PENDING state |
//! | Timeout | `cleanup_timeouts()` | Auto-rollback after 30s |
//!
//! ## Security
//!
//! - **Centralized Security**: Uses `shared-types::security` for HMAC, nonce, timestamp
//! - **Envelope-Only Identity**: Identity derived solely from `AuthenticatedMessage.sender_id`
//! - **Replay Prevention**: Centralized `NonceCache` tracks used nonces
//!
//! ### IPC Authorization
//!
//! | Message | Authorized Sender(s) |
//! |---------|---------------------|
//! | `AddTransactionRequest` | Signature Verification (10) |
//! | `GetTransactionsRequest` | Consensus (8) |
//! | `RemoveTransactionsRequest` | Consensus (8) |
//! | `BlockStorageConfirmation` | Block Storage (2) |
//! | `BlockRejectedNotification` | Block Storage (2), Consensus (8) |
//!
//! ## Outbound Dependencies
//!
//! | Subsystem | Trait | Purpose |
//! |-----------|-------|---------|
//! | 4 (State Management) | `StateProvider` | Balance/nonce validation |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/ - Event bus publisher/subscriber implementations     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  application/service.rs - MempoolEngine, mutex-serialized API   │
//! │  ports/inbound.rs  - MempoolApi trait                          │
//! │  ports/outbound.rs - StateProvider, TimeSource traits          │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs    - MempoolTransaction, TransactionState  │
//! │  domain/pool.rs        - TransactionPool with priority queue   │
//! │  domain/cpfp.rs        - Child-pays-for-parent fee tracking    │
//! │  domain/dmmf.rs        - Dynamic minimum-fee floor             │
//! │  domain/services.rs    - RBF calculation, nonce validation     │
//! │  domain/value_objects.rs - PricedTransaction, MempoolStatus    │
//! │  domain/errors.rs      - MempoolError enum                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::*;
pub use application::{MaintenanceReport, MempoolEngine};
pub use domain::*;
pub use ipc::*;
