//! # Quantum-Chain Node Runtime
//!
//! The main entry point for the Quantum-Chain blockchain node.
//!
//! ## Architecture
//!
//! This node implements a modular, event-driven architecture as specified
//! in Architecture.md v2.2. All subsystems communicate via the authenticated
//! message bus using the `AuthenticatedMessage<T>` envelope.
//!
//! ## Subsystems
//!
//! 1. Peer Discovery
//! 2. Block Storage
//! 3. Transaction Indexing
//! 4. State Management
//! 5. P2P Networking
//! 6. Mempool
//! 7. Block Propagation
//! 8. Consensus
//! 9. Finality
//! 10. Signature Verification
//! 11. RPC/API Gateway
//! 12. Metrics & Monitoring
//! 13. Light Client Support
//! 14. Sharding (V2)
//! 15. Bloom Filters

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Node configuration.
pub struct NodeConfig {
    /// Network port for P2P communication.
    pub p2p_port: u16,
    /// Network port for RPC API.
    pub rpc_port: u16,
    /// Data directory for block storage.
    pub data_dir: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            p2p_port: 30303,
            rpc_port: 8545,
            data_dir: "./data".to_string(),
        }
    }
}

/// Initialize the node runtime.
fn init_node(config: &NodeConfig) {
    info!("Initializing Quantum-Chain node...");
    info!("P2P Port: {}", config.p2p_port);
    info!("RPC Port: {}", config.rpc_port);
    info!("Data Dir: {}", config.data_dir);

    // TODO: Initialize subsystems according to Architecture.md v2.2
    // - Initialize Event Bus
    // - Initialize Block Storage (Subsystem 2)
    // - Initialize Consensus (Subsystem 8)
    // - Initialize remaining subsystems
    // - Start the event loop

    info!("Quantum-Chain node initialized successfully");
    info!("Architecture version: 2.2");
    info!("Protocol version: 1");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Quantum-Chain Node Runtime v0.1.0");
    info!("===========================================");

    let config = NodeConfig::default();
    init_node(&config);

    // Keep the node running
    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down gracefully...");

    Ok(())
}
