//! Reacoin chain parameters
//!
//! Consensus constants, genesis blocks, checkpoints, address prefixes and
//! seed lists for the three Reacoin networks (`main`, `test`, `regtest`),
//! plus the registry that selects which one a process runs on.
//!
//! # Architecture
//!
//! ## Block & Transaction Primitives
//! - [`blockchain`] - Block headers, Merkle roots and the genesis builder
//! - [`transaction`] - Coinbase-capable transaction types and serialization
//! - [`script`] - Minimal script builder
//! - [`encode`] - Consensus wire encoding
//!
//! ## Cryptography
//! - [`crypto`] - Double SHA-256, HASH160, Base58Check, public keys
//!
//! ## Network Parameters
//! - [`chainparams`] - Parameter sets, deployments, checkpoints, seeds, registry
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration file
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Block & Transaction Primitives
// ============================================================================
pub mod blockchain;
pub mod encode;
pub mod script;
pub mod transaction;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Network Parameters
// ============================================================================
pub mod chainparams;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use chainparams::{ChainParams, ChainRegistry, Network};
pub use error::{ChainError, Result};
