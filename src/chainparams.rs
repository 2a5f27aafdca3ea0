//! Per-network chain parameters and the registry that selects one of them.
//!
//! Every supported network is described by one [`ChainParams`] value built
//! from plain data in [`networks`]. Construction finishes with a self-check
//! against the published genesis digests, so a set that exists is a set
//! that matches the rest of the network. [`ChainRegistry`] owns all three
//! and tracks the active one; [`global`] wraps a process-wide instance.

pub mod base58;
pub mod checkpoints;
pub mod consensus;
pub mod deployments;
pub mod global;
pub mod network;
pub mod networks;
pub mod params;
pub mod registry;
pub mod seeds;

pub use base58::{Base58Prefixes, Base58Type};
pub use checkpoints::Checkpoints;
pub use consensus::{ChainTxData, ConsensusParams};
pub use deployments::{Bip9Deployment, DeploymentPos, Deployments, NO_TIMEOUT};
pub use global::{params, select_params};
pub use network::Network;
pub use networks::{build_params, main_params, regtest_params, test_params};
pub use params::ChainParams;
pub use registry::{ChainRegistry, DecodedAddress};
pub use seeds::{lookup_domain, DnsSeedData, SeedSpec6};
