use super::base58::{Base58Prefixes, Base58Type};
use super::checkpoints::Checkpoints;
use super::consensus::{ChainTxData, ConsensusParams};
use super::deployments::DeploymentPos;
use super::network::Network;
use super::seeds::{resolve_dns_seeds, DnsSeedData, SeedSpec6};
use crate::blockchain::{verify_genesis, Block, GenesisSpec};
use crate::crypto::{hash160, parse_public_key, Hash256};
use crate::error::ChainError;
use serde::Serialize;
use tracing::warn;

/// Everything that identifies one network: consensus rules, genesis block,
/// wire identity, address prefixes and checkpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ChainParams {
    pub network: Network,
    pub consensus: ConsensusParams,
    /// Prefixed to every P2P message. Rarely used upper ASCII, invalid as
    /// UTF-8, and a large 32-bit integer at any alignment.
    #[serde(serialize_with = "serialize_magic")]
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub prune_after_height: u64,
    pub genesis_spec: GenesisSpec,
    #[serde(skip)]
    pub genesis: Block,
    pub dns_seeds: Vec<DnsSeedData>,
    pub fixed_seeds: Vec<SeedSpec6>,
    pub base58_prefixes: Base58Prefixes,
    pub checkpoints: Checkpoints,
    pub chain_tx_data: ChainTxData,
    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
}

fn serialize_magic<S: serde::Serializer>(magic: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(magic))
}

impl ChainParams {
    pub fn network_id(&self) -> &'static str {
        self.network.as_str()
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.consensus.hash_genesis_block
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    pub fn encode_address(&self, kind: Base58Type, payload: &[u8]) -> String {
        self.base58_prefixes.encode(kind, payload)
    }

    /// Pay-to-pubkey-hash address of a SEC-encoded public key.
    pub fn pubkey_address(&self, pubkey: &[u8]) -> Result<String, ChainError> {
        parse_public_key(pubkey)?;
        Ok(self.encode_address(Base58Type::PubkeyAddress, &hash160(pubkey)))
    }

    /// Resolves this network's DNS seeds on the default port. Lookup
    /// failures are returned next to the addresses that did resolve.
    pub fn resolve_dns_seeds(&self) -> (Vec<SeedSpec6>, Vec<ChainError>) {
        resolve_dns_seeds(&self.dns_seeds, self.default_port)
    }

    /// Cross-checks the assembled parameters: genesis digests, checkpoint
    /// anchoring, the deployment schedule and the BIP34 anchor.
    pub fn self_check(
        &self,
        expected_genesis_hash: &Hash256,
        expected_merkle_root: &Hash256,
    ) -> Result<(), ChainError> {
        verify_genesis(
            self.network.as_str(),
            &self.genesis,
            expected_genesis_hash,
            expected_merkle_root,
        )?;

        let genesis_hash = self.genesis.hash();
        if self.consensus.hash_genesis_block != genesis_hash {
            return Err(ChainError::GenesisMismatch {
                network: self.network.as_str(),
                what: "cached hash",
                expected: genesis_hash.to_hex(),
                actual: self.consensus.hash_genesis_block.to_hex(),
            });
        }

        self.checkpoints.verify_genesis(&genesis_hash)?;
        self.consensus.deployments.validate()?;

        if self.consensus.bip34_height == 0 && self.consensus.bip34_hash != genesis_hash {
            return Err(ChainError::InvalidGenesis(format!(
                "{}: BIP34 active from genesis but anchored to {}",
                self.network, self.consensus.bip34_hash
            )));
        }

        if self.consensus.pow_target_spacing <= 0 {
            return Err(ChainError::InvalidGenesis(format!(
                "{}: target spacing must be positive",
                self.network
            )));
        }

        Ok(())
    }

    /// Moves the voting window of one deployment. Only regtest parameters
    /// accept this; it exists so tests can force activations.
    pub(crate) fn update_bip9_parameters(
        &mut self,
        pos: DeploymentPos,
        start_time: i64,
        timeout: i64,
    ) -> Result<(), ChainError> {
        if self.network != Network::Regtest {
            return Err(ChainError::Config(format!(
                "Deployment windows can only be overridden on regtest, not {}",
                self.network
            )));
        }

        let previous = *self.consensus.deployments.get(pos);
        self.consensus.deployments.set_window(pos, start_time, timeout);
        if let Err(e) = self.consensus.deployments.validate() {
            self.consensus
                .deployments
                .set_window(pos, previous.start_time, previous.timeout);
            return Err(e);
        }

        warn!(
            deployment = %pos,
            start_time,
            timeout,
            "regtest deployment window overridden"
        );
        Ok(())
    }
}
