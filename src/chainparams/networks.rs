//! The three parameter sets. Networks differ only in data: one constructor
//! each, followed by the startup self-check.

use super::base58::Base58Prefixes;
use super::checkpoints::Checkpoints;
use super::consensus::{ChainTxData, ConsensusParams};
use super::deployments::{Bip9Deployment, Deployments, NO_TIMEOUT};
use super::network::Network;
use super::params::ChainParams;
use super::seeds::{DnsSeedData, MAIN_FIXED_SEEDS, TEST_FIXED_SEEDS};
use crate::blockchain::{GenesisSpec, GENESIS_REWARD};
use crate::crypto::Hash256;
use crate::error::ChainError;
use tracing::debug;

/// Merkle root shared by every network's genesis block (same coinbase).
pub const GENESIS_MERKLE_ROOT: &str =
    "91a94061972898461a81f3b8df94e82266852e9b00647d2ac04cc807b6ac61a0";

pub const MAIN_GENESIS_HASH: &str =
    "ec3dfaefefc4423b71c726cfdb5fe06c54383453a50a82dcf0ab4080ec388ea4";
pub const TEST_GENESIS_HASH: &str =
    "2bdb49757dfca99f3898f9dd7dee6ee1f81100e5e5ff2b8c8c9a0404a16ff957";
pub const REGTEST_GENESIS_HASH: &str =
    "be86e3fe9aa44f7487778477f8b9770e249901991e143437675894fed5c1c476";

const MAIN_POW_LIMIT: &str = "000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const REGTEST_POW_LIMIT: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

pub fn build_params(network: Network) -> Result<ChainParams, ChainError> {
    match network {
        Network::Main => main_params(),
        Network::Test => test_params(),
        Network::Regtest => regtest_params(),
    }
}

fn finish(
    params: ChainParams,
    expected_hash: &str,
) -> Result<ChainParams, ChainError> {
    params.self_check(
        &Hash256::from_hex(expected_hash)?,
        &Hash256::from_hex(GENESIS_MERKLE_ROOT)?,
    )?;
    debug!(
        network = %params.network,
        genesis = %params.genesis_hash(),
        checkpoints = params.checkpoints.len(),
        "chain parameters constructed"
    );
    Ok(params)
}

pub fn main_params() -> Result<ChainParams, ChainError> {
    let genesis_spec = GenesisSpec {
        time: 1647033333,
        nonce: 243,
        bits: 0x20000fff,
        version: 1,
        reward: GENESIS_REWARD,
    };
    let genesis = genesis_spec.build();

    // Test dummy, CSV (BIP68/112/113) and SegWit (BIP141/143/147) share one window.
    let window = (1647053444, 1647056444);
    let consensus = ConsensusParams {
        subsidy_halving_interval: 1_000_000,
        bip34_height: 0,
        bip34_hash: Hash256::from_hex(MAIN_GENESIS_HASH)?,
        bip65_height: 0,
        bip66_height: 0,
        pow_limit: Hash256::from_hex(MAIN_POW_LIMIT)?,
        pow_target_timespan: 30,
        pow_target_spacing: 30,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        rule_change_activation_threshold: 4,
        miner_confirmation_window: 16,
        deployments: Deployments::new(
            Bip9Deployment::new(28, window.0, window.1),
            Bip9Deployment::new(0, window.0, window.1),
            Bip9Deployment::new(1, window.0, window.1),
        ),
        minimum_chain_work: Hash256::from_hex("0x0d96c7")?,
        default_assume_valid: Hash256::from_hex(
            "a7d8933ad1bc523e581d8e929ac4007b328af63dfb2374c69ef7c2a6e3aa827d",
        )?,
        hash_genesis_block: genesis.hash(),
    };

    let checkpoints = Checkpoints::from_hex_entries(&[
        (0, MAIN_GENESIS_HASH),
        (1, "93191173892d7770ef0543421698d71c726303fbe0becddbffa792ba7652d1de"),
        (15, "252bc573ceae3bdbcec683f4d5c59dfd602c4f0bd18e562a20e2ef6cee478ea5"),
        // SegWit and CSV started
        (48, "eedb6a9f08a77b0a4f8b3adaf7831ac3879b6695c5bd80ba800e5a18e7605e16"),
        // locked in
        (64, "dd3d56ba8521bee73def1e85433a1bfd482592c3dd682eaf3688c94220106d6b"),
        // active
        (80, "795135fc0240012d85b818b9b7e735ea562b77bd2f308e2d42d5c0f0401fd6da"),
        (101, "a7d8933ad1bc523e581d8e929ac4007b328af63dfb2374c69ef7c2a6e3aa827d"),
    ])?;

    let params = ChainParams {
        network: Network::Main,
        consensus,
        message_start: [0xee, 0x3b, 0x4f, 0x8c],
        default_port: 7997,
        prune_after_height: 100_000,
        genesis_spec,
        genesis,
        dns_seeds: vec![
            DnsSeedData::new("140.82.11.56", "140.82.11.56"),
            DnsSeedData::new("66.135.0.156", "66.135.0.156"),
            DnsSeedData::new("103.249.70.56", "103.249.70.56"),
            DnsSeedData::new("45.77.150.151", "45.77.150.151"),
        ],
        fixed_seeds: MAIN_FIXED_SEEDS.to_vec(),
        base58_prefixes: Base58Prefixes::new(
            60,
            122,
            61,
            205,
            [0x04, 0xad, 0xf2, 0x23],
            [0x04, 0xad, 0xf2, 0xa8],
        ),
        checkpoints,
        chain_tx_data: ChainTxData {
            time: 1647054807,
            tx_count: 102,
            tx_rate: 1.0,
        },
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
    };

    finish(params, MAIN_GENESIS_HASH)
}

pub fn test_params() -> Result<ChainParams, ChainError> {
    let genesis_spec = GenesisSpec {
        time: 1647033332,
        nonce: 2455,
        bits: 0x20000fff,
        version: 1,
        reward: GENESIS_REWARD,
    };
    let genesis = genesis_spec.build();

    let consensus = ConsensusParams {
        subsidy_halving_interval: 200_000,
        bip34_height: 0,
        bip34_hash: Hash256::from_hex(TEST_GENESIS_HASH)?,
        bip65_height: 0,
        bip66_height: 0,
        pow_limit: Hash256::from_hex(MAIN_POW_LIMIT)?,
        pow_target_timespan: 3 * 24 * 60 * 60 + 12 * 60 * 60, // 3.5 days
        pow_target_spacing: 30,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        rule_change_activation_threshold: 180, // 75% of 240
        miner_confirmation_window: 240,
        deployments: Deployments::new(
            Bip9Deployment::new(28, 0, NO_TIMEOUT),
            Bip9Deployment::new(0, 0, NO_TIMEOUT),
            Bip9Deployment::new(1, 0, NO_TIMEOUT),
        ),
        minimum_chain_work: Hash256::from_hex("0x100010")?,
        default_assume_valid: Hash256::from_hex(TEST_GENESIS_HASH)?,
        hash_genesis_block: genesis.hash(),
    };

    let params = ChainParams {
        network: Network::Test,
        consensus,
        message_start: [0x84, 0xd8, 0x7a, 0x8b],
        default_port: 17997,
        prune_after_height: 1000,
        genesis_spec,
        genesis,
        dns_seeds: Vec::new(),
        fixed_seeds: TEST_FIXED_SEEDS.to_vec(),
        base58_prefixes: Base58Prefixes::new(
            65,
            105,
            128,
            206,
            [0x04, 0xb3, 0xae, 0x70],
            [0x04, 0xb3, 0xae, 0xf4],
        ),
        checkpoints: Checkpoints::from_hex_entries(&[(0, TEST_GENESIS_HASH)])?,
        chain_tx_data: ChainTxData {
            time: 1647033332,
            tx_count: 0,
            tx_rate: 0.0,
        },
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: false,
        mine_blocks_on_demand: false,
    };

    finish(params, TEST_GENESIS_HASH)
}

pub fn regtest_params() -> Result<ChainParams, ChainError> {
    let genesis_spec = GenesisSpec {
        time: 1647033331,
        nonce: 20,
        bits: 0x207fffff,
        version: 1,
        reward: GENESIS_REWARD,
    };
    let genesis = genesis_spec.build();

    let consensus = ConsensusParams {
        subsidy_halving_interval: 150,
        // Far in the future so version 1 blocks are not rejected in tests.
        bip34_height: 100_000_000,
        bip34_hash: Hash256::ZERO,
        bip65_height: 1351,
        bip66_height: 1251,
        pow_limit: Hash256::from_hex(REGTEST_POW_LIMIT)?,
        pow_target_timespan: 3 * 24 * 60 * 60 + 12 * 60 * 60,
        pow_target_spacing: 30,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        rule_change_activation_threshold: 108, // 75% of 144
        miner_confirmation_window: 144,
        deployments: Deployments::new(
            Bip9Deployment::new(28, 0, NO_TIMEOUT),
            Bip9Deployment::new(0, 0, NO_TIMEOUT),
            Bip9Deployment::new(1, 0, NO_TIMEOUT),
        ),
        minimum_chain_work: Hash256::from_hex("0x100010")?,
        default_assume_valid: Hash256::from_hex(REGTEST_GENESIS_HASH)?,
        hash_genesis_block: genesis.hash(),
    };

    let params = ChainParams {
        network: Network::Regtest,
        consensus,
        message_start: [0xd9, 0x85, 0xa2, 0xf0],
        default_port: 27997,
        prune_after_height: 1000,
        genesis_spec,
        genesis,
        dns_seeds: Vec::new(),
        fixed_seeds: Vec::new(),
        base58_prefixes: Base58Prefixes::new(
            62,
            104,
            127,
            208,
            [0x04, 0xb3, 0xae, 0x70],
            [0x04, 0xb3, 0xae, 0xf4],
        ),
        checkpoints: Checkpoints::from_hex_entries(&[(0, REGTEST_GENESIS_HASH)])?,
        chain_tx_data: ChainTxData {
            time: 1647033331,
            tx_count: 0,
            tx_rate: 0.0,
        },
        mining_requires_peers: false,
        default_consistency_checks: true,
        require_standard: false,
        mine_blocks_on_demand: true,
    };

    finish(params, REGTEST_GENESIS_HASH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::deployments::DeploymentPos;

    #[test]
    fn test_every_network_builds_and_matches_published_digests() {
        for (network, expected) in [
            (Network::Main, MAIN_GENESIS_HASH),
            (Network::Test, TEST_GENESIS_HASH),
            (Network::Regtest, REGTEST_GENESIS_HASH),
        ] {
            let params = build_params(network).unwrap();
            assert_eq!(params.network, network);
            assert_eq!(params.genesis_hash().to_hex(), expected);
            assert_eq!(params.genesis.header.merkle_root.to_hex(), GENESIS_MERKLE_ROOT);
        }
    }

    #[test]
    fn test_main_identity() {
        let params = main_params().unwrap();
        assert_eq!(params.message_start, [0xee, 0x3b, 0x4f, 0x8c]);
        assert_eq!(params.default_port, 7997);
        assert_eq!(params.prune_after_height, 100_000);
        assert_eq!(params.dns_seeds.len(), 4);
        assert_eq!(params.fixed_seeds.len(), 4);
        assert_eq!(params.consensus.difficulty_adjustment_interval(), 1);
        assert_eq!(params.consensus.minimum_chain_work.to_hex(), format!("{:0>64}", "0d96c7"));
    }

    #[test]
    fn test_main_deployments_share_window_with_distinct_bits() {
        let params = main_params().unwrap();
        let d = &params.consensus.deployments;
        assert_eq!(d[DeploymentPos::TestDummy].bit, 28);
        assert_eq!(d[DeploymentPos::Csv].bit, 0);
        assert_eq!(d[DeploymentPos::Segwit].bit, 1);
        assert!(d[DeploymentPos::Csv].overlaps(&d[DeploymentPos::Segwit]));
        assert!(d[DeploymentPos::Csv].overlaps(&d[DeploymentPos::TestDummy]));
    }

    #[test]
    fn test_seeding_disabled_off_main() {
        let test = test_params().unwrap();
        let regtest = regtest_params().unwrap();
        assert!(test.dns_seeds.is_empty());
        assert!(regtest.dns_seeds.is_empty());
        assert!(regtest.fixed_seeds.is_empty());
    }

    #[test]
    fn test_retarget_intervals() {
        assert_eq!(test_params().unwrap().consensus.difficulty_adjustment_interval(), 10_080);
        let regtest = regtest_params().unwrap();
        assert!(regtest.consensus.pow_no_retargeting);
        assert!(regtest.consensus.bip34_hash.is_zero());
    }

    #[test]
    fn test_checkpoints_anchor_genesis() {
        for network in Network::ALL {
            let params = build_params(network).unwrap();
            assert_eq!(params.checkpoints.get(0), Some(&params.genesis_hash()));
            let heights: Vec<u32> = params.checkpoints.iter().map(|(h, _)| h).collect();
            assert!(heights.windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(main_params().unwrap().checkpoints.last_checkpoint_height(), 101);
    }

    #[test]
    fn test_update_bip9_refused_off_regtest() {
        let mut params = main_params().unwrap();
        assert!(params
            .update_bip9_parameters(DeploymentPos::Csv, 1, 2)
            .is_err());
        assert_eq!(params.consensus.deployments[DeploymentPos::Csv].start_time, 1647053444);
    }

    #[test]
    fn test_update_bip9_rolls_back_invalid_schedule() {
        let mut params = regtest_params().unwrap();
        let before = params.consensus.deployments.clone();
        // Changing a window cannot introduce a bit clash, so force one via the bits.
        params.consensus.deployments = Deployments::new(
            Bip9Deployment::new(28, 0, NO_TIMEOUT),
            Bip9Deployment::new(1, 0, 10),
            Bip9Deployment::new(1, 10, 20),
        );
        assert!(params
            .update_bip9_parameters(DeploymentPos::Segwit, 5, 20)
            .is_err());
        assert_eq!(
            params.consensus.deployments[DeploymentPos::Segwit],
            Bip9Deployment::new(1, 10, 20)
        );
        params.consensus.deployments = before;
        assert!(params
            .update_bip9_parameters(DeploymentPos::Segwit, 5, 20)
            .is_ok());
    }
}
