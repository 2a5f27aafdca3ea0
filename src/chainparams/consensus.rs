use super::deployments::Deployments;
use crate::crypto::Hash256;
use serde::Serialize;

/// Consensus rules of one network. Built once and never changed afterwards,
/// except for the regtest deployment override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusParams {
    pub subsidy_halving_interval: u32,
    /// Height from which blocks must carry their height in the coinbase.
    /// A value beyond any real chain means "never" on that network.
    pub bip34_height: u32,
    /// Hash of the block at `bip34_height`, zero when it is not known.
    pub bip34_hash: Hash256,
    /// Height from which OP_CHECKLOCKTIMEVERIFY is enforced.
    pub bip65_height: u32,
    /// Height from which strict DER signatures are enforced.
    pub bip66_height: u32,
    /// Highest (easiest) target a block may claim.
    pub pow_limit: Hash256,
    pub pow_target_timespan: i64,
    pub pow_target_spacing: i64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Signalling blocks needed in one window to lock a deployment in.
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: Deployments,
    /// Chains with less total work than this are not worth downloading.
    pub minimum_chain_work: Hash256,
    /// Signatures below this block are assumed valid unless told otherwise.
    pub default_assume_valid: Hash256,
    pub hash_genesis_block: Hash256,
}

impl ConsensusParams {
    /// Blocks between difficulty retargets.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }
}

/// Transaction-count snapshot used to estimate sync progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainTxData {
    /// UNIX time of the snapshot.
    pub time: i64,
    /// Transactions between genesis and `time`.
    pub tx_count: u64,
    /// Estimated transactions per second after `time`.
    pub tx_rate: f64,
}

impl ChainTxData {
    /// Extrapolated number of transactions in the chain at `now`.
    pub fn estimated_tx_count(&self, now: i64) -> f64 {
        let elapsed = (now - self.time).max(0) as f64;
        self.tx_count as f64 + elapsed * self.tx_rate
    }
}
