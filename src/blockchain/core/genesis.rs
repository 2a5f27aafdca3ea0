//! Deterministic construction of the first block of a chain.
//!
//! The output is a pure function of its inputs. Genesis blocks are not held
//! to their own difficulty target, so neither `nonce` nor `bits` is checked.

use super::chain::{Block, BlockHeader};
use crate::crypto::Hash256;
use crate::script::Script;
use crate::transaction::{Transaction, COIN};
use serde::Serialize;

/// Message embedded in every Reacoin genesis coinbase.
pub const GENESIS_TIMESTAMP: &str = "Reacoin";

/// Leading script-sig push of the genesis coinbase (the Bitcoin `0x1d00ffff`).
pub const GENESIS_SCRIPT_SIG_MARKER: i64 = 486_604_799;

/// Small script-number pushed after the marker.
pub const GENESIS_SCRIPT_SIG_EXTRA: i64 = 4;

pub const GENESIS_REWARD: i64 = 25 * COIN;

/// Uncompressed public key paid by the genesis coinbase.
pub const GENESIS_OUTPUT_PUBKEY: [u8; 65] = [
    0x04, 0xbe, 0x28, 0x21, 0xdf, 0x8b, 0x3d, 0xf6, 0xb2, 0xfd, 0xd3,
    0x9c, 0x7c, 0xd4, 0x63, 0xb1, 0x42, 0x05, 0x57, 0x8e, 0xdc, 0x6a,
    0x30, 0x25, 0x50, 0xf7, 0xfa, 0x96, 0xc5, 0x5e, 0x3e, 0xff, 0x98,
    0x99, 0xc7, 0xb9, 0x01, 0x7a, 0xe5, 0xc7, 0xaa, 0x81, 0x57, 0x02,
    0xb0, 0xf0, 0xac, 0x7e, 0xe3, 0xb8, 0xd0, 0x91, 0xc0, 0xef, 0x58,
    0x15, 0x79, 0x8a, 0x8e, 0x3f, 0x71, 0x9a, 0x66, 0x7f, 0x33,
];

/// Header fields that vary between networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenesisSpec {
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: i64,
}

impl GenesisSpec {
    pub fn build(&self) -> Block {
        create_default_genesis_block(self.time, self.nonce, self.bits, self.version, self.reward)
    }
}

/// Script-sig of the genesis coinbase: the marker, a small number, then the
/// raw timestamp bytes.
pub fn genesis_script_sig(timestamp: &str) -> Script {
    Script::new()
        .push_int(GENESIS_SCRIPT_SIG_MARKER)
        .push_num(GENESIS_SCRIPT_SIG_EXTRA)
        .push_slice(timestamp.as_bytes())
}

pub fn create_genesis_block(
    timestamp: &str,
    output_script: Script,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: i64,
) -> Block {
    let coinbase = Transaction::coinbase(genesis_script_sig(timestamp), reward, output_script);
    let transactions = vec![coinbase];
    let merkle_root = Block::calculate_merkle_root(&transactions);

    let header = BlockHeader {
        version,
        previous_hash: Hash256::ZERO,
        merkle_root,
        time,
        bits,
        nonce,
    };

    Block {
        header,
        transactions,
    }
}

/// Genesis block with the Reacoin timestamp and output key.
pub fn create_default_genesis_block(
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: i64,
) -> Block {
    create_genesis_block(
        GENESIS_TIMESTAMP,
        Script::pay_to_pubkey(&GENESIS_OUTPUT_PUBKEY),
        time,
        nonce,
        bits,
        version,
        reward,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::parse_public_key;

    const MAIN_GENESIS: &str = "ec3dfaefefc4423b71c726cfdb5fe06c54383453a50a82dcf0ab4080ec388ea4";
    const GENESIS_MERKLE: &str = "91a94061972898461a81f3b8df94e82266852e9b00647d2ac04cc807b6ac61a0";

    #[test]
    fn test_script_sig_bytes() {
        let script = genesis_script_sig("Reacoin");
        let mut expected = vec![0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04, 0x07];
        expected.extend_from_slice(b"Reacoin");
        assert_eq!(script.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_main_genesis_digests() {
        let block = create_default_genesis_block(1647033333, 243, 0x20000fff, 1, GENESIS_REWARD);
        assert_eq!(block.header.merkle_root.to_hex(), GENESIS_MERKLE);
        assert_eq!(block.hash().to_hex(), MAIN_GENESIS);
    }

    #[test]
    fn test_single_transaction_merkle_root_is_txid() {
        let block = create_default_genesis_block(1647033331, 20, 0x207fffff, 1, GENESIS_REWARD);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.header.merkle_root, block.transactions[0].txid());
    }

    #[test]
    fn test_builder_is_deterministic() {
        let spec = GenesisSpec {
            time: 1647033332,
            nonce: 2455,
            bits: 0x20000fff,
            version: 1,
            reward: GENESIS_REWARD,
        };
        assert_eq!(spec.build(), spec.build());
        assert_eq!(spec.build().hash(), spec.build().hash());
    }

    #[test]
    fn test_nonce_changes_hash_but_not_merkle_root() {
        let a = create_default_genesis_block(1647033333, 243, 0x20000fff, 1, GENESIS_REWARD);
        let b = create_default_genesis_block(1647033333, 244, 0x20000fff, 1, GENESIS_REWARD);
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.header.merkle_root, b.header.merkle_root);
    }

    #[test]
    fn test_genesis_output_key_is_on_curve() {
        assert!(parse_public_key(&GENESIS_OUTPUT_PUBKEY).is_ok());
    }

    #[test]
    fn test_genesis_coinbase_shape() {
        let block = create_default_genesis_block(1647033333, 243, 0x20000fff, 1, GENESIS_REWARD);
        let coinbase = &block.transactions[0];
        assert!(coinbase.is_coinbase());
        assert!(coinbase.check_coinbase_shape().is_ok());
        assert_eq!(coinbase.outputs[0].value, 2_500_000_000);
        assert!(block.header.previous_hash.is_zero());
    }
}
