/// Transaction types used by the genesis block
use crate::crypto::{sha256d, Hash256};
use crate::encode::{write_compact_size, write_var_bytes};
use crate::script::Script;
use serde::Serialize;

/// Base units per coin.
pub const COIN: i64 = 100_000_000;

/// Sequence value of an input that opts out of every relative lock.
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Reference to an output of a previous transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint carried by coinbase inputs: zero txid, index `u32::MAX`.
    pub const fn null() -> Self {
        OutPoint {
            txid: Hash256::ZERO,
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxIn {
    pub previous_output: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOut {
    pub value: i64,
    pub script_pubkey: Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Builds a coinbase transaction with a single input carrying `script_sig`
    /// and a single output paying `value` to `script_pubkey`.
    pub fn coinbase(script_sig: Script, value: i64, script_pubkey: Script) -> Self {
        Transaction {
            version: 1,
            inputs: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TxOut {
                value,
                script_pubkey,
            }],
            lock_time: 0,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Legacy (non-witness) consensus serialization.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            10 + self
                .inputs
                .iter()
                .map(|i| 41 + i.script_sig.len())
                .sum::<usize>()
                + self
                    .outputs
                    .iter()
                    .map(|o| 9 + o.script_pubkey.len())
                    .sum::<usize>(),
        );
        out.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(input.previous_output.txid.as_bytes());
            out.extend_from_slice(&input.previous_output.vout.to_le_bytes());
            write_var_bytes(&mut out, input.script_sig.as_bytes());
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            write_var_bytes(&mut out, output.script_pubkey.as_bytes());
        }

        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    /// Double SHA-256 of the serialized transaction.
    pub fn txid(&self) -> Hash256 {
        sha256d(&self.serialize())
    }
}
