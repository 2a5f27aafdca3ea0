use crate::crypto::{sha256d, Hash256};
use crate::transaction::Transaction;
use serde::Serialize;

/// Serialized size of a block header in bytes.
pub const BLOCK_HEADER_SIZE: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    pub version: i32,
    pub previous_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// The 80-byte consensus encoding: version, previous hash, Merkle root,
    /// time, bits, nonce; integers little-endian.
    pub fn serialize(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let mut out = [0u8; BLOCK_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.previous_hash.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    pub fn hash(&self) -> Hash256 {
        sha256d(&self.serialize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    pub fn calculate_merkle_root(transactions: &[Transaction]) -> Hash256 {
        let txids: Vec<Hash256> = transactions.iter().map(Transaction::txid).collect();
        compute_merkle_root(txids).0
    }
}

/// Computes the double-SHA-256 Merkle root over `leaves`.
///
/// Odd levels duplicate their last node. The returned flag is set when two
/// identical siblings were hashed together, which means a different leaf list
/// produces the same root (CVE-2012-2459). An empty list yields the zero hash.
pub fn compute_merkle_root(mut leaves: Vec<Hash256>) -> (Hash256, bool) {
    if leaves.is_empty() {
        return (Hash256::ZERO, false);
    }

    let mut mutated = false;
    while leaves.len() > 1 {
        for pair in leaves.chunks(2) {
            if pair.len() == 2 && pair[0] == pair[1] {
                mutated = true;
            }
        }
        if leaves.len() % 2 == 1 {
            if let Some(last) = leaves.last().copied() {
                leaves.push(last);
            }
        }

        leaves = leaves
            .chunks(2)
            .map(|pair| {
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(pair[0].as_bytes());
                buf[32..].copy_from_slice(pair[1].as_bytes());
                sha256d(&buf)
            })
            .collect();
    }

    (leaves[0], mutated)
}
