use crate::blockchain::core::chain::{compute_merkle_root, Block};
use crate::crypto::Hash256;
use crate::error::ChainError;

/// Startup self-check of a freshly built genesis block against its published
/// digests. Any difference means the block serialization has drifted from the
/// rest of the network.
pub fn verify_genesis(
    network: &'static str,
    block: &Block,
    expected_hash: &Hash256,
    expected_merkle_root: &Hash256,
) -> Result<(), ChainError> {
    if block.transactions.len() != 1 {
        return Err(ChainError::InvalidGenesis(format!(
            "{} genesis must hold exactly one transaction, found {}",
            network,
            block.transactions.len()
        )));
    }
    block.transactions[0].check_coinbase_shape()?;

    if !block.header.previous_hash.is_zero() {
        return Err(ChainError::InvalidGenesis(format!(
            "{} genesis previous hash must be zero, got {}",
            network, block.header.previous_hash
        )));
    }

    let txids: Vec<Hash256> = block.transactions.iter().map(|tx| tx.txid()).collect();
    let (computed_root, _) = compute_merkle_root(txids);
    if computed_root != block.header.merkle_root {
        return Err(ChainError::InvalidGenesis(format!(
            "{} genesis header commits to {} but transactions hash to {}",
            network, block.header.merkle_root, computed_root
        )));
    }

    if block.header.merkle_root != *expected_merkle_root {
        return Err(ChainError::GenesisMismatch {
            network,
            what: "merkle root",
            expected: expected_merkle_root.to_hex(),
            actual: block.header.merkle_root.to_hex(),
        });
    }

    let hash = block.hash();
    if hash != *expected_hash {
        return Err(ChainError::GenesisMismatch {
            network,
            what: "hash",
            expected: expected_hash.to_hex(),
            actual: hash.to_hex(),
        });
    }

    Ok(())
}
