//! Height to block-hash anchors.
//!
//! A block sync component refuses any history whose block at a checkpointed
//! height differs from the table.

use crate::crypto::Hash256;
use crate::error::ChainError;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkpoints {
    map: BTreeMap<u32, Hash256>,
}

impl Checkpoints {
    /// Builds a table from records that must be strictly increasing by height.
    pub fn from_entries(entries: Vec<(u32, Hash256)>) -> Result<Self, ChainError> {
        let mut map = BTreeMap::new();
        let mut previous: Option<u32> = None;
        for (height, hash) in entries {
            if let Some(prev) = previous {
                if height <= prev {
                    return Err(ChainError::InvalidCheckpoints(format!(
                        "Height {} follows {}; heights must be strictly increasing",
                        height, prev
                    )));
                }
            }
            previous = Some(height);
            map.insert(height, hash);
        }
        Ok(Checkpoints { map })
    }

    /// Like [`Checkpoints::from_entries`] with hex literals.
    pub fn from_hex_entries(entries: &[(u32, &str)]) -> Result<Self, ChainError> {
        let parsed = entries
            .iter()
            .map(|(height, hash)| Ok((*height, Hash256::from_hex(hash)?)))
            .collect::<Result<Vec<_>, ChainError>>()?;
        Self::from_entries(parsed)
    }

    /// Parses `height hash` records, one per line. Blank lines and `#`
    /// comments are skipped.
    pub fn parse(text: &str) -> Result<Vec<(u32, Hash256)>, ChainError> {
        let mut entries = Vec::new();
        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(height), Some(hash), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(ChainError::InvalidCheckpoints(format!(
                    "Line {}: expected `height hash`, got {:?}",
                    line_no + 1,
                    raw
                )));
            };
            let height: u32 = height.parse().map_err(|e| {
                ChainError::InvalidCheckpoints(format!("Line {}: bad height: {}", line_no + 1, e))
            })?;
            let hash = Hash256::from_hex(hash).map_err(|e| {
                ChainError::InvalidCheckpoints(format!("Line {}: {}", line_no + 1, e))
            })?;
            entries.push((height, hash));
        }
        Ok(entries)
    }

    /// Adds records from another source. A height already present must carry
    /// the same hash.
    pub fn merge(&mut self, entries: Vec<(u32, Hash256)>) -> Result<usize, ChainError> {
        let mut added = 0;
        for (height, hash) in entries {
            match self.map.get(&height) {
                Some(existing) if *existing != hash => {
                    return Err(ChainError::InvalidCheckpoints(format!(
                        "Conflicting checkpoint at height {}: {} vs {}",
                        height, existing, hash
                    )));
                }
                Some(_) => {}
                None => {
                    self.map.insert(height, hash);
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    pub fn get(&self, height: u32) -> Option<&Hash256> {
        self.map.get(&height)
    }

    /// A block passes unless a checkpoint at its height names a different hash.
    pub fn check_block(&self, height: u32, hash: &Hash256) -> bool {
        self.map.get(&height).map_or(true, |expected| expected == hash)
    }

    pub fn last_checkpoint_height(&self) -> u32 {
        self.map.keys().next_back().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Hash256)> {
        self.map.iter().map(|(height, hash)| (*height, hash))
    }

    /// The height-0 entry must exist and name the genesis block.
    pub fn verify_genesis(&self, genesis_hash: &Hash256) -> Result<(), ChainError> {
        match self.map.get(&0) {
            Some(hash) if hash == genesis_hash => Ok(()),
            Some(hash) => Err(ChainError::InvalidCheckpoints(format!(
                "Height 0 checkpoint {} does not match genesis {}",
                hash, genesis_hash
            ))),
            None => Err(ChainError::InvalidCheckpoints(
                "Missing height 0 checkpoint".to_string(),
            )),
        }
    }
}
