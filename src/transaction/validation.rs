/// Structural checks for coinbase transactions
use crate::error::ChainError;
use crate::transaction::types::Transaction;

/// Allowed coinbase script-sig length in bytes.
pub const COINBASE_SCRIPT_SIG_MIN: usize = 2;
pub const COINBASE_SCRIPT_SIG_MAX: usize = 100;

impl Transaction {
    /// Checks the shape every coinbase must have, independent of chain state:
    /// a single null-prevout input with a bounded script-sig and at least one
    /// non-negative output.
    pub fn check_coinbase_shape(&self) -> Result<(), ChainError> {
        if !self.is_coinbase() {
            return Err(ChainError::InvalidGenesis(
                "Coinbase must have exactly one input spending the null outpoint".to_string(),
            ));
        }

        let script_len = self.inputs[0].script_sig.len();
        if !(COINBASE_SCRIPT_SIG_MIN..=COINBASE_SCRIPT_SIG_MAX).contains(&script_len) {
            return Err(ChainError::InvalidGenesis(format!(
                "Coinbase script-sig length {} outside {}..={}",
                script_len, COINBASE_SCRIPT_SIG_MIN, COINBASE_SCRIPT_SIG_MAX
            )));
        }

        if self.outputs.is_empty() {
            return Err(ChainError::InvalidGenesis(
                "Coinbase must have at least one output".to_string(),
            ));
        }

        if let Some(output) = self.outputs.iter().find(|o| o.value < 0) {
            return Err(ChainError::InvalidGenesis(format!(
                "Coinbase output value {} is negative",
                output.value
            )));
        }

        Ok(())
    }
}
