//! Error types for the Reacoin chain parameters

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("{caller}: Unknown chain {name}.")]
    UnknownNetwork { caller: &'static str, name: String },
    #[error("No network selected; select a chain before querying parameters")]
    NetworkNotSelected,
    #[error("Genesis {what} mismatch on {network}: expected {expected}, got {actual}")]
    GenesisMismatch {
        network: &'static str,
        what: &'static str,
        expected: String,
        actual: String,
    },
    #[error("Invalid genesis block: {0}")]
    InvalidGenesis(String),
    #[error("Invalid checkpoints: {0}")]
    InvalidCheckpoints(String),
    #[error("Invalid deployment schedule: {0}")]
    InvalidDeployment(String),
    #[error("Unknown deployment: {0}")]
    UnknownDeployment(String),
    #[error("Seed lookup failed: {0}")]
    SeedLookup(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid hash: {0}")]
    InvalidHash(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("TOML error: {0}")]
    Toml(String),
}

impl ChainError {
    /// Errors that mean the parameter tables themselves are inconsistent.
    /// A process that sees one of these must not keep running on those parameters.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChainError::NetworkNotSelected
                | ChainError::GenesisMismatch { .. }
                | ChainError::InvalidGenesis(_)
                | ChainError::InvalidCheckpoints(_)
                | ChainError::InvalidDeployment(_)
        )
    }
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Toml(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_network_message_names_caller_and_value() {
        let err = ChainError::UnknownNetwork {
            caller: "select_params",
            name: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "select_params: Unknown chain bogus.");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ChainError::NetworkNotSelected.is_fatal());
        assert!(ChainError::InvalidCheckpoints("x".into()).is_fatal());
        assert!(!ChainError::SeedLookup("x".into()).is_fatal());
        assert!(!ChainError::Config("x".into()).is_fatal());
    }
}
