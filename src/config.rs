//! Configuration management for Reacoin chain parameters

use crate::chainparams::checkpoints::Checkpoints;
use crate::chainparams::deployments::DeploymentPos;
use crate::chainparams::global;
use crate::chainparams::network::Network;
use crate::chainparams::params::ChainParams;
use crate::chainparams::registry::ChainRegistry;
use crate::chainparams::seeds::parse_fixed_seeds;
use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "reacoin.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub regtest: RegtestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_chain")]
    pub chain: String,
    /// One `addr:port` per line; replaces the compiled-in fixed seeds.
    #[serde(default)]
    pub fixed_seeds_file: Option<String>,
    /// One `height hash` per line; merged into the compiled-in checkpoints.
    #[serde(default)]
    pub checkpoints_file: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            fixed_seeds_file: None,
            checkpoints_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegtestConfig {
    #[serde(default)]
    pub deployments: Vec<DeploymentOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentOverride {
    pub name: String,
    pub start_time: i64,
    pub timeout: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_chain() -> String {
    "main".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Reads and validates the configuration at `path`. A missing file yields
/// the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    let path = path.as_ref();
    let config = if path.exists() {
        let config_str = fs::read_to_string(path)?;
        toml::from_str(&config_str)?
    } else {
        debug!(path = %path.display(), "no config file, using defaults");
        Config::default()
    };

    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn network(&self) -> Result<Network, ChainError> {
        Network::from_name("Config::validate", &self.network.chain)
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        let network = self.network()?;

        if !self.regtest.deployments.is_empty() && network != Network::Regtest {
            return Err(ChainError::Config(format!(
                "regtest.deployments is set but chain is {}",
                network
            )));
        }

        for deployment in &self.regtest.deployments {
            deployment.name.parse::<DeploymentPos>()?;
        }

        Ok(())
    }

    /// Selects the configured chain on `registry` and applies deployment
    /// overrides and the optional seed and checkpoint files. Returns the
    /// resulting active parameter set.
    ///
    /// Files are read and parsed before anything changes, and the changes
    /// are made on a copy that replaces `registry` only when every step
    /// succeeded. On error `registry` is left exactly as it was.
    pub fn apply(&self, registry: &mut ChainRegistry) -> Result<Arc<ChainParams>, ChainError> {
        self.validate()?;
        let network = self.network()?;

        let overrides = self
            .regtest
            .deployments
            .iter()
            .map(|d| Ok((d.name.parse::<DeploymentPos>()?, d.start_time, d.timeout)))
            .collect::<Result<Vec<_>, ChainError>>()?;

        let seeds = match &self.network.fixed_seeds_file {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                Some(parse_fixed_seeds(&text, registry.get(network).default_port)?)
            }
            None => None,
        };

        let checkpoints = match &self.network.checkpoints_file {
            Some(path) => Some(Checkpoints::parse(&fs::read_to_string(path)?)?),
            None => None,
        };

        let mut staged = registry.clone();
        for (pos, start_time, timeout) in overrides {
            staged.update_regtest_bip9_parameters(pos, start_time, timeout)?;
        }
        if let Some(seeds) = seeds {
            staged.replace_fixed_seeds(network, seeds);
        }
        if let Some(entries) = checkpoints {
            staged.merge_checkpoints(network, entries)?;
        }

        let params = staged.select_network(network);
        *registry = staged;
        Ok(params)
    }

    /// [`Config::apply`] against the process-wide registry.
    pub fn apply_global(&self) -> Result<Arc<ChainParams>, ChainError> {
        global::with_registry_mut(|registry| self.apply(registry))
    }
}
