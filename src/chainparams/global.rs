//! Process-wide registry for callers that cannot thread a
//! [`ChainRegistry`] handle through.
//!
//! The registry is built on first use. A construction failure is returned
//! to that caller and retried on the next call rather than cached.

use super::deployments::DeploymentPos;
use super::network::Network;
use super::params::ChainParams;
use super::registry::ChainRegistry;
use crate::error::ChainError;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;

static REGISTRY: OnceCell<RwLock<ChainRegistry>> = OnceCell::new();

fn registry() -> Result<&'static RwLock<ChainRegistry>, ChainError> {
    REGISTRY.get_or_try_init(|| ChainRegistry::new().map(RwLock::new))
}

/// Builds and self-checks every network now instead of on first use.
pub fn init() -> Result<(), ChainError> {
    registry().map(|_| ())
}

/// Selects the active network by name.
pub fn select_params(name: &str) -> Result<Arc<ChainParams>, ChainError> {
    registry()?.write().select(name)
}

/// The active parameter set. Fails with [`ChainError::NetworkNotSelected`]
/// until [`select_params`] has succeeded once.
pub fn params() -> Result<Arc<ChainParams>, ChainError> {
    registry()?.read().current()
}

/// The parameter set of a named network, selected or not.
pub fn params_for(name: &str) -> Result<Arc<ChainParams>, ChainError> {
    registry()?.read().by_name(name)
}

pub fn selected_network() -> Result<Option<Network>, ChainError> {
    Ok(registry()?.read().selected())
}

pub fn update_regtest_bip9_parameters(
    pos: DeploymentPos,
    start_time: i64,
    timeout: i64,
) -> Result<(), ChainError> {
    registry()?
        .write()
        .update_regtest_bip9_parameters(pos, start_time, timeout)
}

/// Runs `f` with exclusive access to the registry.
pub fn with_registry_mut<T>(
    f: impl FnOnce(&mut ChainRegistry) -> Result<T, ChainError>,
) -> Result<T, ChainError> {
    let mut guard = registry()?.write();
    f(&mut guard)
}
