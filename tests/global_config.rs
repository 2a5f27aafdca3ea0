//! Applying a configuration to the process-wide registry. Kept in its own
//! test binary so it owns the global selection.

use reacoin_chainparams::chainparams::{global, DeploymentPos, Network};
use reacoin_chainparams::config::load_config;
use reacoin_chainparams::ChainError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_apply_global_is_all_or_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let broken = dir.path().join("broken.toml");
    fs::write(
        &broken,
        "[network]\nchain = \"regtest\"\nfixed_seeds_file = \"/nonexistent/reacoin/seeds.txt\"\n\n\
         [[regtest.deployments]]\nname = \"segwit\"\nstart_time = 5\ntimeout = 6\n",
    )?;
    let config = load_config(&broken)?;
    assert!(matches!(config.apply_global(), Err(ChainError::Io(_))));
    assert_eq!(global::selected_network()?, None);
    let regtest = global::params_for("regtest")?;
    assert_eq!(regtest.consensus.deployments[DeploymentPos::Segwit].start_time, 0);

    let good = dir.path().join("good.toml");
    fs::write(
        &good,
        "[network]\nchain = \"regtest\"\n\n\
         [[regtest.deployments]]\nname = \"segwit\"\nstart_time = 5\ntimeout = 6\n",
    )?;
    let params = load_config(&good)?.apply_global()?;
    assert_eq!(params.network, Network::Regtest);
    assert_eq!(global::selected_network()?, Some(Network::Regtest));
    assert_eq!(
        global::params()?.consensus.deployments[DeploymentPos::Segwit].timeout,
        6
    );
    Ok(())
}
