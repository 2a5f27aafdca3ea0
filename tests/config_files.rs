//! Integration tests for configuration-driven seeds and checkpoints

use reacoin_chainparams::chainparams::{ChainRegistry, Network};
use reacoin_chainparams::config::load_config;
use reacoin_chainparams::crypto::Hash256;
use reacoin_chainparams::ChainError;
use std::fs;
use tempfile::TempDir;

const EXTRA_HASH: &str = "00000000000000000000000000000000000000000000000000000000deadbeef";

fn write_config(dir: &TempDir, body: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join("reacoin.toml");
    fs::write(&path, body)?;
    Ok(path)
}

#[test]
fn test_seed_and_checkpoint_files_applied() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let seeds = dir.path().join("seeds.txt");
    fs::write(&seeds, "# test seeds\n10.0.0.1\n10.0.0.2:18000\n[2001:db8::1]:17997\n")?;
    let checkpoints = dir.path().join("checkpoints.txt");
    fs::write(&checkpoints, format!("500 {}\n", EXTRA_HASH))?;

    let path = write_config(
        &dir,
        &format!(
            "[network]\nchain = \"test\"\nfixed_seeds_file = {:?}\ncheckpoints_file = {:?}\n",
            seeds.display().to_string(),
            checkpoints.display().to_string()
        ),
    )?;

    let config = load_config(&path)?;
    let mut registry = ChainRegistry::new()?;
    let params = config.apply(&mut registry)?;

    assert_eq!(params.network, Network::Test);
    let listed: Vec<String> = params.fixed_seeds.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        listed,
        vec!["10.0.0.1:17997", "10.0.0.2:18000", "[2001:db8::1]:17997"]
    );
    assert_eq!(params.checkpoints.get(500), Some(&Hash256::from_hex(EXTRA_HASH)?));
    assert_eq!(params.checkpoints.last_checkpoint_height(), 500);

    // Main keeps its compiled-in tables.
    let main = registry.get(Network::Main);
    assert_eq!(main.fixed_seeds.len(), 4);
    assert!(main.checkpoints.get(500).is_none());
    Ok(())
}

#[test]
fn test_conflicting_checkpoint_file_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let checkpoints = dir.path().join("checkpoints.txt");
    fs::write(&checkpoints, format!("0 {}\n", EXTRA_HASH))?;

    let path = write_config(
        &dir,
        &format!(
            "[network]\nchain = \"main\"\ncheckpoints_file = {:?}\n",
            checkpoints.display().to_string()
        ),
    )?;

    let config = load_config(&path)?;
    let mut registry = ChainRegistry::new()?;
    let err = config.apply(&mut registry).unwrap_err();
    assert!(matches!(err, ChainError::InvalidCheckpoints(_)));
    assert!(err.is_fatal());
    assert!(registry.selected().is_none());
    Ok(())
}

#[test]
fn test_missing_seed_file_is_io_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        "[network]\nchain = \"regtest\"\nfixed_seeds_file = \"/nonexistent/reacoin/seeds.txt\"\n",
    )?;

    let config = load_config(&path)?;
    let mut registry = ChainRegistry::new()?;
    assert!(matches!(config.apply(&mut registry), Err(ChainError::Io(_))));
    Ok(())
}
