//! The process-wide registry. Everything runs in one test so the global
//! selection is observed in a known order.

use reacoin_chainparams::chainparams::global;
use reacoin_chainparams::chainparams::{DeploymentPos, Network};
use reacoin_chainparams::ChainError;

#[test]
fn test_global_selection_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    global::init()?;
    assert_eq!(global::selected_network()?, None);
    assert!(matches!(global::params(), Err(ChainError::NetworkNotSelected)));

    assert!(matches!(
        global::select_params("bogus"),
        Err(ChainError::UnknownNetwork { .. })
    ));
    assert_eq!(global::selected_network()?, None);

    let main = global::select_params("main")?;
    assert_eq!(main.message_start, [0xee, 0x3b, 0x4f, 0x8c]);
    assert_eq!(global::params()?.default_port, 7997);

    global::select_params("regtest")?;
    assert_eq!(global::params()?.default_port, 27997);
    assert!(global::select_params("testnet").is_err());
    assert_eq!(global::selected_network()?, Some(Network::Regtest));

    let before = global::params()?;
    global::update_regtest_bip9_parameters(DeploymentPos::Segwit, 10, 20)?;
    let after = global::params()?;
    assert_eq!(after.consensus.deployments[DeploymentPos::Segwit].timeout, 20);
    assert_eq!(before.consensus.deployments[DeploymentPos::Segwit].start_time, 0);

    let main_again = global::params_for("main")?;
    assert_eq!(
        main_again.consensus.deployments[DeploymentPos::Segwit].start_time,
        1647053444
    );
    Ok(())
}
