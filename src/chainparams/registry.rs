//! Holds the parameter sets of every network and tracks which one is active.

use super::base58::Base58Type;
use super::checkpoints::Checkpoints;
use super::deployments::DeploymentPos;
use super::network::Network;
use super::networks::{main_params, regtest_params, test_params};
use super::params::ChainParams;
use super::seeds::SeedSpec6;
use crate::crypto::{base58check_decode, Hash256};
use crate::error::ChainError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// An address or key whose prefix matched one of the known networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedAddress {
    pub network: Network,
    pub kind: Base58Type,
    #[serde(serialize_with = "serialize_payload")]
    pub payload: Vec<u8>,
}

fn serialize_payload<S: serde::Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(payload))
}

/// All three parameter sets plus the selection state.
///
/// Sets are built eagerly by [`ChainRegistry::new`] and handed out as
/// `Arc`s. Mutations (the regtest deployment override and config-driven
/// seed and checkpoint changes) go through `Arc::make_mut`, so a handle
/// obtained earlier keeps seeing the values it was given.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    main: Arc<ChainParams>,
    test: Arc<ChainParams>,
    regtest: Arc<ChainParams>,
    selected: Option<Network>,
}

impl ChainRegistry {
    /// Builds and self-checks every network. Nothing is selected yet.
    pub fn new() -> Result<Self, ChainError> {
        Ok(ChainRegistry {
            main: Arc::new(main_params()?),
            test: Arc::new(test_params()?),
            regtest: Arc::new(regtest_params()?),
            selected: None,
        })
    }

    pub fn get(&self, network: Network) -> Arc<ChainParams> {
        Arc::clone(self.slot(network))
    }

    /// Looks a set up by name without changing the selection.
    pub fn by_name(&self, name: &str) -> Result<Arc<ChainParams>, ChainError> {
        let network = Network::from_name("params_for", name)?;
        Ok(self.get(network))
    }

    /// Makes `name` the active network. An unknown name leaves the previous
    /// selection in place.
    pub fn select(&mut self, name: &str) -> Result<Arc<ChainParams>, ChainError> {
        match Network::from_name("select_params", name) {
            Ok(network) => Ok(self.select_network(network)),
            Err(e) => {
                warn!(chain = %name, error = %e, "rejected network selection");
                Err(e)
            }
        }
    }

    pub fn select_network(&mut self, network: Network) -> Arc<ChainParams> {
        self.selected = Some(network);
        let params = self.get(network);
        info!(
            network = %network,
            port = params.default_port,
            genesis = %params.genesis_hash(),
            "selected chain parameters"
        );
        params
    }

    pub fn selected(&self) -> Option<Network> {
        self.selected
    }

    /// The active set. Querying before any selection is a fatal error.
    pub fn current(&self) -> Result<Arc<ChainParams>, ChainError> {
        self.selected
            .map(|network| self.get(network))
            .ok_or(ChainError::NetworkNotSelected)
    }

    /// Moves a regtest deployment window. The other networks are never touched.
    pub fn update_regtest_bip9_parameters(
        &mut self,
        pos: DeploymentPos,
        start_time: i64,
        timeout: i64,
    ) -> Result<(), ChainError> {
        Arc::make_mut(&mut self.regtest).update_bip9_parameters(pos, start_time, timeout)
    }

    /// Replaces the compiled-in fixed seeds of `network`.
    pub fn replace_fixed_seeds(&mut self, network: Network, seeds: Vec<SeedSpec6>) {
        info!(network = %network, count = seeds.len(), "fixed seeds replaced");
        Arc::make_mut(self.slot_mut(network)).fixed_seeds = seeds;
    }

    /// Adds checkpoints to `network`. Entries that contradict an existing
    /// checkpoint reject the whole batch.
    pub fn merge_checkpoints(
        &mut self,
        network: Network,
        entries: Vec<(u32, Hash256)>,
    ) -> Result<usize, ChainError> {
        let mut checkpoints: Checkpoints = self.slot(network).checkpoints.clone();
        let added = checkpoints.merge(entries)?;
        Arc::make_mut(self.slot_mut(network)).checkpoints = checkpoints;
        info!(network = %network, added, "checkpoints merged");
        Ok(added)
    }

    /// Decodes a Base58Check string and finds the network and kind its prefix
    /// belongs to. Networks are tried main, test, regtest; test and regtest
    /// share extended-key prefixes, so those decode as test.
    pub fn decode_address(&self, s: &str) -> Result<DecodedAddress, ChainError> {
        let data = base58check_decode(s)?;
        Network::ALL
            .into_iter()
            .find_map(|network| {
                self.slot(network)
                    .base58_prefixes
                    .classify(&data)
                    .map(|(kind, payload)| DecodedAddress {
                        network,
                        kind,
                        payload: payload.to_vec(),
                    })
            })
            .ok_or_else(|| {
                ChainError::InvalidAddress(format!("{} does not match any known prefix", s))
            })
    }

    fn slot(&self, network: Network) -> &Arc<ChainParams> {
        match network {
            Network::Main => &self.main,
            Network::Test => &self.test,
            Network::Regtest => &self.regtest,
        }
    }

    fn slot_mut(&mut self, network: Network) -> &mut Arc<ChainParams> {
        match network {
            Network::Main => &mut self.main,
            Network::Test => &mut self.test,
            Network::Regtest => &mut self.regtest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::GENESIS_OUTPUT_PUBKEY;
    use tracing_test::traced_test;

    fn registry() -> ChainRegistry {
        ChainRegistry::new().unwrap()
    }

    #[test]
    fn test_current_before_selection_is_fatal() {
        let registry = registry();
        let err = registry.current().unwrap_err();
        assert_eq!(err, ChainError::NetworkNotSelected);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_select_round_trips_identity() {
        let mut registry = registry();

        let main = registry.select("main").unwrap();
        assert_eq!(main.message_start, [0xee, 0x3b, 0x4f, 0x8c]);
        assert_eq!(registry.current().unwrap().default_port, 7997);

        registry.select("test").unwrap();
        assert_eq!(registry.current().unwrap().default_port, 17997);

        registry.select("regtest").unwrap();
        assert_eq!(registry.current().unwrap().default_port, 27997);
        assert_eq!(registry.selected(), Some(Network::Regtest));
    }

    #[test]
    #[traced_test]
    fn test_unknown_name_keeps_selection() {
        let mut registry = registry();
        registry.select("test").unwrap();

        let err = registry.select("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert!(!err.is_fatal());
        assert_eq!(registry.selected(), Some(Network::Test));
        assert_eq!(registry.current().unwrap().default_port, 17997);
        assert!(logs_contain("rejected network selection"));
    }

    #[test]
    fn test_by_name_does_not_select() {
        let registry = registry();
        assert_eq!(registry.by_name("regtest").unwrap().network, Network::Regtest);
        assert!(registry.selected().is_none());
        let err = registry.by_name("mainnet").unwrap_err();
        assert_eq!(err.to_string(), "params_for: Unknown chain mainnet.");
    }

    #[test]
    fn test_regtest_override_is_isolated() {
        let mut registry = registry();
        let before = registry.get(Network::Regtest);
        let main_before = registry.get(Network::Main);

        registry
            .update_regtest_bip9_parameters(DeploymentPos::Segwit, 100, 200)
            .unwrap();

        let after = registry.get(Network::Regtest);
        assert_eq!(after.consensus.deployments[DeploymentPos::Segwit].start_time, 100);
        assert_eq!(after.consensus.deployments[DeploymentPos::Segwit].timeout, 200);
        // Handles taken before the override keep their values.
        assert_eq!(before.consensus.deployments[DeploymentPos::Segwit].start_time, 0);
        assert_eq!(
            registry.get(Network::Main).consensus.deployments,
            main_before.consensus.deployments
        );
        assert_eq!(registry.get(Network::Test).consensus.deployments[DeploymentPos::Segwit].start_time, 0);
    }

    #[test]
    fn test_merge_checkpoints_rejects_conflict_atomically() {
        let mut registry = registry();
        let extra = Hash256::from_hex("0x1234").unwrap();
        assert_eq!(registry.merge_checkpoints(Network::Test, vec![(10, extra)]).unwrap(), 1);
        assert!(registry.get(Network::Test).checkpoints.check_block(10, &extra));

        let err = registry
            .merge_checkpoints(Network::Test, vec![(20, extra), (0, extra)])
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidCheckpoints(_)));
        assert!(registry.get(Network::Test).checkpoints.get(20).is_none());
    }

    #[test]
    fn test_decode_address_identifies_network() {
        let registry = registry();
        let main = registry.get(Network::Main);
        let address = main.pubkey_address(&GENESIS_OUTPUT_PUBKEY).unwrap();
        assert_eq!(address, "RKcMoGjapxkw6zTDEvNZj1Vu3WGktYXKjt");

        let decoded = registry.decode_address(&address).unwrap();
        assert_eq!(decoded.network, Network::Main);
        assert_eq!(decoded.kind, Base58Type::PubkeyAddress);
        assert_eq!(hex::encode(&decoded.payload), "7151465ffb8123905603bea34591fe529b6acab1");

        let regtest = registry
            .get(Network::Regtest)
            .encode_address(Base58Type::PubkeyAddress, &[0u8; 20]);
        assert_eq!(regtest, "RwxQ3jUs2BjKhseNX1em4msn2GyVBjd1Lc");
        assert_eq!(registry.decode_address(&regtest).unwrap().network, Network::Regtest);
    }

    #[test]
    fn test_decode_address_rejects_foreign_prefix() {
        let registry = registry();
        // Bitcoin's P2PKH prefix is not used by any Reacoin network.
        let foreign = crate::crypto::base58check_encode(&[0u8; 21]);
        assert!(registry.decode_address(&foreign).is_err());
    }

    #[test]
    fn test_decoded_address_serializes_with_kind_names() {
        let registry = registry();
        let address = registry
            .get(Network::Test)
            .encode_address(Base58Type::ScriptAddress, &[0u8; 20]);
        let decoded = registry.decode_address(&address).unwrap();

        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["network"], "test");
        assert_eq!(json["kind"], "script");
        assert_eq!(json["payload"], "0".repeat(40));
    }
}
