use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use ibc_relay_types::core::ics24_host::identifier::{ChainId, PortId};
use ibc_relay_types::path::{Path, PathEnd};

use crate::config::Config;
use crate::provable_chain::ProvableChain;
use crate::tests::util::chain::{MockChain, MockChainState};
use crate::tests::util::prover::{MockProver, MockProverState};

pub const PATH_NAME: &str = "ibc01";
pub const SRC_CHAIN: &str = "ibc-0";
pub const DST_CHAIN: &str = "ibc-1";

/// Two instrumented mock chains, with handles on their state.
pub struct MockPath {
    pub src: ProvableChain,
    pub dst: ProvableChain,
    pub src_chain: Arc<Mutex<MockChainState>>,
    pub dst_chain: Arc<Mutex<MockChainState>>,
    pub src_prover: Arc<Mutex<MockProverState>>,
    pub dst_prover: Arc<Mutex<MockProverState>>,
}

pub fn path_end(chain_id: &str, client_id: Option<&str>) -> PathEnd {
    let mut end = PathEnd::new(ChainId::from_string(chain_id), PortId::transfer());
    end.client_id = client_id.map(|id| id.parse().unwrap());
    end
}

pub fn build_provable_chain(
    end: PathEnd,
) -> (
    ProvableChain,
    Arc<Mutex<MockChainState>>,
    Arc<Mutex<MockProverState>>,
) {
    let prover = MockProver::new(end.chain_id.clone());
    let chain = MockChain::new(end);
    let (chain_state, prover_state) = (chain.state(), prover.state());

    (
        ProvableChain::instrumented(chain, prover),
        chain_state,
        prover_state,
    )
}

pub fn build_mock_path(src_client_id: Option<&str>, dst_client_id: Option<&str>) -> MockPath {
    let (src, src_chain, src_prover) = build_provable_chain(path_end(SRC_CHAIN, src_client_id));
    let (dst, dst_chain, dst_prover) = build_provable_chain(path_end(DST_CHAIN, dst_client_id));

    MockPath {
        src,
        dst,
        src_chain,
        dst_chain,
        src_prover,
        dst_prover,
    }
}

/// A configuration holding the path of [`build_mock_path`], without any
/// identifier set.
pub fn build_mock_config() -> Config {
    let path = Path::new(path_end(SRC_CHAIN, None), path_end(DST_CHAIN, None));

    Config {
        paths: BTreeMap::from([(PATH_NAME.to_string(), path)]),
        ..Config::default()
    }
}
