use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prost_types::Any;

use ibc_relay_types::core::ics02_client::header::Header;
use ibc_relay_types::core::ics24_host::identifier::ChainId;
use ibc_relay_types::path::PathEnd;
use ibc_relay_types::Height;

use crate::chain::requests::QueryContext;
use crate::chain::{Chain, InitOptions};
use crate::error::Error;
use crate::prover::Prover;
use crate::tests::util::chain::{height, Journal};

pub const MOCK_HEADER_TYPE_URL: &str = "/mock.Header";
pub const MOCK_CLIENT_STATE_TYPE_URL: &str = "/mock.ClientState";
pub const MOCK_CONSENSUS_STATE_TYPE_URL: &str = "/mock.ConsensusState";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHeader {
    pub height: Height,
}

impl Header for MockHeader {
    fn height(&self) -> Height {
        self.height
    }

    fn to_any(&self) -> Any {
        Any {
            type_url: MOCK_HEADER_TYPE_URL.to_string(),
            value: self.height.to_string().into_bytes(),
        }
    }
}

/// Decodes the height carried by a mock header packed with [`Header::to_any`].
pub fn mock_header_height(any: &Any) -> Height {
    assert_eq!(any.type_url, MOCK_HEADER_TYPE_URL);
    String::from_utf8(any.value.clone()).unwrap().parse().unwrap()
}

#[derive(Debug)]
pub struct MockProverState {
    pub latest_finalized_height: Height,
    /// Heights of the headers returned by `setup_headers_for_update`.
    pub update_heights: Vec<Height>,
    /// Heights requested through `create_initial_light_client_state`.
    pub initial_state_requests: Vec<Option<Height>>,
    /// Counterparties passed to `setup_headers_for_update`.
    pub update_counterparties: Vec<ChainId>,
    pub fail_init: bool,
    pub refresh_required: bool,
    /// Counterparties passed to `check_refresh_required`.
    pub refresh_checks: Vec<ChainId>,
}

pub struct MockProver {
    chain_id: ChainId,
    state: Arc<Mutex<MockProverState>>,
    journal: Journal,
}

impl MockProver {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            state: Arc::new(Mutex::new(MockProverState {
                latest_finalized_height: height(8),
                update_heights: Vec::new(),
                initial_state_requests: Vec::new(),
                update_counterparties: Vec::new(),
                fail_init: false,
                refresh_required: false,
                refresh_checks: Vec::new(),
            })),
            journal: Journal::default(),
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn state(&self) -> Arc<Mutex<MockProverState>> {
        self.state.clone()
    }

    fn record(&self, call: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("prover.{call}"));
    }
}

#[async_trait]
impl Prover for MockProver {
    fn init(&mut self, _options: &InitOptions) -> Result<(), Error> {
        self.record("init");

        if self.state.lock().unwrap().fail_init {
            return Err(Error::prover(self.chain_id.clone(), "init failed".to_string()));
        }

        Ok(())
    }

    fn set_relay_info(
        &mut self,
        _path: &PathEnd,
        _counterparty_chain_id: &ChainId,
        _counterparty_path: &PathEnd,
    ) -> Result<(), Error> {
        self.record("set_relay_info");
        Ok(())
    }

    async fn setup_for_relay(&mut self) -> Result<(), Error> {
        self.record("setup_for_relay");
        Ok(())
    }

    async fn create_initial_light_client_state(
        &self,
        height: Option<Height>,
    ) -> Result<(Any, Any), Error> {
        let mut state = self.state.lock().unwrap();
        state.initial_state_requests.push(height);

        let height = height.unwrap_or(state.latest_finalized_height);
        let value = format!("{}@{}", self.chain_id, height).into_bytes();

        Ok((
            Any {
                type_url: MOCK_CLIENT_STATE_TYPE_URL.to_string(),
                value: value.clone(),
            },
            Any {
                type_url: MOCK_CONSENSUS_STATE_TYPE_URL.to_string(),
                value,
            },
        ))
    }

    async fn get_latest_finalized_header(&self) -> Result<Box<dyn Header>, Error> {
        let height = self.state.lock().unwrap().latest_finalized_height;
        Ok(Box::new(MockHeader { height }))
    }

    async fn setup_headers_for_update(
        &self,
        counterparty: &dyn Chain,
        _latest_finalized_header: &dyn Header,
    ) -> Result<Vec<Box<dyn Header>>, Error> {
        let mut state = self.state.lock().unwrap();
        state
            .update_counterparties
            .push(counterparty.chain_id().clone());

        Ok(state
            .update_heights
            .iter()
            .map(|height| -> Box<dyn Header> { Box::new(MockHeader { height: *height }) })
            .collect())
    }

    async fn check_refresh_required(&self, counterparty: &dyn Chain) -> Result<bool, Error> {
        let mut state = self.state.lock().unwrap();
        state.refresh_checks.push(counterparty.chain_id().clone());
        Ok(state.refresh_required)
    }

    async fn prove_state(
        &self,
        ctx: QueryContext,
        path: &str,
        value: &[u8],
    ) -> Result<(Vec<u8>, Height), Error> {
        let mut proof = path.as_bytes().to_vec();
        proof.extend_from_slice(value);
        Ok((proof, ctx.height()))
    }

    async fn prove_host_consensus_state(
        &self,
        _ctx: QueryContext,
        height: Height,
        consensus_state: &Any,
    ) -> Result<Vec<u8>, Error> {
        let mut proof = height.to_string().into_bytes();
        proof.extend_from_slice(&consensus_state.value);
        Ok(proof)
    }
}
