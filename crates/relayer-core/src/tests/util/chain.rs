use std::collections::{HashMap, VecDeque};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use prost_types::Any;

use ibc_relay_types::core::ics02_client::msgs::create_client::TYPE_URL as CREATE_CLIENT_TYPE_URL;
use ibc_relay_types::core::ics04_channel::channel::ChannelEnd;
use ibc_relay_types::core::ics24_host::identifier::{ChainId, ClientId, ConnectionId};
use ibc_relay_types::events::{GenerateClientIdentifier, IbcEvent};
use ibc_relay_types::path::PathEnd;
use ibc_relay_types::signer::Signer;
use ibc_relay_types::Height;

use crate::chain::requests::QueryContext;
use crate::chain::responses::{
    ChannelResponse, ClientStateResponse, Coin, ConnectionResponse, ConsensusStateResponse,
};
use crate::chain::tx::{AnyMsgId, MsgId, MsgResult, MsgStatus};
use crate::chain::{Chain, InitOptions};
use crate::error::Error;

pub type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MockMsgId(pub u64);

impl Display for MockMsgId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "mock-msg-{}", self.0)
    }
}

impl MsgId for MockMsgId {}

/// State of a mock chain, shared between the chain and the test inspecting it.
#[derive(Debug)]
pub struct MockChainState {
    pub latest_height: Height,
    pub client_exists: bool,
    pub channel: Option<ChannelEnd>,
    pub fail_send: bool,
    pub fail_init: bool,
    /// Number of ids to withhold from each `send_msgs` response.
    pub withheld_ids: usize,
    pub send_delay: Option<Duration>,
    /// Results handed out, in order, to the next submitted messages. Once
    /// exhausted, messages succeed, and create client messages report a new
    /// client identifier.
    pub scripted_results: VecDeque<MsgResult>,
    pub transactions: Vec<Vec<Any>>,
    pub results: HashMap<MockMsgId, MsgResult>,
    pub channel_queries: Vec<Height>,
    next_msg_id: u64,
    next_client_counter: u64,
}

impl MockChainState {
    fn new() -> Self {
        Self {
            latest_height: height(10),
            client_exists: false,
            channel: None,
            fail_send: false,
            fail_init: false,
            withheld_ids: 0,
            send_delay: None,
            scripted_results: VecDeque::new(),
            transactions: Vec::new(),
            results: HashMap::new(),
            channel_queries: Vec::new(),
            next_msg_id: 0,
            next_client_counter: 0,
        }
    }

    /// All messages received so far, across transactions.
    pub fn sent_msgs(&self) -> Vec<Any> {
        self.transactions.iter().flatten().cloned().collect()
    }

    fn execute(&mut self, msg: &Any) -> MsgResult {
        if let Some(result) = self.scripted_results.pop_front() {
            return result;
        }

        let mut events = Vec::new();

        if msg.type_url == CREATE_CLIENT_TYPE_URL {
            let client_id = ClientId::new("07-tendermint", self.next_client_counter).unwrap();
            self.next_client_counter += 1;

            events.push(GenerateClientIdentifier { client_id }.into());
        }

        success(self.latest_height, events)
    }
}

pub fn height(revision_height: u64) -> Height {
    Height::new(0, revision_height).unwrap()
}

pub fn success(block_height: Height, events: Vec<IbcEvent>) -> MsgResult {
    MsgResult {
        status: MsgStatus::Success,
        block_height,
        events,
    }
}

pub fn failure(block_height: Height, reason: &str) -> MsgResult {
    MsgResult {
        status: MsgStatus::Failure {
            reason: reason.to_string(),
        },
        block_height,
        events: Vec::new(),
    }
}

pub struct MockChain {
    chain_id: ChainId,
    path: PathEnd,
    signer: Signer,
    state: Arc<Mutex<MockChainState>>,
    journal: Journal,
}

impl MockChain {
    pub fn new(path: PathEnd) -> Self {
        let signer = format!("relayer-{}", path.chain_id).parse().unwrap();

        Self {
            chain_id: path.chain_id.clone(),
            path,
            signer,
            state: Arc::new(Mutex::new(MockChainState::new())),
            journal: Journal::default(),
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn state(&self) -> Arc<Mutex<MockChainState>> {
        self.state.clone()
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    fn record(&self, call: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("chain.{call}"));
    }
}

#[async_trait]
impl Chain for MockChain {
    fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    fn path(&self) -> &PathEnd {
        &self.path
    }

    fn init(&mut self, _options: &InitOptions) -> Result<(), Error> {
        self.record("init");

        if self.state.lock().unwrap().fail_init {
            return Err(Error::query(self.chain_id.clone(), "init failed".to_string()));
        }

        Ok(())
    }

    fn set_relay_info(
        &mut self,
        path: &PathEnd,
        _counterparty_chain_id: &ChainId,
        _counterparty_path: &PathEnd,
    ) -> Result<(), Error> {
        self.record("set_relay_info");
        self.path = path.clone();
        Ok(())
    }

    async fn setup_for_relay(&mut self) -> Result<(), Error> {
        self.record("setup_for_relay");
        Ok(())
    }

    fn get_address(&self) -> Result<Signer, Error> {
        Ok(self.signer.clone())
    }

    async fn latest_height(&self) -> Result<Height, Error> {
        Ok(self.state.lock().unwrap().latest_height)
    }

    async fn send_msgs(&self, msgs: Vec<Any>) -> Result<Vec<AnyMsgId>, Error> {
        let delay = self.state.lock().unwrap().send_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();

        if state.fail_send {
            return Err(Error::send(
                self.chain_id.clone(),
                "broadcast rejected".to_string(),
            ));
        }

        let mut ids: Vec<AnyMsgId> = Vec::new();
        for msg in &msgs {
            let id = MockMsgId(state.next_msg_id);
            state.next_msg_id += 1;

            let result = state.execute(msg);
            state.results.insert(id, result);
            ids.push(Arc::new(id));
        }

        let keep = ids.len().saturating_sub(state.withheld_ids);
        ids.truncate(keep);

        state.transactions.push(msgs);

        Ok(ids)
    }

    async fn get_msg_result(&self, msg_id: &dyn MsgId) -> Result<MsgResult, Error> {
        let id = msg_id
            .as_any()
            .downcast_ref::<MockMsgId>()
            .ok_or_else(|| Error::query(self.chain_id.clone(), format!("foreign msg id {msg_id}")))?;

        self.state
            .lock()
            .unwrap()
            .results
            .get(id)
            .cloned()
            .ok_or_else(|| Error::query(self.chain_id.clone(), format!("unknown msg id {id}")))
    }

    async fn query_client_state(
        &self,
        ctx: QueryContext,
    ) -> Result<Option<ClientStateResponse>, Error> {
        let state = self.state.lock().unwrap();

        Ok(state.client_exists.then(|| ClientStateResponse {
            client_state: Any {
                type_url: "/mock.ClientState".to_string(),
                value: Vec::new(),
            },
            proof: Vec::new(),
            proof_height: ctx.height(),
        }))
    }

    async fn query_client_consensus_state(
        &self,
        ctx: QueryContext,
        consensus_height: Height,
    ) -> Result<ConsensusStateResponse, Error> {
        Ok(ConsensusStateResponse {
            consensus_state: Any {
                type_url: "/mock.ConsensusState".to_string(),
                value: consensus_height.to_string().into_bytes(),
            },
            proof: Vec::new(),
            proof_height: ctx.height(),
        })
    }

    async fn query_connection(
        &self,
        ctx: QueryContext,
        connection_id: &ConnectionId,
    ) -> Result<ConnectionResponse, Error> {
        Ok(ConnectionResponse {
            connection: Any {
                type_url: "/mock.ConnectionEnd".to_string(),
                value: connection_id.to_string().into_bytes(),
            },
            proof: Vec::new(),
            proof_height: ctx.height(),
        })
    }

    async fn query_channel(&self, ctx: QueryContext) -> Result<ChannelResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.channel_queries.push(ctx.height());

        let channel = state
            .channel
            .clone()
            .ok_or_else(|| Error::query(self.chain_id.clone(), "channel not found".to_string()))?;

        Ok(ChannelResponse {
            channel,
            proof: Vec::new(),
            proof_height: ctx.height(),
        })
    }

    async fn query_balance(&self, _ctx: QueryContext, _address: &Signer) -> Result<Vec<Coin>, Error> {
        Ok(vec![Coin {
            denom: "stake".to_string(),
            amount: 1_000_000,
        }])
    }
}
