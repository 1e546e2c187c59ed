//! The chain capability: identity, submission and height-pinned queries
//! against one ledger.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use prost_types::Any;

use ibc_relay_types::core::ics24_host::identifier::{ChainId, ConnectionId};
use ibc_relay_types::path::PathEnd;
use ibc_relay_types::signer::Signer;
use ibc_relay_types::Height;

use crate::error::Error;
use crate::util::as_any::AsAny;

pub mod requests;
pub mod responses;
pub mod tx;

use requests::QueryContext;
use responses::{
    ChannelResponse, ClientStateResponse, Coin, ConnectionResponse, ConsensusStateResponse,
};
use tx::{AnyMsgId, MsgId, MsgResult};

/// Settings handed to a capability when the relayer starts up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitOptions {
    /// Home directory of the relayer, where keys and caches live.
    pub home_path: PathBuf,
    pub timeout: Duration,
    pub debug: bool,
}

/// Everything the relayer needs from one chain, except for proofs and
/// headers, which come from the chain's [`Prover`](crate::prover::Prover).
///
/// Implementations must be usable from several relay paths at once, hence
/// the `Send + Sync` bound; the relayer never calls the same chain
/// concurrently on behalf of a single path.
#[async_trait]
pub trait Chain: AsAny + Send + Sync {
    fn chain_id(&self) -> &ChainId;

    /// The end of the relay path that lives on this chain.
    fn path(&self) -> &PathEnd;

    fn init(&mut self, options: &InitOptions) -> Result<(), Error>;

    fn set_relay_info(
        &mut self,
        path: &PathEnd,
        counterparty_chain_id: &ChainId,
        counterparty_path: &PathEnd,
    ) -> Result<(), Error>;

    async fn setup_for_relay(&mut self) -> Result<(), Error>;

    /// Address of the account that signs the messages sent to this chain.
    fn get_address(&self) -> Result<Signer, Error>;

    async fn latest_height(&self) -> Result<Height, Error>;

    /// Broadcasts `msgs` in a single transaction and returns one id per
    /// message, in order.
    async fn send_msgs(&self, msgs: Vec<Any>) -> Result<Vec<AnyMsgId>, Error>;

    async fn get_msg_result(&self, msg_id: &dyn MsgId) -> Result<MsgResult, Error>;

    /// Queries the state of the client configured in [`Chain::path`].
    /// Returns `None` when no such client exists at the queried height.
    async fn query_client_state(
        &self,
        ctx: QueryContext,
    ) -> Result<Option<ClientStateResponse>, Error>;

    async fn query_client_consensus_state(
        &self,
        ctx: QueryContext,
        consensus_height: Height,
    ) -> Result<ConsensusStateResponse, Error>;

    async fn query_connection(
        &self,
        ctx: QueryContext,
        connection_id: &ConnectionId,
    ) -> Result<ConnectionResponse, Error>;

    /// Queries the channel configured in [`Chain::path`].
    async fn query_channel(&self, ctx: QueryContext) -> Result<ChannelResponse, Error>;

    async fn query_balance(&self, ctx: QueryContext, address: &Signer) -> Result<Vec<Coin>, Error>;

    /// The chain wrapped by this one, for decorators.
    fn inner_chain(&self) -> Option<&dyn Chain> {
        None
    }
}
