use async_trait::async_trait;
use prost_types::Any;

use ibc_relay_types::core::ics02_client::header::Header;
use ibc_relay_types::core::ics24_host::identifier::ChainId;
use ibc_relay_types::path::PathEnd;
use ibc_relay_types::Height;

use crate::chain::requests::QueryContext;
use crate::chain::{Chain, InitOptions};
use crate::error::Error;
use crate::util::as_any::AsAny;

/// Produces the light client material of one chain: initial client states,
/// finalized headers and state proofs.
#[async_trait]
pub trait Prover: AsAny + Send + Sync {
    fn init(&mut self, options: &InitOptions) -> Result<(), Error>;

    fn set_relay_info(
        &mut self,
        path: &PathEnd,
        counterparty_chain_id: &ChainId,
        counterparty_path: &PathEnd,
    ) -> Result<(), Error>;

    async fn setup_for_relay(&mut self) -> Result<(), Error>;

    /// Returns the client state and the consensus state a counterparty
    /// needs to create a light client of this chain at `height`, or at the
    /// latest finalized height when `height` is `None`.
    async fn create_initial_light_client_state(
        &self,
        height: Option<Height>,
    ) -> Result<(Any, Any), Error>;

    async fn get_latest_finalized_header(&self) -> Result<Box<dyn Header>, Error>;

    /// Returns the headers to submit to `counterparty` so that its client of
    /// this chain reaches `latest_finalized_header`, in increasing height
    /// order. Empty when the client is already up to date.
    async fn setup_headers_for_update(
        &self,
        counterparty: &dyn Chain,
        latest_finalized_header: &dyn Header,
    ) -> Result<Vec<Box<dyn Header>>, Error>;

    /// Whether the client of this chain hosted on `counterparty` must be
    /// updated before its trusted state expires.
    async fn check_refresh_required(&self, counterparty: &dyn Chain) -> Result<bool, Error>;

    /// Proves that `value` is stored under the commitment `path` at the
    /// height of `ctx`. Returns the proof and the height it was made at.
    async fn prove_state(
        &self,
        ctx: QueryContext,
        path: &str,
        value: &[u8],
    ) -> Result<(Vec<u8>, Height), Error>;

    async fn prove_host_consensus_state(
        &self,
        ctx: QueryContext,
        height: Height,
        consensus_state: &Any,
    ) -> Result<Vec<u8>, Error>;

    /// The prover wrapped by this one, for decorators.
    fn inner_prover(&self) -> Option<&dyn Prover> {
        None
    }
}
