//! Tracing decorators for the chain and prover capabilities.
//!
//! [`InstrumentedChain`] and [`InstrumentedProver`] forward every call to the
//! wrapped capability unchanged, inside a span named after the method
//! (`Chain.send_msgs`, `Prover.prove_state`, ...). When the call fails, the
//! error is recorded in the span's `error` field and logged.

use core::any::type_name;
use core::fmt::Display;
use core::future::Future;

use async_trait::async_trait;
use prost_types::Any;
use tracing::{error, field, Instrument, Span};

use ibc_relay_types::core::ics02_client::header::Header;
use ibc_relay_types::core::ics24_host::identifier::{ChainId, ConnectionId};
use ibc_relay_types::path::PathEnd;
use ibc_relay_types::signer::Signer;
use ibc_relay_types::Height;

use crate::chain::requests::QueryContext;
use crate::chain::responses::{
    ChannelResponse, ClientStateResponse, Coin, ConnectionResponse, ConsensusStateResponse,
};
use crate::chain::tx::{AnyMsgId, MsgId, MsgResult};
use crate::chain::{Chain, InitOptions};
use crate::error::Error;
use crate::prover::Prover;

macro_rules! chain_span {
    ($self:ident, $name:literal $(, $($field:tt)+)?) => {
        tracing::info_span!(
            $name,
            $($($field)+ ,)?
            chain_id = %$self.inner.chain_id(),
            client_id = %display_id(&$self.inner.path().client_id),
            package = type_name::<C>(),
            error = field::Empty
        )
    };
}

macro_rules! prover_span {
    ($name:literal $(, $($field:tt)+)?) => {
        tracing::info_span!(
            $name,
            $($($field)+ ,)?
            package = type_name::<P>(),
            error = field::Empty
        )
    };
}

fn display_id<T: Display>(id: &Option<T>) -> String {
    id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn record_result<T>(span: &Span, result: Result<T, Error>) -> Result<T, Error> {
    if let Err(e) = &result {
        span.record("error", &field::display(e));
        span.in_scope(|| error!("{}", e));
    }

    result
}

async fn traced<T>(
    span: Span,
    call: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    let result = call.instrument(span.clone()).await;
    record_result(&span, result)
}

pub struct InstrumentedChain<C> {
    inner: C,
}

impl<C: Chain + 'static> InstrumentedChain<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: Chain + 'static> Chain for InstrumentedChain<C> {
    fn chain_id(&self) -> &ChainId {
        self.inner.chain_id()
    }

    fn path(&self) -> &PathEnd {
        self.inner.path()
    }

    fn init(&mut self, options: &InitOptions) -> Result<(), Error> {
        let span = chain_span!(self, "Chain.init");
        let result = span.in_scope(|| self.inner.init(options));
        record_result(&span, result)
    }

    fn set_relay_info(
        &mut self,
        path: &PathEnd,
        counterparty_chain_id: &ChainId,
        counterparty_path: &PathEnd,
    ) -> Result<(), Error> {
        let span = chain_span!(
            self,
            "Chain.set_relay_info",
            counterparty_chain_id = %counterparty_chain_id
        );
        let result = span.in_scope(|| {
            self.inner
                .set_relay_info(path, counterparty_chain_id, counterparty_path)
        });
        record_result(&span, result)
    }

    async fn setup_for_relay(&mut self) -> Result<(), Error> {
        let span = chain_span!(self, "Chain.setup_for_relay");
        traced(span, self.inner.setup_for_relay()).await
    }

    fn get_address(&self) -> Result<Signer, Error> {
        let span = chain_span!(self, "Chain.get_address");
        let result = span.in_scope(|| self.inner.get_address());
        record_result(&span, result)
    }

    async fn latest_height(&self) -> Result<Height, Error> {
        let span = chain_span!(self, "Chain.latest_height");
        traced(span, self.inner.latest_height()).await
    }

    async fn send_msgs(&self, msgs: Vec<Any>) -> Result<Vec<AnyMsgId>, Error> {
        let span = chain_span!(self, "Chain.send_msgs", msg_count = msgs.len());
        traced(span, self.inner.send_msgs(msgs)).await
    }

    async fn get_msg_result(&self, msg_id: &dyn MsgId) -> Result<MsgResult, Error> {
        let span = chain_span!(self, "Chain.get_msg_result", msg_id = %msg_id);
        traced(span, self.inner.get_msg_result(msg_id)).await
    }

    async fn query_client_state(
        &self,
        ctx: QueryContext,
    ) -> Result<Option<ClientStateResponse>, Error> {
        let span = chain_span!(self, "Chain.query_client_state", height = %ctx.height());
        traced(span, self.inner.query_client_state(ctx)).await
    }

    async fn query_client_consensus_state(
        &self,
        ctx: QueryContext,
        consensus_height: Height,
    ) -> Result<ConsensusStateResponse, Error> {
        let span = chain_span!(
            self,
            "Chain.query_client_consensus_state",
            height = %ctx.height(),
            consensus_height = %consensus_height
        );
        traced(
            span,
            self.inner
                .query_client_consensus_state(ctx, consensus_height),
        )
        .await
    }

    async fn query_connection(
        &self,
        ctx: QueryContext,
        connection_id: &ConnectionId,
    ) -> Result<ConnectionResponse, Error> {
        let span = chain_span!(
            self,
            "Chain.query_connection",
            height = %ctx.height(),
            connection_id = %connection_id
        );
        traced(span, self.inner.query_connection(ctx, connection_id)).await
    }

    async fn query_channel(&self, ctx: QueryContext) -> Result<ChannelResponse, Error> {
        let span = chain_span!(
            self,
            "Chain.query_channel",
            height = %ctx.height(),
            connection_id = %display_id(&self.inner.path().connection_id),
            channel_id = %display_id(&self.inner.path().channel_id)
        );
        traced(span, self.inner.query_channel(ctx)).await
    }

    async fn query_balance(&self, ctx: QueryContext, address: &Signer) -> Result<Vec<Coin>, Error> {
        let span = chain_span!(
            self,
            "Chain.query_balance",
            height = %ctx.height(),
            address = %address
        );
        traced(span, self.inner.query_balance(ctx, address)).await
    }

    fn inner_chain(&self) -> Option<&dyn Chain> {
        Some(&self.inner)
    }
}

pub struct InstrumentedProver<P> {
    inner: P,
}

impl<P: Prover + 'static> InstrumentedProver<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: Prover + 'static> Prover for InstrumentedProver<P> {
    fn init(&mut self, options: &InitOptions) -> Result<(), Error> {
        let span = prover_span!("Prover.init");
        let result = span.in_scope(|| self.inner.init(options));
        record_result(&span, result)
    }

    fn set_relay_info(
        &mut self,
        path: &PathEnd,
        counterparty_chain_id: &ChainId,
        counterparty_path: &PathEnd,
    ) -> Result<(), Error> {
        let span = prover_span!(
            "Prover.set_relay_info",
            chain_id = %path.chain_id,
            counterparty_chain_id = %counterparty_chain_id
        );
        let result = span.in_scope(|| {
            self.inner
                .set_relay_info(path, counterparty_chain_id, counterparty_path)
        });
        record_result(&span, result)
    }

    async fn setup_for_relay(&mut self) -> Result<(), Error> {
        let span = prover_span!("Prover.setup_for_relay");
        traced(span, self.inner.setup_for_relay()).await
    }

    async fn create_initial_light_client_state(
        &self,
        height: Option<Height>,
    ) -> Result<(Any, Any), Error> {
        let span = prover_span!(
            "Prover.create_initial_light_client_state",
            height = %display_id(&height)
        );
        traced(span, self.inner.create_initial_light_client_state(height)).await
    }

    async fn get_latest_finalized_header(&self) -> Result<Box<dyn Header>, Error> {
        let span = prover_span!("Prover.get_latest_finalized_header");
        traced(span, self.inner.get_latest_finalized_header()).await
    }

    async fn setup_headers_for_update(
        &self,
        counterparty: &dyn Chain,
        latest_finalized_header: &dyn Header,
    ) -> Result<Vec<Box<dyn Header>>, Error> {
        let span = prover_span!(
            "Prover.setup_headers_for_update",
            counterparty_chain_id = %counterparty.chain_id()
        );
        traced(
            span,
            self.inner
                .setup_headers_for_update(counterparty, latest_finalized_header),
        )
        .await
    }

    async fn check_refresh_required(&self, counterparty: &dyn Chain) -> Result<bool, Error> {
        let span = prover_span!(
            "Prover.check_refresh_required",
            counterparty_chain_id = %counterparty.chain_id()
        );
        traced(span, self.inner.check_refresh_required(counterparty)).await
    }

    async fn prove_state(
        &self,
        ctx: QueryContext,
        path: &str,
        value: &[u8],
    ) -> Result<(Vec<u8>, Height), Error> {
        let span = prover_span!("Prover.prove_state", height = %ctx.height(), path = path);
        traced(span, self.inner.prove_state(ctx, path, value)).await
    }

    async fn prove_host_consensus_state(
        &self,
        ctx: QueryContext,
        height: Height,
        consensus_state: &Any,
    ) -> Result<Vec<u8>, Error> {
        let span = prover_span!(
            "Prover.prove_host_consensus_state",
            height = %ctx.height(),
            consensus_height = %height
        );
        traced(
            span,
            self.inner
                .prove_host_consensus_state(ctx, height, consensus_state),
        )
        .await
    }

    fn inner_prover(&self) -> Option<&dyn Prover> {
        Some(&self.inner)
    }
}
