//! Light client lifecycle: creation of the two clients of a path, and their
//! updates to the latest finalized headers of the counterparty.

use std::sync::Arc;

use prost_types::Any;
use tracing::{debug, error, info, instrument, warn};

use ibc_relay_types::core::ics02_client::header::Header;
use ibc_relay_types::core::ics02_client::msgs::create_client::MsgCreateClient;
use ibc_relay_types::core::ics02_client::msgs::update_client::MsgUpdateClient;
use ibc_relay_types::core::ics24_host::identifier::ClientId;
use ibc_relay_types::tx_msg::Msg;
use ibc_relay_types::Height;

use crate::chain::requests::QueryContext;
use crate::config::{BatchLimits, PathConfigStore};
use crate::config_sync::ConfigSynchronizer;
use crate::error::Error;
use crate::headers::SyncHeaders;
use crate::provable_chain::ProvableChain;
use crate::relay_msgs::RelayMsgs;
use crate::util::timer::Timer;

/// Creates and updates the light clients of a path.
///
/// The store receives the identifiers of the clients created by
/// [`ClientManager::create_clients`].
pub struct ClientManager<S: ?Sized> {
    config_sync: ConfigSynchronizer<S>,
    batch_limits: Option<BatchLimits>,
}

impl<S: PathConfigStore + ?Sized> ClientManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            config_sync: ConfigSynchronizer::new(store),
            batch_limits: None,
        }
    }

    /// Splits the transactions of this manager along `batch_limits`, which
    /// must pass [`BatchLimits::validate`].
    pub fn with_batch_limits(mut self, batch_limits: BatchLimits) -> Result<Self, Error> {
        batch_limits.validate()?;
        self.batch_limits = Some(batch_limits);
        Ok(self)
    }

    fn relay_msgs(&self) -> RelayMsgs {
        match self.batch_limits {
            Some(limits) => {
                RelayMsgs::with_limits(limits.max_msg_num, limits.max_tx_size)
            }
            None => RelayMsgs::new(),
        }
    }

    /// Creates a client of `dst` on `src` unless `src` already has one
    /// configured, and symmetrically. The client of `dst` is created at
    /// `dst_height`, or at the latest finalized height of `dst` when `None`.
    ///
    /// On success, the identifiers of the new clients are written to path
    /// `path_name`. Nothing is done when both configured clients exist.
    #[instrument(
        name = "create_clients",
        skip_all,
        fields(
            path = %path_name,
            src_chain = %src.chain_id(),
            dst_chain = %dst.chain_id()
        )
    )]
    pub async fn create_clients(
        &self,
        path_name: &str,
        src: &ProvableChain,
        dst: &ProvableChain,
        src_height: Option<Height>,
        dst_height: Option<Height>,
    ) -> Result<(), Error> {
        let _timer = Timer::new("create_clients");

        if src.chain_id() == dst.chain_id() {
            return Err(Error::same_chain_id(src.chain_id().clone()));
        }

        if !check_create_clients_ready(src, dst).await? {
            return Ok(());
        }

        let mut clients = self.relay_msgs();

        if src.path().client_id.is_none() {
            clients.src.push(build_create_client(src, dst, dst_height).await?);
        }

        if dst.path().client_id.is_none() {
            clients.dst.push(build_create_client(dst, src, src_height).await?);
        }

        if !clients.ready() {
            return Ok(());
        }

        clients.send(src.chain(), dst.chain()).await;

        if !clients.success() {
            return Err(Error::submission(
                src.chain_id().clone(),
                dst.chain_id().clone(),
            ));
        }

        info!("★ clients created");

        self.config_sync
            .sync_chain_configs_from_events(
                path_name,
                &clients.src_msg_ids,
                &clients.dst_msg_ids,
                src,
                dst,
            )
            .await
    }

    /// Brings the client of `dst` hosted on `src` up to the latest finalized
    /// header of `dst`, and symmetrically.
    #[instrument(
        name = "update_clients",
        skip_all,
        fields(
            src_chain = %src.chain_id(),
            src_client = ?src.path().client_id,
            dst_chain = %dst.chain_id(),
            dst_client = ?dst.path().client_id
        )
    )]
    pub async fn update_clients(&self, src: &ProvableChain, dst: &ProvableChain) -> Result<(), Error> {
        let _timer = Timer::new("update_clients");

        let sync_headers = SyncHeaders::new(src, dst).await.map_err(|e| {
            error!("failed to fetch the latest finalized headers: {}", e);
            e
        })?;

        let (src_headers, dst_headers) = sync_headers
            .setup_both_headers_for_update(src, dst)
            .await
            .map_err(|e| {
                error!("failed to set up headers for update: {}", e);
                e
            })?;

        let mut clients = self.relay_msgs();

        if !dst_headers.is_empty() {
            clients.src.extend(build_update_clients(src, &dst_headers)?);
        }

        if !src_headers.is_empty() {
            clients.dst.extend(build_update_clients(dst, &src_headers)?);
        }

        if !clients.ready() {
            debug!("clients are up to date");
            return Ok(());
        }

        clients.send(src.chain(), dst.chain()).await;

        if !clients.success() {
            return Err(Error::submission(
                src.chain_id().clone(),
                dst.chain_id().clone(),
            ));
        }

        info!("★ clients updated");

        Ok(())
    }
}

/// Whether client creation should go ahead. A configured client that does not
/// exist on its chain is an error; when both configured clients exist there is
/// nothing to create.
async fn check_create_clients_ready(src: &ProvableChain, dst: &ProvableChain) -> Result<bool, Error> {
    let src_id = src.path().client_id.as_ref();
    let dst_id = dst.path().client_id.as_ref();

    if src_id.is_none() && dst_id.is_none() {
        return Ok(true);
    }

    if let Some(client_id) = src_id {
        ensure_client_exists(src, client_id).await?;
    }

    if let Some(client_id) = dst_id {
        ensure_client_exists(dst, client_id).await?;
    }

    if src_id.is_some() && dst_id.is_some() {
        warn!(
            src_client_id = ?src_id,
            dst_client_id = ?dst_id,
            "clients are already created"
        );
        return Ok(false);
    }

    Ok(true)
}

async fn ensure_client_exists(chain: &ProvableChain, client_id: &ClientId) -> Result<(), Error> {
    let latest_height = chain.chain().latest_height().await?;

    let state = chain
        .chain()
        .query_client_state(QueryContext::new(latest_height))
        .await?;

    match state {
        Some(_) => Ok(()),
        None => Err(Error::client_not_found(
            chain.chain_id().clone(),
            client_id.clone(),
        )),
    }
}

/// Builds the message creating, on `host`, a client of `counterparty` at
/// `counterparty_height`.
async fn build_create_client(
    host: &ProvableChain,
    counterparty: &ProvableChain,
    counterparty_height: Option<Height>,
) -> Result<Any, Error> {
    let signer = host.chain().get_address().map_err(|e| {
        error!(chain_id = %host.chain_id(), "failed to get address for create client: {}", e);
        e
    })?;

    let (client_state, consensus_state) = counterparty
        .prover()
        .create_initial_light_client_state(counterparty_height)
        .await
        .map_err(|e| {
            error!(
                chain_id = %counterparty.chain_id(),
                "failed to create initial light client state: {}", e
            );
            e
        })?;

    let msg = MsgCreateClient::new(client_state, consensus_state, signer).map_err(Error::types)?;

    Ok(msg.to_any())
}

/// Builds one update message per header, in order, for the client
/// configured on `host`.
fn build_update_clients(host: &ProvableChain, headers: &[Box<dyn Header>]) -> Result<Vec<Any>, Error> {
    let client_id = host
        .path()
        .client_id
        .clone()
        .ok_or_else(|| Error::missing_client_id(host.chain_id().clone()))?;

    let signer = host.chain().get_address()?;

    Ok(headers
        .iter()
        .map(|header| {
            MsgUpdateClient::from_header(client_id.clone(), &**header, signer.clone())
                .to_any()
        })
        .collect())
}
