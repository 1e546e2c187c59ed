//! Turns the identifiers reported by the events of executed messages into
//! path configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use ibc_relay_types::core::ics04_channel::channel::Ordering;
use ibc_relay_types::events::{IbcEvent, UpgradeChannel};

use crate::chain::requests::QueryContext;
use crate::chain::tx::{AnyMsgId, MsgResult, MsgStatus};
use crate::config::{PathConfigKey, PathConfigStore};
use crate::error::Error;
use crate::provable_chain::ProvableChain;

pub struct ConfigSynchronizer<S: ?Sized> {
    store: Arc<S>,
}

impl<S: PathConfigStore + ?Sized> ConfigSynchronizer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Synchronizes the configuration of `src` from `src_msg_ids`, then the
    /// configuration of `dst` from `dst_msg_ids`.
    pub async fn sync_chain_configs_from_events(
        &self,
        path_name: &str,
        src_msg_ids: &[Option<AnyMsgId>],
        dst_msg_ids: &[Option<AnyMsgId>],
        src: &ProvableChain,
        dst: &ProvableChain,
    ) -> Result<(), Error> {
        self.sync_chain_config_from_events(path_name, src_msg_ids, src)
            .await?;
        self.sync_chain_config_from_events(path_name, dst_msg_ids, dst)
            .await
    }

    /// For each message that was submitted to `chain`, in order, fetches its
    /// result and writes the identifiers found in its events to the end of
    /// path `path_name` on `chain`, with one store update per message.
    ///
    /// Stops at the first error. Updates made for earlier messages are kept.
    #[instrument(
        name = "sync_chain_config_from_events",
        skip_all,
        fields(path = %path_name, chain_id = %chain.chain_id())
    )]
    pub async fn sync_chain_config_from_events(
        &self,
        path_name: &str,
        msg_ids: &[Option<AnyMsgId>],
        chain: &ProvableChain,
    ) -> Result<(), Error> {
        for msg_id in msg_ids.iter().flatten() {
            let result = chain.chain().get_msg_result(&**msg_id).await?;

            if let MsgStatus::Failure { reason } = &result.status {
                return Err(Error::execution_failure(
                    chain.chain_id().clone(),
                    msg_id.to_string(),
                    reason.clone(),
                ));
            }

            let kv = path_config_from_events(chain, &result).await?;

            if kv.is_empty() {
                debug!(%msg_id, "no identifier to record");
                continue;
            }

            self.store
                .update_path_config(path_name, chain.chain_id(), &kv)?;
        }

        Ok(())
    }
}

async fn path_config_from_events(
    chain: &ProvableChain,
    result: &MsgResult,
) -> Result<BTreeMap<PathConfigKey, String>, Error> {
    let mut kv = BTreeMap::new();

    for event in &result.events {
        match event {
            IbcEvent::GenerateClientIdentifier(ev) => {
                kv.insert(PathConfigKey::ClientId, ev.client_id.to_string());
            }
            IbcEvent::GenerateConnectionIdentifier(ev) => {
                kv.insert(PathConfigKey::ConnectionId, ev.connection_id.to_string());
            }
            IbcEvent::GenerateChannelIdentifier(ev) => {
                kv.insert(PathConfigKey::ChannelId, ev.channel_id.to_string());
            }
            IbcEvent::UpgradeChannel(ev) => {
                kv.extend(upgraded_channel_config(chain, result, ev).await?);
            }
            IbcEvent::Unknown { kind } => {
                debug!(event = %kind, "ignoring event");
            }
        }
    }

    Ok(kv)
}

/// Reads the connection, ordering and version of a channel that just
/// completed an upgrade, at the height the upgrade was executed.
async fn upgraded_channel_config(
    chain: &ProvableChain,
    result: &MsgResult,
    event: &UpgradeChannel,
) -> Result<BTreeMap<PathConfigKey, String>, Error> {
    let chain_id = chain.chain_id();

    let response = chain
        .chain()
        .query_channel(QueryContext::new(result.block_height))
        .await?;
    let channel = response.channel;

    if channel.upgrade_sequence != event.upgrade_sequence {
        warn!(
            channel_sequence = channel.upgrade_sequence,
            event_sequence = event.upgrade_sequence,
            "upgrade sequence mismatch"
        );

        return Err(Error::upgrade_sequence_mismatch(
            chain_id.clone(),
            event.channel_id.clone(),
            channel.upgrade_sequence,
            event.upgrade_sequence,
        ));
    }

    let connection_id = match channel.connection_hops.as_slice() {
        [connection_id] => connection_id.clone(),
        hops => {
            return Err(Error::unexpected_connection_hops(
                chain_id.clone(),
                event.channel_id.clone(),
                hops.len(),
            ))
        }
    };

    let order = match channel.ordering {
        Ordering::Ordered => "ordered",
        Ordering::Unordered => "unordered",
        ordering => {
            return Err(Error::unexpected_ordering(
                chain_id.clone(),
                event.channel_id.clone(),
                ordering,
            ))
        }
    };

    Ok(BTreeMap::from([
        (PathConfigKey::ConnectionId, connection_id.to_string()),
        (PathConfigKey::Order, order.to_string()),
        (PathConfigKey::Version, channel.version),
    ]))
}
