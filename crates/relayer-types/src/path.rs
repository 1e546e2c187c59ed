//! The two ends of a relay path, as kept in the relayer configuration.

use serde_derive::{Deserialize, Serialize};

use crate::core::ics04_channel::channel::Ordering;
use crate::core::ics24_host::identifier::{ChainId, ChannelId, ClientId, ConnectionId, PortId};

/// One end of a relay path.
///
/// The client, connection and channel identifiers start unset and are filled
/// in as the corresponding handshake step completes on this chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PathEnd {
    pub chain_id: ChainId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<ConnectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    pub port_id: PortId,
    #[serde(default)]
    pub order: Ordering,
    #[serde(default)]
    pub version: String,
}

impl PathEnd {
    pub fn new(chain_id: ChainId, port_id: PortId) -> Self {
        Self {
            chain_id,
            client_id: None,
            connection_id: None,
            channel_id: None,
            port_id,
            order: Ordering::default(),
            version: String::new(),
        }
    }
}

pub mod default {
    pub fn strategy() -> String {
        "naive".to_string()
    }
}

/// A relay path between two chains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Path {
    pub src: PathEnd,
    pub dst: PathEnd,
    #[serde(default = "default::strategy")]
    pub strategy: String,
}

impl Path {
    pub fn new(src: PathEnd, dst: PathEnd) -> Self {
        Self {
            src,
            dst,
            strategy: default::strategy(),
        }
    }

    /// The end of this path that lives on `chain_id`, if any.
    pub fn end(&self, chain_id: &ChainId) -> Option<&PathEnd> {
        if &self.src.chain_id == chain_id {
            Some(&self.src)
        } else if &self.dst.chain_id == chain_id {
            Some(&self.dst)
        } else {
            None
        }
    }

    pub fn end_mut(&mut self, chain_id: &ChainId) -> Option<&mut PathEnd> {
        if &self.src.chain_id == chain_id {
            Some(&mut self.src)
        } else if &self.dst.chain_id == chain_id {
            Some(&mut self.dst)
        } else {
            None
        }
    }
}
