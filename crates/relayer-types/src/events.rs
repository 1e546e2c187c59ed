//! The IBC events the relayer reacts to in the result of a message.

use std::fmt::{Display, Error as FmtError, Formatter};

use serde_derive::{Deserialize, Serialize};

use crate::core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateClientIdentifier {
    pub client_id: ClientId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConnectionIdentifier {
    pub connection_id: ConnectionId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateChannelIdentifier {
    pub channel_id: ChannelId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeChannel {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub upgrade_sequence: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IbcEvent {
    GenerateClientIdentifier(GenerateClientIdentifier),
    GenerateConnectionIdentifier(GenerateConnectionIdentifier),
    GenerateChannelIdentifier(GenerateChannelIdentifier),
    UpgradeChannel(UpgradeChannel),
    /// Any event the relayer does not act upon.
    Unknown { kind: String },
}

impl Display for IbcEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::GenerateClientIdentifier(ev) => {
                write!(f, "GenerateClientIdentifier({})", ev.client_id)
            }
            Self::GenerateConnectionIdentifier(ev) => {
                write!(f, "GenerateConnectionIdentifier({})", ev.connection_id)
            }
            Self::GenerateChannelIdentifier(ev) => {
                write!(f, "GenerateChannelIdentifier({})", ev.channel_id)
            }
            Self::UpgradeChannel(ev) => write!(
                f,
                "UpgradeChannel({}/{}, sequence: {})",
                ev.port_id, ev.channel_id, ev.upgrade_sequence
            ),
            Self::Unknown { kind } => write!(f, "Unknown({kind})"),
        }
    }
}

impl From<GenerateClientIdentifier> for IbcEvent {
    fn from(ev: GenerateClientIdentifier) -> Self {
        Self::GenerateClientIdentifier(ev)
    }
}

impl From<GenerateConnectionIdentifier> for IbcEvent {
    fn from(ev: GenerateConnectionIdentifier) -> Self {
        Self::GenerateConnectionIdentifier(ev)
    }
}

impl From<GenerateChannelIdentifier> for IbcEvent {
    fn from(ev: GenerateChannelIdentifier) -> Self {
        Self::GenerateChannelIdentifier(ev)
    }
}

impl From<UpgradeChannel> for IbcEvent {
    fn from(ev: UpgradeChannel) -> Self {
        Self::UpgradeChannel(ev)
    }
}
