//! Definition of domain type message `MsgCreateClient`.

use prost_types::Any;

use crate::error::Error;
use crate::proto::MsgCreateClient as RawMsgCreateClient;
use crate::signer::Signer;
use crate::tx_msg::{decode_any, Msg};

pub const TYPE_URL: &str = "/ibc.core.client.v1.MsgCreateClient";

/// A type of message that triggers the creation of a new on-chain (IBC) client.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgCreateClient {
    pub client_state: Any,
    pub consensus_state: Any,
    pub signer: Signer,
}

impl MsgCreateClient {
    pub fn new(client_state: Any, consensus_state: Any, signer: Signer) -> Result<Self, Error> {
        if client_state.type_url.is_empty() {
            return Err(Error::missing_raw_client_state());
        }

        if consensus_state.type_url.is_empty() {
            return Err(Error::missing_raw_consensus_state());
        }

        Ok(MsgCreateClient {
            client_state,
            consensus_state,
            signer,
        })
    }

    pub fn from_any(any: &Any) -> Result<Self, Error> {
        decode_any::<RawMsgCreateClient>(any, TYPE_URL)?.try_into()
    }
}

impl Msg for MsgCreateClient {
    type Raw = RawMsgCreateClient;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgCreateClient> for MsgCreateClient {
    type Error = Error;

    fn try_from(raw: RawMsgCreateClient) -> Result<Self, Error> {
        let client_state = raw
            .client_state
            .ok_or_else(Error::missing_raw_client_state)?;

        let consensus_state = raw
            .consensus_state
            .ok_or_else(Error::missing_raw_consensus_state)?;

        MsgCreateClient::new(client_state, consensus_state, raw.signer.parse()?)
    }
}

impl From<MsgCreateClient> for RawMsgCreateClient {
    fn from(ics_msg: MsgCreateClient) -> Self {
        RawMsgCreateClient {
            client_state: Some(ics_msg.client_state),
            consensus_state: Some(ics_msg.consensus_state),
            signer: ics_msg.signer.to_string(),
        }
    }
}
