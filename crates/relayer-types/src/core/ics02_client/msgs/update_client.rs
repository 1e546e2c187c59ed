//! Definition of domain type message `MsgUpdateClient`.

use prost_types::Any;

use crate::core::ics02_client::header::Header;
use crate::core::ics24_host::identifier::ClientId;
use crate::error::Error;
use crate::proto::MsgUpdateClient as RawMsgUpdateClient;
use crate::signer::Signer;
use crate::tx_msg::{decode_any, Msg};

pub const TYPE_URL: &str = "/ibc.core.client.v1.MsgUpdateClient";

/// A type of message that triggers the update of an on-chain (IBC) client with new headers.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgUpdateClient {
    pub client_id: ClientId,
    pub client_message: Any,
    pub signer: Signer,
}

impl MsgUpdateClient {
    pub fn new(client_id: ClientId, client_message: Any, signer: Signer) -> Self {
        MsgUpdateClient {
            client_id,
            client_message,
            signer,
        }
    }

    pub fn from_header(client_id: ClientId, header: &dyn Header, signer: Signer) -> Self {
        Self::new(client_id, header.to_any(), signer)
    }

    pub fn from_any(any: &Any) -> Result<Self, Error> {
        decode_any::<RawMsgUpdateClient>(any, TYPE_URL)?.try_into()
    }
}

impl Msg for MsgUpdateClient {
    type Raw = RawMsgUpdateClient;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgUpdateClient> for MsgUpdateClient {
    type Error = Error;

    fn try_from(raw: RawMsgUpdateClient) -> Result<Self, Self::Error> {
        Ok(MsgUpdateClient {
            client_id: raw.client_id.parse()?,
            client_message: raw
                .client_message
                .ok_or_else(Error::missing_raw_client_message)?,
            signer: raw.signer.parse()?,
        })
    }
}

impl From<MsgUpdateClient> for RawMsgUpdateClient {
    fn from(ics_msg: MsgUpdateClient) -> Self {
        RawMsgUpdateClient {
            client_id: ics_msg.client_id.to_string(),
            client_message: Some(ics_msg.client_message),
            signer: ics_msg.signer.to_string(),
        }
    }
}
