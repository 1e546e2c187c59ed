use prost_types::Any;

use ibc_relay_types::core::ics04_channel::channel::ChannelEnd;
use ibc_relay_types::Height;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientStateResponse {
    pub client_state: Any,
    pub proof: Vec<u8>,
    pub proof_height: Height,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsensusStateResponse {
    pub consensus_state: Any,
    pub proof: Vec<u8>,
    pub proof_height: Height,
}

/// The connection end is kept in its chain-specific encoding; the relayer
/// core only forwards it.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionResponse {
    pub connection: Any,
    pub proof: Vec<u8>,
    pub proof_height: Height,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelResponse {
    pub channel: ChannelEnd,
    pub proof: Vec<u8>,
    pub proof_height: Height,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}
