use core::fmt::Debug;

use prost_types::Any;

use crate::Height;

/// Abstract of consensus state update information.
///
/// Headers are produced by a prover and relayed verbatim to the
/// counterparty's light client, so the relayer only needs their height and
/// their packed encoding.
pub trait Header: Debug + Send + Sync {
    /// The height of the consensus state
    fn height(&self) -> Height;

    /// The header packed as the client message of a `MsgUpdateClient`.
    fn to_any(&self) -> Any;
}
