use core::fmt::{Debug, Display};
use std::sync::Arc;

use ibc_relay_types::events::IbcEvent;
use ibc_relay_types::Height;

use crate::util::as_any::AsAny;

/// Handle on a submitted message, as returned by
/// [`Chain::send_msgs`](crate::chain::Chain::send_msgs). Its concrete type is
/// chosen by the chain implementation, which downcasts it back in
/// [`Chain::get_msg_result`](crate::chain::Chain::get_msg_result).
pub trait MsgId: Debug + Display + AsAny + Send + Sync {}

pub type AnyMsgId = Arc<dyn MsgId>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MsgStatus {
    Success,
    Failure { reason: String },
}

/// Outcome of the execution of one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgResult {
    pub status: MsgStatus,
    /// Height of the block in which the message was executed.
    pub block_height: Height,
    pub events: Vec<IbcEvent>,
}

impl MsgResult {
    pub fn is_success(&self) -> bool {
        self.status == MsgStatus::Success
    }
}
