//! Messages to submit to both chains of a path in one relay step.

use core::ops::Range;

use prost::Message;
use prost_types::Any;
use tracing::{debug, error};

use crate::chain::tx::AnyMsgId;
use crate::chain::Chain;
use crate::error::Error;

/// Messages for the source and the destination chain of a path.
///
/// After [`RelayMsgs::send`], `src_msg_ids` and `dst_msg_ids` are parallel to
/// `src` and `dst`: each entry holds the id of the corresponding message, or
/// `None` if the transaction carrying it could not be submitted.
#[derive(Clone, Debug, Default)]
pub struct RelayMsgs {
    pub src: Vec<Any>,
    pub dst: Vec<Any>,

    /// Maximum number of messages per transaction, 0 means unlimited.
    pub max_msg_num: usize,
    /// Maximum encoded size of the messages of a transaction, 0 means unlimited.
    pub max_tx_size: usize,

    pub src_msg_ids: Vec<Option<AnyMsgId>>,
    pub dst_msg_ids: Vec<Option<AnyMsgId>>,

    succeeded: bool,
}

impl RelayMsgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_msg_num: usize, max_tx_size: usize) -> Self {
        Self {
            max_msg_num,
            max_tx_size,
            ..Self::default()
        }
    }

    /// Whether there is anything to send on either side.
    pub fn ready(&self) -> bool {
        !self.src.is_empty() || !self.dst.is_empty()
    }

    /// Whether [`RelayMsgs::send`] was called and every transaction of both
    /// sides was submitted.
    pub fn success(&self) -> bool {
        self.succeeded
    }

    /// Whether a transaction of `msg_num` messages and `tx_size` encoded bytes
    /// exceeds the limits of this batch.
    pub fn is_max_tx(&self, msg_num: usize, tx_size: usize) -> bool {
        (self.max_msg_num != 0 && msg_num > self.max_msg_num)
            || (self.max_tx_size != 0 && tx_size > self.max_tx_size)
    }

    pub fn merge(&mut self, other: RelayMsgs) {
        self.src.extend(other.src);
        self.dst.extend(other.dst);
    }

    /// Submits the source messages to `src`, then the destination messages
    /// to `dst`. A failure on one side does not prevent the other side from
    /// being submitted.
    pub async fn send(&mut self, src: &dyn Chain, dst: &dyn Chain) {
        let (src_msg_ids, src_ok) = self.send_to(src, &self.src).await;
        let (dst_msg_ids, dst_ok) = self.send_to(dst, &self.dst).await;

        self.src_msg_ids = src_msg_ids;
        self.dst_msg_ids = dst_msg_ids;
        self.succeeded = src_ok && dst_ok;
    }

    async fn send_to(&self, chain: &dyn Chain, msgs: &[Any]) -> (Vec<Option<AnyMsgId>>, bool) {
        let mut msg_ids = vec![None; msgs.len()];
        let mut succeeded = true;

        for range in self.chunks(msgs) {
            let chunk = msgs[range.clone()].to_vec();

            debug!(
                chain_id = %chain.chain_id(),
                msg_count = chunk.len(),
                "sending messages"
            );

            match submit(chain, chunk).await {
                Ok(ids) => {
                    for (slot, id) in msg_ids[range].iter_mut().zip(ids) {
                        *slot = Some(id);
                    }
                }
                Err(e) => {
                    error!(chain_id = %chain.chain_id(), "failed to send msgs: {}", e);
                    succeeded = false;
                }
            }
        }

        (msg_ids, succeeded)
    }

    /// Splits `msgs` into consecutive transactions honoring the batch limits.
    /// A message that exceeds the size limit on its own is sent alone.
    fn chunks(&self, msgs: &[Any]) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut tx_size = 0;

        for (i, msg) in msgs.iter().enumerate() {
            let msg_size = msg.encoded_len();

            if i > start && self.is_max_tx(i - start + 1, tx_size + msg_size) {
                chunks.push(start..i);
                start = i;
                tx_size = 0;
            }

            tx_size += msg_size;
        }

        if start < msgs.len() {
            chunks.push(start..msgs.len());
        }

        chunks
    }
}

async fn submit(chain: &dyn Chain, msgs: Vec<Any>) -> Result<Vec<AnyMsgId>, Error> {
    let expected = msgs.len();
    let ids = chain.send_msgs(msgs).await?;

    if ids.len() != expected {
        return Err(Error::msg_id_count_mismatch(
            chain.chain_id().clone(),
            expected,
            ids.len(),
        ));
    }

    Ok(ids)
}
