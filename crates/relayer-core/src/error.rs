use flex_error::define_error;

use ibc_relay_types::core::ics04_channel::channel::Ordering;
use ibc_relay_types::core::ics24_host::identifier::{ChainId, ChannelId, ClientId};
use ibc_relay_types::error::Error as TypesError;
use ibc_relay_types::Height;

use crate::config::PathConfigKey;

define_error! {
    Error {
        SameChainId
            { chain_id: ChainId }
            |e| {
                format_args!("the source and destination chains must be different, both are '{}'", e.chain_id)
            },

        ClientNotFound
            {
                chain_id: ChainId,
                client_id: ClientId,
            }
            |e| {
                format_args!("client '{}' is configured on chain '{}' but does not exist", e.client_id, e.chain_id)
            },

        MissingClientId
            { chain_id: ChainId }
            |e| {
                format_args!("no client identifier is configured on chain '{}'", e.chain_id)
            },

        Query
            {
                chain_id: ChainId,
                description: String,
            }
            |e| {
                format_args!("query on chain '{}' failed: {}", e.chain_id, e.description)
            },

        Prover
            {
                chain_id: ChainId,
                description: String,
            }
            |e| {
                format_args!("prover of chain '{}' failed: {}", e.chain_id, e.description)
            },

        Send
            {
                chain_id: ChainId,
                description: String,
            }
            |e| {
                format_args!("failed to send messages to chain '{}': {}", e.chain_id, e.description)
            },

        Submission
            {
                src_chain_id: ChainId,
                dst_chain_id: ChainId,
            }
            |e| {
                format_args!("failed to submit messages to chains '{}' and '{}'", e.src_chain_id, e.dst_chain_id)
            },

        MsgIdCountMismatch
            {
                chain_id: ChainId,
                expected: usize,
                actual: usize,
            }
            |e| {
                format_args!("chain '{}' returned {} message ids for {} messages", e.chain_id, e.actual, e.expected)
            },

        ExecutionFailure
            {
                chain_id: ChainId,
                msg_id: String,
                reason: String,
            }
            |e| {
                format_args!("msg(id={}) execution failed on chain '{}': {}", e.msg_id, e.chain_id, e.reason)
            },

        UpgradeSequenceMismatch
            {
                chain_id: ChainId,
                channel_id: ChannelId,
                channel_sequence: u64,
                event_sequence: u64,
            }
            |e| {
                format_args!("unexpected mismatch of upgrade sequence for channel '{}' on chain '{}': channel.upgrade_sequence={}, event.upgrade_sequence={}",
                    e.channel_id, e.chain_id, e.channel_sequence, e.event_sequence)
            },

        UnexpectedConnectionHops
            {
                chain_id: ChainId,
                channel_id: ChannelId,
                hops: usize,
            }
            |e| {
                format_args!("unexpected length of connection hops for channel '{}' on chain '{}': {}", e.channel_id, e.chain_id, e.hops)
            },

        UnexpectedOrdering
            {
                chain_id: ChainId,
                channel_id: ChannelId,
                ordering: Ordering,
            }
            |e| {
                format_args!("unexpected ordering of channel '{}' on chain '{}': {}", e.channel_id, e.chain_id, e.ordering)
            },

        NonMonotonicHeaders
            {
                chain_id: ChainId,
                previous: Height,
                next: Height,
            }
            |e| {
                format_args!("headers of chain '{}' are not strictly increasing: {} is followed by {}", e.chain_id, e.previous, e.next)
            },

        MissingHeader
            { chain_id: ChainId }
            |e| {
                format_args!("no latest finalized header is known for chain '{}'", e.chain_id)
            },

        UnknownPath
            { path_name: String }
            |e| {
                format_args!("path '{}' is not configured", e.path_name)
            },

        UnknownChain
            {
                path_name: String,
                chain_id: ChainId,
            }
            |e| {
                format_args!("path '{}' has no end on chain '{}'", e.path_name, e.chain_id)
            },

        EmptyPathConfigValue
            { key: PathConfigKey }
            |e| {
                format_args!("path configuration value for '{}' cannot be empty", e.key)
            },

        InvalidConfig
            { reason: String }
            |e| {
                format_args!("invalid configuration: {}", e.reason)
            },

        PoisonedLock
            |_| { "poisoned configuration lock" },

        Types
            [ TypesError ]
            |_| { "invalid relayer value" },
    }
}

/// Coarse classification of [`Error`], following what the caller of a relay
/// cycle can do about it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or contradictory configuration.
    Configuration,
    /// A chain or prover query failed, or queried state is missing.
    Query,
    /// Messages could not be broadcast.
    Submission,
    /// A message was broadcast but failed to execute.
    ExecutionFailure,
    /// On-chain state contradicts the observed events.
    Consistency,
    /// The configuration store rejected an update.
    Store,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self.detail() {
            ErrorDetail::SameChainId(_)
            | ErrorDetail::MissingClientId(_)
            | ErrorDetail::UnexpectedOrdering(_)
            | ErrorDetail::InvalidConfig(_)
            | ErrorDetail::Types(_) => ErrorKind::Configuration,

            ErrorDetail::ClientNotFound(_)
            | ErrorDetail::Query(_)
            | ErrorDetail::Prover(_)
            | ErrorDetail::MissingHeader(_) => ErrorKind::Query,

            ErrorDetail::Send(_)
            | ErrorDetail::Submission(_)
            | ErrorDetail::MsgIdCountMismatch(_) => ErrorKind::Submission,

            ErrorDetail::ExecutionFailure(_) => ErrorKind::ExecutionFailure,

            ErrorDetail::UpgradeSequenceMismatch(_)
            | ErrorDetail::UnexpectedConnectionHops(_)
            | ErrorDetail::NonMonotonicHeaders(_) => ErrorKind::Consistency,

            ErrorDetail::UnknownPath(_)
            | ErrorDetail::UnknownChain(_)
            | ErrorDetail::EmptyPathConfigValue(_) => ErrorKind::Store,

            ErrorDetail::PoisonedLock(_) => ErrorKind::Internal,
        }
    }
}
