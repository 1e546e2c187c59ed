//! Protocol engine of a two-chain relayer.
//!
//! The engine drives the light client lifecycle between two chains, each
//! reached through a [`ProvableChain`](provable_chain::ProvableChain): a
//! [`Chain`](chain::Chain) endpoint paired with the [`Prover`](prover::Prover)
//! that produces its headers and proofs. Client creation and update go through
//! [`ClientManager`](client::ClientManager), which submits a
//! [`RelayMsgs`](relay_msgs::RelayMsgs) batch to both chains and hands the
//! resulting message ids to the [`ConfigSynchronizer`](config_sync::ConfigSynchronizer)
//! so that identifiers allocated on chain end up in the path configuration.

#![forbid(unsafe_code)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod chain;
pub mod client;
pub mod config;
pub mod config_sync;
pub mod error;
pub mod headers;
pub mod instrumented;
pub mod provable_chain;
pub mod prover;
pub mod relay_msgs;
pub mod util;

#[cfg(test)]
mod tests;
