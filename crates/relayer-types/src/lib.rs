//! Value types shared by the relayer core.
//!
//! Everything in this crate is plain data: heights, ICS-24 identifiers,
//! the two ends of a relay path, channel ends, the IBC events a relayer
//! reacts to, and the ICS-02 client messages it builds. Nothing here
//! talks to a chain.

#![forbid(unsafe_code)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod core;
pub mod error;
pub mod events;
pub mod path;
pub mod proto;
pub mod signer;
pub mod tx_msg;

pub use crate::core::ics02_client::height::Height;
