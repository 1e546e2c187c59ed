//! ICS 02: light client types the relayer builds messages for.

pub mod header;
pub mod height;
pub mod msgs;
