pub mod chain;
pub mod context;
pub mod prover;
pub mod store;
pub mod trace;
