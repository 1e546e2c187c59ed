pub mod as_any;
pub mod lock;
pub mod timer;
