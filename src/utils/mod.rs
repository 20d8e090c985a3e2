//! Small helpers shared across the crate.

pub mod date;
pub mod log;
pub mod slug;
