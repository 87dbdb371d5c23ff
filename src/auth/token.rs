//! Token models returned by successful exchanges.

pub mod payload;
pub mod secret;
