//! Grant identifiers and token models shared by flows.

pub mod grant;
pub mod token;

pub use grant::*;
pub use token::{payload::*, secret::*};
