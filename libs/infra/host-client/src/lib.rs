//! Client for the TEE host runtime's local Unix-socket, line-delimited
//! JSON protocol.

pub mod client;
pub mod errors;
pub mod protocol;

pub use client::{HostClient, HostMethodNames, DEFAULT_CALL_DEADLINE};
pub use errors::HostClientError;
