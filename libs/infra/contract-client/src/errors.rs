use thiserror::Error;

use worker_abi_codec::{AbiDecodeError, AbiEncodeError};
use worker_host_client::HostClientError;

/// Errors from a contract-level operation, after ABI encode/decode and
/// the host-client call have both been folded in.
#[derive(Error, Debug)]
pub enum ContractClientError {
    #[error(transparent)]
    Encode(#[from] AbiEncodeError),

    #[error(transparent)]
    Decode(#[from] AbiDecodeError),

    #[error(transparent)]
    Host(#[from] HostClientError),

    /// The host rejected a transaction because the request was no
    /// longer pending; treated as already processed rather than a failure.
    #[error("contract rejected the call: {0}")]
    StateRejection(String),

    #[error("unexpected return shape for this call")]
    UnexpectedShape,
}

impl ContractClientError {
    /// Whether this looks like the contract telling us the id isn't
    /// pending anymore, rather than a genuine failure.
    pub fn is_state_rejection(&self) -> bool {
        match self {
            ContractClientError::Host(HostClientError::HostError { message, .. }) => {
                let lower = message.to_ascii_lowercase();
                lower.contains("not pending") || lower.contains("already completed")
            }
            ContractClientError::StateRejection(_) => true,
            _ => false,
        }
    }
}
