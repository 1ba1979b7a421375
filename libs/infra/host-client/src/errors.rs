//! Error kinds for calls against the TEE host runtime socket.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostClientError {
    /// The socket could not be reached, the connection dropped mid-call,
    /// or the call did not complete within its deadline.
    #[error("host runtime unavailable: {0}")]
    HostUnavailable(String),

    /// The host accepted the request but returned a JSON-RPC-style error.
    #[error("host runtime returned error {code}: {message}")]
    HostError { code: i64, message: String },

    /// The response line was not well-formed JSON, or its shape didn't
    /// match what the protocol promises.
    #[error("malformed response from host runtime: {0}")]
    Protocol(String),
}

impl From<serde_json::Error> for HostClientError {
    fn from(err: serde_json::Error) -> Self {
        HostClientError::Protocol(err.to_string())
    }
}
