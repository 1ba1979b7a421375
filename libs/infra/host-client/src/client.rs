//! The Unix-socket, line-delimited JSON client for the TEE host
//! runtime. Two operations: an authenticated `eth_call`-like
//! read, and an authenticated `tx.sign-submit` transaction submission
//! that the host signs with its ROFL-bound key and broadcasts.
//!
//! One socket connection per call; the host is local and privileged,
//! so pooling would add complexity this client doesn't need.

use std::path::PathBuf;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::time::timeout;
use tracing::{debug, instrument};
use worker_models::Address;

use crate::errors::HostClientError;
use crate::protocol::{HostRequest, HostResponse, SignSubmitResult};

pub const DEFAULT_CALL_DEADLINE: Duration = Duration::from_secs(30);

/// Configuration for the two host method names: read from configuration
/// rather than hardcoded, since the exact names the host accepts vary
/// by deployment.
#[derive(Debug, Clone)]
pub struct HostMethodNames {
    pub read: String,
    pub write: String,
}

impl Default for HostMethodNames {
    fn default() -> Self {
        Self {
            read: "eth_call".to_string(),
            write: "tx.sign-submit".to_string(),
        }
    }
}

pub struct HostClient {
    socket_path: PathBuf,
    methods: HostMethodNames,
    deadline: Duration,
}

impl HostClient {
    pub fn new(socket_path: PathBuf, methods: HostMethodNames, deadline: Duration) -> Self {
        Self {
            socket_path,
            methods,
            deadline,
        }
    }

    /// Performs an authenticated read-only contract call and returns
    /// the raw return data.
    #[instrument(skip(self, data), fields(to = %to))]
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, HostClientError> {
        let params = json!([
            { "to": to.to_string(), "data": format!("0x{}", hex::encode(data)) },
            "latest",
        ]);
        let result = self.call(&self.methods.read.clone(), params).await?;
        let hex_str = result
            .as_str()
            .ok_or_else(|| HostClientError::Protocol("expected a hex string result".to_string()))?;
        let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        hex::decode(trimmed).map_err(|err| HostClientError::Protocol(err.to_string()))
    }

    /// Submits a signed transaction via the host's ROFL-bound key and
    /// returns the broadcast transaction hash.
    #[instrument(skip(self, data), fields(to = %to, gas))]
    pub async fn sign_submit(
        &self,
        to: Address,
        data: &[u8],
        gas: u64,
    ) -> Result<String, HostClientError> {
        let params = json!({
            "to": to.to_string(),
            "data": format!("0x{}", hex::encode(data)),
            "gas": gas,
        });
        let result = self.call(&self.methods.write.clone(), params).await?;
        let parsed: SignSubmitResult = serde_json::from_value(result)?;
        Ok(parsed.hash)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, HostClientError> {
        match timeout(self.deadline, self.call_inner(method, params)).await {
            Ok(result) => result,
            Err(_) => Err(HostClientError::HostUnavailable(format!(
                "call to '{method}' exceeded its {:?} deadline",
                self.deadline
            ))),
        }
    }

    async fn call_inner(&self, method: &str, params: Value) -> Result<Value, HostClientError> {
        let mut stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|err| HostClientError::HostUnavailable(err.to_string()))?;

        let request = HostRequest {
            method: method.to_string(),
            params,
        };
        let mut line = serde_json::to_string(&request)?;
        line.push('\n');
        stream
            .write_all(line.as_bytes())
            .await
            .map_err(|err| HostClientError::HostUnavailable(err.to_string()))?;

        let mut response_line = String::new();
        let mut reader = BufReader::new(stream);
        reader
            .read_line(&mut response_line)
            .await
            .map_err(|err| HostClientError::HostUnavailable(err.to_string()))?;

        if response_line.is_empty() {
            return Err(HostClientError::HostUnavailable(
                "host closed the connection without a response".to_string(),
            ));
        }

        let response: HostResponse = serde_json::from_str(response_line.trim_end())?;
        if let Some(error) = response.error {
            debug!(code = error.code, message = %error.message, "host runtime returned an error");
            return Err(HostClientError::HostError {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| HostClientError::Protocol("response had neither result nor error".to_string()))
    }
}
