//! The host runtime's wire protocol: one JSON object per line, both
//! ways, over a Unix-domain socket.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct HostRequest {
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub struct HostResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<HostResponseError>,
}

#[derive(Debug, Deserialize)]
pub struct HostResponseError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct EthCallTarget {
    pub to: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct SignSubmitParams {
    pub to: String,
    pub data: String,
    pub gas: u64,
}

#[derive(Debug, Deserialize)]
pub struct SignSubmitResult {
    pub hash: String,
}
