//! Thin, pure-composition adapter over the ABI codec and the host
//! client: `getPendingRequests`, `getAnalysisRequest`,
//! `getSNPDataForAnalysis`, `submitAnalysisResult`,
//! `markAnalysisFailed`.

pub mod client;
pub mod errors;

pub use client::ContractClient;
pub use errors::ContractClientError;
