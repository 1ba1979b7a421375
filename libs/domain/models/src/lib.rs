//! Shared domain types for the confidential SNP similarity worker.
//!
//! These are the primitives and DTOs every other crate in the workspace
//! builds on: the EVM-adjacent primitives (`Address`, `Uint256`) that the
//! ABI codec encodes, the on-chain `AnalysisRequest` record, the SNP
//! record shape, and the JSON result the worker writes back.

pub mod primitives;
pub mod request;
pub mod result;
pub mod snp;

pub use primitives::{Address, PrimitiveError, Uint256};
pub use request::{AnalysisRequest, RequestStatus};
pub use result::{AnalysisResult, IbsAnalysis};
pub use snp::SnpRecord;
