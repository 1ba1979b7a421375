//! The exact, canonical signature strings this worker ever calls.
//!
//! These are matched verbatim against the contract's declared
//! signatures — argument types only, no parameter names, no spaces.
//! No other signature is supported.

pub const GET_PENDING_REQUESTS: &str = "getPendingRequests()";
pub const GET_ANALYSIS_REQUEST: &str = "getAnalysisRequest(uint256)";
pub const GET_SNP_DATA_FOR_ANALYSIS: &str = "getSNPDataForAnalysis(uint256)";
pub const SUBMIT_ANALYSIS_RESULT: &str =
    "submitAnalysisResult(uint256,string,uint256,string)";
pub const MARK_ANALYSIS_FAILED: &str = "markAnalysisFailed(uint256,string)";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::selector;

    #[test]
    fn each_supported_signature_has_a_stable_selector() {
        for sig in [
            GET_PENDING_REQUESTS,
            GET_ANALYSIS_REQUEST,
            GET_SNP_DATA_FOR_ANALYSIS,
            SUBMIT_ANALYSIS_RESULT,
            MARK_ANALYSIS_FAILED,
        ] {
            assert_eq!(selector(sig), selector(sig));
        }
    }
}
