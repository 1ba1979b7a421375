//! The analysis result, serialized as the UTF-8 JSON string the worker
//! stores on-chain via `submitAnalysisResult`. Field order is the
//! declaration order below — `serde_json` preserves struct field order,
//! which is what downstream parsers are told to rely on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IbsAnalysis {
    pub ibs0: u32,
    pub ibs1: u32,
    pub ibs2: u32,
    pub total_snps: u32,
    pub ibs_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: String,
    pub n_common_snps: u32,
    pub ibs_analysis: IbsAnalysis,
    pub ibs2_percentage: f64,
    pub relationship: String,
    pub confidence: f64,
    pub pca_distance: f64,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Serializes to the exact UTF-8 string that gets written on-chain.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_stable_field_order() {
        let result = AnalysisResult {
            status: "success".to_string(),
            n_common_snps: 100,
            ibs_analysis: IbsAnalysis {
                ibs0: 1,
                ibs1: 2,
                ibs2: 97,
                total_snps: 100,
                ibs_score: 0.98,
            },
            ibs2_percentage: 97.0,
            relationship: "full siblings".to_string(),
            confidence: 0.90,
            pca_distance: 0.5,
            recommendations: vec!["consult a genetic counselor".to_string()],
        };
        let json = result.to_json_string().unwrap();
        let status_pos = json.find("\"status\"").unwrap();
        let snps_pos = json.find("\"n_common_snps\"").unwrap();
        let recs_pos = json.find("\"recommendations\"").unwrap();
        assert!(status_pos < snps_pos);
        assert!(snps_pos < recs_pos);
        assert!(!json.starts_with('\u{feff}'));
    }
}
