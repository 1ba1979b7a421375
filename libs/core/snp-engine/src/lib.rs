//! Parses two users' SNP exports, intersects them by rsID, and computes
//! an IBS-based similarity analysis, a PCA-distance surrogate, and a
//! calibrated relationship classification.

pub mod canon;
pub mod classify;
pub mod errors;
pub mod ibs;
pub mod parser;
pub mod pca;

use std::collections::HashMap;

use tracing::{debug, instrument, warn};
use worker_models::result::{AnalysisResult, IbsAnalysis};
use worker_models::SnpRecord;

pub use errors::SnpEngineError;
pub use parser::{parse_dataset, ParsedDataset, MIN_RETAINED_RECORDS};

pub const MIN_COMMON_SNPS: usize = 50;

fn retained_or_fail(raw: &str) -> Result<Vec<SnpRecord>, SnpEngineError> {
    let parsed = parse_dataset(raw);
    if parsed.malformed_count > 0 {
        debug!(malformed = parsed.malformed_count, "skipped malformed SNP records");
    }
    if parsed.records.is_empty() {
        return Err(SnpEngineError::MalformedInput);
    }
    if parsed.records.len() < MIN_RETAINED_RECORDS {
        return Err(SnpEngineError::InsufficientData {
            retained: parsed.records.len(),
        });
    }
    Ok(parsed.records)
}

fn index_by_rsid(records: &[SnpRecord]) -> HashMap<&str, &str> {
    records
        .iter()
        .map(|r| (r.rsid.as_str(), r.genotype.as_str()))
        .collect()
}

/// Runs the full pairwise analysis over two raw, unparsed SNP exports.
///
/// Does not log either user's raw genotype payload; only record counts
/// and derived statistics ever reach the trace.
#[instrument(skip_all)]
pub fn analyze(user1_raw: &str, user2_raw: &str) -> Result<AnalysisResult, SnpEngineError> {
    let user1_records = retained_or_fail(user1_raw)?;
    let user2_records = retained_or_fail(user2_raw)?;

    let user1_index = index_by_rsid(&user1_records);
    let user2_index = index_by_rsid(&user2_records);

    let pairs: Vec<(&str, &str)> = user1_index
        .iter()
        .filter_map(|(rsid, g1)| user2_index.get(rsid).map(|g2| (*g1, *g2)))
        .collect();

    if pairs.len() < MIN_COMMON_SNPS {
        return Err(SnpEngineError::InsufficientOverlap {
            common: pairs.len(),
        });
    }

    let ibs_analysis: IbsAnalysis = ibs::compute_ibs(&pairs);
    let ibs2_percentage = ibs::ibs2_percentage(&ibs_analysis);
    let pca_distance = pca::pca_distance(&pairs);
    let (relationship, confidence) = classify::classify(ibs_analysis.ibs_score, ibs2_percentage);
    let recommendations = classify::recommendations(relationship);

    warn_on_low_confidence(confidence, relationship);

    Ok(AnalysisResult {
        status: "success".to_string(),
        n_common_snps: pairs.len() as u32,
        ibs_analysis,
        ibs2_percentage,
        relationship: relationship.to_string(),
        confidence,
        pca_distance,
        recommendations,
    })
}

fn warn_on_low_confidence(confidence: f64, relationship: &str) {
    if confidence < 0.60 {
        warn!(relationship, confidence, "low-confidence relationship classification");
    }
}
