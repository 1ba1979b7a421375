//! IBS0/1/2 counting over a common SNP set and the derived IBS score.

use worker_models::result::IbsAnalysis;

use crate::canon::canonicalize;

/// Compares two canonical genotypes and returns how many alleles they
/// share: 2 if identical, 1 if they share exactly one allele (by
/// multiset intersection), 0 otherwise.
fn shared_allele_count(a: [char; 2], b: [char; 2]) -> u8 {
    if a == b {
        return 2;
    }
    let mut remaining = b.to_vec();
    let mut shared = 0u8;
    for allele in a {
        if let Some(pos) = remaining.iter().position(|&r| r == allele) {
            remaining.remove(pos);
            shared += 1;
        }
    }
    shared
}

/// Computes IBS0/1/2 counts over paired, already-intersected genotypes.
pub fn compute_ibs(pairs: &[(&str, &str)]) -> IbsAnalysis {
    let mut ibs0 = 0u32;
    let mut ibs1 = 0u32;
    let mut ibs2 = 0u32;

    for (g1, g2) in pairs {
        let a = canonicalize(g1);
        let b = canonicalize(g2);
        match shared_allele_count(a, b) {
            2 => ibs2 += 1,
            1 => ibs1 += 1,
            _ => ibs0 += 1,
        }
    }

    let total = ibs0 + ibs1 + ibs2;
    let ibs_score = if total == 0 {
        0.0
    } else {
        (2.0 * ibs2 as f64 + ibs1 as f64) / (2.0 * total as f64)
    };

    IbsAnalysis {
        ibs0,
        ibs1,
        ibs2,
        total_snps: total,
        ibs_score,
    }
}

/// `100 * ibs2 / total`, `0.0` when there's nothing to compare.
pub fn ibs2_percentage(analysis: &IbsAnalysis) -> f64 {
    if analysis.total_snps == 0 {
        0.0
    } else {
        100.0 * analysis.ibs2 as f64 / analysis.total_snps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_genotypes_count_as_ibs2() {
        let pairs = [("AG", "GA")]; // same multiset, different order
        let analysis = compute_ibs(&pairs);
        assert_eq!(analysis.ibs2, 1);
        assert_eq!(analysis.ibs0, 0);
        assert_eq!(analysis.ibs1, 0);
    }

    #[test]
    fn one_shared_allele_counts_as_ibs1() {
        let pairs = [("AG", "GG")];
        let analysis = compute_ibs(&pairs);
        assert_eq!(analysis.ibs1, 1);
    }

    #[test]
    fn disjoint_alleles_count_as_ibs0() {
        let pairs = [("AA", "TT")];
        let analysis = compute_ibs(&pairs);
        assert_eq!(analysis.ibs0, 1);
    }

    #[test]
    fn score_and_percentage_match_the_defined_formula() {
        // 1 ibs2, 1 ibs1, 1 ibs0 -> total 3, score = (2*1+1)/(2*3) = 0.5
        let pairs = [("AG", "AG"), ("AG", "GG"), ("AA", "TT")];
        let analysis = compute_ibs(&pairs);
        assert!((analysis.ibs_score - 0.5).abs() < 1e-9);
        assert!((ibs2_percentage(&analysis) - (100.0 / 3.0)).abs() < 1e-9);
    }
}
