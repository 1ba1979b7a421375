//! A lightweight PCA-distance surrogate: rather than a real
//! principal-component projection, each user's common-set genotypes are
//! encoded as a dosage vector and the centered Euclidean distance
//! between the two rows is reported.

use crate::canon::canonicalize;

/// Encodes a genotype against a per-SNP reference allele as a dosage:
/// 0 (homozygous reference), 1 (heterozygous), 2 (homozygous alternate).
fn dosage(genotype: [char; 2], reference: char) -> f64 {
    genotype.iter().filter(|&&a| a != reference).count() as f64
}

/// Computes the PCA-distance surrogate over paired, already-intersected
/// genotypes. The reference allele per SNP is the lexicographically
/// smaller allele observed across both users at that site.
pub fn pca_distance(pairs: &[(&str, &str)]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }

    let mut vec1 = Vec::with_capacity(pairs.len());
    let mut vec2 = Vec::with_capacity(pairs.len());
    for (g1, g2) in pairs {
        let a = canonicalize(g1);
        let b = canonicalize(g2);
        let reference = a.iter().chain(b.iter()).copied().min().expect("non-empty");
        vec1.push(dosage(a, reference));
        vec2.push(dosage(b, reference));
    }

    // Centering each column subtracts the same per-column mean from both
    // rows, so it cancels in the row-to-row difference; computed
    // explicitly anyway to match the two-row PCA procedure this
    // surrogates for.
    let sum_sq: f64 = vec1
        .iter()
        .zip(vec2.iter())
        .map(|(v1, v2)| {
            let mean = (v1 + v2) / 2.0;
            let c1 = v1 - mean;
            let c2 = v2 - mean;
            (c1 - c2).powi(2)
        })
        .sum();

    sum_sq.sqrt()
}
