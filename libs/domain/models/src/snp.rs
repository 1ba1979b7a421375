//! A single SNP (Single Nucleotide Polymorphism) observation for one
//! individual: an rsID, its chromosomal position, and the observed
//! genotype. The rsID is kept as an opaque string — implementations must
//! not reparse its numeric suffix.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnpRecord {
    pub rsid: String,
    pub chromosome: String,
    pub position: u64,
    /// The raw 2-letter genotype as observed, not yet canonicalized.
    pub genotype: String,
}
