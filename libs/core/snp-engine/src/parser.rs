//! Parses a raw SNP chip export into [`SnpRecord`]s.
//!
//! Input is a possibly multi-line string. A line is a candidate record
//! when it has at least 4 whitespace-separated fields and does not
//! start with `#`. The four leading fields map positionally to either
//! `(rsid, chromosome, position, genotype)` or
//! `(rsid, position, chromosome, genotype)` — both orderings show up in
//! real exports — so the position column is identified by testing
//! which of fields 2/3 parses as an integer.

use worker_models::SnpRecord;

pub const MIN_RETAINED_RECORDS: usize = 100;

/// The result of parsing one user's raw SNP export.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDataset {
    pub records: Vec<SnpRecord>,
    /// Candidate record lines rejected for a bad genotype or an
    /// undeterminable position/chromosome ordering.
    pub malformed_count: usize,
}

fn is_valid_genotype(genotype: &str) -> bool {
    genotype.len() == 2
        && genotype
            .chars()
            .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T'))
}

pub fn parse_dataset(raw: &str) -> ParsedDataset {
    let mut records = Vec::new();
    let mut malformed_count = 0usize;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }

        let rsid = fields[0];
        let genotype = fields[3];
        if !is_valid_genotype(genotype) {
            malformed_count += 1;
            continue;
        }

        let (chromosome, position) = if let Ok(position) = fields[2].parse::<u64>() {
            (fields[1], position)
        } else if let Ok(position) = fields[1].parse::<u64>() {
            (fields[2], position)
        } else {
            malformed_count += 1;
            continue;
        };

        records.push(SnpRecord {
            rsid: rsid.to_string(),
            chromosome: chromosome.to_string(),
            position,
            genotype: genotype.to_ascii_uppercase(),
        });
    }

    ParsedDataset {
        records,
        malformed_count,
    }
}
