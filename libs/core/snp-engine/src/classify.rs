//! Relationship classification and the static recommendations mapping.
//! Rows are checked in descending order; the first whose
//! `ibs_score_min` and `ibs2_pct_min` are both met wins.

struct ClassificationRow {
    relationship: &'static str,
    ibs_score_min: f64,
    ibs2_pct_min: f64,
    confidence: f64,
}

const TABLE: &[ClassificationRow] = &[
    ClassificationRow {
        relationship: "identical/twin",
        ibs_score_min: 0.99,
        ibs2_pct_min: 99.0,
        confidence: 0.99,
    },
    ClassificationRow {
        relationship: "parent-child",
        ibs_score_min: 0.85,
        ibs2_pct_min: 85.0,
        confidence: 0.95,
    },
    ClassificationRow {
        relationship: "full siblings",
        ibs_score_min: 0.85,
        ibs2_pct_min: 75.0,
        confidence: 0.90,
    },
    ClassificationRow {
        relationship: "grandparent/aunt/uncle",
        ibs_score_min: 0.70,
        ibs2_pct_min: 65.0,
        confidence: 0.85,
    },
    ClassificationRow {
        relationship: "first cousins",
        ibs_score_min: 0.65,
        ibs2_pct_min: 60.0,
        confidence: 0.80,
    },
    ClassificationRow {
        relationship: "second cousins",
        ibs_score_min: 0.60,
        ibs2_pct_min: 55.0,
        confidence: 0.70,
    },
    ClassificationRow {
        relationship: "third cousins",
        ibs_score_min: 0.55,
        ibs2_pct_min: 50.0,
        confidence: 0.60,
    },
    ClassificationRow {
        relationship: "unrelated",
        ibs_score_min: 0.0,
        ibs2_pct_min: 0.0,
        confidence: 0.50,
    },
];

/// `(relationship, confidence)` for the given IBS score and IBS2 percentage.
pub fn classify(ibs_score: f64, ibs2_percentage: f64) -> (&'static str, f64) {
    for row in TABLE {
        if ibs_score >= row.ibs_score_min && ibs2_percentage >= row.ibs2_pct_min {
            return (row.relationship, row.confidence);
        }
    }
    // The final row (`unrelated`) has thresholds of 0.0, so this is unreachable
    // for any finite, non-negative score/percentage.
    ("unrelated", 0.50)
}

/// A static, deterministic set of 1-3 human-readable recommendations
/// per relationship label.
pub fn recommendations(relationship: &str) -> Vec<String> {
    let strings: &[&str] = match relationship {
        "identical/twin" => &[
            "Results are consistent with identical twins or the same individual sampled twice.",
            "Consider verifying sample identity if this result is unexpected.",
        ],
        "parent-child" => &[
            "Results are consistent with a direct parent-child relationship.",
            "Consider confirming with additional relatives if a formal record is needed.",
        ],
        "full siblings" => &[
            "Results are consistent with full siblings.",
            "IBS sharing in this range can occasionally overlap with grandparent/aunt/uncle; consider additional relatives to disambiguate.",
        ],
        "grandparent/aunt/uncle" => &[
            "Results are consistent with a second-degree relationship (grandparent, aunt, or uncle).",
            "Testing additional relatives can help narrow down the exact relationship.",
        ],
        "first cousins" => &[
            "Results are consistent with first cousins.",
            "Consider a genetic counselor if this result has health or legal implications.",
        ],
        "second cousins" => &["Results are consistent with second cousins."],
        "third cousins" => &["Results are consistent with third cousins or a more distant relationship."],
        _ => &["No significant genetic relationship was detected between these two users."],
    };
    strings.iter().map(|s| s.to_string()).collect()
}
