use crate::checks::AnalysisChecks;
use serde::{Deserialize, Serialize};

/// Fixed weight of each check group in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupWeights {
    pub integrity: f64,
    pub provenance: f64,
    pub ai: f64,
    pub tampering: f64,
}

/// Inclusive lower bounds of the verdict bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    pub high: f64,
    pub moderate: f64,
    pub low: f64,
}

/// Scoring constants as data. Tuning the weights or bands never requires
/// touching check logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: GroupWeights,
    pub thresholds: VerdictThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            weights: GroupWeights {
                integrity: 0.3,
                provenance: 0.4,
                ai: 0.2,
                tampering: 0.1,
            },
            thresholds: VerdictThresholds {
                high: 80.0,
                moderate: 60.0,
                low: 40.0,
            },
        }
    }
}

/// Weighted authenticity score in [0, 100].
///
/// An all-false provenance group contributes exactly 0 so an image with no
/// manifest at all is never rewarded with a baseline. The tampering group
/// counts against the score, so its ratio is inverted.
pub fn authenticity_score(checks: &AnalysisChecks, config: &ScoringConfig) -> f64 {
    let integrity = checks.integrity.ratio();
    let provenance = if checks.c2pa.none_passed() {
        0.0
    } else {
        checks.c2pa.ratio()
    };
    let ai = checks.ai.ratio();
    let tampering = 1.0 - checks.tampering.ratio();

    let weights = &config.weights;
    let weighted = integrity * weights.integrity
        + provenance * weights.provenance
        + ai * weights.ai
        + tampering * weights.tampering;

    // The weighted sum cannot exceed 1.0; the clamp is a safety net.
    (weighted * 100.0).min(100.0)
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    HIGH_CONFIDENCE_AUTHENTIC,
    MODERATE_CONFIDENCE,
    LOW_CONFIDENCE,
    POTENTIALLY_MANIPULATED,
}

impl Verdict {
    pub fn from_score(score: f64, thresholds: &VerdictThresholds) -> Self {
        if score >= thresholds.high {
            Verdict::HIGH_CONFIDENCE_AUTHENTIC
        } else if score >= thresholds.moderate {
            Verdict::MODERATE_CONFIDENCE
        } else if score >= thresholds.low {
            Verdict::LOW_CONFIDENCE
        } else {
            Verdict::POTENTIALLY_MANIPULATED
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::HIGH_CONFIDENCE_AUTHENTIC => "HIGH_CONFIDENCE_AUTHENTIC",
            Verdict::MODERATE_CONFIDENCE => "MODERATE_CONFIDENCE",
            Verdict::LOW_CONFIDENCE => "LOW_CONFIDENCE",
            Verdict::POTENTIALLY_MANIPULATED => "POTENTIALLY_MANIPULATED",
        }
    }
}
