use crate::checks::AnalysisChecks;
use crate::error::CoreResult;
use crate::extract::MetadataSource;
use crate::report::{build_report, render_report, Report};
use crate::scoring::{authenticity_score, ScoringConfig, Verdict};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Runs the full analysis pipeline for one image: extraction, the four
/// check groups, scoring, and report assembly.
pub struct ImageAnalyzer {
    source: Box<dyn MetadataSource>,
    config: ScoringConfig,
}

impl ImageAnalyzer {
    pub fn new(source: Box<dyn MetadataSource>) -> Self {
        ImageAnalyzer {
            source,
            config: ScoringConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze(&self, image_path: &Path) -> CoreResult<Report> {
        log::info!("analyzing image: {}", image_path.display());

        let meta = self.source.extract(image_path)?;
        let checks = AnalysisChecks::collect(&meta);
        let score = authenticity_score(&checks, &self.config);
        let verdict = Verdict::from_score(score, &self.config.thresholds);
        let file_sha256 = file_sha256(image_path);

        Ok(build_report(
            image_path,
            &meta,
            score,
            verdict,
            checks,
            file_sha256,
        ))
    }

    /// Analysis plus text rendering; a failure becomes a single error line
    /// instead of propagating.
    pub fn analyze_and_format(&self, image_path: &Path) -> Vec<String> {
        match self.analyze(image_path) {
            Ok(report) => render_report(&report),
            Err(e) => vec![format!("Error: {}", e)],
        }
    }

    /// One-line triage verdict.
    pub fn quick_check(&self, image_path: &Path) -> String {
        match self.analyze(image_path) {
            Err(e) => format!("Error analyzing image: {}", e),
            Ok(report) => {
                let score = report.authenticity_score;
                if score >= 70.0 {
                    format!("PASS: Likely Authentic ({:.1}%)", score)
                } else if score >= 50.0 {
                    format!("WARNING: Use with Caution ({:.1}%)", score)
                } else {
                    format!("FAIL: Potential Issues ({:.1}%)", score)
                }
            }
        }
    }
}

// Best-effort digest of the analyzed bytes; an unreadable file just leaves
// the report without one.
fn file_sha256(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Some(hex::encode(hasher.finalize()))
}
