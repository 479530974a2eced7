use crate::checks::{ai_indicators, provenance, tampering, AnalysisChecks};
use crate::metadata::MetadataRecord;
use crate::scoring::Verdict;
use serde::Serialize;
use std::path::Path;

/// Structured result of one image analysis. Created once, never mutated;
/// callers may serialize it but the core does not persist it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub ts_utc: String, // RFC3339 UTC string
    pub image_path: String,
    pub file_size: String,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,
    pub authenticity_score: f64,
    pub verdict: Verdict,
    pub checks: AnalysisChecks,
    pub recommendations: Vec<String>,
}

pub fn build_report(
    image_path: &Path,
    meta: &MetadataRecord,
    score: f64,
    verdict: Verdict,
    checks: AnalysisChecks,
    file_sha256: Option<String>,
) -> Report {
    let recommendations = recommendations(&checks, score);
    Report {
        ts_utc: now_utc_rfc3339(),
        image_path: image_path.display().to_string(),
        file_size: meta.text("FileSize").unwrap_or_else(|| "Unknown".to_string()),
        file_type: meta.text("FileType").unwrap_or_else(|| "Unknown".to_string()),
        file_sha256,
        authenticity_score: score,
        verdict,
        checks,
        recommendations,
    }
}

/// Recommendation rules, evaluated in a fixed order; the list may be empty.
fn recommendations(checks: &AnalysisChecks, score: f64) -> Vec<String> {
    let mut out = Vec::new();

    if score < 60.0 {
        out.push("Exercise caution when using this image".to_string());
    }
    if !checks.c2pa.is_passed(provenance::HAS_C2PA_MANIFEST) {
        out.push("No digital provenance data found".to_string());
    }
    if checks.tampering.is_passed(tampering::MULTIPLE_EDITORS) {
        out.push("Multiple editing tools detected - verify source".to_string());
    }
    if checks.ai.is_passed(ai_indicators::EXPLICIT_AI_CREDIT) && score < 70.0 {
        out.push("AI-generated content - verify intended use".to_string());
    }

    out
}

fn confidence_rating(score: f64) -> &'static str {
    if score >= 80.0 {
        "[EXCELLENT]"
    } else if score >= 60.0 {
        "[GOOD]"
    } else if score >= 40.0 {
        "[CAUTION]"
    } else {
        "[SUSPICIOUS]"
    }
}

/// Fixed-format human-readable rendering, one display line per entry.
pub fn render_report(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("=".repeat(50));
    lines.push("IMAGE AUTHENTICITY REPORT".to_string());
    lines.push("=".repeat(50));

    lines.push(format!(
        "Authenticity Confidence: {} ({:.1}%)",
        confidence_rating(report.authenticity_score),
        report.authenticity_score
    ));
    lines.push(format!("Verdict: {}", report.verdict.as_str()));

    let file_name = Path::new(&report.image_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.image_path.clone());
    lines.push(format!("File: {}", file_name));
    lines.push(format!(
        "Type: {} | Size: {}",
        report.file_type, report.file_size
    ));

    lines.push(String::new());
    lines.push("KEY FINDINGS:".to_string());

    if report.checks.c2pa.is_passed(provenance::HAS_C2PA_MANIFEST) {
        lines.push("[PASS] Digital Provenance: This image has verified origin data".to_string());
    } else {
        lines.push("[FAIL] Digital Provenance: No verified origin data found".to_string());
    }

    if report.checks.ai.any_passed() {
        lines.push("[AI] AI Indicators: Signs of AI generation detected".to_string());
    } else {
        lines.push("[NATURAL] Natural Image: No clear AI generation signs".to_string());
    }

    if report.checks.tampering.any_passed() {
        lines.push("[WARNING] Editing Signs: Possible modifications detected".to_string());
    } else {
        lines.push("[OK] Minimal Editing: No significant alterations found".to_string());
    }

    if !report.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("RECOMMENDATIONS:".to_string());
        for recommendation in &report.recommendations {
            lines.push(format!("* {}", recommendation));
        }
    }

    lines
}

pub fn now_utc_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
