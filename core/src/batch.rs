use crate::analyzer::ImageAnalyzer;
use crate::checks::provenance;
use crate::error::{CoreError, CoreResult};
use crate::report::{render_report, Report};
use crate::scoring::VerdictThresholds;
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp"];

/// Outcome of one file in a batch. A failed file becomes an error entry;
/// it never aborts the rest of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Report(Report),
    Error { file_name: String, message: String },
}

/// Aggregate over the successfully analyzed reports of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_images: usize,
    pub average_score: f64,
    pub score_distribution: ScoreDistribution,
    pub c2pa_images: usize,
    pub ai_generated_images: usize,
}

/// Histogram over the four verdict bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub suspicious: usize,
}

impl BatchSummary {
    /// None when the batch produced no valid report.
    pub fn from_entries(entries: &[BatchEntry], thresholds: &VerdictThresholds) -> Option<Self> {
        let reports: Vec<&Report> = entries
            .iter()
            .filter_map(|entry| match entry {
                BatchEntry::Report(report) => Some(report),
                BatchEntry::Error { .. } => None,
            })
            .collect();
        if reports.is_empty() {
            return None;
        }

        let mut distribution = ScoreDistribution::default();
        let mut c2pa_images = 0;
        let mut ai_generated_images = 0;
        let mut score_sum = 0.0;

        for report in &reports {
            let score = report.authenticity_score;
            score_sum += score;

            if score >= thresholds.high {
                distribution.high += 1;
            } else if score >= thresholds.moderate {
                distribution.medium += 1;
            } else if score >= thresholds.low {
                distribution.low += 1;
            } else {
                distribution.suspicious += 1;
            }

            if report.checks.c2pa.is_passed(provenance::HAS_C2PA_MANIFEST) {
                c2pa_images += 1;
            }
            if report.checks.ai.any_passed() {
                ai_generated_images += 1;
            }
        }

        Some(BatchSummary {
            total_images: reports.len(),
            average_score: score_sum / reports.len() as f64,
            score_distribution: distribution,
            c2pa_images,
            ai_generated_images,
        })
    }
}

pub fn render_summary(summary: &BatchSummary) -> Vec<String> {
    vec![
        "=".repeat(60),
        "BATCH ANALYSIS SUMMARY".to_string(),
        "=".repeat(60),
        format!("Total Images Analyzed: {}", summary.total_images),
        format!("Average Authenticity Score: {:.1}%", summary.average_score),
        format!("C2PA-Enabled Images: {}", summary.c2pa_images),
        format!("AI-Generated Images: {}", summary.ai_generated_images),
        "Score Distribution:".to_string(),
        format!(
            "  High Confidence (80-100%): {}",
            summary.score_distribution.high
        ),
        format!(
            "  Medium Confidence (60-79%): {}",
            summary.score_distribution.medium
        ),
        format!(
            "  Low Confidence (40-59%): {}",
            summary.score_distribution.low
        ),
        format!(
            "  Suspicious (0-39%): {}",
            summary.score_distribution.suspicious
        ),
    ]
}

/// Applies one analyzer to every image in a directory.
pub struct BatchAnalyzer {
    analyzer: ImageAnalyzer,
}

impl BatchAnalyzer {
    pub fn new(analyzer: ImageAnalyzer) -> Self {
        BatchAnalyzer { analyzer }
    }

    /// Analyzes every image file directly under `dir`, in sorted name order
    /// so repeated runs produce identical output.
    pub fn analyze_directory(&self, dir: &Path) -> CoreResult<Vec<BatchEntry>> {
        if !dir.is_dir() {
            return Err(CoreError::InvalidInput(format!(
                "not a directory: {}",
                dir.display()
            )));
        }

        let mut entries = Vec::new();
        for walked in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let walked = walked.map_err(|e| CoreError::Io(e.into()))?;
            if !walked.file_type().is_file() || !is_image_file(walked.path()) {
                continue;
            }

            let file_name = walked.file_name().to_string_lossy().into_owned();
            match self.analyzer.analyze(walked.path()) {
                Ok(report) => entries.push(BatchEntry::Report(report)),
                Err(e) => {
                    log::warn!("batch entry failed: {}: {}", file_name, e);
                    entries.push(BatchEntry::Error {
                        message: format!("Failed to analyze {}: {}", file_name, e),
                        file_name,
                    });
                }
            }
        }
        Ok(entries)
    }

    /// Per-file report blocks followed by the batch summary block.
    pub fn analyze_directory_with_summary(&self, dir: &Path) -> CoreResult<Vec<String>> {
        let entries = self.analyze_directory(dir)?;

        let mut lines = Vec::new();
        for entry in &entries {
            match entry {
                BatchEntry::Report(report) => {
                    lines.extend(render_report(report));
                    lines.push(String::new());
                }
                BatchEntry::Error { message, .. } => {
                    lines.push(format!("ERROR: {}", message));
                }
            }
        }

        match BatchSummary::from_entries(&entries, &self.analyzer.config().thresholds) {
            Some(summary) => lines.extend(render_summary(&summary)),
            None => lines.push("No valid images analyzed".to_string()),
        }
        Ok(lines)
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// One CSV row per batch entry, for spreadsheet triage of a large batch.
pub fn render_batch_index_csv(entries: &[BatchEntry]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "file",
        "authenticity_score",
        "verdict",
        "has_c2pa_manifest",
        "ai_indicator",
        "error",
    ])?;
    for entry in entries {
        match entry {
            BatchEntry::Report(report) => {
                let file_name = Path::new(&report.image_path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| report.image_path.clone());
                wtr.write_record([
                    file_name,
                    format!("{:.1}", report.authenticity_score),
                    report.verdict.as_str().to_string(),
                    report
                        .checks
                        .c2pa
                        .is_passed(provenance::HAS_C2PA_MANIFEST)
                        .to_string(),
                    report.checks.ai.any_passed().to_string(),
                    String::new(),
                ])?;
            }
            BatchEntry::Error { file_name, message } => {
                wtr.write_record([
                    file_name.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    message.clone(),
                ])?;
            }
        }
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
