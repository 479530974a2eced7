use imgauth_core::analyzer::ImageAnalyzer;
use imgauth_core::batch::{
    render_batch_index_csv, render_summary, BatchAnalyzer, BatchEntry, BatchSummary,
};
use imgauth_core::checks::AnalysisChecks;
use imgauth_core::error::{CoreError, CoreResult};
use imgauth_core::extract::MetadataSource;
use imgauth_core::metadata::{MetaValue, MetadataRecord};
use imgauth_core::report::{now_utc_rfc3339, Report};
use imgauth_core::scoring::{ScoringConfig, Verdict};
use std::path::Path;

fn synthetic_report(name: &str, score: f64) -> Report {
    let thresholds = ScoringConfig::default().thresholds;
    Report {
        ts_utc: now_utc_rfc3339(),
        image_path: name.to_string(),
        file_size: "Unknown".to_string(),
        file_type: "Unknown".to_string(),
        file_sha256: None,
        authenticity_score: score,
        verdict: Verdict::from_score(score, &thresholds),
        checks: AnalysisChecks::collect(&MetadataRecord::new()),
        recommendations: Vec::new(),
    }
}

#[test]
fn summary_buckets_scores_into_the_four_bands() {
    let entries = vec![
        BatchEntry::Report(synthetic_report("a.jpg", 90.0)),
        BatchEntry::Report(synthetic_report("b.jpg", 50.0)),
        BatchEntry::Report(synthetic_report("c.jpg", 20.0)),
        BatchEntry::Error {
            file_name: "d.jpg".to_string(),
            message: "Failed to analyze d.jpg: boom".to_string(),
        },
    ];
    let thresholds = ScoringConfig::default().thresholds;
    let summary = BatchSummary::from_entries(&entries, &thresholds).unwrap();

    assert_eq!(summary.total_images, 3);
    assert!((summary.average_score - 160.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.score_distribution.high, 1);
    assert_eq!(summary.score_distribution.medium, 0);
    assert_eq!(summary.score_distribution.low, 1);
    assert_eq!(summary.score_distribution.suspicious, 1);
    assert_eq!(summary.c2pa_images, 0);
    assert_eq!(summary.ai_generated_images, 0);

    let lines = render_summary(&summary);
    assert_eq!(lines[0], "=".repeat(60));
    assert_eq!(lines[1], "BATCH ANALYSIS SUMMARY");
    assert!(lines.contains(&"Total Images Analyzed: 3".to_string()));
    assert!(lines.contains(&"Average Authenticity Score: 53.3%".to_string()));
    assert!(lines.contains(&"  High Confidence (80-100%): 1".to_string()));
    assert!(lines.contains(&"  Suspicious (0-39%): 1".to_string()));
}

#[test]
fn summary_is_none_without_valid_reports() {
    let thresholds = ScoringConfig::default().thresholds;
    assert!(BatchSummary::from_entries(&[], &thresholds).is_none());

    let entries = vec![BatchEntry::Error {
        file_name: "a.jpg".to_string(),
        message: "Failed to analyze a.jpg: boom".to_string(),
    }];
    assert!(BatchSummary::from_entries(&entries, &thresholds).is_none());
}

struct NameKeyedSource;

impl MetadataSource for NameKeyedSource {
    fn extract(&self, image_path: &Path) -> CoreResult<MetadataRecord> {
        let name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.contains("broken") {
            return Err(CoreError::Extraction("boom".to_string()));
        }
        let mut meta = MetadataRecord::new();
        meta.insert("FileType", MetaValue::Text("PNG".to_string()));
        meta.insert("FileSize", MetaValue::Text("200 kB".to_string()));
        Ok(meta)
    }
}

fn stub_batch() -> BatchAnalyzer {
    BatchAnalyzer::new(ImageAnalyzer::new(Box::new(NameKeyedSource)))
}

#[test]
fn batch_filters_extensions_and_isolates_failures() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("a.jpg"), b"jpg bytes").unwrap();
    std::fs::write(tmp.path().join("b.PNG"), b"png bytes").unwrap();
    std::fs::write(tmp.path().join("broken.jpeg"), b"bad bytes").unwrap();
    std::fs::write(tmp.path().join("notes.txt"), b"not an image").unwrap();

    let batch = stub_batch();
    let entries = batch.analyze_directory(tmp.path()).unwrap();
    assert_eq!(entries.len(), 3);

    // Sorted file-name order, the text file skipped.
    match &entries[0] {
        BatchEntry::Report(report) => assert!(report.image_path.ends_with("a.jpg")),
        other => panic!("expected report, got {:?}", other),
    }
    match &entries[1] {
        BatchEntry::Report(report) => assert!(report.image_path.ends_with("b.PNG")),
        other => panic!("expected report, got {:?}", other),
    }
    match &entries[2] {
        BatchEntry::Error { file_name, message } => {
            assert_eq!(file_name, "broken.jpeg");
            assert_eq!(
                message,
                "Failed to analyze broken.jpeg: metadata extraction failed: boom"
            );
        }
        other => panic!("expected error entry, got {:?}", other),
    }
}

#[test]
fn batch_output_ends_with_the_summary_block() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("a.jpg"), b"jpg bytes").unwrap();
    std::fs::write(tmp.path().join("broken.jpeg"), b"bad bytes").unwrap();

    let batch = stub_batch();
    let lines = batch.analyze_directory_with_summary(tmp.path()).unwrap();

    assert!(lines.contains(&"IMAGE AUTHENTICITY REPORT".to_string()));
    assert!(lines.contains(
        &"ERROR: Failed to analyze broken.jpeg: metadata extraction failed: boom".to_string()
    ));
    assert!(lines.contains(&"BATCH ANALYSIS SUMMARY".to_string()));
    assert!(lines.contains(&"Total Images Analyzed: 1".to_string()));
}

#[test]
fn empty_directory_reports_no_valid_images() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("notes.txt"), b"not an image").unwrap();

    let batch = stub_batch();
    let lines = batch.analyze_directory_with_summary(tmp.path()).unwrap();
    assert_eq!(lines, vec!["No valid images analyzed".to_string()]);
}

#[test]
fn non_directory_input_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("a.jpg");
    std::fs::write(&file, b"jpg bytes").unwrap();

    let batch = stub_batch();
    let err = batch.analyze_directory(&file).unwrap_err();
    assert!(err.to_string().contains("not a directory"));
}

#[test]
fn csv_index_has_one_row_per_entry() {
    let entries = vec![
        BatchEntry::Report(synthetic_report("photos/a.jpg", 90.0)),
        BatchEntry::Error {
            file_name: "broken.jpeg".to_string(),
            message: "Failed to analyze broken.jpeg: boom".to_string(),
        },
    ];
    let csv = render_batch_index_csv(&entries).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "file,authenticity_score,verdict,has_c2pa_manifest,ai_indicator,error"
    );
    assert_eq!(lines[1], "a.jpg,90.0,HIGH_CONFIDENCE_AUTHENTIC,false,false,");
    assert!(lines[2].starts_with("broken.jpeg,,,,,"));
    assert_eq!(lines.len(), 3);
}
