use crate::checks::CheckGroup;
use crate::metadata::MetadataRecord;

pub const VALID_FILE_TYPE: &str = "valid_file_type";
pub const REASONABLE_SIZE: &str = "reasonable_size";
pub const HAS_METADATA: &str = "has_metadata";
pub const CONSISTENT_DATES: &str = "consistent_dates";

pub const INTEGRITY_CHECK_IDS: &[&str] = &[
    VALID_FILE_TYPE,
    REASONABLE_SIZE,
    HAS_METADATA,
    CONSISTENT_DATES,
];

const ACCEPTED_FILE_TYPES: &[&str] = &["PNG", "JPEG", "JPG", "TIFF"];

const DATE_FIELDS: &[&str] = &["FileModifyDate", "FileCreateDate", "DateTimeOriginal"];

// A record with more fields than this is considered to carry real metadata.
const MIN_FIELD_COUNT: usize = 5;

/// Basic file-sanity signals: recorded type, plausible size, metadata
/// presence, and a crude decade check across the recorded dates.
pub fn check_basic_integrity(meta: &MetadataRecord) -> CheckGroup {
    let mut group = CheckGroup::new(INTEGRITY_CHECK_IDS);

    if let Some(file_type) = meta.text("FileType") {
        group.set(
            VALID_FILE_TYPE,
            ACCEPTED_FILE_TYPES.contains(&file_type.as_str()),
        );
    }

    if let Some(size) = meta.text("FileSize") {
        group.set(REASONABLE_SIZE, reasonable_size(&size));
    }

    group.set(HAS_METADATA, meta.len() > MIN_FIELD_COUNT);

    let dates: Vec<String> = DATE_FIELDS.iter().filter_map(|f| meta.text(f)).collect();
    if dates.len() >= 2 {
        // Decade-plausibility only, not date parsing. Known weakness kept
        // for parity with the reference behavior.
        group.set(CONSISTENT_DATES, dates.iter().all(|d| d.contains("202")));
    }

    group
}

/// ExifTool reports sizes as e.g. "200 kB" or "2.5 MB". Unrecognized units
/// and unparsable magnitudes fail the check rather than erroring.
fn reasonable_size(size: &str) -> bool {
    if size.contains("kB") {
        let magnitude = size.split(" kB").next().unwrap_or("");
        match magnitude.trim().parse::<i64>() {
            Ok(kb) => (1..=50_000).contains(&kb),
            Err(_) => false,
        }
    } else if size.contains("MB") {
        let magnitude = size.split(" MB").next().unwrap_or("");
        match magnitude.trim().parse::<f64>() {
            Ok(mb) => (0.001..=50.0).contains(&mb),
            Err(_) => false,
        }
    } else {
        false
    }
}
