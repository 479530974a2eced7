use crate::checks::CheckGroup;
use crate::metadata::MetadataRecord;
use std::collections::BTreeSet;

pub const INCONSISTENT_SOFTWARE: &str = "inconsistent_software";
pub const MULTIPLE_EDITORS: &str = "multiple_editors";
pub const METADATA_STRIPPING: &str = "metadata_stripping";
pub const DATE_ANOMALIES: &str = "date_anomalies";

pub const TAMPERING_CHECK_IDS: &[&str] = &[
    INCONSISTENT_SOFTWARE,
    MULTIPLE_EDITORS,
    METADATA_STRIPPING,
    DATE_ANOMALIES,
];

const SOFTWARE_FIELDS: &[&str] = &["Software", "ProcessingSoftware", "CreatorTool"];

// Order matters: a later date sorting before an earlier one is the anomaly.
const DATE_FIELDS: &[&str] = &["DateTimeOriginal", "CreateDate", "ModifyDate"];

// Fewer fields than this on a typed file suggests stripped metadata.
const STRIPPED_FIELD_COUNT: usize = 10;

/// Signals of post-capture editing or metadata stripping. All of these
/// degrade to false on missing or malformed fields.
pub fn check_tampering_indicators(meta: &MetadataRecord) -> CheckGroup {
    let mut group = CheckGroup::new(TAMPERING_CHECK_IDS);

    // inconsistent_software is a reserved id; no rule sets it yet.

    let editors: BTreeSet<String> = SOFTWARE_FIELDS
        .iter()
        .filter_map(|field| meta.get(field))
        .filter(|value| !value.is_falsy())
        .map(|value| value.as_text())
        .collect();
    group.set(MULTIPLE_EDITORS, editors.len() > 2);

    group.set(
        METADATA_STRIPPING,
        meta.len() < STRIPPED_FIELD_COUNT && meta.contains_key("FileType"),
    );

    group.set(DATE_ANOMALIES, date_anomalies(meta));

    group
}

/// Years are the first 4 characters of each date field that looks like a
/// 2020s date; any parse failure resolves to false rather than erroring.
fn date_anomalies(meta: &MetadataRecord) -> bool {
    let dates: Vec<String> = DATE_FIELDS.iter().filter_map(|f| meta.text(f)).collect();
    if dates.len() < 2 {
        return false;
    }

    let mut years: Vec<i32> = Vec::new();
    for date in &dates {
        if date.contains("202") {
            let prefix: String = date.chars().take(4).collect();
            match prefix.trim().parse::<i32>() {
                Ok(year) => years.push(year),
                Err(_) => return false,
            }
        }
    }

    years.len() >= 2 && !years.windows(2).all(|pair| pair[0] <= pair[1])
}
