use imgauth_core::checks::integrity::{
    check_basic_integrity, CONSISTENT_DATES, HAS_METADATA, REASONABLE_SIZE, VALID_FILE_TYPE,
};
use imgauth_core::metadata::{MetaValue, MetadataRecord};

fn record(pairs: &[(&str, &str)]) -> MetadataRecord {
    let mut meta = MetadataRecord::new();
    for (key, value) in pairs {
        meta.insert(*key, MetaValue::Text((*value).to_string()));
    }
    meta
}

#[test]
fn png_record_with_two_fields_scores_half() {
    let meta = record(&[("FileType", "PNG"), ("FileSize", "200 kB")]);
    let group = check_basic_integrity(&meta);

    assert!(group.is_passed(VALID_FILE_TYPE));
    assert!(group.is_passed(REASONABLE_SIZE));
    assert!(!group.is_passed(HAS_METADATA));
    assert!(!group.is_passed(CONSISTENT_DATES));
    assert_eq!(group.ratio(), 0.5);
}

#[test]
fn file_type_match_is_case_sensitive() {
    let group = check_basic_integrity(&record(&[("FileType", "png")]));
    assert!(!group.is_passed(VALID_FILE_TYPE));

    let group = check_basic_integrity(&record(&[("FileType", "JPEG")]));
    assert!(group.is_passed(VALID_FILE_TYPE));
}

#[test]
fn kilobyte_size_bounds_are_inclusive() {
    for (size, expected) in [
        ("0 kB", false),
        ("1 kB", true),
        ("50000 kB", true),
        ("50001 kB", false),
    ] {
        let group = check_basic_integrity(&record(&[("FileSize", size)]));
        assert_eq!(group.is_passed(REASONABLE_SIZE), expected, "size {}", size);
    }
}

#[test]
fn megabyte_size_bounds_are_inclusive() {
    for (size, expected) in [
        ("2.5 MB", true),
        ("50 MB", true),
        ("100 MB", false),
        ("0.0005 MB", false),
    ] {
        let group = check_basic_integrity(&record(&[("FileSize", size)]));
        assert_eq!(group.is_passed(REASONABLE_SIZE), expected, "size {}", size);
    }
}

#[test]
fn unrecognized_size_unit_fails() {
    let group = check_basic_integrity(&record(&[("FileSize", "12345 bytes")]));
    assert!(!group.is_passed(REASONABLE_SIZE));

    let group = check_basic_integrity(&record(&[("FileSize", "abc kB")]));
    assert!(!group.is_passed(REASONABLE_SIZE));

    let group = check_basic_integrity(&MetadataRecord::new());
    assert!(!group.is_passed(REASONABLE_SIZE));
}

#[test]
fn has_metadata_boundary_is_five_fields() {
    let mut meta = MetadataRecord::new();
    for i in 0..5 {
        meta.insert(format!("Field{}", i), MetaValue::Text("x".to_string()));
    }
    assert!(!check_basic_integrity(&meta).is_passed(HAS_METADATA));

    meta.insert("Field5", MetaValue::Text("x".to_string()));
    assert!(check_basic_integrity(&meta).is_passed(HAS_METADATA));
}

#[test]
fn consistent_dates_needs_at_least_two_fields() {
    let group = check_basic_integrity(&record(&[("FileModifyDate", "2024:01:05 10:00:00")]));
    assert!(!group.is_passed(CONSISTENT_DATES));
}

#[test]
fn consistent_dates_requires_every_date_in_the_decade() {
    let group = check_basic_integrity(&record(&[
        ("FileModifyDate", "2024:01:05 10:00:00"),
        ("FileCreateDate", "2023:12:31 09:00:00"),
    ]));
    assert!(group.is_passed(CONSISTENT_DATES));

    let group = check_basic_integrity(&record(&[
        ("FileModifyDate", "2024:01:05 10:00:00"),
        ("DateTimeOriginal", "1999:06:01 12:00:00"),
    ]));
    assert!(!group.is_passed(CONSISTENT_DATES));
}
