use std::path::PathBuf;

use cin_table::CinTable;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_fixture_table_without_filtering() {
    let table = CinTable::load(fixture("zhuyin.cin"), &[]).expect("load fixture");
    assert_eq!(table.entry_count(), 8);
    assert_eq!(table.distinct_code_count(), 7);
    assert_eq!(table.code_for('八'), Some("ㄅㄚ"));
    assert_eq!(table.code_for('爸'), Some("ㄅㄚ4"));
    // Directive lines never become entries.
    assert_eq!(table.code_for('%'), None);
}

#[test]
fn loads_fixture_table_with_tone_markers_ignored() {
    let tones: Vec<String> = ["3", "4", "6", "7"].iter().map(|s| s.to_string()).collect();
    let table = CinTable::load(fixture("zhuyin.cin"), &tones).expect("load fixture");
    assert_eq!(table.entry_count(), 8);
    assert_eq!(table.distinct_code_count(), 5);
    assert_eq!(table.code_for('爸'), Some("ㄅㄚ"));
    assert_eq!(table.code_for('馬'), Some("ㄇㄚ"));
    assert_eq!(table.code_for('是'), Some("ㄕ"));
}

#[test]
fn missing_file_reports_io_error() {
    let err = CinTable::load(fixture("missing.cin"), &[]).unwrap_err();
    assert!(err.to_string().contains("mapping table"));
}
