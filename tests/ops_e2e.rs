use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use corpus_tools::{AppError, Operation, Outcome, Request, run};

fn request(operation: Operation, primary: PathBuf) -> Request {
    Request {
        operation,
        primary,
        secondary: None,
        ignore_markers: Vec::new(),
        json: false,
        seed: None,
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn written_path(outcome: Outcome) -> PathBuf {
    match outcome {
        Outcome::Written(path) => path,
        other => panic!("expected written file, got {other:?}"),
    }
}

fn report_text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Report(report) => report,
        other => panic!("expected report, got {other:?}"),
    }
}

#[test]
fn unique_writes_first_occurrence_order_to_derived_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "corpus.txt", "b\na\n\nb\n a \nc\n");

    let outcome = run(&request(Operation::Unique, input)).unwrap();
    let path = written_path(outcome);
    assert_eq!(path, dir.path().join("corpus_unique.txt"));
    assert_eq!(fs::read_to_string(path).unwrap(), "b\na\nc");
}

#[test]
fn sort_writes_code_point_order() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "lines.txt", "pear\nfig\napple\nfig\n");

    let path = written_path(run(&request(Operation::Sort, input)).unwrap());
    assert_eq!(path, dir.path().join("lines_sort.txt"));
    assert_eq!(fs::read_to_string(path).unwrap(), "apple\nfig\npear");
}

#[test]
fn shuffle_is_a_permutation_and_reproducible_per_seed() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "lines.txt", "a\nb\nc\nd\ne\n");

    let mut req = request(Operation::Shuffle, input);
    req.seed = Some(11);
    let first = fs::read_to_string(written_path(run(&req).unwrap())).unwrap();
    let second = fs::read_to_string(written_path(run(&req).unwrap())).unwrap();
    assert_eq!(first, second);

    let mut lines: Vec<&str> = first.split('\n').collect();
    lines.sort();
    assert_eq!(lines, ["a", "b", "c", "d", "e"]);
}

#[test]
fn directory_input_walks_only_txt_files_in_stable_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.txt", "from-b\n");
    write(dir.path(), "a.txt", "from-a\n");
    write(dir.path(), "skip.csv", "from-csv\n");
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(&dir.path().join("sub"), "c.txt", "from-c\n");

    let path = written_path(run(&request(Operation::Unique, dir.path().to_path_buf())).unwrap());
    let content = fs::read_to_string(path).unwrap();
    assert_eq!(content, "from-a\nfrom-b\nfrom-c");
}

#[test]
fn combine_writes_normalized_corpus_to_all_txt() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "one\ntwo\n");
    write(dir.path(), "b.txt", "two\nthree\n");

    // combine targets all.txt in the working directory.
    std::env::set_current_dir(dir.path()).unwrap();
    let path = written_path(run(&request(Operation::Combine, dir.path().to_path_buf())).unwrap());
    assert_eq!(path, PathBuf::from("all.txt"));
    let content = fs::read_to_string(dir.path().join("all.txt")).unwrap();
    assert_eq!(content, "one\ntwo\nthree");
}

#[test]
fn find_duplicates_reports_provenance_across_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "x\ny\n");
    write(dir.path(), "b.txt", "y\nz\n");

    let report = report_text(
        run(&request(Operation::FindDuplicates, dir.path().to_path_buf())).unwrap(),
    );
    assert!(report.contains("4 sentences across all files, 3 distinct"));
    assert!(report.contains("2 unique, 1 duplicated in more than one file (33.3%)"));
    assert!(report.contains("2x y [a.txt, b.txt]"));
}

#[test]
fn find_duplicates_emits_json_when_asked() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "x\ny\n");
    write(dir.path(), "b.txt", "y\n");

    let mut req = request(Operation::FindDuplicates, dir.path().to_path_buf());
    req.json = true;
    let report = report_text(run(&req).unwrap());
    let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid json");
    assert_eq!(parsed["duplicate_count"], 1);
    assert_eq!(parsed["records"][0]["sentence"], "y");
    assert_eq!(parsed["records"][0]["sources"][0], "a.txt");
}

#[test]
fn phonetic_coverage_reports_table_and_corpus_stats() {
    let dir = TempDir::new().unwrap();
    let corpus = write(dir.path(), "corpus.txt", "xy\n");
    let table = write(dir.path(), "table.cin", "AB3 x\nCD4 y\nEF3 z\nGH w\n");

    let mut req = request(Operation::PhoneticCoverage, corpus);
    req.secondary = Some(table);
    req.ignore_markers = vec!["3".into(), "4".into()];
    let report = report_text(run(&req).unwrap());
    // Codes after tone stripping: AB, CD, EF, GH; corpus reaches AB and CD.
    assert!(report.contains("table defines 4 distinct phonetic codes"));
    assert!(report.contains("corpus uses 2 distinct characters (0 without a table entry)"));
    assert!(report.contains("2 codes reached: 50.00% of the pronunciations covered"));
}

#[test]
fn char_coverage_reports_present_and_missing() {
    let dir = TempDir::new().unwrap();
    let corpus = write(dir.path(), "corpus.txt", "abc\n");
    let reference = write(dir.path(), "reference.txt", "acd\n");

    let mut req = request(Operation::CharCoverage, corpus);
    req.secondary = Some(reference);
    let report = report_text(run(&req).unwrap());
    assert!(report.contains("present in corpus: 2 (66.7%)"));
    assert!(report.contains("missing from corpus: 1 (33.3%)"));
    assert!(report.contains("missing: d"));
}

#[test]
fn empty_input_is_a_distinct_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "empty.txt", "\n  \n\n");

    let err = run(&request(Operation::Unique, input)).unwrap_err();
    assert!(matches!(err, AppError::EmptyContent { .. }));
    assert!(!dir.path().join("empty_unique.txt").exists());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = run(&request(Operation::Unique, dir.path().join("nope.txt"))).unwrap_err();
    assert!(matches!(err, AppError::Io { .. }));
}

#[test]
fn missing_secondary_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let corpus = write(dir.path(), "corpus.txt", "abc\n");
    let err = run(&request(Operation::PhoneticCoverage, corpus)).unwrap_err();
    assert!(matches!(err, AppError::Usage(_)));
}
