use academy_track::academics::{evaluate_display, StudentId, SubmissionLogImporter};
use std::io::Cursor;

#[test]
fn an_exported_history_feeds_the_eligibility_report() {
    let csv = "Student ID,Captured At,Uploaded At\n\
s-100,2025-07-15T08:00:00Z,\n\
s-100,,2026-01-15\n\
s-100,2026-07-15T08:00:00Z,\n\
s-100,2027-01-15T08:00:00Z,\n\
s-100,2027-07-15T08:00:00Z,\n\
s-100,2028-01-15T08:00:00Z,\n\
s-100,2028-07-15T08:00:00Z,\n\
s-100,2029-01-15T08:00:00Z,\n\
s-200,2025-07-20T08:00:00Z,\n";

    let import = SubmissionLogImporter::from_reader(Cursor::new(csv)).expect("import parses");
    assert_eq!(import.skipped_rows, 0);

    let history = import.for_student(&StudentId("s-100".to_string()));
    assert_eq!(history.len(), 8);

    let eligibility = evaluate_display(Some("2025 - 2029"), &history);
    assert!(eligibility.certificate_eligible);

    let other = import.for_student(&StudentId("s-200".to_string()));
    let eligibility = evaluate_display(Some("2025 - 2029"), &other);
    assert!(!eligibility.certificate_eligible);
    assert_eq!(eligibility.covered_semesters.len(), 1);
}

#[test]
fn unusable_rows_are_skipped_and_the_span_fails_closed() {
    let csv = "Student ID,Captured At,Uploaded At\n\
s-100,2025-07-15T08:00:00Z,\n\
s-100,,\n";

    let import = SubmissionLogImporter::from_reader(Cursor::new(csv)).expect("import parses");
    assert_eq!(import.records.len(), 1);
    assert_eq!(import.skipped_rows, 1);

    let history = import.for_student(&StudentId("s-100".to_string()));
    let eligibility = evaluate_display(Some("garbage"), &history);
    assert!(!eligibility.certificate_eligible);
}
