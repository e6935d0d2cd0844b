//! Fatal error reports.

use berd_cli::report::{fatal_report, location};
use berd_core::text::{LineMap, TextSpan};
use berd_diagnostics::{messages, Diagnostic};

#[test]
fn test_report_labels_the_span() {
    let source = "const const x = 5";
    let report = fatal_report(
        "main.bd",
        source,
        "Expected Exclamation but received EndOfFile instead",
        Some(1005),
        Some(TextSpan::new(4, 2)),
    );
    assert_eq!(
        report.to_string(),
        "Expected Exclamation but received EndOfFile instead"
    );
    assert_eq!(report.code().map(|code| code.to_string()), Some("BD1005".to_string()));

    let labels: Vec<_> = report.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 4);
    assert_eq!(labels[0].len(), 2);
}

#[test]
fn test_span_past_the_end_is_clamped() {
    let report = fatal_report("main.bd", "abc", "boom", None, Some(TextSpan::new(10, 5)));
    let labels: Vec<_> = report.labels().unwrap().collect();
    assert_eq!(labels[0].offset(), 3);
    assert_eq!(labels[0].len(), 0);
    assert!(report.code().is_none());
}

#[test]
fn test_report_without_span_has_no_labels() {
    let report = fatal_report("main.bd", "abc", "Cannot resolve y as it doesn't exist.", None, None);
    assert!(report.labels().is_none());
}

#[test]
fn test_location_uses_line_and_column() {
    let source = "x!\r\n  'abc";
    let map = LineMap::new(source);
    let diag = Diagnostic::with_span(
        TextSpan::new(6, 4),
        &messages::UNTERMINATED_STRING_LITERAL,
        &[],
    );
    assert_eq!(location(&diag, &map), None);

    let diag = diag.in_file("main.bd");
    assert_eq!(location(&diag, &map), Some("main.bd(2,3)".to_string()));
}
