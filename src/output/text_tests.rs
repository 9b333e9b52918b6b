use std::path::{Path, PathBuf};

use super::*;
use crate::audit::{ADVISORY, AuditMode, IssueStatus, Severity};
use crate::error::RelGuardError;

fn make_issue(path: &str, line: usize, rel: Option<&str>, status: IssueStatus) -> Issue {
    Issue {
        path: PathBuf::from(path),
        line,
        href: "https://example.com".to_string(),
        rel: rel.map(str::to_string),
        severity: Severity::Error,
        message: ADVISORY,
        status,
    }
}

fn audited(path: &str, issues: Vec<Issue>) -> DocumentResult {
    DocumentResult::new(Path::new(path), DocumentOutcome::Audited { issues })
}

fn format(report: &RunReport) -> String {
    TextFormatter::new(ColorMode::Never).format(report).unwrap()
}

#[test]
fn clean_run_passes() {
    let report = RunReport::new(AuditMode::Report, vec![audited("index.html", vec![])]);
    let output = format(&report);

    assert!(output.contains("✓ index.html: no issues"));
    assert!(output.contains("Summary: 1 document(s) checked, 0 issue(s) found"));
    assert!(output.contains("✓ PASSED: No issues found."));
    assert!(!output.contains("Issues:"));
}

#[test]
fn empty_run_says_so() {
    let output = format(&RunReport::new(AuditMode::Report, vec![]));

    assert!(output.contains("No documents to check."));
    assert!(output.contains("PASSED: No issues found."));
}

#[test]
fn report_mode_lists_open_issues() {
    let report = RunReport::new(
        AuditMode::Report,
        vec![audited(
            "about.html",
            vec![
                make_issue("about.html", 3, None, IssueStatus::Open),
                make_issue("about.html", 8, Some("nofollow"), IssueStatus::Open),
            ],
        )],
    );
    let output = format(&report);

    assert!(output.contains("✗ about.html: found 2 issue(s)"));
    assert!(output.contains("Issues:"));
    assert!(output.contains("  about.html:3 [error] open"));
    assert!(output.contains("    href: https://example.com"));
    assert!(output.contains("    rel:  (none)"));
    assert!(output.contains("    rel:  nofollow"));
    assert!(output.contains(ADVISORY));
    assert!(output.contains("✗ FAILED: 2 insecure link(s) in 1 document(s)."));
    assert!(output.contains("--fix"));
}

#[test]
fn fix_mode_reports_fixed() {
    let report = RunReport::new(
        AuditMode::Fix,
        vec![
            audited("a.html", vec![make_issue("a.html", 1, None, IssueStatus::Fixed)]),
            audited("b.html", vec![]),
        ],
    );
    let output = format(&report);

    assert!(output.contains("✓ a.html: fixed 1 issue(s)"));
    assert!(output.contains("  a.html:1 [error] fixed"));
    assert!(output.contains("1 fixed, 0 unresolved"));
    assert!(output.contains("✓ FIXED: 1 insecure link(s) fixed in 1 document(s)."));
}

#[test]
fn errors_are_listed_per_document() {
    let report = RunReport::new(
        AuditMode::Fix,
        vec![
            DocumentResult::new(
                Path::new("gone.html"),
                DocumentOutcome::ReadFailed {
                    error: RelGuardError::FileRead {
                        path: PathBuf::from("gone.html"),
                        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                    },
                },
            ),
            DocumentResult::new(
                Path::new("locked.html"),
                DocumentOutcome::WriteFailed {
                    issues: vec![make_issue("locked.html", 2, None, IssueStatus::Open)],
                    error: RelGuardError::FileWrite {
                        path: PathBuf::from("locked.html"),
                        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                    },
                },
            ),
        ],
    );
    let output = format(&report);

    assert!(output.contains("! gone.html: error: Failed to read file: gone.html"));
    assert!(output.contains("! locked.html: error: Failed to write file: locked.html"));
    assert!(output.contains("(1 issue(s) left unresolved)"));
    assert!(output.contains("2 error(s)"));
    assert!(output.contains("! INCOMPLETE: 0 link(s) fixed, 1 could not be written."));
}

#[test]
fn never_mode_has_no_ansi_codes() {
    let report = RunReport::new(
        AuditMode::Report,
        vec![audited("a.html", vec![make_issue("a.html", 1, None, IssueStatus::Open)])],
    );
    assert!(!format(&report).contains('\x1b'));
}

#[test]
fn always_mode_colors_banner() {
    let report = RunReport::new(AuditMode::Report, vec![]);
    let output = TextFormatter::new(ColorMode::Always).format(&report).unwrap();

    assert!(output.contains("\x1b[32m✓ PASSED"));
}
