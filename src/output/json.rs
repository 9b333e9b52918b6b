use serde::Serialize;

use crate::audit::{DocumentOutcome, DocumentResult, Issue, IssueStatus, RunReport, Severity};
use crate::error::Result;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    documents: Vec<DocumentEntry<'a>>,
}

#[derive(Serialize)]
struct Summary {
    mode: &'static str,
    documents: usize,
    issues: usize,
    fixed: usize,
    open: usize,
    errors: usize,
    all_clear: bool,
}

#[derive(Serialize)]
struct DocumentEntry<'a> {
    path: String,
    status: &'static str,
    issues: Vec<IssueEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorEntry>,
}

#[derive(Serialize)]
struct IssueEntry<'a> {
    line: usize,
    href: &'a str,
    rel: Option<&'a str>,
    severity: Severity,
    status: IssueStatus,
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorEntry {
    kind: &'static str,
    message: String,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                mode: if report.mode.is_fix() { "fix" } else { "report" },
                documents: report.documents.len(),
                issues: report.issue_count(),
                fixed: report.fixed_count(),
                open: report.open_count(),
                errors: report.error_count(),
                all_clear: report.all_clear(),
            },
            documents: report.documents.iter().map(convert_document).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)? + "\n")
    }
}

const fn document_status(document: &DocumentResult) -> &'static str {
    match &document.outcome {
        DocumentOutcome::Audited { .. } => "audited",
        DocumentOutcome::ReadFailed { .. } => "read_failed",
        DocumentOutcome::WriteFailed { .. } => "write_failed",
    }
}

fn convert_document(document: &DocumentResult) -> DocumentEntry<'_> {
    DocumentEntry {
        path: document.path.display().to_string(),
        status: document_status(document),
        issues: document.issues().iter().map(convert_issue).collect(),
        error: document.error().map(|error| ErrorEntry {
            kind: error.error_type(),
            message: error.message(),
        }),
    }
}

fn convert_issue(issue: &Issue) -> IssueEntry<'_> {
    IssueEntry {
        line: issue.line,
        href: &issue.href,
        rel: issue.rel.as_deref(),
        severity: issue.severity,
        status: issue.status,
        message: issue.message,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
