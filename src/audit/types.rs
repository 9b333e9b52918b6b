use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::RelGuardError;
use crate::{EXIT_SUCCESS, EXIT_VIOLATIONS};

use super::link::LinkMatch;

/// Advisory attached to every finding.
pub const ADVISORY: &str = "External link opens in a new tab without rel=\"noopener noreferrer\"; \
     the opened page can access window.opener and receives the referrer";

/// Whether violations are only reported or also rewritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditMode {
    #[default]
    Report,
    Fix,
}

impl AuditMode {
    #[must_use]
    pub const fn from_fix_flag(fix: bool) -> Self {
        if fix { Self::Fix } else { Self::Report }
    }

    #[must_use]
    pub const fn is_fix(self) -> bool {
        matches!(self, Self::Fix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Fixed,
}

impl IssueStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Fixed => "fixed",
        }
    }
}

/// An external `target="_blank"` link without a secure `rel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: PathBuf,
    pub line: usize,
    pub href: String,
    /// `rel` value as found, `None` when the attribute was absent.
    pub rel: Option<String>,
    pub severity: Severity,
    pub message: &'static str,
    pub status: IssueStatus,
}

impl Issue {
    #[must_use]
    pub fn from_link(path: &Path, link: &LinkMatch) -> Self {
        Self {
            path: path.to_path_buf(),
            line: link.line,
            href: link.href.clone().unwrap_or_default(),
            rel: link.rel.clone(),
            severity: Severity::Error,
            message: ADVISORY,
            status: IssueStatus::Open,
        }
    }

    /// The original `rel` value, or `(none)` when it was absent.
    #[must_use]
    pub fn rel_display(&self) -> &str {
        self.rel.as_deref().unwrap_or("(none)")
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.status == IssueStatus::Fixed
    }
}

/// What happened to one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// Read (and, in fix mode, rewritten if needed) successfully.
    Audited { issues: Vec<Issue> },
    /// The document could not be read; nothing was audited.
    ReadFailed { error: RelGuardError },
    /// Fixes were computed but could not be persisted; every issue stays open.
    WriteFailed {
        issues: Vec<Issue>,
        error: RelGuardError,
    },
}

#[derive(Debug)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub outcome: DocumentOutcome,
}

impl DocumentResult {
    #[must_use]
    pub fn new(path: &Path, outcome: DocumentOutcome) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome,
        }
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match &self.outcome {
            DocumentOutcome::Audited { issues } | DocumentOutcome::WriteFailed { issues, .. } => {
                issues
            }
            DocumentOutcome::ReadFailed { .. } => &[],
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&RelGuardError> {
        match &self.outcome {
            DocumentOutcome::Audited { .. } => None,
            DocumentOutcome::ReadFailed { error } | DocumentOutcome::WriteFailed { error, .. } => {
                Some(error)
            }
        }
    }

    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.issues().iter().filter(|i| i.is_fixed()).count()
    }
}

/// Aggregate over every audited document, in input order.
#[derive(Debug)]
pub struct RunReport {
    pub mode: AuditMode,
    pub documents: Vec<DocumentResult>,
}

impl RunReport {
    #[must_use]
    pub const fn new(mode: AuditMode, documents: Vec<DocumentResult>) -> Self {
        Self { mode, documents }
    }

    /// Every issue across all documents, document by document.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.documents.iter().flat_map(DocumentResult::issues)
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues().count()
    }

    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.issues().filter(|i| i.is_fixed()).count()
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.issue_count() - self.fixed_count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.documents.iter().filter(|d| d.error().is_some()).count()
    }

    /// Number of documents with at least one issue.
    #[must_use]
    pub fn affected_documents(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| !d.issues().is_empty())
            .count()
    }

    /// No violations were found in any document. Read and write failures
    /// are reported separately and do not count.
    #[must_use]
    pub fn all_clear(&self) -> bool {
        self.issue_count() == 0
    }

    /// Fix mode always exits successfully; report mode fails on any finding.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.mode.is_fix() || self.all_clear() {
            EXIT_SUCCESS
        } else {
            EXIT_VIOLATIONS
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
