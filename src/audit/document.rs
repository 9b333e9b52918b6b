use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{RelGuardError, Result};

use super::LinkAuditor;
use super::policy::{Classification, classify};
use super::remediate::remediate;
use super::types::{AuditMode, DocumentOutcome, DocumentResult, Issue, IssueStatus};

/// Result of auditing text already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAudit {
    /// Findings in document order.
    pub issues: Vec<Issue>,
    /// Rewritten text; `Some` only in fix mode when something changed.
    pub rewritten: Option<String>,
}

impl LinkAuditor {
    /// Audit `source`, attributing findings to `path`. Performs no I/O.
    ///
    /// Matches are visited from the last one to the first, so each rewrite
    /// only moves bytes after offsets that are still to be processed.
    #[must_use]
    pub fn audit_source(&self, path: &Path, source: &str, mode: AuditMode) -> SourceAudit {
        let mut working: Option<String> = None;
        let mut issues = Vec::new();

        for link in self.scan(source).iter().rev() {
            if classify(link) != Classification::Violation {
                continue;
            }
            debug!(
                path = %path.display(),
                line = link.line,
                href = link.href.as_deref().unwrap_or_default(),
                "insecure target=_blank link"
            );

            let mut issue = Issue::from_link(path, link);
            if mode.is_fix() {
                let current = working.as_deref().unwrap_or(source);
                working = Some(remediate(&self.scanner, link, current));
                issue.status = IssueStatus::Fixed;
            }
            issues.push(issue);
        }

        issues.reverse();
        SourceAudit {
            issues,
            rewritten: working,
        }
    }

    /// Read, audit and, in fix mode, rewrite one document.
    ///
    /// Failures are captured in the returned outcome so a run can go on
    /// with the remaining documents.
    #[must_use]
    pub fn audit_document(&self, path: &Path, mode: AuditMode) -> DocumentResult {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(source) => {
                let error = RelGuardError::FileRead {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("{}", error.message());
                return DocumentResult::new(path, DocumentOutcome::ReadFailed { error });
            }
        };

        let SourceAudit {
            mut issues,
            rewritten,
        } = self.audit_source(path, &source, mode);

        if let Some(text) = rewritten {
            if let Err(error) = write_atomically(path, &text) {
                warn!("{}", error.message());
                for issue in &mut issues {
                    issue.status = IssueStatus::Open;
                }
                return DocumentResult::new(path, DocumentOutcome::WriteFailed { issues, error });
            }
            info!(path = %path.display(), fixed = issues.len(), "rewrote document");
        }

        DocumentResult::new(path, DocumentOutcome::Audited { issues })
    }
}

/// Replace `path` with `contents` via a sibling temp file and a rename, so
/// readers never observe a partially written document.
///
/// A symlinked `path` is resolved first: the temp file goes next to the link
/// target and replaces it, leaving the link itself in place.
///
/// # Errors
/// Returns `FileWrite` if the temp file cannot be written or renamed.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let target = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let temp_path = temp_path_for(&target);
    let to_write_error = |source: std::io::Error| {
        let _ = fs::remove_file(&temp_path);
        RelGuardError::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    };

    fs::write(&temp_path, contents).map_err(to_write_error)?;

    if let Ok(metadata) = fs::metadata(&target) {
        // Keep the original mode bits.
        let _ = fs::set_permissions(&temp_path, metadata.permissions());
    }

    fs::rename(&temp_path, &target).map_err(to_write_error)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map_or_else(|| "document".into(), |name| name.to_string_lossy());
    path.with_file_name(format!(".{file_name}.rel-guard.tmp"))
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
