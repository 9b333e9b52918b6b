//! Detection and repair of `target="_blank"` links that leak `window.opener`.

mod document;
mod link;
mod policy;
mod remediate;
mod run;
mod types;

pub use document::{SourceAudit, write_atomically};
pub use link::{LinkMatch, LinkScanner};
pub use policy::{
    Classification, REQUIRED_REL_TOKENS, SECURE_REL, has_secure_rel, is_external,
    secure_rel_value,
};
pub use types::{
    ADVISORY, AuditMode, DocumentOutcome, DocumentResult, Issue, IssueStatus, RunReport, Severity,
};

/// Scans, classifies and fixes links. Holds only compiled patterns; every
/// operation works on the text or paths it is given.
#[derive(Default)]
pub struct LinkAuditor {
    scanner: LinkScanner,
}

impl LinkAuditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All `target="_blank"` anchor tags in `text`, in document order.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<LinkMatch> {
        self.scanner.scan(text)
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn classify(&self, link: &LinkMatch) -> Classification {
        policy::classify(link)
    }

    /// `text` with `link` rewritten to carry a secure `rel`.
    #[must_use]
    pub fn remediate(&self, link: &LinkMatch, text: &str) -> String {
        remediate::remediate(&self.scanner, link, text)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
