use std::path::Path;

use tracing::info;

use super::LinkAuditor;
use super::types::{AuditMode, RunReport};

impl LinkAuditor {
    /// Audit each document in the given order and collect the results.
    ///
    /// Documents are processed one after another; a failure in one never
    /// stops the others.
    #[must_use]
    pub fn audit_run<P: AsRef<Path>>(&self, paths: &[P], mode: AuditMode) -> RunReport {
        info!(documents = paths.len(), fix = mode.is_fix(), "auditing");

        let documents = paths
            .iter()
            .map(|path| self.audit_document(path.as_ref(), mode))
            .collect();

        RunReport::new(mode, documents)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
