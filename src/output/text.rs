use std::fmt::Write;
use std::io::Write as IoWrite;

use crate::audit::{DocumentOutcome, DocumentResult, Issue, RunReport, SECURE_REL};
use crate::error::Result;

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_document(&self, document: &DocumentResult, output: &mut Vec<u8>) {
        let path = document.path.display();
        let line = match &document.outcome {
            DocumentOutcome::Audited { issues } if issues.is_empty() => {
                format!("{} {path}: no issues", self.colorize("✓", ansi::GREEN))
            }
            DocumentOutcome::Audited { issues } => {
                let fixed = document.fixed_count();
                if fixed == issues.len() {
                    format!(
                        "{} {path}: fixed {fixed} issue(s)",
                        self.colorize("✓", ansi::GREEN)
                    )
                } else {
                    format!(
                        "{} {path}: found {} issue(s)",
                        self.colorize("✗", ansi::RED),
                        issues.len()
                    )
                }
            }
            DocumentOutcome::ReadFailed { error } => {
                format!(
                    "{} {path}: error: {}",
                    self.colorize("!", ansi::YELLOW),
                    error.message()
                )
            }
            DocumentOutcome::WriteFailed { issues, error } => {
                format!(
                    "{} {path}: error: {} ({} issue(s) left unresolved)",
                    self.colorize("!", ansi::YELLOW),
                    error.message(),
                    issues.len()
                )
            }
        };
        writeln!(output, "{line}").ok();
    }

    fn format_issue(&self, issue: &Issue, output: &mut Vec<u8>) {
        let status = if issue.is_fixed() {
            self.colorize(issue.status.as_str(), ansi::GREEN)
        } else {
            self.colorize(issue.status.as_str(), ansi::RED)
        };

        writeln!(
            output,
            "  {}:{} [{}] {status}",
            issue.path.display(),
            issue.line,
            issue.severity.as_str()
        )
        .ok();
        writeln!(output, "    href: {}", issue.href).ok();
        writeln!(output, "    rel:  {}", issue.rel_display()).ok();
        writeln!(output, "    {}", issue.message).ok();
    }

    fn format_summary(&self, report: &RunReport) -> String {
        let mut summary = format!(
            "Summary: {} document(s) checked, {} issue(s) found",
            report.documents.len(),
            report.issue_count()
        );
        if report.mode.is_fix() {
            let _ = write!(
                summary,
                ", {} fixed, {} unresolved",
                report.fixed_count(),
                report.open_count()
            );
        }
        let errors = report.error_count();
        if errors > 0 {
            let _ = write!(
                summary,
                ", {} error(s)",
                self.colorize(&errors.to_string(), ansi::YELLOW)
            );
        }
        summary
    }

    fn format_banner(&self, report: &RunReport) -> String {
        if report.all_clear() {
            return self.colorize("✓ PASSED: No issues found.", ansi::GREEN);
        }

        let open = report.open_count();
        if !report.mode.is_fix() {
            let banner = format!(
                "✗ FAILED: {open} insecure link(s) in {} document(s). \
                 Run with --fix to add rel=\"{SECURE_REL}\".",
                report.affected_documents()
            );
            return self.colorize(&banner, ansi::RED);
        }

        if open > 0 {
            let banner = format!(
                "! INCOMPLETE: {} link(s) fixed, {open} could not be written.",
                report.fixed_count()
            );
            return self.colorize(&banner, ansi::YELLOW);
        }

        let banner = format!(
            "✓ FIXED: {} insecure link(s) fixed in {} document(s).",
            report.fixed_count(),
            report.affected_documents()
        );
        self.colorize(&banner, ansi::GREEN)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let mut output: Vec<u8> = Vec::new();

        if report.documents.is_empty() {
            writeln!(output, "No documents to check.").ok();
        }
        for document in &report.documents {
            self.format_document(document, &mut output);
        }

        let issues: Vec<&Issue> = report.issues().collect();
        if !issues.is_empty() {
            writeln!(output).ok();
            writeln!(output, "{}", self.colorize("Issues:", ansi::BOLD)).ok();
            for issue in issues {
                self.format_issue(issue, &mut output);
            }
        }

        writeln!(output).ok();
        writeln!(output, "{}", self.format_summary(report)).ok();
        writeln!(output, "{}", self.format_banner(report)).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
