use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{RelGuardError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

pub struct GlobFilter {
    extensions: Vec<String>,
    exclude_patterns: GlobSet,
}

impl GlobFilter {
    /// Create a new filter with the given document extensions and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| RelGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| RelGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            extensions,
            exclude_patterns,
        })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| has_document_extension(name, &self.extensions))
            && !self.is_excluded(path)
    }
}

/// Whether `name` ends in `.<ext>` for one of `extensions`, ignoring ASCII case.
#[must_use]
pub fn has_document_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| {
        let suffix_len = ext.len() + 1;
        name.len() >= suffix_len
            && name
                .get(name.len() - suffix_len..)
                .is_some_and(|suffix| {
                    suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(ext)
                })
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
