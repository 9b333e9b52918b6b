//! Semantic checks applied after a configuration has been parsed.

use globset::Glob;

use crate::config::Config;
use crate::error::{RelGuardError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if no extension is configured, an extension is blank,
/// or an exclude pattern is not a valid glob.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    if config.scan.extensions.is_empty() {
        return Err(RelGuardError::Config(
            "scan.extensions must list at least one extension".to_string(),
        ));
    }

    for (i, ext) in config.scan.normalized_extensions().iter().enumerate() {
        if ext.is_empty() {
            return Err(RelGuardError::Config(format!(
                "scan.extensions[{i}] cannot be empty"
            )));
        }
    }

    for pattern in &config.scan.exclude {
        Glob::new(pattern).map_err(|source| RelGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
