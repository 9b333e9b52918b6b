use serde::{Deserialize, Serialize};

/// Extension audited when nothing else is configured.
pub const DEFAULT_EXTENSION: &str = "html";

/// Root of `.rel-guard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Which documents a run picks up when no files are named.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Document extensions, without the dot. A leading dot is tolerated.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns removed from the directory listing.
    /// Files named on the command line are never excluded.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// List subdirectories as well as the working directory itself.
    #[serde(default)]
    pub recursive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
            recursive: false,
        }
    }
}

impl ScanConfig {
    /// Extensions with any leading dot removed.
    #[must_use]
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .collect()
    }
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
