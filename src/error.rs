use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl RelGuardError {
    /// Short, stable name of the error variant for machine-readable output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::FileWrite { .. } => "FileWrite",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::TomlParse(_) => "TomlParse",
            Self::JsonSerialize(_) => "JsonSerialize",
        }
    }

    /// Full message including the underlying cause, if any.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::FileRead { source, .. } | Self::FileWrite { source, .. } => {
                format!("{self}: {source}")
            }
            Self::InvalidPattern { source, .. } => format!("{self}: {source}"),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
