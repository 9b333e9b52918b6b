#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the rel-guard binary.
#[macro_export]
macro_rules! rel_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("rel-guard"))
    };
}

/// A single external link opening in a new tab with no `rel`.
pub const INSECURE_LINK: &str = r#"<a href="https://example.com" target="_blank">x</a>"#;

/// [`INSECURE_LINK`] after remediation.
pub const SECURED_LINK: &str =
    r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">x</a>"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Reads a file back from the temp directory.
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a `.rel-guard.toml` in the temp directory.
    pub fn create_config(&self, content: &str) {
        self.create_file(".rel-guard.toml", content);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
