mod filter;

pub use filter::{FileFilter, GlobFilter, has_document_extension};

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Trait for listing the documents under a directory.
pub trait FileScanner {
    /// Return every matching file under `root`, sorted lexicographically.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Lists documents in a directory: only its direct children by default,
/// the whole tree when recursive.
pub struct DocumentScanner<F: FileFilter> {
    filter: F,
    recursive: bool,
}

impl<F: FileFilter> DocumentScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            recursive: false,
        }
    }

    #[must_use]
    pub const fn with_recursion(filter: F, recursive: bool) -> Self {
        Self { filter, recursive }
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| display_path(e.path()))
            .filter(|p| self.filter.should_include(p))
            .collect();

        files.sort();
        debug!(root = %root.display(), found = files.len(), "listed documents");
        files
    }
}

impl<F: FileFilter> FileScanner for DocumentScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

/// Drop a leading `./` so paths listed from the working directory print
/// the same way as paths given on the command line.
fn display_path(path: &Path) -> PathBuf {
    path.strip_prefix(".").unwrap_or(path).to_path_buf()
}

/// Positional arguments that name documents, in the order given.
///
/// Arguments without one of `extensions` are ignored.
#[must_use]
pub fn select_targets(args: &[String], extensions: &[String]) -> Vec<PathBuf> {
    args.iter()
        .filter(|arg| has_document_extension(arg, extensions))
        .map(PathBuf::from)
        .collect()
}

/// The documents a run should audit: the selected positional targets, or the
/// scanner's listing of `root` when no argument names a document.
///
/// # Errors
/// Returns an error if the directory listing fails.
pub fn resolve_documents(
    args: &[String],
    extensions: &[String],
    scanner: &impl FileScanner,
    root: &Path,
) -> Result<Vec<PathBuf>> {
    let targets = select_targets(args, extensions);
    if targets.is_empty() {
        scanner.scan(root)
    } else {
        Ok(targets)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
