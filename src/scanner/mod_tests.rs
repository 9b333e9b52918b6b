use std::fs;
use std::path::Path;

use super::*;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

fn html_filter() -> GlobFilter {
    GlobFilter::new(vec!["html".to_string()], &[]).unwrap()
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn scanner_lists_matching_files_sorted() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("leistungen.html"), "").unwrap();
    fs::write(temp_dir.path().join("index.html"), "").unwrap();
    fs::write(temp_dir.path().join("kontakt.html"), "").unwrap();
    fs::write(temp_dir.path().join("style.css"), "").unwrap();

    let files = DocumentScanner::new(html_filter())
        .scan(temp_dir.path())
        .unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["index.html", "kontakt.html", "leistungen.html"]);
}

#[test]
fn scanner_is_flat_by_default() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("blog")).unwrap();
    fs::write(temp_dir.path().join("blog/post.html"), "").unwrap();
    fs::write(temp_dir.path().join("index.html"), "").unwrap();

    let files = DocumentScanner::new(html_filter())
        .scan(temp_dir.path())
        .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("index.html"));
}

#[test]
fn scanner_descends_when_recursive() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("blog/2024")).unwrap();
    fs::write(temp_dir.path().join("blog/2024/post.html"), "").unwrap();
    fs::write(temp_dir.path().join("index.html"), "").unwrap();

    let files = DocumentScanner::with_recursion(html_filter(), true)
        .scan(temp_dir.path())
        .unwrap();

    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|p| p.ends_with("blog/2024/post.html")));
}

#[test]
fn scanner_skips_directories_named_like_documents() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("folder.html")).unwrap();

    let files = DocumentScanner::new(AcceptAllFilter)
        .scan(temp_dir.path())
        .unwrap();

    assert!(files.is_empty());
}

#[test]
fn scanner_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let files = DocumentScanner::new(html_filter())
        .scan(temp_dir.path())
        .unwrap();

    assert!(files.is_empty());
}

#[test]
fn display_path_strips_current_dir_prefix() {
    assert_eq!(display_path(Path::new("./index.html")), Path::new("index.html"));
    assert_eq!(display_path(Path::new("site/index.html")), Path::new("site/index.html"));
}

#[test]
fn select_targets_keeps_documents_in_order() {
    let exts = vec!["html".to_string()];
    let selected = select_targets(&args(&["b.html", "notes.txt", "a.html", "html"]), &exts);

    assert_eq!(selected, vec![PathBuf::from("b.html"), PathBuf::from("a.html")]);
}

#[test]
fn resolve_documents_prefers_explicit_targets() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("index.html"), "").unwrap();
    let exts = vec!["html".to_string()];

    let resolved = resolve_documents(
        &args(&["only.html"]),
        &exts,
        &DocumentScanner::new(html_filter()),
        temp_dir.path(),
    )
    .unwrap();

    assert_eq!(resolved, vec![PathBuf::from("only.html")]);
}

#[test]
fn resolve_documents_falls_back_to_listing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("index.html"), "").unwrap();
    let exts = vec!["html".to_string()];

    let resolved = resolve_documents(
        &args(&["readme.md"]),
        &exts,
        &DocumentScanner::new(html_filter()),
        temp_dir.path(),
    )
    .unwrap();

    assert_eq!(resolved, vec![temp_dir.path().join("index.html")]);
}
