use std::str::FromStr;

use super::*;

#[test]
fn output_format_from_str() {
    assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
}

#[test]
fn output_format_unknown() {
    let err = OutputFormat::from_str("sarif").unwrap_err();
    assert_eq!(err, "Unknown output format: sarif");
}

#[test]
fn output_format_default_is_text() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}
