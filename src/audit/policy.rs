use super::link::LinkMatch;

/// Tokens a `rel` value must carry for an external new-tab link.
pub const REQUIRED_REL_TOKENS: [&str; 2] = ["noopener", "noreferrer"];

/// `rel` value inserted into tags that have none.
pub const SECURE_REL: &str = "noopener noreferrer";

const EXTERNAL_PREFIXES: [&str; 3] = ["http://", "https://", "//"];

/// Verdict for a single `target="_blank"` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No `href`, or the link stays on this site.
    Skip,
    Compliant,
    Violation,
}

/// Whether `href` points off-site: absolute `http(s)` or protocol-relative.
#[must_use]
pub fn is_external(href: &str) -> bool {
    let href = href.trim_start();
    EXTERNAL_PREFIXES.iter().any(|prefix| {
        href.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Whether `rel` carries every required token, compared case-insensitively.
#[must_use]
pub fn has_secure_rel(rel: &str) -> bool {
    let tokens: Vec<String> = rel.split_whitespace().map(str::to_lowercase).collect();
    REQUIRED_REL_TOKENS
        .iter()
        .all(|required| tokens.iter().any(|t| t == required))
}

/// Corrected `rel` value for an insufficient one.
///
/// Tokens are lower-cased and deduplicated in first-seen order, then any
/// missing required token is appended, `noopener` before `noreferrer`.
#[must_use]
pub fn secure_rel_value(existing: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for token in existing.split_whitespace().map(str::to_lowercase) {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    for required in REQUIRED_REL_TOKENS {
        if !tokens.iter().any(|t| t == required) {
            tokens.push(required.to_string());
        }
    }
    tokens.join(" ")
}

#[must_use]
pub fn classify(link: &LinkMatch) -> Classification {
    match link.href.as_deref() {
        Some(href) if is_external(href) => {
            if link.rel.as_deref().is_some_and(has_secure_rel) {
                Classification::Compliant
            } else {
                Classification::Violation
            }
        }
        _ => Classification::Skip,
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
