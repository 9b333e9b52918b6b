use super::link::{LinkMatch, LinkScanner};
use super::policy::{SECURE_REL, secure_rel_value};

/// Rewrite one violating link inside `text`.
///
/// `link.span` must describe `link.tag` within `text`. Only bytes inside the
/// span change; everything after it shifts by the difference in tag length,
/// so callers fixing several links must go from the highest offset down.
#[must_use]
pub fn remediate(scanner: &LinkScanner, link: &LinkMatch, text: &str) -> String {
    let fixed_tag = secure_tag(scanner, link);

    let mut output = String::with_capacity(text.len() + fixed_tag.len() - link.tag.len());
    output.push_str(&text[..link.start()]);
    output.push_str(&fixed_tag);
    output.push_str(&text[link.end()..]);
    output
}

/// The link's tag with a secure `rel` attribute.
///
/// An existing `rel` is replaced in place and always written double-quoted.
/// A missing one is inserted right after the `target` attribute.
#[must_use]
pub fn secure_tag(scanner: &LinkScanner, link: &LinkMatch) -> String {
    let tag = link.tag.as_str();

    if let Some(rel) = link.rel.as_deref()
        && let Some(span) = scanner.rel_attribute_span(tag)
    {
        let replacement = format!("rel=\"{}\"", secure_rel_value(rel));
        return splice(tag, span.start, span.end, &replacement);
    }

    let insertion = format!(" rel=\"{SECURE_REL}\"");
    let at = scanner
        .target_attribute_end(tag)
        .unwrap_or_else(|| closing_position(tag));
    splice(tag, at, at, &insertion)
}

/// Offset of the tag's closing `>`, or of `/>` for self-closing syntax.
fn closing_position(tag: &str) -> usize {
    let close = tag.len().saturating_sub(1);
    if tag[..close].ends_with('/') {
        close - 1
    } else {
        close
    }
}

fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut output = String::with_capacity(text.len() - (end - start) + replacement.len());
    output.push_str(&text[..start]);
    output.push_str(replacement);
    output.push_str(&text[end..]);
    output
}

#[cfg(test)]
#[path = "remediate_tests.rs"]
mod tests;
