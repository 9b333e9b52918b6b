use std::ops::Range;

use regex::Regex;

/// HTML whitespace as a regex class. ASCII only, so a match start plus one
/// is always a char boundary.
const WS: &str = r"[\t\n\f\r ]";

/// One `<a ...>` opening tag that opens its link in a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Full tag text, from `<a` through the first `>`.
    pub tag: String,
    /// Byte range of `tag` within the scanned text.
    pub span: Range<usize>,
    pub href: Option<String>,
    /// Raw `rel` value as written, before any tokenizing.
    pub rel: Option<String>,
    /// 1-based line of the tag start.
    pub line: usize,
}

impl LinkMatch {
    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }
}

/// Regex-based scanner for `target="_blank"` anchor tags.
///
/// Matching is tag-local: a candidate never extends past the first `>`
/// after its `<a`. Attribute lookups are independent searches inside the
/// matched tag text and the first occurrence of a name wins, so malformed
/// markup is mis-parsed rather than rejected.
pub struct LinkScanner {
    tag_pattern: Regex,
    href_pattern: Regex,
    rel_pattern: Regex,
    target_pattern: Regex,
}

impl Default for LinkScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag_pattern: Regex::new(&format!(
                r#"(?i)<a{WS}(?:[^>]*{WS})?target{WS}*={WS}*(?:"_blank"|'_blank')[^>]*>"#
            ))
            .expect("Invalid regex"),
            href_pattern: attribute_pattern("href"),
            rel_pattern: attribute_pattern("rel"),
            target_pattern: Regex::new(&format!(
                r#"(?i){WS}(?P<attr>target{WS}*={WS}*(?:"_blank"|'_blank'))"#
            ))
            .expect("Invalid regex"),
        }
    }

    /// Find every `target="_blank"` anchor tag in `text`, in document order.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<LinkMatch> {
        let mut matches = Vec::new();
        let mut line = 1;
        let mut counted_to = 0;

        for found in self.tag_pattern.find_iter(text) {
            line += count_newlines(&text[counted_to..found.start()]);
            counted_to = found.start();

            let tag = found.as_str();
            matches.push(LinkMatch {
                tag: tag.to_string(),
                span: found.range(),
                href: attribute_value(&self.href_pattern, tag),
                rel: attribute_value(&self.rel_pattern, tag),
                line,
            });
        }

        matches
    }

    /// Byte range of the first `rel=...` attribute in `tag`, from the attribute
    /// name through the closing quote (or the end of an unquoted value).
    #[must_use]
    pub fn rel_attribute_span(&self, tag: &str) -> Option<Range<usize>> {
        self.rel_pattern
            .captures(tag)
            .and_then(|caps| caps.name("attr"))
            .map(|m| m.range())
    }

    /// Byte offset just past the `target="_blank"` attribute in `tag`,
    /// whichever quote style it uses.
    #[must_use]
    pub fn target_attribute_end(&self, tag: &str) -> Option<usize> {
        self.target_pattern
            .captures(tag)
            .and_then(|caps| caps.name("attr"))
            .map(|m| m.end())
    }
}

fn attribute_value(pattern: &Regex, tag: &str) -> Option<String> {
    let caps = pattern.captures(tag)?;
    caps.name("dq")
        .or_else(|| caps.name("sq"))
        .or_else(|| caps.name("uq"))
        .map(|m| m.as_str().to_string())
}

/// Unquoted values stop before a `/` that closes the tag (`rel=x/>`).
fn attribute_pattern(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i){WS}(?P<attr>{name}{WS}*={WS}*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<uq>(?:[^\t\n\f\r "'>/]|/[^\t\n\f\r "'>])+)))"#
    ))
    .expect("Invalid regex")
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
