//! ATX heading parsing and slugs.

use crate::parser::code_block::CodeSpans;
use crate::types::Heading;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// `## Heading text`; the text is everything after the marker.
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap());

/// Parse all headings from content.
pub fn parse_headings(content: &str) -> Vec<Heading> {
    parse_headings_in(content, &CodeSpans::find(content), 1)
}

/// Parse headings from a document body whose first line is `first_line`
/// of the full document. `code` must be computed over `body`.
pub(crate) fn parse_headings_in(body: &str, code: &CodeSpans, first_line: usize) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut slug_counts: HashMap<String, usize> = HashMap::new();

    for (idx, line) in body.lines().enumerate() {
        if code.contains_line(idx + 1) {
            continue;
        }

        let Some(cap) = HEADING.captures(line) else {
            continue;
        };
        let (Some(hashes), Some(text)) = (cap.get(1), cap.get(2)) else {
            continue;
        };

        let text = text.as_str().trim().to_string();
        let slug = unique_slug(&slugify(&text), &mut slug_counts);

        headings.push(Heading {
            level: hashes.as_str().len() as u8,
            line: first_line + idx,
            slug,
            text,
        });
    }

    headings
}

/// Build a URL-safe slug from heading text.
///
/// Text is NFC-normalized and lowercased. Whitespace becomes `-`, other
/// punctuation except `-` and `_` is dropped, and runs of hyphens collapse.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut last_was_hyphen = false;

    for c in text.nfc() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if (c == '-' || c == '_' || c.is_whitespace()) && !slug.is_empty() {
            if c == '_' {
                slug.push('_');
                last_was_hyphen = false;
            } else if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

fn unique_slug(base: &str, counts: &mut HashMap<String, usize>) -> String {
    let count = counts.entry(base.to_string()).or_insert(0);
    *count += 1;

    if *count == 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, *count - 1)
    }
}

/// Find the heading a link's `#Header` part refers to.
///
/// Tries exact text, then case-insensitive text, then slug.
pub fn find_heading<'a>(headings: &'a [Heading], reference: &str) -> Option<&'a Heading> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    if let Some(h) = headings.iter().find(|h| h.text == reference) {
        return Some(h);
    }

    let lower = reference.to_lowercase();
    if let Some(h) = headings.iter().find(|h| h.text.to_lowercase() == lower) {
        return Some(h);
    }

    let slug = slugify(reference);
    headings.iter().find(|h| h.slug == slug)
}
