//! Wikilink and embed parsing.

use crate::parser::code_block::{CodeSpans, line_of};
use crate::types::Link;
use regex::Regex;
use std::sync::LazyLock;

// [[target]], [[target|alias]], [[target#heading]], [[target#heading|alias]],
// each optionally prefixed with ! for embeds.
//
// (!?)              - embed marker (group 1)
// ([^\]\|#]+)       - target (group 2)
// (?:#([^\]\|]+))?  - heading (group 3)
// (?:\|([^\]]+))?   - alias (group 4)
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]\|#]+)(?:#([^\]\|]+))?(?:\|([^\]]+))?\]\]").unwrap()
});

/// Parse all wikilinks and embeds from content, in document order.
pub fn parse_links(content: &str) -> Vec<Link> {
    parse_links_with_spans(content, &CodeSpans::find(content))
}

pub(crate) fn parse_links_with_spans(content: &str, code: &CodeSpans) -> Vec<Link> {
    let mut links = Vec::new();

    for cap in WIKILINK.captures_iter(content) {
        let Some(whole) = cap.get(0) else { continue };
        if code.contains(whole.start()) {
            continue;
        }

        let target = cap.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if target.is_empty() {
            continue;
        }

        let heading = cap
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|h| !h.is_empty())
            .map(str::to_string);

        links.push(Link {
            target: target.to_string(),
            heading,
            alias: cap.get(4).map(|m| m.as_str().to_string()),
            embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
            line: line_of(content, whole.start()),
        });
    }

    links
}

/// Split a raw `Name#Header` reference into its note and header parts.
pub fn split_target(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('#') {
        Some((name, header)) => {
            let header = header.trim();
            (name.trim(), (!header.is_empty()).then_some(header))
        }
        None => (raw.trim(), None),
    }
}
