//! Inline tag parsing (`#tag`, `#area/sub-tag`).

use crate::parser::code_block::CodeSpans;
use regex::Regex;
use std::sync::LazyLock;

// The # must open the text or follow whitespace, which rules out color codes
// (`color:#fff`), `C#`, and URL fragments. The regex crate has no lookahead,
// so the terminator is checked by hand in `is_tag_terminator`.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([A-Za-z0-9_/\-]+)").unwrap());

/// Parse raw inline tag tokens (without `#`) in document order.
///
/// Tokens inside code are skipped, as are tokens made only of `/` and `-`.
pub fn parse_tags(content: &str) -> Vec<String> {
    parse_tags_with_spans(content, &CodeSpans::find(content))
}

pub(crate) fn parse_tags_with_spans(content: &str, code: &CodeSpans) -> Vec<String> {
    let mut tags = Vec::new();

    for cap in TAG.captures_iter(content) {
        let Some(token) = cap.get(1) else { continue };

        if let Some(next) = content[token.end()..].chars().next() {
            if !is_tag_terminator(next) {
                continue;
            }
        }

        // The # sits just before the token.
        if code.contains(token.start() - 1) {
            continue;
        }

        let token = token.as_str();
        if token.chars().all(|c| c == '/' || c == '-') {
            continue;
        }

        tags.push(token.to_string());
    }

    tags
}

fn is_tag_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | ')' | ']' | '}')
}
