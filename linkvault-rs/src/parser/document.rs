//! Whole-document parsing: links, headings and tags in one pass.

use crate::normalize::NormalizationPolicy;
use crate::parser::code_block::CodeSpans;
use crate::parser::frontmatter::{frontmatter_tags, split_frontmatter};
use crate::parser::heading::parse_headings_in;
use crate::parser::tag::parse_tags_with_spans;
use crate::parser::wikilink::parse_links_with_spans;
use crate::types::ParsedDocument;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

/// Parse a document's text into links, headings and canonical tags.
///
/// Never fails. Malformed front matter is logged and only inline tags are
/// kept. `path` is used for diagnostics only.
pub fn parse_document(content: &str, path: &Path, policy: &NormalizationPolicy) -> ParsedDocument {
    let links = parse_links_with_spans(content, &CodeSpans::find(content));

    let split = split_frontmatter(content);
    let body_code = CodeSpans::find(split.body);
    let headings = parse_headings_in(split.body, &body_code, split.body_start_line);

    let mut raw_tags = parse_tags_with_spans(split.body, &body_code);
    if let Some(yaml) = split.yaml {
        match frontmatter_tags(yaml, path) {
            Ok(tags) => raw_tags.extend(tags),
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring front matter tags"),
        }
    }

    let tags: BTreeSet<String> = raw_tags
        .iter()
        .filter_map(|t| policy.normalize_tag(t))
        .collect();

    ParsedDocument {
        links,
        headings,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::SpaceReplacement;

    fn parse(content: &str) -> ParsedDocument {
        parse_document(content, Path::new("note.md"), &NormalizationPolicy::default())
    }

    fn tags(doc: &ParsedDocument) -> Vec<&str> {
        doc.tags.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_links_headings_and_tags() {
        let doc = parse("# Intro\nSee [[B]] and #project.\n## Details  ");
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.links[0].target, "B");
        assert_eq!(doc.headings.len(), 2);
        assert_eq!(doc.headings[1].text, "Details");
        assert_eq!(tags(&doc), vec!["project"]);
    }

    #[test]
    fn test_frontmatter_and_inline_tags_merge() {
        let content = "---\ntags: [Rust, cli]\n---\n# Title\nBody #rust #New";
        let doc = parse(content);
        assert_eq!(tags(&doc), vec!["cli", "new", "rust"]);
        assert_eq!(doc.headings[0].line, 4);
    }

    #[test]
    fn test_frontmatter_string_tags() {
        let doc = parse("---\ntags: \"#alpha, beta\"\n---\ntext");
        assert_eq!(tags(&doc), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_malformed_frontmatter_keeps_inline_tags() {
        let doc = parse("---\ntags: [broken\n---\nText #kept and [[Link]]");
        assert_eq!(tags(&doc), vec!["kept"]);
        assert_eq!(doc.links.len(), 1);
    }

    #[test]
    fn test_frontmatter_lines_not_headings_or_inline_tags() {
        let doc = parse("---\n# comment: value\nnote: \" #nottag\"\n---\nbody");
        assert!(doc.headings.is_empty());
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_links_in_frontmatter_are_found() {
        let doc = parse("---\nup: \"[[Parent]]\"\n---\nbody");
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.links[0].target, "Parent");
        assert_eq!(doc.links[0].line, 2);
    }

    #[test]
    fn test_case_sensitive_tags() {
        let policy = NormalizationPolicy::new(true, SpaceReplacement::Hyphen);
        let doc = parse_document("#Rust and #rust", Path::new("n.md"), &policy);
        assert_eq!(tags(&doc), vec!["Rust", "rust"]);
    }

    #[test]
    fn test_code_excluded_everywhere() {
        let doc = parse("```\n# Not heading\n[[NotLink]] #nottag\n```\n`[[x]]` real");
        assert!(doc.links.is_empty());
        assert!(doc.headings.is_empty());
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse(""), ParsedDocument::default());
    }
}
