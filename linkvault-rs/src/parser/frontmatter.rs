//! YAML front matter splitting and tag extraction.

use crate::error::{Result, VaultError};
use regex::Regex;
use serde_yaml::Value;
use std::path::Path;
use std::sync::LazyLock;

static TAG_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

/// A document split into its front matter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML (without delimiters).
    pub yaml: Option<&'a str>,
    /// Everything after the closing delimiter.
    pub body: &'a str,
    /// Line of the full document where `body` starts (1-indexed).
    pub body_start_line: usize,
}

impl<'a> FrontmatterSplit<'a> {
    fn none(content: &'a str) -> Self {
        Self {
            yaml: None,
            body: content,
            body_start_line: 1,
        }
    }
}

/// Split content into front matter and body.
///
/// Front matter opens with `---` on the first line and closes with a `---`
/// line. Without a closing line the whole content is body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let yaml_start = if content.starts_with("---\n") {
        4
    } else if content.starts_with("---\r\n") {
        5
    } else {
        return FrontmatterSplit::none(content);
    };

    let rest = &content[yaml_start..];

    // An empty block closes on the very next line.
    let closing = if rest.starts_with("---") && closes_at(rest, 0) {
        Some((0, 0))
    } else {
        rest.match_indices("\n---")
            .map(|(pos, _)| pos)
            .find(|&pos| closes_at(rest, pos + 1))
            .map(|pos| (pos, pos + 1))
    };

    let Some((yaml_end, delimiter_start)) = closing else {
        return FrontmatterSplit::none(content);
    };

    let after_delimiter = &rest[delimiter_start + 3..];
    let body = after_delimiter
        .strip_prefix("\r\n")
        .or_else(|| after_delimiter.strip_prefix('\n'))
        .unwrap_or(after_delimiter);

    let consumed = content.len() - body.len();
    let body_start_line = content[..consumed].matches('\n').count() + 1;

    FrontmatterSplit {
        yaml: Some(&rest[..yaml_end]),
        body,
        body_start_line,
    }
}

// `---` at `pos` must be followed by a line break or the end of text.
fn closes_at(text: &str, pos: usize) -> bool {
    let after = &text[pos + 3..];
    after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n")
}

/// Extract the raw tag values of a front-matter block.
///
/// `tags` may be a sequence (string elements kept, others skipped) or a
/// single string split on commas and whitespace.
pub fn frontmatter_tags(yaml: &str, path: &Path) -> Result<Vec<String>> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| VaultError::InvalidFrontmatter {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let tags = match value.get("tags") {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => TAG_SEPARATOR
            .split(s)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(tags)
}
