//! Code span detection, so links and tags inside code are ignored.

use regex::Regex;
use std::sync::LazyLock;

// ``code with `ticks` inside``
static INLINE_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``(?:[^`]|`[^`])*``").unwrap());

// `code`
static INLINE_SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`\n]+`").unwrap());

/// A byte range of content that is code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// First line of the span (1-indexed).
    pub start_line: usize,
    /// Last line of the span (1-indexed).
    pub end_line: usize,
    /// Fenced block (```` ``` ```` / `~~~`) rather than inline code.
    pub fenced: bool,
}

/// All code spans of a document, sorted by start offset.
#[derive(Debug, Clone, Default)]
pub struct CodeSpans {
    spans: Vec<CodeSpan>,
}

impl CodeSpans {
    /// Find fenced blocks and inline code in `content`.
    ///
    /// A fence left open runs to the end of the document.
    pub fn find(content: &str) -> Self {
        let mut spans = find_fenced(content);

        for re in [&*INLINE_DOUBLE, &*INLINE_SINGLE] {
            for m in re.find_iter(content) {
                let (start, end) = (m.start(), m.end());
                if spans.iter().any(|s| start < s.end && end > s.start) {
                    continue;
                }
                spans.push(CodeSpan {
                    start,
                    end,
                    start_line: line_of(content, start),
                    end_line: line_of(content, end),
                    fenced: false,
                });
            }
        }

        spans.sort_by_key(|s| s.start);
        Self { spans }
    }

    /// Whether a byte offset falls inside any code span.
    pub fn contains(&self, offset: usize) -> bool {
        self.spans.iter().any(|s| offset >= s.start && offset < s.end)
    }

    /// Whether a 1-indexed line lies inside a fenced block.
    pub fn contains_line(&self, line: usize) -> bool {
        self.spans
            .iter()
            .any(|s| s.fenced && line >= s.start_line && line <= s.end_line)
    }

    pub fn spans(&self) -> &[CodeSpan] {
        &self.spans
    }
}

fn find_fenced(content: &str) -> Vec<CodeSpan> {
    let mut spans = Vec::new();
    // (fence char, fence length, start offset, start line)
    let mut open: Option<(char, usize, usize, usize)> = None;
    let mut offset = 0;

    for (idx, raw_line) in content.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_end_matches(['\n', '\r']);

        match open {
            None => {
                if let Some((fence, len)) = fence_marker(line) {
                    open = Some((fence, len, offset, line_no));
                }
            }
            Some((fence, len, start, start_line)) => {
                let trimmed = line.trim();
                if trimmed.len() >= len && trimmed.chars().all(|c| c == fence) {
                    spans.push(CodeSpan {
                        start,
                        end: offset + line.len(),
                        start_line,
                        end_line: line_no,
                        fenced: true,
                    });
                    open = None;
                }
            }
        }

        offset += raw_line.len();
    }

    if let Some((_, _, start, start_line)) = open {
        spans.push(CodeSpan {
            start,
            end: content.len(),
            start_line,
            end_line: line_of(content, content.len()),
            fenced: true,
        });
    }

    spans
}

/// Returns the fence character and its run length if `line` opens a fence.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let first = line.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let len = line.chars().take_while(|&c| c == first).count();
    (len >= 3).then_some((first, len))
}

/// 1-indexed line number of a byte offset.
pub(crate) fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_block() {
        let content = "Some text\n\n```rust\nlet x = [[not a link]];\n```\n\nMore text";
        let spans = CodeSpans::find(content);
        assert_eq!(spans.spans().len(), 1);
        assert!(spans.spans()[0].fenced);
        assert_eq!(spans.spans()[0].start_line, 3);
        assert_eq!(spans.spans()[0].end_line, 5);
        assert!(spans.contains_line(4));
        assert!(!spans.contains_line(7));
    }

    #[test]
    fn test_tilde_fence_needs_matching_char() {
        let content = "~~~\n```\nstill code\n~~~\nafter";
        let spans = CodeSpans::find(content);
        assert_eq!(spans.spans().len(), 1);
        assert_eq!(spans.spans()[0].end_line, 4);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let content = "text\n```\n[[hidden]]\n#hidden";
        let spans = CodeSpans::find(content);
        assert_eq!(spans.spans().len(), 1);
        assert!(spans.contains(content.find("[[hidden").unwrap()));
        assert!(spans.contains_line(4));
    }

    #[test]
    fn test_inline_code() {
        let content = "Some `inline [[code]]` here";
        let spans = CodeSpans::find(content);
        assert_eq!(spans.spans().len(), 1);
        assert!(!spans.spans()[0].fenced);
    }

    #[test]
    fn test_double_backtick_inline() {
        let content = "Some ``inline `code` with backticks`` here";
        let spans = CodeSpans::find(content);
        assert_eq!(spans.spans().len(), 1);
    }

    #[test]
    fn test_contains_offset() {
        let content = "before `code` after";
        let spans = CodeSpans::find(content);
        assert!(!spans.contains(0));
        assert!(spans.contains(8));
        assert!(!spans.contains(14));
    }
}
