//! Parsers for wikilink-flavored markdown.

pub mod code_block;
pub mod document;
pub mod frontmatter;
pub mod heading;
pub mod tag;
pub mod wikilink;

pub use code_block::{CodeSpan, CodeSpans};
pub use document::parse_document;
pub use frontmatter::{FrontmatterSplit, frontmatter_tags, split_frontmatter};
pub use heading::{find_heading, parse_headings, slugify};
pub use tag::parse_tags;
pub use wikilink::{parse_links, split_target};
