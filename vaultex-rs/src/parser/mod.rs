//! Parsers for Obsidian markdown syntax.

pub mod code_block;
pub mod frontmatter;
pub mod tag;
pub mod wikilink;

pub use code_block::CodeSpans;
pub use frontmatter::{frontmatter_tags, parse_frontmatter, split_frontmatter};
pub use tag::{parse_inline_tags, parse_tags, unique_tag_names};
pub use wikilink::{parse_all_links, parse_note_links};
