//! Tag parsing (#tag and #tag/subtag), from note bodies and frontmatter.

use crate::parser::code_block::CodeSpans;
use crate::parser::frontmatter::{frontmatter_tags, parse_frontmatter, split_frontmatter};
use crate::types::{Tag, TagSource};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// A # that starts a line or follows a character which cannot be part of a
// word, an HTML entity or a URL path, then the tag body. The body is greedy,
// so a match never stops in the middle of a word.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w&/#])#([\w/-]+)").unwrap());

static WIKILINK_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[[^\]\n]*\]\]").unwrap());

// The `(destination)` part of a markdown link, where `#` starts an anchor.
static MARKDOWN_LINK_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\([^)\n]*\)").unwrap());

/// Parse inline tags from markdown text.
///
/// `line_offset` is added to every reported line number, for callers that
/// pass a slice of a larger document.
pub fn parse_inline_tags(content: &str, line_offset: usize) -> Vec<Tag> {
    let code = CodeSpans::find(content);
    let link_spans: Vec<_> = WIKILINK_SPAN
        .find_iter(content)
        .chain(MARKDOWN_LINK_TARGET.find_iter(content))
        .map(|m| m.range())
        .collect();
    let mut tags = Vec::new();

    for cap in TAG.captures_iter(content) {
        let body = cap.get(1).unwrap();
        let hash = body.start() - 1;

        if code.contains(hash) || link_spans.iter().any(|r| r.contains(&hash)) {
            continue;
        }

        let name = body.as_str().trim_end_matches('/');
        // Purely numeric (#123) is an issue reference, not a tag.
        if name.is_empty() || name.chars().all(|c| c.is_ascii_digit() || c == '/') {
            continue;
        }

        tags.push(Tag {
            name: name.to_string(),
            source: TagSource::Body,
            line: content[..hash].matches('\n').count() + 1 + line_offset,
        });
    }

    tags
}

/// Parse every tag of a note: frontmatter `tags` first, then inline tags.
///
/// Malformed frontmatter contributes no tags but does not hide the inline
/// ones.
pub fn parse_tags(content: &str) -> Vec<Tag> {
    let split = split_frontmatter(content);
    let mut tags = Vec::new();

    match parse_frontmatter(content) {
        Ok(Some(fm)) => {
            tags.extend(frontmatter_tags(&fm).into_iter().map(|name| Tag {
                name,
                source: TagSource::Frontmatter,
                line: 0,
            }));
        }
        Ok(None) => {}
        Err(e) => tracing::debug!(error = %e, "ignoring unparsable frontmatter"),
    }

    let body_line_offset = content[..split.body_offset].matches('\n').count();
    tags.extend(parse_inline_tags(split.body, body_line_offset));
    tags
}

/// Tag names without duplicates, in order of first occurrence.
pub fn unique_tag_names(tags: &[Tag]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|tag| seen.insert(tag.name.as_str()))
        .map(|tag| tag.name.clone())
        .collect()
}
