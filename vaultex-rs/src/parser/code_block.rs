//! Code span detection, so tags and links inside code are ignored.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Inline code: a run of backticks, content, and the same run closing it.
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``[^\n]+?``|`[^`\n]+`").unwrap());

/// Byte ranges of fenced blocks and inline code spans, sorted by start.
#[derive(Debug, Clone, Default)]
pub struct CodeSpans {
    spans: Vec<Range<usize>>,
}

impl CodeSpans {
    /// Scan content for fenced code blocks (``` or ~~~) and inline code.
    ///
    /// An unterminated fence runs to the end of the content.
    pub fn find(content: &str) -> Self {
        let mut spans = Vec::new();
        let mut open: Option<(usize, char, usize)> = None;
        let mut offset = 0;

        for line in content.split_inclusive('\n') {
            let trimmed = line.trim_start();
            let fence_char = trimmed.chars().next().filter(|c| *c == '`' || *c == '~');
            let fence_len = fence_char
                .map(|c| trimmed.chars().take_while(|x| *x == c).count())
                .unwrap_or(0);

            match open {
                None if fence_len >= 3 => {
                    open = Some((offset, fence_char.unwrap_or('`'), fence_len));
                }
                Some((start, c, len))
                    if fence_char == Some(c)
                        && fence_len >= len
                        && trimmed.trim_end().chars().all(|x| x == c) =>
                {
                    spans.push(start..offset + line.len());
                    open = None;
                }
                _ => {}
            }
            offset += line.len();
        }
        if let Some((start, _, _)) = open {
            spans.push(start..content.len());
        }

        let fenced = spans.clone();
        for m in INLINE_CODE.find_iter(content) {
            if !fenced.iter().any(|r| r.contains(&m.start())) {
                spans.push(m.range());
            }
        }
        spans.sort_by_key(|r| r.start);

        Self { spans }
    }

    /// Whether a byte offset falls inside any code span.
    pub fn contains(&self, offset: usize) -> bool {
        self.spans.iter().any(|r| r.contains(&offset))
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
