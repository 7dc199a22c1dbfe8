//! Link and embed parsing: `[[wikilinks]]`, `![[embeds]]`, `[md](links)`.

use crate::parser::code_block::CodeSpans;
use crate::parser::frontmatter::{for_each_string, parse_frontmatter, split_frontmatter};
use crate::types::{Link, LinkSyntax};
use regex::Regex;
use std::sync::LazyLock;

// (!)?        - embed marker (group 1)
// \[\[        - opening [[
// ([^\]|#]*)  - target path (group 2), empty for same-note links
// (?:#([^\]|]*))? - heading or ^block subpath (group 3)
// (?:\|[^\]]*)?   - alias, discarded
// \]\]        - closing ]]
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]|#\n]*)(?:#([^\]|\n]*))?(?:\|[^\]\n]*)?\]\]").unwrap());

// (!)?[text](target "optional title") or (!)?[text](<target with spaces>)
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[[^\]\n]*\]\(\s*(?:<([^>\n]+)>|([^)\s]+))(?:\s+"[^"\n]*")?\s*\)"#).unwrap()
});

/// Parse wikilinks, embeds and markdown links from markdown text.
///
/// Links inside code are skipped, as are markdown links to external URLs and
/// same-note anchors (`[[#heading]]`, `[x](#heading)`).
pub fn parse_all_links(content: &str) -> Vec<Link> {
    let code = CodeSpans::find(content);
    let mut found: Vec<(usize, Link)> = Vec::new();

    for cap in WIKILINK.captures_iter(content) {
        let start = cap.get(0).unwrap().start();
        if code.contains(start) {
            continue;
        }
        let target = cap.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if target.is_empty() {
            continue;
        }
        found.push((
            start,
            Link {
                target: target.to_string(),
                subpath: cap.get(3).map(|m| m.as_str().to_string()),
                embed: !cap[1].is_empty(),
                syntax: LinkSyntax::Wiki,
                line: line_of(content, start),
            },
        ));
    }

    for cap in MARKDOWN_LINK.captures_iter(content) {
        let start = cap.get(0).unwrap().start();
        if code.contains(start) {
            continue;
        }
        let raw = cap.get(2).or_else(|| cap.get(3)).map(|m| m.as_str()).unwrap_or("");
        if is_external(raw) {
            continue;
        }
        let (path, subpath) = match raw.split_once('#') {
            Some((path, sub)) => (path, Some(sub.to_string())),
            None => (raw, None),
        };
        let target = urlencoding::decode(path)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        if target.trim().is_empty() {
            continue;
        }
        found.push((
            start,
            Link {
                target: target.trim().to_string(),
                subpath,
                embed: !cap[1].is_empty(),
                syntax: LinkSyntax::Markdown,
                line: line_of(content, start),
            },
        ));
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, link)| link).collect()
}

/// Parse every link of a note: the body plus wikilinks inside frontmatter
/// string values (reported on line 0).
pub fn parse_note_links(content: &str) -> Vec<Link> {
    let mut links = Vec::new();

    if let Ok(Some(fm)) = parse_frontmatter(content) {
        for_each_string(&fm, &mut |value| {
            links.extend(
                parse_all_links(value)
                    .into_iter()
                    .filter(|link| link.syntax == LinkSyntax::Wiki)
                    .map(|link| Link { line: 0, ..link }),
            );
        });
    }

    let split = split_frontmatter(content);
    let line_offset = content[..split.body_offset].matches('\n').count();
    links.extend(parse_all_links(split.body).into_iter().map(|mut link| {
        link.line += line_offset;
        link
    }));

    links
}

/// Whether a markdown link target points outside the vault.
fn is_external(target: &str) -> bool {
    if target.starts_with('#') || target.starts_with("//") {
        return true;
    }
    // scheme:rest, where scheme is letters/digits/+-. starting with a letter.
    // Single-letter schemes are Windows drive letters, not URLs.
    match target.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
