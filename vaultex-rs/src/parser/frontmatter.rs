//! YAML frontmatter parsing.

use crate::error::Result;
use serde_yaml::Value;

/// A note split into its frontmatter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub body: &'a str,
    /// Byte offset of the body within the original content.
    pub body_offset: usize,
}

/// Split content into frontmatter and body.
///
/// Frontmatter must open with `---` on the very first line and close with a
/// line holding only `---`. Anything else is treated as plain body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: content,
        body_offset: 0,
    };

    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return no_frontmatter;
    };
    let yaml_start = content.len() - rest.len();

    let mut offset = yaml_start;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = content[yaml_start..offset].trim_end_matches(['\r', '\n']);
            let body_offset = offset + line.len();
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &content[body_offset..],
                body_offset,
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Parse frontmatter into a YAML value, if the note has any.
pub fn parse_frontmatter(content: &str) -> Result<Option<Value>> {
    match split_frontmatter(content).yaml {
        Some(yaml) if yaml.trim().is_empty() => Ok(None),
        Some(yaml) => Ok(Some(serde_yaml::from_str(yaml)?)),
        None => Ok(None),
    }
}

/// Collect tags declared in the `tags` (or `tag`) frontmatter key.
///
/// Accepts a YAML list or a single string with comma/space separated tags.
/// A leading `#` is stripped; empty entries are dropped.
pub fn frontmatter_tags(frontmatter: &Value) -> Vec<String> {
    let mut tags = Vec::new();

    for key in ["tags", "tag"] {
        match frontmatter.get(key) {
            Some(Value::Sequence(items)) => {
                for item in items {
                    if let Some(s) = scalar_to_string(item) {
                        push_split(&s, &mut tags);
                    }
                }
            }
            Some(value) => {
                if let Some(s) = scalar_to_string(value) {
                    push_split(&s, &mut tags);
                }
            }
            None => {}
        }
    }

    tags
}

fn push_split(raw: &str, tags: &mut Vec<String>) {
    for part in raw.split([',', ' ']) {
        let part = part.trim().trim_start_matches('#');
        if !part.is_empty() {
            tags.push(part.to_string());
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Visit every string value in a frontmatter tree.
pub fn for_each_string<'a>(value: &'a Value, f: &mut impl FnMut(&'a str)) {
    match value {
        Value::String(s) => f(s),
        Value::Sequence(items) => items.iter().for_each(|item| for_each_string(item, f)),
        Value::Mapping(map) => map.values().for_each(|v| for_each_string(v, f)),
        Value::Tagged(tagged) => for_each_string(&tagged.value, f),
        _ => {}
    }
}
