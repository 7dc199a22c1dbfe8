//! Selection criteria: which tags pull notes in, which keep them out.

use serde::{Deserialize, Serialize};

/// How a raw include/exclude field is turned into tag entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    /// The whole field is one tag.
    #[default]
    Single,
    /// The field is split on commas and whitespace into several tags.
    Split,
}

/// What the exclude list does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcludePolicy {
    /// The exclude list is accepted and otherwise unused.
    #[default]
    Ignore,
    /// A matched note is dropped when one of its tags (or tag ancestors) is
    /// in the exclude list. Linked resources are never dropped.
    Subtract,
}

/// Immutable selection criteria for one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    include: Vec<String>,
    exclude: Vec<String>,
    exclude_policy: ExcludePolicy,
}

impl Criteria {
    /// Criteria from already separated tag lists. Entries are trimmed and
    /// blank entries dropped.
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            include: clean(include),
            exclude: clean(exclude),
            exclude_policy: ExcludePolicy::default(),
        }
    }

    /// Criteria from raw user input fields, one per include/exclude box.
    pub fn parse<S: AsRef<str>>(include: &[S], exclude: &[S], mode: QueryMode) -> Self {
        Self::new(split_fields(include, mode), split_fields(exclude, mode))
    }

    pub fn with_exclude_policy(mut self, policy: ExcludePolicy) -> Self {
        self.exclude_policy = policy;
        self
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn exclude_policy(&self) -> ExcludePolicy {
        self.exclude_policy
    }

    /// Whether nothing can ever match.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Whether a decomposed tag set contains any include entry.
    pub fn includes(&self, tag_set: &[String]) -> bool {
        self.include.iter().any(|tag| tag_set.contains(tag))
    }

    /// Whether a decomposed tag set is excluded under the current policy.
    pub fn excludes(&self, tag_set: &[String]) -> bool {
        match self.exclude_policy {
            ExcludePolicy::Ignore => false,
            ExcludePolicy::Subtract => self.exclude.iter().any(|tag| tag_set.contains(tag)),
        }
    }
}

fn clean<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn split_fields<S: AsRef<str>>(fields: &[S], mode: QueryMode) -> Vec<String> {
    match mode {
        QueryMode::Single => fields.iter().map(|f| f.as_ref().to_string()).collect(),
        QueryMode::Split => fields
            .iter()
            .flat_map(|f| {
                f.as_ref()
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}
