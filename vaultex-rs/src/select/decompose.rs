//! Hierarchical tag decomposition.

/// Expand a tag into itself and every ancestor, most specific first.
///
/// The input is trimmed; a blank tag yields nothing. Each step truncates at
/// the last `/`, and empty truncations (as in `/a`) are never emitted.
///
/// ```
/// use vaultex::select::decompose;
///
/// assert_eq!(decompose("hello/i/am"), vec!["hello/i/am", "hello/i", "hello"]);
/// assert!(decompose("   ").is_empty());
/// ```
pub fn decompose(tag: &str) -> Vec<String> {
    let mut tag = tag.trim();
    let mut chain = Vec::new();

    if tag.is_empty() {
        return chain;
    }

    chain.push(tag.to_string());
    while let Some(idx) = tag.rfind('/') {
        tag = &tag[..idx];
        if !tag.is_empty() {
            chain.push(tag.to_string());
        }
    }
    chain
}

/// Decompose every tag and flatten the results, duplicates included.
pub fn decompose_all<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .flat_map(|tag| decompose(tag.as_ref()))
        .collect()
}
