/// Canonicalize a free-text comma list: trim each segment, drop empty or
/// whitespace-only segments, rejoin with a single comma. Relative order of
/// the surviving segments is preserved, and the function is idempotent.
#[must_use]
pub fn normalize_tag_list(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// First `max` code points of `text`, or the whole string if shorter.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
