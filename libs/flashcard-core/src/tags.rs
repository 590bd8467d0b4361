//! Tag list normalization.
//!
//! Tags are stored as a single comma-joined, lowercase string. Order is kept
//! and duplicates are not removed.

/// Split on commas, trim and lowercase each token, drop empty tokens, rejoin.
pub fn normalize_tags(raw: &str) -> String {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Normalize a single tag used as a search filter.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Tokens of an already normalized tag string.
pub fn split_tags(normalized: &str) -> Vec<&str> {
    normalized.split(',').filter(|tag| !tag.is_empty()).collect()
}

/// Exact token membership, never a partial-name match.
pub fn has_tag(normalized: &str, tag: &str) -> bool {
    let wanted = normalize_tag(tag);
    split_tags(normalized).into_iter().any(|t| t == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_and_keeps_duplicates() {
        assert_eq!(normalize_tags("  Vocab, Grammar ,Vocab"), "vocab,grammar,vocab");
    }

    #[test]
    fn drops_empty_tokens() {
        assert_eq!(normalize_tags(",, a ,,B,"), "a,b");
        assert_eq!(normalize_tags(""), "");
        assert_eq!(normalize_tags(" , "), "");
    }

    #[test]
    fn exact_membership() {
        assert!(has_tag("vocab,grammar", "Vocab"));
        assert!(!has_tag("vocabulary,grammar", "vocab"));
        assert!(!has_tag("", "vocab"));
    }
}
