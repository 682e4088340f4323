/// Loose name match used for pests, diseases and crop families.
///
/// Case-insensitive substring containment in either direction, so
/// "Aphids" matches "aphid" and "Early Blight" matches "blight".
/// Blank names never match.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// One-directional, case-insensitive: does `haystack` mention `needle`?
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle)
}

/// True if `haystack` mentions any of the keywords.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_ignore_case(haystack, k))
}

/// First entry in `candidates` that loosely matches `name`.
pub fn find_match<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find(|c| names_match(name, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_is_bidirectional() {
        assert!(names_match("Aphids", "aphid"));
        assert!(names_match("aphid", "Aphids"));
        assert!(names_match("Early Blight", "blight"));
        assert!(names_match("BLIGHT", "late blight"));
    }

    #[test]
    fn names_match_rejects_unrelated() {
        assert!(!names_match("Aphids", "Cutworm"));
        assert!(!names_match("Powdery Mildew", "Downy"));
    }

    #[test]
    fn blank_names_never_match() {
        assert!(!names_match("", "Aphids"));
        assert!(!names_match("Aphids", "   "));
        assert!(!names_match("", ""));
    }

    #[test]
    fn contains_ignore_case_is_one_way() {
        assert!(contains_ignore_case("Sandy Loam", "loam"));
        assert!(!contains_ignore_case("loam", "Sandy Loam"));
        assert!(!contains_ignore_case("Loam", ""));
    }

    #[test]
    fn contains_any_keywords() {
        assert!(contains_any("Cherry Tomato", &["tomato", "corn"]));
        assert!(!contains_any("Lettuce", &["tomato", "corn"]));
    }

    #[test]
    fn find_match_returns_first_hit() {
        let pests = ["Hornworm", "Aphids", "Whitefly"];
        assert_eq!(find_match("aphid", pests.iter().copied()), Some("Aphids"));
        assert_eq!(find_match("Slugs", pests.iter().copied()), None);
    }
}
