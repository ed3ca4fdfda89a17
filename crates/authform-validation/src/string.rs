//! String validation functions

/// Validates minimum length, counted in characters
pub fn has_min_length(s: &str, min: usize) -> bool {
    // Byte length is an upper bound on char length
    if s.len() < min {
        return false;
    }
    s.chars().take(min).count() == min
}

/// Strip surrounding whitespace, counting a byte-order mark as whitespace
pub fn trim_value(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// True when the string is empty after [`trim_value`]
pub fn is_blank(s: &str) -> bool {
    trim_value(s).is_empty()
}

/// True when every character satisfies `allowed`
pub fn only_chars(s: &str, allowed: impl Fn(char) -> bool) -> bool {
    s.chars().all(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_validators() {
        assert!(has_min_length("hello", 3));
        assert!(has_min_length("abc", 3));
        assert!(!has_min_length("hi", 3));
        assert!(!has_min_length("", 1));
        assert!(has_min_length("", 0));
    }

    #[test]
    fn test_length_counts_chars() {
        // 3 chars, 6 bytes
        assert!(has_min_length("äöü", 3));
        assert!(!has_min_length("äö", 3));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
        assert!(is_blank("\u{feff}"));
        assert!(is_blank(" \u{feff}\u{a0}"));
    }

    #[test]
    fn test_trim_value() {
        assert_eq!(trim_value("\u{feff}alice \n"), "alice");
        assert_eq!(trim_value("a\u{feff}b"), "a\u{feff}b");
    }

    #[test]
    fn test_only_chars() {
        assert!(only_chars("abc123", |c| c.is_ascii_alphanumeric()));
        assert!(!only_chars("abc 123", |c| c.is_ascii_alphanumeric()));
        assert!(only_chars("", |_| false));
    }
}
