//! Username validation functions

use crate::string::{has_min_length, only_chars};

pub const USERNAME_MIN_LENGTH: usize = 3;

/// Punctuation allowed in a username besides ASCII letters and digits
pub const USERNAME_SYMBOLS: &[char] = &['_', '@', '.', '+', '-'];

pub fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || USERNAME_SYMBOLS.contains(&c)
}

/// At least [`USERNAME_MIN_LENGTH`] characters
pub fn username_long_enough(username: &str) -> bool {
    has_min_length(username, USERNAME_MIN_LENGTH)
}

/// Only letters, digits and `_ @ . + -`
pub fn username_charset_ok(username: &str) -> bool {
    !username.is_empty() && only_chars(username, is_username_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ab", false)]
    #[case("abc", true)]
    #[case("a.b_c-9", true)]
    #[case("äö", false)]
    fn test_length(#[case] username: &str, #[case] expected: bool) {
        assert_eq!(username_long_enough(username), expected, "{username}");
    }

    #[rstest]
    #[case("alice", true)]
    #[case("a.b_c-9", true)]
    #[case("first+last@corp", true)]
    #[case("ab$", false)]
    #[case("has space", false)]
    #[case("jürgen", false)]
    #[case("", false)]
    fn test_charset(#[case] username: &str, #[case] expected: bool) {
        assert_eq!(username_charset_ok(username), expected, "{username}");
    }
}
