//! Password validation functions

use crate::string::{has_min_length, only_chars};

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Characters that count as "special" for the complexity rule
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn is_password_special(c: char) -> bool {
    PASSWORD_SPECIALS.contains(c)
}

/// Characters a password may be built from
pub fn is_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_password_special(c)
}

/// At least [`PASSWORD_MIN_LENGTH`] characters
pub fn password_long_enough(password: &str) -> bool {
    has_min_length(password, PASSWORD_MIN_LENGTH)
}

/// Complexity rule for a new password
///
/// Requires at least one each of:
/// - lowercase ASCII letter
/// - uppercase ASCII letter
/// - ASCII digit
/// - special character from [`PASSWORD_SPECIALS`]
///
/// and rejects any character outside those classes (spaces, non-ASCII letters,
/// `-`, `_`, ...). Length is checked separately by [`password_long_enough`].
pub fn password_complex_enough(password: &str) -> bool {
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(is_password_special);

    has_lowercase && has_uppercase && has_digit && has_special && only_chars(password, is_password_char)
}

/// Exact, character-for-character comparison
pub fn passwords_match(confirmation: &str, primary: &str) -> bool {
    confirmation == primary
}
