//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// One '@', at least one '.' after it, no whitespace anywhere
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates basic email format
///
/// Checks for:
/// - Exactly one '@' symbol with content on both sides
/// - At least one '.' in the domain part, with content on both sides of it
/// - No whitespace anywhere
///
/// Catches typos, not undeliverable addresses.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
