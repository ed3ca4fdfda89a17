//! Verdict types returned by the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a field failed validation
///
/// Each reason carries a fixed, user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    Required,
    InvalidEmail,
    UsernameTooShort,
    UsernameCharset,
    PasswordTooShort,
    PasswordComplexity,
    PasswordMismatch,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::Required => "This field is required.",
            FailureReason::InvalidEmail => "Please enter a valid email address.",
            FailureReason::UsernameTooShort => "Username must be at least 3 characters.",
            FailureReason::UsernameCharset => {
                "Username can only contain letters, numbers, and @/./+/-/_"
            }
            FailureReason::PasswordTooShort => "Password must be at least 8 characters.",
            FailureReason::PasswordComplexity => {
                "Password must contain uppercase, lowercase, number, and special character."
            }
            FailureReason::PasswordMismatch => "Passwords do not match.",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Verdict for one field
///
/// `message` is present exactly when the field is invalid. The only way to build
/// one is through [`ValidationResult::valid`] and [`ValidationResult::invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<FailureReason>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn invalid(reason: FailureReason) -> Self {
        Self {
            is_valid: false,
            message: Some(reason.message().to_string()),
            reason: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn reason(&self) -> Option<FailureReason> {
        self.reason
    }
}

impl From<Result<(), FailureReason>> for ValidationResult {
    fn from(result: Result<(), FailureReason>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(reason) => Self::invalid(reason),
        }
    }
}
