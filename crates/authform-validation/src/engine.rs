//! The validation engine
//!
//! [`validate`] walks an ordered rule table. Each row pairs a constraint with a
//! predicate and the reason reported when the predicate fails. The first failing
//! row wins; later rows are not evaluated.

use crate::constraint::{ConstraintSet, FieldConstraint};
use crate::email::is_valid_email;
use crate::password::{password_complex_enough, password_long_enough, passwords_match};
use crate::result::{FailureReason, ValidationResult};
use crate::string::{is_blank, trim_value};
use crate::username::{username_charset_ok, username_long_enough};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

/// Everything the engine needs to judge one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    /// Field name or id, used for logging only
    #[serde(default)]
    pub identifier: String,

    /// Current value; `null` or missing reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,

    #[serde(default)]
    pub constraints: ConstraintSet,

    /// Primary password's current value, for confirmation fields
    #[serde(default)]
    pub related_value: Option<String>,
}

impl FieldInput {
    pub fn new(identifier: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.insert(constraint);
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn related(mut self, value: impl Into<String>) -> Self {
        self.related_value = Some(value.into());
        self
    }
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

type Predicate = fn(value: &str, related: Option<&str>) -> bool;

struct Rule {
    constraint: FieldConstraint,
    reason: FailureReason,
    /// Empty values skip every rule except `Required`
    skip_empty: bool,
    passes: Predicate,
}

static RULES: &[Rule] = &[
    Rule {
        constraint: FieldConstraint::Required,
        reason: FailureReason::Required,
        skip_empty: false,
        passes: |value, _| !is_blank(value),
    },
    Rule {
        constraint: FieldConstraint::Email,
        reason: FailureReason::InvalidEmail,
        skip_empty: true,
        passes: |value, _| is_valid_email(value),
    },
    Rule {
        constraint: FieldConstraint::Username,
        reason: FailureReason::UsernameTooShort,
        skip_empty: true,
        passes: |value, _| username_long_enough(value),
    },
    Rule {
        constraint: FieldConstraint::Username,
        reason: FailureReason::UsernameCharset,
        skip_empty: true,
        passes: |value, _| username_charset_ok(value),
    },
    Rule {
        constraint: FieldConstraint::PasswordPrimary,
        reason: FailureReason::PasswordTooShort,
        skip_empty: true,
        passes: |value, _| password_long_enough(value),
    },
    Rule {
        constraint: FieldConstraint::PasswordPrimary,
        reason: FailureReason::PasswordComplexity,
        skip_empty: true,
        passes: |value, _| password_complex_enough(value),
    },
    Rule {
        constraint: FieldConstraint::PasswordConfirm,
        reason: FailureReason::PasswordMismatch,
        skip_empty: true,
        // No primary password on the form: nothing to compare against
        passes: |value, related| related.map_or(true, |primary| passwords_match(value, primary)),
    },
];

/// Run the rule table, stopping at the first failure
///
/// Rules see the value with surrounding whitespace trimmed.
pub fn check(input: &FieldInput) -> Result<(), FailureReason> {
    let value = trim_value(&input.value);
    let related = input.related_value.as_deref();

    for rule in RULES {
        if !input.constraints.contains(rule.constraint) {
            continue;
        }
        if rule.skip_empty && value.is_empty() {
            continue;
        }

        trace!(field = %input.identifier, constraint = %rule.constraint, "evaluating rule");

        if !(rule.passes)(value, related) {
            debug!(field = %input.identifier, reason = ?rule.reason, "field failed validation");
            return Err(rule.reason);
        }
    }

    Ok(())
}

/// Validate one field
///
/// Pure and deterministic: the same input always yields the same verdict.
pub fn validate(input: &FieldInput) -> ValidationResult {
    check(input).into()
}
