//! Field constraints
//!
//! A constraint names one rule of the engine. Fields carry a [`ConstraintSet`],
//! which always iterates in evaluation order no matter how it was built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named validation rule applicable to a field
///
/// Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldConstraint {
    /// Trimmed value must be non-empty
    Required,
    /// Value must look like `local@domain.tld`
    Email,
    /// Length and character-set rules for account names
    Username,
    /// Length and complexity rules for the new password
    PasswordPrimary,
    /// Value must equal the primary password
    PasswordConfirm,
}

impl FieldConstraint {
    /// Every constraint, in evaluation order
    pub const ALL: [FieldConstraint; 5] = [
        FieldConstraint::Required,
        FieldConstraint::Email,
        FieldConstraint::Username,
        FieldConstraint::PasswordPrimary,
        FieldConstraint::PasswordConfirm,
    ];

    /// Parse a constraint tag
    ///
    /// Tags are matched case-insensitively; both `kebab-case` and `snake_case`
    /// spellings are accepted. Unknown tags yield `None`.
    ///
    /// # Examples
    /// ```
    /// use authform_validation::FieldConstraint;
    /// assert_eq!(FieldConstraint::parse("email"), Some(FieldConstraint::Email));
    /// assert_eq!(FieldConstraint::parse("Password_Confirm"), Some(FieldConstraint::PasswordConfirm));
    /// assert_eq!(FieldConstraint::parse("zipcode"), None);
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase().replace('_', "-");
        match tag.as_str() {
            "required" => Some(FieldConstraint::Required),
            "email" => Some(FieldConstraint::Email),
            "username" => Some(FieldConstraint::Username),
            "password-primary" => Some(FieldConstraint::PasswordPrimary),
            "password-confirm" => Some(FieldConstraint::PasswordConfirm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldConstraint::Required => "required",
            FieldConstraint::Email => "email",
            FieldConstraint::Username => "username",
            FieldConstraint::PasswordPrimary => "password-primary",
            FieldConstraint::PasswordConfirm => "password-confirm",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraints declared on one field
///
/// Serialized as a list of tags. Unknown tags are dropped on deserialization.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<FieldConstraint>")]
pub struct ConstraintSet(u8);

impl ConstraintSet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Builder-style insert
    pub fn with(mut self, constraint: FieldConstraint) -> Self {
        self.insert(constraint);
        self
    }

    pub fn insert(&mut self, constraint: FieldConstraint) {
        self.0 |= constraint.bit();
    }

    pub fn remove(&mut self, constraint: FieldConstraint) {
        self.0 &= !constraint.bit();
    }

    pub fn contains(&self, constraint: FieldConstraint) -> bool {
        self.0 & constraint.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = FieldConstraint> + '_ {
        FieldConstraint::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }

    /// Build a set from loosely typed tags, dropping the ones that don't parse
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for tag in tags {
            match FieldConstraint::parse(tag.as_ref()) {
                Some(constraint) => set.insert(constraint),
                None => tracing::debug!(tag = tag.as_ref(), "ignoring unknown constraint tag"),
            }
        }
        set
    }
}

impl fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<FieldConstraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = FieldConstraint>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl From<Vec<String>> for ConstraintSet {
    fn from(tags: Vec<String>) -> Self {
        Self::from_tags(tags)
    }
}

impl From<ConstraintSet> for Vec<FieldConstraint> {
    fn from(set: ConstraintSet) -> Self {
        set.iter().collect()
    }
}
