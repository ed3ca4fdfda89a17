// File: src/descriptor.rs
// Purpose: Derive a field's constraints from what the markup says about it

use crate::constraint::{ConstraintSet, FieldConstraint};
use crate::engine::{null_as_empty, FieldInput};
use serde::{Deserialize, Serialize};

/// What the presentation layer knows about one input element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// `name` attribute
    #[serde(default)]
    pub name: String,

    /// `id` attribute
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,

    /// Whether the element carries the `required` attribute
    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// `name`, falling back to `id` when the element has no name
    pub fn key(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Substrings of a field's key that imply a constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password_primary")]
    pub password_primary: String,

    #[serde(default = "default_password_confirm")]
    pub password_confirm: String,

    /// Element id whose value confirmation fields are compared against
    #[serde(default = "default_primary_password_id")]
    pub primary_password_id: String,
}

fn default_email() -> String {
    "email".to_string()
}

fn default_username() -> String {
    "username".to_string()
}

fn default_password_primary() -> String {
    "password1".to_string()
}

fn default_password_confirm() -> String {
    "password2".to_string()
}

fn default_primary_password_id() -> String {
    "id_password1".to_string()
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            email: default_email(),
            username: default_username(),
            password_primary: default_password_primary(),
            password_confirm: default_password_confirm(),
            primary_password_id: default_primary_password_id(),
        }
    }
}

impl NamingConvention {
    /// Constraints implied by the `required` attribute and the field's key
    pub fn constraints_for(&self, field: &FieldDescriptor) -> ConstraintSet {
        let key = field.key();
        let mut constraints = ConstraintSet::new();

        if field.required {
            constraints.insert(FieldConstraint::Required);
        }

        let by_name = [
            (&self.email, FieldConstraint::Email),
            (&self.username, FieldConstraint::Username),
            (&self.password_primary, FieldConstraint::PasswordPrimary),
            (&self.password_confirm, FieldConstraint::PasswordConfirm),
        ];
        for (fragment, constraint) in by_name {
            if !fragment.is_empty() && key.contains(fragment.as_str()) {
                constraints.insert(constraint);
            }
        }

        constraints
    }

    /// True when `field` is the one confirmation fields compare against
    pub fn is_primary_password(&self, field: &FieldDescriptor) -> bool {
        !field.id.is_empty() && field.id == self.primary_password_id
    }
}

/// Constraints for a field under a naming convention
pub fn derive_constraints(field: &FieldDescriptor, naming: &NamingConvention) -> ConstraintSet {
    naming.constraints_for(field)
}

/// Build the engine input for `field`
///
/// `primary_password` is only attached when the field is a confirmation field.
pub fn field_input(
    field: &FieldDescriptor,
    naming: &NamingConvention,
    primary_password: Option<&str>,
) -> FieldInput {
    let constraints = naming.constraints_for(field);
    let mut input = FieldInput::new(field.key(), field.value.as_str()).with_constraints(constraints);

    if constraints.contains(FieldConstraint::PasswordConfirm) {
        input.related_value = primary_password.map(str::to_string);
    }

    input
}
