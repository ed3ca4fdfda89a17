// File: src/session.rs
// Purpose: Per-form state driven by blur / input / submit events

use crate::config::Config;
use crate::constraint::{ConstraintSet, FieldConstraint};
use crate::descriptor::{FieldDescriptor, NamingConvention};
use crate::engine::{validate, FieldInput};
use crate::provenance::{ErrorSlot, ProvenancePolicy};
use crate::result::ValidationResult;
use serde::Serialize;
use tracing::debug;

struct SessionField {
    descriptor: FieldDescriptor,
    constraints: ConstraintSet,
    slot: ErrorSlot,
}

/// One authentication form on the page
///
/// Blur runs full validation; input only clears stale client errors so the
/// user doesn't see "required" flash while still typing. Server-rendered errors
/// survive both and are dropped only by [`FormSession::begin_submit`].
pub struct FormSession {
    fields: Vec<SessionField>,
    naming: NamingConvention,
    policy: ProvenancePolicy,
    submitting: bool,
}

/// Verdicts for every field of a form, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub fields: Vec<FieldVerdict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub field: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.result.is_valid())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &FieldVerdict> {
        self.fields.iter().filter(|f| !f.result.is_valid())
    }

    pub fn get(&self, field: &str) -> Option<&ValidationResult> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.result)
    }
}

impl FormSession {
    /// Create a session with default naming and provenance rules
    pub fn new(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self::with_rules(fields, NamingConvention::default(), ProvenancePolicy::default())
    }

    pub fn from_config(fields: impl IntoIterator<Item = FieldDescriptor>, config: &Config) -> Self {
        Self::with_rules(fields, config.naming.clone(), config.provenance.clone())
    }

    pub fn with_rules(
        fields: impl IntoIterator<Item = FieldDescriptor>,
        naming: NamingConvention,
        policy: ProvenancePolicy,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|descriptor| SessionField {
                constraints: naming.constraints_for(&descriptor),
                descriptor,
                slot: ErrorSlot::new(),
            })
            .collect();

        Self {
            fields,
            naming,
            policy,
            submitting: false,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.descriptor.key() == key)
    }

    /// Value confirmation fields are compared against
    ///
    /// Looked up by element id first; a form without ids falls back to the
    /// first field carrying the primary-password constraint.
    fn primary_password(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| self.naming.is_primary_password(&f.descriptor))
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|f| f.constraints.contains(FieldConstraint::PasswordPrimary))
            })
            .map(|f| f.descriptor.value.as_str())
    }

    fn input_for(&self, index: usize) -> FieldInput {
        let field = &self.fields[index];
        let mut input = FieldInput::new(field.descriptor.key(), field.descriptor.value.as_str())
            .with_constraints(field.constraints);

        if field.constraints.contains(FieldConstraint::PasswordConfirm) {
            input.related_value = self.primary_password().map(str::to_string);
        }

        input
    }

    /// Seed server-rendered errors for a field
    pub fn load_server_errors<I, S>(&mut self, key: &str, messages: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(index) = self.position(key) else {
            debug!(field = key, "server errors for unknown field");
            return false;
        };

        let slot = &mut self.fields[index].slot;
        for message in messages {
            slot.push_server(message);
        }
        true
    }

    /// Field lost focus: clear client errors, validate, show the failure if any
    pub fn on_blur(&mut self, key: &str) -> Option<ValidationResult> {
        let index = self.position(key)?;
        let result = validate(&self.input_for(index));

        let slot = &mut self.fields[index].slot;
        slot.clear_client(&self.policy);
        if let Some(message) = result.message() {
            slot.show(message, &self.policy);
        }

        Some(result)
    }

    /// Field value changed: record it and clear client errors, nothing more
    pub fn on_input(&mut self, key: &str, value: impl Into<String>) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };

        let field = &mut self.fields[index];
        field.descriptor.value = value.into();
        field.slot.clear_client(&self.policy);
        true
    }

    /// Blur every field in document order
    pub fn validate_all(&mut self) -> FormReport {
        let keys: Vec<String> = self
            .fields
            .iter()
            .map(|f| f.descriptor.key().to_string())
            .collect();

        let fields = keys
            .into_iter()
            .filter_map(|key| {
                let result = self.on_blur(&key)?;
                Some(FieldVerdict { field: key, result })
            })
            .collect();

        FormReport { fields }
    }

    /// Form submitted: button goes to loading, every error is dropped
    ///
    /// Returns false if a submission is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }

        self.submitting = true;
        for field in &mut self.fields {
            field.slot.clear_all();
        }
        true
    }

    /// Server answered and the page re-rendered with its errors (if any)
    pub fn complete_submit<I, K, M>(&mut self, server_errors: I)
    where
        I: IntoIterator<Item = (K, Vec<M>)>,
        K: AsRef<str>,
        M: Into<String>,
    {
        self.submitting = false;
        for (key, messages) in server_errors {
            self.load_server_errors(key.as_ref(), messages);
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self, key: &str) -> Option<&ErrorSlot> {
        self.position(key).map(|index| &self.fields[index].slot)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.position(key)
            .map(|index| self.fields[index].descriptor.value.as_str())
    }

    pub fn constraints(&self, key: &str) -> Option<ConstraintSet> {
        self.position(key).map(|index| self.fields[index].constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TAKEN: &str = "A user with that username already exists.";

    fn signup() -> FormSession {
        FormSession::new([
            FieldDescriptor::new("username").id("id_username").required(),
            FieldDescriptor::new("email").id("id_email").required(),
            FieldDescriptor::new("password1").id("id_password1").required(),
            FieldDescriptor::new("password2").id("id_password2").required(),
        ])
    }

    #[test]
    fn test_blur_on_empty_required_field() {
        let mut form = signup();
        let result = form.on_blur("email").unwrap();

        assert!(!result.is_valid());
        let slot = form.errors("email").unwrap();
        assert_eq!(slot.messages(), &["This field is required.".to_string()]);
        assert!(slot.is_marked());
    }

    #[test]
    fn test_input_only_clears() {
        let mut form = signup();
        form.on_blur("email");

        assert!(form.on_input("email", "u"));
        assert!(form.errors("email").unwrap().is_empty());

        // Still not a valid address, but input never re-validates
        assert!(form.on_input("email", "user@"));
        assert!(form.errors("email").unwrap().is_empty());
        assert_eq!(form.value("email"), Some("user@"));
    }

    #[test]
    fn test_blur_replaces_previous_client_error() {
        let mut form = signup();
        form.on_blur("email");
        form.on_input("email", "user@example");
        form.on_blur("email");

        assert_eq!(
            form.errors("email").unwrap().messages(),
            &["Please enter a valid email address.".to_string()]
        );

        form.on_input("email", "user@example.com");
        assert!(form.on_blur("email").unwrap().is_valid());
        assert!(form.errors("email").unwrap().is_empty());
    }

    #[test]
    fn test_confirmation_reads_primary_value() {
        let mut form = signup();
        form.on_input("password1", "Abcdef1!");
        form.on_input("password2", "Abcdef1");

        let result = form.on_blur("password2").unwrap();
        assert_eq!(result.message(), Some("Passwords do not match."));

        form.on_input("password2", "Abcdef1!");
        assert!(form.on_blur("password2").unwrap().is_valid());
    }

    #[test]
    fn test_confirmation_without_ids_uses_primary_constraint() {
        let mut form = FormSession::new([
            FieldDescriptor::new("password1").value("Abcdef1!"),
            FieldDescriptor::new("password2").value("nope"),
        ]);
        assert!(!form.on_blur("password2").unwrap().is_valid());
    }

    #[test]
    fn test_server_error_survives_revalidation() {
        let mut form = signup();
        assert!(form.load_server_errors("username", [TAKEN]));

        form.on_input("username", "ab");
        assert_eq!(form.errors("username").unwrap().messages(), &[TAKEN.to_string()]);

        form.on_blur("username");
        assert_eq!(
            form.errors("username").unwrap().messages(),
            &[TAKEN.to_string(), "Username must be at least 3 characters.".to_string()]
        );

        form.on_input("username", "alice");
        form.on_blur("username");
        assert_eq!(form.errors("username").unwrap().messages(), &[TAKEN.to_string()]);
    }

    #[test]
    fn test_submit_cycle_clears_server_errors() {
        let mut form = signup();
        form.load_server_errors("username", [TAKEN]);

        assert!(form.begin_submit());
        assert!(form.is_submitting());
        assert!(!form.begin_submit());
        assert!(form.errors("username").unwrap().is_empty());

        form.complete_submit([("email", vec!["Invalid email domain."])]);
        assert!(!form.is_submitting());
        assert_eq!(
            form.errors("email").unwrap().messages(),
            &["Invalid email domain.".to_string()]
        );
    }

    #[test]
    fn test_validate_all() {
        let mut form = signup();
        form.on_input("username", "alice");
        form.on_input("email", "alice@example.com");
        form.on_input("password1", "Abcdef1!");
        form.on_input("password2", "Abcdef1?");

        let report = form.validate_all();
        assert!(!report.is_valid());
        assert_eq!(report.fields.len(), 4);
        let invalid: Vec<_> = report.invalid().map(|f| f.field.as_str()).collect();
        assert_eq!(invalid, vec!["password2"]);
        assert!(report.get("email").unwrap().is_valid());
    }

    #[test]
    fn test_unknown_field() {
        let mut form = signup();
        assert!(form.on_blur("phone").is_none());
        assert!(!form.on_input("phone", "123"));
        assert!(!form.load_server_errors("phone", ["Invalid number"]));
        assert!(form.errors("phone").is_none());
    }

    #[test]
    fn test_constraints_are_derived() {
        let form = signup();
        assert_eq!(
            form.constraints("email"),
            Some(
                ConstraintSet::new()
                    .with(FieldConstraint::Required)
                    .with(FieldConstraint::Email)
            )
        );
    }
}
