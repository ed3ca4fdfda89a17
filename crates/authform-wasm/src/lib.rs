//! authform WASM
//!
//! WebAssembly bindings for the authform validation engine.
//! The page script wires DOM events and calls in here for every verdict, so
//! the browser and any server-side checks share the same rules.

use authform_validation::{
    self as engine, ConstraintSet, FieldDescriptor, FieldInput, FormReport, FormSession,
    MessageProvenance, NamingConvention, Notice, NoticeLevel, NoticePhase, NoticeTimings,
    ValidationResult,
};
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_error(e: serde_wasm_bindgen::Error) -> JsValue {
    JsValue::from_str(&format!("Failed to parse input: {}", e))
}

/// Serialize as plain JS objects, with `None` as `null`
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// Validate a single field value
///
/// # Arguments
/// * `identifier` - Name or id of the field
/// * `value` - Current value (`null`/`undefined` read as empty)
/// * `constraints` - Array of constraint tags; unknown tags are ignored
/// * `related_value` - Primary password value, for confirmation fields
///
/// # Returns
/// `{ isValid, message }` where `message` is `null` when valid
///
/// # Example (JavaScript)
/// ```javascript
/// const verdict = validateField('email', input.value, ['required', 'email']);
/// if (!verdict.isValid) showFieldError(input, verdict.message);
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(
    identifier: &str,
    value: Option<String>,
    constraints: JsValue,
    related_value: Option<String>,
) -> Result<JsValue, JsValue> {
    let tags: Vec<String> = if constraints.is_undefined() || constraints.is_null() {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(constraints).map_err(parse_error)?
    };

    let result = run_field(identifier, value, ConstraintSet::from_tags(tags), related_value);
    to_js(&result)
}

/// Validate a field described by markup attributes
///
/// Takes `{ name, id, value, required }` plus the primary password's value and
/// derives constraints from the field's name.
#[wasm_bindgen(js_name = validateElement)]
pub fn validate_element(descriptor: JsValue, primary_password: Option<String>) -> Result<JsValue, JsValue> {
    let descriptor: FieldDescriptor = serde_wasm_bindgen::from_value(descriptor).map_err(parse_error)?;
    let result = run_element(&descriptor, primary_password.as_deref());
    to_js(&result)
}

/// Constraint tags implied by a field's markup
#[wasm_bindgen(js_name = constraintsFor)]
pub fn constraints_for(descriptor: JsValue) -> Result<JsValue, JsValue> {
    let descriptor: FieldDescriptor = serde_wasm_bindgen::from_value(descriptor).map_err(parse_error)?;
    let constraints = engine::derive_constraints(&descriptor, &NamingConvention::default());
    to_js(&constraints)
}

/// Validate every field of a form, in order
///
/// # Returns
/// `{ fields: [{ field, isValid, message }] }`
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(fields: JsValue) -> Result<JsValue, JsValue> {
    let fields: Vec<FieldDescriptor> = serde_wasm_bindgen::from_value(fields).map_err(parse_error)?;
    to_js(&run_form(fields))
}

/// Whether a displayed error must survive client re-validation
#[wasm_bindgen(js_name = isServerMessage)]
pub fn is_server_message(text: &str) -> bool {
    MessageProvenance::of(text) == MessageProvenance::Server
}

/// Lifecycle phase of a flash message: "visible", "exiting" or "removed"
///
/// All times are milliseconds since page load.
#[wasm_bindgen(js_name = noticePhase)]
pub fn notice_phase(now_ms: f64, shown_at_ms: f64, dismissed_at_ms: Option<f64>) -> String {
    phase_name(notice_phase_at(now_ms, shown_at_ms, dismissed_at_ms)).to_string()
}

fn run_field(
    identifier: &str,
    value: Option<String>,
    constraints: ConstraintSet,
    related_value: Option<String>,
) -> ValidationResult {
    let input = FieldInput {
        identifier: identifier.to_string(),
        value: value.unwrap_or_default(),
        constraints,
        related_value,
    };
    engine::validate(&input)
}

fn run_element(descriptor: &FieldDescriptor, primary_password: Option<&str>) -> ValidationResult {
    let input = engine::field_input(descriptor, &NamingConvention::default(), primary_password);
    engine::validate(&input)
}

fn run_form(fields: Vec<FieldDescriptor>) -> FormReport {
    FormSession::new(fields).validate_all()
}

fn millis(ms: f64) -> Duration {
    // JS timestamps are floats; negatives and NaN clamp to zero
    Duration::from_millis(if ms.is_finite() && ms > 0.0 { ms as u64 } else { 0 })
}

fn notice_phase_at(now_ms: f64, shown_at_ms: f64, dismissed_at_ms: Option<f64>) -> NoticePhase {
    let timings = NoticeTimings::default();
    let mut notice = Notice::new(NoticeLevel::Info, String::new(), millis(shown_at_ms));
    if let Some(dismissed) = dismissed_at_ms {
        notice.dismiss(millis(dismissed), &timings);
    }
    notice.phase(millis(now_ms), &timings)
}

fn phase_name(phase: NoticePhase) -> &'static str {
    match phase {
        NoticePhase::Visible => "visible",
        NoticePhase::Exiting => "exiting",
        NoticePhase::Removed => "removed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authform_validation::FieldConstraint;
    use wasm_bindgen_test::*;

    #[test]
    fn test_run_field() {
        let constraints = ConstraintSet::from_tags(["required", "email", "unknown"]);

        let result = run_field("email", None, constraints, None);
        assert_eq!(result.message(), Some("This field is required."));

        let result = run_field("email", Some("user@example.com".to_string()), constraints, None);
        assert!(result.is_valid());
    }

    #[test]
    fn test_run_element_confirmation() {
        let descriptor = FieldDescriptor::new("password2").value("Abcdef1");
        let result = run_element(&descriptor, Some("Abcdef1!"));
        assert_eq!(result.message(), Some("Passwords do not match."));
    }

    #[test]
    fn test_run_form() {
        let report = run_form(vec![
            FieldDescriptor::new("username").required().value("ab"),
            FieldDescriptor::new("email").value(""),
        ]);
        assert!(!report.is_valid());
        assert_eq!(
            report.get("username").and_then(|r| r.reason()),
            Some(engine::FailureReason::UsernameTooShort)
        );
        assert!(report.get("email").unwrap().is_valid());
    }

    #[test]
    fn test_notice_phases() {
        assert_eq!(notice_phase_at(4999.0, 0.0, None), NoticePhase::Visible);
        assert_eq!(notice_phase_at(5000.0, 0.0, None), NoticePhase::Exiting);
        assert_eq!(notice_phase_at(5300.0, 0.0, None), NoticePhase::Removed);
        assert_eq!(notice_phase_at(1200.0, 0.0, Some(1000.0)), NoticePhase::Exiting);
        assert_eq!(notice_phase_at(f64::NAN, 0.0, None), NoticePhase::Visible);
        assert_eq!(phase_name(NoticePhase::Removed), "removed");
    }

    #[test]
    fn test_constraint_tags_roundtrip_through_descriptor() {
        let descriptor = FieldDescriptor::new("email").required();
        let constraints = engine::derive_constraints(&descriptor, &NamingConvention::default());
        assert!(constraints.contains(FieldConstraint::Email));
        assert!(constraints.contains(FieldConstraint::Required));
    }

    #[wasm_bindgen_test]
    fn test_server_message_js() {
        assert!(is_server_message("A user with that username already exists."));
        assert!(is_server_message("Invalid username or password."));
        assert!(!is_server_message("This field is required."));
    }

    #[wasm_bindgen_test]
    fn test_notice_phase_js() {
        assert_eq!(notice_phase(5100.0, 0.0, None), "exiting");
    }

    #[cfg(target_arch = "wasm32")]
    mod js {
        use super::*;
        use js_sys::Reflect;

        fn message_of(verdict: &JsValue) -> JsValue {
            Reflect::get(verdict, &JsValue::from_str("message")).unwrap()
        }

        fn is_valid_of(verdict: &JsValue) -> bool {
            Reflect::get(verdict, &JsValue::from_str("isValid"))
                .unwrap()
                .as_bool()
                .unwrap()
        }

        #[wasm_bindgen_test]
        fn test_validate_field_js() {
            let tags = serde_wasm_bindgen::to_value(&["required", "username"]).unwrap();
            let verdict = validate_field("username", Some("ab$".to_string()), tags, None).unwrap();
            assert!(!is_valid_of(&verdict));
            assert_eq!(
                message_of(&verdict).as_string().as_deref(),
                Some("Username can only contain letters, numbers, and @/./+/-/_")
            );
        }

        #[wasm_bindgen_test]
        fn test_valid_verdict_message_is_null() {
            let verdict = validate_field("nickname", None, JsValue::NULL, None).unwrap();
            assert!(is_valid_of(&verdict));
            let message = message_of(&verdict);
            assert!(message.is_null());
            assert!(!message.is_undefined());
        }

        #[wasm_bindgen_test]
        fn test_validate_element_valid_message_is_null() {
            let descriptor = FieldDescriptor::new("email").required().value("a@b.co");
            let descriptor = serde_wasm_bindgen::to_value(&descriptor).unwrap();
            let verdict = validate_element(descriptor, None).unwrap();
            assert!(is_valid_of(&verdict));
            assert!(message_of(&verdict).is_null());
        }

        #[wasm_bindgen_test]
        fn test_validate_form_fields_are_plain_objects() {
            let fields = vec![FieldDescriptor::new("username").required().value("alice")];
            let fields = serde_wasm_bindgen::to_value(&fields).unwrap();
            let report = validate_form(fields).unwrap();
            let list = Reflect::get(&report, &JsValue::from_str("fields")).unwrap();
            let first = Reflect::get(&list, &JsValue::from_f64(0.0)).unwrap();
            assert_eq!(
                Reflect::get(&first, &JsValue::from_str("field")).unwrap().as_string().as_deref(),
                Some("username")
            );
            assert!(message_of(&first).is_null());
        }
    }
}
