//! authform validation engine
//!
//! Field validation for authentication forms: an ordered rule table evaluated
//! per field, plus the bookkeeping a page needs around it (constraint
//! derivation from markup, server/client error reconciliation, flash notices).
//!
//! ```
//! use authform_validation::{validate, FieldConstraint, FieldInput};
//!
//! let input = FieldInput::new("email", "user@example")
//!     .with(FieldConstraint::Required)
//!     .with(FieldConstraint::Email);
//!
//! let result = validate(&input);
//! assert!(!result.is_valid());
//! assert_eq!(result.message(), Some("Please enter a valid email address."));
//! ```

pub mod config;
pub mod constraint;
pub mod descriptor;
pub mod email;
pub mod engine;
pub mod notice;
pub mod password;
pub mod provenance;
pub mod result;
pub mod session;
pub mod string;
pub mod username;

pub use config::Config;
pub use constraint::{ConstraintSet, FieldConstraint};
pub use descriptor::{derive_constraints, field_input, FieldDescriptor, NamingConvention};
pub use engine::{check, validate, FieldInput};
pub use notice::{Notice, NoticeBoard, NoticeLevel, NoticePhase, NoticeTimings};
pub use provenance::{ErrorSlot, MessageProvenance, ProvenancePolicy, SlotChange};
pub use result::{FailureReason, ValidationResult};
pub use session::{FieldVerdict, FormReport, FormSession};
