//! formwork - shape-agnostic form state and validation
//!
//! A form is a nested values record addressed by field paths
//! (`address.city`, `skills[2].skill_id`), an ordered set of validation
//! rules, and a session owning the validate/submit/reset lifecycle.
//! Rules are declared in code, derived from the current values for
//! cross-field constraints, or compiled from a JSON schema.
//!
//! ```
//! use formwork::{FieldRule, FormConfig, FormSession, RuleSet};
//! use serde_json::json;
//!
//! let mut session = FormSession::new(
//!     FormConfig::new()
//!         .with_initial_values(json!({"mobile_number": ""}))
//!         .with_rules(RuleSet::new().field(
//!             "mobile_number",
//!             FieldRule::required("mobile number is required"),
//!         )),
//! );
//!
//! assert!(!session.validate());
//! session.set_value("mobile_number", "9999999999").unwrap();
//! assert!(session.validate());
//! ```

mod rules;
mod schema;
mod session;
pub mod validators;
pub mod values;

pub use rules::{Check, FieldRule, RuleSet};
pub use schema::{CheckSchema, FieldSchema, FormSchema, PatternKind, SchemaError};
pub use session::{
    FieldError, FormConfig, FormSession, SubmitAction, SubmitHandler, SubmitOutcome,
};
pub use values::path::{FieldPath, PathError, Segment};
