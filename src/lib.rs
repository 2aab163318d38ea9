//! Event Registration - Form State and Validation
//!
//! # Guarantees
//! 1. Changes never validate; only submit does
//! 2. Validation errors are data, never `Err`
//! 3. The completion handler runs only for an empty ErrorMap, exactly once
//! 4. An accepted submission resets the form

pub mod form;
pub mod validation;
pub mod controller;
pub mod notify;
pub mod render;
pub mod session;

pub use form::{ErrorMap, Field, FieldInput, FieldKind, FormValues};
pub use validation::{validate, FieldRule, Validator};
pub use controller::{FormController, FormError, SubmitOutcome, SubmitPhase};
pub use notify::{CompletionHandler, ConfirmationNotice, Submission};
pub use render::{FieldView, FormView};
pub use session::{Command, Session, SessionSummary};
