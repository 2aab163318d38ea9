//! Form State Controller - Single Owner of Form State
//!
//! CRITICAL: handle_submit ALWAYS runs the validator before the completion
//! handler. A submission with errors never reaches the handler.
//!
//! Submit validates, then either accepts (handler runs, form resets to Idle)
//! or rejects (form rests in Rejected until the next change or reset).

use thiserror::Error;

use crate::form::{ErrorMap, Field, FieldInput, FieldKind, FormValues};
use crate::notify::{CompletionHandler, Submission};
use crate::validation::Validator;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} expects {expected} input")]
    InputKindMismatch { field: &'static str, expected: FieldKind },

    #[error("Notification failed: {0}")]
    Notification(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session command: {0}")]
    Session(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    /// Last submit failed validation; errors are on display.
    Rejected,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Handler ran and the form was reset.
    Accepted(Submission),
    /// Values and errors are kept for display.
    Rejected(ErrorMap),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

pub struct FormController {
    initial: FormValues,
    values: FormValues,
    errors: ErrorMap,
    phase: SubmitPhase,
    validator: Validator,
}

impl FormController {
    pub fn new() -> Self {
        Self::with_initial(FormValues::default())
    }

    pub fn with_initial(initial: FormValues) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: ErrorMap::new(),
            phase: SubmitPhase::Idle,
            validator: Validator::new(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Merge one input event into the values. Does not validate.
    pub fn handle_change(&mut self, field: Field, input: FieldInput) -> Result<(), FormError> {
        self.values = self.values.with(field, input)?;
        self.phase = SubmitPhase::Idle;

        // a guest-name error cannot outlive the guest toggle
        if field == Field::AttendingWithGuest && !self.values.attending_with_guest {
            self.errors.remove(Field::GuestName);
        }
        Ok(())
    }

    pub fn handle_change_named(&mut self, name: &str, input: FieldInput) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        self.handle_change(field, input)
    }

    /// Validate and, if clean, hand the values to `handler` and reset.
    ///
    /// Validation failures are returned as `SubmitOutcome::Rejected`, not as
    /// errors. `Err` means the handler itself failed; the values are kept.
    pub fn handle_submit<H>(&mut self, handler: &mut H) -> Result<SubmitOutcome, FormError>
    where
        H: CompletionHandler + ?Sized,
    {
        self.errors = self.validator.validate(&self.values);

        if !self.errors.is_empty() {
            self.phase = SubmitPhase::Rejected;
            tracing::info!(failing = self.errors.len(), "submission rejected");
            return Ok(SubmitOutcome::Rejected(self.errors.clone()));
        }

        self.phase = SubmitPhase::Idle;
        let submission = Submission::new(self.values.clone());

        if let Err(e) = handler.on_success(&submission) {
            tracing::warn!(id = %submission.id, error = %e, "completion handler failed");
            return Err(e);
        }

        tracing::info!(id = %submission.id, "submission accepted");
        self.reset_form();
        Ok(SubmitOutcome::Accepted(submission))
    }

    pub fn reset_form(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.phase = SubmitPhase::Idle;
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}
