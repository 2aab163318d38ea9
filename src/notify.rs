//! Completion Handlers
//!
//! The controller hands every accepted submission to a handler. The stock
//! handler writes a confirmation notice; anything else (an API call, a toast)
//! can take its place.

use serde::Serialize;
use chrono::{DateTime, Utc};
use std::io::Write;
use uuid::Uuid;

use crate::form::FormValues;
use crate::FormError;

/// Receipt for an accepted submission
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub values: FormValues,
}

impl Submission {
    pub fn new(values: FormValues) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            submitted_at: Utc::now(),
            values,
        }
    }
}

pub trait CompletionHandler {
    fn on_success(&mut self, submission: &Submission) -> Result<(), FormError>;
}

impl<F> CompletionHandler for F
where
    F: FnMut(&Submission) -> Result<(), FormError>,
{
    fn on_success(&mut self, submission: &Submission) -> Result<(), FormError> {
        self(submission)
    }
}

/// Text shown to the user after a successful submit.
pub fn confirmation_message(values: &FormValues) -> Result<String, FormError> {
    Ok(format!(
        "Form submitted successfully!\n{}",
        serde_json::to_string_pretty(values)?
    ))
}

/// Writes the confirmation message to any writer
pub struct ConfirmationNotice<W: Write> {
    out: W,
}

impl<W: Write> ConfirmationNotice<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CompletionHandler for ConfirmationNotice<W> {
    fn on_success(&mut self, submission: &Submission) -> Result<(), FormError> {
        let message = confirmation_message(&submission.values)?;
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_contains_pretty_values() {
        let values = FormValues {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        let message = confirmation_message(&values).unwrap();
        assert!(message.starts_with("Form submitted successfully!\n{"));
        assert!(message.contains("  \"name\": \"Jane Doe\""));
        assert!(message.contains("\"attendingWithGuest\": false"));
    }

    #[test]
    fn test_notice_writes_to_sink() {
        let mut notice = ConfirmationNotice::new(Vec::new());
        let submission = Submission::new(FormValues::default());
        notice.on_success(&submission).unwrap();
        let written = String::from_utf8(notice.into_inner()).unwrap();
        assert!(written.starts_with("Form submitted successfully!"));
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_submission_serializes_as_receipt() {
        let submission = Submission::new(FormValues::default());
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["id"], submission.id.as_str());
        assert!(json["submitted_at"].is_string());
        assert_eq!(json["values"]["attendingWithGuest"], false);
    }

    #[test]
    fn test_submission_ids_are_unique() {
        let a = Submission::new(FormValues::default());
        let b = Submission::new(FormValues::default());
        assert_ne!(a.id, b.id);
    }
}
