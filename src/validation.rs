//! Validation System - One Rule Per Field
//!
//! Rules inspect a values snapshot and return at most one message.
//! The validator runs every rule and aggregates the failures.

use regex::Regex;
use std::sync::OnceLock;

use crate::form::{ErrorMap, Field, FormValues};

pub const MIN_NAME_LENGTH: usize = 5;

static NAME_DISALLOWED: OnceLock<Regex> = OnceLock::new();
static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();

fn name_disallowed() -> &'static Regex {
    NAME_DISALLOWED.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").expect("valid name regex"))
}

fn email_shape() -> &'static Regex {
    EMAIL_SHAPE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"))
}

/// Field rule trait - first failing check wins within a field
pub trait FieldRule {
    fn field(&self) -> Field;
    fn check(&self, values: &FormValues) -> Option<String>;
}

// --- Concrete Rules ---

pub struct NameRule;

impl FieldRule for NameRule {
    fn field(&self) -> Field { Field::Name }

    fn check(&self, values: &FormValues) -> Option<String> {
        let name = &values.name;
        if name.is_empty() {
            Some("Full Name is required".to_string())
        } else if name.chars().count() < MIN_NAME_LENGTH {
            Some(format!("Full Name must include at least {} characters", MIN_NAME_LENGTH))
        } else if name_disallowed().is_match(name) {
            Some("Full Name should not include numbers or special characters".to_string())
        } else {
            None
        }
    }
}

pub struct EmailRule;

impl FieldRule for EmailRule {
    fn field(&self) -> Field { Field::Email }

    fn check(&self, values: &FormValues) -> Option<String> {
        if values.email.is_empty() {
            Some("Email is required".to_string())
        } else if !email_shape().is_match(&values.email) {
            Some("Email address is invalid".to_string())
        } else {
            None
        }
    }
}

pub struct AgeRule;

impl FieldRule for AgeRule {
    fn field(&self) -> Field { Field::Age }

    fn check(&self, values: &FormValues) -> Option<String> {
        if values.age.is_empty() {
            return Some("Age is required".to_string());
        }
        match values.age.trim().parse::<f64>() {
            Ok(age) if !age.is_finite() => Some("Age must be a number".to_string()),
            Ok(age) if age <= 0.0 => Some("Age must be greater than 0".to_string()),
            Ok(_) => None,
            Err(_) => Some("Age must be a number".to_string()),
        }
    }
}

pub struct GuestNameRule;

impl FieldRule for GuestNameRule {
    fn field(&self) -> Field { Field::GuestName }

    fn check(&self, values: &FormValues) -> Option<String> {
        if values.attending_with_guest && values.guest_name.is_empty() {
            Some("Guest name is required".to_string())
        } else {
            None
        }
    }
}

/// Validator runs every field rule and collects the failures
pub struct Validator {
    rules: Vec<Box<dyn FieldRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NameRule),
                Box::new(EmailRule),
                Box::new(AgeRule),
                Box::new(GuestNameRule),
            ],
        }
    }

    pub fn validate(&self, values: &FormValues) -> ErrorMap {
        let mut errors = ErrorMap::new();

        for rule in &self.rules {
            if let Some(message) = rule.check(values) {
                errors.insert(rule.field(), message);
            }
        }

        tracing::debug!(
            failing = errors.len(),
            fields = ?errors.iter().map(|(f, _)| f.as_str()).collect::<Vec<_>>(),
            "form validated"
        );
        errors
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a snapshot with the standard rule set.
pub fn validate(values: &FormValues) -> ErrorMap {
    Validator::new().validate(values)
}
