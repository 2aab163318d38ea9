//! Render Tree - What the Form Surface Shows
//!
//! Built from a values snapshot and the current errors. Each field carries
//! its own inline error, and the guest-name field only appears while
//! attending with a guest.

use serde::Serialize;
use std::fmt;

use crate::controller::FormController;
use crate::form::{ErrorMap, Field, FormValues};

pub const FORM_TITLE: &str = "Event Registration Form";
pub const SUBMIT_LABEL: &str = "Submit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Text,
    Email,
    Number,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ControlValue {
    Text(String),
    Checked(bool),
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub control: Control,
    pub value: ControlValue,
    pub error: Option<String>,
}

impl FieldView {
    pub fn invalid(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub fields: Vec<FieldView>,
    pub submit_label: &'static str,
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::Email => "Email",
        Field::Age => "Age",
        Field::AttendingWithGuest => "Are you attending with a guest?",
        Field::GuestName => "Guest Name",
    }
}

fn control(field: Field) -> Control {
    match field {
        Field::Name | Field::GuestName => Control::Text,
        Field::Email => Control::Email,
        Field::Age => Control::Number,
        Field::AttendingWithGuest => Control::Checkbox,
    }
}

impl FormView {
    pub fn build(values: &FormValues, errors: &ErrorMap) -> Self {
        let fields = Field::ALL
            .into_iter()
            .filter(|f| *f != Field::GuestName || values.attending_with_guest)
            .map(|field| FieldView {
                field,
                label: label(field),
                control: control(field),
                value: match values.text(field) {
                    Some(text) => ControlValue::Text(text.to_string()),
                    None => ControlValue::Checked(values.attending_with_guest),
                },
                error: errors.get(field).map(str::to_string),
            })
            .collect();

        Self {
            title: FORM_TITLE,
            fields,
            submit_label: SUBMIT_LABEL,
        }
    }

    pub fn of(form: &FormController) -> Self {
        Self::build(form.values(), form.errors())
    }

    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ControlValue::Checked(checked) => {
                let mark = if *checked { 'x' } else { ' ' };
                writeln!(f, "[{}] {}", mark, self.label)?;
            }
            ControlValue::Text(text) => {
                let marker = if self.invalid() { "!" } else { " " };
                writeln!(f, "{}:", self.label)?;
                writeln!(f, "{}[{}]", marker, text)?;
            }
        }
        if let Some(error) = &self.error {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        for field in &self.fields {
            write!(f, "{}", field)?;
        }
        writeln!(f)?;
        write!(f, "( {} )", self.submit_label)
    }
}
