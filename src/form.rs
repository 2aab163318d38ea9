//! Form Model - Values, Fields, Errors
//!
//! FormValues is the single in-memory snapshot of the registration form.
//! ErrorMap holds one message per failing field, nothing for valid ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::FormError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Numeric input, kept as typed.
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub attending_with_guest: bool,
    #[serde(default)]
    pub guest_name: String,
}

impl FormValues {
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Age => Some(&self.age),
            Field::GuestName => Some(&self.guest_name),
            Field::AttendingWithGuest => None,
        }
    }

    /// The input event that would set `field` to its current value.
    pub fn input(&self, field: Field) -> FieldInput {
        match self.text(field) {
            Some(text) => FieldInput::Text(text.to_string()),
            None => FieldInput::Checked(self.attending_with_guest),
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(&self, field: Field, input: FieldInput) -> Result<Self, FormError> {
        let mut next = self.clone();
        match (field, input) {
            (Field::AttendingWithGuest, FieldInput::Checked(checked)) => {
                next.attending_with_guest = checked;
            }
            (Field::Name, FieldInput::Text(text)) => next.name = text,
            (Field::Email, FieldInput::Text(text)) => next.email = text,
            (Field::Age, FieldInput::Text(text)) => next.age = text,
            (Field::GuestName, FieldInput::Text(text)) => next.guest_name = text,
            (field, _) => {
                return Err(FormError::InputKindMismatch {
                    field: field.as_str(),
                    expected: field.kind(),
                })
            }
        }
        Ok(next)
    }
}

/// Form fields, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Age,
    AttendingWithGuest,
    GuestName,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Age,
        Field::AttendingWithGuest,
        Field::GuestName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
            Field::AttendingWithGuest => "attendingWithGuest",
            Field::GuestName => "guestName",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::AttendingWithGuest => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Checkbox,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("text"),
            FieldKind::Checkbox => f.write_str("checkbox"),
        }
    }
}

/// Payload of a single input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Field name to message. Absent key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!(matches!(
            "guest_name".parse::<Field>(),
            Err(FormError::UnknownField(name)) if name == "guest_name"
        ));
    }

    #[test]
    fn test_with_rejects_wrong_input_kind() {
        let values = FormValues::default();
        let err = values
            .with(Field::AttendingWithGuest, FieldInput::text("yes"))
            .unwrap_err();
        assert!(err.to_string().contains("expects checkbox input"));

        assert!(values.with(Field::Age, FieldInput::Checked(true)).is_err());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let values = FormValues::default();
        let next = values.with(Field::Name, FieldInput::text("Jane Doe")).unwrap();
        assert_eq!(next.name, "Jane Doe");
        assert!(values.name.is_empty());
    }

    #[test]
    fn test_input_replays_to_same_values() {
        let values = FormValues {
            name: "Jane Doe".to_string(),
            attending_with_guest: true,
            ..Default::default()
        };
        let mut rebuilt = FormValues::default();
        for field in Field::ALL {
            rebuilt = rebuilt.with(field, values.input(field)).unwrap();
        }
        assert_eq!(rebuilt, values);
    }

    #[test]
    fn test_values_serialize_camel_case() {
        let values = FormValues {
            attending_with_guest: true,
            guest_name: "Sam".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["attendingWithGuest"], true);
        assert_eq!(json["guestName"], "Sam");
    }

    #[test]
    fn test_error_map_serializes_in_field_order() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::GuestName, "g");
        errors.insert(Field::Name, "n");
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"name":"n","guestName":"g"}"#
        );
    }
}
