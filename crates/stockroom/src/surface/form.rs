//! State of the three-field item form.

use std::collections::BTreeMap;

use crate::model::Field;

/// Input values, error markers, and focus for the item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, String>,
    focused: Option<Field>,
}

impl Form {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value of a field (empty if never set).
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Replace the raw value of a field.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Error message currently shown for a field.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether the field is marked invalid.
    #[must_use]
    pub fn is_invalid(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Mark a field invalid with a message.
    pub fn set_error(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Remove a field's invalid marker.
    pub fn clear_error(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Fields currently marked invalid, with messages, in form order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Clear every input value. Error markers are left alone.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Move input focus to a field.
    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }

    /// The focused field, if any.
    #[must_use]
    pub fn focused(&self) -> Option<Field> {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_default_empty() {
        let form = Form::new();
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
        }
    }

    #[test]
    fn test_set_value_and_reset() {
        let mut form = Form::new();
        form.set_value(Field::Name, "Bolts");
        form.set_error(Field::Price, "Price cannot be negative");
        form.reset();

        assert_eq!(form.value(Field::Name), "");
        assert!(form.is_invalid(Field::Price));
    }

    #[test]
    fn test_error_markers() {
        let mut form = Form::new();
        form.set_error(Field::Quantity, "Quantity must be a valid number");
        assert_eq!(form.error(Field::Quantity), Some("Quantity must be a valid number"));

        form.clear_error(Field::Quantity);
        assert!(!form.is_invalid(Field::Quantity));
        assert_eq!(form.errors().count(), 0);
    }

    #[test]
    fn test_focus() {
        let mut form = Form::new();
        assert_eq!(form.focused(), None);
        form.focus(Field::Name);
        assert_eq!(form.focused(), Some(Field::Name));
    }
}
