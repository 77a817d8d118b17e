//! Validation of raw form input.
//!
//! Every rule runs independently, so a single submission can report errors
//! for several fields at once.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{Field, Inventory, NewItem};

/// The three raw strings as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    /// Raw name input.
    pub name: String,
    /// Raw quantity input.
    pub quantity: String,
    /// Raw price input.
    pub price: String,
}

impl RawItem {
    /// Create a raw item from its three inputs.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }
}

/// Field-level validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Record an error for a field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether the field failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failed fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a candidate item against the current inventory.
///
/// # Errors
///
/// Returns every failing field with its message when any rule fails.
pub fn validate(raw: &RawItem, inventory: &Inventory) -> Result<NewItem, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = raw.name.trim();
    if name.is_empty() {
        errors.insert(Field::Name, "Item name is required");
    } else if inventory.find_by_name(name).is_some() {
        errors.insert(
            Field::Name,
            format!("An item named \"{name}\" already exists"),
        );
    }

    let quantity = check_amount(&raw.quantity, Field::Quantity, &mut errors);
    let price = check_amount(&raw.price, Field::Price, &mut errors);
    if let (Some(quantity), Some(price)) = (quantity, price) {
        if !(quantity * price).is_finite() {
            errors.insert(Field::Price, "Total value is too large");
        }
    }

    match (quantity, price) {
        (Some(quantity), Some(price)) if errors.is_empty() => Ok(NewItem {
            name: name.to_string(),
            quantity,
            price,
        }),
        _ => Err(errors),
    }
}

/// Parse a non-negative finite number, recording a message on failure.
fn check_amount(input: &str, field: Field, errors: &mut FieldErrors) -> Option<f64> {
    let label = field.label();
    let Some(value) = parse_number(input) else {
        errors.insert(field, format!("{label} must be a valid number"));
        return None;
    };

    if value < 0.0 {
        errors.insert(field, format!("{label} cannot be negative"));
        return None;
    }

    // Turns "-0" into 0.
    Some(value.abs())
}

/// Parse trimmed input as a finite number.
fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, ItemId};

    fn inventory_with(names: &[&str]) -> Inventory {
        Inventory::from_items(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Item {
                    id: ItemId::from(format!("id{i}")),
                    name: (*name).to_string(),
                    quantity: 1.0,
                    price: 1.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_valid_item_accepted() {
        let result = validate(&RawItem::new("  Bolts ", "100", "0.25"), &Inventory::new());
        let new_item = result.unwrap();
        assert_eq!(new_item.name, "Bolts");
        assert!((new_item.quantity - 100.0).abs() < f64::EPSILON);
        assert!((new_item.price - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_values_accepted() {
        assert!(validate(&RawItem::new("Free", "0", "0"), &Inventory::new()).is_ok());
    }

    #[test]
    fn test_fractional_quantity_accepted() {
        let new_item = validate(&RawItem::new("Rope", "2.5", "3"), &Inventory::new()).unwrap();
        assert!((new_item.quantity - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_name_case_insensitive() {
        let inventory = inventory_with(&["Bolts"]);
        let errors = validate(&RawItem::new("bolts", "5", "1"), &inventory).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(Field::Name).unwrap().contains("already exists"));
    }

    #[test]
    fn test_duplicate_name_after_trim() {
        let inventory = inventory_with(&["Bolts"]);
        let errors = validate(&RawItem::new("  BOLTS  ", "5", "1"), &inventory).unwrap_err();
        assert!(errors.contains(Field::Name));
    }

    #[test]
    fn test_empty_name_rejected() {
        let errors = validate(&RawItem::new("   ", "1", "1"), &Inventory::new()).unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Item name is required"));
    }

    #[test]
    fn test_quantity_rules() {
        let inventory = Inventory::new();
        for bad in ["", "   ", "abc", "NaN", "inf"] {
            let errors = validate(&RawItem::new("A", bad, "1"), &inventory).unwrap_err();
            assert_eq!(
                errors.get(Field::Quantity),
                Some("Quantity must be a valid number"),
                "input {bad:?}"
            );
        }

        let errors = validate(&RawItem::new("A", "-1", "1"), &inventory).unwrap_err();
        assert_eq!(
            errors.get(Field::Quantity),
            Some("Quantity cannot be negative")
        );
    }

    #[test]
    fn test_price_rules() {
        let inventory = Inventory::new();
        for bad in ["", "twelve"] {
            let errors = validate(&RawItem::new("A", "1", bad), &inventory).unwrap_err();
            assert_eq!(errors.get(Field::Price), Some("Price must be a valid number"));
        }

        let errors = validate(&RawItem::new("A", "1", "-0.01"), &inventory).unwrap_err();
        assert_eq!(errors.get(Field::Price), Some("Price cannot be negative"));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let inventory = inventory_with(&["Bolts"]);
        let errors = validate(&RawItem::new("BOLTS", "x", "-3"), &inventory).unwrap_err();

        assert_eq!(errors.len(), 3);
        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Quantity, Field::Price]);
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::default();
        errors.insert(Field::Price, "Price cannot be negative");
        errors.insert(Field::Name, "Item name is required");
        assert_eq!(
            errors.to_string(),
            "name: Item name is required; price: Price cannot be negative"
        );
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let errors = validate(&RawItem::new("Bolts", "1e308", "10"), &Inventory::new()).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Price), Some("Total value is too large"));
    }
}
