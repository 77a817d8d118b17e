//! Core inventory types for stockroom.
//!
//! This module defines the item record, the ordered inventory that holds
//! them, and the small enums shared by the views and the controller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for an item.
///
/// Assigned once when the item is created and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A shortened form suitable for table display.
    #[must_use]
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(Self::SHORT_LEN)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }

    /// Number of characters shown by [`ItemId::short`].
    pub const SHORT_LEN: usize = 8;
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single stocked item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, used as the deletion key.
    pub id: ItemId,
    /// Display name, unique across the inventory ignoring case.
    pub name: String,
    /// Units on hand.
    pub quantity: f64,
    /// Price per unit.
    pub price: f64,
}

impl Item {
    /// Create an item from a validated payload, assigning a fresh id.
    #[must_use]
    pub fn from_new(new_item: NewItem) -> Self {
        Self {
            id: ItemId::generate(),
            name: new_item.name,
            quantity: new_item.quantity,
            price: new_item.price,
        }
    }

    /// Quantity multiplied by unit price.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.quantity * self.price
    }

    /// Whether this item's name matches `name` ignoring case.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// An accepted item payload that has not yet been assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Trimmed item name.
    pub name: String,
    /// Parsed, non-negative quantity.
    pub quantity: f64,
    /// Parsed, non-negative unit price.
    pub price: f64,
}

/// Ordered collection of items; insertion order is display order.
///
/// No two items share a name when compared case-insensitively. The
/// invariant is checked by validation before anything is pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from items already known to satisfy the invariants.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by id.
    #[must_use]
    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Find an item by name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name_matches(name))
    }

    /// Append an item to the end.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove the item with the given id, keeping the order of the rest.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Remove every item, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Resolve a full id or an unambiguous id prefix to an item id.
    ///
    /// Returns `None` when nothing matches or the prefix is ambiguous.
    #[must_use]
    pub fn resolve_id(&self, prefix: &str) -> Option<ItemId> {
        if prefix.is_empty() {
            return None;
        }
        if let Some(item) = self.items.iter().find(|item| item.id.as_str() == prefix) {
            return Some(item.id.clone());
        }

        let mut matches = self
            .items
            .iter()
            .filter(|item| item.id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Some(item.id.clone()),
            _ => None,
        }
    }

    /// Aggregate totals across all items.
    #[must_use]
    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            item_count: self.items.len(),
            total_quantity: self.items.iter().map(|item| item.quantity).sum(),
            total_value: self.items.iter().map(Item::total_value).sum(),
        }
    }
}

/// Totals across the whole inventory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventorySummary {
    /// Number of items.
    pub item_count: usize,
    /// Sum of all quantities.
    pub total_quantity: f64,
    /// Sum of all quantity × price products.
    pub total_value: f64,
}

/// What the chart plots for each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DisplayMode {
    /// Bar height is the quantity on hand.
    #[default]
    Quantity,
    /// Bar height is quantity × price.
    Value,
}

impl DisplayMode {
    /// Both modes in toggle order.
    pub const ALL: [Self; 2] = [Self::Quantity, Self::Value];

    /// Label shown on the mode toggle.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Quantity => "Quantity",
            Self::Value => "Value",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity => write!(f, "quantity"),
            Self::Value => write!(f, "value"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantity" | "qty" => Ok(Self::Quantity),
            "value" => Ok(Self::Value),
            other => Err(format!("unknown display mode '{other}'")),
        }
    }
}

/// One of the three form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// The item name input.
    Name,
    /// The quantity input.
    Quantity,
    /// The unit price input.
    Price,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Quantity, Self::Price];

    /// Human-readable label for the input.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Item Name",
            Self::Quantity => "Quantity",
            Self::Price => "Price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Quantity => write!(f, "quantity"),
            Self::Price => write!(f, "price"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "quantity" | "qty" => Ok(Self::Quantity),
            "price" => Ok(Self::Price),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}
