//! Reading and writing the inventory blob.
//!
//! The whole inventory is stored as one JSON document under
//! [`INVENTORY_KEY`]. Loading never fails: anything that is not a valid
//! document of the current [`SCHEMA_VERSION`] yields an empty inventory.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Inventory, Item};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized inventory.
pub const INVENTORY_KEY: &str = "stockroom.inventory";

/// Version tag written into every saved document.
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk shape of the inventory.
#[derive(Debug, Serialize, Deserialize)]
struct InventoryRecord {
    version: u32,
    saved_at: DateTime<Utc>,
    items: Vec<Item>,
}

/// Loads and saves an [`Inventory`] through a key-value store.
#[derive(Debug)]
pub struct Persistence<K> {
    store: K,
}

impl<K: KeyValueStore> Persistence<K> {
    /// Wrap a key-value store.
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Read the saved inventory.
    ///
    /// Returns an empty inventory when nothing is stored, when the stored
    /// document cannot be parsed, or when its contents break the inventory
    /// invariants.
    pub fn load(&self) -> Inventory {
        let blob = match self.store.get(INVENTORY_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("No saved inventory under {}", INVENTORY_KEY);
                return Inventory::new();
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved inventory, starting empty");
                return Inventory::new();
            }
        };

        match decode(&blob) {
            Ok(inventory) => {
                debug!("Loaded {} items", inventory.len());
                inventory
            }
            Err(reason) => {
                warn!(%reason, "Discarding unreadable saved inventory, starting empty");
                Inventory::new()
            }
        }
    }

    /// Overwrite the saved inventory with `inventory`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if serialization or the store write fails.
    pub fn save(&mut self, inventory: &Inventory) -> Result<()> {
        let blob = encode(inventory).map_err(|e| Error::persist(INVENTORY_KEY, e.to_string()))?;
        self.store
            .set(INVENTORY_KEY, &blob)
            .map_err(|e| Error::persist(INVENTORY_KEY, e.to_string()))?;
        debug!("Saved {} items", inventory.len());
        Ok(())
    }
}

fn encode(inventory: &Inventory) -> serde_json::Result<String> {
    let record = InventoryRecord {
        version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        items: inventory.items().to_vec(),
    };
    serde_json::to_string(&record)
}

/// Parse a stored document, rejecting anything the inventory could not
/// have produced itself.
fn decode(blob: &str) -> std::result::Result<Inventory, String> {
    let record: InventoryRecord = serde_json::from_str(blob).map_err(|e| e.to_string())?;

    if record.version != SCHEMA_VERSION {
        return Err(format!(
            "unsupported schema version {} (expected {SCHEMA_VERSION})",
            record.version
        ));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for item in &record.items {
        if item.id.as_str().is_empty() || !ids.insert(item.id.clone()) {
            return Err(format!("missing or duplicate id '{}'", item.id));
        }
        let name = item.name.trim();
        if name.is_empty() || !names.insert(name.to_lowercase()) {
            return Err(format!("missing or duplicate name '{}'", item.name));
        }
        for (label, value) in [("quantity", item.quantity), ("price", item.price)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("invalid {label} {value} for '{}'", item.name));
            }
        }
        if !item.total_value().is_finite() {
            return Err(format!("total value overflows for '{}'", item.name));
        }
    }

    Ok(Inventory::from_items(record.items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use crate::storage::{MemoryStore, SqliteStore};

    fn item(id: &str, name: &str, quantity: f64, price: f64) -> Item {
        Item {
            id: ItemId::from(id),
            name: name.to_string(),
            quantity,
            price,
        }
    }

    fn sample() -> Inventory {
        Inventory::from_items(vec![
            item("a1", "Bolts", 100.0, 0.25),
            item("b2", "Screws", 50.0, 0.10),
        ])
    }

    fn load_blob(blob: &str) -> Inventory {
        Persistence::new(MemoryStore::new().with_entry(INVENTORY_KEY, blob)).load()
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let persistence = Persistence::new(MemoryStore::new());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_items_and_order() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&sample()).unwrap();

        assert_eq!(persistence.load(), sample());
    }

    #[test]
    fn test_save_then_load_sqlite() {
        let mut persistence = Persistence::new(SqliteStore::open_in_memory().unwrap());
        persistence.save(&sample()).unwrap();

        assert_eq!(persistence.load(), sample());
        assert!(persistence.store().updated_at(INVENTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&sample()).unwrap();
        persistence.save(&Inventory::new()).unwrap();

        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_saved_document_is_versioned() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&sample()).unwrap();

        let blob = persistence.store().get(INVENTORY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert!(value["saved_at"].is_string());
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_load_garbage_is_empty() {
        assert!(load_blob("not json at all").is_empty());
        assert!(load_blob("").is_empty());
    }

    #[test]
    fn test_load_bare_array_is_empty() {
        let blob = r#"[{"id":"1","name":"Bolts","quantity":1,"price":1}]"#;
        assert!(load_blob(blob).is_empty());
    }

    #[test]
    fn test_load_wrong_version_is_empty() {
        let blob = r#"{"version":2,"saved_at":"2024-01-01T00:00:00Z","items":[]}"#;
        assert!(load_blob(blob).is_empty());
    }

    #[test]
    fn test_load_negative_quantity_is_empty() {
        let blob = r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z",
            "items":[{"id":"1","name":"Bolts","quantity":-1,"price":1}]}"#;
        assert!(load_blob(blob).is_empty());
    }

    #[test]
    fn test_load_overflowing_total_is_empty() {
        let blob = r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z",
            "items":[{"id":"1","name":"Bolts","quantity":1e308,"price":10}]}"#;
        assert!(load_blob(blob).is_empty());
    }

    #[test]
    fn test_load_duplicate_names_is_empty() {
        let blob = r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z","items":[
            {"id":"1","name":"Bolts","quantity":1,"price":1},
            {"id":"2","name":"BOLTS","quantity":1,"price":1}]}"#;
        assert!(load_blob(blob).is_empty());
    }

    #[test]
    fn test_load_duplicate_ids_is_empty() {
        let blob = r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z","items":[
            {"id":"1","name":"Bolts","quantity":1,"price":1},
            {"id":"1","name":"Nuts","quantity":1,"price":1}]}"#;
        assert!(load_blob(blob).is_empty());
    }

    #[test]
    fn test_load_valid_document() {
        let blob = r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z","items":[
            {"id":"1","name":"Bolts","quantity":100,"price":0.25}]}"#;
        let inventory = load_blob(blob);
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.items()[0].name, "Bolts");
    }

    #[test]
    fn test_save_over_quota_fails() {
        let mut persistence = Persistence::new(MemoryStore::with_quota(16));
        let err = persistence.save(&sample()).unwrap_err();

        assert!(err.is_persist_error());
        assert!(persistence.load().is_empty());
    }
}
