//! The inventory store: in-memory items kept in step with storage.
//!
//! Every successful mutation rewrites the whole inventory. When that write
//! fails the mutation is undone, so the in-memory list never runs ahead of
//! what is saved.

use tracing::{info, warn};

use crate::error::Result;
use crate::model::{Inventory, InventorySummary, Item, ItemId, NewItem};
use crate::persistence::Persistence;
use crate::storage::KeyValueStore;

/// Ordered item list backed by a [`Persistence`] adapter.
#[derive(Debug)]
pub struct InventoryStore<K> {
    inventory: Inventory,
    persistence: Persistence<K>,
}

impl<K: KeyValueStore> InventoryStore<K> {
    /// Load the saved inventory and wrap it.
    pub fn open(persistence: Persistence<K>) -> Self {
        let inventory = persistence.load();
        Self {
            inventory,
            persistence,
        }
    }

    /// The current inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        self.inventory.items()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Find an item by id.
    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.inventory.find(id)
    }

    /// Resolve a full id or unique id prefix.
    pub fn resolve_id(&self, prefix: &str) -> Option<ItemId> {
        self.inventory.resolve_id(prefix)
    }

    /// Totals across all items.
    pub fn summary(&self) -> InventorySummary {
        self.inventory.summary()
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &Persistence<K> {
        &self.persistence
    }

    /// Append a validated item and save.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails; the item is not kept.
    pub fn add(&mut self, new_item: NewItem) -> Result<&Item> {
        let item = Item::from_new(new_item);
        let id = item.id.clone();
        self.inventory.push(item);

        if let Err(e) = self.persistence.save(&self.inventory) {
            self.inventory.remove(&id);
            warn!(error = %e, "Save failed, add rolled back");
            return Err(e);
        }

        let added = &self.inventory.items()[self.inventory.len() - 1];
        info!(id = %added.id, name = %added.name, "Added item");
        Ok(added)
    }

    /// Remove the item with `id` and save.
    ///
    /// An unknown id is not an error: nothing changes, nothing is written,
    /// and `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails; the item is restored in place.
    pub fn delete(&mut self, id: &ItemId) -> Result<Option<Item>> {
        let Some(index) = self.items().iter().position(|item| &item.id == id) else {
            return Ok(None);
        };

        let previous = self.inventory.clone();
        let removed = self.inventory.remove(id);

        if let Err(e) = self.persistence.save(&self.inventory) {
            self.inventory = previous;
            warn!(error = %e, "Save failed, delete rolled back");
            return Err(e);
        }

        info!(%id, index, "Deleted item");
        Ok(removed)
    }

    /// Remove every item and save, returning how many were removed.
    ///
    /// Clearing an empty inventory does nothing and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails; the items are restored.
    pub fn clear_all(&mut self) -> Result<usize> {
        if self.inventory.is_empty() {
            return Ok(0);
        }

        let previous = self.inventory.clone();
        let removed = self.inventory.clear();

        if let Err(e) = self.persistence.save(&self.inventory) {
            self.inventory = previous;
            warn!(error = %e, "Save failed, clear rolled back");
            return Err(e);
        }

        info!(removed, "Cleared inventory");
        Ok(removed)
    }
}
