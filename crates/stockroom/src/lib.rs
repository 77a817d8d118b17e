//! `stockroom` - A small inventory tracker
//!
//! This library keeps an ordered list of items (name, quantity, unit price),
//! validates new entries, saves the list as one versioned JSON document in a
//! key-value store, and renders it as a table and a bar chart on a
//! [`surface::Surface`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod shell;
pub mod storage;
pub mod store;
pub mod surface;
pub mod validation;
pub mod view;

pub use config::Config;
pub use controller::{Controller, Event, Outcome};
pub use error::{Error, Result};
pub use format::NumberFormat;
pub use logging::init_logging;
pub use model::{DisplayMode, Field, Inventory, InventorySummary, Item, ItemId, NewItem};
pub use persistence::Persistence;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageStats};
pub use store::InventoryStore;
pub use validation::{validate, FieldErrors, RawItem};
