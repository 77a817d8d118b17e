//! Table rendering of the inventory.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::format::NumberFormat;
use crate::model::{Inventory, ItemId};

/// Column headings, in display order.
pub const COLUMNS: [&str; 4] = ["Name", "Quantity", "Total Value", "Actions"];

/// Text shown when the inventory has no items.
pub const EMPTY_MESSAGE: &str = "No items in inventory.";

/// Something a row lets the user do, carrying the data it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
pub enum RowAction {
    /// Delete the item with this id.
    Delete(ItemId),
}

/// One rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    /// Item name.
    pub name: String,
    /// Formatted quantity.
    pub quantity: String,
    /// Formatted quantity × price.
    pub total_value: String,
    /// The delete affordance for this row.
    pub delete: RowAction,
}

/// A row of the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableRow {
    /// A single item.
    Item(ItemRow),
    /// A message spanning every column.
    Placeholder {
        /// Text to show.
        message: String,
        /// Number of columns spanned.
        span: usize,
    },
}

/// The rendered table body plus a summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    /// Body rows in inventory order.
    pub rows: Vec<TableRow>,
    /// Summary of item count and total value; absent when empty.
    pub footer: Option<String>,
}

impl TableView {
    /// Item rows only, skipping any placeholder.
    pub fn item_rows(&self) -> impl Iterator<Item = &ItemRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Item(item) => Some(item),
            TableRow::Placeholder { .. } => None,
        })
    }

    /// Draw the table with box borders, followed by the footer line.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(COLUMNS);

        for row in &self.rows {
            match row {
                TableRow::Item(item) => {
                    let RowAction::Delete(id) = &item.delete;
                    table.add_row(vec![
                        Cell::new(&item.name),
                        Cell::new(&item.quantity).set_alignment(CellAlignment::Right),
                        Cell::new(&item.total_value).set_alignment(CellAlignment::Right),
                        Cell::new(format!("delete {}", id.short())),
                    ]);
                }
                TableRow::Placeholder { message, span } => {
                    let mut cells = vec![Cell::new(message)];
                    cells.extend((1..*span).map(|_| Cell::new("")));
                    table.add_row(cells);
                }
            }
        }

        let mut out = table.to_string();
        out.push('\n');
        if let Some(footer) = &self.footer {
            out.push_str(footer);
            out.push('\n');
        }
        out
    }
}

/// Renders the inventory as a [`TableView`].
#[derive(Debug, Clone, Default)]
pub struct ListView {
    format: NumberFormat,
}

impl ListView {
    /// Create a list view using the given number format.
    #[must_use]
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    /// Build the table for `inventory`.
    #[must_use]
    pub fn render(&self, inventory: &Inventory) -> TableView {
        if inventory.is_empty() {
            return TableView {
                rows: vec![TableRow::Placeholder {
                    message: EMPTY_MESSAGE.to_string(),
                    span: COLUMNS.len(),
                }],
                footer: None,
            };
        }

        let rows = inventory
            .items()
            .iter()
            .map(|item| {
                TableRow::Item(ItemRow {
                    name: item.name.clone(),
                    quantity: self.format.quantity(item.quantity),
                    total_value: self.format.currency(item.total_value()),
                    delete: RowAction::Delete(item.id.clone()),
                })
            })
            .collect();

        let summary = inventory.summary();
        let noun = if summary.item_count == 1 { "item" } else { "items" };
        let footer = format!(
            "{} {noun}, total value {}",
            summary.item_count,
            self.format.currency(summary.total_value)
        );

        TableView {
            rows,
            footer: Some(footer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    fn item(id: &str, name: &str, quantity: f64, price: f64) -> Item {
        Item {
            id: ItemId::from(id),
            name: name.to_string(),
            quantity,
            price,
        }
    }

    fn bolts_and_screws() -> Inventory {
        Inventory::from_items(vec![
            item("aaaaaaaa1111", "Bolts", 100.0, 0.25),
            item("bbbbbbbb2222", "Screws", 50.0, 0.10),
        ])
    }

    #[test]
    fn test_empty_inventory_placeholder() {
        let table = ListView::default().render(&Inventory::new());

        assert_eq!(
            table.rows,
            vec![TableRow::Placeholder {
                message: EMPTY_MESSAGE.to_string(),
                span: 4,
            }]
        );
        assert!(table.footer.is_none());
        assert_eq!(table.item_rows().count(), 0);
    }

    #[test]
    fn test_rows_in_inventory_order() {
        let table = ListView::default().render(&bolts_and_screws());
        let names: Vec<_> = table.item_rows().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bolts", "Screws"]);
    }

    #[test]
    fn test_row_formatting() {
        let table = ListView::default().render(&bolts_and_screws());
        let first = table.item_rows().next().unwrap();

        assert_eq!(first.quantity, "100");
        assert_eq!(first.total_value, "$25.00");
        assert_eq!(first.delete, RowAction::Delete(ItemId::from("aaaaaaaa1111")));
    }

    #[test]
    fn test_total_value_thousands() {
        let inventory = Inventory::from_items(vec![item("x", "Pallets", 12.0, 1250.5)]);
        let table = ListView::default().render(&inventory);
        assert_eq!(table.item_rows().next().unwrap().total_value, "$15,006.00");
    }

    #[test]
    fn test_footer() {
        let table = ListView::default().render(&bolts_and_screws());
        assert_eq!(table.footer.as_deref(), Some("2 items, total value $30.00"));

        let single = Inventory::from_items(vec![item("x", "Bolts", 1.0, 2.0)]);
        let table = ListView::default().render(&single);
        assert_eq!(table.footer.as_deref(), Some("1 item, total value $2.00"));
    }

    #[test]
    fn test_to_text_contains_rows() {
        let text = ListView::default().render(&bolts_and_screws()).to_text();

        let header = text.lines().nth(1).unwrap();
        assert!(header.contains("Name"));
        assert!(header.contains("Total Value"));
        assert!(text.contains("Bolts"));
        assert!(text.contains("$25.00"));
        assert!(text.contains("delete aaaaaaaa"));
        assert!(!text.contains("aaaaaaaa1111"));
    }

    #[test]
    fn test_to_text_placeholder() {
        let text = ListView::default().render(&Inventory::new()).to_text();
        assert_eq!(text.matches(EMPTY_MESSAGE).count(), 1);
        assert!(!text.contains("total value"));
        assert!(text.starts_with('┌'));
    }

    #[test]
    fn test_to_text_footer_follows_table() {
        let text = ListView::default().render(&bolts_and_screws()).to_text();
        let mut lines = text.lines().rev();

        assert_eq!(lines.next(), Some("2 items, total value $30.00"));
        assert!(lines.next().unwrap().starts_with('└'));
    }

    #[test]
    fn test_row_action_serializes_with_id() {
        let json = serde_json::to_value(RowAction::Delete(ItemId::from("abc"))).unwrap();
        assert_eq!(json["action"], "delete");
        assert_eq!(json["id"], "abc");
    }
}
