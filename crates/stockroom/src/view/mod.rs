//! Views over the inventory: a table and a bar chart.
//!
//! Views never mutate the inventory. [`ListView`] is a pure function of the
//! items; [`ChartView`] also owns the display mode and a single long-lived
//! [`BarChart`].

pub mod bar_chart;
pub mod chart;
pub mod list;

pub use bar_chart::{BarChart, ChartData, ChartStyle, Scale};
pub use chart::{title_for, ChartView, Dataset};
pub use list::{ItemRow, ListView, RowAction, TableRow, TableView};
