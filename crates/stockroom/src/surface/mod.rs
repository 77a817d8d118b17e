//! The host surface the controller drives.
//!
//! A surface owns the item form, the table and chart areas, the chart title,
//! the two mode toggles, and the yes/no prompt. The controller only talks
//! to it through [`Surface`].

mod form;
mod terminal;

pub use form::Form;
pub use terminal::{TerminalSurface, ViewSelection};

use crate::error::Result;
use crate::model::{DisplayMode, Field};
use crate::view::{BarChart, TableView};

/// Everything the controller needs from its host.
pub trait Surface {
    /// Whether the item form is present. Without it the controller stays inert.
    fn has_form(&self) -> bool;

    /// Raw text of a form input.
    fn field_value(&self, field: Field) -> String;

    /// Mark an input invalid and show `message` beside it.
    fn show_field_error(&mut self, field: Field, message: &str);

    /// Remove an input's invalid marker and message.
    fn clear_field_error(&mut self, field: Field);

    /// Clear all form inputs.
    fn reset_form(&mut self);

    /// Move input focus to a field.
    fn focus(&mut self, field: Field);

    /// Ask a yes/no question, blocking until answered.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked or read.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Replace the table body.
    fn render_table(&mut self, table: &TableView);

    /// Replace the chart title text.
    fn set_chart_title(&mut self, title: &str);

    /// Mark one mode toggle active and the other inactive.
    fn set_active_mode(&mut self, mode: DisplayMode);

    /// Redraw the chart area.
    fn render_chart(&mut self, chart: &BarChart);
}
