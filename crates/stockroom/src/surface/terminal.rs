//! Terminal implementation of [`Surface`].
//!
//! Rendering only updates what the surface holds; [`TerminalSurface::present`]
//! writes whatever changed since the last call.

use std::io::{BufRead, Write};

use tracing::debug;

use super::{Form, Surface};
use crate::error::Result;
use crate::model::{DisplayMode, Field};
use crate::view::{BarChart, TableView};

/// Which views a terminal surface writes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSelection {
    /// Write the table.
    pub table: bool,
    /// Write the chart.
    pub chart: bool,
}

impl ViewSelection {
    /// Table and chart.
    pub const ALL: Self = Self {
        table: true,
        chart: true,
    };
    /// Table only.
    pub const TABLE: Self = Self {
        table: true,
        chart: false,
    };
    /// Chart only.
    pub const CHART: Self = Self {
        table: false,
        chart: true,
    };
    /// Neither view.
    pub const NONE: Self = Self {
        table: false,
        chart: false,
    };
}

/// A surface drawn as text on a writer, answering prompts from a reader.
#[derive(Debug)]
pub struct TerminalSurface<W, R> {
    out: W,
    input: R,
    form: Form,
    views: ViewSelection,
    assume_yes: bool,
    table: Option<String>,
    table_dirty: bool,
    chart_title: String,
    active_mode: DisplayMode,
    chart_frame: Option<String>,
    chart_dirty: bool,
    errors_dirty: bool,
}

impl<W: Write, R: BufRead> TerminalSurface<W, R> {
    /// Create a surface writing to `out` and reading answers from `input`.
    pub fn new(out: W, input: R) -> Self {
        Self {
            out,
            input,
            form: Form::new(),
            views: ViewSelection::ALL,
            assume_yes: false,
            table: None,
            table_dirty: false,
            chart_title: String::new(),
            active_mode: DisplayMode::default(),
            chart_frame: None,
            chart_dirty: false,
            errors_dirty: false,
        }
    }

    /// Choose which views [`present`](Self::present) writes.
    #[must_use]
    pub fn with_views(mut self, views: ViewSelection) -> Self {
        self.views = views;
        self
    }

    /// Answer every confirmation with yes without asking.
    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Have the next present write the table again.
    pub fn invalidate_table(&mut self) {
        self.table_dirty = self.table.is_some();
    }

    /// Have the next present write the chart again.
    pub fn invalidate_chart(&mut self) {
        self.chart_dirty = self.chart_frame.is_some();
    }

    /// The item form.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Mutable access to the item form, for typing into it.
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// The current chart title.
    pub fn chart_title(&self) -> &str {
        &self.chart_title
    }

    /// The mode whose toggle is active.
    pub fn active_mode(&self) -> DisplayMode {
        self.active_mode
    }

    /// Write a line of text directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    /// Write new field errors and any changed views.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn present(&mut self) -> Result<()> {
        if self.errors_dirty {
            for (field, message) in self.form.errors() {
                writeln!(self.out, "  ! {}: {}", field.label(), message)?;
            }
            self.errors_dirty = false;
        }

        if self.table_dirty {
            if let (true, Some(table)) = (self.views.table, &self.table) {
                write!(self.out, "{table}")?;
            }
            self.table_dirty = false;
        }

        if self.chart_dirty {
            if let (true, Some(frame)) = (self.views.chart, &self.chart_frame) {
                if self.views.table {
                    writeln!(self.out)?;
                }
                writeln!(self.out, "{}", self.chart_title)?;
                writeln!(self.out, "{}", toggle_line(self.active_mode))?;
                write!(self.out, "{frame}")?;
            }
            self.chart_dirty = false;
        }

        self.out.flush()?;
        Ok(())
    }

    /// Read one line of input, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Write a prompt without a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Consume the surface, returning the writer.
    pub fn into_output(self) -> W {
        self.out
    }
}

/// The two mode toggles, with the active one bracketed.
fn toggle_line(active: DisplayMode) -> String {
    DisplayMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label())
            } else {
                format!(" {} ", mode.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<W: Write, R: BufRead> Surface for TerminalSurface<W, R> {
    fn has_form(&self) -> bool {
        true
    }

    fn field_value(&self, field: Field) -> String {
        self.form.value(field).to_string()
    }

    fn show_field_error(&mut self, field: Field, message: &str) {
        self.form.set_error(field, message);
        self.errors_dirty = true;
    }

    fn clear_field_error(&mut self, field: Field) {
        self.form.clear_error(field);
    }

    fn reset_form(&mut self) {
        self.form.reset();
    }

    fn focus(&mut self, field: Field) {
        self.form.focus(field);
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            debug!(prompt, "Confirmation assumed");
            return Ok(true);
        }

        self.prompt(&format!("{prompt} [y/N] "))?;
        let answer = self.read_line()?.unwrap_or_default();
        let accepted = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        debug!(prompt, accepted, "Confirmation answered");
        Ok(accepted)
    }

    fn render_table(&mut self, table: &TableView) {
        self.table = Some(table.to_text());
        self.table_dirty = true;
    }

    fn set_chart_title(&mut self, title: &str) {
        self.chart_title = title.to_string();
    }

    fn set_active_mode(&mut self, mode: DisplayMode) {
        self.active_mode = mode;
    }

    fn render_chart(&mut self, chart: &BarChart) {
        self.chart_frame = Some(chart.frame().to_string());
        self.chart_dirty = true;
    }
}
