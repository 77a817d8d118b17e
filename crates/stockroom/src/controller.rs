//! Event handling between a [`Surface`] and the inventory.
//!
//! The controller owns the store, both views, and the surface. Each event is
//! handled to completion before the next one is read.

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::format::NumberFormat;
use crate::model::{DisplayMode, Field, Item, ItemId};
use crate::storage::KeyValueStore;
use crate::store::InventoryStore;
use crate::surface::Surface;
use crate::validation::{validate, FieldErrors, RawItem};
use crate::view::{title_for, ChartStyle, ChartView, ListView};

/// Prompt shown before clearing a non-empty inventory.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear all items?";

/// A user action delivered to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The form was submitted.
    Submit,
    /// A row's delete action was triggered.
    Delete(ItemId),
    /// The clear-all action was triggered.
    ClearAll,
    /// A form input received new text.
    FieldInput(Field),
    /// A mode toggle was activated.
    SetMode(DisplayMode),
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new item was added.
    Added(Item),
    /// The form had errors; nothing changed.
    Rejected(FieldErrors),
    /// An item was removed.
    Deleted(Item),
    /// No item had the given id.
    NotFound(ItemId),
    /// This many items were removed.
    Cleared(usize),
    /// The user declined to clear.
    ClearDeclined,
    /// There was nothing to clear.
    AlreadyEmpty,
    /// A field's error marker was removed.
    FieldCleared(Field),
    /// The chart switched to this mode.
    ModeChanged(DisplayMode),
}

/// Binds an [`InventoryStore`] to a [`Surface`].
#[derive(Debug)]
pub struct Controller<K, S> {
    store: InventoryStore<K>,
    list_view: ListView,
    chart_view: ChartView,
    surface: S,
}

impl<K: KeyValueStore, S: Surface> Controller<K, S> {
    /// Attach to a surface and draw both views.
    ///
    /// Returns `None` when the surface has no item form.
    pub fn mount(surface: S, store: InventoryStore<K>, config: &Config) -> Option<Self> {
        let style = ChartStyle {
            width: config.chart.width,
        };
        Self::mount_with(surface, store, config.number_format(), style)
    }

    /// Like [`mount`](Self::mount), with explicit formatting.
    pub fn mount_with(
        surface: S,
        store: InventoryStore<K>,
        format: NumberFormat,
        style: ChartStyle,
    ) -> Option<Self> {
        if !surface.has_form() {
            debug!("Surface has no item form, staying inert");
            return None;
        }

        let mut controller = Self {
            store,
            list_view: ListView::new(format.clone()),
            chart_view: ChartView::new(format, style),
            surface,
        };
        controller.render();
        debug!(items = controller.store.len(), "Controller mounted");
        Some(controller)
    }

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails or the surface cannot ask for
    /// confirmation. A failed save leaves the inventory as it was.
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome> {
        debug!(?event, "Dispatching event");
        match event {
            Event::Submit => self.submit(),
            Event::Delete(id) => self.delete(&id),
            Event::ClearAll => self.clear_all(),
            Event::FieldInput(field) => {
                self.surface.clear_field_error(field);
                Ok(Outcome::FieldCleared(field))
            }
            Event::SetMode(mode) => {
                self.draw_chart(Some(mode));
                Ok(Outcome::ModeChanged(mode))
            }
        }
    }

    fn submit(&mut self) -> Result<Outcome> {
        let raw = RawItem::new(
            self.surface.field_value(Field::Name),
            self.surface.field_value(Field::Quantity),
            self.surface.field_value(Field::Price),
        );

        let new_item = match validate(&raw, self.store.inventory()) {
            Ok(new_item) => new_item,
            Err(errors) => {
                for (field, message) in errors.iter() {
                    self.surface.show_field_error(field, message);
                }
                debug!(errors = %errors, "Submission rejected");
                return Ok(Outcome::Rejected(errors));
            }
        };

        for field in Field::ALL {
            self.surface.clear_field_error(field);
        }

        let item = self.store.add(new_item)?.clone();

        self.surface.reset_form();
        self.surface.focus(Field::Name);
        self.render();
        Ok(Outcome::Added(item))
    }

    fn delete(&mut self, id: &ItemId) -> Result<Outcome> {
        match self.store.delete(id)? {
            Some(item) => {
                self.render();
                Ok(Outcome::Deleted(item))
            }
            None => Ok(Outcome::NotFound(id.clone())),
        }
    }

    fn clear_all(&mut self) -> Result<Outcome> {
        if self.store.is_empty() {
            return Ok(Outcome::AlreadyEmpty);
        }

        if !self.surface.confirm(CLEAR_PROMPT)? {
            debug!("Clear declined");
            return Ok(Outcome::ClearDeclined);
        }

        let removed = self.store.clear_all()?;
        self.render();
        Ok(Outcome::Cleared(removed))
    }

    /// Redraw the table and the chart from the current inventory.
    pub fn render(&mut self) {
        let table = self.list_view.render(self.store.inventory());
        self.surface.render_table(&table);
        self.render_chart();
    }

    fn render_chart(&mut self) {
        self.draw_chart(None);
    }

    /// Update the chart in place, switching mode first if one is given.
    fn draw_chart(&mut self, switch_to: Option<DisplayMode>) {
        let mode = switch_to.unwrap_or_else(|| self.chart_view.mode());
        let inventory = self.store.inventory();
        let chart = match switch_to {
            Some(mode) => self.chart_view.set_mode(mode, inventory),
            None => self.chart_view.render(inventory),
        };
        self.surface.set_chart_title(title_for(mode));
        self.surface.set_active_mode(mode);
        self.surface.render_chart(chart);
    }

    /// The inventory store.
    pub fn store(&self) -> &InventoryStore<K> {
        &self.store
    }

    /// The chart view.
    pub fn chart_view(&self) -> &ChartView {
        &self.chart_view
    }

    /// Current display mode.
    pub fn mode(&self) -> DisplayMode {
        self.chart_view.mode()
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Detach, returning the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
