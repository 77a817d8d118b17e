//! Chart view: keeps one bar chart in step with the inventory.

use crate::format::NumberFormat;
use crate::model::{DisplayMode, Inventory};

use super::bar_chart::{BarChart, ChartData, ChartStyle, Scale};

/// Chart title in quantity mode.
pub const QUANTITY_TITLE: &str = "Total Quantity Overview";

/// Chart title in value mode.
pub const VALUE_TITLE: &str = "Total Value Overview";

/// Labels, values, and presentation settings for one display mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Bar labels (item names).
    pub labels: Vec<String>,
    /// Bar heights.
    pub values: Vec<f64>,
    /// Dataset label, also the tooltip prefix.
    pub label: &'static str,
    /// Tick and tooltip formatting.
    pub scale: Scale,
}

impl Dataset {
    /// Derive the dataset for `mode` from the inventory.
    #[must_use]
    pub fn derive(mode: DisplayMode, inventory: &Inventory) -> Self {
        let labels = inventory.items().iter().map(|i| i.name.clone()).collect();
        match mode {
            DisplayMode::Quantity => Self {
                labels,
                values: inventory.items().iter().map(|i| i.quantity).collect(),
                label: "Quantity",
                scale: Scale::Count,
            },
            DisplayMode::Value => Self {
                labels,
                values: inventory.items().iter().map(|i| i.total_value()).collect(),
                label: "Total Value",
                scale: Scale::Money,
            },
        }
    }
}

/// Title shown above the chart for a mode.
#[must_use]
pub fn title_for(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Quantity => QUANTITY_TITLE,
        DisplayMode::Value => VALUE_TITLE,
    }
}

/// Owns the display mode and the single chart instance.
///
/// The chart is created by the first [`ChartView::render`] and updated in
/// place by every later render or mode change.
#[derive(Debug)]
pub struct ChartView {
    mode: DisplayMode,
    chart: Option<BarChart>,
    format: NumberFormat,
    style: ChartStyle,
    constructions: usize,
}

impl ChartView {
    /// Create a view in quantity mode with no chart yet.
    #[must_use]
    pub fn new(format: NumberFormat, style: ChartStyle) -> Self {
        Self {
            mode: DisplayMode::default(),
            chart: None,
            format,
            style,
            constructions: 0,
        }
    }

    /// Current display mode.
    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Title for the current mode.
    #[must_use]
    pub fn title(&self) -> &'static str {
        title_for(self.mode)
    }

    /// The chart, once rendered.
    #[must_use]
    pub fn chart(&self) -> Option<&BarChart> {
        self.chart.as_ref()
    }

    /// How many chart instances have been constructed (at most one).
    #[must_use]
    pub fn constructions(&self) -> usize {
        self.constructions
    }

    /// Bring the chart up to date with `inventory`.
    pub fn render(&mut self, inventory: &Inventory) -> &BarChart {
        let dataset = Dataset::derive(self.mode, inventory);

        match &mut self.chart {
            Some(chart) => {
                chart.set_labels(dataset.labels);
                chart.set_values(dataset.values);
                chart.set_dataset_label(dataset.label);
                chart.set_scale(dataset.scale);
                chart.update();
                chart
            }
            slot @ None => {
                self.constructions += 1;
                slot.insert(BarChart::new(
                    ChartData {
                        labels: dataset.labels,
                        values: dataset.values,
                        dataset_label: dataset.label.to_string(),
                    },
                    dataset.scale,
                    self.style,
                    self.format.clone(),
                ))
            }
        }
    }

    /// Switch display mode and redraw from `inventory`.
    pub fn set_mode(&mut self, mode: DisplayMode, inventory: &Inventory) -> &BarChart {
        self.mode = mode;
        self.render(inventory)
    }
}
