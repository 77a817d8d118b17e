//! A horizontal text bar chart.
//!
//! The chart is built once and then mutated in place: callers change the
//! labels, values, dataset label, or scale and call [`BarChart::update`] to
//! redraw. Each redraw bumps [`BarChart::revision`].

use crate::format::NumberFormat;

/// Glyph used to fill bars.
pub const BAR_GLYPH: char = '█';

/// Glyph for the vertical axis beside the labels.
pub const AXIS_GLYPH: char = '│';

/// Glyph for the horizontal tick axis.
pub const RULE_GLYPH: char = '─';

/// Corner glyph joining the two axes.
pub const CORNER_GLYPH: char = '└';

/// Target number of tick intervals along the value axis.
const TICK_INTERVALS: f64 = 4.0;

/// Fixed presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Character cells used by the longest possible bar.
    pub width: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self { width: 40 }
    }
}

/// How values are written on ticks and in tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Plain counts; ticks fall on whole numbers.
    Count,
    /// Money; ticks and tooltips are currency.
    Money,
}

impl Scale {
    fn tick_label(self, format: &NumberFormat, value: f64) -> String {
        match self {
            Self::Count => format.integer(value),
            Self::Money => format.currency(value),
        }
    }

    fn tooltip_value(self, format: &NumberFormat, value: f64) -> String {
        match self {
            Self::Count => format.quantity(value),
            Self::Money => format.currency(value),
        }
    }

    /// Distance between ticks for an axis that must reach `max`.
    fn tick_step(self, max: f64) -> f64 {
        let step = nice_step(max / TICK_INTERVALS);
        match self {
            Self::Count => step.max(1.0).ceil(),
            Self::Money => step,
        }
    }
}

/// Round a raw interval to 1, 2, or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_normal() || raw < 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    if !magnitude.is_normal() {
        return 1.0;
    }
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Labels and values for the single dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    /// One label per bar.
    pub labels: Vec<String>,
    /// One value per bar.
    pub values: Vec<f64>,
    /// Name of the dataset, used as the tooltip prefix.
    pub dataset_label: String,
}

/// A long-lived bar chart instance.
#[derive(Debug, Clone)]
pub struct BarChart {
    data: ChartData,
    scale: Scale,
    style: ChartStyle,
    format: NumberFormat,
    revision: u64,
    frame: String,
}

impl BarChart {
    /// Construct and draw a chart.
    #[must_use]
    pub fn new(data: ChartData, scale: Scale, style: ChartStyle, format: NumberFormat) -> Self {
        let mut chart = Self {
            data,
            scale,
            style,
            format,
            revision: 0,
            frame: String::new(),
        };
        chart.update();
        chart
    }

    /// Replace the bar labels.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.data.labels = labels;
    }

    /// Replace the bar values.
    pub fn set_values(&mut self, values: Vec<f64>) {
        self.data.values = values;
    }

    /// Replace the dataset label.
    pub fn set_dataset_label(&mut self, label: impl Into<String>) {
        self.data.dataset_label = label.into();
    }

    /// Change how ticks and tooltips are formatted.
    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    /// Redraw with the current data and options.
    pub fn update(&mut self) {
        self.frame = self.draw();
        self.revision += 1;
    }

    /// Bar labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Bar values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.data.values
    }

    /// Dataset label.
    #[must_use]
    pub fn dataset_label(&self) -> &str {
        &self.data.dataset_label
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Number of times the chart has been drawn.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The most recent drawing.
    #[must_use]
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Tooltip text for the bar at `index`.
    #[must_use]
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let value = *self.data.values.get(index)?;
        Some(format!(
            "{}: {}",
            self.data.dataset_label,
            self.scale.tooltip_value(&self.format, value)
        ))
    }

    /// Tick positions along the value axis, starting at zero.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        let max = self
            .data
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let step = self.scale.tick_step(max);

        let mut ticks = vec![0.0];
        let mut i = 1.0;
        while ticks[ticks.len() - 1] < max {
            let next = i * step;
            // Stop once the step no longer moves the axis.
            if !next.is_finite() || next <= ticks[ticks.len() - 1] {
                break;
            }
            ticks.push(next);
            i += 1.0;
        }
        if ticks.len() == 1 {
            ticks.push(step);
        }
        ticks
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn column(&self, value: f64, axis_max: f64) -> usize {
        if value == f64::INFINITY {
            return self.style.width;
        }
        if axis_max <= 0.0 || !value.is_finite() || value <= 0.0 {
            return 0;
        }
        let cells = (value / axis_max * self.style.width as f64).round() as usize;
        cells.min(self.style.width)
    }

    fn draw(&self) -> String {
        if self.data.labels.is_empty() {
            return "(no data)\n".to_string();
        }

        let ticks = self.ticks();
        let axis_max = ticks[ticks.len() - 1];
        let label_width = self
            .data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let width = self.style.width;

        let mut out = String::new();
        for (index, label) in self.data.labels.iter().enumerate() {
            let value = self.data.values.get(index).copied().unwrap_or(0.0);
            let cells = self.column(value, axis_max);
            let bar: String = std::iter::repeat(BAR_GLYPH).take(cells).collect();
            let tooltip = self.tooltip(index).unwrap_or_default();
            out.push_str(&format!(
                "{label:>label_width$} {AXIS_GLYPH}{bar:<width$} {tooltip}\n"
            ));
        }

        let rule: String = std::iter::repeat(RULE_GLYPH).take(width).collect();
        out.push_str(&format!(
            "{:>label_width$} {CORNER_GLYPH}{rule}\n",
            ""
        ));

        // Tick labels, skipping any that would collide with the previous one.
        let offset = label_width + 2;
        let mut line: Vec<char> = vec![' '; offset];
        for tick in &ticks {
            let text = self.scale.tick_label(&self.format, *tick);
            let start = offset + self.column(*tick, axis_max);
            let occupied = line.iter().rposition(|c| *c != ' ').map_or(0, |p| p + 2);
            if start < occupied {
                continue;
            }
            line.resize(start, ' ');
            line.extend(text.chars());
        }
        let tick_line: String = line.into_iter().collect();
        out.push_str(tick_line.trim_end());
        out.push('\n');

        out
    }
}
