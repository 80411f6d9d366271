use serde::Deserialize;

use crate::data::model::{Dataset, NumericColumn};

// ---------------------------------------------------------------------------
// Axis selection
// ---------------------------------------------------------------------------

/// The pair of columns currently plotted on the x and y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    pub x: NumericColumn,
    pub y: NumericColumn,
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self {
            x: NumericColumn::BillLengthMm,
            y: NumericColumn::BillDepthMm,
        }
    }
}

// ---------------------------------------------------------------------------
// Axis labels
// ---------------------------------------------------------------------------

/// How axis titles are produced from column names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// `bill_length_mm` → `Bill Length Mm`
    #[default]
    Derived,
    /// Hand-written titles with units, e.g. `Bill Length (mm)`.
    Fixed,
    /// The column name untouched.
    Raw,
}

impl LabelStyle {
    pub const ALL: [LabelStyle; 3] = [LabelStyle::Derived, LabelStyle::Fixed, LabelStyle::Raw];

    pub fn describe(self) -> &'static str {
        match self {
            LabelStyle::Derived => "Derived",
            LabelStyle::Fixed => "With units",
            LabelStyle::Raw => "Column names",
        }
    }
}

/// Human-readable axis title for `column`.
pub fn column_label(column: NumericColumn, style: LabelStyle) -> String {
    match style {
        LabelStyle::Derived => title_case(&column.name().replace('_', " ")),
        LabelStyle::Fixed => fixed_label(column).to_string(),
        LabelStyle::Raw => column.name().to_string(),
    }
}

/// Titles with units, matching the table headers.
pub fn fixed_label(column: NumericColumn) -> &'static str {
    match column {
        NumericColumn::BillLengthMm => "Bill Length (mm)",
        NumericColumn::BillDepthMm => "Bill Depth (mm)",
        NumericColumn::FlipperLengthMm => "Flipper Length (mm)",
        NumericColumn::BodyMassG => "Body Mass (g)",
        NumericColumn::Year => "Year",
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
/// A word starts after any non-alphabetic character.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

/// One plotted record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub species: String,
}

/// Render-ready description of the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub selection: AxisSelection,
    pub points: Vec<ChartPoint>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    /// Records left out because a selected value is missing.
    pub skipped: usize,
}

impl ChartSpec {
    /// Points belonging to one species, as `[x, y]` pairs for the plot widget.
    pub fn series_for(&self, species: &str) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .filter(|p| p.species == species)
            .map(|p| [p.x, p.y])
            .collect()
    }
}

/// Build the chart for `selection`. Pure: the result depends only on the
/// arguments, never on earlier selections.
pub fn render(dataset: &Dataset, selection: AxisSelection, style: LabelStyle) -> ChartSpec {
    let mut points = Vec::with_capacity(dataset.len());
    let mut skipped = 0;
    for penguin in &dataset.penguins {
        match (selection.x.value(penguin), selection.y.value(penguin)) {
            (Some(x), Some(y)) => points.push(ChartPoint {
                x,
                y,
                species: penguin.species.clone(),
            }),
            _ => skipped += 1,
        }
    }

    let x_label = column_label(selection.x, style);
    let y_label = column_label(selection.y, style);
    ChartSpec {
        selection,
        title: format!("Scatter Plot of {x_label} vs {y_label}"),
        points,
        x_label,
        y_label,
        skipped,
    }
}
