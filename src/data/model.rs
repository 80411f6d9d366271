use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// NumericColumn – a plottable measurement column
// ---------------------------------------------------------------------------

/// The numeric columns of the penguins table, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericColumn {
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
    Year,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::BillLengthMm,
        NumericColumn::BillDepthMm,
        NumericColumn::FlipperLengthMm,
        NumericColumn::BodyMassG,
        NumericColumn::Year,
    ];

    /// Raw column name as it appears in the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::BillLengthMm => "bill_length_mm",
            NumericColumn::BillDepthMm => "bill_depth_mm",
            NumericColumn::FlipperLengthMm => "flipper_length_mm",
            NumericColumn::BodyMassG => "body_mass_g",
            NumericColumn::Year => "year",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Read this column from a record as `f64`.
    pub fn value(self, penguin: &Penguin) -> Option<f64> {
        match self {
            NumericColumn::BillLengthMm => penguin.bill_length_mm,
            NumericColumn::BillDepthMm => penguin.bill_depth_mm,
            NumericColumn::FlipperLengthMm => penguin.flipper_length_mm,
            NumericColumn::BodyMassG => penguin.body_mass_g,
            NumericColumn::Year => penguin.year.map(|y| y as f64),
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the table
// ---------------------------------------------------------------------------

/// A single observation. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Penguin {
    pub species: String,
    pub island: String,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<String>,
    pub year: Option<i64>,
}

impl Penguin {
    /// True when every field carries a value.
    pub fn is_complete(&self) -> bool {
        self.bill_length_mm.is_some()
            && self.bill_depth_mm.is_some()
            && self.flipper_length_mm.is_some()
            && self.body_mass_g.is_some()
            && self.sex.is_some()
            && self.year.is_some()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table plus the species index used for colour grouping.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in file order.
    pub penguins: Vec<Penguin>,
    /// Sorted unique species names.
    pub species: BTreeSet<String>,
}

impl Dataset {
    pub fn from_penguins(penguins: Vec<Penguin>) -> Self {
        let species = penguins.iter().map(|p| p.species.clone()).collect();
        Dataset { penguins, species }
    }

    /// Columns offered in the axis dropdowns.
    pub fn numeric_columns(plot_year: bool) -> Vec<NumericColumn> {
        NumericColumn::ALL
            .into_iter()
            .filter(|c| plot_year || *c != NumericColumn::Year)
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.penguins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.penguins.is_empty()
    }

    /// Number of records with at least one missing field.
    pub fn incomplete_count(&self) -> usize {
        self.penguins.iter().filter(|p| !p.is_complete()).count()
    }
}
