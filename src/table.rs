use crate::data::model::Penguin;

/// Shown for a missing cell.
pub const MISSING_CELL: &str = "NA";

// ---------------------------------------------------------------------------
// Table columns
// ---------------------------------------------------------------------------

/// Columns of the data table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Species,
    Island,
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
    Sex,
    Year,
}

impl TableColumn {
    pub const ALL: [TableColumn; 8] = [
        TableColumn::Species,
        TableColumn::Island,
        TableColumn::BillLength,
        TableColumn::BillDepth,
        TableColumn::FlipperLength,
        TableColumn::BodyMass,
        TableColumn::Sex,
        TableColumn::Year,
    ];

    pub fn title(self) -> &'static str {
        match self {
            TableColumn::Species => "Species",
            TableColumn::Island => "Island",
            TableColumn::BillLength => "Bill Length (mm)",
            TableColumn::BillDepth => "Bill Depth (mm)",
            TableColumn::FlipperLength => "Flipper Length (mm)",
            TableColumn::BodyMass => "Body Mass (g)",
            TableColumn::Sex => "Sex",
            TableColumn::Year => "Year",
        }
    }

    /// Right-align numbers.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            TableColumn::Species | TableColumn::Island | TableColumn::Sex
        )
    }

    /// Cell text: bill measurements with one decimal, other numbers as integers.
    pub fn cell_text(self, p: &Penguin) -> String {
        let decimals = |v: Option<f64>, places: usize| match v {
            Some(v) => format!("{v:.places$}"),
            None => MISSING_CELL.to_string(),
        };
        match self {
            TableColumn::Species => p.species.clone(),
            TableColumn::Island => p.island.clone(),
            TableColumn::BillLength => decimals(p.bill_length_mm, 1),
            TableColumn::BillDepth => decimals(p.bill_depth_mm, 1),
            TableColumn::FlipperLength => decimals(p.flipper_length_mm, 0),
            TableColumn::BodyMass => decimals(p.body_mass_g, 0),
            TableColumn::Sex => p.sex.clone().unwrap_or_else(|| MISSING_CELL.to_string()),
            TableColumn::Year => p
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| MISSING_CELL.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Current page of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// At least one page, even for an empty table.
    pub fn page_count(&self, rows: usize) -> usize {
        rows.div_ceil(self.page_size).max(1)
    }

    /// Row indices shown on the current page.
    pub fn rows(&self, rows: usize) -> std::ops::Range<usize> {
        let start = (self.page * self.page_size).min(rows);
        start..(start + self.page_size).min(rows)
    }

    pub fn next(&mut self, rows: usize) {
        if self.page + 1 < self.page_count(rows) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Keep the page in range after the row count changes.
    pub fn clamp(&mut self, rows: usize) {
        self.page = self.page.min(self.page_count(rows) - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::penguin;

    #[test]
    fn numbers_use_column_formats() {
        let mut p = penguin("Adelie", 39.1, 18.0);
        p.flipper_length_mm = Some(181.0);
        p.body_mass_g = Some(3750.0);
        assert_eq!(TableColumn::BillLength.cell_text(&p), "39.1");
        assert_eq!(TableColumn::BillDepth.cell_text(&p), "18.0");
        assert_eq!(TableColumn::FlipperLength.cell_text(&p), "181");
        assert_eq!(TableColumn::BodyMass.cell_text(&p), "3750");
        assert_eq!(TableColumn::Year.cell_text(&p), "2008");
    }

    #[test]
    fn missing_cells_show_na() {
        let mut p = penguin("Adelie", 39.1, 18.0);
        p.bill_length_mm = None;
        p.sex = None;
        p.year = None;
        assert_eq!(TableColumn::BillLength.cell_text(&p), MISSING_CELL);
        assert_eq!(TableColumn::Sex.cell_text(&p), MISSING_CELL);
        assert_eq!(TableColumn::Year.cell_text(&p), MISSING_CELL);
        assert_eq!(TableColumn::Species.cell_text(&p), "Adelie");
    }

    #[test]
    fn pages_cover_all_rows() {
        let mut pager = Pager::new(10);
        assert_eq!(pager.page_count(22), 3);
        assert_eq!(pager.rows(22), 0..10);
        pager.next(22);
        pager.next(22);
        assert_eq!(pager.rows(22), 20..22);
        pager.next(22);
        assert_eq!(pager.page(), 2);
        pager.prev();
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let pager = Pager::new(10);
        assert_eq!(pager.page_count(0), 1);
        assert!(pager.rows(0).is_empty());
    }

    #[test]
    fn clamp_after_shrink() {
        let mut pager = Pager::new(5);
        for _ in 0..4 {
            pager.next(22);
        }
        assert_eq!(pager.page(), 4);
        pager.clamp(7);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.rows(7), 5..7);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let pager = Pager::new(0);
        assert_eq!(pager.page_count(3), 3);
    }
}
