use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::model::{Dataset, Penguin};
use crate::error::{LoadError, Result};

/// Sample of the Palmer Penguins table compiled into the binary.
pub const BUNDLED_CSV: &str = include_str!("../../assets/penguins_sample.csv");

/// Canonical location of the full table.
pub const PENGUINS_URL: &str =
    "https://raw.githubusercontent.com/allisonhorst/palmerpenguins/main/inst/extdata/penguins.csv";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cell contents treated as a missing value (compared case-insensitively).
const MISSING_MARKERS: [&str; 5] = ["", "na", "nan", "null", "none"];

const SPECIES: &str = "species";
const ISLAND: &str = "island";
const BILL_LENGTH: &str = "bill_length_mm";
const BILL_DEPTH: &str = "bill_depth_mm";
const FLIPPER_LENGTH: &str = "flipper_length_mm";
const BODY_MASS: &str = "body_mass_g";
const SEX: &str = "sex";
const YEAR: &str = "year";

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Where the dataset comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// The sample compiled into the binary.
    #[default]
    Bundled,
    /// A local `.csv`, `.json` or `.parquet` file.
    Path(PathBuf),
    /// A remote CSV file.
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Bundled => write!(f, "bundled sample"),
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => write!(f, "{u}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from any supported source. Missing values are kept;
/// apply a [`super::missing::MissingPolicy`] afterwards.
pub fn load_source(source: &DataSource) -> Result<Dataset> {
    match source {
        DataSource::Bundled => load_csv_reader(BUNDLED_CSV.as_bytes()),
        DataSource::Path(path) => load_file(path),
        DataSource::Url(url) => fetch_csv(url),
    }
}

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the eight penguin columns, any order
/// * `.json`    – `[{ "species": "Adelie", "bill_length_mm": 39.1, ... }, ...]`
/// * `.parquet` – one column per field (as written by pandas or polars)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv_reader(std::fs::File::open(path)?),
        "json" => load_json_str(&std::fs::read_to_string(path)?),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

fn fetch_csv(url: &str) -> Result<Dataset> {
    log::info!("Fetching {url}");
    let response = ureq::get(url)
        .timeout(HTTP_TIMEOUT)
        .call()
        .map_err(|err| LoadError::Http {
            url: url.to_string(),
            message: err.to_string(),
        })?;
    load_csv_reader(response.into_reader())
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m))
}

fn parse_text(cell: &str) -> Option<String> {
    if is_missing(cell) {
        None
    } else {
        Some(cell.trim().to_string())
    }
}

fn parse_float(cell: &str, row: usize, column: &str) -> Result<Option<f64>> {
    if is_missing(cell) {
        return Ok(None);
    }
    cell.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::invalid_value(row, column, cell))
}

/// Years may arrive as `2007` or, from float-typed columns, `2007.0`.
fn whole_number(value: f64, row: usize, column: &str) -> Result<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(LoadError::invalid_value(row, column, value.to_string()))
    }
}

fn parse_year(cell: &str, row: usize) -> Result<Option<i64>> {
    parse_float(cell, row, YEAR)?
        .map(|v| whole_number(v, row, YEAR))
        .transpose()
}

fn required(value: Option<String>, row: usize, column: &str) -> Result<String> {
    value.ok_or_else(|| LoadError::MissingField {
        row,
        column: column.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header positions of the eight penguin columns.
struct CsvColumns {
    species: usize,
    island: usize,
    bill_length_mm: usize,
    bill_depth_mm: usize,
    flipper_length_mm: usize,
    body_mass_g: usize,
    sex: usize,
    year: usize,
}

impl CsvColumns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::missing_column(name))
        };
        Ok(CsvColumns {
            species: find(SPECIES)?,
            island: find(ISLAND)?,
            bill_length_mm: find(BILL_LENGTH)?,
            bill_depth_mm: find(BILL_DEPTH)?,
            flipper_length_mm: find(FLIPPER_LENGTH)?,
            body_mass_g: find(BODY_MASS)?,
            sex: find(SEX)?,
            year: find(YEAR)?,
        })
    }
}

/// Parse CSV text with a header row. Extra columns are ignored.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let cols = CsvColumns::locate(reader.headers()?)?;

    let mut penguins = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        penguins.push(Penguin {
            species: required(parse_text(cell(cols.species)), row, SPECIES)?,
            island: required(parse_text(cell(cols.island)), row, ISLAND)?,
            bill_length_mm: parse_float(cell(cols.bill_length_mm), row, BILL_LENGTH)?,
            bill_depth_mm: parse_float(cell(cols.bill_depth_mm), row, BILL_DEPTH)?,
            flipper_length_mm: parse_float(cell(cols.flipper_length_mm), row, FLIPPER_LENGTH)?,
            body_mass_g: parse_float(cell(cols.body_mass_g), row, BODY_MASS)?,
            sex: parse_text(cell(cols.sex)),
            year: parse_year(cell(cols.year), row)?,
        });
    }

    Ok(Dataset::from_penguins(penguins))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
///
/// `null`, an absent key, or a missing marker string all mean "missing".
pub fn load_json_str(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    let mut penguins = Vec::with_capacity(records.len());
    for (row, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {row} is not a JSON object")))?;

        penguins.push(Penguin {
            species: required(json_text(obj, SPECIES), row, SPECIES)?,
            island: required(json_text(obj, ISLAND), row, ISLAND)?,
            bill_length_mm: json_float(obj, BILL_LENGTH, row)?,
            bill_depth_mm: json_float(obj, BILL_DEPTH, row)?,
            flipper_length_mm: json_float(obj, FLIPPER_LENGTH, row)?,
            body_mass_g: json_float(obj, BODY_MASS, row)?,
            sex: json_text(obj, SEX),
            year: json_float(obj, YEAR, row)?
                .map(|v| whole_number(v, row, YEAR))
                .transpose()?,
        });
    }

    Ok(Dataset::from_penguins(penguins))
}

fn json_text(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match obj.get(key)? {
        JsonValue::String(s) => parse_text(s),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

fn json_float(obj: &Map<String, JsonValue>, key: &str, row: usize) -> Result<Option<f64>> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| LoadError::invalid_value(row, key, n.to_string())),
        Some(JsonValue::String(s)) => parse_float(s, row, key),
        Some(other) => Err(LoadError::invalid_value(row, key, other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per penguin field.
///
/// Text columns may be `Utf8` or `LargeUtf8`; numeric columns may be any of
/// `Int32`, `Int64`, `Float32`, `Float64`. Nulls become missing cells.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut penguins = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = penguins.len();
        penguins.extend(batch_to_penguins(&batch, offset)?);
    }

    Ok(Dataset::from_penguins(penguins))
}

fn batch_to_penguins(batch: &RecordBatch, offset: usize) -> Result<Vec<Penguin>> {
    let column = |name: &str| {
        batch
            .column_by_name(name)
            .ok_or_else(|| LoadError::missing_column(name))
    };
    let species = column(SPECIES)?;
    let island = column(ISLAND)?;
    let bill_length = column(BILL_LENGTH)?;
    let bill_depth = column(BILL_DEPTH)?;
    let flipper_length = column(FLIPPER_LENGTH)?;
    let body_mass = column(BODY_MASS)?;
    let sex = column(SEX)?;
    let year = column(YEAR)?;

    (0..batch.num_rows())
        .map(|i| -> Result<Penguin> {
            let row = offset + i;
            Ok(Penguin {
                species: required(arrow_text(species, i), row, SPECIES)?,
                island: required(arrow_text(island, i), row, ISLAND)?,
                bill_length_mm: arrow_float(bill_length, i, row, BILL_LENGTH)?,
                bill_depth_mm: arrow_float(bill_depth, i, row, BILL_DEPTH)?,
                flipper_length_mm: arrow_float(flipper_length, i, row, FLIPPER_LENGTH)?,
                body_mass_g: arrow_float(body_mass, i, row, BODY_MASS)?,
                sex: arrow_text(sex, i),
                year: arrow_float(year, i, row, YEAR)?
                    .map(|v| whole_number(v, row, YEAR))
                    .transpose()?,
            })
        })
        .collect()
}

fn arrow_text(col: &ArrayRef, i: usize) -> Option<String> {
    if col.is_null(i) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => parse_text(col.as_string::<i32>().value(i)),
        DataType::LargeUtf8 => parse_text(col.as_string::<i64>().value(i)),
        _ => arrow::util::display::array_value_to_string(col.as_ref(), i)
            .ok()
            .and_then(|s| parse_text(&s)),
    }
}

fn arrow_float(col: &ArrayRef, i: usize, row: usize, name: &str) -> Result<Option<f64>> {
    if col.is_null(i) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(i),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(i) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(i) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(i) as f64,
        DataType::Utf8 => return parse_float(col.as_string::<i32>().value(i), row, name),
        DataType::LargeUtf8 => return parse_float(col.as_string::<i64>().value(i), row, name),
        other => return Err(LoadError::invalid_value(row, name, format!("{other:?}"))),
    };
    // pandas writes missing floats as NaN rather than null.
    Ok(if value.is_nan() { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
Adelie,Torgersen,39.1,18.7,181,3750,male,2007
Adelie,Torgersen,NA,NA,NA,NA,NA,2007
Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
";

    #[test]
    fn csv_marks_na_cells_as_missing() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.penguins[0].is_complete());
        let blank = &ds.penguins[1];
        assert_eq!(blank.bill_length_mm, None);
        assert_eq!(blank.sex, None);
        assert_eq!(blank.year, Some(2007));
        assert_eq!(ds.penguins[2].flipper_length_mm, Some(211.0));
    }

    #[test]
    fn csv_columns_are_found_by_name() {
        let text = "\
rowid,year,sex,body_mass_g,flipper_length_mm,bill_depth_mm,bill_length_mm,island,species
1,2008,female,3700,190,17.9,46.5,Dream,Chinstrap
";
        let ds = load_csv_reader(text.as_bytes()).unwrap();
        let p = &ds.penguins[0];
        assert_eq!(p.species, "Chinstrap");
        assert_eq!(p.island, "Dream");
        assert_eq!(p.bill_length_mm, Some(46.5));
        assert_eq!(p.year, Some(2008));
    }

    #[test]
    fn csv_without_required_column_is_rejected() {
        let text = "species,island,bill_length_mm\nAdelie,Dream,39.1\n";
        let err = load_csv_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column } if column == "bill_depth_mm"));
    }

    #[test]
    fn csv_with_garbage_number_reports_the_cell() {
        let text = SAMPLE.replace("46.1", "forty-six");
        let err = load_csv_reader(text.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "bill_length_mm");
                assert_eq!(value, "forty-six");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_with_empty_species_is_rejected() {
        let text = SAMPLE.replace("Gentoo", "");
        let err = load_csv_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { row: 2, .. }));
    }

    #[test]
    fn bundled_sample_loads() {
        let ds = load_source(&DataSource::Bundled).unwrap();
        assert_eq!(ds.len(), 22);
        assert_eq!(ds.incomplete_count(), 4);
        assert_eq!(ds.species.len(), 3);
    }

    #[test]
    fn json_accepts_nulls_and_missing_keys() {
        let text = r#"[
            {"species": "Adelie", "island": "Dream", "bill_length_mm": 39.5,
             "bill_depth_mm": 17.4, "flipper_length_mm": 186, "body_mass_g": 3800,
             "sex": "female", "year": 2007},
            {"species": "Adelie", "island": "Dream", "bill_length_mm": null,
             "sex": "NA", "year": 2007.0}
        ]"#;
        let ds = load_json_str(text).unwrap();
        assert!(ds.penguins[0].is_complete());
        assert_eq!(ds.penguins[0].flipper_length_mm, Some(186.0));
        let p = &ds.penguins[1];
        assert_eq!(p.bill_length_mm, None);
        assert_eq!(p.body_mass_g, None);
        assert_eq!(p.sex, None);
        assert_eq!(p.year, Some(2007));
    }

    #[test]
    fn json_must_be_an_array() {
        let err = load_json_str(r#"{"species": "Adelie"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn fractional_year_is_invalid() {
        let text = r#"[{"species": "Adelie", "island": "Dream", "year": 2007.5}]"#;
        let err = load_json_str(text).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = load_file(Path::new("penguins.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { extension } if extension == "xlsx"));
    }

    #[test]
    fn data_source_deserializes_tagged() {
        let s: DataSource = serde_json::from_str(r#"{"url": "http://example.org/p.csv"}"#).unwrap();
        assert_eq!(s, DataSource::Url("http://example.org/p.csv".into()));
        let s: DataSource = serde_json::from_str(r#""bundled""#).unwrap();
        assert_eq!(s, DataSource::Bundled);
    }
}
