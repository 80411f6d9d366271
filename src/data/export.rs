use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{Dataset, Penguin};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Writers for the formats `loader` can read back
// ---------------------------------------------------------------------------

/// Write the dataset as records-oriented JSON (`null` for missing cells).
pub fn write_json(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &dataset.penguins)?;
    Ok(())
}

/// Write the dataset as a single-batch Parquet file with nullable columns.
pub fn write_parquet(dataset: &Dataset, path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, true),
    ]));

    let rows = &dataset.penguins;
    let text = |f: fn(&Penguin) -> Option<&str>| -> ArrayRef {
        Arc::new(rows.iter().map(f).collect::<StringArray>())
    };
    let float = |f: fn(&Penguin) -> Option<f64>| -> ArrayRef {
        Arc::new(rows.iter().map(f).collect::<Float64Array>())
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|p| Some(p.species.as_str())),
            text(|p| Some(p.island.as_str())),
            float(|p| p.bill_length_mm),
            float(|p| p.bill_depth_mm),
            float(|p| p.flipper_length_mm),
            float(|p| p.body_mass_g),
            text(|p| p.sex.as_deref()),
            Arc::new(rows.iter().map(|p| p.year).collect::<Int64Array>()),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
