use std::fs;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use penguin_dash::chart::{render, AxisSelection, LabelStyle};
use penguin_dash::data::export::{write_json, write_parquet};
use penguin_dash::data::loader::{load_file, load_source, DataSource};
use penguin_dash::data::missing::MissingPolicy;
use penguin_dash::data::model::NumericColumn;
use penguin_dash::error::LoadError;

#[test]
fn parquet_export_loads_back_with_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = load_source(&DataSource::Bundled).unwrap();

    let path = dir.path().join("penguins.parquet");
    write_parquet(&bundled, &path).unwrap();
    let loaded = load_source(&DataSource::Path(path)).unwrap();

    assert_eq!(loaded.penguins, bundled.penguins);
    assert_eq!(loaded.incomplete_count(), 4);
}

#[test]
fn json_export_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = load_source(&DataSource::Bundled).unwrap();

    let path = dir.path().join("penguins.json");
    write_json(&bundled, &path).unwrap();
    let loaded = load_file(&path).unwrap();

    assert_eq!(loaded.penguins, bundled.penguins);
}

#[test]
fn csv_file_with_three_complete_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("three.csv");
    fs::write(
        &path,
        "\
\"species\",\"island\",\"bill_length_mm\",\"bill_depth_mm\",\"flipper_length_mm\",\"body_mass_g\",\"sex\",\"year\"
Adelie,Torgersen,39.1,18.7,181,3750,male,2007
Adelie,Torgersen,NA,NA,NA,NA,NA,2007
Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
Chinstrap,Dream,46.5,17.9,192,3500,female,2007
",
    )
    .unwrap();

    let dataset = MissingPolicy::Drop.apply(load_file(&path).unwrap());
    assert_eq!(dataset.len(), 3);

    let chart = render(&dataset, AxisSelection::default(), LabelStyle::Derived);
    assert_eq!(chart.points.len(), 3);
    assert_eq!(chart.x_label, "Bill Length Mm");
    assert_eq!(chart.y_label, "Bill Depth Mm");

    let flipper = AxisSelection {
        x: NumericColumn::FlipperLengthMm,
        ..AxisSelection::default()
    };
    let chart = render(&dataset, flipper, LabelStyle::Fixed);
    let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [181.0, 211.0, 192.0]);
    assert_eq!(chart.x_label, "Flipper Length (mm)");
    assert_eq!(chart.y_label, "Bill Depth (mm)");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn parquet_with_mixed_column_types() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::LargeUtf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float32, true),
        Field::new("bill_depth_mm", DataType::Utf8, true),
        Field::new("flipper_length_mm", DataType::Int32, true),
        Field::new("body_mass_g", DataType::Int64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Float64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(LargeStringArray::from(vec!["Adelie", "Gentoo"])),
        Arc::new(StringArray::from(vec!["Torgersen", "Biscoe"])),
        Arc::new(Float32Array::from(vec![39.5, f32::NAN])),
        Arc::new(StringArray::from(vec![Some("18.75"), Some("NA")])),
        Arc::new(Int32Array::from(vec![Some(181), None])),
        Arc::new(Int64Array::from(vec![3750, 4500])),
        Arc::new(StringArray::from(vec![Some("male"), None])),
        Arc::new(Float64Array::from(vec![2007.0, 2009.0])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.parquet");
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let loaded = load_file(&path).unwrap();
    assert_eq!(loaded.len(), 2);

    let adelie = &loaded.penguins[0];
    assert_eq!(adelie.species, "Adelie");
    assert_eq!(adelie.island, "Torgersen");
    assert_eq!(adelie.bill_length_mm, Some(39.5));
    assert_eq!(adelie.bill_depth_mm, Some(18.75));
    assert_eq!(adelie.flipper_length_mm, Some(181.0));
    assert_eq!(adelie.body_mass_g, Some(3750.0));
    assert_eq!(adelie.sex.as_deref(), Some("male"));
    assert_eq!(adelie.year, Some(2007));

    let gentoo = &loaded.penguins[1];
    assert_eq!(gentoo.species, "Gentoo");
    assert_eq!(gentoo.bill_length_mm, None);
    assert_eq!(gentoo.bill_depth_mm, None);
    assert_eq!(gentoo.flipper_length_mm, None);
    assert_eq!(gentoo.body_mass_g, Some(4500.0));
    assert_eq!(gentoo.sex, None);
    assert_eq!(gentoo.year, Some(2009));
    assert_eq!(loaded.incomplete_count(), 1);
}
