use std::path::PathBuf;

use anyhow::{Context, Result};
use penguin_dash::data::export::{write_json, write_parquet};
use penguin_dash::data::loader::{load_source, DataSource};

/// Write the bundled sample as `penguins.parquet` and `penguins.json` (into
/// the directory given as the first argument, default `.`) so the other
/// loaders have something to open.
fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let dataset = load_source(&DataSource::Bundled).context("loading bundled sample")?;

    let parquet_path = out_dir.join("penguins.parquet");
    write_parquet(&dataset, &parquet_path)
        .with_context(|| format!("writing {}", parquet_path.display()))?;

    let json_path = out_dir.join("penguins.json");
    write_json(&dataset, &json_path)
        .with_context(|| format!("writing {}", json_path.display()))?;

    println!(
        "Wrote {} penguins ({} incomplete) to {} and {}",
        dataset.len(),
        dataset.incomplete_count(),
        parquet_path.display(),
        json_path.display()
    );
    Ok(())
}
