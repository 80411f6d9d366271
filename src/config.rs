use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::chart::{AxisSelection, LabelStyle};
use crate::data::loader::DataSource;
use crate::data::missing::MissingPolicy;
use crate::data::model::{Dataset, NumericColumn};

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "penguin-dash.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// User-tunable settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub title: String,
    pub source: DataSource,
    pub missing: MissingPolicy,
    pub labels: LabelStyle,
    /// Offer `year` in the axis dropdowns.
    pub plot_year: bool,
    /// Table rows per page.
    pub page_size: usize,
    pub point_radius: f32,
    pub initial_x: String,
    pub initial_y: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Palmer Penguins Dashboard".to_string(),
            source: DataSource::Bundled,
            missing: MissingPolicy::Drop,
            labels: LabelStyle::Derived,
            plot_year: false,
            page_size: 10,
            point_radius: 4.0,
            initial_x: NumericColumn::BillLengthMm.name().to_string(),
            initial_y: NumericColumn::BillDepthMm.name().to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig =
            serde_json::from_str(text).context("parsing dashboard config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, else fall back to defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        log::debug!("Reading config from {}", path.display());
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.point_radius.is_nan() || self.point_radius <= 0.0 {
            bail!("point_radius must be positive, got {}", self.point_radius);
        }
        self.initial_selection()?;
        Ok(())
    }

    /// The configured starting axes, checked against the dropdown options.
    pub fn initial_selection(&self) -> Result<AxisSelection> {
        Ok(AxisSelection {
            x: self.plottable(&self.initial_x)?,
            y: self.plottable(&self.initial_y)?,
        })
    }

    fn plottable(&self, name: &str) -> Result<NumericColumn> {
        let allowed = Dataset::numeric_columns(self.plot_year);
        match NumericColumn::parse(name) {
            Some(col) if allowed.contains(&col) => Ok(col),
            _ => bail!(
                "'{name}' is not a plottable column (expected one of: {})",
                allowed
                    .iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
