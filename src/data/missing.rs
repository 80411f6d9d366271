use serde::Deserialize;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Missing-value policy
// ---------------------------------------------------------------------------

/// What to do with records that have at least one missing field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Remove incomplete records before the dataset is used.
    #[default]
    Drop,
    /// Keep every record; plots skip points whose selected values are missing.
    Keep,
}

impl MissingPolicy {
    pub fn apply(self, dataset: Dataset) -> Dataset {
        match self {
            MissingPolicy::Drop => drop_missing(dataset),
            MissingPolicy::Keep => dataset,
        }
    }
}

/// Drop every record that is not complete and rebuild the species index.
pub fn drop_missing(dataset: Dataset) -> Dataset {
    let before = dataset.len();
    let kept: Vec<_> = dataset
        .penguins
        .into_iter()
        .filter(|p| p.is_complete())
        .collect();
    if kept.len() != before {
        log::warn!(
            "Dropped {} of {before} records with missing values",
            before - kept.len()
        );
    }
    Dataset::from_penguins(kept)
}
