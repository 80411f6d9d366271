use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use crate::chart::{AxisSelection, LabelStyle};
use crate::color::SpeciesColors;
use crate::config::DashboardConfig;
use crate::data::loader::{load_source, DataSource};
use crate::data::missing::MissingPolicy;
use crate::data::model::{Dataset, NumericColumn};
use crate::error::LoadError;
use crate::table::Pager;
use crate::view::AxisSelectionView;

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// Result of one load: the dataset after the missing policy, plus the row
/// count before it and the policy that was applied.
pub struct Loaded {
    pub dataset: Dataset,
    pub raw_len: usize,
    pub policy: MissingPolicy,
}

struct PendingLoad {
    source: DataSource,
    rx: Receiver<Result<Loaded, LoadError>>,
}

/// Read `source` and apply `policy`. Runs on the loader thread.
pub fn load_with_policy(source: &DataSource, policy: MissingPolicy) -> Result<Loaded, LoadError> {
    let raw = load_source(source)?;
    let raw_len = raw.len();
    Ok(Loaded {
        dataset: policy.apply(raw),
        raw_len,
        policy,
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Reactive axis selection + chart (None until a dataset is loaded).
    pub view: Option<AxisSelectionView>,

    /// Species colours for the current dataset.
    pub colors: SpeciesColors,

    /// Table pagination.
    pub pager: Pager,

    /// Source of the dataset currently shown.
    pub source: Option<DataSource>,

    /// Records read before the missing policy was applied.
    pub raw_len: usize,

    /// Missing-value policy used for the next load.
    pub missing: MissingPolicy,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Text of the "Load from URL" dialog; `Some` while the dialog is open.
    pub url_input: Option<String>,

    pending: Option<PendingLoad>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            pager: Pager::new(config.page_size),
            missing: config.missing,
            view: None,
            colors: SpeciesColors::default(),
            source: None,
            raw_len: 0,
            status_message: None,
            url_input: None,
            pending: None,
            config,
        }
    }

    /// Whether a load is in progress.
    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.view.as_ref().map(|v| v.dataset())
    }

    /// Start loading `source` on a background thread. A load already in
    /// flight is abandoned; its result is ignored.
    pub fn start_load(&mut self, source: DataSource) {
        log::info!("Loading {source} ({:?})", self.missing);
        let (tx, rx) = mpsc::channel();
        let policy = self.missing;
        let thread_source = source.clone();
        std::thread::spawn(move || {
            let _ = tx.send(load_with_policy(&thread_source, policy));
        });
        self.status_message = None;
        self.pending = Some(PendingLoad { source, rx });
    }

    /// Check for a finished load. Returns `true` if one completed this call.
    pub fn poll_load(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(LoadError::Malformed(
                "loader thread exited without a result".into(),
            )),
        };
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.finish_load(pending.source, result);
        true
    }

    fn finish_load(&mut self, source: DataSource, result: Result<Loaded, LoadError>) {
        match result {
            Ok(loaded) => {
                log::info!(
                    "Loaded {} records from {source}, {} after {:?}",
                    loaded.raw_len,
                    loaded.dataset.len(),
                    loaded.policy
                );
                self.raw_len = loaded.raw_len;
                self.source = Some(source);
                self.set_dataset(loaded.dataset);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a dataset: rebuild colours and the axis view, keeping the
    /// current selection and label style when there is one.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let (selection, style) = match &self.view {
            Some(v) => (v.selection(), v.label_style()),
            None => (
                self.config.initial_selection().unwrap_or_default(),
                self.config.labels,
            ),
        };

        self.colors = SpeciesColors::new(&dataset.species);
        self.pager.clamp(dataset.len());

        let mut view = AxisSelectionView::new(Arc::new(dataset), selection, style);
        view.subscribe(|change, chart| {
            log::info!(
                "Axes {} × {} → {} × {}: {} points, {} skipped",
                change.old.x,
                change.old.y,
                change.new.x,
                change.new.y,
                chart.points.len(),
                chart.skipped
            );
        });
        self.view = Some(view);
        self.status_message = None;
    }

    /// Columns offered in the axis dropdowns.
    pub fn axis_options(&self) -> Vec<NumericColumn> {
        Dataset::numeric_columns(self.config.plot_year)
    }

    pub fn selection(&self) -> AxisSelection {
        self.view
            .as_ref()
            .map(|v| v.selection())
            .unwrap_or_default()
    }

    pub fn set_x(&mut self, column: NumericColumn) {
        if let Some(view) = &mut self.view {
            view.set_x(column);
        }
    }

    pub fn set_y(&mut self, column: NumericColumn) {
        if let Some(view) = &mut self.view {
            view.set_y(column);
        }
    }

    pub fn set_label_style(&mut self, style: LabelStyle) {
        self.config.labels = style;
        if let Some(view) = &mut self.view {
            view.set_label_style(style);
        }
    }

    /// Change the missing policy and reload with it. A load in flight is
    /// restarted for its own source, so the requested source is not lost.
    pub fn set_missing_policy(&mut self, policy: MissingPolicy) {
        if policy == self.missing {
            return;
        }
        self.missing = policy;
        let source = match &self.pending {
            Some(pending) => Some(pending.source.clone()),
            None => self.source.clone(),
        };
        if let Some(source) = source {
            self.start_load(source);
        }
    }

    pub fn reload(&mut self) {
        let source = self
            .source
            .clone()
            .unwrap_or_else(|| self.config.source.clone());
        self.start_load(source);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn wait_for_load(state: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !state.poll_load() {
            assert!(Instant::now() < deadline, "load did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn bundled_load_drops_incomplete_rows() {
        let mut state = AppState::new(DashboardConfig::default());
        state.start_load(DataSource::Bundled);
        assert!(state.loading());
        wait_for_load(&mut state);

        assert!(!state.loading());
        assert_eq!(state.raw_len, 22);
        let ds = state.dataset().unwrap();
        assert_eq!(ds.len(), 18);
        assert!(ds.penguins.iter().all(|p| p.is_complete()));
        assert_eq!(state.view.as_ref().unwrap().chart().points.len(), 18);
    }

    #[test]
    fn switching_to_keep_reloads_all_rows() {
        let mut state = AppState::new(DashboardConfig::default());
        state.start_load(DataSource::Bundled);
        wait_for_load(&mut state);

        state.set_x(NumericColumn::FlipperLengthMm);
        state.set_missing_policy(MissingPolicy::Keep);
        wait_for_load(&mut state);

        assert_eq!(state.dataset().unwrap().len(), 22);
        // Selection survives the reload.
        assert_eq!(state.selection().x, NumericColumn::FlipperLengthMm);
        let chart = state.view.as_ref().unwrap().chart();
        assert_eq!(chart.skipped, 2);
        assert_eq!(chart.points.len(), 20);
    }

    #[test]
    fn policy_change_during_first_load_applies_to_it() {
        let mut state = AppState::new(DashboardConfig::default());
        state.start_load(DataSource::Bundled);
        state.set_missing_policy(MissingPolicy::Keep);
        wait_for_load(&mut state);

        let ds = state.dataset().unwrap();
        assert_eq!(ds.len(), 22);
        assert_eq!(ds.incomplete_count(), 4);
        assert_eq!(state.source, Some(DataSource::Bundled));
    }

    #[test]
    fn policy_change_during_load_keeps_the_requested_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.csv");
        std::fs::write(
            &path,
            "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
             Gentoo,Biscoe,46.1,13.2,211,4500,female,2007\n\
             Gentoo,Biscoe,NA,NA,NA,NA,NA,2009\n",
        )
        .unwrap();

        let mut state = AppState::new(DashboardConfig::default());
        state.start_load(DataSource::Bundled);
        wait_for_load(&mut state);

        state.start_load(DataSource::Path(path.clone()));
        state.set_missing_policy(MissingPolicy::Keep);
        wait_for_load(&mut state);

        assert_eq!(state.source, Some(DataSource::Path(path)));
        assert_eq!(state.raw_len, 2);
        assert_eq!(state.dataset().unwrap().len(), 2);
    }

    #[test]
    fn loaded_reports_the_applied_policy() {
        let loaded = load_with_policy(&DataSource::Bundled, MissingPolicy::Keep).unwrap();
        assert_eq!(loaded.policy, MissingPolicy::Keep);
        assert_eq!(loaded.dataset.len(), loaded.raw_len);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::new(DashboardConfig::default());
        state.start_load(DataSource::Bundled);
        wait_for_load(&mut state);

        state.start_load(DataSource::Path("missing/penguins.parquet".into()));
        wait_for_load(&mut state);

        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
        assert_eq!(state.dataset().unwrap().len(), 18);
        assert_eq!(state.source, Some(DataSource::Bundled));
    }

    #[test]
    fn configured_initial_axes_are_used() {
        let config =
            DashboardConfig::from_json(r#"{"initial_x": "body_mass_g", "labels": "fixed"}"#)
                .unwrap();
        let mut state = AppState::new(config);
        state.start_load(DataSource::Bundled);
        wait_for_load(&mut state);

        let chart = state.view.as_ref().unwrap().chart();
        assert_eq!(chart.x_label, "Body Mass (g)");
        assert_eq!(chart.y_label, "Bill Depth (mm)");
    }
}
