use std::sync::Arc;

use crate::chart::{render, AxisSelection, ChartSpec, LabelStyle};
use crate::data::model::{Dataset, NumericColumn};

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

/// Old and new selection passed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub old: AxisSelection,
    pub new: AxisSelection,
}

/// Handle returned by [`AxisSelectionView::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&SelectionChange, &ChartSpec)>;

// ---------------------------------------------------------------------------
// AxisSelectionView
// ---------------------------------------------------------------------------

/// Holds the session's axis selection and the chart derived from it.
///
/// Every accepted change re-renders the chart in full and then notifies
/// subscribers in the order they subscribed.
pub struct AxisSelectionView {
    dataset: Arc<Dataset>,
    selection: AxisSelection,
    style: LabelStyle,
    chart: ChartSpec,
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl AxisSelectionView {
    pub fn new(dataset: Arc<Dataset>, selection: AxisSelection, style: LabelStyle) -> Self {
        let chart = render(&dataset, selection, style);
        Self {
            dataset,
            selection,
            style,
            chart,
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    pub fn label_style(&self) -> LabelStyle {
        self.style
    }

    /// The chart for the current selection.
    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    /// Register a handler called after every re-render.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&SelectionChange, &ChartSpec) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _)| *hid != id);
        self.handlers.len() != before
    }

    pub fn set_x(&mut self, column: NumericColumn) -> bool {
        self.set_selection(AxisSelection {
            x: column,
            ..self.selection
        })
    }

    pub fn set_y(&mut self, column: NumericColumn) -> bool {
        self.set_selection(AxisSelection {
            y: column,
            ..self.selection
        })
    }

    /// Apply a new selection. Returns `false` (and does nothing) if it equals
    /// the current one.
    pub fn set_selection(&mut self, selection: AxisSelection) -> bool {
        if selection == self.selection {
            return false;
        }
        let old = self.selection;
        self.selection = selection;
        self.redraw(SelectionChange {
            old,
            new: selection,
        });
        true
    }

    /// Switch label style; subscribers see an unchanged selection.
    pub fn set_label_style(&mut self, style: LabelStyle) -> bool {
        if style == self.style {
            return false;
        }
        self.style = style;
        self.redraw(SelectionChange {
            old: self.selection,
            new: self.selection,
        });
        true
    }

    fn redraw(&mut self, change: SelectionChange) {
        self.chart = render(&self.dataset, self.selection, self.style);
        for (_, handler) in &mut self.handlers {
            handler(&change, &self.chart);
        }
    }
}
