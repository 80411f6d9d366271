use eframe::egui::{Ui, Vec2b};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot for the current chart, one series per species.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading() {
                ui.spinner();
            } else {
                ui.heading("Open a file to view penguins  (File → Open…)");
            }
        });
        return;
    };
    let chart = view.chart();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&chart.title);
    });
    if chart.skipped > 0 {
        ui.weak(format!(
            "{} records without {} or {} are not shown",
            chart.skipped, chart.selection.x, chart.selection.y
        ));
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .auto_bounds(Vec2b::new(true, true))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for species in &view.dataset().species {
                let series = chart.series_for(species);
                if series.is_empty() {
                    continue;
                }
                let points = Points::new(PlotPoints::from(series))
                    .name(species)
                    .color(state.colors.color_for(species))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(state.config.point_radius);
                plot_ui.points(points);
            }
        });
}
