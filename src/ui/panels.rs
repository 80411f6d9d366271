use eframe::egui::{self, Color32, Context, RichText, Ui};

use crate::chart::LabelStyle;
use crate::data::loader::{DataSource, PENGUINS_URL};
use crate::data::missing::MissingPolicy;
use crate::data::model::NumericColumn;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – axis selection
// ---------------------------------------------------------------------------

/// Render the axis dropdowns, label style, missing policy and legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inputs");
    ui.separator();

    if state.view.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let options = state.axis_options();
    let current = state.selection();

    ui.strong("X Axis");
    if let Some(col) = axis_combo(ui, "x_axis", current.x, &options) {
        state.set_x(col);
    }
    ui.add_space(4.0);
    ui.strong("Y Axis");
    if let Some(col) = axis_combo(ui, "y_axis", current.y, &options) {
        state.set_y(col);
    }
    ui.separator();

    ui.strong("Axis labels");
    let mut style = state.config.labels;
    for option in LabelStyle::ALL {
        ui.radio_value(&mut style, option, option.describe());
    }
    state.set_label_style(style);
    ui.separator();

    ui.strong("Missing values");
    let mut policy = state.missing;
    ui.radio_value(&mut policy, MissingPolicy::Drop, "Drop incomplete rows");
    ui.radio_value(&mut policy, MissingPolicy::Keep, "Keep all rows");
    state.set_missing_policy(policy);
    ui.separator();

    ui.strong("Species");
    for (species, color) in state.colors.legend_entries() {
        ui.label(RichText::new(format!("● {species}")).color(color));
    }
}

/// A dropdown over `options`. Returns the newly picked column, if any.
fn axis_combo(
    ui: &mut Ui,
    id: &str,
    current: NumericColumn,
    options: &[NumericColumn],
) -> Option<NumericColumn> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.name())
        .show_ui(ui, |ui: &mut Ui| {
            for &col in options {
                if ui.selectable_label(current == col, col.name()).clicked() {
                    picked = Some(col);
                }
            }
        });
    picked.filter(|col| *col != current)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load from URL…").clicked() {
                state.url_input = Some(PENGUINS_URL.to_string());
                ui.close_menu();
            }
            if ui.button("Load bundled sample").clicked() {
                state.start_load(DataSource::Bundled);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong(&state.config.title);
        ui.separator();

        if state.loading() {
            ui.spinner();
            ui.label("Loading…");
        } else if let (Some(ds), Some(source)) = (state.dataset(), &state.source) {
            ui.label(format!(
                "{} of {} records from {source}",
                ds.len(),
                state.raw_len
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open penguin data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.start_load(DataSource::Path(path));
    }
}

/// Modal-style window asking for a CSV URL. Shown while `url_input` is set.
pub fn url_dialog(ctx: &Context, state: &mut AppState) {
    let Some(url) = &mut state.url_input else {
        return;
    };
    let mut open = true;
    let mut submit = false;

    egui::Window::new("Load from URL")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            let edit = ui.add(egui::TextEdit::singleline(url).desired_width(480.0));
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Load").clicked() || entered {
                submit = true;
            }
        });

    if submit {
        let url = url.trim().to_string();
        state.url_input = None;
        if !url.is_empty() {
            state.start_load(DataSource::Url(url));
        }
    } else if !open {
        state.url_input = None;
    }
}
