use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::table::TableColumn;

/// Home of the Palmer Penguins dataset, credited under the table.
pub const PALMERPENGUINS_URL: &str = "https://github.com/allisonhorst/palmerpenguins";

// ---------------------------------------------------------------------------
// Data table (bottom panel)
// ---------------------------------------------------------------------------

/// Render one page of the dataset with prev/next controls.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset().cloned() else {
        ui.label("No dataset loaded.");
        return;
    };
    let total = dataset.len();

    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Table");
        ui.separator();
        if ui.small_button("◀").clicked() {
            state.pager.prev();
        }
        ui.label(format!(
            "page {} of {}",
            state.pager.page() + 1,
            state.pager.page_count(total)
        ));
        if ui.small_button("▶").clicked() {
            state.pager.next(total);
        }
        ui.separator();
        ui.label(format!("{total} rows"));
    });

    let rows = state.pager.rows(total);
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
    let header_height = 20.0;
    // Leave room below the body for the data-source footer.
    let footer_height = ui.spacing().interact_size.y + 2.0 * ui.spacing().item_spacing.y;
    let body_height = (ui.available_height() - header_height - footer_height).max(text_height);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(80.0).clip(true), TableColumn::ALL.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(body_height)
        .header(header_height, |mut header| {
            for col in TableColumn::ALL {
                header.col(|ui| {
                    ui.strong(col.title());
                });
            }
        })
        .body(|body| {
            body.rows(text_height, rows.len(), |mut row| {
                let penguin = &dataset.penguins[rows.start + row.index()];
                for col in TableColumn::ALL {
                    row.col(|ui| {
                        let text = col.cell_text(penguin);
                        if col.is_numeric() {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(text);
                            });
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Data Source:");
        ui.hyperlink_to("palmerpenguins", PALMERPENGUINS_URL);
    });
}
