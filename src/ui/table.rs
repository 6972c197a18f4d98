use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable preview of the filtered rows, all source columns.
pub fn preview_table(ui: &mut Ui, state: &AppState) {
    let view = state.view();
    let columns = &state.dataset.columns;
    if view.is_empty() {
        ui.label("Nenhum filme corresponde aos filtros.");
        return;
    }
    let rows: Vec<_> = view.rows().collect();

    egui::ScrollArea::horizontal()
        .id_salt("preview_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(320.0)
                .columns(Column::auto().at_least(80.0).clip(true), columns.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for name in columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                        let row = rows[table_row.index()];
                        for cell in &row.cells {
                            table_row.col(|ui: &mut Ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                });
        });
}
