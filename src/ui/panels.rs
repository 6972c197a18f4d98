use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::NO_FILTER;
use crate::report::Artifact;
use crate::report::document::format_usd;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and report actions
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    // ---- Genre selector ----
    ui.strong("Gênero:");
    let mut genre = state.criteria().genre.clone();
    egui::ComboBox::from_id_salt("genre_filter")
        .selected_text(genre.as_deref().unwrap_or(NO_FILTER))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut genre, None, NO_FILTER);
            for option in &state.genre_options {
                ui.selectable_value(&mut genre, Some(option.clone()), option.as_str());
            }
        });
    state.set_genre(genre);

    ui.add_space(4.0);

    // ---- Minimum year selector ----
    ui.strong("Ano mínimo:");
    let mut min_year = state.criteria().min_year;
    egui::ComboBox::from_id_salt("year_filter")
        .selected_text(min_year.map_or_else(|| NO_FILTER.to_string(), |y| y.to_string()))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut min_year, None, NO_FILTER);
            for &year in &state.year_options {
                ui.selectable_value(&mut min_year, Some(year), year.to_string());
            }
        });
    state.set_min_year(min_year);

    ui.add_space(12.0);
    ui.heading("Gerar Relatórios");
    ui.separator();

    if ui.button("Gerar Relatório").clicked() {
        state.generate_report();
    }

    if let Some(report) = &state.report {
        ui.add_space(4.0);
        ui.label(format!("Categoria: {}", report.selected_genre));
        ui.label(format!("Ano: {}", report.selected_year));
        ui.label(format!("Filmes: {}", report.row_count));
        ui.label(format!("Bilheteria: {} USD", format_usd(report.total_gross)));
        ui.add_space(4.0);
    }

    for artifact in Artifact::ALL {
        download_button(ui, state, artifact);
    }
}

/// "Baixar …" button for a generated artifact, or its error if building failed.
fn download_button(ui: &mut Ui, state: &mut AppState, artifact: Artifact) {
    let Some(report) = &state.report else {
        return;
    };
    let failure = report.artifact(artifact).err().map(|e| e.to_string());

    match failure {
        None => {
            if ui.button(format!("Baixar {}", artifact.label())).clicked() {
                if let Some(path) = save_file_dialog(artifact) {
                    state.save_artifact(artifact, &path);
                }
            }
        }
        Some(e) => {
            ui.label(RichText::new(format!("{} indisponível: {e}", artifact.label())).color(Color32::RED));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Análises Visuais de Filmes");
        ui.separator();

        ui.label(format!(
            "{} filmes carregados, {} visíveis",
            state.dataset.len(),
            state.dashboard.indices.len()
        ));

        let missing = state.dataset.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            ui.separator();
            ui.label(
                RichText::new(format!("Colunas ausentes: {}", names.join(", ")))
                    .color(Color32::from_rgb(200, 140, 0)),
            );
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Erro") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

/// Bottom credit line.
pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("Desenvolvido por Grupo 6 • Trabalho A3").color(Color32::GRAY));
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(artifact: Artifact) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(format!("Salvar relatório {}", artifact.label()))
        .set_file_name(artifact.file_name())
        .add_filter(artifact.label(), &[artifact.extension()])
        .save_file()
}
