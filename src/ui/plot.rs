use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::ScatterPoint;
use crate::data::model::Field;
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 260.0;
const EMPTY_MESSAGE: &str = "Sem dados para os filtros selecionados.";

const STEEL_BLUE: Color32 = Color32::from_rgb(70, 130, 180);
const NAVY: Color32 = Color32::from_rgb(25, 60, 110);
const PURPLE: Color32 = Color32::from_rgb(128, 0, 128);
const LIME_GREEN: Color32 = Color32::from_rgb(50, 205, 50);
const DODGER_BLUE: Color32 = Color32::from_rgb(30, 144, 255);

// ---------------------------------------------------------------------------
// Dashboard layout (central panel)
// ---------------------------------------------------------------------------

/// The six charts: two side by side, the rest in collapsible sections.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.columns(2, |columns| {
        rating_histogram(&mut columns[0], state);
        genre_counts(&mut columns[1], state);
    });

    egui::CollapsingHeader::new("Orçamento vs Bilheteria Mundial")
        .default_open(true)
        .show(ui, |ui| budget_vs_gross(ui, state));
    egui::CollapsingHeader::new("Avaliação da Crítica vs Público")
        .default_open(true)
        .show(ui, |ui| critic_vs_audience(ui, state));
    egui::CollapsingHeader::new("Duração Média por Gênero")
        .default_open(true)
        .show(ui, |ui| mean_runtime(ui, state));
    egui::CollapsingHeader::new("Filmes Lançados por Ano")
        .default_open(true)
        .show(ui, |ui| movies_per_year(ui, state));
}

fn empty_notice(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), PLOT_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(EMPTY_MESSAGE).italics());
        });
    });
}

/// Axis formatter that prints category names at integer positions.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

pub fn rating_histogram(ui: &mut Ui, state: &AppState) {
    ui.strong("Distribuição das Notas IMDb");
    let bins = &state.dashboard.charts.rating_histogram;
    if bins.is_empty() {
        empty_notice(ui);
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.1} – {:.1}", bin.start, bin.end))
        })
        .collect();

    Plot::new("rating_histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label(Field::ImdbRating.label())
        .y_axis_label("Quantidade")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(STEEL_BLUE));
            let kde = &state.dashboard.charts.rating_kde;
            if !kde.is_empty() {
                let curve: PlotPoints = kde.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(curve).color(NAVY).width(2.0));
            }
        });
}

pub fn genre_counts(ui: &mut Ui, state: &AppState) {
    ui.strong("Quantidade de Filmes por Gênero");
    let counts = &state.dashboard.charts.genre_counts;
    if counts.is_empty() {
        empty_notice(ui);
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (genre, count))| {
            let color = state.genre_colors.color_for(genre);
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .name(genre)
                .fill(color)
                .stroke(egui::Stroke::new(1.0, color))
        })
        .collect();
    let labels = counts.iter().map(|(genre, _)| genre.clone()).collect();

    Plot::new("genre_counts")
        .height(PLOT_HEIGHT)
        .y_axis_label("Quantidade")
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

pub fn budget_vs_gross(ui: &mut Ui, state: &AppState) {
    let points = &state.dashboard.charts.budget_vs_gross;
    if points.is_empty() {
        empty_notice(ui);
        return;
    }

    if let Some(gradient) = &state.rating_gradient {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("{}:", Field::ImdbRating.label()));
            for (label, color) in gradient.legend_entries(5) {
                ui.label(RichText::new("■").color(color));
                ui.label(label);
            }
            ui.label(RichText::new("■").color(crate::color::Gradient::MISSING));
            ui.label("sem nota");
        });
    }

    Plot::new("budget_vs_gross")
        .height(PLOT_HEIGHT)
        .x_axis_label(Field::Budget.label())
        .y_axis_label(Field::WorldwideGross.label())
        .show(ui, |plot_ui| {
            for point in points {
                let color = match &state.rating_gradient {
                    Some(gradient) => gradient.color_for(point.color),
                    None => crate::color::Gradient::MISSING,
                };
                plot_ui.points(Points::new(vec![[point.x, point.y]]).color(color).radius(4.0));
            }
        });
}

pub fn critic_vs_audience(ui: &mut Ui, state: &AppState) {
    scatter(
        ui,
        "critic_vs_audience",
        &state.dashboard.charts.critic_vs_audience,
        (Field::CriticScore.label(), Field::AudienceScore.label()),
        PURPLE,
    );
}

fn scatter(ui: &mut Ui, id: &str, points: &[ScatterPoint], axes: (&str, &str), color: Color32) {
    if points.is_empty() {
        empty_notice(ui);
        return;
    }
    let series: PlotPoints = points.iter().map(|p| [p.x, p.y]).collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(axes.0)
        .y_axis_label(axes.1)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(series).color(color).radius(4.0));
        });
}

pub fn mean_runtime(ui: &mut Ui, state: &AppState) {
    let means = &state.dashboard.charts.mean_runtime_by_genre;
    if means.is_empty() {
        empty_notice(ui);
        return;
    }

    let bars: Vec<Bar> = means
        .iter()
        .enumerate()
        .map(|(i, (genre, minutes))| Bar::new(i as f64, *minutes).width(0.7).name(genre))
        .collect();
    let labels = means.iter().map(|(genre, _)| genre.clone()).collect();

    Plot::new("mean_runtime_by_genre")
        .height(PLOT_HEIGHT)
        .y_axis_label("Duração média (min)")
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(LIME_GREEN));
        });
}

pub fn movies_per_year(ui: &mut Ui, state: &AppState) {
    let years = &state.dashboard.charts.movies_per_year;
    if years.is_empty() {
        empty_notice(ui);
        return;
    }

    let points: PlotPoints = years
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new("movies_per_year")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(Field::ReleaseYear.label())
        .y_axis_label("Quantidade")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Filmes").color(DODGER_BLUE).width(2.0));
        });
}
