use std::path::Path;

use crate::color::{CategoryColors, Gradient};
use crate::dashboard::{self, Dashboard};
use crate::data::filter::{FilterCriteria, FilteredView};
use crate::data::model::Dataset;
use crate::report::{Artifact, ReportArtifacts};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup; never replaced.
    pub dataset: Dataset,

    /// Selector choices, drawn from the dataset.
    pub genre_options: Vec<String>,
    pub year_options: Vec<i64>,

    /// Charts and visible rows for the current selection.
    pub dashboard: Dashboard,

    /// Bucket count of the rating histogram.
    pub histogram_bins: usize,

    /// Genre colours, fixed for the session so bars keep their colour.
    pub genre_colors: CategoryColors,

    /// Colour scale for the budget/gross scatter (IMDb rating).
    pub rating_gradient: Option<Gradient>,

    /// Last generated report; dropped whenever the filters change.
    pub report: Option<ReportArtifacts>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, histogram_bins: usize) -> Self {
        let genre_options = dataset.genre_options();
        let year_options = dataset.year_options();
        let genre_colors = CategoryColors::new(&genre_options);
        let rating_gradient =
            Gradient::spanning(dataset.rows.iter().filter_map(|r| r.movie.imdb_rating));
        let dashboard = dashboard::render(&dataset, &FilterCriteria::default(), histogram_bins);

        Self {
            dataset,
            genre_options,
            year_options,
            dashboard,
            histogram_bins,
            genre_colors,
            rating_gradient,
            report: None,
            status_message: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.dashboard.criteria
    }

    pub fn view(&self) -> FilteredView<'_> {
        self.dashboard.view(&self.dataset)
    }

    /// Recompute the dashboard for new criteria. No-op when nothing changed.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria == self.dashboard.criteria {
            return;
        }
        self.dashboard = dashboard::render(&self.dataset, &criteria, self.histogram_bins);
        self.report = None;
        self.status_message = None;
    }

    pub fn set_genre(&mut self, genre: Option<String>) {
        let min_year = self.dashboard.criteria.min_year;
        self.set_criteria(FilterCriteria::new(genre, min_year));
    }

    pub fn set_min_year(&mut self, min_year: Option<i64>) {
        let genre = self.dashboard.criteria.genre.clone();
        self.set_criteria(FilterCriteria::new(genre, min_year));
    }

    /// Build both report artifacts for the current selection.
    pub fn generate_report(&mut self) {
        self.report = Some(self.dashboard.report(&self.dataset));
    }

    /// Write one generated artifact to `path`.
    pub fn save_artifact(&mut self, artifact: Artifact, path: &Path) {
        let Some(report) = &self.report else {
            return;
        };
        let result = match report.artifact(artifact) {
            Ok(bytes) => std::fs::write(path, bytes).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        self.status_message = Some(match result {
            Ok(()) => {
                log::info!("Saved {} to {}", artifact.label(), path.display());
                format!("{} salvo em {}", artifact.label(), path.display())
            }
            Err(e) => {
                log::error!("Failed to save {}: {e}", artifact.label());
                format!("Erro ao salvar {}: {e}", artifact.label())
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::three_movies;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_unfiltered() {
        let state = AppState::new(three_movies(), 10);
        assert_eq!(state.view().len(), 3);
        assert_eq!(state.genre_options, vec!["Action", "Drama"]);
        assert_eq!(state.year_options, vec![2019, 2020, 2021]);
        assert!(state.rating_gradient.is_none());
    }

    #[test]
    fn changing_filters_recomputes_and_drops_report() {
        let mut state = AppState::new(three_movies(), 10);
        state.generate_report();
        assert!(state.report.is_some());

        state.set_genre(Some("Action".into()));
        assert!(state.report.is_none());
        assert_eq!(state.dashboard.indices, vec![0, 2]);

        state.set_min_year(Some(2021));
        assert_eq!(state.dashboard.indices, vec![2]);
        assert_eq!(state.criteria().genre.as_deref(), Some("Action"));

        state.set_genre(None);
        assert_eq!(state.dashboard.indices, vec![2]);
    }

    #[test]
    fn unchanged_criteria_keep_report() {
        let mut state = AppState::new(three_movies(), 10);
        state.generate_report();
        state.set_genre(None);
        assert!(state.report.is_some());
    }

    #[test]
    fn saves_artifacts_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(three_movies(), 10);
        state.generate_report();

        let path = dir.path().join(Artifact::Pdf.file_name());
        state.save_artifact(Artifact::Pdf, &path);
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(state.status_message.unwrap().starts_with("PDF salvo"));
    }
}
