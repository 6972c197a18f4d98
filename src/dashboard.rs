use std::path::Path;

use anyhow::{Context, Result};

use crate::data::aggregate::ChartSet;
use crate::data::filter::{FilterCriteria, FilteredView, apply};
use crate::data::model::Dataset;
use crate::report::{Artifact, ReportArtifacts, build_report};

pub const CHARTS_FILE_NAME: &str = "dashboard.json";

/// Everything the charts need for one filter selection.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub criteria: FilterCriteria,
    /// Rows passing `criteria`, ascending.
    pub indices: Vec<usize>,
    pub charts: ChartSet,
}

impl Dashboard {
    /// The filtered rows this dashboard was computed from.
    pub fn view<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        FilteredView::from_indices(dataset, self.indices.clone())
    }

    /// Build the downloadable report for this dashboard's rows.
    pub fn report(&self, dataset: &Dataset) -> ReportArtifacts {
        build_report(
            &self.view(dataset),
            &self.criteria.genre_label(),
            &self.criteria.year_label(),
        )
    }
}

/// One recomputation pass: filter, then aggregate every chart series.
pub fn render(dataset: &Dataset, criteria: &FilterCriteria, bins: usize) -> Dashboard {
    let view = apply(dataset, criteria);
    log::debug!(
        "Recomputed dashboard for {criteria:?}: {} of {} rows",
        view.len(),
        dataset.len()
    );
    Dashboard {
        criteria: criteria.clone(),
        charts: ChartSet::compute(&view, bins),
        indices: view.indices().to_vec(),
    }
}

/// Headless run: write the chart series and both report artifacts into `dir`.
///
/// Each artifact is attempted even if the other fails. Returns whether every
/// file was written.
pub fn export_to_dir(dataset: &Dataset, criteria: &FilterCriteria, bins: usize, dir: &Path) -> Result<bool> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let dashboard = render(dataset, criteria, bins);
    let charts = serde_json::to_vec_pretty(&dashboard.charts).context("serialising chart series")?;
    let charts_path = dir.join(CHARTS_FILE_NAME);
    std::fs::write(&charts_path, charts)
        .with_context(|| format!("writing {}", charts_path.display()))?;

    let report = dashboard.report(dataset);
    let mut all_written = true;
    for artifact in Artifact::ALL {
        let path = dir.join(artifact.file_name());
        let written = match report.artifact(artifact) {
            Ok(bytes) => std::fs::write(&path, bytes).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match written {
            Ok(()) => log::info!("Wrote {}", path.display()),
            Err(e) => {
                log::error!("{} not written: {e}", artifact.label());
                all_written = false;
            }
        }
    }
    Ok(all_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::three_movies;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_filters_then_aggregates() {
        let ds = three_movies();
        let dash = render(&ds, &FilterCriteria::new(Some("Action".into()), None), 10);

        assert_eq!(dash.indices, vec![0, 2]);
        assert_eq!(dash.charts.movies_per_year, vec![(2020, 1), (2021, 1)]);
        assert_eq!(dash.charts.genre_counts, vec![("Action".to_string(), 2)]);
    }

    #[test]
    fn report_uses_dashboard_labels() {
        let ds = three_movies();
        let dash = render(&ds, &FilterCriteria::new(None, Some(2020)), 10);
        let report = dash.report(&ds);

        assert_eq!(report.selected_genre, "Todos os Gêneros");
        assert_eq!(report.selected_year, "2020");
        assert_eq!(report.total_gross, 100.0);
        assert_eq!(report.row_count, 2);
    }

    #[test]
    fn export_writes_all_files() {
        let ds = three_movies();
        let dir = tempfile::tempdir().unwrap();
        let ok = export_to_dir(&ds, &FilterCriteria::default(), 10, dir.path()).unwrap();

        assert!(ok);
        for name in [CHARTS_FILE_NAME, "Relatorio_Filmes.pdf", "Relatorio_Filmes.xlsx"] {
            assert!(dir.path().join(name).is_file(), "{name} missing");
        }
        let charts: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join(CHARTS_FILE_NAME)).unwrap())
                .unwrap();
        assert_eq!(charts["movies_per_year"], serde_json::json!([[2019, 1], [2020, 1], [2021, 1]]));
    }

    #[test]
    fn export_reports_failed_artifact() {
        let ds = crate::data::test_support::movie_table(&[("Ран", Some("Драма"), Some(1985), None)]);
        let dir = tempfile::tempdir().unwrap();
        let criteria = FilterCriteria::new(Some("Драма".into()), None);
        let ok = export_to_dir(&ds, &criteria, 10, dir.path()).unwrap();

        assert!(!ok);
        assert!(!dir.path().join("Relatorio_Filmes.pdf").exists());
        assert!(dir.path().join("Relatorio_Filmes.xlsx").is_file());
    }

    #[test]
    fn render_is_deterministic() {
        let ds = three_movies();
        let criteria = FilterCriteria::new(Some("Drama".into()), None);
        let a = render(&ds, &criteria, 5);
        let b = render(&ds, &criteria, 5);
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.charts, b.charts);
    }
}
