/// Report composer: turns the current [`FilteredView`] into the two
/// downloadable artifacts.
///
/// ```text
///   FilteredView ──► ReportPayload ──► Document ──► pdf::render  ──► PDF bytes
///                         │
///                         └──────────► TableExport ─► xlsx::write ─► XLSX bytes
/// ```
///
/// The two artifacts are serialised independently; a failure in one never
/// prevents the other.

pub mod document;
pub mod pdf;
pub mod xlsx;

use crate::data::filter::FilteredView;

pub use document::Document;
pub use xlsx::TableExport;

pub const PDF_FILE_NAME: &str = "Relatorio_Filmes.pdf";
pub const XLSX_FILE_NAME: &str = "Relatorio_Filmes.xlsx";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("character {ch:?} in {text:?} cannot be encoded in the PDF font (Latin-1 only)")]
    UnsupportedCharacter { ch: char, text: String },

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("too many columns for a worksheet: {0}")]
    TooManyColumns(usize),

    #[error("too many rows for a worksheet: {0}")]
    TooManyRows(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// ReportPayload – snapshot of the filtered data at export time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReportPayload<'a> {
    pub selected_genre: String,
    pub selected_year: String,
    /// Sum of worldwide gross over the view; missing values count as zero.
    pub total_gross: f64,
    pub row_count: usize,
    pub rows: FilteredView<'a>,
}

impl<'a> ReportPayload<'a> {
    pub fn new(view: &FilteredView<'a>, genre_label: &str, year_label: &str) -> Self {
        let total_gross = view.movies().filter_map(|m| m.worldwide_gross_usd).sum();
        ReportPayload {
            selected_genre: genre_label.to_string(),
            selected_year: year_label.to_string(),
            total_gross,
            row_count: view.len(),
            rows: view.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ReportArtifacts – per-artifact outcome
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ReportArtifacts {
    pub selected_genre: String,
    pub selected_year: String,
    pub total_gross: f64,
    pub row_count: usize,
    pub pdf: Result<Vec<u8>, ExportError>,
    pub xlsx: Result<Vec<u8>, ExportError>,
}

impl ReportArtifacts {
    /// Bytes of one artifact, or the error that prevented building it.
    pub fn artifact(&self, artifact: Artifact) -> Result<&[u8], &ExportError> {
        match artifact {
            Artifact::Pdf => self.pdf.as_deref(),
            Artifact::Excel => self.xlsx.as_deref(),
        }
    }
}

/// One of the two report downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Pdf,
    Excel,
}

impl Artifact {
    pub const ALL: [Artifact; 2] = [Artifact::Pdf, Artifact::Excel];

    pub fn label(self) -> &'static str {
        match self {
            Artifact::Pdf => "PDF",
            Artifact::Excel => "Excel",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Pdf => PDF_FILE_NAME,
            Artifact::Excel => XLSX_FILE_NAME,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Artifact::Pdf => "pdf",
            Artifact::Excel => "xlsx",
        }
    }
}

/// Build the PDF and the spreadsheet for a view.
pub fn build_report(view: &FilteredView<'_>, genre_label: &str, year_label: &str) -> ReportArtifacts {
    let payload = ReportPayload::new(view, genre_label, year_label);

    let document = Document::compose(&payload);
    let pdf = pdf::render(&document);
    if let Err(e) = &pdf {
        log::error!("PDF report failed: {e}");
    }

    let table = TableExport::from_view(&payload.rows);
    let xlsx = xlsx::write(&table);
    if let Err(e) = &xlsx {
        log::error!("Excel report failed: {e}");
    }

    log::info!(
        "Built report for {} / {}: {} rows, total gross {}",
        payload.selected_genre,
        payload.selected_year,
        payload.row_count,
        document::format_usd(payload.total_gross)
    );

    ReportArtifacts {
        selected_genre: payload.selected_genre,
        selected_year: payload.selected_year,
        total_gross: payload.total_gross,
        row_count: payload.row_count,
        pdf,
        xlsx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterCriteria, apply};
    use crate::data::loader::load_workbook_bytes;
    use crate::data::test_support::{movie_table, three_movies};
    use pretty_assertions::assert_eq;

    #[test]
    fn scenario_action_total_gross_skips_null() {
        let ds = three_movies();
        let criteria = FilterCriteria::new(Some("Action".into()), None);
        let view = apply(&ds, &criteria);
        let report = build_report(&view, &criteria.genre_label(), &criteria.year_label());

        assert_eq!(report.total_gross, 100.0);
        assert_eq!(report.row_count, 2);
        assert_eq!(report.selected_genre, "Action");
        assert_eq!(report.selected_year, "Todos os Anos");
        assert!(report.pdf.is_ok());
        assert!(report.xlsx.is_ok());
    }

    #[test]
    fn unknown_genre_gives_empty_report_without_errors() {
        let ds = three_movies();
        let view = apply(&ds, &FilterCriteria::new(Some("Western".into()), None));
        let report = build_report(&view, "Western", "Todos os Anos");

        assert_eq!(report.total_gross, 0.0);
        assert_eq!(report.row_count, 0);
        let pdf = report.pdf.unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let reread = load_workbook_bytes(report.xlsx.unwrap()).unwrap();
        assert_eq!(reread.len(), 0);
        assert_eq!(reread.columns, ds.columns);
    }

    #[test]
    fn pdf_failure_does_not_block_spreadsheet() {
        let ds = movie_table(&[("七人の侍", Some("ドラマ"), Some(1954), Some(1.0))]);
        let view = apply(&ds, &FilterCriteria::default());
        let report = build_report(&view, "ドラマ", "Todos os Anos");

        assert!(matches!(
            report.pdf,
            Err(ExportError::UnsupportedCharacter { .. })
        ));
        let reread = load_workbook_bytes(report.xlsx.unwrap()).unwrap();
        assert_eq!(reread.rows[0].movie.title, "七人の侍");
    }

    #[test]
    fn exported_table_round_trips_through_loader() {
        let ds = movie_table(&[
            ("Movie A", Some("Action"), Some(2020), Some(100.5)),
            ("Movie B", None, Some(2019), None),
            ("Movie C", Some("Action, Drama"), None, Some(3_000_000.0)),
        ]);
        let view = apply(&ds, &FilterCriteria::default());
        let report = build_report(&view, "Todos os Gêneros", "Todos os Anos");

        let reread = load_workbook_bytes(report.xlsx.unwrap()).unwrap();
        assert_eq!(reread.len(), view.len());
        assert_eq!(reread.columns, ds.columns);
        let original: Vec<_> = view.movies().cloned().collect();
        let loaded: Vec<_> = reread.rows.iter().map(|r| r.movie.clone()).collect();
        assert_eq!(loaded, original);
    }
}
