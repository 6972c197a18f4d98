//! Startup configuration.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::data::filter::FilterCriteria;

/// Interactive movie box-office dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "movie-dash", version, about)]
pub struct Config {
    /// Movie table to load (.xlsx, .xls, .ods, .csv, .json or .parquet).
    /// A file dialog is shown when omitted.
    #[arg(env = "MOVIE_DASH_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Number of buckets in the IMDb rating histogram.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub bins: u16,

    /// Write the report into this directory and exit instead of opening the UI.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Genre filter for --export-dir (substring, case-sensitive).
    #[arg(long, requires = "export_dir")]
    pub genre: Option<String>,

    /// Minimum release year for --export-dir.
    #[arg(long, requires = "export_dir")]
    pub min_year: Option<i64>,
}

impl Config {
    /// Filter criteria given on the command line.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.genre.clone(), self.min_year)
    }

    pub fn histogram_bins(&self) -> usize {
        usize::from(self.bins)
    }

    /// The dataset path, asking the user with a file dialog when none was given.
    pub fn resolve_dataset_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.dataset {
            return Ok(path.clone());
        }
        if self.export_dir.is_some() {
            bail!("A dataset path is required with --export-dir");
        }
        rfd::FileDialog::new()
            .set_title("Abrir planilha de filmes")
            .add_filter("Planilhas", &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet"])
            .pick_file()
            .context("No dataset selected (pass a path or choose a file)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["movie-dash", "filmes.xlsx"]).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("filmes.xlsx")));
        assert_eq!(config.histogram_bins(), 10);
        assert_eq!(config.criteria(), FilterCriteria::default());
    }

    #[test]
    fn headless_export_criteria() {
        let config = Config::try_parse_from([
            "movie-dash",
            "filmes.xlsx",
            "--export-dir",
            "out",
            "--genre",
            "Ação",
            "--min-year",
            "2010",
        ])
        .unwrap();
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
        assert_eq!(
            config.criteria(),
            FilterCriteria::new(Some("Ação".into()), Some(2010))
        );
    }

    #[test]
    fn filters_require_export_dir() {
        assert!(Config::try_parse_from(["movie-dash", "f.xlsx", "--genre", "Drama"]).is_err());
    }

    #[test]
    fn headless_export_needs_dataset_path() {
        let config = Config::try_parse_from(["movie-dash", "--export-dir", "out"]).unwrap();
        let err = config.resolve_dataset_path().unwrap_err();
        assert!(err.to_string().contains("--export-dir"));
    }

    #[test]
    fn zero_bins_rejected() {
        assert!(Config::try_parse_from(["movie-dash", "f.xlsx", "--bins", "0"]).is_err());
    }
}
