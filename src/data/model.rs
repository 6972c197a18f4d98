use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// One cell as read from the source table, before any field interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Spreadsheets store every number as a float; 2020.0 reads as a year.
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Interpret the value as an `f64`. Numeric text is accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Interpret the value as a whole number. Floats must be integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            CellValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| CellValue::Float(s.parse().ok()?).as_i64())
            }
            _ => None,
        }
    }

    /// Interpret the value as non-empty text.
    pub fn as_text(&self) -> Option<String> {
        if self.is_null() {
            return None;
        }
        match self {
            CellValue::String(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Field – the known movie columns
// ---------------------------------------------------------------------------

/// The columns the dashboard knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Genres,
    ReleaseYear,
    ImdbRating,
    Budget,
    WorldwideGross,
    CriticScore,
    AudienceScore,
    Runtime,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Genres,
        Field::ReleaseYear,
        Field::ImdbRating,
        Field::Budget,
        Field::WorldwideGross,
        Field::CriticScore,
        Field::AudienceScore,
        Field::Runtime,
    ];

    /// Header names accepted for this field: the English header first, then
    /// the Portuguese headers of the dashboard workbook.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["Title", "Título", "Filme"],
            Field::Genres => &["Genre(s)", "Genres", "Genre", "Gênero(s)", "Gênero"],
            Field::ReleaseYear => &["Release Year", "Ano de Lançamento"],
            Field::ImdbRating => &["IMDb Rating", "Nota IMDb"],
            Field::Budget => &["Budget (USD)", "Orçamento (USD)"],
            Field::WorldwideGross => &["Worldwide Gross (USD)", "Bilheteria Mundial (USD)"],
            Field::CriticScore => &[
                "Rotten Tomatoes Critic Score",
                "Nota Rotten Tomatoes (Crítica)",
            ],
            Field::AudienceScore => &[
                "Rotten Tomatoes Audience Score",
                "Nota Rotten Tomatoes (Público)",
            ],
            Field::Runtime => &["Runtime (min)", "Duração (min)"],
        }
    }

    /// Axis label used by the charts.
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Título",
            Field::Genres => "Gênero",
            Field::ReleaseYear => "Ano de Lançamento",
            Field::ImdbRating => "Nota IMDb",
            Field::Budget => "Orçamento (USD)",
            Field::WorldwideGross => "Bilheteria Mundial (USD)",
            Field::CriticScore => "Nota RT Crítica",
            Field::AudienceScore => "Nota RT Público",
            Field::Runtime => "Duração (min)",
        }
    }

    fn matches(self, header: &str) -> bool {
        let header = header.trim();
        self.aliases()
            .iter()
            .any(|alias| alias.to_lowercase() == header.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Movie / Row – one record of the dataset
// ---------------------------------------------------------------------------

/// Typed view of one movie. Every attribute but the title may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Movie {
    pub title: String,
    /// Raw genre label; may hold several genres in one string.
    pub genres: Option<String>,
    pub release_year: Option<i64>,
    pub imdb_rating: Option<f64>,
    pub budget_usd: Option<f64>,
    pub worldwide_gross_usd: Option<f64>,
    pub critic_score: Option<f64>,
    pub audience_score: Option<f64>,
    pub runtime_min: Option<f64>,
}

impl Movie {
    /// Numeric value of a field, `None` for text fields and missing values.
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Title | Field::Genres => None,
            Field::ReleaseYear => self.release_year.map(|y| y as f64),
            Field::ImdbRating => self.imdb_rating,
            Field::Budget => self.budget_usd,
            Field::WorldwideGross => self.worldwide_gross_usd,
            Field::CriticScore => self.critic_score,
            Field::AudienceScore => self.audience_score,
            Field::Runtime => self.runtime_min,
        }
    }
}

/// One row of the source table: raw cells in column order plus the typed movie.
#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<CellValue>,
    pub movie: Movie,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column headers in source order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Source column index of each known field; `None` when the column is absent.
    field_columns: BTreeMap<Field, Option<usize>>,
}

impl Dataset {
    /// Build a dataset from a header row and raw cell rows.
    ///
    /// Short rows are padded with nulls, fully empty rows are skipped. Only the
    /// title column is mandatory; every other missing column reads as all-null.
    pub fn from_table(columns: Vec<String>, raw_rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let field_columns: BTreeMap<Field, Option<usize>> = Field::ALL
            .iter()
            .map(|&field| (field, columns.iter().position(|h| field.matches(h))))
            .collect();

        if field_columns[&Field::Title].is_none() {
            bail!(
                "No title column found (expected one of {:?}); columns present: {columns:?}",
                Field::Title.aliases()
            );
        }
        for (field, idx) in &field_columns {
            if idx.is_none() {
                log::warn!("Column for {field:?} not found; treating it as empty");
            }
        }

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (row_no, mut cells) in raw_rows.into_iter().enumerate() {
            if cells.iter().all(CellValue::is_null) {
                log::debug!("Skipping empty row {row_no}");
                continue;
            }
            cells.resize(columns.len(), CellValue::Null);
            let movie = movie_from_cells(&cells, &field_columns);
            rows.push(Row { cells, movie });
        }

        Ok(Dataset {
            columns,
            rows,
            field_columns,
        })
    }

    /// Source column index for a field, if the column exists.
    pub fn column_of(&self, field: Field) -> Option<usize> {
        self.field_columns.get(&field).copied().flatten()
    }

    /// Fields whose column could not be found in the source.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&field| self.column_of(field).is_none())
            .collect()
    }

    /// Sorted distinct genre labels, for the genre selector.
    pub fn genre_options(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.movie.genres.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct release years, for the minimum-year selector.
    pub fn year_options(&self) -> Vec<i64> {
        self.rows
            .iter()
            .filter_map(|row| row.movie.release_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn movie_from_cells(cells: &[CellValue], field_columns: &BTreeMap<Field, Option<usize>>) -> Movie {
    fn lookup<'a>(
        cells: &'a [CellValue],
        field_columns: &BTreeMap<Field, Option<usize>>,
        field: Field,
    ) -> Option<&'a CellValue> {
        field_columns
            .get(&field)
            .copied()
            .flatten()
            .and_then(|idx| cells.get(idx))
    }
    let cell = |field: Field| lookup(cells, field_columns, field);
    let number = |field: Field| cell(field).and_then(CellValue::as_f64);

    Movie {
        title: cell(Field::Title)
            .and_then(CellValue::as_text)
            .unwrap_or_default(),
        genres: cell(Field::Genres).and_then(CellValue::as_text),
        release_year: cell(Field::ReleaseYear).and_then(CellValue::as_i64),
        imdb_rating: number(Field::ImdbRating),
        budget_usd: number(Field::Budget),
        worldwide_gross_usd: number(Field::WorldwideGross),
        critic_score: number(Field::CriticScore),
        audience_score: number(Field::AudienceScore),
        runtime_min: number(Field::Runtime),
    }
}
