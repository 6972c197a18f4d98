use super::model::{Dataset, Movie, Row};

/// Label shown for an unset filter.
pub const NO_FILTER: &str = "Sem Filtro";

// ---------------------------------------------------------------------------
// Filter predicate: which genre / minimum year is selected
// ---------------------------------------------------------------------------

/// The current filter selection. `None` means "no filter" for that control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// Substring matched (case-sensitively) against the genre label.
    pub genre: Option<String>,
    /// Inclusive lower bound on the release year.
    pub min_year: Option<i64>,
}

impl FilterCriteria {
    pub fn new(genre: Option<String>, min_year: Option<i64>) -> Self {
        Self {
            genre: genre.filter(|g| !g.is_empty()),
            min_year,
        }
    }

    /// Genre label used in the report.
    pub fn genre_label(&self) -> String {
        self.genre
            .clone()
            .unwrap_or_else(|| "Todos os Gêneros".to_string())
    }

    /// Year label used in the report.
    pub fn year_label(&self) -> String {
        self.min_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Todos os Anos".to_string())
    }

    /// Whether a movie passes every active predicate.
    ///
    /// A movie passes:
    /// * the genre filter when its genre is present and contains the filter text
    /// * the year filter when its year is present and `>= min_year`
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(genre) = &self.genre {
            match &movie.genres {
                Some(genres) if genres.contains(genre.as_str()) => {}
                _ => return false,
            }
        }
        if let Some(min_year) = self.min_year {
            match movie.release_year {
                Some(year) if year >= min_year => {}
                _ => return false,
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current criteria
// ---------------------------------------------------------------------------

/// A subset of a [`Dataset`], held as ascending row indices.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over an explicit index list. Out-of-range indices are dropped.
    pub fn from_indices(dataset: &'a Dataset, mut indices: Vec<usize>) -> Self {
        indices.retain(|&i| i < dataset.len());
        indices.sort_unstable();
        indices.dedup();
        Self { dataset, indices }
    }

    /// The whole dataset, unfiltered.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.rows[i])
    }

    pub fn movies(&self) -> impl Iterator<Item = &'a Movie> + '_ {
        self.rows().map(|row| &row.movie)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Re-apply criteria to this view, narrowing it further.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredView<'a> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| criteria.matches(&self.dataset.rows[i].movie))
            .collect();
        FilteredView {
            dataset: self.dataset,
            indices,
        }
    }
}

/// Return the view of rows that pass all active filters.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::all(dataset).refine(criteria)
}
