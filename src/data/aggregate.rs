//! Chart aggregations over a [`FilteredView`].
//!
//! Every function here is total: an empty view (or a view where the relevant
//! columns are all null) yields an empty series, never an error.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::FilteredView;
use super::model::Field;

/// One histogram bucket. `end` is exclusive except for the last bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// One point of a scatter chart; `color` carries the optional third field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: Option<f64>,
}

/// Equal-width histogram of IMDb ratings over the observed `[min, max]` range.
pub fn rating_histogram(view: &FilteredView<'_>, bins: usize) -> Vec<HistogramBin> {
    let ratings: Vec<f64> = view.movies().filter_map(|m| m.imdb_rating).collect();
    histogram(&ratings, bins)
}

fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || values.is_empty() {
        return Vec::new();
    }
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;
    let edge = |i: usize| if i == bins { max } else { min + i as f64 * width };

    let mut counts = vec![0usize; bins];
    for &v in values {
        // The division can round across an edge; settle against the edges
        // actually reported so every bucket stays half-open.
        let mut idx = (((v - min) / width).floor().max(0.0) as usize).min(bins - 1);
        if idx > 0 && v < edge(idx) {
            idx -= 1;
        } else if idx + 1 < bins && v >= edge(idx + 1) {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: edge(i),
            end: edge(i + 1),
            count,
        })
        .collect()
}

/// Samples along the rating density curve.
pub const KDE_POINTS: usize = 200;

/// Gaussian kernel density of the IMDb ratings, scaled to histogram counts
/// so it can be drawn over [`rating_histogram`] with the same `bins`.
///
/// Bandwidth follows Scott's rule. Fewer than two ratings, or ratings with
/// no spread, give an empty curve.
pub fn rating_kde(view: &FilteredView<'_>, bins: usize) -> Vec<(f64, f64)> {
    let ratings: Vec<f64> = view.movies().filter_map(|m| m.imdb_rating).collect();
    kde_curve(&ratings, bins, KDE_POINTS)
}

fn kde_curve(values: &[f64], bins: usize, points: usize) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 || bins == 0 || points < 2 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev < f64::EPSILON {
        return Vec::new();
    }

    let bandwidth = std_dev * (n as f64).powf(-0.2);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = (max - min) / bins as f64;
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n as f64 * bin_width;

    (0..points)
        .map(|i| {
            let x = min + (max - min) * i as f64 / (points - 1) as f64;
            let density: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}

/// Number of movies per genre label, most frequent first.
///
/// Ties keep the order in which the genres first appear in the view. The
/// label is treated as one category; multi-genre strings are not split.
pub fn count_by_genre(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut position: BTreeMap<&str, usize> = BTreeMap::new();

    for genre in view.movies().filter_map(|m| m.genres.as_deref()) {
        match position.get(genre) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(genre, counts.len());
                counts.push((genre.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Mean runtime per genre label, ordered by genre. Movies missing either
/// field are ignored; genres with no runtimes do not appear.
pub fn mean_duration_by_genre(view: &FilteredView<'_>) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for movie in view.movies() {
        let (Some(genre), Some(runtime)) = (movie.genres.as_deref(), movie.runtime_min) else {
            continue;
        };
        let entry = sums.entry(genre).or_insert((0.0, 0));
        entry.0 += runtime;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(genre, (sum, n))| (genre.to_string(), sum / n as f64))
        .collect()
}

/// Number of movies per release year, ascending.
pub fn count_by_year(view: &FilteredView<'_>) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for year in view.movies().filter_map(|m| m.release_year) {
        *counts.entry(year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// `(x, y, color)` triples for a scatter chart.
///
/// Movies missing `x` or `y` are dropped; a missing colour value is kept as
/// `None`.
pub fn scatter_pairs(
    view: &FilteredView<'_>,
    x: Field,
    y: Field,
    color: Option<Field>,
) -> Vec<ScatterPoint> {
    view.movies()
        .filter_map(|m| {
            Some(ScatterPoint {
                x: m.numeric(x)?,
                y: m.numeric(y)?,
                color: color.and_then(|c| m.numeric(c)),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ChartSet – the six dashboard series
// ---------------------------------------------------------------------------

/// Aggregated series for the six dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSet {
    pub rating_histogram: Vec<HistogramBin>,
    /// Density curve drawn over the histogram, in count units.
    pub rating_kde: Vec<(f64, f64)>,
    pub genre_counts: Vec<(String, usize)>,
    /// Budget (x) vs worldwide gross (y), coloured by IMDb rating.
    pub budget_vs_gross: Vec<ScatterPoint>,
    /// Rotten Tomatoes critic (x) vs audience (y).
    pub critic_vs_audience: Vec<ScatterPoint>,
    pub mean_runtime_by_genre: Vec<(String, f64)>,
    pub movies_per_year: Vec<(i64, usize)>,
}

impl ChartSet {
    pub fn compute(view: &FilteredView<'_>, bins: usize) -> Self {
        ChartSet {
            rating_histogram: rating_histogram(view, bins),
            rating_kde: rating_kde(view, bins),
            genre_counts: count_by_genre(view),
            budget_vs_gross: scatter_pairs(
                view,
                Field::Budget,
                Field::WorldwideGross,
                Some(Field::ImdbRating),
            ),
            critic_vs_audience: scatter_pairs(view, Field::CriticScore, Field::AudienceScore, None),
            mean_runtime_by_genre: mean_duration_by_genre(view),
            movies_per_year: count_by_year(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterCriteria, apply};
    use crate::data::model::Dataset;
    use crate::data::test_support::{FullSpec, full_table, movie_table, three_movies};
    use pretty_assertions::assert_eq;

    fn ratings(values: &[Option<f64>]) -> Dataset {
        let specs: Vec<FullSpec<'_>> = values
            .iter()
            .map(|r| ("m", Some("Drama"), *r, None, None, None, None, None))
            .collect();
        full_table(&specs)
    }

    #[test]
    fn scenario_count_by_year_after_genre_filter() {
        let ds = three_movies();
        let view = apply(&ds, &FilterCriteria::new(Some("Action".into()), None));
        assert_eq!(count_by_year(&view), vec![(2020, 1), (2021, 1)]);
    }

    #[test]
    fn histogram_partitions_observed_range() {
        let ds = ratings(&[Some(5.0), Some(6.0), None, Some(7.0), Some(7.0)]);
        let view = FilteredView::all(&ds);
        let bins = rating_histogram(&view, 4);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start, 5.0);
        assert_eq!(bins[3].end, 7.0);
        assert!((bins[0].width() - 0.5).abs() < 1e-12);
        let counts: Vec<_> = bins.iter().map(|b| b.count).collect();
        // 6.0 sits on the lower edge of bucket 2; the maximum goes in the last bucket.
        assert_eq!(counts, vec![1, 0, 1, 2]);
    }

    #[test]
    fn histogram_edges_agree_with_bucket_membership() {
        let values: Vec<Option<f64>> = (50..=80).map(|i| Some(i as f64 / 10.0)).collect();
        let ds = ratings(&values);
        let bins = rating_histogram(&FilteredView::all(&ds), 10);

        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        for (i, bin) in bins.iter().enumerate() {
            let inside = values
                .iter()
                .flatten()
                .filter(|&&v| v >= bin.start && (v < bin.end || i == bins.len() - 1))
                .count();
            assert_eq!(bin.count, inside, "bucket {i} {bin:?}");
        }
    }

    #[test]
    fn kde_spans_ratings_and_is_symmetric() {
        let ds = ratings(&[Some(6.0), Some(8.0), None]);
        let curve = rating_kde(&FilteredView::all(&ds), 4);

        assert_eq!(curve.len(), KDE_POINTS);
        assert_eq!(curve[0].0, 6.0);
        assert_eq!(curve[KDE_POINTS - 1].0, 8.0);
        for (a, b) in curve.iter().zip(curve.iter().rev()) {
            assert!((a.1 - b.1).abs() < 1e-9);
        }
        let peak = curve[KDE_POINTS / 2].1;
        assert!(curve.iter().all(|&(_, y)| y > 0.0 && y <= peak + 1e-9));
    }

    #[test]
    fn kde_needs_spread() {
        let ds = ratings(&[Some(7.0), Some(7.0)]);
        assert!(rating_kde(&FilteredView::all(&ds), 10).is_empty());
        let ds = ratings(&[Some(7.0)]);
        assert!(rating_kde(&FilteredView::all(&ds), 10).is_empty());
    }

    #[test]
    fn histogram_of_single_value_widens_range() {
        let ds = ratings(&[Some(8.0), Some(8.0)]);
        let bins = rating_histogram(&FilteredView::all(&ds), 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].start, 7.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        let ds = ratings(&[None]);
        assert!(rating_histogram(&FilteredView::all(&ds), 10).is_empty());
        let ds = ratings(&[Some(1.0)]);
        assert!(rating_histogram(&FilteredView::all(&ds), 0).is_empty());
    }

    #[test]
    fn genre_counts_descend_with_first_seen_ties() {
        let ds = movie_table(&[
            ("a", Some("Drama"), None, None),
            ("b", Some("Comedy"), None, None),
            ("c", None, None, None),
            ("d", Some("Action"), None, None),
            ("e", Some("Action"), None, None),
            ("f", Some("Comedy"), None, None),
            ("g", Some("Horror"), None, None),
        ]);
        let view = FilteredView::all(&ds);
        let counts = count_by_genre(&view);

        assert_eq!(
            counts,
            vec![
                ("Comedy".to_string(), 2),
                ("Action".to_string(), 2),
                ("Drama".to_string(), 1),
                ("Horror".to_string(), 1),
            ]
        );
        let with_genre = view.movies().filter(|m| m.genres.is_some()).count();
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), with_genre);
    }

    #[test]
    fn mean_duration_ignores_missing_runtime() {
        let ds = full_table(&[
            ("a", Some("Drama"), None, Some(100.0), None, None, None, None),
            ("b", Some("Drama"), None, Some(120.0), None, None, None, None),
            ("c", Some("Drama"), None, None, None, None, None, None),
            ("d", Some("Action"), None, Some(90.0), None, None, None, None),
            ("e", Some("Western"), None, None, None, None, None, None),
            ("f", None, None, Some(500.0), None, None, None, None),
        ]);
        let means = mean_duration_by_genre(&FilteredView::all(&ds));
        assert_eq!(
            means,
            vec![("Action".to_string(), 90.0), ("Drama".to_string(), 110.0)]
        );
    }

    #[test]
    fn scatter_drops_missing_axes_but_keeps_missing_color() {
        let ds = full_table(&[
            ("a", None, Some(7.0), None, Some(10.0), Some(30.0), None, None),
            ("b", None, None, None, Some(20.0), Some(10.0), None, None),
            ("c", None, Some(6.0), None, None, Some(5.0), None, None),
            ("d", None, Some(6.0), None, Some(5.0), None, None, None),
        ]);
        let points = scatter_pairs(
            &FilteredView::all(&ds),
            Field::Budget,
            Field::WorldwideGross,
            Some(Field::ImdbRating),
        );
        assert_eq!(
            points,
            vec![
                ScatterPoint { x: 10.0, y: 30.0, color: Some(7.0) },
                ScatterPoint { x: 20.0, y: 10.0, color: None },
            ]
        );
    }

    #[test]
    fn chart_set_of_empty_view_is_empty() {
        let ds = three_movies();
        let view = apply(&ds, &FilterCriteria::new(Some("Western".into()), None));
        assert_eq!(ChartSet::compute(&view, 10), ChartSet::default());
    }

    #[test]
    fn aggregations_tolerate_missing_columns() {
        // three_movies has no rating, runtime, budget or score columns.
        let ds = three_movies();
        let charts = ChartSet::compute(&FilteredView::all(&ds), 10);
        assert!(charts.rating_histogram.is_empty());
        assert!(charts.mean_runtime_by_genre.is_empty());
        assert!(charts.budget_vs_gross.is_empty());
        assert!(charts.critic_vs_audience.is_empty());
        assert_eq!(charts.genre_counts.len(), 2);
        assert_eq!(charts.movies_per_year.len(), 3);
    }
}
