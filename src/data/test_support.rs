//! Small hand-built datasets shared by the unit tests.

use super::model::{CellValue, Dataset, Field};

/// (title, genre, year, gross)
pub type MovieSpec<'a> = (&'a str, Option<&'a str>, Option<i64>, Option<f64>);

fn text(v: Option<&str>) -> CellValue {
    v.map(|s| CellValue::String(s.to_string()))
        .unwrap_or(CellValue::Null)
}

fn number(v: Option<f64>) -> CellValue {
    v.map(CellValue::Float).unwrap_or(CellValue::Null)
}

/// Title / genre / year / gross table.
pub fn movie_table(movies: &[MovieSpec<'_>]) -> Dataset {
    let columns = [
        Field::Title,
        Field::Genres,
        Field::ReleaseYear,
        Field::WorldwideGross,
    ]
    .iter()
    .map(|f| f.aliases()[0].to_string())
    .collect();
    let rows = movies
        .iter()
        .map(|(title, genre, year, gross)| {
            vec![
                CellValue::String(title.to_string()),
                text(*genre),
                year.map(CellValue::Integer).unwrap_or(CellValue::Null),
                number(*gross),
            ]
        })
        .collect();
    Dataset::from_table(columns, rows).expect("test table has a title column")
}

/// (Action, 2020, 100), (Drama, 2019, 200), (Action, 2021, null)
pub fn three_movies() -> Dataset {
    movie_table(&[
        ("Movie A", Some("Action"), Some(2020), Some(100.0)),
        ("Movie B", Some("Drama"), Some(2019), Some(200.0)),
        ("Movie C", Some("Action"), Some(2021), None),
    ])
}

/// (title, genre, rating, runtime, budget, gross, critic, audience)
pub type FullSpec<'a> = (
    &'a str,
    Option<&'a str>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
);

/// Table with every known column; release year is always 2000.
pub fn full_table(movies: &[FullSpec<'_>]) -> Dataset {
    let columns = Field::ALL
        .iter()
        .map(|f| f.aliases()[0].to_string())
        .collect();
    let rows = movies
        .iter()
        .map(
            |(title, genre, rating, runtime, budget, gross, critic, audience)| {
                vec![
                    CellValue::String(title.to_string()),
                    text(*genre),
                    CellValue::Integer(2000),
                    number(*rating),
                    number(*budget),
                    number(*gross),
                    number(*critic),
                    number(*audience),
                    number(*runtime),
                ]
            },
        )
        .collect();
    Dataset::from_table(columns, rows).expect("test table has a title column")
}
