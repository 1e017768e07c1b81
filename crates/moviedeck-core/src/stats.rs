//! Statistics aggregation over the popular, top-rated, upcoming and genre lists.

use moviedeck_api::tmdb::{TmdbGenreList, TmdbMovieList, TmdbMovieSummary};
use serde::Serialize;

use crate::format::{NOT_AVAILABLE, group_thousands, one_decimal};

/// Summary statistics; each field falls back to `"N/A"` on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    /// Mean rating of the popular list.
    pub avg_popular_rating: String,
    /// Mean rating of the top-rated list.
    pub avg_top_rated_rating: String,
    /// Total number of upcoming movies reported by the source.
    pub total_upcoming_count: String,
    /// Number of genres in the catalog.
    pub total_genre_count: String,
    /// Most frequent release year among popular movies.
    pub most_popular_release_year: String,
}

/// Aggregates the four datasets into summary statistics.
#[must_use]
pub fn aggregate(
    popular: &TmdbMovieList,
    top_rated: &TmdbMovieList,
    upcoming: &TmdbMovieList,
    genres: &TmdbGenreList,
) -> StatisticsSummary {
    let summary = StatisticsSummary {
        avg_popular_rating: average_rating(popular.movies()),
        avg_top_rated_rating: average_rating(top_rated.movies()),
        total_upcoming_count: upcoming
            .total_results
            .map_or_else(|| String::from(NOT_AVAILABLE), group_thousands),
        total_genre_count: genres
            .genres
            .as_ref()
            .map_or_else(|| String::from(NOT_AVAILABLE), |g| g.len().to_string()),
        most_popular_release_year: most_popular_year(popular.movies()),
    };
    tracing::debug!(?summary, "statistics aggregated");
    summary
}

/// Mean vote average with one decimal; missing ratings count as 0.
#[must_use]
pub fn average_rating(movies: &[TmdbMovieSummary]) -> String {
    if movies.is_empty() {
        return String::from(NOT_AVAILABLE);
    }
    let total: f64 = movies.iter().map(|m| m.vote_average.unwrap_or(0.0)).sum();
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    let count = movies.len() as f64;
    one_decimal(total / count)
}

/// Release year that occurs most often.
///
/// The year is the text before the first `-` of the release date and must
/// be exactly four characters. When counts tie, the year first seen in list
/// order wins.
#[must_use]
pub fn most_popular_year(movies: &[TmdbMovieSummary]) -> String {
    // Insertion-ordered so ties resolve to the earliest year seen.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for year in movies.iter().filter_map(release_year) {
        match counts.iter_mut().find(|(y, _)| *y == year) {
            Some((_, count)) => *count = count.saturating_add(1),
            None => counts.push((year, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(year, count) in &counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((year, count));
        }
    }
    best.map_or_else(|| String::from(NOT_AVAILABLE), |(year, _)| String::from(year))
}

fn release_year(movie: &TmdbMovieSummary) -> Option<&str> {
    let date = movie.release_date.as_deref()?;
    let year = date.split('-').next()?;
    (year.chars().count() == 4).then_some(year)
}
