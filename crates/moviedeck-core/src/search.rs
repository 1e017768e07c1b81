//! Search result shaping.

use moviedeck_api::tmdb::TmdbMovieSummary;
use serde::Serialize;

use crate::format::{UNKNOWN, rating_text, text_or};
use crate::images::{ImageUrls, PosterSize};

/// Overviews longer than this many characters are cut and suffixed with `...`.
pub const OVERVIEW_TRUNCATE_LENGTH: usize = 100;

/// Title used when the data source omits one.
pub const UNTITLED: &str = "Untitled";

const NO_OVERVIEW: &str = "No overview available";

/// One display-ready search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMovieRow {
    /// TMDB movie ID for drilling into details, when the source provided one.
    pub id: Option<u64>,
    /// Poster thumbnail or placeholder URL.
    pub poster_url: String,
    /// Movie title.
    pub title: String,
    /// Release date or `"Unknown"`.
    pub release_date_text: String,
    /// One-decimal rating or `"N/A"`.
    pub rating_text: String,
    /// Truncated overview or `"No overview available"`.
    pub overview_text: String,
}

/// Shapes the first `limit` movies into display rows, keeping source order.
#[must_use]
pub fn shape_search_results(
    raw: &[TmdbMovieSummary],
    limit: usize,
    images: &ImageUrls,
) -> Vec<DisplayMovieRow> {
    raw.iter()
        .take(limit)
        .map(|movie| shape_row(movie, images))
        .collect()
}

fn shape_row(movie: &TmdbMovieSummary, images: &ImageUrls) -> DisplayMovieRow {
    DisplayMovieRow {
        id: movie.id,
        poster_url: images.poster_url(movie.poster_path.as_deref(), PosterSize::Thumbnail),
        title: text_or(movie.title.as_deref(), UNTITLED),
        release_date_text: text_or(movie.release_date.as_deref(), UNKNOWN),
        rating_text: rating_text(movie.vote_average),
        overview_text: truncate_overview(movie.overview.as_deref()),
    }
}

/// Cuts an overview to [`OVERVIEW_TRUNCATE_LENGTH`] characters.
#[must_use]
pub fn truncate_overview(overview: Option<&str>) -> String {
    match overview.filter(|s| !s.is_empty()) {
        Some(text) => match text.char_indices().nth(OVERVIEW_TRUNCATE_LENGTH) {
            Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
            None => String::from(text),
        },
        None => String::from(NO_OVERVIEW),
    }
}
