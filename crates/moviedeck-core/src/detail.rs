//! Movie detail shaping.

use moviedeck_api::tmdb::{TmdbCrewMember, TmdbMovieDetail};
use serde::Serialize;

use crate::error::ShapeError;
use crate::format::{UNKNOWN, group_thousands, rating_text, text_or};
use crate::images::{ImageUrls, PosterSize};
use crate::search::UNTITLED;

const NO_OVERVIEW: &str = "No overview available.";
const NOT_FOUND_MESSAGE: &str = "Movie not found";
const DIRECTOR_JOB: &str = "Director";

/// Display-ready movie detail card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMovieDetail {
    /// Large poster or placeholder URL.
    pub poster_url: String,
    /// Movie title.
    pub title: String,
    /// Release date or `"Unknown"`.
    pub release_date_text: String,
    /// One-decimal rating or `"N/A"`.
    pub rating_text: String,
    /// Grouped vote count, `"0"` when absent.
    pub vote_count_text: String,
    /// `"<n> minutes"` or `"Unknown"`.
    pub runtime_text: String,
    /// Comma-separated genre names or `"Unknown"`.
    pub genres_text: String,
    /// First credited director or `"Unknown"`.
    pub director_name: String,
    /// `"$"`-prefixed budget or `"Unknown"`.
    pub budget_text: String,
    /// `"$"`-prefixed revenue or `"Unknown"`.
    pub revenue_text: String,
    /// Full overview or `"No overview available."`.
    pub overview_text: String,
}

/// Shapes a movie detail document into a display card.
///
/// # Errors
///
/// Returns [`ShapeError::NotFound`] when the document carries `success: false`.
pub fn shape_detail(
    raw: &TmdbMovieDetail,
    images: &ImageUrls,
) -> Result<DisplayMovieDetail, ShapeError> {
    if raw.success == Some(false) {
        return Err(ShapeError::NotFound {
            message: text_or(raw.status_message.as_deref(), NOT_FOUND_MESSAGE),
        });
    }

    let movie = &raw.summary;
    Ok(DisplayMovieDetail {
        poster_url: images.poster_url(movie.poster_path.as_deref(), PosterSize::Large),
        title: text_or(movie.title.as_deref(), UNTITLED),
        release_date_text: text_or(movie.release_date.as_deref(), UNKNOWN),
        rating_text: rating_text(movie.vote_average),
        vote_count_text: group_thousands(raw.vote_count.unwrap_or(0)),
        runtime_text: raw
            .runtime
            .filter(|&m| m > 0)
            .map_or_else(|| String::from(UNKNOWN), |m| format!("{m} minutes")),
        genres_text: genres_text(raw),
        director_name: find_director(
            raw.credits
                .as_ref()
                .and_then(|c| c.crew.as_deref())
                .unwrap_or_default(),
        ),
        budget_text: dollars(raw.budget),
        revenue_text: dollars(raw.revenue),
        overview_text: text_or(movie.overview.as_deref(), NO_OVERVIEW),
    })
}

fn genres_text(raw: &TmdbMovieDetail) -> String {
    let names: Vec<&str> = raw
        .genres
        .iter()
        .flatten()
        .filter_map(|g| g.name.as_deref())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        String::from(UNKNOWN)
    } else {
        names.join(", ")
    }
}

/// Name of the first crew member whose job is exactly `"Director"`.
///
/// Later directors in the list are ignored.
#[must_use]
pub fn find_director(crew: &[TmdbCrewMember]) -> String {
    crew.iter()
        .find(|person| person.job.as_deref() == Some(DIRECTOR_JOB))
        .and_then(|person| person.name.as_deref())
        .map_or_else(|| String::from(UNKNOWN), String::from)
}

/// `"$"`-prefixed grouped amount for positive values, `"Unknown"` otherwise.
fn dollars(amount: Option<i64>) -> String {
    amount
        .and_then(|a| u64::try_from(a).ok())
        .filter(|&a| a > 0)
        .map_or_else(|| String::from(UNKNOWN), |a| format!("${}", group_thousands(a)))
}
