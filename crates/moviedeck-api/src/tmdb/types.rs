//! TMDB API response types and request parameters.
//!
//! Every response field is optional. A field that is missing, `null` or of
//! an unexpected JSON type is read as `None` instead of failing the whole
//! document, so downstream shaping can substitute its own fallbacks.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Reads a field as `Some(T)` when it decodes, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Reads an array field element by element.
///
/// An element that does not decode becomes `T::default()`, so one bad
/// entry does not drop its siblings. A non-array value reads as `None`.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let serde_json::Value::Array(items) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
    ))
}

// --- Movie lists ---

/// One page of a movie list (`search/movie`, `movie/popular`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieList {
    /// Current page number.
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<u32>,
    /// Movies on this page, in the order the API ranked them.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub results: Option<Vec<TmdbMovieSummary>>,
    /// Total number of pages.
    #[serde(default, deserialize_with = "lenient")]
    pub total_pages: Option<u32>,
    /// Total number of results across all pages.
    #[serde(default, deserialize_with = "lenient")]
    pub total_results: Option<u64>,
}

impl TmdbMovieList {
    /// Movies on this page, or an empty slice when the API sent none.
    #[must_use]
    pub fn movies(&self) -> &[TmdbMovieSummary] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// A single movie entry of a list or search result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    /// Localized title.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Poster image path, relative to the image base URL.
    #[serde(default, deserialize_with = "lenient")]
    pub poster_path: Option<String>,
    /// Overview text.
    #[serde(default, deserialize_with = "lenient")]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default, deserialize_with = "lenient")]
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default, deserialize_with = "lenient")]
    pub vote_average: Option<f64>,
}

// --- Movie details ---

/// Response from `movie/{movie_id}?append_to_response=credits`.
///
/// A failed lookup comes back with `success: false` and a status message
/// instead of movie fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieDetail {
    /// Fields shared with list entries.
    #[serde(flatten)]
    pub summary: TmdbMovieSummary,
    /// Genres.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub genres: Option<Vec<TmdbGenre>>,
    /// Runtime in minutes.
    #[serde(default, deserialize_with = "lenient")]
    pub runtime: Option<u32>,
    /// Budget in US dollars.
    #[serde(default, deserialize_with = "lenient")]
    pub budget: Option<i64>,
    /// Revenue in US dollars.
    #[serde(default, deserialize_with = "lenient")]
    pub revenue: Option<i64>,
    /// Vote count.
    #[serde(default, deserialize_with = "lenient")]
    pub vote_count: Option<u64>,
    /// Cast and crew, present when `credits` is appended.
    #[serde(default, deserialize_with = "lenient")]
    pub credits: Option<TmdbCredits>,
    /// Explicit failure flag.
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    /// Failure message accompanying `success: false`.
    #[serde(default, deserialize_with = "lenient")]
    pub status_message: Option<String>,
}

/// Credits block of a movie detail document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    /// Crew members in API order.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub crew: Option<Vec<TmdbCrewMember>>,
}

/// A single crew member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCrewMember {
    /// Person name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Job title (e.g. "Director", "Screenplay").
    #[serde(default, deserialize_with = "lenient")]
    pub job: Option<String>,
}

// --- Genres ---

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbGenreList {
    /// Genre catalog.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub genres: Option<Vec<TmdbGenre>>,
}

/// Genre entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u32>,
    /// Genre name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Request Parameters ---

/// Fixed movie list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieListKind {
    /// `movie/popular`, the trending list.
    Popular,
    /// `movie/top_rated`.
    TopRated,
    /// `movie/upcoming`.
    Upcoming,
}

impl MovieListKind {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Popular => "movie/popular",
            Self::TopRated => "movie/top_rated",
            Self::Upcoming => "movie/upcoming",
        }
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required, partial titles match).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}
