//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and retrieves search results, movie lists, genres and details.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    MovieListKind, SearchMovieParams, TmdbCredits, TmdbCrewMember, TmdbGenre, TmdbGenreList,
    TmdbMovieDetail, TmdbMovieList, TmdbMovieSummary,
};
