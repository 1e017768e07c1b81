//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    MovieListKind, SearchMovieParams, TmdbGenreList, TmdbMovieDetail, TmdbMovieList,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for movies by title (first page only).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieList>;

    /// Fetches the first page of a fixed movie list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_list(&self, kind: MovieListKind, language: &str) -> Result<TmdbMovieList>;

    /// Fetches the movie genre catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_genres(&self, language: &str) -> Result<TmdbGenreList>;

    /// Fetches movie details with credits appended.
    ///
    /// An unknown ID is not an error here: the returned document carries
    /// `success: false` and the API's status message.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetail>;
}
