//! Fetch-and-shape operations behind each user action.
//!
//! Each function fetches what one action needs from the data source and
//! hands the documents to the pure shapers. A transport failure or a
//! not-found document aborts the action; nothing is partially returned.
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result};
use moviedeck_api::tmdb::{LocalTmdbApi, MovieListKind, SearchMovieParams};
use serde::Serialize;
use tracing::instrument;

use crate::detail::{DisplayMovieDetail, shape_detail};
use crate::images::ImageUrls;
use crate::search::{DisplayMovieRow, shape_search_results};
use crate::stats::{StatisticsSummary, aggregate};

/// Label used when no query was given and popular movies are listed instead.
pub const POPULAR_LABEL: &str = "popular movies";

/// Shaped search results with the label they were fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// The trimmed query, or [`POPULAR_LABEL`].
    pub label: String,
    /// Display rows in relevance order.
    pub rows: Vec<DisplayMovieRow>,
}

/// Searches movies by title, or lists popular movies for a blank query.
///
/// Only the first result page is consumed.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
pub async fn search<A: LocalTmdbApi>(
    api: &A,
    query: &str,
    limit: usize,
    language: &str,
    images: &ImageUrls,
) -> Result<SearchOutcome> {
    let query = query.trim();
    let (label, list) = if query.is_empty() {
        let list = api
            .movie_list(MovieListKind::Popular, language)
            .await
            .context("TMDB movie/popular request failed")?;
        (String::from(POPULAR_LABEL), list)
    } else {
        let params = SearchMovieParams::new(query).language(language);
        let list = api
            .search_movie(&params)
            .await
            .context("TMDB search/movie request failed")?;
        (String::from(query), list)
    };

    tracing::debug!(
        label = %label,
        fetched = list.movies().len(),
        limit,
        "search results fetched"
    );
    Ok(SearchOutcome {
        label,
        rows: shape_search_results(list.movies(), limit, images),
    })
}

/// Loads one movie's detail card.
///
/// # Errors
///
/// Returns an error if the request fails or the movie does not exist.
#[instrument(skip_all, fields(movie_id = movie_id))]
pub async fn movie_detail<A: LocalTmdbApi>(
    api: &A,
    movie_id: u64,
    language: &str,
    images: &ImageUrls,
) -> Result<DisplayMovieDetail> {
    let raw = api
        .movie_details(movie_id, language)
        .await
        .with_context(|| format!("TMDB movie/{movie_id} request failed"))?;
    let detail = shape_detail(&raw, images)?;
    Ok(detail)
}

/// Fetches the four statistics datasets concurrently and aggregates them.
///
/// All four requests must succeed; if any fails the others are discarded
/// and no statistics are produced.
///
/// # Errors
///
/// Returns an error if any of the four requests fails.
#[instrument(skip_all)]
pub async fn statistics<A: LocalTmdbApi>(api: &A, language: &str) -> Result<StatisticsSummary> {
    let (popular, top_rated, upcoming, genres) = futures::try_join!(
        api.movie_list(MovieListKind::Popular, language),
        api.movie_list(MovieListKind::TopRated, language),
        api.movie_list(MovieListKind::Upcoming, language),
        api.movie_genres(language),
    )
    .context("failed to fetch statistics data")?;

    Ok(aggregate(&popular, &top_rated, &upcoming, &genres))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;

    use anyhow::bail;
    use moviedeck_api::tmdb::{TmdbGenreList, TmdbMovieDetail, TmdbMovieList};

    use super::*;
    use crate::error::ShapeError;

    /// In-memory data source backed by the JSON fixtures.
    #[derive(Debug, Default)]
    struct MockApi {
        /// Endpoint that fails with a transport error.
        failing: Option<&'static str>,
        /// Endpoints called, in call order.
        calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        fn failing(endpoint: &'static str) -> Self {
            Self {
                failing: Some(endpoint),
                ..Self::default()
            }
        }

        fn record(&self, endpoint: &str) -> Result<()> {
            self.calls.lock().unwrap().push(String::from(endpoint));
            if self.failing == Some(endpoint) {
                bail!("connection refused: {endpoint}");
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    impl LocalTmdbApi for MockApi {
        async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieList> {
            self.record("search/movie")?;
            if params.query == "zzzz-no-match" {
                return Ok(parse(include_str!(
                    "../../../fixtures/tmdb/search_movie_empty.json"
                )));
            }
            Ok(parse(include_str!(
                "../../../fixtures/tmdb/search_movie_inception.json"
            )))
        }

        async fn movie_list(&self, kind: MovieListKind, _language: &str) -> Result<TmdbMovieList> {
            self.record(kind.path())?;
            Ok(match kind {
                MovieListKind::Popular => {
                    parse(include_str!("../../../fixtures/tmdb/movie_popular.json"))
                }
                MovieListKind::TopRated => {
                    parse(include_str!("../../../fixtures/tmdb/movie_top_rated.json"))
                }
                MovieListKind::Upcoming => {
                    parse(include_str!("../../../fixtures/tmdb/movie_upcoming.json"))
                }
            })
        }

        async fn movie_genres(&self, _language: &str) -> Result<TmdbGenreList> {
            self.record("genre/movie/list")?;
            Ok(parse(include_str!(
                "../../../fixtures/tmdb/genre_movie_list.json"
            )))
        }

        async fn movie_details(&self, movie_id: u64, _language: &str) -> Result<TmdbMovieDetail> {
            self.record("movie")?;
            if movie_id == 27_205 {
                return Ok(parse(include_str!(
                    "../../../fixtures/tmdb/movie_details_27205.json"
                )));
            }
            Ok(parse(include_str!(
                "../../../fixtures/tmdb/movie_details_not_found.json"
            )))
        }
    }

    #[tokio::test]
    async fn test_search_with_query() {
        // Arrange
        let api = MockApi::default();

        // Act
        let outcome = search(&api, "  Inception ", 2, "en-US", &ImageUrls::default())
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome.label, "Inception");
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].title, "Inception");
        assert_eq!(api.calls(), vec!["search/movie"]);
    }

    #[tokio::test]
    async fn test_search_blank_query_lists_popular() {
        // Arrange
        let api = MockApi::default();

        // Act
        let outcome = search(&api, "   ", 20, "en-US", &ImageUrls::default())
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome.label, POPULAR_LABEL);
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(api.calls(), vec!["movie/popular"]);
    }

    #[tokio::test]
    async fn test_search_no_results_is_not_an_error() {
        // Arrange
        let api = MockApi::default();

        // Act
        let outcome = search(&api, "zzzz-no-match", 20, "en-US", &ImageUrls::default())
            .await
            .unwrap();

        // Assert
        assert!(outcome.rows.is_empty());
    }

    #[tokio::test]
    async fn test_search_transport_failure() {
        // Arrange
        let api = MockApi::failing("search/movie");

        // Act
        let result = search(&api, "Inception", 20, "en-US", &ImageUrls::default()).await;

        // Assert
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_movie_detail_found() {
        // Arrange
        let api = MockApi::default();

        // Act
        let detail = movie_detail(&api, 27_205, "en-US", &ImageUrls::default())
            .await
            .unwrap();

        // Assert
        assert_eq!(detail.director_name, "Christopher Nolan");
    }

    #[tokio::test]
    async fn test_movie_detail_not_found() {
        // Arrange
        let api = MockApi::default();

        // Act
        let err = movie_detail(&api, 1, "en-US", &ImageUrls::default())
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(
            err.downcast_ref::<ShapeError>(),
            Some(ShapeError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_statistics_joins_all_four() {
        // Arrange
        let api = MockApi::default();

        // Act
        let stats = statistics(&api, "en-US").await.unwrap();

        // Assert
        assert_eq!(stats.avg_popular_rating, "6.0");
        assert_eq!(stats.avg_top_rated_rating, "8.7");
        assert_eq!(stats.total_upcoming_count, "1,234");
        assert_eq!(stats.total_genre_count, "19");
        assert_eq!(stats.most_popular_release_year, "2020");
        let mut calls = api.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "genre/movie/list",
                "movie/popular",
                "movie/top_rated",
                "movie/upcoming"
            ]
        );
    }

    #[tokio::test]
    async fn test_statistics_any_failure_aborts() {
        for endpoint in [
            "movie/popular",
            "movie/top_rated",
            "movie/upcoming",
            "genre/movie/list",
        ] {
            // Arrange
            let api = MockApi::failing(endpoint);

            // Act
            let result = statistics(&api, "en-US").await;

            // Assert
            let err = result.unwrap_err();
            assert!(err.to_string().contains("failed to fetch statistics data"));
            assert!(format!("{err:#}").contains(endpoint));
        }
    }
}
