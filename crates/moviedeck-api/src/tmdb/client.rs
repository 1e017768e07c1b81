//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::types::{
    MovieListKind, SearchMovieParams, TmdbErrorResponse, TmdbGenreList, TmdbMovieDetail,
    TmdbMovieList,
};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Authenticates with a v3 API key sent as the `api_key` query parameter.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key.
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (config or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with the API key and query params.
    ///
    /// Returns the status and raw body; transport failures are errors.
    #[instrument(skip_all)]
    async fn get_raw(&self, path: &str, query: &[(&str, String)]) -> Result<(StatusCode, String)> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(path, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        Ok((status, body))
    }

    /// Sends a GET request and decodes a successful JSON response.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let (status, body) = self.get_raw(path, query).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode(path, &body)
    }
}

/// Builds an error from a non-success response, preferring the API's own message.
fn api_error(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(body) {
        return anyhow::anyhow!(
            "TMDB API error (HTTP {}): code={}, message={}",
            status,
            error_response.status_code,
            error_response.status_message,
        );
    }
    anyhow::anyhow!("TMDB API error (HTTP {status}): {body}")
}

/// Decodes a JSON response body.
fn decode<T: serde::de::DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    let raw_result: std::result::Result<T, _> = serde_json::from_str(body);
    raw_result.with_context(|| format!("failed to decode JSON response: {path}"))
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieList> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn movie_list(&self, kind: MovieListKind, language: &str) -> Result<TmdbMovieList> {
        let query = [
            ("language", String::from(language)),
            ("page", String::from("1")),
        ];
        self.get_json(kind.path(), &query).await
    }

    #[instrument(skip_all)]
    async fn movie_genres(&self, language: &str) -> Result<TmdbGenreList> {
        let query = [("language", String::from(language))];
        self.get_json("genre/movie/list", &query).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetail> {
        let path = format!("movie/{movie_id}");
        let query = [
            ("language", String::from(language)),
            ("append_to_response", String::from("credits")),
        ];
        let (status, body) = self.get_raw(&path, &query).await?;

        // 404 bodies carry `success: false`; hand them to the caller as a document.
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(movie_id, "TMDB movie not found");
            return decode(&path, &body);
        }
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode(&path, &body)
    }
}
