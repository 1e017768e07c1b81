//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use moviedeck_api::tmdb::DEFAULT_BASE_URL;
use moviedeck_core::ImageUrls;
use moviedeck_core::images::{DEFAULT_IMAGE_BASE_URL, DEFAULT_PLACEHOLDER, DEFAULT_PLACEHOLDER_LARGE};
use moviedeck_core::{DEFAULT_LIMIT, MAX_LIMIT};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Poster image settings.
    #[serde(default)]
    pub images: ImagesConfig,
    /// Search result settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// TMDB API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key; `TMDB_API_KEY` takes precedence when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Response language.
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::from(DEFAULT_BASE_URL),
            language: String::from("en-US"),
        }
    }
}

/// Poster image configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImagesConfig {
    /// Prefix joined with poster paths.
    pub base_url: String,
    /// Placeholder for search result rows.
    pub placeholder: String,
    /// Placeholder for the detail view.
    pub placeholder_large: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            placeholder: String::from(DEFAULT_PLACEHOLDER),
            placeholder_large: String::from(DEFAULT_PLACEHOLDER_LARGE),
        }
    }
}

impl ImagesConfig {
    /// Converts to the shaper's image settings.
    pub fn to_image_urls(&self) -> ImageUrls {
        ImageUrls {
            base_url: self.base_url.clone(),
            placeholder: self.placeholder.clone(),
            placeholder_large: self.placeholder_large.clone(),
        }
    }
}

/// Search result configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Results shown when `--limit` is missing or invalid.
    pub default_limit: usize,
    /// Upper bound for `--limit`.
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the search limits are inconsistent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Checks `1 <= default_limit <= max_limit`.
    ///
    /// # Errors
    ///
    /// Returns an error describing the offending values.
    pub fn validate(&self) -> Result<()> {
        let SearchConfig {
            default_limit,
            max_limit,
        } = self.search;
        if default_limit == 0 || default_limit > max_limit {
            anyhow::bail!(
                "search.default_limit must be between 1 and search.max_limit \
                 (default_limit={default_limit}, max_limit={max_limit})"
            );
        }
        Ok(())
    }

    /// Resolves the API key: `TMDB_API_KEY` first, then `tmdb.api_key`.
    pub fn api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.tmdb.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }
}
