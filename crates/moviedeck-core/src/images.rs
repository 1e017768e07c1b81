//! Poster image URLs.

/// Default TMDB image base (w500 rendition).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Placeholder for list thumbnails.
pub const DEFAULT_PLACEHOLDER: &str =
    "https://via.placeholder.com/60x90/cccccc/666666?text=No+Image";

/// Placeholder for the detail view poster.
pub const DEFAULT_PLACEHOLDER_LARGE: &str =
    "https://via.placeholder.com/300x450/cccccc/666666?text=No+Image";

/// Where a poster is shown, which decides the placeholder used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    /// Search result row.
    Thumbnail,
    /// Detail view.
    Large,
}

/// Image base URL and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    /// Prefix joined with a movie's `poster_path`.
    pub base_url: String,
    /// Thumbnail placeholder.
    pub placeholder: String,
    /// Detail view placeholder.
    pub placeholder_large: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            placeholder: String::from(DEFAULT_PLACEHOLDER),
            placeholder_large: String::from(DEFAULT_PLACEHOLDER_LARGE),
        }
    }
}

impl ImageUrls {
    /// Resolves a poster path, falling back to the placeholder for `size`.
    #[must_use]
    pub fn poster_url(&self, poster_path: Option<&str>, size: PosterSize) -> String {
        match poster_path.filter(|p| !p.is_empty()) {
            Some(path) => format!("{}{path}", self.base_url),
            None => match size {
                PosterSize::Thumbnail => self.placeholder.clone(),
                PosterSize::Large => self.placeholder_large.clone(),
            },
        }
    }
}
