//! Shaping and aggregation core for moviedeck.
//!
//! Turns raw TMDB documents into display-ready records and summary
//! statistics. Everything except [`service`] is a pure function over
//! already-fetched data.

/// Detail shaping.
pub mod detail;
/// Shaping errors.
pub mod error;
/// Number and rating formatting.
pub mod format;
/// Poster URL resolution.
pub mod images;
/// Result count limiting.
pub mod limit;
/// Search result shaping.
pub mod search;
/// Data source orchestration.
pub mod service;
/// Statistics aggregation.
pub mod stats;

pub use detail::{DisplayMovieDetail, shape_detail};
pub use error::ShapeError;
pub use images::{ImageUrls, PosterSize};
pub use limit::{DEFAULT_LIMIT, MAX_LIMIT, parse_limit, resolve_limit};
pub use search::{DisplayMovieRow, OVERVIEW_TRUNCATE_LENGTH, shape_search_results};
pub use service::SearchOutcome;
pub use stats::{StatisticsSummary, aggregate};
