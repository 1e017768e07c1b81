//! Text rendering of shaped records.
//!
//! The outcome of one user action is captured as a [`View`] value and
//! turned into output lines by [`render`]; nothing here fetches or shapes.

use std::io::Write;

use anyhow::{Context, Result};
use moviedeck_core::{DisplayMovieDetail, SearchOutcome, StatisticsSummary};
use serde::Serialize;

/// User action whose failure is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Movie search or popular listing.
    Search,
    /// Single movie detail view.
    Detail,
    /// Statistics overview.
    Statistics,
}

impl Action {
    /// User-facing message shown when the action fails.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Search => {
                "Error searching movies. Please check your internet connection and try again."
            }
            Self::Detail => "Error loading movie details. Please try again.",
            Self::Statistics => {
                "Error loading statistics. Please check your internet connection and try again."
            }
        }
    }
}

/// What to show after one user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Search results table.
    SearchResults(SearchOutcome),
    /// The search returned nothing.
    NoResults,
    /// Movie detail card.
    Detail(DisplayMovieDetail),
    /// Statistic cards.
    Statistics(StatisticsSummary),
    /// The action failed as a whole.
    Failed {
        /// Failed action.
        action: Action,
        /// User-facing message.
        message: String,
    },
}

impl View {
    /// Failure view for `action`.
    pub fn failed(action: Action) -> Self {
        Self::Failed {
            action,
            message: String::from(action.failure_message()),
        }
    }

    /// Whether the action failed.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

const NO_RESULTS_MESSAGE: &str = "No movies found. Please try a different search term.";

/// Renders a view as text lines.
pub fn render(view: &View) -> Vec<String> {
    match view {
        View::SearchResults(outcome) => render_search(outcome),
        View::NoResults => vec![String::from(NO_RESULTS_MESSAGE)],
        View::Detail(detail) => render_detail(detail),
        View::Statistics(stats) => render_statistics(stats),
        View::Failed { message, .. } => vec![message.clone()],
    }
}

/// Renders a view as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(view: &View) -> Result<String> {
    serde_json::to_string_pretty(view).context("failed to serialize view to JSON")
}

fn render_search(outcome: &SearchOutcome) -> Vec<String> {
    let mut lines = Vec::with_capacity(outcome.rows.len().saturating_add(2));
    lines.push(format!(
        "Search Results for \"{}\" ({} movies)",
        outcome.label,
        outcome.rows.len()
    ));
    lines.push(String::from(
        "ID\tTitle\tRelease Date\tRating\tOverview\tPoster",
    ));
    for row in &outcome.rows {
        lines.push(format!(
            "{}\t{}\t{}\t⭐ {}/10\t{}\t{}",
            row.id.map_or_else(|| String::from("-"), |id| id.to_string()),
            row.title,
            row.release_date_text,
            row.rating_text,
            row.overview_text,
            row.poster_url,
        ));
    }
    lines
}

fn render_detail(detail: &DisplayMovieDetail) -> Vec<String> {
    vec![
        String::from("Movie Details"),
        detail.title.clone(),
        format!("Poster: {}", detail.poster_url),
        format!("Release Date: {}", detail.release_date_text),
        format!(
            "Rating: ⭐ {}/10 ({} votes)",
            detail.rating_text, detail.vote_count_text
        ),
        format!("Runtime: {}", detail.runtime_text),
        format!("Genres: {}", detail.genres_text),
        format!("Director: {}", detail.director_name),
        format!("Budget: {}", detail.budget_text),
        format!("Revenue: {}", detail.revenue_text),
        String::from("Overview:"),
        detail.overview_text.clone(),
    ]
}

fn render_statistics(stats: &StatisticsSummary) -> Vec<String> {
    vec![
        format!(
            "Average Rating of Popular Movies: {}",
            stats.avg_popular_rating
        ),
        format!(
            "Average Rating of Top Rated Movies: {}",
            stats.avg_top_rated_rating
        ),
        format!("Total Upcoming Movies: {}", stats.total_upcoming_count),
        format!("Total Movie Genres Available: {}", stats.total_genre_count),
        format!(
            "Most Popular Release Year (from current trending): {}",
            stats.most_popular_release_year
        ),
    ]
}

/// Writes the JSON document of a view followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<W: Write>(view: &View, mut out: W) -> Result<()> {
    writeln!(out, "{}", render_json(view)?).context("failed to write JSON view")?;
    out.flush().context("failed to flush JSON view")
}

/// Emits a view.
///
/// Text lines go through the log; JSON goes to stdout untouched so it stays
/// machine-readable.
///
/// # Errors
///
/// Returns an error if JSON output is requested and cannot be written.
pub fn emit(view: &View, json: bool) -> Result<()> {
    if json {
        return write_json(view, std::io::stdout().lock());
    }
    for line in render(view) {
        tracing::info!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use moviedeck_core::DisplayMovieRow;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn sample_outcome() -> SearchOutcome {
        SearchOutcome {
            label: String::from("Inception"),
            rows: vec![DisplayMovieRow {
                id: Some(27_205),
                poster_url: String::from("https://image.tmdb.org/t/p/w500/p.jpg"),
                title: String::from("Inception"),
                release_date_text: String::from("2010-07-15"),
                rating_text: String::from("8.4"),
                overview_text: String::from("Cobb, a skilled thief..."),
            }],
        }
    }

    fn sample_stats() -> StatisticsSummary {
        StatisticsSummary {
            avg_popular_rating: String::from("6.0"),
            avg_top_rated_rating: String::from("8.7"),
            total_upcoming_count: String::from("1,234"),
            total_genre_count: String::from("19"),
            most_popular_release_year: String::from("2020"),
        }
    }

    #[test]
    fn test_render_search_results() {
        // Arrange
        let view = View::SearchResults(sample_outcome());

        // Act
        let lines = render(&view);

        // Assert
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Search Results for \"Inception\" (1 movies)");
        assert_eq!(
            lines[2],
            "27205\tInception\t2010-07-15\t⭐ 8.4/10\tCobb, a skilled thief...\thttps://image.tmdb.org/t/p/w500/p.jpg"
        );
    }

    #[test]
    fn test_render_statistics() {
        // Arrange
        let view = View::Statistics(sample_stats());

        // Act
        let lines = render(&view);

        // Assert
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Average Rating of Popular Movies: 6.0");
        assert_eq!(lines[2], "Total Upcoming Movies: 1,234");
        assert_eq!(
            lines[4],
            "Most Popular Release Year (from current trending): 2020"
        );
    }

    #[test]
    fn test_render_failure_is_a_single_line() {
        // Arrange
        let view = View::failed(Action::Statistics);

        // Act
        let lines = render(&view);

        // Assert
        assert!(view.is_failure());
        assert_eq!(
            lines,
            vec![String::from(
                "Error loading statistics. Please check your internet connection and try again."
            )]
        );
    }

    #[test]
    fn test_render_json_is_tagged() {
        // Arrange
        let view = View::Statistics(sample_stats());

        // Act
        let json = render_json(&view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(value["view"], "statistics");
        assert_eq!(value["avg_top_rated_rating"], "8.7");
    }

    #[test]
    fn test_write_json_is_a_bare_document() {
        // Arrange
        let view = View::failed(Action::Statistics);
        let mut out = Vec::new();

        // Act
        write_json(&view, &mut out).unwrap();

        // Assert
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["view"], "failed");
        assert_eq!(value["action"], "statistics");
    }

    #[test]
    fn test_emit_json_logs_nothing() {
        let (subscriber, handle) = subscriber::mock().only().run_with_handle();

        with_default(subscriber, || {
            emit(&View::NoResults, true).unwrap();
        });

        handle.assert_finished();
    }

    #[test]
    fn test_emit_no_results() {
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg(
                "No movies found. Please try a different search term.",
            )))
            .only()
            .run_with_handle();

        with_default(subscriber, || {
            emit(&View::NoResults, false).unwrap();
        });

        handle.assert_finished();
    }

    #[test]
    fn test_emit_failure() {
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(tracing::Level::INFO)
                    .with_fields(expect::msg("Error loading movie details. Please try again.")),
            )
            .only()
            .run_with_handle();

        with_default(subscriber, || {
            emit(&View::failed(Action::Detail), false).unwrap();
        });

        handle.assert_finished();
    }
}
