//! Formatting helpers shared by the shapers and the aggregator.

/// Sentinel for a value that could not be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sentinel for a descriptive field that is missing.
pub const UNKNOWN: &str = "Unknown";

/// Formats an integer with `,` thousands separators (`1234567` -> `1,234,567`).
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a value with exactly one decimal place.
///
/// Halfway values round away from zero (`7.25` -> `7.3`).
#[must_use]
pub fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

/// Formats a vote average, `"N/A"` when absent.
///
/// TMDB reports unrated movies with an average of `0`, so zero is treated
/// as absent as well.
#[must_use]
pub fn rating_text(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v.is_finite() && v != 0.0 => one_decimal(v),
        _ => String::from(NOT_AVAILABLE),
    }
}

/// Returns the text when it is present and non-empty, the fallback otherwise.
#[must_use]
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .map_or_else(|| String::from(fallback), String::from)
}
