//! Errors raised while shaping data source documents.

/// Shaping failure.
///
/// Missing or malformed fields never produce one of these; only an
/// explicit failure reported by the data source does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The data source reported that the requested movie does not exist.
    #[error("movie not found: {message}")]
    NotFound {
        /// Status message reported by the data source.
        message: String,
    },
}
