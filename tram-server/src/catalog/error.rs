//! Catalog error types.

use super::{InvalidCode, LineCode};

/// Errors from loading the line catalog or building a trip selection.
///
/// Load errors are fatal at startup. `InvertedTrip` is returned per request.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog document is not valid JSON or has the wrong shape
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop or line code failed validation
    #[error(transparent)]
    InvalidCode(#[from] InvalidCode),

    /// A line has no stops
    #[error("line {line} (direction {direction}) has no stops")]
    EmptyLine { line: LineCode, direction: String },

    /// Stop indices are not exactly 0..n after sorting
    #[error("line {line} (direction {direction}): expected stop index {expected}, found {found}")]
    IndexGap {
        line: LineCode,
        direction: String,
        expected: usize,
        found: usize,
    },

    /// The same (line, direction) pair appears twice
    #[error("line {line} (direction {direction}) is listed more than once")]
    DuplicateLine { line: LineCode, direction: String },

    /// Destination stop lies before the boarding stop
    #[error(
        "line {line}: destination stop index {destination} is before boarding stop index {boarding}"
    )]
    InvertedTrip {
        line: LineCode,
        boarding: usize,
        destination: usize,
    },
}
