//! Report error types

use thiserror::Error;

/// Result type for report operations
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Errors raised while emitting a report
///
/// Building a report never fails; only serialization can.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
