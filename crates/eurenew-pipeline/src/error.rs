//! Error types for the reporting pipeline.

use eurenew_data::DataError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Every failure the pipeline surfaces to the presentation layer.
///
/// Non-numeric values never show up here: they are dropped during
/// normalization.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset could not be fetched or decoded.
    #[error("Failed to fetch data: {0}")]
    Fetch(#[from] DataError),

    /// The table does not have the expected shape.
    #[error("Unexpected data layout: {0}")]
    Schema(String),

    /// No recognised observation survived normalization and filtering.
    #[error("No data available: {0}")]
    EmptyResult(String),
}

impl PipelineError {
    /// Whether the error came from the data provider rather than the data.
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

impl From<PolarsError> for PipelineError {
    fn from(err: PolarsError) -> Self {
        Self::Schema(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polars_errors_are_schema_errors() {
        let err: PipelineError = PolarsError::ColumnNotFound("Country".into()).into();
        assert!(matches!(err, PipelineError::Schema(_)));
        assert!(err.to_string().contains("Country"));
    }

    #[test]
    fn test_fetch_errors_keep_their_source() {
        let err: PipelineError = DataError::Http("HTTP 500".to_string()).into();
        assert!(err.is_fetch());
        assert_eq!(err.to_string(), "Failed to fetch data: HTTP error: HTTP 500");
    }
}
