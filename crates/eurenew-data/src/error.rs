//! Error types for data operations.

use std::sync::Arc;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching or decoding a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error (non-success status from the provider)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Payload parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Delimited-text reader error
    #[error("TSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Invalid dataset code
    #[error("Invalid dataset code: {0:?}")]
    InvalidDataset(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A failure reported to several callers waiting on the same fetch
    #[error(transparent)]
    Shared(Arc<DataError>),
}

impl DataError {
    /// Take back ownership of an error handed out by the dataset cache.
    ///
    /// Falls back to [`DataError::Shared`] while other callers still hold it.
    pub fn from_shared(err: Arc<Self>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(Self::Shared)
    }
}
