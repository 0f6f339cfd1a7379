//! CSV and JSON export of leaderboards and sector tables.
//!
//! Exports go to any [`Write`] sink; the command line passes stdout.

use crate::leaderboard::LeaderboardTable;
use eurenew_pipeline::Observation;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a writer in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn export_to_writer(&self, writer: &mut dyn Write, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Flattened leaderboard row for CSV export.
#[derive(Debug, Serialize)]
struct LeaderboardRecord<'a> {
    rank: usize,
    country: &'a str,
    sector: &'a str,
    year: i32,
    value: f64,
}

impl LeaderboardTable {
    fn records(&self) -> impl Iterator<Item = LeaderboardRecord<'_>> {
        self.rows.iter().map(|row| LeaderboardRecord {
            rank: row.rank,
            country: &row.country,
            sector: self.sector.name(),
            year: row.year,
            value: row.value,
        })
    }
}

impl Exporter for LeaderboardTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self.records()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<Observation> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self.iter()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

fn to_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
