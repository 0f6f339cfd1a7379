//! Decoding of Eurostat bulk TSV payloads into wide tables.
//!
//! A payload looks like this (tabs shown as `→`):
//!
//! ```text
//! freq,unit,nrg_bal,geo\TIME_PERIOD→2021 →2022
//! A,PC,REN,AT→76.2 →77.8 p
//! A,PC,REN,BA→: →:
//! ```
//!
//! The first header cell lists the dimension names, the remaining header
//! cells are period labels. Values may carry trailing status flags.

use crate::error::{DataError, Result};
use polars::prelude::*;

/// Canonical name of the country-identifying column.
pub const COUNTRY_COLUMN: &str = "Country";

/// Eurostat's marker for an unavailable observation.
pub const MISSING_MARKER: &str = ":";

/// Separator between the last dimension name and the time axis label.
const TIME_AXIS_SEPARATOR: char = '\\';

/// Parse a TSV payload into a wide `DataFrame` of string columns.
///
/// Dimension columns come first in header order, followed by one column per
/// period. Any dimension whose name contains `geo` is renamed to
/// [`COUNTRY_COLUMN`]. Cells keep only their numeric text; flags are dropped
/// and blank cells become [`MISSING_MARKER`].
///
/// # Errors
/// Returns [`DataError::Parse`] for an empty payload, a header without
/// period columns, or a row whose shape does not match the header.
pub fn parse_tsv(payload: &str) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(payload.as_bytes());

    let mut records = reader.records();
    let header = records
        .next()
        .ok_or_else(|| DataError::Parse("empty TSV payload".to_string()))??;

    let mut header_cells = header.iter();
    let dimensions = header_cells
        .next()
        .map(parse_dimensions)
        .ok_or_else(|| DataError::Parse("missing dimension header".to_string()))?;
    let periods: Vec<String> = header_cells.map(|cell| cell.trim().to_string()).collect();

    if periods.is_empty() {
        return Err(DataError::Parse(
            "header contains no period columns".to_string(),
        ));
    }

    let mut dimension_values: Vec<Vec<String>> = vec![Vec::new(); dimensions.len()];
    let mut period_values: Vec<Vec<String>> = vec![Vec::new(); periods.len()];

    for (index, record) in records.enumerate() {
        let record = record?;
        let line = index + 2;

        if record.len() != periods.len() + 1 {
            return Err(DataError::Parse(format!(
                "line {line}: expected {} cells, found {}",
                periods.len() + 1,
                record.len()
            )));
        }

        let keys: Vec<&str> = record[0].split(',').map(str::trim).collect();
        if keys.len() != dimensions.len() {
            return Err(DataError::Parse(format!(
                "line {line}: expected {} dimension values, found {}",
                dimensions.len(),
                keys.len()
            )));
        }

        for (values, key) in dimension_values.iter_mut().zip(keys) {
            values.push(key.to_string());
        }
        for (values, cell) in period_values.iter_mut().zip(record.iter().skip(1)) {
            values.push(clean_cell(cell));
        }
    }

    let columns: Vec<Column> = dimensions
        .iter()
        .zip(dimension_values)
        .chain(periods.iter().zip(period_values))
        .map(|(name, values)| Column::new(name.as_str().into(), values))
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Split `freq,unit,nrg_bal,geo\TIME_PERIOD` into dimension column names.
fn parse_dimensions(cell: &str) -> Vec<String> {
    let names = cell
        .split_once(TIME_AXIS_SEPARATOR)
        .map_or(cell, |(names, _)| names);

    names
        .split(',')
        .map(str::trim)
        .map(|name| {
            if name.to_lowercase().contains("geo") {
                COUNTRY_COLUMN.to_string()
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// Reduce a raw cell such as `"17.9 b"` to `"17.9"`.
fn clean_cell(cell: &str) -> String {
    cell.split_whitespace()
        .next()
        .unwrap_or(MISSING_MARKER)
        .to_string()
}
