//! Wide-to-long reshaping of the raw dataset.

use crate::error::Result;
use crate::schema::{COUNTRY, SECTOR_CODE, UNIT, VALUE, WideSchema, YEAR};
use polars::prelude::*;
use tracing::debug;

/// Unpivot a wide table into one row per (country, sector code, year).
///
/// Uses the default [`WideSchema`]. See [`normalize_with`].
pub fn normalize(wide: &DataFrame) -> Result<DataFrame> {
    normalize_with(wide, &WideSchema::default())
}

/// Unpivot a wide table against an explicit schema.
///
/// The output has the columns `Country`, `unit`, `nrg_bal`, `Year` (i32) and
/// `Value` (f64). Rows are emitted year column by year column in header
/// order, and within a year in input row order. Cells are cast leniently to
/// `f64`; anything that is not a finite number is dropped, as are rows with
/// a null country or sector code, so `Value` never holds a null.
///
/// # Errors
/// Returns [`PipelineError::Schema`](crate::PipelineError::Schema) when the
/// table does not match the schema.
pub fn normalize_with(wide: &DataFrame, schema: &WideSchema) -> Result<DataFrame> {
    let years = schema.year_columns(wide)?;
    let index = [COUNTRY, UNIT, SECTOR_CODE];
    let labels: Vec<String> = years.iter().map(|(_, year)| year.to_string()).collect();

    let as_text: Vec<Expr> = index
        .iter()
        .map(|name| col(*name).cast(DataType::String))
        .chain(years.iter().zip(&labels).map(|((header, _), label)| {
            col(header.as_str())
                .cast(DataType::String)
                .alias(label.as_str())
        }))
        .collect();
    let text = wide.clone().lazy().select(as_text).collect()?;

    let long = text
        .unpivot(labels.iter().map(String::as_str), index)?
        .lazy()
        .select([
            col(COUNTRY),
            col(UNIT),
            col(SECTOR_CODE),
            col("variable").cast(DataType::Int32).alias(YEAR),
            col("value").cast(DataType::Float64).alias(VALUE),
        ])
        .filter(
            col(COUNTRY)
                .is_not_null()
                .and(col(SECTOR_CODE).is_not_null())
                .and(col(VALUE).is_finite()),
        )
        .collect()?;

    debug!(
        wide_rows = wide.height(),
        year_columns = years.len(),
        long_rows = long.height(),
        "normalized wide table"
    );

    Ok(long)
}
