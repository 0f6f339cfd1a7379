//! Full time series of the trend cohort.

use crate::error::Result;
use crate::schema::{COUNTRY, SECTOR};
use crate::sector::EnergySector;
use polars::prelude::*;

/// All years of `sector` for the given countries, in input order.
///
/// Sorting by year is left to the renderer. An empty cohort yields an empty
/// frame with the input's columns.
pub fn extract_history(
    filtered: &DataFrame,
    sector: EnergySector,
    cohort: &[String],
) -> Result<DataFrame> {
    if cohort.is_empty() {
        return Ok(filtered.clear());
    }

    let in_cohort = cohort
        .iter()
        .fold(lit(false), |acc, country| {
            acc.or(col(COUNTRY).eq(lit(country.as_str())))
        });

    let history = filtered
        .clone()
        .lazy()
        .filter(col(SECTOR).eq(lit(sector.name())))
        .filter(in_cohort)
        .collect()?;

    Ok(history)
}
