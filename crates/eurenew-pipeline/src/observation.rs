//! Typed rows handed to the presentation layer.

use crate::error::{PipelineError, Result};
use crate::schema::{COUNTRY, SECTOR, UNIT, VALUE, YEAR};
use crate::sector::EnergySector;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One normalized, sector-tagged observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Country or region code
    pub country: String,
    /// Observation year
    pub year: i32,
    /// Sector the value belongs to
    pub sector: EnergySector,
    /// Unit of measure, normally `PC` (percent)
    pub unit: Option<String>,
    /// Renewables share
    pub value: f64,
}

/// Read the rows of a sector-filtered long table.
///
/// # Errors
/// Returns [`PipelineError::Schema`] when a column is missing, has the wrong
/// type, holds a null key, or names an unknown sector.
pub fn observations_from_frame(frame: &DataFrame) -> Result<Vec<Observation>> {
    let countries = frame.column(COUNTRY)?.as_materialized_series().str()?;
    let years = frame.column(YEAR)?.as_materialized_series().i32()?;
    let sectors = frame.column(SECTOR)?.as_materialized_series().str()?;
    let units = frame.column(UNIT)?.as_materialized_series().str()?;
    let values = frame.column(VALUE)?.as_materialized_series().f64()?;

    let mut rows = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let (Some(country), Some(year), Some(sector), Some(value)) =
            (countries.get(i), years.get(i), sectors.get(i), values.get(i))
        else {
            return Err(PipelineError::Schema(format!("row {i} has a null key or value")));
        };

        let sector = EnergySector::from_name(sector)
            .ok_or_else(|| PipelineError::Schema(format!("unknown sector {sector:?}")))?;

        rows.push(Observation {
            country: country.to_string(),
            year,
            sector,
            unit: units.get(i).map(str::to_string),
            value,
        });
    }

    Ok(rows)
}
