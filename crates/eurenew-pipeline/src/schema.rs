//! Column layout of the wide and long renewables tables.

use crate::error::{PipelineError, Result};
use polars::prelude::*;

/// Country code column (the renamed `geo` dimension).
pub const COUNTRY: &str = eurenew_data::eurostat::COUNTRY_COLUMN;
/// Frequency dimension; optional and dropped during normalization.
pub const FREQ: &str = "freq";
/// Unit of measure dimension.
pub const UNIT: &str = "unit";
/// Energy balance dimension holding the sector code.
pub const SECTOR_CODE: &str = "nrg_bal";
/// Observation year in the long table.
pub const YEAR: &str = "Year";
/// Observation value in the long table.
pub const VALUE: &str = "Value";
/// Sector display name attached by the sector filter.
pub const SECTOR: &str = "Sector";

/// Declared layout of the wide table.
///
/// Columns listed in `id_columns` are row keys. Every other column must be
/// a year label; anything else is rejected instead of silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideSchema {
    /// Known key columns, required or not
    pub id_columns: Vec<String>,
    /// Key columns that must be present
    pub required: Vec<String>,
}

impl Default for WideSchema {
    fn default() -> Self {
        Self {
            id_columns: [FREQ, UNIT, SECTOR_CODE, COUNTRY]
                .map(String::from)
                .to_vec(),
            required: [UNIT, SECTOR_CODE, COUNTRY].map(String::from).to_vec(),
        }
    }
}

impl WideSchema {
    /// Whether `name` is a declared key column.
    pub fn is_id_column(&self, name: &str) -> bool {
        self.id_columns.iter().any(|c| c == name)
    }

    /// Check a wide table against the schema and return its year columns.
    ///
    /// Year columns are returned in header order together with their parsed
    /// year.
    ///
    /// # Errors
    /// Returns [`PipelineError::Schema`] when a required column is missing,
    /// when a non-key header is not an integer year, or when the table has
    /// no year column at all.
    pub fn year_columns(&self, wide: &DataFrame) -> Result<Vec<(String, i32)>> {
        let names: Vec<&str> = wide.get_column_names().iter().map(|n| n.as_str()).collect();

        let missing: Vec<&str> = self
            .required
            .iter()
            .map(String::as_str)
            .filter(|r| !names.contains(r))
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::Schema(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut years = Vec::new();
        for name in names.into_iter().filter(|n| !self.is_id_column(n)) {
            let year = name.trim().parse::<i32>().map_err(|_| {
                PipelineError::Schema(format!("column {name:?} is neither a key nor a year"))
            })?;
            years.push((name.to_string(), year));
        }

        if years.is_empty() {
            return Err(PipelineError::Schema("table has no year columns".to_string()));
        }

        Ok(years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(names: &[&str]) -> DataFrame {
        let columns: Vec<Column> = names
            .iter()
            .map(|n| Column::new((*n).into(), vec!["x"]))
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_year_columns_in_header_order() {
        let wide = frame(&["freq", "unit", "nrg_bal", "Country", "2020", "2019"]);
        let years = WideSchema::default().year_columns(&wide).unwrap();

        assert_eq!(
            years,
            vec![("2020".to_string(), 2020), ("2019".to_string(), 2019)]
        );
    }

    #[test]
    fn test_freq_is_optional() {
        let wide = frame(&["Country", "unit", "nrg_bal", "2021"]);
        assert!(WideSchema::default().year_columns(&wide).is_ok());
    }

    #[test]
    fn test_missing_required_column() {
        let wide = frame(&["Country", "unit", "2021"]);
        let err = WideSchema::default().year_columns(&wide).unwrap_err();

        assert!(matches!(err, PipelineError::Schema(_)));
        assert!(err.to_string().contains("nrg_bal"));
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let wide = frame(&["Country", "unit", "nrg_bal", "2021", "siec"]);
        let err = WideSchema::default().year_columns(&wide).unwrap_err();
        assert!(err.to_string().contains("siec"));
    }

    #[test]
    fn test_non_integer_year_is_rejected() {
        let wide = frame(&["Country", "unit", "nrg_bal", "2021Q1"]);
        assert!(matches!(
            WideSchema::default().year_columns(&wide),
            Err(PipelineError::Schema(_))
        ));
    }

    #[test]
    fn test_no_year_columns() {
        let wide = frame(&["Country", "unit", "nrg_bal"]);
        assert!(matches!(
            WideSchema::default().year_columns(&wide),
            Err(PipelineError::Schema(_))
        ));
    }
}
