//! Restriction of the long table to the reported sectors.

use crate::error::Result;
use crate::schema::{SECTOR, SECTOR_CODE};
use crate::sector::EnergySector;
use polars::prelude::*;

/// Keep rows whose `nrg_bal` is a known sector code and attach its display
/// name as `Sector`.
///
/// Rows with any other code are dropped without error. Row order is kept.
pub fn filter_sectors(long: &DataFrame) -> Result<DataFrame> {
    let display_name = EnergySector::all().into_iter().fold(
        lit(NULL).cast(DataType::String),
        |acc, sector| {
            when(col(SECTOR_CODE).eq(lit(sector.code())))
                .then(lit(sector.name()))
                .otherwise(acc)
        },
    );

    let filtered = long
        .clone()
        .lazy()
        .with_columns([display_name.alias(SECTOR)])
        .filter(col(SECTOR).is_not_null())
        .collect()?;

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn long() -> DataFrame {
        let wide = df!(
            "Country" => ["AT", "AT", "AT", "AT"],
            "unit" => ["PC", "PC", "PC", "PC"],
            "nrg_bal" => ["REN", "REN_ELC_TRA", "REN_HEAT_CL", "REN_TRA"],
            "2022" => ["33.8", "1.2", "35.9", "10.2"],
        )
        .unwrap();
        normalize(&wide).unwrap()
    }

    #[test]
    fn test_unknown_codes_are_dropped() {
        let filtered = filter_sectors(&long()).unwrap();
        assert_eq!(filtered.height(), 3);
    }

    #[test]
    fn test_display_names_follow_input_order() {
        let filtered = filter_sectors(&long()).unwrap();

        let sectors: Vec<Option<&str>> = filtered
            .column("Sector")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            sectors,
            vec![
                Some("Overall Share"),
                Some("Heating & Cooling"),
                Some("Transport")
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let empty = long().clear();
        let filtered = filter_sectors(&empty).unwrap();
        assert_eq!(filtered.height(), 0);
        assert!(filtered.column("Sector").is_ok());
    }
}
