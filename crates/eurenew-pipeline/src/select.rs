//! Top-N selection for one sector.

use crate::error::Result;
use crate::geo::AGGREGATE_CODES;
use crate::schema::{COUNTRY, SECTOR, VALUE, YEAR};
use crate::sector::EnergySector;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for leaderboard selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Leaderboard length (default: 10)
    pub top_n: usize,
    /// Number of leaders whose history is charted (default: 5)
    pub cohort_size: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            cohort_size: 5,
        }
    }
}

/// The ranked slice of one sector for its latest year.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    /// Sector the ranking belongs to
    pub sector: EnergySector,
    /// Latest year with data for the sector, `None` when it has no rows
    pub latest_year: Option<i32>,
    /// Ranked rows, best first
    pub top: DataFrame,
    /// Countries of the first `cohort_size` ranked rows
    pub cohort: Vec<String>,
}

impl Leaderboard {
    /// Number of ranked rows.
    pub fn len(&self) -> usize {
        self.top.height()
    }

    /// Whether nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.top.height() == 0
    }

    /// Ranked country codes, best first.
    pub fn countries(&self) -> Result<Vec<String>> {
        let countries = self
            .top
            .column(COUNTRY)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        Ok(countries)
    }
}

/// Rank the countries of one sector by their latest-year value.
///
/// The input is a sector-filtered long table. Aggregate regions are excluded
/// before ranking. Ties keep their input order. A sector without rows gives
/// an empty leaderboard with no latest year.
///
/// # Example
/// ```no_run
/// use eurenew_pipeline::{EnergySector, SelectionConfig, filter_sectors, normalize, select_top};
/// # fn example(wide: &polars::prelude::DataFrame) -> eurenew_pipeline::Result<()> {
/// let filtered = filter_sectors(&normalize(wide)?)?;
/// let board = select_top(&filtered, EnergySector::Electricity, &SelectionConfig::default())?;
/// println!("{} countries ranked for {:?}", board.len(), board.latest_year);
/// # Ok(())
/// # }
/// ```
pub fn select_top(
    filtered: &DataFrame,
    sector: EnergySector,
    config: &SelectionConfig,
) -> Result<Leaderboard> {
    let sector_rows = filtered
        .clone()
        .lazy()
        .filter(col(SECTOR).eq(lit(sector.name())))
        .collect()?;

    let latest_year = sector_rows.column(YEAR)?.as_materialized_series().i32()?.max();

    let Some(year) = latest_year else {
        debug!(sector = sector.code(), "no rows for sector");
        return Ok(Leaderboard {
            sector,
            latest_year: None,
            top: sector_rows,
            cohort: Vec::new(),
        });
    };

    let is_country = AGGREGATE_CODES
        .iter()
        .fold(lit(true), |acc, code| acc.and(col(COUNTRY).neq(lit(*code))));

    let top = sector_rows
        .lazy()
        .filter(col(YEAR).eq(lit(year)))
        .filter(is_country)
        .sort(
            [VALUE],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(config.top_n as IdxSize)
        .collect()?;

    let mut board = Leaderboard {
        sector,
        latest_year,
        top,
        cohort: Vec::new(),
    };
    board.cohort = board
        .countries()?
        .into_iter()
        .take(config.cohort_size)
        .collect();

    debug!(
        sector = sector.code(),
        year,
        ranked = board.len(),
        cohort = board.cohort.len(),
        "selected leaderboard"
    );

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_sectors;
    use crate::normalize::normalize;

    fn filtered(countries: &[&str], values: &[&str]) -> DataFrame {
        let n = countries.len();
        let wide = df!(
            "Country" => countries,
            "unit" => vec!["PC"; n],
            "nrg_bal" => vec!["REN"; n],
            "2021" => vec!["1.0"; n],
            "2022" => values,
        )
        .unwrap();
        filter_sectors(&normalize(&wide).unwrap()).unwrap()
    }

    #[test]
    fn test_ranks_latest_year_descending() {
        let table = filtered(&["SE", "FI", "LV"], &["66.0", "47.9", "43.3"]);
        let board = select_top(&table, EnergySector::Overall, &SelectionConfig::default()).unwrap();

        assert_eq!(board.latest_year, Some(2022));
        assert_eq!(board.countries().unwrap(), vec!["SE", "FI", "LV"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let table = filtered(&["LT", "EE", "PT"], &["30.0", "38.0", "30.0"]);
        let board = select_top(&table, EnergySector::Overall, &SelectionConfig::default()).unwrap();

        assert_eq!(board.countries().unwrap(), vec!["EE", "LT", "PT"]);
    }

    #[test]
    fn test_top_n_and_cohort_size() {
        let countries = ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "B1", "B2", "B3"];
        let values: Vec<String> = (0..countries.len()).map(|i| format!("{}.0", 50 - i)).collect();
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        let table = filtered(&countries, &values);

        let board = select_top(&table, EnergySector::Overall, &SelectionConfig::default()).unwrap();
        assert_eq!(board.len(), 10);
        assert_eq!(board.cohort, vec!["A1", "A2", "A3", "A4", "A5"]);

        let config = SelectionConfig {
            top_n: 3,
            cohort_size: 5,
        };
        let board = select_top(&table, EnergySector::Overall, &config).unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.cohort.len(), 3);
    }

    #[test]
    fn test_aggregates_are_not_ranked() {
        let table = filtered(&["EU27_2020", "EA20", "DK"], &["90.0", "80.0", "55.0"]);
        let board = select_top(&table, EnergySector::Overall, &SelectionConfig::default()).unwrap();

        assert_eq!(board.countries().unwrap(), vec!["DK"]);
    }

    #[test]
    fn test_empty_sector() {
        let table = filtered(&["DK"], &["55.0"]);
        let board = select_top(&table, EnergySector::Transport, &SelectionConfig::default()).unwrap();

        assert_eq!(board.latest_year, None);
        assert!(board.is_empty());
        assert!(board.cohort.is_empty());
    }
}
