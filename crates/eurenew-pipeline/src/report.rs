//! One pipeline run, from wide table to per-sector report.

use crate::error::{PipelineError, Result};
use crate::filter::filter_sectors;
use crate::history::extract_history;
use crate::normalize::normalize;
use crate::observation::{Observation, observations_from_frame};
use crate::schema::SECTOR;
use crate::sector::EnergySector;
use crate::select::{SelectionConfig, select_top};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The normalized, sector-filtered observations of one dataset snapshot.
#[derive(Debug, Clone)]
pub struct RenewablesTable {
    frame: DataFrame,
}

impl RenewablesTable {
    /// Normalize and filter a wide table.
    ///
    /// # Errors
    /// Returns [`PipelineError::Schema`] when the table does not match the
    /// expected layout and [`PipelineError::EmptyResult`] when no row of a
    /// known sector holds a numeric value. This is a check on the whole
    /// dataset snapshot, not on any one sector: a sector without rows still
    /// yields a report with `latest_year: None` and an empty leaderboard.
    pub fn from_wide(wide: &DataFrame) -> Result<Self> {
        let long = normalize(wide)?;
        let frame = filter_sectors(&long)?;

        if frame.height() == 0 {
            return Err(PipelineError::EmptyResult(format!(
                "none of the {} normalized observations belongs to a reported sector",
                long.height()
            )));
        }

        info!(
            wide_rows = wide.height(),
            observations = long.height(),
            reported = frame.height(),
            "built renewables table"
        );

        Ok(Self { frame })
    }

    /// The underlying long frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table holds no observation.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Every row of one sector, aggregates included, in input order.
    pub fn sector_rows(&self, sector: EnergySector) -> Result<DataFrame> {
        let rows = self
            .frame
            .clone()
            .lazy()
            .filter(col(SECTOR).eq(lit(sector.name())))
            .collect()?;
        Ok(rows)
    }

    /// Rank one sector and collect everything its dashboard shows.
    pub fn report(&self, sector: EnergySector, config: &SelectionConfig) -> Result<SectorReport> {
        let board = select_top(&self.frame, sector, config)?;
        let history = extract_history(&self.frame, sector, &board.cohort)?;
        let raw = self.sector_rows(sector)?;

        Ok(SectorReport {
            sector,
            latest_year: board.latest_year,
            leaderboard: observations_from_frame(&board.top)?,
            cohort: board.cohort,
            history: observations_from_frame(&history)?,
            raw: observations_from_frame(&raw)?,
        })
    }
}

/// Everything the presentation layer needs for one selected sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorReport {
    /// Selected sector
    pub sector: EnergySector,
    /// Latest year with data, `None` for an empty sector
    pub latest_year: Option<i32>,
    /// Ranked rows, best first
    pub leaderboard: Vec<Observation>,
    /// Countries whose history is charted
    pub cohort: Vec<String>,
    /// All years of the cohort countries
    pub history: Vec<Observation>,
    /// All rows of the sector, aggregates included
    pub raw: Vec<Observation>,
}

impl SectorReport {
    /// Whether the sector has no data at all.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
