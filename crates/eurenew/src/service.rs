//! Request-scoped pipeline runs over a shared, memoized dataset.

use eurenew_data::{CachedSource, DatasetSource, RENEWABLES_DATASET};
use eurenew_pipeline::{EnergySector, RenewablesTable, Result, SectorReport, SelectionConfig};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs fetch, normalize, filter and select for one sector per call.
///
/// The fetched dataset is memoized until [`ReportService::clear_cache`] is
/// called. Everything downstream of the fetch is recomputed on every call.
/// Clones share the cache.
#[derive(Clone)]
pub struct ReportService {
    source: Arc<CachedSource<Box<dyn DatasetSource>>>,
    dataset_code: String,
    config: SelectionConfig,
}

impl ReportService {
    /// Serve `nrg_ind_ren` from `source` with the default selection.
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self {
            source: Arc::new(CachedSource::new(source)),
            dataset_code: RENEWABLES_DATASET.to_string(),
            config: SelectionConfig::default(),
        }
    }

    /// Override the selection configuration.
    pub const fn with_config(mut self, config: SelectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Dataset this service reports on.
    pub fn dataset_code(&self) -> &str {
        &self.dataset_code
    }

    /// Selection configuration in use.
    pub const fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Whether the dataset is currently memoized.
    pub fn is_cached(&self) -> bool {
        self.source.is_cached(&self.dataset_code)
    }

    /// Drop the memoized dataset so the next call refetches it.
    pub async fn clear_cache(&self) {
        self.source.invalidate_all().await;
    }

    /// Fetch (or reuse) the dataset and build the sector-filtered table.
    pub async fn table(&self) -> Result<RenewablesTable> {
        let wide = self.source.fetch_wide(&self.dataset_code).await?;
        RenewablesTable::from_wide(&wide)
    }

    /// Build the report of one sector.
    ///
    /// # Errors
    /// Returns [`PipelineError::Fetch`](eurenew_pipeline::PipelineError::Fetch)
    /// when the dataset cannot be obtained, and the schema or empty-result
    /// errors of [`RenewablesTable::from_wide`].
    pub async fn report(&self, sector: EnergySector) -> Result<SectorReport> {
        let started = Instant::now();
        debug!(sector = sector.code(), "building sector report");

        let report = self.table().await?.report(sector, &self.config)?;

        info!(
            sector = sector.code(),
            latest_year = ?report.latest_year,
            ranked = report.leaderboard.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sector report ready"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for ReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportService")
            .field("dataset_code", &self.dataset_code)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
