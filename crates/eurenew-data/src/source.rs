//! The fetch seam of the pipeline.
//!
//! Every component that can produce the wide dataset table implements
//! [`DatasetSource`]. The live implementation is
//! [`EurostatClient`](crate::eurostat::EurostatClient); [`StaticSource`] serves
//! a fixed frame so tests and offline runs never touch the network.

use crate::error::Result;
use crate::eurostat::parse_tsv;
use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A provider of wide-format statistical tables.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the wide table (one row per key combination, one column per
    /// period) for the given dataset code.
    async fn fetch_wide(&self, dataset_code: &str) -> Result<DataFrame>;
}

#[async_trait]
impl<T: DatasetSource + ?Sized> DatasetSource for Box<T> {
    async fn fetch_wide(&self, dataset_code: &str) -> Result<DataFrame> {
        (**self).fetch_wide(dataset_code).await
    }
}

/// A source that returns the same frame for every dataset code.
#[derive(Debug)]
pub struct StaticSource {
    frame: DataFrame,
    calls: AtomicUsize,
}

impl StaticSource {
    /// Wrap an already-built wide frame.
    pub const fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            calls: AtomicUsize::new(0),
        }
    }

    /// Build a source from an Eurostat TSV payload.
    pub fn from_tsv(payload: &str) -> Result<Self> {
        Ok(Self::new(parse_tsv(payload)?))
    }

    /// Build a source from a TSV file on disk.
    pub fn from_tsv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let payload = std::fs::read_to_string(path)?;
        Self::from_tsv(&payload)
    }

    /// Number of times [`DatasetSource::fetch_wide`] has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch_wide(&self, _dataset_code: &str) -> Result<DataFrame> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "freq,unit,nrg_bal,geo\\TIME_PERIOD\t2021 \t2022 \n\
                           A,PC,REN,DK\t41.0 \t43.3 \n";

    #[tokio::test]
    async fn test_static_source_counts_calls() {
        let source = StaticSource::from_tsv(PAYLOAD).unwrap();
        assert_eq!(source.calls(), 0);

        let first = source.fetch_wide("nrg_ind_ren").await.unwrap();
        let second = source.fetch_wide("anything").await.unwrap();

        assert_eq!(first.height(), 1);
        assert!(first.equals(&second));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_boxed_source_delegates() {
        let boxed: Box<dyn DatasetSource> = Box::new(StaticSource::from_tsv(PAYLOAD).unwrap());
        let frame = boxed.fetch_wide("nrg_ind_ren").await.unwrap();
        assert_eq!(frame.width(), 6);
    }

    #[test]
    fn test_from_missing_file() {
        let result = StaticSource::from_tsv_file("/definitely/not/here.tsv");
        assert!(matches!(result, Err(crate::DataError::Io(_))));
    }
}
