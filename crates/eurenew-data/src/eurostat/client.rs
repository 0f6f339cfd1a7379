//! Eurostat SDMX 2.1 dissemination API client.

use crate::error::{DataError, Result};
use crate::eurostat::tsv::parse_tsv;
use crate::source::DatasetSource;
use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default Eurostat bulk data endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1/data";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("eurenew/", env!("CARGO_PKG_VERSION"));

/// Default request timeout; the full dataset is a few hundred kilobytes.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Eurostat API client.
pub struct EurostatClient {
    client: reqwest::Client,
    base_url: String,
}

impl EurostatClient {
    /// Create a client against the public Eurostat endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (mirrors, local stubs).
    ///
    /// # Example
    /// ```no_run
    /// use eurenew_data::EurostatClient;
    ///
    /// # fn example() -> eurenew_data::Result<()> {
    /// let client = EurostatClient::with_base_url("http://localhost:9000/data")?;
    /// assert!(client.dataset_url("nrg_ind_ren").ends_with("/nrg_ind_ren"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a dataset, without query parameters.
    pub fn dataset_url(&self, dataset_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), dataset_code)
    }

    /// Download the raw TSV payload of a dataset.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidDataset`] for an empty code,
    /// [`DataError::Network`] when the request fails, and [`DataError::Http`]
    /// when the provider answers with a non-success status.
    pub async fn fetch_tsv(&self, dataset_code: &str) -> Result<String> {
        if dataset_code.trim().is_empty() {
            return Err(DataError::InvalidDataset(dataset_code.to_string()));
        }

        let url = self.dataset_url(dataset_code);
        debug!(%url, "requesting Eurostat dataset");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "TSV"), ("compressed", "false")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch dataset {dataset_code}: HTTP {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl DatasetSource for EurostatClient {
    async fn fetch_wide(&self, dataset_code: &str) -> Result<DataFrame> {
        let started = Instant::now();
        let payload = self.fetch_tsv(dataset_code).await?;
        let frame = parse_tsv(&payload)?;

        info!(
            dataset = dataset_code,
            rows = frame.height(),
            columns = frame.width(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched Eurostat dataset"
        );

        Ok(frame)
    }
}

impl std::fmt::Debug for EurostatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EurostatClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eurostat::RENEWABLES_DATASET;

    #[test]
    fn test_dataset_url() {
        let client = EurostatClient::new().unwrap();
        assert_eq!(
            client.dataset_url(RENEWABLES_DATASET),
            format!("{DEFAULT_BASE_URL}/nrg_ind_ren")
        );
    }

    #[test]
    fn test_dataset_url_trailing_slash() {
        let client = EurostatClient::with_base_url("http://localhost:9000/data/").unwrap();
        assert_eq!(
            client.dataset_url("nrg_ind_ren"),
            "http://localhost:9000/data/nrg_ind_ren"
        );
        assert_eq!(client.base_url(), "http://localhost:9000/data/");
    }

    #[tokio::test]
    async fn test_empty_dataset_code() {
        let client = EurostatClient::new().unwrap();
        let result = client.fetch_tsv("  ").await;
        assert!(matches!(result, Err(DataError::InvalidDataset(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let client = EurostatClient::with_base_url("http://127.0.0.1:9/data").unwrap();
        let result = client.fetch_wide(RENEWABLES_DATASET).await;
        assert!(matches!(result, Err(DataError::Network(_))));
    }

    #[tokio::test]
    #[ignore = "requires network access to ec.europa.eu"]
    async fn test_fetch_renewables_dataset() {
        let client = EurostatClient::new().unwrap();
        let frame = client.fetch_wide(RENEWABLES_DATASET).await.unwrap();
        assert!(frame.height() > 0);
        assert!(frame.column("Country").is_ok());
        assert!(frame.column("nrg_bal").is_ok());
    }
}
