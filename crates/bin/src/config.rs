//! Command-line configuration shared by every subcommand.

use clap::{Args, ValueEnum};
use eurenew::EnergySector;
use eurenew::data::{DataError, DatasetSource, EurostatClient, StaticSource};
use eurenew::output::ExportFormat;
use std::path::PathBuf;
use tracing::info;

/// Where the wide dataset comes from.
#[derive(Debug, Clone, Args)]
pub(crate) struct SourceArgs {
    /// Read the Eurostat TSV payload from a local file instead of the network
    #[arg(long, global = true, env = "EURENEW_FIXTURE")]
    pub(crate) fixture: Option<PathBuf>,

    /// Eurostat dissemination API base URL
    #[arg(
        long,
        global = true,
        env = "EUROSTAT_BASE_URL",
        default_value = eurenew::data::eurostat::DEFAULT_BASE_URL
    )]
    pub(crate) base_url: String,
}

impl SourceArgs {
    /// Build the configured dataset source.
    pub(crate) fn build(&self) -> Result<Box<dyn DatasetSource>, DataError> {
        match &self.fixture {
            Some(path) => {
                info!(path = %path.display(), "serving dataset from fixture");
                Ok(Box::new(StaticSource::from_tsv_file(path)?))
            }
            None => {
                info!(base_url = %self.base_url, "serving dataset from Eurostat");
                Ok(Box::new(EurostatClient::with_base_url(self.base_url.clone())?))
            }
        }
    }
}

/// Output format of the `export` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    /// Comma-separated values
    Csv,
    /// Compact JSON
    Json,
    /// Indented JSON
    PrettyJson,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::PrettyJson => Self::PrettyJson,
        }
    }
}

/// Parse a sector from its display name or its `nrg_bal` code.
pub(crate) fn parse_sector(value: &str) -> Result<EnergySector, String> {
    EnergySector::from_name(value)
        .or_else(|| EnergySector::from_code(value))
        .ok_or_else(|| {
            let known: Vec<&str> = EnergySector::all().iter().map(|s| s.name()).collect();
            format!("unknown sector {value:?}, expected one of: {}", known.join(", "))
        })
}
