//! Eurostat dissemination API integration.

pub mod client;
pub mod tsv;

pub use client::{DEFAULT_BASE_URL, EurostatClient};
pub use tsv::{COUNTRY_COLUMN, MISSING_MARKER, parse_tsv};

/// Eurostat code of the "Share of energy from renewable sources" dataset.
pub const RENEWABLES_DATASET: &str = "nrg_ind_ren";
