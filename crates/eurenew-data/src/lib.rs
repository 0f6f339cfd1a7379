#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/eurenew/eurenew/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod eurostat;
pub mod source;

pub use cache::CachedSource;
pub use error::{DataError, Result};
pub use eurostat::{EurostatClient, RENEWABLES_DATASET};
pub use source::{DatasetSource, StaticSource};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
