#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/eurenew/eurenew/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod service;

// Re-export main types from sub-crates
pub use eurenew_data as data;
pub use eurenew_output as output;
pub use eurenew_pipeline as pipeline;

pub use eurenew_pipeline::{EnergySector, PipelineError, SectorReport, SelectionConfig};
pub use service::ReportService;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
