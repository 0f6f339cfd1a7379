#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/eurenew/eurenew/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod geo;
pub mod history;
pub mod normalize;
pub mod observation;
pub mod report;
pub mod schema;
pub mod sector;
pub mod select;

pub use error::{PipelineError, Result};
pub use filter::filter_sectors;
pub use geo::{AGGREGATE_CODES, is_aggregate};
pub use history::extract_history;
pub use normalize::normalize;
pub use observation::{Observation, observations_from_frame};
pub use report::{RenewablesTable, SectorReport};
pub use schema::WideSchema;
pub use sector::EnergySector;
pub use select::{Leaderboard, SelectionConfig, select_top};
