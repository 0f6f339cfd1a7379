#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/eurenew/eurenew/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;
pub mod export;
pub mod html;
pub mod leaderboard;

pub use dashboard::{
    BarChart, DASHBOARD_TITLE, DashboardView, LineSeries, PASTEL_PALETTE, RankedRow, SectorOption,
};
pub use export::{ExportError, ExportFormat, Exporter};
pub use html::{render_dashboard, render_error};
pub use leaderboard::LeaderboardTable;
