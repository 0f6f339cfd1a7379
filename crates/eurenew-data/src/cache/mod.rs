//! In-process caching of fetched datasets.

pub mod memo;

pub use memo::CachedSource;
