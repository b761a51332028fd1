//! Job discovery: source adapters, filters and the aggregation sweep.
//!
//! This crate provides:
//! - `SourceAdapter` trait for pluggable job origins
//! - Fixture and JSON feed adapter implementations
//! - Location and industry keyword filters
//! - `Aggregator` that sweeps the search profile and removes duplicates

pub mod aggregator;
pub mod builder;
pub mod feed;
pub mod filter;
pub mod fixture;
pub mod profile;
pub mod traits;

pub use aggregator::{dedup_by_aggregation_key, Aggregation, Aggregator};
pub use builder::build_sweeps;
pub use filter::{location_matches, IndustryFilter, LocationFilter};
pub use profile::{BoardSweep, NetworkSweep, Query, SearchProfile, Sweep};
pub use traits::{SourceAdapter, SourceError};
