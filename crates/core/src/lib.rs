pub mod config;
pub mod duration;
pub mod env;
pub mod error;
pub mod job;

pub use config::{HuntbotConfig, SourceConfig, SourceKind, SweepKind};
pub use error::CoreError;
pub use job::{AggregationKey, DeliveryKey, JobRecord};
