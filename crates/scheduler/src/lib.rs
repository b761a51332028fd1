//! Pass orchestration and the supervising run loop.
//!
//! - `Pipeline` runs one aggregation and delivery pass
//! - `Scheduler` repeats passes on an interval and recovers from faults

pub mod error;
pub mod pipeline;
pub mod scheduler;

pub use error::PipelineError;
pub use pipeline::{PassRunner, PassSummary, Pipeline};
pub use scheduler::{PassOutcome, Scheduler, SchedulerState};
