//! Outcome aggregation: latency buckets, capped id samples and the collector task.
mod collector;
mod histogram;
mod samples;
mod types;


pub use collector::{Aggregator, collect_outcomes, setup_aggregator};
pub use histogram::{BucketKey, BucketScheme, Distribution};
pub use samples::SampleList;
pub use types::{FetchOutcome, RunResult};
