//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::ProbeArgs;
pub use types::{OutputFormat, PositiveU64, PositiveUsize, Thresholds};

pub(crate) use defaults::{DEFAULT_TRACE_URL, DEFAULT_USER_AGENT};
pub(crate) use parsers::{parse_duration_arg, parse_thresholds, parse_trace_template};
