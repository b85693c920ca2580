use serde::Deserialize;

use crate::args::OutputFormat;

/// Values accepted in `tickload.toml` / `tickload.json`.
///
/// Every field is optional; a value only takes effect when the matching
/// flag was not given on the command line.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub urls: Option<Vec<String>>,
    pub duration: Option<DurationValue>,
    pub rate: Option<u64>,
    #[serde(alias = "max_samples")]
    pub max_reqids: Option<usize>,
    pub thresholds: Option<Vec<u64>>,
    pub user_agent: Option<String>,
    pub pool_max_idle_per_host: Option<usize>,
    #[serde(alias = "concurrency")]
    pub max_in_flight: Option<usize>,
    pub collect_timeout: Option<DurationValue>,
    pub trace_url: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// Duration written either as plain seconds (`120`) or with a unit (`"2m"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}
