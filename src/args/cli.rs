use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_DURATION, DEFAULT_MAX_REQIDS, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_RATE,
    DEFAULT_THRESHOLDS, DEFAULT_TRACE_URL, DEFAULT_USER_AGENT,
};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize,
    parse_thresholds, parse_trace_template,
};
use super::types::{OutputFormat, PositiveU64, PositiveUsize, Thresholds};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fixed-rate HTTP latency probe - dispatches requests at a steady cadence against one or more targets and reports latency buckets with sampled request ids."
)]
pub struct ProbeArgs {
    /// Target URLs; each tick sends one request to every URL
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Run duration (supports ms/s/m/h)
    #[arg(
        long = "duration",
        short = 't',
        default_value = DEFAULT_DURATION,
        value_parser = parse_duration_arg
    )]
    pub duration: Duration,

    /// Nominal ticks per second (effective rate is rate x number of URLs)
    #[arg(
        long = "rate",
        short = 'r',
        default_value = DEFAULT_RATE,
        value_parser = parse_positive_u64
    )]
    pub rate: PositiveU64,

    /// Maximum sampled request ids kept per success/failure list
    #[arg(long = "max-reqids", default_value = DEFAULT_MAX_REQIDS, value_parser = parse_positive_usize)]
    pub max_reqids: PositiveUsize,

    /// Latency bucket upper bounds in milliseconds, strictly increasing
    #[arg(long = "thresholds", default_value = DEFAULT_THRESHOLDS, value_parser = parse_thresholds)]
    pub thresholds: Thresholds,

    /// User-Agent header sent with every request
    #[arg(long = "user-agent", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Idle connections kept per host in the client pool
    #[arg(
        long = "pool-max-idle-per-host",
        default_value = DEFAULT_POOL_MAX_IDLE_PER_HOST,
        value_parser = parse_positive_usize
    )]
    pub pool_max_idle_per_host: PositiveUsize,

    /// Upper bound on concurrent requests (unbounded when unset)
    #[arg(long = "max-in-flight", value_parser = parse_positive_usize)]
    pub max_in_flight: Option<PositiveUsize>,

    /// Give up collecting results after this long (defaults to 4x duration + 30s)
    #[arg(long = "collect-timeout", value_parser = parse_duration_arg)]
    pub collect_timeout: Option<Duration>,

    /// Lookup URL template for sampled request ids ('{reqid}' is substituted)
    #[arg(long = "trace-url", default_value = DEFAULT_TRACE_URL, value_parser = parse_trace_template)]
    pub trace_url: String,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config", short = 'c')]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by TICKLOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
