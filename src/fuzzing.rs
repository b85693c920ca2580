use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{ProbeArgs, parse_duration_arg, parse_thresholds, parse_trace_template};
use crate::config::types::ConfigFile;
use crate::config::{apply_config, load_config_file};
use crate::error::{AppError, AppResult};
use crate::metrics::{BucketKey, BucketScheme};

thread_local! {
    static BASE_MATCHES: ArgMatches = ProbeArgs::command().get_matches_from(["tickload"]);
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input).map_err(AppError::from)
}

/// Parses a threshold list and returns the bounds.
///
/// # Errors
///
/// Returns an error when the list is empty, non-numeric or not increasing.
pub fn parse_thresholds_input(input: &str) -> AppResult<Vec<u64>> {
    let thresholds = parse_thresholds(input)?;
    Ok(thresholds.as_slice().to_vec())
}

/// Parses a trace lookup template.
///
/// # Errors
///
/// Returns an error when the `{reqid}` placeholder is missing.
pub fn parse_trace_template_input(input: &str) -> AppResult<String> {
    parse_trace_template(input).map_err(AppError::from)
}

/// Parses a positive `u64`.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    let value = crate::args::parsers::parse_positive_u64(input)?;
    Ok(value.get())
}

/// Parses a positive `usize`.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value = crate::args::parsers::parse_positive_usize(input)?;
    Ok(value.get())
}

/// Extracts the request id from a response body.
#[must_use]
pub fn parse_reqid_input(body: &[u8]) -> Option<String> {
    crate::http::parse_reqid(body)
}

/// Buckets a latency with the default thresholds.
#[must_use]
pub fn bucket_for_input(latency_ms: u64) -> BucketKey {
    BucketScheme::default().bucket_for(Duration::from_millis(latency_ms))
}

/// Parses TOML config and applies it to default arguments.
///
/// # Errors
///
/// Returns an error when parsing or applying the config fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(crate::error::ConfigError::ParseToml {
            path: "fuzz.toml".into(),
            source: err,
        })
    })?;
    apply_to_defaults(&config)
}

/// Parses JSON config and applies it to default arguments.
///
/// # Errors
///
/// Returns an error when parsing or applying the config fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<()> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_to_defaults(&config)
}

/// Loads a config file from disk.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_config_file_input(path: &std::path::Path) -> AppResult<()> {
    load_config_file(path).map(drop)
}

fn apply_to_defaults(config: &ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = ProbeArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)
    })
}
