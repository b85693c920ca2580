use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{
    PositiveU64, PositiveUsize, ProbeArgs, Thresholds, parse_duration_arg, parse_trace_template,
};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "urls")
        && let Some(urls) = config.urls.clone()
    {
        args.urls = urls;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = resolve_duration(duration, "duration")?;
    }

    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = ensure_positive_u64(rate, "rate")?;
    }

    if !is_cli(matches, "max_reqids")
        && let Some(max_reqids) = config.max_reqids
    {
        args.max_reqids = ensure_positive_usize(max_reqids, "max_reqids")?;
    }

    if !is_cli(matches, "thresholds")
        && let Some(thresholds) = config.thresholds.clone()
    {
        args.thresholds = Thresholds::try_from(thresholds)
            .map_err(|err| AppError::config(ConfigError::InvalidThresholds { source: err }))?;
    }

    if !is_cli(matches, "user_agent")
        && let Some(user_agent) = config.user_agent.clone()
    {
        args.user_agent = user_agent;
    }

    if !is_cli(matches, "pool_max_idle_per_host")
        && let Some(value) = config.pool_max_idle_per_host
    {
        args.pool_max_idle_per_host = ensure_positive_usize(value, "pool_max_idle_per_host")?;
    }

    if !is_cli(matches, "max_in_flight")
        && let Some(value) = config.max_in_flight
    {
        args.max_in_flight = Some(ensure_positive_usize(value, "max_in_flight")?);
    }

    if !is_cli(matches, "collect_timeout")
        && let Some(value) = config.collect_timeout.as_ref()
    {
        args.collect_timeout = Some(resolve_duration(value, "collect_timeout")?);
    }

    if !is_cli(matches, "trace_url")
        && let Some(template) = config.trace_url.as_deref()
    {
        args.trace_url = parse_trace_template(template).map_err(AppError::validation)?;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && matches.value_source("no_color") != Some(ValueSource::EnvVariable)
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn resolve_duration(value: &DurationValue, field: &'static str) -> AppResult<Duration> {
    let parsed = match value {
        DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
        DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
        DurationValue::Text(text) => parse_duration_arg(text),
    };
    parsed.map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
}
