use std::time::Duration;

use super::types::{PositiveU64, PositiveUsize, Thresholds};
use crate::error::{AppError, AppResult, ValidationError};

const REQID_PLACEHOLDER: &str = "{reqid}";

pub(crate) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(crate) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses a comma separated list of millisecond bounds, e.g. `50,100,200,300`.
pub(crate) fn parse_thresholds(s: &str) -> Result<Thresholds, ValidationError> {
    let mut values = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: u64 = part
            .parse()
            .map_err(|err| ValidationError::InvalidThreshold {
                value: part.to_owned(),
                source: err,
            })?;
        values.push(value);
    }
    Thresholds::try_from(values)
}

pub(crate) fn parse_trace_template(s: &str) -> Result<String, ValidationError> {
    if !s.contains(REQID_PLACEHOLDER) {
        return Err(ValidationError::TraceTemplateMissingPlaceholder {
            value: s.to_owned(),
        });
    }
    Ok(s.to_owned())
}

pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => Duration::from_secs(
            number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?,
        ),
        "h" => Duration::from_secs(
            number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?,
        ),
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
