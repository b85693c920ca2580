use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Threshold list must not be empty.")]
    ThresholdsEmpty,
    #[error("Invalid threshold '{value}': {source}")]
    InvalidThreshold {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Thresholds must be positive and strictly increasing (got {value}ms after {previous}ms).")]
    ThresholdsNotIncreasing { previous: u64, value: u64 },
    #[error("Trace URL template '{value}' must contain '{{reqid}}'.")]
    TraceTemplateMissingPlaceholder { value: String },
    #[error("Rate {rate}/s is too high: tick interval would be below 1us.")]
    RateTooHigh { rate: u64 },
    #[error("Run duration {duration_us}us is shorter than one tick of {interval_us}us.")]
    NoTicks { duration_us: u128, interval_us: u64 },
    #[error("Missing target URLs (pass them as arguments or set 'urls' in config).")]
    MissingUrls,
}
