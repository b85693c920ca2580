//! Final report: a pure view of a sealed [`RunResult`] plus its renderers.
mod render;


use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::metrics::{BucketKey, Distribution, RunResult, SampleList};

pub use render::{render_json, render_text};

const REQID_PLACEHOLDER: &str = "{reqid}";

/// Run metadata that does not come from the collector.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub interval: Duration,
    pub trace_url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub interval_us: u64,
    pub total_attempts: u64,
    pub max_latency_ms: u64,
    pub elapsed_ms: u64,
    pub global: Vec<BucketRow>,
    pub targets: Vec<TargetReport>,
    pub success_reqids: Vec<SampleLink>,
    pub failure_reqids: Vec<SampleLink>,
}

/// Count of attempts below `upper_ms`. After sealing, the overflow bucket
/// appears with `upper_ms` equal to the maximum observed latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketRow {
    pub upper_ms: u64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub url: String,
    pub total: u64,
    pub buckets: Vec<BucketRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleLink {
    pub reqid: String,
    /// `None` for failures that never produced a request id.
    pub lookup_url: Option<String>,
}

/// Builds the report. Pure: the same inputs always give the same report.
#[must_use]
pub fn assemble(result: &RunResult, context: &ReportContext<'_>) -> RunReport {
    RunReport {
        started_at: context
            .started_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        interval_us: duration_to_u64(context.interval.as_micros()),
        total_attempts: result.total,
        max_latency_ms: result.max_latency_ms,
        elapsed_ms: duration_to_u64(context.elapsed.as_millis()),
        global: bucket_rows(&result.global, result.max_latency_ms),
        targets: result
            .per_target
            .iter()
            .map(|(url, distribution)| TargetReport {
                url: url.to_string(),
                total: distribution.total(),
                buckets: bucket_rows(distribution, result.max_latency_ms),
            })
            .collect(),
        success_reqids: sample_links(&result.success_reqids, context.trace_url),
        failure_reqids: sample_links(&result.failure_reqids, context.trace_url),
    }
}

fn bucket_rows(distribution: &Distribution, max_latency_ms: u64) -> Vec<BucketRow> {
    distribution
        .iter()
        .map(|(key, count)| BucketRow {
            upper_ms: match key {
                BucketKey::Threshold(ms) => ms,
                BucketKey::Overflow => max_latency_ms,
            },
            count,
        })
        .collect()
}

fn sample_links(samples: &SampleList, trace_url: &str) -> Vec<SampleLink> {
    samples
        .as_slice()
        .iter()
        .map(|reqid| SampleLink {
            reqid: reqid.clone(),
            lookup_url: (!reqid.is_empty()).then(|| trace_url.replace(REQID_PLACEHOLDER, reqid)),
        })
        .collect()
}

fn duration_to_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
