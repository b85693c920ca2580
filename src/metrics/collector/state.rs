use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use super::super::{BucketKey, BucketScheme, Distribution, FetchOutcome, RunResult, SampleList};

/// Accumulates outcomes until `expected` of them have been recorded.
///
/// `seal` consumes the aggregator, so nothing can be recorded once the
/// result exists.
#[derive(Debug)]
pub struct Aggregator {
    scheme: BucketScheme,
    expected: u64,
    received: u64,
    max_latency: Duration,
    global: Distribution,
    per_target: BTreeMap<Arc<str>, Distribution>,
    success_reqids: SampleList,
    failure_reqids: SampleList,
    last_decile: u64,
}

impl Aggregator {
    #[must_use]
    pub fn new(scheme: BucketScheme, expected: u64, max_reqids: usize) -> Self {
        Self {
            scheme,
            expected,
            received: 0,
            max_latency: Duration::ZERO,
            global: Distribution::default(),
            per_target: BTreeMap::new(),
            success_reqids: SampleList::with_cap(max_reqids),
            failure_reqids: SampleList::with_cap(max_reqids),
            last_decile: 0,
        }
    }

    /// Records one outcome.
    ///
    /// Returns the completed percentage (10, 20, .., 100) when this outcome
    /// moved collection into a new decile.
    pub fn record(&mut self, outcome: &FetchOutcome) -> Option<u8> {
        if outcome.latency > self.max_latency {
            self.max_latency = outcome.latency;
        }

        let bucket = self
            .scheme
            .classify(outcome.latency, outcome.is_failure());
        self.global.record(bucket);
        self.per_target
            .entry(Arc::clone(&outcome.target))
            .or_default()
            .record(bucket);

        let samples = match bucket {
            BucketKey::Overflow => &mut self.failure_reqids,
            BucketKey::Threshold(_) => &mut self.success_reqids,
        };
        samples.push(&outcome.reqid);

        self.received = self.received.saturating_add(1);
        self.advance_decile()
    }

    fn advance_decile(&mut self) -> Option<u8> {
        if self.expected == 0 {
            return None;
        }
        let decile = u128::from(self.received)
            .saturating_mul(10)
            .checked_div(u128::from(self.expected))
            .unwrap_or(0)
            .min(10);
        let decile = u64::try_from(decile).unwrap_or(10);
        if decile <= self.last_decile {
            return None;
        }
        self.last_decile = decile;
        u8::try_from(decile.saturating_mul(10)).ok()
    }

    #[must_use]
    pub const fn received(&self) -> u64 {
        self.received
    }

    #[must_use]
    pub const fn expected(&self) -> u64 {
        self.expected
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.received >= self.expected
    }

    /// Relabels every overflow bucket to the observed maximum and freezes the
    /// counts into a [`RunResult`].
    #[must_use]
    pub fn seal(self) -> RunResult {
        let max_latency_ms = u64::try_from(self.max_latency.as_millis()).unwrap_or(u64::MAX);
        // If max_latency_ms equals a threshold, overflow counts merge into that bucket.
        RunResult {
            total: self.received,
            max_latency_ms,
            global: self.global.seal(max_latency_ms),
            per_target: self
                .per_target
                .into_iter()
                .map(|(target, distribution)| (target, distribution.seal(max_latency_ms)))
                .collect(),
            success_reqids: self.success_reqids,
            failure_reqids: self.failure_reqids,
        }
    }
}
