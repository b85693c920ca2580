use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use super::{Distribution, SampleList};

/// One classified attempt, sent from a fetch task to the collector.
///
/// A failed attempt carries zero latency and an empty request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub target: Arc<str>,
    pub latency: Duration,
    pub reqid: String,
}

impl FetchOutcome {
    #[must_use]
    pub const fn success(target: Arc<str>, latency: Duration, reqid: String) -> Self {
        Self {
            target,
            latency,
            reqid,
        }
    }

    #[must_use]
    pub const fn failure(target: Arc<str>) -> Self {
        Self {
            target,
            latency: Duration::ZERO,
            reqid: String::new(),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.latency.is_zero() && self.reqid.is_empty()
    }
}

/// Sealed result of a finished collection.
///
/// The overflow bucket of every distribution has already been relabelled to
/// `max_latency_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub total: u64,
    pub max_latency_ms: u64,
    pub global: Distribution,
    pub per_target: BTreeMap<Arc<str>, Distribution>,
    pub success_reqids: SampleList,
    pub failure_reqids: SampleList,
}
