use std::collections::BTreeMap;
use std::time::Duration;

use crate::args::Thresholds;

/// Bucket a latency falls into.
///
/// `Threshold(ms)` holds latencies strictly below `ms`. `Overflow` holds
/// failures and anything at or above the last threshold until the
/// distribution is sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Threshold(u64),
    Overflow,
}

/// Maps latencies onto the configured bucket bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketScheme {
    bounds: Vec<u64>,
}

impl BucketScheme {
    #[must_use]
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            bounds: thresholds.as_slice().to_vec(),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> &[u64] {
        &self.bounds
    }

    /// Smallest bound strictly greater than the latency in whole milliseconds.
    #[must_use]
    pub fn bucket_for(&self, latency: Duration) -> BucketKey {
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.bounds
            .iter()
            .find(|&&bound| ms < bound)
            .map_or(BucketKey::Overflow, |&bound| BucketKey::Threshold(bound))
    }

    /// Buckets one attempt; failures always land in `Overflow`.
    #[must_use]
    pub fn classify(&self, latency: Duration, failed: bool) -> BucketKey {
        if failed {
            return BucketKey::Overflow;
        }
        self.bucket_for(latency)
    }
}

impl Default for BucketScheme {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

/// Bucket key to attempt count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    counts: BTreeMap<BucketKey, u64>,
}

impl Distribution {
    pub fn record(&mut self, key: BucketKey) {
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub fn get(&self, key: BucketKey) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, u64)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }

    /// Moves the overflow count under `Threshold(max_latency_ms)`.
    ///
    /// When that key already has a count the two are summed. A distribution
    /// without overflow entries is returned unchanged.
    #[must_use]
    pub fn seal(mut self, max_latency_ms: u64) -> Self {
        if let Some(overflow) = self.counts.remove(&BucketKey::Overflow) {
            let slot = self
                .counts
                .entry(BucketKey::Threshold(max_latency_ms))
                .or_insert(0);
            *slot = slot.saturating_add(overflow);
        }
        self
    }
}

impl FromIterator<(BucketKey, u64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (BucketKey, u64)>>(iter: I) -> Self {
        let mut distribution = Self::default();
        for (key, count) in iter {
            let slot = distribution.counts.entry(key).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        distribution
    }
}
