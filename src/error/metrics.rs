use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Collection timed out after {waited:?}: received {received} of {expected} outcomes.")]
    CollectionTimedOut {
        received: u64,
        expected: u64,
        waited: Duration,
    },
    #[error("Outcome channel closed early: received {received} of {expected} outcomes.")]
    ChannelClosed { received: u64, expected: u64 },
}
