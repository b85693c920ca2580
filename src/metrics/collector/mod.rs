mod state;

use std::time::Duration;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::error::MetricsError;

use super::{FetchOutcome, RunResult};
pub use state::Aggregator;

/// Spawns the collector task that owns all aggregation state.
#[must_use]
pub fn setup_aggregator(
    aggregator: Aggregator,
    outcome_rx: mpsc::Receiver<FetchOutcome>,
    deadline: Duration,
    progress_tx: Option<watch::Sender<u8>>,
) -> JoinHandle<Result<RunResult, MetricsError>> {
    tokio::spawn(collect_outcomes(
        aggregator,
        outcome_rx,
        deadline,
        progress_tx,
    ))
}

/// Receives outcomes until the aggregator has seen every dispatched attempt.
///
/// # Errors
///
/// Returns [`MetricsError::CollectionTimedOut`] when `deadline` passes first and
/// [`MetricsError::ChannelClosed`] when every sender is dropped early.
pub async fn collect_outcomes(
    mut aggregator: Aggregator,
    mut outcome_rx: mpsc::Receiver<FetchOutcome>,
    deadline: Duration,
    progress_tx: Option<watch::Sender<u8>>,
) -> Result<RunResult, MetricsError> {
    let deadline_timer = tokio::time::sleep(deadline);
    tokio::pin!(deadline_timer);

    while !aggregator.is_complete() {
        tokio::select! {
            () = &mut deadline_timer => {
                warn!(
                    "Collection deadline reached with {} of {} outcomes",
                    aggregator.received(),
                    aggregator.expected()
                );
                return Err(MetricsError::CollectionTimedOut {
                    received: aggregator.received(),
                    expected: aggregator.expected(),
                    waited: deadline,
                });
            },
            maybe_outcome = outcome_rx.recv() => {
                let Some(outcome) = maybe_outcome else {
                    return Err(MetricsError::ChannelClosed {
                        received: aggregator.received(),
                        expected: aggregator.expected(),
                    });
                };
                if let Some(percent) = aggregator.record(&outcome) {
                    debug!("Collected {}% of outcomes", percent);
                    if let Some(progress_tx) = progress_tx.as_ref() {
                        drop(progress_tx.send(percent));
                    }
                }
            }
        }
    }

    Ok(aggregator.seal())
}
