mod worker;

use std::sync::Arc;

use reqwest::{Client, header::HeaderValue};
use tokio::sync::{Semaphore, mpsc};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error};

use crate::error::HttpError;
use crate::metrics::FetchOutcome;

use super::{Target, TickPlan};
use worker::spawn_fetch;

#[cfg(test)]
pub(crate) use worker::fetch_once;
#[cfg(any(test, feature = "fuzzing"))]
pub(crate) use worker::parse_reqid;

/// Transport settings shared by every fetch task.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub user_agent: String,
    pub pool_max_idle_per_host: usize,
}

/// Builds the pooled client all fetch tasks share.
///
/// # Errors
///
/// Returns an error when the user agent is not a valid header value or the
/// client cannot be constructed.
pub fn build_client(settings: &ClientSettings) -> Result<Client, HttpError> {
    let user_agent = HeaderValue::from_str(&settings.user_agent).map_err(|err| {
        HttpError::InvalidUserAgent {
            value: settings.user_agent.clone(),
            source: err,
        }
    })?;

    Client::builder()
        .user_agent(user_agent)
        .pool_max_idle_per_host(settings.pool_max_idle_per_host)
        .build()
        .map_err(|err| {
            error!("Failed to build HTTP client: {}", err);
            HttpError::BuildClientFailed { source: err }
        })
}

/// Runs the tick loop: every tick spawns one fetch per target and moves on
/// without waiting for any of them.
///
/// Returns the number of attempts spawned. The outcome sender is dropped on
/// return, so only in-flight fetches keep the channel open afterwards.
pub async fn dispatch(
    plan: TickPlan,
    targets: &[Arc<Target>],
    client: &Client,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    limiter: Option<Arc<Semaphore>>,
) -> u64 {
    let mut ticker = interval(plan.interval);
    // Late ticks are replayed so the attempt count per second holds even
    // when the timer resolution is coarser than the interval.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut dispatched = 0u64;
    for _ in 0..plan.ticks {
        ticker.tick().await;
        for target in targets {
            spawn_fetch(
                client.clone(),
                Arc::clone(target),
                outcome_tx.clone(),
                limiter.clone(),
            );
            dispatched = dispatched.saturating_add(1);
        }
    }

    debug!("Dispatched {} attempts over {} ticks", dispatched, plan.ticks);
    dispatched
}
