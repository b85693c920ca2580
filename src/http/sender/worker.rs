use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::http::Target;
use crate::metrics::FetchOutcome;

/// Body shape expected from the probed service.
#[derive(Debug, Deserialize)]
struct TraceEnvelope {
    #[serde(default)]
    reqid: String,
}

pub(super) fn spawn_fetch(
    client: Client,
    target: Arc<Target>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    limiter: Option<Arc<Semaphore>>,
) {
    tokio::spawn(async move {
        let permit = match limiter {
            Some(limiter) => limiter.acquire_owned().await.ok(),
            None => None,
        };
        let outcome = fetch_once(&client, &target).await;
        drop(permit);

        if outcome_tx.send(outcome).await.is_err() {
            debug!("Collector gone; dropping outcome for {}", target.label);
        }
    });
}

/// Performs one GET and classifies it. Never fails: every error path becomes
/// a zero-latency outcome with an empty request id.
pub(crate) async fn fetch_once(client: &Client, target: &Target) -> FetchOutcome {
    let label = Arc::clone(&target.label);
    let start = Instant::now();

    let response = match client.get(target.url.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Request to {} failed: {}", label, err);
            return FetchOutcome::failure(label);
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(
            "{} returned {}; headers: {:?}",
            label,
            status,
            response.headers()
        );
        return FetchOutcome::failure(label);
    }
    let latency = start.elapsed();

    let body = match read_body(response).await {
        Ok(body) => body,
        Err(err) => {
            warn!("Failed to read response body from {}: {}", label, err);
            return FetchOutcome::failure(label);
        }
    };

    let Some(reqid) = parse_reqid(&body) else {
        warn!("Response from {} carried no reqid", label);
        return FetchOutcome::failure(label);
    };
    FetchOutcome::success(label, latency, reqid)
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}

/// Non-empty `reqid` from a JSON body. Any other shape yields `None`.
pub(crate) fn parse_reqid(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<TraceEnvelope>(body)
        .ok()
        .map(|envelope| envelope.reqid)
        .filter(|reqid| !reqid.is_empty())
}
