use super::*;
use crate::args::PositiveUsize;
use crate::metrics::{Aggregator, BucketKey, BucketScheme, FetchOutcome, setup_aggregator};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

const OK_WITH_REQID: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 32\r\nConnection: close\r\n\r\n{\"reqid\":\"1700000000-abc\",\"x\":1}";
const OK_WITHOUT_REQID: &str =
    "HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\n{\"other\":1}";
const TRUNCATED_BODY: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"reqid\":\"abc\"}";
const SERVER_ERROR: &str =
    "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

async fn spawn_server(response: &'static str) -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buffer = [0u8; 2048];
                if stream.read(&mut buffer).await.is_err() {
                    return;
                }
                if stream.write_all(response.as_bytes()).await.is_err() {
                    return;
                }
                drop(stream.shutdown().await);
            });
        }
    });

    Ok(format!("http://{}/probe", addr))
}

async fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/probe", addr))
}

fn single_target(url: &str) -> Result<Target, String> {
    parse_targets(&[url.to_owned()])
        .map_err(|err| err.to_string())?
        .into_iter()
        .next()
        .ok_or_else(|| "Expected one target".to_owned())
}

fn test_client() -> Result<reqwest::Client, String> {
    build_client(&ClientSettings {
        user_agent: "curl/7.68.0".to_owned(),
        pool_max_idle_per_host: 4,
    })
    .map_err(|err| err.to_string())
}

#[test]
fn tick_plan_from_rate_and_duration() -> Result<(), String> {
    let plan = TickPlan::new(10_000, Duration::from_secs(120)).map_err(|err| err.to_string())?;
    if plan.interval != Duration::from_micros(100) {
        return Err(format!("Unexpected interval {:?}", plan.interval));
    }
    if plan.ticks != 1_200_000 {
        return Err(format!("Unexpected ticks {}", plan.ticks));
    }
    if plan.total_attempts(3) != 3_600_000 {
        return Err(format!("Unexpected attempts {}", plan.total_attempts(3)));
    }

    // 1_000_000 / 3 truncates to 333_333us.
    let uneven = TickPlan::new(3, Duration::from_secs(2)).map_err(|err| err.to_string())?;
    if uneven.interval != Duration::from_micros(333_333) || uneven.ticks != 6 {
        return Err(format!("Unexpected uneven plan {:?}", uneven));
    }
    Ok(())
}

#[test]
fn tick_plan_rejects_degenerate_input() -> Result<(), String> {
    if TickPlan::new(2_000_000, Duration::from_secs(1)).is_ok() {
        return Err("Expected sub-microsecond interval to be rejected".to_owned());
    }
    if TickPlan::new(10, Duration::from_millis(50)).is_ok() {
        return Err("Expected run shorter than one tick to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn in_flight_limiter_matches_config() -> Result<(), String> {
    if build_in_flight_limiter(None).is_some() {
        return Err("Expected no limiter without a limit".to_owned());
    }
    let limit = PositiveUsize::try_from(8).map_err(|err| err.to_string())?;
    let limiter = build_in_flight_limiter(Some(limit)).ok_or("Expected a limiter")?;
    if limiter.available_permits() != 8 {
        return Err(format!("Unexpected permits {}", limiter.available_permits()));
    }
    Ok(())
}

#[test]
fn parse_targets_validates_urls() -> Result<(), String> {
    let targets = parse_targets(&["http://a.local/x".to_owned(), "https://b.local".to_owned()])
        .map_err(|err| err.to_string())?;
    if targets.len() != 2 {
        return Err(format!("Expected 2 targets, got {}", targets.len()));
    }
    if targets.first().map(|target| &*target.label) != Some("http://a.local/x") {
        return Err("Expected label to keep the raw URL".to_owned());
    }
    if parse_targets(&[]).is_ok() {
        return Err("Expected empty target list to be rejected".to_owned());
    }
    if parse_targets(&["not a url".to_owned()]).is_ok() {
        return Err("Expected malformed URL to be rejected".to_owned());
    }
    if parse_targets(&["ftp://files.local".to_owned()]).is_ok() {
        return Err("Expected non-http scheme to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn parse_reqid_accepts_only_non_empty_strings() -> Result<(), String> {
    let cases: [(&[u8], Option<&str>); 6] = [
        (br#"{"reqid":"abc-1"}"#, Some("abc-1")),
        (br#"{"reqid":"abc-1","extra":[1,2]}"#, Some("abc-1")),
        (br#"{"reqid":""}"#, None),
        (br#"{"other":"x"}"#, None),
        (br#"{"reqid":42}"#, None),
        (b"plain text", None),
    ];
    for (body, expected) in cases {
        let parsed = parse_reqid(body);
        if parsed.as_deref() != expected {
            return Err(format!(
                "{} parsed to {:?}",
                String::from_utf8_lossy(body),
                parsed
            ));
        }
    }
    Ok(())
}

#[test]
fn invalid_user_agent_is_rejected() -> Result<(), String> {
    let result = build_client(&ClientSettings {
        user_agent: "bad\nagent".to_owned(),
        pool_max_idle_per_host: 1,
    });
    if result.is_ok() {
        return Err("Expected invalid user agent to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn fetch_success_carries_reqid_and_latency() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_server(OK_WITH_REQID).await?;
        let target = single_target(&url)?;
        let client = test_client()?;

        let outcome = fetch_once(&client, &target).await;
        if outcome.reqid != "1700000000-abc" {
            return Err(format!("Unexpected reqid {:?}", outcome.reqid));
        }
        if outcome.is_failure() {
            return Err("Expected success".to_owned());
        }
        if &*outcome.target != url.as_str() {
            return Err(format!("Unexpected target {}", outcome.target));
        }
        Ok(())
    })
}

#[test]
fn fetch_failures_are_zero_latency_without_reqid() -> Result<(), String> {
    run_async_test(async {
        let client = test_client()?;
        let urls = [
            spawn_server(SERVER_ERROR).await?,
            spawn_server(OK_WITHOUT_REQID).await?,
            spawn_server(TRUNCATED_BODY).await?,
            closed_port_url().await?,
        ];
        for url in urls {
            let target = single_target(&url)?;
            let outcome = fetch_once(&client, &target).await;
            if outcome != FetchOutcome::failure(Arc::clone(&target.label)) {
                return Err(format!("Expected failure for {}, got {:?}", url, outcome));
            }
        }
        Ok(())
    })
}

#[test]
fn fetch_truncated_body_is_failure() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_server(TRUNCATED_BODY).await?;
        let target = single_target(&url)?;
        let client = test_client()?;

        let outcome = fetch_once(&client, &target).await;
        if !outcome.is_failure() || outcome.latency != Duration::ZERO {
            return Err(format!("Expected failure for short body, got {:?}", outcome));
        }
        if outcome != FetchOutcome::failure(Arc::clone(&target.label)) {
            return Err(format!("Unexpected outcome {:?}", outcome));
        }
        Ok(())
    })
}

#[test]
fn dispatch_feeds_every_attempt_to_the_collector() -> Result<(), String> {
    run_async_test(async {
        let good = spawn_server(OK_WITH_REQID).await?;
        let bad = closed_port_url().await?;
        let targets: Vec<Arc<Target>> = parse_targets(&[good.clone(), bad.clone()])
            .map_err(|err| err.to_string())?
            .into_iter()
            .map(Arc::new)
            .collect();
        let plan = TickPlan::new(100, Duration::from_millis(50)).map_err(|err| err.to_string())?;
        let expected = plan.total_attempts(targets.len());
        if expected != 10 {
            return Err(format!("Unexpected attempt count {}", expected));
        }

        let client = test_client()?;
        let (outcome_tx, outcome_rx) = mpsc::channel(1);
        let aggregator = Aggregator::new(BucketScheme::default(), expected, 30);
        let collector = setup_aggregator(aggregator, outcome_rx, Duration::from_secs(10), None);
        let limiter = build_in_flight_limiter(Some(
            PositiveUsize::try_from(2).map_err(|err| err.to_string())?,
        ));

        let dispatched = dispatch(plan, &targets, &client, outcome_tx, limiter).await;
        if dispatched != expected {
            return Err(format!("Dispatched {} of {}", dispatched, expected));
        }

        let result = collector
            .await
            .map_err(|err| format!("join failed: {}", err))?
            .map_err(|err| err.to_string())?;

        if result.global.total() != expected {
            return Err(format!("Collected {} outcomes", result.global.total()));
        }
        let bad_total = result
            .per_target
            .get(bad.as_str())
            .map(|distribution| distribution.total());
        if bad_total != Some(5) {
            return Err(format!("Unexpected failing target total {:?}", bad_total));
        }
        let overflow_key = BucketKey::Threshold(result.max_latency_ms);
        let bad_overflow = result
            .per_target
            .get(bad.as_str())
            .map(|distribution| distribution.get(overflow_key));
        if bad_overflow != Some(5) {
            return Err(format!("Expected 5 relabelled failures, got {:?}", bad_overflow));
        }
        if result.failure_reqids.len() < 5 {
            return Err("Expected failure samples for the refused target".to_owned());
        }
        if result.success_reqids.len() > 5 {
            return Err("Too many success samples".to_owned());
        }
        Ok(())
    })
}
