use std::io::Write;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::http::{self, build_in_flight_limiter};
use crate::metrics::{Aggregator, FetchOutcome, setup_aggregator};
use crate::report::{self, ReportContext, RunReport};

use super::{RunPlan, progress};

/// Runs one probe end to end and prints the report to stdout.
///
/// # Errors
///
/// Returns an error when the client cannot be built, collection does not
/// complete or the report cannot be written.
pub(crate) async fn run_probe(plan: &RunPlan) -> AppResult<()> {
    let report = execute(plan).await?;
    let rendered = match plan.output_format {
        OutputFormat::Text => report::render_text(&report),
        OutputFormat::Json => {
            let mut json = report::render_json(&report)?;
            json.push('\n');
            json
        }
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub(crate) async fn execute(plan: &RunPlan) -> AppResult<RunReport> {
    let client = http::build_client(&plan.client)?;

    info!(
        "Interval {}us, {} ticks x {} targets = {} attempts",
        plan.ticks.interval.as_micros(),
        plan.ticks.ticks,
        plan.targets.len(),
        plan.total_attempts
    );
    debug!("Latency buckets (ms): {:?}", plan.scheme.bounds());

    let (outcome_tx, outcome_rx) = mpsc::channel::<FetchOutcome>(1);
    let (progress_tx, progress_rx) = watch::channel(0u8);
    let progress_handle = progress::setup_progress_printer(progress_rx);

    let aggregator = Aggregator::new(plan.scheme.clone(), plan.total_attempts, plan.max_reqids);
    let collector = setup_aggregator(
        aggregator,
        outcome_rx,
        plan.collect_deadline,
        Some(progress_tx),
    );

    let started_at = Utc::now();
    let run_start = Instant::now();

    let dispatched = http::dispatch(
        plan.ticks,
        &plan.targets,
        &client,
        outcome_tx,
        build_in_flight_limiter(plan.max_in_flight),
    )
    .await;
    info!("Dispatch finished after {} attempts, waiting for results", dispatched);

    let result = collector.await??;
    let elapsed = run_start.elapsed();
    drop(progress_handle.await);

    Ok(report::assemble(
        &result,
        &ReportContext {
            started_at,
            elapsed,
            interval: plan.ticks.interval,
            trace_url: &plan.trace_url,
        },
    ))
}
