use std::sync::Arc;
use std::time::Duration;

use crate::args::{OutputFormat, PositiveUsize, ProbeArgs};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientSettings, Target, TickPlan, parse_targets};
use crate::metrics::BucketScheme;

/// Slack added on top of the scaled run duration before collection gives up.
const COLLECT_GRACE: Duration = Duration::from_secs(30);
const COLLECT_DURATION_FACTOR: u32 = 4;

/// Everything a run needs, validated before the first request goes out.
#[derive(Debug, Clone)]
pub(crate) struct RunPlan {
    pub(crate) targets: Vec<Arc<Target>>,
    pub(crate) ticks: TickPlan,
    pub(crate) total_attempts: u64,
    pub(crate) collect_deadline: Duration,
    pub(crate) scheme: BucketScheme,
    pub(crate) max_reqids: usize,
    pub(crate) client: ClientSettings,
    pub(crate) max_in_flight: Option<PositiveUsize>,
    pub(crate) trace_url: String,
    pub(crate) output_format: OutputFormat,
}

impl RunPlan {
    pub(crate) fn from_args(args: &ProbeArgs) -> AppResult<Self> {
        if args.urls.is_empty() {
            tracing::error!("Missing URL (pass one or more URLs or set urls in config).");
            return Err(AppError::validation(ValidationError::MissingUrls));
        }

        let targets: Vec<Arc<Target>> = parse_targets(&args.urls)?
            .into_iter()
            .map(Arc::new)
            .collect();
        let ticks = TickPlan::new(args.rate.get(), args.duration)?;
        let total_attempts = ticks.total_attempts(targets.len());

        Ok(Self {
            targets,
            ticks,
            total_attempts,
            collect_deadline: args
                .collect_timeout
                .unwrap_or_else(|| default_collect_deadline(args.duration)),
            scheme: BucketScheme::new(&args.thresholds),
            max_reqids: args.max_reqids.get(),
            client: ClientSettings {
                user_agent: args.user_agent.clone(),
                pool_max_idle_per_host: args.pool_max_idle_per_host.get(),
            },
            max_in_flight: args.max_in_flight,
            trace_url: args.trace_url.clone(),
            output_format: args.output_format,
        })
    }
}

pub(crate) const fn default_collect_deadline(duration: Duration) -> Duration {
    duration
        .saturating_mul(COLLECT_DURATION_FACTOR)
        .saturating_add(COLLECT_GRACE)
}
