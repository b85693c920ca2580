use std::fmt::Write as _;

use super::{BucketRow, RunReport, SampleLink};

const NO_REQID: &str = "<no reqid>";

/// Human readable report, one bucket per line.
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    push_line(&mut out, format_args!("Interval: {}us", report.interval_us));
    push_line(&mut out, format_args!("Attempts: {}", report.total_attempts));
    push_line(&mut out, format_args!("Max latency: {}ms", report.max_latency_ms));
    push_line(&mut out, format_args!("Global:"));
    push_buckets(&mut out, &report.global);

    for target in &report.targets {
        push_line(&mut out, format_args!("{} ({} attempts):", target.url, target.total));
        push_buckets(&mut out, &target.buckets);
    }

    push_samples(&mut out, "Success reqids", &report.success_reqids);
    push_samples(&mut out, "Failed reqids", &report.failure_reqids);

    let elapsed_x100 = report.elapsed_ms.checked_div(10).unwrap_or(0);
    push_line(
        &mut out,
        format_args!(
            "{}.{:02}s elapsed",
            elapsed_x100.checked_div(100).unwrap_or(0),
            elapsed_x100.checked_rem(100).unwrap_or(0)
        ),
    );
    out
}

/// Pretty printed JSON report.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn push_line(out: &mut String, line: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    drop(out.write_fmt(line));
    out.push('\n');
}

fn push_buckets(out: &mut String, rows: &[BucketRow]) {
    if rows.is_empty() {
        push_line(out, format_args!("  (none)"));
    }
    for row in rows {
        push_line(out, format_args!("  {}ms: {}", row.upper_ms, row.count));
    }
}

fn push_samples(out: &mut String, title: &str, samples: &[SampleLink]) {
    push_line(out, format_args!("{} ({}):", title, samples.len()));
    for sample in samples {
        let line = sample.lookup_url.as_deref().unwrap_or(NO_REQID);
        push_line(out, format_args!("  {}", line));
    }
}
