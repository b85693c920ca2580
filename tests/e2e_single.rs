mod support_single;

use std::fs;

use tempfile::tempdir;

use support_single::{run_tickload, spawn_http_server};

fn failure_details(output: &std::process::Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_single_text_report() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;

    let output = run_tickload(["-t", "1s", "-r", "20", "--max-reqids", "5", url.as_str()])?;
    if !output.status.success() {
        return Err(failure_details(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Attempts: 20",
        "Global:",
        "Success reqids (5):",
        "Failed reqids (0):",
        "reqid=e2e-reqid",
        "s elapsed",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("Missing {:?}\n{}", expected, failure_details(&output)));
        }
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("100%") {
        return Err(format!("Missing final progress\n{}", failure_details(&output)));
    }
    Ok(())
}

#[test]
fn e2e_single_json_report_two_targets() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let second = format!("{}other", url);

    let output = run_tickload([
        "-t",
        "500ms",
        "-r",
        "20",
        "--output-format",
        "json",
        url.as_str(),
        second.as_str(),
    ])?;
    if !output.status.success() {
        return Err(failure_details(&output));
    }

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid json: {}\n{}", err, failure_details(&output)))?;
    if report.get("total_attempts").and_then(serde_json::Value::as_u64) != Some(20) {
        return Err(format!("Unexpected total_attempts in {}", report));
    }
    let targets = report
        .get("targets")
        .and_then(serde_json::Value::as_array)
        .map(Vec::len);
    if targets != Some(2) {
        return Err(format!("Expected two targets in {}", report));
    }
    Ok(())
}

#[test]
fn e2e_single_config_file() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("probe.toml");
    fs::write(
        &config_path,
        format!(
            "urls = [\"{}\"]\nduration = \"500ms\"\nrate = 10\ntrace_url = \"http://trace.local/?id={{reqid}}\"\n",
            url
        ),
    )
    .map_err(|err| format!("write config failed: {}", err))?;
    let config_arg = config_path.to_string_lossy().into_owned();

    let output = run_tickload(["-c", config_arg.as_str()])?;
    if !output.status.success() {
        return Err(failure_details(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Attempts: 5") || !stdout.contains("http://trace.local/?id=e2e-reqid") {
        return Err(failure_details(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_rejects_invalid_url() -> Result<(), String> {
    let output = run_tickload(["-t", "1s", "-r", "1", "not a url"])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", failure_details(&output)));
    }
    if !output.stdout.is_empty() {
        return Err(format!("Expected no report\n{}", failure_details(&output)));
    }
    Ok(())
}
