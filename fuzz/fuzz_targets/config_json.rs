#![no_main]

use libfuzzer_sys::fuzz_target;
use tickload::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    let applied = tickload::fuzzing::apply_config_from_json(data);
    if applied.is_ok() {
        if let Some(config) = parsed {
            if let Some(thresholds) = config.thresholds.as_ref() {
                debug_assert!(!thresholds.is_empty());
                debug_assert!(thresholds.windows(2).all(|pair| pair[0] < pair[1]));
            }
            if let Some(trace_url) = config.trace_url.as_ref() {
                debug_assert!(trace_url.contains("{reqid}"));
            }
        }
    }
});
