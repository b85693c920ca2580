#![no_main]

use libfuzzer_sys::fuzz_target;
use tickload::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = tickload::fuzzing::apply_config_from_toml(input);
        if applied.is_ok() {
            if let Some(config) = parsed {
                if let Some(rate) = config.rate {
                    debug_assert!(rate >= 1);
                }
                if let Some(thresholds) = config.thresholds.as_ref() {
                    debug_assert!(thresholds.iter().all(|value| *value > 0));
                }
            }
        }
    }
});
