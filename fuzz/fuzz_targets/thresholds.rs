#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(bounds) = tickload::fuzzing::parse_thresholds_input(input) {
            debug_assert!(!bounds.is_empty());
            debug_assert!(bounds.windows(2).all(|pair| pair[0] < pair[1]));
        }
        if let Ok(template) = tickload::fuzzing::parse_trace_template_input(input) {
            debug_assert!(template.contains("{reqid}"));
        }
    }
});
