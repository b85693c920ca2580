#![no_main]

use libfuzzer_sys::fuzz_target;
use tickload::metrics::BucketKey;

fuzz_target!(|data: &[u8]| {
    if let Some(reqid) = tickload::fuzzing::parse_reqid_input(data) {
        debug_assert!(!reqid.is_empty());
    }
    if let Some(bytes) = data.get(..8) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        let latency_ms = u64::from_le_bytes(raw);
        match tickload::fuzzing::bucket_for_input(latency_ms) {
            BucketKey::Threshold(bound) => debug_assert!(latency_ms < bound),
            BucketKey::Overflow => debug_assert!(latency_ms >= 300),
        }
    }
});
