//! Fuzz target: CurveState JSON deserialization
//!
//! Feeds arbitrary bytes to serde_json to detect panics or unexpected
//! behavior in snapshot deserialization (persistence attack surface).
//! Any state that parses must also hash without panicking.
//!
//! Run: cargo +nightly fuzz run fuzz_state_deserialize -- -max_len=4096

#![no_main]
use libfuzzer_sys::fuzz_target;

use fairlaunch_core::CurveState;

fuzz_target!(|data: &[u8]| {
    // JSON deserialization — must not panic
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(state) = serde_json::from_str::<CurveState>(s) {
            let _ = state.snapshot_digest();
            let _ = state.spot_price();
            let _ = state.market_cap_lamports();
        }
    }

    // Raw bytes — must not panic
    let _: Result<CurveState, _> = serde_json::from_slice(data);
});
