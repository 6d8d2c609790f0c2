//! Fuzz target: engine config TOML parsing and validation
//!
//! Feeds arbitrary strings through the TOML parser and config validation.
//! A config that validates must never make fee_for panic.
//!
//! Run: cargo +nightly fuzz run fuzz_config_parse -- -max_len=1024

#![no_main]
use libfuzzer_sys::fuzz_target;

use fairlaunch_core::EngineConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = toml::from_str::<EngineConfig>(s) {
            if config.validate().is_ok() {
                let _ = config.fee_for(u64::MAX);
                let _ = config.fee_for(0);
            }
        }
    }
});
