//! Fuzz target for `zerosight.toml` parsing and resolution.
//!
//! Goal: parsing and resolving should **never panic** on any input.
//! Bad profiles, duplicate actors and unknown roles must come back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use zerosight_settings::{Overrides, parse_config_toml, resolve_config};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = parse_config_toml(text) {
            let _ = resolve_config(cfg, Overrides::default());
        }
    }
});
