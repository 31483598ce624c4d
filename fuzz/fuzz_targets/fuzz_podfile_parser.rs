//! Fuzz target for the Podfile declaration scanner.
//!
//! The scanner must never panic, whatever the text (unbalanced quotes, multi-byte
//! characters right after `pod`, stray `#`).
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_podfile_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let text = String::from_utf8_lossy(data);
    let names = storeguard_repo::fuzz::parse_podfile(&text);
    // Empty names are never reported.
    assert!(names.iter().all(|n| !n.is_empty()));
});
