//! Fuzz target for the service config and entitlements plist readers.
//!
//! Errors are fine; panics are not.
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_plist_parser
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum PlistInput {
    ServiceConfig(Vec<u8>),
    Entitlements(Vec<u8>),
    /// Wrap the payload in an XML plist envelope so the fuzzer reaches value parsing.
    XmlEntitlements(String),
}

fuzz_target!(|input: PlistInput| {
    match input {
        PlistInput::ServiceConfig(bytes) if bytes.len() <= 64 * 1024 => {
            let _ = storeguard_repo::fuzz::parse_service_config(&bytes);
        }
        PlistInput::Entitlements(bytes) if bytes.len() <= 64 * 1024 => {
            let _ = storeguard_repo::fuzz::parse_entitlements(&bytes);
        }
        PlistInput::XmlEntitlements(body) if body.len() <= 16 * 1024 => {
            let doc = format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\">\n<dict>{body}</dict>\n</plist>\n"
            );
            let _ = storeguard_repo::fuzz::parse_entitlements(doc.as_bytes());
        }
        _ => {}
    }
});
