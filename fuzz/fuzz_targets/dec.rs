#![no_main]
use libfuzzer_sys::fuzz_target;
use url_merge::pct_enc::decode;

fuzz_target!(|data: &str| {
    let _ = decode(data);
});
