#![no_main]
use libfuzzer_sys::fuzz_target;
use url_merge::pct_enc::{decode, encode, table::COMPONENT};

fuzz_target!(|data: &str| {
    let encoded = encode(data, COMPONENT);
    assert!(encoded.chars().all(|ch| ch == '%' || COMPONENT.allows(ch)));
    assert_eq!(data, decode(&encoded));
});
