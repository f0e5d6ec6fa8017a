use url_merge::pct_enc::{table::*, *};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=(*)'";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!%40%E8%AF%95%23%24%25st%5E%26%2B%3D(*)'";

#[test]
fn enc_dec() {
    let s = encode(RAW, COMPONENT);
    assert_eq!(ENCODED, s);

    let mut buf = String::from("?");
    encode_to(RAW, COMPONENT, &mut buf);
    assert_eq!(buf, format!("?{}", ENCODED));

    assert_eq!(decode(ENCODED), RAW);
    assert_eq!(decode("%2D%E6%B5%8b"), "-测");
}

#[test]
fn enc_borrows_when_unchanged() {
    assert!(matches!(encode("abc-_.!~*'()", COMPONENT), std::borrow::Cow::Borrowed(_)));
    assert!(matches!(encode("a b", COMPONENT), std::borrow::Cow::Owned(_)));
    assert!(matches!(decode("plain+text"), std::borrow::Cow::Borrowed(_)));
}

#[test]
fn dec_lenient() {
    assert_eq!(decode(""), "");
    assert_eq!(decode("%"), "%");
    assert_eq!(decode("%2"), "%2");
    assert_eq!(decode("%2d%"), "-%");
    assert_eq!(decode("%2d%fg"), "-%fg");
    assert_eq!(decode("%%41%"), "%A%");
    assert_eq!(decode("a+b"), "a+b");

    // Invalid UTF-8 is replaced.
    assert_eq!(decode("%E6%B5"), "\u{FFFD}");
    assert_eq!(decode("x%FFy"), "x\u{FFFD}y");
}

#[test]
fn tables() {
    for x in 0..128u8 {
        let ch = x as char;
        let expected = ch.is_ascii_alphanumeric() || "-_.!~*'()".contains(ch);
        assert_eq!(COMPONENT.allows(ch), expected, "{:?}", ch);
    }
    assert!(!COMPONENT.allows('é'));
    assert!(!COMPONENT.allows('%'));

    assert_eq!(UNRESERVED.or(Table::new(b"*)('!")), COMPONENT);
    for ch in "0123456789ABCDEFabcdef".chars() {
        assert!(HEXDIG.allows(ch));
    }
    assert!(!HEXDIG.allows('g'));
}

#[test]
#[should_panic]
fn table_rejects_percent() {
    let _ = Table::new(b"a%");
}
