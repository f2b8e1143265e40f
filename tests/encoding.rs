use urlbuf::encoding::{
    decode, decode_unchecked, decoded_len, encode, encode_byte,
    encoder::{Path, Query, RegName},
    table, validate, EStr, EString,
};
use urlbuf::ErrorKind;

#[test]
fn encode_rules() {
    assert_eq!(encode("az09-._~", table::REG_NAME), "az09-._~");
    assert_eq!(encode("a b/c", table::REG_NAME), "a%20b%2Fc");
    assert_eq!(encode("a b/c", table::PATH), "a%20b/c");
    assert_eq!(encode("¡Olé!", table::QUERY), "%C2%A1Ol%C3%A9!");
    // A raw '%' is itself encoded.
    assert_eq!(encode("50%", table::REG_NAME), "50%25");
}

#[test]
fn encode_byte_is_uppercase() {
    assert_eq!(encode_byte(0x00), "%00");
    assert_eq!(encode_byte(b' '), "%20");
    assert_eq!(encode_byte(0xAB), "%AB");
    assert_eq!(encode_byte(0xFF), "%FF");
}

#[test]
fn decode_rules() {
    assert_eq!(decode("a%20b").unwrap().as_ref(), b"a b");
    // Either hex digit case is accepted on input.
    assert_eq!(decode("%2f%2F").unwrap().as_ref(), b"//");
    assert_eq!(decode("plain").unwrap().as_ref(), b"plain");

    for bad in ["%", "%1", "%zz", "a%f"] {
        let e = decode(bad).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::BadPercentEscape);
    }

    assert_eq!(decode_unchecked("a%41").as_ref(), b"aA");
}

#[test]
fn decoded_length() {
    assert_eq!(decoded_len(""), 0);
    assert_eq!(decoded_len("abc"), 3);
    assert_eq!(decoded_len("a%20b"), 3);
    assert_eq!(decoded_len("%41%42%43"), 3);
}

#[test]
fn validate_reports_offsets() {
    assert!(validate("a%41", table::REG_NAME).is_ok());

    let e = validate("ab%4", table::REG_NAME).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::BadPercentEscape);
    assert_eq!(e.index(), 2);

    let e = validate("ab/cd", table::REG_NAME).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Invalid);
    assert_eq!(e.index(), 2);
}

#[test]
fn estr_basics() {
    let s = EStr::<Path>::new_or_panic("a%20b");
    assert_eq!(s.as_str(), "a%20b");
    assert_eq!(s.len(), 5);
    assert_eq!(s.decode().as_ref(), b"a b");
    assert_eq!(s.decode_lossy(), "a b");

    assert!(EStr::<Path>::new("a%2").is_none());
    assert!(EStr::<RegName>::new("a/b").is_none());

    let path = EStr::<Path>::new_or_panic("x/y%2Fz/");
    let segs: Vec<&str> = path.split('/').map(EStr::as_str).collect();
    assert_eq!(segs, ["x", "y%2Fz", ""]);
    assert_eq!(
        path.split_once('/').map(|(a, b)| (a.as_str(), b.as_str())),
        Some(("x", "y%2Fz/"))
    );
}

#[test]
fn estring_push() {
    let mut buf = EString::<Query>::new();
    buf.push("key");
    buf.push_byte(b'=');
    buf.push("a value");
    assert_eq!(buf, "key=a%20value");
    assert_eq!(buf.as_estr().decode_lossy(), "key=a value");

    buf.clear();
    assert!(buf.is_empty());
}
