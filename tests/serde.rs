#![cfg(feature = "serde")]

use urlbuf::Url;

#[test]
fn round_trip() {
    let url = Url::parse("http://user@example.com:8080/a%20b?x=1#f").unwrap();
    let json = serde_json::to_string(&url).unwrap();
    assert_eq!(json, "\"http://user@example.com:8080/a%20b?x=1#f\"");

    let back: Url = serde_json::from_str(&json).unwrap();
    assert_eq!(back, url);
}

#[test]
fn rejects_invalid() {
    assert!(serde_json::from_str::<Url>("\"http://bad host\"").is_err());
    assert!(serde_json::from_str::<Url>("42").is_err());
}
