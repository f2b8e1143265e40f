use urlbuf::{ErrorKind, Url};

#[test]
fn segment_iteration() {
    let url = Url::parse("http://h/a/b%20c/").unwrap();
    let segments = url.segments();
    assert_eq!(segments.len(), 3);
    assert!(segments.is_absolute());

    let encoded: Vec<&str> = segments.iter().map(|s| s.as_str()).collect();
    assert_eq!(encoded, ["a", "b%20c", ""]);
    assert_eq!(segments.get(1).unwrap().decode_lossy(), "b c");
    assert_eq!(segments.get(3), None);

    let back: Vec<&str> = segments.iter().rev().map(|s| s.as_str()).collect();
    assert_eq!(back, ["", "b%20c", "a"]);

    assert_eq!(Url::parse("//h").unwrap().segments().len(), 0);
    assert_eq!(Url::parse("/").unwrap().segments().len(), 1);
}

#[test]
fn erase_middle_segment() {
    let mut url = Url::parse("a/b/c").unwrap();
    url.segments_mut().erase(1).unwrap();
    assert_eq!(url.as_str(), "a/c");
    assert_eq!(url.segments().len(), 2);
}

#[test]
fn segment_edits() {
    let mut url = Url::parse("http://h/a/c").unwrap();

    url.segments_mut().insert(1, "b x").unwrap();
    assert_eq!(url.as_str(), "http://h/a/b%20x/c");

    url.segments_mut().replace(1, "b").unwrap();
    assert_eq!(url.as_str(), "http://h/a/b/c");

    url.segments_mut().insert_encoded(3, "d%2Fe").unwrap();
    assert_eq!(url.as_str(), "http://h/a/b/c/d%2Fe");
    assert!(url.segments_mut().insert_encoded(0, "a/b").is_err());

    url.segments_mut().erase_range(1..3).unwrap();
    assert_eq!(url.as_str(), "http://h/a/d%2Fe");

    url.segments_mut().erase_range(0..2).unwrap();
    assert_eq!(url.as_str(), "http://h");
    assert_eq!(url.segments().len(), 0);

    // Inserting into an empty path under an authority roots the path.
    url.segments_mut().insert(0, "x").unwrap();
    assert_eq!(url.as_str(), "http://h/x");
}

#[test]
fn segment_edits_keep_relative_grammar() {
    // A colon moving into the first segment of a relative rootless
    // path is encoded on raw insert and rejected on encoded insert.
    let mut url = Url::parse("a/b").unwrap();
    url.segments_mut().insert(0, "x:y").unwrap();
    assert_eq!(url.as_str(), "x%3Ay/a/b");

    let mut url = Url::parse("a/b").unwrap();
    let e = url.segments_mut().replace_encoded(0, "x:y").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Invalid);
    assert_eq!(url.as_str(), "a/b");
}

#[test]
fn param_iteration() {
    let url = Url::parse("?a=1&a=2&b=").unwrap();
    let params = url.params();
    assert_eq!(params.len(), 3);
    assert_eq!(params.count("a"), 2);
    assert_eq!(params.get("a"), Some("1".into()));
    assert_eq!(params.get("b"), Some(String::new()));
    assert_eq!(params.get("c"), None);
    assert!(params.contains("b"));
    assert!(!params.contains("c"));

    let url = Url::parse("?flag&k=v%20w").unwrap();
    let all: Vec<(String, String)> = url.params().iter().map(|p| (p.key(), p.value())).collect();
    assert_eq!(all, [("flag".into(), String::new()), ("k".into(), "v w".into())]);
    assert_eq!(url.params().get_index(0).unwrap().encoded_value(), None);

    assert_eq!(Url::parse("x").unwrap().params().len(), 0);
    assert_eq!(Url::parse("?").unwrap().params().len(), 1);
}

#[test]
fn param_edits() {
    let mut url = Url::parse("http://h/p").unwrap();

    url.params_mut().append("k", Some("v 1"));
    assert_eq!(url.as_str(), "http://h/p?k=v%201");

    url.params_mut().append("flag", None);
    assert_eq!(url.as_str(), "http://h/p?k=v%201&flag");

    // '=' is a value character; only the key needs it encoded.
    url.params_mut().insert(1, "a&b", Some("c=d"));
    assert_eq!(url.as_str(), "http://h/p?k=v%201&a%26b=c=d&flag");

    url.params_mut().replace(1, "a", Some("b"));
    assert_eq!(url.as_str(), "http://h/p?k=v%201&a=b&flag");

    url.params_mut().erase(0);
    assert_eq!(url.as_str(), "http://h/p?a=b&flag");

    url.params_mut().erase_range(0..2);
    assert_eq!(url.as_str(), "http://h/p");
    assert!(!url.has_query());

    url.params_mut().insert_encoded(0, "x", Some("1")).unwrap();
    assert_eq!(url.as_str(), "http://h/p?x=1");
    assert!(url.params_mut().insert_encoded(0, "a&b", None).is_err());
}

#[test]
fn param_set_and_remove() {
    let mut url = Url::parse("?a=1&b=2&a=3").unwrap();

    url.params_mut().set("a", Some("9"));
    assert_eq!(url.as_str(), "?a=9&b=2");

    url.params_mut().set("c", None);
    assert_eq!(url.as_str(), "?a=9&b=2&c");

    assert_eq!(url.params_mut().remove("a"), 1);
    assert_eq!(url.as_str(), "?b=2&c");

    assert_eq!(url.params_mut().remove("nope"), 0);
    assert_eq!(url.params_mut().remove("b") + url.params_mut().remove("c"), 2);
    assert_eq!(url.as_str(), "");
    assert!(!url.has_query());
}

#[test]
fn views_agree_with_reparse() {
    let mut url = Url::parse("http://h/a/b/c?x=1&y=2").unwrap();
    url.segments_mut().erase(0).unwrap();
    url.params_mut().append("z", Some("3"));
    url.segments_mut().insert(2, "d").unwrap();
    url.params_mut().erase(1);

    let reparsed = Url::parse(url.as_str()).unwrap();
    assert_eq!(reparsed.segments().len(), url.segments().len());
    assert_eq!(reparsed.params().len(), url.params().len());
    assert_eq!(reparsed, url);
}
