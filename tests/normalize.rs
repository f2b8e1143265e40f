use urlbuf::{HostKind, Url};

fn normalized(s: &str) -> String {
    let mut url = Url::parse(s).unwrap();
    url.normalize();
    url.as_str().to_owned()
}

#[test]
fn normalize_basics() {
    // Example from Section 6.2 of RFC 3986.
    assert_eq!(
        normalized("eXAMPLE://a/./b/../b/%63/%7bfoo%7d"),
        "example://a/b/c/%7Bfoo%7D"
    );

    // Lowercase escape hex digits become uppercase.
    assert_eq!(normalized("%3a"), "%3A");

    // Escapes of unreserved octets are decoded.
    assert_eq!(normalized("/%7Efoo%2Dbar"), "/~foo-bar");

    // The scheme is lowercased; the host case is left alone.
    assert_eq!(normalized("HTTP://www.EXAMPLE.com/"), "http://www.EXAMPLE.com/");
}

#[test]
fn normalize_dot_segments() {
    assert_eq!(normalized("http://a/../../../g"), "http://a/g");
    assert_eq!(normalized("http://a/b/c/%2E/%2E./%2e%2E/d"), "http://a/d");
    assert_eq!(normalized("http://a/.."), "http://a/");

    // Dot segments stay in relative references and rootless paths.
    assert_eq!(normalized("foo/../bar"), "foo/../bar");
    assert_eq!(normalized("/foo/../bar"), "/foo/../bar");
    assert_eq!(normalized("foo:bar/../baz"), "foo:bar/../baz");

    // An absolute path of a scheme-ful URL is resolved.
    assert_eq!(normalized("foo:/bar/./../baz"), "foo:/baz");

    // The output must stay parseable: guard a "//" prefix.
    assert_eq!(normalized("foo:/.//x"), "foo:/.//x");
}

#[test]
fn normalize_refreshes_host_kind() {
    let mut url = Url::parse("//%31.2.3.4").unwrap();
    assert_eq!(url.host_kind(), HostKind::Name);
    url.normalize();
    assert_eq!(url.as_str(), "//1.2.3.4");
    assert_eq!(url.host_kind(), HostKind::Ipv4);
}

#[test]
fn normalize_is_idempotent() {
    for s in [
        "eXAMPLE://a/./b/../b/%63/%7bfoo%7d",
        "HTTP://ex%61mple.com:80/%7e/../x?q%3d1#f%72ag",
        "//u%3Ap@h/p",
        "foo:/.//x",
        "a/b/../c",
    ] {
        let once = normalized(s);
        assert_eq!(normalized(&once), once, "normalize({s:?}) must be idempotent");
    }
}

#[test]
fn normalize_preserves_views() {
    let mut url = Url::parse("HTTP://h/a/./b/../c?k=%4a&x=%7e").unwrap();
    url.normalize();
    assert_eq!(url.as_str(), "http://h/a/c?k=J&x=~");
    assert_eq!(url.segments().len(), 2);
    assert_eq!(url.params().len(), 2);
    assert_eq!(Url::parse(url.as_str()).unwrap(), url);
}

#[test]
fn normalize_scheme_only() {
    let mut url = Url::parse("FooBar://X/%7e").unwrap();
    url.normalize_scheme();
    assert_eq!(url.as_str(), "foobar://X/%7e");
}
