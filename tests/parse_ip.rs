use std::net::{Ipv4Addr, Ipv6Addr};
use urlbuf::{HostKind, Url};

fn parse_v4(s: &str) -> Option<Ipv4Addr> {
    let url = Url::parse(&format!("//{s}")).ok()?;
    url.ipv4_address()
}

fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    let url = Url::parse(&format!("//[{s}]")).ok()?;
    url.ipv6_address()
}

#[test]
fn v4() {
    assert_eq!(parse_v4("127.0.0.1"), Some(Ipv4Addr::new(127, 0, 0, 1)));
    assert_eq!(parse_v4("0.0.0.0"), Some(Ipv4Addr::new(0, 0, 0, 0)));
    assert_eq!(
        parse_v4("255.255.255.255"),
        Some(Ipv4Addr::new(255, 255, 255, 255))
    );
    assert_eq!(parse_v4("32.64.128.1"), Some(Ipv4Addr::new(32, 64, 128, 1)));
}

#[test]
fn v4_host_falls_back_to_reg_name() {
    // Not IPv4 addresses, but valid registered names.
    for s in [
        "01.2.3.4",
        "1.2.3.04",
        "1.2.3.256",
        "1.2.3.300",
        "1.2.3",
        "1.2.3.",
        "1.2.3.4.5",
        "1.2.3.4x",
    ] {
        let url = Url::parse(&format!("//{s}")).unwrap();
        assert_eq!(url.host_kind(), HostKind::Name, "{s:?} must be a reg-name");
        assert_eq!(url.ipv4_address(), None);
    }
}

#[test]
fn v6() {
    assert_eq!(parse_v6("::"), Some(Ipv6Addr::UNSPECIFIED));
    assert_eq!(parse_v6("::1"), Some(Ipv6Addr::LOCALHOST));
    assert_eq!(
        parse_v6("1:02:003:0004:0005:006:07:8"),
        Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8))
    );
    assert_eq!(
        parse_v6("2001:db8::7"),
        Some(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 7))
    );
    assert_eq!(
        parse_v6("fe80::1:2:3"),
        Some(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 1, 2, 3))
    );
}

#[test]
fn v6_embedded_v4() {
    let addr = parse_v6("::ffff:1.2.3.4").unwrap();
    assert_eq!(
        addr.octets(),
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 1, 2, 3, 4]
    );
    assert_eq!(u128::from(addr) as u64, 0x0000_ffff_0102_0304);

    assert_eq!(
        parse_v6("64:ff9b::192.0.2.33"),
        Some(Ipv6Addr::new(0x64, 0xff9b, 0, 0, 0, 0, 0xc000, 0x221))
    );
}

#[test]
fn v6_rejections() {
    for s in [
        "",
        ":",
        ":::",
        "1:2:3:4:5:6:7",
        "1:2:3:4:5:6:7:8:9",
        "1::2::3",
        "1:",
        ":1",
        "12345::",
        "g::",
        "::1.2.3.256",
        "::01.2.3.4",
        "1:2:3:4:5:6:7:1.2.3.4",
    ] {
        assert!(
            Url::parse(&format!("//[{s}]")).is_err(),
            "{s:?} must be rejected"
        );
    }
}

#[test]
fn scenario_ipv6_bytes() {
    let url = Url::parse("foo://[2001:db8::1]:80").unwrap();
    let addr = url.ipv6_address().unwrap();
    assert_eq!(
        addr.octets(),
        [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01]
    );
    assert_eq!(url.port_number(), 80);
}

#[test]
fn ipv_future() {
    let url = Url::parse("//[v1F.addr:x]").unwrap();
    assert_eq!(url.host_kind(), HostKind::IpvFuture);
    assert_eq!(url.ipv_future(), Some("v1F.addr:x"));
    assert_eq!(url.ipv4_address(), None);
    assert_eq!(url.ipv6_address(), None);
}
