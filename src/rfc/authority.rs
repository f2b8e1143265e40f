use super::ip;
use crate::bnf::{alt2, opt, Cursor};
use crate::encoding::{table, validate};
use crate::error::{err, Error, Result};
use crate::parts::{idx, HostKind, Part, Parts};

/// `authority = [ userinfo "@" ] host [ ":" port ]`
///
/// The cursor is positioned right after the `"//"`. A single
/// left-to-right scan locates the first `'@'` before the next `'/'`,
/// `'?'` or `'#'`; the span before it, if any, is the userinfo. The
/// offsets of the pass, host and port components and the host and port
/// metadata are written to `parts`.
pub(crate) fn authority(cur: &mut Cursor<'_>, parts: &mut Parts) -> Result<()> {
    let start = cur.pos();

    let mut at = None;
    let mut j = 0;
    loop {
        match cur.peek_at(j) {
            None | Some(b'/' | b'?' | b'#') => break,
            Some(b'@') => {
                if at.is_none() {
                    at = Some(j);
                }
                j += 1;
            }
            Some(_) => j += 1,
        }
    }

    if let Some(at) = at {
        // `userinfo = user [ ":" password ]`
        let ui = &cur.rest()[..at];
        let colon = ui.iter().position(|&x| x == b':');
        let user_end = colon.unwrap_or(at);

        check_at(&ui[..user_end], table::USER, start)?;
        parts.offset[idx(Part::Pass)] = start + user_end;
        if let Some(colon) = colon {
            check_at(&ui[colon + 1..], table::PASSWORD, start + colon + 1)?;
        }
        cur.set_pos(start + at + 1);
    } else {
        parts.offset[idx(Part::Pass)] = start;
    }

    parts.offset[idx(Part::Host)] = cur.pos();
    host(cur, parts)?;

    parts.offset[idx(Part::Port)] = cur.pos();
    if cur.eat(b':') {
        let mark = cur.pos();
        cur.scan(table::PORT)?;
        parts.port_number = parse_port(cur.taken_since(mark)).unwrap_or(0);
    } else {
        parts.port_number = 0;
    }

    // The authority must end at a path, query or fragment boundary.
    match cur.peek() {
        None | Some(b'/' | b'?' | b'#') => Ok(()),
        Some(_) => err!(Invalid, cur.pos()),
    }
}

fn check_at(s: &[u8], table: crate::encoding::Table, base: usize) -> Result<()> {
    validate(s, table).map_err(|e| Error::new(e.kind(), base + e.index()))
}

/// `host = IP-literal / IPv4address / reg-name`
///
/// Dispatches on the first byte: `'['` selects an IP literal;
/// otherwise an IPv4 address is tried speculatively and rejected
/// without committing when trailing reg-name bytes follow. Writes the
/// resolved host kind and address bytes to `parts`.
pub(crate) fn host(cur: &mut Cursor<'_>, parts: &mut Parts) -> Result<()> {
    parts.ip_addr = [0; 16];

    if cur.peek() == Some(b'[') {
        return ip_literal(cur, parts);
    }

    if let Some(addr) = opt(cur, ip::v4) {
        // Trailing name bytes, as in "1.2.3.4x", make a reg-name.
        if cur.read(table::REG_NAME)? {
            parts.host = HostKind::Name;
        } else {
            parts.host = HostKind::Ipv4;
            parts.ip_addr[..4].copy_from_slice(&addr);
        }
        return Ok(());
    }

    cur.scan(table::REG_NAME)?;
    parts.host = HostKind::Name;
    Ok(())
}

/// `IP-literal = "[" ( IPv6address / IPvFuture ) "]"`
fn ip_literal(cur: &mut Cursor<'_>, parts: &mut Parts) -> Result<()> {
    let open = cur.pos();
    cur.skip(1);

    enum Lit {
        V6([u8; 16]),
        Future,
    }

    let lit = alt2(
        cur,
        |c| ip::v6(c).map(Lit::V6),
        |c| ip::ipv_future(c).map(|()| Lit::Future),
    );
    match lit {
        Ok(Lit::V6(addr)) => {
            parts.host = HostKind::Ipv6;
            parts.ip_addr = addr;
        }
        Ok(Lit::Future) => parts.host = HostKind::IpvFuture,
        Err(_) => err!(BadHost, open),
    }

    if !cur.eat(b']') {
        err!(BadHost, open);
    }
    Ok(())
}

/// Parses `*DIGIT` into a port number, or `None` when the digits are
/// absent or overflow `u16`.
pub(crate) fn parse_port(s: &[u8]) -> Option<u16> {
    if s.is_empty() {
        return None;
    }
    let mut v: u32 = 0;
    for &x in s {
        v = v * 10 + (x - b'0') as u32;
        if v > u16::MAX as u32 {
            return None;
        }
    }
    Some(v as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnf::parse_all;
    use crate::ErrorKind;

    fn parse_auth(s: &str) -> Result<Parts> {
        parse_all(s.as_bytes(), |cur| {
            let mut parts = Parts::new();
            parts.offset[idx(Part::User)] = 0;
            authority(cur, &mut parts)?;
            parts.offset[idx(Part::Path)] = cur.pos();
            Ok(parts)
        })
    }

    #[test]
    fn splits_userinfo_host_port() {
        let parts = parse_auth("user:pw@example.com:8080").unwrap();
        assert_eq!(parts.offset[idx(Part::Pass)], 4);
        assert_eq!(parts.offset[idx(Part::Host)], 8);
        assert_eq!(parts.offset[idx(Part::Port)], 19);
        assert_eq!(parts.port_number, 8080);
        assert_eq!(parts.host, HostKind::Name);
    }

    #[test]
    fn host_dispatch() {
        assert_eq!(parse_auth("1.2.3.4").unwrap().host, HostKind::Ipv4);
        assert_eq!(parse_auth("1.2.3.4x").unwrap().host, HostKind::Name);
        assert_eq!(parse_auth("01.2.3.4").unwrap().host, HostKind::Name);
        assert_eq!(parse_auth("[::1]").unwrap().host, HostKind::Ipv6);
        assert_eq!(parse_auth("[v1.x]").unwrap().host, HostKind::IpvFuture);
        assert_eq!(parse_auth("").unwrap().host, HostKind::Name);

        assert_eq!(
            parse_auth("[::1::]").unwrap_err().kind(),
            ErrorKind::BadHost
        );
        assert_eq!(parse_auth("[::1").unwrap_err().kind(), ErrorKind::BadHost);
    }

    #[test]
    fn port_rules() {
        assert_eq!(parse_auth("h:").unwrap().port_number, 0);
        assert_eq!(parse_auth("h:0").unwrap().port_number, 0);
        assert_eq!(parse_auth("h:65535").unwrap().port_number, 65535);
        // Out of range is detected lazily.
        assert_eq!(parse_auth("h:65536").unwrap().port_number, 0);
        assert!(parse_auth("h:80a").is_err());
    }
}
