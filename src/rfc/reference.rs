use super::{authority, path, query, scheme};
use crate::bnf::{attempt, parse_all, Cursor};
use crate::error::{ErrorKind, Result};
use crate::parts::{idx, HostKind, Part, Parts};

/// `URI-reference = URI / relative-ref`
///
/// Parses a complete URI reference and yields the component index,
/// with the derived host, port, segment and parameter metadata filled
/// in. Fails with the kind and index of the first offending byte.
pub(crate) fn parse_uri_reference(s: &[u8]) -> Result<Parts> {
    let mut parts = parse_all(s, uri_reference)?;
    parts.refresh_decoded(s);
    Ok(parts)
}

/// ```text
/// URI          = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
/// relative-ref = relative-part [ "?" query ] [ "#" fragment ]
/// ```
fn uri_reference(cur: &mut Cursor<'_>) -> Result<Parts> {
    let mut parts = Parts::new();

    // `scheme ":"` selects a URI; anything else is a relative-ref.
    let has_scheme = match attempt(cur, scheme::scheme_colon) {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::Mismatch => false,
        Err(e) => return Err(e),
    };
    parts.offset[idx(Part::User)] = cur.pos();

    // `hier-part` / `relative-part`
    let has_auth = cur.eat_str(b"//");
    if has_auth {
        authority::authority(cur, &mut parts)?;
    } else {
        let p = cur.pos();
        parts.offset[idx(Part::Pass)] = p;
        parts.offset[idx(Part::Host)] = p;
        parts.offset[idx(Part::Port)] = p;
        parts.host = HostKind::None;
    }
    parts.offset[idx(Part::Path)] = cur.pos();

    if has_auth {
        path::path_abempty(cur)?;
    } else if has_scheme {
        path::path_general(cur)?;
    } else {
        path::path_noscheme(cur)?;
    }
    parts.nseg = path::count_segments(cur.taken_since(parts.offset[idx(Part::Path)]));
    parts.offset[idx(Part::Query)] = cur.pos();

    if cur.eat(b'?') {
        query::query(cur)?;
        parts.nparam = query::count_params(cur.taken_since(parts.offset[idx(Part::Query)] + 1));
    }
    parts.offset[idx(Part::Frag)] = cur.pos();

    if cur.eat(b'#') {
        query::fragment(cur)?;
    }
    parts.offset[idx(Part::End)] = cur.pos();

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(s: &str) -> [usize; Part::COUNT] {
        parse_uri_reference(s.as_bytes()).unwrap().offset
    }

    #[test]
    fn full_url() {
        let parts = parse_uri_reference(b"http://user:pw@example.com:8080/a/b?x=1&y=2#f").unwrap();
        assert_eq!(parts.offset, [0, 5, 11, 15, 26, 31, 35, 43, 45]);
        assert_eq!(parts.host, HostKind::Name);
        assert_eq!(parts.port_number, 8080);
        assert_eq!(parts.nseg, 2);
        assert_eq!(parts.nparam, 2);
    }

    #[test]
    fn minimal_forms() {
        assert_eq!(offsets(""), [0; 9]);
        assert_eq!(offsets("x:"), [0, 2, 2, 2, 2, 2, 2, 2, 2]);
        assert_eq!(offsets("//host"), [0, 0, 2, 2, 6, 6, 6, 6, 6]);
        assert_eq!(offsets("#f"), [0, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(offsets("?q"), [0, 0, 0, 0, 0, 0, 0, 2, 2]);
    }

    #[test]
    fn empty_authority() {
        let parts = parse_uri_reference(b"///path").unwrap();
        assert_eq!(parts.host, HostKind::Name);
        assert_eq!(parts.offset[idx(Part::Path)], 2);
        assert_eq!(parts.nseg, 1);
    }

    #[test]
    fn decoded_lengths() {
        let parts = parse_uri_reference(b"//ho%20st/a%20b%20c").unwrap();
        assert_eq!(parts.decoded[idx(Part::Host)], 5);
        assert_eq!(parts.decoded[idx(Part::Path)], 6);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(
            parse_uri_reference(b"http://example.com/ x")
                .unwrap_err()
                .kind(),
            ErrorKind::Invalid
        );
        assert_eq!(
            parse_uri_reference(b"a:b:c<")
                .unwrap_err()
                .index(),
            5
        );
    }
}
