use crate::bnf::{parse_all, Cursor};
use crate::encoding::table;
use crate::error::{err, Result};

/// Counts the segments of an encoded path.
///
/// Under `path-abempty` and `path-absolute` every `'/'` introduces one
/// segment; a rootless path has one segment more than it has slashes.
/// The empty path has no segments.
pub(crate) fn count_segments(path: &[u8]) -> usize {
    if path.is_empty() {
        return 0;
    }
    let slashes = path.iter().filter(|&&x| x == b'/').count();
    if path[0] == b'/' {
        slashes
    } else {
        slashes + 1
    }
}

/// `path-abempty = *( "/" segment )`
///
/// The path style required when an authority is present.
pub(crate) fn path_abempty(cur: &mut Cursor<'_>) -> Result<()> {
    let start = cur.pos();
    cur.scan(table::PATH)?;
    let taken = cur.taken_since(start);
    if !taken.is_empty() && taken[0] != b'/' {
        err!(Invalid, start);
    }
    Ok(())
}

/// `path-absolute / path-rootless / path-empty`
///
/// The path styles allowed when a scheme is present but an authority
/// is not. A leading `"//"` is rejected since it would parse back as
/// an authority.
pub(crate) fn path_general(cur: &mut Cursor<'_>) -> Result<()> {
    let start = cur.pos();
    cur.scan(table::PATH)?;
    if cur.taken_since(start).starts_with(b"//") {
        err!(Invalid, start);
    }
    Ok(())
}

/// `path-absolute / path-noscheme / path-empty`
///
/// The path styles allowed when neither a scheme nor an authority is
/// present. The first segment of a rootless path must not contain a
/// colon, which would make it parse back as a scheme.
pub(crate) fn path_noscheme(cur: &mut Cursor<'_>) -> Result<()> {
    let start = cur.pos();
    if cur.peek() != Some(b'/') {
        cur.scan(table::SEGMENT_NZ_NC)?;
        if cur.peek() == Some(b':') {
            err!(Invalid, cur.pos());
        }
    }
    cur.scan(table::PATH)?;
    if cur.taken_since(start).starts_with(b"//") {
        err!(Invalid, start);
    }
    Ok(())
}

/// Validates an encoded path in the grammar context given by the
/// presence of a scheme and an authority, yielding the segment count.
pub(crate) fn check_path(s: &[u8], has_scheme: bool, has_auth: bool) -> Result<usize> {
    parse_all(s, |cur| {
        if has_auth {
            path_abempty(cur)
        } else if has_scheme {
            path_general(cur)
        } else {
            path_noscheme(cur)
        }
    })?;
    Ok(count_segments(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_counts() {
        assert_eq!(count_segments(b""), 0);
        assert_eq!(count_segments(b"/"), 1);
        assert_eq!(count_segments(b"/a"), 1);
        assert_eq!(count_segments(b"/a/"), 2);
        assert_eq!(count_segments(b"/a/b"), 2);
        assert_eq!(count_segments(b"a/b/c"), 3);
        assert_eq!(count_segments(b"a"), 1);
    }

    #[test]
    fn style_rules() {
        assert!(check_path(b"", true, true).is_ok());
        assert!(check_path(b"/a/b", true, true).is_ok());
        assert!(check_path(b"not/absolute", true, true).is_err());

        assert!(check_path(b"rootless:ok", true, false).is_ok());
        assert!(check_path(b"//bad", true, false).is_err());

        assert!(check_path(b"a:b", false, false).is_err());
        assert!(check_path(b"a/b:c", false, false).is_ok());
        assert!(check_path(b"/a:b", false, false).is_ok());
    }
}
