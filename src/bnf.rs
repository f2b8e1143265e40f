//! A minimal parser-combinator kit for the RFC 3986 grammar.
//!
//! A matcher is a function that consumes bytes from a [`Cursor`] and
//! reports success or failure with an [`Error`]. The combinators
//! below enforce the no-consume-on-failure rule: a matcher wrapped in
//! [`attempt`], [`opt`] or [`alt2`] leaves the cursor where it found
//! it on failure, so alternatives can be tried without saving state
//! explicitly.

use crate::encoding::{is_hexdig_pair, Table};
use crate::error::{err, Error, ErrorKind, Result};

/// A byte cursor over an input being matched.
///
/// The invariant holds that `pos <= len`, where `pos` is non-decreasing
/// except across an explicit rewind.
#[derive(Clone, Copy)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        debug_assert!(pos <= self.bytes.len());
        self.pos = pos;
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    /// Returns the bytes from the current position to the end.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    /// Advances past the next `n` bytes, which must exist.
    pub(crate) fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.bytes.len());
    }

    /// Consumes the given byte if it comes next.
    pub(crate) fn eat(&mut self, x: u8) -> bool {
        if self.peek() == Some(x) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the given bytes if they come next.
    pub(crate) fn eat_str(&mut self, s: &[u8]) -> bool {
        if self.bytes[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Returns the bytes between a mark and the current position.
    pub(crate) fn taken_since(&self, mark: usize) -> &'a [u8] {
        &self.bytes[mark..self.pos]
    }

    /// Advances over bytes allowed by the table, validating escapes.
    ///
    /// Stops without error at the first byte the table does not allow;
    /// a malformed escape fails with [`BadPercentEscape`] at the `'%'`.
    ///
    /// [`BadPercentEscape`]: ErrorKind::BadPercentEscape
    pub(crate) fn scan(&mut self, table: Table) -> Result<()> {
        let s = self.bytes;
        let mut i = self.pos;
        while i < s.len() {
            let x = s[i];
            if table.allows_pct_encoded() && x == b'%' {
                if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                    err!(BadPercentEscape, i);
                }
                i += 3;
            } else if table.allows(x) {
                i += 1;
            } else {
                break;
            }
        }
        self.pos = i;
        Ok(())
    }

    /// Like [`scan`](Self::scan), returning whether any byte was read.
    pub(crate) fn read(&mut self, table: Table) -> Result<bool> {
        let start = self.pos;
        self.scan(table)?;
        Ok(self.pos != start)
    }
}

/// Runs a matcher, rewinding the cursor on failure.
pub(crate) fn attempt<'a, T>(
    cur: &mut Cursor<'a>,
    f: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
) -> Result<T> {
    let mark = cur.pos;
    let res = f(cur);
    if res.is_err() {
        cur.pos = mark;
    }
    res
}

/// Matches zero or one occurrence. Never fails.
pub(crate) fn opt<'a, T>(
    cur: &mut Cursor<'a>,
    f: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
) -> Option<T> {
    attempt(cur, f).ok()
}

fn recoverable(e: Error) -> bool {
    matches!(e.kind(), ErrorKind::Mismatch | ErrorKind::NeedMore)
}

/// Matches the first alternative, or the second if the first fails
/// recoverably.
///
/// A failure with [`Mismatch`] or [`NeedMore`] rewinds and tries the
/// next alternative; any other kind is a committed failure and
/// propagates.
///
/// [`Mismatch`]: ErrorKind::Mismatch
/// [`NeedMore`]: ErrorKind::NeedMore
pub(crate) fn alt2<'a, T>(
    cur: &mut Cursor<'a>,
    f: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
    g: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
) -> Result<T> {
    match attempt(cur, f) {
        Err(e) if recoverable(e) => attempt(cur, g),
        res => res,
    }
}

/// Matches a repeated production and yields the element count.
///
/// The element matcher receives the zero-based index of the element
/// being matched, so the begin element and the following elements
/// (typically separator-prefixed) can match different rules. The
/// repetition ends at the first element that fails recoverably, or
/// after `max` elements. Fails with [`Mismatch`] when fewer than `min`
/// elements match.
///
/// [`Mismatch`]: ErrorKind::Mismatch
pub(crate) fn repeat<'a>(
    cur: &mut Cursor<'a>,
    min: usize,
    max: usize,
    mut element: impl FnMut(&mut Cursor<'a>, usize) -> Result<()>,
) -> Result<usize> {
    let mut count = 0;
    while count < max {
        match attempt(cur, |c| element(c, count)) {
            Ok(()) => count += 1,
            Err(e) if recoverable(e) => break,
            Err(e) => return Err(e),
        }
    }
    if count < min {
        err!(Mismatch, cur.pos());
    }
    Ok(count)
}

/// Runs a matcher over the whole input, requiring full consumption.
///
/// Trailing bytes fail with [`Invalid`] at the first unconsumed byte.
///
/// [`Invalid`]: ErrorKind::Invalid
pub(crate) fn parse_all<'a, T>(
    bytes: &'a [u8],
    f: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
) -> Result<T> {
    let mut cur = Cursor::new(bytes);
    let out = f(&mut cur)?;
    if !cur.is_at_end() {
        err!(Invalid, cur.pos());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::table;

    fn lit(x: u8) -> impl Fn(&mut Cursor<'_>) -> Result<()> {
        move |cur| {
            if cur.eat(x) {
                Ok(())
            } else {
                err!(Mismatch, cur.pos())
            }
        }
    }

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new(b"ab");
        assert_eq!(cur.peek(), Some(b'a'));
        assert!(cur.eat(b'a'));
        assert!(!cur.eat(b'a'));
        assert!(cur.eat_str(b"b"));
        assert!(cur.is_at_end());
    }

    #[test]
    fn attempt_rewinds() {
        let mut cur = Cursor::new(b"ax");
        let res: Result<()> = attempt(&mut cur, |c| {
            c.eat(b'a');
            err!(Mismatch, c.pos())
        });
        assert!(res.is_err());
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn alt_tries_in_order() {
        let mut cur = Cursor::new(b"b");
        alt2(&mut cur, lit(b'a'), lit(b'b')).unwrap();
        assert!(cur.is_at_end());
    }

    #[test]
    fn repeat_counts_elements() {
        // 1*( "a" ) *( "." "a" )
        let mut cur = Cursor::new(b"a.a.a");
        let n = repeat(&mut cur, 1, usize::MAX, |c, i| {
            if i > 0 {
                lit(b'.')(c)?;
            }
            lit(b'a')(c)
        })
        .unwrap();
        assert_eq!(n, 3);

        let mut cur = Cursor::new(b"x");
        assert!(repeat(&mut cur, 1, usize::MAX, |c, _| lit(b'a')(c)).is_err());
    }

    #[test]
    fn scan_stops_at_disallowed() {
        let mut cur = Cursor::new(b"ab%41:");
        cur.scan(table::REG_NAME).unwrap();
        assert_eq!(cur.pos(), 5);
        assert_eq!(cur.peek(), Some(b':'));

        let mut cur = Cursor::new(b"a%4");
        assert!(cur.scan(table::REG_NAME).is_err());
        assert_eq!(cur.pos(), 0);
    }
}
