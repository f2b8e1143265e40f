//! Percent-encoding utilities.

mod estr;
pub mod table;

pub use estr::{encoder, EStr, EString, Encoder, Split};
pub use table::Table;

use crate::error::{err, Result};
use std::borrow::Cow;

pub(crate) const fn is_hexdig(x: u8) -> bool {
    matches!(x, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) && is_hexdig(lo)
}

const fn hex_value(x: u8) -> u8 {
    match x {
        b'0'..=b'9' => x - b'0',
        b'A'..=b'F' => x - b'A' + 10,
        _ => x - b'a' + 10,
    }
}

/// The octet value of a validated `%HH` escape's hex digits.
pub(crate) const fn hex_pair_value(hi: u8, lo: u8) -> u8 {
    (hex_value(hi) << 4) | hex_value(lo)
}

const TRIPLETS: &str = concat!(
    "%00%01%02%03%04%05%06%07%08%09%0A%0B%0C%0D%0E%0F",
    "%10%11%12%13%14%15%16%17%18%19%1A%1B%1C%1D%1E%1F",
    "%20%21%22%23%24%25%26%27%28%29%2A%2B%2C%2D%2E%2F",
    "%30%31%32%33%34%35%36%37%38%39%3A%3B%3C%3D%3E%3F",
    "%40%41%42%43%44%45%46%47%48%49%4A%4B%4C%4D%4E%4F",
    "%50%51%52%53%54%55%56%57%58%59%5A%5B%5C%5D%5E%5F",
    "%60%61%62%63%64%65%66%67%68%69%6A%6B%6C%6D%6E%6F",
    "%70%71%72%73%74%75%76%77%78%79%7A%7B%7C%7D%7E%7F",
    "%80%81%82%83%84%85%86%87%88%89%8A%8B%8C%8D%8E%8F",
    "%90%91%92%93%94%95%96%97%98%99%9A%9B%9C%9D%9E%9F",
    "%A0%A1%A2%A3%A4%A5%A6%A7%A8%A9%AA%AB%AC%AD%AE%AF",
    "%B0%B1%B2%B3%B4%B5%B6%B7%B8%B9%BA%BB%BC%BD%BE%BF",
    "%C0%C1%C2%C3%C4%C5%C6%C7%C8%C9%CA%CB%CC%CD%CE%CF",
    "%D0%D1%D2%D3%D4%D5%D6%D7%D8%D9%DA%DB%DC%DD%DE%DF",
    "%E0%E1%E2%E3%E4%E5%E6%E7%E8%E9%EA%EB%EC%ED%EE%EF",
    "%F0%F1%F2%F3%F4%F5%F6%F7%F8%F9%FA%FB%FC%FD%FE%FF",
);

/// Percent-encodes a single byte as `"%XY"` with upper-case hex digits.
///
/// # Examples
///
/// ```
/// assert_eq!(urlbuf::encoding::encode_byte(b' '), "%20");
/// assert_eq!(urlbuf::encoding::encode_byte(0xFF), "%FF");
/// ```
#[must_use]
pub fn encode_byte(x: u8) -> &'static str {
    &TRIPLETS[x as usize * 3..x as usize * 3 + 3]
}

/// Percent-encodes the bytes of `s` that the table does not allow,
/// appending the result to `buf`.
pub(crate) fn encode_to(s: &[u8], table: Table, buf: &mut String) {
    for &x in s {
        if table.allows(x) {
            buf.push(x as char);
        } else {
            buf.push_str(encode_byte(x));
        }
    }
}

/// Percent-encodes the characters of `s` whose bytes the table does
/// not allow.
///
/// Returns the input unchanged when every byte is allowed. Non-ASCII
/// characters are encoded as the escapes of their UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use urlbuf::encoding::{encode, table};
///
/// assert_eq!(encode("a b", table::PATH), "a%20b");
/// assert_eq!(encode("ab", table::PATH), "ab");
/// ```
#[must_use]
pub fn encode(s: &str, table: Table) -> Cow<'_, str> {
    if s.bytes().all(|x| table.allows(x)) {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len() + 2);
    encode_to(s.as_bytes(), table, &mut buf);
    Cow::Owned(buf)
}

/// Percent-decodes a byte string, validating every escape.
///
/// # Errors
///
/// Returns [`BadPercentEscape`] pointing at any `'%'` that is not
/// followed by two hexadecimal digits.
///
/// [`BadPercentEscape`]: crate::ErrorKind::BadPercentEscape
///
/// # Examples
///
/// ```
/// use urlbuf::encoding::decode;
///
/// assert_eq!(decode("a%20b").unwrap().as_ref(), b"a b");
/// assert!(decode("a%2").is_err());
/// ```
pub fn decode<S: AsRef<[u8]> + ?Sized>(s: &S) -> Result<Cow<'_, [u8]>> {
    let s = s.as_ref();
    let mut i = match s.iter().position(|&x| x == b'%') {
        Some(i) => i,
        None => return Ok(Cow::Borrowed(s)),
    };
    let mut out = Vec::with_capacity(s.len());
    out.extend_from_slice(&s[..i]);
    while i < s.len() {
        let x = s[i];
        if x == b'%' {
            if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                err!(BadPercentEscape, i);
            }
            out.push((hex_value(s[i + 1]) << 4) | hex_value(s[i + 2]));
            i += 3;
        } else {
            out.push(x);
            i += 1;
        }
    }
    Ok(Cow::Owned(out))
}

/// Percent-decodes a byte string whose escapes are known to be valid.
///
/// A dangling escape is copied through verbatim instead of being
/// decoded; use [`decode`] for untrusted input.
#[must_use]
pub fn decode_unchecked<S: AsRef<[u8]> + ?Sized>(s: &S) -> Cow<'_, [u8]> {
    let s = s.as_ref();
    let mut i = match s.iter().position(|&x| x == b'%') {
        Some(i) => i,
        None => return Cow::Borrowed(s),
    };
    let mut out = Vec::with_capacity(s.len());
    out.extend_from_slice(&s[..i]);
    while i < s.len() {
        let x = s[i];
        if x == b'%' && i + 2 < s.len() && is_hexdig_pair(s[i + 1], s[i + 2]) {
            out.push((hex_value(s[i + 1]) << 4) | hex_value(s[i + 2]));
            i += 3;
        } else {
            out.push(x);
            i += 1;
        }
    }
    Cow::Owned(out)
}

/// Decodes a validated component into a `String`, replacing any
/// non-UTF-8 decoded octet with U+FFFD.
pub(crate) fn decode_lossy(s: &str) -> String {
    match decode_unchecked(s) {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Returns the length `s` would have after percent-decoding.
///
/// Escapes are assumed valid; the count is a single left-to-right pass.
#[must_use]
pub fn decoded_len<S: AsRef<[u8]> + ?Sized>(s: &S) -> usize {
    let s = s.as_ref();
    let mut i = 0;
    let mut n = 0;
    while i < s.len() {
        if s[i] == b'%' && i + 2 < s.len() && is_hexdig_pair(s[i + 1], s[i + 2]) {
            i += 3;
        } else {
            i += 1;
        }
        n += 1;
    }
    n
}

/// Validates a byte string against a table, reporting the first
/// offending byte.
///
/// # Errors
///
/// Returns [`BadPercentEscape`] for a malformed escape and
/// [`Invalid`] for any other disallowed byte, in both cases with the
/// index of the offending byte.
///
/// [`BadPercentEscape`]: crate::ErrorKind::BadPercentEscape
/// [`Invalid`]: crate::ErrorKind::Invalid
pub fn validate<S: AsRef<[u8]> + ?Sized>(s: &S, table: Table) -> Result<()> {
    let s = s.as_ref();
    let mut i = 0;
    while i < s.len() {
        let x = s[i];
        if table.allows_pct_encoded() && x == b'%' {
            if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                err!(BadPercentEscape, i);
            }
            i += 3;
        } else {
            if !table.allows(x) {
                err!(Invalid, i);
            }
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn encode_reserved() {
        assert_eq!(encode("/x y", table::REG_NAME), "%2Fx%20y");
        assert_eq!(encode("az09-._~", table::REG_NAME), "az09-._~");
        assert_eq!(encode("\u{00e9}", table::REG_NAME), "%C3%A9");
    }

    #[test]
    fn decode_checked() {
        assert_eq!(decode("").unwrap().as_ref(), b"");
        assert_eq!(decode("%41%6230%25").unwrap().as_ref(), b"Ab30%");
        assert_eq!(decode("%").unwrap_err().kind(), ErrorKind::BadPercentEscape);
        assert_eq!(decode("%1").unwrap_err().kind(), ErrorKind::BadPercentEscape);
        assert_eq!(decode("a%GG").unwrap_err().index(), 1);
    }

    #[test]
    fn decoded_len_counts_triplets() {
        assert_eq!(decoded_len("abc"), 3);
        assert_eq!(decoded_len("%20"), 1);
        assert_eq!(decoded_len("a%20b%41"), 4);
    }
}
