//! Byte pattern tables from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

use crate::encoding::is_hexdig_pair;

const MASK_PCT_ENCODED: u64 = 1 << b'%';
const MASK_UNENCODED: u64 = !MASK_PCT_ENCODED;

/// A table specifying the byte patterns allowed in a component.
///
/// A table is a 128-bit ASCII membership mask plus a marker that tells
/// whether percent-encoded octets are allowed in addition to the
/// listed bytes.
#[derive(Clone, Copy, Debug)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, b'%' | 128..),
                "cannot allow non-ASCII byte or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Marks this table as allowing percent-encoded octets.
    #[must_use]
    pub const fn or_pct_encoded(self) -> Self {
        Self(self.0 | MASK_PCT_ENCODED, self.1)
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the byte patterns allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Checks whether the given unencoded byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0 & MASK_UNENCODED
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether percent-encoded octets are allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_pct_encoded(self) -> bool {
        self.0 & MASK_PCT_ENCODED != 0
    }

    /// Validates the given byte string with the table.
    pub(crate) const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            let x = s[i];
            if self.allows_pct_encoded() && x == b'%' {
                if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                    return false;
                }
                i += 3;
            } else {
                if !self.allows(x) {
                    return false;
                }
                i += 1;
            }
        }
        true
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// The user subcomponent of userinfo, up to the first `':'`.
///
/// `user = *( unreserved / pct-encoded / sub-delims )`
pub const USER: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// The password subcomponent of userinfo, after the first `':'`.
///
/// `password = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const PASSWORD: Table = USER.or(new(b":"));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = PASSWORD;

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
pub const IPV_FUTURE: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":"));

/// `port = *DIGIT`
pub const PORT: Table = DIGIT;

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@")).or_pct_encoded();

/// `segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )`
pub const SEGMENT_NZ_NC: Table = UNRESERVED.or(SUB_DELIMS).or(new(b"@")).or_pct_encoded();

/// `path = *( pchar / "/" )`
pub const PATH: Table = PCHAR.or(new(b"/"));

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = PCHAR.or(new(b"/?"));

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

/// The key of a query parameter.
///
/// `key = *( qpchar )` where `qpchar` is `pchar / "/" / "?"`
/// minus `"&"` and `"="`.
pub const QUERY_PARAM_KEY: Table = QUERY.sub(new(b"&="));

/// The value of a query parameter.
///
/// `value = *( qpchar / "=" )`
pub const QUERY_PARAM_VALUE: Table = QUERY.sub(new(b"&"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        assert!(UNRESERVED.allows(b'a'));
        assert!(UNRESERVED.allows(b'~'));
        assert!(!UNRESERVED.allows(b'%'));
        assert!(!UNRESERVED.allows(b'/'));
        assert!(!UNRESERVED.allows(0x80));

        assert!(PCHAR.allows(b':'));
        assert!(PCHAR.allows(b'@'));
        assert!(!PCHAR.allows(b'/'));
        assert!(PATH.allows(b'/'));

        assert!(!USER.allows(b':'));
        assert!(PASSWORD.allows(b':'));

        assert!(QUERY.allows(b'&'));
        assert!(!QUERY_PARAM_KEY.allows(b'&'));
        assert!(!QUERY_PARAM_KEY.allows(b'='));
        assert!(QUERY_PARAM_VALUE.allows(b'='));
    }

    #[test]
    fn validate_pct() {
        assert!(REG_NAME.validate(b"www.example.com"));
        assert!(REG_NAME.validate(b"%7Ename"));
        assert!(!REG_NAME.validate(b"%7"));
        assert!(!REG_NAME.validate(b"%zz"));
        assert!(!PORT.validate(b"80a"));
        assert!(SCHEME.validate(b"http"));
    }
}
