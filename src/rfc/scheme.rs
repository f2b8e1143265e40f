use crate::bnf::Cursor;
use crate::encoding::table;
use crate::error::{err, Result};

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
///
/// Consumes the scheme together with its trailing colon. Fails with
/// [`Mismatch`] when no colon terminates the scheme characters, and
/// with [`BadScheme`] when a colon is found but the scheme is empty or
/// does not start with a letter; the latter is a committed failure
/// since such input cannot be a relative reference either.
///
/// [`Mismatch`]: crate::ErrorKind::Mismatch
/// [`BadScheme`]: crate::ErrorKind::BadScheme
pub(crate) fn scheme_colon(cur: &mut Cursor<'_>) -> Result<()> {
    let start = cur.pos();
    cur.scan(table::SCHEME)?;
    if !cur.eat(b':') {
        err!(Mismatch, cur.pos());
    }
    match cur.taken_since(start) {
        [first, .., b':'] if first.is_ascii_alphabetic() => Ok(()),
        _ => err!(BadScheme, start),
    }
}

/// Validates a standalone scheme, colon excluded.
pub(crate) fn check_scheme(s: &[u8]) -> Result<()> {
    match s {
        [first, ..] if first.is_ascii_alphabetic() => {
            if let Some(i) = s.iter().position(|&x| !table::SCHEME.allows(x)) {
                err!(BadScheme, i);
            }
            Ok(())
        }
        _ => err!(BadScheme, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnf::parse_all;
    use crate::ErrorKind;

    #[test]
    fn scheme_rules() {
        assert!(parse_all(b"http:", scheme_colon).is_ok());
        assert!(parse_all(b"a+-.:", scheme_colon).is_ok());
        assert_eq!(
            parse_all(b"1ab:", scheme_colon).unwrap_err().kind(),
            ErrorKind::BadScheme
        );
        assert_eq!(
            parse_all(b":", scheme_colon).unwrap_err().kind(),
            ErrorKind::BadScheme
        );
        assert_eq!(
            parse_all(b"http", scheme_colon).unwrap_err().kind(),
            ErrorKind::Mismatch
        );

        assert!(check_scheme(b"HTTPS").is_ok());
        assert!(check_scheme(b"").is_err());
        assert!(check_scheme(b"h~t").is_err());
    }
}
