use crate::bnf::Cursor;
use crate::encoding::table;
use crate::error::Result;

/// `query = *( pchar / "/" / "?" )`
pub(crate) fn query(cur: &mut Cursor<'_>) -> Result<()> {
    cur.scan(table::QUERY)?;
    Ok(())
}

/// `fragment = *( pchar / "/" / "?" )`
pub(crate) fn fragment(cur: &mut Cursor<'_>) -> Result<()> {
    cur.scan(table::FRAGMENT)?;
    Ok(())
}

/// Counts the parameters of a present encoded query.
///
/// `query-params = [ param ] *( "&" [ param ] )` where
/// `param = key [ "=" value ]`; every `'&'` introduces one parameter
/// and a present query holds at least one, possibly with an empty key.
pub(crate) fn count_params(query: &[u8]) -> usize {
    1 + query.iter().filter(|&&x| x == b'&').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_counts() {
        assert_eq!(count_params(b""), 1);
        assert_eq!(count_params(b"a"), 1);
        assert_eq!(count_params(b"a=1&b=2"), 2);
        assert_eq!(count_params(b"a=1&a=2&b="), 3);
        assert_eq!(count_params(b"&&"), 3);
    }
}
