//! The query parameters view.

use crate::encoding::{
    encode,
    encoder::{QueryKey, QueryValue},
    table, validate, EStr,
};
use crate::error::Result;
use crate::url::Url;
use core::{fmt, iter::FusedIterator, ops::Range};

/// One `key [ "=" value ]` parameter of a query.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    key: &'a EStr<QueryKey>,
    value: Option<&'a EStr<QueryValue>>,
}

impl<'a> Param<'a> {
    fn split(s: &'a str) -> Self {
        match s.split_once('=') {
            Some((k, v)) => Self {
                key: EStr::new_validated(k),
                value: Some(EStr::new_validated(v)),
            },
            None => Self {
                key: EStr::new_validated(s),
                value: None,
            },
        }
    }

    /// Returns the encoded key, possibly empty.
    #[must_use]
    pub fn encoded_key(&self) -> &'a EStr<QueryKey> {
        self.key
    }

    /// Returns the encoded value, or `None` when the parameter has no
    /// `'='`.
    #[must_use]
    pub fn encoded_value(&self) -> Option<&'a EStr<QueryValue>> {
        self.value
    }

    /// Returns the decoded key.
    #[must_use]
    pub fn key(&self) -> String {
        self.key.decode_lossy()
    }

    /// Returns the decoded value.
    ///
    /// A parameter without `'='` and one with an empty value both
    /// yield an empty string.
    #[must_use]
    pub fn value(&self) -> String {
        self.value.map(EStr::decode_lossy).unwrap_or_default()
    }
}

impl fmt::Debug for Param<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Param")
            .field(&self.key.as_str())
            .field(&self.value.map(|v| v.as_str()))
            .finish()
    }
}

/// A read-only view of the query parameters of a URL.
///
/// This struct is created by [`Url::params`]. A present query holds at
/// least one parameter; an absent query holds none.
///
/// # Examples
///
/// ```
/// use urlbuf::Url;
///
/// let url = Url::parse("?a=1&a=2&b=")?;
/// let params = url.params();
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.count("a"), 2);
/// assert_eq!(params.get("b"), Some(String::new()));
/// assert_eq!(params.get("c"), None);
/// # Ok::<_, urlbuf::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Params<'a> {
    query: Option<&'a str>,
    count: usize,
}

impl<'a> Params<'a> {
    pub(crate) fn new(query: Option<&'a str>, count: usize) -> Self {
        Self { query, count }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Checks whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns an iterator over the parameters.
    #[must_use]
    pub fn iter(&self) -> Iter<'a> {
        Iter {
            inner: self.query.map(|q| q.split('&')),
        }
    }

    /// Returns the parameter at the given position.
    #[must_use]
    pub fn get_index(&self, i: usize) -> Option<Param<'a>> {
        self.iter().nth(i)
    }

    /// Returns the decoded value of the first parameter whose decoded
    /// key equals the given key.
    ///
    /// A parameter without `'='` yields an empty string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.iter().find(|p| p.key() == key).map(|p| p.value())
    }

    /// Counts the parameters whose decoded key equals the given key.
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.iter().filter(|p| p.key() == key).count()
    }

    /// Checks whether any parameter's decoded key equals the given
    /// key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.iter().any(|p| p.key() == key)
    }
}

impl<'a> IntoIterator for Params<'a> {
    type Item = Param<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Debug for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the query parameters of a URL.
#[derive(Clone)]
pub struct Iter<'a> {
    inner: Option<core::str::Split<'a, char>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Param<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(Param::split)
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back().map(Param::split)
    }
}

impl FusedIterator for Iter<'_> {}

/// A mutating view of the query parameters of a URL.
///
/// This struct is created by [`Url::params_mut`]. Every mutation is a
/// single rewrite of the query component; erasing the last parameter
/// removes the query together with its `'?'`.
pub struct ParamsMut<'a> {
    url: &'a mut Url,
}

impl<'a> ParamsMut<'a> {
    pub(crate) fn new(url: &'a mut Url) -> Self {
        Self { url }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.url.params().len()
    }

    /// Checks whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect(&self) -> Vec<String> {
        self.url
            .params()
            .iter()
            .map(|p| match p.encoded_value() {
                Some(v) => format!("{}={}", p.encoded_key(), v),
                None => p.encoded_key().as_str().to_owned(),
            })
            .collect()
    }

    fn commit(&mut self, params: Vec<String>) -> &mut Self {
        if params.is_empty() {
            self.url.apply_query(None);
        } else {
            self.url.apply_query(Some(&params.join("&")));
        }
        self
    }

    fn encode_param(key: &str, value: Option<&str>) -> String {
        let key = encode(key, table::QUERY_PARAM_KEY);
        match value {
            Some(v) => format!("{}={}", key, encode(v, table::QUERY_PARAM_VALUE)),
            None => key.into_owned(),
        }
    }

    /// Appends a parameter, percent-encoding what the key and value
    /// alphabets do not allow. A value of `None` appends a parameter
    /// without `'='`.
    pub fn append(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        let mut params = self.collect();
        params.push(Self::encode_param(key, value));
        self.commit(params)
    }

    /// Inserts a parameter at the given position, percent-encoding
    /// what the key and value alphabets do not allow.
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than the number of parameters.
    pub fn insert(&mut self, i: usize, key: &str, value: Option<&str>) -> &mut Self {
        let mut params = self.collect();
        assert!(i <= params.len(), "parameter index out of bounds");
        params.insert(i, Self::encode_param(key, value));
        self.commit(params)
    }

    /// Inserts an already encoded parameter at the given position.
    ///
    /// # Errors
    ///
    /// Returns an error when the key or value is not validly encoded.
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than the number of parameters.
    pub fn insert_encoded(
        &mut self,
        i: usize,
        key: &str,
        value: Option<&str>,
    ) -> Result<&mut Self> {
        validate(key, table::QUERY_PARAM_KEY)?;
        if let Some(v) = value {
            validate(v, table::QUERY_PARAM_VALUE)?;
        }
        let mut params = self.collect();
        assert!(i <= params.len(), "parameter index out of bounds");
        params.insert(
            i,
            match value {
                Some(v) => format!("{key}={v}"),
                None => key.to_owned(),
            },
        );
        Ok(self.commit(params))
    }

    /// Replaces the parameter at the given position, percent-encoding
    /// what the key and value alphabets do not allow.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn replace(&mut self, i: usize, key: &str, value: Option<&str>) -> &mut Self {
        let mut params = self.collect();
        assert!(i < params.len(), "parameter index out of bounds");
        params[i] = Self::encode_param(key, value);
        self.commit(params)
    }

    /// Replaces the parameter at the given position with an already
    /// encoded one.
    ///
    /// # Errors
    ///
    /// Returns an error when the key or value is not validly encoded.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn replace_encoded(
        &mut self,
        i: usize,
        key: &str,
        value: Option<&str>,
    ) -> Result<&mut Self> {
        validate(key, table::QUERY_PARAM_KEY)?;
        if let Some(v) = value {
            validate(v, table::QUERY_PARAM_VALUE)?;
        }
        let mut params = self.collect();
        assert!(i < params.len(), "parameter index out of bounds");
        params[i] = match value {
            Some(v) => format!("{key}={v}"),
            None => key.to_owned(),
        };
        Ok(self.commit(params))
    }

    /// Erases the parameter at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn erase(&mut self, i: usize) -> &mut Self {
        self.erase_range(i..i + 1)
    }

    /// Erases the given range of parameters.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn erase_range(&mut self, range: Range<usize>) -> &mut Self {
        let mut params = self.collect();
        assert!(
            range.start <= range.end && range.end <= params.len(),
            "parameter range out of bounds"
        );
        params.drain(range);
        self.commit(params)
    }

    /// Sets the first parameter whose decoded key equals the given key
    /// to the given value, removing any further parameters with that
    /// key; appends the parameter when the key is absent.
    pub fn set(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        let mut params = self.collect();
        let mut indices = self
            .url
            .params()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.key() == key)
            .map(|(i, _)| i);

        match indices.next() {
            Some(first) => {
                let rest: Vec<usize> = indices.collect();
                params[first] = Self::encode_param(key, value);
                for i in rest.into_iter().rev() {
                    params.remove(i);
                }
            }
            None => params.push(Self::encode_param(key, value)),
        }
        self.commit(params)
    }

    /// Removes every parameter whose decoded key equals the given key,
    /// returning the number removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.len();
        let params = self
            .collect()
            .into_iter()
            .filter(|p| Param::split(p).key() != key)
            .collect();
        self.commit(params);
        before - self.len()
    }
}

impl fmt::Debug for ParamsMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.url.params().iter()).finish()
    }
}
