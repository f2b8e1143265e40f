use super::{decode_lossy, decode_unchecked, encode_to, table, Table};
use core::{borrow::Borrow, cmp::Ordering, fmt, hash, iter::FusedIterator, marker::PhantomData};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::borrow::Cow;

/// A trait used by [`EStr`] and [`EString`] to specify the table used
/// for encoding.
pub trait Encoder: 'static {
    /// The table used for encoding.
    const TABLE: Table;
}

/// Percent-encoded string slices.
///
/// The owned counterpart of `EStr` is [`EString`].
///
/// # Type parameter
///
/// The `EStr<E>` type is parameterized over a type `E` that implements
/// [`Encoder`]. The associated constant `E::TABLE` of type [`Table`]
/// specifies the byte patterns allowed in a string.
///
/// # Comparison
///
/// `EStr` slices are compared [lexicographically](Ord#lexicographical-comparison)
/// by their byte values. Normalization is **not** performed prior to
/// comparison.
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr<E: Encoder> {
    encoder: PhantomData<E>,
    inner: str,
}

impl<E: Encoder> EStr<E> {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice, returning `None` if
    /// the conversion fails.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Self> {
        if E::TABLE.validate(s.as_bytes()) {
            Some(Self::new_validated(s))
        } else {
            None
        }
    }

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Panics
    ///
    /// Panics if the string is not properly encoded with `E`. For a
    /// non-panicking variant, use [`new`](Self::new).
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Self {
        match Self::new(s) {
            Some(s) => s,
            None => panic!("improperly encoded string"),
        }
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Percent-decodes the `EStr` slice into bytes.
    ///
    /// Always **split before decoding**, as otherwise the data may be
    /// mistaken for component delimiters.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::encoding::EStr;
    /// use urlbuf::encoding::encoder::Path;
    ///
    /// let estr = EStr::<Path>::new_or_panic("a%20b");
    /// assert_eq!(estr.decode().as_ref(), b"a b");
    /// ```
    #[must_use]
    pub fn decode(&self) -> Cow<'_, [u8]> {
        decode_unchecked(&self.inner)
    }

    /// Percent-decodes the `EStr` slice into a `String`, replacing any
    /// decoded octet sequence that is not valid UTF-8 with U+FFFD.
    #[must_use]
    pub fn decode_lossy(&self) -> String {
        decode_lossy(&self.inner)
    }

    /// Returns an iterator over subslices of the `EStr` slice separated
    /// by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    pub fn split(&self, delim: char) -> Split<'_, E> {
        assert!(
            delim.is_ascii() && table::RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );
        Split {
            inner: self.inner.split(delim),
            encoder: PhantomData,
        }
    }

    /// Splits the `EStr` slice on the first occurrence of the given
    /// delimiter and returns the prefix and the suffix.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert!(
            delim.is_ascii() && table::RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }
}

impl<E: Encoder> fmt::Debug for EStr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<E: Encoder> fmt::Display for EStr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E: Encoder> PartialEq for EStr<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<E: Encoder> Eq for EStr<E> {}

impl<E: Encoder> PartialEq<str> for EStr<E> {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl<E: Encoder> PartialEq<EStr<E>> for str {
    fn eq(&self, other: &EStr<E>) -> bool {
        self == &other.inner
    }
}

impl<E: Encoder> PartialEq<&str> for EStr<E> {
    fn eq(&self, other: &&str) -> bool {
        &self.inner == *other
    }
}

impl<E: Encoder> hash::Hash for EStr<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<E: Encoder> PartialOrd for EStr<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Encoder> Ord for EStr<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl<E: Encoder> Default for &EStr<E> {
    fn default() -> Self {
        EStr::EMPTY
    }
}

impl<E: Encoder> AsRef<str> for EStr<E> {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

/// An iterator over subslices of an [`EStr`] slice separated by a
/// delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
pub struct Split<'a, E: Encoder> {
    inner: core::str::Split<'a, char>,
    encoder: PhantomData<E>,
}

impl<'a, E: Encoder> Iterator for Split<'a, E> {
    type Item = &'a EStr<E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl<'a, E: Encoder> DoubleEndedIterator for Split<'a, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(EStr::new_validated)
    }
}

impl<'a, E: Encoder> FusedIterator for Split<'a, E> {}

/// A percent-encoded, growable string.
///
/// # Examples
///
/// Encode key-value pairs to a query string.
///
/// ```
/// use urlbuf::encoding::{encoder::{Query, QueryKey, QueryValue}, EString};
///
/// let pairs = [("name", "opaque door"), ("speech", "¡Olé!")];
/// let mut buf = EString::<Query>::new();
/// for (k, v) in pairs {
///     if !buf.is_empty() {
///         buf.push_byte(b'&');
///     }
///     buf.push_with::<QueryKey>(k);
///     buf.push_byte(b'=');
///     buf.push_with::<QueryValue>(v);
/// }
///
/// assert_eq!(buf, "name=opaque%20door&speech=%C2%A1Ol%C3%A9!");
/// ```
#[derive(Clone, Default)]
pub struct EString<E: Encoder> {
    string: String,
    encoder: PhantomData<E>,
}

impl<E: Encoder> EString<E> {
    /// Creates a new empty `EString`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            string: String::new(),
            encoder: PhantomData,
        }
    }

    /// Creates a new empty `EString` with a particular capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            string: String::with_capacity(capacity),
            encoder: PhantomData,
        }
    }

    /// Consumes this `EString` and yields the underlying `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.string
    }

    /// Coerces to an `EStr` slice.
    #[must_use]
    pub fn as_estr(&self) -> &EStr<E> {
        EStr::new_validated(&self.string)
    }

    /// Encodes a string with the table of `E` and appends the result
    /// onto the end of this `EString`.
    pub fn push(&mut self, s: &str) {
        encode_to(s.as_bytes(), E::TABLE, &mut self.string);
    }

    /// Encodes a string with the table of a sub-encoder and appends
    /// the result onto the end of this `EString`.
    ///
    /// A sub-encoder `SubE` of `E` is an encoder such that
    /// `SubE::TABLE` is a [subset] of `E::TABLE`.
    ///
    /// [subset]: Table::is_subset
    pub fn push_with<SubE: Encoder>(&mut self, s: &str) {
        const { assert!(SubE::TABLE.is_subset(E::TABLE), "not a sub-encoder") };
        encode_to(s.as_bytes(), SubE::TABLE, &mut self.string);
    }

    /// Appends an unencoded byte onto the end of this `EString`.
    ///
    /// # Panics
    ///
    /// Panics if the byte is not allowed by the table of `E`.
    pub fn push_byte(&mut self, x: u8) {
        assert!(E::TABLE.allows(x), "byte not allowed by table");
        self.string.push(x as char);
    }

    /// Appends an `EStr` slice onto the end of this `EString`.
    pub fn push_estr(&mut self, s: &EStr<E>) {
        self.string.push_str(s.as_str());
    }

    /// Truncates this `EString` to zero length.
    pub fn clear(&mut self) {
        self.string.clear();
    }
}

impl<E: Encoder> core::ops::Deref for EString<E> {
    type Target = EStr<E>;

    fn deref(&self) -> &EStr<E> {
        self.as_estr()
    }
}

impl<E: Encoder> fmt::Debug for EString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.string, f)
    }
}

impl<E: Encoder> fmt::Display for EString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.string, f)
    }
}

impl<E: Encoder> PartialEq for EString<E> {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl<E: Encoder> Eq for EString<E> {}

impl<E: Encoder> PartialEq<str> for EString<E> {
    fn eq(&self, other: &str) -> bool {
        self.string == other
    }
}

impl<E: Encoder> PartialEq<&str> for EString<E> {
    fn eq(&self, other: &&str) -> bool {
        self.string == *other
    }
}

impl<E: Encoder> Borrow<EStr<E>> for EString<E> {
    fn borrow(&self) -> &EStr<E> {
        self.as_estr()
    }
}

impl<E: Encoder> From<&EStr<E>> for EString<E> {
    fn from(s: &EStr<E>) -> Self {
        Self {
            string: s.as_str().to_owned(),
            encoder: PhantomData,
        }
    }
}

/// Encoders for the URL components.
pub mod encoder {
    use super::{table, Encoder, Table};

    macro_rules! encoders {
        ($( $(#[$doc:meta])* $name:ident => $table:expr, )*) => {
            $(
                $(#[$doc])*
                #[derive(Clone, Copy, Debug)]
                pub struct $name(());

                impl Encoder for $name {
                    const TABLE: Table = $table;
                }
            )*
        };
    }

    encoders! {
        /// An encoder for the user subcomponent of userinfo.
        ///
        /// A colon is encoded because it would delimit the password.
        User => table::USER,
        /// An encoder for the password subcomponent of userinfo.
        Password => table::PASSWORD,
        /// An encoder for registered names.
        RegName => table::REG_NAME,
        /// An encoder for paths.
        Path => table::PATH,
        /// An encoder for a single path segment.
        ///
        /// A slash is encoded because it would split the segment.
        Segment => table::PCHAR,
        /// An encoder for queries.
        Query => table::QUERY,
        /// An encoder for the key of a query parameter.
        QueryKey => table::QUERY_PARAM_KEY,
        /// An encoder for the value of a query parameter.
        QueryValue => table::QUERY_PARAM_VALUE,
        /// An encoder for fragments.
        Fragment => table::FRAGMENT,
    }
}
