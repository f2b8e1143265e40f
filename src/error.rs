//! Error types.

use core::fmt;

/// Detailed cause of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not begin with the expected production.
    Mismatch,
    /// The input ended in the middle of a production.
    NeedMore,
    /// A syntactic rule was violated, such as an IPv4 octet greater
    /// than 255, a leading zero in a multi-digit octet, or a second
    /// `"::"` in an IPv6 address.
    Invalid,
    /// A percent character not followed by two hexadecimal digits.
    ///
    /// The error index points to the `'%'`.
    BadPercentEscape,
    /// A port whose numeric value does not fit in `0..=65535`.
    BadPort,
    /// A scheme that is empty or does not start with a letter.
    BadScheme,
    /// A bracketed host that is neither an IPv6 address nor an
    /// IPvFuture literal.
    ///
    /// The error index points to the opening `'['`.
    BadHost,
}

/// An error occurred when parsing or mutating a URL.
///
/// The error records the kind of failure and the byte index of the
/// first offending byte in the input that was being validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Error {
    pub(crate) index: usize,
    pub(crate) kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, index: usize) -> Self {
        Self { index, kind }
    }

    /// Returns the index where the error occurred in the input.
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::Mismatch => "unexpected production at index ",
            ErrorKind::NeedMore => "input ended mid-production at index ",
            ErrorKind::Invalid => "syntax rule violated at index ",
            ErrorKind::BadPercentEscape => "invalid percent escape at index ",
            ErrorKind::BadPort => "port out of range at index ",
            ErrorKind::BadScheme => "invalid scheme at index ",
            ErrorKind::BadHost => "invalid bracketed host at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl std::error::Error for Error {}

pub(crate) type Result<T, E = Error> = core::result::Result<T, E>;

/// Returns immediately with an error.
macro_rules! err {
    ($kind:ident, $index:expr) => {
        return Err(crate::error::Error::new(
            crate::error::ErrorKind::$kind,
            $index,
        ))
    };
}

pub(crate) use err;
