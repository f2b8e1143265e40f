//! The path segments view.

use crate::encoding::{encode, encoder::Segment, table, validate, EStr};
use crate::error::Result;
use crate::url::Url;
use core::{fmt, iter::FusedIterator, ops::Range};

/// A read-only view of the path segments of a URL.
///
/// This struct is created by [`Url::segments`]. Any mutation of the
/// URL invalidates the view, which the borrow checker enforces.
///
/// # Examples
///
/// ```
/// use urlbuf::Url;
///
/// let url = Url::parse("http://example.com/a/b%20c")?;
/// let segments: Vec<String> = url.segments().iter().map(|s| s.decode_lossy()).collect();
/// assert_eq!(segments, ["a", "b c"]);
/// # Ok::<_, urlbuf::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Segments<'a> {
    path: &'a str,
    count: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(path: &'a str, count: usize) -> Self {
        Self { path, count }
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Checks whether there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if the underlying path starts with a `'/'`.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with('/')
    }

    /// Returns the segment at the given position.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&'a EStr<Segment>> {
        self.iter().nth(i)
    }

    /// Returns an iterator over the segments.
    #[must_use]
    pub fn iter(&self) -> Iter<'a> {
        let rootless = self.path.strip_prefix('/').unwrap_or(self.path);
        Iter {
            inner: (!self.path.is_empty())
                .then(|| EStr::<Segment>::new_validated(rootless).split('/')),
        }
    }
}

impl<'a> IntoIterator for Segments<'a> {
    type Item = &'a EStr<Segment>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Debug for Segments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the path segments of a URL.
#[derive(Clone)]
pub struct Iter<'a> {
    inner: Option<crate::encoding::Split<'a, Segment>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a EStr<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back()
    }
}

impl FusedIterator for Iter<'_> {}

/// A mutating view of the path segments of a URL.
///
/// This struct is created by [`Url::segments_mut`]. Every mutation is
/// a single rewrite of the path component; the rewritten path is
/// re-validated in the grammar context of the URL, so an edit that
/// would make the URL unparseable is rejected and leaves it unchanged.
pub struct SegmentsMut<'a> {
    url: &'a mut Url,
}

impl<'a> SegmentsMut<'a> {
    pub(crate) fn new(url: &'a mut Url) -> Self {
        Self { url }
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.url.segments().len()
    }

    /// Checks whether there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect(&self) -> Vec<String> {
        self.url.segments().iter().map(|s| s.as_str().to_owned()).collect()
    }

    fn commit(&mut self, segs: Vec<String>) -> Result<&mut Self> {
        let absolute = self.url.segments().is_absolute() || self.url.has_authority();
        let mut path = String::new();
        for (i, seg) in segs.iter().enumerate() {
            if absolute || i > 0 {
                path.push('/');
            }
            path.push_str(seg);
        }
        self.url.set_encoded_path(&path)?;
        Ok(self)
    }

    /// Encodes a raw segment in the position it will occupy.
    ///
    /// A colon in the first segment of a relative rootless path is
    /// encoded so the result cannot parse back as a scheme.
    fn encode_seg(&self, i: usize, s: &str) -> String {
        let guard_colon = i == 0
            && !self.url.segments().is_absolute()
            && !self.url.has_scheme()
            && !self.url.has_authority();
        if guard_colon {
            encode(s, table::SEGMENT_NZ_NC).into_owned()
        } else {
            encode(s, table::PCHAR).into_owned()
        }
    }

    /// Inserts a segment at the given position, percent-encoding
    /// anything that is not a segment character.
    ///
    /// # Errors
    ///
    /// Returns an error when the rewritten path does not fit the
    /// grammar context of the URL.
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than the number of segments.
    pub fn insert(&mut self, i: usize, s: &str) -> Result<&mut Self> {
        let mut segs = self.collect();
        assert!(i <= segs.len(), "segment index out of bounds");
        segs.insert(i, self.encode_seg(i, s));
        self.commit(segs)
    }

    /// Inserts an already encoded segment at the given position.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded segment
    /// or the rewritten path does not fit the grammar context of the
    /// URL.
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than the number of segments.
    pub fn insert_encoded(&mut self, i: usize, s: &str) -> Result<&mut Self> {
        validate(s, table::PCHAR)?;
        let mut segs = self.collect();
        assert!(i <= segs.len(), "segment index out of bounds");
        segs.insert(i, s.to_owned());
        self.commit(segs)
    }

    /// Replaces the segment at the given position, percent-encoding
    /// anything that is not a segment character.
    ///
    /// # Errors
    ///
    /// Returns an error when the rewritten path does not fit the
    /// grammar context of the URL.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn replace(&mut self, i: usize, s: &str) -> Result<&mut Self> {
        let mut segs = self.collect();
        assert!(i < segs.len(), "segment index out of bounds");
        segs[i] = self.encode_seg(i, s);
        self.commit(segs)
    }

    /// Replaces the segment at the given position with an already
    /// encoded segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded segment
    /// or the rewritten path does not fit the grammar context of the
    /// URL.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn replace_encoded(&mut self, i: usize, s: &str) -> Result<&mut Self> {
        validate(s, table::PCHAR)?;
        let mut segs = self.collect();
        assert!(i < segs.len(), "segment index out of bounds");
        segs[i] = s.to_owned();
        self.commit(segs)
    }

    /// Erases the segment at the given position.
    ///
    /// # Errors
    ///
    /// Returns an error when the rewritten path does not fit the
    /// grammar context of the URL.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn erase(&mut self, i: usize) -> Result<&mut Self> {
        self.erase_range(i..i + 1)
    }

    /// Erases the given range of segments.
    ///
    /// # Errors
    ///
    /// Returns an error when the rewritten path does not fit the
    /// grammar context of the URL.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn erase_range(&mut self, range: Range<usize>) -> Result<&mut Self> {
        let mut segs = self.collect();
        assert!(
            range.start <= range.end && range.end <= segs.len(),
            "segment range out of bounds"
        );
        segs.drain(range);
        self.commit(segs)
    }
}

impl fmt::Debug for SegmentsMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.url.segments().iter()).finish()
    }
}
