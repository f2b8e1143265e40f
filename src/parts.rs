//! The fixed-arity component index of a serialized URL.

/// Identifies one of the eight components of a serialized URL, plus
/// the one-past-the-end position.
///
/// Each component's stored bytes include its structural delimiter, so
/// that concatenating the components in order yields the serialized
/// URL:
///
/// | Component | Stored prefix | Stored suffix |
/// |---|---|---|
/// | `Scheme` | | `:` |
/// | `User` | `//` | |
/// | `Pass` | `:` | `@` |
/// | `Host` | | |
/// | `Port` | `:` | |
/// | `Path` | | |
/// | `Query` | `?` | |
/// | `Frag` | `#` | |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Part {
    Scheme = 0,
    User,
    Pass,
    Host,
    Port,
    Path,
    Query,
    Frag,
    End,
}

impl Part {
    pub(crate) const COUNT: usize = 9;

    pub(crate) fn next(self) -> Part {
        match self {
            Part::Scheme => Part::User,
            Part::User => Part::Pass,
            Part::Pass => Part::Host,
            Part::Host => Part::Port,
            Part::Port => Part::Path,
            Part::Path => Part::Query,
            Part::Query => Part::Frag,
            Part::Frag | Part::End => Part::End,
        }
    }
}

pub(crate) const fn idx(id: Part) -> usize {
    id as usize
}

/// The kind of host in a URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// No authority is present.
    #[default]
    None,
    /// A registered name, possibly empty.
    Name,
    /// An IPv4 address.
    Ipv4,
    /// An IPv6 address.
    Ipv6,
    /// An IP address of future version.
    IpvFuture,
}

/// The index into the owned buffer of a URL.
///
/// `offset` is non-decreasing and `offset[End]` equals the serialized
/// length. The length of component `i` is `offset[i + 1] - offset[i]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Parts {
    pub(crate) offset: [usize; Part::COUNT],
    /// Count of bytes each component would occupy after full
    /// percent-decoding.
    pub(crate) decoded: [usize; Part::COUNT - 1],
    /// Raw bytes of an IPv4 (first 4 bytes) or IPv6 address.
    pub(crate) ip_addr: [u8; 16],
    /// Numeric port if it parses into `0..=65535`, else 0.
    pub(crate) port_number: u16,
    pub(crate) nseg: usize,
    pub(crate) nparam: usize,
    pub(crate) host: HostKind,
}

impl Parts {
    pub(crate) fn new() -> Self {
        Self {
            offset: [0; Part::COUNT],
            decoded: [0; Part::COUNT - 1],
            ip_addr: [0; 16],
            port_number: 0,
            nseg: 0,
            nparam: 0,
            host: HostKind::None,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns the stored length of a component, delimiters included.
    pub(crate) fn len(&self, id: Part) -> usize {
        self.offset[idx(id) + 1] - self.offset[idx(id)]
    }

    /// Returns the stored length of a component span.
    pub(crate) fn len_span(&self, first: Part, last: Part) -> usize {
        debug_assert!(first <= last);
        self.offset[idx(last)] - self.offset[idx(first)]
    }

    /// Returns the stored bytes of a component, delimiters included.
    pub(crate) fn get<'a>(&self, id: Part, s: &'a str) -> &'a str {
        &s[self.offset[idx(id)]..self.offset[idx(id) + 1]]
    }

    /// Returns the stored bytes of a component span.
    pub(crate) fn get_span<'a>(&self, first: Part, last: Part, s: &'a str) -> &'a str {
        debug_assert!(first <= last);
        &s[self.offset[idx(first)]..self.offset[idx(last)]]
    }

    /// Recomputes the decoded-length cache from the serialized bytes.
    pub(crate) fn refresh_decoded(&mut self, s: &[u8]) {
        for i in 0..Part::COUNT - 1 {
            self.decoded[i] = crate::encoding::decoded_len(&s[self.offset[i]..self.offset[i + 1]]);
        }
    }
}

impl Default for Parts {
    fn default() -> Self {
        Self::new()
    }
}
