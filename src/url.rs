//! The modifiable URL container.

use crate::encoding::{decode_lossy, encode, table, validate};
use crate::error::{err, Error, Result};
use crate::params::{Params, ParamsMut};
use crate::parts::{idx, HostKind, Part, Parts};
use crate::rfc::{authority, path, query, reference, scheme};
use crate::segments::{Segments, SegmentsMut};
use core::{cmp::Ordering, fmt, hash, str::FromStr};
use std::net::{Ipv4Addr, Ipv6Addr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A modifiable container for a URL.
///
/// The container owns a single contiguous, null-terminated serialized
/// byte string and an index locating the eight components within it.
/// Accessors return string slices borrowed from the buffer; mutators
/// rewrite the affected span in place and re-index the components that
/// follow, validating the replacement against the RFC 3986 grammar
/// first.
///
/// Every mutator provides the strong guarantee: it either commits,
/// leaving the container in a state satisfying all of its invariants,
/// or fails without modifying the observable state.
///
/// # Examples
///
/// ```
/// use urlbuf::Url;
///
/// let mut url = Url::parse("http://example.com/a/b?k=v#frag")?;
/// assert_eq!(url.scheme(), Some("http"));
/// assert_eq!(url.encoded_host(), "example.com");
///
/// url.set_path("/x y")?;
/// assert_eq!(url.as_str(), "http://example.com/x%20y?k=v#frag");
/// # Ok::<_, urlbuf::Error>(())
/// ```
#[derive(Clone)]
pub struct Url {
    /// The serialized URL followed by one NUL byte.
    buf: String,
    parts: Parts,
}

/// Owned authority subcomponents used to rebuild the authority span.
struct AuthParts {
    /// Encoded user and optional encoded password; `None` when no
    /// `'@'` is present.
    userinfo: Option<(String, Option<String>)>,
    /// Encoded host text.
    host: String,
    host_kind: HostKind,
    ip_addr: [u8; 16],
    /// Port digits; `Some("")` for a present but empty port.
    port: Option<String>,
}

impl AuthParts {
    fn is_structurally_empty(&self) -> bool {
        self.userinfo.is_none() && self.host.is_empty() && self.port.is_none()
    }

    fn empty() -> Self {
        Self {
            userinfo: None,
            host: String::new(),
            host_kind: HostKind::Name,
            ip_addr: [0; 16],
            port: None,
        }
    }
}

impl Url {
    /// Creates an empty URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: String::from("\0"),
            parts: Parts::new(),
        }
    }

    /// Parses a URI reference into a `Url`.
    ///
    /// # Errors
    ///
    /// Returns the kind and byte index of the first offending byte
    /// when the input does not match the `URI-reference` ABNF rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let url = Url::parse("foo://example.com:8042/over/there?name=ferret#nose")?;
    /// assert_eq!(url.scheme(), Some("foo"));
    /// assert_eq!(url.port_number(), 8042);
    /// assert_eq!(url.fragment(), Some("nose".into()));
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    pub fn parse<S: AsRef<str> + ?Sized>(s: &S) -> Result<Self> {
        let s = s.as_ref();
        let parts = reference::parse_uri_reference(s.as_bytes())?;
        let mut buf = String::with_capacity(s.len() + 1);
        buf.push_str(s);
        buf.push('\0');
        Ok(Self { buf, parts })
    }

    /// Logically empties the URL, retaining the buffer capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.buf.push('\0');
        self.parts.clear();
    }

    /// Returns the complete serialized URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf[..self.offset(Part::End)]
    }

    /// Returns `true` if the URL is empty.
    ///
    /// An empty URL is a relative reference with zero path segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset(Part::End) == 0
    }

    fn offset(&self, id: Part) -> usize {
        self.parts.offset[idx(id)]
    }

    fn get(&self, id: Part) -> &str {
        self.parts.get(id, &self.buf)
    }

    fn get_span(&self, first: Part, last: Part) -> &str {
        self.parts.get_span(first, last, &self.buf)
    }

    fn has_auth(&self) -> bool {
        self.parts.host != HostKind::None
    }

    /// Replaces the bytes spanning the components `[first, last)` and
    /// re-indexes everything that follows.
    ///
    /// `lens` gives the new stored length of each replaced component
    /// and must sum to `new.len()`. The buffer grows by amortized
    /// doubling; the null terminator moves with the tail.
    fn splice(&mut self, first: Part, last: Part, lens: &[usize], new: &str) {
        debug_assert_eq!(idx(last) - idx(first), lens.len());
        debug_assert_eq!(lens.iter().sum::<usize>(), new.len());

        let lo = self.offset(first);
        let hi = self.offset(last);
        let old_len = hi - lo;
        self.buf.replace_range(lo..hi, new);

        let mut pos = lo;
        for (k, &len) in lens.iter().enumerate() {
            self.parts.offset[idx(first) + k] = pos;
            pos += len;
        }
        for i in idx(last)..Part::COUNT {
            let offset = &mut self.parts.offset[i];
            *offset = *offset - old_len + new.len();
        }
        debug_assert_eq!(self.buf.as_bytes()[self.offset(Part::End)], 0);

        self.parts.refresh_decoded(self.buf.as_bytes());
    }
}

// Support for in-place normalization.
impl Url {
    /// One past the last byte of the stored scheme, colon included.
    pub(crate) fn scheme_end(&self) -> usize {
        self.offset(Part::User)
    }

    pub(crate) fn buf_mut_range(&mut self, start: usize, end: usize) -> &mut str {
        &mut self.buf[start..end]
    }

    pub(crate) fn component(&self, id: Part) -> &str {
        self.get(id)
    }

    /// Replaces one component's stored bytes with an equivalent
    /// normalized form, delimiters included.
    pub(crate) fn replace_component_normalized(&mut self, id: Part, new: &str) {
        self.splice(id, id.next(), &[new.len()], new);
    }

    pub(crate) fn replace_path_normalized(&mut self, path: &str, nseg: usize) {
        self.splice(Part::Path, Part::Query, &[path.len()], path);
        self.parts.nseg = nseg;
    }

    /// Refreshes the host kind and address after a host rewrite that
    /// may have turned a registered name into a dotted-decimal IPv4
    /// address.
    pub(crate) fn reparse_host(&mut self) {
        if let Ok((kind, ip)) = host_meta_of(self.get(Part::Host)) {
            self.parts.host = kind;
            self.parts.ip_addr = ip;
        }
    }
}

impl Default for Url {
    fn default() -> Self {
        Self::new()
    }
}

// Observers.
impl Url {
    /// Returns `true` if a scheme is present.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.parts.len(Part::Scheme) != 0
    }

    /// Returns the scheme, colon excluded.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        let s = self.get(Part::Scheme);
        s.strip_suffix(':')
    }

    /// Returns `true` if an authority is present.
    ///
    /// An authority is present even when it is empty; its presence is
    /// encoded by the leading `"//"`.
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.has_auth()
    }

    /// Returns the authority, `"//"` excluded, if one is present.
    #[must_use]
    pub fn encoded_authority(&self) -> Option<&str> {
        self.has_auth()
            .then(|| &self.get_span(Part::User, Part::Path)[2..])
    }

    /// Returns the origin: the serialized scheme and authority.
    ///
    /// The origin is empty when no authority is present.
    #[must_use]
    pub fn encoded_origin(&self) -> &str {
        if self.has_auth() {
            self.get_span(Part::Scheme, Part::Path)
        } else {
            ""
        }
    }

    /// Returns `true` if a userinfo is present.
    #[must_use]
    pub fn has_userinfo(&self) -> bool {
        self.parts.len(Part::Pass) != 0
    }

    /// Returns the userinfo, `'@'` excluded, if one is present.
    #[must_use]
    pub fn encoded_userinfo(&self) -> Option<&str> {
        self.has_userinfo()
            .then(|| &self.get_span(Part::User, Part::Host)[2..])
            .and_then(|s| s.strip_suffix('@'))
    }

    /// Returns the decoded userinfo, if one is present.
    #[must_use]
    pub fn userinfo(&self) -> Option<String> {
        self.encoded_userinfo().map(decode_lossy)
    }

    /// Returns the user subcomponent of userinfo, possibly empty.
    #[must_use]
    pub fn encoded_user(&self) -> &str {
        let s = self.get(Part::User);
        s.strip_prefix("//").unwrap_or(s)
    }

    /// Returns the decoded user subcomponent, possibly empty.
    #[must_use]
    pub fn user(&self) -> String {
        decode_lossy(self.encoded_user())
    }

    /// Returns `true` if a password is present.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.get(Part::Pass).starts_with(':')
    }

    /// Returns the password, delimiters excluded, possibly empty.
    #[must_use]
    pub fn encoded_password(&self) -> &str {
        let s = self.get(Part::Pass);
        s.strip_prefix(':')
            .and_then(|s| s.strip_suffix('@'))
            .unwrap_or("")
    }

    /// Returns the decoded password, possibly empty.
    #[must_use]
    pub fn password(&self) -> String {
        decode_lossy(self.encoded_password())
    }

    /// Returns the host, possibly empty.
    ///
    /// An IPv6 or IPvFuture host includes its brackets.
    #[must_use]
    pub fn encoded_host(&self) -> &str {
        self.get(Part::Host)
    }

    /// Returns the decoded host, possibly empty.
    #[must_use]
    pub fn host(&self) -> String {
        decode_lossy(self.get(Part::Host))
    }

    /// Returns the kind of the host.
    #[must_use]
    pub fn host_kind(&self) -> HostKind {
        self.parts.host
    }

    /// Returns the host as an IPv4 address, if it is one.
    #[must_use]
    pub fn ipv4_address(&self) -> Option<Ipv4Addr> {
        let ip = self.parts.ip_addr;
        (self.parts.host == HostKind::Ipv4).then(|| Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]))
    }

    /// Returns the host as an IPv6 address, if it is one.
    #[must_use]
    pub fn ipv6_address(&self) -> Option<Ipv6Addr> {
        (self.parts.host == HostKind::Ipv6).then(|| Ipv6Addr::from(self.parts.ip_addr))
    }

    /// Returns the IPvFuture literal, brackets excluded, if the host
    /// is one.
    #[must_use]
    pub fn ipv_future(&self) -> Option<&str> {
        (self.parts.host == HostKind::IpvFuture).then(|| {
            let s = self.get(Part::Host);
            &s[1..s.len() - 1]
        })
    }

    /// Returns `true` if a port is present, even an empty one.
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.parts.len(Part::Port) != 0
    }

    /// Returns the port digits, colon excluded, if a port is present.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.get(Part::Port).strip_prefix(':')
    }

    /// Returns the numeric port.
    ///
    /// Returns 0 when the port is absent, empty, or does not fit in
    /// `u16`.
    #[must_use]
    pub fn port_number(&self) -> u16 {
        self.parts.port_number
    }

    /// Returns the path, possibly empty.
    #[must_use]
    pub fn encoded_path(&self) -> &str {
        self.get(Part::Path)
    }

    /// Returns the decoded path.
    #[must_use]
    pub fn path(&self) -> String {
        decode_lossy(self.get(Part::Path))
    }

    /// Returns `true` if a query is present.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.parts.len(Part::Query) != 0
    }

    /// Returns the query, `'?'` excluded, if one is present.
    #[must_use]
    pub fn encoded_query(&self) -> Option<&str> {
        self.get(Part::Query).strip_prefix('?')
    }

    /// Returns the decoded query, if one is present.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        self.encoded_query().map(decode_lossy)
    }

    /// Returns `true` if a fragment is present.
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.parts.len(Part::Frag) != 0
    }

    /// Returns the fragment, `'#'` excluded, if one is present.
    #[must_use]
    pub fn encoded_fragment(&self) -> Option<&str> {
        self.get(Part::Frag).strip_prefix('#')
    }

    /// Returns the decoded fragment, if one is present.
    #[must_use]
    pub fn fragment(&self) -> Option<String> {
        self.encoded_fragment().map(decode_lossy)
    }

    /// Returns a read-only view of the path segments.
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self.encoded_path(), self.parts.nseg)
    }

    /// Returns a mutating view of the path segments.
    ///
    /// Any mutation through the view invalidates previously obtained
    /// slices and iterators, which the borrow checker enforces.
    pub fn segments_mut(&mut self) -> SegmentsMut<'_> {
        SegmentsMut::new(self)
    }

    /// Returns a read-only view of the query parameters.
    #[must_use]
    pub fn params(&self) -> Params<'_> {
        Params::new(self.encoded_query(), self.parts.nparam)
    }

    /// Returns a mutating view of the query parameters.
    ///
    /// Any mutation through the view invalidates previously obtained
    /// slices and iterators, which the borrow checker enforces.
    pub fn params_mut(&mut self) -> ParamsMut<'_> {
        ParamsMut::new(self)
    }
}

// Scheme setters.
impl Url {
    /// Sets the scheme.
    ///
    /// The input excludes the trailing colon and is stored verbatim;
    /// schemes are case-insensitive and [`normalize_scheme`] lowercases
    /// the stored form.
    ///
    /// [`normalize_scheme`]: Self::normalize_scheme
    ///
    /// # Errors
    ///
    /// Returns [`BadScheme`] when the input is empty, does not start
    /// with a letter, or contains a byte outside the scheme alphabet.
    ///
    /// [`BadScheme`]: crate::ErrorKind::BadScheme
    pub fn set_scheme(&mut self, s: &str) -> Result<&mut Self> {
        scheme::check_scheme(s.as_bytes())?;
        let mut new = String::with_capacity(s.len() + 1);
        new.push_str(s);
        new.push(':');
        self.splice(Part::Scheme, Part::User, &[new.len()], &new);
        Ok(self)
    }
}

// Authority setters.
impl Url {
    fn cur_userinfo(&self) -> Option<(String, Option<String>)> {
        self.encoded_userinfo().map(|ui| {
            match ui.split_once(':') {
                Some((user, pass)) => (user.to_owned(), Some(pass.to_owned())),
                None => (ui.to_owned(), None),
            }
        })
    }

    fn cur_host(&self) -> (String, HostKind, [u8; 16]) {
        (
            self.get(Part::Host).to_owned(),
            self.parts.host,
            self.parts.ip_addr,
        )
    }

    fn cur_port(&self) -> Option<String> {
        self.port().map(str::to_owned)
    }

    fn cur_auth(&self) -> AuthParts {
        let (host, host_kind, ip_addr) = self.cur_host();
        AuthParts {
            userinfo: self.cur_userinfo(),
            host,
            host_kind,
            ip_addr,
            port: self.cur_port(),
        }
    }

    /// Rebuilds the authority span from its subcomponents.
    ///
    /// `auth` of `None` requests dropping the authority entirely;
    /// `keep_empty` forces a structurally empty authority to keep its
    /// `"//"`. The path is checked against the style its new context
    /// requires before anything is written.
    fn set_auth_parts(&mut self, auth: Option<AuthParts>, keep_empty: bool) -> Result<&mut Self> {
        let auth = match auth {
            Some(a) if keep_empty || !a.is_structurally_empty() => Some(a),
            // A path starting with "//" would parse back as an
            // authority, so an empty one stays to shield it.
            _ if self.encoded_path().starts_with("//") => Some(AuthParts::empty()),
            _ => None,
        };

        match auth {
            Some(a) => {
                let path = self.encoded_path();
                if !path.is_empty() && !path.starts_with('/') {
                    err!(Invalid, 0);
                }

                let user = a.userinfo.as_ref().map_or("", |(u, _)| u);
                let mut buf = String::with_capacity(self.parts.len_span(Part::User, Part::Path));
                buf.push_str("//");
                buf.push_str(user);
                let user_len = buf.len();

                match &a.userinfo {
                    Some((_, Some(pass))) => {
                        buf.push(':');
                        buf.push_str(pass);
                        buf.push('@');
                    }
                    Some((_, None)) => buf.push('@'),
                    None => {}
                }
                let pass_len = buf.len() - user_len;

                buf.push_str(&a.host);
                if let Some(port) = &a.port {
                    buf.push(':');
                    buf.push_str(port);
                }
                let port_len = a.port.as_ref().map_or(0, |p| p.len() + 1);

                let lens = [user_len, pass_len, a.host.len(), port_len];
                self.splice(Part::User, Part::Path, &lens, &buf);
                self.parts.host = a.host_kind;
                self.parts.ip_addr = a.ip_addr;
                self.parts.port_number = a
                    .port
                    .as_deref()
                    .and_then(|p| authority::parse_port(p.as_bytes()))
                    .unwrap_or(0);
            }
            None => {
                self.splice(Part::User, Part::Path, &[0, 0, 0, 0], "");
                self.parts.host = HostKind::None;
                self.parts.ip_addr = [0; 16];
                self.parts.port_number = 0;
            }
        }
        Ok(self)
    }

    /// Sets the authority from its serialized form, `"//"` excluded.
    ///
    /// An empty input produces an empty authority whose `"//"` is
    /// still present; dropping the authority is done by clearing each
    /// of its subcomponents.
    ///
    /// # Errors
    ///
    /// Returns an error when the input does not match the `authority`
    /// ABNF rule or when the path is neither empty nor absolute.
    pub fn set_encoded_authority(&mut self, s: &str) -> Result<&mut Self> {
        let auth = parse_auth_str(s)?;
        self.set_auth_parts(Some(auth), true)
    }

    /// Sets the user subcomponent, percent-encoding anything that is
    /// not a user character.
    ///
    /// A non-empty user materializes the authority if none is present.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when materializing an authority while the
    /// path is neither empty nor absolute.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_user(&mut self, s: &str) -> Result<&mut Self> {
        self.apply_user(&encode(s, table::USER))
    }

    /// Sets the user subcomponent from an already encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded user or
    /// when materializing an authority while the path is neither empty
    /// nor absolute.
    pub fn set_encoded_user(&mut self, s: &str) -> Result<&mut Self> {
        validate(s, table::USER)?;
        self.apply_user(s)
    }

    fn apply_user(&mut self, enc: &str) -> Result<&mut Self> {
        let mut auth = self.cur_auth();
        auth.userinfo = match auth.userinfo {
            Some((_, pass @ Some(_))) => Some((enc.to_owned(), pass)),
            _ if enc.is_empty() => None,
            _ => Some((enc.to_owned(), None)),
        };
        self.set_auth_parts(Some(auth), false)
    }

    /// Sets the password subcomponent, percent-encoding anything that
    /// is not a password character. An empty input removes the
    /// password.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when materializing an authority while the
    /// path is neither empty nor absolute.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_password(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return self.apply_password(None);
        }
        self.apply_password(Some(&encode(s, table::PASSWORD)))
    }

    /// Sets the password subcomponent from an already encoded string.
    /// An empty input removes the password.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded password
    /// or when materializing an authority while the path is neither
    /// empty nor absolute.
    pub fn set_encoded_password(&mut self, s: &str) -> Result<&mut Self> {
        validate(s, table::PASSWORD)?;
        if s.is_empty() {
            return self.apply_password(None);
        }
        self.apply_password(Some(s))
    }

    /// Sets the password from its part form: empty, or a `':'`
    /// followed by the encoded password.
    ///
    /// `set_password_part(":")` keeps an empty password in the
    /// serialized form, unlike removal.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the input is neither empty nor
    /// `':'`-prefixed, or an error as for [`set_encoded_password`].
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    /// [`set_encoded_password`]: Self::set_encoded_password
    pub fn set_password_part(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return self.apply_password(None);
        }
        let Some(pass) = s.strip_prefix(':') else {
            err!(Invalid, 0);
        };
        validate(pass, table::PASSWORD).map_err(|e| Error::new(e.kind(), e.index() + 1))?;
        self.apply_password(Some(pass))
    }

    fn apply_password(&mut self, enc: Option<&str>) -> Result<&mut Self> {
        let mut auth = self.cur_auth();
        let user = auth.userinfo.as_ref().map_or("", |(u, _)| u).to_owned();
        auth.userinfo = match enc {
            Some(pass) => Some((user, Some(pass.to_owned()))),
            None if user.is_empty() => None,
            None => Some((user, None)),
        };
        self.set_auth_parts(Some(auth), false)
    }

    /// Sets the userinfo, percent-encoding anything that is not a
    /// userinfo character. The input is split at its first `':'` into
    /// user and password. An empty input removes the userinfo.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when materializing an authority while the
    /// path is neither empty nor absolute.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_userinfo(&mut self, s: &str) -> Result<&mut Self> {
        let ui = match s.split_once(':') {
            Some((user, pass)) => Some((
                encode(user, table::USER).into_owned(),
                Some(encode(pass, table::PASSWORD).into_owned()),
            )),
            None if s.is_empty() => None,
            None => Some((encode(s, table::USER).into_owned(), None)),
        };
        self.apply_userinfo(ui)
    }

    /// Sets the userinfo from an already encoded string. An empty
    /// input removes the userinfo.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded userinfo
    /// or when materializing an authority while the path is neither
    /// empty nor absolute.
    pub fn set_encoded_userinfo(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return self.apply_userinfo(None);
        }
        let ui = split_userinfo(s)?;
        self.apply_userinfo(Some(ui))
    }

    /// Sets the userinfo from its part form: empty, or the encoded
    /// userinfo followed by `'@'`.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the input is non-empty and does not
    /// end with `'@'`, or an error as for [`set_encoded_userinfo`].
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    /// [`set_encoded_userinfo`]: Self::set_encoded_userinfo
    pub fn set_userinfo_part(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return self.apply_userinfo(None);
        }
        let Some(ui) = s.strip_suffix('@') else {
            err!(Invalid, s.len() - 1);
        };
        let ui = split_userinfo(ui)?;
        self.apply_userinfo(Some(ui))
    }

    fn apply_userinfo(&mut self, ui: Option<(String, Option<String>)>) -> Result<&mut Self> {
        let mut auth = self.cur_auth();
        auth.userinfo = ui;
        self.set_auth_parts(Some(auth), false)
    }

    /// Sets the host, percent-encoding anything that is not a
    /// registered-name character.
    ///
    /// Input that parses as an IP literal or an IPv4 address is stored
    /// verbatim with the corresponding host kind; anything else
    /// becomes a registered name. A non-empty host materializes the
    /// authority if none is present.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when materializing an authority while the
    /// path is neither empty nor absolute.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::{HostKind, Url};
    ///
    /// let mut url = Url::parse("x:")?;
    /// url.set_host("[2001:db8::1]")?;
    /// assert_eq!(url.host_kind(), HostKind::Ipv6);
    ///
    /// url.set_host("not an ip")?;
    /// assert_eq!(url.encoded_host(), "not%20an%20ip");
    /// assert_eq!(url.host_kind(), HostKind::Name);
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    pub fn set_host(&mut self, s: &str) -> Result<&mut Self> {
        match host_meta_of(s) {
            Ok((kind, ip)) if kind != HostKind::Name => self.apply_host(s, kind, ip),
            _ => {
                let enc = encode(s, table::REG_NAME).into_owned();
                self.apply_host(&enc, HostKind::Name, [0; 16])
            }
        }
    }

    /// Sets the host from an already encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid host or when
    /// materializing an authority while the path is neither empty nor
    /// absolute.
    pub fn set_encoded_host(&mut self, s: &str) -> Result<&mut Self> {
        let (kind, ip) = host_meta_of(s)?;
        self.apply_host(s, kind, ip)
    }

    fn apply_host(&mut self, enc: &str, kind: HostKind, ip: [u8; 16]) -> Result<&mut Self> {
        let mut auth = self.cur_auth();
        auth.host = enc.to_owned();
        auth.host_kind = kind;
        auth.ip_addr = ip;
        self.set_auth_parts(Some(auth), false)
    }

    /// Sets the port to a number.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when materializing an authority while the
    /// path is neither empty nor absolute.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_port(&mut self, port: u16) -> Result<&mut Self> {
        self.apply_port(Some(port.to_string()))
    }

    /// Sets the port from its serialized digits. An empty input
    /// removes the port.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] on a non-digit byte and [`BadPort`] when
    /// the numeric value overflows `u16`.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    /// [`BadPort`]: crate::ErrorKind::BadPort
    pub fn set_encoded_port(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return self.apply_port(None);
        }
        check_port(s, 0)?;
        self.apply_port(Some(s.to_owned()))
    }

    /// Sets the port from its part form: empty, or a `':'` followed
    /// by the port digits.
    ///
    /// `set_port_part(":")` keeps an empty port in the serialized
    /// form, unlike removal.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the input is neither empty nor
    /// `':'`-prefixed or contains a non-digit byte, and [`BadPort`]
    /// when the numeric value overflows `u16`.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    /// [`BadPort`]: crate::ErrorKind::BadPort
    pub fn set_port_part(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return self.apply_port(None);
        }
        let Some(digits) = s.strip_prefix(':') else {
            err!(Invalid, 0);
        };
        if !digits.is_empty() {
            check_port(digits, 1)?;
        }
        self.apply_port(Some(digits.to_owned()))
    }

    fn apply_port(&mut self, port: Option<String>) -> Result<&mut Self> {
        let mut auth = self.cur_auth();
        auth.port = port;
        self.set_auth_parts(Some(auth), false)
    }
}

// Path, query and fragment setters.
impl Url {
    /// Sets the path, percent-encoding anything that is not a path
    /// character.
    ///
    /// A colon in the first segment of a relative rootless path is
    /// encoded so the result cannot parse back as a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the path style does not fit the URL:
    /// with an authority the path must be empty or absolute, and
    /// without one it must not start with `"//"`.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_path(&mut self, s: &str) -> Result<&mut Self> {
        let mut enc = encode(s, table::PATH).into_owned();
        if !self.has_scheme() && !self.has_auth() {
            let first = enc.split('/').next().map_or(0, str::len);
            if enc[..first].contains(':') {
                let rest = enc.split_off(first);
                enc = enc.replace(':', "%3A");
                enc.push_str(&rest);
            }
        }
        self.apply_path(&enc)
    }

    /// Sets the path from an already encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded path or
    /// its style does not fit the URL; see [`set_path`].
    ///
    /// [`set_path`]: Self::set_path
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::{ErrorKind, Url};
    ///
    /// let mut url = Url::parse("http://x")?;
    /// let err = url.set_encoded_path("not/absolute").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Invalid);
    /// assert_eq!(url.as_str(), "http://x");
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    pub fn set_encoded_path(&mut self, s: &str) -> Result<&mut Self> {
        validate(s, table::PATH)?;
        self.apply_path(s)
    }

    fn apply_path(&mut self, enc: &str) -> Result<&mut Self> {
        let nseg = path::check_path(enc.as_bytes(), self.has_scheme(), self.has_auth())?;
        self.splice(Part::Path, Part::Query, &[enc.len()], enc);
        self.parts.nseg = nseg;
        Ok(self)
    }

    /// Sets the query, percent-encoding anything that is not a query
    /// character. The `'&'` and `'='` delimiters are query characters
    /// and stay unencoded.
    ///
    /// An empty input keeps an empty query in the serialized form;
    /// removal is done with [`set_query_part`].
    ///
    /// [`set_query_part`]: Self::set_query_part
    pub fn set_query(&mut self, s: &str) -> &mut Self {
        let enc = encode(s, table::QUERY);
        self.apply_query(Some(&enc))
    }

    /// Sets the query from an already encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded query.
    pub fn set_encoded_query(&mut self, s: &str) -> Result<&mut Self> {
        validate(s, table::QUERY)?;
        Ok(self.apply_query(Some(s)))
    }

    /// Sets the query from its part form: empty, or a `'?'` followed
    /// by the encoded query. An empty input removes the query.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the input is neither empty nor
    /// `'?'`-prefixed, or when the query is not validly encoded.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_query_part(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return Ok(self.apply_query(None));
        }
        let Some(query) = s.strip_prefix('?') else {
            err!(Invalid, 0);
        };
        validate(query, table::QUERY).map_err(|e| Error::new(e.kind(), e.index() + 1))?;
        Ok(self.apply_query(Some(query)))
    }

    pub(crate) fn apply_query(&mut self, enc: Option<&str>) -> &mut Self {
        match enc {
            Some(q) => {
                let mut new = String::with_capacity(q.len() + 1);
                new.push('?');
                new.push_str(q);
                self.splice(Part::Query, Part::Frag, &[new.len()], &new);
                self.parts.nparam = query::count_params(q.as_bytes());
            }
            None => {
                self.splice(Part::Query, Part::Frag, &[0], "");
                self.parts.nparam = 0;
            }
        }
        self
    }

    /// Sets the fragment, percent-encoding anything that is not a
    /// fragment character.
    ///
    /// An empty input keeps an empty fragment in the serialized form;
    /// removal is done with [`set_fragment_part`].
    ///
    /// [`set_fragment_part`]: Self::set_fragment_part
    pub fn set_fragment(&mut self, s: &str) -> &mut Self {
        let enc = encode(s, table::FRAGMENT);
        self.apply_fragment(Some(&enc))
    }

    /// Sets the fragment from an already encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid encoded
    /// fragment.
    pub fn set_encoded_fragment(&mut self, s: &str) -> Result<&mut Self> {
        validate(s, table::FRAGMENT)?;
        Ok(self.apply_fragment(Some(s)))
    }

    /// Sets the fragment from its part form: empty, or a `'#'`
    /// followed by the encoded fragment. An empty input removes the
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the input is neither empty nor
    /// `'#'`-prefixed, or when the fragment is not validly encoded.
    ///
    /// [`Invalid`]: crate::ErrorKind::Invalid
    pub fn set_fragment_part(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return Ok(self.apply_fragment(None));
        }
        let Some(frag) = s.strip_prefix('#') else {
            err!(Invalid, 0);
        };
        validate(frag, table::FRAGMENT).map_err(|e| Error::new(e.kind(), e.index() + 1))?;
        Ok(self.apply_fragment(Some(frag)))
    }

    fn apply_fragment(&mut self, enc: Option<&str>) -> &mut Self {
        match enc {
            Some(f) => {
                let mut new = String::with_capacity(f.len() + 1);
                new.push('#');
                new.push_str(f);
                self.splice(Part::Frag, Part::End, &[new.len()], &new);
            }
            None => self.splice(Part::Frag, Part::End, &[0], ""),
        }
        self
    }
}

// Whole-URL setters.
impl Url {
    /// Replaces the entire URL with the given serialized form.
    ///
    /// # Errors
    ///
    /// Returns an error when the input does not match the
    /// `URI-reference` ABNF rule; the URL is unchanged on failure.
    pub fn set_encoded_url(&mut self, s: &str) -> Result<&mut Self> {
        *self = Self::parse(s)?;
        Ok(self)
    }

    /// Replaces the origin: the scheme and authority together.
    ///
    /// The input is either empty, which removes both, or of the form
    /// `scheme "://" authority`.
    ///
    /// # Errors
    ///
    /// Returns an error when the input does not have the origin form
    /// or when the remaining components would not re-parse under the
    /// new context.
    pub fn set_encoded_origin(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            // With neither scheme nor authority left, a colon in the
            // first path segment would parse back as a scheme.
            let path = self.encoded_path();
            if !path.starts_with('/') && path.split('/').next().unwrap_or("").contains(':') {
                err!(Invalid, 0);
            }
            self.splice(Part::Scheme, Part::User, &[0], "");
            return self.set_auth_parts(None, false);
        }

        let Some(colon) = s.find(':') else {
            err!(Invalid, 0);
        };
        let (scheme_str, rest) = s.split_at(colon);
        scheme::check_scheme(scheme_str.as_bytes())?;
        let Some(auth_str) = rest[1..].strip_prefix("//") else {
            err!(Invalid, colon + 1);
        };
        let auth = parse_auth_str(auth_str)
            .map_err(|e| Error::new(e.kind(), e.index() + colon + 3))?;

        let path = self.encoded_path();
        if !path.is_empty() && !path.starts_with('/') {
            err!(Invalid, 0);
        }

        let mut new = String::with_capacity(scheme_str.len() + 1);
        new.push_str(scheme_str);
        new.push(':');
        self.splice(Part::Scheme, Part::User, &[new.len()], &new);
        self.set_auth_parts(Some(auth), true)
    }
}

fn split_userinfo(s: &str) -> Result<(String, Option<String>)> {
    match s.split_once(':') {
        Some((user, pass)) => {
            validate(user, table::USER)?;
            validate(pass, table::PASSWORD)
                .map_err(|e| Error::new(e.kind(), e.index() + user.len() + 1))?;
            Ok((user.to_owned(), Some(pass.to_owned())))
        }
        None => {
            validate(s, table::USER)?;
            Ok((s.to_owned(), None))
        }
    }
}

fn host_meta_of(s: &str) -> Result<(HostKind, [u8; 16])> {
    crate::bnf::parse_all(s.as_bytes(), |cur| {
        let mut parts = Parts::new();
        authority::host(cur, &mut parts)?;
        Ok((parts.host, parts.ip_addr))
    })
}

fn parse_auth_str(s: &str) -> Result<AuthParts> {
    let mut parts = Parts::new();
    crate::bnf::parse_all(s.as_bytes(), |cur| {
        authority::authority(cur, &mut parts)
    })?;

    let pass_span = &s[parts.offset[idx(Part::Pass)]..parts.offset[idx(Part::Host)]];
    let userinfo = if pass_span.is_empty() {
        None
    } else {
        let user = &s[..parts.offset[idx(Part::Pass)]];
        let pass = pass_span
            .strip_suffix('@')
            .and_then(|p| p.strip_prefix(':'));
        Some((user.to_owned(), pass.map(str::to_owned)))
    };

    let host = &s[parts.offset[idx(Part::Host)]..parts.offset[idx(Part::Port)]];
    let port = s[parts.offset[idx(Part::Port)]..].strip_prefix(':');

    Ok(AuthParts {
        userinfo,
        host: host.to_owned(),
        host_kind: parts.host,
        ip_addr: parts.ip_addr,
        port: port.map(str::to_owned),
    })
}

fn check_port(digits: &str, base: usize) -> Result<()> {
    if let Some(i) = digits.bytes().position(|x| !x.is_ascii_digit()) {
        err!(Invalid, base + i);
    }
    if authority::parse_port(digits.as_bytes()).is_none() {
        err!(BadPort, base);
    }
    Ok(())
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Url").field(&self.as_str()).finish()
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Url {}

impl PartialEq<str> for Url {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Url {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Url> for str {
    fn eq(&self, other: &Url) -> bool {
        self == other.as_str()
    }
}

impl hash::Hash for Url {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Url {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Url {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl FromStr for Url {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(de::Error::custom)
    }
}
