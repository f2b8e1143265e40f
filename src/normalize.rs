//! URL normalization.

use crate::encoding::{encode_byte, hex_pair_value, table};
use crate::parts::{HostKind, Part};
use crate::rfc::path::count_segments;
use crate::url::Url;

impl Url {
    /// Lowercases the scheme in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let mut url = Url::parse("HTTPS://example.com/")?;
    /// url.normalize_scheme();
    /// assert_eq!(url.as_str(), "https://example.com/");
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    pub fn normalize_scheme(&mut self) {
        let end = self.scheme_end();
        self.buf_mut_range(0, end).make_ascii_lowercase();
    }

    /// Normalizes the URL in place.
    ///
    /// Normalization lowercases the scheme, upper-cases the hex digits
    /// of retained escapes, decodes every escape whose octet is an
    /// unreserved character, and applies the remove-dot-segments
    /// algorithm of [Section 5.2.4, RFC 3986][rfc] to the path of a
    /// URL that has a scheme and an absolute path. Registered names
    /// are not case-mapped.
    ///
    /// Normalization is idempotent; all container invariants hold
    /// afterwards.
    ///
    /// [rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let mut url = Url::parse("eXAMPLE://a/./b/../b/%63/%7bfoo%7d")?;
    /// url.normalize();
    /// assert_eq!(url.as_str(), "example://a/b/c/%7Bfoo%7D");
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    pub fn normalize(&mut self) {
        self.normalize_scheme();

        for id in [Part::User, Part::Pass, Part::Path, Part::Query, Part::Frag] {
            self.normalize_component(id);
        }
        if self.host_kind() == HostKind::Name {
            self.normalize_component(Part::Host);
            self.reparse_host();
        }

        if self.has_scheme() && self.encoded_path().starts_with('/') {
            let mut path = remove_dot_segments(self.encoded_path());
            // An authority-less path must not begin with "//", which
            // would parse back as an authority.
            if !self.has_authority() && path.starts_with("//") {
                path.insert_str(0, "/.");
            }
            let nseg = count_segments(path.as_bytes());
            self.replace_path_normalized(&path, nseg);
        }
    }

    fn normalize_component(&mut self, id: Part) {
        let stored = self.component(id);
        if !stored.contains('%') {
            return;
        }
        let normalized = normalize_escapes(stored);
        if normalized != stored {
            self.replace_component_normalized(id, &normalized);
        }
    }
}

/// Upper-cases escape hex digits and decodes escapes of unreserved
/// octets. Structural delimiter bytes are copied through untouched.
fn normalize_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let b = s.as_bytes();
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'%' {
            // Escapes in a stored component are validated.
            let x = hex_pair_value(b[i + 1], b[i + 2]);
            if table::UNRESERVED.allows(x) {
                out.push(x as char);
            } else {
                out.push_str(encode_byte(x));
            }
            i += 3;
        } else {
            out.push(b[i] as char);
            i += 1;
        }
    }
    out
}

/// The remove-dot-segments algorithm of Section 5.2.4, RFC 3986,
/// applied to an absolute encoded path.
fn remove_dot_segments(mut input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/.." {
            pop_segment(&mut output);
            input = "/";
        } else if input.starts_with("/../") {
            pop_segment(&mut output);
            input = &input[3..];
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let end = match input[1..].find('/') {
                Some(i) => i + 1,
                None => input.len(),
            };
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

fn pop_segment(output: &mut String) {
    if let Some(i) = output.rfind('/') {
        output.truncate(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_segments() {
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("/../../../g"), "/g");
        assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
        assert_eq!(remove_dot_segments("/a/b/."), "/a/b/");
        assert_eq!(remove_dot_segments("/"), "/");
    }

    #[test]
    fn escape_rules() {
        assert_eq!(normalize_escapes("%7e%41"), "~A");
        assert_eq!(normalize_escapes("%3a"), "%3A");
        assert_eq!(normalize_escapes("/a%2Fb"), "/a%2Fb");
    }
}
