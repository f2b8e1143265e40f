#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
//! A modifiable URL container that parses, validates, inspects, and
//! mutates URI references in strict adherence to [RFC 3986].
//!
//! The central type is [`Url`]: it owns a single contiguous serialized
//! byte string together with an index into its components, and offers
//! typed accessors and mutators that keep the stored form
//! grammar-valid at every step.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! # Examples
//!
//! Parse a URL and inspect its components:
//!
//! ```
//! use urlbuf::{HostKind, Url};
//!
//! let url = Url::parse("http://user:pw@example.com:8080/a/b?x=1&y=2#f")?;
//! assert_eq!(url.scheme(), Some("http"));
//! assert_eq!(url.user(), "user");
//! assert_eq!(url.password(), "pw");
//! assert_eq!(url.encoded_host(), "example.com");
//! assert_eq!(url.host_kind(), HostKind::Name);
//! assert_eq!(url.port_number(), 8080);
//! assert_eq!(url.segments().iter().count(), 2);
//! assert_eq!(url.params().len(), 2);
//! assert_eq!(url.fragment(), Some("f".into()));
//! # Ok::<_, urlbuf::Error>(())
//! ```
//!
//! Build a URL from scratch; raw setters percent-encode for you:
//!
//! ```
//! use urlbuf::Url;
//!
//! let mut url = Url::new();
//! url.set_scheme("HTTPS")?;
//! url.set_host("example.com")?;
//! url.set_path("/x y")?;
//! assert_eq!(url.as_str(), "HTTPS://example.com/x%20y");
//!
//! url.normalize_scheme();
//! assert_eq!(url.as_str(), "https://example.com/x%20y");
//! # Ok::<_, urlbuf::Error>(())
//! ```

mod bnf;
pub mod encoding;
mod error;
mod normalize;
mod params;
mod parts;
mod rfc;
mod segments;
mod url;

pub use crate::url::Url;
pub use error::{Error, ErrorKind};
pub use params::{Param, Params, ParamsMut};
pub use parts::HostKind;
pub use segments::{Segments, SegmentsMut};
