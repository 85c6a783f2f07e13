//! Printing and parsing with compiled formatters.
//!
//! A [`DateTimeFormatter`] owns an immutable tree of printer-parser
//! elements. Formatters are built with a [`DateTimeFormatterBuilder`],
//! either element by element or from a pattern string such as
//! `"uuuu-MM-dd'T'HH:mm"`.
//!
//! ```rust
//! use temporal_format::{DateTimeFormatter, iso::{IsoDate, IsoDateTime, IsoTime}};
//!
//! let formatter = DateTimeFormatter::of_pattern("dd MMM uuuu, HH:mm").unwrap();
//! let datetime = IsoDateTime::new(
//!     IsoDate::new(2011, 12, 3).unwrap(),
//!     IsoTime::new(10, 15, 0, 0).unwrap(),
//! );
//! assert_eq!(formatter.format(&datetime).unwrap(), "03 Dec 2011, 10:15");
//! ```

mod builder;
mod context;
mod element;
mod formatter;
mod instant;
mod numeric;
mod offset;
mod pattern;
mod predefined;
mod text;
mod zone;

pub use builder::DateTimeFormatterBuilder;
pub use formatter::{DateTimeFormatter, ParsePosition};

pub(crate) use element::Composite;
