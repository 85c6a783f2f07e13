//! The `temporal_format` crate prints and parses date, time, offset and
//! time zone values with a compact pattern language.
//!
//! ```rust
//! use temporal_format::{DateTimeFormatter, iso::IsoDate};
//!
//! let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
//! let date = IsoDate::new(2011, 12, 3).unwrap();
//! assert_eq!(formatter.format(&date).unwrap(), "2011-12-03");
//!
//! let parsed = formatter.parse("2011-12-03").unwrap();
//! assert_eq!(parsed.date(), Some(date));
//! ```
//!
//! A pattern is compiled once into an immutable tree of printer-parser
//! elements. Printing walks the tree appending text, parsing walks the
//! same tree collecting raw field values which are then resolved into a
//! consistent date, time, offset, zone and chronology.
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/boa-dev/boa/main/assets/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/boa-dev/boa/main/assets/logo.svg"
)]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in benchmarks.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,

    // Add temporarily - Needs addressing
    clippy::missing_panics_doc,
)]

pub mod chronology;
pub mod error;
pub mod fields;
pub mod format;
pub mod iso;
pub mod options;
pub mod provider;
pub mod resolver;
pub mod temporal;
pub mod trie;
pub mod zone;

pub(crate) mod cache;

#[doc(hidden)]
pub(crate) mod utils;

/// Re-export of `TinyAsciiStr` from `tinystr`.
pub use tinystr::TinyAsciiStr;

/// Re-export of `Locale` from `icu_locale`.
pub use icu_locale::Locale;

#[doc(inline)]
pub use error::TemporalError;

pub use crate::fields::{Field, FieldValues, ValueRange};
pub use crate::format::{DateTimeFormatter, DateTimeFormatterBuilder, ParsePosition};
pub use crate::resolver::Parsed;
pub use crate::temporal::TemporalAccessor;

/// The `temporal_format` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

/// A library specific trait for unwrapping assertions.
pub(crate) trait TemporalUnwrap {
    type Output;

    /// `temporal_format` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn temporal_unwrap(self) -> TemporalResult<Self::Output>;
}

impl<T> TemporalUnwrap for Option<T> {
    type Output = T;

    fn temporal_unwrap(self) -> TemporalResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(TemporalError::assert())
    }
}

// Relevant numeric constants
/// Seconds per day constant: 86 400
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
/// Nanoseconds per second constant: 1e+9
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Nanoseconds per day constant: 8.64e+13
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;
/// The smallest supported proleptic year.
pub const MIN_YEAR: i64 = -999_999_999;
/// The largest supported proleptic year.
pub const MAX_YEAR: i64 = 999_999_999;
