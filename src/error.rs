//! This module implements `TemporalError`.

use core::fmt;
use std::borrow::Cow;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// A malformed pattern string.
    Pattern,
    /// An inconsistent element or builder configuration.
    Configuration,
    /// A field could not be read from the value being formatted.
    Unavailable,
    /// Text could not be parsed.
    Parse,
    /// Two sources produced different values for the same field.
    Conflict,
    /// A value was out of its valid range.
    Range,
    /// The resolution engine failed to converge.
    Resolution,
    /// An internal assertion failed.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Pattern => "PatternError",
            Self::Configuration => "ConfigurationError",
            Self::Unavailable => "ValueUnavailableError",
            Self::Parse => "ParseError",
            Self::Conflict => "ConflictError",
            Self::Range => "RangeError",
            Self::Resolution => "InternalResolutionError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The input and offset a parse failure is reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocation {
    text: String,
    index: usize,
}

/// The error type for `temporal_format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    location: Option<Box<ParseLocation>>,
}

impl TemporalError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
            location: None,
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a pattern error.
    #[must_use]
    pub fn pattern() -> Self {
        Self::new(ErrorKind::Pattern)
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Create a value unavailable error.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(ErrorKind::Unavailable)
    }

    /// Create a parse error for `text` failing at the character `index`.
    #[must_use]
    pub fn parse(text: &str, index: usize) -> Self {
        Self {
            kind: ErrorKind::Parse,
            msg: Cow::Borrowed(""),
            location: Some(Box::new(ParseLocation {
                text: text.to_owned(),
                index,
            })),
        }
    }

    /// Create a conflict error.
    #[must_use]
    pub fn conflict() -> Self {
        Self::new(ErrorKind::Conflict)
    }

    /// Create a range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create an internal resolution error.
    #[must_use]
    pub fn resolution() -> Self {
        Self::new(ErrorKind::Resolution)
    }

    /// Create an assertion error.
    #[must_use]
    pub fn assert() -> Self {
        Self::new(ErrorKind::Assert)
            .with_message("Implementation error: an internal invariant was violated.")
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Attaches the parse location of `text` at `index`, keeping the kind.
    #[must_use]
    pub(crate) fn at(mut self, text: &str, index: usize) -> Self {
        self.location = Some(Box::new(ParseLocation {
            text: text.to_owned(),
            index,
        }));
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the text that failed to parse, if this is a parse failure.
    #[inline]
    #[must_use]
    pub fn parsed_text(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.text.as_str())
    }

    /// Returns the zero-based character offset a parse failed at.
    #[inline]
    #[must_use]
    pub fn error_index(&self) -> Option<usize> {
        self.location.as_ref().map(|l| l.index)
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        if let Some(location) = &self.location {
            write!(
                f,
                " (text '{}' at index {})",
                location.text, location.index
            )?;
        }

        Ok(())
    }
}

impl std::error::Error for TemporalError {}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, TemporalError};

    #[test]
    fn display_with_location() {
        let err = TemporalError::parse("2011-13-03", 5).with_message("could not be parsed");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.error_index(), Some(5));
        assert_eq!(err.parsed_text(), Some("2011-13-03"));
        assert_eq!(
            err.to_string(),
            "ParseError: could not be parsed (text '2011-13-03' at index 5)"
        );
    }

    #[test]
    fn location_keeps_kind() {
        let err = TemporalError::conflict()
            .with_message("Conflict found")
            .at("abc", 0);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.error_index(), Some(0));
        assert_eq!(TemporalError::range().to_string(), "RangeError");
    }
}
