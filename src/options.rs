//! Native implementation of the formatting and parsing options.
//!
//! The options describe how values are printed (sign and text styles,
//! numeral symbols) and how strictly parsed fields are resolved.

use core::{fmt, str::FromStr};

// ==== ArithmeticOverflow ====

/// `ArithmeticOverflow` controls whether an out of range day of month is
/// constrained to the end of the month or rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOverflow {
    /// Constrain option
    #[default]
    Constrain,
    /// Reject option
    Reject,
}

/// A parsing error for `ArithemeticOverflow`
#[derive(Debug, Clone, Copy)]
pub struct ParseArithmeticOverflowError;

impl fmt::Display for ParseArithmeticOverflowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid overflow value")
    }
}

impl FromStr for ArithmeticOverflow {
    type Err = ParseArithmeticOverflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constrain" => Ok(Self::Constrain),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseArithmeticOverflowError),
        }
    }
}

impl fmt::Display for ArithmeticOverflow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Constrain => "constrain",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

// ==== ResolverStyle ====

/// How strictly parsed fields are resolved into a date and time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverStyle {
    /// Every field must be within its range and the date must exist.
    Strict,
    /// Fields must be within their outer range, an invalid day of month is
    /// constrained and 24:00 is accepted as the end of day.
    #[default]
    Smart,
    /// Out of range values are carried into the next larger unit.
    Lenient,
}

impl ResolverStyle {
    /// The day of month overflow behavior of this style.
    pub(crate) fn overflow(self) -> ArithmeticOverflow {
        match self {
            Self::Strict => ArithmeticOverflow::Reject,
            Self::Smart | Self::Lenient => ArithmeticOverflow::Constrain,
        }
    }
}

/// A parsing error for `ResolverStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseResolverStyleError;

impl fmt::Display for ParseResolverStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid resolver style")
    }
}

impl FromStr for ResolverStyle {
    type Err = ParseResolverStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "smart" => Ok(Self::Smart),
            "lenient" => Ok(Self::Lenient),
            _ => Err(ParseResolverStyleError),
        }
    }
}

impl fmt::Display for ResolverStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Strict => "strict",
            Self::Smart => "smart",
            Self::Lenient => "lenient",
        }
        .fmt(f)
    }
}

// ==== SignStyle ====

/// The handling of the positive and negative sign of numeric values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignStyle {
    /// Output the sign only if negative, parse strictly accepts no sign on
    /// positive values.
    #[default]
    Normal,
    /// Always output a sign.
    Always,
    /// Never output a sign, the absolute value is printed.
    Never,
    /// Negative values are rejected when printing and parsing.
    NotNegative,
    /// Output a positive sign when the value exceeds the pad width.
    ExceedsPad,
}

impl SignStyle {
    /// Whether a parsed sign is accepted in the given parse mode.
    pub(crate) fn parse(self, positive: bool, strict: bool, fixed_width: bool) -> bool {
        match self {
            // Valid if negative or (positive and lenient).
            Self::Normal => !positive || !strict,
            Self::Always | Self::ExceedsPad => true,
            // Never and NotNegative accept a sign only in lenient variable width mode.
            Self::Never | Self::NotNegative => !strict && !fixed_width,
        }
    }
}

/// A parsing error for `SignStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseSignStyleError;

impl fmt::Display for ParseSignStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid sign style")
    }
}

impl FromStr for SignStyle {
    type Err = ParseSignStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "not-negative" => Ok(Self::NotNegative),
            "exceeds-pad" => Ok(Self::ExceedsPad),
            _ => Err(ParseSignStyleError),
        }
    }
}

impl fmt::Display for SignStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normal => "NORMAL",
            Self::Always => "ALWAYS",
            Self::Never => "NEVER",
            Self::NotNegative => "NOT_NEGATIVE",
            Self::ExceedsPad => "EXCEEDS_PAD",
        }
        .fmt(f)
    }
}

// ==== TextStyle ====

/// The length of text used when printing and parsing text fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextStyle {
    /// Full text, such as "Monday".
    #[default]
    Full,
    /// Full text for stand-alone use.
    FullStandalone,
    /// Short text, such as "Mon".
    Short,
    /// Short text for stand-alone use.
    ShortStandalone,
    /// Narrow text, such as "M".
    Narrow,
    /// Narrow text for stand-alone use.
    NarrowStandalone,
}

impl TextStyle {
    /// Whether this is a stand-alone style.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            Self::FullStandalone | Self::ShortStandalone | Self::NarrowStandalone
        )
    }

    /// Returns the normal version of this style.
    pub fn as_normal(self) -> Self {
        match self {
            Self::Full | Self::FullStandalone => Self::Full,
            Self::Short | Self::ShortStandalone => Self::Short,
            Self::Narrow | Self::NarrowStandalone => Self::Narrow,
        }
    }

    /// Returns the stand-alone version of this style.
    pub fn as_standalone(self) -> Self {
        match self {
            Self::Full | Self::FullStandalone => Self::FullStandalone,
            Self::Short | Self::ShortStandalone => Self::ShortStandalone,
            Self::Narrow | Self::NarrowStandalone => Self::NarrowStandalone,
        }
    }
}

/// A parsing error for `TextStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseTextStyleError;

impl fmt::Display for ParseTextStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid text style")
    }
}

impl FromStr for TextStyle {
    type Err = ParseTextStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "full-standalone" => Ok(Self::FullStandalone),
            "short" => Ok(Self::Short),
            "short-standalone" => Ok(Self::ShortStandalone),
            "narrow" => Ok(Self::Narrow),
            "narrow-standalone" => Ok(Self::NarrowStandalone),
            _ => Err(ParseTextStyleError),
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => "FULL",
            Self::FullStandalone => "FULL_STANDALONE",
            Self::Short => "SHORT",
            Self::ShortStandalone => "SHORT_STANDALONE",
            Self::Narrow => "NARROW",
            Self::NarrowStandalone => "NARROW_STANDALONE",
        }
        .fmt(f)
    }
}

// ==== FormatStyle ====

/// The style of a localized date or time format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatStyle {
    /// Full text style, such as "Tuesday, April 12, 1952 AD".
    Full,
    /// Long text style, such as "January 12, 1952".
    Long,
    /// Medium text style, such as "Jan 12, 1952".
    #[default]
    Medium,
    /// Short text style, mostly numeric, such as "12.13.52".
    Short,
}

/// A parsing error for `FormatStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseFormatStyleError;

impl fmt::Display for ParseFormatStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid format style")
    }
}

impl FromStr for FormatStyle {
    type Err = ParseFormatStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "long" => Ok(Self::Long),
            "medium" => Ok(Self::Medium),
            "short" => Ok(Self::Short),
            _ => Err(ParseFormatStyleError),
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => "FULL",
            Self::Long => "LONG",
            Self::Medium => "MEDIUM",
            Self::Short => "SHORT",
        }
        .fmt(f)
    }
}

// ==== DecimalStyle ====

/// The localized symbols used to print and parse numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalStyle {
    zero_digit: char,
    positive_sign: char,
    negative_sign: char,
    decimal_separator: char,
}

impl Default for DecimalStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DecimalStyle {
    /// ASCII digits with '+', '-' and '.'.
    pub const STANDARD: Self = Self {
        zero_digit: '0',
        positive_sign: '+',
        negative_sign: '-',
        decimal_separator: '.',
    };

    /// Returns a style using `zero_digit` as the zero of ten consecutive digits.
    pub const fn with_zero_digit(mut self, zero_digit: char) -> Self {
        self.zero_digit = zero_digit;
        self
    }

    /// Returns a style with a different positive sign.
    pub const fn with_positive_sign(mut self, positive_sign: char) -> Self {
        self.positive_sign = positive_sign;
        self
    }

    /// Returns a style with a different negative sign.
    pub const fn with_negative_sign(mut self, negative_sign: char) -> Self {
        self.negative_sign = negative_sign;
        self
    }

    /// Returns a style with a different decimal separator.
    pub const fn with_decimal_separator(mut self, decimal_separator: char) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }

    /// The character representing zero.
    pub const fn zero_digit(&self) -> char {
        self.zero_digit
    }

    /// The character representing the positive sign.
    pub const fn positive_sign(&self) -> char {
        self.positive_sign
    }

    /// The character representing the negative sign.
    pub const fn negative_sign(&self) -> char {
        self.negative_sign
    }

    /// The character representing the decimal point.
    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Converts `ch` to its digit value, if it is a digit of this style.
    pub fn convert_to_digit(&self, ch: char) -> Option<u8> {
        let value = (ch as u32).checked_sub(self.zero_digit as u32)?;
        (value <= 9).then_some(value as u8)
    }

    /// Converts ASCII digits in `text` into this style's digits.
    pub(crate) fn convert_number_to_i18n(&self, text: &str) -> String {
        if self.zero_digit == '0' {
            return text.to_owned();
        }
        let offset = self.zero_digit as u32 - '0' as u32;
        text.chars()
            .map(|ch| {
                if ch.is_ascii_digit() {
                    char::from_u32(ch as u32 + offset).unwrap_or(ch)
                } else {
                    ch
                }
            })
            .collect()
    }
}

impl fmt::Display for DecimalStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "DecimalStyle[{}{}{}{}]",
            self.zero_digit, self.positive_sign, self.negative_sign, self.decimal_separator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DecimalStyle, ResolverStyle, SignStyle, TextStyle};
    use core::str::FromStr;

    #[test]
    fn option_strings() {
        assert_eq!(ResolverStyle::from_str("lenient").unwrap(), ResolverStyle::Lenient);
        assert!(ResolverStyle::from_str("LENIENT").is_err());
        assert_eq!(ResolverStyle::default(), ResolverStyle::Smart);
        assert_eq!(SignStyle::from_str("exceeds-pad").unwrap(), SignStyle::ExceedsPad);
        assert_eq!(SignStyle::ExceedsPad.to_string(), "EXCEEDS_PAD");
        assert_eq!(TextStyle::Short.as_standalone(), TextStyle::ShortStandalone);
        assert_eq!(TextStyle::NarrowStandalone.as_normal(), TextStyle::Narrow);
    }

    #[test]
    fn sign_parsing() {
        assert!(SignStyle::Normal.parse(false, true, false));
        assert!(!SignStyle::Normal.parse(true, true, false));
        assert!(SignStyle::Normal.parse(true, false, false));
        assert!(!SignStyle::Never.parse(true, false, true));
        assert!(SignStyle::Never.parse(true, false, false));
    }

    #[test]
    fn decimal_style_digits() {
        let style = DecimalStyle::STANDARD;
        assert_eq!(style.convert_to_digit('7'), Some(7));
        assert_eq!(style.convert_to_digit('a'), None);
        assert_eq!(style.convert_to_digit('/'), None);

        let arabic_indic = DecimalStyle::STANDARD.with_zero_digit('\u{0660}');
        assert_eq!(arabic_indic.convert_to_digit('\u{0663}'), Some(3));
        assert_eq!(arabic_indic.convert_number_to_i18n("12"), "\u{0661}\u{0662}");
    }
}
