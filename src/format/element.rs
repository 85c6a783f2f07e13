//! The printer-parser elements a formatter is compiled into.
//!
//! Every element prints into a buffer and parses from a slice of characters.
//! A print returns `Ok(false)` when the value is unavailable inside an
//! optional section. A parse returns the position after the consumed text,
//! or `Err` with the position the failure was detected at.

use core::fmt;

use crate::{
    cache::{self, LOCALIZED_PATTERNS},
    chronology::Chronology,
    fields::Field,
    options::FormatStyle,
    TemporalError, TemporalResult,
};

use super::{
    builder::DateTimeFormatterBuilder,
    context::{ParseContext, PrintContext},
    instant::InstantElement,
    numeric::NumberElement,
    offset::{LocalizedOffsetElement, OffsetIdElement},
    text::{ChronologyElement, TextElement},
    zone::{ZoneIdElement, ZoneTextElement},
};

/// A parse setting toggled part way through a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Setting {
    CaseSensitive,
    CaseInsensitive,
    Strict,
    Lenient,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaseSensitive => "ParseCaseSensitive(true)",
            Self::CaseInsensitive => "ParseCaseSensitive(false)",
            Self::Strict => "ParseStrict(true)",
            Self::Lenient => "ParseStrict(false)",
        }
        .fmt(f)
    }
}

/// A single printer-parser.
#[derive(Debug, Clone)]
pub(crate) enum Element {
    Char(char),
    Str(String),
    Number(NumberElement),
    Text(TextElement),
    Instant(InstantElement),
    Offset(OffsetIdElement),
    LocalizedOffset(LocalizedOffsetElement),
    Zone(ZoneIdElement),
    ZoneText(ZoneTextElement),
    Chronology(ChronologyElement),
    Localized {
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
    },
    Settings(Setting),
    Default(Field, i64),
    Pad {
        inner: Box<Element>,
        width: usize,
        pad: char,
    },
    Composite(Composite),
}

impl Element {
    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        match self {
            Self::Char(ch) => {
                buf.push(*ch);
                Ok(true)
            }
            Self::Str(literal) => {
                buf.push_str(literal);
                Ok(true)
            }
            Self::Number(element) => element.format(ctx, buf),
            Self::Text(element) => element.format(ctx, buf),
            Self::Instant(element) => element.format(ctx, buf),
            Self::Offset(element) => element.format(ctx, buf),
            Self::LocalizedOffset(element) => element.format(ctx, buf),
            Self::Zone(element) => element.format(ctx, buf),
            Self::ZoneText(element) => element.format(ctx, buf),
            Self::Chronology(element) => element.format(ctx, buf),
            Self::Localized {
                date_style,
                time_style,
            } => {
                let chronology = ctx.chronology();
                let composite = localized(
                    *date_style,
                    *time_style,
                    chronology,
                    ctx.formatter().text_provider(),
                    ctx.locale(),
                )?;
                composite.format(ctx, buf)
            }
            Self::Settings(_) | Self::Default(..) => Ok(true),
            Self::Pad { inner, width, pad } => {
                let start = buf.len();
                if !inner.format(ctx, buf)? {
                    return Ok(false);
                }
                let len = buf[start..].chars().count();
                if len > *width {
                    return Err(TemporalError::range().with_message(format!(
                        "Cannot print as output of {len} characters exceeds pad width of {width}"
                    )));
                }
                let padding: String = core::iter::repeat(*pad).take(width - len).collect();
                buf.insert_str(start, &padding);
                Ok(true)
            }
            Self::Composite(composite) => composite.format(ctx, buf),
        }
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        match self {
            Self::Char(literal) => match text.get(pos) {
                Some(ch) if ctx.char_equals(*ch, *literal) => Ok(pos + 1),
                _ => Err(pos),
            },
            Self::Str(literal) => ctx.matches_at(text, pos, literal).ok_or(pos),
            Self::Number(element) => element.parse(ctx, text, pos),
            Self::Text(element) => element.parse(ctx, text, pos),
            Self::Instant(element) => element.parse(ctx, text, pos),
            Self::Offset(element) => element.parse(ctx, text, pos),
            Self::LocalizedOffset(element) => element.parse(ctx, text, pos),
            Self::Zone(element) => element.parse(ctx, text, pos),
            Self::ZoneText(element) => element.parse(ctx, text, pos),
            Self::Chronology(element) => element.parse(ctx, text, pos),
            Self::Localized {
                date_style,
                time_style,
            } => {
                let composite = localized(
                    *date_style,
                    *time_style,
                    ctx.effective_chronology(),
                    ctx.text_provider(),
                    ctx.locale(),
                )
                .map_err(|_| pos)?;
                composite.parse(ctx, text, pos)
            }
            Self::Settings(setting) => {
                match setting {
                    Setting::CaseSensitive => ctx.set_case_sensitive(true),
                    Setting::CaseInsensitive => ctx.set_case_sensitive(false),
                    Setting::Strict => ctx.set_strict(true),
                    Setting::Lenient => ctx.set_strict(false),
                }
                Ok(pos)
            }
            Self::Default(field, value) => {
                if ctx.parsed_field(*field).is_none() {
                    ctx.set_parsed_field(*field, *value, pos, pos)?;
                }
                Ok(pos)
            }
            Self::Pad { inner, width, pad } => {
                let strict = ctx.is_strict();
                if pos >= text.len() {
                    return Err(pos);
                }
                let mut end = pos + width;
                if end > text.len() {
                    if strict {
                        return Err(pos);
                    }
                    end = text.len();
                }
                let mut start = pos;
                while start < end && ctx.char_equals(text[start], *pad) {
                    start += 1;
                }
                let result = inner.parse(ctx, &text[..end], start)?;
                if result != end && strict {
                    return Err(start);
                }
                Ok(result)
            }
            Self::Composite(composite) => composite.parse(ctx, text, pos),
        }
    }

    /// The number element inside this element, looking through padding.
    pub(crate) fn as_number_mut(&mut self) -> Option<&mut NumberElement> {
        match self {
            Self::Number(element) => Some(element),
            Self::Pad { inner, .. } => inner.as_number_mut(),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char('\'') => f.write_str("''"),
            Self::Char(ch) => write!(f, "'{ch}'"),
            Self::Str(literal) => write!(f, "'{}'", literal.replace('\'', "''")),
            Self::Number(element) => element.fmt(f),
            Self::Text(element) => element.fmt(f),
            Self::Instant(element) => element.fmt(f),
            Self::Offset(element) => element.fmt(f),
            Self::LocalizedOffset(element) => element.fmt(f),
            Self::Zone(element) => element.fmt(f),
            Self::ZoneText(element) => element.fmt(f),
            Self::Chronology(element) => element.fmt(f),
            Self::Localized {
                date_style,
                time_style,
            } => {
                f.write_str("Localized(")?;
                if let Some(style) = date_style {
                    write!(f, "{style}")?;
                }
                f.write_str(",")?;
                if let Some(style) = time_style {
                    write!(f, "{style}")?;
                }
                f.write_str(")")
            }
            Self::Settings(setting) => setting.fmt(f),
            Self::Default(field, value) => write!(f, "Default({field},{value})"),
            Self::Pad { inner, width, pad } => {
                if *pad == ' ' {
                    write!(f, "Pad({inner},{width})")
                } else {
                    write!(f, "Pad({inner},{width},'{pad}')")
                }
            }
            Self::Composite(composite) => composite.fmt(f),
        }
    }
}

/// Compiles, or fetches from the cache, the localized pattern of a style.
fn localized(
    date_style: Option<FormatStyle>,
    time_style: Option<FormatStyle>,
    chronology: &'static dyn Chronology,
    provider: &'static dyn crate::provider::TextProvider,
    locale: &icu_locale::Locale,
) -> TemporalResult<std::sync::Arc<Composite>> {
    let key = (
        cache::provider_key(provider),
        locale.to_string(),
        date_style,
        time_style,
        chronology.id(),
    );
    LOCALIZED_PATTERNS.get_or_try_insert_with(key, || {
        let pattern = provider.localized_pattern(date_style, time_style, chronology, locale)?;
        #[cfg(feature = "log")]
        log::debug!("compiling localized pattern {pattern:?} for {locale}");
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_pattern(&pattern)?;
        Ok(builder.into_composite())
    })
}

// ==== Composite ====

/// An ordered sequence of elements, optional or mandatory.
#[derive(Debug, Clone, Default)]
pub(crate) struct Composite {
    elements: Vec<Element>,
    optional: bool,
}

impl Composite {
    pub(crate) fn new(elements: Vec<Element>, optional: bool) -> Self {
        Self { elements, optional }
    }

    /// Returns this composite with a different optionality.
    pub(crate) fn with_optional(&self, optional: bool) -> Self {
        if self.optional == optional {
            return self.clone();
        }
        Self::new(self.elements.clone(), optional)
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let start = buf.len();
        if self.optional {
            ctx.start_optional();
        }
        let mut result = Ok(true);
        for element in &self.elements {
            match element.format(ctx, buf) {
                Ok(true) => {}
                Ok(false) => {
                    buf.truncate(start);
                    break;
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        if self.optional {
            ctx.end_optional();
        }
        result
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        if self.optional {
            return Ok(ctx.parse_optional(pos, |ctx| self.parse_all(ctx, text, pos)));
        }
        self.parse_all(ctx, text, pos)
    }

    fn parse_all(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        self.elements
            .iter()
            .try_fold(pos, |pos, element| element.parse(ctx, text, pos))
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.optional { "[" } else { "(" })?;
        for element in &self.elements {
            element.fmt(f)?;
        }
        f.write_str(if self.optional { "]" } else { ")" })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        fields::Field,
        iso::{IsoDate, IsoTime},
        DateTimeFormatter, DateTimeFormatterBuilder, ParsePosition, Parsed,
    };

    fn parse_unresolved(formatter: &DateTimeFormatter, text: &str) -> Option<Parsed> {
        formatter.parse_unresolved(text, &mut ParsePosition::new(0))
    }

    #[test]
    fn literal_display() {
        let formatter = DateTimeFormatterBuilder::new()
            .append_literal('\'')
            .append_literal_str("it's")
            .append_literal('x')
            .to_formatter();
        assert_eq!(formatter.to_string(), "'''it''s''x'");
    }

    #[test]
    fn pad_print_and_parse() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.pad_next_with(4, '*').unwrap();
        builder.append_value(Field::DayOfMonth);
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "Pad(Value(DayOfMonth),4,'*')");

        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "***3");

        let parsed = parse_unresolved(&formatter, "**12").unwrap();
        assert_eq!(parsed.values().get(Field::DayOfMonth), Some(12));
        // The padded element must consume the full width in strict mode.
        assert!(parse_unresolved(&formatter, "*12").is_none());
    }

    #[test]
    fn pad_overflow_is_an_error() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.pad_next(2).unwrap();
        builder.append_value(Field::Year);
        let formatter = builder.to_formatter();
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert!(formatter.format(&date).is_err());
    }

    #[test]
    fn optional_print_skips_missing_fields() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value_fixed(Field::HourOfDay, 2)
            .unwrap()
            .optional_start()
            .append_literal('/')
            .append_value(Field::DayOfMonth);
        builder.optional_end().unwrap();
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "Value(HourOfDay,2)['/'Value(DayOfMonth)]");

        let time = IsoTime::new(9, 30, 0, 0).unwrap();
        assert_eq!(formatter.format(&time).unwrap(), "09");
        // Outside an optional section a missing field is an error.
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert!(formatter.format(&date).is_err());
    }

    #[test]
    fn defaulted_fields() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value_fixed(Field::Year, 4)
            .unwrap()
            .parse_defaulting(Field::MonthOfYear, 1)
            .parse_defaulting(Field::DayOfMonth, 1);
        let formatter = builder.to_formatter();
        let parsed = formatter.parse("2011").unwrap();
        assert_eq!(parsed.date(), IsoDate::new(2011, 1, 1).ok());
    }
}
