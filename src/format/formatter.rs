//! The compiled formatter and its parse position.

use core::fmt;
use std::sync::Arc;

use icu_locale::Locale;

use crate::{
    chronology::{self, Chronology},
    error::ErrorKind,
    fields::Field,
    options::{DecimalStyle, FormatStyle, ResolverStyle},
    provider::{TextProvider, ZoneProvider, ENGLISH_TEXT, STATIC_ZONES},
    resolver::Parsed,
    temporal::TemporalAccessor,
    zone::ZoneId,
    TemporalError, TemporalResult,
};

use super::{
    builder::DateTimeFormatterBuilder,
    context::{ParseContext, PrintContext},
    element::Composite,
};

/// The longest input echoed back in a parse error message.
const MAX_ECHOED_TEXT: usize = 64;

/// A position within parsed text, counted in characters.
///
/// Parsing starts at [`ParsePosition::index`] and advances it past the
/// consumed text. On failure the index is left untouched and the position
/// the failure was detected at is recorded as the error index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParsePosition {
    index: usize,
    error_index: Option<usize>,
}

impl ParsePosition {
    /// Creates a position at `index` with no error.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            error_index: None,
        }
    }

    /// The character index to parse from next.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// The character index a failed parse stopped at.
    #[must_use]
    pub const fn error_index(&self) -> Option<usize> {
        self.error_index
    }

    pub fn set_error_index(&mut self, error_index: Option<usize>) {
        self.error_index = error_index;
    }
}

/// An immutable formatter for printing and parsing date-time text.
///
/// A formatter is created from a pattern, from a localized style, from a
/// [`DateTimeFormatterBuilder`] or taken from the predefined ISO and
/// RFC 1123 formats. The `with_*` methods return a copy with one setting
/// changed, sharing the compiled element tree.
///
/// ```rust
/// use temporal_format::{DateTimeFormatter, iso::IsoDate};
///
/// let formatter = DateTimeFormatter::of_pattern("d MMMM uuuu").unwrap();
/// let parsed = formatter.parse("3 December 2011").unwrap();
/// assert_eq!(parsed.date(), Some(IsoDate::new(2011, 12, 3).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    printer_parser: Arc<Composite>,
    locale: Locale,
    decimal_style: DecimalStyle,
    resolver_style: ResolverStyle,
    resolver_fields: Option<Arc<[Field]>>,
    chronology: Option<&'static dyn Chronology>,
    zone: Option<ZoneId>,
    text: &'static dyn TextProvider,
    zones: &'static dyn ZoneProvider,
}

// ==== Construction ====

impl DateTimeFormatter {
    pub(crate) fn new(printer_parser: Arc<Composite>, locale: Locale) -> Self {
        Self {
            printer_parser,
            locale,
            decimal_style: DecimalStyle::STANDARD,
            resolver_style: ResolverStyle::Smart,
            resolver_fields: None,
            chronology: None,
            zone: None,
            text: &ENGLISH_TEXT,
            zones: &STATIC_ZONES,
        }
    }

    pub(crate) fn composite(&self) -> &Composite {
        &self.printer_parser
    }

    /// Creates a formatter from a pattern such as `"uuuu-MM-dd"`.
    pub fn of_pattern(pattern: &str) -> TemporalResult<Self> {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_pattern(pattern)?;
        Ok(builder.to_formatter())
    }

    /// Creates a formatter from a pattern, for a specific locale.
    pub fn of_pattern_with_locale(pattern: &str, locale: Locale) -> TemporalResult<Self> {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_pattern(pattern)?;
        Ok(builder.to_formatter_with_locale(locale))
    }

    fn of_localized(date_style: Option<FormatStyle>, time_style: Option<FormatStyle>) -> TemporalResult<Self> {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_localized(date_style, time_style)?;
        Ok(builder.to_formatter().with_chronology(Some(&chronology::ISO)))
    }

    /// A formatter for the localized date of `style`.
    pub fn of_localized_date(style: FormatStyle) -> TemporalResult<Self> {
        Self::of_localized(Some(style), None)
    }

    /// A formatter for the localized time of `style`.
    pub fn of_localized_time(style: FormatStyle) -> TemporalResult<Self> {
        Self::of_localized(None, Some(style))
    }

    /// A formatter for the localized date and time of the given styles.
    pub fn of_localized_date_time(date_style: FormatStyle, time_style: FormatStyle) -> TemporalResult<Self> {
        Self::of_localized(Some(date_style), Some(time_style))
    }
}

// ==== Settings ====

impl DateTimeFormatter {
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn decimal_style(&self) -> DecimalStyle {
        self.decimal_style
    }

    pub fn resolver_style(&self) -> ResolverStyle {
        self.resolver_style
    }

    /// The fields taking part in resolution, all of them when `None`.
    pub fn resolver_fields(&self) -> Option<&[Field]> {
        self.resolver_fields.as_deref()
    }

    /// The override chronology.
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chronology
    }

    /// The override zone.
    pub fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    pub fn text_provider(&self) -> &'static dyn TextProvider {
        self.text
    }

    pub fn zone_provider(&self) -> &'static dyn ZoneProvider {
        self.zones
    }

    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_decimal_style(&self, decimal_style: DecimalStyle) -> Self {
        Self {
            decimal_style,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_resolver_style(&self, resolver_style: ResolverStyle) -> Self {
        Self {
            resolver_style,
            ..self.clone()
        }
    }

    /// Restricts resolution to `fields`. Parsed values of other fields are
    /// dropped before resolving.
    #[must_use]
    pub fn with_resolver_fields(&self, fields: Option<&[Field]>) -> Self {
        Self {
            resolver_fields: fields.map(Arc::from),
            ..self.clone()
        }
    }

    /// Sets the chronology used to print, and to parse when the text holds
    /// none.
    #[must_use]
    pub fn with_chronology(&self, chronology: Option<&'static dyn Chronology>) -> Self {
        Self {
            chronology,
            ..self.clone()
        }
    }

    /// Sets the zone values are converted to before printing, and the zone
    /// assumed when parsed text holds none.
    #[must_use]
    pub fn with_zone(&self, zone: Option<ZoneId>) -> Self {
        Self {
            zone,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_text_provider(&self, text: &'static dyn TextProvider) -> Self {
        Self { text, ..self.clone() }
    }

    #[must_use]
    pub fn with_zone_provider(&self, zones: &'static dyn ZoneProvider) -> Self {
        Self {
            zones,
            ..self.clone()
        }
    }
}

// ==== Printing ====

impl DateTimeFormatter {
    /// Prints `temporal` to a new string.
    pub fn format(&self, temporal: &dyn TemporalAccessor) -> TemporalResult<String> {
        let mut buf = String::with_capacity(32);
        let mut ctx = PrintContext::new(temporal, self)?;
        self.printer_parser.format(&mut ctx, &mut buf)?;
        Ok(buf)
    }

    /// Prints `temporal` to `sink`.
    ///
    /// Nothing is written when printing fails.
    pub fn format_to<W: fmt::Write + ?Sized>(
        &self,
        temporal: &dyn TemporalAccessor,
        sink: &mut W,
    ) -> TemporalResult<()> {
        let text = self.format(temporal)?;
        sink.write_str(&text)
            .map_err(|_| TemporalError::general("Failed to write the formatted text"))
    }
}

// ==== Parsing ====

impl DateTimeFormatter {
    /// Parses and resolves the whole of `text`.
    pub fn parse(&self, text: &str) -> TemporalResult<Parsed> {
        self.parse_resolved(text, None)
    }

    /// Parses and resolves `text` from `position`, leaving any text after
    /// the match unparsed.
    pub fn parse_resolved_at(&self, text: &str, position: &mut ParsePosition) -> TemporalResult<Parsed> {
        self.parse_resolved(text, Some(position))
    }

    /// Parses `text` from `position` without resolving.
    ///
    /// The returned values are the raw fields written by the parser. On
    /// failure `None` is returned and the error index of `position` is set.
    pub fn parse_unresolved(&self, text: &str, position: &mut ParsePosition) -> Option<Parsed> {
        let chars: Vec<char> = text.chars().collect();
        self.parse_context(&chars, position).map(ParseContext::into_parsed)
    }

    fn parse_context(&self, chars: &[char], position: &mut ParsePosition) -> Option<ParseContext<'_>> {
        let mut ctx = ParseContext::new(self);
        match self.printer_parser.parse(&mut ctx, chars, position.index) {
            Ok(end) => {
                position.index = end;
                Some(ctx)
            }
            Err(error_index) => {
                position.error_index = Some(error_index);
                None
            }
        }
    }

    fn parse_resolved(&self, text: &str, position: Option<&mut ParsePosition>) -> TemporalResult<Parsed> {
        let chars: Vec<char> = text.chars().collect();
        let whole = position.is_none();
        let mut local = ParsePosition::new(0);
        let position = position.unwrap_or(&mut local);
        let ctx = self.parse_context(&chars, position);

        let ctx = match ctx {
            Some(ctx) if !(whole && position.index < chars.len()) => ctx,
            _ => {
                let echoed = echoed_text(&chars);
                return Err(match position.error_index {
                    Some(index) => TemporalError::parse(text, index)
                        .with_message(format!("Text '{echoed}' could not be parsed at index {index}")),
                    None => TemporalError::parse(text, position.index).with_message(format!(
                        "Text '{echoed}' could not be parsed, unparsed text found at index {}",
                        position.index
                    )),
                });
            }
        };

        self.resolve(ctx).map_err(|error| {
            if error.kind() == ErrorKind::Parse {
                return error;
            }
            let message = format!(
                "Text '{}' could not be parsed: {}",
                echoed_text(&chars),
                error.message()
            );
            error.with_message(message).at(text, 0)
        })
    }

    fn resolve(&self, ctx: ParseContext<'_>) -> TemporalResult<Parsed> {
        let chronology = ctx.effective_chronology();
        let mut parsed = ctx.into_parsed();
        parsed.chronology = Some(chronology);
        if parsed.zone.is_none() {
            parsed.zone.clone_from(&self.zone);
        }
        parsed.resolve(self.resolver_style, self.resolver_fields.as_deref())?;
        #[cfg(feature = "log")]
        log::trace!("resolved {parsed}");
        Ok(parsed)
    }
}

/// The parsed text as echoed in error messages, cut short when long.
fn echoed_text(chars: &[char]) -> String {
    if chars.len() > MAX_ECHOED_TEXT {
        let mut echoed: String = chars[..MAX_ECHOED_TEXT].iter().collect();
        echoed.push_str("...");
        echoed
    } else {
        chars.iter().collect()
    }
}

impl fmt::Display for DateTimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = self.printer_parser.to_string();
        let inner = pattern
            .strip_prefix('(')
            .and_then(|p| p.strip_suffix(')'))
            .unwrap_or(&pattern);
        f.write_str(inner)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        chronology,
        error::ErrorKind,
        fields::Field,
        iso::{IsoDate, IsoDateTime, IsoTime},
        options::{DecimalStyle, FormatStyle, ResolverStyle},
        temporal::{Instant, TemporalAccessor},
        zone::ZoneId,
        DateTimeFormatter, ParsePosition,
    };

    fn date(year: i32, month: u8, day: u8) -> IsoDate {
        IsoDate::new(year, month, day).unwrap()
    }

    #[test]
    fn year_month_adjacent() {
        let formatter = DateTimeFormatter::of_pattern("uuuuMM").unwrap();
        let mut position = ParsePosition::new(0);
        let parsed = formatter.parse_unresolved("201106", &mut position).unwrap();
        assert_eq!(position.index(), 6);
        assert_eq!(parsed.values().get(Field::Year), Some(2011));
        assert_eq!(parsed.values().get(Field::MonthOfYear), Some(6));
    }

    #[test]
    fn reduced_years() {
        let formatter = DateTimeFormatter::of_pattern("yyMMdd").unwrap();
        let parsed = formatter.parse("120315").unwrap();
        assert_eq!(parsed.date(), Some(date(2012, 3, 15)));

        let strict = DateTimeFormatter::of_pattern("yy").unwrap();
        assert!(strict.parse("1915").is_err());

        let mut builder = crate::DateTimeFormatterBuilder::new();
        builder
            .parse_lenient()
            .append_value_reduced(Field::Year, 2, 2, 2000)
            .unwrap();
        let lenient = builder.to_formatter();
        let parsed = lenient.parse_unresolved("1915", &mut ParsePosition::new(0)).unwrap();
        assert_eq!(parsed.values().get(Field::Year), Some(1915));

        let mut builder = crate::DateTimeFormatterBuilder::new();
        builder.append_value_reduced(Field::Year, 2, 4, 2000).unwrap();
        let wide = builder.to_formatter();
        let mut position = ParsePosition::new(0);
        let parsed = wide.parse_unresolved("1915", &mut position).unwrap();
        assert_eq!(parsed.values().get(Field::Year), Some(1915));
        let parsed = wide.parse_unresolved("12", &mut ParsePosition::new(0)).unwrap();
        assert_eq!(parsed.values().get(Field::Year), Some(2012));
    }

    #[test]
    fn optional_region_suffix() {
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd'T'HH:mmXXX['['VV']']").unwrap();
        let parsed = formatter.parse("2011-12-03T10:15+01:00[Europe/Paris]").unwrap();
        assert_eq!(parsed.zone(), Some(&ZoneId::Region("Europe/Paris".into())));
        assert_eq!(parsed.to_instant().unwrap().epoch_seconds(), 1_322_903_700);

        let parsed = formatter.parse("2011-12-03T10:15+01:00").unwrap();
        assert_eq!(parsed.zone(), None);
        assert_eq!(parsed.values().get(Field::OffsetSeconds), Some(3600));
        assert_eq!(parsed.to_instant().unwrap().epoch_seconds(), 1_322_903_700);

        // A bracket that does not close is left unparsed.
        let err = formatter.parse("2011-12-03T10:15+01:00[Europe/Paris").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.error_index(), Some(22));
    }

    #[test]
    fn fraction_round_trip() {
        let formatter = DateTimeFormatter::of_pattern("HH:mm:ss.SSSSSSSSS").unwrap();
        let time = IsoTime::new(10, 15, 30, 123_456_789).unwrap();
        let text = formatter.format(&time).unwrap();
        assert_eq!(text, "10:15:30.123456789");
        assert_eq!(formatter.parse(&text).unwrap().time(), Some(time));

        let millis = DateTimeFormatter::of_pattern("HH:mm:ss.SSS").unwrap();
        let text = millis.format(&time).unwrap();
        assert_eq!(text, "10:15:30.123");
        assert_eq!(
            millis.parse(&text).unwrap().time(),
            Some(IsoTime::new(10, 15, 30, 123_000_000).unwrap())
        );
    }

    #[test]
    fn conflicting_fields() {
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd EEEE").unwrap();
        assert_eq!(
            formatter.parse("2011-12-03 Saturday").unwrap().date(),
            Some(date(2011, 12, 3))
        );
        let err = formatter.parse("2011-12-03 Monday").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.error_index(), Some(0));
        assert!(err
            .message()
            .starts_with("Text '2011-12-03 Monday' could not be parsed: "));

        // The same field parsed twice with different values fails the parse.
        let twice = DateTimeFormatter::of_pattern("MM MM").unwrap();
        let err = twice.parse("12 11").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.error_index(), Some(3));
        assert!(twice.parse("12 12").is_ok());
    }

    #[test]
    fn lenient_overflow_is_a_range_error() {
        let mut builder = crate::DateTimeFormatterBuilder::new();
        builder.append_value(Field::MilliOfSecond);
        let formatter = builder
            .to_formatter()
            .with_resolver_style(ResolverStyle::Lenient);
        let err = formatter.parse("9223372036854775807").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.error_index(), Some(0));

        let mut builder = crate::DateTimeFormatterBuilder::new();
        builder.append_value(Field::Era).append_literal(' ').append_value(Field::YearOfEra);
        let formatter = builder
            .to_formatter()
            .with_resolver_style(ResolverStyle::Lenient);
        let err = formatter.parse("0 -9223372036854775808").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn hour_twenty_four() {
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd HH:mm").unwrap();

        let smart = formatter.parse("2011-12-03 24:00").unwrap();
        assert_eq!(smart.date(), Some(date(2011, 12, 4)));
        assert_eq!(smart.time(), Some(IsoTime::MIDNIGHT));
        assert_eq!(smart.excess_days(), 0);

        let lenient = formatter
            .with_resolver_style(ResolverStyle::Lenient)
            .parse("2011-12-03 24:00")
            .unwrap();
        assert_eq!(lenient.date(), Some(date(2011, 12, 4)));
        assert_eq!(lenient.time(), Some(IsoTime::MIDNIGHT));

        let time_only = DateTimeFormatter::of_pattern("HH:mm")
            .unwrap()
            .with_resolver_style(ResolverStyle::Lenient);
        let parsed = time_only.parse("24:00").unwrap();
        assert_eq!(parsed.time(), Some(IsoTime::MIDNIGHT));
        assert_eq!(parsed.excess_days(), 1);

        let strict = formatter.with_resolver_style(ResolverStyle::Strict);
        assert!(strict.parse("2011-12-03 24:00").is_err());
    }

    #[test]
    fn parse_errors() {
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
        let err = formatter.parse("2011-12-0x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.error_index(), Some(8));
        assert_eq!(err.parsed_text(), Some("2011-12-0x"));
        assert_eq!(err.message(), "Text '2011-12-0x' could not be parsed at index 8");

        let err = formatter.parse("2011-12-03T").unwrap_err();
        assert_eq!(err.error_index(), Some(10));
        assert_eq!(
            err.message(),
            "Text '2011-12-03T' could not be parsed, unparsed text found at index 10"
        );

        let long = format!("2011-12-03{}", "x".repeat(80));
        let err = formatter.parse(&long).unwrap_err();
        assert!(err.message().contains(&format!("{}...'", "x".repeat(54))));

        let mut position = ParsePosition::new(3);
        let parsed = formatter
            .parse_resolved_at("on 2011-12-03, a Saturday", &mut position)
            .unwrap();
        assert_eq!(parsed.date(), Some(date(2011, 12, 3)));
        assert_eq!(position.index(), 13);

        let mut position = ParsePosition::new(0);
        assert!(formatter.parse_unresolved("2011-1x", &mut position).is_none());
        assert_eq!(position.index(), 0);
        assert_eq!(position.error_index(), Some(5));
    }

    #[test]
    fn settings() {
        let datetime = IsoDateTime::new(date(2011, 12, 3), IsoTime::new(10, 15, 30, 0).unwrap());
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
        let arabic = formatter.with_decimal_style(DecimalStyle::STANDARD.with_zero_digit('\u{660}'));
        assert_eq!(arabic.format(&datetime).unwrap(), "\u{662}\u{660}\u{661}\u{661}-\u{661}\u{662}-\u{660}\u{663}");
        assert_eq!(arabic.parse(&arabic.format(&datetime).unwrap()).unwrap().date(), Some(date(2011, 12, 3)));

        let buddhist = formatter.with_chronology(Some(&chronology::THAI_BUDDHIST));
        assert_eq!(buddhist.format(&datetime).unwrap(), "2554-12-03");
        assert_eq!(buddhist.parse("2554-12-03").unwrap().date(), Some(date(2011, 12, 3)));

        let instant = Instant::from_epoch_seconds(1_322_907_330, 0).unwrap();
        let tokyo = DateTimeFormatter::of_pattern("uuuu-MM-dd HH:mm VV")
            .unwrap()
            .with_zone(Some(ZoneId::Region("Asia/Tokyo".into())));
        assert_eq!(tokyo.format(&instant).unwrap(), "2011-12-03 19:15 Asia/Tokyo");
        let parsed = DateTimeFormatter::of_pattern("uuuu-MM-dd HH:mm")
            .unwrap()
            .with_zone(Some(ZoneId::Region("Asia/Tokyo".into())))
            .parse("2011-12-03 19:15")
            .unwrap();
        assert_eq!(parsed.to_instant().unwrap(), instant);
        assert_eq!(
            parsed.to_zoned_date_time().unwrap().zone(),
            Some(ZoneId::Region("Asia/Tokyo".into()))
        );

        let filtered = formatter.with_resolver_fields(Some(&[Field::Year, Field::MonthOfYear]));
        let parsed = filtered.parse("2011-12-03").unwrap();
        assert_eq!(parsed.date(), None);
        assert_eq!(parsed.values().get(Field::DayOfMonth), None);
        assert_eq!(parsed.values().get(Field::Year), Some(2011));

        let mut out = String::from("on ");
        formatter.format_to(&datetime, &mut out).unwrap();
        assert_eq!(out, "on 2011-12-03");
    }

    #[test]
    fn localized_styles() {
        let datetime = IsoDateTime::new(date(2011, 12, 3), IsoTime::new(22, 15, 30, 0).unwrap());
        let medium = DateTimeFormatter::of_localized_date(FormatStyle::Medium).unwrap();
        assert_eq!(medium.to_string(), "Localized(MEDIUM,)");
        assert_eq!(medium.format(&datetime).unwrap(), "Dec 3, 2011");
        assert_eq!(medium.parse("Dec 3, 2011").unwrap().date(), Some(date(2011, 12, 3)));

        let long = DateTimeFormatter::of_localized_date(FormatStyle::Long).unwrap();
        assert_eq!(long.format(&datetime).unwrap(), "December 3, 2011");

        let short = DateTimeFormatter::of_localized_time(FormatStyle::Short).unwrap();
        assert_eq!(short.format(&datetime).unwrap(), "10:15\u{202f}PM");

        let both = DateTimeFormatter::of_localized_date_time(FormatStyle::Short, FormatStyle::Short).unwrap();
        assert_eq!(both.format(&datetime).unwrap(), "12/3/11, 10:15\u{202f}PM");
        // A time zone name needs a zone.
        let full = DateTimeFormatter::of_localized_time(FormatStyle::Full).unwrap();
        assert!(full.format(&datetime).is_err());
    }
}
