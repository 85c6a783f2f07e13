//! The mutable builder of formatters.

use std::sync::Arc;

use icu_locale::{locale, Locale};

use crate::{
    fields::Field,
    iso::IsoDate,
    options::{FormatStyle, SignStyle, TextStyle},
    TemporalError, TemporalResult,
};

use super::{
    element::{Composite, Element, Setting},
    instant::InstantElement,
    numeric::NumberElement,
    offset::{LocalizedOffsetElement, OffsetIdElement},
    text::{ChronologyElement, TextElement},
    zone::{ZoneIdElement, ZoneQuery, ZoneTextElement},
    DateTimeFormatter,
};

/// The elements of the formatter or optional section being built.
#[derive(Debug, Clone, Default)]
struct Scope {
    elements: Vec<Element>,
    optional: bool,
    pad_next_width: usize,
    pad_next_char: char,
    /// The index of the last variable width value, the head of a run of
    /// adjacent values.
    value_parser_index: Option<usize>,
}

impl Scope {
    fn new(optional: bool) -> Self {
        Self {
            optional,
            ..Self::default()
        }
    }
}

/// Builds a `DateTimeFormatter` element by element.
///
/// Optional sections nest. Building a formatter closes every open section.
///
/// ```rust
/// use temporal_format::{DateTimeFormatterBuilder, Field, iso::IsoDate};
///
/// let mut builder = DateTimeFormatterBuilder::new();
/// builder
///     .append_value_fixed(Field::Year, 4)
///     .unwrap()
///     .append_literal('/')
///     .append_value(Field::MonthOfYear);
/// let formatter = builder.to_formatter();
/// let date = IsoDate::new(2011, 12, 3).unwrap();
/// assert_eq!(formatter.format(&date).unwrap(), "2011/12");
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeFormatterBuilder {
    scopes: Vec<Scope>,
}

impl Default for DateTimeFormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTimeFormatterBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(false)],
        }
    }

    fn active(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::new(false));
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Appends an element, wrapping it in padding when requested, and
    /// returns its index.
    fn append_element(&mut self, element: Element) -> usize {
        let active = self.active();
        let element = if active.pad_next_width > 0 {
            let padded = Element::Pad {
                inner: Box::new(element),
                width: active.pad_next_width,
                pad: active.pad_next_char,
            };
            active.pad_next_width = 0;
            active.pad_next_char = ' ';
            padded
        } else {
            element
        };
        active.elements.push(element);
        active.value_parser_index = None;
        active.elements.len() - 1
    }

    /// Appends a number, tracking runs of adjacent values.
    ///
    /// A fixed width value following a variable width one reserves its
    /// width from the earlier value. Any other value ends the run.
    pub(crate) fn append_number(&mut self, number: NumberElement) -> &mut Self {
        let Some(head) = self.active().value_parser_index else {
            let index = self.append_element(Element::Number(number));
            self.active().value_parser_index = Some(index);
            return self;
        };
        let fixed = number.min_width() == number.max_width() && number.sign_style() == SignStyle::NotNegative;
        let width = number.max_width();
        if fixed {
            self.append_element(Element::Number(number.with_fixed_width()));
            self.active().value_parser_index = Some(head);
        } else {
            let index = self.append_element(Element::Number(number));
            self.active().value_parser_index = Some(index);
        }
        if let Some(base) = self.active().elements[head].as_number_mut() {
            *base = if fixed {
                base.with_subsequent_width(width)
            } else {
                base.with_fixed_width()
            };
        }
        self
    }

    // ==== Settings ====

    /// Matches text case sensitively for the rest of the formatter.
    pub fn parse_case_sensitive(&mut self) -> &mut Self {
        self.append_element(Element::Settings(Setting::CaseSensitive));
        self
    }

    /// Matches text without regard to case for the rest of the formatter.
    pub fn parse_case_insensitive(&mut self) -> &mut Self {
        self.append_element(Element::Settings(Setting::CaseInsensitive));
        self
    }

    /// Parses strictly for the rest of the formatter.
    pub fn parse_strict(&mut self) -> &mut Self {
        self.append_element(Element::Settings(Setting::Strict));
        self
    }

    /// Parses leniently for the rest of the formatter.
    pub fn parse_lenient(&mut self) -> &mut Self {
        self.append_element(Element::Settings(Setting::Lenient));
        self
    }

    /// Supplies `value` for `field` when the text has not set it.
    pub fn parse_defaulting(&mut self, field: Field, value: i64) -> &mut Self {
        self.append_element(Element::Default(field, value));
        self
    }

    // ==== Values ====

    /// Appends a value of any width, with a sign only when negative.
    pub fn append_value(&mut self, field: Field) -> &mut Self {
        self.append_number(NumberElement::value(field, 1, 19, SignStyle::Normal))
    }

    /// Appends a zero padded value of exactly `width` digits.
    pub fn append_value_fixed(&mut self, field: Field, width: usize) -> TemporalResult<&mut Self> {
        if !(1..=19).contains(&width) {
            return Err(TemporalError::configuration()
                .with_message(format!("The width must be from 1 to 19 inclusive but was {width}")));
        }
        Ok(self.append_number(NumberElement::value(field, width, width, SignStyle::NotNegative)))
    }

    /// Appends a value between `min_width` and `max_width` digits.
    pub fn append_value_with(
        &mut self,
        field: Field,
        min_width: usize,
        max_width: usize,
        sign_style: SignStyle,
    ) -> TemporalResult<&mut Self> {
        if min_width == max_width && sign_style == SignStyle::NotNegative {
            return self.append_value_fixed(field, max_width);
        }
        check_widths(min_width, max_width, 1, 19)?;
        Ok(self.append_number(NumberElement::value(field, min_width, max_width, sign_style)))
    }

    /// Appends a reduced value, printing the low order digits and parsing
    /// a value of `width` digits into the range starting at `base_value`.
    pub fn append_value_reduced(
        &mut self,
        field: Field,
        width: usize,
        max_width: usize,
        base_value: i64,
    ) -> TemporalResult<&mut Self> {
        check_widths(width, max_width, 1, 10)?;
        if !field.range().is_valid_value(base_value) {
            return Err(TemporalError::configuration()
                .with_message(format!("The base value must be within the range of the field: {field}")));
        }
        Ok(self.append_number(NumberElement::reduced(field, width, max_width, base_value, None)))
    }

    /// Like [`Self::append_value_reduced`] with the base taken from the
    /// field's value at `base_date` in the parsed chronology.
    pub fn append_value_reduced_date(
        &mut self,
        field: Field,
        width: usize,
        max_width: usize,
        base_date: IsoDate,
    ) -> TemporalResult<&mut Self> {
        check_widths(width, max_width, 1, 10)?;
        Ok(self.append_number(NumberElement::reduced(field, width, max_width, 0, Some(base_date))))
    }

    /// Appends the value of a fixed range field as a decimal fraction.
    pub fn append_fraction(
        &mut self,
        field: Field,
        min_width: usize,
        max_width: usize,
        decimal_point: bool,
    ) -> TemporalResult<&mut Self> {
        if !field.range().is_fixed() {
            return Err(TemporalError::configuration()
                .with_message(format!("Field must have a fixed set of values: {field}")));
        }
        if min_width > 9 {
            return Err(TemporalError::configuration().with_message(format!(
                "Minimum width must be from 0 to 9 inclusive but was {min_width}"
            )));
        }
        if !(1..=9).contains(&max_width) {
            return Err(TemporalError::configuration().with_message(format!(
                "Maximum width must be from 1 to 9 inclusive but was {max_width}"
            )));
        }
        if max_width < min_width {
            return Err(TemporalError::configuration().with_message(format!(
                "Maximum width must exceed or equal the minimum width but {max_width} < {min_width}"
            )));
        }
        let element = NumberElement::fraction(field, min_width, max_width, decimal_point);
        if min_width == max_width && !decimal_point {
            Ok(self.append_number(element))
        } else {
            self.append_element(Element::Number(element));
            Ok(self)
        }
    }

    pub(crate) fn append_week_based(&mut self, letter: char, count: usize) -> &mut Self {
        let max = match letter {
            'Y' if count == 2 => 2,
            'Y' => 19,
            'w' => 2,
            'W' => 1,
            _ => count,
        };
        self.append_number(NumberElement::week_based(letter, count, count, max))
    }

    // ==== Text ====

    /// Appends the text of a field, falling back to its number.
    pub fn append_text(&mut self, field: Field, style: TextStyle) -> &mut Self {
        self.append_element(Element::Text(TextElement::new(field, style)));
        self
    }

    /// Appends the text of a field from a fixed map of values to texts.
    pub fn append_text_map<S: Into<String>>(
        &mut self,
        field: Field,
        texts: impl IntoIterator<Item = (i64, S)>,
    ) -> &mut Self {
        let texts = texts.into_iter().map(|(value, text)| (value, text.into()));
        self.append_element(Element::Text(TextElement::with_map(field, texts)));
        self
    }

    /// Appends a character literal.
    pub fn append_literal(&mut self, literal: char) -> &mut Self {
        self.append_element(Element::Char(literal));
        self
    }

    /// Appends a string literal. An empty string appends nothing.
    pub fn append_literal_str(&mut self, literal: &str) -> &mut Self {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(ch), None) => {
                self.append_element(Element::Char(ch));
            }
            _ => {
                self.append_element(Element::Str(literal.to_owned()));
            }
        }
        self
    }

    // ==== Instants, offsets and zones ====

    /// Appends an ISO-8601 instant, printing the fraction in groups of
    /// three digits.
    pub fn append_instant(&mut self) -> &mut Self {
        self.append_element(Element::Instant(InstantElement::new(-2)));
        self
    }

    /// Appends an ISO-8601 instant printing `fractional_digits` digits of
    /// fraction, or as many as needed when -1.
    pub fn append_instant_with_digits(&mut self, fractional_digits: i8) -> TemporalResult<&mut Self> {
        if !(-1..=9).contains(&fractional_digits) {
            return Err(TemporalError::configuration().with_message(format!(
                "The fractional digits must be from -1 to 9 inclusive but was {fractional_digits}"
            )));
        }
        self.append_element(Element::Instant(InstantElement::new(fractional_digits)));
        Ok(self)
    }

    /// Appends an offset as `+HH:MM:ss`, `Z` for zero.
    pub fn append_offset_id(&mut self) -> &mut Self {
        self.append_element(Element::Offset(OffsetIdElement::instant_id_z()));
        self
    }

    /// Appends an offset in one of the patterns `+HH`, `+HHmm`, `+HH:mm`,
    /// `+HHMM`, `+HH:MM`, `+HHMMss`, `+HH:MM:ss`, `+HHMMSS` or `+HH:MM:SS`.
    pub fn append_offset(&mut self, pattern: &str, no_offset_text: &str) -> TemporalResult<&mut Self> {
        let element = OffsetIdElement::new(pattern, no_offset_text)?;
        Ok(self.append_offset_element(element))
    }

    pub(crate) fn append_offset_element(&mut self, element: OffsetIdElement) -> &mut Self {
        self.append_element(Element::Offset(element));
        self
    }

    /// Appends a localized offset such as `GMT+08:00`, in the full or short
    /// style.
    pub fn append_localized_offset(&mut self, style: TextStyle) -> TemporalResult<&mut Self> {
        let element = LocalizedOffsetElement::new(style)?;
        self.append_element(Element::LocalizedOffset(element));
        Ok(self)
    }

    /// Appends the zone identifier. Printing requires a zone.
    pub fn append_zone_id(&mut self) -> &mut Self {
        self.append_element(Element::Zone(ZoneIdElement::new(ZoneQuery::Strict)));
        self
    }

    /// Appends the zone identifier, printing nothing for a plain offset.
    pub fn append_zone_region_id(&mut self) -> &mut Self {
        self.append_element(Element::Zone(ZoneIdElement::new(ZoneQuery::RegionOnly)));
        self
    }

    /// Appends the zone identifier, or the offset when there is no zone.
    pub fn append_zone_or_offset_id(&mut self) -> &mut Self {
        self.append_element(Element::Zone(ZoneIdElement::new(ZoneQuery::Lenient)));
        self
    }

    /// Appends the standard or daylight display name of the zone.
    pub fn append_zone_text(&mut self, style: TextStyle) -> &mut Self {
        self.append_element(Element::ZoneText(ZoneTextElement::new(style, false, None)));
        self
    }

    /// Like [`Self::append_zone_text`], preferring the given zones when a
    /// parsed name is shared by several zones.
    pub fn append_zone_text_preferred<S: Into<String>>(
        &mut self,
        style: TextStyle,
        preferred: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        let preferred = preferred.into_iter().map(Into::into).collect();
        self.append_element(Element::ZoneText(ZoneTextElement::new(style, false, Some(preferred))));
        self
    }

    /// Appends the generic display name of the zone, such as `Pacific Time`.
    pub fn append_generic_zone_text(&mut self, style: TextStyle) -> &mut Self {
        self.append_element(Element::ZoneText(ZoneTextElement::new(style, true, None)));
        self
    }

    // ==== Chronologies and localized formats ====

    /// Appends the chronology identifier, such as `ISO`.
    pub fn append_chronology_id(&mut self) -> &mut Self {
        self.append_element(Element::Chronology(ChronologyElement::new(None)));
        self
    }

    /// Appends the chronology display name.
    pub fn append_chronology_text(&mut self, style: TextStyle) -> &mut Self {
        self.append_element(Element::Chronology(ChronologyElement::new(Some(style))));
        self
    }

    /// Appends the localized format of a date style, a time style or both.
    pub fn append_localized(
        &mut self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
    ) -> TemporalResult<&mut Self> {
        if date_style.is_none() && time_style.is_none() {
            return Err(TemporalError::configuration()
                .with_message("Either the date or time style must be non-null"));
        }
        self.append_element(Element::Localized {
            date_style,
            time_style,
        });
        Ok(self)
    }

    // ==== Composition ====

    /// Appends every element of a formatter.
    pub fn append_formatter(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        let composite = formatter.composite().with_optional(false);
        self.append_element(Element::Composite(composite));
        self
    }

    /// Appends a formatter as an optional section.
    pub fn append_optional(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        let composite = formatter.composite().with_optional(true);
        self.append_element(Element::Composite(composite));
        self
    }

    /// Appends the elements of a pattern, such as `uuuu-MM-dd`.
    pub fn append_pattern(&mut self, pattern: &str) -> TemporalResult<&mut Self> {
        super::pattern::compile(self, pattern)?;
        Ok(self)
    }

    /// Starts an optional section. Printing skips the section when a field
    /// is missing, parsing skips it when it does not match.
    pub fn optional_start(&mut self) -> &mut Self {
        self.active().value_parser_index = None;
        self.scopes.push(Scope::new(true));
        self
    }

    /// Ends the innermost optional section.
    pub fn optional_end(&mut self) -> TemporalResult<&mut Self> {
        if self.scopes.len() < 2 {
            return Err(TemporalError::configuration().with_message(
                "Cannot call optional_end() as there was no previous call to optional_start()",
            ));
        }
        let Some(scope) = self.scopes.pop() else {
            return Err(TemporalError::assert());
        };
        if !scope.elements.is_empty() {
            self.append_element(Element::Composite(Composite::new(scope.elements, scope.optional)));
        }
        Ok(self)
    }

    /// The number of open optional sections.
    pub(crate) fn depth(&self) -> usize {
        self.scopes.len().saturating_sub(1)
    }

    /// Pads the next element with spaces to `width` characters.
    pub fn pad_next(&mut self, width: usize) -> TemporalResult<&mut Self> {
        self.pad_next_with(width, ' ')
    }

    /// Pads the next element with `pad` to `width` characters.
    pub fn pad_next_with(&mut self, width: usize, pad: char) -> TemporalResult<&mut Self> {
        if width < 1 {
            return Err(TemporalError::configuration()
                .with_message(format!("The pad width must be at least one but was {width}")));
        }
        let active = self.active();
        active.pad_next_width = width;
        active.pad_next_char = pad;
        active.value_parser_index = None;
        Ok(self)
    }

    // ==== Output ====

    /// Closes every open section and returns the top level elements.
    pub(crate) fn into_composite(mut self) -> Composite {
        while self.scopes.len() > 1 {
            // Cannot fail with an open section.
            let _ = self.optional_end();
        }
        let elements = self.scopes.pop().map(|s| s.elements).unwrap_or_default();
        Composite::new(elements, false)
    }

    /// Builds a formatter for the `en-US` locale.
    pub fn to_formatter(&self) -> DateTimeFormatter {
        self.to_formatter_with_locale(locale!("en-US"))
    }

    /// Builds a formatter for `locale`.
    pub fn to_formatter_with_locale(&self, locale: Locale) -> DateTimeFormatter {
        DateTimeFormatter::new(Arc::new(self.clone().into_composite()), locale)
    }
}

fn check_widths(min_width: usize, max_width: usize, lowest: usize, highest: usize) -> TemporalResult<()> {
    if !(lowest..=highest).contains(&min_width) {
        return Err(TemporalError::configuration().with_message(format!(
            "The minimum width must be from {lowest} to {highest} inclusive but was {min_width}"
        )));
    }
    if !(lowest..=highest).contains(&max_width) {
        return Err(TemporalError::configuration().with_message(format!(
            "The maximum width must be from {lowest} to {highest} inclusive but was {max_width}"
        )));
    }
    if max_width < min_width {
        return Err(TemporalError::configuration().with_message(format!(
            "The maximum width must exceed or equal the minimum width but {max_width} < {min_width}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DateTimeFormatterBuilder;
    use crate::{
        error::ErrorKind,
        fields::Field,
        iso::IsoDate,
        options::{FormatStyle, SignStyle},
        DateTimeFormatter, ParsePosition,
    };

    #[test]
    fn width_checks() {
        let mut builder = DateTimeFormatterBuilder::new();
        let err = builder.append_value_fixed(Field::Year, 20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(builder
            .append_value_with(Field::Year, 5, 4, SignStyle::Normal)
            .is_err());
        assert!(builder.append_value_reduced(Field::Year, 2, 11, 2000).is_err());
        assert!(builder.append_fraction(Field::Year, 0, 9, true).is_err());
        assert!(builder.append_fraction(Field::NanoOfSecond, 0, 10, true).is_err());
        assert!(builder.pad_next(0).is_err());
        assert!(builder.append_localized(None, None).is_err());
        // Fixed width non negative values are plain fixed width values.
        builder
            .append_value_with(Field::MonthOfYear, 2, 2, SignStyle::NotNegative)
            .unwrap();
        assert_eq!(builder.to_formatter().to_string(), "Value(MonthOfYear,2)");
    }

    #[test]
    fn optional_sections_close() {
        let mut builder = DateTimeFormatterBuilder::new();
        assert!(builder.optional_end().is_err());
        builder
            .append_value(Field::Year)
            .optional_start()
            .append_literal('-')
            .append_value(Field::MonthOfYear)
            .optional_start()
            .append_literal('-')
            .append_value(Field::DayOfMonth);
        let formatter = builder.to_formatter();
        assert_eq!(
            formatter.to_string(),
            "Value(Year)['-'Value(MonthOfYear)['-'Value(DayOfMonth)]]"
        );
        // An empty optional section adds nothing.
        let mut builder = DateTimeFormatterBuilder::new();
        builder.optional_start();
        builder.optional_end().unwrap();
        assert_eq!(builder.to_formatter().to_string(), "");

        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "2011-12-3");
    }

    #[test]
    fn adjacent_runs() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value(Field::Year)
            .append_value_fixed(Field::MonthOfYear, 2)
            .unwrap()
            .append_value_fixed(Field::DayOfMonth, 2)
            .unwrap();
        let formatter = builder.to_formatter();
        let parsed = formatter
            .parse_unresolved("20111203", &mut ParsePosition::new(0))
            .unwrap();
        assert_eq!(parsed.values().get(Field::Year), Some(2011));
        assert_eq!(parsed.values().get(Field::MonthOfYear), Some(12));
        assert_eq!(parsed.values().get(Field::DayOfMonth), Some(3));

        // A variable width value ends the run and the year takes every digit.
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value(Field::Year)
            .append_value_fixed(Field::MonthOfYear, 2)
            .unwrap()
            .append_value(Field::DayOfMonth);
        let formatter = builder.to_formatter();
        assert!(formatter
            .parse_unresolved("2011123", &mut ParsePosition::new(0))
            .is_none());
    }

    #[test]
    fn composed_formatters() {
        let date_part = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
        let time_part = DateTimeFormatter::of_pattern("HH:mm").unwrap();
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_formatter(&date_part)
            .append_optional(&time_part);
        let formatter = builder.to_formatter();
        assert_eq!(
            formatter.to_string(),
            "(Value(Year,4,19,EXCEEDS_PAD)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2))[Value(HourOfDay,2)':'Value(MinuteOfHour,2)]"
        );
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "2011-12-03");

        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_localized(Some(FormatStyle::Medium), None)
            .unwrap();
        let localized = builder.to_formatter();
        assert_eq!(localized.to_string(), "Localized(MEDIUM,)");
        assert_eq!(localized.format(&date).unwrap(), "Dec 3, 2011");
        assert_eq!(localized.parse("Dec 3, 2011").unwrap().date(), Some(date));
    }
}
