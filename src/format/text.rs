//! Text printer-parsers for field values and chronologies.

use core::fmt;
use std::sync::Arc;

use icu_locale::Locale;

use crate::{
    chronology::{self, Chronology},
    fields::Field,
    options::{SignStyle, TextStyle},
    provider::TextProvider,
    TemporalResult,
};

use super::{
    context::{ParseContext, PrintContext},
    numeric::NumberElement,
};

/// Where the texts of a field come from.
#[derive(Debug, Clone)]
pub(crate) enum TextSource {
    Provider(TextStyle),
    /// Fixed texts, ordered longest first.
    Map(Arc<[(String, i64)]>),
}

/// Prints and parses a field as text, falling back to a number when the
/// value has no text.
#[derive(Debug, Clone)]
pub(crate) struct TextElement {
    field: Field,
    source: TextSource,
}

impl TextElement {
    pub(crate) fn new(field: Field, style: TextStyle) -> Self {
        Self {
            field,
            source: TextSource::Provider(style),
        }
    }

    pub(crate) fn with_map(field: Field, texts: impl IntoIterator<Item = (i64, String)>) -> Self {
        let mut entries: Vec<(String, i64)> = texts.into_iter().map(|(v, t)| (t, v)).collect();
        entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        Self {
            field,
            source: TextSource::Map(entries.into()),
        }
    }

    fn number(&self) -> NumberElement {
        NumberElement::value(self.field, 1, 19, SignStyle::Normal)
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(value) = ctx.value(self.field)? else {
            return Ok(false);
        };
        let text = match &self.source {
            TextSource::Provider(style) => ctx.text_provider().text(
                self.field,
                value,
                *style,
                ctx.chronology(),
                ctx.locale(),
            ),
            TextSource::Map(entries) => entries
                .iter()
                .find_map(|(text, v)| (*v == value).then_some(text.as_str())),
        };
        match text {
            Some(text) => {
                buf.push_str(text);
                Ok(true)
            }
            None => self.number().format(ctx, buf),
        }
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        let strict = ctx.is_strict();
        let chronology = ctx.effective_chronology();
        let candidates: Option<Vec<(&str, i64)>> = match &self.source {
            TextSource::Provider(style) => ctx.text_provider().candidates(
                self.field,
                strict.then_some(*style),
                chronology,
                ctx.locale(),
            ),
            TextSource::Map(entries) => Some(entries.iter().map(|(t, v)| (t.as_str(), *v)).collect()),
        };

        if let Some(candidates) = candidates {
            for (candidate, value) in candidates.iter().filter(|(t, _)| !t.is_empty()) {
                if let Some(end) = ctx.matches_at(text, pos, candidate) {
                    return ctx.set_parsed_field(self.field, *value, pos, end);
                }
            }
            if self.field == Field::Era && !strict {
                for era in chronology.eras() {
                    let Some(end) = chronology
                        .era_id(*era)
                        .and_then(|id| ctx.matches_at(text, pos, id))
                    else {
                        continue;
                    };
                    return ctx.set_parsed_field(self.field, *era, pos, end);
                }
            }
            if strict {
                return Err(pos);
            }
        }
        self.number().parse(ctx, text, pos)
    }
}

impl fmt::Display for TextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            TextSource::Provider(style) if *style != TextStyle::Full => {
                write!(f, "Text({},{style})", self.field)
            }
            _ => write!(f, "Text({})", self.field),
        }
    }
}

// ==== Chronology ====

/// Prints and parses the chronology, by identifier or by display name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChronologyElement {
    style: Option<TextStyle>,
}

impl ChronologyElement {
    pub(crate) const fn new(style: Option<TextStyle>) -> Self {
        Self { style }
    }

    fn name(
        &self,
        chronology: &dyn Chronology,
        provider: &dyn TextProvider,
        locale: &Locale,
    ) -> &'static str {
        match self.style {
            None => chronology.id(),
            Some(_) => provider.chronology_name(chronology, locale),
        }
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(chronology) = ctx.query("chronology", ctx.temporal().chronology())? else {
            return Ok(false);
        };
        buf.push_str(self.name(chronology, ctx.text_provider(), ctx.locale()));
        Ok(true)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        let mut best: Option<(&'static dyn Chronology, usize)> = None;
        for chronology in chronology::available() {
            let name = self.name(chronology, ctx.text_provider(), ctx.locale());
            if let Some(end) = ctx.matches_at(text, pos, name) {
                if best.map_or(true, |(_, best_end)| end > best_end) {
                    best = Some((chronology, end));
                }
            }
        }
        let (chronology, end) = best.ok_or(pos)?;
        ctx.set_parsed_chronology(chronology);
        Ok(end)
    }
}

impl fmt::Display for ChronologyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            None => f.write_str("ChronologyId()"),
            Some(style) => write!(f, "ChronologyText({style})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        chronology,
        fields::Field,
        iso::{IsoDate, IsoTime},
        options::TextStyle,
        DateTimeFormatter, DateTimeFormatterBuilder, ParsePosition,
    };

    #[test]
    fn month_text() {
        let formatter = DateTimeFormatter::of_pattern("MMM").unwrap();
        assert_eq!(formatter.to_string(), "Text(MonthOfYear,SHORT)");
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "Dec");

        let mut position = ParsePosition::new(0);
        let parsed = formatter.parse_unresolved("Dec", &mut position).unwrap();
        assert_eq!(parsed.values().get(Field::MonthOfYear), Some(12));

        // Strict parsing only accepts the formatter's own style.
        let mut position = ParsePosition::new(0);
        formatter.parse_unresolved("December", &mut position).unwrap();
        assert_eq!(position.index(), 3);
        assert!(formatter.parse_unresolved("dec", &mut ParsePosition::new(0)).is_none());
    }

    #[test]
    fn lenient_text() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .parse_case_insensitive()
            .parse_lenient()
            .append_text(Field::MonthOfYear, TextStyle::Short);
        let formatter = builder.to_formatter();
        for (text, month) in [("DECEMBER", 12), ("jun", 6), ("7", 7)] {
            let mut position = ParsePosition::new(0);
            let parsed = formatter.parse_unresolved(text, &mut position).unwrap();
            assert_eq!(parsed.values().get(Field::MonthOfYear), Some(month), "{text}");
            assert_eq!(position.index(), text.len());
        }

        let mut builder = DateTimeFormatterBuilder::new();
        builder.parse_lenient().append_text(Field::Era, TextStyle::Short);
        let formatter = builder.to_formatter();
        let parsed = formatter
            .parse_unresolved("CE", &mut ParsePosition::new(0))
            .unwrap();
        // Era identifiers are accepted besides the era texts.
        assert_eq!(parsed.values().get(Field::Era), Some(1));
    }

    #[test]
    fn number_fallback_when_printing() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_text(Field::DayOfMonth, TextStyle::Full);
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "Text(DayOfMonth)");
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "3");
    }

    #[test]
    fn text_maps() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_text_map(
            Field::AmPmOfDay,
            [(0, "in the morning"), (1, "in the afternoon")],
        );
        let formatter = builder.to_formatter();
        let time = IsoTime::new(15, 0, 0, 0).unwrap();
        assert_eq!(formatter.format(&time).unwrap(), "in the afternoon");
        let parsed = formatter
            .parse_unresolved("in the morning", &mut ParsePosition::new(0))
            .unwrap();
        assert_eq!(parsed.values().get(Field::AmPmOfDay), Some(0));
    }

    #[test]
    fn chronology_id_and_name() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_chronology_id();
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "ChronologyId()");
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "ISO");
        assert!(formatter.format(&IsoTime::MIDNIGHT).is_err());

        let parsed = formatter
            .parse_unresolved("ThaiBuddhist", &mut ParsePosition::new(0))
            .unwrap();
        assert!(parsed
            .chronology()
            .is_some_and(|c| chronology::same(c, &chronology::THAI_BUDDHIST)));

        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_chronology_text(TextStyle::Full);
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "ChronologyText(FULL)");
        assert_eq!(formatter.format(&date).unwrap(), "Gregorian Calendar");
    }
}
