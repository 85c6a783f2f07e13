//! The mutable state threaded through an element tree while printing and
//! parsing.

use icu_locale::Locale;

use crate::{
    chronology::{self, ChronoDate, Chronology},
    fields::Field,
    iso::{IsoDate, IsoTime},
    options::DecimalStyle,
    provider::{TextProvider, ZoneProvider},
    resolver::Parsed,
    temporal::{Instant, TemporalAccessor, ZonedDateTime},
    zone::{UtcOffset, ZoneId},
    TemporalError, TemporalResult,
};

use super::{numeric::NumberElement, DateTimeFormatter};

// ==== Printing ====

/// The value being printed and the optional section depth.
pub(crate) struct PrintContext<'a> {
    temporal: AdjustedTemporal<'a>,
    formatter: &'a DateTimeFormatter,
    optional: usize,
}

impl<'a> PrintContext<'a> {
    pub(crate) fn new(
        temporal: &'a dyn TemporalAccessor,
        formatter: &'a DateTimeFormatter,
    ) -> TemporalResult<Self> {
        Ok(Self {
            temporal: AdjustedTemporal::new(temporal, formatter)?,
            formatter,
            optional: 0,
        })
    }

    pub(crate) fn temporal(&self) -> &dyn TemporalAccessor {
        &self.temporal
    }

    pub(crate) fn formatter(&self) -> &'a DateTimeFormatter {
        self.formatter
    }

    pub(crate) fn locale(&self) -> &'a Locale {
        self.formatter.locale()
    }

    pub(crate) fn decimal_style(&self) -> DecimalStyle {
        self.formatter.decimal_style()
    }

    pub(crate) fn text_provider(&self) -> &'static dyn TextProvider {
        self.formatter.text_provider()
    }

    pub(crate) fn zone_provider(&self) -> &'static dyn ZoneProvider {
        self.formatter.zone_provider()
    }

    /// The chronology of the printed value, ISO when it has none.
    pub(crate) fn chronology(&self) -> &'static dyn Chronology {
        self.temporal.chronology().unwrap_or(&chronology::ISO)
    }

    pub(crate) fn start_optional(&mut self) {
        self.optional += 1;
    }

    pub(crate) fn end_optional(&mut self) {
        self.optional = self.optional.saturating_sub(1);
    }

    /// Reads a field of the printed value.
    ///
    /// Inside an optional section a missing field is `Ok(None)`, outside it
    /// is an error.
    pub(crate) fn value(&self, field: Field) -> TemporalResult<Option<i64>> {
        match self.temporal.field(field) {
            Some(value) => Ok(Some(value)),
            None if self.optional > 0 => Ok(None),
            None => Err(TemporalError::unavailable().with_message(format!("Unsupported field: {field}"))),
        }
    }

    /// Like [`Self::value`] for a query result described by `description`.
    pub(crate) fn query<T>(&self, description: &str, value: Option<T>) -> TemporalResult<Option<T>> {
        match value {
            Some(value) => Ok(Some(value)),
            None if self.optional > 0 => Ok(None),
            None => Err(TemporalError::unavailable()
                .with_message(format!("Unable to extract {description} from temporal"))),
        }
    }
}

/// The source of the fields of an adjusted value.
enum Base<'a> {
    Borrowed(&'a dyn TemporalAccessor),
    Zoned(ZonedDateTime),
}

impl Base<'_> {
    fn get(&self) -> &dyn TemporalAccessor {
        match self {
            Self::Borrowed(temporal) => *temporal,
            Self::Zoned(zoned) => zoned,
        }
    }
}

/// A printed value seen through the formatter's override chronology and
/// override zone.
pub(crate) struct AdjustedTemporal<'a> {
    base: Base<'a>,
    date: Option<ChronoDate>,
    overrides: Option<(Option<&'static dyn Chronology>, Option<ZoneId>)>,
}

impl<'a> AdjustedTemporal<'a> {
    pub(crate) fn new(
        temporal: &'a dyn TemporalAccessor,
        formatter: &DateTimeFormatter,
    ) -> TemporalResult<Self> {
        let plain = Self {
            base: Base::Borrowed(temporal),
            date: None,
            overrides: None,
        };
        let temporal_chrono = temporal.chronology();
        let temporal_zone = temporal.zone();
        let override_chrono = formatter
            .chronology()
            .filter(|c| !temporal_chrono.is_some_and(|t| chronology::same(*c, t)));
        let override_zone = formatter
            .zone()
            .filter(|z| temporal_zone.as_ref() != Some(*z))
            .cloned();
        if override_chrono.is_none() && override_zone.is_none() {
            return Ok(plain);
        }
        let effective_chrono = override_chrono.or(temporal_chrono);

        let mut base = Base::Borrowed(temporal);
        if let Some(zone) = &override_zone {
            if let Some(seconds) = temporal.field(Field::InstantSeconds) {
                let nanos = temporal.field(Field::NanoOfSecond).unwrap_or(0);
                let instant = Instant::from_epoch_seconds(seconds, nanos)?;
                base = Base::Zoned(ZonedDateTime::of_instant(
                    instant,
                    zone.clone(),
                    formatter.zone_provider(),
                )?);
            } else if let (Some(fixed), Some(offset)) =
                (zone.fixed_offset(), temporal.field(Field::OffsetSeconds))
            {
                if i64::from(fixed.seconds()) != offset {
                    return Err(TemporalError::general(format!(
                        "Unable to apply override zone '{zone}' because the value being formatted has a different offset but does not represent an instant"
                    )));
                }
            }
        }

        let mut date = None;
        if let Some(chrono) = override_chrono {
            if let Some(epoch_day) = base.get().field(Field::EpochDay) {
                date = Some(ChronoDate::new(IsoDate::from_epoch_days(epoch_day)?, chrono));
            } else if !(chronology::same(chrono, &chronology::ISO) && temporal_chrono.is_none())
                && DATE_FIELDS.iter().any(|f| base.get().field(*f).is_some())
            {
                return Err(TemporalError::general(format!(
                    "Unable to apply override chronology '{}' because the value being formatted contains date fields but does not represent a whole date",
                    chrono.id()
                )));
            }
        }

        let effective_zone = override_zone.or(temporal_zone);
        Ok(Self {
            base,
            date,
            overrides: Some((effective_chrono, effective_zone)),
        })
    }
}

const DATE_FIELDS: [Field; 8] = [
    Field::DayOfWeek,
    Field::DayOfMonth,
    Field::DayOfYear,
    Field::MonthOfYear,
    Field::ProlepticMonth,
    Field::YearOfEra,
    Field::Year,
    Field::Era,
];

impl TemporalAccessor for AdjustedTemporal<'_> {
    fn field(&self, field: Field) -> Option<i64> {
        match &self.date {
            Some(date) if field.is_date_based() => date.field(field),
            _ => self.base.get().field(field),
        }
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        match &self.overrides {
            Some((chronology, _)) => *chronology,
            None => self.base.get().chronology(),
        }
    }

    fn zone(&self) -> Option<ZoneId> {
        match &self.overrides {
            Some((_, zone)) => zone.clone(),
            None => self.base.get().zone(),
        }
    }

    fn offset(&self) -> Option<UtcOffset> {
        self.base.get().offset()
    }

    fn local_date(&self) -> Option<IsoDate> {
        self.date
            .as_ref()
            .map(ChronoDate::iso)
            .or_else(|| self.base.get().local_date())
    }

    fn local_time(&self) -> Option<IsoTime> {
        self.base.get().local_time()
    }
}

// ==== Parsing ====

/// A reduced value whose base depends on the chronology, recomputed when a
/// chronology is parsed later in the text.
#[derive(Debug, Clone)]
struct DeferredReduced {
    element: NumberElement,
    value: i64,
    error_pos: usize,
    success_pos: usize,
}

/// The parse settings and the values collected so far.
pub(crate) struct ParseContext<'a> {
    formatter: &'a DateTimeFormatter,
    case_sensitive: bool,
    strict: bool,
    parsed: Parsed,
    deferred: Vec<DeferredReduced>,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(formatter: &'a DateTimeFormatter) -> Self {
        Self {
            formatter,
            case_sensitive: true,
            strict: true,
            parsed: Parsed::new(formatter.zone_provider()),
            deferred: Vec::new(),
        }
    }

    /// A context with the same settings and nothing parsed.
    pub(crate) fn copy(&self) -> Self {
        Self {
            formatter: self.formatter,
            case_sensitive: self.case_sensitive,
            strict: self.strict,
            parsed: Parsed::new(self.formatter.zone_provider()),
            deferred: Vec::new(),
        }
    }

    pub(crate) fn locale(&self) -> &'a Locale {
        self.formatter.locale()
    }

    pub(crate) fn decimal_style(&self) -> DecimalStyle {
        self.formatter.decimal_style()
    }

    pub(crate) fn text_provider(&self) -> &'static dyn TextProvider {
        self.formatter.text_provider()
    }

    pub(crate) fn zone_provider(&self) -> &'static dyn ZoneProvider {
        self.formatter.zone_provider()
    }

    pub(crate) fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub(crate) fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Compares two characters under the current case sensitivity.
    pub(crate) fn char_equals(&self, a: char, b: char) -> bool {
        a == b || (!self.case_sensitive && fold_equals(a, b))
    }

    /// Matches `expected` at `pos`, returning the position after it.
    pub(crate) fn matches_at(&self, text: &[char], pos: usize, expected: &str) -> Option<usize> {
        let mut end = pos;
        for ch in expected.chars() {
            if !self.char_equals(*text.get(end)?, ch) {
                return None;
            }
            end += 1;
        }
        Some(end)
    }

    pub(crate) fn parsed_field(&self, field: Field) -> Option<i64> {
        self.parsed.values.get(field)
    }

    /// Stores a parsed field value.
    ///
    /// Returns `success_pos`, or `Err(error_pos)` when the field already holds
    /// a different value.
    pub(crate) fn set_parsed_field(
        &mut self,
        field: Field,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        match self.parsed.values.overwrite(field, value) {
            Some(old) if old != value => Err(error_pos),
            _ => Ok(success_pos),
        }
    }

    pub(crate) fn set_parsed_zone(&mut self, zone: ZoneId) {
        self.parsed.zone = Some(zone);
    }

    /// Stores the parsed chronology and recomputes reduced values which
    /// depend on it.
    pub(crate) fn set_parsed_chronology(&mut self, chronology: &'static dyn Chronology) {
        self.parsed.chronology = Some(chronology);
        for deferred in core::mem::take(&mut self.deferred) {
            let (field, value) = deferred.element.reduced_value(
                chronology,
                deferred.value,
                deferred.success_pos - deferred.error_pos,
            );
            self.parsed.values.overwrite(field, value);
        }
    }

    pub(crate) fn defer_reduced(
        &mut self,
        element: NumberElement,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) {
        self.deferred.push(DeferredReduced {
            element,
            value,
            error_pos,
            success_pos,
        });
    }

    pub(crate) fn set_leap_second(&mut self) {
        self.parsed.leap_second = true;
    }

    /// The parsed chronology, else the formatter's, else ISO.
    pub(crate) fn effective_chronology(&self) -> &'static dyn Chronology {
        self.parsed
            .chronology
            .or(self.formatter.chronology())
            .unwrap_or(&chronology::ISO)
    }

    /// Runs `parse` as an optional section.
    ///
    /// On failure everything parsed inside the section is discarded and the
    /// section matches nothing.
    pub(crate) fn parse_optional(
        &mut self,
        pos: usize,
        parse: impl FnOnce(&mut Self) -> Result<usize, usize>,
    ) -> usize {
        let snapshot = self.parsed.clone();
        let deferred = self.deferred.len();
        match parse(self) {
            Ok(end) => end,
            Err(_error_pos) => {
                #[cfg(feature = "log")]
                log::trace!("optional section failed at {_error_pos}, restarting at {pos}");
                self.parsed = snapshot;
                self.deferred.truncate(deferred);
                pos
            }
        }
    }

    pub(crate) fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    pub(crate) fn into_parsed(self) -> Parsed {
        self.parsed
    }
}

fn fold_equals(a: char, b: char) -> bool {
    a.to_uppercase().eq(b.to_uppercase()) || a.to_lowercase().eq(b.to_lowercase())
}
