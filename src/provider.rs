//! The text and zone provider collaborators.
//!
//! A `TextProvider` supplies the localized display text of field values and
//! the localized style patterns. A `ZoneProvider` supplies the known region
//! identifiers along with their offset rules and display names.

use std::sync::LazyLock;

use core::fmt;
use icu_locale::Locale;
use timezone_provider::{ZoneIdNormalizer, ZoneRecord};

use crate::{
    chronology::{self, Chronology},
    fields::Field,
    iso::{IsoDate, IsoDateTime},
    options::{FormatStyle, TextStyle},
    zone::UtcOffset,
    TemporalError, TemporalResult, SECONDS_PER_DAY,
};

// ==== TextProvider ====

/// A text and candidate entry, the display text of a field value.
pub type TextEntry = (&'static str, i64);

/// Supplies the localized display text of field values.
pub trait TextProvider: fmt::Debug + Send + Sync {
    /// The display text of `value`, `None` when the field has no text form.
    fn text(
        &self,
        field: Field,
        value: i64,
        style: TextStyle,
        chronology: &dyn Chronology,
        locale: &Locale,
    ) -> Option<&'static str>;

    /// All parsable texts of the field ordered longest first, over every
    /// style when `style` is `None`. `None` when the field has no text form.
    fn candidates(
        &self,
        field: Field,
        style: Option<TextStyle>,
        chronology: &dyn Chronology,
        locale: &Locale,
    ) -> Option<Vec<TextEntry>>;

    /// The display name of a chronology, such as "Gregorian Calendar".
    fn chronology_name(&self, chronology: &dyn Chronology, locale: &Locale) -> &'static str;

    /// The localized pattern for a date style, a time style or both.
    fn localized_pattern(
        &self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
        chronology: &dyn Chronology,
        locale: &Locale,
    ) -> TemporalResult<String>;
}

/// English text for all locales.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishTextProvider;

/// The English text provider singleton.
pub static ENGLISH_TEXT: EnglishTextProvider = EnglishTextProvider;

const MONTHS: [[&str; 12]; 3] = [
    [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
];

const DAYS: [[&str; 7]; 3] = [
    [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    ["M", "T", "W", "T", "F", "S", "S"],
];

const AM_PM: [[&str; 2]; 3] = [["AM", "PM"], ["AM", "PM"], ["a", "p"]];

const QUARTERS: [[&str; 4]; 3] = [
    ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"],
    ["Q1", "Q2", "Q3", "Q4"],
    ["1", "2", "3", "4"],
];

const ISO_ERAS: [[&str; 2]; 3] = [["Before Christ", "Anno Domini"], ["BC", "AD"], ["B", "A"]];

const BUDDHIST_ERAS: [[&str; 2]; 3] = [
    ["Before Buddhist Era", "Buddhist Era"],
    ["BBE", "BE"],
    ["BBE", "BE"],
];

impl EnglishTextProvider {
    fn table(field: Field, width: usize, chronology: &dyn Chronology) -> Option<&'static [&'static str]> {
        let table: &'static [&'static str] = match field {
            Field::MonthOfYear => &MONTHS[width],
            Field::DayOfWeek => &DAYS[width],
            Field::AmPmOfDay => &AM_PM[width],
            Field::QuarterOfYear => &QUARTERS[width],
            Field::Era if chronology.id() == chronology::THAI_BUDDHIST.id() => &BUDDHIST_ERAS[width],
            Field::Era => &ISO_ERAS[width],
            _ => return None,
        };
        Some(table)
    }

    /// The value of the first entry in a table.
    fn first_value(field: Field) -> i64 {
        match field {
            Field::AmPmOfDay | Field::Era => 0,
            _ => 1,
        }
    }
}

const fn style_width(style: TextStyle) -> usize {
    match style {
        TextStyle::Full | TextStyle::FullStandalone => 0,
        TextStyle::Short | TextStyle::ShortStandalone => 1,
        TextStyle::Narrow | TextStyle::NarrowStandalone => 2,
    }
}

impl TextProvider for EnglishTextProvider {
    fn text(
        &self,
        field: Field,
        value: i64,
        style: TextStyle,
        chronology: &dyn Chronology,
        _locale: &Locale,
    ) -> Option<&'static str> {
        let table = Self::table(field, style_width(style), chronology)?;
        let index = value.checked_sub(Self::first_value(field))?;
        table.get(usize::try_from(index).ok()?).copied()
    }

    fn candidates(
        &self,
        field: Field,
        style: Option<TextStyle>,
        chronology: &dyn Chronology,
        _locale: &Locale,
    ) -> Option<Vec<TextEntry>> {
        let widths = match style {
            Some(style) => style_width(style)..style_width(style) + 1,
            None => 0..3,
        };
        let first = Self::first_value(field);
        let mut entries: Vec<TextEntry> = Vec::new();
        for width in widths {
            let table = Self::table(field, width, chronology)?;
            for (index, text) in table.iter().enumerate() {
                let entry = (*text, first + index as i64);
                // Ambiguous narrow texts keep their first value.
                if !entries.iter().any(|(existing, _)| existing == text) {
                    entries.push(entry);
                }
            }
        }
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Some(entries)
    }

    fn chronology_name(&self, chronology: &dyn Chronology, _locale: &Locale) -> &'static str {
        match chronology.calendar_type().as_str() {
            "iso8601" => "Gregorian Calendar",
            "buddhist" => "Buddhist Calendar",
            _ => chronology.id(),
        }
    }

    fn localized_pattern(
        &self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
        chronology: &dyn Chronology,
        _locale: &Locale,
    ) -> TemporalResult<String> {
        let era = chronology.id() != chronology::ISO.id();
        let date = date_style.map(|style| match (style, era) {
            (FormatStyle::Full, false) => "EEEE, MMMM d, y",
            (FormatStyle::Full, true) => "EEEE, MMMM d, y G",
            (FormatStyle::Long, false) => "MMMM d, y",
            (FormatStyle::Long, true) => "MMMM d, y G",
            (FormatStyle::Medium, false) => "MMM d, y",
            (FormatStyle::Medium, true) => "MMM d, y G",
            (FormatStyle::Short, false) => "M/d/yy",
            (FormatStyle::Short, true) => "M/d/y GGGGG",
        });
        let time = time_style.map(|style| match style {
            FormatStyle::Full => "h:mm:ss\u{202f}a zzzz",
            FormatStyle::Long => "h:mm:ss\u{202f}a z",
            FormatStyle::Medium => "h:mm:ss\u{202f}a",
            FormatStyle::Short => "h:mm\u{202f}a",
        });
        match (date, time, date_style) {
            (Some(date), Some(time), Some(FormatStyle::Full | FormatStyle::Long)) => {
                Ok(format!("{date} 'at' {time}"))
            }
            (Some(date), Some(time), _) => Ok(format!("{date}, {time}")),
            (Some(date), None, _) => Ok(date.into()),
            (None, Some(time), _) => Ok(time.into()),
            (None, None, _) => Err(TemporalError::configuration()
                .with_message("Either the date or time style must be non-null")),
        }
    }
}

// ==== ZoneProvider ====

/// The display name variants of a region zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneNameKind {
    Standard,
    Daylight,
    Generic,
}

/// Supplies region zone identifiers, their offset rules and display names.
pub trait ZoneProvider: fmt::Debug + Send + Sync {
    /// All region identifiers known to this provider.
    fn available_ids(&self) -> Vec<&'static str>;

    /// The canonical spelling of a region identifier, matched without
    /// regard to case.
    fn normalize(&self, id: &str) -> Option<&'static str>;

    /// The offset of the zone at an epoch second.
    fn offset_at(&self, id: &str, epoch_seconds: i64) -> TemporalResult<UtcOffset>;

    /// The offsets valid for a local date time, empty in a gap and two in an
    /// overlap with the earlier offset first.
    fn valid_offsets(&self, id: &str, local: IsoDateTime) -> TemporalResult<Vec<UtcOffset>>;

    /// Chooses the offset of a local date time. In an overlap the preferred
    /// offset is kept if valid, otherwise the earlier offset. In a gap the
    /// local time is moved later by the length of the gap.
    fn offset_for_local(
        &self,
        id: &str,
        local: IsoDateTime,
        preferred: Option<UtcOffset>,
    ) -> TemporalResult<(IsoDateTime, UtcOffset)>;

    /// Whether daylight time is in effect at an epoch second.
    fn is_daylight(&self, id: &str, epoch_seconds: i64) -> bool;

    /// The localized display name of the zone.
    fn display_name(
        &self,
        id: &str,
        kind: ZoneNameKind,
        style: TextStyle,
        locale: &Locale,
    ) -> Option<&'static str>;

    /// A freshness token which changes whenever the set of available
    /// identifiers changes, such as the size of the data set.
    fn generation(&self) -> u64;
}

static NORMALIZER: LazyLock<Option<ZoneIdNormalizer>> =
    LazyLock::new(|| ZoneIdNormalizer::build().ok());

/// A zone provider over the compiled `timezone_provider` table.
///
/// Daylight time is computed with the current rules of each region for every
/// year, historical rule changes are not modeled.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticZoneProvider;

/// The compiled zone provider singleton.
pub static STATIC_ZONES: StaticZoneProvider = StaticZoneProvider;

impl StaticZoneProvider {
    fn record(id: &str) -> TemporalResult<&'static ZoneRecord> {
        NORMALIZER
            .as_ref()
            .and_then(|normalizer| normalizer.record(id))
            .ok_or_else(|| TemporalError::range().with_message(format!("Unknown time-zone ID: {id}")))
    }
}

impl ZoneProvider for StaticZoneProvider {
    fn available_ids(&self) -> Vec<&'static str> {
        timezone_provider::ZONES.iter().map(|record| record.id).collect()
    }

    fn normalize(&self, id: &str) -> Option<&'static str> {
        NORMALIZER
            .as_ref()
            .and_then(|normalizer| normalizer.record(id))
            .map(|record| record.id)
    }

    fn offset_at(&self, id: &str, epoch_seconds: i64) -> TemporalResult<UtcOffset> {
        let record = Self::record(id)?;
        let daylight = DaylightRule::of(record).is_some_and(|rule| rule.is_daylight(record, epoch_seconds));
        Ok(UtcOffset::new_unchecked(
            record.standard_offset + if daylight { DAYLIGHT_SAVING } else { 0 },
        ))
    }

    fn valid_offsets(&self, id: &str, local: IsoDateTime) -> TemporalResult<Vec<UtcOffset>> {
        let record = Self::record(id)?;
        let standard = UtcOffset::new_unchecked(record.standard_offset);
        if DaylightRule::of(record).is_none() {
            return Ok(vec![standard]);
        }
        let daylight = UtcOffset::new_unchecked(record.standard_offset + DAYLIGHT_SAVING);
        let mut valid = Vec::with_capacity(2);
        for candidate in [daylight, standard] {
            if self.offset_at(id, local.to_epoch_seconds(candidate.seconds()))? == candidate {
                valid.push(candidate);
            }
        }
        Ok(valid)
    }

    fn offset_for_local(
        &self,
        id: &str,
        local: IsoDateTime,
        preferred: Option<UtcOffset>,
    ) -> TemporalResult<(IsoDateTime, UtcOffset)> {
        let valid = self.valid_offsets(id, local)?;
        match valid.as_slice() {
            [offset] => Ok((local, *offset)),
            [earlier, later] => {
                let chosen = match preferred {
                    Some(preferred) if preferred == *later => *later,
                    _ => *earlier,
                };
                Ok((local, chosen))
            }
            _ => {
                // A gap always moves from standard to daylight time.
                let record = Self::record(id)?;
                let epoch_seconds = local.to_epoch_seconds(record.standard_offset);
                let after = self.offset_at(id, epoch_seconds)?;
                let nanos = local.time.nanosecond;
                let adjusted =
                    IsoDateTime::from_epoch_seconds(epoch_seconds, nanos, after.seconds())?;
                Ok((adjusted, after))
            }
        }
    }

    fn is_daylight(&self, id: &str, epoch_seconds: i64) -> bool {
        Self::record(id).is_ok_and(|record| {
            DaylightRule::of(record).is_some_and(|rule| rule.is_daylight(record, epoch_seconds))
        })
    }

    fn display_name(
        &self,
        id: &str,
        kind: ZoneNameKind,
        style: TextStyle,
        _locale: &Locale,
    ) -> Option<&'static str> {
        let record = Self::record(id).ok()?;
        let short = style_width(style) > 0;
        match (kind, short) {
            (ZoneNameKind::Standard, false) => Some(record.standard_name),
            (ZoneNameKind::Standard, true) => Some(record.standard_abbreviation),
            (ZoneNameKind::Daylight, false) => record.daylight_name,
            (ZoneNameKind::Daylight, true) => record.daylight_abbreviation,
            (ZoneNameKind::Generic, false) => Some(record.generic_name),
            // Generic abbreviations fall back to the standard abbreviation.
            (ZoneNameKind::Generic, true) => Some(record.standard_abbreviation),
        }
    }

    fn generation(&self) -> u64 {
        timezone_provider::ZONES.len() as u64
    }
}

// ==== Daylight rules ====

const DAYLIGHT_SAVING: i32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SundaySelector {
    First,
    Second,
    Last,
}

/// A transition on a selected Sunday of a month. The time of day is in UTC
/// or, with `standard_local`, in local standard time.
#[derive(Debug, Clone, Copy)]
struct RuleDate {
    month: u8,
    sunday: SundaySelector,
    second_of_day: i64,
    standard_local: bool,
}

impl RuleDate {
    const fn new(month: u8, sunday: SundaySelector, hour: i64, standard_local: bool) -> Self {
        Self {
            month,
            sunday,
            second_of_day: hour * 3600,
            standard_local,
        }
    }

    fn epoch_seconds(self, year: i64, standard_offset: i32) -> Option<i64> {
        let first = IsoDate::new_with_overflow(
            year,
            self.month.into(),
            1,
            crate::options::ArithmeticOverflow::Reject,
        )
        .ok()?;
        let to_sunday = (7 - i64::from(first.day_of_week())) % 7;
        let day = match self.sunday {
            SundaySelector::First => first.plus_days(to_sunday).ok()?,
            SundaySelector::Second => first.plus_days(to_sunday + 7).ok()?,
            SundaySelector::Last => {
                let last = first.plus_days(i64::from(first.days_in_month()) - 1).ok()?;
                last.plus_days(-(i64::from(last.day_of_week()) % 7)).ok()?
            }
        };
        let local = day.to_epoch_days() * SECONDS_PER_DAY + self.second_of_day;
        Some(if self.standard_local {
            local - i64::from(standard_offset)
        } else {
            local
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct DaylightRule {
    start: RuleDate,
    end: RuleDate,
}

impl DaylightRule {
    const EUROPEAN: Self = Self {
        start: RuleDate::new(3, SundaySelector::Last, 1, false),
        end: RuleDate::new(10, SundaySelector::Last, 1, false),
    };

    const NORTH_AMERICAN: Self = Self {
        start: RuleDate::new(3, SundaySelector::Second, 2, true),
        end: RuleDate::new(11, SundaySelector::First, 1, true),
    };

    const AUSTRALIAN: Self = Self {
        start: RuleDate::new(10, SundaySelector::First, 2, true),
        end: RuleDate::new(4, SundaySelector::First, 2, true),
    };

    const NEW_ZEALAND: Self = Self {
        start: RuleDate::new(9, SundaySelector::Last, 2, true),
        end: RuleDate::new(4, SundaySelector::First, 2, true),
    };

    fn of(record: &ZoneRecord) -> Option<Self> {
        record.daylight_name?;
        let id = record.id;
        if id.starts_with("Europe/") {
            Some(Self::EUROPEAN)
        } else if id.starts_with("America/") || id == "EST5EDT" {
            Some(Self::NORTH_AMERICAN)
        } else if id.starts_with("Australia/") {
            Some(Self::AUSTRALIAN)
        } else if id == "Pacific/Auckland" {
            Some(Self::NEW_ZEALAND)
        } else {
            None
        }
    }

    fn is_daylight(self, record: &ZoneRecord, epoch_seconds: i64) -> bool {
        let local = epoch_seconds.saturating_add(i64::from(record.standard_offset));
        let year = crate::utils::ymd_from_epoch_days(local.div_euclid(SECONDS_PER_DAY)).0;
        let (Some(start), Some(end)) = (
            self.start.epoch_seconds(year, record.standard_offset),
            self.end.epoch_seconds(year, record.standard_offset),
        ) else {
            return false;
        };
        if start < end {
            (start..end).contains(&epoch_seconds)
        } else {
            epoch_seconds >= start || epoch_seconds < end
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TextProvider, ZoneNameKind, ZoneProvider, ENGLISH_TEXT, STATIC_ZONES};
    use crate::chronology::{ISO, THAI_BUDDHIST};
    use crate::fields::Field;
    use crate::iso::{IsoDate, IsoDateTime, IsoTime};
    use crate::options::{FormatStyle, TextStyle};
    use crate::zone::UtcOffset;
    use icu_locale::Locale;

    fn locale() -> Locale {
        "en-US".parse().unwrap()
    }

    #[test]
    fn month_and_era_text() {
        let locale = locale();
        let text = |field, value, style| ENGLISH_TEXT.text(field, value, style, &ISO, &locale);
        assert_eq!(text(Field::MonthOfYear, 12, TextStyle::Full), Some("December"));
        assert_eq!(text(Field::MonthOfYear, 1, TextStyle::Short), Some("Jan"));
        assert_eq!(text(Field::MonthOfYear, 13, TextStyle::Short), None);
        assert_eq!(text(Field::DayOfWeek, 7, TextStyle::Narrow), Some("S"));
        assert_eq!(text(Field::Era, 1, TextStyle::Short), Some("AD"));
        assert_eq!(text(Field::DayOfMonth, 1, TextStyle::Short), None);
        assert_eq!(
            ENGLISH_TEXT.text(Field::Era, 1, TextStyle::Short, &THAI_BUDDHIST, &locale),
            Some("BE")
        );
    }

    #[test]
    fn candidates_are_longest_first() {
        let locale = locale();
        let all = ENGLISH_TEXT
            .candidates(Field::MonthOfYear, None, &ISO, &locale)
            .unwrap();
        assert_eq!(all[0], ("September", 9));
        assert!(all.contains(&("May", 5)));
        assert_eq!(all.iter().filter(|(text, _)| *text == "J").count(), 1);
        assert!(ENGLISH_TEXT
            .candidates(Field::HourOfDay, None, &ISO, &locale)
            .is_none());
    }

    #[test]
    fn localized_patterns() {
        let locale = locale();
        let pattern = ENGLISH_TEXT
            .localized_pattern(Some(FormatStyle::Medium), None, &ISO, &locale)
            .unwrap();
        assert_eq!(pattern, "MMM d, y");
        let pattern = ENGLISH_TEXT
            .localized_pattern(Some(FormatStyle::Short), Some(FormatStyle::Short), &ISO, &locale)
            .unwrap();
        assert_eq!(pattern, "M/d/yy, h:mm\u{202f}a");
        assert!(ENGLISH_TEXT
            .localized_pattern(None, None, &ISO, &locale)
            .is_err());
    }

    #[test]
    fn daylight_offsets() {
        let summer = IsoDateTime::new(IsoDate::new(2011, 7, 1).unwrap(), IsoTime::MIDNIGHT);
        let winter = IsoDateTime::new(IsoDate::new(2011, 12, 1).unwrap(), IsoTime::MIDNIGHT);
        let offset = |id, dt: IsoDateTime| {
            STATIC_ZONES
                .offset_at(id, dt.to_epoch_seconds(0))
                .unwrap()
                .seconds()
        };
        assert_eq!(offset("Europe/Paris", summer), 7200);
        assert_eq!(offset("Europe/Paris", winter), 3600);
        assert_eq!(offset("America/New_York", summer), -4 * 3600);
        assert_eq!(offset("Australia/Sydney", summer), 10 * 3600);
        assert_eq!(offset("Australia/Sydney", winter), 11 * 3600);
        assert_eq!(offset("Asia/Tokyo", summer), 9 * 3600);
    }

    #[test]
    fn gaps_and_overlaps() {
        // 2011-03-13 02:30 does not exist in New York.
        let gap = IsoDateTime::new(
            IsoDate::new(2011, 3, 13).unwrap(),
            IsoTime::new(2, 30, 0, 0).unwrap(),
        );
        assert!(STATIC_ZONES
            .valid_offsets("America/New_York", gap)
            .unwrap()
            .is_empty());
        let (adjusted, offset) = STATIC_ZONES
            .offset_for_local("America/New_York", gap, None)
            .unwrap();
        assert_eq!(adjusted.time, IsoTime::new(3, 30, 0, 0).unwrap());
        assert_eq!(offset.seconds(), -4 * 3600);

        // 2011-11-06 01:30 occurs twice.
        let overlap = IsoDateTime::new(
            IsoDate::new(2011, 11, 6).unwrap(),
            IsoTime::new(1, 30, 0, 0).unwrap(),
        );
        let valid = STATIC_ZONES
            .valid_offsets("America/New_York", overlap)
            .unwrap();
        assert_eq!(valid.len(), 2);
        let standard = UtcOffset::from_seconds(-5 * 3600).unwrap();
        let (_, offset) = STATIC_ZONES
            .offset_for_local("America/New_York", overlap, Some(standard))
            .unwrap();
        assert_eq!(offset, standard);
    }

    #[test]
    fn zone_names() {
        let locale = locale();
        let name = |kind, style| {
            STATIC_ZONES.display_name("America/Los_Angeles", kind, style, &locale)
        };
        assert_eq!(name(ZoneNameKind::Daylight, TextStyle::Full), Some("Pacific Daylight Time"));
        assert_eq!(name(ZoneNameKind::Standard, TextStyle::Short), Some("PST"));
        assert_eq!(name(ZoneNameKind::Generic, TextStyle::Full), Some("Pacific Time"));
        assert_eq!(STATIC_ZONES.normalize("utc"), Some("UTC"));
    }
}
