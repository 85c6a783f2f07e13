//! This module implements the temporal `Field` identifiers and the
//! `FieldValues` store exchanged between parsing and resolution.

use core::fmt;
use core::str::FromStr;
use std::collections::btree_map::{self, BTreeMap};

use icu_locale::Locale;

use crate::{TemporalError, TemporalResult};

// ==== ValueRange ====

/// The range of valid values for a field.
///
/// A range has a minimum and a maximum, each of which may vary between a
/// smallest and a largest bound (for example, the day of month maximum is
/// anything between 28 and 31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// Creates a fixed range.
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// Creates a range with a fixed minimum and a variable maximum.
    pub const fn of_variable(min: i64, max_smallest: i64, max_largest: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    /// Creates a range with both a variable minimum and maximum.
    pub const fn of_full(
        min_smallest: i64,
        min_largest: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> Self {
        Self {
            min_smallest,
            min_largest,
            max_smallest,
            max_largest,
        }
    }

    /// Whether the range bounds do not vary.
    pub const fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest && self.max_smallest == self.max_largest
    }

    /// The smallest possible minimum.
    pub const fn minimum(&self) -> i64 {
        self.min_smallest
    }

    /// The largest possible minimum.
    pub const fn largest_minimum(&self) -> i64 {
        self.min_largest
    }

    /// The smallest possible maximum.
    pub const fn smallest_maximum(&self) -> i64 {
        self.max_smallest
    }

    /// The largest possible maximum.
    pub const fn maximum(&self) -> i64 {
        self.max_largest
    }

    /// Whether all values of the range fit in an `i32`.
    pub const fn is_int_value(&self) -> bool {
        self.min_smallest >= i32::MIN as i64 && self.max_largest <= i32::MAX as i64
    }

    /// Whether `value` is within the outer bounds of the range.
    pub const fn is_valid_value(&self, value: i64) -> bool {
        value >= self.min_smallest && value <= self.max_largest
    }

    /// Checks `value` is within range for `field`.
    pub fn check_valid_value(&self, value: i64, field: Field) -> TemporalResult<i64> {
        if !self.is_valid_value(value) {
            return Err(TemporalError::range().with_message(format!(
                "Invalid value for {field} (valid values {self}): {value}"
            )));
        }
        Ok(value)
    }

    /// Checks `value` is within range for `field` and fits in an `i32`.
    pub fn check_valid_int_value(&self, value: i64, field: Field) -> TemporalResult<i32> {
        if !self.is_int_value() {
            return Err(TemporalError::range()
                .with_message(format!("Invalid int value for {field}: {value}")));
        }
        self.check_valid_value(value, field).map(|v| v as i32)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min_smallest)?;
        if self.min_smallest != self.min_largest {
            write!(f, "/{}", self.min_largest)?;
        }
        write!(f, " - {}", self.max_smallest)?;
        if self.max_smallest != self.max_largest {
            write!(f, "/{}", self.max_largest)?;
        }
        Ok(())
    }
}

// ==== WeekDefinition ====

/// Defines how weeks are split across months and years.
///
/// `first_day_of_week` uses ISO numbering, Monday is 1 and Sunday is 7.
/// `minimal_days` is the number of days the first week of a month or
/// year must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekDefinition {
    first_day_of_week: u8,
    minimal_days: u8,
}

// Regions whose weeks start on Sunday with a one day first week.
const SUNDAY_START_REGIONS: [&str; 12] = [
    "US", "CA", "JP", "BR", "MX", "IL", "KR", "PH", "TW", "ZA", "SA", "IN",
];

// Regions following the ISO week definition.
const ISO_WEEK_REGIONS: [&str; 20] = [
    "AT", "BE", "CH", "CZ", "DE", "DK", "ES", "FI", "FR", "GB", "HU", "IE", "IT", "LU", "NL",
    "NO", "PL", "PT", "RU", "SE",
];

impl WeekDefinition {
    /// The ISO-8601 definition, weeks start on Monday and the first week
    /// has at least four days.
    pub const ISO: Self = Self {
        first_day_of_week: 1,
        minimal_days: 4,
    };

    /// Weeks start on Sunday and the first week may have a single day.
    pub const SUNDAY_START: Self = Self {
        first_day_of_week: 7,
        minimal_days: 1,
    };

    /// Creates a new week definition.
    pub fn new(first_day_of_week: u8, minimal_days: u8) -> TemporalResult<Self> {
        if !(1..=7).contains(&first_day_of_week) {
            return Err(TemporalError::range().with_message("first day of week must be 1 to 7"));
        }
        if !(1..=7).contains(&minimal_days) {
            return Err(TemporalError::range().with_message("minimal days must be 1 to 7"));
        }
        Ok(Self {
            first_day_of_week,
            minimal_days,
        })
    }

    /// Returns the week definition in use for a locale's region.
    pub fn of_locale(locale: &Locale) -> Self {
        match locale.id.region.as_ref().map(|r| r.as_str()) {
            Some(region) if SUNDAY_START_REGIONS.contains(&region) => Self::SUNDAY_START,
            Some(region) if ISO_WEEK_REGIONS.contains(&region) => Self::ISO,
            _ => Self {
                first_day_of_week: 1,
                minimal_days: 1,
            },
        }
    }

    /// The first day of the week, Monday is 1.
    pub const fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    /// The minimal number of days in the first week.
    pub const fn minimal_days(&self) -> u8 {
        self.minimal_days
    }

    /// Converts an ISO day of week into this definition's day of week.
    pub(crate) const fn localized_day_of_week(&self, iso_day_of_week: u8) -> u8 {
        ((iso_day_of_week as i32 - self.first_day_of_week as i32).rem_euclid(7) + 1) as u8
    }

    /// Converts a localized day of week back into an ISO day of week.
    pub(crate) const fn iso_day_of_week(&self, localized_day_of_week: u8) -> u8 {
        ((localized_day_of_week as i32 + self.first_day_of_week as i32 - 2).rem_euclid(7) + 1)
            as u8
    }
}

impl fmt::Display for WeekDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = match self.first_day_of_week {
            1 => "MONDAY",
            2 => "TUESDAY",
            3 => "WEDNESDAY",
            4 => "THURSDAY",
            5 => "FRIDAY",
            6 => "SATURDAY",
            _ => "SUNDAY",
        };
        write!(f, "WeekFields[{day},{}]", self.minimal_days)
    }
}

// ==== Field ====

/// A named, ranged, integer valued component of a temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    HourOfDay,
    ClockHourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
    /// The ISO quarter of year, from 1 to 4.
    QuarterOfYear,
    /// The day of the ISO quarter, from 1 to 92.
    DayOfQuarter,
    /// The ISO week of the week based year.
    WeekOfWeekBasedYear,
    /// The ISO week based year.
    WeekBasedYear,
    /// The day of week counted from the definition's first day.
    LocalizedDayOfWeek(WeekDefinition),
    /// The week of month under a week definition.
    LocalizedWeekOfMonth(WeekDefinition),
    /// The week of week based year under a week definition.
    LocalizedWeekOfWeekBasedYear(WeekDefinition),
    /// The week based year under a week definition.
    LocalizedWeekBasedYear(WeekDefinition),
    /// The modified julian day, day 0 is 1858-11-17.
    ModifiedJulianDay,
}

/// The offset between the modified julian day and the epoch day.
pub(crate) const MJD_EPOCH_OFFSET: i64 = 40_587;

const YEAR_RANGE: ValueRange = ValueRange::of(crate::MIN_YEAR, crate::MAX_YEAR);
const EPOCH_DAY_RANGE: ValueRange = ValueRange::of(-365_243_219_162, 365_241_780_471);

impl Field {
    /// The outer range of valid values of this field.
    pub const fn range(self) -> ValueRange {
        match self {
            Self::NanoOfSecond => ValueRange::of(0, 999_999_999),
            Self::NanoOfDay => ValueRange::of(0, 86_400 * 1_000_000_000 - 1),
            Self::MicroOfSecond => ValueRange::of(0, 999_999),
            Self::MicroOfDay => ValueRange::of(0, 86_400 * 1_000_000 - 1),
            Self::MilliOfSecond => ValueRange::of(0, 999),
            Self::MilliOfDay => ValueRange::of(0, 86_400 * 1_000 - 1),
            Self::SecondOfMinute => ValueRange::of(0, 59),
            Self::SecondOfDay => ValueRange::of(0, 86_400 - 1),
            Self::MinuteOfHour => ValueRange::of(0, 59),
            Self::MinuteOfDay => ValueRange::of(0, 24 * 60 - 1),
            Self::HourOfAmPm => ValueRange::of(0, 11),
            Self::ClockHourOfAmPm => ValueRange::of(1, 12),
            Self::HourOfDay => ValueRange::of(0, 23),
            Self::ClockHourOfDay => ValueRange::of(1, 24),
            Self::AmPmOfDay => ValueRange::of(0, 1),
            Self::DayOfWeek
            | Self::AlignedDayOfWeekInMonth
            | Self::AlignedDayOfWeekInYear
            | Self::LocalizedDayOfWeek(_) => ValueRange::of(1, 7),
            Self::DayOfMonth => ValueRange::of_variable(1, 28, 31),
            Self::DayOfYear => ValueRange::of_variable(1, 365, 366),
            Self::EpochDay => EPOCH_DAY_RANGE,
            Self::AlignedWeekOfMonth => ValueRange::of_variable(1, 4, 5),
            Self::AlignedWeekOfYear => ValueRange::of(1, 53),
            Self::MonthOfYear => ValueRange::of(1, 12),
            Self::ProlepticMonth => {
                ValueRange::of(crate::MIN_YEAR * 12, crate::MAX_YEAR * 12 + 11)
            }
            Self::YearOfEra => ValueRange::of_variable(1, crate::MAX_YEAR, crate::MAX_YEAR + 1),
            Self::Year | Self::WeekBasedYear | Self::LocalizedWeekBasedYear(_) => YEAR_RANGE,
            Self::Era => ValueRange::of(0, 1),
            Self::InstantSeconds => ValueRange::of(i64::MIN, i64::MAX),
            Self::OffsetSeconds => ValueRange::of(-18 * 3600, 18 * 3600),
            Self::QuarterOfYear => ValueRange::of(1, 4),
            Self::DayOfQuarter => ValueRange::of_variable(1, 90, 92),
            Self::WeekOfWeekBasedYear => ValueRange::of_variable(1, 52, 53),
            Self::LocalizedWeekOfMonth(_) => ValueRange::of_full(0, 1, 4, 6),
            Self::LocalizedWeekOfWeekBasedYear(_) => ValueRange::of_variable(1, 52, 53),
            Self::ModifiedJulianDay => ValueRange::of(
                EPOCH_DAY_RANGE.minimum() + MJD_EPOCH_OFFSET,
                EPOCH_DAY_RANGE.maximum() + MJD_EPOCH_OFFSET,
            ),
        }
    }

    /// Whether this field is a component of a date.
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Self::DayOfWeek
                | Self::AlignedDayOfWeekInMonth
                | Self::AlignedDayOfWeekInYear
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::EpochDay
                | Self::AlignedWeekOfMonth
                | Self::AlignedWeekOfYear
                | Self::MonthOfYear
                | Self::ProlepticMonth
                | Self::YearOfEra
                | Self::Year
                | Self::Era
                | Self::QuarterOfYear
                | Self::DayOfQuarter
                | Self::WeekOfWeekBasedYear
                | Self::WeekBasedYear
                | Self::LocalizedDayOfWeek(_)
                | Self::LocalizedWeekOfMonth(_)
                | Self::LocalizedWeekOfWeekBasedYear(_)
                | Self::LocalizedWeekBasedYear(_)
                | Self::ModifiedJulianDay
        )
    }

    /// Whether this field is a component of a time of day.
    pub const fn is_time_based(self) -> bool {
        matches!(
            self,
            Self::NanoOfSecond
                | Self::NanoOfDay
                | Self::MicroOfSecond
                | Self::MicroOfDay
                | Self::MilliOfSecond
                | Self::MilliOfDay
                | Self::SecondOfMinute
                | Self::SecondOfDay
                | Self::MinuteOfHour
                | Self::MinuteOfDay
                | Self::HourOfAmPm
                | Self::ClockHourOfAmPm
                | Self::HourOfDay
                | Self::ClockHourOfDay
                | Self::AmPmOfDay
        )
    }

    /// Whether resolving this field rewrites the field store itself
    /// rather than being handled by the chronology or time resolution.
    pub const fn has_custom_resolution(self) -> bool {
        matches!(
            self,
            Self::QuarterOfYear
                | Self::DayOfQuarter
                | Self::WeekOfWeekBasedYear
                | Self::WeekBasedYear
                | Self::LocalizedDayOfWeek(_)
                | Self::LocalizedWeekOfMonth(_)
                | Self::LocalizedWeekOfWeekBasedYear(_)
                | Self::LocalizedWeekBasedYear(_)
                | Self::ModifiedJulianDay
        )
    }

    /// Checks `value` is within this field's outer range.
    pub fn check_valid_value(self, value: i64) -> TemporalResult<i64> {
        self.range().check_valid_value(value, self)
    }

    /// Checks `value` is within this field's outer range and fits an `i32`.
    pub fn check_valid_int_value(self, value: i64) -> TemporalResult<i32> {
        self.range().check_valid_int_value(value, self)
    }

    /// The name of this field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NanoOfSecond => "NanoOfSecond",
            Self::NanoOfDay => "NanoOfDay",
            Self::MicroOfSecond => "MicroOfSecond",
            Self::MicroOfDay => "MicroOfDay",
            Self::MilliOfSecond => "MilliOfSecond",
            Self::MilliOfDay => "MilliOfDay",
            Self::SecondOfMinute => "SecondOfMinute",
            Self::SecondOfDay => "SecondOfDay",
            Self::MinuteOfHour => "MinuteOfHour",
            Self::MinuteOfDay => "MinuteOfDay",
            Self::HourOfAmPm => "HourOfAmPm",
            Self::ClockHourOfAmPm => "ClockHourOfAmPm",
            Self::HourOfDay => "HourOfDay",
            Self::ClockHourOfDay => "ClockHourOfDay",
            Self::AmPmOfDay => "AmPmOfDay",
            Self::DayOfWeek | Self::LocalizedDayOfWeek(_) => "DayOfWeek",
            Self::AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            Self::AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            Self::DayOfMonth => "DayOfMonth",
            Self::DayOfYear => "DayOfYear",
            Self::EpochDay => "EpochDay",
            Self::AlignedWeekOfMonth => "AlignedWeekOfMonth",
            Self::AlignedWeekOfYear => "AlignedWeekOfYear",
            Self::MonthOfYear => "MonthOfYear",
            Self::ProlepticMonth => "ProlepticMonth",
            Self::YearOfEra => "YearOfEra",
            Self::Year => "Year",
            Self::Era => "Era",
            Self::InstantSeconds => "InstantSeconds",
            Self::OffsetSeconds => "OffsetSeconds",
            Self::QuarterOfYear => "QuarterOfYear",
            Self::DayOfQuarter => "DayOfQuarter",
            Self::WeekOfWeekBasedYear | Self::LocalizedWeekOfWeekBasedYear(_) => {
                "WeekOfWeekBasedYear"
            }
            Self::WeekBasedYear | Self::LocalizedWeekBasedYear(_) => "WeekBasedYear",
            Self::LocalizedWeekOfMonth(_) => "WeekOfMonth",
            Self::ModifiedJulianDay => "ModifiedJulianDay",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::LocalizedDayOfWeek(def)
            | Self::LocalizedWeekOfMonth(def)
            | Self::LocalizedWeekOfWeekBasedYear(def)
            | Self::LocalizedWeekBasedYear(def) => write!(f, "[{def}]"),
            _ => Ok(()),
        }
    }
}

impl FromStr for Field {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "NanoOfSecond" => Self::NanoOfSecond,
            "NanoOfDay" => Self::NanoOfDay,
            "MicroOfSecond" => Self::MicroOfSecond,
            "MicroOfDay" => Self::MicroOfDay,
            "MilliOfSecond" => Self::MilliOfSecond,
            "MilliOfDay" => Self::MilliOfDay,
            "SecondOfMinute" => Self::SecondOfMinute,
            "SecondOfDay" => Self::SecondOfDay,
            "MinuteOfHour" => Self::MinuteOfHour,
            "MinuteOfDay" => Self::MinuteOfDay,
            "HourOfAmPm" => Self::HourOfAmPm,
            "ClockHourOfAmPm" => Self::ClockHourOfAmPm,
            "HourOfDay" => Self::HourOfDay,
            "ClockHourOfDay" => Self::ClockHourOfDay,
            "AmPmOfDay" => Self::AmPmOfDay,
            "DayOfWeek" => Self::DayOfWeek,
            "AlignedDayOfWeekInMonth" => Self::AlignedDayOfWeekInMonth,
            "AlignedDayOfWeekInYear" => Self::AlignedDayOfWeekInYear,
            "DayOfMonth" => Self::DayOfMonth,
            "DayOfYear" => Self::DayOfYear,
            "EpochDay" => Self::EpochDay,
            "AlignedWeekOfMonth" => Self::AlignedWeekOfMonth,
            "AlignedWeekOfYear" => Self::AlignedWeekOfYear,
            "MonthOfYear" => Self::MonthOfYear,
            "ProlepticMonth" => Self::ProlepticMonth,
            "YearOfEra" => Self::YearOfEra,
            "Year" => Self::Year,
            "Era" => Self::Era,
            "InstantSeconds" => Self::InstantSeconds,
            "OffsetSeconds" => Self::OffsetSeconds,
            "QuarterOfYear" => Self::QuarterOfYear,
            "DayOfQuarter" => Self::DayOfQuarter,
            "WeekOfWeekBasedYear" => Self::WeekOfWeekBasedYear,
            "WeekBasedYear" => Self::WeekBasedYear,
            "ModifiedJulianDay" => Self::ModifiedJulianDay,
            _ => {
                return Err(TemporalError::general(
                    "String cannot be converted to a Field",
                ))
            }
        };
        Ok(field)
    }
}

// ==== FieldValues ====

/// A mapping from `Field` to its parsed value.
///
/// Setting a field which already holds a different value is a conflict.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<Field, i64>,
}

impl FieldValues {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of the provided `Field`
    pub fn get(&self, field: Field) -> Option<i64> {
        self.values.get(&field).copied()
    }

    /// Whether the field holds a value.
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Sets a field, failing with a conflict if a different value is present.
    pub fn set(&mut self, field: Field, value: i64) -> TemporalResult<()> {
        match self.values.get(&field) {
            Some(&existing) if existing != value => Err(TemporalError::conflict().with_message(
                format!("Conflict found: {field} {existing} differs from {field} {value}"),
            )),
            _ => {
                let _ = self.values.insert(field, value);
                Ok(())
            }
        }
    }

    /// Sets a field unconditionally, returning the previous value.
    pub fn overwrite(&mut self, field: Field, value: i64) -> Option<i64> {
        self.values.insert(field, value)
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: Field) -> Option<i64> {
        self.values.remove(&field)
    }

    /// The fields currently present, in field order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    /// Iterate over the field and value pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, Field, i64> {
        self.values.iter()
    }

    /// Retain only the fields matching `f`.
    pub fn retain(&mut self, mut f: impl FnMut(Field, i64) -> bool) {
        self.values.retain(|field, value| f(*field, *value));
    }

    /// The number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldValues {
    type Item = (&'a Field, &'a i64);
    type IntoIter = btree_map::Iter<'a, Field, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for FieldValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.values.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldValues, ValueRange, WeekDefinition};
    use crate::error::ErrorKind;
    use core::str::FromStr;

    #[test]
    fn conflicting_set() {
        let mut values = FieldValues::new();
        values.set(Field::Year, 2011).unwrap();
        values.set(Field::Year, 2011).unwrap();
        let err = values.set(Field::Year, 2012).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(values.get(Field::Year), Some(2011));

        assert_eq!(values.overwrite(Field::Year, 2012), Some(2011));
        assert_eq!(values.get(Field::Year), Some(2012));
    }

    #[test]
    fn ranges() {
        assert!(Field::NanoOfSecond.range().is_fixed());
        assert!(!Field::DayOfMonth.range().is_fixed());
        assert!(Field::Year.range().is_int_value());
        assert!(!Field::InstantSeconds.range().is_int_value());
        assert!(Field::MonthOfYear.check_valid_value(13).is_err());
        assert_eq!(Field::DayOfMonth.range().to_string(), "1 - 28/31");
        assert_eq!(ValueRange::of(0, 59).to_string(), "0 - 59");
    }

    #[test]
    fn week_definitions() {
        let us = WeekDefinition::SUNDAY_START;
        // Sunday is the first day.
        assert_eq!(us.localized_day_of_week(7), 1);
        assert_eq!(us.localized_day_of_week(1), 2);
        assert_eq!(us.iso_day_of_week(1), 7);
        assert_eq!(us.iso_day_of_week(7), 6);
        for iso in 1..=7 {
            assert_eq!(WeekDefinition::ISO.localized_day_of_week(iso), iso);
            assert_eq!(us.iso_day_of_week(us.localized_day_of_week(iso)), iso);
        }

        let locale = "en-US".parse().unwrap();
        assert_eq!(WeekDefinition::of_locale(&locale), WeekDefinition::SUNDAY_START);
        let locale = "fr-FR".parse().unwrap();
        assert_eq!(WeekDefinition::of_locale(&locale), WeekDefinition::ISO);
    }

    #[test]
    fn field_names() {
        assert_eq!(Field::from_str("MonthOfYear").unwrap(), Field::MonthOfYear);
        assert!(Field::from_str("Month").is_err());
        assert_eq!(
            Field::LocalizedDayOfWeek(WeekDefinition::ISO).to_string(),
            "DayOfWeek[WeekFields[MONDAY,4]]"
        );
    }
}
