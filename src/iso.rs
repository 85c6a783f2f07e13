//! This module implements the ISO date and time records.
//!
//! The three main types are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! All three implement `TemporalAccessor`, reading their values through
//! `Field`s in the proleptic ISO calendar.

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    fields::{Field, WeekDefinition, MJD_EPOCH_OFFSET},
    options::ArithmeticOverflow,
    utils, TemporalError, TemporalResult, MAX_YEAR, MIN_YEAR, NANOS_PER_SECOND,
    SECONDS_PER_DAY,
};

// ==== `IsoDateTime` section ====

/// `IsoDateTime` is the record of an `IsoDate` and an `IsoTime`.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime`.
    pub const fn new(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates the local date time of an instant at a fixed offset.
    pub fn from_epoch_seconds(
        epoch_seconds: i64,
        nanosecond: u32,
        offset_seconds: i32,
    ) -> TemporalResult<Self> {
        let local = epoch_seconds
            .checked_add(i64::from(offset_seconds))
            .ok_or(TemporalError::range().with_message("Instant exceeds the supported range."))?;
        let epoch_days = local.div_euclid(SECONDS_PER_DAY);
        let second_of_day = local.rem_euclid(SECONDS_PER_DAY);
        let date = IsoDate::from_epoch_days(epoch_days)?;
        let time = IsoTime::from_nano_of_day(
            second_of_day * NANOS_PER_SECOND + i64::from(nanosecond),
        )?;
        Ok(Self::new(date, time))
    }

    /// Returns the epoch seconds of this local date time at a fixed offset.
    pub fn to_epoch_seconds(&self, offset_seconds: i32) -> i64 {
        self.date.to_epoch_days() * SECONDS_PER_DAY + self.time.to_second_of_day()
            - i64::from(offset_seconds)
    }

    /// Get the value of a date or time `Field`.
    pub fn field(&self, field: Field) -> Option<i64> {
        self.date.field(field).or_else(|| self.time.field(field))
    }
}

impl Writeable for IsoDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char('T')?;
        self.time.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint() + 1 + self.time.writeable_length_hint()
    }
}

// ==== `IsoDate` section ====

/// A proleptic ISO-8601 calendar date.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Default for IsoDate {
    fn default() -> Self {
        Self::new_unchecked(1970, 1, 1)
    }
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    pub fn new(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        Self::new_with_overflow(year.into(), month.into(), day.into(), ArithmeticOverflow::Reject)
    }

    /// Creates a new `IsoDate`, constraining or rejecting an invalid day of month.
    pub fn new_with_overflow(
        year: i64,
        month: i64,
        day: i64,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<Self> {
        let year = Field::Year.check_valid_int_value(year)?;
        let month = Field::MonthOfYear.check_valid_int_value(month)? as u8;
        let day = Field::DayOfMonth.check_valid_int_value(day)?;
        let days_in_month = utils::iso_days_in_month(year.into(), month);
        let day = match overflow {
            ArithmeticOverflow::Constrain => day.min(i32::from(days_in_month)) as u8,
            ArithmeticOverflow::Reject => {
                if day > i32::from(days_in_month) {
                    return Err(TemporalError::range().with_message(format!(
                        "Invalid date: day {day} is not valid for month {month} of year {year}"
                    )));
                }
                day as u8
            }
        };
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates a new `IsoDate` from a year and day of year.
    pub fn from_year_day(year: i64, day_of_year: i64) -> TemporalResult<Self> {
        let year = Field::Year.check_valid_int_value(year)?;
        let length = i64::from(utils::days_in_year(year.into()));
        if !(1..=length).contains(&day_of_year) {
            return Err(TemporalError::range().with_message(format!(
                "Invalid date: day of year {day_of_year} is not valid for year {year}"
            )));
        }
        let first = utils::epoch_days_from_gregorian_date(year.into(), 1, 1);
        Self::from_epoch_days(first + day_of_year - 1)
    }

    /// Creates a new `IsoDate` from the epoch day, day 0 is 1970-01-01.
    pub fn from_epoch_days(epoch_days: i64) -> TemporalResult<Self> {
        let epoch_days = Field::EpochDay.check_valid_value(epoch_days)?;
        let (year, month, day) = utils::ymd_from_epoch_days(epoch_days);
        Ok(Self::new_unchecked(year as i32, month, day))
    }

    /// Returns the epoch day of this date.
    #[inline]
    pub fn to_epoch_days(self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year.into(), self.month, self.day)
    }

    /// Returns the ISO day of week, Monday is 1.
    #[inline]
    pub fn day_of_week(self) -> u8 {
        utils::day_of_week_from_epoch_days(self.to_epoch_days())
    }

    /// Returns the one based day of the year.
    pub fn day_of_year(self) -> u16 {
        let first = utils::epoch_days_from_gregorian_date(self.year.into(), 1, 1);
        (self.to_epoch_days() - first + 1) as u16
    }

    /// Returns whether this date is in a leap year.
    #[inline]
    pub fn is_leap_year(self) -> bool {
        utils::is_leap_year(self.year.into())
    }

    /// Returns the number of days in this date's month.
    #[inline]
    pub fn days_in_month(self) -> u8 {
        utils::iso_days_in_month(self.year.into(), self.month)
    }

    /// Returns the number of days in this date's year.
    #[inline]
    pub fn length_of_year(self) -> u16 {
        utils::days_in_year(self.year.into())
    }

    /// Returns the date `days` after this date.
    pub fn plus_days(self, days: i64) -> TemporalResult<Self> {
        if days == 0 {
            return Ok(self);
        }
        let epoch_days = self
            .to_epoch_days()
            .checked_add(days)
            .ok_or(TemporalError::range().with_message("Date exceeds the supported range."))?;
        Self::from_epoch_days(epoch_days)
    }

    /// Returns the date `months` after this date, constraining the day to
    /// the end of the resulting month.
    pub fn plus_months(self, months: i64) -> TemporalResult<Self> {
        if months == 0 {
            return Ok(self);
        }
        let proleptic = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let proleptic = proleptic
            .checked_add(months)
            .ok_or(TemporalError::range().with_message("Date exceeds the supported range."))?;
        Self::new_with_overflow(
            proleptic.div_euclid(12),
            proleptic.rem_euclid(12) + 1,
            self.day.into(),
            ArithmeticOverflow::Constrain,
        )
    }

    /// Returns the date `years` after this date, constraining the day to
    /// the end of the resulting month.
    pub fn plus_years(self, years: i64) -> TemporalResult<Self> {
        let year = i64::from(self.year)
            .checked_add(years)
            .ok_or(TemporalError::range().with_message("Date exceeds the supported range."))?;
        Self::new_with_overflow(
            year,
            self.month.into(),
            self.day.into(),
            ArithmeticOverflow::Constrain,
        )
    }

    /// Returns the date within the same week (Monday start) on `day_of_week`.
    pub fn with_day_of_week(self, day_of_week: u8) -> TemporalResult<Self> {
        self.plus_days(i64::from(day_of_week) - i64::from(self.day_of_week()))
    }

    /// Returns the week of the week based year under a week definition.
    pub fn week_of_week_based_year(self, def: WeekDefinition) -> u8 {
        let dow = def.localized_day_of_week(self.day_of_week());
        let doy = i64::from(self.day_of_year());
        let offset = start_of_week_offset(doy, dow, def);
        let week = compute_week(offset, doy);
        if week == 0 {
            // Back down into the previous year.
            return match self.plus_days(-doy) {
                Ok(date) => date.week_of_week_based_year(def),
                Err(_) => 1,
            };
        } else if week > 50 {
            let year_length = i64::from(self.length_of_year());
            let new_year_week =
                compute_week(offset, year_length + i64::from(def.minimal_days()));
            if week >= new_year_week {
                return (week - new_year_week + 1) as u8;
            }
        }
        week as u8
    }

    /// Returns the week based year under a week definition.
    pub fn week_based_year(self, def: WeekDefinition) -> i64 {
        let dow = def.localized_day_of_week(self.day_of_week());
        let year = i64::from(self.year);
        let doy = i64::from(self.day_of_year());
        let offset = start_of_week_offset(doy, dow, def);
        let week = compute_week(offset, doy);
        if week == 0 {
            return year - 1;
        }
        let year_length = i64::from(self.length_of_year());
        let new_year_week = compute_week(offset, year_length + i64::from(def.minimal_days()));
        if week >= new_year_week {
            return year + 1;
        }
        year
    }

    /// Returns the week of month under a week definition, which may be 0.
    pub fn week_of_month(self, def: WeekDefinition) -> u8 {
        let dow = def.localized_day_of_week(self.day_of_week());
        let dom = i64::from(self.day);
        let offset = start_of_week_offset(dom, dow, def);
        compute_week(offset, dom) as u8
    }

    /// Returns the date of `week` and localized `day_of_week` in the week
    /// based year, with the week clamped to the year's last week.
    pub(crate) fn of_week_based_year(
        def: WeekDefinition,
        week_based_year: i64,
        week: i64,
        day_of_week: u8,
    ) -> TemporalResult<Self> {
        let date = Self::new_with_overflow(week_based_year, 1, 1, ArithmeticOverflow::Reject)?;
        let first_dow = def.localized_day_of_week(date.day_of_week());
        let offset = start_of_week_offset(1, first_dow, def);
        let year_length = i64::from(date.length_of_year());
        let new_year_week = compute_week(offset, year_length + i64::from(def.minimal_days()));
        let week = week.min(new_year_week - 1);
        let days = -offset + i64::from(day_of_week) - 1 + (week - 1) * 7;
        date.plus_days(days)
    }

    /// Get the value of a date `Field`, `None` for unsupported fields.
    pub fn field(&self, field: Field) -> Option<i64> {
        let value = match field {
            Field::DayOfWeek => self.day_of_week().into(),
            Field::AlignedDayOfWeekInMonth => (i64::from(self.day) - 1) % 7 + 1,
            Field::AlignedDayOfWeekInYear => (i64::from(self.day_of_year()) - 1) % 7 + 1,
            Field::DayOfMonth => self.day.into(),
            Field::DayOfYear => self.day_of_year().into(),
            Field::EpochDay => self.to_epoch_days(),
            Field::AlignedWeekOfMonth => (i64::from(self.day) - 1) / 7 + 1,
            Field::AlignedWeekOfYear => (i64::from(self.day_of_year()) - 1) / 7 + 1,
            Field::MonthOfYear => self.month.into(),
            Field::ProlepticMonth => i64::from(self.year) * 12 + i64::from(self.month) - 1,
            Field::YearOfEra => {
                if self.year >= 1 {
                    self.year.into()
                } else {
                    1 - i64::from(self.year)
                }
            }
            Field::Year => self.year.into(),
            Field::Era => i64::from(self.year >= 1),
            Field::QuarterOfYear => (i64::from(self.month) - 1) / 3 + 1,
            Field::DayOfQuarter => {
                let quarter_start = (self.month - 1) / 3 * 3 + 1;
                let first = utils::epoch_days_from_gregorian_date(self.year.into(), quarter_start, 1);
                self.to_epoch_days() - first + 1
            }
            Field::WeekOfWeekBasedYear => self.week_of_week_based_year(WeekDefinition::ISO).into(),
            Field::WeekBasedYear => self.week_based_year(WeekDefinition::ISO),
            Field::LocalizedDayOfWeek(def) => def.localized_day_of_week(self.day_of_week()).into(),
            Field::LocalizedWeekOfMonth(def) => self.week_of_month(def).into(),
            Field::LocalizedWeekOfWeekBasedYear(def) => self.week_of_week_based_year(def).into(),
            Field::LocalizedWeekBasedYear(def) => self.week_based_year(def),
            Field::ModifiedJulianDay => self.to_epoch_days() + MJD_EPOCH_OFFSET,
            _ => return None,
        };
        Some(value)
    }
}

fn start_of_week_offset(day: i64, dow: u8, def: WeekDefinition) -> i64 {
    // Offset of the first day of the week in the period.
    let week_start = (day - i64::from(dow)).rem_euclid(7);
    if week_start + 1 > i64::from(def.minimal_days()) {
        7 - week_start
    } else {
        -week_start
    }
}

fn compute_week(offset: i64, day: i64) -> i64 {
    (7 + offset + (day - 1)) / 7
}

impl Writeable for IsoDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_year(self.year, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.month, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.day, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let year_length = if (0..=9999).contains(&self.year) {
            4
        } else {
            1 + self.year.unsigned_abs().writeable_length_hint().capacity().max(4)
        };

        LengthHint::exact(6 + year_length)
    }
}

// ==== `IsoTime` section ====

/// A time of day with nanosecond precision.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,        // 0..=23
    pub minute: u8,      // 0..=59
    pub second: u8,      // 0..=59
    pub nanosecond: u32, // 0..=999_999_999
}

impl IsoTime {
    /// Midnight, 00:00.
    pub const MIDNIGHT: Self = Self::new_unchecked(0, 0, 0, 0);

    /// Creates a new `IsoTime` without any validation.
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a new validated `IsoTime`.
    pub fn new(hour: i64, minute: i64, second: i64, nanosecond: i64) -> TemporalResult<Self> {
        let hour = Field::HourOfDay.check_valid_value(hour)?;
        let minute = Field::MinuteOfHour.check_valid_value(minute)?;
        let second = Field::SecondOfMinute.check_valid_value(second)?;
        let nanosecond = Field::NanoOfSecond.check_valid_value(nanosecond)?;
        Ok(Self::new_unchecked(
            hour as u8,
            minute as u8,
            second as u8,
            nanosecond as u32,
        ))
    }

    /// Creates a new `IsoTime` from the nanosecond of day.
    pub fn from_nano_of_day(nano_of_day: i64) -> TemporalResult<Self> {
        let nano_of_day = Field::NanoOfDay.check_valid_value(nano_of_day)?;
        let (_, time) = Self::balance(0, 0, 0, nano_of_day);
        Ok(time)
    }

    /// Creates a new `IsoTime` from the second of day.
    pub fn from_second_of_day(second_of_day: i64) -> TemporalResult<Self> {
        let second_of_day = Field::SecondOfDay.check_valid_value(second_of_day)?;
        let (_, time) = Self::balance(0, 0, second_of_day, 0);
        Ok(time)
    }

    /// Balances and creates a new `IsoTime` with the `day` overflow from the provided values.
    pub(crate) fn balance(hour: i64, minute: i64, second: i64, nanosecond: i64) -> (i64, Self) {
        let (quotient, nanosecond) = div_mod(nanosecond, NANOS_PER_SECOND);
        let second = second + quotient;

        let (quotient, second) = div_mod(second, 60);
        let minute = minute + quotient;

        let (quotient, minute) = div_mod(minute, 60);
        let hour = hour + quotient;

        let (days, hour) = div_mod(hour, 24);

        let time = Self::new_unchecked(hour as u8, minute as u8, second as u8, nanosecond as u32);

        (days, time)
    }

    /// Returns the second of the day.
    pub fn to_second_of_day(&self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second)
    }

    /// Returns the nanosecond of the day.
    pub fn to_nano_of_day(&self) -> i64 {
        self.to_second_of_day() * NANOS_PER_SECOND + i64::from(self.nanosecond)
    }

    /// Get the value of a time `Field`, `None` for unsupported fields.
    pub fn field(&self, field: Field) -> Option<i64> {
        let hour = i64::from(self.hour);
        let value = match field {
            Field::NanoOfSecond => self.nanosecond.into(),
            Field::NanoOfDay => self.to_nano_of_day(),
            Field::MicroOfSecond => i64::from(self.nanosecond / 1_000),
            Field::MicroOfDay => self.to_nano_of_day() / 1_000,
            Field::MilliOfSecond => i64::from(self.nanosecond / 1_000_000),
            Field::MilliOfDay => self.to_nano_of_day() / 1_000_000,
            Field::SecondOfMinute => self.second.into(),
            Field::SecondOfDay => self.to_second_of_day(),
            Field::MinuteOfHour => self.minute.into(),
            Field::MinuteOfDay => hour * 60 + i64::from(self.minute),
            Field::HourOfAmPm => hour % 12,
            Field::ClockHourOfAmPm => {
                let ham = hour % 12;
                if ham == 0 {
                    12
                } else {
                    ham
                }
            }
            Field::HourOfDay => hour,
            Field::ClockHourOfDay => {
                if hour == 0 {
                    24
                } else {
                    hour
                }
            }
            Field::AmPmOfDay => hour / 12,
            _ => return None,
        };
        Some(value)
    }
}

impl Writeable for IsoTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if self.nanosecond == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        let mut digits = 9;
        let mut nanos = self.nanosecond;
        while nanos % 10 == 0 {
            nanos /= 10;
            digits -= 1;
        }
        write_padded(u64::from(nanos), digits, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.nanosecond == 0 {
            return LengthHint::exact(8);
        }
        LengthHint::between(10, 18)
    }
}

impl_display_with_writeable!(IsoDateTime);
impl_display_with_writeable!(IsoDate);
impl_display_with_writeable!(IsoTime);

// ==== `IsoDate` specific utiltiy functions ====

#[inline]
fn div_mod(dividend: i64, divisor: i64) -> (i64, i64) {
    (dividend.div_euclid(divisor), dividend.rem_euclid(divisor))
}

/// Returns whether the year is within the supported range.
#[inline]
pub(crate) fn is_valid_year(year: i64) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_padded<W: core::fmt::Write + ?Sized>(
    value: u64,
    width: usize,
    sink: &mut W,
) -> core::fmt::Result {
    let length = value.writeable_length_hint().capacity();
    for _ in length..width {
        sink.write_char('0')?;
    }
    value.write_to(sink)
}

fn write_year<W: core::fmt::Write + ?Sized>(year: i32, sink: &mut W) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        write_padded(u64::from(year.unsigned_abs()), 4, sink)
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        sink.write_char(sign)?;
        write_padded(u64::from(year.unsigned_abs()), 4, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::{IsoDate, IsoDateTime, IsoTime};
    use crate::fields::{Field, WeekDefinition};
    use crate::options::ArithmeticOverflow;
    use writeable::assert_writeable_eq;

    #[test]
    fn date_fields() {
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(date.field(Field::DayOfWeek), Some(6));
        assert_eq!(date.field(Field::DayOfYear), Some(337));
        assert_eq!(date.field(Field::QuarterOfYear), Some(4));
        assert_eq!(date.field(Field::DayOfQuarter), Some(64));
        assert_eq!(date.field(Field::ProlepticMonth), Some(2011 * 12 + 11));
        assert_eq!(date.field(Field::Era), Some(1));
        assert_eq!(date.field(Field::HourOfDay), None);

        let bce = IsoDate::new(0, 1, 1).unwrap();
        assert_eq!(bce.field(Field::YearOfEra), Some(1));
        assert_eq!(bce.field(Field::Era), Some(0));
    }

    #[test]
    fn iso_week_fields() {
        // 2008-12-29 is in week 1 of 2009.
        let date = IsoDate::new(2008, 12, 29).unwrap();
        assert_eq!(date.field(Field::WeekBasedYear), Some(2009));
        assert_eq!(date.field(Field::WeekOfWeekBasedYear), Some(1));
        // 2010-01-03 is in week 53 of 2009.
        let date = IsoDate::new(2010, 1, 3).unwrap();
        assert_eq!(date.field(Field::WeekBasedYear), Some(2009));
        assert_eq!(date.field(Field::WeekOfWeekBasedYear), Some(53));
        let date = IsoDate::new(2012, 6, 23).unwrap();
        assert_eq!(date.field(Field::WeekOfWeekBasedYear), Some(25));

        let date = IsoDate::of_week_based_year(WeekDefinition::ISO, 2009, 53, 7).unwrap();
        assert_eq!(date, IsoDate::new(2010, 1, 3).unwrap());
    }

    #[test]
    fn sunday_start_week_fields() {
        let def = WeekDefinition::SUNDAY_START;
        // 2012-01-01 was a Sunday.
        let date = IsoDate::new(2012, 1, 1).unwrap();
        assert_eq!(date.field(Field::LocalizedDayOfWeek(def)), Some(1));
        assert_eq!(date.field(Field::LocalizedWeekOfWeekBasedYear(def)), Some(1));
        assert_eq!(date.field(Field::LocalizedWeekOfMonth(def)), Some(1));
        let date = IsoDate::new(2011, 12, 31).unwrap();
        assert_eq!(date.field(Field::LocalizedWeekBasedYear(def)), Some(2011));
        assert_eq!(date.field(Field::LocalizedWeekOfWeekBasedYear(def)), Some(53));
    }

    #[test]
    fn date_arithmetic() {
        let date = IsoDate::new(2011, 1, 31).unwrap();
        assert_eq!(date.plus_months(1).unwrap(), IsoDate::new(2011, 2, 28).unwrap());
        assert_eq!(date.plus_months(-2).unwrap(), IsoDate::new(2010, 11, 30).unwrap());
        assert_eq!(date.plus_days(-31).unwrap(), IsoDate::new(2010, 12, 31).unwrap());
        let leap = IsoDate::new(2012, 2, 29).unwrap();
        assert_eq!(leap.plus_years(1).unwrap(), IsoDate::new(2013, 2, 28).unwrap());
        assert_eq!(IsoDate::from_year_day(2012, 60).unwrap(), leap);
        assert!(IsoDate::from_year_day(2011, 366).is_err());
    }

    #[test]
    fn overflow_handling() {
        assert!(IsoDate::new(2011, 2, 29).is_err());
        let constrained =
            IsoDate::new_with_overflow(2011, 2, 31, ArithmeticOverflow::Constrain).unwrap();
        assert_eq!(constrained, IsoDate::new(2011, 2, 28).unwrap());
        assert!(IsoDate::new_with_overflow(2011, 13, 1, ArithmeticOverflow::Constrain).is_err());
    }

    #[test]
    fn time_fields() {
        let time = IsoTime::new(13, 5, 30, 123_456_789).unwrap();
        assert_eq!(time.field(Field::ClockHourOfAmPm), Some(1));
        assert_eq!(time.field(Field::AmPmOfDay), Some(1));
        assert_eq!(time.field(Field::MilliOfSecond), Some(123));
        assert_eq!(time.field(Field::MicroOfSecond), Some(123_456));
        assert_eq!(time.field(Field::MinuteOfDay), Some(785));
        assert_eq!(IsoTime::MIDNIGHT.field(Field::ClockHourOfDay), Some(24));
        assert_eq!(IsoTime::MIDNIGHT.field(Field::ClockHourOfAmPm), Some(12));

        let (days, time) = IsoTime::balance(24, 0, 0, 0);
        assert_eq!(days, 1);
        assert_eq!(time, IsoTime::MIDNIGHT);
    }

    #[test]
    fn epoch_seconds() {
        let dt = IsoDateTime::from_epoch_seconds(1_323_000_930, 0, 3600).unwrap();
        assert_eq!(dt.date, IsoDate::new(2011, 12, 4).unwrap());
        assert_eq!(dt.time, IsoTime::new(13, 15, 30, 0).unwrap());
        assert_eq!(dt.to_epoch_seconds(3600), 1_323_000_930);
        let before = IsoDateTime::from_epoch_seconds(-1, 0, 0).unwrap();
        assert_eq!(before.date, IsoDate::new(1969, 12, 31).unwrap());
        assert_eq!(before.time, IsoTime::new(23, 59, 59, 0).unwrap());
    }

    #[test]
    fn writeable_output() {
        assert_writeable_eq!(IsoDate::new(2011, 12, 3).unwrap(), "2011-12-03");
        assert_writeable_eq!(IsoDate::new(-1, 1, 1).unwrap(), "-0001-01-01");
        assert_writeable_eq!(IsoDate::new(12_345, 1, 1).unwrap(), "+12345-01-01");
        assert_writeable_eq!(IsoTime::new(10, 15, 30, 120_000_000).unwrap(), "10:15:30.12");
        let dt = IsoDateTime::new(
            IsoDate::new(2011, 12, 3).unwrap(),
            IsoTime::new(10, 15, 30, 0).unwrap(),
        );
        assert_writeable_eq!(dt, "2011-12-03T10:15:30");
    }
}
