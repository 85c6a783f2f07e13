//! The `Chronology` calendar system collaborator.
//!
//! A chronology maps calendar field combinations onto dates. All dates are
//! held as proleptic ISO dates, a chronology only changes how the year and
//! era fields of a date are numbered.

use core::fmt;

use tinystr::{tinystr, TinyAsciiStr};

use crate::{
    fields::{Field, FieldValues, ValueRange},
    iso::IsoDate,
    options::ResolverStyle,
    TemporalError, TemporalResult,
};

/// A calendar system.
pub trait Chronology: fmt::Debug + Send + Sync {
    /// The identifier of this chronology, such as "ISO".
    fn id(&self) -> &'static str;

    /// The CLDR calendar type of this chronology, such as "iso8601".
    fn calendar_type(&self) -> TinyAsciiStr<16>;

    /// Creates a date from a proleptic year, month and day.
    fn date(&self, proleptic_year: i64, month: i64, day: i64, style: ResolverStyle)
        -> TemporalResult<IsoDate>;

    /// Creates a date from a proleptic year and a day of year.
    fn date_year_day(&self, proleptic_year: i64, day_of_year: i64) -> TemporalResult<IsoDate>;

    /// Returns the proleptic year of a year of era.
    fn proleptic_year(&self, era: i64, year_of_era: i64) -> TemporalResult<i64>;

    /// The era numbers of this chronology, oldest first.
    fn eras(&self) -> &'static [i64] {
        &[0, 1]
    }

    /// The identifier of an era, such as "CE".
    fn era_id(&self, era: i64) -> Option<&'static str> {
        match era {
            0 => Some("BCE"),
            1 => Some("CE"),
            _ => None,
        }
    }

    /// Get the value of a date `Field` for a date in this chronology.
    fn date_field(&self, date: IsoDate, field: Field) -> Option<i64> {
        date.field(field)
    }

    /// The outer range of a field in this chronology.
    fn range(&self, field: Field) -> ValueRange {
        field.range()
    }

    /// Resolves the year of era and era fields into the year field.
    fn resolve_year_of_era(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> TemporalResult<()> {
        if let Some(year_of_era) = values.remove(Field::YearOfEra) {
            if style != ResolverStyle::Lenient {
                self.range(Field::YearOfEra)
                    .check_valid_int_value(year_of_era, Field::YearOfEra)?;
            }
            if let Some(era) = values.remove(Field::Era) {
                let era = self.range(Field::Era).check_valid_int_value(era, Field::Era)?;
                values.set(Field::Year, self.proleptic_year(era.into(), year_of_era)?)?;
            } else if let Some(year) = values.get(Field::Year) {
                let year = self.range(Field::Year).check_valid_int_value(year, Field::Year)?;
                let date = self.date_year_day(year.into(), 1)?;
                let era = self.date_field(date, Field::Era).unwrap_or(1);
                values.set(Field::Year, self.proleptic_year(era, year_of_era)?)?;
            } else if style == ResolverStyle::Strict {
                // Do not invent an era in strict mode.
                let _ = values.overwrite(Field::YearOfEra, year_of_era);
            } else {
                let era = self.eras().last().copied().unwrap_or(1);
                values.set(Field::Year, self.proleptic_year(era, year_of_era)?)?;
            }
        } else if let Some(era) = values.get(Field::Era) {
            self.range(Field::Era).check_valid_value(era, Field::Era)?;
        }
        Ok(())
    }

    /// Resolves the date fields of the store into a date, removing the
    /// fields that were consumed.
    ///
    /// Returns `None` when no combination of date fields is present.
    fn resolve_date(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> TemporalResult<Option<IsoDate>> {
        if let Some(epoch_day) = values.remove(Field::EpochDay) {
            return IsoDate::from_epoch_days(epoch_day).map(Some);
        }
        self.resolve_proleptic_month(values, style)?;
        self.resolve_year_of_era(values, style)?;

        if !values.contains(Field::Year) {
            return Ok(None);
        }
        let has = |field| values.contains(field);
        if has(Field::MonthOfYear) {
            if has(Field::DayOfMonth) {
                return self.resolve_ymd(values, style).map(Some);
            }
            if has(Field::AlignedWeekOfMonth) {
                if has(Field::AlignedDayOfWeekInMonth) {
                    return self.resolve_aligned(values, style, true, false).map(Some);
                }
                if has(Field::DayOfWeek) {
                    return self.resolve_aligned(values, style, true, true).map(Some);
                }
            }
        }
        if has(Field::DayOfYear) {
            return self.resolve_yd(values, style).map(Some);
        }
        if has(Field::AlignedWeekOfYear) {
            if has(Field::AlignedDayOfWeekInYear) {
                return self.resolve_aligned(values, style, false, false).map(Some);
            }
            if has(Field::DayOfWeek) {
                return self.resolve_aligned(values, style, false, true).map(Some);
            }
        }
        Ok(None)
    }

    /// Splits a proleptic month into the year and month of year fields.
    fn resolve_proleptic_month(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> TemporalResult<()> {
        if let Some(proleptic_month) = values.remove(Field::ProlepticMonth) {
            if style != ResolverStyle::Lenient {
                self.range(Field::ProlepticMonth)
                    .check_valid_value(proleptic_month, Field::ProlepticMonth)?;
            }
            values.set(Field::MonthOfYear, proleptic_month.rem_euclid(12) + 1)?;
            values.set(Field::Year, proleptic_month.div_euclid(12))?;
        }
        Ok(())
    }

    /// Resolves year, month of year and day of month.
    fn resolve_ymd(&self, values: &mut FieldValues, style: ResolverStyle) -> TemporalResult<IsoDate> {
        let year = take(values, Field::Year)?;
        let year = self.range(Field::Year).check_valid_int_value(year, Field::Year)?;
        let month = take(values, Field::MonthOfYear)?;
        let day = take(values, Field::DayOfMonth)?;
        if style == ResolverStyle::Lenient {
            let months = month.checked_sub(1).ok_or_else(overflow)?;
            let days = day.checked_sub(1).ok_or_else(overflow)?;
            return self
                .date(year.into(), 1, 1, style)?
                .plus_months(months)?
                .plus_days(days);
        }
        let month = self
            .range(Field::MonthOfYear)
            .check_valid_int_value(month, Field::MonthOfYear)?;
        let day = self
            .range(Field::DayOfMonth)
            .check_valid_int_value(day, Field::DayOfMonth)?;
        self.date(year.into(), month.into(), day.into(), style)
    }

    /// Resolves year and day of year.
    fn resolve_yd(&self, values: &mut FieldValues, style: ResolverStyle) -> TemporalResult<IsoDate> {
        let year = take(values, Field::Year)?;
        let year = self.range(Field::Year).check_valid_int_value(year, Field::Year)?;
        let day_of_year = take(values, Field::DayOfYear)?;
        if style == ResolverStyle::Lenient {
            let days = day_of_year.checked_sub(1).ok_or_else(overflow)?;
            return self.date_year_day(year.into(), 1)?.plus_days(days);
        }
        let day_of_year = self
            .range(Field::DayOfYear)
            .check_valid_int_value(day_of_year, Field::DayOfYear)?;
        self.date_year_day(year.into(), day_of_year.into())
    }

    /// Resolves aligned weeks of the month (`in_month`) or of the year
    /// with either an aligned day of week or a day of week.
    fn resolve_aligned(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
        in_month: bool,
        day_of_week: bool,
    ) -> TemporalResult<IsoDate> {
        let (week_field, day_field) = match (in_month, day_of_week) {
            (true, false) => (Field::AlignedWeekOfMonth, Field::AlignedDayOfWeekInMonth),
            (false, false) => (Field::AlignedWeekOfYear, Field::AlignedDayOfWeekInYear),
            (true, true) => (Field::AlignedWeekOfMonth, Field::DayOfWeek),
            (false, true) => (Field::AlignedWeekOfYear, Field::DayOfWeek),
        };
        let year = take(values, Field::Year)?;
        let year = self.range(Field::Year).check_valid_int_value(year, Field::Year)?;
        let month = if in_month {
            Some(take(values, Field::MonthOfYear)?)
        } else {
            None
        };
        let week = take(values, week_field)?;
        let day = take(values, day_field)?;

        if style == ResolverStyle::Lenient {
            let mut date = self.date(year.into(), 1, 1, style)?;
            if let Some(month) = month {
                date = date.plus_months(month.checked_sub(1).ok_or_else(overflow)?)?;
            }
            let weeks = week.checked_sub(1).ok_or_else(overflow)?;
            date = date.plus_days(weeks.checked_mul(7).ok_or_else(overflow)?)?;
            if day_of_week {
                return next_or_same_lenient(date, day);
            }
            return date.plus_days(day.checked_sub(1).ok_or_else(overflow)?);
        }

        let month = match month {
            Some(month) => Some(
                self.range(Field::MonthOfYear)
                    .check_valid_int_value(month, Field::MonthOfYear)?,
            ),
            None => None,
        };
        let week = self.range(week_field).check_valid_int_value(week, week_field)?;
        let day = self.range(day_field).check_valid_int_value(day, day_field)?;
        let start = self.date(year.into(), month.map_or(1, i64::from), 1, style)?;
        let mut date = start.plus_days((i64::from(week) - 1) * 7)?;
        if day_of_week {
            let shift = (i64::from(day) - i64::from(date.day_of_week())).rem_euclid(7);
            date = date.plus_days(shift)?;
        } else {
            date = date.plus_days(i64::from(day) - 1)?;
        }
        if style == ResolverStyle::Strict {
            if let Some(month) = month {
                if date.month != month as u8 {
                    return Err(TemporalError::range().with_message(
                        "Strict mode rejected resolved date as it is in a different month",
                    ));
                }
            } else if date.year != start.year {
                return Err(TemporalError::range().with_message(
                    "Strict mode rejected resolved date as it is in a different year",
                ));
            }
        }
        Ok(date)
    }
}

fn take(values: &mut FieldValues, field: Field) -> TemporalResult<i64> {
    values
        .remove(field)
        .ok_or(TemporalError::assert().with_message("Resolved field was not present."))
}

fn overflow() -> TemporalError {
    TemporalError::range().with_message("Field value overflowed during lenient resolution.")
}

/// The proleptic year of `year_of_era` counted back from the era start.
fn year_before_era(year_of_era: i64) -> TemporalResult<i64> {
    1i64.checked_sub(year_of_era).ok_or_else(overflow)
}

fn next_or_same_lenient(date: IsoDate, mut day_of_week: i64) -> TemporalResult<IsoDate> {
    let mut date = date;
    if day_of_week > 7 {
        date = date.plus_days((day_of_week - 1) / 7 * 7)?;
        day_of_week = (day_of_week - 1) % 7 + 1;
    } else if day_of_week < 1 {
        date = date.plus_days(day_of_week.checked_sub(7).ok_or_else(overflow)? / 7 * 7)?;
        day_of_week = (day_of_week + 6) % 7 + 1;
    }
    let shift = (day_of_week - i64::from(date.day_of_week())).rem_euclid(7);
    date.plus_days(shift)
}

/// Returns whether two chronologies are the same calendar system.
pub fn same(a: &dyn Chronology, b: &dyn Chronology) -> bool {
    a.id() == b.id()
}

// ==== IsoChronology ====

/// The proleptic ISO-8601 calendar system.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoChronology;

/// The ISO chronology singleton.
pub static ISO: IsoChronology = IsoChronology;

impl Chronology for IsoChronology {
    fn id(&self) -> &'static str {
        "ISO"
    }

    fn calendar_type(&self) -> TinyAsciiStr<16> {
        tinystr!(16, "iso8601")
    }

    fn date(
        &self,
        proleptic_year: i64,
        month: i64,
        day: i64,
        style: ResolverStyle,
    ) -> TemporalResult<IsoDate> {
        IsoDate::new_with_overflow(proleptic_year, month, day, style.overflow())
    }

    fn date_year_day(&self, proleptic_year: i64, day_of_year: i64) -> TemporalResult<IsoDate> {
        IsoDate::from_year_day(proleptic_year, day_of_year)
    }

    fn proleptic_year(&self, era: i64, year_of_era: i64) -> TemporalResult<i64> {
        match era {
            1 => Ok(year_of_era),
            0 => year_before_era(year_of_era),
            _ => Err(TemporalError::range().with_message(format!("Invalid value for era: {era}"))),
        }
    }

    fn resolve_year_of_era(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> TemporalResult<()> {
        if let Some(year_of_era) = values.remove(Field::YearOfEra) {
            if style != ResolverStyle::Lenient {
                Field::YearOfEra.check_valid_value(year_of_era)?;
            }
            match values.remove(Field::Era) {
                None => {
                    let year = values.get(Field::Year);
                    let resolved = match year {
                        Some(year) if year <= 0 => year_before_era(year_of_era)?,
                        _ => year_of_era,
                    };
                    if style == ResolverStyle::Strict && year.is_none() {
                        // Do not invent an era in strict mode.
                        let _ = values.overwrite(Field::YearOfEra, year_of_era);
                    } else {
                        values.set(Field::Year, resolved)?;
                    }
                }
                Some(era) => values.set(Field::Year, self.proleptic_year(era, year_of_era)?)?,
            }
        } else if let Some(era) = values.get(Field::Era) {
            Field::Era.check_valid_value(era)?;
        }
        Ok(())
    }
}

// ==== ThaiBuddhistChronology ====

/// The Thai Buddhist calendar system, the ISO calendar with years counted
/// from 543 BCE.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThaiBuddhistChronology;

/// The Thai Buddhist chronology singleton.
pub static THAI_BUDDHIST: ThaiBuddhistChronology = ThaiBuddhistChronology;

const BUDDHIST_YEAR_OFFSET: i64 = 543;

impl Chronology for ThaiBuddhistChronology {
    fn id(&self) -> &'static str {
        "ThaiBuddhist"
    }

    fn calendar_type(&self) -> TinyAsciiStr<16> {
        tinystr!(16, "buddhist")
    }

    fn date(
        &self,
        proleptic_year: i64,
        month: i64,
        day: i64,
        style: ResolverStyle,
    ) -> TemporalResult<IsoDate> {
        IsoDate::new_with_overflow(
            proleptic_year.checked_sub(BUDDHIST_YEAR_OFFSET).ok_or_else(overflow)?,
            month,
            day,
            style.overflow(),
        )
    }

    fn date_year_day(&self, proleptic_year: i64, day_of_year: i64) -> TemporalResult<IsoDate> {
        let year = proleptic_year.checked_sub(BUDDHIST_YEAR_OFFSET).ok_or_else(overflow)?;
        IsoDate::from_year_day(year, day_of_year)
    }

    fn proleptic_year(&self, era: i64, year_of_era: i64) -> TemporalResult<i64> {
        match era {
            1 => Ok(year_of_era),
            0 => year_before_era(year_of_era),
            _ => Err(TemporalError::range().with_message(format!("Invalid value for era: {era}"))),
        }
    }

    fn era_id(&self, era: i64) -> Option<&'static str> {
        match era {
            0 => Some("BEFORE_BE"),
            1 => Some("BE"),
            _ => None,
        }
    }

    fn date_field(&self, date: IsoDate, field: Field) -> Option<i64> {
        let year = i64::from(date.year) + BUDDHIST_YEAR_OFFSET;
        match field {
            Field::Year => Some(year),
            Field::YearOfEra => Some(if year >= 1 { year } else { 1 - year }),
            Field::Era => Some(i64::from(year >= 1)),
            Field::ProlepticMonth => Some(year * 12 + i64::from(date.month) - 1),
            _ => date.field(field),
        }
    }

    fn range(&self, field: Field) -> ValueRange {
        match field {
            Field::Year => ValueRange::of(
                crate::MIN_YEAR + BUDDHIST_YEAR_OFFSET,
                crate::MAX_YEAR + BUDDHIST_YEAR_OFFSET,
            ),
            Field::ProlepticMonth => ValueRange::of(
                (crate::MIN_YEAR + BUDDHIST_YEAR_OFFSET) * 12,
                (crate::MAX_YEAR + BUDDHIST_YEAR_OFFSET) * 12 + 11,
            ),
            Field::YearOfEra => ValueRange::of_variable(
                1,
                crate::MAX_YEAR + BUDDHIST_YEAR_OFFSET,
                -(crate::MIN_YEAR + BUDDHIST_YEAR_OFFSET) + 1,
            ),
            _ => field.range(),
        }
    }
}

// ==== Lookup ====

/// All chronologies available by identifier.
pub fn available() -> [&'static dyn Chronology; 2] {
    [&ISO, &THAI_BUDDHIST]
}

/// Returns the chronology with the identifier or calendar type `id`.
pub fn of(id: &str) -> TemporalResult<&'static dyn Chronology> {
    available()
        .into_iter()
        .find(|chrono| chrono.id() == id || chrono.calendar_type().as_str() == id)
        .ok_or_else(|| {
            TemporalError::range().with_message(format!("Unknown chronology: {id}"))
        })
}

// ==== ChronoDate ====

/// A date in a specific chronology.
#[derive(Debug, Clone, Copy)]
pub struct ChronoDate {
    iso: IsoDate,
    chronology: &'static dyn Chronology,
}

impl ChronoDate {
    /// Creates a new `ChronoDate`.
    pub fn new(iso: IsoDate, chronology: &'static dyn Chronology) -> Self {
        Self { iso, chronology }
    }

    /// The ISO date.
    pub fn iso(&self) -> IsoDate {
        self.iso
    }

    /// The chronology of this date.
    pub fn chronology(&self) -> &'static dyn Chronology {
        self.chronology
    }

    /// Get the value of a date `Field` in this date's chronology.
    pub fn field(&self, field: Field) -> Option<i64> {
        self.chronology.date_field(self.iso, field)
    }
}

impl PartialEq for ChronoDate {
    fn eq(&self, other: &Self) -> bool {
        self.iso == other.iso && same(self.chronology, other.chronology)
    }
}

impl Eq for ChronoDate {}

#[cfg(test)]
mod tests {
    use super::{Chronology, ISO, THAI_BUDDHIST};
    use crate::error::ErrorKind;
    use crate::fields::{Field, FieldValues};
    use crate::iso::IsoDate;
    use crate::options::ResolverStyle;

    fn values(pairs: &[(Field, i64)]) -> FieldValues {
        let mut values = FieldValues::new();
        for (field, value) in pairs {
            values.set(*field, *value).unwrap();
        }
        values
    }

    #[test]
    fn resolve_ymd_styles() {
        let fields = [
            (Field::Year, 2011),
            (Field::MonthOfYear, 2),
            (Field::DayOfMonth, 31),
        ];
        let mut smart = values(&fields);
        let date = ISO.resolve_date(&mut smart, ResolverStyle::Smart).unwrap();
        assert_eq!(date, Some(IsoDate::new(2011, 2, 28).unwrap()));
        assert!(smart.is_empty());

        let mut strict = values(&fields);
        assert!(ISO.resolve_date(&mut strict, ResolverStyle::Strict).is_err());

        let mut lenient = values(&fields);
        let date = ISO.resolve_date(&mut lenient, ResolverStyle::Lenient).unwrap();
        assert_eq!(date, Some(IsoDate::new(2011, 3, 3).unwrap()));

        let mut lenient = values(&[
            (Field::Year, 2011),
            (Field::MonthOfYear, 14),
            (Field::DayOfMonth, 0),
        ]);
        let date = ISO.resolve_date(&mut lenient, ResolverStyle::Lenient).unwrap();
        assert_eq!(date, Some(IsoDate::new(2012, 1, 31).unwrap()));
    }

    #[test]
    fn resolve_year_of_era() {
        let mut bce = values(&[
            (Field::Era, 0),
            (Field::YearOfEra, 1),
            (Field::DayOfYear, 1),
        ]);
        let date = ISO.resolve_date(&mut bce, ResolverStyle::Smart).unwrap();
        assert_eq!(date, Some(IsoDate::new(0, 1, 1).unwrap()));

        // Strict mode does not invent the era.
        let mut strict = values(&[
            (Field::YearOfEra, 2011),
            (Field::MonthOfYear, 1),
            (Field::DayOfMonth, 1),
        ]);
        assert_eq!(ISO.resolve_date(&mut strict, ResolverStyle::Strict).unwrap(), None);
        assert_eq!(strict.get(Field::YearOfEra), Some(2011));

        let mut conflict = values(&[(Field::YearOfEra, 2011), (Field::Year, 2012)]);
        let err = ISO
            .resolve_date(&mut conflict, ResolverStyle::Smart)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn lenient_year_of_era_overflow() {
        let mut bce = values(&[
            (Field::Era, 0),
            (Field::YearOfEra, i64::MIN),
            (Field::MonthOfYear, 1),
            (Field::DayOfMonth, 1),
        ]);
        let err = ISO.resolve_date(&mut bce, ResolverStyle::Lenient).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let mut bce = values(&[(Field::Era, 0), (Field::YearOfEra, i64::MIN), (Field::DayOfYear, 1)]);
        let err = THAI_BUDDHIST
            .resolve_date(&mut bce, ResolverStyle::Lenient)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn resolve_other_combinations() {
        let mut proleptic = values(&[(Field::ProlepticMonth, 2011 * 12 + 11), (Field::DayOfMonth, 3)]);
        let date = ISO.resolve_date(&mut proleptic, ResolverStyle::Strict).unwrap();
        assert_eq!(date, Some(IsoDate::new(2011, 12, 3).unwrap()));

        let mut epoch = values(&[(Field::EpochDay, 0)]);
        let date = ISO.resolve_date(&mut epoch, ResolverStyle::Strict).unwrap();
        assert_eq!(date, Some(IsoDate::new(1970, 1, 1).unwrap()));

        // 2011-12 aligned week 1, Saturday.
        let mut aligned = values(&[
            (Field::Year, 2011),
            (Field::MonthOfYear, 12),
            (Field::AlignedWeekOfMonth, 1),
            (Field::DayOfWeek, 6),
        ]);
        let date = ISO.resolve_date(&mut aligned, ResolverStyle::Smart).unwrap();
        assert_eq!(date, Some(IsoDate::new(2011, 12, 3).unwrap()));
    }

    #[test]
    fn thai_buddhist() {
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(THAI_BUDDHIST.date_field(date, Field::Year), Some(2554));
        assert_eq!(THAI_BUDDHIST.date_field(date, Field::DayOfMonth), Some(3));

        let mut fields = values(&[
            (Field::Year, 2554),
            (Field::MonthOfYear, 12),
            (Field::DayOfMonth, 3),
        ]);
        let resolved = THAI_BUDDHIST
            .resolve_date(&mut fields, ResolverStyle::Strict)
            .unwrap();
        assert_eq!(resolved, Some(date));
        assert_eq!(super::of("buddhist").unwrap().id(), "ThaiBuddhist");
        assert!(super::of("julian").is_err());
    }
}
