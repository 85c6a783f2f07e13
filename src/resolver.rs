//! The resolution engine.
//!
//! Parsing collects raw field values into a [`Parsed`]. Resolution then
//! reduces those values, pass by pass, into a date, a time of day, an
//! excess day count and, when enough is known, an instant.

use core::fmt;

use crate::{
    chronology::{self, Chronology},
    fields::{Field, FieldValues, WeekDefinition},
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::ResolverStyle,
    provider::ZoneProvider,
    temporal::{Instant, OffsetDateTime, TemporalAccessor, ZonedDateTime},
    zone::{UtcOffset, ZoneId},
    TemporalError, TemporalResult, TemporalUnwrap, NANOS_PER_DAY,
};

/// The maximum number of field rewrites before resolution is abandoned.
const MAX_RESOLVE_PASSES: usize = 50;

/// The result of parsing text.
///
/// Unresolved, it holds the raw field values, zone and chronology written by
/// the parser. Resolved, the date and time of day are available as well as
/// any field left over that could not be merged into them.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub(crate) values: FieldValues,
    pub(crate) zone: Option<ZoneId>,
    pub(crate) chronology: Option<&'static dyn Chronology>,
    pub(crate) leap_second: bool,
    date: Option<IsoDate>,
    time: Option<IsoTime>,
    excess_days: i64,
    style: ResolverStyle,
    zones: &'static dyn ZoneProvider,
}

impl Parsed {
    /// Creates an empty, unresolved result.
    pub(crate) fn new(zones: &'static dyn ZoneProvider) -> Self {
        Self {
            values: FieldValues::new(),
            zone: None,
            chronology: None,
            leap_second: false,
            date: None,
            time: None,
            excess_days: 0,
            style: ResolverStyle::Smart,
            zones,
        }
    }

    /// The field values which have not been merged into the date or time.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// The resolved date.
    pub fn date(&self) -> Option<IsoDate> {
        self.date
    }

    /// The resolved time of day.
    pub fn time(&self) -> Option<IsoTime> {
        self.time
    }

    /// The parsed zone, either read from the text or the formatter's override.
    pub fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// The parsed chronology.
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chronology
    }

    /// The days carried over from a time past midnight that could not be
    /// merged into a date.
    pub fn excess_days(&self) -> i64 {
        self.excess_days
    }

    /// Whether a leap second was parsed.
    pub fn leap_second(&self) -> bool {
        self.leap_second
    }

    /// Converts to a local date time.
    pub fn to_date_time(&self) -> TemporalResult<IsoDateTime> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Ok(IsoDateTime::new(date, time)),
            _ => Err(self.unable("IsoDateTime")),
        }
    }

    /// Converts to a date time with an offset.
    pub fn to_offset_date_time(&self) -> TemporalResult<OffsetDateTime> {
        let datetime = self.to_date_time()?;
        let offset = self
            .offset()
            .ok_or_else(|| self.unable("OffsetDateTime"))?;
        Ok(OffsetDateTime::new(datetime, offset))
    }

    /// Converts to a date time in a zone.
    ///
    /// A parsed offset takes priority over the zone's rules when the local
    /// date time is ambiguous.
    pub fn to_zoned_date_time(&self) -> TemporalResult<ZonedDateTime> {
        let zone = TemporalAccessor::zone(self)
            .or_else(|| self.offset().map(ZoneId::Offset))
            .ok_or_else(|| self.unable("ZonedDateTime"))?;
        if self.values.contains(Field::InstantSeconds) {
            let instant = self.to_instant()?;
            return ZonedDateTime::of_instant(instant, zone, self.zones);
        }
        let datetime = self.to_date_time()?;
        ZonedDateTime::of_local(datetime, zone, self.offset(), self.zones)
    }

    /// Converts to an instant.
    pub fn to_instant(&self) -> TemporalResult<Instant> {
        let seconds = self
            .field(Field::InstantSeconds)
            .ok_or_else(|| self.unable("Instant"))?;
        let nanos = self.field(Field::NanoOfSecond).unwrap_or(0);
        Instant::from_epoch_seconds(seconds, nanos)
    }

    fn unable(&self, target: &str) -> TemporalError {
        TemporalError::unavailable()
            .with_message(format!("Unable to obtain {target} from temporal value: {self}"))
    }

    fn effective_chronology(&self) -> &'static dyn Chronology {
        self.chronology.unwrap_or(&chronology::ISO)
    }
}

impl TemporalAccessor for Parsed {
    fn field(&self, field: Field) -> Option<i64> {
        if let Some(value) = self.values.get(field) {
            return Some(value);
        }
        if let Some(date) = self.date {
            if let Some(value) = self.effective_chronology().date_field(date, field) {
                return Some(value);
            }
        }
        self.time.and_then(|time| time.field(field))
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chronology
    }

    fn zone(&self) -> Option<ZoneId> {
        self.zone.clone()
    }

    fn offset(&self) -> Option<UtcOffset> {
        if let Some(seconds) = self.values.get(Field::OffsetSeconds) {
            return UtcOffset::from_seconds(seconds).ok();
        }
        match &self.zone {
            Some(ZoneId::Offset(offset)) => Some(*offset),
            _ => None,
        }
    }

    fn local_date(&self) -> Option<IsoDate> {
        self.date
    }

    fn local_time(&self) -> Option<IsoTime> {
        self.time
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.values, self.effective_chronology().id())?;
        if let Some(zone) = &self.zone {
            write!(f, ",{zone}")?;
        }
        if self.date.is_some() || self.time.is_some() {
            f.write_str(" resolved to ")?;
            match (self.date, self.time) {
                (Some(date), Some(time)) => write!(f, "{}", IsoDateTime::new(date, time))?,
                (Some(date), None) => write!(f, "{date}")?,
                (None, Some(time)) => write!(f, "{time}")?,
                (None, None) => {}
            }
        }
        Ok(())
    }
}

// ==== Resolution ====

impl Parsed {
    /// Resolves the parsed values in place.
    ///
    /// Only the fields in `resolver_fields` take part when a filter is given.
    pub(crate) fn resolve(
        &mut self,
        style: ResolverStyle,
        resolver_fields: Option<&[Field]>,
    ) -> TemporalResult<()> {
        if let Some(filter) = resolver_fields {
            self.values.retain(|field, _| filter.contains(&field));
        }
        self.style = style;
        self.resolve_fields()?;
        self.resolve_time_lenient()?;
        self.cross_check()?;
        self.resolve_period()?;
        self.resolve_fractional();
        self.resolve_instant()
    }

    fn resolve_fields(&mut self) -> TemporalResult<()> {
        self.resolve_builtin_fields()?;

        let mut changes = 0;
        'passes: while changes < MAX_RESOLVE_PASSES {
            let custom: Vec<Field> = self
                .values
                .fields()
                .filter(|field| field.has_custom_resolution())
                .collect();
            for field in custom {
                if !self.values.contains(field) {
                    continue;
                }
                if let Some(date) = self.resolve_custom(field)? {
                    self.merge_date(date)?;
                    changes += 1;
                    continue 'passes;
                }
                if !self.values.contains(field) {
                    changes += 1;
                    continue 'passes;
                }
            }
            break;
        }
        if changes == MAX_RESOLVE_PASSES {
            #[cfg(feature = "log")]
            log::error!("field resolution did not converge: {}", self.values);
            return Err(TemporalError::resolution().with_message(
                "One of the parsed fields has an incorrectly implemented resolve method",
            ));
        }
        if changes > 0 {
            self.resolve_builtin_fields()?;
        }
        Ok(())
    }

    fn resolve_builtin_fields(&mut self) -> TemporalResult<()> {
        self.resolve_instant_fields()?;
        self.resolve_date_fields()?;
        self.resolve_time_fields()
    }

    fn resolve_instant_fields(&mut self) -> TemporalResult<()> {
        let Some(seconds) = self.values.get(Field::InstantSeconds) else {
            return Ok(());
        };
        let offset = if let Some(zone) = &self.zone {
            zone.offset_at(seconds, self.zones)?
        } else if let Some(offset) = self.values.get(Field::OffsetSeconds) {
            UtcOffset::from_seconds(offset)?
        } else {
            return Ok(());
        };
        let local = IsoDateTime::from_epoch_seconds(seconds, 0, offset.seconds())?;
        self.merge_date(local.date)?;
        self.update_check_conflict(
            Field::InstantSeconds,
            Field::SecondOfDay,
            local.time.to_second_of_day(),
        )?;
        self.update_check_conflict(
            Field::InstantSeconds,
            Field::OffsetSeconds,
            offset.seconds().into(),
        )
    }

    fn resolve_date_fields(&mut self) -> TemporalResult<()> {
        let chronology = self.effective_chronology();
        if let Some(date) = chronology.resolve_date(&mut self.values, self.style)? {
            self.merge_date(date)?;
        }
        Ok(())
    }

    fn resolve_time_fields(&mut self) -> TemporalResult<()> {
        let style = self.style;
        let checked = |field: Field, value: i64| -> TemporalResult<i64> {
            if style == ResolverStyle::Lenient {
                return Ok(value);
            }
            field.check_valid_value(value)
        };

        // Clock hours, strict allows 1-24 and smart additionally allows 0.
        if let Some(hour) = self.values.remove(Field::ClockHourOfDay) {
            if style == ResolverStyle::Strict || (style == ResolverStyle::Smart && hour != 0) {
                Field::ClockHourOfDay.check_valid_value(hour)?;
            }
            let hour = if hour == 24 { 0 } else { hour };
            self.update_check_conflict(Field::ClockHourOfDay, Field::HourOfDay, hour)?;
        }
        if let Some(hour) = self.values.remove(Field::ClockHourOfAmPm) {
            if style == ResolverStyle::Strict || (style == ResolverStyle::Smart && hour != 0) {
                Field::ClockHourOfAmPm.check_valid_value(hour)?;
            }
            let hour = if hour == 12 { 0 } else { hour };
            self.update_check_conflict(Field::ClockHourOfAmPm, Field::HourOfAmPm, hour)?;
        }
        if self.values.contains(Field::AmPmOfDay) && self.values.contains(Field::HourOfAmPm) {
            let am_pm = self.values.remove(Field::AmPmOfDay).temporal_unwrap()?;
            let hour = self.values.remove(Field::HourOfAmPm).temporal_unwrap()?;
            let hour_of_day = if style == ResolverStyle::Lenient {
                am_pm
                    .checked_mul(12)
                    .and_then(|h| h.checked_add(hour))
                    .ok_or_else(overflow)?
            } else {
                Field::AmPmOfDay.check_valid_value(am_pm)? * 12
                    + Field::HourOfAmPm.check_valid_value(hour)?
            };
            self.update_check_conflict(Field::AmPmOfDay, Field::HourOfDay, hour_of_day)?;
        }

        // Split the composite time fields into their primitives.
        if let Some(nanos) = self.values.remove(Field::NanoOfDay) {
            let nanos = checked(Field::NanoOfDay, nanos)?;
            self.update_check_conflict(Field::NanoOfDay, Field::HourOfDay, nanos / 3_600_000_000_000)?;
            self.update_check_conflict(
                Field::NanoOfDay,
                Field::MinuteOfHour,
                (nanos / 60_000_000_000) % 60,
            )?;
            self.update_check_conflict(
                Field::NanoOfDay,
                Field::SecondOfMinute,
                (nanos / 1_000_000_000) % 60,
            )?;
            self.update_check_conflict(Field::NanoOfDay, Field::NanoOfSecond, nanos % 1_000_000_000)?;
        }
        if let Some(micros) = self.values.remove(Field::MicroOfDay) {
            let micros = checked(Field::MicroOfDay, micros)?;
            self.update_check_conflict(Field::MicroOfDay, Field::SecondOfDay, micros / 1_000_000)?;
            self.update_check_conflict(Field::MicroOfDay, Field::MicroOfSecond, micros % 1_000_000)?;
        }
        if let Some(millis) = self.values.remove(Field::MilliOfDay) {
            let millis = checked(Field::MilliOfDay, millis)?;
            self.update_check_conflict(Field::MilliOfDay, Field::SecondOfDay, millis / 1_000)?;
            self.update_check_conflict(Field::MilliOfDay, Field::MilliOfSecond, millis % 1_000)?;
        }
        if let Some(seconds) = self.values.remove(Field::SecondOfDay) {
            let seconds = checked(Field::SecondOfDay, seconds)?;
            self.update_check_conflict(Field::SecondOfDay, Field::HourOfDay, seconds / 3600)?;
            self.update_check_conflict(Field::SecondOfDay, Field::MinuteOfHour, (seconds / 60) % 60)?;
            self.update_check_conflict(Field::SecondOfDay, Field::SecondOfMinute, seconds % 60)?;
        }
        if let Some(minutes) = self.values.remove(Field::MinuteOfDay) {
            let minutes = checked(Field::MinuteOfDay, minutes)?;
            self.update_check_conflict(Field::MinuteOfDay, Field::HourOfDay, minutes / 60)?;
            self.update_check_conflict(Field::MinuteOfDay, Field::MinuteOfHour, minutes % 60)?;
        }

        // Merge the partial second fields, lenient expansion happens later.
        if let Some(nanos) = self.values.get(Field::NanoOfSecond) {
            let mut nanos = checked(Field::NanoOfSecond, nanos)?;
            if let Some(micros) = self.values.remove(Field::MicroOfSecond) {
                let micros = checked(Field::MicroOfSecond, micros)?;
                nanos = scale(micros, 1_000, nanos % 1_000)?;
                self.update_check_conflict(Field::MicroOfSecond, Field::NanoOfSecond, nanos)?;
            }
            if let Some(millis) = self.values.remove(Field::MilliOfSecond) {
                let millis = checked(Field::MilliOfSecond, millis)?;
                self.update_check_conflict(
                    Field::MilliOfSecond,
                    Field::NanoOfSecond,
                    scale(millis, 1_000_000, nanos % 1_000_000)?,
                )?;
            }
        }

        let primitives = [
            Field::HourOfDay,
            Field::MinuteOfHour,
            Field::SecondOfMinute,
            Field::NanoOfSecond,
        ];
        if primitives.iter().all(|field| self.values.contains(*field)) {
            let [hour, minute, second, nanos] = primitives.map(|field| self.values.remove(field));
            self.resolve_time(
                hour.temporal_unwrap()?,
                minute.temporal_unwrap()?,
                second.temporal_unwrap()?,
                nanos.temporal_unwrap()?,
            )?;
        }
        Ok(())
    }

    fn resolve_time_lenient(&mut self) -> TemporalResult<()> {
        if self.time.is_none() {
            if let Some(millis) = self.values.remove(Field::MilliOfSecond) {
                if let Some(micros) = self.values.get(Field::MicroOfSecond) {
                    let micros = scale(millis, 1_000, micros % 1_000)?;
                    self.update_check_conflict(Field::MilliOfSecond, Field::MicroOfSecond, micros)?;
                    let _ = self.values.remove(Field::MicroOfSecond);
                    let _ = self.values.overwrite(Field::NanoOfSecond, scale(micros, 1_000, 0)?);
                } else {
                    let _ = self
                        .values
                        .overwrite(Field::NanoOfSecond, scale(millis, 1_000_000, 0)?);
                }
            } else if let Some(micros) = self.values.remove(Field::MicroOfSecond) {
                let _ = self.values.overwrite(Field::NanoOfSecond, scale(micros, 1_000, 0)?);
            }

            if let Some(hour) = self.values.get(Field::HourOfDay) {
                let minute = self.values.get(Field::MinuteOfHour);
                let second = self.values.get(Field::SecondOfMinute);
                let nanos = self.values.get(Field::NanoOfSecond);
                // A gap in the smaller units cannot be defaulted.
                let gap = (minute.is_none() && (second.is_some() || nanos.is_some()))
                    || (minute.is_some() && second.is_none() && nanos.is_some());
                if gap {
                    return Ok(());
                }
                self.resolve_time(
                    hour,
                    minute.unwrap_or(0),
                    second.unwrap_or(0),
                    nanos.unwrap_or(0),
                )?;
                for field in [
                    Field::HourOfDay,
                    Field::MinuteOfHour,
                    Field::SecondOfMinute,
                    Field::NanoOfSecond,
                ] {
                    let _ = self.values.remove(field);
                }
            }
        }

        if self.style != ResolverStyle::Lenient {
            for (field, value) in &self.values {
                if field.is_time_based() {
                    field.check_valid_value(*value)?;
                }
            }
        }
        Ok(())
    }

    fn resolve_time(&mut self, hour: i64, minute: i64, second: i64, nanos: i64) -> TemporalResult<()> {
        if self.style == ResolverStyle::Lenient {
            let total = hour
                .checked_mul(3_600_000_000_000)
                .and_then(|t| t.checked_add(minute.checked_mul(60_000_000_000)?))
                .and_then(|t| t.checked_add(second.checked_mul(1_000_000_000)?))
                .and_then(|t| t.checked_add(nanos))
                .ok_or_else(overflow)?;
            let excess_days = total.div_euclid(NANOS_PER_DAY);
            let time = IsoTime::from_nano_of_day(total.rem_euclid(NANOS_PER_DAY))?;
            return self.merge_time(time, excess_days);
        }
        let minute = Field::MinuteOfHour.check_valid_value(minute)?;
        let nanos = Field::NanoOfSecond.check_valid_value(nanos)?;
        if self.style == ResolverStyle::Smart && hour == 24 && minute == 0 && second == 0 && nanos == 0
        {
            return self.merge_time(IsoTime::MIDNIGHT, 1);
        }
        let time = IsoTime::new(
            Field::HourOfDay.check_valid_value(hour)?,
            minute,
            Field::SecondOfMinute.check_valid_value(second)?,
            nanos,
        )?;
        self.merge_time(time, 0)
    }

    fn resolve_period(&mut self) -> TemporalResult<()> {
        if let (Some(date), Some(_)) = (self.date, self.time) {
            if self.excess_days != 0 {
                self.date = Some(date.plus_days(self.excess_days)?);
                self.excess_days = 0;
            }
        }
        Ok(())
    }

    fn resolve_fractional(&mut self) {
        let has_seconds = [Field::InstantSeconds, Field::SecondOfDay, Field::SecondOfMinute]
            .iter()
            .any(|field| self.values.contains(*field));
        if self.time.is_some() || !has_seconds {
            return;
        }
        let nanos = self.values.get(Field::NanoOfSecond).unwrap_or(0);
        let _ = self.values.overwrite(Field::NanoOfSecond, nanos);
        let _ = self.values.overwrite(Field::MicroOfSecond, nanos / 1_000);
        let _ = self.values.overwrite(Field::MilliOfSecond, nanos / 1_000_000);
    }

    fn resolve_instant(&mut self) -> TemporalResult<()> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Ok(());
        };
        let datetime = IsoDateTime::new(date, time);
        let offset = if let Some(seconds) = self.values.get(Field::OffsetSeconds) {
            UtcOffset::from_seconds(seconds)?
        } else if let Some(zone) = &self.zone {
            ZonedDateTime::of_local(datetime, zone.clone(), None, self.zones)?.utc_offset()
        } else {
            return Ok(());
        };
        let _ = self
            .values
            .overwrite(Field::InstantSeconds, datetime.to_epoch_seconds(offset.seconds()));
        Ok(())
    }

    fn cross_check(&mut self) -> TemporalResult<()> {
        if let Some(date) = self.date {
            let chronology = self.effective_chronology();
            self.cross_check_with(&format!("{date}"), |field| chronology.date_field(date, field))?;
        }
        if let Some(time) = self.time {
            self.cross_check_with(&format!("{time}"), |field| time.field(field))?;
        }
        Ok(())
    }

    fn cross_check_with(
        &mut self,
        target: &str,
        read: impl Fn(Field) -> Option<i64>,
    ) -> TemporalResult<()> {
        let mut checked = Vec::new();
        for (field, parsed) in &self.values {
            let Some(derived) = read(*field) else {
                continue;
            };
            if derived != *parsed {
                return Err(TemporalError::conflict().with_message(format!(
                    "Conflict found: Field {field} {derived} differs from {field} {parsed} derived from {target}"
                )));
            }
            checked.push(*field);
        }
        for field in checked {
            let _ = self.values.remove(field);
        }
        Ok(())
    }

    fn update_check_conflict(&mut self, target: Field, field: Field, value: i64) -> TemporalResult<()> {
        match self.values.overwrite(field, value) {
            Some(old) if old != value => Err(TemporalError::conflict().with_message(format!(
                "Conflict found: {field} {old} differs from {field} {value} while resolving {target}"
            ))),
            _ => Ok(()),
        }
    }

    fn merge_date(&mut self, date: IsoDate) -> TemporalResult<()> {
        match self.date {
            Some(existing) if existing != date => Err(TemporalError::conflict().with_message(
                format!("Conflict found: Fields resolved to two different dates: {existing} {date}"),
            )),
            _ => {
                self.date = Some(date);
                Ok(())
            }
        }
    }

    fn merge_time(&mut self, time: IsoTime, excess_days: i64) -> TemporalResult<()> {
        let Some(existing) = self.time else {
            self.time = Some(time);
            self.excess_days = excess_days;
            return Ok(());
        };
        if existing != time {
            return Err(TemporalError::conflict().with_message(format!(
                "Conflict found: Fields resolved to different times: {existing} {time}"
            )));
        }
        if self.excess_days != 0 && excess_days != 0 && self.excess_days != excess_days {
            return Err(TemporalError::conflict().with_message(format!(
                "Conflict found: Fields resolved to different excess periods: {} {excess_days}",
                self.excess_days
            )));
        }
        self.excess_days = excess_days;
        Ok(())
    }

    // ==== Custom field resolution ====

    /// Resolves a field that rewrites the store itself, returning a date when
    /// one could be built.
    fn resolve_custom(&mut self, field: Field) -> TemporalResult<Option<IsoDate>> {
        match field {
            Field::DayOfQuarter => self.resolve_day_of_quarter(),
            Field::WeekOfWeekBasedYear => self.resolve_iso_week(),
            Field::ModifiedJulianDay => {
                let value = self.values.remove(field).temporal_unwrap()?;
                if self.style != ResolverStyle::Lenient {
                    field.check_valid_value(value)?;
                }
                let epoch_day = value
                    .checked_sub(crate::fields::MJD_EPOCH_OFFSET)
                    .ok_or_else(overflow)?;
                IsoDate::from_epoch_days(epoch_day).map(Some)
            }
            Field::LocalizedDayOfWeek(def) => {
                let value = self.values.get(field).temporal_unwrap()?;
                let localized = field.check_valid_int_value(value)?;
                let _ = self.values.remove(field);
                let iso = def.iso_day_of_week(localized as u8);
                let _ = self.values.overwrite(Field::DayOfWeek, iso.into());
                Ok(None)
            }
            Field::LocalizedWeekOfMonth(def) => self.resolve_week_of_month(def),
            Field::LocalizedWeekOfWeekBasedYear(def) | Field::LocalizedWeekBasedYear(def) => {
                self.resolve_week_based_year(def, field)
            }
            _ => Ok(None),
        }
    }

    fn ensure_iso(&self) -> TemporalResult<()> {
        if !chronology::same(self.effective_chronology(), &chronology::ISO) {
            return Err(TemporalError::general("Resolve requires IsoChronology"));
        }
        Ok(())
    }

    fn resolve_day_of_quarter(&mut self) -> TemporalResult<Option<IsoDate>> {
        let (Some(year), Some(quarter)) = (
            self.values.get(Field::Year),
            self.values.get(Field::QuarterOfYear),
        ) else {
            return Ok(None);
        };
        let year = Field::Year.check_valid_int_value(year)?;
        let mut day = self.values.get(Field::DayOfQuarter).temporal_unwrap()?;
        self.ensure_iso()?;
        let date = if self.style == ResolverStyle::Lenient {
            let months = quarter
                .checked_sub(1)
                .and_then(|q| q.checked_mul(3))
                .ok_or_else(overflow)?;
            day = day.checked_sub(1).ok_or_else(overflow)?;
            IsoDate::new(year, 1, 1)?.plus_months(months)?
        } else {
            let quarter = Field::QuarterOfYear.check_valid_int_value(quarter)?;
            let date = IsoDate::new(year, ((quarter - 1) * 3 + 1) as u8, 1)?;
            if !(1..=90).contains(&day) {
                if self.style == ResolverStyle::Strict {
                    let length = date.plus_months(3)?.to_epoch_days() - date.to_epoch_days();
                    crate::fields::ValueRange::of(1, length)
                        .check_valid_value(day, Field::DayOfQuarter)?;
                } else {
                    Field::DayOfQuarter.check_valid_value(day)?;
                }
            }
            day -= 1;
            date
        };
        for field in [Field::DayOfQuarter, Field::Year, Field::QuarterOfYear] {
            let _ = self.values.remove(field);
        }
        date.plus_days(day).map(Some)
    }

    fn resolve_iso_week(&mut self) -> TemporalResult<Option<IsoDate>> {
        let (Some(year), Some(day_of_week)) = (
            self.values.get(Field::WeekBasedYear),
            self.values.get(Field::DayOfWeek),
        ) else {
            return Ok(None);
        };
        let year = Field::WeekBasedYear.check_valid_int_value(year)?;
        let week = self.values.get(Field::WeekOfWeekBasedYear).temporal_unwrap()?;
        self.ensure_iso()?;
        let mut date = IsoDate::new(year, 1, 4)?;
        if self.style == ResolverStyle::Lenient {
            let mut day_of_week = day_of_week;
            if day_of_week > 7 {
                date = date.plus_days((day_of_week - 1) / 7 * 7)?;
                day_of_week = (day_of_week - 1) % 7 + 1;
            } else if day_of_week < 1 {
                date = date.plus_days(day_of_week.checked_sub(7).ok_or_else(overflow)? / 7 * 7)?;
                day_of_week = (day_of_week + 6) % 7 + 1;
            }
            let weeks = week.checked_sub(1).and_then(|w| w.checked_mul(7)).ok_or_else(overflow)?;
            date = date.plus_days(weeks)?.with_day_of_week(day_of_week as u8)?;
        } else {
            let day_of_week = Field::DayOfWeek.check_valid_int_value(day_of_week)?;
            if !(1..=52).contains(&week) {
                if self.style == ResolverStyle::Strict {
                    let last = date.plus_days(364)?;
                    let weeks = if last.week_of_week_based_year(WeekDefinition::ISO) == 53 {
                        53
                    } else {
                        52
                    };
                    crate::fields::ValueRange::of(1, weeks)
                        .check_valid_value(week, Field::WeekOfWeekBasedYear)?;
                } else {
                    Field::WeekOfWeekBasedYear.check_valid_value(week)?;
                }
            }
            date = date.plus_days((week - 1) * 7)?.with_day_of_week(day_of_week as u8)?;
        }
        for field in [Field::WeekOfWeekBasedYear, Field::WeekBasedYear, Field::DayOfWeek] {
            let _ = self.values.remove(field);
        }
        Ok(Some(date))
    }

    fn localized_day_of_week(&self, def: WeekDefinition) -> TemporalResult<Option<u8>> {
        let Some(day_of_week) = self.values.get(Field::DayOfWeek) else {
            return Ok(None);
        };
        let iso = Field::DayOfWeek.check_valid_int_value(day_of_week)?;
        Ok(Some(def.localized_day_of_week(iso as u8)))
    }

    fn resolve_week_of_month(&mut self, def: WeekDefinition) -> TemporalResult<Option<IsoDate>> {
        let field = Field::LocalizedWeekOfMonth(def);
        let Some(day_of_week) = self.localized_day_of_week(def)? else {
            return Ok(None);
        };
        let (Some(year), Some(month)) = (
            self.values.get(Field::Year),
            self.values.get(Field::MonthOfYear),
        ) else {
            return Ok(None);
        };
        let year = Field::Year.check_valid_int_value(year)?;
        let week = self.values.get(field).temporal_unwrap()?;
        let chronology = self.effective_chronology();
        let date = if self.style == ResolverStyle::Lenient {
            let months = month.checked_sub(1).ok_or_else(overflow)?;
            let first = chronology
                .date(year.into(), 1, 1, self.style)?
                .plus_months(months)?;
            let weeks = week
                .checked_sub(first.week_of_month(def).into())
                .and_then(|w| w.checked_mul(7))
                .ok_or_else(overflow)?;
            let days = i64::from(day_of_week)
                - i64::from(def.localized_day_of_week(first.day_of_week()));
            first.plus_days(weeks.checked_add(days).ok_or_else(overflow)?)?
        } else {
            let month_valid = Field::MonthOfYear.check_valid_int_value(month)?;
            let first = chronology.date(year.into(), month_valid.into(), 1, self.style)?;
            let week = field.check_valid_int_value(week)?;
            let weeks = i64::from(week) - i64::from(first.week_of_month(def));
            let days = i64::from(day_of_week)
                - i64::from(def.localized_day_of_week(first.day_of_week()));
            let date = first.plus_days(weeks * 7 + days)?;
            if self.style == ResolverStyle::Strict
                && chronology.date_field(date, Field::MonthOfYear) != Some(month)
            {
                return Err(TemporalError::range().with_message(
                    "Strict mode rejected resolved date as it is in a different month",
                ));
            }
            date
        };
        for field in [field, Field::Year, Field::MonthOfYear, Field::DayOfWeek] {
            let _ = self.values.remove(field);
        }
        Ok(Some(date))
    }

    fn resolve_week_based_year(
        &mut self,
        def: WeekDefinition,
        field: Field,
    ) -> TemporalResult<Option<IsoDate>> {
        let year_field = Field::LocalizedWeekBasedYear(def);
        let week_field = Field::LocalizedWeekOfWeekBasedYear(def);
        // The week field drives the resolution, the year is consumed with it.
        if field == year_field && self.values.contains(week_field) {
            return Ok(None);
        }
        let Some(day_of_week) = self.localized_day_of_week(def)? else {
            return Ok(None);
        };
        if self.values.contains(Field::Year) {
            return Ok(None);
        }
        let (Some(year), Some(week)) = (self.values.get(year_field), self.values.get(week_field))
        else {
            return Ok(None);
        };
        let year = year_field.check_valid_int_value(year)?;
        let date = if self.style == ResolverStyle::Lenient {
            let weeks = week.checked_sub(1).and_then(|w| w.checked_mul(7)).ok_or_else(overflow)?;
            IsoDate::of_week_based_year(def, year.into(), 1, day_of_week)?.plus_days(weeks)?
        } else {
            let week = week_field.check_valid_int_value(week)?;
            let date = IsoDate::of_week_based_year(def, year.into(), week.into(), day_of_week)?;
            if self.style == ResolverStyle::Strict && date.week_based_year(def) != i64::from(year) {
                return Err(TemporalError::range().with_message(
                    "Strict mode rejected resolved date as it is in a different week-based-year",
                ));
            }
            date
        };
        for field in [week_field, year_field, Field::DayOfWeek] {
            let _ = self.values.remove(field);
        }
        Ok(Some(date))
    }
}

fn overflow() -> TemporalError {
    TemporalError::range().with_message("long overflow")
}

/// Computes `value * factor + remainder` without wrapping.
fn scale(value: i64, factor: i64, remainder: i64) -> TemporalResult<i64> {
    value
        .checked_mul(factor)
        .and_then(|scaled| scaled.checked_add(remainder))
        .ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::Parsed;
    use crate::{
        error::ErrorKind,
        fields::{Field, WeekDefinition},
        iso::{IsoDate, IsoTime},
        options::ResolverStyle,
        provider::STATIC_ZONES,
        temporal::TemporalAccessor,
        zone::ZoneId,
    };

    fn parsed(pairs: &[(Field, i64)]) -> Parsed {
        let mut parsed = Parsed::new(&STATIC_ZONES);
        for (field, value) in pairs {
            parsed.values.set(*field, *value).unwrap();
        }
        parsed
    }

    fn resolve(pairs: &[(Field, i64)], style: ResolverStyle) -> Result<Parsed, crate::TemporalError> {
        let mut parsed = parsed(pairs);
        parsed.resolve(style, None).map(|()| parsed)
    }

    #[test]
    fn end_of_day() {
        let hms = [
            (Field::HourOfDay, 24),
            (Field::MinuteOfHour, 0),
            (Field::SecondOfMinute, 0),
        ];
        let lenient = resolve(&hms, ResolverStyle::Lenient).unwrap();
        assert_eq!(lenient.time(), Some(IsoTime::MIDNIGHT));
        assert_eq!(lenient.excess_days(), 1);

        let smart = resolve(&hms, ResolverStyle::Smart).unwrap();
        assert_eq!(smart.time(), Some(IsoTime::MIDNIGHT));
        assert_eq!(smart.excess_days(), 1);

        // With a date the day rolls over.
        let mut with_date = hms.to_vec();
        with_date.extend([(Field::Year, 2011), (Field::MonthOfYear, 12), (Field::DayOfMonth, 31)]);
        let smart = resolve(&with_date, ResolverStyle::Smart).unwrap();
        assert_eq!(smart.date(), Some(IsoDate::new(2012, 1, 1).unwrap()));
        assert_eq!(smart.excess_days(), 0);

        let err = resolve(&hms, ResolverStyle::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn lenient_time_overflow() {
        let parsed = resolve(
            &[(Field::HourOfDay, 49), (Field::MinuteOfHour, 70)],
            ResolverStyle::Lenient,
        )
        .unwrap();
        assert_eq!(parsed.time(), Some(IsoTime::new(2, 10, 0, 0).unwrap()));
        assert_eq!(parsed.excess_days(), 2);
    }

    #[test]
    fn lenient_fraction_overflow() {
        let err = resolve(&[(Field::MilliOfSecond, i64::MAX)], ResolverStyle::Lenient).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = resolve(
            &[(Field::MicroOfSecond, i64::MIN), (Field::HourOfDay, 1)],
            ResolverStyle::Lenient,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = resolve(
            &[(Field::NanoOfSecond, 1), (Field::MilliOfSecond, i64::MAX)],
            ResolverStyle::Lenient,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn time_with_missing_minute_is_left_unresolved() {
        // The second cannot be placed without a minute, so nothing is merged
        // and the remaining fields are not validated.
        let parsed = resolve(
            &[(Field::HourOfDay, 10), (Field::SecondOfMinute, 75)],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.time(), None);
        assert_eq!(parsed.values().get(Field::HourOfDay), Some(10));
    }

    #[test]
    fn clock_hours_and_am_pm() {
        let parsed = resolve(
            &[
                (Field::ClockHourOfAmPm, 12),
                (Field::AmPmOfDay, 1),
                (Field::MinuteOfHour, 30),
            ],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.time(), Some(IsoTime::new(12, 30, 0, 0).unwrap()));

        let parsed = resolve(&[(Field::ClockHourOfDay, 24)], ResolverStyle::Smart).unwrap();
        assert_eq!(parsed.time(), Some(IsoTime::MIDNIGHT));

        // The hour of day disagrees with the clock hour.
        let err = resolve(
            &[(Field::ClockHourOfDay, 13), (Field::HourOfDay, 14)],
            ResolverStyle::Smart,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn fractions_merge() {
        let parsed = resolve(
            &[
                (Field::HourOfDay, 10),
                (Field::MinuteOfHour, 15),
                (Field::SecondOfMinute, 30),
                (Field::MilliOfSecond, 123),
            ],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.time(), Some(IsoTime::new(10, 15, 30, 123_000_000).unwrap()));

        let parsed = resolve(&[(Field::SecondOfDay, 3_661)], ResolverStyle::Smart).unwrap();
        assert_eq!(parsed.time(), Some(IsoTime::new(1, 1, 1, 0).unwrap()));

        // Only seconds known, the fraction fields are defaulted.
        let parsed = resolve(&[(Field::SecondOfMinute, 5)], ResolverStyle::Smart).unwrap();
        assert_eq!(parsed.time(), None);
        assert_eq!(parsed.field(Field::NanoOfSecond), Some(0));
        assert_eq!(parsed.field(Field::MilliOfSecond), Some(0));
    }

    #[test]
    fn cross_check_conflict() {
        // 2011-12-03 was a Saturday.
        let date = [(Field::Year, 2011), (Field::MonthOfYear, 12), (Field::DayOfMonth, 3)];
        let mut pairs = date.to_vec();
        pairs.push((Field::DayOfWeek, 6));
        let parsed = resolve(&pairs, ResolverStyle::Smart).unwrap();
        assert!(parsed.values().is_empty());

        let mut pairs = date.to_vec();
        pairs.push((Field::DayOfWeek, 5));
        let err = resolve(&pairs, ResolverStyle::Smart).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Epoch day and year-month-day resolve to different dates.
        let mut pairs = date.to_vec();
        pairs.push((Field::EpochDay, 0));
        let err = resolve(&pairs, ResolverStyle::Smart).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn instant_fields() {
        let mut parsed = parsed(&[(Field::InstantSeconds, 86_400 + 3_600)]);
        parsed.zone = Some(ZoneId::UTC);
        parsed.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(1970, 1, 2).unwrap()));
        assert_eq!(parsed.time(), Some(IsoTime::new(1, 0, 0, 0).unwrap()));
        assert_eq!(parsed.to_instant().unwrap().epoch_seconds(), 90_000);

        // The instant is derived once date, time and offset are known.
        let parsed = resolve(
            &[
                (Field::Year, 1970),
                (Field::MonthOfYear, 1),
                (Field::DayOfMonth, 1),
                (Field::HourOfDay, 1),
                (Field::MinuteOfHour, 0),
                (Field::OffsetSeconds, 3_600),
            ],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.field(Field::InstantSeconds), Some(0));
        let odt = parsed.to_offset_date_time().unwrap();
        assert_eq!(odt.utc_offset().seconds(), 3_600);
    }

    #[test]
    fn custom_fields() {
        let parsed = resolve(
            &[
                (Field::Year, 2012),
                (Field::QuarterOfYear, 2),
                (Field::DayOfQuarter, 3),
            ],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(2012, 4, 3).unwrap()));

        let parsed = resolve(
            &[
                (Field::WeekBasedYear, 2009),
                (Field::WeekOfWeekBasedYear, 53),
                (Field::DayOfWeek, 7),
            ],
            ResolverStyle::Strict,
        )
        .unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(2010, 1, 3).unwrap()));

        let parsed = resolve(&[(Field::ModifiedJulianDay, 40_587)], ResolverStyle::Smart).unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(1970, 1, 1).unwrap()));

        let def = WeekDefinition::SUNDAY_START;
        // Sunday of the second week of December 2011.
        let parsed = resolve(
            &[
                (Field::Year, 2011),
                (Field::MonthOfYear, 12),
                (Field::LocalizedWeekOfMonth(def), 2),
                (Field::LocalizedDayOfWeek(def), 1),
            ],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(2011, 12, 4).unwrap()));

        let parsed = resolve(
            &[
                (Field::LocalizedWeekBasedYear(WeekDefinition::ISO), 2009),
                (Field::LocalizedWeekOfWeekBasedYear(WeekDefinition::ISO), 53),
                (Field::LocalizedDayOfWeek(WeekDefinition::ISO), 7),
            ],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(2010, 1, 3).unwrap()));
    }

    #[test]
    fn resolver_field_filter() {
        let mut parsed = parsed(&[
            (Field::Year, 2011),
            (Field::MonthOfYear, 12),
            (Field::DayOfMonth, 3),
            (Field::DayOfYear, 1),
        ]);
        parsed
            .resolve(
                ResolverStyle::Smart,
                Some(&[Field::Year, Field::DayOfYear]),
            )
            .unwrap();
        assert_eq!(parsed.date(), Some(IsoDate::new(2011, 1, 1).unwrap()));
    }

    #[test]
    fn display() {
        let parsed = resolve(
            &[(Field::Year, 2011), (Field::MonthOfYear, 12), (Field::DayOfMonth, 3)],
            ResolverStyle::Smart,
        )
        .unwrap();
        assert_eq!(parsed.to_string(), "{},ISO resolved to 2011-12-03");
    }
}
