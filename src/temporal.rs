//! The `TemporalAccessor` read capability and the zoned temporal values.

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    chronology::{ChronoDate, Chronology},
    fields::Field,
    iso::{IsoDate, IsoDateTime, IsoTime},
    provider::ZoneProvider,
    zone::{UtcOffset, ZoneId},
    TemporalError, TemporalResult,
};

/// Read access to the fields of a temporal value.
///
/// A read of an unsupported field returns `None`.
pub trait TemporalAccessor {
    /// Get the value of a `Field`.
    fn field(&self, field: Field) -> Option<i64>;

    /// The chronology of the value, `None` when it has no date.
    fn chronology(&self) -> Option<&'static dyn Chronology> {
        None
    }

    /// The zone identifier of the value. Values with only an offset
    /// return `None`.
    fn zone(&self) -> Option<ZoneId> {
        None
    }

    /// The offset of the value.
    fn offset(&self) -> Option<UtcOffset> {
        None
    }

    /// The ISO local date of the value.
    fn local_date(&self) -> Option<IsoDate> {
        None
    }

    /// The local time of the value.
    fn local_time(&self) -> Option<IsoTime> {
        None
    }
}

impl TemporalAccessor for IsoDate {
    fn field(&self, field: Field) -> Option<i64> {
        IsoDate::field(self, field)
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        Some(&crate::chronology::ISO)
    }

    fn local_date(&self) -> Option<IsoDate> {
        Some(*self)
    }
}

impl TemporalAccessor for ChronoDate {
    fn field(&self, field: Field) -> Option<i64> {
        ChronoDate::field(self, field)
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        Some(ChronoDate::chronology(self))
    }

    fn local_date(&self) -> Option<IsoDate> {
        Some(self.iso())
    }
}

impl TemporalAccessor for IsoTime {
    fn field(&self, field: Field) -> Option<i64> {
        IsoTime::field(self, field)
    }

    fn local_time(&self) -> Option<IsoTime> {
        Some(*self)
    }
}

impl TemporalAccessor for IsoDateTime {
    fn field(&self, field: Field) -> Option<i64> {
        IsoDateTime::field(self, field)
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        Some(&crate::chronology::ISO)
    }

    fn local_date(&self) -> Option<IsoDate> {
        Some(self.date)
    }

    fn local_time(&self) -> Option<IsoTime> {
        Some(self.time)
    }
}

impl TemporalAccessor for UtcOffset {
    fn field(&self, field: Field) -> Option<i64> {
        (field == Field::OffsetSeconds).then_some(self.seconds().into())
    }

    fn offset(&self) -> Option<UtcOffset> {
        Some(*self)
    }
}

// ==== Instant ====

const MIN_INSTANT_SECONDS: i64 = -31_557_014_167_219_200;
const MAX_INSTANT_SECONDS: i64 = 31_556_889_864_403_199;

/// A point on the time line, in seconds and nanoseconds from
/// 1970-01-01T00:00Z.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    seconds: i64,
    nanos: u32,
}

impl Instant {
    /// The epoch instant, 1970-01-01T00:00Z.
    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Creates a new `Instant`, balancing the nanoseconds into the seconds.
    pub fn from_epoch_seconds(seconds: i64, nanos: i64) -> TemporalResult<Self> {
        let seconds = seconds
            .checked_add(nanos.div_euclid(crate::NANOS_PER_SECOND))
            .filter(|s| (MIN_INSTANT_SECONDS..=MAX_INSTANT_SECONDS).contains(s))
            .ok_or(TemporalError::range().with_message("Instant exceeds minimum or maximum instant"))?;
        Ok(Self {
            seconds,
            nanos: nanos.rem_euclid(crate::NANOS_PER_SECOND) as u32,
        })
    }

    /// The seconds from the epoch.
    pub const fn epoch_seconds(&self) -> i64 {
        self.seconds
    }

    /// The nanosecond of the second.
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }
}

impl TemporalAccessor for Instant {
    fn field(&self, field: Field) -> Option<i64> {
        let value = match field {
            Field::InstantSeconds => self.seconds,
            Field::NanoOfSecond => self.nanos.into(),
            Field::MicroOfSecond => (self.nanos / 1_000).into(),
            Field::MilliOfSecond => (self.nanos / 1_000_000).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Writeable for Instant {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match IsoDateTime::from_epoch_seconds(self.seconds, self.nanos, 0) {
            Ok(datetime) => datetime.write_to(sink)?,
            Err(_) => return Err(core::fmt::Error),
        }
        sink.write_char('Z')
    }
}

impl_display_with_writeable!(Instant);

// ==== OffsetDateTime ====

/// A local date time with a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    datetime: IsoDateTime,
    offset: UtcOffset,
}

impl OffsetDateTime {
    /// Creates a new `OffsetDateTime`.
    pub const fn new(datetime: IsoDateTime, offset: UtcOffset) -> Self {
        Self { datetime, offset }
    }

    /// The local date time.
    pub const fn datetime(&self) -> IsoDateTime {
        self.datetime
    }

    /// The offset from UTC.
    pub const fn utc_offset(&self) -> UtcOffset {
        self.offset
    }

    /// The instant of this date time.
    pub fn to_instant(&self) -> TemporalResult<Instant> {
        Instant::from_epoch_seconds(
            self.datetime.to_epoch_seconds(self.offset.seconds()),
            self.datetime.time.nanosecond.into(),
        )
    }
}

impl TemporalAccessor for OffsetDateTime {
    fn field(&self, field: Field) -> Option<i64> {
        match field {
            Field::OffsetSeconds => Some(self.offset.seconds().into()),
            Field::InstantSeconds => Some(self.datetime.to_epoch_seconds(self.offset.seconds())),
            _ => self.datetime.field(field),
        }
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        Some(&crate::chronology::ISO)
    }

    fn offset(&self) -> Option<UtcOffset> {
        Some(self.offset)
    }

    fn local_date(&self) -> Option<IsoDate> {
        Some(self.datetime.date)
    }

    fn local_time(&self) -> Option<IsoTime> {
        Some(self.datetime.time)
    }
}

impl Writeable for OffsetDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.datetime.write_to(sink)?;
        self.offset.write_to(sink)
    }
}

impl_display_with_writeable!(OffsetDateTime);

// ==== ZonedDateTime ====

/// A local date time in a zone, with the offset in effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    datetime: IsoDateTime,
    offset: UtcOffset,
    zone: ZoneId,
}

impl ZonedDateTime {
    /// Creates a `ZonedDateTime` from a local date time, keeping the
    /// preferred offset in an overlap.
    pub fn of_local(
        datetime: IsoDateTime,
        zone: ZoneId,
        preferred: Option<UtcOffset>,
        provider: &dyn ZoneProvider,
    ) -> TemporalResult<Self> {
        let (datetime, offset) = match &zone {
            ZoneId::Region(id) => provider.offset_for_local(id, datetime, preferred)?,
            _ => (datetime, zone.fixed_offset().ok_or(TemporalError::assert())?),
        };
        Ok(Self {
            datetime,
            offset,
            zone,
        })
    }

    /// Creates a `ZonedDateTime` from an instant.
    pub fn of_instant(
        instant: Instant,
        zone: ZoneId,
        provider: &dyn ZoneProvider,
    ) -> TemporalResult<Self> {
        let offset = zone.offset_at(instant.epoch_seconds(), provider)?;
        let datetime =
            IsoDateTime::from_epoch_seconds(instant.epoch_seconds(), instant.nanos(), offset.seconds())?;
        Ok(Self {
            datetime,
            offset,
            zone,
        })
    }

    /// The local date time.
    pub const fn datetime(&self) -> IsoDateTime {
        self.datetime
    }

    /// The offset in effect.
    pub const fn utc_offset(&self) -> UtcOffset {
        self.offset
    }

    /// The zone.
    pub fn zone_id(&self) -> &ZoneId {
        &self.zone
    }

    /// The instant of this date time.
    pub fn to_instant(&self) -> TemporalResult<Instant> {
        OffsetDateTime::new(self.datetime, self.offset).to_instant()
    }
}

impl TemporalAccessor for ZonedDateTime {
    fn field(&self, field: Field) -> Option<i64> {
        OffsetDateTime::new(self.datetime, self.offset).field(field)
    }

    fn chronology(&self) -> Option<&'static dyn Chronology> {
        Some(&crate::chronology::ISO)
    }

    fn zone(&self) -> Option<ZoneId> {
        Some(self.zone.clone())
    }

    fn offset(&self) -> Option<UtcOffset> {
        Some(self.offset)
    }

    fn local_date(&self) -> Option<IsoDate> {
        Some(self.datetime.date)
    }

    fn local_time(&self) -> Option<IsoTime> {
        Some(self.datetime.time)
    }
}

impl Writeable for ZonedDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.datetime.write_to(sink)?;
        self.offset.write_to(sink)?;
        if !self.zone.is_offset() {
            sink.write_char('[')?;
            self.zone.write_to(sink)?;
            sink.write_char(']')?;
        }
        Ok(())
    }
}

impl_display_with_writeable!(ZonedDateTime);
