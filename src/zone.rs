//! Offsets from UTC and zone identifiers.

use core::{fmt, iter::Peekable, str::Chars};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    fields::Field, iso::IsoDateTime, provider::ZoneProvider, TemporalError, TemporalResult,
};

/// The maximum absolute offset in seconds, 18 hours.
pub const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

// ==== UtcOffset ====

/// A fixed offset from UTC, in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The offset of UTC itself.
    pub const UTC: Self = Self(0);

    /// Creates an offset from its total seconds.
    pub fn from_seconds(seconds: i64) -> TemporalResult<Self> {
        let seconds = Field::OffsetSeconds.check_valid_value(seconds)?;
        Ok(Self(seconds as i32))
    }

    /// Creates an offset from hours, minutes and seconds which must all
    /// carry the same sign.
    pub fn from_hms(hours: i32, minutes: i32, seconds: i32) -> TemporalResult<Self> {
        if !(-18..=18).contains(&hours)
            || !(-59..=59).contains(&minutes)
            || !(-59..=59).contains(&seconds)
        {
            return Err(TemporalError::range().with_message("Offset component out of range."));
        }
        let positive = hours > 0 || minutes > 0 || seconds > 0;
        let negative = hours < 0 || minutes < 0 || seconds < 0;
        if positive && negative {
            return Err(
                TemporalError::range().with_message("Offset components must have the same sign.")
            );
        }
        Self::from_seconds(i64::from(hours * 3600 + minutes * 60 + seconds))
    }

    pub(crate) const fn new_unchecked(seconds: i32) -> Self {
        Self(seconds)
    }

    /// The total offset in seconds.
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.0
    }

    /// Parses an offset identifier of the form `Z`, `+h`, `+hh`, `+hh:mm`,
    /// `+hhmm`, `+hh:mm:ss` or `+hhmmss`.
    pub fn parse(source: &str) -> TemporalResult<Self> {
        if source == "Z" {
            return Ok(Self::UTC);
        }
        let mut cursor = source.chars().peekable();
        let seconds = parse_offset(&mut cursor)?;
        if cursor.peek().is_some() {
            return Err(invalid_offset(source));
        }
        Self::from_seconds(seconds.into())
    }
}

impl Writeable for UtcOffset {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        if self.0 == 0 {
            return sink.write_char('Z');
        }
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        sink.write_char(sign)?;
        write_pair(abs / 3600, sink)?;
        sink.write_char(':')?;
        write_pair(abs / 60 % 60, sink)?;
        if abs % 60 != 0 {
            sink.write_char(':')?;
            write_pair(abs % 60, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self.0 {
            0 => LengthHint::exact(1),
            s if s % 60 == 0 => LengthHint::exact(6),
            _ => LengthHint::exact(9),
        }
    }
}

impl_display_with_writeable!(UtcOffset);

fn write_pair<W: fmt::Write + ?Sized>(value: u32, sink: &mut W) -> fmt::Result {
    if value < 10 {
        sink.write_char('0')?;
    }
    value.write_to(sink)
}

// ==== ZoneId ====

/// The prefix of a prefixed offset zone such as `UTC+01:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZonePrefix {
    Ut,
    Utc,
    Gmt,
}

impl ZonePrefix {
    /// The prefix text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ut => "UT",
            Self::Utc => "UTC",
            Self::Gmt => "GMT",
        }
    }
}

/// A zone identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneId {
    /// A fixed offset zone, `Z` or `+01:00`.
    Offset(UtcOffset),
    /// A fixed offset zone written with a prefix, `GMT` or `UTC+01:00`.
    Prefixed {
        prefix: ZonePrefix,
        offset: UtcOffset,
    },
    /// A region zone with offsets defined by a zone provider.
    Region(String),
}

impl ZoneId {
    /// The UTC zone.
    pub const UTC: Self = Self::Offset(UtcOffset::UTC);

    /// Parses a zone identifier, normalizing region identifiers with the
    /// provider.
    pub fn of(source: &str, provider: &dyn ZoneProvider) -> TemporalResult<Self> {
        let mut cursor = source.chars().peekable();
        if source == "Z" || cursor.peek().is_some_and(is_ascii_sign) {
            return UtcOffset::parse(source).map(Self::Offset);
        }
        for prefix in [ZonePrefix::Utc, ZonePrefix::Gmt, ZonePrefix::Ut] {
            if let Some(rest) = source.strip_prefix(prefix.as_str()) {
                if rest.is_empty() {
                    return Ok(Self::Prefixed {
                        prefix,
                        offset: UtcOffset::UTC,
                    });
                }
                if rest.starts_with(['+', '-']) {
                    let offset = UtcOffset::parse(rest)?;
                    return Ok(Self::Prefixed { prefix, offset });
                }
            }
        }
        if !parse_iana_component(&mut cursor) {
            return Err(TemporalError::range()
                .with_message(format!("Invalid zone identifier format: {source}")));
        }
        provider
            .normalize(source)
            .map(|id| Self::Region(id.into()))
            .ok_or_else(|| {
                TemporalError::range().with_message(format!("Unknown time-zone ID: {source}"))
            })
    }

    /// Returns the fixed offset of this zone, `None` for region zones.
    pub fn fixed_offset(&self) -> Option<UtcOffset> {
        match self {
            Self::Offset(offset) | Self::Prefixed { offset, .. } => Some(*offset),
            Self::Region(_) => None,
        }
    }

    /// Returns an equivalent offset zone when this zone has a fixed offset.
    pub fn normalized(&self) -> Self {
        match self.fixed_offset() {
            Some(offset) => Self::Offset(offset),
            None => self.clone(),
        }
    }

    /// Whether this zone is a plain offset zone.
    pub fn is_offset(&self) -> bool {
        matches!(self, Self::Offset(_))
    }

    /// The offset of this zone at the epoch second.
    pub fn offset_at(
        &self,
        epoch_seconds: i64,
        provider: &dyn ZoneProvider,
    ) -> TemporalResult<UtcOffset> {
        match self {
            Self::Region(id) => provider.offset_at(id, epoch_seconds),
            _ => self.fixed_offset().ok_or(TemporalError::assert()),
        }
    }

    /// The valid offsets for a local date time, empty in a gap and two in
    /// an overlap, earlier offset first.
    pub fn valid_offsets(
        &self,
        local: IsoDateTime,
        provider: &dyn ZoneProvider,
    ) -> TemporalResult<Vec<UtcOffset>> {
        match self {
            Self::Region(id) => provider.valid_offsets(id, local),
            _ => Ok(self.fixed_offset().into_iter().collect()),
        }
    }

    /// Whether daylight time is in effect at the epoch second.
    pub fn is_daylight(&self, epoch_seconds: i64, provider: &dyn ZoneProvider) -> bool {
        match self {
            Self::Region(id) => provider.is_daylight(id, epoch_seconds),
            _ => false,
        }
    }
}

impl Writeable for ZoneId {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        match self {
            Self::Offset(offset) => offset.write_to(sink),
            Self::Prefixed { prefix, offset } => {
                sink.write_str(prefix.as_str())?;
                if offset.seconds() != 0 {
                    offset.write_to(sink)?;
                }
                Ok(())
            }
            Self::Region(id) => sink.write_str(id),
        }
    }
}

impl_display_with_writeable!(ZoneId);

impl From<UtcOffset> for ZoneId {
    fn from(offset: UtcOffset) -> Self {
        Self::Offset(offset)
    }
}

// ==== Identifier cursor ====

fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let sign = match chars.next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(non_ascii_sign()),
    };
    let first = parse_digit(chars)?;
    // `+h` form
    if !chars.peek().is_some_and(char::is_ascii_digit) {
        if chars.peek().is_some() {
            return Err(non_ascii_digit());
        }
        return Ok(first * 3600 * sign);
    }
    let hours = first * 10 + parse_digit(chars)?;

    let sep = chars.peek().is_some_and(|ch| *ch == ':');
    if sep {
        let _ = chars.next();
    }
    let minutes = match chars.peek() {
        None if !sep => 0,
        _ => parse_digit_pair(chars)?,
    };
    let seconds = match chars.peek() {
        None => 0,
        Some(':') if sep => {
            let _ = chars.next();
            parse_digit_pair(chars)?
        }
        Some(_) if !sep => parse_digit_pair(chars)?,
        Some(_) => return Err(non_ascii_digit()),
    };
    if hours > 18 || minutes > 59 || seconds > 59 {
        return Err(TemporalError::range().with_message("Offset component out of range."));
    }
    Ok((hours * 3600 + minutes * 60 + seconds) * sign)
}

fn parse_digit(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let ch = chars.next().ok_or_else(abrupt_end)?;
    ch.to_digit(10).map(|d| d as i32).ok_or_else(non_ascii_digit)
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> TemporalResult<i32> {
    let tens = parse_digit(chars)?;
    let ones = parse_digit(chars)?;
    Ok(tens * 10 + ones)
}

fn parse_iana_component(chars: &mut Peekable<Chars<'_>>) -> bool {
    // Confirm leading Tz char
    if !chars.peek().is_some_and(is_tz_leading_char) {
        return false;
    }
    chars.next();

    while chars.peek().is_some_and(is_tz_char) {
        chars.next();
    }

    // Check for sub component and parse
    if chars.peek().is_some_and(is_slash) {
        chars.next();
        return parse_iana_component(chars);
    }

    chars.peek().is_none()
}

fn invalid_offset(source: &str) -> TemporalError {
    TemporalError::range().with_message(format!("Invalid ID for offset: {source}"))
}

fn abrupt_end() -> TemporalError {
    TemporalError::range().with_message("Abrupt end while parsing offset string")
}

fn non_ascii_digit() -> TemporalError {
    TemporalError::range().with_message("Non ascii digit found while parsing offset string")
}

fn non_ascii_sign() -> TemporalError {
    TemporalError::range().with_message("Offset string must begin with a sign")
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}

fn is_slash(ch: &char) -> bool {
    *ch == '/'
}

fn is_tz_leading_char(ch: &char) -> bool {
    ch.is_ascii_alphabetic() || *ch == '.' || *ch == '_'
}

fn is_tz_char(ch: &char) -> bool {
    is_tz_leading_char(ch) || ch.is_ascii_digit() || *ch == '+' || *ch == '-'
}
