//! Offset printer-parsers: `+HH:MM` style offset ids and localized
//! `GMT+h:mm` offsets.

use core::fmt;

use crate::{
    fields::Field,
    options::TextStyle,
    TemporalError, TemporalResult,
};

use super::context::{ParseContext, PrintContext};

/// The accepted offset patterns, indexed by type.
const PATTERNS: [&str; 9] = [
    "+HH", "+HHmm", "+HH:mm", "+HHMM", "+HH:MM", "+HHMMss", "+HH:MM:ss", "+HHMMSS", "+HH:MM:SS",
];

/// Splits a signed offset into absolute hours, minutes and seconds.
fn split(total: i64) -> (i64, i64, i64) {
    let hours = ((total / 3600) % 100).abs();
    let minutes = ((total / 60) % 60).abs();
    let seconds = (total % 60).abs();
    (hours, minutes, seconds)
}

fn push_two_digits(buf: &mut String, value: i64) {
    buf.push(char::from(b'0' + (value / 10) as u8));
    buf.push(char::from(b'0' + (value % 10) as u8));
}

fn digit(text: &[char], pos: usize) -> Option<i64> {
    text.get(pos)
        .and_then(|ch| ch.to_digit(10))
        .map(i64::from)
}

// ==== Offset id ====

/// Prints and parses an offset such as `+01:30`, with a fixed text for a
/// zero offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OffsetIdElement {
    kind: usize,
    no_offset_text: String,
}

impl OffsetIdElement {
    /// Creates an element from one of the offset patterns.
    pub(crate) fn new(pattern: &str, no_offset_text: &str) -> TemporalResult<Self> {
        let kind = PATTERNS
            .iter()
            .position(|p| *p == pattern)
            .ok_or_else(|| {
                TemporalError::configuration().with_message(format!("Invalid zone offset pattern: {pattern}"))
            })?;
        Ok(Self {
            kind,
            no_offset_text: no_offset_text.to_owned(),
        })
    }

    /// `+HH:MM:ss` printing `Z` for zero.
    pub(crate) fn instant_id_z() -> Self {
        Self {
            kind: 6,
            no_offset_text: "Z".to_owned(),
        }
    }

    /// `+HH:MM:ss` printing `0` for zero.
    pub(crate) fn instant_id_zero() -> Self {
        Self {
            kind: 6,
            no_offset_text: "0".to_owned(),
        }
    }

    /// `+HHMM` printing `no_offset_text` for zero.
    pub(crate) fn hours_minutes(no_offset_text: &str) -> Self {
        Self {
            kind: 3,
            no_offset_text: no_offset_text.to_owned(),
        }
    }

    /// `+HHMMss` printing `no_offset_text` for zero.
    pub(crate) fn hours_minutes_seconds(no_offset_text: &str) -> Self {
        Self {
            kind: 5,
            no_offset_text: no_offset_text.to_owned(),
        }
    }

    /// The pattern at index `count` of the `X` and `x` letter counts.
    pub(crate) fn pattern_for_count(count: usize) -> &'static str {
        PATTERNS[count + usize::from(count != 1)]
    }

    fn colons(&self) -> bool {
        self.kind % 2 == 0
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(total) = ctx.value(Field::OffsetSeconds)? else {
            return Ok(false);
        };
        if total == 0 {
            buf.push_str(&self.no_offset_text);
            return Ok(true);
        }
        let (hours, minutes, seconds) = split(total);
        let start = buf.len();
        let mut output = hours;
        buf.push(if total < 0 { '-' } else { '+' });
        push_two_digits(buf, hours);
        if self.kind >= 3 || (self.kind >= 1 && minutes > 0) {
            if self.colons() {
                buf.push(':');
            }
            push_two_digits(buf, minutes);
            output += minutes;
            if self.kind >= 7 || (self.kind >= 5 && seconds > 0) {
                if self.colons() {
                    buf.push(':');
                }
                push_two_digits(buf, seconds);
                output += seconds;
            }
        }
        if output == 0 {
            buf.truncate(start);
            buf.push_str(&self.no_offset_text);
        }
        Ok(true)
    }

    /// Parses the component at `index`, 1 for hours up to 3 for seconds.
    ///
    /// Returns `false` when a required component is missing. An optional
    /// missing component leaves `cursor` unchanged.
    fn parse_component(
        &self,
        text: &[char],
        cursor: &mut usize,
        values: &mut [i64; 3],
        index: usize,
        required: bool,
    ) -> bool {
        if (self.kind + 3) / 2 < index {
            return true;
        }
        let mut pos = *cursor;
        if self.colons() && index > 1 {
            if text.get(pos) != Some(&':') {
                return !required;
            }
            pos += 1;
        }
        let (Some(tens), Some(units)) = (digit(text, pos), digit(text, pos + 1)) else {
            return !required;
        };
        let value = tens * 10 + units;
        if value > 59 {
            return !required;
        }
        values[index - 1] = value;
        *cursor = pos + 2;
        true
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        if self.no_offset_text.is_empty() {
            if pos == text.len() {
                return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, pos);
            }
        } else {
            if pos == text.len() {
                return Err(pos);
            }
            if let Some(end) = ctx.matches_at(text, pos, &self.no_offset_text) {
                return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, end);
            }
        }

        let sign = text[pos];
        if sign == '+' || sign == '-' {
            let negative = sign == '-';
            let mut cursor = pos + 1;
            let mut values = [0_i64; 3];
            if self.parse_component(text, &mut cursor, &mut values, 1, true)
                && self.parse_component(text, &mut cursor, &mut values, 2, self.kind >= 3)
                && self.parse_component(text, &mut cursor, &mut values, 3, false)
            {
                let total = values[0] * 3600 + values[1] * 60 + values[2];
                let total = if negative { -total } else { total };
                return ctx.set_parsed_field(Field::OffsetSeconds, total, pos, cursor);
            }
        }
        if self.no_offset_text.is_empty() {
            return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, pos);
        }
        Err(pos)
    }
}

impl fmt::Display for OffsetIdElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Offset({},'{}')",
            PATTERNS[self.kind],
            self.no_offset_text.replace('\'', "''")
        )
    }
}

// ==== Localized offset ====

/// Prints and parses an offset as `GMT` followed by the signed offset,
/// `GMT+08:00` in the full style or `GMT+8` in the short style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalizedOffsetElement {
    style: TextStyle,
}

const GMT: &str = "GMT";

impl LocalizedOffsetElement {
    pub(crate) fn new(style: TextStyle) -> TemporalResult<Self> {
        if !matches!(style, TextStyle::Full | TextStyle::Short) {
            return Err(TemporalError::configuration().with_message("Style must be either full or short"));
        }
        Ok(Self { style })
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(total) = ctx.value(Field::OffsetSeconds)? else {
            return Ok(false);
        };
        buf.push_str(GMT);
        if total == 0 {
            return Ok(true);
        }
        let (hours, minutes, seconds) = split(total);
        buf.push(if total < 0 { '-' } else { '+' });
        if self.style == TextStyle::Full {
            push_two_digits(buf, hours);
            buf.push(':');
            push_two_digits(buf, minutes);
        } else {
            if hours >= 10 {
                buf.push(char::from(b'0' + (hours / 10) as u8));
            }
            buf.push(char::from(b'0' + (hours % 10) as u8));
            if minutes == 0 && seconds == 0 {
                return Ok(true);
            }
            buf.push(':');
            push_two_digits(buf, minutes);
        }
        if seconds != 0 {
            buf.push(':');
            push_two_digits(buf, seconds);
        }
        Ok(true)
    }

    /// Parses `:dd` at `pos`.
    fn colon_pair(text: &[char], pos: usize) -> Option<i64> {
        if text.get(pos) != Some(&':') {
            return None;
        }
        Some(digit(text, pos + 1)? * 10 + digit(text, pos + 2)?)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        let mut cur = ctx.matches_at(text, pos, GMT).ok_or(pos)?;
        let negative = match text.get(cur) {
            Some('+') => false,
            Some('-') => true,
            _ => return ctx.set_parsed_field(Field::OffsetSeconds, 0, pos, cur),
        };
        cur += 1;

        let (hours, mut minutes, mut seconds);
        if self.style == TextStyle::Full {
            let (Some(h1), Some(h2)) = (digit(text, cur), digit(text, cur + 1)) else {
                return Err(pos);
            };
            hours = h1 * 10 + h2;
            minutes = Self::colon_pair(text, cur + 2).ok_or(pos)?;
            cur += 5;
            seconds = 0;
            if let Some(s) = Self::colon_pair(text, cur) {
                seconds = s;
                cur += 3;
            }
        } else {
            let mut h = digit(text, cur).ok_or(pos)?;
            cur += 1;
            if let Some(h2) = digit(text, cur) {
                h = h * 10 + h2;
                cur += 1;
            }
            hours = h;
            minutes = 0;
            seconds = 0;
            if let Some(m) = Self::colon_pair(text, cur) {
                minutes = m;
                cur += 3;
                if let Some(s) = Self::colon_pair(text, cur) {
                    seconds = s;
                    cur += 3;
                }
            }
        }
        let total = hours * 3600 + minutes * 60 + seconds;
        let total = if negative { -total } else { total };
        ctx.set_parsed_field(Field::OffsetSeconds, total, pos, cur)
    }
}

impl fmt::Display for LocalizedOffsetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalizedOffset({})", self.style)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        fields::Field,
        options::TextStyle,
        zone::UtcOffset,
        DateTimeFormatter, DateTimeFormatterBuilder, ParsePosition,
    };

    fn offset(seconds: i32) -> UtcOffset {
        UtcOffset::from_seconds(seconds.into()).unwrap()
    }

    fn parse_offset(formatter: &DateTimeFormatter, text: &str) -> Option<(i64, usize)> {
        let mut position = ParsePosition::new(0);
        let parsed = formatter.parse_unresolved(text, &mut position)?;
        Some((parsed.values().get(Field::OffsetSeconds)?, position.index()))
    }

    #[test]
    fn offset_patterns() {
        let cases = [
            ("+HH", 5400, "+01"),
            ("+HHmm", 5400, "+0130"),
            ("+HHmm", 3600, "+01"),
            ("+HH:mm", 5400, "+01:30"),
            ("+HHMM", 3600, "+0100"),
            ("+HH:MM", -3600, "-01:00"),
            ("+HHMMss", 3661, "+010101"),
            ("+HH:MM:ss", 3600, "+01:00"),
            ("+HH:MM:ss", 3661, "+01:01:01"),
            ("+HH:MM:SS", 3600, "+01:00:00"),
            ("+HH:MM", 0, "Z"),
            ("+HH", 1800, "Z"),
        ];
        for (pattern, seconds, expected) in cases {
            let mut builder = DateTimeFormatterBuilder::new();
            builder.append_offset(pattern, "Z").unwrap();
            let formatter = builder.to_formatter();
            assert_eq!(formatter.format(&offset(seconds)).unwrap(), expected, "{pattern}");
        }
    }

    #[test]
    fn offset_parsing() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_offset_id();
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "Offset(+HH:MM:ss,'Z')");
        assert_eq!(parse_offset(&formatter, "Z"), Some((0, 1)));
        assert_eq!(parse_offset(&formatter, "+01:30"), Some((5400, 6)));
        assert_eq!(parse_offset(&formatter, "-01:30:15"), Some((-5415, 9)));
        // Minutes are required by this pattern.
        assert_eq!(parse_offset(&formatter, "+01"), None);
        assert_eq!(parse_offset(&formatter, "+01:60"), None);

        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_offset("+HHmm", "").unwrap();
        let formatter = builder.to_formatter();
        assert_eq!(parse_offset(&formatter, "+05"), Some((18000, 3)));
        assert_eq!(parse_offset(&formatter, "+0530"), Some((19800, 5)));
        // An empty zero text matches nothing.
        assert_eq!(parse_offset(&formatter, "x"), Some((0, 0)));
        assert_eq!(parse_offset(&formatter, ""), Some((0, 0)));
    }

    #[test]
    fn invalid_offset_pattern() {
        assert!(DateTimeFormatterBuilder::new().append_offset("+H", "Z").is_err());
    }

    #[test]
    fn localized_offsets() {
        let mut full = DateTimeFormatterBuilder::new();
        full.append_localized_offset(TextStyle::Full).unwrap();
        let full = full.to_formatter();
        let mut short = DateTimeFormatterBuilder::new();
        short.append_localized_offset(TextStyle::Short).unwrap();
        let short = short.to_formatter();
        assert_eq!(short.to_string(), "LocalizedOffset(SHORT)");

        for (seconds, full_text, short_text) in [
            (0, "GMT", "GMT"),
            (28_800, "GMT+08:00", "GMT+8"),
            (-34_200, "GMT-09:30", "GMT-9:30"),
            (36_000, "GMT+10:00", "GMT+10"),
            (3_661, "GMT+01:01:01", "GMT+1:01:01"),
        ] {
            assert_eq!(full.format(&offset(seconds)).unwrap(), full_text);
            assert_eq!(short.format(&offset(seconds)).unwrap(), short_text);
            let len = full_text.len();
            assert_eq!(parse_offset(&full, full_text), Some((seconds.into(), len)));
            let len = short_text.len();
            assert_eq!(parse_offset(&short, short_text), Some((seconds.into(), len)));
        }

        assert_eq!(parse_offset(&full, "GMT+8"), None);
        assert!(DateTimeFormatterBuilder::new()
            .append_localized_offset(TextStyle::Narrow)
            .is_err());
    }
}
