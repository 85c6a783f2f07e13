//! The ISO-8601 instant printer-parser, `2011-12-03T10:15:30Z`.

use core::fmt;

use writeable::Writeable;

use crate::{
    fields::Field,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::SignStyle,
    TemporalResult, SECONDS_PER_DAY,
};

use super::{
    context::{ParseContext, PrintContext},
    element::{Composite, Element},
    numeric::NumberElement,
    offset::OffsetIdElement,
};

/// Prints an instant in UTC and parses one at any offset.
///
/// `fractional_digits` is -2 to print the fraction in groups of three
/// digits, -1 to print as many digits as needed, and otherwise the exact
/// number of digits to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InstantElement {
    fractional_digits: i8,
}

impl InstantElement {
    pub(crate) const fn new(fractional_digits: i8) -> Self {
        Self { fractional_digits }
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(seconds) = ctx.value(Field::InstantSeconds)? else {
            return Ok(false);
        };
        let nanos = ctx.temporal().field(Field::NanoOfSecond).unwrap_or(0);
        let nanos = Field::NanoOfSecond.check_valid_int_value(nanos)?;
        let local = IsoDateTime::from_epoch_seconds(seconds, 0, 0)?;
        buf.push_str(&local.date.write_to_string());
        buf.push('T');
        for (i, value) in [local.time.hour, local.time.minute, local.time.second]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                buf.push(':');
            }
            buf.push(char::from(b'0' + value / 10));
            buf.push(char::from(b'0' + value % 10));
        }

        let digits = self.fractional_digits;
        if digits > 0 || (digits < 0 && nanos > 0) {
            buf.push('.');
            let mut remaining = nanos;
            let mut divisor = 100_000_000;
            let mut i: i8 = 0;
            while (digits == -1 && remaining > 0)
                || (digits == -2 && (remaining > 0 || i % 3 != 0))
                || i < digits
            {
                let digit = remaining / divisor;
                buf.push(char::from(b'0' + digit as u8));
                remaining -= digit * divisor;
                divisor /= 10;
                i += 1;
            }
        }
        buf.push('Z');
        Ok(true)
    }

    /// The elements of an offset date time with the fraction width of
    /// this instant.
    fn date_time(&self) -> Composite {
        let (min, max) = if self.fractional_digits < 0 {
            (0, 9)
        } else {
            (self.fractional_digits as usize, self.fractional_digits as usize)
        };
        let two = |field| Element::Number(NumberElement::value(field, 2, 2, SignStyle::NotNegative));
        Composite::new(
            vec![
                Element::Number(NumberElement::value(Field::Year, 4, 10, SignStyle::ExceedsPad)),
                Element::Char('-'),
                two(Field::MonthOfYear),
                Element::Char('-'),
                two(Field::DayOfMonth),
                Element::Char('T'),
                two(Field::HourOfDay),
                Element::Char(':'),
                two(Field::MinuteOfHour),
                Element::Char(':'),
                two(Field::SecondOfMinute),
                Element::Number(NumberElement::fraction(Field::NanoOfSecond, min, max, true)),
                Element::Offset(OffsetIdElement::instant_id_z()),
            ],
            false,
        )
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        let mut sub = ctx.copy();
        let end = self.date_time().parse(&mut sub, text, pos)?;
        let field = |field| sub.parsed_field(field).ok_or(pos);
        let year = i32::try_from(field(Field::Year)?).map_err(|_| pos)?;
        let month = u8::try_from(field(Field::MonthOfYear)?).map_err(|_| pos)?;
        let day = u8::try_from(field(Field::DayOfMonth)?).map_err(|_| pos)?;
        let mut hour = field(Field::HourOfDay)?;
        let minute = field(Field::MinuteOfHour)?;
        let mut second = field(Field::SecondOfMinute)?;
        let nanos = sub.parsed_field(Field::NanoOfSecond).unwrap_or(0);
        let offset = field(Field::OffsetSeconds)?;

        let mut days = 0;
        if hour == 24 && minute == 0 && second == 0 && nanos == 0 {
            hour = 0;
            days = 1;
        } else if hour == 23 && minute == 59 && second == 60 {
            ctx.set_leap_second();
            second = 59;
        }
        let date = IsoDate::new(year, month, day).map_err(|_| pos)?;
        let time = IsoTime::new(hour, minute, second, 0).map_err(|_| pos)?;
        let seconds = IsoDateTime::new(date, time).to_epoch_seconds(offset as i32) + days * SECONDS_PER_DAY;

        let end = ctx.set_parsed_field(Field::InstantSeconds, seconds, pos, end)?;
        ctx.set_parsed_field(Field::NanoOfSecond, nanos, pos, end)
    }
}

impl fmt::Display for InstantElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Instant()")
    }
}
