//! The predefined ISO-8601 and RFC 1123 formatters.
//!
//! Each formatter is compiled once, on first use, and shared for the
//! lifetime of the process.

use std::sync::LazyLock;

use crate::{
    chronology,
    fields::Field,
    options::{ResolverStyle, SignStyle},
};

use super::{
    builder::DateTimeFormatterBuilder, numeric::NumberElement, offset::OffsetIdElement,
    DateTimeFormatter,
};

fn value(field: Field, min_width: usize, max_width: usize, sign_style: SignStyle) -> NumberElement {
    NumberElement::value(field, min_width, max_width, sign_style)
}

fn two_digits(field: Field) -> NumberElement {
    value(field, 2, 2, SignStyle::NotNegative)
}

fn iso_year(field: Field) -> NumberElement {
    value(field, 4, 10, SignStyle::ExceedsPad)
}

fn strict_iso(builder: &DateTimeFormatterBuilder) -> DateTimeFormatter {
    builder
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Some(&chronology::ISO))
}

fn optional(build: impl FnOnce(&mut DateTimeFormatterBuilder)) -> DateTimeFormatter {
    let mut builder = DateTimeFormatterBuilder::new();
    build(&mut builder);
    builder.to_formatter()
}

static ISO_LOCAL_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_number(iso_year(Field::Year))
        .append_literal('-')
        .append_number(two_digits(Field::MonthOfYear))
        .append_literal('-')
        .append_number(two_digits(Field::DayOfMonth));
    strict_iso(&builder)
});

static ISO_OFFSET_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(&ISO_LOCAL_DATE)
        .append_offset_id();
    strict_iso(&builder)
});

static ISO_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(&ISO_LOCAL_DATE)
        .optional_start()
        .append_offset_id();
    strict_iso(&builder)
});

static ISO_LOCAL_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_number(two_digits(Field::HourOfDay))
        .append_literal(':')
        .append_number(two_digits(Field::MinuteOfHour))
        .optional_start()
        .append_literal(':')
        .append_number(two_digits(Field::SecondOfMinute))
        .optional_start()
        .append_number(NumberElement::fraction(Field::NanoOfSecond, 0, 9, true));
    strict_iso(&builder)
});

static ISO_OFFSET_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(&ISO_LOCAL_TIME)
        .append_offset_id();
    strict_iso(&builder)
});

static ISO_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(&ISO_LOCAL_TIME)
        .optional_start()
        .append_offset_id();
    strict_iso(&builder)
});

static ISO_LOCAL_DATE_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(&ISO_LOCAL_DATE)
        .append_literal('T')
        .append_formatter(&ISO_LOCAL_TIME);
    strict_iso(&builder)
});

static ISO_OFFSET_DATE_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_formatter(&ISO_LOCAL_DATE_TIME)
        .parse_lenient()
        .append_offset_id()
        .parse_strict();
    strict_iso(&builder)
});

static ISO_ZONED_DATE_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_formatter(&ISO_OFFSET_DATE_TIME)
        .optional_start()
        .append_literal('[')
        .parse_case_sensitive()
        .append_zone_region_id()
        .append_literal(']');
    strict_iso(&builder)
});

static ISO_DATE_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_formatter(&ISO_LOCAL_DATE_TIME)
        .optional_start()
        .append_offset_id()
        .optional_start()
        .append_literal('[')
        .parse_case_sensitive()
        .append_zone_region_id()
        .append_literal(']');
    strict_iso(&builder)
});

static ISO_ORDINAL_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_number(iso_year(Field::Year))
        .append_literal('-')
        .append_number(value(Field::DayOfYear, 3, 3, SignStyle::NotNegative))
        .optional_start()
        .append_offset_id();
    strict_iso(&builder)
});

static ISO_WEEK_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_number(iso_year(Field::WeekBasedYear))
        .append_literal_str("-W")
        .append_number(two_digits(Field::WeekOfWeekBasedYear))
        .append_literal('-')
        .append_number(value(Field::DayOfWeek, 1, 1, SignStyle::NotNegative))
        .optional_start()
        .append_offset_id();
    strict_iso(&builder)
});

static ISO_INSTANT: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder.parse_case_insensitive().append_instant();
    builder.to_formatter().with_resolver_style(ResolverStyle::Strict)
});

static BASIC_ISO_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .append_number(value(Field::Year, 4, 4, SignStyle::NotNegative))
        .append_number(two_digits(Field::MonthOfYear))
        .append_number(two_digits(Field::DayOfMonth))
        .optional_start()
        .parse_lenient()
        .append_offset_element(OffsetIdElement::hours_minutes_seconds("Z"))
        .parse_strict();
    strict_iso(&builder)
});

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static RFC_1123_DATE_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let day_of_week = optional(|builder| {
        builder
            .append_text_map(Field::DayOfWeek, (1..).zip(DAYS))
            .append_literal_str(", ");
    });
    let seconds = optional(|builder| {
        builder
            .append_literal(':')
            .append_number(two_digits(Field::SecondOfMinute));
    });
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_case_insensitive()
        .parse_lenient()
        .append_optional(&day_of_week)
        .append_number(value(Field::DayOfMonth, 1, 2, SignStyle::NotNegative))
        .append_literal(' ')
        .append_text_map(Field::MonthOfYear, (1..).zip(MONTHS))
        .append_literal(' ')
        .append_number(value(Field::Year, 4, 4, SignStyle::NotNegative))
        .append_literal(' ')
        .append_number(two_digits(Field::HourOfDay))
        .append_literal(':')
        .append_number(two_digits(Field::MinuteOfHour))
        .append_optional(&seconds)
        .append_literal(' ')
        .append_offset_element(OffsetIdElement::hours_minutes("GMT"));
    builder
        .to_formatter()
        .with_resolver_style(ResolverStyle::Smart)
        .with_chronology(Some(&chronology::ISO))
});

impl DateTimeFormatter {
    /// `20111203` and `20111203+0100`, an ISO date without separators.
    pub fn basic_iso_date() -> &'static Self {
        &BASIC_ISO_DATE
    }

    /// `2011-12-03`.
    pub fn iso_local_date() -> &'static Self {
        &ISO_LOCAL_DATE
    }

    /// `2011-12-03+01:00`.
    pub fn iso_offset_date() -> &'static Self {
        &ISO_OFFSET_DATE
    }

    /// `2011-12-03` with an optional offset.
    pub fn iso_date() -> &'static Self {
        &ISO_DATE
    }

    /// `10:15` or `10:15:30`, with an optional fraction.
    pub fn iso_local_time() -> &'static Self {
        &ISO_LOCAL_TIME
    }

    /// `10:15:30+01:00`.
    pub fn iso_offset_time() -> &'static Self {
        &ISO_OFFSET_TIME
    }

    /// `10:15:30` with an optional offset.
    pub fn iso_time() -> &'static Self {
        &ISO_TIME
    }

    /// `2011-12-03T10:15:30`.
    pub fn iso_local_date_time() -> &'static Self {
        &ISO_LOCAL_DATE_TIME
    }

    /// `2011-12-03T10:15:30+01:00`.
    pub fn iso_offset_date_time() -> &'static Self {
        &ISO_OFFSET_DATE_TIME
    }

    /// `2011-12-03T10:15:30+01:00[Europe/Paris]`, the region being
    /// optional.
    pub fn iso_zoned_date_time() -> &'static Self {
        &ISO_ZONED_DATE_TIME
    }

    /// A local date time with an optional offset and an optional region.
    pub fn iso_date_time() -> &'static Self {
        &ISO_DATE_TIME
    }

    /// `2011-337`, the year and day of year.
    pub fn iso_ordinal_date() -> &'static Self {
        &ISO_ORDINAL_DATE
    }

    /// `2011-W48-6`, the week-based year, week and day of week.
    pub fn iso_week_date() -> &'static Self {
        &ISO_WEEK_DATE
    }

    /// `2011-12-03T10:15:30Z`, an instant printed in UTC.
    pub fn iso_instant() -> &'static Self {
        &ISO_INSTANT
    }

    /// `Tue, 3 Jun 2008 11:05:30 GMT`, the date format of HTTP headers.
    pub fn rfc_1123_date_time() -> &'static Self {
        &RFC_1123_DATE_TIME
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ErrorKind,
        fields::Field,
        iso::{IsoDate, IsoDateTime, IsoTime},
        options::ResolverStyle,
        provider::STATIC_ZONES,
        temporal::{OffsetDateTime, ZonedDateTime},
        zone::{UtcOffset, ZoneId},
        DateTimeFormatter,
    };

    fn date_time(year: i32, month: u8, day: u8, hour: i64, minute: i64, second: i64, nanos: i64) -> IsoDateTime {
        IsoDateTime::new(
            IsoDate::new(year, month, day).unwrap(),
            IsoTime::new(hour, minute, second, nanos).unwrap(),
        )
    }

    fn paris(datetime: IsoDateTime) -> ZonedDateTime {
        ZonedDateTime::of_local(datetime, ZoneId::Region("Europe/Paris".into()), None, &STATIC_ZONES).unwrap()
    }

    #[test]
    fn iso_dates() {
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(DateTimeFormatter::iso_local_date().format(&date).unwrap(), "2011-12-03");
        assert_eq!(DateTimeFormatter::iso_date().format(&date).unwrap(), "2011-12-03");
        assert_eq!(DateTimeFormatter::basic_iso_date().format(&date).unwrap(), "20111203");
        assert_eq!(DateTimeFormatter::iso_ordinal_date().format(&date).unwrap(), "2011-337");
        assert_eq!(DateTimeFormatter::iso_week_date().format(&date).unwrap(), "2011-W48-6");
        assert!(DateTimeFormatter::iso_offset_date().format(&date).is_err());

        let wide = IsoDate::new(12345, 1, 2).unwrap();
        assert_eq!(DateTimeFormatter::iso_local_date().format(&wide).unwrap(), "+12345-01-02");
        let negative = IsoDate::new(-1, 1, 2).unwrap();
        assert_eq!(DateTimeFormatter::iso_local_date().format(&negative).unwrap(), "-0001-01-02");

        let parse = |formatter: &DateTimeFormatter, text: &str| formatter.parse(text).unwrap().date();
        assert_eq!(parse(DateTimeFormatter::iso_local_date(), "2011-12-03"), Some(date));
        assert_eq!(parse(DateTimeFormatter::basic_iso_date(), "20111203"), Some(date));
        assert_eq!(parse(DateTimeFormatter::iso_ordinal_date(), "2011-337"), Some(date));
        assert_eq!(parse(DateTimeFormatter::iso_week_date(), "2011-W48-6"), Some(date));

        let parsed = DateTimeFormatter::iso_date().parse("2011-12-03+01:00").unwrap();
        assert_eq!(parsed.date(), Some(date));
        assert_eq!(parsed.values().get(Field::OffsetSeconds), Some(3600));
        let parsed = DateTimeFormatter::basic_iso_date().parse("20111203+0100").unwrap();
        assert_eq!(parsed.values().get(Field::OffsetSeconds), Some(3600));

        // Resolved strictly.
        let err = DateTimeFormatter::iso_local_date().parse("2011-02-30").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        let smart = DateTimeFormatter::iso_local_date().with_resolver_style(ResolverStyle::Smart);
        assert_eq!(
            smart.parse("2011-02-30").unwrap().date(),
            Some(IsoDate::new(2011, 2, 28).unwrap())
        );
    }

    #[test]
    fn iso_times() {
        let time = IsoTime::new(10, 15, 0, 0).unwrap();
        let local = DateTimeFormatter::iso_local_time();
        assert_eq!(local.to_string(), "Value(HourOfDay,2)':'Value(MinuteOfHour,2)[':'Value(SecondOfMinute,2)[Fraction(NanoOfSecond,0,9,DecimalPoint)]]");
        assert_eq!(local.format(&time).unwrap(), "10:15:00");
        let time = IsoTime::new(10, 15, 30, 500_000_000).unwrap();
        assert_eq!(local.format(&time).unwrap(), "10:15:30.5");
        assert_eq!(local.parse("10:15:30.5").unwrap().time(), Some(time));
        assert_eq!(local.parse("10:15").unwrap().time(), Some(IsoTime::new(10, 15, 0, 0).unwrap()));

        let parsed = DateTimeFormatter::iso_time().parse("10:15:30+01:00").unwrap();
        assert_eq!(parsed.values().get(Field::OffsetSeconds), Some(3600));
        assert!(DateTimeFormatter::iso_offset_time().parse("10:15:30").is_err());
    }

    #[test]
    fn iso_date_times() {
        let datetime = date_time(2011, 12, 3, 10, 15, 30, 0);
        assert_eq!(
            DateTimeFormatter::iso_local_date_time().format(&datetime).unwrap(),
            "2011-12-03T10:15:30"
        );
        let parsed = DateTimeFormatter::iso_local_date_time()
            .parse("2011-12-03t10:15:30")
            .unwrap();
        assert_eq!(parsed.to_date_time().unwrap(), datetime);

        let offset = OffsetDateTime::new(datetime, UtcOffset::from_seconds(3600).unwrap());
        assert_eq!(
            DateTimeFormatter::iso_offset_date_time().format(&offset).unwrap(),
            "2011-12-03T10:15:30+01:00"
        );
        assert_eq!(
            DateTimeFormatter::iso_zoned_date_time().format(&offset).unwrap(),
            "2011-12-03T10:15:30+01:00"
        );
        let parsed = DateTimeFormatter::iso_offset_date_time()
            .parse("2011-12-03T10:15:30+01:00")
            .unwrap();
        assert_eq!(parsed.to_offset_date_time().unwrap(), offset);

        let zoned = paris(datetime);
        let text = DateTimeFormatter::iso_zoned_date_time().format(&zoned).unwrap();
        assert_eq!(text, "2011-12-03T10:15:30+01:00[Europe/Paris]");
        assert_eq!(DateTimeFormatter::iso_date_time().format(&zoned).unwrap(), text);

        for formatter in [DateTimeFormatter::iso_zoned_date_time(), DateTimeFormatter::iso_date_time()] {
            let parsed = formatter.parse(&text).unwrap();
            assert_eq!(parsed.zone(), Some(&ZoneId::Region("Europe/Paris".into())));
            assert_eq!(parsed.to_instant().unwrap().epoch_seconds(), 1_322_903_730);
        }
        let parsed = DateTimeFormatter::iso_date_time().parse("2011-12-03T10:15:30").unwrap();
        assert_eq!(parsed.to_date_time().unwrap(), datetime);
        assert_eq!(parsed.zone(), None);

        // Region ids are matched case sensitively.
        assert!(DateTimeFormatter::iso_zoned_date_time()
            .parse("2011-12-03T10:15:30+01:00[europe/paris]")
            .is_err());
    }

    #[test]
    fn rfc_1123() {
        let formatter = DateTimeFormatter::rfc_1123_date_time();
        let datetime = date_time(2008, 6, 3, 11, 5, 30, 0);
        let utc = OffsetDateTime::new(datetime, UtcOffset::UTC);
        assert_eq!(formatter.format(&utc).unwrap(), "Tue, 3 Jun 2008 11:05:30 GMT");
        let east = OffsetDateTime::new(datetime, UtcOffset::from_seconds(7200).unwrap());
        assert_eq!(formatter.format(&east).unwrap(), "Tue, 3 Jun 2008 11:05:30 +0200");

        let parsed = formatter.parse("Tue, 3 Jun 2008 11:05:30 GMT").unwrap();
        assert_eq!(parsed.to_offset_date_time().unwrap(), utc);
        let parsed = formatter.parse("3 jun 2008 11:05 +0200").unwrap();
        assert_eq!(
            parsed.to_offset_date_time().unwrap(),
            OffsetDateTime::new(date_time(2008, 6, 3, 11, 5, 0, 0), UtcOffset::from_seconds(7200).unwrap())
        );

        let err = formatter.parse("Mon, 3 Jun 2008 11:05:30 GMT").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
