//! The pattern compiler, turning `uuuu-MM-dd` into builder calls.

use crate::{
    fields::Field,
    options::{SignStyle, TextStyle},
    TemporalError, TemporalResult,
};

use super::{builder::DateTimeFormatterBuilder, numeric::BASE_DATE, offset::OffsetIdElement};

/// The field of a pattern letter, `None` for the letters with their own
/// rules.
fn letter_field(letter: char) -> Option<Field> {
    let field = match letter {
        'G' => Field::Era,
        'y' => Field::YearOfEra,
        'u' => Field::Year,
        'Q' | 'q' => Field::QuarterOfYear,
        'M' | 'L' => Field::MonthOfYear,
        'D' => Field::DayOfYear,
        'd' => Field::DayOfMonth,
        'F' => Field::AlignedWeekOfMonth,
        'E' | 'c' | 'e' => Field::DayOfWeek,
        'a' => Field::AmPmOfDay,
        'H' => Field::HourOfDay,
        'k' => Field::ClockHourOfDay,
        'K' => Field::HourOfAmPm,
        'h' => Field::ClockHourOfAmPm,
        'm' => Field::MinuteOfHour,
        's' => Field::SecondOfMinute,
        'S' | 'n' => Field::NanoOfSecond,
        'A' => Field::MilliOfDay,
        'N' => Field::NanoOfDay,
        'g' => Field::ModifiedJulianDay,
        _ => return None,
    };
    Some(field)
}

fn pattern_error(message: impl Into<String>) -> TemporalError {
    TemporalError::pattern().with_message(message.into())
}

fn too_many(letter: char) -> TemporalError {
    pattern_error(format!("Too many pattern letters: {letter}"))
}

/// Appends the elements of `pattern` to `builder`.
pub(crate) fn compile(builder: &mut DateTimeFormatterBuilder, pattern: &str) -> TemporalResult<()> {
    let depth = builder.depth();
    let chars: Vec<char> = pattern.chars().collect();
    let mut pos = 0;
    while pos < chars.len() {
        let mut cur = chars[pos];
        if cur.is_ascii_alphabetic() {
            let mut start = pos;
            pos += 1;
            while pos < chars.len() && chars[pos] == cur {
                pos += 1;
            }
            let mut count = pos - start;

            if cur == 'p' {
                let mut pad = 0;
                if let Some(next) = chars.get(pos).filter(|ch| ch.is_ascii_alphabetic()) {
                    pad = count;
                    cur = *next;
                    start = pos;
                    pos += 1;
                    while pos < chars.len() && chars[pos] == cur {
                        pos += 1;
                    }
                    count = pos - start;
                }
                if pad == 0 {
                    return Err(pattern_error(format!(
                        "Pad letter 'p' must be followed by valid pad pattern: {pattern}"
                    )));
                }
                builder.pad_next(pad).map_err(as_pattern_error)?;
            }

            match letter_field(cur) {
                Some(field) => compile_field(builder, cur, count, field),
                None => compile_letter(builder, cur, count),
            }
            .map_err(as_pattern_error)?;
        } else if cur == '\'' {
            let start = pos;
            pos += 1;
            while pos < chars.len() {
                if chars[pos] == '\'' {
                    if chars.get(pos + 1) == Some(&'\'') {
                        pos += 1;
                    } else {
                        break;
                    }
                }
                pos += 1;
            }
            if pos >= chars.len() {
                return Err(pattern_error(format!(
                    "Pattern ends with an incomplete string literal: {pattern}"
                )));
            }
            let literal: String = chars[start + 1..pos].iter().collect();
            if literal.is_empty() {
                builder.append_literal('\'');
            } else {
                builder.append_literal_str(&literal.replace("''", "'"));
            }
            pos += 1;
        } else if cur == '[' {
            builder.optional_start();
            pos += 1;
        } else if cur == ']' {
            if builder.depth() <= depth {
                return Err(pattern_error("Pattern invalid as it contains ] without previous ["));
            }
            builder.optional_end().map_err(as_pattern_error)?;
            pos += 1;
        } else if matches!(cur, '{' | '}' | '#') {
            return Err(pattern_error(format!("Pattern includes reserved character: '{cur}'")));
        } else {
            builder.append_literal(cur);
            pos += 1;
        }
    }
    if builder.depth() > depth {
        return Err(pattern_error(format!("Pattern has an unclosed optional section: {pattern}")));
    }
    #[cfg(feature = "log")]
    log::debug!("compiled pattern {pattern:?}");
    Ok(())
}

fn as_pattern_error(error: TemporalError) -> TemporalError {
    match error.kind() {
        crate::error::ErrorKind::Configuration => TemporalError::pattern().with_message(error.into_message()),
        _ => error,
    }
}

/// The letters which map onto a field.
fn compile_field(
    builder: &mut DateTimeFormatterBuilder,
    letter: char,
    count: usize,
    field: Field,
) -> TemporalResult<()> {
    let text_style = |standalone: bool, style: TextStyle| {
        if standalone {
            style.as_standalone()
        } else {
            style
        }
    };
    match letter {
        'u' | 'y' => {
            if count == 2 {
                builder.append_value_reduced_date(field, 2, 2, BASE_DATE)?;
            } else if count < 4 {
                builder.append_value_with(field, count, 19, SignStyle::Normal)?;
            } else {
                builder.append_value_with(field, count, 19, SignStyle::ExceedsPad)?;
            }
        }
        'c' if count == 1 => {
            builder.append_week_based(letter, count);
        }
        'c' if count == 2 => return Err(pattern_error("Invalid pattern \"cc\"")),
        'c' | 'L' | 'q' | 'M' | 'Q' | 'E' | 'e' => {
            let standalone = matches!(letter, 'c' | 'L' | 'q');
            match count {
                1 | 2 if letter == 'e' => {
                    builder.append_week_based(letter, count);
                }
                1 | 2 if letter == 'E' => {
                    builder.append_text(field, TextStyle::Short);
                }
                1 => {
                    builder.append_value(field);
                }
                2 => {
                    builder.append_value_fixed(field, 2)?;
                }
                3 => {
                    builder.append_text(field, text_style(standalone, TextStyle::Short));
                }
                4 => {
                    builder.append_text(field, text_style(standalone, TextStyle::Full));
                }
                5 => {
                    builder.append_text(field, text_style(standalone, TextStyle::Narrow));
                }
                _ => return Err(too_many(letter)),
            }
        }
        'a' => {
            if count != 1 {
                return Err(too_many(letter));
            }
            builder.append_text(field, TextStyle::Short);
        }
        'G' => {
            let style = match count {
                1..=3 => TextStyle::Short,
                4 => TextStyle::Full,
                5 => TextStyle::Narrow,
                _ => return Err(too_many(letter)),
            };
            builder.append_text(field, style);
        }
        'S' => {
            builder.append_fraction(Field::NanoOfSecond, count, count, false)?;
        }
        'F' => {
            if count != 1 {
                return Err(too_many(letter));
            }
            builder.append_value(field);
        }
        'd' | 'h' | 'H' | 'k' | 'K' | 'm' | 's' => match count {
            1 => {
                builder.append_value(field);
            }
            2 => {
                builder.append_value_fixed(field, 2)?;
            }
            _ => return Err(too_many(letter)),
        },
        'D' => match count {
            1 => {
                builder.append_value(field);
            }
            2 | 3 => {
                builder.append_value_with(field, count, 3, SignStyle::NotNegative)?;
            }
            _ => return Err(too_many(letter)),
        },
        'g' => {
            let sign = if count == 1 {
                SignStyle::Normal
            } else {
                SignStyle::ExceedsPad
            };
            builder.append_value_with(field, count, 19, sign)?;
        }
        _ => {
            if count == 1 {
                builder.append_value(field);
            } else {
                builder.append_value_fixed(field, count)?;
            }
        }
    }
    Ok(())
}

/// The zone, offset and week letters.
fn compile_letter(builder: &mut DateTimeFormatterBuilder, letter: char, count: usize) -> TemporalResult<()> {
    match letter {
        'z' => {
            if count > 4 {
                return Err(too_many(letter));
            }
            let style = if count == 4 {
                TextStyle::Full
            } else {
                TextStyle::Short
            };
            builder.append_zone_text(style);
        }
        'V' => {
            if count != 2 {
                return Err(pattern_error(format!("Pattern letter count must be 2: {letter}")));
            }
            builder.append_zone_id();
        }
        'v' => {
            let style = match count {
                1 => TextStyle::Short,
                4 => TextStyle::Full,
                _ => return Err(pattern_error(format!("Wrong number of pattern letters: {letter}"))),
            };
            builder.append_generic_zone_text(style);
        }
        'Z' => match count {
            1..=3 => {
                builder.append_offset("+HHMM", "+0000")?;
            }
            4 => {
                builder.append_localized_offset(TextStyle::Full)?;
            }
            5 => {
                builder.append_offset("+HH:MM:ss", "Z")?;
            }
            _ => return Err(too_many(letter)),
        },
        'O' => {
            let style = match count {
                1 => TextStyle::Short,
                4 => TextStyle::Full,
                _ => return Err(pattern_error(format!("Pattern letter count must be 1 or 4: {letter}"))),
            };
            builder.append_localized_offset(style)?;
        }
        'X' | 'x' => {
            if count > 5 {
                return Err(too_many(letter));
            }
            let zero = match (letter, count) {
                ('X', _) => "Z",
                (_, 1) => "+00",
                (_, c) if c % 2 == 0 => "+0000",
                _ => "+00:00",
            };
            builder.append_offset(OffsetIdElement::pattern_for_count(count), zero)?;
        }
        'W' => {
            if count > 1 {
                return Err(too_many(letter));
            }
            builder.append_week_based(letter, count);
        }
        'w' => {
            if count > 2 {
                return Err(too_many(letter));
            }
            builder.append_week_based(letter, count);
        }
        'Y' => {
            builder.append_week_based(letter, count);
        }
        _ => return Err(pattern_error(format!("Unknown pattern letter: {letter}"))),
    }
    Ok(())
}
