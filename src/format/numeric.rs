//! Numeric printer-parsers: plain values, reduced values, fractions and the
//! locale dependent week fields.

use core::fmt;

use icu_locale::Locale;

use crate::{
    chronology::Chronology,
    fields::{Field, WeekDefinition},
    iso::IsoDate,
    options::SignStyle,
    TemporalError, TemporalResult,
};

use super::context::{ParseContext, PrintContext};

/// The base date of two digit years, 2000-01-01.
pub(crate) const BASE_DATE: IsoDate = IsoDate::new_unchecked(2000, 1, 1);

/// Nine digits of fraction.
const FRACTION_SCALE: i128 = 1_000_000_000;

/// `10^exp` for widths up to 18.
fn exceed_point(exp: usize) -> i64 {
    10_i64.pow(exp as u32)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Value(Field),
    /// A value printed with its low order digits only, parsed relative to a
    /// base value, or to the base date's value of the field in the parsed
    /// chronology.
    Reduced {
        field: Field,
        base_value: i64,
        base_date: Option<IsoDate>,
    },
    /// A field scaled to a decimal fraction of its range.
    Fraction { field: Field, decimal_point: bool },
    /// A week field whose definition comes from the locale, keyed by its
    /// pattern letter and count.
    WeekBased { letter: char, count: usize },
}

/// A numeric printer-parser.
///
/// `subsequent_width` is the total width of the fixed width values that
/// follow in adjacent value parsing, or -1 when this value is itself part
/// of such a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumberElement {
    kind: NumberKind,
    min_width: usize,
    max_width: usize,
    sign_style: SignStyle,
    subsequent_width: i32,
}

impl NumberElement {
    pub(crate) const fn value(field: Field, min_width: usize, max_width: usize, sign_style: SignStyle) -> Self {
        Self {
            kind: NumberKind::Value(field),
            min_width,
            max_width,
            sign_style,
            subsequent_width: 0,
        }
    }

    pub(crate) const fn reduced(
        field: Field,
        min_width: usize,
        max_width: usize,
        base_value: i64,
        base_date: Option<IsoDate>,
    ) -> Self {
        Self {
            kind: NumberKind::Reduced {
                field,
                base_value,
                base_date,
            },
            min_width,
            max_width,
            sign_style: SignStyle::NotNegative,
            subsequent_width: 0,
        }
    }

    pub(crate) const fn fraction(field: Field, min_width: usize, max_width: usize, decimal_point: bool) -> Self {
        Self {
            kind: NumberKind::Fraction {
                field,
                decimal_point,
            },
            min_width,
            max_width,
            sign_style: SignStyle::NotNegative,
            subsequent_width: 0,
        }
    }

    pub(crate) const fn week_based(letter: char, count: usize, min_width: usize, max_width: usize) -> Self {
        Self {
            kind: NumberKind::WeekBased { letter, count },
            min_width,
            max_width,
            sign_style: SignStyle::NotNegative,
            subsequent_width: 0,
        }
    }

    pub(crate) const fn min_width(&self) -> usize {
        self.min_width
    }

    pub(crate) const fn max_width(&self) -> usize {
        self.max_width
    }

    pub(crate) const fn sign_style(&self) -> SignStyle {
        self.sign_style
    }

    /// Marks this value as a fixed width member of an adjacent run.
    pub(crate) fn with_fixed_width(&self) -> Self {
        Self {
            subsequent_width: -1,
            ..self.clone()
        }
    }

    /// Adds the width of a fixed width value appended after this one.
    pub(crate) fn with_subsequent_width(&self, width: usize) -> Self {
        Self {
            subsequent_width: self.subsequent_width + width as i32,
            ..self.clone()
        }
    }

    fn field(&self) -> Option<Field> {
        match self.kind {
            NumberKind::Value(field)
            | NumberKind::Reduced { field, .. }
            | NumberKind::Fraction { field, .. } => Some(field),
            NumberKind::WeekBased { .. } => None,
        }
    }

    pub(crate) fn is_fixed_width(&self, strict: bool) -> bool {
        match self.kind {
            NumberKind::Fraction { decimal_point, .. } => {
                strict && self.min_width == self.max_width && !decimal_point
            }
            NumberKind::Reduced { .. } if !strict => false,
            _ => {
                self.subsequent_width == -1
                    || (self.subsequent_width > 0
                        && self.min_width == self.max_width
                        && self.sign_style == SignStyle::NotNegative)
            }
        }
    }

    /// The concrete element of a week field for the locale's week definition.
    fn week_element(&self, locale: &Locale) -> Self {
        let NumberKind::WeekBased { letter, count } = self.kind else {
            return self.clone();
        };
        let def = WeekDefinition::of_locale(locale);
        let mut element = match letter {
            'Y' if count == 2 => Self::reduced(
                Field::LocalizedWeekBasedYear(def),
                2,
                2,
                0,
                Some(BASE_DATE),
            ),
            'Y' => Self::value(
                Field::LocalizedWeekBasedYear(def),
                count,
                19,
                if count < 4 {
                    SignStyle::Normal
                } else {
                    SignStyle::ExceedsPad
                },
            ),
            _ => {
                let field = match letter {
                    'w' => Field::LocalizedWeekOfWeekBasedYear(def),
                    'W' => Field::LocalizedWeekOfMonth(def),
                    _ => Field::LocalizedDayOfWeek(def),
                };
                Self::value(field, if count == 2 { 2 } else { 1 }, 2, SignStyle::NotNegative)
            }
        };
        element.subsequent_width = self.subsequent_width;
        element
    }

    // ==== Printing ====

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let field = match self.kind {
            NumberKind::WeekBased { .. } => return self.week_element(ctx.locale()).format(ctx, buf),
            NumberKind::Fraction {
                field,
                decimal_point,
            } => return self.format_fraction(ctx, buf, field, decimal_point),
            NumberKind::Value(field) | NumberKind::Reduced { field, .. } => field,
        };
        let Some(value) = ctx.value(field)? else {
            return Ok(false);
        };
        let value = self.printed_value(ctx, value);
        let style = ctx.decimal_style();
        let digits = value.unsigned_abs().to_string();
        if digits.len() > self.max_width {
            return Err(TemporalError::range().with_message(format!(
                "Field {field} cannot be printed as the value {value} exceeds the maximum print width of {}",
                self.max_width
            )));
        }
        let digits = style.convert_number_to_i18n(&digits);

        if value >= 0 {
            match self.sign_style {
                SignStyle::ExceedsPad
                    if self.min_width < 19 && value >= exceed_point(self.min_width) =>
                {
                    buf.push(style.positive_sign());
                }
                SignStyle::Always => buf.push(style.positive_sign()),
                _ => {}
            }
        } else {
            match self.sign_style {
                SignStyle::Normal | SignStyle::ExceedsPad | SignStyle::Always => {
                    buf.push(style.negative_sign());
                }
                SignStyle::NotNegative => {
                    return Err(TemporalError::range().with_message(format!(
                        "Field {field} cannot be printed as the value {value} cannot be negative according to the SignStyle"
                    )))
                }
                SignStyle::Never => {}
            }
        }
        for _ in digits.chars().count()..self.min_width {
            buf.push(style.zero_digit());
        }
        buf.push_str(&digits);
        Ok(true)
    }

    /// The value to print, truncated for reduced values.
    fn printed_value(&self, ctx: &PrintContext<'_>, value: i64) -> i64 {
        let NumberKind::Reduced {
            field,
            base_value,
            base_date,
        } = self.kind
        else {
            return value;
        };
        let base = base_date
            .and_then(|date| ctx.chronology().date_field(date, field))
            .unwrap_or(base_value);
        let abs = value.unsigned_abs();
        let min_range = exceed_point(self.min_width);
        if value >= base && value < base + min_range {
            (abs % min_range as u64) as i64
        } else {
            (abs % exceed_point(self.max_width) as u64) as i64
        }
    }

    fn format_fraction(
        &self,
        ctx: &PrintContext<'_>,
        buf: &mut String,
        field: Field,
        decimal_point: bool,
    ) -> TemporalResult<bool> {
        let Some(value) = ctx.value(field)? else {
            return Ok(false);
        };
        let range = field.range();
        range.check_valid_value(value, field)?;
        let minimum = i128::from(range.minimum());
        let span = i128::from(range.maximum()) - minimum + 1;
        let scaled = ((i128::from(value) - minimum) * FRACTION_SCALE).div_euclid(span);
        let style = ctx.decimal_style();

        if scaled == 0 {
            if self.min_width > 0 {
                if decimal_point {
                    buf.push(style.decimal_separator());
                }
                for _ in 0..self.min_width {
                    buf.push(style.zero_digit());
                }
            }
            return Ok(true);
        }
        let digits = format!("{scaled:09}");
        let significant = digits.trim_end_matches('0').len();
        let scale = significant.clamp(self.min_width, self.max_width);
        if decimal_point {
            buf.push(style.decimal_separator());
        }
        buf.push_str(&style.convert_number_to_i18n(&digits[..scale]));
        Ok(true)
    }

    // ==== Parsing ====

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        match self.kind {
            NumberKind::WeekBased { .. } => return self.week_element(ctx.locale()).parse(ctx, text, pos),
            NumberKind::Fraction {
                field,
                decimal_point,
            } => return self.parse_fraction(ctx, text, pos, field, decimal_point),
            _ => {}
        }
        let len = text.len();
        let Some(&sign) = text.get(pos) else {
            return Err(pos);
        };
        let strict = ctx.is_strict();
        let fixed = self.is_fixed_width(strict);
        let style = ctx.decimal_style();
        let fixed_sign_width = self.min_width == self.max_width;

        let mut position = pos;
        let mut negative = false;
        let mut positive = false;
        if sign == style.positive_sign() {
            if !self.sign_style.parse(true, strict, fixed_sign_width) {
                return Err(position);
            }
            positive = true;
            position += 1;
        } else if sign == style.negative_sign() {
            if !self.sign_style.parse(false, strict, fixed_sign_width) {
                return Err(position);
            }
            negative = true;
            position += 1;
        } else if self.sign_style == SignStyle::Always && strict {
            return Err(position);
        }

        let eff_min = if strict || fixed { self.min_width } else { 1 };
        let min_end = position + eff_min;
        if min_end > len {
            return Err(position);
        }
        let mut eff_max = if strict || fixed { self.max_width } else { 9 }
            + self.subsequent_width.max(0) as usize;

        let mut total: i128 = 0;
        let mut cur = position;
        for pass in 0..2 {
            let max_end = (cur + eff_max).min(len);
            while cur < max_end {
                let Some(digit) = style.convert_to_digit(text[cur]) else {
                    if cur < min_end {
                        return Err(position);
                    }
                    break;
                };
                cur += 1;
                total = total
                    .checked_mul(10)
                    .and_then(|t| t.checked_add(i128::from(digit)))
                    .ok_or(position)?;
            }
            if self.subsequent_width > 0 && pass == 0 {
                // Reparse leaving room for the fixed width values that follow.
                let parse_len = cur - position;
                eff_max = eff_min.max(parse_len.saturating_sub(self.subsequent_width as usize));
                cur = position;
                total = 0;
            } else {
                break;
            }
        }

        if negative {
            if total == 0 && strict {
                // Minus zero is not allowed.
                return Err(position - 1);
            }
            total = -total;
        } else if self.sign_style == SignStyle::ExceedsPad && strict {
            let parse_len = cur - position;
            if positive {
                if parse_len <= self.min_width {
                    return Err(position - 1);
                }
            } else if parse_len > self.min_width {
                return Err(position);
            }
        }

        if i64::try_from(total).is_err() {
            #[cfg(feature = "log")]
            log::warn!("numeric value overflows at index {cur}, parsing one digit less");
            total /= 10;
            cur -= 1;
        }
        let value = i64::try_from(total).map_err(|_| position)?;
        self.set_value(ctx, value, position, cur)
    }

    fn set_value(
        &self,
        ctx: &mut ParseContext<'_>,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        if let NumberKind::Reduced {
            base_date: Some(_), ..
        } = self.kind
        {
            ctx.defer_reduced(self.clone(), value, error_pos, success_pos);
        }
        let (field, value) =
            self.reduced_value(ctx.effective_chronology(), value, success_pos - error_pos);
        ctx.set_parsed_field(field, value, error_pos, success_pos)
    }

    /// The full value of a parsed value of `parse_len` digits.
    ///
    /// Values parsed with exactly the minimum width are placed in the range
    /// starting at the base value.
    pub(crate) fn reduced_value(
        &self,
        chronology: &dyn Chronology,
        value: i64,
        parse_len: usize,
    ) -> (Field, i64) {
        let NumberKind::Reduced {
            field,
            base_value,
            base_date,
        } = self.kind
        else {
            // Week based elements are replaced before parsing.
            return (self.field().unwrap_or(Field::Year), value);
        };
        let base = base_date
            .and_then(|date| chronology.date_field(date, field))
            .unwrap_or(base_value);
        if parse_len != self.min_width || value < 0 {
            return (field, value);
        }
        let range = exceed_point(self.min_width);
        let last = base % range;
        let base_part = base - last;
        let mut value = if base > 0 {
            base_part + value
        } else {
            base_part - value
        };
        if value < base {
            value += range;
        }
        (field, value)
    }

    fn parse_fraction(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
        field: Field,
        decimal_point: bool,
    ) -> Result<usize, usize> {
        let strict = ctx.is_strict();
        let (eff_min, eff_max) = if strict || self.is_fixed_width(strict) {
            (self.min_width, self.max_width)
        } else {
            (0, 9)
        };
        let style = ctx.decimal_style();
        let mut position = pos;
        if position == text.len() {
            // Nothing is recorded for a fraction that may be empty.
            return if eff_min > 0 { Err(position) } else { Ok(position) };
        }
        if decimal_point {
            if text[position] != style.decimal_separator() {
                // Valid only when the whole fraction is optional.
                return if eff_min > 0 { Err(position) } else { Ok(position) };
            }
            position += 1;
        }
        let min_end = position + eff_min;
        if min_end > text.len() {
            return Err(position);
        }
        let max_end = (position + eff_max).min(text.len());
        let mut total: i128 = 0;
        let mut cur = position;
        while cur < max_end {
            let Some(digit) = style.convert_to_digit(text[cur]) else {
                if cur < min_end {
                    return Err(position);
                }
                break;
            };
            total = total * 10 + i128::from(digit);
            cur += 1;
        }
        let range = field.range();
        let minimum = i128::from(range.minimum());
        let span = i128::from(range.maximum()) - minimum + 1;
        let value = (total * span).div_euclid(10_i128.pow((cur - position) as u32)) + minimum;
        let value = i64::try_from(value).map_err(|_| position)?;
        ctx.set_parsed_field(field, value, position, cur)
    }
}

impl fmt::Display for NumberElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = (self.min_width, self.max_width);
        match self.kind {
            NumberKind::Value(field) => {
                if min == 1 && max == 19 && self.sign_style == SignStyle::Normal {
                    write!(f, "Value({field})")
                } else if min == max && self.sign_style == SignStyle::NotNegative {
                    write!(f, "Value({field},{min})")
                } else {
                    write!(f, "Value({field},{min},{max},{})", self.sign_style)
                }
            }
            NumberKind::Reduced {
                field,
                base_value,
                base_date,
            } => {
                write!(f, "ReducedValue({field},{min},{max},")?;
                match base_date {
                    Some(date) => write!(f, "{date})"),
                    None => write!(f, "{base_value})"),
                }
            }
            NumberKind::Fraction {
                field,
                decimal_point,
            } => {
                let decimal = if decimal_point { ",DecimalPoint" } else { "" };
                write!(f, "Fraction({field},{min},{max}{decimal})")
            }
            NumberKind::WeekBased { letter, count } => {
                f.write_str("Localized(")?;
                match letter {
                    'Y' if count == 1 => f.write_str("WeekBasedYear")?,
                    'Y' if count == 2 => f.write_str("ReducedValue(WeekBasedYear,2,2,2000-01-01)")?,
                    'Y' => {
                        let sign = if count < 4 {
                            SignStyle::Normal
                        } else {
                            SignStyle::ExceedsPad
                        };
                        write!(f, "WeekBasedYear,{count},19,{sign}")?;
                    }
                    _ => {
                        let name = match letter {
                            'w' => "WeekOfWeekBasedYear",
                            'W' => "WeekOfMonth",
                            _ => "DayOfWeek",
                        };
                        write!(f, "{name},{count}")?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}
