//! Utility date and time equations.

// ==== Begin Date Equations ====
//
// The epoch day equations below work on a computational calendar that
// starts the year on March 1st, so that the leap day is the last day of
// the computational year. All values are relative to 1970-01-01.

const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;
const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;

/// Returns the epoch day for a proleptic gregorian date.
pub(crate) fn epoch_days_from_gregorian_date(year: i64, month: u8, day: u8) -> i64 {
    let (month, day) = (i64::from(month), i64::from(day));
    let computational_year = if month <= 2 { year - 1 } else { year };
    let cycle = computational_year.div_euclid(400);
    let year_of_cycle = computational_year - cycle * 400;
    let computational_month = (month + 9) % 12;
    let day_of_year = (153 * computational_month + 2) / 5 + day - 1;
    let day_of_cycle =
        year_of_cycle * 365 + year_of_cycle / 4 - year_of_cycle / 100 + day_of_year;
    cycle * DAYS_IN_A_400Y_CYCLE + day_of_cycle - EPOCH_COMPUTATIONAL_RATA_DIE
}

/// Returns the proleptic gregorian year, month and day for an epoch day.
pub(crate) fn ymd_from_epoch_days(epoch_days: i64) -> (i64, u8, u8) {
    let rata_die = epoch_days + EPOCH_COMPUTATIONAL_RATA_DIE;
    let cycle = rata_die.div_euclid(DAYS_IN_A_400Y_CYCLE);
    let day_of_cycle = rata_die - cycle * DAYS_IN_A_400Y_CYCLE;
    let year_of_cycle = (day_of_cycle - day_of_cycle / 1460 + day_of_cycle / 36_524
        - day_of_cycle / 146_096)
        / 365;
    let day_of_year = day_of_cycle - (365 * year_of_cycle + year_of_cycle / 4 - year_of_cycle / 100);
    let computational_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * computational_month + 2) / 5 + 1;
    let month = if computational_month < 10 {
        computational_month + 3
    } else {
        computational_month - 9
    };
    let year = year_of_cycle + cycle * 400 + i64::from(month <= 2);
    (year, month as u8, day as u8)
}

/// Returns the ISO day of week (Monday is 1, Sunday is 7) for an epoch day.
pub(crate) fn day_of_week_from_epoch_days(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    ((epoch_days + 3).rem_euclid(7) + 1) as u8
}

/// Returns whether the proleptic year is a leap year.
pub(crate) fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Mathematically determine the days in a year.
pub(crate) fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in the month of the proleptic year.
pub(crate) fn iso_days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

// ==== End Date Equations ====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_equations() {
        assert_eq!(epoch_days_from_gregorian_date(1970, 1, 1), 0);
        assert_eq!(epoch_days_from_gregorian_date(2000, 3, 1), 11_017);
        assert_eq!(epoch_days_from_gregorian_date(1969, 12, 31), -1);
        assert_eq!(ymd_from_epoch_days(0), (1970, 1, 1));
        assert_eq!(ymd_from_epoch_days(-1), (1969, 12, 31));
        assert_eq!(ymd_from_epoch_days(11_016), (2000, 2, 29));
    }

    #[test]
    fn epoch_days_extreme_years() {
        for (year, month, day) in [
            (-999_999_999, 1, 1),
            (999_999_999, 12, 31),
            (-1, 2, 28),
            (0, 2, 29),
            (12_345, 6, 7),
        ] {
            let days = epoch_days_from_gregorian_date(year, month, day);
            assert_eq!(ymd_from_epoch_days(days), (year, month, day));
        }
        assert_eq!(epoch_days_from_gregorian_date(-999_999_999, 1, 1), -365_243_219_162);
        assert_eq!(epoch_days_from_gregorian_date(999_999_999, 12, 31), 365_241_780_471);
    }

    #[test]
    fn week_day() {
        assert_eq!(day_of_week_from_epoch_days(0), 4);
        // 2011-12-03 was a Saturday.
        let days = epoch_days_from_gregorian_date(2011, 12, 3);
        assert_eq!(day_of_week_from_epoch_days(days), 6);
        assert_eq!(day_of_week_from_epoch_days(-4), 7);
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(-4));
        assert_eq!(iso_days_in_month(2024, 2), 29);
        assert_eq!(iso_days_in_month(2023, 2), 28);
        assert_eq!(days_in_year(2024), 366);
    }
}
