//! Proleptic Gregorian calendar arithmetic on millisecond time values.
//!
//! Everything here is a pure function of its inputs. Time values are `f64`
//! milliseconds since the epoch; results derived from NaN are meaningless
//! and callers are expected to screen them with [`time_clip`] first.

use crate::constants::{
    FIRST_DAY_OF_MONTH, HOURS_PER_DAY, MAX_TIME_MS, MINUTES_PER_HOUR, MS_PER_DAY, MS_PER_HOUR,
    MS_PER_MINUTE, MS_PER_SECOND, SECONDS_PER_MINUTE,
};

const LEAP_DAYS_BEFORE_1971_BY_4_RULE: f64 = (1970 / 4) as f64;
const EXCLUDED_LEAP_DAYS_BEFORE_1971_BY_100_RULE: f64 = (1970 / 100) as f64;
const LEAP_DAYS_BEFORE_1971_BY_400_RULE: f64 = (1970 / 400) as f64;

/// Gregorian leap year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 400 == 0 || year % 100 != 0)
}

/// 365 or 366.
#[inline]
pub fn days_in_year(year: i32) -> i32 {
    365 + i32::from(is_leap_year(year))
}

/// Number of days from 1970-01-01 to January 1st of `year`.
///
/// Negative for years before 1970. Every fourth year is a leap year, except
/// every hundredth, except every four hundredth.
pub fn days_from_1970_to_year(year: i32) -> f64 {
    let year = f64::from(year);
    let year_minus_one = year - 1.0;
    let years_to_add_by_4_rule = (year_minus_one / 4.0).floor() - LEAP_DAYS_BEFORE_1971_BY_4_RULE;
    let years_to_exclude_by_100_rule =
        (year_minus_one / 100.0).floor() - EXCLUDED_LEAP_DAYS_BEFORE_1971_BY_100_RULE;
    let years_to_add_by_400_rule =
        (year_minus_one / 400.0).floor() - LEAP_DAYS_BEFORE_1971_BY_400_RULE;

    365.0 * (year - 1970.0) + years_to_add_by_4_rule - years_to_exclude_by_100_rule
        + years_to_add_by_400_rule
}

/// Whole days since the epoch, rounded toward negative infinity.
#[inline]
pub fn ms_to_days(ms: f64) -> f64 {
    (ms / MS_PER_DAY).floor()
}

/// Calendar year containing `ms`.
pub fn ms_to_year(ms: f64) -> i32 {
    let approx_year = ((ms / (MS_PER_DAY * 365.2425)).floor() + 1970.0) as i32;
    let ms_from_approx_year_to_1970 = MS_PER_DAY * days_from_1970_to_year(approx_year);
    if ms_from_approx_year_to_1970 > ms {
        return approx_year.saturating_sub(1);
    }
    if ms_from_approx_year_to_1970 + MS_PER_DAY * f64::from(days_in_year(approx_year)) <= ms {
        return approx_year.saturating_add(1);
    }
    approx_year
}

/// Zero-based day within `year` of the instant `ms`.
#[inline]
pub fn day_in_year(ms: f64, year: i32) -> i32 {
    (ms_to_days(ms) - days_from_1970_to_year(year)) as i32
}

/// Milliseconds elapsed since the start of the day containing `ms`.
#[inline]
pub fn ms_to_milliseconds(ms: f64) -> f64 {
    fold(ms % MS_PER_DAY, MS_PER_DAY)
}

/// Day of week, 0 = Sunday. The epoch fell on a Thursday.
#[inline]
pub fn ms_to_week_day(ms: f64) -> i32 {
    fold((ms_to_days(ms) + 4.0) % 7.0, 7.0) as i32
}

/// Second of the minute, 0..=59.
#[inline]
pub fn ms_to_seconds(ms: f64) -> i32 {
    fold((ms / MS_PER_SECOND).floor() % SECONDS_PER_MINUTE, SECONDS_PER_MINUTE) as i32
}

/// Minute of the hour, 0..=59.
#[inline]
pub fn ms_to_minutes(ms: f64) -> i32 {
    fold((ms / MS_PER_MINUTE).floor() % MINUTES_PER_HOUR, MINUTES_PER_HOUR) as i32
}

/// Hour of the day, 0..=23.
#[inline]
pub fn ms_to_hours(ms: f64) -> i32 {
    fold((ms / MS_PER_HOUR).floor() % HOURS_PER_DAY, HOURS_PER_DAY) as i32
}

// `%` on floats keeps the sign of the dividend
#[inline]
fn fold(value: f64, period: f64) -> f64 {
    if value < 0.0 { value + period } else { value }
}

/// Zero-based month for a zero-based day of the year.
pub fn month_from_day_in_year(day_in_year: i32, leap_year: bool) -> i32 {
    let first_days = &FIRST_DAY_OF_MONTH[usize::from(leap_year)];
    (1..12)
        .rev()
        .find(|&month| day_in_year >= first_days[month])
        .unwrap_or(0) as i32
}

/// One-based day of the month for a zero-based day of the year.
pub fn day_in_month_from_day_in_year(day_in_year: i32, leap_year: bool) -> i32 {
    let month = month_from_day_in_year(day_in_year, leap_year);
    day_in_year - month_to_day_in_year(month, leap_year) + 1
}

/// Zero-based day of the year on which `month` (0..=11) starts.
#[inline]
pub fn month_to_day_in_year(month: i32, leap_year: bool) -> i32 {
    FIRST_DAY_OF_MONTH[usize::from(leap_year)][month as usize]
}

/// Milliseconds since midnight for a wall-clock time. Fields may overflow.
#[inline]
pub fn time_to_ms(hour: f64, minute: f64, second: f64, ms: f64) -> f64 {
    ((hour * MINUTES_PER_HOUR + minute) * SECONDS_PER_MINUTE + second) * MS_PER_SECOND + ms
}

/// Days since the epoch for a calendar date.
///
/// `month` may lie outside 0..=11; whole years spill into `year`.
/// `day` is one-based and may also overflow the month.
pub fn date_to_day_in_year(year: i32, month: i32, day: i32) -> f64 {
    let mut year = year.saturating_add(month / 12);
    let mut month = month % 12;
    if month < 0 {
        month += 12;
        year = year.saturating_sub(1);
    }

    let year_day = days_from_1970_to_year(year).floor();
    let month_day = month_to_day_in_year(month, is_leap_year(year));

    year_day + f64::from(month_day) + f64::from(day) - 1.0
}

/// ECMA-262 TimeClip: NaN outside ±8.64e15 ms, otherwise truncated toward zero.
#[inline]
pub fn time_clip(t: f64) -> f64 {
    if !t.is_finite() || t.abs() > MAX_TIME_MS {
        return f64::NAN;
    }
    t.trunc()
}

/// Seconds since the epoch for a UTC calendar date using the Julian day number.
///
/// `mon` is one-based. Divisions are floored so the result is exact for any
/// year, including those before the Julian day origin.
pub fn ymdhms_to_seconds(year: i64, mon: i32, day: i64, hour: i64, minute: i64, second: i64) -> f64 {
    let year = year as f64;
    let mon_adjust = f64::from((mon - 14) / 12);
    let mon = f64::from(mon);

    let days = (day as f64 - 32075.0)
        + (1461.0 * (year + 4800.0 + mon_adjust) / 4.0).floor()
        + (367.0 * (mon - 2.0 - mon_adjust * 12.0) / 12.0).floor()
        - (3.0 * ((year + 4900.0 + mon_adjust) / 100.0).floor() / 4.0).floor()
        - 2_440_588.0;

    ((days * HOURS_PER_DAY + hour as f64) * MINUTES_PER_HOUR + minute as f64) * SECONDS_PER_MINUTE
        + second as f64
}
