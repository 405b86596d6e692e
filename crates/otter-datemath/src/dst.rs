//! Daylight saving time resolution.
//!
//! ECMA-262 forbids taking historical DST rules into account, while hosts
//! happily report them (New Zealand had no DST from 1946 to 1974, for one).
//! Instants are therefore shifted into an *equivalent year* inside a window
//! the host rules are trusted for, and the host is queried there.
//!
//! Two years are equivalent when they share leapness and the weekday of
//! January 1st, which repeats every 28 years. The century rule breaks that
//! cycle, so mappings for years before 1900 or after 2100 can be off.

use crate::calendar::{
    date_to_day_in_year, day_in_month_from_day_in_year, day_in_year, is_leap_year,
    month_from_day_in_year, ms_to_hours, ms_to_milliseconds, ms_to_minutes, ms_to_year,
};
use crate::constants::{MAX_UNIX_TIME, MS_PER_DAY, MS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use crate::platform::TimePlatform;

/// Last year handed to the host. `time_t` based hosts stop at 2038.
pub const MAXIMUM_YEAR_FOR_DST: i32 = 2037;

/// First year of the trusted window.
///
/// The window must span 28 years so every year has an equivalent in it,
/// which caps the minimum at `MAXIMUM_YEAR_FOR_DST - 27`.
pub fn minimum_year_for_dst(current_year: i32) -> i32 {
    current_year.min(MAXIMUM_YEAR_FOR_DST - 27)
}

/// Map `year` into `[min_year, MAXIMUM_YEAR_FOR_DST]` by whole 28-year cycles.
pub fn equivalent_year_for_dst(year: i32, min_year: i32) -> i32 {
    let max_year = MAXIMUM_YEAR_FOR_DST;

    let difference = if year > max_year {
        i64::from(min_year) - i64::from(year)
    } else if year < min_year {
        i64::from(max_year) - i64::from(year)
    } else {
        return year;
    };

    let product = (difference / 28) * 28;
    let equivalent = (i64::from(year) + product) as i32;
    debug_assert!(
        (min_year..=max_year).contains(&equivalent),
        "year {year} mapped outside the DST window to {equivalent}"
    );
    equivalent
}

/// DST offset in ms for an instant given in UTC seconds.
///
/// Compares the local hour and minute the host reports with the ones
/// implied by the standard offset alone.
pub fn dst_offset_simple(local_time_seconds: f64, utc_offset: f64, platform: &dyn TimePlatform) -> f64 {
    let mut local_time_seconds = local_time_seconds;
    if local_time_seconds > MAX_UNIX_TIME {
        local_time_seconds = MAX_UNIX_TIME;
    } else if local_time_seconds < 0.0 {
        // Go ahead a day, some hosts reject the epoch itself
        local_time_seconds += SECONDS_PER_DAY;
    }

    let offset_time = local_time_seconds * MS_PER_SECOND + utc_offset;
    let offset_hour = ms_to_hours(offset_time);
    let offset_minute = ms_to_minutes(offset_time);

    let local = platform.local_breakdown(local_time_seconds as i64);

    let mut diff = f64::from(local.hour - offset_hour) * SECONDS_PER_HOUR
        + f64::from(local.minute - offset_minute) * 60.0;
    if diff < 0.0 {
        diff += SECONDS_PER_DAY;
    }

    diff * MS_PER_SECOND
}

/// DST offset in ms for the UTC instant `ms`, after equivalent-year remapping.
pub fn dst_offset(ms: f64, utc_offset: f64, min_year: i32, platform: &dyn TimePlatform) -> f64 {
    let year = ms_to_year(ms);
    let equivalent_year = equivalent_year_for_dst(year, min_year);

    let ms = if year != equivalent_year {
        let leap_year = is_leap_year(year);
        let day_in_year_local = day_in_year(ms, year);
        let day_in_month = day_in_month_from_day_in_year(day_in_year_local, leap_year);
        let month = month_from_day_in_year(day_in_year_local, leap_year);
        let day = date_to_day_in_year(equivalent_year, month, day_in_month);
        tracing::trace!(year, equivalent_year, "remapped year for DST lookup");
        day * MS_PER_DAY + ms_to_milliseconds(ms)
    } else {
        ms
    };

    dst_offset_simple(ms / MS_PER_SECOND, utc_offset, platform)
}
