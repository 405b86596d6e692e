//! Broken-down calendar time.

use std::sync::Arc;

use crate::calendar::{
    day_in_month_from_day_in_year, day_in_year, is_leap_year, month_from_day_in_year,
    ms_to_hours, ms_to_minutes, ms_to_seconds, ms_to_week_day, ms_to_year,
};
use crate::platform::LocalBreakdown;

/// Calendar and time-of-day fields of an instant.
///
/// Mirrors C's `struct tm`: `year` counts from 1900 and `month` from zero.
/// A value decomposed from an invalid time value is itself invalid, and
/// encoding it produces NaN again.
#[derive(Debug, Clone, PartialEq)]
pub struct GregorianDateTime {
    /// Second, 0..=59
    pub second: i32,
    /// Minute, 0..=59
    pub minute: i32,
    /// Hour, 0..=23
    pub hour: i32,
    /// Day of week, 0 = Sunday
    pub week_day: i32,
    /// Day of month, one-based
    pub month_day: i32,
    /// Day of year, zero-based
    pub year_day: i32,
    /// Month, 0..=11
    pub month: i32,
    /// Years since 1900
    pub year: i32,
    /// Whether DST applied to this instant
    pub is_dst: bool,
    /// Offset from UTC in seconds, DST included
    pub utc_offset: i32,
    /// Time zone display name
    pub time_zone: Option<Arc<str>>,
    valid: bool,
}

impl GregorianDateTime {
    /// Fields for a wall-clock date and time. `year` counts from 1900.
    ///
    /// Derived fields (`week_day`, `year_day`) are left at zero; they are
    /// not consulted when encoding.
    pub fn new(year: i32, month: i32, month_day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            second,
            minute,
            hour,
            week_day: 0,
            month_day,
            year_day: 0,
            month,
            year,
            is_dst: false,
            utc_offset: 0,
            time_zone: None,
            valid: true,
        }
    }

    /// The broken-down form of an invalid time value
    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::new(0, 0, 0, 0, 0, 0)
        }
    }

    /// Decompose a millisecond value already shifted to the wanted wall clock.
    pub fn from_wall_clock_ms(ms: f64) -> Self {
        let year = ms_to_year(ms);
        let leap = is_leap_year(year);
        let year_day = day_in_year(ms, year);
        Self {
            second: ms_to_seconds(ms),
            minute: ms_to_minutes(ms),
            hour: ms_to_hours(ms),
            week_day: ms_to_week_day(ms),
            month_day: day_in_month_from_day_in_year(year_day, leap),
            year_day,
            month: month_from_day_in_year(year_day, leap),
            year: year.saturating_sub(1900),
            is_dst: false,
            utc_offset: 0,
            time_zone: None,
            valid: true,
        }
    }

    /// Whether this describes a real instant
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The full calendar year
    #[inline]
    pub fn full_year(&self) -> i32 {
        self.year.saturating_add(1900)
    }
}

impl From<LocalBreakdown> for GregorianDateTime {
    fn from(local: LocalBreakdown) -> Self {
        let leap = is_leap_year(local.year);
        Self {
            week_day: local.week_day,
            year_day: crate::calendar::month_to_day_in_year(local.month.rem_euclid(12), leap)
                + local.day
                - 1,
            is_dst: local.is_dst,
            ..Self::new(
                local.year.saturating_sub(1900),
                local.month,
                local.day,
                local.hour,
                local.minute,
                local.second,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_fields() {
        let t = GregorianDateTime::from_wall_clock_ms(0.0);
        assert_eq!(t.full_year(), 1970);
        assert_eq!(t.year, 70);
        assert_eq!(t.month, 0);
        assert_eq!(t.month_day, 1);
        assert_eq!(t.week_day, 4);
        assert_eq!(t.year_day, 0);
        assert!(t.is_valid());
    }

    #[test]
    fn test_leap_day_fields() {
        // 2024-02-29T13:14:15Z
        let t = GregorianDateTime::from_wall_clock_ms(1_709_212_455_000.0);
        assert_eq!(t.full_year(), 2024);
        assert_eq!(t.month, 1);
        assert_eq!(t.month_day, 29);
        assert_eq!(t.year_day, 59);
        assert_eq!((t.hour, t.minute, t.second), (13, 14, 15));
        assert_eq!(t.week_day, 4);
    }

    #[test]
    fn test_invalid_marker() {
        assert!(!GregorianDateTime::invalid().is_valid());
    }

    #[test]
    fn test_from_local_breakdown() {
        let local = LocalBreakdown {
            year: 2000,
            month: 2,
            day: 1,
            hour: 4,
            minute: 5,
            second: 6,
            week_day: 3,
            is_dst: true,
        };
        let t = GregorianDateTime::from(local);
        assert_eq!(t.year, 100);
        assert_eq!(t.year_day, 60);
        assert!(t.is_dst);
    }
}
