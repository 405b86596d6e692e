//! End-to-end behaviour of the date engine against deterministic platforms.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use otter_datemath::calendar::is_leap_year;
use otter_datemath::platform::TimeZoneChangeCallback;
use otter_datemath::{
    DateMath, DateMathConfig, FixedOffsetPlatform, GregorianDateTime, LocalBreakdown, TimePlatform,
    ZonedPlatform, format_date_time, time_clip,
};
use parking_lot::Mutex;
use proptest::prelude::*;

const HOUR: i32 = 3600;

/// Five hours west of UTC with an hour of DST from April through October.
///
/// Like real hosts it only knows DST rules from 1970 on.
struct SeasonalPlatform {
    now_ms: f64,
}

impl TimePlatform for SeasonalPlatform {
    fn current_time_ms(&self) -> f64 {
        self.now_ms
    }

    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown {
        let standard = LocalBreakdown::at_offset(epoch_seconds, -5 * HOUR);
        if standard.year >= 1970 && (3..=9).contains(&standard.month) {
            LocalBreakdown {
                is_dst: true,
                ..LocalBreakdown::at_offset(epoch_seconds, -4 * HOUR)
            }
        } else {
            standard
        }
    }

    fn raw_utc_offset_seconds(&self) -> i32 {
        -5 * HOUR
    }
}

/// A platform whose zone can be moved and that reports the move.
#[derive(Default)]
struct NotifyingPlatform {
    offset: Mutex<i32>,
    on_change: Mutex<Option<TimeZoneChangeCallback>>,
    watched: AtomicBool,
}

impl NotifyingPlatform {
    fn move_to(&self, offset_seconds: i32) {
        *self.offset.lock() = offset_seconds;
        if let Some(callback) = self.on_change.lock().as_ref() {
            callback();
        }
    }
}

impl TimePlatform for NotifyingPlatform {
    fn current_time_ms(&self) -> f64 {
        0.0
    }

    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown {
        LocalBreakdown::at_offset(epoch_seconds, *self.offset.lock())
    }

    fn raw_utc_offset_seconds(&self) -> i32 {
        *self.offset.lock()
    }

    fn watch_time_zone(&self, on_change: TimeZoneChangeCallback) -> bool {
        *self.on_change.lock() = Some(on_change);
        self.watched.store(true, Ordering::Relaxed);
        true
    }
}

fn seasonal_engine() -> DateMath {
    DateMath::with_config(
        Arc::new(SeasonalPlatform { now_ms: 1.6e12 }),
        DateMathConfig::default().with_min_dst_year(2010),
    )
    .unwrap()
}

fn utc_engine() -> DateMath {
    DateMath::new(Arc::new(FixedOffsetPlatform::utc().with_now(0.0)))
}

fn utc_ms(year: i32, month: i32, day: i32, hour: i32) -> f64 {
    utc_engine().gregorian_date_time_to_ms(
        &GregorianDateTime::new(year - 1900, month, day, hour, 0, 0),
        0.0,
        true,
    )
}

#[test]
fn test_parser_scenarios() {
    let math = utc_engine();
    assert_eq!(math.parse_date("Sat, 01 Jan 2000 08:00:00 GMT"), 946_713_600_000.0);
    // 1999-01-01T21:00:00Z
    assert_eq!(math.parse_date("01 Jan 99 22:00 +0100"), 915_224_400_000.0);
    assert_eq!(math.parse_date("01 Jan 99 22:00 +0100"), utc_ms(1999, 0, 1, 21));
    assert!(math.parse_date("not a date").is_nan());
}

#[test]
fn test_parse_without_zone_uses_local_time() {
    let math = seasonal_engine();
    let local = GregorianDateTime::new(109, 5, 15, 0, 0, 0);
    let parsed = math.parse_date("2009/06/15");
    assert_eq!(parsed, math.gregorian_date_time_to_ms(&local, 0.0, false));
    // June is daylight time: four hours behind UTC
    assert_eq!(parsed, utc_ms(2009, 5, 15, 4));
}

#[test]
fn test_leap_year_table() {
    for (year, leap) in [(1900, false), (2000, true), (2004, true), (2100, false), (2023, false)] {
        assert_eq!(is_leap_year(year), leap, "{year}");
    }
}

#[test]
fn test_epoch_is_thursday() {
    let t = utc_engine().ms_to_gregorian_date_time(0.0, false);
    assert_eq!(t.week_day, 4);
    assert_eq!((t.full_year(), t.month, t.month_day), (1970, 0, 1));
}

#[test]
fn test_month_spillover() {
    assert_eq!(utc_ms(2000, 13, 1, 0), utc_ms(2001, 1, 1, 0));
    assert_eq!(utc_ms(2000, -1, 1, 0), utc_ms(1999, 11, 1, 0));
}

#[test]
fn test_time_clip_boundaries() {
    assert_eq!(time_clip(8.64e15), 8.64e15);
    assert_eq!(time_clip(-8.64e15), -8.64e15);
    assert!(time_clip(8.64e15 + 1.0).is_nan());
    assert!(time_clip(f64::NAN).is_nan());
    assert_eq!(time_clip(1.9), 1.0);
    assert_eq!(time_clip(-1.9), -1.0);
}

#[test]
fn test_daylight_time_decompose_and_encode() {
    let math = seasonal_engine();

    let summer = utc_ms(2020, 6, 15, 16);
    let t = math.ms_to_gregorian_date_time(summer, false);
    assert_eq!(t.hour, 12);
    assert!(t.is_dst);
    assert_eq!(t.utc_offset, -4 * HOUR);
    assert_eq!(math.gregorian_date_time_to_ms(&t, 0.0, false), summer);

    let winter = utc_ms(2020, 0, 15, 16);
    let t = math.ms_to_gregorian_date_time(winter, false);
    assert_eq!(t.hour, 11);
    assert!(!t.is_dst);
    assert_eq!(t.utc_offset, -5 * HOUR);
    assert_eq!(math.gregorian_date_time_to_ms(&t, 0.0, false), winter);
}

#[test]
fn test_southern_hemisphere_seasons() {
    let platform = ZonedPlatform::new(chrono_tz::Australia::Sydney).with_now(1.6e12);
    let math = DateMath::with_config(Arc::new(platform), DateMathConfig::default().with_min_dst_year(1995))
        .unwrap();
    assert_eq!(math.utc_offset(), 36_000_000.0);

    let winter = utc_ms(2009, 6, 15, 0);
    let t = math.ms_to_gregorian_date_time(winter, false);
    assert_eq!((t.month, t.month_day, t.hour), (6, 15, 10));
    assert!(!t.is_dst);
    assert_eq!(t.utc_offset, 10 * HOUR);
    assert_eq!(math.gregorian_date_time_to_ms(&t, 0.0, false), winter);
    assert_eq!(format_date_time(&t), "Wed Jul 15 2009 10:00:00 GMT+1000 (AEST)");

    let summer = utc_ms(2009, 0, 15, 0);
    let t = math.ms_to_gregorian_date_time(summer, false);
    assert_eq!((t.month, t.month_day, t.hour), (0, 15, 11));
    assert!(t.is_dst);
    assert_eq!(t.utc_offset, 11 * HOUR);
    assert_eq!(t.time_zone.as_deref(), Some("AEDT"));
}

#[test]
fn test_oversized_fixed_offset_is_clamped() {
    let math = DateMath::new(Arc::new(FixedOffsetPlatform::new(100_000 * 60).with_now(0.0)));
    assert_eq!(math.utc_offset(), 86_400_000.0);
    let t = math.ms_to_gregorian_date_time(0.0, false);
    assert!(t.is_valid());
}

#[test]
fn test_historical_years_use_equivalent_year_rules() {
    let math = seasonal_engine();
    for year in [1950, 1901, 2050, 2200] {
        let summer = utc_ms(year, 6, 15, 16);
        let t = math.ms_to_gregorian_date_time(summer, false);
        assert!(t.is_dst, "{year}");
        assert_eq!((t.full_year(), t.month, t.month_day, t.hour), (year, 6, 15, 12));
        assert_eq!(math.gregorian_date_time_to_ms(&t, 0.0, false), summer);
    }
}

#[test]
fn test_equivalent_year_stability() {
    let math = seasonal_engine();
    for year in 1800..2300 {
        let once = math.equivalent_year_for_dst(year);
        assert_eq!(math.equivalent_year_for_dst(once), once);
        assert!((2010..=2037).contains(&once));
    }
}

#[test]
fn test_utc_offset_cache_follows_notifications() {
    let platform = Arc::new(NotifyingPlatform::default());
    let math = DateMath::new(platform.clone());
    assert!(platform.watched.load(Ordering::Relaxed));
    assert!(math.time_zone().is_enabled());
    assert_eq!(math.utc_offset(), 0.0);

    platform.move_to(2 * HOUR);
    assert!(!math.time_zone().is_valid());
    assert_eq!(math.utc_offset(), 7_200_000.0);
}

#[test]
fn test_utc_offset_cache_can_be_disabled() {
    let platform = Arc::new(NotifyingPlatform::default());
    let math = DateMath::with_config(platform.clone(), DateMathConfig::default().without_utc_offset_cache())
        .unwrap();
    assert!(!platform.watched.load(Ordering::Relaxed));
    assert!(!math.time_zone().is_enabled());

    *platform.offset.lock() = HOUR;
    assert_eq!(math.utc_offset(), 3_600_000.0);
}

#[test]
fn test_date_function_string() {
    let math = DateMath::new(Arc::new(
        FixedOffsetPlatform::new(HOUR)
            .with_now(946_713_909_000.0)
            .with_zone_name("CET"),
    ));
    assert_eq!(
        format_date_time(&math.local_time_now()),
        "Sat Jan 01 2000 09:05:09 GMT+0100 (CET)"
    );
}

proptest! {
    #[test]
    fn prop_utc_round_trip(ms in -8_640_000_000_000_000i64..=8_640_000_000_000_000i64) {
        let math = utc_engine();
        let ms = ms as f64;
        let t = math.ms_to_gregorian_date_time(ms, true);
        prop_assert_eq!(math.gregorian_date_time_to_ms(&t, ms.rem_euclid(1000.0), true), ms);
    }

    #[test]
    fn prop_fixed_offset_round_trip(
        ms in -8_000_000_000_000_000i64..=8_000_000_000_000_000i64,
        offset_minutes in -720i32..=840,
    ) {
        let math = DateMath::new(Arc::new(FixedOffsetPlatform::new(offset_minutes * 60).with_now(0.0)));
        let ms = ms as f64;
        let t = math.ms_to_gregorian_date_time(ms, false);
        prop_assert_eq!(t.utc_offset, offset_minutes * 60);
        prop_assert_eq!(math.gregorian_date_time_to_ms(&t, ms.rem_euclid(1000.0), false), ms);
    }
}
