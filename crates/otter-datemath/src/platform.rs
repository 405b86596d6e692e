//! Host time collaborators.
//!
//! The engine never talks to the operating system directly. Everything it
//! needs from the host (the clock, the local-time breakdown of an instant and
//! the standard UTC offset) comes through [`TimePlatform`].

use chrono::{DateTime, Datelike, Local, LocalResult, Offset, TimeZone, Timelike, Utc};

use crate::calendar::{
    day_in_month_from_day_in_year, day_in_year, is_leap_year, month_from_day_in_year,
    ms_to_hours, ms_to_minutes, ms_to_seconds, ms_to_week_day, ms_to_year,
};
use crate::constants::MS_PER_SECOND;
use crate::error::{DateMathError, DateMathResult};

/// Local wall-clock fields the host reports for an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalBreakdown {
    /// Full calendar year
    pub year: i32,
    /// Month, 0..=11
    pub month: i32,
    /// Day of month, 1..=31
    pub day: i32,
    /// Hour, 0..=23
    pub hour: i32,
    /// Minute, 0..=59
    pub minute: i32,
    /// Second, 0..=59
    pub second: i32,
    /// Day of week, 0 = Sunday
    pub week_day: i32,
    /// Whether daylight saving time is in effect
    pub is_dst: bool,
}

impl LocalBreakdown {
    /// Break down `epoch_seconds` shifted by a fixed offset.
    pub fn at_offset(epoch_seconds: i64, offset_seconds: i32) -> Self {
        let ms = (epoch_seconds as f64 + f64::from(offset_seconds)) * MS_PER_SECOND;
        let year = ms_to_year(ms);
        let leap = is_leap_year(year);
        let year_day = day_in_year(ms, year);
        Self {
            year,
            month: month_from_day_in_year(year_day, leap),
            day: day_in_month_from_day_in_year(year_day, leap),
            hour: ms_to_hours(ms),
            minute: ms_to_minutes(ms),
            second: ms_to_seconds(ms),
            week_day: ms_to_week_day(ms),
            is_dst: false,
        }
    }
}

/// Callback fired when the host time zone changes.
pub type TimeZoneChangeCallback = Box<dyn Fn() + Send + Sync>;

/// Source of current time and local-time rules.
pub trait TimePlatform: Send + Sync {
    /// Current time in milliseconds since the epoch, with sub-millisecond precision.
    fn current_time_ms(&self) -> f64;

    /// Local wall-clock fields for `epoch_seconds`.
    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown;

    /// Standard offset from UTC in seconds, not including DST.
    fn raw_utc_offset_seconds(&self) -> i32;

    /// Display name of the local time zone at `epoch_seconds`, if known.
    fn time_zone_name(&self, _epoch_seconds: i64) -> Option<String> {
        None
    }

    /// Register for time zone change notifications.
    ///
    /// Returns `false` when the host has no such channel, in which case the
    /// caller must not cache the UTC offset.
    fn watch_time_zone(&self, _on_change: TimeZoneChangeCallback) -> bool {
        false
    }
}

/// Largest standard offset the engine accepts, in seconds.
pub const MAX_UTC_OFFSET_SECONDS: i32 = 24 * 3600;

/// `offset_seconds` as an `i32` if it is within a day of UTC.
pub fn check_utc_offset(offset_seconds: i64) -> DateMathResult<i32> {
    if offset_seconds.abs() > i64::from(MAX_UTC_OFFSET_SECONDS) {
        return Err(DateMathError::UtcOffsetOutOfRange(offset_seconds));
    }
    Ok(offset_seconds as i32)
}

// 2000-01-01T00:00:00Z and 2000-07-01T00:00:00Z
const JANUARY_2000: i64 = 946_684_800;
const JULY_2000: i64 = 962_409_600;

/// Standard offset of `zone`: the smaller of its January and July offsets.
///
/// One of the two dates falls in winter in either hemisphere.
fn standard_offset_in<Tz: TimeZone>(zone: &Tz) -> i32 {
    [JANUARY_2000, JULY_2000]
        .into_iter()
        .filter_map(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|utc| zone.offset_from_utc_datetime(&utc.naive_utc()).fix().local_minus_utc())
        .min()
        .unwrap_or(0)
}

fn breakdown_in<Tz: TimeZone>(zone: &Tz, epoch_seconds: i64) -> LocalBreakdown {
    let standard = standard_offset_in(zone);
    match zone.timestamp_opt(epoch_seconds, 0) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            let is_dst = dt.offset().fix().local_minus_utc() != standard;
            breakdown_of(&dt, is_dst)
        }
        LocalResult::None => LocalBreakdown::at_offset(epoch_seconds, standard),
    }
}

/// Zone abbreviation in effect at `epoch_seconds`, such as `AEST`.
fn abbreviation_in(zone: &chrono_tz::Tz, epoch_seconds: i64) -> Option<String> {
    zone.timestamp_opt(epoch_seconds, 0)
        .single()
        .map(|dt| dt.format("%Z").to_string())
}

/// The host clock and local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPlatform;

impl SystemPlatform {
    /// Create the system platform
    pub fn new() -> Self {
        Self
    }
}

impl TimePlatform for SystemPlatform {
    fn current_time_ms(&self) -> f64 {
        Utc::now().timestamp_micros() as f64 / 1000.0
    }

    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown {
        breakdown_in(&Local, epoch_seconds)
    }

    fn raw_utc_offset_seconds(&self) -> i32 {
        standard_offset_in(&Local)
    }

    fn time_zone_name(&self, epoch_seconds: i64) -> Option<String> {
        let id = iana_time_zone::get_timezone().ok()?;
        match id.parse::<chrono_tz::Tz>() {
            Ok(zone) => abbreviation_in(&zone, epoch_seconds).or(Some(id)),
            Err(_) => Some(id),
        }
    }
}

/// A named zone from the IANA database, independent of the host setting.
#[derive(Debug, Clone, Copy)]
pub struct ZonedPlatform {
    zone: chrono_tz::Tz,
    now_ms: Option<f64>,
}

impl ZonedPlatform {
    /// Compute in `zone`
    pub fn new(zone: chrono_tz::Tz) -> Self {
        Self { zone, now_ms: None }
    }

    /// Look `id` (e.g. `Australia/Sydney`) up in the zone database.
    pub fn from_name(id: &str) -> DateMathResult<Self> {
        id.parse::<chrono_tz::Tz>()
            .map(Self::new)
            .map_err(|_| DateMathError::UnknownTimeZone(id.to_string()))
    }

    /// Pin the clock at `now_ms`
    pub fn with_now(mut self, now_ms: f64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    /// The zone computed in
    pub fn zone(&self) -> chrono_tz::Tz {
        self.zone
    }
}

impl TimePlatform for ZonedPlatform {
    fn current_time_ms(&self) -> f64 {
        self.now_ms
            .unwrap_or_else(|| Utc::now().timestamp_micros() as f64 / 1000.0)
    }

    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown {
        breakdown_in(&self.zone, epoch_seconds)
    }

    fn raw_utc_offset_seconds(&self) -> i32 {
        standard_offset_in(&self.zone)
    }

    fn time_zone_name(&self, epoch_seconds: i64) -> Option<String> {
        abbreviation_in(&self.zone, epoch_seconds)
    }
}

fn breakdown_of<Tz: TimeZone>(dt: &DateTime<Tz>, is_dst: bool) -> LocalBreakdown {
    LocalBreakdown {
        year: dt.year(),
        month: dt.month0() as i32,
        day: dt.day() as i32,
        hour: dt.hour() as i32,
        minute: dt.minute() as i32,
        second: dt.second() as i32,
        week_day: dt.weekday().num_days_from_sunday() as i32,
        is_dst,
    }
}

/// A time zone with a constant offset and no daylight saving time.
///
/// The clock can be pinned, which makes every computation reproducible.
#[derive(Debug, Clone, Default)]
pub struct FixedOffsetPlatform {
    offset_seconds: i32,
    now_ms: Option<f64>,
    zone_name: Option<String>,
}

impl FixedOffsetPlatform {
    /// UTC with the real clock
    pub fn utc() -> Self {
        Self::default()
    }

    /// A zone `offset_seconds` east of UTC
    pub fn new(offset_seconds: i32) -> Self {
        Self {
            offset_seconds,
            ..Self::default()
        }
    }

    /// A zone `offset_seconds` east of UTC, rejecting offsets over a day.
    pub fn try_new(offset_seconds: i64) -> DateMathResult<Self> {
        check_utc_offset(offset_seconds).map(Self::new)
    }

    /// Pin the clock at `now_ms`
    pub fn with_now(mut self, now_ms: f64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    /// Report `name` as the zone name
    pub fn with_zone_name(mut self, name: impl Into<String>) -> Self {
        self.zone_name = Some(name.into());
        self
    }
}

impl TimePlatform for FixedOffsetPlatform {
    fn current_time_ms(&self) -> f64 {
        self.now_ms
            .unwrap_or_else(|| Utc::now().timestamp_micros() as f64 / 1000.0)
    }

    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown {
        LocalBreakdown::at_offset(epoch_seconds, self.offset_seconds)
    }

    fn raw_utc_offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    fn time_zone_name(&self, _epoch_seconds: i64) -> Option<String> {
        self.zone_name.clone()
    }
}
