//! The date engine context.
//!
//! [`DateMath`] bundles the host platform, the UTC offset cache and the DST
//! window. One instance is shared by every date object of a runtime.

use std::fmt;
use std::sync::Arc;

use crate::calendar::{date_to_day_in_year, ms_to_year, time_clip, time_to_ms, ymdhms_to_seconds};
use crate::config::DateMathConfig;
use crate::constants::{MS_PER_DAY, MS_PER_SECOND, SECONDS_PER_MINUTE};
use crate::dst;
use crate::error::DateMathResult;
use crate::gregorian::GregorianDateTime;
use crate::parse::parse_date_fields;
use crate::platform::TimePlatform;
use crate::timezone::TimeZoneCache;

/// Calendar engine bound to a host platform.
pub struct DateMath {
    platform: Arc<dyn TimePlatform>,
    time_zone: Arc<TimeZoneCache>,
    min_dst_year: i32,
    config: DateMathConfig,
}

impl fmt::Debug for DateMath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateMath")
            .field("time_zone", &self.time_zone)
            .field("min_dst_year", &self.min_dst_year)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DateMath {
    /// Create an engine with the default configuration
    pub fn new(platform: Arc<dyn TimePlatform>) -> Self {
        Self::build(platform, DateMathConfig::default())
    }

    /// Create an engine with `config`, rejecting an unusable DST window.
    pub fn with_config(platform: Arc<dyn TimePlatform>, config: DateMathConfig) -> DateMathResult<Self> {
        config.validate()?;
        Ok(Self::build(platform, config))
    }

    fn build(platform: Arc<dyn TimePlatform>, config: DateMathConfig) -> Self {
        let time_zone = Arc::new(TimeZoneCache::new());

        if config.cache_utc_offset {
            let invalidator = time_zone.invalidator();
            if platform.watch_time_zone(Box::new(move || invalidator.invalidate())) {
                time_zone.enable(platform.as_ref());
            } else {
                tracing::debug!("host has no time zone notifications; UTC offset is not cached");
            }
        }

        let min_dst_year = config.min_dst_year.unwrap_or_else(|| {
            let now = platform.current_time_ms().floor();
            dst::minimum_year_for_dst(ms_to_year(now))
        });
        tracing::debug!(min_dst_year, "date engine initialized");

        Self {
            platform,
            time_zone,
            min_dst_year,
            config,
        }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &DateMathConfig {
        &self.config
    }

    /// The host platform
    pub fn platform(&self) -> &Arc<dyn TimePlatform> {
        &self.platform
    }

    /// The UTC offset cache
    pub fn time_zone(&self) -> &Arc<TimeZoneCache> {
        &self.time_zone
    }

    /// Current time in whole milliseconds
    pub fn current_utc_time(&self) -> f64 {
        self.current_utc_time_with_microseconds().floor()
    }

    /// Current time in milliseconds, fraction included
    pub fn current_utc_time_with_microseconds(&self) -> f64 {
        self.platform.current_time_ms()
    }

    /// Standard offset from UTC in milliseconds, DST excluded
    pub fn utc_offset(&self) -> f64 {
        f64::from(self.time_zone.utc_offset(self.platform.as_ref()))
    }

    /// DST offset in milliseconds for the UTC instant `ms`
    pub fn dst_offset(&self, ms: f64, utc_offset: f64) -> f64 {
        dst::dst_offset(ms, utc_offset, self.min_dst_year, self.platform.as_ref())
    }

    /// Map `year` into the DST window
    pub fn equivalent_year_for_dst(&self, year: i32) -> i32 {
        dst::equivalent_year_for_dst(year, self.min_dst_year)
    }

    /// First year of the DST window
    pub fn minimum_year_for_dst(&self) -> i32 {
        self.min_dst_year
    }

    /// Break the UTC instant `ms` down into UTC or local fields.
    ///
    /// Time values outside the representable range decompose to
    /// [`GregorianDateTime::invalid`].
    pub fn ms_to_gregorian_date_time(&self, ms: f64, output_is_utc: bool) -> GregorianDateTime {
        let ms = time_clip(ms);
        if ms.is_nan() {
            return GregorianDateTime::invalid();
        }

        if output_is_utc {
            return GregorianDateTime::from_wall_clock_ms(ms);
        }

        let utc_offset = self.utc_offset();
        let dst_offset = self.dst_offset(ms, utc_offset);

        let mut t = GregorianDateTime::from_wall_clock_ms(ms + dst_offset + utc_offset);
        t.is_dst = dst_offset != 0.0;
        t.utc_offset = ((dst_offset + utc_offset) / MS_PER_SECOND) as i32;
        t.time_zone = self
            .platform
            .time_zone_name((ms / MS_PER_SECOND).floor() as i64)
            .map(Arc::from);
        t
    }

    /// Encode broken-down fields plus `ms` milliseconds as a UTC instant.
    ///
    /// Local input has the standard offset removed first; DST is then
    /// looked up for the resulting instant.
    pub fn gregorian_date_time_to_ms(&self, t: &GregorianDateTime, ms: f64, input_is_utc: bool) -> f64 {
        if !t.is_valid() {
            return f64::NAN;
        }

        let day = date_to_day_in_year(t.full_year(), t.month, t.month_day);
        let time = time_to_ms(f64::from(t.hour), f64::from(t.minute), f64::from(t.second), ms);
        let mut result = day * MS_PER_DAY + time;

        if !input_is_utc {
            let utc_offset = self.utc_offset();
            result -= utc_offset;
            if result.is_finite() {
                result -= self.dst_offset(result, utc_offset);
            }
        }

        result
    }

    /// Parse a date string into a time value, NaN when it is not a date.
    ///
    /// Strings without a zone are read as local time.
    pub fn parse_date(&self, text: &str) -> f64 {
        let Some(parsed) = parse_date_fields(text) else {
            return f64::NAN;
        };

        match parsed.offset_minutes {
            Some(offset) => {
                let seconds = ymdhms_to_seconds(
                    parsed.year,
                    parsed.month as i32 + 1,
                    parsed.day,
                    parsed.hour,
                    parsed.minute,
                    parsed.second,
                );
                (seconds - offset as f64 * SECONDS_PER_MINUTE) * MS_PER_SECOND
            }
            None => {
                let year = parsed.year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
                let t = GregorianDateTime::new(
                    year.saturating_sub(1900),
                    parsed.month as i32,
                    parsed.day as i32,
                    parsed.hour as i32,
                    parsed.minute as i32,
                    parsed.second as i32,
                );
                self.gregorian_date_time_to_ms(&t, 0.0, false)
            }
        }
    }

    /// The current local time, broken down
    pub fn local_time_now(&self) -> GregorianDateTime {
        self.ms_to_gregorian_date_time(self.current_utc_time(), false)
    }
}
