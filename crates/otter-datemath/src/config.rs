//! Engine configuration.
//!
//! Deserializable so embedders can keep it in their own config files:
//!
//! ```toml
//! [date]
//! cache_utc_offset = true
//! min_dst_year = 2000
//! ```

use serde::Deserialize;

use crate::dst::MAXIMUM_YEAR_FOR_DST;
use crate::error::{DateMathError, DateMathResult};

/// Tuning knobs for [`DateMath`](crate::DateMath).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateMathConfig {
    /// Cache the standard UTC offset when the host reports zone changes
    #[serde(default = "default_true")]
    pub cache_utc_offset: bool,

    /// First year of the DST window. Derived from the clock when unset.
    #[serde(default)]
    pub min_dst_year: Option<i32>,
}

fn default_true() -> bool {
    true
}

impl Default for DateMathConfig {
    fn default() -> Self {
        Self {
            cache_utc_offset: true,
            min_dst_year: None,
        }
    }
}

impl DateMathConfig {
    /// Pin the first year of the DST window
    pub fn with_min_dst_year(mut self, year: i32) -> Self {
        self.min_dst_year = Some(year);
        self
    }

    /// Recompute the UTC offset on every read
    pub fn without_utc_offset_cache(mut self) -> Self {
        self.cache_utc_offset = false;
        self
    }

    /// Check that a pinned DST window still spans 28 years after the epoch.
    pub fn validate(&self) -> DateMathResult<()> {
        let Some(min_year) = self.min_dst_year else {
            return Ok(());
        };
        if min_year < 1970 {
            return Err(DateMathError::DstYearBeforeEpoch(min_year));
        }
        if min_year > MAXIMUM_YEAR_FOR_DST - 27 {
            return Err(DateMathError::DstWindowTooNarrow {
                min_year,
                max_year: MAXIMUM_YEAR_FOR_DST,
            });
        }
        Ok(())
    }
}
