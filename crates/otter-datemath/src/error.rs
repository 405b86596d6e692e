//! Date engine errors
//!
//! Invalid dates are not errors: they travel in-band as NaN. These cover
//! engine and platform construction only.

use thiserror::Error;

/// Errors raised while setting up a [`DateMath`](crate::DateMath)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateMathError {
    /// The DST window cannot hold a full 28-year cycle
    #[error("DST window {min_year}..={max_year} is narrower than 28 years")]
    DstWindowTooNarrow {
        /// Configured first year
        min_year: i32,
        /// Last year handed to the host
        max_year: i32,
    },

    /// Hosts cannot describe years before the epoch
    #[error("minimum DST year {0} is before 1970")]
    DstYearBeforeEpoch(i32),

    /// A fixed zone further than a day from UTC
    #[error("UTC offset of {0} seconds is more than 24 hours from UTC")]
    UtcOffsetOutOfRange(i64),

    /// Not a time zone id the zone database knows
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

/// Result alias for engine construction
pub type DateMathResult<T> = Result<T, DateMathError>;
