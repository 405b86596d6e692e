//! # Otter Date Math
//!
//! Calendar arithmetic behind the JavaScript `Date` object.
//!
//! ## Design Principles
//!
//! - **Millisecond time values**: `f64` milliseconds since the epoch, NaN for invalid dates
//! - **Proleptic Gregorian**: Leap rules are applied to every year, past and future
//! - **Host behind a trait**: Clock and local-time rules come from a [`TimePlatform`]
//! - **No historical DST**: Instants are mapped into an equivalent year before asking the host
//!
//! ```
//! use std::sync::Arc;
//! use otter_datemath::{DateMath, FixedOffsetPlatform};
//!
//! let math = DateMath::new(Arc::new(FixedOffsetPlatform::utc()));
//! assert_eq!(math.parse_date("Sat, 01 Jan 2000 08:00:00 GMT"), 946_713_600_000.0);
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date_math;
pub mod dst;
pub mod error;
pub mod format;
pub mod gregorian;
pub mod parse;
pub mod platform;
pub mod timezone;

pub use calendar::time_clip;
pub use config::DateMathConfig;
pub use date_math::DateMath;
pub use error::{DateMathError, DateMathResult};
pub use format::{format_date, format_date_time, format_date_utc_variant, format_time};
pub use gregorian::GregorianDateTime;
pub use parse::{ParsedDate, parse_date_fields};
pub use platform::{FixedOffsetPlatform, LocalBreakdown, SystemPlatform, TimePlatform, ZonedPlatform};
pub use timezone::{TimeZoneCache, TimeZoneInvalidator};
