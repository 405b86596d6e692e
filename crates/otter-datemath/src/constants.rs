//! Time unit constants and the fixed name tables used by the formatter.

/// Milliseconds in one second
pub const MS_PER_SECOND: f64 = 1000.0;
/// Milliseconds in one minute
pub const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
/// Milliseconds in one hour
pub const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
/// Milliseconds in one day
pub const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;
/// Seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 60.0 * SECONDS_PER_MINUTE;
/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;
/// Minutes in one hour
pub const MINUTES_PER_HOUR: f64 = 60.0;
/// Hours in one day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Largest magnitude a time value may have (ECMA-262 TimeClip)
pub const MAX_TIME_MS: f64 = 8.64e15;

/// 2037-12-31T00:00:00Z, the last instant handed to the host's local-time conversion.
pub const MAX_UNIX_TIME: f64 = 2_145_859_200.0;

/// Day of year for the first day of each month, non-leap then leap.
pub(crate) const FIRST_DAY_OF_MONTH: [[i32; 12]; 2] = [
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334],
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335],
];

/// Weekday names, Monday first. Index with `(week_day + 6) % 7`.
pub const WEEKDAY_NAME: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month names, January first.
pub const MONTH_NAME: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
