//! Textual forms of broken-down time used by `Date.prototype`.

use crate::constants::{MONTH_NAME, WEEKDAY_NAME};
use crate::gregorian::GregorianDateTime;

/// Text for a time value that does not describe an instant
pub const INVALID_DATE: &str = "Invalid Date";

#[inline]
fn weekday_name(t: &GregorianDateTime) -> &'static str {
    WEEKDAY_NAME[(t.week_day + 6).rem_euclid(7) as usize]
}

#[inline]
fn month_name(t: &GregorianDateTime) -> &'static str {
    MONTH_NAME[t.month.rem_euclid(12) as usize]
}

/// `Www Mon dd yyyy`
pub fn format_date(t: &GregorianDateTime) -> String {
    if !t.is_valid() {
        return INVALID_DATE.to_string();
    }
    format!(
        "{} {} {:02} {:04}",
        weekday_name(t),
        month_name(t),
        t.month_day,
        t.full_year()
    )
}

/// `Www, dd Mon yyyy`
pub fn format_date_utc_variant(t: &GregorianDateTime) -> String {
    if !t.is_valid() {
        return INVALID_DATE.to_string();
    }
    format!(
        "{}, {:02} {} {:04}",
        weekday_name(t),
        t.month_day,
        month_name(t),
        t.full_year()
    )
}

/// `HH:MM:SS GMT` for UTC, else `HH:MM:SS GMT+HHMM (Zone)`.
///
/// The zone name is left out when unknown.
pub fn format_time(t: &GregorianDateTime, utc: bool) -> String {
    if !t.is_valid() {
        return INVALID_DATE.to_string();
    }
    if utc {
        return format!("{:02}:{:02}:{:02} GMT", t.hour, t.minute, t.second);
    }

    let sign = if t.utc_offset < 0 { '-' } else { '+' };
    let offset = t.utc_offset.unsigned_abs();
    let mut text = format!(
        "{:02}:{:02}:{:02} GMT{}{:02}{:02}",
        t.hour,
        t.minute,
        t.second,
        sign,
        offset / 3600,
        (offset / 60) % 60
    );
    if let Some(zone) = t.time_zone.as_deref().filter(|zone| !zone.is_empty()) {
        text.push_str(" (");
        text.push_str(zone);
        text.push(')');
    }
    text
}

/// Date and local time joined by a space, as `Date()` prints them
pub fn format_date_time(t: &GregorianDateTime) -> String {
    if !t.is_valid() {
        return INVALID_DATE.to_string();
    }
    format!("{} {}", format_date(t), format_time(t, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample() -> GregorianDateTime {
        // Saturday 2000-01-01 08:05:09
        let mut t = GregorianDateTime::from_wall_clock_ms(946_713_909_000.0);
        t.utc_offset = -(5 * 3600 + 30 * 60);
        t
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&sample()), "Sat Jan 01 2000");
        assert_eq!(format_date_utc_variant(&sample()), "Sat, 01 Jan 2000");
    }

    #[test]
    fn test_sunday_uses_last_name() {
        // 2000-01-02 is a Sunday
        let t = GregorianDateTime::from_wall_clock_ms(946_771_200_000.0);
        assert_eq!(t.week_day, 0);
        assert_eq!(format_date(&t), "Sun Jan 02 2000");
    }

    #[test]
    fn test_format_time() {
        let mut t = sample();
        assert_eq!(format_time(&t, true), "08:05:09 GMT");
        assert_eq!(format_time(&t, false), "08:05:09 GMT-0530");
        t.time_zone = Some(Arc::from("IST"));
        t.utc_offset = 5 * 3600 + 30 * 60;
        assert_eq!(format_time(&t, false), "08:05:09 GMT+0530 (IST)");
        assert_eq!(format_date_time(&t), "Sat Jan 01 2000 08:05:09 GMT+0530 (IST)");
    }

    #[test]
    fn test_invalid_date_text() {
        let t = GregorianDateTime::invalid();
        assert_eq!(format_date(&t), INVALID_DATE);
        assert_eq!(format_date_utc_variant(&t), INVALID_DATE);
        assert_eq!(format_time(&t, true), INVALID_DATE);
        assert_eq!(format_date_time(&t), INVALID_DATE);
    }
}
