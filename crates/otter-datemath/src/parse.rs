//! Permissive date string scanner.
//!
//! Accepts the RFC 822/2822 layouts plus the loose forms scripts have long
//! relied on:
//!
//! ```text
//! Tuesday, 09-Nov-99 23:12:40 GMT
//! Sat, 01-Jan-2000 08:00:00 GMT
//! Sat, 01 Jan 2000 08:00:00 GMT
//! 01 Jan 99 22:00 +0100
//! [Wednesday] January 09 1999 23:12:40 GMT
//! [Wednesday] January 09 23:12:40 GMT 1999
//! 1999/01/09 23:12:40
//! 01/09/1999 11:12 PM
//! ```
//!
//! The weekday is ignored. Obsolete RFC 2822 zone names that are not in
//! [`KNOWN_ZONES`] are not accepted as zones.

/// A recognised zone abbreviation and its offset east of UTC in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownZone {
    /// Abbreviation, matched case-insensitively
    pub name: &'static str,
    /// Minutes east of UTC
    pub offset: i32,
}

/// Zone abbreviations understood by the parser.
pub const KNOWN_ZONES: [KnownZone; 10] = [
    KnownZone { name: "UT", offset: 0 },
    KnownZone { name: "GMT", offset: 0 },
    KnownZone { name: "EST", offset: -300 },
    KnownZone { name: "EDT", offset: -240 },
    KnownZone { name: "CST", offset: -360 },
    KnownZone { name: "CDT", offset: -300 },
    KnownZone { name: "MST", offset: -420 },
    KnownZone { name: "MDT", offset: -360 },
    KnownZone { name: "PST", offset: -480 },
    KnownZone { name: "PDT", offset: -420 },
];

const MONTH_HAYSTACK: &[u8] = b"janfebmaraprmayjunjulaugsepoctnovdec";

/// Fields recovered from a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    /// Full year, two-digit years already widened
    pub year: i64,
    /// Month, 0..=11
    pub month: i64,
    /// Day of month
    pub day: i64,
    /// Hour, 0..=23
    pub hour: i64,
    /// Minute, 0..=59
    pub minute: i64,
    /// Second, 0..=59
    pub second: i64,
    /// Minutes east of UTC, `None` when the string named no zone
    pub offset_minutes: Option<i64>,
}

/// `isspace` in the C locale, which includes vertical tab.
#[inline]
fn is_ascii_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t'..=b'\r')
}

struct Scanner<'a> {
    bytes: &'a [u8],
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        // Like a C string, an embedded NUL ends the input
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self { bytes: &bytes[..end] }
    }

    /// Byte at `pos`, or 0 past the end
    #[inline]
    fn at(&self, pos: usize) -> u8 {
        self.bytes.get(pos).copied().unwrap_or(0)
    }

    #[inline]
    fn is_end(&self, pos: usize) -> bool {
        pos >= self.bytes.len()
    }

    /// Skip whitespace and parenthesised comments, which may nest.
    fn skip_spaces_and_comments(&self, mut pos: usize) -> usize {
        let mut nesting = 0usize;
        while !self.is_end(pos) {
            let ch = self.at(pos);
            if !is_ascii_space(ch) {
                if ch == b'(' {
                    nesting += 1;
                } else if ch == b')' && nesting > 0 {
                    nesting -= 1;
                } else if nesting == 0 {
                    break;
                }
            }
            pos += 1;
        }
        pos
    }

    /// Month index for the three letters at `pos`, matched case-insensitively.
    fn find_month(&self, pos: usize) -> Option<i64> {
        let needle = self.bytes.get(pos..pos + 3)?;
        let needle = [
            needle[0].to_ascii_lowercase(),
            needle[1].to_ascii_lowercase(),
            needle[2].to_ascii_lowercase(),
        ];
        MONTH_HAYSTACK
            .windows(3)
            .position(|window| window == needle)
            .filter(|position| position % 3 == 0)
            .map(|position| (position / 3) as i64)
    }

    /// `strtol` in base 10: returns the value and the position after it.
    ///
    /// When no digits follow, the position is `pos` itself. Overflow
    /// saturates at `i64::MAX`/`i64::MIN`.
    fn parse_long(&self, pos: usize) -> (i64, usize) {
        let mut cursor = pos;
        while is_ascii_space(self.at(cursor)) && !self.is_end(cursor) {
            cursor += 1;
        }
        let negative = match self.at(cursor) {
            b'-' => {
                cursor += 1;
                true
            }
            b'+' => {
                cursor += 1;
                false
            }
            _ => false,
        };

        let digits_start = cursor;
        let mut value: i64 = 0;
        let mut overflowed = false;
        while self.at(cursor).is_ascii_digit() {
            let digit = i64::from(self.at(cursor) - b'0');
            match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(next) => value = next,
                None => overflowed = true,
            }
            cursor += 1;
        }

        if cursor == digits_start {
            return (0, pos);
        }
        let value = match (overflowed, negative) {
            (true, true) => i64::MIN,
            (true, false) => i64::MAX,
            (false, true) => -value,
            (false, false) => value,
        };
        (value, cursor)
    }

    /// Like [`parse_long`](Self::parse_long) but fails on no digits or overflow.
    fn parse_long_checked(&self, pos: usize) -> Option<(i64, usize)> {
        let (value, end) = self.parse_long(pos);
        if end == pos || value == i64::MAX || value == i64::MIN {
            return None;
        }
        Some((value, end))
    }

    fn starts_with_ignore_case(&self, pos: usize, pattern: &str) -> bool {
        self.bytes
            .get(pos..pos + pattern.len())
            .is_some_and(|slice| slice.eq_ignore_ascii_case(pattern.as_bytes()))
    }
}

/// Scan `text` into date fields. Returns `None` when it is not a date.
pub fn parse_date_fields(text: &str) -> Option<ParsedDate> {
    let s = Scanner::new(text);

    let mut pos = s.skip_spaces_and_comments(0);

    let mut month: i64 = -1;
    let mut word_start = pos;
    // Leading words: weekday and/or month name
    while !s.is_end(pos) && !s.at(pos).is_ascii_digit() {
        let ch = s.at(pos);
        if is_ascii_space(ch) || ch == b'(' {
            if pos - word_start >= 3 {
                month = s.find_month(word_start).unwrap_or(-1);
            }
            pos = s.skip_spaces_and_comments(pos);
            word_start = pos;
        } else {
            pos += 1;
        }
    }

    // Missing delimiter between month and day ("January29")
    if month == -1 && word_start != pos {
        month = s.find_month(word_start).unwrap_or(-1);
    }

    pos = s.skip_spaces_and_comments(pos);

    if s.is_end(pos) {
        return None;
    }

    // ' 09-Nov-99 23:12:40 GMT'
    let (mut day, mut new_pos) = s.parse_long_checked(pos)?;
    pos = new_pos;

    if s.is_end(pos) || day < 0 {
        return None;
    }

    let mut year: i64 = 0;
    if day > 31 {
        // YYYY/MM/DD
        if s.at(pos) != b'/' {
            return None;
        }
        pos += 1;
        if s.is_end(pos) {
            return None;
        }
        year = day;
        let (parsed_month, end) = s.parse_long_checked(pos)?;
        month = parsed_month - 1;
        pos = end;
        let separator = s.at(pos);
        pos += 1;
        if separator != b'/' || s.is_end(pos) {
            return None;
        }
        (day, new_pos) = s.parse_long_checked(pos)?;
        pos = new_pos;
    } else if s.at(pos) == b'/' && month == -1 {
        // MM/DD/YYYY
        pos += 1;
        month = day - 1;
        (day, new_pos) = s.parse_long_checked(pos)?;
        if !(1..=31).contains(&day) {
            return None;
        }
        pos = new_pos;
        if s.at(pos) == b'/' {
            pos += 1;
        }
        if s.is_end(pos) {
            return None;
        }
    } else {
        if s.at(pos) == b'-' {
            pos += 1;
        }

        pos = s.skip_spaces_and_comments(pos);

        if s.at(pos) == b',' {
            pos += 1;
        }

        if month == -1 {
            month = s.find_month(pos)?;

            while !s.is_end(pos) && !matches!(s.at(pos), b'-' | b',') && !is_ascii_space(s.at(pos)) {
                pos += 1;
            }

            if s.is_end(pos) {
                return None;
            }

            // '-99 23:12:40 GMT'
            if !matches!(s.at(pos), b'-' | b'/' | b',') && !is_ascii_space(s.at(pos)) {
                return None;
            }
            pos += 1;
        }
    }

    if !(0..=11).contains(&month) {
        return None;
    }

    // '99 23:12:40 GMT'
    if year <= 0 && !s.is_end(pos) {
        (year, new_pos) = s.parse_long_checked(pos)?;
    }

    // Don't fail if the time is missing
    let mut hour: i64 = 0;
    let mut minute: i64 = 0;
    let mut second: i64 = 0;
    if s.is_end(new_pos) {
        pos = new_pos;
    } else {
        // ' 23:12:40 GMT'
        if !(is_ascii_space(s.at(new_pos)) || s.at(new_pos) == b',') {
            if s.at(new_pos) != b':' {
                return None;
            }
            // There was no year; the number was the hour
            year = -1;
        } else {
            new_pos += 1;
            pos = s.skip_spaces_and_comments(new_pos);
        }

        // Keep going without a number, this might be a zone name
        (hour, new_pos) = s.parse_long(pos);

        if new_pos != pos {
            pos = new_pos;

            if !(0..=23).contains(&hour) || s.is_end(pos) {
                return None;
            }

            // ':12:40 GMT'
            let separator = s.at(pos);
            pos += 1;
            if separator != b':' {
                return None;
            }

            (minute, new_pos) = s.parse_long_checked(pos)?;
            pos = new_pos;

            if !(0..=59).contains(&minute) {
                return None;
            }

            // ':40 GMT'
            if !s.is_end(pos) && s.at(pos) != b':' && !is_ascii_space(s.at(pos)) {
                return None;
            }

            // Seconds are optional in RFC 822 and RFC 2822
            if s.at(pos) == b':' {
                pos += 1;

                (second, new_pos) = s.parse_long_checked(pos)?;
                pos = new_pos;

                if !(0..=59).contains(&second) {
                    return None;
                }
            }

            pos = s.skip_spaces_and_comments(pos);

            if s.starts_with_ignore_case(pos, "AM") {
                if hour > 12 {
                    return None;
                }
                if hour == 12 {
                    hour = 0;
                }
                pos = s.skip_spaces_and_comments(pos + 2);
            } else if s.starts_with_ignore_case(pos, "PM") {
                if hour > 12 {
                    return None;
                }
                if hour != 12 {
                    hour += 12;
                }
                pos = s.skip_spaces_and_comments(pos + 2);
            }
        }
    }

    let mut have_tz = false;
    let mut offset: i64 = 0;

    // Don't fail if the time zone is missing, plenty of sites omit it
    if !s.is_end(pos) {
        if s.starts_with_ignore_case(pos, "GMT") || s.starts_with_ignore_case(pos, "UTC") {
            pos += 3;
            have_tz = true;
        }

        if matches!(s.at(pos), b'+' | b'-') {
            let (raw, end) = s.parse_long_checked(pos)?;
            pos = end;

            if !(-9959..=9959).contains(&raw) {
                return None;
            }

            let sign = if raw < 0 { -1 } else { 1 };
            let raw = raw.abs();
            if s.at(pos) == b':' {
                // GMT+05:00
                let (minutes, end) = s.parse_long_checked(pos + 1)?;
                pos = end;
                offset = (raw * 60 + minutes) * sign;
            } else {
                offset = ((raw / 100) * 60 + raw % 100) * sign;
            }
            have_tz = true;
        } else if let Some(zone) = KNOWN_ZONES
            .iter()
            .find(|zone| s.starts_with_ignore_case(pos, zone.name))
        {
            offset = i64::from(zone.offset);
            pos += zone.name.len();
            have_tz = true;
        }
    }

    pos = s.skip_spaces_and_comments(pos);

    if !s.is_end(pos) && year == -1 {
        (year, new_pos) = s.parse_long_checked(pos)?;
        pos = new_pos;
    }

    pos = s.skip_spaces_and_comments(pos);

    // Trailing garbage
    if !s.is_end(pos) {
        return None;
    }

    // Y2K: two-digit years
    if (0..100).contains(&year) {
        year += if year < 50 { 2000 } else { 1900 };
    }

    Some(ParsedDate {
        year,
        month,
        day,
        hour,
        minute,
        second,
        offset_minutes: have_tz.then_some(offset),
    })
}
