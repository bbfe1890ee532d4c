//! Minute-of-day codec for wall-clock "HH:mm" strings.
//!
//! The canonical storage and comparison form is an integer minute-of-day
//! in `[0, 1440)`. Parsing is strict: exactly two zero-padded digit pairs
//! separated by ':', hours `00`-`23`, minutes `00`-`59`.

use crate::domain::error::DomainError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parse a strict "HH:mm" string into a minute-of-day.
pub fn parse_hhmm(text: &str) -> Result<u16, DomainError> {
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(DomainError::invalid_time_format(text));
    }

    let pair = |hi: u8, lo: u8| -> Option<u16> {
        if hi.is_ascii_digit() && lo.is_ascii_digit() {
            Some(u16::from(hi - b'0') * 10 + u16::from(lo - b'0'))
        } else {
            None
        }
    };

    let (hours, minutes) = match (pair(bytes[0], bytes[1]), pair(bytes[3], bytes[4])) {
        (Some(h), Some(m)) => (h, m),
        _ => return Err(DomainError::invalid_time_format(text)),
    };

    if hours > 23 || minutes > 59 {
        return Err(DomainError::invalid_time_format(text));
    }

    Ok(hours * 60 + minutes)
}

/// Format a minute-of-day back into zero-padded "HH:mm".
///
/// Inverse of [`parse_hhmm`] over the full `[0, 1440)` domain.
pub fn format_hhmm(minute_of_day: u16) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_hhmm("00:00").unwrap(), 0);
        assert_eq!(parse_hhmm("09:00").unwrap(), 540);
        assert_eq!(parse_hhmm("09:30").unwrap(), 570);
        assert_eq!(parse_hhmm("23:59").unwrap(), 1439);
    }

    #[test]
    fn rejects_out_of_range_components() {
        for bad in ["24:00", "25:00", "99:99", "12:60", "12:99"] {
            assert!(parse_hhmm(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "9:00", "09:0", "0900", "09-00", "09:000", " 9:00", "ab:cd", "0a:00"] {
            assert!(parse_hhmm(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn format_is_zero_padded() {
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(540), "09:00");
        assert_eq!(format_hhmm(1439), "23:59");
    }

    #[test]
    fn round_trip_minute_to_text_to_minute() {
        for m in 0..MINUTES_PER_DAY {
            assert_eq!(parse_hhmm(&format_hhmm(m)).unwrap(), m);
        }
    }

    #[test]
    fn round_trip_text_to_minute_to_text() {
        for h in 0..24u16 {
            for min in 0..60u16 {
                let s = format!("{h:02}:{min:02}");
                assert_eq!(format_hhmm(parse_hhmm(&s).unwrap()), s);
            }
        }
    }
}
