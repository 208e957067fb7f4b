//! Wall-clock times of day with minute resolution.
//!
//! A [`TimeOfDay`] is a count of minutes since midnight (`0..=1439`). The only
//! textual form is the zero-padded 24-hour `"HH:MM"` string: [`encode`] parses
//! it and [`decode`] produces it. Every comparison between times goes through
//! the integer value, never through the text, so `"09:00" < "10:00"` and
//! `"9:00"` is simply rejected instead of sorting after `"10:00"`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MalformedReason, MalformedTimeError};

/// Number of minutes in a day. Valid [`TimeOfDay`] values are strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute resolution, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// 00:00.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// 23:59, the latest representable time.
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY - 1);

    /// Build from minutes since midnight. `None` if `minutes >= 1440`.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(TimeOfDay(minutes))
        } else {
            None
        }
    }

    /// Build from an hour (0-23) and minute (0-59).
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// The same wall-clock time as a chrono [`NaiveTime`].
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + chrono::Duration::minutes(i64::from(self.0))
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds and sub-second precision.
    fn from(t: NaiveTime) -> Self {
        TimeOfDay((t.hour() * 60 + t.minute()) as u16)
    }
}

/// Parse a zero-padded 24-hour `"HH:MM"` string.
///
/// # Errors
///
/// Returns [`MalformedTimeError`] if the text is not exactly two digits, a
/// colon, and two digits, or if the hour is above 23 or the minute above 59.
///
/// # Examples
///
/// ```
/// use availability_engine::time::encode;
///
/// assert_eq!(encode("09:30").unwrap().minutes(), 570);
/// assert!(encode("9:30").is_err());
/// assert!(encode("24:00").is_err());
/// ```
pub fn encode(text: &str) -> Result<TimeOfDay, MalformedTimeError> {
    let malformed = |reason| MalformedTimeError {
        value: text.to_string(),
        reason,
    };

    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(malformed(MalformedReason::Pattern));
    }

    let digit = |i: usize| bytes[i] - b'0';
    let hour = digit(0) * 10 + digit(1);
    let minute = digit(3) * 10 + digit(4);

    if hour > 23 {
        return Err(malformed(MalformedReason::HourOutOfRange));
    }
    if minute > 59 {
        return Err(malformed(MalformedReason::MinuteOutOfRange));
    }

    Ok(TimeOfDay(u16::from(hour) * 60 + u16::from(minute)))
}

/// Format as a zero-padded `"HH:MM"` string. Inverse of [`encode`].
pub fn decode(time: TimeOfDay) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

impl FromStr for TimeOfDay {
    type Err = MalformedTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encode(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        encode(&s).map_err(serde::de::Error::custom)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── encode tests ────────────────────────────────────────────────────

    #[test]
    fn test_encode_midnight_and_last_minute() {
        assert_eq!(encode("00:00").unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(encode("23:59").unwrap(), TimeOfDay::LAST_MINUTE);
        assert_eq!(TimeOfDay::LAST_MINUTE.minutes(), 1439);
    }

    #[test]
    fn test_encode_components() {
        let t = encode("14:05").unwrap();
        assert_eq!(t.minutes(), 845);
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 5);
    }

    #[test]
    fn test_encode_rejects_unpadded_hour() {
        let err = encode("9:00").unwrap_err();
        assert_eq!(err.reason, MalformedReason::Pattern);
        assert_eq!(err.value, "9:00");
    }

    #[test]
    fn test_encode_rejects_seconds_and_whitespace() {
        for text in ["09:00:00", " 09:00", "09:00 ", "", "0900", "09-00", "ab:cd", "+9:00"] {
            let err = encode(text).unwrap_err();
            assert_eq!(err.reason, MalformedReason::Pattern, "input {text:?}");
        }
    }

    #[test]
    fn test_encode_rejects_hour_out_of_range() {
        let err = encode("24:00").unwrap_err();
        assert_eq!(err.reason, MalformedReason::HourOutOfRange);
        assert!(err.to_string().contains("24:00"), "got: {err}");
    }

    #[test]
    fn test_encode_rejects_minute_out_of_range() {
        let err = encode("12:60").unwrap_err();
        assert_eq!(err.reason, MalformedReason::MinuteOutOfRange);
    }

    #[test]
    fn test_encode_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(encode("٠٩:٠٠").is_err());
    }

    // ── decode / conversions ────────────────────────────────────────────

    #[test]
    fn test_decode_zero_pads() {
        assert_eq!(decode(TimeOfDay::from_hm(7, 5).unwrap()), "07:05");
        assert_eq!(decode(TimeOfDay::MIDNIGHT), "00:00");
        assert_eq!(TimeOfDay::from_minutes(61).unwrap().to_string(), "01:01");
    }

    #[test]
    fn test_constructors_reject_out_of_range() {
        assert!(TimeOfDay::from_minutes(1440).is_none());
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(23, 60).is_none());
    }

    #[test]
    fn test_naive_time_conversion() {
        let t = encode("18:45").unwrap();
        let naive = t.to_naive_time();
        assert_eq!(naive, NaiveTime::from_hms_opt(18, 45, 0).unwrap());
        assert_eq!(TimeOfDay::from(naive), t);

        let with_seconds = NaiveTime::from_hms_opt(18, 45, 59).unwrap();
        assert_eq!(TimeOfDay::from(with_seconds), t);
    }

    #[test]
    fn test_serde_as_string() {
        let t = encode("08:15").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"08:15\"");
        let back: TimeOfDay = serde_json::from_str("\"08:15\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"8:15\"").is_err());
    }

    // ── properties ──────────────────────────────────────────────────────

    proptest! {
        /// Every valid "HH:MM" survives encode then decode unchanged.
        #[test]
        fn prop_round_trip(hour in 0u8..24, minute in 0u8..60) {
            let text = format!("{hour:02}:{minute:02}");
            prop_assert_eq!(decode(encode(&text).unwrap()), text);
        }

        /// Every minute value maps to a string that parses back to it.
        #[test]
        fn prop_minutes_bijective(minutes in 0u16..MINUTES_PER_DAY) {
            let t = TimeOfDay::from_minutes(minutes).unwrap();
            prop_assert_eq!(encode(&decode(t)).unwrap(), t);
        }

        /// Integer order matches chronological (hour, minute) order.
        #[test]
        fn prop_order_is_chronological(
            h1 in 0u8..24, m1 in 0u8..60,
            h2 in 0u8..24, m2 in 0u8..60,
        ) {
            let a = encode(&format!("{h1:02}:{m1:02}")).unwrap();
            let b = encode(&format!("{h2:02}:{m2:02}")).unwrap();
            prop_assert_eq!(a < b, (h1, m1) < (h2, m2));
        }

        /// Out-of-range hours are always rejected.
        #[test]
        fn prop_rejects_large_hours(hour in 24u8..100, minute in 0u8..60) {
            let text = format!("{hour:02}:{minute:02}");
            prop_assert!(encode(&text).is_err());
        }
    }
}
