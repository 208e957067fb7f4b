//! Schedule data model: days, intervals, validated schedules, and the raw
//! form input they are built from.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::TimeOfDay;

// ── DayOfWeek ───────────────────────────────────────────────────────────────

/// A calendar day of the week. Declaration order is the canonical order
/// (Monday first) and is what `Ord` compares.
///
/// Serializes as the lowercase English name and deserializes through
/// [`FromStr`], so `"Monday"` and `"monday"` are both accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in canonical order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Position in canonical order, Monday = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown day of week: '{0}'")]
pub struct UnknownDayError(pub String);

impl FromStr for DayOfWeek {
    type Err = UnknownDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDayError(s.to_string()))
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = UnknownDayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        DayOfWeek::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(d: DayOfWeek) -> Self {
        match d {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

// ── AvailabilityInterval ────────────────────────────────────────────────────

/// One recurring block of availability: `[start, end)` on a day of the week.
///
/// Serializes with the same field names as the form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInterval {
    pub day_of_week: DayOfWeek,
    #[serde(rename = "startTime")]
    pub start: TimeOfDay,
    #[serde(rename = "endTime")]
    pub end: TimeOfDay,
}

impl AvailabilityInterval {
    /// True when both intervals fall on the same day and each starts strictly
    /// before the other ends. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &AvailabilityInterval) -> bool {
        self.day_of_week == other.day_of_week && self.start < other.end && other.start < self.end
    }

    /// Whether `time` lies in `[start, end)`.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }

    /// Length in minutes. Zero for an inverted interval.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

// ── Raw form input ──────────────────────────────────────────────────────────

/// One availability row as entered in the form, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInput {
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityInput {
    pub fn new(
        day_of_week: DayOfWeek,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl From<&AvailabilityInterval> for AvailabilityInput {
    fn from(interval: &AvailabilityInterval) -> Self {
        Self {
            day_of_week: interval.day_of_week,
            start_time: interval.start.to_string(),
            end_time: interval.end.to_string(),
        }
    }
}

/// The complete form payload: a timezone name plus availability rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    pub timezone: String,
    #[serde(default)]
    pub availabilities: Vec<AvailabilityInput>,
}

// ── Schedule ────────────────────────────────────────────────────────────────

/// A validated weekly availability schedule.
///
/// Only [`validate`](crate::validate::validate) constructs one, so every
/// `Schedule` has a recognized timezone and non-empty, non-overlapping
/// intervals. Deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleInput")]
pub struct Schedule {
    timezone: Tz,
    availabilities: Vec<AvailabilityInterval>,
}

impl Schedule {
    pub(crate) fn new(timezone: Tz, availabilities: Vec<AvailabilityInterval>) -> Self {
        Self {
            timezone,
            availabilities,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn availabilities(&self) -> &[AvailabilityInterval] {
        &self.availabilities
    }

    /// Intervals on `day`, in stored order.
    pub fn for_day(&self, day: DayOfWeek) -> impl Iterator<Item = &AvailabilityInterval> {
        self.availabilities
            .iter()
            .filter(move |i| i.day_of_week == day)
    }

    pub fn is_empty(&self) -> bool {
        self.availabilities.is_empty()
    }

    pub(crate) fn availabilities_mut(&mut self) -> &mut Vec<AvailabilityInterval> {
        &mut self.availabilities
    }
}

impl TryFrom<ScheduleInput> for Schedule {
    type Error = ValidationError;

    fn try_from(input: ScheduleInput) -> Result<Self, Self::Error> {
        crate::validate::validate(&input.timezone, &input.availabilities)
    }
}

impl From<&Schedule> for ScheduleInput {
    fn from(schedule: &Schedule) -> Self {
        Self {
            timezone: schedule.timezone.name().to_string(),
            availabilities: schedule.availabilities.iter().map(Into::into).collect(),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::encode;
    use proptest::prelude::*;

    fn interval(day: DayOfWeek, start: &str, end: &str) -> AvailabilityInterval {
        AvailabilityInterval {
            day_of_week: day,
            start: encode(start).unwrap(),
            end: encode(end).unwrap(),
        }
    }

    // ── DayOfWeek ───────────────────────────────────────────────────────

    #[test]
    fn test_canonical_order_starts_monday() {
        assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Monday);
        assert_eq!(DayOfWeek::ALL[6], DayOfWeek::Sunday);
        assert!(DayOfWeek::Monday < DayOfWeek::Sunday);
        for (i, day) in DayOfWeek::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
    }

    #[test]
    fn test_day_parse_and_display() {
        assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("Friday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Friday);
        assert_eq!(DayOfWeek::Sunday.to_string(), "sunday");
        let err = "funday".parse::<DayOfWeek>().unwrap_err();
        assert!(err.to_string().contains("funday"));
    }

    #[test]
    fn test_day_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&DayOfWeek::Wednesday).unwrap(),
            "\"wednesday\""
        );
        assert_eq!(
            serde_json::from_str::<DayOfWeek>("\"Monday\"").unwrap(),
            DayOfWeek::Monday
        );
        assert_eq!(
            serde_json::from_str::<DayOfWeek>("\"SUNDAY\"").unwrap(),
            DayOfWeek::Sunday
        );
        let err = serde_json::from_str::<DayOfWeek>("\"Wed\"").unwrap_err();
        assert!(err.to_string().contains("Unknown day of week"), "got: {err}");
    }

    #[test]
    fn test_day_serde_agrees_with_from_str() {
        for text in ["monday", "Tuesday", "wEdNeSdAy", "funday", ""] {
            let parsed = text.parse::<DayOfWeek>().ok();
            let deserialized = serde_json::from_value::<DayOfWeek>(serde_json::json!(text)).ok();
            assert_eq!(parsed, deserialized, "input {text:?}");
        }
    }

    #[test]
    fn test_day_weekday_conversion() {
        for day in DayOfWeek::ALL {
            assert_eq!(DayOfWeek::from(Weekday::from(day)), day);
        }
        assert_eq!(DayOfWeek::from(Weekday::Sun), DayOfWeek::Sunday);
    }

    // ── AvailabilityInterval ────────────────────────────────────────────

    #[test]
    fn test_overlap_contained() {
        let a = interval(DayOfWeek::Monday, "09:00", "10:00");
        let b = interval(DayOfWeek::Monday, "09:30", "09:45");
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = interval(DayOfWeek::Monday, "09:00", "10:00");
        let b = interval(DayOfWeek::Monday, "10:00", "11:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_different_days_never_overlap() {
        let a = interval(DayOfWeek::Monday, "09:00", "17:00");
        let b = interval(DayOfWeek::Tuesday, "09:00", "17:00");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contains_is_half_open() {
        let a = interval(DayOfWeek::Monday, "09:00", "10:00");
        assert!(a.contains(encode("09:00").unwrap()));
        assert!(a.contains(encode("09:59").unwrap()));
        assert!(!a.contains(encode("10:00").unwrap()));
        assert_eq!(a.duration_minutes(), 60);
    }

    #[test]
    fn test_interval_serializes_like_form_row() {
        let a = interval(DayOfWeek::Thursday, "13:00", "14:30");
        let json = serde_json::to_value(a).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dayOfWeek": "thursday", "startTime": "13:00", "endTime": "14:30"})
        );
    }

    // ── Schedule serde ──────────────────────────────────────────────────

    #[test]
    fn test_schedule_deserialize_validates() {
        let ok: Schedule = serde_json::from_str(
            r#"{"timezone":"Europe/Berlin","availabilities":[
                {"dayOfWeek":"monday","startTime":"09:00","endTime":"12:00"}]}"#,
        )
        .unwrap();
        assert_eq!(ok.timezone(), chrono_tz::Europe::Berlin);
        assert_eq!(ok.availabilities().len(), 1);

        let bad = serde_json::from_str::<Schedule>(
            r#"{"timezone":"Europe/Berlin","availabilities":[
                {"dayOfWeek":"monday","startTime":"12:00","endTime":"09:00"}]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_schedule_round_trips_through_input() {
        let input = ScheduleInput {
            timezone: "Asia/Tokyo".to_string(),
            availabilities: vec![AvailabilityInput::new(DayOfWeek::Friday, "08:00", "08:30")],
        };
        let schedule = Schedule::try_from(input.clone()).unwrap();
        assert_eq!(ScheduleInput::from(&schedule), input);

        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }

    // ── properties ──────────────────────────────────────────────────────

    fn arb_interval() -> impl Strategy<Value = AvailabilityInterval> {
        (0usize..7, 0u16..1439).prop_flat_map(|(day, start)| {
            (start + 1..=1439).prop_map(move |end| AvailabilityInterval {
                day_of_week: DayOfWeek::ALL[day],
                start: TimeOfDay::from_minutes(start).unwrap(),
                end: TimeOfDay::from_minutes(end).unwrap(),
            })
        })
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_interval(), b in arb_interval()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_interval_overlaps_itself(a in arb_interval()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
