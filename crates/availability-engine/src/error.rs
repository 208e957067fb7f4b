//! Error types for availability schedule operations.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::DayOfWeek;
use crate::time::TimeOfDay;

/// Why a time string was rejected by [`encode`](crate::time::encode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Not of the form `HH:MM` with two ASCII digits on each side.
    Pattern,
    HourOutOfRange,
    MinuteOutOfRange,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MalformedReason::Pattern => "expected zero-padded HH:MM",
            MalformedReason::HourOutOfRange => "hour must be between 00 and 23",
            MalformedReason::MinuteOutOfRange => "minute must be between 00 and 59",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed time '{value}': {reason}")]
pub struct MalformedTimeError {
    pub value: String,
    pub reason: MalformedReason,
}

/// Which time field of an availability entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl TimeField {
    /// The field name used by the form payload.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeField::Start => "startTime",
            TimeField::End => "endTime",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time string that failed to parse, located in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTimeError {
    pub index: usize,
    pub field: TimeField,
    pub error: MalformedTimeError,
}

/// An entry whose start is not strictly before its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInterval {
    pub index: usize,
    pub day_of_week: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Two entries on the same day whose intervals overlap. `first < second`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub day_of_week: DayOfWeek,
    pub first: usize,
    pub second: usize,
}

/// A rejected schedule.
///
/// Validation stops at the first failing category, in declaration order of
/// these variants. Within a category every offending entry is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid timezone: '{0}'")]
    InvalidTimezone(String),

    #[error("Malformed time: {}", describe_malformed(.0))]
    MalformedTime(Vec<EntryTimeError>),

    #[error("Invalid interval: {}", describe_invalid(.0))]
    InvalidInterval(Vec<InvalidInterval>),

    #[error("Overlapping intervals: {}", describe_overlaps(.0))]
    OverlappingIntervals(Vec<Overlap>),
}

fn describe_malformed(errors: &[EntryTimeError]) -> String {
    errors
        .iter()
        .map(|e| format!("entry {} {}: {}", e.index, e.field, e.error))
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_invalid(intervals: &[InvalidInterval]) -> String {
    intervals
        .iter()
        .map(|i| {
            format!(
                "entry {} ({} {}-{}) must start before it ends",
                i.index, i.day_of_week, i.start, i.end
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_overlaps(overlaps: &[Overlap]) -> String {
    overlaps
        .iter()
        .map(|o| format!("entries {} and {} on {}", o.first, o.second, o.day_of_week))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A user-facing message attached to a form field path such as
/// `"availabilities.2.startTime"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

impl FieldMessage {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ValidationError {
    /// Map each reported issue to the form field it belongs to.
    ///
    /// Overlaps produce one message per involved entry, each naming the other.
    pub fn form_messages(&self) -> Vec<FieldMessage> {
        match self {
            ValidationError::InvalidTimezone(tz) if tz.is_empty() => {
                vec![FieldMessage::new("timezone", "Timezone is required")]
            }
            ValidationError::InvalidTimezone(tz) => {
                vec![FieldMessage::new(
                    "timezone",
                    format!("'{tz}' is not a recognized timezone"),
                )]
            }
            ValidationError::MalformedTime(errors) => errors
                .iter()
                .map(|e| {
                    FieldMessage::new(
                        format!("availabilities.{}.{}", e.index, e.field),
                        format!("'{}' is not a valid time ({})", e.error.value, e.error.reason),
                    )
                })
                .collect(),
            ValidationError::InvalidInterval(intervals) => intervals
                .iter()
                .map(|i| {
                    FieldMessage::new(
                        format!("availabilities.{}.endTime", i.index),
                        "End time must be after start time",
                    )
                })
                .collect(),
            ValidationError::OverlappingIntervals(overlaps) => overlaps
                .iter()
                .flat_map(|o| {
                    [(o.first, o.second), (o.second, o.first)].map(|(this, other)| {
                        FieldMessage::new(
                            format!("availabilities.{this}"),
                            format!(
                                "Overlaps with another availability on {} (entry {other})",
                                o.day_of_week
                            ),
                        )
                    })
                })
                .collect(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
