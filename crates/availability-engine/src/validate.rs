//! Turn raw form input into a [`Schedule`], or explain why it cannot be one.
//!
//! Checks run in a fixed order and stop at the first failing category:
//!
//! 1. the timezone is a recognized IANA name
//! 2. every start and end time parses as `HH:MM`
//! 3. every interval starts strictly before it ends
//! 4. no two intervals on the same day overlap
//!
//! Within a category every offending entry is reported, so a form can show
//! all of them at once. Nothing is corrected or dropped silently.

use chrono_tz::Tz;

use crate::error::{EntryTimeError, InvalidInterval, Overlap, TimeField, ValidationError};
use crate::model::{AvailabilityInput, AvailabilityInterval, DayOfWeek, Schedule};
use crate::time::encode;

/// Validate a timezone and a list of availability rows.
///
/// The returned [`Schedule`] keeps the input order; use
/// [`normalize`](crate::normalize::normalize) for the canonical order.
///
/// # Errors
///
/// - [`ValidationError::InvalidTimezone`] if `timezone` is empty or unknown
/// - [`ValidationError::MalformedTime`] for every unparseable time field
/// - [`ValidationError::InvalidInterval`] for every entry with `start >= end`
/// - [`ValidationError::OverlappingIntervals`] for every overlapping same-day pair
///
/// # Examples
///
/// ```
/// use availability_engine::{validate, AvailabilityInput, DayOfWeek};
///
/// let rows = vec![
///     AvailabilityInput::new(DayOfWeek::Monday, "09:00", "10:00"),
///     AvailabilityInput::new(DayOfWeek::Monday, "10:00", "11:00"),
/// ];
/// let schedule = validate("America/New_York", &rows).unwrap();
/// assert_eq!(schedule.availabilities().len(), 2);
/// ```
pub fn validate(
    timezone: &str,
    availabilities: &[AvailabilityInput],
) -> Result<Schedule, ValidationError> {
    let result = validate_inner(timezone, availabilities);
    match &result {
        Ok(schedule) => tracing::debug!(
            timezone,
            entries = schedule.availabilities().len(),
            "availability schedule accepted"
        ),
        Err(e) => tracing::debug!(timezone, error = %e, "availability schedule rejected"),
    }
    result
}

fn validate_inner(
    timezone: &str,
    availabilities: &[AvailabilityInput],
) -> Result<Schedule, ValidationError> {
    let tz = parse_timezone(timezone)?;
    let intervals = decode_entries(availabilities)?;
    check_ordering(&intervals)?;
    check_overlaps(&intervals)?;
    Ok(Schedule::new(tz, intervals))
}

/// Parse an IANA timezone name into `Tz`.
fn parse_timezone(s: &str) -> Result<Tz, ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::InvalidTimezone(String::new()));
    }
    s.parse::<Tz>()
        .map_err(|_| ValidationError::InvalidTimezone(s.to_string()))
}

fn decode_entries(
    availabilities: &[AvailabilityInput],
) -> Result<Vec<AvailabilityInterval>, ValidationError> {
    let mut intervals = Vec::with_capacity(availabilities.len());
    let mut errors = Vec::new();

    for (index, entry) in availabilities.iter().enumerate() {
        let start = encode(&entry.start_time).map_err(|error| EntryTimeError {
            index,
            field: TimeField::Start,
            error,
        });
        let end = encode(&entry.end_time).map_err(|error| EntryTimeError {
            index,
            field: TimeField::End,
            error,
        });

        match (start, end) {
            (Ok(start), Ok(end)) => intervals.push(AvailabilityInterval {
                day_of_week: entry.day_of_week,
                start,
                end,
            }),
            (start, end) => errors.extend(start.err().into_iter().chain(end.err())),
        }
    }

    if errors.is_empty() {
        Ok(intervals)
    } else {
        Err(ValidationError::MalformedTime(errors))
    }
}

fn check_ordering(intervals: &[AvailabilityInterval]) -> Result<(), ValidationError> {
    let invalid: Vec<InvalidInterval> = intervals
        .iter()
        .enumerate()
        .filter(|(_, i)| i.start >= i.end)
        .map(|(index, i)| InvalidInterval {
            index,
            day_of_week: i.day_of_week,
            start: i.start,
            end: i.end,
        })
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidInterval(invalid))
    }
}

fn check_overlaps(intervals: &[AvailabilityInterval]) -> Result<(), ValidationError> {
    let overlaps = find_overlaps(intervals);
    if overlaps.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::OverlappingIntervals(overlaps))
    }
}

/// Every overlapping same-day pair, sorted by `(first, second)` input index.
///
/// Per day, entries are visited in start order; each one is compared against
/// the later-starting entries until one starts at or after its end.
fn find_overlaps(intervals: &[AvailabilityInterval]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for day in DayOfWeek::ALL {
        let mut by_start: Vec<(usize, &AvailabilityInterval)> = intervals
            .iter()
            .enumerate()
            .filter(|(_, i)| i.day_of_week == day)
            .collect();
        by_start.sort_by_key(|(index, i)| (i.start, *index));

        for (pos, (a_index, a)) in by_start.iter().enumerate() {
            for (b_index, b) in by_start[pos + 1..].iter() {
                if b.start >= a.end {
                    break;
                }
                overlaps.push(Overlap {
                    day_of_week: day,
                    first: (*a_index).min(*b_index),
                    second: (*a_index).max(*b_index),
                });
            }
        }
    }

    overlaps.sort_by_key(|o| (o.first, o.second));
    overlaps
}

// ── Tests ───────────────────────────────────────────────────────────────────
