//! Canonical ordering of a validated schedule.

use crate::model::Schedule;

/// Sort a schedule's intervals by day (Monday first), then by start time.
///
/// The sort is stable, so entries sharing a day and start keep their input
/// order, and normalizing twice gives the same result as normalizing once.
/// Touching intervals such as 09:00-10:00 and 10:00-11:00 are kept as two
/// entries. No interval is created, changed, or removed.
///
/// # Examples
///
/// ```
/// use availability_engine::{normalize, validate, AvailabilityInput, DayOfWeek};
///
/// let rows = vec![
///     AvailabilityInput::new(DayOfWeek::Tuesday, "14:00", "15:00"),
///     AvailabilityInput::new(DayOfWeek::Monday, "09:00", "10:00"),
/// ];
/// let schedule = normalize(validate("America/New_York", &rows).unwrap());
/// assert_eq!(schedule.availabilities()[0].day_of_week, DayOfWeek::Monday);
/// ```
pub fn normalize(mut schedule: Schedule) -> Schedule {
    schedule
        .availabilities_mut()
        .sort_by_key(|i| (i.day_of_week.index(), i.start));
    schedule
}

/// Whether `schedule` is already in canonical order.
pub fn is_normalized(schedule: &Schedule) -> bool {
    schedule
        .availabilities()
        .windows(2)
        .all(|w| (w[0].day_of_week, w[0].start) <= (w[1].day_of_week, w[1].start))
}

// ── Tests ───────────────────────────────────────────────────────────────────
