//! Glue between a schedule editing form and the engine.
//!
//! Provides the form's initial values, the timezone picker label, and the
//! submit pipeline: validate, normalize, then hand the schedule to a
//! [`ScheduleStore`]. Storage itself is the caller's concern.

use std::fmt::Display;

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::error::ValidationError;
use crate::model::{Schedule, ScheduleInput};
use crate::normalize::normalize;
use crate::validate::validate;

/// Root-level message shown when saving a valid schedule fails.
pub const SAVE_ERROR_MESSAGE: &str = "There was an error saving your schedule";

/// Options for [`initial_values`].
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Timezone preselected when there is no saved schedule, typically the
    /// host's local zone.
    pub default_timezone: Tz,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            default_timezone: Tz::UTC,
        }
    }
}

/// Values to populate the form with.
///
/// A saved schedule is presented in canonical order; without one the form
/// starts empty in `options.default_timezone`.
pub fn initial_values(saved: Option<&Schedule>, options: &FormOptions) -> ScheduleInput {
    match saved {
        Some(schedule) => ScheduleInput::from(&normalize(schedule.clone())),
        None => ScheduleInput {
            timezone: options.default_timezone.name().to_string(),
            availabilities: Vec::new(),
        },
    }
}

/// Picker label for a timezone, e.g. `"America/New_York (-05:00)"`.
///
/// The offset is the one in effect at `at`, so it changes across DST.
pub fn timezone_label(tz: Tz, at: DateTime<Utc>) -> String {
    let offset_secs = at.with_timezone(&tz).offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{} ({sign}{hours:02}:{minutes:02})", tz.name())
}

// ── submit ──────────────────────────────────────────────────────────────────

/// Where a normalized schedule goes once it passes validation.
pub trait ScheduleStore {
    type Error: Display;

    fn create(&self, schedule: &Schedule) -> Result<(), Self::Error>;

    fn update(&self, id: &str, schedule: &Schedule) -> Result<(), Self::Error>;
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The schedule was valid but the store rejected it. The cause is logged,
    /// not shown.
    #[error("{}", SAVE_ERROR_MESSAGE)]
    Save,
}

/// Validate, normalize, and save form values.
///
/// Creates a new schedule when `existing_id` is `None`, otherwise updates it.
/// The store is not called when validation fails.
pub fn submit<S: ScheduleStore>(
    store: &S,
    existing_id: Option<&str>,
    values: &ScheduleInput,
) -> Result<Schedule, SubmitError> {
    let schedule = normalize(validate(&values.timezone, &values.availabilities)?);

    let saved = match existing_id {
        None => store.create(&schedule),
        Some(id) => store.update(id, &schedule),
    };

    if let Err(e) = saved {
        tracing::warn!(error = %e, id = ?existing_id, "failed to save availability schedule");
        return Err(SubmitError::Save);
    }

    Ok(schedule)
}

// ── Tests ───────────────────────────────────────────────────────────────────
