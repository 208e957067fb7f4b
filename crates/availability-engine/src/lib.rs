//! # availability-engine
//!
//! Weekly availability schedules: the recurring time windows, per day of
//! the week, during which a person can be booked, plus the IANA timezone
//! they are expressed in.
//!
//! Form input goes through a single linear pipeline: [`validate`] rejects or
//! accepts it, [`normalize`] puts the accepted schedule in canonical order,
//! and the result is handed to storage. Every function is pure; nothing is
//! cached or shared between calls.
//!
//! ## Modules
//!
//! - [`time`] - `"HH:MM"` ⇄ minutes-since-midnight codec
//! - [`model`] - Days, intervals, raw form input, and validated schedules
//! - [`validate`] - Timezone, time format, interval, and overlap checks
//! - [`normalize`] - Canonical (day, start) ordering
//! - [`form`] - Initial form values, timezone labels, and the submit pipeline
//! - [`error`] - Error types

pub mod error;
pub mod form;
pub mod model;
pub mod normalize;
pub mod time;
pub mod validate;

pub use error::{
    EntryTimeError, FieldMessage, InvalidInterval, MalformedReason, MalformedTimeError, Overlap,
    TimeField, ValidationError,
};
pub use form::{
    initial_values, submit, timezone_label, FormOptions, ScheduleStore, SubmitError,
    SAVE_ERROR_MESSAGE,
};
pub use model::{
    AvailabilityInput, AvailabilityInterval, DayOfWeek, Schedule, ScheduleInput, UnknownDayError,
};
pub use normalize::{is_normalized, normalize};
pub use time::{decode, encode, TimeOfDay};
pub use validate::validate;
