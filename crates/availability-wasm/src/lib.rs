//! WASM bindings for availability-engine.
//!
//! Every export takes and returns JSON strings so a browser form can call
//! the engine without sharing Rust types. Errors are thrown as strings; for
//! `validateSchedule` the string is a JSON object `{"errors": [...]}` of
//! per-field form messages.

use availability_engine::{initial_values, normalize, timezone_label, validate, FormOptions};
use availability_engine::{Schedule, ScheduleInput};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use wasm_bindgen::prelude::*;

/// Validate form values and return the normalized schedule as JSON.
#[wasm_bindgen(js_name = validateSchedule)]
pub fn validate_schedule(input: &str) -> Result<String, JsValue> {
    validate_schedule_json(input).map_err(|e| JsValue::from_str(&e))
}

/// Initial form values as JSON, from an optional saved schedule.
#[wasm_bindgen(js_name = initialValues)]
pub fn initial_values_js(saved: Option<String>, default_timezone: &str) -> Result<String, JsValue> {
    initial_values_json(saved.as_deref(), default_timezone).map_err(|e| JsValue::from_str(&e))
}

/// Picker label such as `"Europe/Paris (+01:00)"` at the given RFC 3339 instant.
#[wasm_bindgen(js_name = timezoneLabel)]
pub fn timezone_label_js(timezone: &str, at: &str) -> Result<String, JsValue> {
    timezone_label_str(timezone, at).map_err(|e| JsValue::from_str(&e))
}

pub fn validate_schedule_json(input: &str) -> Result<String, String> {
    let values: ScheduleInput =
        serde_json::from_str(input).map_err(|e| format!("Invalid input JSON: {e}"))?;

    match validate(&values.timezone, &values.availabilities) {
        Ok(schedule) => to_json(&normalize(schedule)),
        Err(e) => Err(to_json(&serde_json::json!({ "errors": e.form_messages() }))?),
    }
}

pub fn initial_values_json(saved: Option<&str>, default_timezone: &str) -> Result<String, String> {
    let default_timezone = parse_timezone(default_timezone)?;
    let saved: Option<Schedule> = saved
        .map(|s| serde_json::from_str(s).map_err(|e| format!("Invalid saved schedule: {e}")))
        .transpose()?;

    to_json(&initial_values(
        saved.as_ref(),
        &FormOptions { default_timezone },
    ))
}

pub fn timezone_label_str(timezone: &str, at: &str) -> Result<String, String> {
    let tz = parse_timezone(timezone)?;
    let at = DateTime::parse_from_rfc3339(at)
        .map_err(|e| format!("Invalid datetime '{at}': {e}"))?
        .with_timezone(&Utc);
    Ok(timezone_label(tz, at))
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|_| format!("Invalid timezone: '{s}'"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}
