//src/persistence.rs
//! Reads and writes the four persisted records. Stored JSON is only accepted
//! when a couple of sentinel fields are present; anything else is replaced by
//! defaults (templates) or an empty list (histories). Inside an accepted
//! record, entries are decoded one by one and only the broken ones are dropped.
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::defaults;
use crate::model::{BodyMeasurementLogEntry, Theme, WorkoutDayTemplate, WorkoutLog, DAY_COUNT};
use crate::state::AppState;
use crate::store::{KeyValueStore, StoreError};

pub const THEME_KEY: &str = "didiFit_theme_v1";
pub const TEMPLATES_KEY: &str = "didiFit_workoutTemplates_v3";
pub const HISTORY_KEY: &str = "didiFit_workoutHistory_v2";
pub const MEASUREMENTS_KEY: &str = "didiFit_bodyMeasurementHistory_v1";

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to write record '{key}'")]
    Store {
        key: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("Failed to serialize record '{key}'")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn write_json<S, T>(store: &mut S, key: &'static str, value: &T) -> Result<(), PersistError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| PersistError::Serialize { key, source })?;
    store
        .set(key, &json)
        .map_err(|source| PersistError::Store { key, source })
}

/// Writes templates, history, measurements and theme, in that order.
/// The first failing write aborts the rest.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, state: &AppState) -> Result<(), PersistError> {
    write_json(store, TEMPLATES_KEY, &state.templates)?;
    write_json(store, HISTORY_KEY, &state.history)?;
    write_json(store, MEASUREMENTS_KEY, &state.measurements)?;
    store
        .set(THEME_KEY, state.theme.as_str())
        .map_err(|source| PersistError::Store {
            key: THEME_KEY,
            source,
        })?;
    debug!(
        templates = state.templates.len(),
        logs = state.history.len(),
        measurements = state.measurements.len(),
        "State persisted"
    );
    Ok(())
}

/// Hydrates state then writes it straight back, so a store holding rejected
/// records is normalized. The state is usable even when that write fails.
pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> (AppState, Result<(), PersistError>) {
    let state = read_state(store);
    let saved = save(store, &state);
    (state, saved)
}

pub fn read_state<S: KeyValueStore + ?Sized>(store: &S) -> AppState {
    let theme = read_raw(store, THEME_KEY)
        .and_then(|raw| Theme::parse(&raw))
        .unwrap_or_default();
    let templates = parse_templates(read_raw(store, TEMPLATES_KEY).as_deref());
    let history = parse_history(read_raw(store, HISTORY_KEY).as_deref());
    let measurements = parse_measurements(read_raw(store, MEASUREMENTS_KEY).as_deref());
    AppState::with_data(theme, templates, history, measurements)
}

fn read_raw<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Could not read stored record, treating it as missing");
            None
        }
    }
}

fn parse_json(key: &str, raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Stored record is not valid JSON");
            None
        }
    }
}

/// A list of exactly seven entries whose first entry has `isWorkoutDay` and
/// whose first planned exercise, if any, has `categoryKey`.
pub(crate) fn templates_shape_ok(value: &Value) -> bool {
    let Some(entries) = value.as_array() else {
        return false;
    };
    if entries.len() != DAY_COUNT {
        return false;
    }
    let Some(first) = entries.first().and_then(Value::as_object) else {
        return false;
    };
    if !first.contains_key("isWorkoutDay") {
        return false;
    }
    match first
        .get("exercises")
        .and_then(Value::as_array)
        .and_then(|exercises| exercises.first())
    {
        Some(exercise) => exercise.get("categoryKey").is_some(),
        None => true,
    }
}

/// A list that is empty, or whose first log has no first exercise, or whose
/// first logged exercise has `categoryKey`.
pub(crate) fn history_shape_ok(value: &Value) -> bool {
    let Some(entries) = value.as_array() else {
        return false;
    };
    let Some(first) = entries.first() else {
        return true;
    };
    match first
        .get("loggedExercises")
        .and_then(Value::as_array)
        .and_then(|exercises| exercises.first())
    {
        Some(exercise) => exercise.get("categoryKey").is_some(),
        None => true,
    }
}

pub(crate) fn measurements_shape_ok(value: &Value) -> bool {
    value.is_array()
}

/// Decodes each entry on its own, dropping (and logging) the ones that fail.
fn decode_entries<T: DeserializeOwned>(key: &str, value: Value) -> Vec<T> {
    let Value::Array(entries) = value else {
        return Vec::new();
    };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, index, error = %e, "Dropping stored entry that could not be decoded");
                None
            }
        })
        .collect()
}

/// Puts the week in Monday-first order with one template per day. The first
/// template stored for a day wins; a day with none gets its default.
fn complete_week(templates: Vec<WorkoutDayTemplate>) -> Vec<WorkoutDayTemplate> {
    let mut slots: Vec<Option<WorkoutDayTemplate>> = vec![None; DAY_COUNT];
    for template in templates {
        let slot = &mut slots[template.day_key.index()];
        if slot.is_some() {
            warn!(day = %template.day_key, "Ignoring repeated stored template for weekday");
        } else {
            *slot = Some(template);
        }
    }
    slots
        .into_iter()
        .zip(defaults::default_templates())
        .map(|(stored, default)| {
            stored.unwrap_or_else(|| {
                warn!(day = %default.day_key, "No stored template for weekday, using its default");
                default
            })
        })
        .collect()
}

fn parse_templates(raw: Option<&str>) -> Vec<WorkoutDayTemplate> {
    let Some(raw) = raw else {
        debug!("No stored templates, seeding the default week");
        return defaults::default_templates();
    };
    let Some(value) = parse_json(TEMPLATES_KEY, raw) else {
        return defaults::default_templates();
    };
    if !templates_shape_ok(&value) {
        warn!("Stored workout templates are in an old or invalid format. Resetting to default.");
        return defaults::default_templates();
    }
    complete_week(decode_entries(TEMPLATES_KEY, value))
}

fn parse_history(raw: Option<&str>) -> Vec<WorkoutLog> {
    let Some(value) = raw.and_then(|raw| parse_json(HISTORY_KEY, raw)) else {
        return Vec::new();
    };
    if !history_shape_ok(&value) {
        warn!("Stored workout history is in an old or invalid format. Clearing history.");
        return Vec::new();
    }
    decode_entries(HISTORY_KEY, value)
}

fn parse_measurements(raw: Option<&str>) -> Vec<BodyMeasurementLogEntry> {
    let Some(value) = raw.and_then(|raw| parse_json(MEASUREMENTS_KEY, raw)) else {
        return Vec::new();
    };
    if !measurements_shape_ok(&value) {
        warn!("Stored body measurements are in an invalid format. Clearing.");
        return Vec::new();
    }
    decode_entries(MEASUREMENTS_KEY, value)
}
