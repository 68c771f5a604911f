//src/model.rs
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Number of weekday templates that must exist at all times.
pub const DAY_COUNT: usize = 7;

/// Weekday slots, Monday first. Serialized with the keys older deployments wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
    Domingo,
}

impl DayKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            DayKey::Segunda => "segunda",
            DayKey::Terca => "terca",
            DayKey::Quarta => "quarta",
            DayKey::Quinta => "quinta",
            DayKey::Sexta => "sexta",
            DayKey::Sabado => "sabado",
            DayKey::Domingo => "domingo",
        }
    }

    pub const fn day_name(self) -> &'static str {
        match self {
            DayKey::Segunda => "Segunda",
            DayKey::Terca => "Terça",
            DayKey::Quarta => "Quarta",
            DayKey::Quinta => "Quinta",
            DayKey::Sexta => "Sexta",
            DayKey::Sabado => "Sábado",
            DayKey::Domingo => "Domingo",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayKey::Segunda,
            Weekday::Tue => DayKey::Terca,
            Weekday::Wed => DayKey::Quarta,
            Weekday::Thu => DayKey::Quinta,
            Weekday::Fri => DayKey::Sexta,
            Weekday::Sat => DayKey::Sabado,
            Weekday::Sun => DayKey::Domingo,
        }
    }

    /// Position in the Monday-first week.
    pub fn index(self) -> usize {
        DayKey::iter().position(|d| d == self).unwrap_or_default()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Only the two exact stored spellings are recognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Measurements,
    History,
}

/// An exercise planned on a day template; its defaults pre-fill future logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExercise {
    pub id: String,
    pub category_key: String,
    pub exercise_item_key: String,
    pub name: String, // Copied from the catalog
    pub default_load_kg: f64,
    pub default_sets: i64,
    pub default_reps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDayTemplate {
    pub day_key: DayKey,
    pub day_name: String,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
    pub is_workout_day: bool,
}

impl WorkoutDayTemplate {
    pub fn rest_day(day_key: DayKey) -> Self {
        Self {
            day_key,
            day_name: day_key.day_name().to_string(),
            muscle_groups: Vec::new(),
            exercises: Vec::new(),
            is_workout_day: false,
        }
    }

    /// A training day with at least one muscle group can be logged against.
    pub fn is_loggable(&self) -> bool {
        self.is_workout_day && !self.muscle_groups.is_empty()
    }

    pub fn muscle_group_label(&self) -> Option<String> {
        if self.muscle_groups.is_empty() {
            None
        } else {
            Some(self.muscle_groups.join(" & "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedExerciseData {
    pub category_key: String,
    pub exercise_item_key: String,
    pub name: String,
    pub load_kg: f64,
    pub sets: i64,
    pub reps: String,
}

/// A completed session. Never edited once appended to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: String,
    #[serde(rename = "dateISO")]
    pub date_iso: DateTime<Utc>,
    pub day_key: DayKey,
    pub logged_exercises: Vec<LoggedExerciseData>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurementLogEntry {
    pub id: String,
    #[serde(rename = "dateISO")]
    pub date_iso: NaiveDate,
    pub measurements: BTreeMap<String, f64>,
    #[serde(default)]
    pub notes: String,
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
