//src/view.rs
//! Projections of `AppState` into plain display data. Nothing here touches
//! the terminal; the front end only draws what these functions return.
use chrono::{Datelike, Local, NaiveDate};

use crate::catalog::BODY_MEASUREMENTS;
use crate::config;
use crate::history;
use crate::model::{DayKey, WorkoutDayTemplate, WorkoutLog};
use crate::state::{AppState, DashboardPanel};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date with the configured pattern, falling back to ISO when the
/// pattern is unusable.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    config::try_format_date(date, pattern)
        .unwrap_or_else(|| date.format(FALLBACK_DATE_FORMAT).to_string())
}

fn log_date(log: &WorkoutLog) -> NaiveDate {
    log.date_iso.with_timezone(&Local).date_naive()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDay {
    pub day_key: DayKey,
    pub day_name: String,
    pub status: String,
    pub is_workout_day: bool,
    pub is_selected: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExerciseRow {
    pub id: String,
    pub name: String,
    pub defaults: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayDetail {
    pub day_key: DayKey,
    pub day_name: String,
    pub summary: String,
    pub is_workout_day: bool,
    pub exercises: Vec<PlannedExerciseRow>,
    pub can_add_exercise: bool,
    pub can_log: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardBody {
    Idle,
    DayDetail(DayDetail),
    Logging { heading: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub exercises: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub schedule: Vec<ScheduleDay>,
    pub body: DashboardBody,
    pub recent: Vec<LogSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub id: String,
    pub date: String,
    pub values: Vec<(String, String)>,
    pub notes: Option<String>,
}

fn schedule_status(template: &WorkoutDayTemplate) -> String {
    if !template.is_workout_day {
        "Rest day".to_string()
    } else {
        template
            .muscle_group_label()
            .unwrap_or_else(|| "Training day - define the groups".to_string())
    }
}

fn day_detail(template: &WorkoutDayTemplate) -> DayDetail {
    let summary = match (template.is_workout_day, template.muscle_group_label()) {
        (false, _) => "Rest day.".to_string(),
        (true, Some(groups)) => format!("Training: {}", groups),
        (true, None) => {
            "Training day. Define the muscle groups by pressing 'e' on the schedule.".to_string()
        }
    };
    let exercises = if template.is_workout_day {
        template
            .exercises
            .iter()
            .map(|e| PlannedExerciseRow {
                id: e.id.clone(),
                name: e.name.clone(),
                defaults: format!("{}kg, {}x{}", e.default_load_kg, e.default_sets, e.default_reps),
            })
            .collect()
    } else {
        Vec::new()
    };
    DayDetail {
        day_key: template.day_key,
        day_name: template.day_name.clone(),
        summary,
        is_workout_day: template.is_workout_day,
        exercises,
        can_add_exercise: template.is_workout_day,
        can_log: template.is_loggable(),
    }
}

/// "Dayname (groups)" using the log's current template, or the raw key when
/// the day is unknown.
fn log_title(log: &WorkoutLog, templates: &[WorkoutDayTemplate]) -> String {
    match templates.iter().find(|t| t.day_key == log.day_key) {
        Some(t) => format!(
            "{} ({})",
            t.day_name,
            t.muscle_group_label().unwrap_or_else(|| "General".to_string())
        ),
        None => log.day_key.to_string(),
    }
}

fn log_summary(log: &WorkoutLog, templates: &[WorkoutDayTemplate], date_format: &str) -> LogSummary {
    LogSummary {
        id: log.id.clone(),
        title: log_title(log, templates),
        date: format_date(log_date(log), date_format),
        exercises: log
            .logged_exercises
            .iter()
            .map(|e| format!("{}: {}kg, {}x{}", e.name, e.load_kg, e.sets, e.reps))
            .collect(),
        notes: Some(log.notes.clone()).filter(|n| !n.is_empty()),
    }
}

pub fn dashboard(state: &AppState, today: NaiveDate, date_format: &str) -> Dashboard {
    let selected = state.selected_day();
    let today_key = DayKey::from_weekday(today.weekday());

    let schedule = state
        .templates
        .iter()
        .map(|t| ScheduleDay {
            day_key: t.day_key,
            day_name: t.day_name.clone(),
            status: schedule_status(t),
            is_workout_day: t.is_workout_day,
            is_selected: selected == Some(t.day_key),
            is_today: t.day_key == today_key,
        })
        .collect();

    let body = match &state.panel {
        DashboardPanel::Idle => DashboardBody::Idle,
        DashboardPanel::DayDetail(day) => state
            .template(*day)
            .map_or(DashboardBody::Idle, |t| DashboardBody::DayDetail(day_detail(t))),
        DashboardPanel::Logging { day, .. } => match state.template(*day) {
            Some(t) => DashboardBody::Logging {
                heading: format!(
                    "Log Workout - {} ({}) - {}",
                    t.day_name,
                    t.muscle_group_label().unwrap_or_else(|| "General".to_string()),
                    format_date(today, date_format)
                ),
            },
            None => DashboardBody::Idle,
        },
    };

    let recent = history::recent_logs(&state.history, &state.templates)
        .into_iter()
        .map(|log| log_summary(log, &state.templates, date_format))
        .collect();

    Dashboard {
        schedule,
        body,
        recent,
    }
}

pub fn history_page(state: &AppState, date_format: &str) -> Vec<LogSummary> {
    history::all_logs(&state.history)
        .into_iter()
        .map(|log| log_summary(log, &state.templates, date_format))
        .collect()
}

/// Measurement entries newest first, values listed in definition order.
pub fn measurements(state: &AppState, date_format: &str) -> Vec<MeasurementRow> {
    let mut entries: Vec<_> = state.measurements.iter().collect();
    entries.sort_by(|a, b| b.date_iso.cmp(&a.date_iso));
    entries
        .into_iter()
        .map(|entry| MeasurementRow {
            id: entry.id.clone(),
            date: format_date(entry.date_iso, date_format),
            values: BODY_MEASUREMENTS
                .iter()
                .filter_map(|def| {
                    entry.measurements.get(def.key).map(|value| {
                        let text = if def.unit.is_empty() {
                            value.to_string()
                        } else {
                            format!("{} {}", value, def.unit)
                        };
                        (def.name.to_string(), text)
                    })
                })
                .collect(),
            notes: Some(entry.notes.clone()).filter(|n| !n.is_empty()),
        })
        .collect()
}
