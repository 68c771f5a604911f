//src/history.rs
use std::collections::HashSet;

use crate::model::{WorkoutDayTemplate, WorkoutLog};

/// Size of the dashboard's recent-workouts panel.
pub const RECENT_LIMIT: usize = 5;
/// How many logs may be added after the one-per-combination pass.
pub const BACKFILL_LIMIT: usize = 3;

fn sorted_newest_first(history: &[WorkoutLog]) -> Vec<&WorkoutLog> {
    let mut logs: Vec<&WorkoutLog> = history.iter().collect();
    logs.sort_by(|a, b| b.date_iso.cmp(&a.date_iso));
    logs
}

/// Muscle-group combination a log counts towards, resolved through the
/// current template of its day. `None` for rest days and days without groups.
fn combination_key(log: &WorkoutLog, templates: &[WorkoutDayTemplate]) -> Option<String> {
    templates
        .iter()
        .find(|t| t.day_key == log.day_key)
        .filter(|t| t.is_loggable())
        .map(|t| t.muscle_groups.join(","))
}

/// Picks the logs for the recent panel: the newest log of each distinct
/// muscle-group combination first, then a few of the remaining newest logs.
pub fn recent_logs<'a>(
    history: &'a [WorkoutLog],
    templates: &[WorkoutDayTemplate],
) -> Vec<&'a WorkoutLog> {
    let sorted = sorted_newest_first(history);

    let mut selected: Vec<&WorkoutLog> = Vec::new();
    let mut seen_combinations = HashSet::new();
    for log in &sorted {
        if selected.len() >= RECENT_LIMIT {
            break;
        }
        if let Some(key) = combination_key(log, templates) {
            if seen_combinations.insert(key) {
                selected.push(log);
            }
        }
    }

    let mut taken: HashSet<&str> = selected.iter().map(|l| l.id.as_str()).collect();
    let mut added = 0;
    for log in &sorted {
        if selected.len() >= RECENT_LIMIT || added >= BACKFILL_LIMIT {
            break;
        }
        if taken.insert(log.id.as_str()) {
            selected.push(log);
            added += 1;
        }
    }

    selected.sort_by(|a, b| b.date_iso.cmp(&a.date_iso));
    selected
}

/// Every log, newest first.
pub fn all_logs(history: &[WorkoutLog]) -> Vec<&WorkoutLog> {
    sorted_newest_first(history)
}
