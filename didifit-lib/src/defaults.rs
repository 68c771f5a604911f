//src/defaults.rs
use strum::IntoEnumIterator;

use crate::catalog;
use crate::model::{new_id, DayKey, PlannedExercise, WorkoutDayTemplate};

// (category, item, load kg, sets, reps)
type Seed = (&'static str, &'static str, f64, i64, &'static str);

const MONDAY_SEED: &[Seed] = &[
    ("Peito", "peito_supino_reto", 60.0, 3, "8-10"),
    ("Ombros", "ombros_desenvolvimento", 12.0, 3, "10-12"),
    ("Bíceps", "biceps_rosca_direta", 12.0, 3, "10-12"),
];

const WEDNESDAY_SEED: &[Seed] = &[
    ("Costas", "costas_barra_fixa", 0.0, 3, "Máx"),
    ("Costas", "costas_remada_baixa", 50.0, 3, "8-10"),
];

const FRIDAY_SEED: &[Seed] = &[
    ("Quadríceps e Glúteos", "quads_agachamento", 70.0, 4, "6-8"),
    ("Quadríceps e Glúteos", "quads_leg_press", 120.0, 3, "10-12"),
    ("Abdômen", "abs_prancha", 0.0, 3, "60s"),
];

fn planned(seed: &Seed) -> Option<PlannedExercise> {
    let (category_key, item_key, load, sets, reps) = *seed;
    let item = catalog::find_exercise(category_key, item_key)?;
    Some(PlannedExercise {
        id: new_id(),
        category_key: category_key.to_string(),
        exercise_item_key: item.id.to_string(),
        name: item.name.to_string(),
        default_load_kg: load,
        default_sets: sets,
        default_reps: reps.to_string(),
    })
}

fn training_day(day_key: DayKey, groups: &[&str], seed: &[Seed]) -> WorkoutDayTemplate {
    WorkoutDayTemplate {
        day_key,
        day_name: day_key.day_name().to_string(),
        muscle_groups: groups.iter().map(|g| (*g).to_string()).collect(),
        exercises: seed.iter().filter_map(planned).collect(),
        is_workout_day: true,
    }
}

/// The first-run weekly schedule: Monday, Wednesday and Friday are seeded
/// training days, every other day is a rest day.
pub fn default_templates() -> Vec<WorkoutDayTemplate> {
    DayKey::iter()
        .map(|day| match day {
            DayKey::Segunda => training_day(day, &["Braços", "Ombros"], MONDAY_SEED),
            DayKey::Quarta => training_day(day, &["Costas", "Peito"], WEDNESDAY_SEED),
            DayKey::Sexta => training_day(day, &["Pernas", "Abdômen"], FRIDAY_SEED),
            _ => WorkoutDayTemplate::rest_day(day),
        })
        .collect()
}
