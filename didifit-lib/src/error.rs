//src/error.rs
use thiserror::Error;

use crate::forms::SlotField;

/// Rejections of a user action. Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Please select a day on the schedule first.")]
    NoDaySelected,
    #[error("This day is not a configured training day.")]
    NotATrainingDay,
    #[error("Define the muscle groups for this training day before logging it (press 'e' on the schedule).")]
    MuscleGroupsUndefined,
    #[error("Cannot save: check that the day is a training day with muscle groups defined.")]
    CannotSaveLog,
    #[error("Today is not a configured training day. Select a day on the schedule or configure today as a training day.")]
    TodayIsRestDay,
    #[error("Invalid exercise selected in slot {}.", .slot + 1)]
    InvalidSlotExercise { slot: usize },
    #[error("Please fill in the fields for \"{exercise}\" in slot {} correctly. Load and sets must be valid numbers and reps cannot be empty.", .slot + 1)]
    InvalidSlotValues {
        slot: usize,
        exercise: String,
        focus: SlotField,
    },
    #[error("No exercise was logged. Add at least one exercise to the log.")]
    NoExercisesLogged,
    #[error("Select a training day to add exercises.")]
    AddExerciseRequiresTrainingDay,
    #[error("Please fill in all required fields with valid values.")]
    IncompleteTemplateExercise,
    #[error("Invalid exercise selected.")]
    UnknownExercise,
    #[error("Invalid values. Reps cannot be empty; load and sets must be numbers.")]
    InvalidExerciseDefaults,
    #[error("Unknown muscle group: {0}")]
    UnknownMuscleGroup(String),
    #[error("Please select a date.")]
    MissingMeasurementDate,
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidMeasurementDate(String),
    #[error("Invalid value for {name}. Must be a non-negative number.")]
    InvalidMeasurement { key: &'static str, name: &'static str },
    #[error("Please fill in at least one measurement field.")]
    NoMeasurements,
    #[error("This measurement entry no longer exists.")]
    MeasurementNotFound,
}
