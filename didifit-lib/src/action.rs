//src/action.rs
//! State transitions. `reduce` validates an action against the current state
//! and mutates it; persisting and redrawing are left to the caller.
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::config::Config;
use crate::error::ActionError;
use crate::forms::{AddExerciseForm, DayConfigForm, ExerciseDefaultsForm, LogForm, MeasurementForm, SlotField};
use crate::model::{new_id, BodyMeasurementLogEntry, DayKey, View, WorkoutLog};
use crate::state::{AppState, Confirmation, DashboardPanel, Editor};
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user produced while handling an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The instant new logs are stamped with and the local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

impl Clock {
    pub fn system() -> Self {
        Self {
            now: Utc::now(),
            today: Local::now().date_naive(),
        }
    }

    pub fn fixed(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(View),
    ToggleTheme,

    // Dashboard
    SelectDay(DayKey),
    StartLogging,
    QuickAdd,
    LogSelectCategory {
        slot: usize,
        category_key: Option<String>,
    },
    LogSelectItem {
        slot: usize,
        item_key: Option<String>,
    },
    LogSetField {
        slot: usize,
        field: SlotField,
        value: String,
    },
    LogSetNotes(String),
    SubmitLog,
    RequestCancelLog,

    // Templates
    OpenEditDay(DayKey),
    SaveDayConfiguration {
        is_workout_day: bool,
        muscle_groups: Vec<String>,
    },
    OpenAddExercise,
    SaveTemplateExercise(AddExerciseForm),
    OpenEditExercise(String),
    EditTemplateExercise(ExerciseDefaultsForm),
    RequestDeleteTemplateExercise(String),

    // Body measurements
    OpenMeasurementEditor(Option<String>),
    SaveMeasurement(MeasurementForm),
    RequestDeleteMeasurement(String),

    CloseEditor,
    Confirm,
    Dismiss,
}

/// What the caller has to do after a successful `reduce`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub persist: bool,
    pub notices: Vec<Notice>,
}

impl Outcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn persisted() -> Self {
        Self {
            persist: true,
            notices: Vec::new(),
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

pub fn reduce(
    state: &mut AppState,
    action: Action,
    clock: &Clock,
    config: &Config,
) -> Result<Outcome, ActionError> {
    match action {
        Action::Navigate(target) => Ok(navigate(state, target)),
        Action::ToggleTheme => {
            state.theme = state.theme.toggled();
            Ok(Outcome::persisted())
        }
        Action::SelectDay(day) => {
            state.panel = DashboardPanel::DayDetail(day);
            Ok(Outcome::unchanged())
        }
        Action::StartLogging => start_logging(state),
        Action::QuickAdd => quick_add(state, clock),
        Action::LogSelectCategory { slot, category_key } => {
            edit_log_form(state, |form| form.select_category(slot, category_key.as_deref()))
        }
        Action::LogSelectItem { slot, item_key } => {
            edit_log_form(state, |form| form.select_item(slot, item_key.as_deref()))
        }
        Action::LogSetField { slot, field, value } => {
            edit_log_form(state, |form| form.set_field(slot, field, value))
        }
        Action::LogSetNotes(notes) => edit_log_form(state, |form| form.notes = notes),
        Action::SubmitLog => submit_log(state, clock),
        Action::RequestCancelLog => {
            if state.is_logging() {
                state.pending_confirmation = Some(Confirmation::CancelLog);
            }
            Ok(Outcome::unchanged())
        }
        Action::OpenEditDay(day) => {
            state.editor = Some(Editor::DayConfig(day));
            Ok(Outcome::unchanged())
        }
        Action::SaveDayConfiguration {
            is_workout_day,
            muscle_groups,
        } => save_day_configuration(state, is_workout_day, muscle_groups),
        Action::OpenAddExercise => open_add_exercise(state),
        Action::SaveTemplateExercise(form) => save_template_exercise(state, &form),
        Action::OpenEditExercise(exercise_id) => {
            let day = state.selected_day().ok_or(ActionError::NoDaySelected)?;
            let exists = state
                .template(day)
                .is_some_and(|t| t.exercises.iter().any(|e| e.id == exercise_id));
            if exists {
                state.editor = Some(Editor::ExerciseDefaults { day, exercise_id });
            }
            Ok(Outcome::unchanged())
        }
        Action::EditTemplateExercise(form) => edit_template_exercise(state, &form),
        Action::RequestDeleteTemplateExercise(exercise_id) => {
            request_delete_template_exercise(state, exercise_id, config)
        }
        Action::OpenMeasurementEditor(id) => {
            let target = id.filter(|id| state.measurement(id).is_some());
            state.editor = Some(Editor::Measurement(target));
            Ok(Outcome::unchanged())
        }
        Action::SaveMeasurement(form) => save_measurement(state, &form),
        Action::RequestDeleteMeasurement(id) => request_delete_measurement(state, id, config),
        Action::CloseEditor => {
            state.editor = None;
            Ok(Outcome::unchanged())
        }
        Action::Confirm => match state.pending_confirmation.take() {
            Some(confirmation) => Ok(apply_confirmation(state, confirmation)),
            None => Ok(Outcome::unchanged()),
        },
        Action::Dismiss => {
            state.pending_confirmation = None;
            Ok(Outcome::unchanged())
        }
    }
}

fn navigate(state: &mut AppState, target: View) -> Outcome {
    if state.view == target {
        return Outcome::unchanged();
    }
    state.view = target;
    state.editor = None;
    state.pending_confirmation = None;
    if target != View::Dashboard {
        state.panel = DashboardPanel::Idle;
    }
    Outcome::unchanged()
}

fn start_logging(state: &mut AppState) -> Result<Outcome, ActionError> {
    let day = match &state.panel {
        DashboardPanel::Idle => return Err(ActionError::NoDaySelected),
        DashboardPanel::Logging { .. } => return Ok(Outcome::unchanged()),
        DashboardPanel::DayDetail(day) => *day,
    };
    let template = state.template(day).ok_or(ActionError::NotATrainingDay)?;
    if !template.is_workout_day {
        return Err(ActionError::NotATrainingDay);
    }
    if template.muscle_groups.is_empty() {
        return Err(ActionError::MuscleGroupsUndefined);
    }
    state.panel = DashboardPanel::Logging {
        day,
        form: LogForm::new(),
    };
    Ok(Outcome::unchanged())
}

fn quick_add(state: &mut AppState, clock: &Clock) -> Result<Outcome, ActionError> {
    if state.view != View::Dashboard {
        return Ok(Outcome::unchanged());
    }
    let day = DayKey::from_weekday(clock.today.weekday());
    let template = state
        .template(day)
        .filter(|t| t.is_workout_day)
        .ok_or(ActionError::TodayIsRestDay)?;

    if template.muscle_groups.is_empty() {
        let message = format!(
            "Today's workout ({}) has no muscle groups defined. Select the day on the schedule and press 'e' to configure it.",
            template.day_name
        );
        state.panel = DashboardPanel::DayDetail(day);
        return Ok(Outcome::unchanged().with_notice(Notice::warning(message)));
    }

    state.panel = DashboardPanel::Logging {
        day,
        form: LogForm::new(),
    };
    Ok(Outcome::unchanged())
}

fn edit_log_form(
    state: &mut AppState,
    edit: impl FnOnce(&mut LogForm),
) -> Result<Outcome, ActionError> {
    if let Some(form) = state.log_form_mut() {
        edit(form);
    }
    Ok(Outcome::unchanged())
}

fn submit_log(state: &mut AppState, clock: &Clock) -> Result<Outcome, ActionError> {
    let DashboardPanel::Logging { day, form } = &state.panel else {
        return Err(ActionError::NoDaySelected);
    };
    let day = *day;
    if !state.template(day).is_some_and(|t| t.is_loggable()) {
        return Err(ActionError::CannotSaveLog);
    }
    let logged_exercises = form.validate()?;
    let notes = form.notes.trim().to_string();

    state.history.push(WorkoutLog {
        id: new_id(),
        date_iso: clock.now,
        day_key: day,
        logged_exercises,
        notes,
    });
    state.panel = DashboardPanel::DayDetail(day);
    tracing::info!(day = %day, "Workout logged");
    Ok(Outcome::persisted().with_notice(Notice::info("Workout saved successfully!")))
}

fn save_day_configuration(
    state: &mut AppState,
    is_workout_day: bool,
    muscle_groups: Vec<String>,
) -> Result<Outcome, ActionError> {
    let Some(Editor::DayConfig(day)) = state.editor else {
        return Ok(Outcome::unchanged());
    };
    let form = DayConfigForm {
        day,
        is_workout_day,
        muscle_groups,
    };
    let groups = form.resolved_groups()?;
    let template = state.template_mut(day).ok_or(ActionError::NoDaySelected)?;
    template.is_workout_day = is_workout_day;
    template.muscle_groups = groups;
    state.editor = None;
    Ok(Outcome::persisted())
}

fn open_add_exercise(state: &mut AppState) -> Result<Outcome, ActionError> {
    let day = state
        .selected_template()
        .filter(|t| t.is_workout_day)
        .map(|t| t.day_key)
        .ok_or(ActionError::AddExerciseRequiresTrainingDay)?;
    state.editor = Some(Editor::AddExercise(day));
    Ok(Outcome::unchanged())
}

fn save_template_exercise(
    state: &mut AppState,
    form: &AddExerciseForm,
) -> Result<Outcome, ActionError> {
    let Some(Editor::AddExercise(day)) = state.editor else {
        return Err(ActionError::AddExerciseRequiresTrainingDay);
    };
    let exercise = form.build()?;
    let template = state
        .template_mut(day)
        .filter(|t| t.is_workout_day)
        .ok_or(ActionError::AddExerciseRequiresTrainingDay)?;
    template.exercises.push(exercise);
    state.editor = None;
    Ok(Outcome::persisted())
}

fn edit_template_exercise(
    state: &mut AppState,
    form: &ExerciseDefaultsForm,
) -> Result<Outcome, ActionError> {
    let day = match &state.editor {
        Some(Editor::ExerciseDefaults { day, .. }) => Some(*day),
        _ => state.selected_day(),
    }
    .ok_or(ActionError::NoDaySelected)?;
    let (load, sets, reps) = form.parse()?;

    let exercise = state
        .template_mut(day)
        .and_then(|t| t.exercises.iter_mut().find(|e| e.id == form.exercise_id));
    let Some(exercise) = exercise else {
        state.editor = None;
        return Ok(Outcome::unchanged());
    };
    exercise.default_load_kg = load;
    exercise.default_sets = sets;
    exercise.default_reps = reps;
    state.editor = None;
    Ok(Outcome::persisted())
}

fn request_delete_template_exercise(
    state: &mut AppState,
    exercise_id: String,
    config: &Config,
) -> Result<Outcome, ActionError> {
    let day = state.selected_day().ok_or(ActionError::NoDaySelected)?;
    let Some(exercise) = state
        .template(day)
        .and_then(|t| t.exercises.iter().find(|e| e.id == exercise_id))
    else {
        return Ok(Outcome::unchanged());
    };
    let confirmation = Confirmation::DeletePlannedExercise {
        day,
        exercise_name: exercise.name.clone(),
        exercise_id,
    };
    if config.confirm_deletes {
        state.pending_confirmation = Some(confirmation);
        Ok(Outcome::unchanged())
    } else {
        Ok(apply_confirmation(state, confirmation))
    }
}

fn save_measurement(state: &mut AppState, form: &MeasurementForm) -> Result<Outcome, ActionError> {
    let input = form.validate()?;
    let message = match form.id.as_deref() {
        Some(id) => {
            let entry = state
                .measurements
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(ActionError::MeasurementNotFound)?;
            entry.date_iso = input.date;
            entry.measurements = input.measurements;
            entry.notes = input.notes;
            "Measurements updated successfully!"
        }
        None => {
            state.measurements.push(BodyMeasurementLogEntry {
                id: new_id(),
                date_iso: input.date,
                measurements: input.measurements,
                notes: input.notes,
            });
            "Measurements saved successfully!"
        }
    };
    state.editor = None;
    Ok(Outcome::persisted().with_notice(Notice::info(message)))
}

fn request_delete_measurement(
    state: &mut AppState,
    id: String,
    config: &Config,
) -> Result<Outcome, ActionError> {
    let Some(entry) = state.measurement(&id) else {
        return Ok(Outcome::unchanged());
    };
    let confirmation = Confirmation::DeleteMeasurement {
        date_label: view::format_date(entry.date_iso, &config.date_format),
        id,
    };
    if config.confirm_deletes {
        state.pending_confirmation = Some(confirmation);
        Ok(Outcome::unchanged())
    } else {
        Ok(apply_confirmation(state, confirmation))
    }
}

fn apply_confirmation(state: &mut AppState, confirmation: Confirmation) -> Outcome {
    match confirmation {
        Confirmation::DeletePlannedExercise {
            day, exercise_id, ..
        } => match state.template_mut(day) {
            Some(template) => {
                template.exercises.retain(|e| e.id != exercise_id);
                Outcome::persisted()
            }
            None => Outcome::unchanged(),
        },
        Confirmation::DeleteMeasurement { id, .. } => {
            state.measurements.retain(|m| m.id != id);
            Outcome::persisted().with_notice(Notice::info("Measurement entry deleted."))
        }
        Confirmation::CancelLog => {
            if let DashboardPanel::Logging { day, .. } = state.panel {
                state.panel = DashboardPanel::DayDetail(day);
            }
            Outcome::unchanged()
        }
    }
}
