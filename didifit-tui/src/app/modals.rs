// didifit-tui/src/app/modals.rs
use super::actions::close_editor;
use super::navigation_helpers::{cycle_choice, cycle_field};
use super::state::{
    ActiveModal, AddExerciseField, App, EditDayField, ExerciseDefaultsField, MeasurementField,
};
use crossterm::event::{KeyCode, KeyEvent};
use didifit_lib::catalog::{self, BODY_MEASUREMENTS, MUSCLE_GROUPS};
use didifit_lib::{Action, AddExerciseForm, ExerciseDefaultsForm, MeasurementForm, NoticeLevel};

/// A single keystroke applied to a text input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
}

impl TextEdit {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(c) if !c.is_control() => Some(TextEdit::Insert(c)),
            KeyCode::Backspace => Some(TextEdit::Backspace),
            _ => None,
        }
    }

    /// Deletions are always allowed; insertions only if `accept` agrees.
    pub fn allows(self, accept: impl Fn(char) -> bool) -> bool {
        match self {
            TextEdit::Insert(c) => accept(c),
            TextEdit::Backspace => true,
        }
    }

    pub fn apply(self, text: &mut String) {
        match self {
            TextEdit::Insert(c) => text.push(c),
            TextEdit::Backspace => {
                text.pop();
            }
        }
    }
}

fn is_decimal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn edit_text(text: &mut String, code: KeyCode, accept: impl Fn(char) -> bool) {
    if let Some(edit) = TextEdit::from_key(code) {
        if edit.allows(accept) {
            edit.apply(text);
        }
    }
}

fn focus_step(code: KeyCode) -> Option<bool> {
    match code {
        KeyCode::Tab | KeyCode::Down => Some(true),
        KeyCode::BackTab | KeyCode::Up => Some(false),
        _ => None,
    }
}

// --- Edit Day ---

/// Group toggles are only reachable on a training day.
pub fn edit_day_fields(is_workout_day: bool) -> Vec<EditDayField> {
    let mut fields = vec![EditDayField::WorkoutDay];
    if is_workout_day {
        fields.extend((0..MUSCLE_GROUPS.len()).map(EditDayField::Group));
    }
    fields.push(EditDayField::Confirm);
    fields.push(EditDayField::Cancel);
    fields
}

pub fn handle_edit_day_modal_input(app: &mut App, key: KeyEvent) {
    let mut submission = None;

    if let ActiveModal::EditDay {
        ref mut form,
        ref mut focused_field,
        ref mut error_message,
    } = app.active_modal
    {
        // Always clear error on any input
        *error_message = None;

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Enter && *focused_field == EditDayField::Cancel)
        {
            close_editor(app);
            return;
        }
        if let Some(forward) = focus_step(key.code) {
            let fields = edit_day_fields(form.is_workout_day);
            *focused_field = cycle_field(&fields, *focused_field, forward);
            return;
        }
        match (key.code, *focused_field) {
            (KeyCode::Enter | KeyCode::Char(' '), EditDayField::WorkoutDay) => {
                form.is_workout_day = !form.is_workout_day;
            }
            (KeyCode::Enter | KeyCode::Char(' '), EditDayField::Group(index)) => {
                if let Some(group) = MUSCLE_GROUPS.get(index) {
                    form.toggle_group(group);
                }
            }
            (KeyCode::Enter, EditDayField::Confirm) => {
                submission = Some((form.is_workout_day, form.muscle_groups.clone()));
            }
            _ => {}
        }
    } // Mutable borrow of app.active_modal ends here

    if let Some((is_workout_day, muscle_groups)) = submission {
        let result = app.apply(Action::SaveDayConfiguration {
            is_workout_day,
            muscle_groups,
        });
        match result {
            Ok(()) => app.active_modal = ActiveModal::None,
            Err(e) => set_modal_error(app, e.to_string()),
        }
    }
}

// --- Add Exercise ---

const ADD_EXERCISE_FIELDS: [AddExerciseField; 7] = [
    AddExerciseField::Category,
    AddExerciseField::Item,
    AddExerciseField::Load,
    AddExerciseField::Sets,
    AddExerciseField::Reps,
    AddExerciseField::Confirm,
    AddExerciseField::Cancel,
];

fn cycle_add_exercise_choice(form: &mut AddExerciseForm, field: AddExerciseField, forward: bool) {
    match field {
        AddExerciseField::Category => {
            let keys: Vec<&str> = catalog::category_keys().collect();
            let next = cycle_choice(&keys, form.category_key.as_deref(), forward);
            form.select_category(next);
        }
        AddExerciseField::Item => {
            let ids: Vec<&str> = form.choices().iter().map(|i| i.id).collect();
            let next = cycle_choice(&ids, form.exercise_item_key.as_deref(), forward);
            form.select_item(next);
        }
        _ => {}
    }
}

pub fn handle_add_exercise_modal_input(app: &mut App, key: KeyEvent) {
    let mut submission = None;

    if let ActiveModal::AddExercise {
        ref mut form,
        ref mut focused_field,
        ref mut error_message,
        ..
    } = app.active_modal
    {
        *error_message = None;

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Enter && *focused_field == AddExerciseField::Cancel)
        {
            close_editor(app);
            return;
        }
        if let Some(forward) = focus_step(key.code) {
            *focused_field = cycle_field(&ADD_EXERCISE_FIELDS, *focused_field, forward);
            return;
        }
        match (key.code, *focused_field) {
            (KeyCode::Left, field) => cycle_add_exercise_choice(form, field, false),
            (KeyCode::Right, field) => cycle_add_exercise_choice(form, field, true),
            (KeyCode::Enter, AddExerciseField::Confirm) => submission = Some(form.clone()),
            (KeyCode::Enter, field) => {
                *focused_field = cycle_field(&ADD_EXERCISE_FIELDS, field, true);
            }
            (code, AddExerciseField::Load) => edit_text(&mut form.load, code, is_decimal_char),
            (code, AddExerciseField::Sets) => {
                edit_text(&mut form.sets, code, |c| c.is_ascii_digit());
            }
            (code, AddExerciseField::Reps) => edit_text(&mut form.reps, code, |_| true),
            _ => {}
        }
    }

    if let Some(form) = submission {
        match app.apply(Action::SaveTemplateExercise(form)) {
            Ok(()) => app.active_modal = ActiveModal::None,
            Err(e) => set_modal_error(app, e.to_string()),
        }
    }
}

// --- Edit Exercise Defaults ---

const EXERCISE_DEFAULTS_FIELDS: [ExerciseDefaultsField; 5] = [
    ExerciseDefaultsField::Load,
    ExerciseDefaultsField::Sets,
    ExerciseDefaultsField::Reps,
    ExerciseDefaultsField::Confirm,
    ExerciseDefaultsField::Cancel,
];

pub fn handle_edit_exercise_modal_input(app: &mut App, key: KeyEvent) {
    let mut submission: Option<ExerciseDefaultsForm> = None;

    if let ActiveModal::EditExercise {
        ref mut form,
        ref mut focused_field,
        ref mut error_message,
        ..
    } = app.active_modal
    {
        *error_message = None;

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Enter && *focused_field == ExerciseDefaultsField::Cancel)
        {
            close_editor(app);
            return;
        }
        if let Some(forward) = focus_step(key.code) {
            *focused_field = cycle_field(&EXERCISE_DEFAULTS_FIELDS, *focused_field, forward);
            return;
        }
        match (key.code, *focused_field) {
            (KeyCode::Enter, ExerciseDefaultsField::Confirm) => submission = Some(form.clone()),
            (KeyCode::Enter, field) => {
                *focused_field = cycle_field(&EXERCISE_DEFAULTS_FIELDS, field, true);
            }
            (code, ExerciseDefaultsField::Load) => edit_text(&mut form.load, code, is_decimal_char),
            (code, ExerciseDefaultsField::Sets) => {
                edit_text(&mut form.sets, code, |c| c.is_ascii_digit());
            }
            (code, ExerciseDefaultsField::Reps) => edit_text(&mut form.reps, code, |_| true),
            _ => {}
        }
    }

    if let Some(form) = submission {
        match app.apply(Action::EditTemplateExercise(form)) {
            Ok(()) => app.active_modal = ActiveModal::None,
            Err(e) => set_modal_error(app, e.to_string()),
        }
    }
}

// --- Body Measurements ---

pub fn measurement_fields() -> Vec<MeasurementField> {
    let mut fields = vec![MeasurementField::Date];
    fields.extend((0..BODY_MEASUREMENTS.len()).map(MeasurementField::Value));
    fields.push(MeasurementField::Notes);
    fields.push(MeasurementField::Confirm);
    fields.push(MeasurementField::Cancel);
    fields
}

fn edit_measurement_value(form: &mut MeasurementForm, index: usize, code: KeyCode) {
    let Some(def) = BODY_MEASUREMENTS.get(index) else {
        return;
    };
    let mut value = form.value(def.key).to_string();
    edit_text(&mut value, code, |c| is_decimal_char(c) || c == '-');
    form.set_value(def.key, value);
}

pub fn handle_measurement_modal_input(app: &mut App, key: KeyEvent) {
    let mut submission: Option<MeasurementForm> = None;

    if let ActiveModal::Measurement {
        ref mut form,
        ref mut focused_field,
        ref mut error_message,
    } = app.active_modal
    {
        *error_message = None;

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Enter && *focused_field == MeasurementField::Cancel)
        {
            close_editor(app);
            return;
        }
        if let Some(forward) = focus_step(key.code) {
            *focused_field = cycle_field(&measurement_fields(), *focused_field, forward);
            return;
        }
        match (key.code, *focused_field) {
            (KeyCode::Enter, MeasurementField::Confirm) => submission = Some(form.clone()),
            (KeyCode::Enter, field) => {
                *focused_field = cycle_field(&measurement_fields(), field, true);
            }
            (code, MeasurementField::Date) => {
                edit_text(&mut form.date, code, |c| c.is_ascii_digit() || c == '-');
            }
            (code, MeasurementField::Value(index)) => edit_measurement_value(form, index, code),
            (code, MeasurementField::Notes) => edit_text(&mut form.notes, code, |_| true),
            _ => {}
        }
    }

    if let Some(form) = submission {
        match app.apply(Action::SaveMeasurement(form)) {
            Ok(()) => app.active_modal = ActiveModal::None,
            Err(e) => set_modal_error(app, e.to_string()),
        }
    }
}

fn set_modal_error(app: &mut App, message: String) {
    match &mut app.active_modal {
        ActiveModal::EditDay { error_message, .. }
        | ActiveModal::AddExercise { error_message, .. }
        | ActiveModal::EditExercise { error_message, .. }
        | ActiveModal::Measurement { error_message, .. } => *error_message = Some(message),
        ActiveModal::None | ActiveModal::Help => app.set_message(NoticeLevel::Warning, message),
    }
}
