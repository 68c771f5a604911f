// didifit-tui/src/app/actions.rs
use super::state::{
    ActiveModal, AddExerciseField, App, EditDayField, ExerciseDefaultsField, LogField,
    MeasurementField,
};
use didifit_lib::{
    Action, ActionError, AddExerciseForm, DayConfigForm, Editor, ExerciseDefaultsForm,
    MeasurementForm, Notice, View,
};

impl App {
    /// Dispatches an action and routes its notices.
    pub(crate) fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        let notices = self.service.dispatch(action)?;
        self.show_notices(notices);
        Ok(())
    }

    /// Like `apply`, but a rejection becomes a blocking notice.
    pub(crate) fn apply_or_notify(&mut self, action: Action) {
        if let Err(e) = self.apply(action) {
            self.notify_rejection(&e);
        }
    }

    pub(crate) fn notify_rejection(&mut self, error: &ActionError) {
        tracing::debug!(error = %error, "Action rejected");
        self.pending_notices.push_back(Notice::warning(error.to_string()));
    }

    pub(crate) fn navigate(&mut self, view: View) {
        self.active_modal = ActiveModal::None;
        self.apply_or_notify(Action::Navigate(view));
        self.refresh();
    }

    /// Id of the planned exercise under the cursor in the day detail.
    fn selected_planned_exercise(&self) -> Option<String> {
        let template = self.service.state.selected_template()?;
        let index = self.exercise_list_state.selected()?;
        template.exercises.get(index).map(|e| e.id.clone())
    }

    /// Measurement rows are shown newest first; map the cursor to an entry id.
    pub(crate) fn selected_measurement_id(&self) -> Option<String> {
        let index = self.measurement_table_state.selected()?;
        self.service
            .measurements_view()
            .into_iter()
            .nth(index)
            .map(|row| row.id)
    }
}

// --- Dashboard ---

pub fn select_highlighted_day(app: &mut App) {
    if let Some(day) = app.highlighted_day() {
        app.apply_or_notify(Action::SelectDay(day));
        app.exercise_list_state.select(Some(0));
    }
}

pub fn start_logging(app: &mut App) {
    match app.apply(Action::StartLogging) {
        Ok(()) => app.log_focus = LogField::Category(0),
        Err(e) => app.notify_rejection(&e),
    }
}

pub fn quick_add(app: &mut App) {
    app.apply_or_notify(Action::QuickAdd);
    if let Some(day) = app.service.state.selected_day() {
        app.day_list_state.select(Some(day.index()));
    }
    app.log_focus = LogField::Category(0);
}

pub fn submit_log(app: &mut App) {
    match app.apply(Action::SubmitLog) {
        Ok(()) => app.log_focus = LogField::Category(0),
        Err(e) => {
            match &e {
                ActionError::InvalidSlotValues { slot, focus, .. } => {
                    app.log_focus = LogField::Value(*slot, *focus);
                }
                ActionError::InvalidSlotExercise { slot } => app.log_focus = LogField::Item(*slot),
                _ => {}
            }
            app.notify_rejection(&e);
        }
    }
}

pub fn open_edit_day_modal(app: &mut App) {
    let Some(day) = app.highlighted_day() else {
        return;
    };
    app.apply_or_notify(Action::OpenEditDay(day));
    let Some(template) = app.service.state.template(day) else {
        return;
    };
    app.active_modal = ActiveModal::EditDay {
        form: DayConfigForm::for_template(template),
        focused_field: EditDayField::WorkoutDay,
        error_message: None,
    };
}

pub fn open_add_exercise_modal(app: &mut App) {
    if let Err(e) = app.apply(Action::OpenAddExercise) {
        app.notify_rejection(&e);
        return;
    }
    if let Some(Editor::AddExercise(day)) = app.service.state.editor {
        app.active_modal = ActiveModal::AddExercise {
            day,
            form: AddExerciseForm::default(),
            focused_field: AddExerciseField::Category,
            error_message: None,
        };
    }
}

pub fn open_edit_exercise_modal(app: &mut App) {
    let Some(exercise_id) = app.selected_planned_exercise() else {
        return;
    };
    app.apply_or_notify(Action::OpenEditExercise(exercise_id.clone()));
    let Some(Editor::ExerciseDefaults { day, .. }) = app.service.state.editor else {
        return;
    };
    let exercise = app
        .service
        .state
        .template(day)
        .and_then(|t| t.exercises.iter().find(|e| e.id == exercise_id));
    if let Some(exercise) = exercise {
        app.active_modal = ActiveModal::EditExercise {
            exercise_name: exercise.name.clone(),
            form: ExerciseDefaultsForm::for_exercise(exercise),
            focused_field: ExerciseDefaultsField::Load,
            error_message: None,
        };
    }
}

pub fn request_delete_planned_exercise(app: &mut App) {
    if let Some(exercise_id) = app.selected_planned_exercise() {
        app.apply_or_notify(Action::RequestDeleteTemplateExercise(exercise_id));
    }
}

// --- Measurements ---

pub fn open_measurement_modal(app: &mut App, id: Option<String>) {
    app.apply_or_notify(Action::OpenMeasurementEditor(id));
    let form = match &app.service.state.editor {
        Some(Editor::Measurement(Some(id))) => match app.service.state.measurement(id) {
            Some(entry) => MeasurementForm::for_entry(entry),
            None => MeasurementForm::new(app.today()),
        },
        Some(Editor::Measurement(None)) => MeasurementForm::new(app.today()),
        _ => return,
    };
    app.active_modal = ActiveModal::Measurement {
        form,
        focused_field: MeasurementField::Date,
        error_message: None,
    };
}

pub fn request_delete_measurement(app: &mut App) {
    if let Some(id) = app.selected_measurement_id() {
        app.apply_or_notify(Action::RequestDeleteMeasurement(id));
    }
}

pub fn close_editor(app: &mut App) {
    app.active_modal = ActiveModal::None;
    app.apply_or_notify(Action::CloseEditor);
}
