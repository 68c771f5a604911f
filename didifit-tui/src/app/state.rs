// didifit-tui/src/app/state.rs
use chrono::{Datelike, Local, NaiveDate};
use didifit_lib::{
    AddExerciseForm, AppService, DayConfigForm, DayKey, ExerciseDefaultsForm, LogForm,
    MeasurementForm, Notice, NoticeLevel, SlotField, View,
};
use ratatui::widgets::{ListState, TableState};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::navigation_helpers::{list_clamp, table_clamp};

const MESSAGE_TTL: Duration = Duration::from_secs(5);

// Represents the active UI tab
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Dashboard,
    Measurements,
    History,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 3] = [ActiveTab::Dashboard, ActiveTab::Measurements, ActiveTab::History];

    pub fn title(self) -> &'static str {
        match self {
            ActiveTab::Dashboard => "Dashboard (F1)",
            ActiveTab::Measurements => "Measurements (F2)",
            ActiveTab::History => "History (F3)",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ActiveTab::Dashboard => 0,
            ActiveTab::Measurements => 1,
            ActiveTab::History => 2,
        }
    }

    pub fn view(self) -> View {
        match self {
            ActiveTab::Dashboard => View::Dashboard,
            ActiveTab::Measurements => View::Measurements,
            ActiveTab::History => View::History,
        }
    }

    pub fn from_view(view: View) -> Self {
        match view {
            View::Dashboard => ActiveTab::Dashboard,
            View::Measurements => ActiveTab::Measurements,
            View::History => ActiveTab::History,
        }
    }
}

/// Focusable inputs of the workout logging form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogField {
    Category(usize),
    Item(usize),
    Value(usize, SlotField),
    Notes,
}

impl LogField {
    /// Tab order. A slot without a category only exposes its category picker.
    pub fn order(form: &LogForm) -> Vec<LogField> {
        let mut fields = Vec::new();
        for (index, slot) in form.slots().iter().enumerate() {
            fields.push(LogField::Category(index));
            if slot.is_enabled() {
                fields.push(LogField::Item(index));
                fields.push(LogField::Value(index, SlotField::Load));
                fields.push(LogField::Value(index, SlotField::Sets));
                fields.push(LogField::Value(index, SlotField::Reps));
            }
        }
        fields.push(LogField::Notes);
        fields
    }
}

// Fields within the Edit Day modal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditDayField {
    WorkoutDay,
    Group(usize), // Index into the muscle group list
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddExerciseField {
    Category,
    Item,
    Load,
    Sets,
    Reps,
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseDefaultsField {
    Load,
    Sets,
    Reps,
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasurementField {
    Date,
    Value(usize), // Index into the measurement definitions
    Notes,
    Confirm,
    Cancel,
}

// Represents the state of active modals
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveModal {
    None,
    Help,
    EditDay {
        form: DayConfigForm,
        focused_field: EditDayField,
        error_message: Option<String>,
    },
    AddExercise {
        day: DayKey,
        form: AddExerciseForm,
        focused_field: AddExerciseField,
        error_message: Option<String>,
    },
    EditExercise {
        exercise_name: String, // Display only
        form: ExerciseDefaultsForm,
        focused_field: ExerciseDefaultsField,
        error_message: Option<String>,
    },
    Measurement {
        form: MeasurementForm,
        focused_field: MeasurementField,
        error_message: Option<String>,
    },
}

// Holds the application state
pub struct App {
    pub service: AppService,
    pub active_tab: ActiveTab,
    pub should_quit: bool,
    pub active_modal: ActiveModal,
    /// Warnings and errors waiting to be acknowledged, oldest first.
    pub pending_notices: VecDeque<Notice>,
    pub last_message: Option<(NoticeLevel, String)>, // For the status bar
    pub message_clear_time: Option<Instant>,

    // === Dashboard Tab State ===
    pub day_list_state: ListState,
    pub exercise_list_state: ListState,
    pub log_focus: LogField,

    // === Measurements Tab State ===
    pub measurement_table_state: TableState,

    // === History Tab State ===
    pub history_list_state: ListState,
}

impl App {
    pub fn new(mut service: AppService) -> Self {
        let startup_notices = service.take_startup_notices();
        let mut app = App {
            active_tab: ActiveTab::from_view(service.state.view),
            should_quit: false,
            active_modal: ActiveModal::None,
            pending_notices: VecDeque::new(),
            last_message: None,
            message_clear_time: None,
            day_list_state: ListState::default(),
            exercise_list_state: ListState::default(),
            log_focus: LogField::Category(0),
            measurement_table_state: TableState::default(),
            history_list_state: ListState::default(),
            service,
        };
        let today = DayKey::from_weekday(app.today().weekday());
        app.day_list_state.select(Some(today.index()));
        app.show_notices(startup_notices);
        app
    }

    /// Local calendar day used for "today" markers and quick-add.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    // Method to set status bar messages
    pub fn set_message(&mut self, level: NoticeLevel, msg: String) {
        self.last_message = Some((level, msg));
        self.message_clear_time = Some(Instant::now() + MESSAGE_TTL);
    }

    pub(crate) fn clear_expired_message(&mut self) {
        if let Some(clear_time) = self.message_clear_time {
            if Instant::now() >= clear_time {
                self.last_message = None;
                self.message_clear_time = None;
            }
        }
    }

    /// Info goes to the status bar; anything more serious blocks until dismissed.
    pub fn show_notices(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            match notice.level {
                NoticeLevel::Info => self.set_message(notice.level, notice.message),
                NoticeLevel::Warning | NoticeLevel::Error => self.pending_notices.push_back(notice),
            }
        }
    }

    /// Brings the widget selections back in line with the service state.
    /// Called before every draw.
    pub fn refresh(&mut self) {
        self.clear_expired_message();
        let state = &self.service.state;
        self.active_tab = ActiveTab::from_view(state.view);

        let exercise_count = state
            .selected_template()
            .filter(|t| t.is_workout_day)
            .map_or(0, |t| t.exercises.len());
        let history_count = state.history.len();
        let measurement_count = state.measurements.len();
        let log_fields = state.log_form().map(LogField::order);

        list_clamp(&mut self.exercise_list_state, exercise_count);
        list_clamp(&mut self.history_list_state, history_count);
        table_clamp(&mut self.measurement_table_state, measurement_count);
        if let Some(fields) = log_fields {
            if !fields.contains(&self.log_focus) {
                self.log_focus = fields.first().copied().unwrap_or(LogField::Notes);
            }
        }
    }

    /// The schedule day under the cursor.
    pub fn highlighted_day(&self) -> Option<DayKey> {
        self.day_list_state
            .selected()
            .and_then(|i| self.service.state.templates.get(i))
            .map(|t| t.day_key)
    }
}
