//src/state.rs
use crate::defaults;
use crate::forms::LogForm;
use crate::model::{BodyMeasurementLogEntry, DayKey, Theme, View, WorkoutDayTemplate, WorkoutLog};

/// Sub-panel shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardPanel {
    #[default]
    Idle,
    DayDetail(DayKey),
    Logging { day: DayKey, form: LogForm },
}

impl DashboardPanel {
    pub fn selected_day(&self) -> Option<DayKey> {
        match self {
            DashboardPanel::Idle => None,
            DashboardPanel::DayDetail(day) | DashboardPanel::Logging { day, .. } => Some(*day),
        }
    }
}

/// Which editor is open and what it targets. Input buffers live with the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor {
    DayConfig(DayKey),
    AddExercise(DayKey),
    ExerciseDefaults { day: DayKey, exercise_id: String },
    /// `None` creates a new entry.
    Measurement(Option<String>),
}

/// A destructive step waiting for an explicit yes/no.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    DeletePlannedExercise {
        day: DayKey,
        exercise_id: String,
        exercise_name: String,
    },
    DeleteMeasurement {
        id: String,
        date_label: String,
    },
    CancelLog,
}

impl Confirmation {
    pub fn prompt(&self) -> String {
        match self {
            Confirmation::DeletePlannedExercise {
                day, exercise_name, ..
            } => format!(
                "Delete the exercise \"{}\" from the {} template?",
                exercise_name,
                day.day_name()
            ),
            Confirmation::DeleteMeasurement { date_label, .. } => {
                format!("Delete the measurements recorded on {}?", date_label)
            }
            Confirmation::CancelLog => {
                "Cancel this workout log? Unsaved information will be lost.".to_string()
            }
        }
    }
}

/// Everything the application holds in memory. Only the four collections
/// and the theme are persisted; the rest resets on every start.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    pub view: View,
    pub templates: Vec<WorkoutDayTemplate>,
    pub history: Vec<WorkoutLog>,
    pub measurements: Vec<BodyMeasurementLogEntry>,
    pub panel: DashboardPanel,
    pub editor: Option<Editor>,
    pub pending_confirmation: Option<Confirmation>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_data(
            Theme::default(),
            defaults::default_templates(),
            Vec::new(),
            Vec::new(),
        )
    }
}

impl AppState {
    pub fn with_data(
        theme: Theme,
        templates: Vec<WorkoutDayTemplate>,
        history: Vec<WorkoutLog>,
        measurements: Vec<BodyMeasurementLogEntry>,
    ) -> Self {
        Self {
            theme,
            view: View::default(),
            templates,
            history,
            measurements,
            panel: DashboardPanel::Idle,
            editor: None,
            pending_confirmation: None,
        }
    }

    pub fn template(&self, day: DayKey) -> Option<&WorkoutDayTemplate> {
        self.templates.iter().find(|t| t.day_key == day)
    }

    pub fn template_mut(&mut self, day: DayKey) -> Option<&mut WorkoutDayTemplate> {
        self.templates.iter_mut().find(|t| t.day_key == day)
    }

    pub fn selected_day(&self) -> Option<DayKey> {
        self.panel.selected_day()
    }

    pub fn selected_template(&self) -> Option<&WorkoutDayTemplate> {
        self.selected_day().and_then(|day| self.template(day))
    }

    pub fn is_logging(&self) -> bool {
        matches!(self.panel, DashboardPanel::Logging { .. })
    }

    pub fn log_form(&self) -> Option<&LogForm> {
        match &self.panel {
            DashboardPanel::Logging { form, .. } => Some(form),
            _ => None,
        }
    }

    pub(crate) fn log_form_mut(&mut self) -> Option<&mut LogForm> {
        match &mut self.panel {
            DashboardPanel::Logging { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn measurement(&self, id: &str) -> Option<&BodyMeasurementLogEntry> {
        self.measurements.iter().find(|m| m.id == id)
    }

    /// The collections and theme, which is what a save/load round trip must preserve.
    pub fn same_data(&self, other: &AppState) -> bool {
        self.theme == other.theme
            && self.templates == other.templates
            && self.history == other.history
            && self.measurements == other.measurements
    }
}
