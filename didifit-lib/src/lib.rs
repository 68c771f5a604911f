// src/lib.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::error::Error as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// --- Declare modules ---
mod action;
pub mod catalog;
mod config;
mod defaults;
mod error;
mod forms;
mod history;
mod model;
mod persistence;
mod state;
mod store;
pub mod view;

// --- Expose public types ---
pub use action::{reduce, Action, Clock, Notice, NoticeLevel, Outcome};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, validate_date_format, Colors, Config, ConfigError, StandardColor,
};
pub use defaults::default_templates;
pub use error::ActionError;
pub use forms::{
    AddExerciseForm, DayConfigForm, ExerciseDefaultsForm, LogForm, LogSlot, MeasurementForm,
    MeasurementInput, SlotField,
};
pub use history::{all_logs, recent_logs, BACKFILL_LIMIT, RECENT_LIMIT};
pub use model::{
    new_id, BodyMeasurementLogEntry, DayKey, LoggedExerciseData, PlannedExercise, Theme, View,
    WorkoutDayTemplate, WorkoutLog, DAY_COUNT,
};
pub use persistence::{
    PersistError, HISTORY_KEY, MEASUREMENTS_KEY, TEMPLATES_KEY, THEME_KEY,
};
pub use state::{AppState, Confirmation, DashboardPanel, Editor};
pub use store::{get_db_path as get_db_path_util, KeyValueStore, MemoryStore, SqliteStore, StoreError};

/// Shown whenever a mutation could not be written to the store.
pub const SAVE_FAILED_MESSAGE: &str =
    "Could not save your data. Local storage may be full or unavailable.";

pub struct AppService<S: KeyValueStore = SqliteStore> {
    pub config: Config,
    pub state: AppState,
    pub store: S,
    pub config_path: PathBuf,
    pub db_path: Option<PathBuf>,
    startup_notices: Vec<Notice>,
}

impl AppService<SqliteStore> {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config/db path determination, loading, or opening the store fails.
    pub fn initialize(db_override: Option<&Path>, config_dir_override: Option<&Path>) -> Result<Self> {
        let config_path = config::get_config_path(config_dir_override)
            .context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        let db_path = match db_override {
            Some(path) => path.to_path_buf(),
            None => store::get_db_path().context("Failed to determine database path")?,
        };
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database at {db_path:?}"))?;

        let mut service = Self::with_store(config, store, config_path);
        service.db_path = Some(db_path);
        Ok(service)
    }
}

impl<S: KeyValueStore> AppService<S> {
    /// Hydrates state from `store` and writes the normalized records back.
    pub fn with_store(config: Config, mut store: S, config_path: PathBuf) -> Self {
        let (state, saved) = persistence::load(&mut store);
        let mut startup_notices = Vec::new();
        if let Err(e) = saved {
            warn!(error = %e, cause = ?e.source().map(ToString::to_string), "Could not write normalized state");
            startup_notices.push(Notice::error(SAVE_FAILED_MESSAGE));
        }
        info!(
            logs = state.history.len(),
            measurements = state.measurements.len(),
            theme = state.theme.as_str(),
            "State loaded"
        );
        Self {
            config,
            state,
            store,
            config_path,
            db_path: None,
            startup_notices,
        }
    }

    /// Notices raised while loading, handed out once.
    pub fn take_startup_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.startup_notices)
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    /// Applies an action using the system clock.
    /// # Errors
    /// Returns `ActionError` when the action is rejected; state is left untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Notice>, ActionError> {
        self.dispatch_at(action, &Clock::system())
    }

    /// Applies an action, then persists if it changed stored data. A failed
    /// write keeps the in-memory change and is reported as an error notice.
    /// # Errors
    /// Returns `ActionError` when the action is rejected; state is left untouched.
    pub fn dispatch_at(&mut self, action: Action, clock: &Clock) -> Result<Vec<Notice>, ActionError> {
        let outcome = action::reduce(&mut self.state, action, clock, &self.config)?;
        let mut notices = Vec::new();
        if outcome.persist && self.persist().is_err() {
            notices.push(Notice::error(SAVE_FAILED_MESSAGE));
        }
        notices.extend(outcome.notices);
        Ok(notices)
    }

    /// Writes the current state to the store.
    /// # Errors
    /// Returns the first failing write.
    pub fn persist(&mut self) -> Result<(), PersistError> {
        persistence::save(&mut self.store, &self.state).inspect_err(|e| {
            warn!(error = %e, cause = ?e.source().map(ToString::to_string), "Error saving data");
        })
    }

    pub fn dashboard_view(&self, today: NaiveDate) -> view::Dashboard {
        view::dashboard(&self.state, today, &self.config.date_format)
    }

    pub fn history_view(&self) -> Vec<view::LogSummary> {
        view::history_page(&self.state, &self.config.date_format)
    }

    pub fn measurements_view(&self) -> Vec<view::MeasurementRow> {
        view::measurements(&self.state, &self.config.date_format)
    }
}
