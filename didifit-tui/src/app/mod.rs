// didifit-tui/src/app/mod.rs
mod actions;
mod input;
mod modals;
pub mod navigation_helpers;
pub mod state;

pub use state::{
    ActiveModal, ActiveTab, AddExerciseField, App, EditDayField, ExerciseDefaultsField, LogField,
    MeasurementField,
};
