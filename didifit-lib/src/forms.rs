//src/forms.rs
//! Input buffers behind the logging form and the three editors, with the
//! validation that turns them into domain records.
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::catalog::{self, CatalogItem, BODY_MEASUREMENTS, MAX_LOG_EXERCISE_SLOTS, MUSCLE_GROUPS};
use crate::error::ActionError;
use crate::model::{
    new_id, BodyMeasurementLogEntry, DayKey, LoggedExerciseData, PlannedExercise,
    WorkoutDayTemplate,
};

pub const DEFAULT_LOAD_INPUT: &str = "0";
pub const DEFAULT_SETS_INPUT: &str = "3";
pub const DEFAULT_REPS_INPUT: &str = "10";

/// Numeric/text inputs of a logging slot, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    Load,
    Sets,
    Reps,
}

fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_integer(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

fn parse_reps(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// --- Workout logging form ---

#[derive(Debug, Clone, PartialEq)]
pub struct LogSlot {
    pub category_key: Option<String>,
    pub exercise_item_key: Option<String>,
    pub load: String,
    pub sets: String,
    pub reps: String,
}

impl Default for LogSlot {
    fn default() -> Self {
        Self {
            category_key: None,
            exercise_item_key: None,
            load: DEFAULT_LOAD_INPUT.to_string(),
            sets: DEFAULT_SETS_INPUT.to_string(),
            reps: DEFAULT_REPS_INPUT.to_string(),
        }
    }
}

impl LogSlot {
    /// Inputs of a slot are only editable once a category is chosen.
    pub fn is_enabled(&self) -> bool {
        self.category_key.is_some()
    }

    pub fn choices(&self) -> &'static [CatalogItem] {
        self.category_key
            .as_deref()
            .map(catalog::items_for)
            .unwrap_or(&[])
    }

    pub fn selected_item(&self) -> Option<&'static CatalogItem> {
        let item_key = self.exercise_item_key.as_deref()?;
        self.choices().iter().find(|i| i.id == item_key)
    }

    pub fn field(&self, field: SlotField) -> &str {
        match field {
            SlotField::Load => &self.load,
            SlotField::Sets => &self.sets,
            SlotField::Reps => &self.reps,
        }
    }

    fn field_mut(&mut self, field: SlotField) -> &mut String {
        match field {
            SlotField::Load => &mut self.load,
            SlotField::Sets => &mut self.sets,
            SlotField::Reps => &mut self.reps,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogForm {
    slots: Vec<LogSlot>,
    pub notes: String,
}

impl Default for LogForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LogForm {
    pub fn new() -> Self {
        Self {
            slots: vec![LogSlot::default(); MAX_LOG_EXERCISE_SLOTS],
            notes: String::new(),
        }
    }

    pub fn slots(&self) -> &[LogSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&LogSlot> {
        self.slots.get(index)
    }

    /// Choosing a known category enables the slot and offers its items;
    /// clearing it (or naming an unknown one) disables and resets the slot.
    pub fn select_category(&mut self, slot: usize, category_key: Option<&str>) {
        let Some(entry) = self.slots.get_mut(slot) else {
            return;
        };
        match category_key.and_then(catalog::category) {
            Some(category) => {
                entry.category_key = Some(category.key.to_string());
                entry.exercise_item_key = None;
            }
            None => *entry = LogSlot::default(),
        }
    }

    pub fn select_item(&mut self, slot: usize, item_key: Option<&str>) {
        let Some(entry) = self.slots.get_mut(slot) else {
            return;
        };
        if !entry.is_enabled() {
            return;
        }
        entry.exercise_item_key = item_key
            .filter(|key| entry.choices().iter().any(|i| i.id == *key))
            .map(str::to_string);
    }

    pub fn set_field(&mut self, slot: usize, field: SlotField, value: String) {
        if let Some(entry) = self.slots.get_mut(slot) {
            if entry.is_enabled() {
                *entry.field_mut(field) = value;
            }
        }
    }

    /// Collects every slot with both a category and an item selected.
    pub fn validate(&self) -> Result<Vec<LoggedExerciseData>, ActionError> {
        let mut logged = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let (Some(category_key), Some(item_key)) =
                (slot.category_key.as_deref(), slot.exercise_item_key.as_deref())
            else {
                continue;
            };
            let item = catalog::find_exercise(category_key, item_key)
                .ok_or(ActionError::InvalidSlotExercise { slot: index })?;

            let load = parse_number(&slot.load).filter(|v| *v >= 0.0);
            let sets = parse_integer(&slot.sets).filter(|v| *v >= 1);
            let reps = parse_reps(&slot.reps);

            let (Some(load_kg), Some(sets), Some(reps)) = (load, sets, reps) else {
                let focus = if load.is_none() {
                    SlotField::Load
                } else if sets.is_none() {
                    SlotField::Sets
                } else {
                    SlotField::Reps
                };
                return Err(ActionError::InvalidSlotValues {
                    slot: index,
                    exercise: item.name.to_string(),
                    focus,
                });
            };

            logged.push(LoggedExerciseData {
                category_key: category_key.to_string(),
                exercise_item_key: item.id.to_string(),
                name: item.name.to_string(),
                load_kg,
                sets,
                reps,
            });
        }

        if logged.is_empty() {
            return Err(ActionError::NoExercisesLogged);
        }
        Ok(logged)
    }
}

// --- Template exercise editors ---

#[derive(Debug, Clone, PartialEq)]
pub struct AddExerciseForm {
    pub category_key: Option<String>,
    pub exercise_item_key: Option<String>,
    pub load: String,
    pub sets: String,
    pub reps: String,
}

impl Default for AddExerciseForm {
    fn default() -> Self {
        Self {
            category_key: None,
            exercise_item_key: None,
            load: DEFAULT_LOAD_INPUT.to_string(),
            sets: DEFAULT_SETS_INPUT.to_string(),
            reps: DEFAULT_REPS_INPUT.to_string(),
        }
    }
}

impl AddExerciseForm {
    pub fn select_category(&mut self, category_key: Option<&str>) {
        self.category_key = category_key
            .and_then(catalog::category)
            .map(|c| c.key.to_string());
        self.exercise_item_key = None;
    }

    pub fn select_item(&mut self, item_key: Option<&str>) {
        self.exercise_item_key = item_key.map(str::to_string);
    }

    pub fn choices(&self) -> &'static [CatalogItem] {
        self.category_key
            .as_deref()
            .map(catalog::items_for)
            .unwrap_or(&[])
    }

    /// Builds the planned exercise. Load is clamped to >= 0 and sets to >= 1.
    pub fn build(&self) -> Result<PlannedExercise, ActionError> {
        let (Some(category_key), Some(item_key)) =
            (self.category_key.as_deref(), self.exercise_item_key.as_deref())
        else {
            return Err(ActionError::IncompleteTemplateExercise);
        };
        let load = parse_number(&self.load).ok_or(ActionError::IncompleteTemplateExercise)?;
        let sets = parse_integer(&self.sets).ok_or(ActionError::IncompleteTemplateExercise)?;
        let reps = parse_reps(&self.reps).ok_or(ActionError::IncompleteTemplateExercise)?;

        let item =
            catalog::find_exercise(category_key, item_key).ok_or(ActionError::UnknownExercise)?;

        Ok(PlannedExercise {
            id: new_id(),
            category_key: category_key.to_string(),
            exercise_item_key: item.id.to_string(),
            name: item.name.to_string(),
            default_load_kg: load.max(0.0),
            default_sets: sets.max(1),
            default_reps: reps,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDefaultsForm {
    pub exercise_id: String,
    pub load: String,
    pub sets: String,
    pub reps: String,
}

impl ExerciseDefaultsForm {
    pub fn for_exercise(exercise: &PlannedExercise) -> Self {
        Self {
            exercise_id: exercise.id.clone(),
            load: exercise.default_load_kg.to_string(),
            sets: exercise.default_sets.to_string(),
            reps: exercise.default_reps.clone(),
        }
    }

    /// Returns (load, sets, reps), clamped the same way as new exercises.
    pub fn parse(&self) -> Result<(f64, i64, String), ActionError> {
        match (
            parse_number(&self.load),
            parse_integer(&self.sets),
            parse_reps(&self.reps),
        ) {
            (Some(load), Some(sets), Some(reps)) => Ok((load.max(0.0), sets.max(1), reps)),
            _ => Err(ActionError::InvalidExerciseDefaults),
        }
    }
}

// --- Day configuration ---

#[derive(Debug, Clone, PartialEq)]
pub struct DayConfigForm {
    pub day: DayKey,
    pub is_workout_day: bool,
    pub muscle_groups: Vec<String>,
}

impl DayConfigForm {
    pub fn for_template(template: &WorkoutDayTemplate) -> Self {
        Self {
            day: template.day_key,
            is_workout_day: template.is_workout_day,
            muscle_groups: template.muscle_groups.clone(),
        }
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.muscle_groups.iter().any(|g| g == group)
    }

    pub fn toggle_group(&mut self, group: &str) {
        if self.has_group(group) {
            self.muscle_groups.retain(|g| g != group);
        } else {
            self.muscle_groups.push(group.to_string());
        }
    }

    /// Groups to store: empty for rest days, otherwise in catalog order.
    pub fn resolved_groups(&self) -> Result<Vec<String>, ActionError> {
        if !self.is_workout_day {
            return Ok(Vec::new());
        }
        if let Some(unknown) = self.muscle_groups.iter().find(|g| !catalog::is_muscle_group(g)) {
            return Err(ActionError::UnknownMuscleGroup(unknown.clone()));
        }
        Ok(MUSCLE_GROUPS
            .iter()
            .filter(|g| self.has_group(g))
            .map(|g| (*g).to_string())
            .collect())
    }
}

// --- Body measurements ---

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementForm {
    pub id: Option<String>,
    pub date: String,
    pub notes: String,
    values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementInput {
    pub date: NaiveDate,
    pub measurements: BTreeMap<String, f64>,
    pub notes: String,
}

impl MeasurementForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: None,
            date: today.format("%Y-%m-%d").to_string(),
            notes: String::new(),
            values: BTreeMap::new(),
        }
    }

    pub fn for_entry(entry: &BodyMeasurementLogEntry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            date: entry.date_iso.format("%Y-%m-%d").to_string(),
            notes: entry.notes.clone(),
            values: entry
                .measurements
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect(),
        }
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Walks the definitions in order: blanks are skipped, the first
    /// negative or non-numeric value rejects the whole form.
    pub fn validate(&self) -> Result<MeasurementInput, ActionError> {
        let date_input = self.date.trim();
        if date_input.is_empty() {
            return Err(ActionError::MissingMeasurementDate);
        }
        let date = NaiveDate::parse_from_str(date_input, "%Y-%m-%d")
            .map_err(|_| ActionError::InvalidMeasurementDate(date_input.to_string()))?;

        let mut measurements = BTreeMap::new();
        for def in BODY_MEASUREMENTS {
            let raw = self.value(def.key).trim();
            if raw.is_empty() {
                continue;
            }
            match parse_number(raw) {
                Some(value) if value >= 0.0 => {
                    measurements.insert(def.key.to_string(), value);
                }
                _ => {
                    return Err(ActionError::InvalidMeasurement {
                        key: def.key,
                        name: def.name,
                    })
                }
            }
        }

        if measurements.is_empty() {
            return Err(ActionError::NoMeasurements);
        }
        Ok(MeasurementInput {
            date,
            measurements,
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_slot(form: &mut LogForm, slot: usize, load: &str, sets: &str, reps: &str) {
        form.select_category(slot, Some("Peito"));
        form.select_item(slot, Some("peito_supino_reto"));
        form.set_field(slot, SlotField::Load, load.to_string());
        form.set_field(slot, SlotField::Sets, sets.to_string());
        form.set_field(slot, SlotField::Reps, reps.to_string());
    }

    #[test]
    fn clearing_category_resets_slot() {
        let mut form = LogForm::new();
        filled_slot(&mut form, 2, "40", "4", "12");
        form.select_category(2, None);
        assert_eq!(form.slot(2), Some(&LogSlot::default()));
        assert!(!form.slot(2).map_or(true, LogSlot::is_enabled));
    }

    #[test]
    fn disabled_slot_ignores_edits() {
        let mut form = LogForm::new();
        form.set_field(0, SlotField::Load, "99".to_string());
        form.select_item(0, Some("peito_supino_reto"));
        assert_eq!(form.slot(0), Some(&LogSlot::default()));
    }

    #[test]
    fn item_must_belong_to_selected_category() {
        let mut form = LogForm::new();
        form.select_category(0, Some("Costas"));
        form.select_item(0, Some("peito_supino_reto"));
        assert_eq!(form.slot(0).and_then(|s| s.exercise_item_key.clone()), None);
    }

    #[test]
    fn focus_follows_load_sets_reps_order() {
        let mut form = LogForm::new();
        filled_slot(&mut form, 1, "-5", "0", "");
        match form.validate() {
            Err(ActionError::InvalidSlotValues { slot, focus, .. }) => {
                assert_eq!(slot, 1);
                assert_eq!(focus, SlotField::Load);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        form.set_field(1, SlotField::Load, "20".to_string());
        assert!(matches!(
            form.validate(),
            Err(ActionError::InvalidSlotValues { focus: SlotField::Sets, .. })
        ));

        form.set_field(1, SlotField::Sets, "3".to_string());
        assert!(matches!(
            form.validate(),
            Err(ActionError::InvalidSlotValues { focus: SlotField::Reps, .. })
        ));
    }

    #[test]
    fn slot_without_item_is_not_considered() {
        let mut form = LogForm::new();
        form.select_category(0, Some("Peito"));
        form.set_field(0, SlotField::Load, "abc".to_string());
        assert_eq!(form.validate(), Err(ActionError::NoExercisesLogged));
    }

    #[test]
    fn nan_load_is_rejected() {
        let mut form = LogForm::new();
        filled_slot(&mut form, 0, "NaN", "3", "10");
        assert!(matches!(
            form.validate(),
            Err(ActionError::InvalidSlotValues { focus: SlotField::Load, .. })
        ));
    }

    #[test]
    fn day_groups_come_back_in_catalog_order() {
        let mut form = DayConfigForm {
            day: DayKey::Terca,
            is_workout_day: true,
            muscle_groups: Vec::new(),
        };
        form.toggle_group("Pernas");
        form.toggle_group("Braços");
        assert_eq!(
            form.resolved_groups(),
            Ok(vec!["Braços".to_string(), "Pernas".to_string()])
        );

        form.is_workout_day = false;
        assert_eq!(form.resolved_groups(), Ok(Vec::new()));
    }

    #[test]
    fn template_exercise_values_are_clamped() -> Result<(), ActionError> {
        let mut form = AddExerciseForm::default();
        form.select_category(Some("Ombros"));
        form.select_item(Some("ombros_remada_alta"));
        form.load = "-10".to_string();
        form.sets = "0".to_string();
        let exercise = form.build()?;
        assert_eq!(exercise.default_load_kg, 0.0);
        assert_eq!(exercise.default_sets, 1);
        assert_eq!(exercise.name, "Remada alta");
        Ok(())
    }

    #[test]
    fn measurement_rejects_non_numeric_values() {
        let mut form = MeasurementForm::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        form.set_value("cintura", "oitenta");
        assert_eq!(
            form.validate(),
            Err(ActionError::InvalidMeasurement {
                key: "cintura",
                name: "Cintura"
            })
        );
    }
}
