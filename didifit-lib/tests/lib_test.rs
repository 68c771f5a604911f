use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use didifit_lib::{
    default_templates, Action, ActionError, AddExerciseForm, AppService, Clock, Config,
    Confirmation, DashboardPanel, DayKey, Editor, ExerciseDefaultsForm, KeyValueStore,
    MeasurementForm, MemoryStore, NoticeLevel, SlotField, SqliteStore, Theme, View,
    WorkoutDayTemplate, HISTORY_KEY, MEASUREMENTS_KEY, SAVE_FAILED_MESSAGE, TEMPLATES_KEY,
    THEME_KEY,
};

// Helper function to create a test service over an empty in-memory store
fn create_test_service() -> Result<AppService<MemoryStore>> {
    service_over(MemoryStore::new())
}

fn service_over(store: MemoryStore) -> Result<AppService<MemoryStore>> {
    let mut service = AppService::with_store(Config::default(), store, "test_config.toml".into());
    let startup = service.take_startup_notices();
    anyhow::ensure!(startup.is_empty(), "unexpected startup notices: {startup:?}");
    Ok(service)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2024-06-03 is a Monday.
fn clock_on(day: NaiveDate) -> Clock {
    let now = Utc
        .from_utc_datetime(&day.and_hms_opt(18, 30, 0).unwrap());
    Clock::fixed(now, day)
}

fn monday() -> Clock {
    clock_on(date(2024, 6, 3))
}

fn fill_slot(
    service: &mut AppService<MemoryStore>,
    slot: usize,
    category: &str,
    item: &str,
    values: (&str, &str, &str),
) -> Result<()> {
    service.dispatch_at(
        Action::LogSelectCategory {
            slot,
            category_key: Some(category.to_string()),
        },
        &monday(),
    )?;
    service.dispatch_at(
        Action::LogSelectItem {
            slot,
            item_key: Some(item.to_string()),
        },
        &monday(),
    )?;
    for (field, value) in [
        (SlotField::Load, values.0),
        (SlotField::Sets, values.1),
        (SlotField::Reps, values.2),
    ] {
        service.dispatch_at(
            Action::LogSetField {
                slot,
                field,
                value: value.to_string(),
            },
            &monday(),
        )?;
    }
    Ok(())
}

fn start_logging(service: &mut AppService<MemoryStore>, day: DayKey) -> Result<()> {
    service.dispatch_at(Action::SelectDay(day), &monday())?;
    service.dispatch_at(Action::StartLogging, &monday())?;
    Ok(())
}

fn template(service: &AppService<MemoryStore>, day: DayKey) -> Result<WorkoutDayTemplate> {
    service
        .state
        .template(day)
        .cloned()
        .with_context(|| format!("missing template for {day}"))
}

fn measurement_form(values: &[(&str, &str)]) -> MeasurementForm {
    let mut form = MeasurementForm::new(date(2024, 6, 1));
    for (key, value) in values {
        form.set_value(key, *value);
    }
    form
}

// --- Bootstrap and persistence ---

#[test]
fn test_default_bootstrap_on_empty_storage() -> Result<()> {
    let service = create_test_service()?;
    let templates = &service.state.templates;
    assert_eq!(templates.len(), 7);

    let training: Vec<DayKey> = templates
        .iter()
        .filter(|t| t.is_workout_day)
        .map(|t| t.day_key)
        .collect();
    assert_eq!(training, vec![DayKey::Segunda, DayKey::Quarta, DayKey::Sexta]);
    for t in templates {
        if t.is_workout_day {
            assert!(!t.exercises.is_empty(), "{} has no exercises", t.day_key);
            assert!(!t.muscle_groups.is_empty());
        } else {
            assert!(t.exercises.is_empty());
            assert!(t.muscle_groups.is_empty());
        }
    }
    assert_eq!(service.state.theme, Theme::Light);
    assert_eq!(service.state.panel, DashboardPanel::Idle);

    // Hydration writes every record straight back
    assert_eq!(service.store.get(THEME_KEY)?.as_deref(), Some("light"));
    assert_eq!(service.store.get(HISTORY_KEY)?.as_deref(), Some("[]"));
    assert_eq!(service.store.get(MEASUREMENTS_KEY)?.as_deref(), Some("[]"));
    assert!(service.store.get(TEMPLATES_KEY)?.is_some());
    Ok(())
}

#[test]
fn test_template_list_of_wrong_length_is_regenerated() -> Result<()> {
    for length in [0usize, 1, 6, 8] {
        let mut week = default_templates();
        week.resize(length, WorkoutDayTemplate::rest_day(DayKey::Domingo));
        for t in &mut week {
            t.muscle_groups = vec!["Cardio".to_string()];
        }

        let mut store = MemoryStore::new();
        store.set(TEMPLATES_KEY, &serde_json::to_string(&week)?)?;
        let service = service_over(store)?;

        assert_eq!(service.state.templates.len(), 7, "length {length}");
        assert_eq!(
            template(&service, DayKey::Segunda)?.muscle_groups,
            vec!["Braços".to_string(), "Ombros".to_string()]
        );
    }
    Ok(())
}

#[test]
fn test_stored_templates_are_kept_and_normalized() -> Result<()> {
    let mut week = default_templates();
    week.reverse();
    let mut stored: Vec<serde_json::Value> = week
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    // Entries missing their lists are accepted with empty lists
    if let Some(entry) = stored.get_mut(3).and_then(|v| v.as_object_mut()) {
        entry.remove("exercises");
        entry.remove("muscleGroups");
    }

    let mut store = MemoryStore::new();
    store.set(TEMPLATES_KEY, &serde_json::to_string(&stored)?)?;
    let service = service_over(store)?;

    let order: Vec<DayKey> = service.state.templates.iter().map(|t| t.day_key).collect();
    assert_eq!(order[0], DayKey::Segunda);
    assert_eq!(order[6], DayKey::Domingo);
    let quinta = template(&service, DayKey::Quinta)?;
    assert!(quinta.exercises.is_empty());
    assert!(quinta.muscle_groups.is_empty());
    // Ids survive, so these are the stored templates rather than fresh defaults
    let stored_monday = week
        .iter()
        .find(|t| t.day_key == DayKey::Segunda)
        .context("no monday")?;
    assert_eq!(template(&service, DayKey::Segunda)?, *stored_monday);
    Ok(())
}

#[test]
fn test_old_template_format_is_regenerated() -> Result<()> {
    let mut entries = vec![serde_json::json!({
        "dayKey": "segunda",
        "dayName": "Segunda",
        "isWorkoutDay": true,
        "muscleGroups": ["Peito"],
        "exercises": [{ "id": "1", "name": "Supino", "sets": 3 }]
    })];
    for day in ["terca", "quarta", "quinta", "sexta", "sabado", "domingo"] {
        entries.push(serde_json::json!({ "dayKey": day, "dayName": day, "isWorkoutDay": false }));
    }
    let mut store = MemoryStore::new();
    store.set(TEMPLATES_KEY, &serde_json::to_string(&entries)?)?;
    let service = service_over(store)?;

    let monday = template(&service, DayKey::Segunda)?;
    assert_eq!(monday.exercises.len(), 3);
    assert!(monday.exercises.iter().all(|e| !e.category_key.is_empty()));
    Ok(())
}

#[test]
fn test_history_shape_checks() -> Result<()> {
    let old_history = r#"[{"id":"a","dateISO":"2024-01-01T10:00:00Z","dayKey":"segunda","exercises":[{"name":"Supino"}],"loggedExercises":[{"name":"Supino","load":40}]}]"#;
    let mut store = MemoryStore::new();
    store.set(HISTORY_KEY, old_history)?;
    store.set(MEASUREMENTS_KEY, r#"{"peso": 80}"#)?;
    let service = service_over(store)?;
    assert!(service.state.history.is_empty());
    assert!(service.state.measurements.is_empty());
    assert_eq!(service.store.get(HISTORY_KEY)?.as_deref(), Some("[]"));

    let current_history = r#"[{"id":"b","dateISO":"2024-01-01T10:00:00Z","dayKey":"quarta","loggedExercises":[{"categoryKey":"Costas","exerciseItemKey":"costas_remada_baixa","name":"Remada baixa","loadKg":50,"sets":3,"reps":"8-10"}],"notes":""}]"#;
    let mut store = MemoryStore::new();
    store.set(HISTORY_KEY, current_history)?;
    let service = service_over(store)?;
    assert_eq!(service.state.history.len(), 1);
    assert_eq!(service.state.history[0].logged_exercises[0].load_kg, 50.0);
    Ok(())
}

#[test]
fn test_undecodable_entries_are_dropped_one_by_one() -> Result<()> {
    let history = r#"[
        {"id":"a","dateISO":"2024-01-01T10:00:00Z","dayKey":"quarta","loggedExercises":[{"categoryKey":"Costas","exerciseItemKey":"costas_remada_baixa","name":"Remada baixa","loadKg":50,"sets":3,"reps":"8-10"}],"notes":""},
        {"id":"b","dateISO":"2024-01-03T10:00:00Z","dayKey":"sexta","loggedExercises":[{"categoryKey":"Costas","exerciseItemKey":"costas_remada_baixa","name":"Remada baixa","sets":3,"reps":"8-10"}],"notes":""}
    ]"#;
    let mut store = MemoryStore::new();
    store.set(HISTORY_KEY, history)?;
    let service = service_over(store)?;

    assert_eq!(service.state.history.len(), 1);
    assert_eq!(service.state.history[0].id, "a");
    let stored = service.store.get(HISTORY_KEY)?.context("history not re-saved")?;
    let stored: Vec<serde_json::Value> = serde_json::from_str(&stored)?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], "a");
    Ok(())
}

#[test]
fn test_broken_or_repeated_weekday_keeps_the_rest_of_the_week() -> Result<()> {
    let mut week = default_templates();
    // Wednesday turns into a second Monday, Friday no longer decodes
    week[2] = WorkoutDayTemplate::rest_day(DayKey::Segunda);
    let mut stored: Vec<serde_json::Value> = week
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    stored[4]["dayKey"] = serde_json::json!("someday");

    let mut store = MemoryStore::new();
    store.set(TEMPLATES_KEY, &serde_json::to_string(&stored)?)?;
    let service = service_over(store)?;

    assert_eq!(service.state.templates.len(), 7);
    // Stored Monday keeps its exercise ids
    assert_eq!(template(&service, DayKey::Segunda)?, week[0]);
    // Missing days come back as their defaults
    let quarta = template(&service, DayKey::Quarta)?;
    let sexta = template(&service, DayKey::Sexta)?;
    assert!(quarta.is_workout_day && !quarta.exercises.is_empty());
    assert!(sexta.is_workout_day && !sexta.exercises.is_empty());
    assert_ne!(sexta.exercises[0].id, week[4].exercises[0].id);
    Ok(())
}

#[test]
fn test_unreadable_records_fall_back() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(TEMPLATES_KEY, "{not json")?;
    store.set(HISTORY_KEY, "null")?;
    store.set(THEME_KEY, "Dark")?;
    let service = service_over(store)?;
    assert_eq!(service.state.templates.len(), 7);
    assert!(service.state.history.is_empty());
    assert_eq!(service.state.theme, Theme::Light);
    Ok(())
}

#[test]
fn test_save_then_load_reproduces_state() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::ToggleTheme, &monday())?;
    start_logging(&mut service, DayKey::Segunda)?;
    fill_slot(&mut service, 0, "Peito", "peito_supino_reto", ("62.5", "3", "8"))?;
    service.dispatch_at(Action::LogSetNotes("  felt strong ".to_string()), &monday())?;
    service.dispatch_at(Action::SubmitLog, &monday())?;
    service.dispatch_at(
        Action::SaveMeasurement(measurement_form(&[("peso", "80.4"), ("cintura", "82")])),
        &monday(),
    )?;

    service.persist()?;
    let reloaded = service_over(service.store.clone())?;
    assert!(reloaded.state.same_data(&service.state));
    assert_eq!(reloaded.state.theme, Theme::Dark);
    assert_eq!(reloaded.state.history[0].notes, "felt strong");
    Ok(())
}

#[test]
fn test_sqlite_store_round_trip() -> Result<()> {
    let path = std::env::temp_dir().join(format!("didifit-test-{}.db", uuid::Uuid::new_v4()));
    {
        let store = SqliteStore::open(&path)?;
        let mut service = AppService::with_store(Config::default(), store, "test_config.toml".into());
        service.dispatch_at(Action::ToggleTheme, &monday())?;
        service.dispatch_at(
            Action::SaveMeasurement(measurement_form(&[("peso", "79")])),
            &monday(),
        )?;
    }
    let store = SqliteStore::open(&path)?;
    assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("dark"));
    let service = AppService::with_store(Config::default(), store, "test_config.toml".into());
    assert_eq!(service.state.theme, Theme::Dark);
    assert_eq!(service.state.measurements.len(), 1);
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_sqlite_upsert_replaces_value() -> Result<()> {
    let mut store = SqliteStore::open_in_memory()?;
    assert_eq!(store.get("missing")?, None);
    store.set(THEME_KEY, "light")?;
    store.set(THEME_KEY, "dark")?;
    assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("dark"));
    Ok(())
}

#[test]
fn test_save_failure_keeps_change_and_reports() -> Result<()> {
    let mut service = create_test_service()?;
    service.store.set_quota(Some(16));

    let notices = service.dispatch_at(Action::ToggleTheme, &monday())?;
    assert_eq!(service.state.theme, Theme::Dark);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, SAVE_FAILED_MESSAGE);
    // The write was dropped
    assert_eq!(service.store.get(THEME_KEY)?.as_deref(), Some("light"));
    Ok(())
}

#[test]
fn test_startup_save_failure_is_reported() -> Result<()> {
    let mut service = AppService::with_store(
        Config::default(),
        MemoryStore::with_quota(8),
        "test_config.toml".into(),
    );
    let notices = service.take_startup_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(service.take_startup_notices().is_empty());
    assert_eq!(service.state.templates.len(), 7);
    Ok(())
}

// --- Dashboard state machine and logging ---

#[test]
fn test_logging_requires_selected_day() -> Result<()> {
    let mut service = create_test_service()?;
    let result = service.dispatch_at(Action::StartLogging, &monday());
    assert_eq!(result, Err(ActionError::NoDaySelected));
    assert_eq!(service.state.panel, DashboardPanel::Idle);
    Ok(())
}

#[test]
fn test_logging_rest_day_stays_in_detail() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::SelectDay(DayKey::Terca), &monday())?;
    let result = service.dispatch_at(Action::StartLogging, &monday());
    assert_eq!(result, Err(ActionError::NotATrainingDay));
    assert_eq!(service.state.panel, DashboardPanel::DayDetail(DayKey::Terca));
    assert_eq!(service.state.selected_day(), Some(DayKey::Terca));
    Ok(())
}

#[test]
fn test_logging_training_day_without_groups_is_rejected() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::OpenEditDay(DayKey::Quinta), &monday())?;
    service.dispatch_at(
        Action::SaveDayConfiguration {
            is_workout_day: true,
            muscle_groups: Vec::new(),
        },
        &monday(),
    )?;
    service.dispatch_at(Action::SelectDay(DayKey::Quinta), &monday())?;
    let result = service.dispatch_at(Action::StartLogging, &monday());
    assert_eq!(result, Err(ActionError::MuscleGroupsUndefined));
    assert!(!service.state.is_logging());
    Ok(())
}

#[test]
fn test_zero_slot_submission_is_rejected() -> Result<()> {
    let mut service = create_test_service()?;
    start_logging(&mut service, DayKey::Segunda)?;
    // A category alone does not make a slot count
    service.dispatch_at(
        Action::LogSelectCategory {
            slot: 2,
            category_key: Some("Peito".to_string()),
        },
        &monday(),
    )?;
    let result = service.dispatch_at(Action::SubmitLog, &monday());
    assert_eq!(result, Err(ActionError::NoExercisesLogged));
    assert!(service.state.history.is_empty());
    assert!(service.state.is_logging());
    Ok(())
}

#[test]
fn test_invalid_slot_is_named() -> Result<()> {
    let mut service = create_test_service()?;
    start_logging(&mut service, DayKey::Segunda)?;
    fill_slot(&mut service, 0, "Peito", "peito_supino_reto", ("60", "3", "10"))?;
    fill_slot(&mut service, 2, "Bíceps", "biceps_rosca_direta", ("12", "0", "10"))?;

    let err = service
        .dispatch_at(Action::SubmitLog, &monday())
        .err()
        .context("submission should fail")?;
    assert!(matches!(
        err,
        ActionError::InvalidSlotValues {
            slot: 2,
            focus: SlotField::Sets,
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains("slot 3"), "{message}");
    assert!(message.contains("Rosca direta (barra)"), "{message}");
    assert!(service.state.history.is_empty());
    Ok(())
}

#[test]
fn test_successful_log_returns_to_day_detail() -> Result<()> {
    let mut service = create_test_service()?;
    start_logging(&mut service, DayKey::Segunda)?;
    fill_slot(&mut service, 0, "Peito", "peito_supino_reto", ("60", "3", " 8-10 "))?;
    fill_slot(&mut service, 4, "Ombros", "ombros_desenvolvimento", ("14", "4", "12"))?;

    let notices = service.dispatch_at(Action::SubmitLog, &monday())?;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(service.state.panel, DashboardPanel::DayDetail(DayKey::Segunda));

    let log = service.state.history.first().context("log not appended")?;
    assert_eq!(log.day_key, DayKey::Segunda);
    assert_eq!(log.date_iso, monday().now);
    assert_eq!(log.logged_exercises.len(), 2);
    assert_eq!(log.logged_exercises[0].reps, "8-10");
    assert_eq!(log.logged_exercises[1].name, "Desenvolvimento com halteres ou máquina");

    let stored = service.store.get(HISTORY_KEY)?.context("history not stored")?;
    assert!(stored.contains("\"dateISO\""));
    assert!(stored.contains("\"loggedExercises\""));

    let dashboard = service.dashboard_view(monday().today);
    assert_eq!(dashboard.recent.len(), 1);
    Ok(())
}

#[test]
fn test_log_rejected_when_day_stops_being_loggable() -> Result<()> {
    let mut service = create_test_service()?;
    start_logging(&mut service, DayKey::Quarta)?;
    fill_slot(&mut service, 0, "Costas", "costas_barra_fixa", ("0", "3", "Máx"))?;
    service.dispatch_at(Action::OpenEditDay(DayKey::Quarta), &monday())?;
    service.dispatch_at(
        Action::SaveDayConfiguration {
            is_workout_day: false,
            muscle_groups: vec!["Costas".to_string()],
        },
        &monday(),
    )?;
    let result = service.dispatch_at(Action::SubmitLog, &monday());
    assert_eq!(result, Err(ActionError::CannotSaveLog));
    assert!(service.state.history.is_empty());
    Ok(())
}

#[test]
fn test_cancel_log_needs_confirmation() -> Result<()> {
    let mut service = create_test_service()?;
    start_logging(&mut service, DayKey::Sexta)?;
    service.dispatch_at(Action::RequestCancelLog, &monday())?;
    assert_eq!(service.state.pending_confirmation, Some(Confirmation::CancelLog));

    service.dispatch_at(Action::Dismiss, &monday())?;
    assert!(service.state.is_logging());

    service.dispatch_at(Action::RequestCancelLog, &monday())?;
    service.dispatch_at(Action::Confirm, &monday())?;
    assert_eq!(service.state.panel, DashboardPanel::DayDetail(DayKey::Sexta));
    assert!(service.state.history.is_empty());
    Ok(())
}

#[test]
fn test_navigating_away_resets_dashboard() -> Result<()> {
    let mut service = create_test_service()?;
    start_logging(&mut service, DayKey::Segunda)?;
    service.dispatch_at(Action::Navigate(View::History), &monday())?;
    assert_eq!(service.state.view, View::History);
    assert_eq!(service.state.panel, DashboardPanel::Idle);

    service.dispatch_at(Action::Navigate(View::Dashboard), &monday())?;
    assert_eq!(service.state.panel, DashboardPanel::Idle);
    Ok(())
}

#[test]
fn test_quick_add_follows_today() -> Result<()> {
    let mut service = create_test_service()?;

    service.dispatch_at(Action::QuickAdd, &monday())?;
    assert!(matches!(
        service.state.panel,
        DashboardPanel::Logging {
            day: DayKey::Segunda,
            ..
        }
    ));

    // Tuesday is a rest day
    let tuesday = clock_on(date(2024, 6, 4));
    assert_eq!(
        service.dispatch_at(Action::QuickAdd, &tuesday),
        Err(ActionError::TodayIsRestDay)
    );

    // Thursday becomes a training day without groups
    service.dispatch_at(Action::OpenEditDay(DayKey::Quinta), &monday())?;
    service.dispatch_at(
        Action::SaveDayConfiguration {
            is_workout_day: true,
            muscle_groups: Vec::new(),
        },
        &monday(),
    )?;
    let thursday = clock_on(date(2024, 6, 6));
    let notices = service.dispatch_at(Action::QuickAdd, &thursday)?;
    assert_eq!(service.state.panel, DashboardPanel::DayDetail(DayKey::Quinta));
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    Ok(())
}

#[test]
fn test_quick_add_only_on_dashboard() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::Navigate(View::Measurements), &monday())?;
    let notices = service.dispatch_at(Action::QuickAdd, &monday())?;
    assert!(notices.is_empty());
    assert_eq!(service.state.panel, DashboardPanel::Idle);
    Ok(())
}

// --- Template editing ---

fn add_exercise(service: &mut AppService<MemoryStore>, category: &str, item: &str) -> Result<()> {
    service.dispatch_at(Action::OpenAddExercise, &monday())?;
    let mut form = AddExerciseForm::default();
    form.select_category(Some(category));
    form.select_item(Some(item));
    form.load = "20".to_string();
    form.reps = "12-15".to_string();
    service.dispatch_at(Action::SaveTemplateExercise(form), &monday())?;
    Ok(())
}

#[test]
fn test_add_then_delete_exercise_round_trip() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::SelectDay(DayKey::Sexta), &monday())?;
    let before = template(&service, DayKey::Sexta)?.exercises;

    add_exercise(&mut service, "Panturrilha", "pant_elevacao_pe")?;
    let after_add = template(&service, DayKey::Sexta)?.exercises;
    assert_eq!(after_add.len(), before.len() + 1);
    let added = after_add.last().context("nothing added")?.clone();
    assert_eq!(added.name, "Elevação em pé (Smith ou máquina específica)");
    assert_eq!(added.default_sets, 3);
    assert_eq!(service.state.editor, None);

    service.dispatch_at(Action::RequestDeleteTemplateExercise(added.id.clone()), &monday())?;
    let prompt = service
        .state
        .pending_confirmation
        .as_ref()
        .map(Confirmation::prompt)
        .context("no confirmation pending")?;
    assert!(prompt.contains(&added.name));
    assert_eq!(template(&service, DayKey::Sexta)?.exercises.len(), before.len() + 1);

    service.dispatch_at(Action::Confirm, &monday())?;
    assert_eq!(template(&service, DayKey::Sexta)?.exercises, before);
    assert_eq!(service.state.pending_confirmation, None);
    Ok(())
}

#[test]
fn test_dismissed_delete_keeps_exercise() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::SelectDay(DayKey::Segunda), &monday())?;
    let before = template(&service, DayKey::Segunda)?.exercises;
    service.dispatch_at(Action::RequestDeleteTemplateExercise(before[0].id.clone()), &monday())?;
    service.dispatch_at(Action::Dismiss, &monday())?;
    assert_eq!(template(&service, DayKey::Segunda)?.exercises, before);
    Ok(())
}

#[test]
fn test_delete_without_confirmation_when_disabled() -> Result<()> {
    let mut service = create_test_service()?;
    service.config.confirm_deletes = false;
    service.dispatch_at(Action::SelectDay(DayKey::Segunda), &monday())?;
    let first = template(&service, DayKey::Segunda)?.exercises[0].id.clone();
    service.dispatch_at(Action::RequestDeleteTemplateExercise(first.clone()), &monday())?;
    assert_eq!(service.state.pending_confirmation, None);
    assert!(template(&service, DayKey::Segunda)?
        .exercises
        .iter()
        .all(|e| e.id != first));
    Ok(())
}

#[test]
fn test_add_exercise_requires_training_day() -> Result<()> {
    let mut service = create_test_service()?;
    assert_eq!(
        service.dispatch_at(Action::OpenAddExercise, &monday()),
        Err(ActionError::AddExerciseRequiresTrainingDay)
    );
    service.dispatch_at(Action::SelectDay(DayKey::Domingo), &monday())?;
    assert_eq!(
        service.dispatch_at(Action::OpenAddExercise, &monday()),
        Err(ActionError::AddExerciseRequiresTrainingDay)
    );
    assert_eq!(service.state.editor, None);
    Ok(())
}

#[test]
fn test_incomplete_template_exercise_is_rejected() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::SelectDay(DayKey::Segunda), &monday())?;
    service.dispatch_at(Action::OpenAddExercise, &monday())?;
    let before = template(&service, DayKey::Segunda)?.exercises;

    let mut form = AddExerciseForm::default();
    form.select_category(Some("Peito"));
    assert_eq!(
        service.dispatch_at(Action::SaveTemplateExercise(form.clone()), &monday()),
        Err(ActionError::IncompleteTemplateExercise)
    );

    form.select_item(Some("costas_barra_fixa"));
    assert_eq!(
        service.dispatch_at(Action::SaveTemplateExercise(form), &monday()),
        Err(ActionError::UnknownExercise)
    );
    assert_eq!(template(&service, DayKey::Segunda)?.exercises, before);
    assert_eq!(service.state.editor, Some(Editor::AddExercise(DayKey::Segunda)));
    Ok(())
}

#[test]
fn test_edit_template_exercise_defaults() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::SelectDay(DayKey::Segunda), &monday())?;
    let exercise = template(&service, DayKey::Segunda)?.exercises[0].clone();
    service.dispatch_at(Action::OpenEditExercise(exercise.id.clone()), &monday())?;

    let mut form = ExerciseDefaultsForm::for_exercise(&exercise);
    form.reps = "   ".to_string();
    assert_eq!(
        service.dispatch_at(Action::EditTemplateExercise(form.clone()), &monday()),
        Err(ActionError::InvalidExerciseDefaults)
    );

    form.load = "-5".to_string();
    form.sets = "-2".to_string();
    form.reps = "5".to_string();
    service.dispatch_at(Action::EditTemplateExercise(form), &monday())?;
    let edited = template(&service, DayKey::Segunda)?.exercises[0].clone();
    assert_eq!(edited.default_load_kg, 0.0);
    assert_eq!(edited.default_sets, 1);
    assert_eq!(edited.default_reps, "5");
    assert_eq!(edited.id, exercise.id);
    assert_eq!(service.state.editor, None);
    Ok(())
}

#[test]
fn test_day_configuration() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::OpenEditDay(DayKey::Sabado), &monday())?;
    service.dispatch_at(
        Action::SaveDayConfiguration {
            is_workout_day: true,
            muscle_groups: vec!["Cardio".to_string(), "Braços".to_string()],
        },
        &monday(),
    )?;
    let saturday = template(&service, DayKey::Sabado)?;
    assert!(saturday.is_workout_day);
    assert_eq!(saturday.muscle_groups, vec!["Braços".to_string(), "Cardio".to_string()]);
    assert_eq!(service.state.editor, None);

    service.dispatch_at(Action::OpenEditDay(DayKey::Sabado), &monday())?;
    assert_eq!(
        service.dispatch_at(
            Action::SaveDayConfiguration {
                is_workout_day: true,
                muscle_groups: vec!["Glúteos".to_string()],
            },
            &monday(),
        ),
        Err(ActionError::UnknownMuscleGroup("Glúteos".to_string()))
    );

    service.dispatch_at(
        Action::SaveDayConfiguration {
            is_workout_day: false,
            muscle_groups: vec!["Cardio".to_string()],
        },
        &monday(),
    )?;
    let saturday = template(&service, DayKey::Sabado)?;
    assert!(!saturday.is_workout_day);
    assert!(saturday.muscle_groups.is_empty());
    Ok(())
}

// --- Body measurements ---

#[test]
fn test_single_measurement_entry() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::Navigate(View::Measurements), &monday())?;
    service.dispatch_at(Action::OpenMeasurementEditor(None), &monday())?;
    let notices = service.dispatch_at(
        Action::SaveMeasurement(measurement_form(&[("peso", "80")])),
        &monday(),
    )?;
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(service.state.measurements.len(), 1);
    let entry = &service.state.measurements[0];
    assert_eq!(entry.measurements.len(), 1);
    assert_eq!(entry.measurements.get("peso"), Some(&80.0));
    assert_eq!(entry.date_iso, date(2024, 6, 1));
    assert_eq!(service.state.editor, None);
    Ok(())
}

#[test]
fn test_blank_measurement_is_rejected() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::OpenMeasurementEditor(None), &monday())?;
    let result = service.dispatch_at(
        Action::SaveMeasurement(measurement_form(&[("peso", "  "), ("altura", "")])),
        &monday(),
    );
    assert_eq!(result, Err(ActionError::NoMeasurements));
    assert!(service.state.measurements.is_empty());
    assert_eq!(service.state.editor, Some(Editor::Measurement(None)));

    let mut form = measurement_form(&[("peso", "80")]);
    form.date = String::new();
    assert_eq!(
        service.dispatch_at(Action::SaveMeasurement(form), &monday()),
        Err(ActionError::MissingMeasurementDate)
    );
    Ok(())
}

#[test]
fn test_negative_measurement_names_first_offender() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(
        Action::SaveMeasurement(measurement_form(&[("peso", "80")])),
        &monday(),
    )?;
    let existing = service.state.measurements[0].clone();

    let mut form = measurement_form(&[("cintura", "-3"), ("altura", "-1"), ("peso", "81")]);
    form.id = Some(existing.id.clone());
    let err = service
        .dispatch_at(Action::SaveMeasurement(form), &monday())
        .err()
        .context("negative value accepted")?;
    assert_eq!(
        err,
        ActionError::InvalidMeasurement {
            key: "altura",
            name: "Altura"
        }
    );
    assert!(err.to_string().contains("Altura"));
    assert_eq!(service.state.measurements, vec![existing]);
    Ok(())
}

#[test]
fn test_edit_measurement_in_place() -> Result<()> {
    let mut service = create_test_service()?;
    for peso in ["80", "79.5"] {
        service.dispatch_at(
            Action::SaveMeasurement(measurement_form(&[("peso", peso)])),
            &monday(),
        )?;
    }
    let target = service.state.measurements[0].clone();
    service.dispatch_at(Action::OpenMeasurementEditor(Some(target.id.clone())), &monday())?;
    assert_eq!(
        service.state.editor,
        Some(Editor::Measurement(Some(target.id.clone())))
    );

    let mut form = MeasurementForm::for_entry(&target);
    assert_eq!(form.value("peso"), "80");
    form.set_value("peso", "");
    form.set_value("coxaDir", "58");
    form.date = "2024-05-20".to_string();
    form.notes = " after holidays ".to_string();
    let notices = service.dispatch_at(Action::SaveMeasurement(form), &monday())?;
    assert!(notices[0].message.contains("updated"));

    assert_eq!(service.state.measurements.len(), 2);
    let edited = service.state.measurement(&target.id).context("entry vanished")?;
    assert_eq!(edited.measurements.len(), 1);
    assert_eq!(edited.measurements.get("coxaDir"), Some(&58.0));
    assert_eq!(edited.date_iso, date(2024, 5, 20));
    assert_eq!(edited.notes, "after holidays");
    Ok(())
}

#[test]
fn test_unknown_measurement_id_opens_a_new_entry() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(Action::OpenMeasurementEditor(Some("ghost".to_string())), &monday())?;
    assert_eq!(service.state.editor, Some(Editor::Measurement(None)));

    service.dispatch_at(
        Action::SaveMeasurement(measurement_form(&[("imc", "24.1")])),
        &monday(),
    )?;
    assert_eq!(service.state.measurements.len(), 1);
    assert_ne!(service.state.measurements[0].id, "ghost");
    Ok(())
}

#[test]
fn test_saving_a_vanished_measurement_is_rejected() -> Result<()> {
    let mut service = create_test_service()?;
    let mut form = measurement_form(&[("imc", "24.1")]);
    form.id = Some("ghost".to_string());
    let result = service.dispatch_at(Action::SaveMeasurement(form), &monday());
    assert_eq!(result, Err(ActionError::MeasurementNotFound));
    assert!(service.state.measurements.is_empty());
    assert_eq!(service.store.get(MEASUREMENTS_KEY)?.as_deref(), Some("[]"));
    Ok(())
}

#[test]
fn test_delete_measurement_after_confirmation() -> Result<()> {
    let mut service = create_test_service()?;
    service.dispatch_at(
        Action::SaveMeasurement(measurement_form(&[("peso", "80")])),
        &monday(),
    )?;
    let id = service.state.measurements[0].id.clone();

    service.dispatch_at(Action::RequestDeleteMeasurement(id), &monday())?;
    let prompt = service
        .state
        .pending_confirmation
        .as_ref()
        .map(Confirmation::prompt)
        .context("no confirmation pending")?;
    assert!(prompt.contains("01/06/2024"), "{prompt}");
    assert_eq!(service.state.measurements.len(), 1);

    service.dispatch_at(Action::Confirm, &monday())?;
    assert!(service.state.measurements.is_empty());
    assert_eq!(service.store.get(MEASUREMENTS_KEY)?.as_deref(), Some("[]"));
    Ok(())
}

#[test]
fn test_measurement_view_lists_newest_first() -> Result<()> {
    let mut service = create_test_service()?;
    for (day, peso) in [("2024-01-10", "82"), ("2024-03-02", "80")] {
        let mut form = measurement_form(&[("peso", peso), ("percGordura", "18")]);
        form.date = day.to_string();
        service.dispatch_at(Action::SaveMeasurement(form), &monday())?;
    }
    let rows = service.measurements_view();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "02/03/2024");
    assert_eq!(
        rows[0].values,
        vec![
            ("Peso Corporal".to_string(), "80 kg".to_string()),
            ("Percentual de Gordura".to_string(), "18 %".to_string()),
        ]
    );
    Ok(())
}

// --- Config ---

#[test]
fn test_config_is_created_and_reloaded() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("didifit-config-{}", uuid::Uuid::new_v4()));
    let path = didifit_lib::get_config_path_util(Some(dir.as_path()))?;
    assert!(!path.exists());

    let config = didifit_lib::load_config_util(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());

    let mut service = AppService::with_store(config, MemoryStore::new(), path.clone());
    service.config.confirm_deletes = false;
    service.config.colors.accent = "Cyan".to_string();
    service.save_config()?;

    let reloaded = didifit_lib::load_config_util(&path)?;
    assert!(!reloaded.confirm_deletes);
    assert_eq!(reloaded.colors.accent_color()?, didifit_lib::StandardColor::Cyan);

    std::fs::write(&path, "date_format = \"%Q\"\n")?;
    assert!(didifit_lib::load_config_util(&path).is_err());
    std::fs::write(&path, "date_format = \"%d/%m/%Y %H:%M\"\n")?;
    assert!(matches!(
        didifit_lib::load_config_util(&path),
        Err(didifit_lib::ConfigError::InvalidDateFormat(_))
    ));
    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_time_pattern_in_date_format_renders_iso_dates() -> Result<()> {
    let mut service = create_test_service()?;
    service.config.date_format = "%Y-%m-%d %H:%M".to_string();
    start_logging(&mut service, DayKey::Segunda)?;
    fill_slot(&mut service, 0, "Peito", "peito_supino_reto", ("60", "3", "10"))?;
    service.dispatch_at(Action::SubmitLog, &monday())?;

    let history = service.history_view();
    assert_eq!(history.len(), 1);
    assert!(NaiveDate::parse_from_str(&history[0].date, "%Y-%m-%d").is_ok());
    let dashboard = service.dashboard_view(date(2024, 6, 3));
    assert_eq!(dashboard.recent.len(), 1);
    Ok(())
}
