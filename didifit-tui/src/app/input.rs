// didifit-tui/src/app/input.rs
use super::{
    actions::{
        close_editor, open_add_exercise_modal, open_edit_day_modal, open_edit_exercise_modal,
        open_measurement_modal, quick_add, request_delete_measurement,
        request_delete_planned_exercise, select_highlighted_day, start_logging, submit_log,
    },
    modals::{
        handle_add_exercise_modal_input, handle_edit_day_modal_input,
        handle_edit_exercise_modal_input, handle_measurement_modal_input, TextEdit,
    },
    navigation_helpers::{
        cycle_choice, cycle_field, list_next, list_previous, table_next, table_previous,
    },
    state::{ActiveModal, ActiveTab, App, LogField},
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use didifit_lib::{catalog, Action, SlotField, DAY_COUNT};

/// Characters accepted by a logging form input.
fn accepts(field: SlotField, c: char) -> bool {
    match field {
        SlotField::Load => c.is_ascii_digit() || c == '.',
        SlotField::Sets => c.is_ascii_digit(),
        SlotField::Reps => !c.is_control(),
    }
}

/// Tabs are numbered from 1, for both the F-keys and the digit shortcuts.
fn tab_for_number(n: u8) -> Option<ActiveTab> {
    ActiveTab::ALL.get(usize::from(n).checked_sub(1)?).copied()
}

// Main key event handler method on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // A pending notice blocks everything until acknowledged
        if !self.pending_notices.is_empty() {
            self.handle_notice_input(key);
            return Ok(());
        }
        if self.service.state.pending_confirmation.is_some() {
            self.handle_confirmation_input(key);
            return Ok(());
        }
        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            return self.handle_modal_input(key);
        }

        // Function keys switch tabs even while the log form owns the keyboard
        if let KeyCode::F(n) = key.code {
            if let Some(tab) = tab_for_number(n) {
                self.navigate(tab.view());
                return Ok(());
            }
        }
        if self.active_tab == ActiveTab::Dashboard && self.service.state.is_logging() {
            self.handle_log_form_input(key);
            return Ok(());
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            KeyCode::Char('t') => self.apply_or_notify(Action::ToggleTheme),
            KeyCode::Char(c @ '1'..='3') => {
                let tab = c
                    .to_digit(10)
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(tab_for_number);
                if let Some(tab) = tab {
                    self.navigate(tab.view());
                }
            }
            _ => {
                // Delegate to tab-specific handler
                match self.active_tab {
                    ActiveTab::Dashboard => self.handle_dashboard_input(key),
                    ActiveTab::Measurements => self.handle_measurements_input(key),
                    ActiveTab::History => self.handle_history_input(key),
                }
            }
        }
        Ok(())
    }

    fn handle_notice_input(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
            self.pending_notices.pop_front();
        }
    }

    fn handle_confirmation_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.apply_or_notify(Action::Confirm);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.apply_or_notify(Action::Dismiss);
            }
            _ => {}
        }
    }

    // --- Modal Input Handling ---
    fn handle_modal_input(&mut self, key: KeyEvent) -> Result<()> {
        match self.active_modal {
            ActiveModal::Help => self.handle_help_modal_input(key),
            ActiveModal::EditDay { .. } => handle_edit_day_modal_input(self, key),
            ActiveModal::AddExercise { .. } => handle_add_exercise_modal_input(self, key),
            ActiveModal::EditExercise { .. } => handle_edit_exercise_modal_input(self, key),
            ActiveModal::Measurement { .. } => handle_measurement_modal_input(self, key),
            ActiveModal::None => {}
        }
        Ok(())
    }

    fn handle_help_modal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                self.active_modal = ActiveModal::None;
            }
            _ => {} // Ignore other keys in help
        }
    }

    // --- Tab-Specific Input Handling ---
    fn handle_dashboard_input(&mut self, key: KeyEvent) {
        let exercise_count = self
            .service
            .state
            .selected_template()
            .filter(|t| t.is_workout_day)
            .map_or(0, |t| t.exercises.len());
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => list_previous(&mut self.day_list_state, DAY_COUNT),
            KeyCode::Char('j') | KeyCode::Down => list_next(&mut self.day_list_state, DAY_COUNT),
            KeyCode::Enter => select_highlighted_day(self),
            KeyCode::Tab => list_next(&mut self.exercise_list_state, exercise_count),
            KeyCode::BackTab => list_previous(&mut self.exercise_list_state, exercise_count),
            KeyCode::Char('e') => open_edit_day_modal(self),
            KeyCode::Char('a') => open_add_exercise_modal(self),
            KeyCode::Char('E') => open_edit_exercise_modal(self),
            KeyCode::Char('d') | KeyCode::Delete => request_delete_planned_exercise(self),
            KeyCode::Char('l') => start_logging(self),
            KeyCode::Char('n') => quick_add(self),
            KeyCode::Esc => close_editor(self),
            _ => {}
        }
    }

    fn handle_log_form_input(&mut self, key: KeyEvent) {
        let fields = match self.service.state.log_form() {
            Some(form) => LogField::order(form),
            None => return,
        };
        match key.code {
            KeyCode::Esc => self.apply_or_notify(Action::RequestCancelLog),
            KeyCode::Enter => submit_log(self),
            KeyCode::Tab | KeyCode::Down => {
                self.log_focus = cycle_field(&fields, self.log_focus, true);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.log_focus = cycle_field(&fields, self.log_focus, false);
            }
            KeyCode::Left => self.cycle_log_choice(false),
            KeyCode::Right => self.cycle_log_choice(true),
            code => {
                if let Some(edit) = TextEdit::from_key(code) {
                    self.edit_log_text(edit);
                }
            }
        }
    }

    fn cycle_log_choice(&mut self, forward: bool) {
        let Some(form) = self.service.state.log_form() else {
            return;
        };
        let action = match self.log_focus {
            LogField::Category(slot) => {
                let current = form.slot(slot).and_then(|s| s.category_key.clone());
                let keys: Vec<&str> = catalog::category_keys().collect();
                Action::LogSelectCategory {
                    slot,
                    category_key: cycle_choice(&keys, current.as_deref(), forward)
                        .map(str::to_string),
                }
            }
            LogField::Item(slot) => {
                let Some(entry) = form.slot(slot) else {
                    return;
                };
                let ids: Vec<&str> = entry.choices().iter().map(|i| i.id).collect();
                Action::LogSelectItem {
                    slot,
                    item_key: cycle_choice(&ids, entry.exercise_item_key.as_deref(), forward)
                        .map(str::to_string),
                }
            }
            LogField::Value(..) | LogField::Notes => return,
        };
        self.apply_or_notify(action);
    }

    fn edit_log_text(&mut self, edit: TextEdit) {
        let Some(form) = self.service.state.log_form() else {
            return;
        };
        let action = match self.log_focus {
            LogField::Value(slot, field) => {
                let Some(entry) = form.slot(slot) else {
                    return;
                };
                if !edit.allows(|c| accepts(field, c)) {
                    return;
                }
                let mut value = entry.field(field).to_string();
                edit.apply(&mut value);
                Action::LogSetField { slot, field, value }
            }
            LogField::Notes => {
                let mut notes = form.notes.clone();
                edit.apply(&mut notes);
                Action::LogSetNotes(notes)
            }
            LogField::Category(_) | LogField::Item(_) => return,
        };
        self.apply_or_notify(action);
    }

    fn handle_measurements_input(&mut self, key: KeyEvent) {
        let count = self.service.state.measurements.len();
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => table_previous(&mut self.measurement_table_state, count),
            KeyCode::Char('j') | KeyCode::Down => table_next(&mut self.measurement_table_state, count),
            KeyCode::Char('a') => open_measurement_modal(self, None),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_measurement_id() {
                    open_measurement_modal(self, Some(id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => request_delete_measurement(self),
            _ => {}
        }
    }

    fn handle_history_input(&mut self, key: KeyEvent) {
        let count = self.service.state.history.len();
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => list_previous(&mut self.history_list_state, count),
            KeyCode::Char('j') | KeyCode::Down => list_next(&mut self.history_list_state, count),
            _ => {}
        }
    }
}
