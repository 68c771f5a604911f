// didifit-tui/src/ui/modals.rs
use crate::{
    app::{
        ActiveModal, AddExerciseField, App, EditDayField, ExerciseDefaultsField, MeasurementField,
    },
    ui::{
        form_line::{render_form_lines, FormLine},
        layout::{centered_rect, centered_rect_fixed},
        palette::Palette,
    },
};
use didifit_lib::catalog::{BODY_MEASUREMENTS, MUSCLE_GROUPS};
use didifit_lib::{Notice, NoticeLevel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const NONE_LABEL: &str = "(none)";

pub fn render_modal(f: &mut Frame, app: &App, palette: &Palette) {
    match &app.active_modal {
        ActiveModal::Help => render_help_modal(f, palette),
        ActiveModal::EditDay { .. } => render_edit_day_modal(f, app, palette),
        ActiveModal::AddExercise { .. } => render_add_exercise_modal(f, app, palette),
        ActiveModal::EditExercise { .. } => render_edit_exercise_modal(f, app, palette),
        ActiveModal::Measurement { .. } => render_measurement_modal(f, app, palette),
        ActiveModal::None => {} // Should not happen if called correctly
    }
}

fn modal_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::default().fg(palette.accent))
        .style(palette.base())
}

/// Clears `area`, draws the frame and returns the space inside it.
fn open_modal(f: &mut Frame, title: &str, palette: &Palette, area: Rect) -> Rect {
    f.render_widget(Clear, area);
    f.render_widget(modal_block(title, palette), area);
    area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Splits a modal body into form, buttons and error rows.
fn form_layout(inner: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Error Message (if any)
        ])
        .split(inner);
    (chunks[0], chunks[1], chunks[2])
}

fn render_buttons(f: &mut Frame, palette: &Palette, ok_focused: bool, cancel_focused: bool, area: Rect) {
    let button_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let ok_button = Paragraph::new(" OK ")
        .alignment(Alignment::Center)
        .style(palette.input(ok_focused));
    f.render_widget(ok_button, button_layout[0]);

    let cancel_button = Paragraph::new(" Cancel ")
        .alignment(Alignment::Center)
        .style(palette.input(cancel_focused));
    f.render_widget(cancel_button, button_layout[1]);
}

fn render_error(f: &mut Frame, palette: &Palette, error_message: Option<&String>, area: Rect) {
    if let Some(err) = error_message {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(palette.error)),
            area,
        );
    }
}

fn render_help_modal(f: &mut Frame, palette: &Palette) {
    let area = centered_rect(60, 80, f.size());
    let inner = open_modal(f, "Help (?)", palette, area);

    let header = Style::new().bold().underlined();
    let help_text = vec![
        Line::from("--- Global ---").style(header),
        Line::from(" q: Quit Application"),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(" F1-F3 / 1-3: Switch Tabs"),
        Line::from(" t: Toggle light/dark theme"),
        Line::from(""),
        Line::from("--- Dashboard ---").style(header),
        Line::from(" ↑/↓ or k/j: Move on the weekly schedule"),
        Line::from(" Enter: Open the highlighted day"),
        Line::from(" e: Configure the highlighted day (training/rest, muscle groups)"),
        Line::from(" a: Add a planned exercise to the open day"),
        Line::from(" Tab: Select a planned exercise"),
        Line::from(" E / d: Edit the defaults of / delete the selected exercise"),
        Line::from(" l: Log a workout for the open day"),
        Line::from(" n: Log today's workout"),
        Line::from(""),
        Line::from("--- Workout Log ---").style(header),
        Line::from(" Tab/↑/↓: Move between fields"),
        Line::from(" ←/→: Choose category and exercise"),
        Line::from(" Enter: Save the workout"),
        Line::from(" Esc: Cancel (asks for confirmation)"),
        Line::from(""),
        Line::from("--- Measurements ---").style(header),
        Line::from(" ↑/↓ or k/j: Select an entry"),
        Line::from(" a: New entry  e: Edit entry  d: Delete entry"),
        Line::from(""),
        Line::from(" Press Esc, ?, or Enter to close this help.").style(Style::new().italic()),
    ];

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

pub fn render_notice_modal(f: &mut Frame, notice: &Notice, palette: &Palette) {
    let (title, color) = match notice.level {
        NoticeLevel::Info => ("Info", palette.success),
        NoticeLevel::Warning => ("Attention", palette.warning),
        NoticeLevel::Error => ("Error", palette.error),
    };
    let area = centered_rect(50, 30, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::new().fg(color).add_modifier(Modifier::BOLD))
        .style(palette.base());
    let text = vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from("[Enter] OK").alignment(Alignment::Center),
    ];
    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

pub fn render_confirmation_modal(f: &mut Frame, prompt: &str, palette: &Palette) {
    let block = Block::default()
        .title("Confirm")
        .borders(Borders::ALL)
        .border_style(Style::new().fg(palette.error).add_modifier(Modifier::BOLD)) // Make it stand out
        .style(palette.base());

    let options = "[Y]es / [N]o (Esc)";

    // Calculate text width for centering
    let prompt_width = u16::try_from(prompt.chars().count()).unwrap_or(u16::MAX);
    let options_width = u16::try_from(options.chars().count()).unwrap_or(u16::MAX);
    let modal_width = prompt_width.max(options_width).saturating_add(4); // Add padding
    let modal_height = 5; // Fixed height: border + prompt + options + border

    let area = centered_rect_fixed(modal_width, modal_height, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    f.render_widget(Paragraph::new(prompt).alignment(Alignment::Center), chunks[0]);
    f.render_widget(Paragraph::new(options).alignment(Alignment::Center), chunks[1]);
}

fn render_edit_day_modal(f: &mut Frame, app: &App, palette: &Palette) {
    if let ActiveModal::EditDay {
        form,
        focused_field,
        error_message,
    } = &app.active_modal
    {
        let title = format!("Configure {}", form.day.day_name());
        let area = centered_rect(50, 60, f.size());
        let inner = open_modal(f, &title, palette, area);
        let (fields_area, buttons_area, error_area) = form_layout(inner);

        let mut lines = Vec::new();
        let mut toggle = FormLine::default();
        toggle.checkbox(
            "Training day",
            form.is_workout_day,
            palette,
            *focused_field == EditDayField::WorkoutDay,
        );
        lines.push(toggle);
        lines.push(FormLine::default());

        if form.is_workout_day {
            let mut header = FormLine::default();
            header.label("Muscle groups:", palette, true);
            lines.push(header);
            for (index, group) in MUSCLE_GROUPS.iter().enumerate() {
                let mut line = FormLine::default();
                line.label("  ", palette, true);
                line.checkbox(
                    group,
                    form.has_group(group),
                    palette,
                    *focused_field == EditDayField::Group(index),
                );
                lines.push(line);
            }
        } else {
            let mut rest = FormLine::default();
            rest.label("Rest day: no muscle groups or exercises.", palette, false);
            lines.push(rest);
        }

        let focus_line = match focused_field {
            EditDayField::Group(index) => index + 3,
            _ => 0,
        };
        render_form_lines(f, lines, focus_line, fields_area);
        render_buttons(
            f,
            palette,
            *focused_field == EditDayField::Confirm,
            *focused_field == EditDayField::Cancel,
            buttons_area,
        );
        render_error(f, palette, error_message.as_ref(), error_area);
    }
}

fn render_add_exercise_modal(f: &mut Frame, app: &App, palette: &Palette) {
    if let ActiveModal::AddExercise {
        day,
        form,
        focused_field,
        error_message,
    } = &app.active_modal
    {
        let title = format!("Add Exercise to {}", day.day_name());
        let area = centered_rect(60, 40, f.size());
        let inner = open_modal(f, &title, palette, area);
        let (fields_area, buttons_area, error_area) = form_layout(inner);

        let has_category = form.category_key.is_some();
        let item_name = form
            .choices()
            .iter()
            .find(|i| Some(i.id) == form.exercise_item_key.as_deref())
            .map_or(NONE_LABEL, |i| i.name);

        let mut category = FormLine::default();
        category.label("Category:  ", palette, true);
        category.choice(
            form.category_key.as_deref().unwrap_or(NONE_LABEL),
            palette,
            *focused_field == AddExerciseField::Category,
            true,
        );
        let mut item = FormLine::default();
        item.label("Exercise:  ", palette, has_category);
        item.choice(
            item_name,
            palette,
            *focused_field == AddExerciseField::Item,
            has_category,
        );
        let mut load = FormLine::default();
        load.label("Load (kg): ", palette, true);
        load.input(&form.load, palette, *focused_field == AddExerciseField::Load, true);
        let mut sets = FormLine::default();
        sets.label("Sets:      ", palette, true);
        sets.input(&form.sets, palette, *focused_field == AddExerciseField::Sets, true);
        let mut reps = FormLine::default();
        reps.label("Reps:      ", palette, true);
        reps.input(&form.reps, palette, *focused_field == AddExerciseField::Reps, true);

        render_form_lines(f, vec![category, item, load, sets, reps], 0, fields_area);
        render_buttons(
            f,
            palette,
            *focused_field == AddExerciseField::Confirm,
            *focused_field == AddExerciseField::Cancel,
            buttons_area,
        );
        render_error(f, palette, error_message.as_ref(), error_area);
    }
}

fn render_edit_exercise_modal(f: &mut Frame, app: &App, palette: &Palette) {
    if let ActiveModal::EditExercise {
        exercise_name,
        form,
        focused_field,
        error_message,
    } = &app.active_modal
    {
        let area = centered_rect(60, 35, f.size());
        let inner = open_modal(f, "Edit Exercise Defaults", palette, area);
        let (fields_area, buttons_area, error_area) = form_layout(inner);

        let mut name = FormLine::default();
        name.label(exercise_name.clone(), palette, true);
        let mut load = FormLine::default();
        load.label("Load (kg): ", palette, true);
        load.input(&form.load, palette, *focused_field == ExerciseDefaultsField::Load, true);
        let mut sets = FormLine::default();
        sets.label("Sets:      ", palette, true);
        sets.input(&form.sets, palette, *focused_field == ExerciseDefaultsField::Sets, true);
        let mut reps = FormLine::default();
        reps.label("Reps:      ", palette, true);
        reps.input(&form.reps, palette, *focused_field == ExerciseDefaultsField::Reps, true);

        render_form_lines(
            f,
            vec![name, FormLine::default(), load, sets, reps],
            0,
            fields_area,
        );
        render_buttons(
            f,
            palette,
            *focused_field == ExerciseDefaultsField::Confirm,
            *focused_field == ExerciseDefaultsField::Cancel,
            buttons_area,
        );
        render_error(f, palette, error_message.as_ref(), error_area);
    }
}

fn render_measurement_modal(f: &mut Frame, app: &App, palette: &Palette) {
    if let ActiveModal::Measurement {
        form,
        focused_field,
        error_message,
    } = &app.active_modal
    {
        let title = if form.id.is_some() {
            "Edit Measurements"
        } else {
            "New Measurements"
        };
        let area = centered_rect(70, 90, f.size());
        let inner = open_modal(f, title, palette, area);
        let (fields_area, buttons_area, error_area) = form_layout(inner);

        let label_width = BODY_MEASUREMENTS
            .iter()
            .map(|def| def.name.chars().count() + def.unit.chars().count() + 3)
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        let mut date = FormLine::default();
        date.label(format!("{:<width$} ", "Date (YYYY-MM-DD)", width = label_width), palette, true);
        date.input(&form.date, palette, *focused_field == MeasurementField::Date, true);
        lines.push(date);
        lines.push(FormLine::default());

        for (index, def) in BODY_MEASUREMENTS.iter().enumerate() {
            let label = if def.unit.is_empty() {
                def.name.to_string()
            } else {
                format!("{} ({})", def.name, def.unit)
            };
            let mut line = FormLine::default();
            line.label(format!("{:<width$} ", label, width = label_width), palette, true);
            line.input(
                form.value(def.key),
                palette,
                *focused_field == MeasurementField::Value(index),
                true,
            );
            lines.push(line);
        }

        lines.push(FormLine::default());
        let mut notes = FormLine::default();
        notes.label(format!("{:<width$} ", "Notes", width = label_width), palette, true);
        notes.input(&form.notes, palette, *focused_field == MeasurementField::Notes, true);
        lines.push(notes);

        let focus_line = match focused_field {
            MeasurementField::Date => 0,
            MeasurementField::Value(index) => index + 2,
            MeasurementField::Notes | MeasurementField::Confirm | MeasurementField::Cancel => {
                lines.len() - 1
            }
        };
        render_form_lines(f, lines, focus_line, fields_area);
        render_buttons(
            f,
            palette,
            *focused_field == MeasurementField::Confirm,
            *focused_field == MeasurementField::Cancel,
            buttons_area,
        );
        render_error(f, palette, error_message.as_ref(), error_area);
    }
}
