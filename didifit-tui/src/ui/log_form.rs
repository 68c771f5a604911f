// didifit-tui/src/ui/log_form.rs
use crate::{
    app::{App, LogField},
    ui::{
        form_line::{render_form_lines, FormLine},
        palette::Palette,
    },
};
use didifit_lib::{LogSlot, SlotField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const NONE_LABEL: &str = "(none)";

fn slot_lines<'a>(index: usize, slot: &'a LogSlot, focus: LogField, palette: &Palette) -> [FormLine<'a>; 2] {
    let enabled = slot.is_enabled();

    let mut choices = FormLine::default();
    choices.label(format!("{}. Category: ", index + 1), palette, true);
    choices.choice(
        slot.category_key.as_deref().unwrap_or(NONE_LABEL),
        palette,
        focus == LogField::Category(index),
        true,
    );
    choices.label("  Exercise: ", palette, enabled);
    choices.choice(
        slot.selected_item().map_or(NONE_LABEL, |i| i.name),
        palette,
        focus == LogField::Item(index),
        enabled,
    );

    let mut values = FormLine::default();
    for (label, field) in [
        ("   Load (kg): ", SlotField::Load),
        ("  Sets: ", SlotField::Sets),
        ("  Reps: ", SlotField::Reps),
    ] {
        values.label(label, palette, enabled);
        values.input(
            slot.field(field),
            palette,
            focus == LogField::Value(index, field),
            enabled,
        );
    }
    [choices, values]
}

pub fn render_log_form(f: &mut Frame, app: &App, palette: &Palette, heading: &str, area: Rect) {
    let Some(form) = app.service.state.log_form() else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(heading)
        .border_style(palette.border(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let focus = app.log_focus;
    let mut lines: Vec<FormLine> = Vec::new();
    for (index, slot) in form.slots().iter().enumerate() {
        lines.extend(slot_lines(index, slot, focus, palette));
    }
    lines.push(FormLine::default());
    let mut notes = FormLine::default();
    notes.label("Notes: ", palette, true);
    notes.input(form.notes.as_str(), palette, focus == LogField::Notes, true);
    lines.push(notes);

    let focus_line = match focus {
        LogField::Category(slot) | LogField::Item(slot) => slot * 2,
        LogField::Value(slot, _) => slot * 2 + 1,
        LogField::Notes => lines.len() - 1,
    };
    render_form_lines(f, lines, focus_line, chunks[0]);

    f.render_widget(
        Paragraph::new("[Tab/↑↓] Move  [←→] Choose  [Enter] Save  [Esc] Cancel")
            .style(Style::default().fg(palette.accent)),
        chunks[1],
    );
}
