// didifit-tui/src/ui/history_tab.rs
use crate::{
    app::App,
    ui::{dashboard_tab::summary_lines, palette::Palette},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_history_tab(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let history = app.service.history_view();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Workout History ({})", history.len()))
        .border_style(palette.border(true));

    if history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No workouts logged yet. Log one from the dashboard.",
            palette.muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .map(|summary| {
            let mut lines = summary_lines(summary, palette);
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selection())
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.history_list_state);
}
