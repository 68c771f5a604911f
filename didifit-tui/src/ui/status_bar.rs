// didifit-tui/src/ui/status_bar.rs
use crate::{
    app::{ActiveModal, ActiveTab, App},
    ui::palette::Palette,
};
use didifit_lib::NoticeLevel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

fn hints(app: &App) -> &'static str {
    if !app.pending_notices.is_empty() {
        return " [Enter/Esc] Dismiss ";
    }
    if app.service.state.pending_confirmation.is_some() {
        return " [y/Enter] Yes | [n/Esc] No ";
    }
    match app.active_modal {
        ActiveModal::None => match app.active_tab {
            ActiveTab::Dashboard if app.service.state.is_logging() => {
                " [Tab/↑↓] Field | [←→] Choose | [Enter] Save log | [Esc] Cancel | [F1-F3] Tabs "
            }
            ActiveTab::Dashboard => {
                " [↑↓/jk] Day | [Enter] Open | [e]dit day | [a]dd | [E]dit/[d]elete exercise | [l]og | [n] Today | [t]heme | [?] Help | [q]uit "
            }
            ActiveTab::Measurements => {
                " [↑↓/jk] Nav | [a]dd | [e]dit | [d]elete | [t]heme | [?] Help | [q]uit "
            }
            ActiveTab::History => " [↑↓/jk] Scroll | [t]heme | [?] Help | [q]uit ",
        },
        ActiveModal::Help => " [Esc/Enter/?] Close Help ",
        ActiveModal::EditDay { .. } => " [Esc] Cancel | [Space] Toggle | [Tab/↑↓] Navigate | [Enter] Confirm ",
        ActiveModal::AddExercise { .. } => " [Esc] Cancel | [←→] Choose | [Tab/↑↓] Navigate | [Enter] Next/Confirm ",
        ActiveModal::EditExercise { .. } | ActiveModal::Measurement { .. } => {
            " [Esc] Cancel | [Tab/↑↓] Navigate | [Enter] Next/Confirm "
        }
    }
}

pub fn render_status_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let status_paragraph =
        Paragraph::new(hints(app)).style(Style::default().bg(palette.bar_bg).fg(palette.fg));
    f.render_widget(status_paragraph, status_chunks[0]);

    let (message, color) = match &app.last_message {
        Some((NoticeLevel::Info, msg)) => (msg.as_str(), palette.success),
        Some((NoticeLevel::Warning, msg)) => (msg.as_str(), palette.warning),
        Some((NoticeLevel::Error, msg)) => (msg.as_str(), palette.error),
        None => ("", palette.fg),
    };
    let message_paragraph = Paragraph::new(message)
        .style(Style::default().bg(palette.bar_bg).fg(color))
        .alignment(Alignment::Right);
    f.render_widget(message_paragraph, status_chunks[1]);
}
