// didifit-tui/src/ui/layout.rs
use crate::{
    app::{ActiveModal, ActiveTab, App},
    ui::{
        dashboard_tab::render_dashboard_tab,
        history_tab::render_history_tab,
        measurements_tab::render_measurements_tab,
        modals::{render_confirmation_modal, render_modal, render_notice_modal},
        palette::Palette,
        status_bar::render_status_bar,
    },
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let size = f.size();
    let palette = Palette::new(app.service.state.theme, &app.service.config);
    f.render_widget(Block::default().style(palette.base()), size);

    // Create main layout: Tabs on top, content below, status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status Bar
        ])
        .split(size);

    render_tabs(f, app, &palette, main_chunks[0]);
    render_main_content(f, app, &palette, main_chunks[1]);
    render_status_bar(f, app, &palette, main_chunks[2]);

    // Overlays last: editor, then confirmation, then notices on top
    if app.active_modal != ActiveModal::None {
        render_modal(f, app, &palette);
    }
    if let Some(confirmation) = &app.service.state.pending_confirmation {
        render_confirmation_modal(f, &confirmation.prompt(), &palette);
    }
    if let Some(notice) = app.pending_notices.front() {
        render_notice_modal(f, notice, &palette);
    }
}

fn render_tabs(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let titles: Vec<Line> = ActiveTab::ALL
        .iter()
        .map(|t| Line::from(Span::styled(t.title(), palette.muted())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(format!(" DidiFit ({}) ", app.service.state.theme.as_str())),
        )
        .select(app.active_tab.index())
        .style(palette.muted())
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

// Render the content area based on the active tab
fn render_main_content(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    match app.active_tab {
        ActiveTab::Dashboard => render_dashboard_tab(f, app, palette, area),
        ActiveTab::Measurements => render_measurements_tab(f, app, palette, area),
        ActiveTab::History => render_history_tab(f, app, palette, area),
    }
}

/// Helper function to create a centered rectangle for modals
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered rectangle of a fixed size, shrunk to fit `r`.
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Scroll offset that keeps `line` visible in a viewport of `height` rows.
pub fn scroll_to(line: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    u16::try_from(line.saturating_sub(height - 1)).unwrap_or(u16::MAX)
}
