// didifit-tui/src/ui/dashboard_tab.rs
use crate::{
    app::App,
    ui::{log_form::render_log_form, palette::Palette},
};
use didifit_lib::view::{DashboardBody, DayDetail, LogSummary, ScheduleDay};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_dashboard_tab(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let dashboard = app.service.dashboard_view(app.today());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_schedule(f, app, palette, &dashboard.schedule, chunks[0]);
    match &dashboard.body {
        DashboardBody::Idle => render_idle(f, palette, right_chunks[0]),
        DashboardBody::DayDetail(detail) => render_day_detail(f, app, palette, detail, right_chunks[0]),
        DashboardBody::Logging { heading } => render_log_form(f, app, palette, heading, right_chunks[0]),
    }
    render_recent(f, palette, &dashboard.recent, right_chunks[1]);
}

fn render_schedule(f: &mut Frame, app: &mut App, palette: &Palette, schedule: &[ScheduleDay], area: Rect) {
    let items: Vec<ListItem> = schedule
        .iter()
        .map(|day| {
            let marker = if day.is_selected { "● " } else { "  " };
            let name_style = if day.is_today {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut header = vec![Span::styled(format!("{}{}", marker, day.day_name), name_style)];
            if day.is_today {
                header.push(Span::styled(" (today)", Style::default().fg(palette.accent)));
            }
            let status_style = if day.is_workout_day {
                Style::default().fg(palette.fg)
            } else {
                palette.muted()
            };
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::styled(format!("    {}", day.status), status_style)),
            ])
        })
        .collect();

    let focused = !app.service.state.is_logging();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Weekly Schedule")
                .border_style(palette.border(focused)),
        )
        .highlight_style(palette.selection())
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.day_list_state);
}

fn render_idle(f: &mut Frame, palette: &Palette, area: Rect) {
    let text = vec![
        Line::from("Select a day on the schedule and press Enter to see its plan."),
        Line::from(""),
        Line::from("Press 'n' to log today's workout."),
    ];
    let paragraph = Paragraph::new(text)
        .style(palette.muted())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Day Detail")
                .border_style(palette.border(false)),
        );
    f.render_widget(paragraph, area);
}

fn render_day_detail(f: &mut Frame, app: &mut App, palette: &Palette, detail: &DayDetail, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(detail.day_name.as_str())
        .border_style(palette.border(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Summary
            Constraint::Min(0),    // Planned exercises
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(detail.summary.as_str()).wrap(Wrap { trim: true }),
        chunks[0],
    );

    if detail.is_workout_day {
        if detail.exercises.is_empty() {
            f.render_widget(
                Paragraph::new("No exercises planned. Press 'a' to add one.").style(palette.muted()),
                chunks[1],
            );
        } else {
            let items: Vec<ListItem> = detail
                .exercises
                .iter()
                .map(|e| {
                    ListItem::new(Line::from(vec![
                        Span::raw(e.name.clone()),
                        Span::styled(format!("  ({})", e.defaults), palette.muted()),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::TOP).title("Planned Exercises"))
                .highlight_style(palette.selection())
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[1], &mut app.exercise_list_state);
        }
    }

    let mut hints = vec!["[e] Edit day"];
    if detail.can_add_exercise {
        hints.push("[a] Add exercise");
    }
    if !detail.exercises.is_empty() {
        hints.push("[Tab] Select  [E] Edit  [d] Delete");
    }
    if detail.can_log {
        hints.push("[l] Log workout");
    }
    f.render_widget(
        Paragraph::new(hints.join("  ")).style(Style::default().fg(palette.accent)),
        chunks[2],
    );
}

pub fn summary_lines<'a>(summary: &'a LogSummary, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(summary.date.as_str(), Style::default().fg(palette.accent)),
        Span::raw("  "),
        Span::styled(summary.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
    ])];
    lines.extend(
        summary
            .exercises
            .iter()
            .map(|e| Line::from(format!("  • {}", e))),
    );
    if let Some(notes) = &summary.notes {
        lines.push(Line::from(Span::styled(format!("  Notes: {}", notes), palette.muted())));
    }
    lines
}

fn render_recent(f: &mut Frame, palette: &Palette, recent: &[LogSummary], area: Rect) {
    let lines: Vec<Line> = if recent.is_empty() {
        vec![Line::from(Span::styled("No workouts logged yet.", palette.muted()))]
    } else {
        recent
            .iter()
            .flat_map(|summary| summary_lines(summary, palette))
            .collect()
    };
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Workouts")
            .border_style(palette.border(false)),
    );
    f.render_widget(paragraph, area);
}
