// didifit-tui/src/ui/measurements_tab.rs
use crate::{app::App, ui::palette::Palette};
use didifit_lib::view::MeasurementRow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_measurements_tab(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let rows = app.service.measurements_view();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_entry_table(f, app, palette, &rows, chunks[0]);

    let selected = app
        .measurement_table_state
        .selected()
        .and_then(|i| rows.get(i));
    render_entry_detail(f, palette, selected, chunks[1]);
}

fn render_entry_table(f: &mut Frame, app: &mut App, palette: &Palette, rows: &[MeasurementRow], area: Rect) {
    let header_cells = ["Date", "Values"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let table_rows = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.date.clone()),
            Cell::from(row.values.len().to_string()),
        ])
    });

    let table = Table::new(table_rows, [Constraint::Length(12), Constraint::Min(6)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Body Measurements")
                .border_style(palette.border(true)),
        )
        .highlight_style(palette.selection())
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.measurement_table_state);
}

fn render_entry_detail(f: &mut Frame, palette: &Palette, row: Option<&MeasurementRow>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Entry")
        .border_style(palette.border(false));

    let lines: Vec<Line> = match row {
        None => vec![
            Line::from(Span::styled("No measurements recorded yet.", palette.muted())),
            Line::from(""),
            Line::from("Press 'a' to record your first measurements."),
        ],
        Some(row) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    row.date.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            lines.extend(row.values.iter().map(|(name, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", name), palette.muted()),
                    Span::raw(value.as_str()),
                ])
            }));
            if let Some(notes) = &row.notes {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("Notes: {}", notes)));
            }
            lines
        }
    };

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
