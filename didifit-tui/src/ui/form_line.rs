// didifit-tui/src/ui/form_line.rs
use crate::ui::{layout::scroll_to, palette::Palette};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn span_width(span: &Span) -> u16 {
    u16::try_from(span.width()).unwrap_or(u16::MAX)
}

/// One line of a form, remembering where the cursor goes if it holds the
/// focused text input.
#[derive(Default)]
pub struct FormLine<'a> {
    spans: Vec<Span<'a>>,
    width: u16,
    cursor: Option<u16>,
}

impl<'a> FormLine<'a> {
    pub fn push(&mut self, span: Span<'a>) {
        self.width = self.width.saturating_add(span_width(&span));
        self.spans.push(span);
    }

    pub fn label(&mut self, text: impl Into<String>, palette: &Palette, enabled: bool) {
        let style = if enabled {
            Style::default().fg(palette.fg)
        } else {
            palette.muted()
        };
        self.push(Span::styled(text.into(), style));
    }

    /// A value picked with the arrow keys.
    pub fn choice(&mut self, text: &str, palette: &Palette, focused: bool, enabled: bool) {
        let style = if enabled {
            palette.input(focused)
        } else {
            palette.muted()
        };
        self.push(Span::styled(format!("‹ {} ›", text), style));
    }

    pub fn checkbox(&mut self, text: &str, checked: bool, palette: &Palette, focused: bool) {
        let mark = if checked { "[x]" } else { "[ ]" };
        self.push(Span::styled(format!("{} {}", mark, text), palette.input(focused)));
    }

    pub fn input(&mut self, text: &'a str, palette: &Palette, focused: bool, enabled: bool) {
        let style = if enabled {
            palette.input(focused)
        } else {
            palette.muted()
        };
        self.push(Span::raw("["));
        let start = self.width;
        let value = Span::styled(text, style);
        if focused {
            self.cursor = Some(start.saturating_add(span_width(&value)));
        }
        self.push(value);
        self.push(Span::raw("]"));
    }
}

/// Draws `lines` scrolled so that `focus_line` is visible and places the
/// terminal cursor on the focused input, if any.
pub fn render_form_lines(f: &mut Frame, lines: Vec<FormLine>, focus_line: usize, area: Rect) {
    let scroll = scroll_to(focus_line, area.height);
    let cursor = lines
        .iter()
        .enumerate()
        .find_map(|(index, line)| line.cursor.map(|x| (index, x)));

    let text: Vec<Line> = lines.into_iter().map(|l| Line::from(l.spans)).collect();
    f.render_widget(Paragraph::new(text).scroll((scroll, 0)), area);

    if let Some((index, x)) = cursor {
        let row = u16::try_from(index).unwrap_or(u16::MAX).saturating_sub(scroll);
        if u16::try_from(index).map_or(false, |i| i >= scroll) && row < area.height {
            let cursor_x = area.x.saturating_add(x).min(area.right().saturating_sub(1));
            f.set_cursor(cursor_x, area.y + row);
        }
    }
}
