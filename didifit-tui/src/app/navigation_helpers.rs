// didifit-tui/src/app/navigation_helpers.rs
use ratatui::widgets::{ListState, TableState};

fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i >= len - 1 => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

fn previous_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) => len - 1,
        Some(i) => (i - 1).min(len - 1),
        None => len - 1,
    })
}

/// Keeps a selection inside `0..len`, selecting the first row when there was none.
fn clamped_index(selected: Option<usize>, len: usize) -> Option<usize> {
    match selected {
        _ if len == 0 => None,
        Some(i) => Some(i.min(len - 1)),
        None => Some(0),
    }
}

pub fn list_next(state: &mut ListState, list_len: usize) {
    state.select(next_index(state.selected(), list_len));
}

pub fn list_previous(state: &mut ListState, list_len: usize) {
    state.select(previous_index(state.selected(), list_len));
}

pub fn list_clamp(state: &mut ListState, list_len: usize) {
    state.select(clamped_index(state.selected(), list_len));
}

pub fn table_next(state: &mut TableState, table_len: usize) {
    state.select(next_index(state.selected(), table_len));
}

pub fn table_previous(state: &mut TableState, table_len: usize) {
    state.select(previous_index(state.selected(), table_len));
}

pub fn table_clamp(state: &mut TableState, table_len: usize) {
    state.select(clamped_index(state.selected(), table_len));
}

/// Moves focus through `fields`, wrapping at both ends. An unknown
/// `current` jumps to the first field.
pub fn cycle_field<T: Copy + PartialEq>(fields: &[T], current: T, forward: bool) -> T {
    let len = fields.len();
    match fields.iter().position(|f| *f == current) {
        Some(position) => {
            let next = if forward {
                (position + 1) % len
            } else {
                (position + len - 1) % len
            };
            fields.get(next).copied().unwrap_or(current)
        }
        None => fields.first().copied().unwrap_or(current),
    }
}

/// Steps through `options` preceded by an implicit "nothing selected" entry.
pub fn cycle_choice<'a>(options: &[&'a str], current: Option<&str>, forward: bool) -> Option<&'a str> {
    let len = options.len() + 1;
    let position = current
        .and_then(|c| options.iter().position(|o| *o == c))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    next.checked_sub(1).and_then(|i| options.get(i).copied())
}
