use super::*;
use crate::state::Designer;
use ratatui::layout::{Constraint, Direction, Layout};

/// Render all panels of the preview.
///
pub fn all(frame: &mut Frame, state: &mut Designer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(frame.size());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    header(frame, rows[0], state);
    form(frame, body[0], state);
    saved(frame, body[1], state);
    log(frame, rows[2], state);
    footer(frame, rows[3], state);
}
