use super::Frame;
use crate::state::Designer;
use crate::store::SaveOutcome;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

const HINTS: &str = " ↑/↓ Tab: field  ←/→ Enter: option  Space: toggle  ^S: save  ^R: refresh  Esc: quit";

/// Render key hints and the store status.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &Designer) {
    let theme = state.theme();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(40)])
        .split(size);

    frame.render_widget(
        Paragraph::new(Span::styled(HINTS, styling::muted_text_style(theme))),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(status(state)), chunks[1]);
}

fn status(state: &Designer) -> Line<'static> {
    let theme = state.theme();
    if state.is_loading() {
        let label = if state.is_saving() {
            "Saving..."
        } else {
            "Loading..."
        };
        return Line::from(Span::styled(
            format!("{} {}", spinner::frame(state.spinner_index()), label),
            styling::warning_text_style(theme),
        ));
    }
    if let Some(error) = state.last_error() {
        return Line::from(Span::styled(
            format!("Error: {}", error),
            styling::error_text_style(theme),
        ));
    }
    match state.last_save() {
        Some(SaveOutcome::Saved { id }) => Line::from(Span::styled(
            format!("Saved as {}", id),
            styling::success_text_style(theme),
        )),
        _ => Line::default(),
    }
}
