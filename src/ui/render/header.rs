use super::Frame;
use crate::state::Designer;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the form name and description.
///
pub fn header(frame: &mut Frame, size: Rect, state: &Designer) {
    let theme = state.theme();
    let metadata = &state.document().metadata;
    let lines = vec![
        Line::from(Span::styled(
            metadata.name.clone(),
            styling::focused_label_style(theme),
        )),
        Line::from(Span::styled(
            metadata.description.clone(),
            styling::muted_text_style(theme),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(Paragraph::new(lines).block(block), size);
}
