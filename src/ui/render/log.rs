use super::Frame;
use crate::state::Designer;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem},
};

/// Render the most recent log entries that fit.
///
pub fn log(frame: &mut Frame, size: Rect, state: &Designer) {
    let theme = state.theme();
    let entries = state.log_entries();
    let capacity = size.height.saturating_sub(2) as usize;
    let skip = entries.len().saturating_sub(capacity);
    let items: Vec<ListItem> = entries
        .into_iter()
        .skip(skip)
        .map(|entry| ListItem::new(Span::styled(entry, styling::normal_text_style(theme))))
        .collect();

    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(List::new(items).block(block), size);
}
