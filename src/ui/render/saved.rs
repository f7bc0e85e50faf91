use super::Frame;
use crate::state::Designer;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the forms retrieved from the store.
///
pub fn saved(frame: &mut Frame, size: Rect, state: &Designer) {
    let theme = state.theme();
    let forms = state.saved_forms();
    let items: Vec<ListItem> = forms
        .iter()
        .map(|form| {
            let mut spans = vec![Span::styled(
                form.document.metadata.name.clone(),
                styling::normal_text_style(theme),
            )];
            spans.push(Span::styled(
                format!(" ({} fields)", form.document.len()),
                styling::muted_text_style(theme),
            ));
            let mut lines = vec![Line::from(spans)];
            if let Some(saved_at) = &form.saved_at {
                lines.push(Line::from(Span::styled(
                    format!("  {}", saved_at),
                    styling::muted_text_style(theme),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Saved Forms ({}) ", forms.len()))
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(List::new(items).block(block), size);
}
