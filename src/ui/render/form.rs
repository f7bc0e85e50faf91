use super::Frame;
use crate::form::{split_multi_value, FieldDefinition, FieldKind, Size, ValueIssue};
use crate::state::{Designer, CHECKED_VALUE};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";
const FILE_PLACEHOLDER: &str = "path to file";

/// Render the form preview: visible fields in one or two columns.
///
pub fn form(frame: &mut Frame, size: Rect, state: &Designer) {
    let theme = state.theme();
    let block = Block::default()
        .title(Span::styled(" Preview ", styling::active_block_title_style()))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let issues = match state.validation_issues() {
        Ok(issues) => issues,
        Err(e) => {
            let message = Paragraph::new(Line::from(Span::styled(
                e.to_string(),
                styling::error_text_style(theme),
            )))
            .wrap(Wrap { trim: false });
            frame.render_widget(message, inner);
            return;
        }
    };

    let fields = state.visible_fields();
    if fields.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No fields to display",
            styling::muted_text_style(theme),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    let columns = state.document().metadata.layout.columns().max(1);
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(inner);
    let focused = state.focused_field().map(|f| f.id.as_str());

    // Row-major placement, as in a CSS grid
    for (column, area) in areas.iter().enumerate() {
        let mut lines = vec![];
        for field in fields.iter().skip(column).step_by(columns) {
            let field_issues: Vec<&ValueIssue> = issues
                .iter()
                .filter(|(id, _)| *id == field.id)
                .map(|(_, issue)| issue)
                .collect();
            let is_focused = focused == Some(field.id.as_str());
            lines.extend(field_lines(field, state, &field_issues, is_focused, area.width));
            lines.push(Line::default());
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), *area);
    }
}

/// Width of a field's input box within the available column width.
///
pub(super) fn control_width(size: Size, available: u16) -> u16 {
    match size {
        Size::Small => available / 2,
        Size::Medium | Size::Custom { width: None } => available.saturating_mul(3) / 4,
        Size::Large => available,
        Size::Custom { width: Some(width) } => width.min(available),
    }
}

fn field_lines(
    field: &FieldDefinition,
    state: &Designer,
    issues: &[&ValueIssue],
    focused: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let theme = state.theme();
    let value = state.value(&field.id);
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        styling::focused_label_style(theme)
    } else {
        styling::normal_text_style(theme)
    };

    let mut label = vec![Span::styled(marker.to_string(), label_style)];
    match field.kind {
        FieldKind::Checkbox => {
            let tick = if value == CHECKED_VALUE { "[x] " } else { "[ ] " };
            label.push(Span::styled(tick.to_string(), label_style));
            label.push(Span::styled(field.label.clone(), label_style));
        }
        FieldKind::Label => {
            label.push(Span::styled(
                field.label.clone(),
                label_style.add_modifier(Modifier::BOLD),
            ));
        }
        _ => label.push(Span::styled(field.label.clone(), label_style)),
    }
    if field.required {
        label.push(Span::styled(" *", styling::error_text_style(theme)));
    }

    let mut lines = vec![Line::from(label)];
    let box_width = control_width(field.size, width.saturating_sub(2)) as usize;
    match &field.kind {
        FieldKind::Checkbox | FieldKind::Label => {}
        FieldKind::Select(choices) | FieldKind::Multiselect(choices) => {
            if choices.options.is_empty() {
                lines.push(input_box(placeholder(field), box_width, true, state));
            } else {
                let chosen = split_multi_value(value, &choices.options);
                let mut spans = vec![Span::raw("  ")];
                for (i, option) in choices.options.iter().enumerate() {
                    let mut style = if chosen.contains(&option.as_str()) {
                        styling::chosen_option_style(theme)
                    } else {
                        styling::muted_text_style(theme)
                    };
                    if focused && i == state.option_cursor() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled(format!(" {} ", option), style));
                }
                lines.push(Line::from(spans));
            }
        }
        _ => {
            if value.is_empty() {
                lines.push(input_box(placeholder(field), box_width, true, state));
            } else {
                lines.push(input_box(value, box_width, false, state));
            }
        }
    }

    for issue in issues {
        lines.push(Line::from(Span::styled(
            format!("  ! {}", issue),
            styling::error_text_style(theme),
        )));
    }
    lines
}

fn placeholder(field: &FieldDefinition) -> &str {
    match (field.placeholder.as_deref(), &field.kind) {
        (Some(text), _) => text,
        (None, FieldKind::Date) => DATE_PLACEHOLDER,
        (None, FieldKind::File) => FILE_PLACEHOLDER,
        (None, _) => "",
    }
}

fn input_box(text: &str, width: usize, muted: bool, state: &Designer) -> Line<'static> {
    let theme = state.theme();
    let inner = width.saturating_sub(2);
    let shown: String = text.chars().take(inner).collect();
    let style = if muted {
        styling::muted_text_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled("[", styling::normal_block_border_style(theme)),
        Span::styled(format!("{:<width$}", shown, width = inner), style),
        Span::styled("]", styling::normal_block_border_style(theme)),
    ])
}
