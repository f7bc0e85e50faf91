//! Preview navigation and value entry.
//!
//! Focus moves over the fields that currently render and accept input. The
//! set shrinks and grows as values change, so the focus index is clamped
//! after every value update.

use super::Designer;
use crate::form::{split_multi_value, FieldDefinition, FieldKind};
use log::*;

/// Value stored for a ticked checkbox.
///
pub const CHECKED_VALUE: &str = "true";

impl Designer {
    /// Visible fields that take input, in document order.
    ///
    pub fn focusable_fields(&self) -> Vec<&FieldDefinition> {
        self.visible_fields()
            .into_iter()
            .filter(|f| f.is_input())
            .collect()
    }

    pub fn focused_field(&self) -> Option<&FieldDefinition> {
        self.focusable_fields().into_iter().nth(self.focus_index)
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn next_field(&mut self) {
        let count = self.focusable_fields().len();
        if count > 0 {
            self.focus_index = (self.focus_index + 1) % count;
            self.option_cursor = 0;
        }
    }

    pub fn previous_field(&mut self) {
        let count = self.focusable_fields().len();
        if count > 0 {
            self.focus_index = (self.focus_index + count - 1) % count;
            self.option_cursor = 0;
        }
    }

    /// Append a character to the focused free-text value.
    ///
    pub fn type_char(&mut self, c: char) {
        if let Some((id, kind)) = self.focused_entry() {
            if accepts_text(&kind) {
                let mut value = self.value(&id).to_owned();
                value.push(c);
                self.set_value(&id, &value);
            }
        }
    }

    /// Drop the last character of the focused free-text value.
    ///
    pub fn backspace(&mut self) {
        if let Some((id, kind)) = self.focused_entry() {
            if accepts_text(&kind) {
                let mut value = self.value(&id).to_owned();
                if value.pop().is_some() {
                    self.set_value(&id, &value);
                }
            }
        }
    }

    /// Space on the focused field: tick a checkbox or pick the option under
    /// the cursor.
    ///
    pub fn toggle_focused(&mut self) {
        match self.focused_entry() {
            Some((_, FieldKind::Checkbox)) => self.toggle_checkbox(),
            Some((_, FieldKind::Select(_))) | Some((_, FieldKind::Multiselect(_))) => {
                self.toggle_option()
            }
            Some((_, kind)) if accepts_text(&kind) => self.type_char(' '),
            _ => {}
        }
    }

    pub fn toggle_checkbox(&mut self) {
        if let Some((id, FieldKind::Checkbox)) = self.focused_entry() {
            let next = if self.value(&id) == CHECKED_VALUE {
                ""
            } else {
                CHECKED_VALUE
            };
            self.set_value(&id, next);
        }
    }

    /// Move the option cursor of the focused choice field, wrapping.
    ///
    pub fn cycle_option(&mut self, forward: bool) {
        let count = match self.focused_field() {
            Some(field) => field.kind.options().len(),
            None => return,
        };
        if count == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % count
        } else {
            (self.option_cursor + count - 1) % count
        };
    }

    /// Select the option under the cursor. Single-choice fields take it as
    /// their value; multi-choice fields add or remove it, keeping option
    /// order.
    ///
    pub fn toggle_option(&mut self) {
        let (id, kind) = match self.focused_entry() {
            Some(entry) => entry,
            None => return,
        };
        let options = kind.options();
        let option = match options.get(self.option_cursor) {
            Some(option) => option.clone(),
            None => return,
        };
        match kind {
            FieldKind::Select(_) => self.set_value(&id, &option),
            FieldKind::Multiselect(_) => {
                let current = split_multi_value(self.value(&id), options);
                let picked: Vec<String> = options
                    .iter()
                    .filter(|o| (current.contains(&o.as_str())) != (**o == option))
                    .cloned()
                    .collect();
                self.values.set_many(&id, &picked);
                self.clamp_focus();
            }
            _ => debug!("Field '{}' has no options to toggle", id),
        }
    }

    pub(super) fn clamp_focus(&mut self) {
        let count = self.focusable_fields().len();
        if count == 0 {
            self.focus_index = 0;
        } else if self.focus_index >= count {
            self.focus_index = count - 1;
        }
    }

    fn focused_entry(&self) -> Option<(String, FieldKind)> {
        self.focused_field()
            .map(|field| (field.id.clone(), field.kind.clone()))
    }
}

fn accepts_text(kind: &FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Text(_)
            | FieldKind::Textarea(_)
            | FieldKind::Number(_)
            | FieldKind::Date
            | FieldKind::File
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{select_template, Choices, Condition, ConditionalLogic, FieldType};

    fn contact_designer() -> Designer {
        Designer::new(select_template("Contact Form").unwrap(), None)
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut designer = contact_designer();
        let count = designer.focusable_fields().len();
        assert!(count > 1);

        designer.previous_field();
        assert_eq!(designer.focus_index(), count - 1);
        designer.next_field();
        assert_eq!(designer.focus_index(), 0);
    }

    #[test]
    fn test_typing_edits_focused_value() {
        let mut designer = contact_designer();
        let id = designer.focused_field().unwrap().id.clone();
        for c in "Ada".chars() {
            designer.type_char(c);
        }
        designer.backspace();
        assert_eq!(designer.value(&id), "Ad");
    }

    #[test]
    fn test_labels_are_not_focusable() {
        let mut designer = Designer::default();
        designer
            .add_field(FieldDefinition::with_id("l", FieldType::Label, "Heading"))
            .unwrap();
        designer
            .add_field(FieldDefinition::with_id("t", FieldType::Text, "Name"))
            .unwrap();
        assert_eq!(designer.focused_field().unwrap().id, "t");
    }

    #[test]
    fn test_checkbox_toggle() {
        let mut designer = Designer::default();
        designer
            .add_field(FieldDefinition::with_id("c", FieldType::Checkbox, "Agree"))
            .unwrap();
        designer.toggle_focused();
        assert_eq!(designer.value("c"), CHECKED_VALUE);
        designer.type_char('x');
        assert_eq!(designer.value("c"), CHECKED_VALUE);
        designer.toggle_focused();
        assert_eq!(designer.value("c"), "");
    }

    #[test]
    fn test_select_and_multiselect_options() {
        let mut designer = Designer::default();
        let mut select = FieldDefinition::with_id("s", FieldType::Select, "Size");
        select.kind = FieldKind::Select(Choices::new(["S", "M", "L"]));
        let mut multi = FieldDefinition::with_id("m", FieldType::Multiselect, "Days");
        multi.kind = FieldKind::Multiselect(Choices::new(["Mon", "Tue", "Wed"]));
        designer.add_field(select).unwrap();
        designer.add_field(multi).unwrap();

        designer.cycle_option(false);
        designer.toggle_option();
        assert_eq!(designer.value("s"), "L");

        designer.next_field();
        designer.cycle_option(true);
        designer.cycle_option(true);
        designer.toggle_option();
        designer.cycle_option(false);
        designer.cycle_option(false);
        designer.toggle_option();
        assert_eq!(designer.value("m"), "Mon, Wed");
        designer.toggle_option();
        assert_eq!(designer.value("m"), "Wed");
    }

    #[test]
    fn test_multiselect_option_containing_separator() {
        let mut designer = Designer::default();
        let mut allergies = FieldDefinition::with_id("a", FieldType::Multiselect, "Allergies");
        allergies.kind = FieldKind::Multiselect(Choices::new(["Nuts, Dairy", "Soy"]));
        designer.add_field(allergies).unwrap();

        designer.toggle_option();
        designer.cycle_option(true);
        designer.toggle_option();
        assert_eq!(designer.value("a"), "Nuts, Dairy, Soy");

        designer.toggle_option();
        assert_eq!(designer.value("a"), "Nuts, Dairy");
    }

    #[test]
    fn test_focus_clamped_when_fields_hide() {
        let mut designer = Designer::default();
        designer
            .add_field(FieldDefinition::with_id("a", FieldType::Text, "A"))
            .unwrap();
        let mut b = FieldDefinition::with_id("b", FieldType::Text, "B");
        b.conditional_logic = Some(ConditionalLogic::new("a", Condition::Equals, "y"));
        designer.add_field(b).unwrap();

        designer.type_char('y');
        designer.next_field();
        assert_eq!(designer.focused_field().unwrap().id, "b");

        designer.set_value("a", "n");
        assert_eq!(designer.focus_index(), 0);
        assert_eq!(designer.focused_field().unwrap().id, "a");
    }
}
