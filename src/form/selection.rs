//! Field selection for bulk configuration and removal.

use super::{FieldDefinition, FormDocument};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Set of selected field ids. Replaced wholesale on every change, like the
/// document's field list.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Arc<BTreeSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Toggle a field. A selected field is always deselected. Otherwise a
    /// single-select click replaces the selection and a multi-select click
    /// extends it.
    ///
    pub fn toggle(&mut self, field_id: &str, multi_select: bool) {
        let mut ids = if multi_select || self.ids.contains(field_id) {
            (*self.ids).clone()
        } else {
            BTreeSet::new()
        };
        if !ids.remove(field_id) {
            ids.insert(field_id.to_owned());
        }
        self.ids = Arc::new(ids);
    }

    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids = Arc::new(BTreeSet::new());
        }
    }

    /// Deselect the given ids.
    ///
    pub fn deselect<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = (*self.ids).clone();
        let mut changed = false;
        for id in ids {
            changed |= next.remove(id.as_ref());
        }
        if changed {
            self.ids = Arc::new(next);
        }
    }

    /// Drop ids that no longer name a field of the document.
    ///
    pub fn retain_existing(&mut self, doc: &FormDocument) {
        if self.ids.iter().all(|id| doc.contains(id)) {
            return;
        }
        let next = self
            .ids
            .iter()
            .filter(|id| doc.contains(id))
            .cloned()
            .collect();
        self.ids = Arc::new(next);
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.ids.contains(field_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Selected fields in document order.
    ///
    pub fn selected_fields<'a>(&self, doc: &'a FormDocument) -> Vec<&'a FieldDefinition> {
        doc.elements()
            .iter()
            .filter(|f| self.ids.contains(&f.id))
            .collect()
    }
}
