//! Drag-and-drop reordering of fields.
//!
//! The gesture source is not modelled here: a drop is reduced to the ids
//! being dragged and the index they land on.

use super::{FieldDefinition, FormDocument};
use log::*;

/// Compute a new field order with the dragged fields moved, as one
/// contiguous block in the given order, to `target_index` of the remaining
/// fields. The index is clamped to the number of remaining fields. Ids that
/// are not in `elements`, and repeats, are ignored.
///
pub fn reorder<S: AsRef<str>>(
    elements: &[FieldDefinition],
    dragged_ids: &[S],
    target_index: usize,
) -> Vec<FieldDefinition> {
    let mut dragged: Vec<&FieldDefinition> = Vec::with_capacity(dragged_ids.len());
    for id in dragged_ids {
        let id = id.as_ref();
        if dragged.iter().any(|f| f.id == id) {
            continue;
        }
        match elements.iter().find(|f| f.id == id) {
            Some(field) => dragged.push(field),
            None => debug!("Ignoring drag of unknown field '{}'", id),
        }
    }

    let mut result: Vec<FieldDefinition> = elements
        .iter()
        .filter(|f| !dragged.iter().any(|d| d.id == f.id))
        .cloned()
        .collect();
    let at = target_index.min(result.len());
    result.splice(at..at, dragged.into_iter().cloned());
    result
}

impl FormDocument {
    /// Move the dragged fields to `target_index`. Returns whether the order
    /// changed.
    ///
    pub fn move_fields<S: AsRef<str>>(&mut self, dragged_ids: &[S], target_index: usize) -> bool {
        let reordered = reorder(self.elements(), dragged_ids, target_index);
        let changed = reordered
            .iter()
            .zip(self.elements())
            .any(|(a, b)| a.id != b.id);
        if changed {
            debug!(
                "Moved {} field(s) to index {}",
                dragged_ids.len(),
                target_index
            );
            self.commit(reordered);
        }
        changed
    }

    /// Move the field at `drag_index` to `hover_index`. Out-of-range drag
    /// indices are ignored.
    ///
    pub fn move_field(&mut self, drag_index: usize, hover_index: usize) -> bool {
        let id = match self.elements().get(drag_index) {
            Some(field) => field.id.clone(),
            None => {
                warn!("Drag index {} is out of range", drag_index);
                return false;
            }
        };
        self.move_fields(&[id], hover_index)
    }
}
