//! Form document: metadata plus the ordered field list.
//!
//! The field list is shared behind an `Arc` and replaced wholesale on every
//! mutation, so a snapshot taken by a reader (the preview, a pending save)
//! never observes a half-applied change. Each mutation bumps `generation`.

use super::{FieldDefinition, FormError};
use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

const DEFAULT_FORM_NAME: &str = "Untitled Form";

/// Column layout of the rendered form.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    SingleColumn,
    TwoColumn,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::SingleColumn
    }
}

impl Layout {
    pub fn columns(&self) -> usize {
        match self {
            Layout::SingleColumn => 1,
            Layout::TwoColumn => 2,
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single-column" | "single" | "1" => Ok(Layout::SingleColumn),
            "two-column" | "two" | "2" => Ok(Layout::TwoColumn),
            _ => Err(format!("unknown layout '{}'", s)),
        }
    }
}

/// Descriptive data about a form.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layout: Layout,
}

impl Default for FormMetadata {
    fn default() -> Self {
        FormMetadata {
            name: DEFAULT_FORM_NAME.to_string(),
            description: String::new(),
            layout: Layout::SingleColumn,
        }
    }
}

/// A form's metadata and its fields in render order.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormDocument {
    pub metadata: FormMetadata,
    #[serde(default)]
    elements: Arc<Vec<FieldDefinition>>,
    #[serde(skip)]
    generation: u64,
}

impl PartialEq for FormDocument {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata && self.elements == other.elements
    }
}

impl FormDocument {
    /// Return an empty document with default metadata.
    ///
    pub fn new() -> Self {
        FormDocument::default()
    }

    /// Build a document from parts, rejecting duplicate field ids.
    ///
    pub fn from_parts(
        metadata: FormMetadata,
        elements: Vec<FieldDefinition>,
    ) -> Result<Self, FormError> {
        let doc = FormDocument {
            metadata,
            elements: Arc::new(elements),
            generation: 0,
        };
        doc.check_unique_ids()?;
        Ok(doc)
    }

    /// Fields in render order.
    ///
    pub fn elements(&self) -> &[FieldDefinition] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of mutations applied since the document was created or loaded.
    ///
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.elements.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Field ids in render order.
    ///
    pub fn ids(&self) -> Vec<&str> {
        self.elements.iter().map(|f| f.id.as_str()).collect()
    }

    /// Return a cheap immutable copy of the current state.
    ///
    pub fn snapshot(&self) -> FormDocument {
        self.clone()
    }

    pub fn set_metadata(&mut self, metadata: FormMetadata) {
        self.metadata = metadata;
        self.generation += 1;
    }

    /// Replace the whole document, e.g. with a template.
    ///
    pub fn replace(&mut self, other: FormDocument) {
        let generation = self.generation + 1;
        *self = other;
        self.generation = generation;
    }

    /// Append a field. Fails if a field with the same id exists.
    ///
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<(), FormError> {
        if self.contains(&field.id) {
            return Err(FormError::DuplicateId { id: field.id });
        }
        debug!("Adding {} field '{}'...", field.field_type(), field.id);
        let mut elements = self.elements.to_vec();
        elements.push(field);
        self.commit(elements);
        Ok(())
    }

    /// Replace every field whose id matches an update. Fields without an
    /// update are untouched and updates for unknown ids are skipped. Returns
    /// the number of fields replaced.
    ///
    pub fn update_fields(&mut self, updates: &[FieldDefinition]) -> usize {
        let mut replaced = 0;
        let elements: Vec<FieldDefinition> = self
            .elements
            .iter()
            .map(|field| match updates.iter().find(|u| u.id == field.id) {
                Some(update) => {
                    replaced += 1;
                    update.clone()
                }
                None => field.clone(),
            })
            .collect();

        for update in updates {
            if !self.contains(&update.id) {
                debug!("Skipping update for unknown field '{}'", update.id);
            }
        }

        if replaced > 0 {
            self.commit(elements);
        }
        replaced
    }

    /// Remove every field whose id is listed. Unknown ids are ignored.
    /// Returns the number of fields removed.
    ///
    pub fn remove_fields<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|s| s.as_ref().to_owned()).collect();
        let before = self.elements.len();
        let elements: Vec<FieldDefinition> = self
            .elements
            .iter()
            .filter(|f| !ids.contains(&f.id))
            .cloned()
            .collect();
        let removed = before - elements.len();
        if removed > 0 {
            debug!("Removed {} field(s)", removed);
            self.commit(elements);
        }
        removed
    }

    /// Install a new field order. Callers guarantee it is a permutation of
    /// the current fields.
    ///
    pub(crate) fn commit(&mut self, elements: Vec<FieldDefinition>) {
        self.elements = Arc::new(elements);
        self.generation += 1;
    }

    pub(crate) fn check_unique_ids(&self) -> Result<(), FormError> {
        let mut seen = HashSet::new();
        for field in self.elements.iter() {
            if !seen.insert(field.id.as_str()) {
                return Err(FormError::DuplicateId {
                    id: field.id.clone(),
                });
            }
        }
        Ok(())
    }
}
