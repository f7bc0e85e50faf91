//! Conditional visibility evaluation.
//!
//! Evaluation is a pure function of the document and the current values.
//! Callers re-run it after any value changes, not only the dependency's.

use super::{Condition, ConditionalLogic, FieldDefinition, FormDocument};
use std::collections::HashMap;

/// Separator used to normalise multi-valued inputs into one string.
///
pub const MULTI_VALUE_SEPARATOR: &str = ", ";

/// Current user-entered values keyed by field id.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        FieldValues::default()
    }

    pub fn set(&mut self, field_id: &str, value: &str) {
        self.values.insert(field_id.to_owned(), value.to_owned());
    }

    /// Store a multi-valued input as one normalised string.
    ///
    pub fn set_many<S: AsRef<str>>(&mut self, field_id: &str, values: &[S]) {
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(MULTI_VALUE_SEPARATOR);
        self.set(field_id, &joined);
    }

    /// Value of a field, empty when never set.
    ///
    pub fn get(&self, field_id: &str) -> &str {
        self.values.get(field_id).map(String::as_str).unwrap_or("")
    }

    pub fn remove(&mut self, field_id: &str) {
        self.values.remove(field_id);
    }

    /// Forget values for fields that no longer exist.
    ///
    pub fn retain_existing(&mut self, doc: &FormDocument) {
        self.values.retain(|id, _| doc.contains(id));
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        FieldValues {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split a multi-valued input back into its parts. Whole option texts are
/// matched first, so an option containing the separator stays in one piece.
/// Any other text is split on commas and trimmed.
///
pub fn split_multi_value<'a>(value: &'a str, options: &[String]) -> Vec<&'a str> {
    let separator = MULTI_VALUE_SEPARATOR.trim();
    let mut parts = Vec::new();
    let mut rest = value.trim_start();
    while !rest.is_empty() {
        let whole = options
            .iter()
            .filter(|o| !o.is_empty() && rest.starts_with(o.as_str()))
            .filter(|o| {
                let tail = rest[o.len()..].trim_start();
                tail.is_empty() || tail.starts_with(separator)
            })
            .map(String::len)
            .max();
        let (part, tail) = match whole {
            Some(len) => rest.split_at(len),
            None => rest.split_at(rest.find(separator).unwrap_or(rest.len())),
        };
        let part = part.trim();
        if !part.is_empty() {
            parts.push(part);
        }
        rest = tail.trim_start();
        rest = rest.strip_prefix(separator).unwrap_or(rest).trim_start();
    }
    parts
}

/// Whether a rule is satisfied by the current values. A missing dependency
/// reads as the empty string.
///
pub fn condition_met(logic: &ConditionalLogic, values: &FieldValues) -> bool {
    let dep = values.get(&logic.depends_on);
    match logic.condition {
        Condition::Equals => dep == logic.value,
        Condition::NotEquals => dep != logic.value,
        Condition::Contains => dep.contains(logic.value.as_str()),
        Condition::NotContains => !dep.contains(logic.value.as_str()),
    }
}

/// Whether a field renders given the current values.
///
pub fn is_visible(field: &FieldDefinition, values: &FieldValues) -> bool {
    field.visible
        && field
            .conditional_logic
            .as_ref()
            .map_or(true, |logic| condition_met(logic, values))
}

/// Fields that render, in document order. A rule whose dependency is not
/// another field of the document is never satisfied.
///
pub fn visible_fields<'a>(doc: &'a FormDocument, values: &FieldValues) -> Vec<&'a FieldDefinition> {
    doc.elements()
        .iter()
        .filter(|f| !has_dangling_dependency(doc, f) && is_visible(f, values))
        .collect()
}

fn has_dangling_dependency(doc: &FormDocument, field: &FieldDefinition) -> bool {
    field
        .conditional_logic
        .as_ref()
        .map_or(false, |logic| {
            logic.depends_on == field.id || !doc.contains(&logic.depends_on)
        })
}

/// Fields whose rule depends on themselves or on a field missing from the
/// document, as `(field id, dependency id)` pairs.
///
pub fn dangling_dependencies(doc: &FormDocument) -> Vec<(&str, &str)> {
    doc.elements()
        .iter()
        .filter(|f| has_dangling_dependency(doc, f))
        .filter_map(|f| {
            let logic = f.conditional_logic.as_ref()?;
            Some((f.id.as_str(), logic.depends_on.as_str()))
        })
        .collect()
}
