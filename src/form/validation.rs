//! Client-side checks of entered values against a field's rules.
//!
//! Only fields that currently render are checked. Patterns follow the HTML
//! `pattern` attribute and must match the whole value.

use super::visibility::{split_multi_value, visible_fields, FieldValues};
use super::{FieldDefinition, FieldKind, FormDocument, FormError};
use regex::Regex;
use std::fmt;

/// A problem with one entered value.
///
#[derive(Clone, Debug, PartialEq)]
pub enum ValueIssue {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    NotANumber,
    BelowMin { min: f64 },
    AboveMax { max: f64 },
    UnknownOption { option: String },
    PatternMismatch,
}

impl fmt::Display for ValueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueIssue::Required => write!(f, "This field is required"),
            ValueIssue::TooShort { min } => write!(f, "Must be at least {} characters", min),
            ValueIssue::TooLong { max } => write!(f, "Must be at most {} characters", max),
            ValueIssue::NotANumber => write!(f, "Must be a number"),
            ValueIssue::BelowMin { min } => write!(f, "Must be at least {}", min),
            ValueIssue::AboveMax { max } => write!(f, "Must be at most {}", max),
            ValueIssue::UnknownOption { option } => write!(f, "'{}' is not an option", option),
            ValueIssue::PatternMismatch => write!(f, "Does not match the required format"),
        }
    }
}

/// Compile a field's validation pattern, anchored to the whole value.
///
pub fn compile_pattern(field: &FieldDefinition) -> Result<Option<Regex>, FormError> {
    match field.validation.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(pattern) => Regex::new(&format!("^(?:{})$", pattern))
            .map(Some)
            .map_err(|e| FormError::InvalidPattern {
                id: field.id.clone(),
                message: e.to_string(),
            }),
    }
}

/// Check one value against a field. Empty optional values pass.
///
pub fn validate_value(field: &FieldDefinition, value: &str) -> Result<Vec<ValueIssue>, FormError> {
    let mut issues = Vec::new();
    if !field.is_input() {
        return Ok(issues);
    }

    let value = value.trim();
    if value.is_empty() {
        if field.required {
            issues.push(ValueIssue::Required);
        }
        return Ok(issues);
    }

    match &field.kind {
        FieldKind::Text(rules) | FieldKind::Textarea(rules) => {
            let len = value.chars().count();
            if let Some(min) = rules.min_length.filter(|min| len < *min) {
                issues.push(ValueIssue::TooShort { min });
            }
            if let Some(max) = rules.max_length.filter(|max| len > *max) {
                issues.push(ValueIssue::TooLong { max });
            }
        }
        FieldKind::Number(range) => match value.parse::<f64>() {
            Ok(n) => {
                if let Some(min) = range.min.filter(|min| n < *min) {
                    issues.push(ValueIssue::BelowMin { min });
                }
                if let Some(max) = range.max.filter(|max| n > *max) {
                    issues.push(ValueIssue::AboveMax { max });
                }
            }
            Err(_) => issues.push(ValueIssue::NotANumber),
        },
        FieldKind::Select(choices) => {
            if !choices.options.is_empty() && !choices.options.iter().any(|o| o == value) {
                issues.push(ValueIssue::UnknownOption {
                    option: value.to_owned(),
                });
            }
        }
        FieldKind::Multiselect(choices) if !choices.options.is_empty() => {
            for option in split_multi_value(value, &choices.options) {
                if !choices.options.iter().any(|o| o == option) {
                    issues.push(ValueIssue::UnknownOption {
                        option: option.to_owned(),
                    });
                }
            }
        }
        _ => {}
    }

    if let Some(re) = compile_pattern(field)? {
        if !re.is_match(value) {
            issues.push(ValueIssue::PatternMismatch);
        }
    }
    Ok(issues)
}

/// Check every rendered field, returning `(field id, issue)` pairs in
/// document order.
///
pub fn validate_form(
    doc: &FormDocument,
    values: &FieldValues,
) -> Result<Vec<(String, ValueIssue)>, FormError> {
    let mut issues = Vec::new();
    for field in visible_fields(doc, values) {
        for issue in validate_value(field, values.get(&field.id))? {
            issues.push((field.id.clone(), issue));
        }
    }
    Ok(issues)
}
