//! Form design model.
//!
//! This module contains the in-memory model of a form being designed:
//! - Field definitions and their type-specific settings
//! - The form document and its mutation rules
//! - Field selection, reordering and conditional visibility
//! - Value validation, the template catalog and export transforms

mod document;
mod error;
mod export;
mod field;
mod reorder;
mod selection;
mod template;
mod validation;
mod visibility;

pub use document::{FormDocument, FormMetadata, Layout};
pub use error::FormError;
pub use export::{export_file_name, from_json, to_csv_template, to_json_source};
pub use field::{
    derive_name, generate_id, Choices, Condition, ConditionalLogic, FieldDefinition, FieldKind,
    FieldType, NumberRange, Size, TextRules,
};
pub use reorder::reorder;
pub use selection::Selection;
pub use template::{select_template, templates, Template};
pub use validation::{compile_pattern, validate_form, validate_value, ValueIssue};
pub use visibility::{
    condition_met, dangling_dependencies, is_visible, split_multi_value, visible_fields,
    FieldValues, MULTI_VALUE_SEPARATOR,
};
