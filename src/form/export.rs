//! Conversions of a form document into other representations.

use super::field::underscore_whitespace;
use super::{FormDocument, FormError, FormMetadata};
use log::*;

const CSV_FILE_SUFFIX: &str = "_template.csv";

/// Render the CSV header template of a form: name and description lines,
/// a blank line, then the field labels joined by commas. Labels are not
/// escaped, so a label containing a comma splits into two columns.
///
pub fn to_csv_template(doc: &FormDocument) -> String {
    let headers = doc
        .elements()
        .iter()
        .map(|f| f.label.as_str())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "Form Name: {}\nForm Description: {}\n\n{}\n",
        doc.metadata.name, doc.metadata.description, headers
    )
}

/// File name offered for the CSV template of a form.
///
pub fn export_file_name(metadata: &FormMetadata) -> String {
    format!("{}{}", underscore_whitespace(&metadata.name), CSV_FILE_SUFFIX)
}

/// Pretty-printed JSON of the document, as stored.
///
pub fn to_json_source(doc: &FormDocument) -> Result<String, FormError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse a document from JSON, rejecting duplicate field ids.
///
pub fn from_json(source: &str) -> Result<FormDocument, FormError> {
    let doc: FormDocument = serde_json::from_str(source)?;
    doc.check_unique_ids()?;
    debug!(
        "Imported form '{}' with {} field(s)",
        doc.metadata.name,
        doc.len()
    );
    Ok(doc)
}
