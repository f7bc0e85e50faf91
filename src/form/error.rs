//! Form model error types.

/// Errors that can occur while editing or converting a form document.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A field with the same id already exists in the document
    #[error("Duplicate field id: {id}")]
    DuplicateId { id: String },

    /// No template with the requested name exists in the catalog
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A field's validation pattern is not a valid regular expression
    #[error("Invalid validation pattern for field {id}: {message}")]
    InvalidPattern { id: String, message: String },

    /// A form document could not be parsed or serialized
    #[error("Invalid form document: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_display() {
        let error = FormError::DuplicateId {
            id: "email".to_string(),
        };
        assert!(error.to_string().contains("Duplicate field id"));
        assert!(error.to_string().contains("email"));

        let error = FormError::TemplateNotFound {
            name: "Survey".to_string(),
        };
        assert!(error.to_string().contains("Template not found"));
        assert!(error.to_string().contains("Survey"));

        let error = FormError::InvalidPattern {
            id: "zip".to_string(),
            message: "unclosed group".to_string(),
        };
        assert!(error.to_string().contains("zip"));
        assert!(error.to_string().contains("unclosed group"));
    }

    #[test]
    fn test_form_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: FormError = json_error.into();
        assert!(matches!(error, FormError::Json(_)));
        assert!(error.to_string().contains("Invalid form document"));
    }
}
