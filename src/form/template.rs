//! Built-in catalog of starter forms.

use super::{
    Choices, FieldDefinition, FieldKind, FieldType, FormDocument, FormError, FormMetadata, Layout,
    Size,
};
use log::*;
use std::sync::OnceLock;

/// A named, reusable form document.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub document: FormDocument,
}

static CATALOG: OnceLock<Vec<Template>> = OnceLock::new();

fn catalog() -> &'static [Template] {
    CATALOG.get_or_init(|| {
        [contact_form(), event_registration()]
            .into_iter()
            .filter_map(|template| {
                template
                    .map_err(|e| error!("Dropping malformed template: {}", e))
                    .ok()
            })
            .collect()
    })
}

/// Names and descriptions of every template, in catalog order.
///
pub fn templates() -> Vec<(&'static str, &'static str)> {
    catalog()
        .iter()
        .map(|t| (t.name.as_str(), t.description.as_str()))
        .collect()
}

/// Return an independent copy of the named template's document.
///
pub fn select_template(name: &str) -> Result<FormDocument, FormError> {
    debug!("Selecting template '{}'...", name);
    catalog()
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.document.clone())
        .ok_or_else(|| FormError::TemplateNotFound {
            name: name.to_owned(),
        })
}

fn field(
    id: &str,
    field_type: FieldType,
    label: &str,
    placeholder: Option<&str>,
    required: bool,
    size: Size,
) -> FieldDefinition {
    let mut field = FieldDefinition::with_id(id, field_type, label);
    field.name = id.to_owned();
    field.placeholder = placeholder.map(str::to_owned);
    field.required = required;
    field.size = size;
    field
}

fn contact_form() -> Result<Template, FormError> {
    Ok(Template {
        name: "Contact Form".to_string(),
        description: "A simple contact form with name, email, and message fields".to_string(),
        document: FormDocument::from_parts(
            FormMetadata {
                name: "Contact Us".to_string(),
                description: "Get in touch with us".to_string(),
                layout: Layout::SingleColumn,
            },
            vec![
                field("name", FieldType::Text, "Name", Some("Enter your name"), true, Size::Medium),
                field("email", FieldType::Text, "Email", Some("Enter your email"), true, Size::Medium),
                field(
                    "message",
                    FieldType::Textarea,
                    "Message",
                    Some("Enter your message"),
                    true,
                    Size::Large,
                ),
            ],
        )?,
    })
}

fn event_registration() -> Result<Template, FormError> {
    let mut dietary = field(
        "dietaryRestrictions",
        FieldType::Select,
        "Dietary Restrictions",
        Some("Select dietary restrictions"),
        false,
        Size::Medium,
    );
    dietary.kind = FieldKind::Select(Choices::new([
        "None",
        "Vegetarian",
        "Vegan",
        "Gluten-free",
        "Kosher",
        "Halal",
    ]));

    Ok(Template {
        name: "Event Registration".to_string(),
        description: "A form for event registration with personal details and preferences"
            .to_string(),
        document: FormDocument::from_parts(
            FormMetadata {
                name: "Event Registration".to_string(),
                description: "Register for our upcoming event".to_string(),
                layout: Layout::TwoColumn,
            },
            vec![
                field(
                    "fullName",
                    FieldType::Text,
                    "Full Name",
                    Some("Enter your full name"),
                    true,
                    Size::Medium,
                ),
                field("email", FieldType::Text, "Email", Some("Enter your email"), true, Size::Medium),
                field(
                    "phone",
                    FieldType::Text,
                    "Phone Number",
                    Some("Enter your phone number"),
                    false,
                    Size::Medium,
                ),
                field("eventDate", FieldType::Date, "Preferred Date", None, true, Size::Medium),
                dietary,
                field(
                    "specialRequests",
                    FieldType::Textarea,
                    "Special Requests",
                    Some("Enter any special requests"),
                    false,
                    Size::Large,
                ),
            ],
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_listed_in_order() {
        let names: Vec<&str> = templates().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Contact Form", "Event Registration"]);
    }

    #[test]
    fn test_contact_form_contents() {
        let doc = select_template("Contact Form").unwrap();
        assert_eq!(doc.metadata.name, "Contact Us");
        assert_eq!(doc.metadata.layout, Layout::SingleColumn);
        assert_eq!(doc.ids(), vec!["name", "email", "message"]);
        assert!(doc.elements().iter().all(|f| f.required));
        assert_eq!(doc.field("message").map(|f| f.size), Some(Size::Large));
    }

    #[test]
    fn test_event_registration_contents() {
        let doc = select_template("Event Registration").unwrap();
        assert_eq!(doc.metadata.layout, Layout::TwoColumn);
        assert_eq!(doc.len(), 6);
        let dietary = doc.field("dietaryRestrictions").unwrap();
        assert_eq!(dietary.kind.options().len(), 6);
        assert_eq!(dietary.kind.options()[0], "None");
        assert!(doc.field("eventDate").unwrap().placeholder.is_none());
    }

    #[test]
    fn test_unknown_template() {
        let result = select_template("Job Application");
        assert!(matches!(result, Err(FormError::TemplateNotFound { name }) if name == "Job Application"));
    }

    #[test]
    fn test_selected_copy_does_not_alter_catalog() {
        let mut first = select_template("Contact Form").unwrap();
        first.remove_fields(["email"]);
        first.move_fields(&["message"], 0);
        first.metadata.name = "Changed".to_string();
        first
            .add_field(FieldDefinition::with_id("extra", FieldType::Checkbox, "Extra"))
            .unwrap();

        let second = select_template("Contact Form").unwrap();
        assert_eq!(second.metadata.name, "Contact Us");
        assert_eq!(second.ids(), vec!["name", "email", "message"]);
    }
}
