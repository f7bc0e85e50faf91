//! Field definition types.
//!
//! A field is split into the attributes every input shares (label, name,
//! size, visibility, conditional logic) and a `FieldKind` carrying only the
//! settings that make sense for its type. On the wire the two are flattened
//! back into the single camelCase record the form documents are stored as.

use fake::Dummy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix used for generated field ids.
///
const ID_PREFIX: &str = "element";

/// Tag naming the type of a field.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    Multiselect,
    Checkbox,
    File,
    Date,
    Number,
    Label,
}

impl FieldType {
    /// Every field type in palette order.
    ///
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Checkbox,
        FieldType::File,
        FieldType::Date,
        FieldType::Number,
        FieldType::Label,
    ];

    /// Wire name of the type.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Checkbox => "checkbox",
            FieldType::File => "file",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::Label => "label",
        }
    }

    /// Human-readable name shown in the element palette.
    ///
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Box",
            FieldType::Textarea => "Text Area",
            FieldType::Select => "Select Box",
            FieldType::Multiselect => "Multiple Dropdown",
            FieldType::Checkbox => "Checkbox",
            FieldType::File => "File Upload",
            FieldType::Date => "Date Picker",
            FieldType::Number => "Number",
            FieldType::Label => "Label",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown field type '{}'", s))
    }
}

/// Length limits for text-like inputs.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Value range for number inputs.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Ordered options of a select or multiselect.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Choices {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Choices {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Type-specific configuration of a field.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text(TextRules),
    Textarea(TextRules),
    Select(Choices),
    Multiselect(Choices),
    Checkbox,
    File,
    Date,
    Number(NumberRange),
    Label,
}

impl FieldKind {
    /// Return the default configuration for a field type.
    ///
    pub fn empty(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text(TextRules::default()),
            FieldType::Textarea => FieldKind::Textarea(TextRules::default()),
            FieldType::Select => FieldKind::Select(Choices::default()),
            FieldType::Multiselect => FieldKind::Multiselect(Choices::default()),
            FieldType::Checkbox => FieldKind::Checkbox,
            FieldType::File => FieldKind::File,
            FieldType::Date => FieldKind::Date,
            FieldType::Number => FieldKind::Number(NumberRange::default()),
            FieldType::Label => FieldKind::Label,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text(_) => FieldType::Text,
            FieldKind::Textarea(_) => FieldType::Textarea,
            FieldKind::Select(_) => FieldType::Select,
            FieldKind::Multiselect(_) => FieldType::Multiselect,
            FieldKind::Checkbox => FieldType::Checkbox,
            FieldKind::File => FieldType::File,
            FieldKind::Date => FieldType::Date,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Label => FieldType::Label,
        }
    }

    /// Options for choice fields, empty for everything else.
    ///
    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Select(choices) | FieldKind::Multiselect(choices) => &choices.options,
            _ => &[],
        }
    }

    pub fn text_rules(&self) -> Option<&TextRules> {
        match self {
            FieldKind::Text(rules) | FieldKind::Textarea(rules) => Some(rules),
            _ => None,
        }
    }

    pub fn number_range(&self) -> Option<&NumberRange> {
        match self {
            FieldKind::Number(range) => Some(range),
            _ => None,
        }
    }
}

/// Rendered width of a field.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "size", rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
    Custom {
        #[serde(
            rename = "customWidth",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        width: Option<u16>,
    },
}

impl Default for Size {
    fn default() -> Self {
        Size::Medium
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            "custom" => Ok(Size::Custom { width: None }),
            other => other
                .parse::<u16>()
                .map(|width| Size::Custom { width: Some(width) })
                .map_err(|_| format!("unknown size '{}'", s)),
        }
    }
}

/// Comparison applied by conditional logic.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Equals,
    NotEquals,
    Contains,
    NotContains,
}

impl FromStr for Condition {
    type Err = String;

    /// Accepts the wire names (`notEquals`) as well as kebab and snake case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "equals" => Ok(Condition::Equals),
            "notequals" => Ok(Condition::NotEquals),
            "contains" => Ok(Condition::Contains),
            "notcontains" => Ok(Condition::NotContains),
            _ => Err(format!("unknown condition '{}'", s)),
        }
    }
}

/// Rule making a field's visibility depend on another field's value.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalLogic {
    pub depends_on: String,
    pub condition: Condition,
    pub value: String,
}

impl ConditionalLogic {
    pub fn new(depends_on: &str, condition: Condition, value: &str) -> Self {
        ConditionalLogic {
            depends_on: depends_on.to_owned(),
            condition,
            value: value.to_owned(),
        }
    }
}

fn default_visible() -> bool {
    true
}

/// Schema for one form field.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub label: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<ConditionalLogic>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl FieldDefinition {
    /// Return a new field of the given type with a freshly generated id and
    /// a machine name derived from the label.
    ///
    pub fn new(field_type: FieldType, label: &str) -> Self {
        Self::with_id(&generate_id(), field_type, label)
    }

    /// Return a new field with an explicit id.
    ///
    pub fn with_id(id: &str, field_type: FieldType, label: &str) -> Self {
        FieldDefinition {
            id: id.to_owned(),
            kind: FieldKind::empty(field_type),
            label: label.to_owned(),
            name: derive_name(label),
            placeholder: None,
            required: false,
            size: Size::Medium,
            validation: None,
            conditional_logic: None,
            visible: true,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// Whether the field accepts user input. Labels are display-only.
    ///
    pub fn is_input(&self) -> bool {
        !matches!(self.kind, FieldKind::Label)
    }
}

/// Derive a machine key from a label: lower-cased, each whitespace run
/// replaced by a single underscore.
///
pub fn derive_name(label: &str) -> String {
    underscore_whitespace(&label.to_lowercase())
}

/// Replace every run of whitespace with `_`.
///
pub fn underscore_whitespace(text: &str) -> String {
    match Regex::new(r"\s+") {
        Ok(re) => re.replace_all(text, "_").into_owned(),
        Err(_) => text.split_whitespace().collect::<Vec<_>>().join("_"),
    }
}

/// Generate a field id unique across sessions.
///
pub fn generate_id() -> String {
    format!("{}-{}", ID_PREFIX, uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_condition_from_str() {
        assert_eq!("notEquals".parse::<Condition>().unwrap(), Condition::NotEquals);
        assert_eq!("not-contains".parse::<Condition>().unwrap(), Condition::NotContains);
        assert_eq!("EQUALS".parse::<Condition>().unwrap(), Condition::Equals);
        assert!("matches".parse::<Condition>().is_err());
    }

    #[test]
    fn test_derive_name() {
        assert_eq!(derive_name("Full Name"), "full_name");
        assert_eq!(derive_name("Preferred   Date\tOf Arrival"), "preferred_date_of_arrival");
        assert_eq!(derive_name("email"), "email");
    }

    #[test]
    fn test_new_field_defaults() {
        let field = FieldDefinition::new(FieldType::Text, "Your Email");
        assert!(field.id.starts_with("element-"));
        assert_eq!(field.name, "your_email");
        assert_eq!(field.size, Size::Medium);
        assert!(field.visible);
        assert!(!field.required);
        assert_eq!(field.field_type(), FieldType::Text);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = FieldDefinition::new(FieldType::Date, "When");
        let b = FieldDefinition::new(FieldType::Date, "When");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_field_type_from_str() {
        assert_eq!("multiselect".parse::<FieldType>(), Ok(FieldType::Multiselect));
        assert_eq!(" TEXTAREA ".parse::<FieldType>(), Ok(FieldType::Textarea));
        assert!("radio".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_size_from_str() {
        assert_eq!("large".parse::<Size>(), Ok(Size::Large));
        assert_eq!("240".parse::<Size>(), Ok(Size::Custom { width: Some(240) }));
        assert!("huge".parse::<Size>().is_err());
    }

    #[test]
    fn test_serialize_flat_record() {
        let mut field = FieldDefinition::with_id("diet", FieldType::Select, "Diet");
        field.kind = FieldKind::Select(Choices::new(["None", "Vegan"]));
        field.size = Size::Custom { width: Some(320) };
        field.conditional_logic = Some(ConditionalLogic::new("attending", Condition::Equals, "yes"));

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["id"], "diet");
        assert_eq!(value["type"], "select");
        assert_eq!(value["options"], json!(["None", "Vegan"]));
        assert_eq!(value["size"], "custom");
        assert_eq!(value["customWidth"], 320);
        assert_eq!(value["conditionalLogic"]["dependsOn"], "attending");
        assert_eq!(value["conditionalLogic"]["condition"], "equals");
        assert_eq!(value["visible"], true);
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "id": "age",
            "type": "number",
            "label": "Age",
            "name": "age",
            "required": true,
            "size": "small",
            "min": 18,
            "max": 99,
            "conditionalLogic": {
                "dependsOn": "adult",
                "condition": "notContains",
                "value": "no"
            },
            "visible": true
        }))
        .unwrap();

        assert_eq!(field.field_type(), FieldType::Number);
        assert_eq!(field.size, Size::Small);
        assert_eq!(
            field.kind.number_range(),
            Some(&NumberRange {
                min: Some(18.0),
                max: Some(99.0)
            })
        );
        assert_eq!(
            field.conditional_logic.map(|c| c.condition),
            Some(Condition::NotContains)
        );
    }

    #[test]
    fn test_deserialize_defaults_visible() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "id": "bio",
            "type": "textarea",
            "label": "Bio",
            "name": "bio",
            "size": "large",
            "maxLength": 500
        }))
        .unwrap();
        assert!(field.visible);
        assert!(!field.required);
        assert_eq!(
            field.kind.text_rules().and_then(|r| r.max_length),
            Some(500)
        );
    }

    #[test]
    fn test_kind_options_only_for_choices() {
        assert!(FieldKind::empty(FieldType::Text).options().is_empty());
        let kind = FieldKind::Multiselect(Choices::new(["a", "b"]));
        assert_eq!(kind.options(), &["a".to_string(), "b".to_string()]);
    }
}
