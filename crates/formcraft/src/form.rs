//! The form document: metadata, ordered fields and styling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::styling::Styling;

/// Title given to a form that has not been named yet.
pub const DEFAULT_TITLE: &str = "New Form";

/// An authored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Library id. Empty until the form is first saved.
    pub id: String,
    /// Title; must be non-blank to save.
    pub title: String,
    /// Optional introduction shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in display order. Ids are unique.
    pub fields: Vec<Field>,
    /// Presentation.
    pub styling: Styling,
    /// When the form was created.
    pub created_at: DateTime<Utc>,
    /// When the form was last edited.
    pub updated_at: DateTime<Utc>,
    /// Whether the form accepts responses.
    pub is_active: bool,
}

impl Form {
    /// A fresh, unsaved form with the default title and styling.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title: DEFAULT_TITLE.to_string(),
            description: Some(String::new()),
            fields: Vec::new(),
            styling: Styling::default(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Whether this form has been stored in the library yet.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }

    /// Look up a field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Resolve a field by id, or failing that by case-insensitive label.
    #[must_use]
    pub fn find_field(&self, key: &str) -> Option<&Field> {
        self.field(key).or_else(|| {
            self.fields
                .iter()
                .find(|field| field.label.eq_ignore_ascii_case(key))
        })
    }

    /// The description, if non-blank.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{create_default_field, FieldType};

    #[test]
    fn test_new_form_defaults() {
        let form = Form::new();
        assert!(!form.is_saved());
        assert_eq!(form.title, DEFAULT_TITLE);
        assert!(form.fields.is_empty());
        assert!(form.is_active);
        assert_eq!(form.styling, Styling::default());
        assert!(form.description_text().is_none());
    }

    #[test]
    fn test_find_field_by_id_or_label() {
        let mut form = Form::new();
        let field = create_default_field(FieldType::Email);
        let id = field.id.clone();
        form.fields.push(field);

        assert_eq!(form.find_field(&id).map(|f| f.id.as_str()), Some(id.as_str()));
        assert_eq!(
            form.find_field("email address").map(|f| f.id.as_str()),
            Some(id.as_str())
        );
        assert!(form.find_field("nope").is_none());
    }

    #[test]
    fn test_form_round_trip() {
        let mut form = Form::new();
        form.id = "form_1".to_string();
        form.description = Some("About you".to_string());
        form.fields.push(create_default_field(FieldType::Radio));
        form.fields.push(create_default_field(FieldType::Text));

        let json = serde_json::to_string(&form).unwrap();
        let back: Form = serde_json::from_str(&json).unwrap();
        assert_eq!(back, form);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("created_at").is_some());
        assert!(value.get("is_active").is_some());
        assert!(value["styling"].get("primaryColor").is_some());
    }
}
