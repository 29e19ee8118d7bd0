//! Field definitions and the default-field factory.
//!
//! A [`Field`] is one input definition within a form. The set of field types
//! is closed; choice-based types (select, radio, checkbox) carry a non-empty
//! option list and the rest carry none.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id;

/// The kind of input a field collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line free text.
    Text,
    /// Single-line email address.
    Email,
    /// Multi-line free text.
    Textarea,
    /// Dropdown, one option.
    Select,
    /// Independent multi-select across the options.
    Checkbox,
    /// Mutually exclusive single choice across the options.
    Radio,
    /// Single-line numeric input.
    Number,
}

impl FieldType {
    /// Every field type, in field-selector order.
    pub const ALL: [FieldType; 7] = [
        Self::Text,
        Self::Email,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Number,
    ];

    /// Whether this type draws its values from an option list.
    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }

    /// Whether values of this type are lists rather than scalars.
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// Label used for a freshly created field of this type.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Text => "Text Field",
            Self::Email => "Email Address",
            Self::Textarea => "Message",
            Self::Select => "Select Option",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Button",
            Self::Number => "Number",
        }
    }

    /// Name shown in the field type selector.
    #[must_use]
    pub fn selector_label(self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Email => "Email",
            Self::Textarea => "Textarea",
            Self::Select => "Dropdown",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Button",
            Self::Number => "Number",
        }
    }

    /// Whether the field editor offers a placeholder for this type.
    #[must_use]
    pub fn has_placeholder(self) -> bool {
        !self.is_choice()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Number => "number",
        };
        f.write_str(name)
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_edit(format!("unknown field type: {s}")))
    }
}

/// Optional length and pattern constraints on a field's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Minimum number of characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum number of characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Pattern the value should match. Stored but not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldValidation {
    /// True when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none() && self.pattern.is_none()
    }
}

/// One input definition within a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Unique id within the owning form.
    pub id: String,

    /// The kind of input.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Label shown above the input and used in messages and CSV headers.
    pub label: String,

    /// Hint text shown inside empty inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,

    /// Choices for select, radio and checkbox fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Length and pattern constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl Field {
    /// The option list, or an empty slice for non-choice fields.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Check the options and placeholder invariants for this field's type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdit`] if a choice field has no options, a
    /// non-choice field carries an option list, or a type without a
    /// placeholder carries one.
    pub fn check_shape(&self) -> Result<()> {
        if self.placeholder.is_some() && !self.field_type.has_placeholder() {
            return Err(Error::invalid_edit(format!(
                "{} field '{}' has no placeholder",
                self.field_type, self.label
            )));
        }
        match (self.field_type.is_choice(), self.options.as_ref()) {
            (true, Some(options)) if !options.is_empty() => Ok(()),
            (true, _) => Err(Error::invalid_edit(format!(
                "{} field '{}' needs at least one option",
                self.field_type, self.label
            ))),
            (false, Some(_)) => Err(Error::invalid_edit(format!(
                "{} field '{}' cannot have options",
                self.field_type, self.label
            ))),
            (false, None) => Ok(()),
        }
    }
}

/// Create a field of the given type with sensible defaults.
///
/// The field gets a fresh id, the type's default label and `required =
/// false`. Text-like types get a placeholder; select and radio get three
/// options and checkbox gets one.
#[must_use]
pub fn create_default_field(field_type: FieldType) -> Field {
    let label = field_type.default_label();
    let (placeholder, options) = match field_type {
        FieldType::Text | FieldType::Email | FieldType::Number => (
            Some(format!("Enter your {}", label.to_lowercase())),
            None,
        ),
        FieldType::Textarea => (Some("Enter your message here...".to_string()), None),
        FieldType::Select | FieldType::Radio => (
            None,
            Some(vec![
                "Option 1".to_string(),
                "Option 2".to_string(),
                "Option 3".to_string(),
            ]),
        ),
        FieldType::Checkbox => (None, Some(vec!["Checkbox option".to_string()])),
    };

    Field {
        id: id::generate("field"),
        field_type,
        label: label.to_string(),
        placeholder,
        required: false,
        options,
        validation: None,
    }
}
