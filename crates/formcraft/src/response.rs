//! Respondent answers and submitted response records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id;

/// A single answer: a scalar string, or the selected options of a
/// checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Free text, a number typed as text, or one chosen option.
    Text(String),
    /// Selected options of a checkbox group, in selection order.
    Choices(Vec<String>),
}

impl ResponseValue {
    /// True for a string that is empty after trimming. A list is never
    /// blank, even with nothing selected.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Choices(_) => false,
        }
    }

    /// The scalar text, if this is a scalar.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Choices(_) => None,
        }
    }

    /// The selected options, if this is a list.
    #[must_use]
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::Choices(choices) => Some(choices),
        }
    }

    /// Flatten to display text, joining list entries with `, `.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Choices(choices) => choices.join(", "),
        }
    }
}

impl From<&str> for ResponseValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(choices: Vec<String>) -> Self {
        Self::Choices(choices)
    }
}

/// Answers keyed by field id. A missing key means the field was never
/// touched.
pub type ResponseMap = BTreeMap<String, ResponseValue>;

/// One respondent's submitted answers to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    /// Unique id of this response.
    pub id: String,
    /// The form answered. Not enforced: responses outlive deleted forms.
    pub form_id: String,
    /// The answers, by field id.
    pub responses: ResponseMap,
    /// When the response was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl FormResponse {
    /// Build a response for `form_id` stamped with a fresh id and the
    /// current time.
    #[must_use]
    pub fn new(form_id: impl Into<String>, responses: ResponseMap) -> Self {
        Self {
            id: id::generate("response"),
            form_id: form_id.into(),
            responses,
            submitted_at: Utc::now(),
        }
    }

    /// The answer for a field, if any.
    #[must_use]
    pub fn value(&self, field_id: &str) -> Option<&ResponseValue> {
        self.responses.get(field_id)
    }
}
