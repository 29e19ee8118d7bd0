//! Field validation shared by the preview and public renderers.
//!
//! [`validate_field`] checks one answer against one field's constraints and
//! returns the first failing rule's message. Rules run in this order:
//! required, email shape, minimum length, maximum length.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::field::{Field, FieldType};
use crate::form::Form;
use crate::response::{ResponseMap, ResponseValue};

/// Validation messages keyed by field id.
pub type FieldErrors = BTreeMap<String, String>;

/// Message shown when an email field holds something that is not an address.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Shape check for email addresses: something, `@`, something, `.`, something.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid regex pattern"))
}

/// Check whether `text` looks like an email address.
#[must_use]
pub fn is_valid_email(text: &str) -> bool {
    email_regex().is_match(text)
}

/// Validate an answer against a field.
///
/// Returns `None` when the value is acceptable, or a human-readable message
/// for the first rule it breaks. Length limits apply to scalar text only;
/// checkbox selections are never length-checked, and a checkbox selection
/// always satisfies `required`.
#[must_use]
pub fn validate_field(field: &Field, value: Option<&ResponseValue>) -> Option<String> {
    let text = value.and_then(ResponseValue::as_text);

    if field.required && value.map_or(true, ResponseValue::is_blank) {
        return Some(format!("{} is required", field.label));
    }

    // Empty text is "no value" for every rule below.
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return None;
    };

    if field.field_type == FieldType::Email && !is_valid_email(text) {
        return Some(INVALID_EMAIL_MESSAGE.to_string());
    }

    let validation = field.validation.as_ref()?;
    let length = text.chars().count();

    if let Some(min) = validation.min_length.filter(|&n| n > 0) {
        if length < min {
            return Some(format!(
                "{} must be at least {min} characters",
                field.label
            ));
        }
    }

    if let Some(max) = validation.max_length.filter(|&n| n > 0) {
        if length > max {
            return Some(format!(
                "{} must be no more than {max} characters",
                field.label
            ));
        }
    }

    None
}

/// Validate every field of a form against a response map.
///
/// Returns one message per failing field; an empty map means the responses
/// can be submitted.
#[must_use]
pub fn validate_form(form: &Form, responses: &ResponseMap) -> FieldErrors {
    form.fields
        .iter()
        .filter_map(|field| {
            validate_field(field, responses.get(&field.id)).map(|msg| (field.id.clone(), msg))
        })
        .collect()
}
