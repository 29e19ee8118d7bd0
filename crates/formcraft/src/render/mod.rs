//! Interpretation of a form for display.
//!
//! The same form and response map are shown two ways: as the builder's
//! preview and as the public submission page. Both go through
//! [`Widget::for_field`], which decides the input affordance for one field
//! and its current value, and both validate with
//! [`crate::validate::validate_field`].
//!
//! - [`Widget`] is the per-field interpretation, independent of output format.
//! - [`html`] turns a form (or the confirmation screen) into a standalone page.

pub mod html;

use crate::field::{Field, FieldType};
use crate::response::ResponseValue;

/// Label of the empty entry at the top of a dropdown.
pub const SELECT_PLACEHOLDER: &str = "Select an option...";

/// Rows shown for a multi-line input.
pub const TEXTAREA_ROWS: u8 = 4;

/// Which surface a form is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The builder's preview. Submissions are validated but not stored.
    Preview,
    /// The page respondents fill in.
    #[default]
    Public,
}

impl RenderMode {
    /// Text on the submit button.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Preview => "Submit (Preview)",
            Self::Public => "Submit Form",
        }
    }
}

/// Native semantics of a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text.
    Text,
    /// Email address.
    Email,
    /// Number.
    Number,
}

impl InputKind {
    /// The HTML `type` attribute.
    #[must_use]
    pub fn as_html_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
        }
    }
}

/// The input affordance for one field, with its current value applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget<'a> {
    /// Single-line input.
    Input {
        /// Native input semantics.
        kind: InputKind,
        /// Hint text.
        placeholder: Option<&'a str>,
        /// Current text.
        value: &'a str,
    },
    /// Multi-line input.
    TextArea {
        /// Visible rows.
        rows: u8,
        /// Hint text.
        placeholder: Option<&'a str>,
        /// Current text.
        value: &'a str,
    },
    /// Dropdown with an empty "unselected" entry first.
    Select {
        /// The choices.
        options: &'a [String],
        /// Currently chosen option, if any.
        selected: Option<&'a str>,
    },
    /// Mutually exclusive choice.
    Radio {
        /// Group name shared by the buttons.
        group: &'a str,
        /// The choices.
        options: &'a [String],
        /// Currently chosen option, if any.
        selected: Option<&'a str>,
    },
    /// Independent multi-select.
    Checkbox {
        /// The choices.
        options: &'a [String],
        /// Currently ticked options.
        selected: &'a [String],
    },
}

impl<'a> Widget<'a> {
    /// Interpret a field and its current value.
    ///
    /// Scalar widgets ignore list values and list widgets ignore scalar
    /// values; either way the widget shows as empty.
    #[must_use]
    pub fn for_field(field: &'a Field, value: Option<&'a ResponseValue>) -> Self {
        let text = value.and_then(ResponseValue::as_text);
        let chosen = text.filter(|t| !t.is_empty());
        let placeholder = field.placeholder.as_deref();

        match field.field_type {
            FieldType::Text | FieldType::Email | FieldType::Number => Self::Input {
                kind: match field.field_type {
                    FieldType::Email => InputKind::Email,
                    FieldType::Number => InputKind::Number,
                    _ => InputKind::Text,
                },
                placeholder,
                value: text.unwrap_or_default(),
            },
            FieldType::Textarea => Self::TextArea {
                rows: TEXTAREA_ROWS,
                placeholder,
                value: text.unwrap_or_default(),
            },
            FieldType::Select => Self::Select {
                options: field.options(),
                selected: chosen,
            },
            FieldType::Radio => Self::Radio {
                group: &field.id,
                options: field.options(),
                selected: chosen,
            },
            FieldType::Checkbox => Self::Checkbox {
                options: field.options(),
                selected: value
                    .and_then(ResponseValue::as_choices)
                    .unwrap_or_default(),
            },
        }
    }
}

/// Tick or untick one checkbox option.
///
/// Other selections are kept in their order; a newly ticked option goes to
/// the end. Ticking an already ticked option changes nothing.
#[must_use]
pub fn toggle_checkbox(current: Option<&ResponseValue>, option: &str, checked: bool) -> ResponseValue {
    let mut selected: Vec<String> = current
        .and_then(ResponseValue::as_choices)
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    if checked {
        if !selected.iter().any(|s| s == option) {
            selected.push(option.to_string());
        }
    } else {
        selected.retain(|s| s != option);
    }
    ResponseValue::Choices(selected)
}

/// Choose one radio option. The result is always a single scalar.
#[must_use]
pub fn select_radio(option: &str) -> ResponseValue {
    ResponseValue::Text(option.to_string())
}
