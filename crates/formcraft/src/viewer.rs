//! Text views of the dashboard and of a form's responses.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::form::Form;
use crate::response::{FormResponse, ResponseValue};

/// Shown in place of an answer that was never given.
pub const NO_RESPONSE: &str = "No response";

/// `Mar 9, 2024, 02:05 PM`.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// `Mar 9, 2024`.
#[must_use]
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Dashboard line for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSummary {
    /// Form id.
    pub id: String,
    /// Form title.
    pub title: String,
    /// Description, if non-blank.
    pub description: Option<String>,
    /// Number of fields.
    pub field_count: usize,
    /// Number of stored responses for this form.
    pub response_count: usize,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the form accepts responses.
    pub is_active: bool,
}

/// Summarize each form with its response count.
#[must_use]
pub fn summarize(forms: &[Form], responses: &[FormResponse]) -> Vec<FormSummary> {
    forms
        .iter()
        .map(|form| FormSummary {
            id: form.id.clone(),
            title: form.title.clone(),
            description: form.description_text().map(str::to_string),
            field_count: form.fields.len(),
            response_count: responses.iter().filter(|r| r.form_id == form.id).count(),
            created_at: form.created_at,
            is_active: form.is_active,
        })
        .collect()
}

/// Render the dashboard listing.
#[must_use]
pub fn render_dashboard(summaries: &[FormSummary]) -> String {
    if summaries.is_empty() {
        return "No forms created yet. Create one with `formcraft form new <title>`.\n".to_string();
    }

    let mut out = String::new();
    for summary in summaries {
        let status = if summary.is_active { "active" } else { "inactive" };
        let _ = writeln!(out, "{}  {} [{status}]", summary.id, summary.title);
        if let Some(description) = &summary.description {
            let _ = writeln!(out, "    {description}");
        }
        let _ = writeln!(
            out,
            "    {} • {} fields • {} responses",
            format_date(&summary.created_at),
            summary.field_count,
            summary.response_count
        );
    }
    out
}

/// 1-based position of a response within its form's responses.
#[must_use]
pub fn response_number(responses: &[FormResponse], id: &str) -> Option<usize> {
    responses.iter().position(|r| r.id == id).map(|i| i + 1)
}

/// Render the numbered response list for a form.
#[must_use]
pub fn render_response_list(form: &Form, responses: &[FormResponse]) -> String {
    let mut out = String::new();
    let noun = if responses.len() == 1 { "response" } else { "responses" };
    let _ = writeln!(out, "{}: {} {noun}", form.title, responses.len());
    if responses.is_empty() {
        out.push_str("No responses yet\n");
        return out;
    }
    for (index, response) in responses.iter().enumerate() {
        let _ = writeln!(
            out,
            "Response #{}  {}  {}",
            index + 1,
            format_timestamp(&response.submitted_at),
            response.id
        );
    }
    out
}

/// Render one response field by field, in form order.
///
/// `number` is the response's position in its form's list.
#[must_use]
pub fn render_response_detail(form: &Form, response: &FormResponse, number: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Response #{number}");
    let _ = writeln!(
        out,
        "Submitted on {}",
        format_timestamp(&response.submitted_at)
    );
    for field in &form.fields {
        let _ = writeln!(out, "\n{}", field.label);
        match response.value(&field.id) {
            Some(ResponseValue::Choices(items)) => {
                for item in items {
                    let _ = writeln!(out, "  • {item}");
                }
            }
            Some(ResponseValue::Text(text)) if !text.is_empty() => {
                let _ = writeln!(out, "  {text}");
            }
            _ => {
                let _ = writeln!(out, "  {NO_RESPONSE}");
            }
        }
    }
    out
}
