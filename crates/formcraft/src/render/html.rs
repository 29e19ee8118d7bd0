//! Standalone HTML pages for a form.
//!
//! [`render_form`] produces the fill-in page (preview or public) with the
//! form's styling, current values and inline errors; [`render_submitted`]
//! produces the confirmation screen.

use std::fmt::Write as _;

use crate::form::Form;
use crate::response::ResponseMap;
use crate::styling::Styling;
use crate::validate::FieldErrors;

use super::{RenderMode, Widget, SELECT_PLACEHOLDER};

/// Message shown on the confirmation screen.
pub const THANK_YOU_MESSAGE: &str = "Your response has been submitted successfully.";

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// What the page shows besides the fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageState<'a> {
    /// Answers entered so far.
    pub responses: Option<&'a ResponseMap>,
    /// Per-field validation messages.
    pub errors: Option<&'a FieldErrors>,
    /// One-shot message after a failed save.
    pub submit_error: Option<&'a str>,
}

fn page_start(out: &mut String, title: &str, styling: &Styling) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>\n{}</style>\n</head>\n\
         <body style=\"font-family: {}; background-color: {}; color: {};\">\n",
        escape(title),
        stylesheet(styling),
        escape(&styling.font_family),
        escape(&styling.background_color),
        escape(&styling.text_color),
    );
}

fn page_end(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

fn stylesheet(styling: &Styling) -> String {
    format!(
        ":root {{ --primary-color: {primary}; --border-radius: {radius}; --field-spacing: {spacing}; }}\n\
         main {{ max-width: 42rem; margin: 0 auto; padding: 1.5rem; }}\n\
         input[type=text], input[type=email], input[type=number], textarea, select \
         {{ width: 100%; padding: 0.75rem 1rem; border: 2px solid #D1D5DB; border-radius: var(--border-radius); font-family: inherit; }}\n\
         .field.invalid input, .field.invalid textarea, .field.invalid select {{ border-color: #FCA5A5; }}\n\
         input[type=radio], input[type=checkbox] {{ accent-color: var(--primary-color); }}\n\
         .required {{ color: #EF4444; margin-left: 0.25rem; }}\n\
         .error {{ color: #DC2626; font-size: 0.875rem; }}\n\
         .submit-error {{ background: #FEF2F2; border: 1px solid #FECACA; color: #B91C1C; padding: 1rem; }}\n\
         button {{ background-color: var(--primary-color); border-radius: var(--border-radius); color: #FFFFFF; border: 0; padding: 0.75rem 1.5rem; font-weight: 600; }}\n",
        primary = escape(&styling.primary_color),
        radius = escape(&styling.border_radius),
        spacing = escape(&styling.spacing),
    )
}

fn render_widget(out: &mut String, input_id: &str, required: bool, widget: &Widget<'_>) {
    let required_attr = if required { " required" } else { "" };
    match widget {
        Widget::Input { kind, placeholder, value } => {
            let _ = writeln!(
                out,
                "<input type=\"{}\" id=\"{id}\" name=\"{id}\" value=\"{}\" placeholder=\"{}\"{required_attr}>",
                kind.as_html_type(),
                escape(value),
                escape(placeholder.unwrap_or_default()),
                id = escape(input_id),
            );
        }
        Widget::TextArea { rows, placeholder, value } => {
            let _ = writeln!(
                out,
                "<textarea id=\"{id}\" name=\"{id}\" rows=\"{rows}\" placeholder=\"{}\"{required_attr}>{}</textarea>",
                escape(placeholder.unwrap_or_default()),
                escape(value),
                id = escape(input_id),
            );
        }
        Widget::Select { options, selected } => {
            let _ = writeln!(
                out,
                "<select id=\"{id}\" name=\"{id}\"{required_attr}>",
                id = escape(input_id)
            );
            let _ = writeln!(out, "<option value=\"\">{SELECT_PLACEHOLDER}</option>");
            for option in *options {
                let mark = if *selected == Some(option.as_str()) { " selected" } else { "" };
                let _ = writeln!(
                    out,
                    "<option value=\"{value}\"{mark}>{value}</option>",
                    value = escape(option)
                );
            }
            out.push_str("</select>\n");
        }
        Widget::Radio { group, options, selected } => {
            out.push_str("<div class=\"choices\">\n");
            for option in *options {
                let mark = if *selected == Some(option.as_str()) { " checked" } else { "" };
                let _ = writeln!(
                    out,
                    "<label><input type=\"radio\" name=\"{}\" value=\"{value}\"{mark}{required_attr}> <span>{value}</span></label>",
                    escape(group),
                    value = escape(option)
                );
            }
            out.push_str("</div>\n");
        }
        Widget::Checkbox { options, selected } => {
            out.push_str("<div class=\"choices\">\n");
            for option in *options {
                let mark = if selected.contains(option) { " checked" } else { "" };
                let _ = writeln!(
                    out,
                    "<label><input type=\"checkbox\" name=\"{}\" value=\"{value}\"{mark}> <span>{value}</span></label>",
                    escape(input_id),
                    value = escape(option)
                );
            }
            out.push_str("</div>\n");
        }
    }
}

/// Render the fill-in page for a form.
#[must_use]
pub fn render_form(form: &Form, mode: RenderMode, state: PageState<'_>) -> String {
    let mut out = String::new();
    page_start(&mut out, &form.title, &form.styling);

    out.push_str("<main>\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape(&form.title));
    if let Some(description) = form.description_text() {
        let _ = writeln!(out, "<p class=\"description\">{}</p>", escape(description));
    }
    if let Some(message) = state.submit_error {
        let _ = writeln!(out, "<div class=\"submit-error\">{}</div>", escape(message));
    }

    out.push_str("<form method=\"post\">\n");
    for field in &form.fields {
        let value = state.responses.and_then(|r| r.get(&field.id));
        let error = state
            .errors
            .and_then(|e| e.get(&field.id))
            .filter(|msg| !msg.is_empty());
        let class = if error.is_some() { "field invalid" } else { "field" };

        let _ = writeln!(
            out,
            "<div class=\"{class}\" style=\"margin-bottom: {};\">",
            escape(&form.styling.spacing)
        );
        let required_mark = if field.required {
            "<span class=\"required\">*</span>"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<label for=\"{}\">{}{required_mark}</label>",
            escape(&field.id),
            escape(&field.label)
        );
        render_widget(&mut out, &field.id, field.required, &Widget::for_field(field, value));
        if let Some(message) = error {
            let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(message));
        }
        out.push_str("</div>\n");
    }

    if !form.fields.is_empty() {
        let _ = writeln!(out, "<button type=\"submit\">{}</button>", mode.submit_label());
    }
    out.push_str("</form>\n</main>\n");
    page_end(&mut out);
    out
}

/// Render the confirmation screen shown after a successful submission.
#[must_use]
pub fn render_submitted(form: &Form) -> String {
    let mut out = String::new();
    page_start(&mut out, &form.title, &form.styling);
    let _ = writeln!(
        out,
        "<main class=\"submitted\">\n<h2>Thank You!</h2>\n<p>{THANK_YOU_MESSAGE}</p>\n\
         <a href=\"\"><button type=\"button\">Submit Another Response</button></a>\n</main>"
    );
    page_end(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{create_default_field, FieldType};
    use crate::response::ResponseValue;

    fn sample_form() -> Form {
        let mut form = Form::new();
        form.title = "Contact <us>".to_string();
        form.description = Some("We reply fast".to_string());

        let mut name = create_default_field(FieldType::Text);
        name.id = "name".to_string();
        name.label = "Name".to_string();
        name.required = true;

        let mut topic = create_default_field(FieldType::Select);
        topic.id = "topic".to_string();

        let mut extras = create_default_field(FieldType::Checkbox);
        extras.id = "extras".to_string();
        extras.options = Some(vec!["A".to_string(), "B".to_string()]);

        form.fields = vec![name, topic, extras];
        form
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_public_page() {
        let html = render_form(&sample_form(), RenderMode::Public, PageState::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Contact &lt;us&gt;</h2>"));
        assert!(html.contains("We reply fast"));
        assert!(html.contains("<span class=\"required\">*</span>"));
        assert!(html.contains(SELECT_PLACEHOLDER));
        assert!(html.contains("Submit Form"));
        assert!(!html.contains("Submit (Preview)"));
        assert!(html.contains("font-family: Inter, sans-serif"));
    }

    #[test]
    fn test_preview_button() {
        let html = render_form(&sample_form(), RenderMode::Preview, PageState::default());
        assert!(html.contains("Submit (Preview)"));
    }

    #[test]
    fn test_values_and_errors_are_shown() {
        let form = sample_form();
        let mut responses = ResponseMap::new();
        responses.insert("topic".to_string(), ResponseValue::from("Option 2"));
        responses.insert(
            "extras".to_string(),
            ResponseValue::Choices(vec!["B".to_string()]),
        );
        let mut errors = FieldErrors::new();
        errors.insert("name".to_string(), "Name is required".to_string());

        let html = render_form(
            &form,
            RenderMode::Public,
            PageState {
                responses: Some(&responses),
                errors: Some(&errors),
                submit_error: Some("Failed to submit form. Please try again."),
            },
        );
        assert!(html.contains("<option value=\"Option 2\" selected>"));
        assert!(html.contains("value=\"B\" checked"));
        assert!(!html.contains("value=\"A\" checked"));
        assert!(html.contains("<p class=\"error\">Name is required</p>"));
        assert!(html.contains("field invalid"));
        assert!(html.contains("submit-error"));
    }

    #[test]
    fn test_empty_form_has_no_button() {
        let mut form = Form::new();
        form.fields.clear();
        let html = render_form(&form, RenderMode::Public, PageState::default());
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_submitted_page() {
        let html = render_submitted(&sample_form());
        assert!(html.contains("Thank You!"));
        assert!(html.contains(THANK_YOU_MESSAGE));
        assert!(html.contains("Submit Another Response"));
    }
}
