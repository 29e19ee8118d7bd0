//! CSV export of a form's responses.
//!
//! One header row (`Submission Date`, then each field label in form order)
//! and one row per response. Every data cell is quoted; list answers are
//! joined with `, ` and a missing answer is an empty quoted cell. Rows are
//! separated by `\n` with no trailing newline.

use chrono::SecondsFormat;

use crate::form::Form;
use crate::response::FormResponse;

/// First column of every export.
pub const DATE_HEADER: &str = "Submission Date";

/// Download name for a form's export: the title with every character other
/// than an ASCII letter or digit replaced by `_`, lowercased, followed by
/// `_responses.csv`.
#[must_use]
pub fn csv_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_responses.csv")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Header cells are written bare unless they would break the row.
fn header_cell(label: &str) -> String {
    if label.contains([',', '"', '\n', '\r']) {
        quote(label)
    } else {
        label.to_string()
    }
}

/// Serialize `responses` against `form`'s current fields.
///
/// Answers to fields that no longer exist are dropped; fields added after a
/// response was submitted export as empty cells.
#[must_use]
pub fn to_csv(form: &Form, responses: &[FormResponse]) -> String {
    let header = std::iter::once(DATE_HEADER.to_string())
        .chain(form.fields.iter().map(|field| header_cell(&field.label)))
        .collect::<Vec<_>>()
        .join(",");

    let rows = responses.iter().map(|response| {
        std::iter::once(response.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true))
            .chain(form.fields.iter().map(|field| {
                let value = response
                    .value(&field.id)
                    .map(crate::response::ResponseValue::display_text)
                    .unwrap_or_default();
                quote(&value)
            }))
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}
