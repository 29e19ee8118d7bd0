//! Identifier generation for forms, fields and responses.

use chrono::Utc;
use uuid::Uuid;

/// Length of the random suffix appended to field and response ids.
const SUFFIX_LEN: usize = 9;

/// Generate an id of the form `<prefix>_<millis>_<suffix>`.
///
/// The suffix is nine lowercase alphanumerics taken from a v4 UUID, so ids
/// minted within the same millisecond still differ.
#[must_use]
pub fn generate(prefix: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string();
    format!("{prefix}_{}_{suffix}", Utc::now().timestamp_millis())
}

/// Generate a form id of the form `form_<millis>`.
#[must_use]
pub fn generate_form_id() -> String {
    format!("form_{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let id = generate("field");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "field");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_unique() {
        let a = generate("response");
        let b = generate("response");
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_form_id() {
        let id = generate_form_id();
        assert!(id.starts_with("form_"));
        assert!(id["form_".len()..].parse::<i64>().is_ok());
    }
}
