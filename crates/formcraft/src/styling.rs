//! Visual styling of a form and the preset choices offered by the style editor.

use serde::{Deserialize, Serialize};

/// Presentation properties applied when a form is rendered.
///
/// Values are CSS strings and are passed through to the page unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    /// Page background color.
    pub background_color: String,
    /// Accent color for buttons and choice inputs.
    pub primary_color: String,
    /// Body text color.
    pub text_color: String,
    /// CSS font stack.
    pub font_family: String,
    /// Corner radius for inputs and buttons.
    pub border_radius: String,
    /// Vertical space between fields.
    pub spacing: String,
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            background_color: "#F8FAFC".to_string(),
            primary_color: "#3B82F6".to_string(),
            text_color: "#1F2937".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            border_radius: "8px".to_string(),
            spacing: "24px".to_string(),
        }
    }
}

/// A named primary/background color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    /// Display name.
    pub name: &'static str,
    /// Primary (accent) color.
    pub primary: &'static str,
    /// Background color.
    pub background: &'static str,
}

/// Color presets offered by the style editor.
pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset { name: "Blue", primary: "#3B82F6", background: "#F8FAFC" },
    ColorPreset { name: "Green", primary: "#10B981", background: "#F0FDF4" },
    ColorPreset { name: "Purple", primary: "#8B5CF6", background: "#FAF5FF" },
    ColorPreset { name: "Orange", primary: "#F97316", background: "#FFF7ED" },
    ColorPreset { name: "Pink", primary: "#EC4899", background: "#FDF2F8" },
    ColorPreset { name: "Teal", primary: "#14B8A6", background: "#F0FDFA" },
];

/// Font choices as `(name, CSS value)`.
pub const FONT_OPTIONS: [(&str, &str); 4] = [
    ("Inter", "Inter, sans-serif"),
    ("Poppins", "Poppins, sans-serif"),
    ("Roboto", "Roboto, sans-serif"),
    ("Open Sans", "Open Sans, sans-serif"),
];

/// Corner radius choices as `(name, CSS value)`.
pub const RADIUS_OPTIONS: [(&str, &str); 4] = [
    ("Small", "4px"),
    ("Medium", "8px"),
    ("Large", "12px"),
    ("Extra Large", "16px"),
];

/// Field spacing choices as `(name, CSS value)`.
pub const SPACING_OPTIONS: [(&str, &str); 3] = [
    ("Compact", "16px"),
    ("Normal", "24px"),
    ("Spacious", "32px"),
];

/// Find a color preset by name, ignoring case.
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static ColorPreset> {
    COLOR_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Resolve a named option (or a raw CSS value) against a choice table.
fn resolve(options: &[(&str, &'static str)], input: &str) -> String {
    options
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(input))
        .map_or_else(|| input.to_string(), |(_, value)| (*value).to_string())
}

impl Styling {
    /// Apply a color preset. Only the primary and background colors change.
    pub fn apply_preset(&mut self, preset: &ColorPreset) {
        self.primary_color = preset.primary.to_string();
        self.background_color = preset.background.to_string();
    }

    /// The preset matching the current primary color, if any.
    #[must_use]
    pub fn active_preset(&self) -> Option<&'static ColorPreset> {
        COLOR_PRESETS
            .iter()
            .find(|preset| preset.primary == self.primary_color)
    }

    /// Set the font from a font option name or a raw CSS font stack.
    pub fn set_font(&mut self, font: &str) {
        self.font_family = resolve(&FONT_OPTIONS, font);
    }

    /// Set the corner radius from an option name or a raw CSS length.
    pub fn set_radius(&mut self, radius: &str) {
        self.border_radius = resolve(&RADIUS_OPTIONS, radius);
    }

    /// Set the field spacing from an option name or a raw CSS length.
    pub fn set_spacing(&mut self, spacing: &str) {
        self.spacing = resolve(&SPACING_OPTIONS, spacing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styling_json_keys() {
        let json = serde_json::to_value(Styling::default()).unwrap();
        assert_eq!(json["backgroundColor"], "#F8FAFC");
        assert_eq!(json["primaryColor"], "#3B82F6");
        assert_eq!(json["fontFamily"], "Inter, sans-serif");
        assert_eq!(json["borderRadius"], "8px");
    }

    #[test]
    fn test_apply_preset_changes_only_colors() {
        let mut styling = Styling::default();
        let preset = find_preset("green").unwrap();
        styling.apply_preset(preset);

        assert_eq!(styling.primary_color, "#10B981");
        assert_eq!(styling.background_color, "#F0FDF4");
        assert_eq!(styling.text_color, Styling::default().text_color);
        assert_eq!(styling.active_preset().map(|p| p.name), Some("Green"));
    }

    #[test]
    fn test_custom_primary_has_no_active_preset() {
        let mut styling = Styling::default();
        styling.primary_color = "#123456".to_string();
        assert!(styling.active_preset().is_none());
    }

    #[test]
    fn test_named_options_resolve() {
        let mut styling = Styling::default();
        styling.set_font("open sans");
        styling.set_radius("Large");
        styling.set_spacing("compact");
        assert_eq!(styling.font_family, "Open Sans, sans-serif");
        assert_eq!(styling.border_radius, "12px");
        assert_eq!(styling.spacing, "16px");
    }

    #[test]
    fn test_raw_values_pass_through() {
        let mut styling = Styling::default();
        styling.set_radius("3px");
        styling.set_font("Georgia, serif");
        assert_eq!(styling.border_radius, "3px");
        assert_eq!(styling.font_family, "Georgia, serif");
    }

    #[test]
    fn test_unknown_preset() {
        assert!(find_preset("Magenta").is_none());
    }
}
