//! CLI command definitions.
//!
//! Forms are addressed by id or exact title, fields by id or label.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::field::FieldType;

/// Form library commands.
#[derive(Debug, Subcommand)]
pub enum FormCommand {
    /// List all forms (the dashboard)
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Create and save a new form
    New {
        /// Form title
        title: String,

        /// Introduction shown under the title
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show a form's fields and settings
    Show {
        /// Form id or title
        form: String,

        /// Output the stored JSON document
        #[arg(short, long)]
        json: bool,
    },

    /// Change a form's title, description or active flag
    Set {
        /// Form id or title
        form: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,

        /// Accept responses
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Stop accepting responses
        #[arg(long)]
        inactive: bool,
    },

    /// Copy a form under a new id
    Duplicate {
        /// Form id or title
        form: String,
    },

    /// Delete a form (its responses are kept)
    Delete {
        /// Form id or title
        form: String,
    },
}

/// Field editing commands.
#[derive(Debug, Subcommand)]
pub enum FieldCommand {
    /// Append a field with default settings
    Add(FieldAddArgs),

    /// Change a field's properties
    Update(FieldUpdateArgs),

    /// Remove a field
    Remove {
        /// Form id or title
        form: String,

        /// Field id or label
        field: String,
    },

    /// Edit the options of a select, radio or checkbox field
    #[command(subcommand)]
    Option(OptionCommand),
}

/// Arguments for `field add`.
#[derive(Debug, Args)]
pub struct FieldAddArgs {
    /// Form id or title
    pub form: String,

    /// Kind of input
    #[arg(value_enum)]
    pub field_type: FieldTypeArg,

    /// Label (defaults to the type's standard label)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Hint text for text-like inputs
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Require a value
    #[arg(short, long)]
    pub required: bool,

    /// Replace the default options (choice fields only)
    #[arg(short, long = "option", value_name = "TEXT")]
    pub options: Vec<String>,
}

/// Arguments for `field update`.
#[derive(Debug, Args)]
pub struct FieldUpdateArgs {
    /// Form id or title
    pub form: String,

    /// Field id or label
    pub field: String,

    /// New label
    #[arg(short, long)]
    pub label: Option<String>,

    /// New hint text (empty string clears it)
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Whether a value is required
    #[arg(short, long)]
    pub required: Option<bool>,

    /// Minimum length (0 clears it)
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum length (0 clears it)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Pattern to store with the field (empty string clears it)
    #[arg(long)]
    pub pattern: Option<String>,
}

/// Option list commands.
#[derive(Debug, Subcommand)]
pub enum OptionCommand {
    /// Append a "New Option" entry, or the given text
    Add {
        /// Form id or title
        form: String,

        /// Field id or label
        field: String,

        /// Text of the new option
        text: Option<String>,
    },

    /// Rewrite the option at a 1-based position
    Set {
        /// Form id or title
        form: String,

        /// Field id or label
        field: String,

        /// 1-based position
        position: usize,

        /// New text
        text: String,
    },

    /// Remove the option at a 1-based position
    Remove {
        /// Form id or title
        form: String,

        /// Field id or label
        field: String,

        /// 1-based position
        position: usize,
    },
}

/// Styling commands.
#[derive(Debug, Subcommand)]
pub enum StyleCommand {
    /// Show a form's styling and the available choices
    Show {
        /// Form id or title
        form: String,
    },

    /// Apply a color preset (Blue, Green, Purple, Orange, Pink, Teal)
    Preset {
        /// Form id or title
        form: String,

        /// Preset name
        name: String,
    },

    /// Set individual colors
    Color {
        /// Form id or title
        form: String,

        /// Accent color for buttons and choice inputs
        #[arg(long)]
        primary: Option<String>,

        /// Page background color
        #[arg(long)]
        background: Option<String>,

        /// Body text color
        #[arg(long)]
        text: Option<String>,
    },

    /// Set the font (Inter, Poppins, Roboto, Open Sans, or a CSS font stack)
    Font {
        /// Form id or title
        form: String,

        /// Font name or CSS value
        font: String,
    },

    /// Set the corner radius (Small, Medium, Large, Extra Large, or a CSS length)
    Radius {
        /// Form id or title
        form: String,

        /// Option name or CSS value
        radius: String,
    },

    /// Set the field spacing (Compact, Normal, Spacious, or a CSS length)
    Spacing {
        /// Form id or title
        form: String,

        /// Option name or CSS value
        spacing: String,
    },
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Form id or title
    pub form: String,

    /// Render the builder preview instead of the public page
    #[arg(short, long)]
    pub preview: bool,

    /// Output file (defaults to `<render.output_dir>/<form id>.html`; `-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Form id or title
    pub form: String,

    /// An answer as `FIELD=VALUE` (field id or label). Repeat for checkbox
    /// groups to tick several options.
    #[arg(long = "value", value_name = "FIELD=VALUE", value_parser = super::parse_key_value)]
    pub values: Vec<(String, String)>,

    /// Validate only, as the builder preview does; nothing is stored
    #[arg(short, long)]
    pub preview: bool,

    /// Also write the resulting page: the confirmation screen, or the form
    /// with inline errors (`-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Response viewing commands.
#[derive(Debug, Subcommand)]
pub enum ResponsesCommand {
    /// List a form's responses
    List {
        /// Form id or title
        form: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one response field by field
    Show {
        /// Form id or title
        form: String,

        /// Response id, or its 1-based number in the list
        response: String,
    },

    /// Delete one response
    Delete {
        /// Response id
        response: String,
    },

    /// Delete a form's responses, or every response with `--all`
    Clear {
        /// Form id or title
        #[arg(required_unless_present = "all")]
        form: Option<String>,

        /// Delete responses for every form
        #[arg(long, conflicts_with = "form")]
        all: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Form id or title
    pub form: String,

    /// Output file (defaults to `<export.output_dir>/<title>_responses.csv`; `-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Field type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldTypeArg {
    /// Single-line text
    Text,
    /// Email address
    Email,
    /// Multi-line text
    Textarea,
    /// Dropdown
    Select,
    /// Checkbox group
    Checkbox,
    /// Radio buttons
    Radio,
    /// Number
    Number,
}

impl From<FieldTypeArg> for FieldType {
    fn from(arg: FieldTypeArg) -> Self {
        match arg {
            FieldTypeArg::Text => Self::Text,
            FieldTypeArg::Email => Self::Email,
            FieldTypeArg::Textarea => Self::Textarea,
            FieldTypeArg::Select => Self::Select,
            FieldTypeArg::Checkbox => Self::Checkbox,
            FieldTypeArg::Radio => Self::Radio,
            FieldTypeArg::Number => Self::Number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_arg_conversion() {
        assert_eq!(FieldType::from(FieldTypeArg::Text), FieldType::Text);
        assert_eq!(FieldType::from(FieldTypeArg::Textarea), FieldType::Textarea);
        assert_eq!(FieldType::from(FieldTypeArg::Checkbox), FieldType::Checkbox);
        assert_eq!(FieldType::from(FieldTypeArg::Number), FieldType::Number);
    }

    #[test]
    fn test_field_type_arg_covers_every_type() {
        let converted: Vec<FieldType> = FieldTypeArg::value_variants()
            .iter()
            .map(|arg| FieldType::from(*arg))
            .collect();
        assert_eq!(converted, FieldType::ALL.to_vec());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
