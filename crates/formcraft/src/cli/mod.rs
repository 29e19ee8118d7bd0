//! Command-line interface for formcraft.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ExportCommand, FieldAddArgs, FieldCommand, FieldTypeArg, FieldUpdateArgs,
    FormCommand, OptionCommand, RenderCommand, ResponsesCommand, StyleCommand, SubmitCommand,
};

/// formcraft - Build forms, publish them, collect responses
///
/// Author forms from the command line, render them as standalone HTML
/// pages, record submissions and export them as CSV.
#[derive(Debug, Parser)]
#[command(name = "formcraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, list and manage forms
    #[command(subcommand)]
    Form(FormCommand),

    /// Add, edit and remove fields
    #[command(subcommand)]
    Field(FieldCommand),

    /// Change a form's look
    #[command(subcommand)]
    Style(StyleCommand),

    /// Write a form as a standalone HTML page
    Render(RenderCommand),

    /// Fill in and submit a form
    Submit(SubmitCommand),

    /// View and manage responses
    #[command(subcommand)]
    Responses(ResponsesCommand),

    /// Export a form's responses as CSV
    Export(ExportCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Logging verbosity from `-q` and `-v`.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Parse a `KEY=VALUE` argument. The value may itself contain `=`.
fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{arg}'"))?;
    if key.trim().is_empty() {
        return Err(format!("missing field name in '{arg}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "formcraft");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(parse(&["formcraft", "form", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["formcraft", "-q", "form", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["formcraft", "-v", "form", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["formcraft", "-vv", "form", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["formcraft", "-c", "/custom/config.toml", "form", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_form_new() {
        let cli = parse(&["formcraft", "form", "new", "Feedback", "-d", "Tell us"]);
        match cli.command {
            Command::Form(FormCommand::New { title, description }) => {
                assert_eq!(title, "Feedback");
                assert_eq!(description.as_deref(), Some("Tell us"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_form_set_flags_conflict() {
        assert!(Cli::try_parse_from(["formcraft", "form", "set", "f", "--active", "--inactive"]).is_err());
    }

    #[test]
    fn test_parse_field_add() {
        let cli = parse(&[
            "formcraft", "field", "add", "Feedback", "radio", "-l", "Size", "-r", "-o", "S", "-o", "M",
        ]);
        match cli.command {
            Command::Field(FieldCommand::Add(args)) => {
                assert_eq!(args.field_type, FieldTypeArg::Radio);
                assert_eq!(args.label.as_deref(), Some("Size"));
                assert!(args.required);
                assert_eq!(args.options, vec!["S", "M"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_field_update() {
        let cli = parse(&[
            "formcraft", "field", "update", "Feedback", "Name", "--required", "true", "--min-length", "3",
        ]);
        match cli.command {
            Command::Field(FieldCommand::Update(args)) => {
                assert_eq!(args.required, Some(true));
                assert_eq!(args.min_length, Some(3));
                assert_eq!(args.max_length, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_option_set() {
        let cli = parse(&["formcraft", "field", "option", "set", "F", "Size", "2", "Large"]);
        assert!(matches!(
            cli.command,
            Command::Field(FieldCommand::Option(OptionCommand::Set { position: 2, .. }))
        ));
    }

    #[test]
    fn test_parse_submit_values() {
        let cli = parse(&[
            "formcraft", "submit", "Feedback", "--value", "Name=Ada", "--value", "Note=a=b",
        ]);
        match cli.command {
            Command::Submit(cmd) => {
                assert_eq!(
                    cmd.values,
                    vec![
                        ("Name".to_string(), "Ada".to_string()),
                        ("Note".to_string(), "a=b".to_string()),
                    ]
                );
                assert!(!cmd.preview);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_submit_rejects_bad_value() {
        assert!(Cli::try_parse_from(["formcraft", "submit", "F", "--value", "novalue"]).is_err());
    }

    #[test]
    fn test_parse_render_preview() {
        let cli = parse(&["formcraft", "render", "F", "--preview", "-o", "-"]);
        match cli.command {
            Command::Render(cmd) => {
                assert!(cmd.preview);
                assert_eq!(cmd.output, Some(PathBuf::from("-")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_responses_clear() {
        assert!(Cli::try_parse_from(["formcraft", "responses", "clear"]).is_err());
        let cli = parse(&["formcraft", "responses", "clear", "--all", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Responses(ResponsesCommand::Clear { all: true, yes: true, .. })
        ));
    }

    #[test]
    fn test_parse_export_and_config() {
        assert!(matches!(parse(&["formcraft", "export", "F"]).command, Command::Export(_)));
        assert!(matches!(
            parse(&["formcraft", "config", "path"]).command,
            Command::Config(ConfigCommand::Path)
        ));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value(" Name =Ada").unwrap(),
            ("Name".to_string(), "Ada".to_string())
        );
        assert_eq!(
            parse_key_value("Name=").unwrap(),
            ("Name".to_string(), String::new())
        );
        assert!(parse_key_value("Name").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
