//! `formcraft` - CLI for the formcraft form builder
//!
//! Forms and responses live in a local `SQLite` database. Each command loads
//! what it needs, applies one edit through the builder or the submission
//! flow, and writes the result back.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::warn;

use formcraft::builder::FormMeta;
use formcraft::cli::{
    Cli, Command, ConfigCommand, ExportCommand, FieldAddArgs, FieldCommand, FieldUpdateArgs,
    FormCommand, OptionCommand, RenderCommand, ResponsesCommand, StyleCommand, SubmitCommand,
};
use formcraft::field::FieldType;
use formcraft::render::html::{render_form, render_submitted, PageState, THANK_YOU_MESSAGE};
use formcraft::render::RenderMode;
use formcraft::styling::{
    find_preset, Styling, COLOR_PRESETS, FONT_OPTIONS, RADIUS_OPTIONS, SPACING_OPTIONS,
};
use formcraft::submission::{PREVIEW_SUCCESS_MESSAGE, SUBMIT_FAILED_MESSAGE};
use formcraft::{
    export, init_logging, viewer, Builder, Config, Error, Form, FormLibrary, ResponseStore,
    Storage, SubmissionSession, SubmitOutcome,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    if let Command::Config(cmd) = cli.command {
        return handle_config(&config, cmd);
    }

    let storage = Storage::open(config.database_path())?;
    match cli.command {
        Command::Form(cmd) => handle_form(&storage, cmd),
        Command::Field(cmd) => handle_field(&storage, cmd),
        Command::Style(cmd) => handle_style(&storage, cmd),
        Command::Render(cmd) => handle_render(&config, &storage, &cmd),
        Command::Submit(cmd) => handle_submit(&storage, cmd).await,
        Command::Responses(cmd) => handle_responses(&storage, cmd),
        Command::Export(cmd) => handle_export(&config, &storage, &cmd),
        Command::Config(_) => Ok(()),
    }
}

/// Load a form, apply `edit` through a builder, and store the result.
fn edit_form<T>(
    storage: &Storage,
    key: &str,
    edit: impl FnOnce(&mut Builder) -> formcraft::Result<T>,
) -> anyhow::Result<(Form, T)> {
    let library = FormLibrary::new(storage);
    let mut builder = Builder::edit(library.find(key)?);
    let out = edit(&mut builder)?;
    let form = library.save(builder.save()?)?;
    Ok((form, out))
}

/// Resolve a field key (id or label) to its id.
fn field_id(form: &Form, key: &str) -> formcraft::Result<String> {
    form.find_field(key)
        .map(|field| field.id.clone())
        .ok_or_else(|| Error::field_not_found(key))
}

fn option_index(position: usize) -> formcraft::Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| Error::invalid_edit("option positions start at 1"))
}

/// Write `contents` to `path`, or to stdout when `path` is `-`.
fn write_output(path: &Path, contents: &str) -> anyhow::Result<bool> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        if !contents.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

fn handle_form(storage: &Storage, cmd: FormCommand) -> anyhow::Result<()> {
    let library = FormLibrary::new(storage);
    match cmd {
        FormCommand::List { json } => {
            let forms = library.list()?;
            let responses = ResponseStore::new(storage).all()?;
            let summaries = viewer::summarize(&forms, &responses);
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", viewer::render_dashboard(&summaries));
            }
        }
        FormCommand::New { title, description } => {
            let mut builder = Builder::new();
            builder.update_meta(FormMeta {
                title: Some(title),
                description,
                is_active: None,
            });
            let form = library.save(builder.save()?)?;
            println!("Created form {} ({})", form.title, form.id);
        }
        FormCommand::Show { form, json } => {
            let form = library.find(&form)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&form)?);
            } else {
                print_form(&form);
            }
        }
        FormCommand::Set {
            form,
            title,
            description,
            active,
            inactive,
        } => {
            let is_active = match (active, inactive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let (form, ()) = edit_form(storage, &form, |builder| {
                builder.update_meta(FormMeta {
                    title,
                    description,
                    is_active,
                });
                Ok(())
            })?;
            println!("Updated form {} ({})", form.title, form.id);
        }
        FormCommand::Duplicate { form } => {
            let source = library.find(&form)?;
            let copy = library.duplicate(&source.id)?;
            println!("Created form {} ({})", copy.title, copy.id);
        }
        FormCommand::Delete { form } => {
            let form = library.find(&form)?;
            library.delete(&form.id)?;
            println!("Deleted form {} ({})", form.title, form.id);
        }
    }
    Ok(())
}

fn print_form(form: &Form) {
    let status = if form.is_active { "active" } else { "inactive" };
    println!("{} [{status}]", form.title);
    println!("Id:       {}", form.id);
    if let Some(description) = form.description_text() {
        println!("About:    {description}");
    }
    println!("Created:  {}", viewer::format_timestamp(&form.created_at));
    println!("Updated:  {}", viewer::format_timestamp(&form.updated_at));
    println!();

    if form.fields.is_empty() {
        println!("No fields yet. Add one with `formcraft field add`.");
        return;
    }
    println!("Fields");
    println!("------");
    for (index, field) in form.fields.iter().enumerate() {
        let required = if field.required { ", required" } else { "" };
        println!(
            "{}. {} ({}{required})  {}",
            index + 1,
            field.label,
            field.field_type,
            field.id
        );
        if let Some(placeholder) = field.placeholder.as_deref().filter(|p| !p.is_empty()) {
            println!("     placeholder: {placeholder}");
        }
        for (n, option) in field.options().iter().enumerate() {
            println!("     {}) {option}", n + 1);
        }
        if let Some(validation) = &field.validation {
            if let Some(min) = validation.min_length {
                println!("     min length: {min}");
            }
            if let Some(max) = validation.max_length {
                println!("     max length: {max}");
            }
            if let Some(pattern) = &validation.pattern {
                println!("     pattern: {pattern}");
            }
        }
    }
}

fn handle_field(storage: &Storage, cmd: FieldCommand) -> anyhow::Result<()> {
    match cmd {
        FieldCommand::Add(args) => {
            let key = args.form.clone();
            let (form, id) = edit_form(storage, &key, |builder| add_field(builder, args))?;
            let label = form.field(&id).map_or("", |field| field.label.as_str());
            println!("Added field {label} ({id}) to {}", form.title);
        }
        FieldCommand::Update(args) => {
            let key = args.form.clone();
            let (form, id) = edit_form(storage, &key, |builder| update_field(builder, args))?;
            println!("Updated field {id} in {}", form.title);
        }
        FieldCommand::Remove { form, field } => {
            let (form, id) = edit_form(storage, &form, |builder| {
                let id = field_id(builder.form(), &field)?;
                builder.delete_field(&id);
                Ok(id)
            })?;
            println!("Removed field {id} from {}", form.title);
        }
        FieldCommand::Option(cmd) => handle_option(storage, cmd)?,
    }
    Ok(())
}

fn add_field(builder: &mut Builder, args: FieldAddArgs) -> formcraft::Result<String> {
    let field_type = FieldType::from(args.field_type);
    let id = builder.add_field(field_type);

    let mut field = builder
        .selected_field()
        .cloned()
        .ok_or_else(|| Error::internal("new field is not selected"))?;
    if let Some(label) = args.label {
        field.label = label;
    }
    if args.placeholder.is_some() {
        field.placeholder = args.placeholder;
    }
    field.required = args.required;
    if !args.options.is_empty() {
        field.options = Some(args.options);
    }
    builder.update_field(field)?;
    Ok(id)
}

fn update_field(builder: &mut Builder, args: FieldUpdateArgs) -> formcraft::Result<String> {
    let id = field_id(builder.form(), &args.field)?;
    let mut field = builder
        .form()
        .field(&id)
        .cloned()
        .ok_or_else(|| Error::field_not_found(&id))?;

    if let Some(label) = args.label {
        field.label = label;
    }
    if let Some(placeholder) = args.placeholder {
        field.placeholder = Some(placeholder).filter(|p| !p.is_empty());
    }
    if let Some(required) = args.required {
        field.required = required;
    }

    let mut validation = field.validation.take().unwrap_or_default();
    if let Some(min) = args.min_length {
        validation.min_length = Some(min).filter(|&n| n > 0);
    }
    if let Some(max) = args.max_length {
        validation.max_length = Some(max).filter(|&n| n > 0);
    }
    if let Some(pattern) = args.pattern {
        validation.pattern = Some(pattern).filter(|p| !p.is_empty());
    }
    field.validation = Some(validation).filter(|v| !v.is_empty());

    builder.update_field(field)?;
    Ok(id)
}

fn handle_option(storage: &Storage, cmd: OptionCommand) -> anyhow::Result<()> {
    let (form, field, message) = match cmd {
        OptionCommand::Add { form, field, text } => {
            let (form, id) = edit_form(storage, &form, |builder| {
                let id = field_id(builder.form(), &field)?;
                builder.add_option(&id)?;
                if let Some(text) = &text {
                    let last = builder
                        .form()
                        .field(&id)
                        .map_or(0, |f| f.options().len())
                        .saturating_sub(1);
                    builder.update_option(&id, last, text)?;
                }
                Ok(id)
            })?;
            (form, id, "Added option to")
        }
        OptionCommand::Set {
            form,
            field,
            position,
            text,
        } => {
            let (form, id) = edit_form(storage, &form, |builder| {
                let id = field_id(builder.form(), &field)?;
                builder.update_option(&id, option_index(position)?, &text)?;
                Ok(id)
            })?;
            (form, id, "Updated option of")
        }
        OptionCommand::Remove {
            form,
            field,
            position,
        } => {
            let (form, id) = edit_form(storage, &form, |builder| {
                let id = field_id(builder.form(), &field)?;
                builder.remove_option(&id, option_index(position)?)?;
                Ok(id)
            })?;
            (form, id, "Removed option from")
        }
    };

    if let Some(field) = form.field(&field) {
        println!("{message} {}: {}", field.label, field.options().join(", "));
    }
    Ok(())
}

fn handle_style(storage: &Storage, cmd: StyleCommand) -> anyhow::Result<()> {
    let key = match &cmd {
        StyleCommand::Show { form } => {
            print_styling(&FormLibrary::new(storage).find(form)?);
            return Ok(());
        }
        StyleCommand::Preset { form, .. }
        | StyleCommand::Color { form, .. }
        | StyleCommand::Font { form, .. }
        | StyleCommand::Radius { form, .. }
        | StyleCommand::Spacing { form, .. } => form.clone(),
    };

    let (form, ()) = edit_form(storage, &key, |builder| {
        let mut styling = builder.form().styling.clone();
        apply_style(&mut styling, cmd)?;
        builder.update_styling(styling);
        Ok(())
    })?;
    print_styling(&form);
    Ok(())
}

fn apply_style(styling: &mut Styling, cmd: StyleCommand) -> formcraft::Result<()> {
    match cmd {
        StyleCommand::Show { .. } => {}
        StyleCommand::Preset { name, .. } => {
            let preset = find_preset(&name)
                .ok_or_else(|| Error::invalid_edit(format!("unknown color preset: {name}")))?;
            styling.apply_preset(preset);
        }
        StyleCommand::Color {
            primary,
            background,
            text,
            ..
        } => {
            if let Some(primary) = primary {
                styling.primary_color = primary;
            }
            if let Some(background) = background {
                styling.background_color = background;
            }
            if let Some(text) = text {
                styling.text_color = text;
            }
        }
        StyleCommand::Font { font, .. } => styling.set_font(&font),
        StyleCommand::Radius { radius, .. } => styling.set_radius(&radius),
        StyleCommand::Spacing { spacing, .. } => styling.set_spacing(&spacing),
    }
    Ok(())
}

fn print_styling(form: &Form) {
    let styling = &form.styling;
    let preset = styling
        .active_preset()
        .map_or_else(|| "custom".to_string(), |p| p.name.to_string());
    println!("{} styling", form.title);
    println!("  Preset:      {preset}");
    println!("  Primary:     {}", styling.primary_color);
    println!("  Background:  {}", styling.background_color);
    println!("  Text:        {}", styling.text_color);
    println!("  Font:        {}", styling.font_family);
    println!("  Radius:      {}", styling.border_radius);
    println!("  Spacing:     {}", styling.spacing);
    println!();
    let names = |options: &[(&str, &str)]| {
        options
            .iter()
            .map(|(name, value)| format!("{name} ({value})"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!(
        "Presets: {}",
        COLOR_PRESETS.iter().map(|p| p.name).collect::<Vec<_>>().join(", ")
    );
    println!("Fonts:   {}", names(&FONT_OPTIONS));
    println!("Radius:  {}", names(&RADIUS_OPTIONS));
    println!("Spacing: {}", names(&SPACING_OPTIONS));
}

fn handle_render(config: &Config, storage: &Storage, cmd: &RenderCommand) -> anyhow::Result<()> {
    let form = FormLibrary::new(storage).find(&cmd.form)?;
    let mode = if cmd.preview {
        RenderMode::Preview
    } else {
        RenderMode::Public
    };
    let html = render_form(&form, mode, PageState::default());

    let path = cmd.output.clone().unwrap_or_else(|| {
        let suffix = if cmd.preview { "-preview" } else { "" };
        config
            .render
            .output_dir
            .join(format!("{}{suffix}.html", form.id))
    });
    if write_output(&path, &html)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

async fn handle_submit(storage: &Storage, cmd: SubmitCommand) -> anyhow::Result<()> {
    let form = FormLibrary::new(storage).find(&cmd.form)?;
    let mode = if cmd.preview {
        RenderMode::Preview
    } else {
        RenderMode::Public
    };
    if !form.is_active && mode == RenderMode::Public {
        warn!(form_id = %form.id, "Submitting to an inactive form");
    }

    let mut session = SubmissionSession::new(&form, mode);
    for (key, value) in &cmd.values {
        let field = form.find_field(key).ok_or_else(|| Error::field_not_found(key))?;
        if field.field_type.is_choice() && !field.options().contains(value) {
            bail!(
                "'{value}' is not an option of {}; choose from: {}",
                field.label,
                field.options().join(", ")
            );
        }
        if field.field_type.is_multi_valued() {
            session.toggle_option(&field.id, value, true)?;
        } else if field.field_type.is_choice() {
            session.select_option(&field.id, value)?;
        } else {
            session.set_value(&field.id, value.as_str().into())?;
        }
    }

    let sink = ResponseStore::new(storage);
    let outcome = session.submit(&sink).await;

    if let Some(path) = &cmd.output {
        let page = match &outcome {
            SubmitOutcome::Submitted(_) => render_submitted(&form),
            _ => render_form(
                &form,
                mode,
                PageState {
                    responses: Some(session.responses()),
                    errors: Some(session.errors()),
                    submit_error: session.submit_error(),
                },
            ),
        };
        write_output(path, &page)?;
    }

    match outcome {
        SubmitOutcome::Invalid { error_count } => {
            for field in &form.fields {
                if let Some(message) = session.errors().get(&field.id) {
                    eprintln!("  {}: {message}", field.label);
                }
            }
            bail!("{error_count} field(s) need attention");
        }
        SubmitOutcome::PreviewAccepted => println!("{PREVIEW_SUCCESS_MESSAGE}"),
        SubmitOutcome::Submitted(response) => {
            println!("Thank You! {THANK_YOU_MESSAGE}");
            println!("Response id: {}", response.id);
        }
        SubmitOutcome::AlreadySubmitted => bail!("response already submitted"),
        SubmitOutcome::Failed => {
            bail!(session.submit_error().unwrap_or(SUBMIT_FAILED_MESSAGE).to_string());
        }
    }
    Ok(())
}

fn handle_responses(storage: &Storage, cmd: ResponsesCommand) -> anyhow::Result<()> {
    let library = FormLibrary::new(storage);
    let store = ResponseStore::new(storage);
    match cmd {
        ResponsesCommand::List { form, json } => {
            let form = library.find(&form)?;
            let responses = store.by_form_id(&form.id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&responses)?);
            } else {
                print!("{}", viewer::render_response_list(&form, &responses));
            }
        }
        ResponsesCommand::Show { form, response } => {
            let form = library.find(&form)?;
            let responses = store.by_form_id(&form.id)?;
            let number = match response.parse::<usize>() {
                Ok(n) if (1..=responses.len()).contains(&n) => n,
                _ => viewer::response_number(&responses, &response)
                    .ok_or_else(|| Error::response_not_found(&response))?,
            };
            print!(
                "{}",
                viewer::render_response_detail(&form, &responses[number - 1], number)
            );
        }
        ResponsesCommand::Delete { response } => {
            store.delete(&response)?;
            println!("Deleted response {response}");
        }
        ResponsesCommand::Clear { form, all, yes } => {
            let form = match form {
                Some(key) if !all => Some(library.find(&key)?),
                _ => None,
            };
            let form_id = form.as_ref().map(|f| f.id.as_str());
            let pending = match form_id {
                Some(id) => store.by_form_id(id)?.len(),
                None => store.all()?.len(),
            };
            if !yes {
                println!("This will delete {pending} response(s). Use --yes to confirm.");
                return Ok(());
            }
            let removed = store.clear(form_id)?;
            println!("Deleted {removed} response(s)");
        }
    }
    Ok(())
}

fn handle_export(config: &Config, storage: &Storage, cmd: &ExportCommand) -> anyhow::Result<()> {
    let form = FormLibrary::new(storage).find(&cmd.form)?;
    let responses = ResponseStore::new(storage).by_form_id(&form.id)?;
    if responses.is_empty() {
        bail!("No responses to export");
    }

    let csv = export::to_csv(&form, &responses);
    let path = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.export.output_dir.join(export::csv_filename(&form.title)));
    if write_output(&path, &csv)? {
        println!("Exported {} response(s) to {}", responses.len(), path.display());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Export]");
                println!("  Output dir:     {}", config.export.output_dir.display());
                println!();
                println!("[Render]");
                println!("  Output dir:     {}", config.render.output_dir.display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path: PathBuf = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
