//! The form builder: single owner of the form being edited.
//!
//! A [`Builder`] holds one working [`Form`] plus the editing context (which
//! field is selected, whether preview mode is on). Every mutation goes
//! through the builder and refreshes `updated_at`. Nothing reaches the form
//! library until [`Builder::save`] hands out a finished copy.

use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::{create_default_field, Field, FieldType};
use crate::form::Form;
use crate::styling::Styling;

/// Text given to options added through the field editor.
pub const NEW_OPTION_TEXT: &str = "New Option";

/// Editing state that belongs to the builder session, not to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderContext {
    /// Field currently open in the field editor.
    pub selected_field_id: Option<String>,
    /// Whether the preview is shown in place of the editors.
    pub preview_mode: bool,
}

/// Partial update of a form's metadata. `None` leaves a value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMeta {
    /// New title.
    pub title: Option<String>,
    /// New description. An empty string clears it.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Owner of the working form during an editing session.
#[derive(Debug, Clone)]
pub struct Builder {
    form: Form,
    context: BuilderContext,
}

impl Builder {
    /// Start a builder on a brand-new form.
    #[must_use]
    pub fn new() -> Self {
        Self::edit(Form::new())
    }

    /// Start a builder on an existing form.
    #[must_use]
    pub fn edit(form: Form) -> Self {
        Self {
            form,
            context: BuilderContext::default(),
        }
    }

    /// The working form.
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// The editing context.
    #[must_use]
    pub fn context(&self) -> &BuilderContext {
        &self.context
    }

    /// The field currently selected in the editor, if it still exists.
    #[must_use]
    pub fn selected_field(&self) -> Option<&Field> {
        self.context
            .selected_field_id
            .as_deref()
            .and_then(|id| self.form.field(id))
    }

    fn touch(&mut self) {
        self.form.updated_at = Utc::now();
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut Field> {
        self.form
            .fields
            .iter_mut()
            .find(|field| field.id == id)
            .ok_or_else(|| Error::field_not_found(id))
    }

    /// Append a default field of the given type and select it.
    ///
    /// Returns the new field's id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        let field = create_default_field(field_type);
        let id = field.id.clone();
        debug!(field_id = %id, %field_type, "Adding field");
        self.form.fields.push(field);
        self.context.selected_field_id = Some(id.clone());
        self.touch();
        id
    }

    /// Replace the field with the same id, keeping its position.
    ///
    /// Returns `false` if no field has that id; the form is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdit`] if the new value breaks the options
    /// invariant for its type.
    pub fn update_field(&mut self, updated: Field) -> Result<bool> {
        updated.check_shape()?;
        let Some(slot) = self.form.fields.iter_mut().find(|f| f.id == updated.id) else {
            return Ok(false);
        };
        debug!(field_id = %updated.id, "Updating field");
        self.context.selected_field_id = Some(updated.id.clone());
        *slot = updated;
        self.touch();
        Ok(true)
    }

    /// Remove a field and clear the selection.
    ///
    /// Returns `false` if no field has that id.
    pub fn delete_field(&mut self, id: &str) -> bool {
        let before = self.form.fields.len();
        self.form.fields.retain(|field| field.id != id);
        if self.form.fields.len() == before {
            return false;
        }
        debug!(field_id = %id, "Deleted field");
        self.context.selected_field_id = None;
        self.touch();
        true
    }

    /// Apply a metadata patch.
    pub fn update_meta(&mut self, meta: FormMeta) {
        if let Some(title) = meta.title {
            self.form.title = title;
        }
        if let Some(description) = meta.description {
            self.form.description = Some(description);
        }
        if let Some(is_active) = meta.is_active {
            self.form.is_active = is_active;
        }
        self.touch();
    }

    /// Replace the styling record.
    pub fn update_styling(&mut self, styling: Styling) {
        self.form.styling = styling;
        self.touch();
    }

    /// Append a `New Option` entry to a choice field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not exist or is not choice-based.
    pub fn add_option(&mut self, field_id: &str) -> Result<()> {
        let mut field = self.choice_field(field_id)?;
        field
            .options
            .get_or_insert_with(Vec::new)
            .push(NEW_OPTION_TEXT.to_string());
        self.update_field(field).map(|_| ())
    }

    /// Rewrite the option at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not exist, is not choice-based, or
    /// `index` is out of range.
    pub fn update_option(&mut self, field_id: &str, index: usize, value: &str) -> Result<()> {
        let mut field = self.choice_field(field_id)?;
        let slot = field
            .options
            .as_mut()
            .and_then(|options| options.get_mut(index))
            .ok_or_else(|| Error::invalid_edit(format!("no option at index {index}")))?;
        *slot = value.to_string();
        self.update_field(field).map(|_| ())
    }

    /// Remove the option at `index`. The last remaining option cannot be
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not exist, is not choice-based,
    /// `index` is out of range, or it is the only option left.
    pub fn remove_option(&mut self, field_id: &str, index: usize) -> Result<()> {
        let mut field = self.choice_field(field_id)?;
        let options = field.options.get_or_insert_with(Vec::new);
        if options.len() <= 1 {
            return Err(Error::invalid_edit(format!(
                "'{}' must keep at least one option",
                field.label
            )));
        }
        if index >= options.len() {
            return Err(Error::invalid_edit(format!("no option at index {index}")));
        }
        options.remove(index);
        self.update_field(field).map(|_| ())
    }

    fn choice_field(&mut self, field_id: &str) -> Result<Field> {
        let field = self.field_mut(field_id)?;
        if !field.field_type.is_choice() {
            return Err(Error::invalid_edit(format!(
                "{} field '{}' has no options",
                field.field_type, field.label
            )));
        }
        Ok(field.clone())
    }

    /// Open a field in the editor. Returns `false` if it does not exist.
    pub fn select_field(&mut self, id: &str) -> bool {
        if self.form.field(id).is_none() {
            return false;
        }
        self.context.selected_field_id = Some(id.to_string());
        true
    }

    /// Close the field editor.
    pub fn clear_selection(&mut self) {
        self.context.selected_field_id = None;
    }

    /// Flip preview mode and return the new state.
    pub fn toggle_preview(&mut self) -> bool {
        self.context.preview_mode = !self.context.preview_mode;
        self.context.preview_mode
    }

    /// Finish editing and hand out the form for storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TitleRequired`] if the title is blank. The working
    /// form is kept so editing can continue.
    pub fn save(&self) -> Result<Form> {
        if self.form.title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }
        Ok(self.form.clone())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(builder: &Builder) -> Vec<String> {
        builder.form().fields.iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_add_field_appends_and_selects() {
        let mut builder = Builder::new();
        let first = builder.add_field(FieldType::Text);
        let second = builder.add_field(FieldType::Radio);

        assert_eq!(ids(&builder), vec![first, second.clone()]);
        assert_eq!(builder.context().selected_field_id, Some(second));
    }

    #[test]
    fn test_update_field_preserves_order() {
        let mut builder = Builder::new();
        let a = builder.add_field(FieldType::Text);
        let b = builder.add_field(FieldType::Email);
        let c = builder.add_field(FieldType::Number);

        let mut field = builder.form().field(&b).unwrap().clone();
        field.label = "Work email".to_string();
        field.required = true;
        assert!(builder.update_field(field).unwrap());

        assert_eq!(ids(&builder), vec![a, b.clone(), c]);
        let updated = builder.form().field(&b).unwrap();
        assert_eq!(updated.label, "Work email");
        assert!(updated.required);
        assert_eq!(builder.selected_field().map(|f| f.id.clone()), Some(b));
    }

    #[test]
    fn test_update_unknown_field_is_noop() {
        let mut builder = Builder::new();
        builder.add_field(FieldType::Text);
        let before = builder.form().fields.clone();

        let stray = create_default_field(FieldType::Text);
        assert!(!builder.update_field(stray).unwrap());
        assert_eq!(builder.form().fields, before);
    }

    #[test]
    fn test_update_field_rejects_broken_options() {
        let mut builder = Builder::new();
        let id = builder.add_field(FieldType::Select);
        let mut field = builder.form().field(&id).unwrap().clone();
        field.options = Some(Vec::new());

        assert!(builder.update_field(field).is_err());
        assert_eq!(builder.form().field(&id).unwrap().options().len(), 3);
    }

    #[test]
    fn test_delete_field_clears_selection() {
        let mut builder = Builder::new();
        let a = builder.add_field(FieldType::Text);
        let b = builder.add_field(FieldType::Text);

        assert!(builder.delete_field(&b));
        assert_eq!(ids(&builder), vec![a]);
        assert!(builder.context().selected_field_id.is_none());
        assert!(!builder.delete_field(&b));
    }

    #[test]
    fn test_mutations_refresh_updated_at() {
        let mut builder = Builder::new();
        let created = builder.form().updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        builder.update_meta(FormMeta {
            title: Some("Survey".to_string()),
            ..FormMeta::default()
        });
        assert!(builder.form().updated_at > created);
        assert_eq!(builder.form().title, "Survey");
    }

    #[test]
    fn test_update_styling() {
        let mut builder = Builder::new();
        let mut styling = Styling::default();
        styling.spacing = "32px".to_string();
        builder.update_styling(styling.clone());
        assert_eq!(builder.form().styling, styling);
    }

    #[test]
    fn test_option_editing() {
        let mut builder = Builder::new();
        let id = builder.add_field(FieldType::Checkbox);

        builder.add_option(&id).unwrap();
        builder.update_option(&id, 1, "Second").unwrap();
        assert_eq!(
            builder.form().field(&id).unwrap().options(),
            ["Checkbox option".to_string(), "Second".to_string()]
        );

        builder.remove_option(&id, 0).unwrap();
        assert_eq!(
            builder.form().field(&id).unwrap().options(),
            ["Second".to_string()]
        );

        assert!(builder.remove_option(&id, 0).is_err());
        assert!(builder.update_option(&id, 5, "x").is_err());
    }

    #[test]
    fn test_option_editing_rejects_non_choice_fields() {
        let mut builder = Builder::new();
        let id = builder.add_field(FieldType::Text);
        assert!(builder.add_option(&id).is_err());
        assert!(builder.add_option("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_requires_title() {
        let mut builder = Builder::new();
        builder.update_meta(FormMeta {
            title: Some("   ".to_string()),
            ..FormMeta::default()
        });
        assert!(matches!(builder.save(), Err(Error::TitleRequired)));

        builder.update_meta(FormMeta {
            title: Some("Feedback".to_string()),
            ..FormMeta::default()
        });
        assert_eq!(builder.save().unwrap().title, "Feedback");
    }

    #[test]
    fn test_selection_and_preview() {
        let mut builder = Builder::new();
        let id = builder.add_field(FieldType::Text);
        builder.clear_selection();
        assert!(builder.selected_field().is_none());

        assert!(builder.select_field(&id));
        assert!(!builder.select_field("missing"));
        assert!(builder.toggle_preview());
        assert!(!builder.toggle_preview());
    }
}
