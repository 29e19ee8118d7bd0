//! The form library: every authored form, in creation order.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::form::Form;
use crate::id;

use super::Storage;

/// Storage key holding the form library.
pub const FORMS_KEY: &str = "formcraft_forms";

/// Persisted collection of authored forms.
#[derive(Debug, Clone, Copy)]
pub struct FormLibrary<'a> {
    storage: &'a Storage,
}

impl<'a> FormLibrary<'a> {
    /// Wrap an open storage.
    #[must_use]
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Every form, in the order they were first saved. An unreadable
    /// library lists as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn list(&self) -> Result<Vec<Form>> {
        let forms: Vec<Form> = self.storage.load_collection_or_empty(FORMS_KEY)?;
        debug!(count = forms.len(), "Loaded forms");
        Ok(forms)
    }

    /// Look up one form by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormNotFound`] if no form has this id.
    pub fn get(&self, id: &str) -> Result<Form> {
        self.list()?
            .into_iter()
            .find(|form| form.id == id)
            .ok_or_else(|| Error::form_not_found(id))
    }

    /// Resolve a form by id, or failing that by exact title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormNotFound`] if nothing matches.
    pub fn find(&self, key: &str) -> Result<Form> {
        let forms = self.list()?;
        forms
            .iter()
            .position(|form| form.id == key)
            .or_else(|| forms.iter().position(|form| form.title == key))
            .map(|index| forms[index].clone())
            .ok_or_else(|| Error::form_not_found(key))
    }

    /// Store a form and return it as stored.
    ///
    /// A form without an id gets a fresh `form_<millis>` id. A form whose id
    /// is already in the library replaces that entry in place; otherwise it
    /// is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TitleRequired`] for a blank title,
    /// [`Error::CorruptCollection`] if the stored library does not parse
    /// (nothing is written), or an error if the read or the write fails.
    pub fn save(&self, mut form: Form) -> Result<Form> {
        if form.title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }

        let mut forms: Vec<Form> = self.storage.load_collection(FORMS_KEY)?;
        if !form.is_saved() {
            form.id = unused_form_id(&forms);
        }

        match forms.iter().position(|existing| existing.id == form.id) {
            Some(index) => forms[index] = form.clone(),
            None => forms.push(form.clone()),
        }
        self.storage.store_collection(FORMS_KEY, &forms)?;
        info!(form_id = %form.id, title = %form.title, "Form saved");
        Ok(form)
    }

    /// Copy a form under a new id with ` (Copy)` appended to its title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormNotFound`] if no form has this id.
    pub fn duplicate(&self, id: &str) -> Result<Form> {
        let mut forms: Vec<Form> = self.storage.load_collection(FORMS_KEY)?;
        let source = forms
            .iter()
            .find(|form| form.id == id)
            .ok_or_else(|| Error::form_not_found(id))?;

        let now = Utc::now();
        let copy = Form {
            id: unused_form_id(&forms),
            title: format!("{} (Copy)", source.title),
            created_at: now,
            updated_at: now,
            ..source.clone()
        };
        forms.push(copy.clone());
        self.storage.store_collection(FORMS_KEY, &forms)?;
        info!(source = %id, form_id = %copy.id, "Form duplicated");
        Ok(copy)
    }

    /// Remove a form. Its responses are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormNotFound`] if no form has this id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut forms: Vec<Form> = self.storage.load_collection(FORMS_KEY)?;
        let before = forms.len();
        forms.retain(|form| form.id != id);
        if forms.len() == before {
            return Err(Error::form_not_found(id));
        }
        self.storage.store_collection(FORMS_KEY, &forms)?;
        info!(form_id = %id, "Form deleted");
        Ok(())
    }
}

/// A `form_<millis>` id not yet used in `forms`. Saves within the same
/// millisecond get a numeric suffix.
fn unused_form_id(forms: &[Form]) -> String {
    let base = id::generate_form_id();
    let taken = |candidate: &str| forms.iter().any(|form| form.id == candidate);
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
