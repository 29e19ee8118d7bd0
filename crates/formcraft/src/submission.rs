//! The fill-in-and-submit flow for one form.
//!
//! A [`SubmissionSession`] moves through these states:
//!
//! ```text
//! editing ──submit──▶ validating ──all valid──▶ submitting ──▶ submitted
//!    ▲                    │                         │              │
//!    └──── errors ────────┘◀──── save failed ───────┘              │
//!    ▲                                                             │
//!    └──────────────────── submit another ─────────────────────────┘
//! ```
//!
//! Touching a field clears only that field's error. In preview mode the
//! flow validates exactly as in public mode but never reaches the sink.

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::form::Form;
use crate::render::{select_radio, toggle_checkbox, RenderMode};
use crate::response::{FormResponse, ResponseMap, ResponseValue};
use crate::validate::{validate_form, FieldErrors};

/// Message shown once when a valid submission could not be saved.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit form. Please try again.";

/// Message reported for an accepted preview submission.
pub const PREVIEW_SUCCESS_MESSAGE: &str = "Preview submission successful!";

/// Destination for submitted responses.
///
/// Persistence is the one step of the flow that may suspend.
#[async_trait(?Send)]
pub trait ResponseSink {
    /// Persist one response.
    ///
    /// # Errors
    ///
    /// Returns an error if the response could not be stored. The caller
    /// surfaces it once and does not retry.
    async fn save_response(&self, response: FormResponse) -> Result<()>;
}

/// Where a session is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Accepting edits, possibly with errors on display.
    #[default]
    Editing,
    /// Showing the confirmation screen.
    Submitted,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Some fields failed validation; nothing was saved.
    Invalid {
        /// Number of failing fields.
        error_count: usize,
    },
    /// The response was saved.
    Submitted(FormResponse),
    /// Preview mode: validation passed and nothing was saved.
    PreviewAccepted,
    /// Validation passed but saving failed.
    Failed,
    /// The session is on the confirmation screen; nothing was checked or
    /// saved. Call [`SubmissionSession::submit_another`] first.
    AlreadySubmitted,
}

/// One respondent's pass through a form.
#[derive(Debug, Clone)]
pub struct SubmissionSession<'a> {
    form: &'a Form,
    mode: RenderMode,
    state: SubmissionState,
    responses: ResponseMap,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl<'a> SubmissionSession<'a> {
    /// Start an empty session on a form.
    #[must_use]
    pub fn new(form: &'a Form, mode: RenderMode) -> Self {
        Self {
            form,
            mode,
            state: SubmissionState::Editing,
            responses: ResponseMap::new(),
            errors: FieldErrors::new(),
            submit_error: None,
        }
    }

    /// The form being filled in.
    #[must_use]
    pub fn form(&self) -> &'a Form {
        self.form
    }

    /// Preview or public.
    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Answers entered so far.
    #[must_use]
    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    /// Validation messages from the last submit, minus fields touched since.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Message from the last failed save, if any.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    fn ensure_editing(&self, field_id: &str) -> Result<()> {
        if self.state == SubmissionState::Submitted {
            return Err(Error::invalid_edit(
                "response already submitted; start another to keep editing",
            ));
        }
        if self.form.field(field_id).is_none() {
            return Err(Error::field_not_found(field_id));
        }
        Ok(())
    }

    /// Set a field's answer and clear that field's error.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not exist or the session has
    /// already been submitted.
    pub fn set_value(&mut self, field_id: &str, value: ResponseValue) -> Result<()> {
        self.ensure_editing(field_id)?;
        self.responses.insert(field_id.to_string(), value);
        self.errors.remove(field_id);
        Ok(())
    }

    /// Tick or untick one option of a checkbox group.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_value`].
    pub fn toggle_option(&mut self, field_id: &str, option: &str, checked: bool) -> Result<()> {
        let value = toggle_checkbox(self.responses.get(field_id), option, checked);
        self.set_value(field_id, value)
    }

    /// Choose one option of a radio group or dropdown.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_value`].
    pub fn select_option(&mut self, field_id: &str, option: &str) -> Result<()> {
        self.set_value(field_id, select_radio(option))
    }

    /// Validate every field and, if all pass, hand a new response to `sink`.
    ///
    /// On validation failure every message is kept and nothing is saved. On a
    /// failed save the error is logged, [`SUBMIT_FAILED_MESSAGE`] is set and
    /// the answers are kept for another attempt.
    pub async fn submit(&mut self, sink: &dyn ResponseSink) -> SubmitOutcome {
        if self.state == SubmissionState::Submitted {
            return SubmitOutcome::AlreadySubmitted;
        }
        self.submit_error = None;

        self.errors = validate_form(self.form, &self.responses);
        if !self.errors.is_empty() {
            info!(
                form_id = %self.form.id,
                errors = self.errors.len(),
                "Submission rejected by validation"
            );
            return SubmitOutcome::Invalid {
                error_count: self.errors.len(),
            };
        }

        if self.mode == RenderMode::Preview {
            info!(form_id = %self.form.id, "Preview submission accepted");
            return SubmitOutcome::PreviewAccepted;
        }

        let response = FormResponse::new(self.form.id.clone(), self.responses.clone());
        match sink.save_response(response.clone()).await {
            Ok(()) => {
                info!(form_id = %self.form.id, response_id = %response.id, "Response submitted");
                self.state = SubmissionState::Submitted;
                self.responses.clear();
                SubmitOutcome::Submitted(response)
            }
            Err(e) => {
                error!(form_id = %self.form.id, error = %e, "Error submitting form");
                self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Leave the confirmation screen and start over with a blank form.
    pub fn submit_another(&mut self) {
        self.state = SubmissionState::Editing;
        self.responses.clear();
        self.errors.clear();
        self.submit_error = None;
    }
}
