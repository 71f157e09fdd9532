//! Binding a validator to a form
//!
//! [`FormValidator`] owns the form, the resolved [`Settings`] and the error
//! display. It drives field events, submission and reset, and keeps the
//! message catalog in an [`ArcSwap`] so that message files can be merged in
//! from a background task while validation keeps reading the snapshot current
//! at call time.

mod builder;

pub use builder::FormValidatorBuilder;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use formguard_config::{ConfigError, ConfigResult, SourceLoader, json_type_name};
use tokio::task::JoinHandle;

use crate::display::{ErrorDisplay, ErrorNodes};
use crate::engine::{Evaluator, Verdict};
use crate::error::BindResult;
use crate::form::{Document, FieldId, Form};
use crate::foundation::ValidationErrors;
use crate::messages::MessageCatalog;
use crate::settings::Settings;

/// Called with the form on a valid submission.
pub type SubmitHandler = Box<dyn FnMut(&Form) + Send>;

/// Field interaction that may trigger validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    Input,
    Change,
    Blur,
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    /// Valid; the submit handler ran
    Handled,
    /// Valid; no handler, the host should submit natively
    Native,
    /// Invalid; the form stays for correction
    Blocked,
}

/// A validator bound to one form.
pub struct FormValidator<D: ErrorDisplay = ErrorNodes> {
    form: Form,
    settings: Settings,
    catalog: Arc<ArcSwap<MessageCatalog>>,
    tracked: Vec<FieldId>,
    display: D,
    submit_handler: Option<SubmitHandler>,
    loader: Arc<dyn SourceLoader>,
}

impl<D: ErrorDisplay + fmt::Debug> fmt::Debug for FormValidator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("settings", &self.settings)
            .field("tracked", &self.tracked)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl FormValidator<ErrorNodes> {
    /// Starts building a validator for `form`.
    #[must_use]
    pub fn builder(form: Form) -> FormValidatorBuilder {
        FormValidatorBuilder::new(form)
    }

    /// Starts building a validator for the single form in `document`
    /// matching `selector`.
    ///
    /// # Errors
    ///
    /// See [`Document::take_form`].
    pub fn builder_for(document: &mut Document, selector: &str) -> BindResult<FormValidatorBuilder> {
        FormValidatorBuilder::from_document(document, selector)
    }
}

impl<D: ErrorDisplay> FormValidator<D> {
    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Mutable access for user interaction (typing, checking, selecting).
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Fields under validation, in document order.
    #[must_use]
    pub fn tracked(&self) -> &[FieldId] {
        &self.tracked
    }

    /// The current catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> Arc<MessageCatalog> {
        self.catalog.load_full()
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    fn verdict(&self, id: FieldId) -> Verdict {
        let catalog = self.catalog.load();
        Evaluator::new(&self.settings, &catalog).evaluate(&self.form, id)
    }

    /// Validates one field and updates its error node and classes.
    ///
    /// Fields excluded by `ignore` are always valid. An id outside the form
    /// is invalid.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by a custom rule predicate.
    pub fn validate_field(&mut self, id: FieldId) -> bool {
        let Some(field) = self.form.field(id) else {
            formguard_log::warn!(field = id.index(), "validate_field called with unknown field");
            return false;
        };
        if !self.tracked.contains(&id) {
            formguard_log::trace!(field = field.name(), "field ignored");
            return true;
        }

        let verdict = self.verdict(id);
        formguard_log::trace!(
            field = field.name(),
            valid = verdict.is_ok(),
            code = verdict.as_ref().err().map(|e| e.code.as_ref()),
            "field validated"
        );
        self.apply(id, &verdict);
        verdict.is_ok()
    }

    fn apply(&mut self, id: FieldId, verdict: &Verdict) {
        let members = self.form.group(id);

        if let Some(class) = self.settings.error_field_class.as_deref() {
            for &member in &members {
                if let Some(field) = self.form.field_mut(member) {
                    if verdict.is_ok() {
                        field.remove_class(class);
                    } else {
                        field.add_class(class);
                    }
                }
            }
        }

        match verdict {
            Ok(()) => {
                for &member in &members {
                    if let Some(field) = self.form.field(member) {
                        self.display.clear(field);
                    }
                }
            }
            Err(error) => {
                if let Some(field) = self.form.field(id) {
                    self.display.show(field, &error.message);
                }
            }
        }
    }

    /// Validates every tracked field, even after one fails.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by a custom rule predicate.
    pub fn validate_form(&mut self) -> bool {
        let ids = self.tracked.clone();
        let mut failed = 0usize;
        for id in ids {
            if !self.validate_field(id) {
                failed += 1;
            }
        }
        formguard_log::debug!(
            form = ?self.form.id(),
            checked = self.tracked.len(),
            failed,
            "form validated"
        );
        failed == 0
    }

    /// Evaluates every tracked field without touching the display.
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationError`](crate::foundation::ValidationError)
    /// per failing field.
    pub fn check_form(&self) -> Result<(), ValidationErrors> {
        self.tracked
            .iter()
            .filter_map(|&id| self.verdict(id).err())
            .collect::<ValidationErrors>()
            .into_result(())
    }

    /// Reacts to a field event. Returns `None` when `autoValidate` is off.
    pub fn on_event(&mut self, id: FieldId, event: FieldEvent) -> Option<bool> {
        if !self.settings.auto_validate() {
            return None;
        }
        formguard_log::trace!(field = id.index(), ?event, "field event");
        Some(self.validate_field(id))
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Intercepts a submission: validates the whole form, toggles the
    /// valid-form class, then hands off to the submit handler if valid.
    pub fn submit(&mut self) -> SubmitOutcome {
        let valid = self.validate_form();

        if let Some(class) = self.settings.valid_form_class.as_deref() {
            if valid {
                self.form.add_class(class);
            } else {
                self.form.remove_class(class);
            }
        }

        if !valid {
            formguard_log::warn!(form = ?self.form.id(), "submission blocked by invalid fields");
            return SubmitOutcome::Blocked;
        }

        match self.submit_handler.as_mut() {
            Some(handler) => {
                handler(&self.form);
                SubmitOutcome::Handled
            }
            None => SubmitOutcome::Native,
        }
    }

    /// Clears the valid-form class and restores initial field values.
    pub fn reset_form(&mut self) {
        if let Some(class) = self.settings.valid_form_class.as_deref() {
            self.form.remove_class(class);
        }
        self.form.reset();
        formguard_log::debug!(form = ?self.form.id(), "form reset");
    }

    // ------------------------------------------------------------------------
    // Message loading
    // ------------------------------------------------------------------------

    /// Loads a message file in the background and merges it over the
    /// catalog when it arrives. Failures are logged and leave the catalog
    /// unchanged.
    ///
    /// Concurrent loads race; the last one to finish wins for overlapping keys.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn load_messages(&self, path: impl Into<String>) -> JoinHandle<()> {
        let path = path.into();
        let loader = Arc::clone(&self.loader);
        let catalog = Arc::clone(&self.catalog);
        tokio::spawn(async move {
            if let Err(e) = merge_message_source(loader.as_ref(), &catalog, &path).await {
                formguard_log::warn!(path = %path, error = %e, "failed to load messages");
            }
        })
    }

    /// Loads a message file and merges it over the catalog.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or [`ConfigError::TypeError`] if the
    /// document is not an object. The catalog is unchanged on error.
    pub async fn reload_messages(&self, path: &str) -> ConfigResult<()> {
        merge_message_source(self.loader.as_ref(), &self.catalog, path).await
    }
}

async fn merge_message_source(
    loader: &dyn SourceLoader,
    catalog: &ArcSwap<MessageCatalog>,
    path: &str,
) -> ConfigResult<()> {
    let document = loader.load(path).await?;
    if !document.is_object() {
        return Err(ConfigError::type_error(
            "messages",
            "object",
            json_type_name(&document),
        ));
    }

    catalog.rcu(|current| current.merged_with(&document));
    formguard_log::info!(path, entries = catalog.load().len(), "messages loaded");
    Ok(())
}
