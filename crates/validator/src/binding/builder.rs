//! Builder for [`FormValidator`].

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use formguard_config::{FileLoader, SourceLoader, deep_merge};
use serde_json::{Value, json};

use super::{FormValidator, SubmitHandler};
use crate::display::{ErrorDisplay, ErrorNode, ErrorNodes, ErrorPlacement};
use crate::error::BindResult;
use crate::form::{Document, Field, Form, Selector};
use crate::rules::Rule;
use crate::settings::Settings;

/// Collects settings, callbacks and custom rules before binding to a form.
///
/// ```rust,ignore
/// let validator = FormValidator::builder(form)
///     .settings(json!({"errorClass": "invalid"}))
///     .rule("username", Rule::custom(|v, _| v != "admin").with_message("Taken."))
///     .submit_handler(|form| println!("submitting {:?}", form.id()))
///     .build()?;
/// ```
pub struct FormValidatorBuilder {
    form: Form,
    overrides: Value,
    rules: Vec<(String, Rule)>,
    error_placement: Option<ErrorPlacement>,
    submit_handler: Option<SubmitHandler>,
    loader: Option<Arc<dyn SourceLoader>>,
}

impl fmt::Debug for FormValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidatorBuilder")
            .field("form", &self.form.id())
            .field("overrides", &self.overrides)
            .field("rules", &self.rules)
            .field("error_placement", &self.error_placement.is_some())
            .field("submit_handler", &self.submit_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl FormValidatorBuilder {
    pub(super) fn new(form: Form) -> Self {
        Self {
            form,
            overrides: Value::Null,
            rules: Vec::new(),
            error_placement: None,
            submit_handler: None,
            loader: None,
        }
    }

    /// Takes the single form matching `selector` out of `document`.
    ///
    /// # Errors
    ///
    /// See [`Document::take_form`].
    pub fn from_document(document: &mut Document, selector: &str) -> BindResult<Self> {
        document.take_form(selector).map(Self::new)
    }

    /// Merges a settings object over the defaults. Repeated calls layer.
    #[must_use = "builder methods must be chained or built"]
    pub fn settings(mut self, overrides: Value) -> Self {
        if self.overrides.is_null() {
            self.overrides = overrides;
        } else {
            deep_merge(&mut self.overrides, overrides);
        }
        self
    }

    /// Merges message templates over the defaults.
    #[must_use = "builder methods must be chained or built"]
    pub fn messages(self, messages: Value) -> Self {
        self.settings(json!({ "messages": messages }))
    }

    /// Declares a rule for every field named `name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    /// Positions error nodes instead of the default after-field placement.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_placement<F>(mut self, placement: F) -> Self
    where
        F: Fn(&Field, &mut ErrorNode) + Send + Sync + 'static,
    {
        self.error_placement = Some(Arc::new(placement));
        self
    }

    /// Handles valid submissions instead of native submission.
    #[must_use = "builder methods must be chained or built"]
    pub fn submit_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Form) + Send + 'static,
    {
        self.submit_handler = Some(Box::new(handler));
        self
    }

    /// Source loader for message files. Defaults to [`FileLoader`].
    #[must_use = "builder methods must be chained or built"]
    pub fn message_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Binds with the default [`ErrorNodes`] display.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Config`](crate::error::BindError::Config) if the
    /// settings do not resolve.
    pub fn build(mut self) -> BindResult<FormValidator<ErrorNodes>> {
        let settings = Settings::resolve(&self.overrides)?;
        let mut display = ErrorNodes::new(settings.error_element(), settings.error_class.clone());
        if let Some(placement) = self.error_placement.take() {
            display = display.with_placement(placement);
        }
        Ok(self.bind(settings, display))
    }

    /// Binds with a caller-supplied display.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Config`](crate::error::BindError::Config) if the
    /// settings do not resolve.
    pub fn build_with_display<D: ErrorDisplay>(self, display: D) -> BindResult<FormValidator<D>> {
        let settings = Settings::resolve(&self.overrides)?;
        Ok(self.bind(settings, display))
    }

    fn bind<D: ErrorDisplay>(self, mut settings: Settings, display: D) -> FormValidator<D> {
        for (name, rule) in self.rules {
            settings.add_rule(&name, rule);
        }

        let ignore = settings.ignore.as_deref().and_then(|source| {
            Selector::parse(source)
                .inspect_err(|e| {
                    formguard_log::warn!(selector = source, error = %e, "ignore selector disabled");
                })
                .ok()
        });
        let tracked = self
            .form
            .fields()
            .filter(|(_, field)| ignore.as_ref().is_none_or(|s| !s.matches(*field)))
            .map(|(id, _)| id)
            .collect::<Vec<_>>();

        formguard_log::debug!(
            form = ?self.form.id(),
            fields = self.form.len(),
            tracked = tracked.len(),
            "validator bound"
        );

        let catalog = Arc::new(ArcSwap::from_pointee(settings.messages.clone()));
        FormValidator {
            form: self.form,
            settings,
            catalog,
            tracked,
            display,
            submit_handler: self.submit_handler,
            loader: self
                .loader
                .unwrap_or_else(|| Arc::new(FileLoader::new())),
        }
    }
}
