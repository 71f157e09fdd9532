//! Host form model
//!
//! A [`Form`] owns its [`Field`]s in document order; fields are addressed by
//! [`FieldId`]. A [`Document`] holds forms until one is taken for binding.

mod field;
mod selector;

pub use field::{CUSTOM_MESSAGE_ATTR, Field, FieldKind, SelectOption};
pub use selector::{Element, Selector};

use indexmap::{IndexMap, IndexSet};

use crate::error::{BindError, BindResult};

/// Position of a field within its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// FORM
// ============================================================================

/// A form and its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    id: Option<String>,
    classes: IndexSet<String>,
    attributes: IndexMap<String, String>,
    fields: Vec<Field>,
}

impl Form {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Appends a field and returns its id.
    pub fn add_field(&mut self, field: Field) -> FieldId {
        self.fields.push(field);
        FieldId(self.fields.len() - 1)
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.0)
    }

    /// All fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields.iter().enumerate().map(|(i, f)| (FieldId(i), f))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field with `name`.
    #[must_use]
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .map(FieldId)
    }

    /// First field matching `selector`.
    #[must_use]
    pub fn find(&self, selector: &Selector) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|f| selector.matches(f))
            .map(FieldId)
    }

    /// Every field matching `selector`.
    #[must_use]
    pub fn find_all(&self, selector: &Selector) -> Vec<FieldId> {
        self.fields()
            .filter(|(_, f)| selector.matches(*f))
            .map(|(id, _)| id)
            .collect()
    }

    /// Members of the field's group: every checkable sharing its name and
    /// kind, or just the field itself for other kinds.
    #[must_use]
    pub fn group(&self, id: FieldId) -> Vec<FieldId> {
        let Some(field) = self.field(id) else {
            return Vec::new();
        };
        if !field.kind().is_checkable() {
            return vec![id];
        }
        self.fields()
            .filter(|(_, f)| f.kind() == field.kind() && f.name() == field.name())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of checked members in the field's group.
    #[must_use]
    pub fn checked_in_group(&self, id: FieldId) -> usize {
        self.group(id)
            .into_iter()
            .filter_map(|member| self.field(member))
            .filter(|f| f.is_checked())
            .count()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.classes.contains(class) {
            self.classes.insert(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    /// Restores every field to its initial state.
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(Field::reset);
    }
}

impl Element for Form {
    fn tag(&self) -> &str {
        "form"
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self.attributes.get(name).map(String::as_str),
        }
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// The forms of a page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    forms: Vec<Form>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    pub fn forms(&self) -> impl Iterator<Item = &Form> {
        self.forms.iter()
    }

    /// Removes and returns the single form matching `selector`.
    ///
    /// # Errors
    ///
    /// - [`BindError::Selector`] if the selector is malformed
    /// - [`BindError::FormNotFound`] if nothing matches
    /// - [`BindError::AmbiguousForm`] if more than one form matches
    pub fn take_form(&mut self, selector: &str) -> BindResult<Form> {
        let parsed = Selector::parse(selector)?;
        let matches: Vec<usize> = self
            .forms
            .iter()
            .enumerate()
            .filter(|(_, form)| parsed.matches(*form))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => Err(BindError::FormNotFound {
                selector: selector.to_owned(),
            }),
            [index] => Ok(self.forms.remove(*index)),
            _ => Err(BindError::AmbiguousForm {
                selector: selector.to_owned(),
                count: matches.len(),
            }),
        }
    }
}
