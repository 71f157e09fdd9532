//! Input-like controls.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::selector::Element;

/// Attribute holding a per-field error message override.
pub const CUSTOM_MESSAGE_ATTR: &str = "data-error-message";

const CHECKABLE_DEFAULT_VALUE: &str = "on";

// ============================================================================
// FIELD KIND
// ============================================================================

/// Declared control type, resolved once from the `type` attribute or tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Url,
    File,
    Date,
    Checkbox,
    Radio,
    Number,
    Select,
    Textarea,
    Other,
}

impl FieldKind {
    /// Resolves a `type` string. Unknown types map to [`FieldKind::Other`].
    #[must_use]
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "file" => Self::File,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "number" => Self::Number,
            "select" | "select-one" | "select-multiple" => Self::Select,
            "textarea" => Self::Textarea,
            _ => Self::Other,
        }
    }

    /// Checkbox and radio inputs form groups by name.
    #[must_use]
    pub const fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Tag name the control would render as.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Textarea => "textarea",
            _ => "input",
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::File => "file",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Number => "number",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SELECT OPTION
// ============================================================================

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
    pub default_selected: bool,
}

// ============================================================================
// FIELD
// ============================================================================

/// A named input tracked for validation.
///
/// Built once with the `with_*` methods, then mutated by user interaction
/// through [`set_value`](Self::set_value), [`set_checked`](Self::set_checked),
/// [`attach_file`](Self::attach_file) and [`select_option`](Self::select_option).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: Option<String>,
    name: String,
    kind: FieldKind,
    value: String,
    default_value: String,
    checked: bool,
    default_checked: bool,
    files: Vec<String>,
    options: Vec<SelectOption>,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    error_message: Option<String>,
}

impl Field {
    /// Creates a field from its `type` string and name.
    pub fn new(kind: &str, name: impl Into<String>) -> Self {
        Self::of_kind(FieldKind::parse(kind), name).with_attr("type", kind)
    }

    /// Creates a field of a resolved kind.
    ///
    /// Checkables start with the value `"on"`, which is what a checkbox or
    /// radio without a `value` attribute submits.
    pub fn of_kind(kind: FieldKind, name: impl Into<String>) -> Self {
        let value = if kind.is_checkable() {
            CHECKABLE_DEFAULT_VALUE.to_owned()
        } else {
            String::new()
        };
        Self {
            id: None,
            name: name.into(),
            kind,
            default_value: value.clone(),
            value,
            checked: false,
            default_checked: false,
            files: Vec::new(),
            options: Vec::new(),
            attributes: IndexMap::new(),
            classes: IndexSet::new(),
            error_message: None,
        }
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets both the current and the initial value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.default_value.clone_from(&self.value);
        self
    }

    /// Sets both the current and the initial checked state.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self.default_checked = checked;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Marks the field `required`.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(self) -> Self {
        self.with_attr("required", "")
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Adds a select option; `selected` is also its initial state.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_option(mut self, value: impl Into<String>, selected: bool) -> Self {
        self.options.push(SelectOption {
            value: value.into(),
            selected,
            default_selected: selected,
        });
        self
    }

    /// Overrides every message this field would show.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The id if set, otherwise the name. Keys the field's error node.
    #[must_use]
    pub fn key(&self) -> &str {
        self.id.as_deref().filter(|id| !id.is_empty()).unwrap_or(&self.name)
    }

    /// Current value as the control would submit it.
    ///
    /// Selects report their first selected option, file inputs their first
    /// attached file, checkables their `value` attribute.
    #[must_use]
    pub fn value(&self) -> &str {
        match self.kind {
            FieldKind::Select => self
                .options
                .iter()
                .find(|o| o.selected)
                .map_or("", |o| o.value.as_str()),
            FieldKind::File => self.files.first().map_or("", String::as_str),
            _ => &self.value,
        }
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.attributes.contains_key("required")
    }

    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Values of all selected options.
    #[must_use]
    pub fn selected_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect()
    }

    /// Raw attribute value from the attribute map.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value, trimmed, `None` when absent or blank.
    #[must_use]
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Per-field message override, from [`with_error_message`](Self::with_error_message)
    /// or the `data-error-message` attribute.
    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or_else(|| self.attribute(CUSTOM_MESSAGE_ATTR))
            .filter(|m| !m.is_empty())
    }

    #[must_use]
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn attach_file(&mut self, file_name: impl Into<String>) {
        self.files.push(file_name.into());
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    /// Selects the option with `value`. Single selects deselect every other
    /// option; `multiple` selects toggle only the named one on.
    ///
    /// Returns false if no option has that value.
    pub fn select_option(&mut self, value: &str) -> bool {
        if !self.options.iter().any(|o| o.value == value) {
            return false;
        }
        let multiple = self.attributes.contains_key("multiple");
        for option in &mut self.options {
            if option.value == value {
                option.selected = true;
            } else if !multiple {
                option.selected = false;
            }
        }
        true
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.classes.contains(class) {
            self.classes.insert(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    /// Restores the initial value, checked state and selection; drops files.
    pub fn reset(&mut self) {
        self.value.clone_from(&self.default_value);
        self.checked = self.default_checked;
        self.files.clear();
        for option in &mut self.options {
            option.selected = option.default_selected;
        }
    }
}

impl Element for Field {
    fn tag(&self) -> &str {
        self.kind.tag()
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
            "name" => Some(&self.name),
            "type" => Some(self.attribute("type").unwrap_or(self.kind.as_str())),
            "class" => None,
            _ => self.attribute(name),
        }
    }
}
