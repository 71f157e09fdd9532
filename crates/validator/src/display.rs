//! Error display boundary
//!
//! The evaluator never touches presentation. After each field verdict the
//! binding layer calls [`ErrorDisplay::show`] or [`ErrorDisplay::clear`];
//! [`ErrorNodes`] is the default, in-memory implementation.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::form::Field;

/// Receives field verdicts for presentation.
pub trait ErrorDisplay {
    /// Shows `message` for `field`.
    fn show(&mut self, field: &Field, message: &str);

    /// Hides any message for `field`.
    fn clear(&mut self, field: &Field);
}

/// Where an error node sits relative to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Immediately after the field with this key
    After(String),
    /// Inside the container with this id
    Inside(String),
}

/// A generated error element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub id: String,
    pub tag: String,
    pub class: Option<String>,
    pub placement: Placement,
    pub message: String,
    pub visible: bool,
}

/// Positions a freshly created error node for a field.
pub type ErrorPlacement = Arc<dyn Fn(&Field, &mut ErrorNode) + Send + Sync>;

/// One error node per field key, created on first use and toggled after.
///
/// Node ids are `{key}-error`, where the key is the field id or, failing
/// that, its name. Nodes are never removed; hiding keeps the last message.
#[derive(Clone, Default)]
pub struct ErrorNodes {
    tag: String,
    class: Option<String>,
    placement: Option<ErrorPlacement>,
    nodes: IndexMap<String, ErrorNode>,
}

impl fmt::Debug for ErrorNodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorNodes")
            .field("tag", &self.tag)
            .field("class", &self.class)
            .field("placement", &self.placement.as_ref().map(|_| "<fn>"))
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl ErrorNodes {
    /// Nodes rendered as `<tag class="...">`.
    pub fn new(tag: impl Into<String>, class: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            class,
            placement: None,
            nodes: IndexMap::new(),
        }
    }

    /// Lets `placement` position each node when it is created.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_placement(mut self, placement: ErrorPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Node for a field key, if one was created.
    #[must_use]
    pub fn node(&self, key: &str) -> Option<&ErrorNode> {
        self.nodes.get(key)
    }

    /// Visible message for a field key.
    #[must_use]
    pub fn visible_message(&self, key: &str) -> Option<&str> {
        self.node(key)
            .filter(|n| n.visible)
            .map(|n| n.message.as_str())
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorNode> {
        self.nodes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_for(&mut self, field: &Field) -> &mut ErrorNode {
        let key = field.key();
        if !self.nodes.contains_key(key) {
            let mut node = ErrorNode {
                id: format!("{key}-error"),
                tag: self.tag.clone(),
                class: self.class.clone(),
                placement: Placement::After(key.to_owned()),
                message: String::new(),
                visible: false,
            };
            if let Some(place) = &self.placement {
                place(field, &mut node);
            }
            formguard_log::trace!(node = %node.id, "error node created");
            self.nodes.insert(key.to_owned(), node);
        }
        &mut self.nodes[key]
    }
}

impl ErrorDisplay for ErrorNodes {
    fn show(&mut self, field: &Field, message: &str) {
        let node = self.node_for(field);
        message.clone_into(&mut node.message);
        node.visible = true;
    }

    fn clear(&mut self, field: &Field) {
        self.node_for(field).visible = false;
    }
}
