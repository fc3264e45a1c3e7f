//! Element node type.

use std::collections::BTreeMap;

/// Handle to an element inside a [`super::Document`].
///
/// Handles are only minted by the document that owns the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Layout box of an element, in page coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    /// Distance from the top of the document to the element's top edge.
    pub top: f64,
    /// Rendered height of the element.
    pub height: f64,
}

impl Layout {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A single element node.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Lowercase tag name (`div`, `a`, `button`, ...).
    pub tag: String,
    /// The `id` attribute, if any.
    pub id: Option<String>,
    /// Text content. Always plain text, never parsed as markup.
    pub text: String,
    /// Current value of form controls.
    pub value: String,
    /// Whether a form control is disabled.
    pub disabled: bool,
    pub layout: Layout,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) data: BTreeMap<String, String>,
    pub(crate) style: BTreeMap<String, String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    /// Toggle a class, returning whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }

    /// Add or remove a class depending on `on`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Look up an attribute by its markup name.
    ///
    /// `id` maps to the element id and `data-*` names map to the data fields,
    /// so selectors can match either form.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_deref();
        }
        if let Some(key) = name.strip_prefix("data-") {
            return self.data.get(key).map(String::as_str);
        }
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if name == "id" {
            self.id = Some(value.to_string());
        } else if let Some(key) = name.strip_prefix("data-") {
            self.data.insert(key.to_string(), value.to_string());
        } else {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Read a `data-*` field by its short name (`title` for `data-title`).
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn data_fields(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Set an inline style property. An empty value removes it.
    pub fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.style.remove(property);
        } else {
            self.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}
