//! Document arena and viewport.

use std::fmt;

use super::element::{Element, ElementId, Layout};
use super::selector::Selector;

/// The scrollable window the document is displayed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset (`window.scrollY`).
    pub scroll_y: f64,
    /// Visible height (`window.innerHeight`).
    pub inner_height: f64,
    /// Last known pointer position in client coordinates.
    pub pointer: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            inner_height: 800.0,
            pointer: (0.0, 0.0),
        }
    }
}

impl Viewport {
    /// Scroll to an absolute offset, clamped at the top of the page.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Visible range `[top, bottom)` in page coordinates.
    pub fn visible_range(&self) -> (f64, f64) {
        (self.scroll_y, self.scroll_y + self.inner_height)
    }
}

/// An element tree rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    pub viewport: Viewport,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: ElementId(0),
            viewport: Viewport::default(),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Append a new element under `parent` (or `<body>` when `None`).
    pub fn create_element(&mut self, tag: &str, parent: Option<ElementId>) -> ElementId {
        let parent = parent.unwrap_or(self.body);
        let id = ElementId(self.elements.len());
        let mut element = Element::new(tag);
        element.parent = Some(parent);
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    /// All descendants of `root` in tree order, excluding `root` itself.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.element(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.element(id).children.iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|el| self.element(*el).id.as_deref() == Some(id))
    }

    /// First element in tree order matching `selector` (`querySelector`).
    pub fn select(&self, selector: &Selector) -> Option<ElementId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|id| selector.matches(self.element(*id)))
    }

    /// Every element in tree order matching `selector` (`querySelectorAll`).
    pub fn select_all(&self, selector: &Selector) -> Vec<ElementId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .filter(|id| selector.matches(self.element(*id)))
            .collect()
    }

    /// First descendant of `root` matching `selector`.
    pub fn select_within(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|id| selector.matches(self.element(*id)))
    }

    pub fn select_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| selector.matches(self.element(*id)))
            .collect()
    }

    /// Nearest inclusive ancestor of `id` matching `selector` (`Element.closest`).
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(el) = current {
            if selector.matches(self.element(el)) {
                return Some(el);
            }
            current = self.element(el).parent;
        }
        None
    }

    /// Whether `id` is `ancestor` or one of its descendants (`Node.contains`).
    pub fn contains(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.element(el).parent;
        }
        false
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).has_class(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).add_class(class);
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).remove_class(class);
    }

    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        self.element_mut(id).toggle_class(class)
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.element(id).text
    }

    /// Replace the text content. The value is stored verbatim and never
    /// interpreted as markup.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        let el = self.element_mut(id);
        el.text.clear();
        el.text.push_str(text);
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id).style(property)
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        self.element_mut(id).set_style(property, value);
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).attribute(name)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        self.element_mut(id).set_attribute(name, value);
    }

    pub fn data(&self, id: ElementId, key: &str) -> Option<&str> {
        self.element(id).data(key)
    }

    pub fn layout(&self, id: ElementId) -> Layout {
        self.element(id).layout
    }

    fn write_element(&self, f: &mut fmt::Formatter<'_>, id: ElementId, depth: usize) -> fmt::Result {
        let el = self.element(id);
        write!(f, "{:indent$}<{}", "", el.tag, indent = depth * 2)?;
        if let Some(el_id) = &el.id {
            write!(f, " id=\"{}\"", el_id)?;
        }
        if !el.classes.is_empty() {
            write!(f, " class=\"{}\"", el.classes.join(" "))?;
        }
        for (name, value) in &el.attributes {
            write!(f, " {}=\"{}\"", name, value)?;
        }
        for (key, value) in &el.data {
            write!(f, " data-{}=\"{}\"", key, value)?;
        }
        if !el.style.is_empty() {
            let style: Vec<String> = el
                .style
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            write!(f, " style=\"{}\"", style.join("; "))?;
        }
        if el.disabled {
            write!(f, " disabled")?;
        }
        if !el.value.is_empty() {
            write!(f, " value=\"{}\"", el.value)?;
        }
        write!(f, ">")?;
        if !el.text.is_empty() {
            write!(f, " {:?}", el.text)?;
        }
        writeln!(f)?;
        for child in &el.children {
            self.write_element(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "viewport: scroll_y={} inner_height={}",
            self.viewport.scroll_y, self.viewport.inner_height
        )?;
        self.write_element(f, self.body, 0)
    }
}
