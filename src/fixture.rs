//! TOML page fixtures.
//!
//! A fixture describes the markup the components attach to:
//!
//! ```toml
//! [viewport]
//! height = 800
//!
//! [body]
//! class = ["light"]
//!
//! [[element]]
//! tag = "section"
//! id = "about"
//! top = 900
//! height = 600
//!
//! [[element]]
//! tag = "h2"
//! parent = "about"
//! text = "About me"
//! ```
//!
//! Elements are appended in file order; `parent` refers to the `id` of an
//! element declared earlier and defaults to `<body>`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::dom::{Document, ElementId};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read page fixture '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse page fixture: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Element #{index} ({tag}) refers to unknown parent '{parent}'")]
    UnknownParent {
        index: usize,
        tag: String,
        parent: String,
    },

    #[error("Duplicate element id '{0}'")]
    DuplicateId(String),
}

#[derive(Debug, Deserialize)]
pub struct ViewportFixture {
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default = "default_viewport_height")]
    pub height: f64,
}

impl Default for ViewportFixture {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            height: default_viewport_height(),
        }
    }
}

fn default_viewport_height() -> f64 {
    800.0
}

#[derive(Debug, Deserialize, Default)]
pub struct BodyFixture {
    #[serde(default)]
    pub class: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ElementFixture {
    pub tag: String,
    pub id: Option<String>,
    pub parent: Option<String>,
    #[serde(default)]
    pub class: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// `data-*` fields, keyed without the prefix.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageFixture {
    #[serde(default)]
    pub viewport: ViewportFixture,
    #[serde(default)]
    pub body: BodyFixture,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementFixture>,
}

impl PageFixture {
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|e| FixtureError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, FixtureError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the document tree.
    pub fn into_document(self) -> Result<Document, FixtureError> {
        let mut doc = Document::new();
        doc.viewport.scroll_to(self.viewport.scroll_y);
        doc.viewport.inner_height = self.viewport.height.max(0.0);
        let body = doc.body();
        for class in &self.body.class {
            doc.add_class(body, class);
        }

        let mut ids: HashMap<String, ElementId> = HashMap::new();
        for (index, fixture) in self.elements.into_iter().enumerate() {
            let parent = match &fixture.parent {
                Some(parent) => Some(*ids.get(parent).ok_or_else(|| FixtureError::UnknownParent {
                    index,
                    tag: fixture.tag.clone(),
                    parent: parent.clone(),
                })?),
                None => None,
            };

            let id = doc.create_element(&fixture.tag, parent);
            if let Some(el_id) = &fixture.id {
                if ids.insert(el_id.clone(), id).is_some() {
                    return Err(FixtureError::DuplicateId(el_id.clone()));
                }
            }

            let el = doc.element_mut(id);
            el.id = fixture.id;
            el.text = fixture.text;
            el.value = fixture.value;
            el.disabled = fixture.disabled;
            el.layout.top = fixture.top;
            el.layout.height = fixture.height;
            for class in &fixture.class {
                el.add_class(class);
            }
            for (name, value) in &fixture.attributes {
                el.set_attribute(name, value);
            }
            for (key, value) in &fixture.data {
                el.set_attribute(&format!("data-{}", key), value);
            }
            for (property, value) in &fixture.style {
                el.set_style(property, value);
            }
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Selector;

    #[test]
    fn test_builds_nested_tree() {
        let doc = PageFixture::parse(
            r#"
            [viewport]
            height = 600

            [body]
            class = ["light"]

            [[element]]
            tag = "form"
            id = "contact-form"
            attributes = { action = "https://example.com/f", method = "post" }

            [[element]]
            tag = "input"
            parent = "contact-form"
            attributes = { name = "email" }
            value = "a@b.c"

            [[element]]
            tag = "button"
            class = ["view-details"]
            data = { title = "Crate", live = "" }
            top = 120
            "#,
        )
        .unwrap()
        .into_document()
        .unwrap();

        assert_eq!(doc.viewport.inner_height, 600.0);
        assert!(doc.has_class(doc.body(), "light"));
        let form = doc.get_element_by_id("contact-form").unwrap();
        assert_eq!(doc.attribute(form, "method"), Some("post"));
        let input = doc
            .select_within(form, &Selector::parse("input").unwrap())
            .unwrap();
        assert_eq!(doc.element(input).value, "a@b.c");
        let trigger = doc.select(&Selector::parse(".view-details").unwrap()).unwrap();
        assert_eq!(doc.data(trigger, "title"), Some("Crate"));
        assert_eq!(doc.data(trigger, "live"), Some(""));
        assert_eq!(doc.layout(trigger).top, 120.0);
    }

    #[test]
    fn test_unknown_parent() {
        let err = PageFixture::parse(
            r#"
            [[element]]
            tag = "p"
            parent = "missing"
            "#,
        )
        .unwrap()
        .into_document()
        .unwrap_err();
        assert!(matches!(err, FixtureError::UnknownParent { index: 0, .. }));
    }

    #[test]
    fn test_duplicate_id() {
        let err = PageFixture::parse(
            r#"
            [[element]]
            tag = "p"
            id = "a"

            [[element]]
            tag = "p"
            id = "a"
            "#,
        )
        .unwrap()
        .into_document()
        .unwrap_err();
        assert!(matches!(err, FixtureError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            PageFixture::parse("[[element]]\ntag = "),
            Err(FixtureError::ParseError(_))
        ));
    }
}
